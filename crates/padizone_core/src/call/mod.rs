//! Voice and video call sessions.
//!
//! # Responsibility
//! - Drive call-screen state (ringing, connected timer, mute/camera/speaker).
//! - Resolve an incoming call into answer, decline, remind-later or a message.
//! - Own the local media stream for the lifetime of the call screen.
//!
//! # Invariants
//! - Camera/microphone access is an external collaborator behind
//!   [`MediaDevices`]; core never talks to devices directly.
//! - An acquired stream is stopped exactly once, on `end()` or on drop.

mod incoming;
mod media;
mod session;

pub use incoming::{missed_call_note, IncomingCall, MissedCallReply};

pub use media::{MediaConstraints, MediaDevices, MediaError, MediaStream, TrackKind};
pub use session::{CallKind, CallPhase, CallSession};
