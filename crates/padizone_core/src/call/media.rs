//! Media-device collaborator contracts.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Kind of local media track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Audio,
    Video,
}

impl TrackKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }
}

/// Which tracks to request when acquiring a local stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaConstraints {
    pub audio: bool,
    pub video: bool,
}

/// Acquisition failures reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    PermissionDenied,
    DeviceNotFound,
    Other(String),
}

impl Display for MediaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(
                f,
                "Camera and/or microphone access denied. Please grant permissions."
            ),
            Self::DeviceNotFound => write!(f, "No camera or microphone found."),
            Self::Other(message) => write!(f, "Error: {message}"),
        }
    }
}

impl Error for MediaError {}

/// A live local capture stream.
pub trait MediaStream {
    /// Enables or disables every track of `kind`; returns how many tracks
    /// were touched (0 when the stream has no such track).
    fn set_track_enabled(&mut self, kind: TrackKind, enabled: bool) -> usize;

    /// Stops all tracks and releases the devices.
    fn stop(&mut self);
}

/// Platform facility that hands out local capture streams.
pub trait MediaDevices {
    type Stream: MediaStream;

    fn acquire(&mut self, constraints: MediaConstraints) -> Result<Self::Stream, MediaError>;
}
