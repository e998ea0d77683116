//! Call-screen session state.

use super::media::{MediaConstraints, MediaDevices, MediaError, MediaStream, TrackKind};
use crate::model::contact::{ContactId, EpochMillis};
use log::{info, warn};

/// Voice calls capture audio only; video calls capture both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Voice,
    Video,
}

impl CallKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Voice => "voice",
            Self::Video => "video",
        }
    }

    pub fn constraints(self) -> MediaConstraints {
        MediaConstraints {
            audio: true,
            video: matches!(self, Self::Video),
        }
    }
}

/// Progress of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    Ringing,
    Connected { since: EpochMillis },
    Ended,
}

/// One open call screen and the local stream it holds.
///
/// Media acquisition failure does not abort the session: the screen stays up
/// without a stream and exposes the error through [`CallSession::media_error`].
#[derive(Debug)]
pub struct CallSession<S: MediaStream> {
    contact_id: ContactId,
    kind: CallKind,
    phase: CallPhase,
    muted: bool,
    camera_off: bool,
    speaker_on: bool,
    stream: Option<S>,
    media_error: Option<MediaError>,
}

impl<S: MediaStream> CallSession<S> {
    /// Opens a ringing session and requests the local stream for `kind`.
    pub fn start<D>(devices: &mut D, contact_id: impl Into<ContactId>, kind: CallKind) -> Self
    where
        D: MediaDevices<Stream = S>,
    {
        let (stream, media_error) = match devices.acquire(kind.constraints()) {
            Ok(stream) => {
                info!(
                    "event=call_media_acquire module=call status=ok kind={}",
                    kind.as_str()
                );
                (Some(stream), None)
            }
            Err(err) => {
                warn!(
                    "event=call_media_acquire module=call status=error kind={} error={:?}",
                    kind.as_str(),
                    err
                );
                (None, Some(err))
            }
        };

        Self {
            contact_id: contact_id.into(),
            kind,
            phase: CallPhase::Ringing,
            muted: false,
            camera_off: false,
            speaker_on: false,
            stream,
            media_error,
        }
    }

    pub fn contact_id(&self) -> &str {
        &self.contact_id
    }

    pub fn kind(&self) -> CallKind {
        self.kind
    }

    pub fn phase(&self) -> CallPhase {
        self.phase
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_camera_off(&self) -> bool {
        self.camera_off
    }

    pub fn is_speaker_on(&self) -> bool {
        self.speaker_on
    }

    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    pub fn media_error(&self) -> Option<&MediaError> {
        self.media_error.as_ref()
    }

    /// Marks the remote side as picked up. Only a ringing call can connect.
    pub fn connect(&mut self, now: EpochMillis) -> bool {
        if self.phase != CallPhase::Ringing {
            return false;
        }
        self.phase = CallPhase::Connected { since: now };
        true
    }

    /// Status line for the call screen: `Ringing...`, `mm:ss`, or `Call ended`.
    pub fn status_label(&self, now: EpochMillis) -> String {
        match self.phase {
            CallPhase::Ringing => "Ringing...".to_string(),
            CallPhase::Connected { since } => {
                let seconds = now.saturating_sub(since).max(0) / 1000;
                format!("{:02}:{:02}", seconds / 60, seconds % 60)
            }
            CallPhase::Ended => "Call ended".to_string(),
        }
    }

    /// Flips the microphone. Returns the resulting muted state; unchanged when
    /// there is no audio track to act on.
    pub fn toggle_mute(&mut self) -> bool {
        if self.flip_track(TrackKind::Audio, self.muted) {
            self.muted = !self.muted;
        }
        self.muted
    }

    /// Flips the camera. Returns the resulting camera-off state; unchanged when
    /// there is no video track to act on.
    pub fn toggle_camera(&mut self) -> bool {
        if self.flip_track(TrackKind::Video, self.camera_off) {
            self.camera_off = !self.camera_off;
        }
        self.camera_off
    }

    /// Flips speaker output. Needs no device track.
    pub fn toggle_speaker(&mut self) -> bool {
        if self.phase != CallPhase::Ended {
            self.speaker_on = !self.speaker_on;
        }
        self.speaker_on
    }

    /// Hangs up and releases the stream. Safe to call more than once.
    pub fn end(&mut self) {
        if self.phase == CallPhase::Ended {
            return;
        }
        self.phase = CallPhase::Ended;
        self.release_stream();
        info!(
            "event=call_end module=call status=ok kind={}",
            self.kind.as_str()
        );
    }

    fn flip_track(&mut self, kind: TrackKind, currently_disabled: bool) -> bool {
        if self.phase == CallPhase::Ended {
            return false;
        }
        let Some(stream) = self.stream.as_mut() else {
            warn!(
                "event=call_toggle module=call status=skipped track={} reason=no_stream",
                kind.as_str()
            );
            return false;
        };

        let touched = stream.set_track_enabled(kind, currently_disabled);
        if touched == 0 {
            warn!(
                "event=call_toggle module=call status=skipped track={} reason=no_track",
                kind.as_str()
            );
            return false;
        }
        true
    }

    fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
    }
}

impl<S: MediaStream> Drop for CallSession<S> {
    fn drop(&mut self) {
        self.release_stream();
    }
}
