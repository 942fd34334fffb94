//! Normalized player events.
//!
//! The router consumes a single event vocabulary regardless of where
//! playback actually happens. The local adapter maps SDK callbacks
//! onto these variants; the cast bridge maps receiver messages onto
//! the same ones, so routing logic never branches on the source.

use crate::markers::AdBreak;
use crate::media::{BufferLengths, ProgramInfo, SeekableRange};
use crate::tracks::{AudioTrack, SubtitleTrack, VideoQuality};

/// Discrete playback states reported by the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCode {
    /// A new playback session produced its first frame.
    PlayStarted,
    /// Playback resumed after a pause or a completed seek.
    PlayResumed,
    /// Playback paused.
    PlayPaused,
    /// A seek is in progress.
    Seeking,
    /// The player stalled waiting for media.
    BufferingStarted,
    /// The stall recovered.
    BufferingStopped,
    /// The end of the program was reached.
    PlayCompleted,
    /// The session is gone and the player is idle.
    Done,
}

impl StateCode {
    /// Maps the numeric codes a cast receiver reports onto the shared
    /// vocabulary. Codes outside the receiver contract yield `None`.
    pub fn from_wire(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::PlayStarted),
            2 => Some(Self::PlayPaused),
            3 => Some(Self::PlayResumed),
            5 => Some(Self::Seeking),
            17 => Some(Self::Done),
            _ => None,
        }
    }
}

/// An event from whichever target currently plays.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// The SDK finished initializing and a player can be created.
    InitComplete,
    /// The device registered with the backend.
    DeviceRegistered,
    /// The source is loaded and playback may start.
    PlayReady,
    /// Periodic position report.
    PositionChanged {
        /// Raw media position, seconds.
        position: f64,
        /// Raw media duration, seconds.
        duration: f64,
        /// Buffered media ahead of the playhead.
        buffer: BufferLengths,
    },
    /// The discrete player state changed.
    StateChanged(StateCode),
    /// A previously issued seek finished.
    SeekComplete,
    /// The live program behind a channel changed.
    ProgramChanged(ProgramInfo),
    /// Fresh stitched ad break data for the current asset.
    AdMarkerData(Vec<AdBreak>),
    /// Playback entered a stitched ad break.
    AdStarted,
    /// Playback left a stitched ad break.
    AdFinished,
    /// The available audio tracks changed.
    AudioTracksChanged(Vec<AudioTrack>),
    /// Subtitle tracks appeared, with the receiver's current pick.
    TextTracksAdded {
        /// All selectable subtitle tracks.
        tracks: Vec<SubtitleTrack>,
        /// Language of the active track, if any.
        current: Option<String>,
    },
    /// The available subtitle tracks changed.
    TextTracksChanged(Vec<SubtitleTrack>),
    /// The player switched quality rungs.
    BitrateChanged(u64),
    /// Periodic metrics snapshot.
    Metrics {
        /// Current seekable window, when the player reports one.
        seekable_range: Option<SeekableRange>,
        /// Quality rungs currently offered.
        qualities: Vec<VideoQuality>,
    },
    /// The backend restricted some player controls for this program.
    ControlRestrictions(Vec<u32>),
    /// The player reported an error.
    Error {
        /// SDK error code.
        code: u32,
        /// Human-readable description.
        message: String,
    },
}

/// SDK error codes that describe blocked user actions rather than
/// broken playback. These surface as a toast and leave the session up.
pub const ADVISORY_ERROR_CODES: std::ops::RangeInclusive<u32> = 224..=231;

impl PlayerEvent {
    /// Whether an error event is advisory (a blocked action) instead
    /// of fatal to the session.
    pub fn is_advisory_error(&self) -> bool {
        matches!(self, Self::Error { code, .. } if ADVISORY_ERROR_CODES.contains(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_cover_the_receiver_contract() {
        assert_eq!(StateCode::from_wire(1), Some(StateCode::PlayStarted));
        assert_eq!(StateCode::from_wire(2), Some(StateCode::PlayPaused));
        assert_eq!(StateCode::from_wire(3), Some(StateCode::PlayResumed));
        assert_eq!(StateCode::from_wire(5), Some(StateCode::Seeking));
        assert_eq!(StateCode::from_wire(17), Some(StateCode::Done));
        assert_eq!(StateCode::from_wire(4), None);
        assert_eq!(StateCode::from_wire(0), None);
    }

    #[test]
    fn advisory_band_is_224_through_231() {
        let advisory = PlayerEvent::Error { code: 224, message: String::new() };
        assert!(advisory.is_advisory_error());
        let advisory = PlayerEvent::Error { code: 231, message: String::new() };
        assert!(advisory.is_advisory_error());
        let fatal = PlayerEvent::Error { code: 232, message: String::new() };
        assert!(!fatal.is_advisory_error());
        let fatal = PlayerEvent::Error { code: 223, message: String::new() };
        assert!(!fatal.is_advisory_error());
        assert!(!PlayerEvent::SeekComplete.is_advisory_error());
    }
}
