//! Player metrics, control identities and log verbosity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Player log verbosity, carried on the wire as a small integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(into = "u8", from = "u8")]
pub enum LogLevel {
    /// No player logging.
    Off,
    /// Errors only.
    Error,
    /// Errors and warnings.
    #[default]
    Warn,
    /// Informational logging.
    Info,
    /// Full debug output.
    Debug,
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> u8 {
        match level {
            LogLevel::Off => 0,
            LogLevel::Error => 1,
            LogLevel::Warn => 2,
            LogLevel::Info => 3,
            LogLevel::Debug => 4,
        }
    }
}

impl From<u8> for LogLevel {
    /// Unknown codes clamp to the most verbose level rather than
    /// silencing the player.
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Off,
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            _ => Self::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        f.write_str(name)
    }
}

/// Identity of a transport control, used when the backend restricts
/// controls per program and when the UI is told to enable or disable
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerControl {
    /// Restart the program from its beginning.
    Restart,
    /// Jump back by the short skip interval.
    SkipBackward,
    /// Play / resume.
    Play,
    /// Pause.
    Pause,
    /// Stop and tear down.
    Stop,
    /// Jump forward by the long skip interval.
    SkipForward,
    /// Volume slider and mute.
    Volume,
    /// The scrubber itself.
    VideoSlider,
    /// Ad marker overlay.
    ShowAds,
    /// Skip the running ad break.
    SkipAds,
    /// Return to the live edge.
    LiveNow,
}

impl PlayerControl {
    /// Stable identifier used in logs and by the UI layer.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restart => "restart",
            Self::SkipBackward => "skip-backward",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::SkipForward => "skip-forward",
            Self::Volume => "volume",
            Self::VideoSlider => "video-slider",
            Self::ShowAds => "show-ads",
            Self::SkipAds => "skip-ads",
            Self::LiveNow => "live-now",
        }
    }

    /// Controls blocked by a backend restriction code, or an empty
    /// slice for codes that do not map to controls.
    pub fn blocked_by(code: u32) -> &'static [PlayerControl] {
        match code {
            224 => &[Self::SkipForward],
            225 => &[Self::SkipBackward],
            228 | 229 => &[Self::Pause],
            231 => &[Self::Restart],
            233 => &[
                Self::VideoSlider,
                Self::SkipForward,
                Self::SkipBackward,
                Self::Restart,
            ],
            _ => &[],
        }
    }
}

impl fmt::Display for PlayerControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A partial metrics update for the diagnostics overlay. Only the
/// populated fields change; the rest keep their previous value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsUpdate {
    /// Human-readable player state, e.g. "Stalled".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_state: Option<String>,
    /// Seconds from load to first frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_time: Option<f64>,
    /// Buffered video, seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_buffer_length: Option<f64>,
    /// Buffered audio, seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_buffer_length: Option<f64>,
    /// Current playback rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback_speed: Option<f64>,
    /// Current quality rung bitrate, bits per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u64>,
    /// Whether closed captions are rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_captions: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_round_trips_through_the_wire_code() {
        for level in [
            LogLevel::Off,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
        ] {
            assert_eq!(LogLevel::from(u8::from(level)), level);
        }
        // Unknown codes land on Debug.
        assert_eq!(LogLevel::from(42u8), LogLevel::Debug);
    }

    #[test]
    fn restriction_codes_map_to_their_controls() {
        assert_eq!(PlayerControl::blocked_by(224), &[PlayerControl::SkipForward]);
        assert_eq!(PlayerControl::blocked_by(225), &[PlayerControl::SkipBackward]);
        assert_eq!(PlayerControl::blocked_by(228), &[PlayerControl::Pause]);
        assert_eq!(PlayerControl::blocked_by(229), &[PlayerControl::Pause]);
        assert_eq!(PlayerControl::blocked_by(231), &[PlayerControl::Restart]);
        assert_eq!(PlayerControl::blocked_by(233).len(), 4);
        assert!(PlayerControl::blocked_by(230).is_empty());
        assert!(PlayerControl::blocked_by(0).is_empty());
    }
}
