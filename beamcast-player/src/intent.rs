//! UI intent vocabulary.

use beamcast_model::{BeaconFailover, ExternalSource, LogLevel};

/// Everything the UI can ask the router to do.
///
/// Each variant corresponds to one control or settings affordance.
/// The router decides per intent whether the local player or the cast
/// receiver handles it.
#[derive(Debug, Clone, PartialEq)]
pub enum UiIntent {
    /// The play/pause button. Starts a session when idle, otherwise
    /// toggles pause.
    PlayPause,
    /// Restart the program from its beginning.
    Restart,
    /// Jump back by the short skip interval.
    SkipBack,
    /// Jump forward by the long skip interval.
    SkipForward,
    /// Stop and tear the session down.
    Stop,
    /// Return to the live edge.
    LiveNow,
    /// Mute or unmute.
    VolumeToggle {
        /// Desired mute state.
        mute: bool,
    },
    /// The volume slider moved.
    VolumeSliderChange {
        /// New level, `0.0..=1.0`.
        level: f64,
    },
    /// The closed captions switch flipped.
    CcToggle {
        /// Desired caption state.
        enabled: bool,
    },
    /// A subtitle track was picked, `None` meaning "off".
    SubtitleTrackSelect {
        /// Language tag of the chosen track.
        track: Option<String>,
    },
    /// An audio track was picked.
    AudioTrackSelect {
        /// Language tag of the chosen track.
        track: String,
    },
    /// A playback speed was picked.
    PlaybackSpeedSelect {
        /// New rate, `1.0` being realtime.
        speed: f64,
    },
    /// A quality rung was picked.
    PlaybackQualitySelect {
        /// Selection key of the rung.
        quality_id: String,
    },
    /// A player log verbosity was picked.
    LogLevelSelect {
        /// New verbosity.
        level: LogLevel,
    },
    /// The seekbar knob was dropped at a new position.
    VideoSliderPositionChange {
        /// Knob position as a percentage of the bar.
        percent: f64,
    },
    /// A different source was chosen from the catalog.
    SourceListItemSelected {
        /// The chosen source entry.
        source: ExternalSource,
    },
    /// Skip the running ad break.
    SkipAdvertisement,
    /// Query the in-home network status.
    GetInhomeStatus,
    /// Override the in-home network status.
    SetInhomeStatus {
        /// Desired status.
        in_home: bool,
    },
    /// Beacon fail-open settings changed mid-session.
    BeaconConfigChange {
        /// The new settings.
        config: BeaconFailover,
    },
}
