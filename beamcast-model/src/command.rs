//! The command vocabulary shared by both playback targets.
//!
//! Every UI intent the router accepts is reduced to one of these
//! commands. Locally they map onto player trait calls; on the cast
//! path they serialize directly into the receiver envelope, with the
//! variant tag as `commandType` and the payload as `commandData`.

use serde::{Deserialize, Serialize};

use crate::config::PlaybackMode;
use crate::metrics::LogLevel;

/// A routed playback command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "commandType", content = "commandData")]
pub enum PlaybackCommand {
    /// Load a source on the target and begin playback.
    #[serde(rename = "init")]
    Init(Box<InitParams>),
    /// Start rendering a loaded source.
    #[serde(rename = "play")]
    Play,
    /// Resume from a paused position.
    #[serde(rename = "resume")]
    Resume,
    /// Freeze at the current position.
    #[serde(rename = "pause")]
    Pause,
    /// Tear playback down.
    #[serde(rename = "stop")]
    Stop,
    /// Jump to a raw media position, milliseconds.
    #[serde(rename = "seek")]
    Seek(f64),
    /// Leave timeshift and rejoin the live edge.
    #[serde(rename = "liveNow")]
    LiveNow,
    /// Mute or unmute audio.
    #[serde(rename = "setMute")]
    SetMute(bool),
    /// Set the audio volume, `0.0..=1.0`.
    #[serde(rename = "setVolume")]
    SetVolume(f64),
    /// Select an audio track by language tag.
    #[serde(rename = "setAudio")]
    SetAudioTrack(String),
    /// Select a subtitle track by language tag. `None` turns
    /// subtitles off.
    #[serde(rename = "setSubtitle")]
    SetSubtitleTrack(Option<String>),
    /// Toggle closed caption rendering.
    #[serde(rename = "enableCC")]
    EnableCc(bool),
    /// Change the playback rate, `1.0` being realtime.
    #[serde(rename = "setPlaySpeed")]
    SetPlaybackSpeed(f64),
    /// Pin playback to a quality rung.
    #[serde(rename = "setVideoQuality")]
    SetVideoQuality(String),
    /// Adjust player log verbosity.
    #[serde(rename = "setLogLevel")]
    SetLogLevel(LogLevel),
}

impl PlaybackCommand {
    /// The wire tag, also used as the logging name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Play => "play",
            Self::Resume => "resume",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Seek(_) => "seek",
            Self::LiveNow => "liveNow",
            Self::SetMute(_) => "setMute",
            Self::SetVolume(_) => "setVolume",
            Self::SetAudioTrack(_) => "setAudio",
            Self::SetSubtitleTrack(_) => "setSubtitle",
            Self::EnableCc(_) => "enableCC",
            Self::SetPlaybackSpeed(_) => "setPlaySpeed",
            Self::SetVideoQuality(_) => "setVideoQuality",
            Self::SetLogLevel(_) => "setLogLevel",
        }
    }
}

/// Everything a target needs to start a playback session.
///
/// Field names follow the receiver contract, which is why this
/// serializes in camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitParams {
    /// Application token issued by the backend.
    pub app_token: String,
    /// Whether closed captions start enabled.
    #[serde(rename = "isCCenabled")]
    pub is_cc_enabled: bool,
    /// Player log verbosity to start with.
    pub log_level: LogLevel,
    /// Identifier of the media to load.
    pub media_uid: String,
    /// Live or on-demand, as the receiver's numeric code.
    #[serde(with = "crate::config::mode_code")]
    pub mode: PlaybackMode,
    /// Whether this sender owns the primary session.
    pub primary: bool,
    /// Playback service endpoint.
    pub request_url: String,
    /// Security token service token.
    pub sts_token: String,
    /// Owner account identifier.
    pub owner_uid: String,
    /// Tenant the media belongs to.
    pub tenant_id: String,
    /// End-user auth token.
    pub user_token: String,
    /// Session correlation id.
    pub session_uid: String,
    /// Resume position in milliseconds, `0.0` to start at the
    /// beginning.
    pub start_bookmark: f64,
    /// Whether the live channel supports timeshift.
    pub is_dvr: bool,
    /// Buffer sizing hints forwarded verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_data: Option<crate::config::BufferHints>,
    /// Seconds of media required before startup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_threshold: Option<f64>,
    /// Seconds of media required before a rebuffer restart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_threshold: Option<f64>,
}
