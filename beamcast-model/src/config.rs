//! Playback session configuration.

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::metrics::LogLevel;

/// Whether a source is a live channel or an on-demand asset.
///
/// Configuration files spell this out; the receiver wire carries it as
/// a numeric code (see [`mode_code`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlaybackMode {
    /// On-demand asset with a fixed duration.
    #[default]
    Vod,
    /// Live channel, optionally timeshiftable.
    Live,
}

impl PlaybackMode {
    /// True for live channels.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }
}

/// Serde adapter for the numeric `mode` field of the init envelope,
/// `0` for on-demand and `1` for live.
pub mod mode_code {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::PlaybackMode;

    /// Serializes the mode as its wire code.
    pub fn serialize<S: Serializer>(
        mode: &PlaybackMode,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        ser.serialize_u8(match mode {
            PlaybackMode::Vod => 0,
            PlaybackMode::Live => 1,
        })
    }

    /// Deserializes the wire code back into a mode.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<PlaybackMode, D::Error> {
        match u8::deserialize(de)? {
            0 => Ok(PlaybackMode::Vod),
            1 => Ok(PlaybackMode::Live),
            other => Err(serde::de::Error::custom(format!(
                "unknown playback mode code {other}"
            ))),
        }
    }
}

/// Buffer sizing hints forwarded to whichever target plays the source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferHints {
    /// Target forward buffer, seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward: Option<f64>,
    /// Buffer retained behind the playhead, seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backward: Option<f64>,
}

/// Beacon fail-open settings, applied best effort during playback.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeaconFailover {
    /// Whether playback may continue when beacons cannot be delivered.
    pub enabled: bool,
    /// How long playback may continue without beacons, seconds.
    pub duration: u32,
    /// First retry interval, seconds.
    pub init_interval: u32,
    /// Steady-state retry interval, seconds.
    pub final_interval: u32,
}

/// A selectable source as listed in the source catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalSource {
    /// Display name shown in the source picker.
    pub name: String,
    /// Media identifier handed to the init command.
    pub media_uid: String,
    /// Live or on-demand.
    #[serde(default)]
    pub playback_mode: PlaybackMode,
    /// Whether the live channel supports timeshift.
    #[serde(default)]
    pub is_dvr: bool,
    /// Per-source playback endpoint override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_url: Option<Url>,
}

/// The full configuration of one playback attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerConfig {
    /// Application token issued by the backend.
    pub app_token: String,
    /// End-user auth token.
    pub user_token: String,
    /// Security token service token.
    pub sts_token: String,
    /// Owner account identifier.
    pub owner_uid: String,
    /// Tenant the media belongs to.
    pub tenant_id: String,
    /// Identifier of the media to load.
    pub media_uid: String,
    /// Playback service endpoint.
    pub request_url: Url,
    /// Live or on-demand.
    #[serde(default)]
    pub playback_mode: PlaybackMode,
    /// Whether the live channel supports timeshift.
    #[serde(default)]
    pub is_dvr: bool,
    /// Resume position in seconds.
    #[serde(default)]
    pub start_bookmark: f64,
    /// Player log verbosity.
    #[serde(default)]
    pub log_level: LogLevel,
    /// Whether closed captions start enabled.
    #[serde(default)]
    pub closed_captions: bool,
    /// Buffer sizing hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_hints: Option<BufferHints>,
    /// Seconds of media required before startup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_threshold: Option<f64>,
    /// Seconds of media required before a rebuffer restart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_threshold: Option<f64>,
    /// Beacon fail-open settings.
    #[serde(default)]
    pub beacon_failover: BeaconFailover,
    /// Lowest quality rung the player may pick, bits per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_bandwidth: Option<u64>,
    /// Highest quality rung the player may pick, bits per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bandwidth: Option<u64>,
    /// Rung the player starts on, bits per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_bandwidth: Option<u64>,
}

impl PlayerConfig {
    /// Builds the init payload for this configuration, minting a fresh
    /// session id.
    pub fn to_init_params(&self) -> crate::command::InitParams {
        crate::command::InitParams {
            app_token: self.app_token.clone(),
            is_cc_enabled: self.closed_captions,
            log_level: self.log_level,
            media_uid: self.media_uid.clone(),
            mode: self.playback_mode,
            primary: true,
            request_url: self.request_url.to_string(),
            sts_token: self.sts_token.clone(),
            owner_uid: self.owner_uid.clone(),
            tenant_id: self.tenant_id.clone(),
            user_token: self.user_token.clone(),
            session_uid: Uuid::new_v4().to_string(),
            start_bookmark: self.start_bookmark,
            is_dvr: self.is_dvr,
            buffer_data: self.buffer_hints,
            startup_threshold: self.startup_threshold,
            restart_threshold: self.restart_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PlayerConfig {
        PlayerConfig {
            app_token: "app".into(),
            user_token: "user".into(),
            sts_token: "sts".into(),
            owner_uid: "owner".into(),
            tenant_id: "tenant".into(),
            media_uid: "m-1".into(),
            request_url: "https://playback.example.com/v1".parse().unwrap(),
            playback_mode: PlaybackMode::Live,
            is_dvr: true,
            start_bookmark: 0.0,
            log_level: LogLevel::default(),
            closed_captions: false,
            buffer_hints: None,
            startup_threshold: Some(4.0),
            restart_threshold: None,
            beacon_failover: BeaconFailover::default(),
            min_bandwidth: None,
            max_bandwidth: None,
            start_bandwidth: None,
        }
    }

    #[test]
    fn init_params_inherit_the_config() {
        let params = config().to_init_params();
        assert_eq!(params.media_uid, "m-1");
        assert!(params.is_dvr);
        assert_eq!(params.mode, PlaybackMode::Live);
        assert_eq!(params.startup_threshold, Some(4.0));
        assert!(!params.session_uid.is_empty());
    }

    #[test]
    fn each_init_gets_its_own_session_uid() {
        let cfg = config();
        assert_ne!(
            cfg.to_init_params().session_uid,
            cfg.to_init_params().session_uid
        );
    }

    #[test]
    fn playback_mode_spelling_matches_the_catalog() {
        assert_eq!(
            serde_json::to_string(&PlaybackMode::Live).unwrap(),
            "\"LIVE\""
        );
        let mode: PlaybackMode = serde_json::from_str("\"VOD\"").unwrap();
        assert_eq!(mode, PlaybackMode::Vod);
    }
}
