//! Raw and resolved configuration shapes.
//!
//! `File*` structs mirror the TOML file exactly, everything optional;
//! the resolved structs carry what the rest of the stack actually
//! consumes, with defaults and environment overrides already applied.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use beamcast_model::{BufferHints, LogLevel};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    /// Backend endpoints and credentials.
    #[serde(default)]
    pub backend: FileBackendConfig,
    /// Initial player behavior.
    #[serde(default)]
    pub player: FilePlayerConfig,
    /// Cast sender settings.
    #[serde(default)]
    pub cast: FileCastConfig,
    /// Source catalog location.
    #[serde(default)]
    pub sources: FileSourcesConfig,
}

/// `[backend]` section, raw.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileBackendConfig {
    /// Playback service endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_url: Option<String>,
    /// Owner account identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_uid: Option<String>,
    /// Tenant the media belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// Application token. Prefer the environment for real secrets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_token: Option<String>,
    /// End-user auth token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_token: Option<String>,
    /// Security token service token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sts_token: Option<String>,
}

/// `[player]` section, raw.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FilePlayerConfig {
    /// Player log verbosity code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<u8>,
    /// Whether closed captions start enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_captions: Option<bool>,
    /// Seconds of media required before startup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_threshold: Option<f64>,
    /// Seconds of media required before a rebuffer restart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart_threshold: Option<f64>,
    /// Buffer sizing hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer: Option<BufferHints>,
}

/// `[cast]` section, raw.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCastConfig {
    /// Receiver application to launch instead of the stored or
    /// default one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_app_id: Option<String>,
}

/// `[sources]` section, raw.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileSourcesConfig {
    /// Path to the JSON source catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

/// Resolved `[backend]` settings.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Playback service endpoint.
    pub request_url: url::Url,
    /// Owner account identifier.
    pub owner_uid: String,
    /// Tenant the media belongs to.
    pub tenant_id: String,
    /// Application token.
    pub app_token: String,
    /// End-user auth token.
    pub user_token: String,
    /// Security token service token.
    pub sts_token: String,
}

/// Resolved `[player]` settings.
#[derive(Debug, Clone)]
pub struct PlayerSettings {
    /// Player log verbosity.
    pub log_level: LogLevel,
    /// Whether closed captions start enabled.
    pub closed_captions: bool,
    /// Seconds of media required before startup.
    pub startup_threshold: Option<f64>,
    /// Seconds of media required before a rebuffer restart.
    pub restart_threshold: Option<f64>,
    /// Buffer sizing hints.
    pub buffer: Option<BufferHints>,
}

/// Resolved `[cast]` settings.
#[derive(Debug, Clone)]
pub struct CastSettings {
    /// Configured receiver application id, if any. The persisted
    /// store and the built-in default apply when absent.
    pub receiver_app_id: Option<String>,
}
