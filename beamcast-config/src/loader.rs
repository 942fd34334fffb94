//! Settings loading and resolution.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use beamcast_model::{ExternalSource, LogLevel, PlayerConfig};

use crate::models::{
    BackendSettings, CastSettings, FileConfig, PlayerSettings,
};
use crate::util::{non_empty_var, parse_bool_var};

/// Environment variables that override the settings file. Secrets are
/// expected to arrive this way rather than sitting in TOML.
const ENV_REQUEST_URL: &str = "BEAMCAST_REQUEST_URL";
const ENV_APP_TOKEN: &str = "BEAMCAST_APP_TOKEN";
const ENV_USER_TOKEN: &str = "BEAMCAST_USER_TOKEN";
const ENV_STS_TOKEN: &str = "BEAMCAST_STS_TOKEN";
const ENV_RECEIVER_APP_ID: &str = "BEAMCAST_RECEIVER_APP_ID";
const ENV_CLOSED_CAPTIONS: &str = "BEAMCAST_CLOSED_CAPTIONS";

const DEFAULT_FILE_NAME: &str = "beamcast.toml";

/// A problem reading, parsing or resolving the settings.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The settings file could not be read.
    #[error("failed to read settings file {path}")]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The settings file is not valid TOML.
    #[error("failed to parse settings file {path}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
    /// A required value is absent from both file and environment.
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
    /// A URL setting did not parse.
    #[error("invalid url in setting `{setting}`")]
    InvalidUrl {
        /// Which setting held the bad value.
        setting: &'static str,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

/// Fully resolved application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Backend endpoints and credentials.
    pub backend: BackendSettings,
    /// Initial player behavior.
    pub player: PlayerSettings,
    /// Cast sender settings.
    pub cast: CastSettings,
    /// Path to the JSON source catalog, if configured.
    pub catalog_path: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from `path`, or from the default locations when
    /// no explicit path is given: `./beamcast.toml`, then
    /// `<user config dir>/beamcast/beamcast.toml`. A missing file is
    /// not an error; resolution then runs on defaults plus the
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let file = match path {
            Some(p) => Some(read_file(p)?),
            None => match default_locations().into_iter().find(|p| p.is_file()) {
                Some(p) => Some(read_file(&p)?),
                None => {
                    debug!("no settings file found, using defaults");
                    None
                }
            },
        };
        Self::resolve(file.unwrap_or_default())
    }

    /// Resolves a raw file config against the environment.
    pub fn resolve(file: FileConfig) -> Result<Self, ConfigLoadError> {
        let raw_url = non_empty_var(ENV_REQUEST_URL)
            .or(file.backend.request_url)
            .ok_or(ConfigLoadError::Missing("backend.request_url"))?;
        let request_url = raw_url.parse().map_err(|source| {
            ConfigLoadError::InvalidUrl { setting: "backend.request_url", source }
        })?;

        let backend = BackendSettings {
            request_url,
            owner_uid: file.backend.owner_uid.unwrap_or_default(),
            tenant_id: file.backend.tenant_id.unwrap_or_default(),
            app_token: non_empty_var(ENV_APP_TOKEN)
                .or(file.backend.app_token)
                .ok_or(ConfigLoadError::Missing("backend.app_token"))?,
            user_token: non_empty_var(ENV_USER_TOKEN)
                .or(file.backend.user_token)
                .unwrap_or_default(),
            sts_token: non_empty_var(ENV_STS_TOKEN)
                .or(file.backend.sts_token)
                .unwrap_or_default(),
        };

        let player = PlayerSettings {
            log_level: file.player.log_level.map(LogLevel::from).unwrap_or_default(),
            closed_captions: parse_bool_var(ENV_CLOSED_CAPTIONS)
                .or(file.player.closed_captions)
                .unwrap_or(false),
            startup_threshold: file.player.startup_threshold,
            restart_threshold: file.player.restart_threshold,
            buffer: file.player.buffer,
        };

        let cast = CastSettings {
            receiver_app_id: non_empty_var(ENV_RECEIVER_APP_ID)
                .or(file.cast.receiver_app_id),
        };

        Ok(Self { backend, player, cast, catalog_path: file.sources.catalog })
    }

    /// Materializes the playback configuration for one catalog entry.
    pub fn config_for(&self, source: &ExternalSource) -> PlayerConfig {
        PlayerConfig {
            app_token: self.backend.app_token.clone(),
            user_token: self.backend.user_token.clone(),
            sts_token: self.backend.sts_token.clone(),
            owner_uid: self.backend.owner_uid.clone(),
            tenant_id: self.backend.tenant_id.clone(),
            media_uid: source.media_uid.clone(),
            request_url: source
                .request_url
                .clone()
                .unwrap_or_else(|| self.backend.request_url.clone()),
            playback_mode: source.playback_mode,
            is_dvr: source.is_dvr,
            start_bookmark: 0.0,
            log_level: self.player.log_level,
            closed_captions: self.player.closed_captions,
            buffer_hints: self.player.buffer,
            startup_threshold: self.player.startup_threshold,
            restart_threshold: self.player.restart_threshold,
            beacon_failover: Default::default(),
            min_bandwidth: None,
            max_bandwidth: None,
            start_bandwidth: None,
        }
    }
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| {
        ConfigLoadError::Read { path: path.to_path_buf(), source }
    })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn default_locations() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(DEFAULT_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("beamcast").join(DEFAULT_FILE_NAME));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_settings(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_and_resolves_a_full_file() {
        let f = write_settings(
            r#"
            [backend]
            request_url = "https://playback.example.com/v1"
            owner_uid = "owner"
            tenant_id = "tenant"
            app_token = "app"
            user_token = "user"
            sts_token = "sts"

            [player]
            log_level = 3
            closed_captions = true
            startup_threshold = 4.0

            [cast]
            receiver_app_id = "ABCD1234"

            [sources]
            catalog = "sources.json"
            "#,
        );
        let settings = Settings::load(Some(f.path())).unwrap();
        assert_eq!(settings.backend.owner_uid, "owner");
        assert_eq!(settings.player.log_level, LogLevel::Info);
        assert!(settings.player.closed_captions);
        assert_eq!(settings.cast.receiver_app_id.as_deref(), Some("ABCD1234"));
        assert_eq!(
            settings.catalog_path.as_deref(),
            Some(Path::new("sources.json"))
        );
    }

    #[test]
    fn missing_request_url_is_an_error() {
        let f = write_settings("[backend]\napp_token = \"app\"\n");
        let err = Settings::load(Some(f.path())).unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::Missing("backend.request_url")
        ));
    }

    #[test]
    fn bad_url_is_reported_with_its_setting() {
        let f = write_settings(
            "[backend]\nrequest_url = \"not a url\"\napp_token = \"app\"\n",
        );
        let err = Settings::load(Some(f.path())).unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::InvalidUrl { setting: "backend.request_url", .. }
        ));
    }

    #[test]
    fn catalog_entry_materializes_a_config() {
        let f = write_settings(
            r#"
            [backend]
            request_url = "https://playback.example.com/v1"
            app_token = "app"
            "#,
        );
        let settings = Settings::load(Some(f.path())).unwrap();
        let source = ExternalSource {
            name: "Channel One".into(),
            media_uid: "m-1".into(),
            playback_mode: beamcast_model::PlaybackMode::Live,
            is_dvr: true,
            request_url: None,
        };
        let config = settings.config_for(&source);
        assert_eq!(config.media_uid, "m-1");
        assert!(config.is_dvr);
        assert_eq!(
            config.request_url.as_str(),
            "https://playback.example.com/v1"
        );
    }
}
