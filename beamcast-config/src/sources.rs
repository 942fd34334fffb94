//! The JSON source catalog.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use beamcast_model::ExternalSource;

/// A problem reading or parsing the source catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read source catalog {path}")]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The catalog file is not valid JSON.
    #[error("failed to parse source catalog {path}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// The list of selectable sources, as shipped in a JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCatalog {
    /// All selectable sources, in display order.
    pub sources: Vec<ExternalSource>,
}

impl SourceCatalog {
    /// Loads the catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            CatalogError::Read { path: path.to_path_buf(), source }
        })?;
        serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Looks a source up by its display name.
    pub fn by_name(&self, name: &str) -> Option<&ExternalSource> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Looks a source up by media identifier.
    pub fn by_media_uid(&self, media_uid: &str) -> Option<&ExternalSource> {
        self.sources.iter().find(|s| s.media_uid == media_uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn loads_a_catalog_and_finds_entries() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(
            br#"{
                "sources": [
                    { "name": "Movie", "mediaUid": "m-1" },
                    {
                        "name": "Channel One",
                        "mediaUid": "c-1",
                        "playbackMode": "LIVE",
                        "isDvr": true
                    }
                ]
            }"#,
        )
        .unwrap();
        let catalog = SourceCatalog::load(f.path()).unwrap();
        assert_eq!(catalog.sources.len(), 2);
        let live = catalog.by_name("Channel One").unwrap();
        assert!(live.playback_mode.is_live());
        assert!(live.is_dvr);
        let vod = catalog.by_media_uid("m-1").unwrap();
        assert!(!vod.playback_mode.is_live());
        assert!(catalog.by_name("missing").is_none());
    }

    #[test]
    fn malformed_catalog_reports_a_parse_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"not json").unwrap();
        assert!(matches!(
            SourceCatalog::load(f.path()),
            Err(CatalogError::Parse { .. })
        ));
    }
}
