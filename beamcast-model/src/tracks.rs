//! Track and quality descriptors.

use serde::{Deserialize, Serialize};

/// A selectable audio track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrack {
    /// Language tag, also the selection key.
    pub language: String,
    /// Display label, falls back to the language tag in the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A selectable subtitle track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleTrack {
    /// Language tag, also the selection key.
    pub language: String,
    /// Display label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One quality rung offered by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoQuality {
    /// Selection key handed back to the player.
    pub quality_id: String,
    /// Display label, e.g. "1080p".
    pub label: String,
    /// Bitrate of the rung, bits per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u64>,
}
