//! Error taxonomy for playback control.

use thiserror::Error;

use beamcast_model::numbers::InvalidNumber;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PlayerError>;

/// Anything that can go wrong while controlling playback.
///
/// Both targets normalize their failures into this taxonomy before
/// the router sees them, so handling is uniform: configuration
/// problems are logged and skipped, transport problems surface as a
/// toast, restrictions are advisory, everything else tears the
/// session down.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// A best-effort configuration setter failed. Session creation
    /// continues without the setting.
    #[error("failed to apply player setting `{setting}`")]
    Config {
        /// Which setting was being applied.
        setting: &'static str,
        /// Underlying cause.
        #[source]
        source: anyhow::Error,
    },
    /// A message to the cast receiver could not be delivered.
    #[error("cast transport failure: {0}")]
    Transport(String),
    /// The player reported a playback error or restriction.
    #[error("playback error {code}: {message}")]
    Playback {
        /// SDK error code.
        code: u32,
        /// Human-readable description.
        message: String,
    },
    /// Media resources (keys, surfaces) could not be acquired while
    /// creating a session. The session is aborted.
    #[error("failed to acquire media resources")]
    ResourceAcquisition(#[source] anyhow::Error),
    /// A timeline computation received a non-finite number.
    #[error(transparent)]
    InvalidInput(#[from] InvalidNumber),
}

impl PlayerError {
    /// Whether this is an advisory content restriction rather than a
    /// broken session. Restriction codes occupy 224 through 231.
    pub fn is_restriction(&self) -> bool {
        matches!(
            self,
            Self::Playback { code, .. }
                if beamcast_model::events::ADVISORY_ERROR_CODES.contains(code)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restriction_band_matches_the_event_taxonomy() {
        let restricted = PlayerError::Playback { code: 228, message: "no pause".into() };
        assert!(restricted.is_restriction());
        let fatal = PlayerError::Playback { code: 500, message: "drm".into() };
        assert!(!fatal.is_restriction());
        assert!(!PlayerError::Transport("gone".into()).is_restriction());
    }
}
