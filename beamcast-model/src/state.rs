//! Playback lifecycle state.

use std::fmt;

/// Lifecycle state of the active playback, local or cast.
///
/// The controller drives the machine through
/// `Idle -> Loading -> Playing <-> Paused`, with `Seeking` as a
/// transient detour that returns to whichever of `Playing`/`Paused`
/// preceded it. Any state collapses back to `Idle` when playback is
/// torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing loaded; the controls show a play affordance only.
    #[default]
    Idle,
    /// A source is being prepared; commands other than stop are ignored.
    Loading,
    /// Media is rendering and the position advances.
    Playing,
    /// Media is loaded and frozen at the current position.
    Paused,
    /// A position change is in flight.
    Seeking,
}

impl PlaybackState {
    /// Whether a pause/resume toggle is meaningful in this state.
    pub fn is_toggleable(self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }

    /// Whether any media is attached at all.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Seeking => "seeking",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggleable_only_while_media_is_up() {
        assert!(PlaybackState::Playing.is_toggleable());
        assert!(PlaybackState::Paused.is_toggleable());
        assert!(!PlaybackState::Idle.is_toggleable());
        assert!(!PlaybackState::Loading.is_toggleable());
        assert!(!PlaybackState::Seeking.is_toggleable());
    }

    #[test]
    fn idle_is_the_only_inactive_state() {
        assert!(!PlaybackState::Idle.is_active());
        assert!(PlaybackState::Loading.is_active());
        assert!(PlaybackState::Seeking.is_active());
    }
}
