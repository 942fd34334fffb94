//! Playback state machine.
//!
//! A deliberately small holder for the lifecycle of the current
//! playback session. Transitions are validated; the router logs and
//! drops an invalid one instead of corrupting the state, and
//! redundant transitions are suppressed so observers are only told
//! about real changes.

use thiserror::Error;
use tracing::debug;

use beamcast_model::PlaybackState;

/// A transition that is not part of the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid playback transition {from} -> {to}")]
pub struct TransitionError {
    /// State the machine was in.
    pub from: PlaybackState,
    /// State that was requested.
    pub to: PlaybackState,
}

/// Outcome of a requested transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The state changed; observers should be notified.
    Changed {
        /// Previous state.
        from: PlaybackState,
        /// New current state.
        to: PlaybackState,
    },
    /// The machine was already in the requested state.
    Unchanged,
}

/// Tracks the playback lifecycle and the state to return to after a
/// seek.
#[derive(Debug, Clone, Default)]
pub struct PlaybackStateMachine {
    current: PlaybackState,
    before_seek: Option<PlaybackState>,
}

impl PlaybackStateMachine {
    /// A machine starting at [`PlaybackState::Idle`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn current(&self) -> PlaybackState {
        self.current
    }

    /// Requests a transition to `to`.
    ///
    /// Re-entering the current state is not an error and produces
    /// [`Transition::Unchanged`]. Entering [`PlaybackState::Seeking`]
    /// remembers the state to restore on [`complete_seek`].
    ///
    /// [`complete_seek`]: Self::complete_seek
    pub fn transition(
        &mut self,
        to: PlaybackState,
    ) -> Result<Transition, TransitionError> {
        use PlaybackState::*;

        let from = self.current;
        if from == to {
            return Ok(Transition::Unchanged);
        }

        let allowed = match (from, to) {
            // Teardown is reachable from anywhere.
            (_, Idle) => true,
            (Idle, Loading) => true,
            (Loading, Playing | Paused) => true,
            (Playing, Paused) | (Paused, Playing) => true,
            (Playing | Paused, Seeking) => true,
            (Seeking, Playing | Paused) => true,
            _ => false,
        };
        if !allowed {
            return Err(TransitionError { from, to });
        }

        if to == Seeking {
            self.before_seek = Some(from);
        } else if to == Idle {
            self.before_seek = None;
        }
        self.current = to;
        debug!(%from, %to, "playback state changed");
        Ok(Transition::Changed { from, to })
    }

    /// Ends a seek, restoring the state that preceded it. Outside a
    /// seek this is a no-op.
    pub fn complete_seek(&mut self) -> Transition {
        if self.current != PlaybackState::Seeking {
            return Transition::Unchanged;
        }
        let to = self.before_seek.take().unwrap_or(PlaybackState::Playing);
        self.current = to;
        debug!(%to, "seek completed");
        Transition::Changed { from: PlaybackState::Seeking, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beamcast_model::PlaybackState::*;

    #[test]
    fn follows_the_session_lifecycle() {
        let mut sm = PlaybackStateMachine::new();
        assert_eq!(sm.current(), Idle);
        sm.transition(Loading).unwrap();
        sm.transition(Playing).unwrap();
        sm.transition(Paused).unwrap();
        sm.transition(Playing).unwrap();
        sm.transition(Idle).unwrap();
        assert_eq!(sm.current(), Idle);
    }

    #[test]
    fn redundant_transitions_are_suppressed() {
        let mut sm = PlaybackStateMachine::new();
        sm.transition(Loading).unwrap();
        sm.transition(Playing).unwrap();
        assert_eq!(sm.transition(Playing), Ok(Transition::Unchanged));
        assert_eq!(sm.current(), Playing);
    }

    #[test]
    fn skipping_loading_is_rejected() {
        let mut sm = PlaybackStateMachine::new();
        let err = sm.transition(Playing).unwrap_err();
        assert_eq!(err, TransitionError { from: Idle, to: Playing });
        // The failed request leaves the machine untouched.
        assert_eq!(sm.current(), Idle);
    }

    #[test]
    fn idle_is_reachable_from_everywhere() {
        for path in [vec![Loading], vec![Loading, Playing], vec![Loading, Playing, Seeking]] {
            let mut sm = PlaybackStateMachine::new();
            for s in path {
                sm.transition(s).unwrap();
            }
            sm.transition(Idle).unwrap();
            assert_eq!(sm.current(), Idle);
        }
    }

    #[test]
    fn seek_restores_the_state_it_interrupted() {
        let mut sm = PlaybackStateMachine::new();
        sm.transition(Loading).unwrap();
        sm.transition(Playing).unwrap();
        sm.transition(Paused).unwrap();
        sm.transition(Seeking).unwrap();
        assert_eq!(
            sm.complete_seek(),
            Transition::Changed { from: Seeking, to: Paused }
        );
        assert_eq!(sm.current(), Paused);
        // A second completion is a no-op.
        assert_eq!(sm.complete_seek(), Transition::Unchanged);
    }

    #[test]
    fn seeking_is_only_reachable_from_active_playback() {
        let mut sm = PlaybackStateMachine::new();
        assert!(sm.transition(Seeking).is_err());
        sm.transition(Loading).unwrap();
        assert!(sm.transition(Seeking).is_err());
    }
}
