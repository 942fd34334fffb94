//! Cast session lifecycle.

use std::fmt;

/// Lifecycle of the connection to a cast receiver, as reported by the
/// sender framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CastSessionState {
    /// No receiver is associated with this sender.
    #[default]
    NoSession,
    /// A session request has been issued and is pending.
    Starting,
    /// The receiver accepted the session; messages may be exchanged.
    Started,
    /// The session request was rejected or timed out.
    StartFailed,
    /// A previously started session was found again after a reload.
    Resumed,
    /// The sender asked for the session to end.
    Ending,
    /// The session is gone; the receiver may keep playing on its own.
    Ended,
}

impl CastSessionState {
    /// Whether the session can carry receiver messages right now.
    ///
    /// Routing decisions are made against this per command, never
    /// against a cached copy.
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Started | Self::Resumed)
    }

    /// Whether this state means the sender has lost the receiver and
    /// local playback should take over the UI again.
    pub fn is_disconnect(self) -> bool {
        matches!(self, Self::NoSession | Self::StartFailed | Self::Ended)
    }
}

impl fmt::Display for CastSessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoSession => "no-session",
            Self::Starting => "starting",
            Self::Started => "started",
            Self::StartFailed => "start-failed",
            Self::Resumed => "resumed",
            Self::Ending => "ending",
            Self::Ended => "ended",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_started_and_resumed_are_alive() {
        assert!(CastSessionState::Started.is_alive());
        assert!(CastSessionState::Resumed.is_alive());
        assert!(!CastSessionState::Starting.is_alive());
        assert!(!CastSessionState::Ending.is_alive());
        assert!(!CastSessionState::Ended.is_alive());
        assert!(!CastSessionState::NoSession.is_alive());
    }

    #[test]
    fn disconnect_states_match_teardown_signals() {
        assert!(CastSessionState::NoSession.is_disconnect());
        assert!(CastSessionState::StartFailed.is_disconnect());
        assert!(CastSessionState::Ended.is_disconnect());
        assert!(!CastSessionState::Ending.is_disconnect());
        assert!(!CastSessionState::Resumed.is_disconnect());
    }
}
