//! The cast sender bridge.
//!
//! Owns the transport to the receiver application: serializes
//! commands onto the shared namespace, demultiplexes receiver events
//! into the normalized [`PlayerEvent`] vocabulary, and tracks the
//! session lifecycle so the router can hand playback over in either
//! direction.

pub mod protocol;

use tracing::{debug, warn};

use beamcast_model::{
    CastSessionState, PlaybackCommand, PlayerEvent, StateCode,
};

use crate::constants::CAST_NAMESPACE;
use crate::error::{PlayerError, Result};
use crate::traits::CastTransport;

use protocol::ReceiverEvent;

/// What a session lifecycle change means for playback ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// A receiver took over; local playback should pause and the
    /// session should be initialized remotely.
    Connected,
    /// The receiver is gone; local playback takes over again.
    Disconnected,
    /// No ownership change.
    None,
}

/// Last position report received from the receiver, raw seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CastPosition {
    /// Raw media position.
    pub position: f64,
    /// Raw media duration.
    pub duration: f64,
}

/// Sender-side endpoint of the receiver protocol.
pub struct CastSessionBridge {
    transport: Box<dyn CastTransport>,
    session_state: CastSessionState,
    receiver_app_id: String,
    last_position: CastPosition,
    timeshift_enabled: bool,
}

impl CastSessionBridge {
    /// Builds a bridge over `transport`, launching `receiver_app_id`.
    pub fn new(transport: Box<dyn CastTransport>, receiver_app_id: String) -> Self {
        Self {
            transport,
            session_state: CastSessionState::NoSession,
            receiver_app_id,
            last_position: CastPosition::default(),
            timeshift_enabled: false,
        }
    }

    /// Whether the receiver currently owns playback. Queried fresh on
    /// every routing decision; the answer is never cached upstream.
    pub fn is_session_alive(&self) -> bool {
        self.transport.is_connected() && self.transport.has_media_session()
    }

    /// The receiver application this sender launches.
    pub fn receiver_app_id(&self) -> &str {
        &self.receiver_app_id
    }

    /// The session lifecycle state last reported by the framework.
    pub fn session_state(&self) -> CastSessionState {
        self.session_state
    }

    /// The most recent position the receiver reported.
    pub fn current_position(&self) -> CastPosition {
        self.last_position
    }

    /// Whether the receiver's stream allows timeshift.
    pub fn timeshift_enabled(&self) -> bool {
        self.timeshift_enabled
    }

    /// Serializes `command` and delivers it to the receiver.
    ///
    /// Fails when no session is ready or the transport rejects the
    /// message. Failures are reported to the caller and never
    /// retried.
    pub async fn send(&self, command: &PlaybackCommand) -> Result<()> {
        if !self.is_session_alive() {
            return Err(PlayerError::Transport("session is not ready".into()));
        }
        let payload = serde_json::to_string(command)
            .map_err(|e| PlayerError::Transport(e.to_string()))?;
        debug!(command = command.name(), "sending cast command");
        self.transport.send(CAST_NAMESPACE, payload).await
    }

    /// Feeds a session lifecycle change from the sender framework.
    pub fn handle_session_state(&mut self, state: CastSessionState) -> SessionSignal {
        debug!(from = %self.session_state, to = %state, "cast session state");
        self.session_state = state;
        if state.is_alive() {
            SessionSignal::Connected
        } else if state.is_disconnect() {
            SessionSignal::Disconnected
        } else {
            SessionSignal::None
        }
    }

    /// Demultiplexes one raw receiver message into normalized player
    /// events, in the order the router should see them. Track and
    /// program data riding along with a state change come out as
    /// their own events ahead of the state change itself.
    pub fn handle_receiver_message(&mut self, raw: &str) -> Result<Vec<PlayerEvent>> {
        let event: ReceiverEvent = serde_json::from_str(raw)
            .map_err(|e| PlayerError::Transport(format!("bad receiver message: {e}")))?;

        let mut out = Vec::new();
        match event {
            ReceiverEvent::VideoPositionChanged(p) => {
                self.last_position = CastPosition {
                    position: p.video_position,
                    duration: p.video_duration,
                };
                self.timeshift_enabled = p.timeshift_enabled;
                out.push(PlayerEvent::PositionChanged {
                    position: p.video_position,
                    duration: p.video_duration,
                    buffer: p.buffer_length,
                });
            }
            ReceiverEvent::StateChanged(p) => {
                if let Some(data) = p.state_data {
                    if let Some(info) = data.program_info {
                        out.push(PlayerEvent::ProgramChanged(info));
                    }
                    if !data.audio_tracks.is_empty() {
                        out.push(PlayerEvent::AudioTracksChanged(data.audio_tracks));
                    }
                    if !data.subtitle_list.is_empty() {
                        out.push(PlayerEvent::TextTracksChanged(data.subtitle_list));
                    }
                }
                match StateCode::from_wire(p.state_code) {
                    Some(code) => out.push(PlayerEvent::StateChanged(code)),
                    None => warn!(code = p.state_code, "unknown receiver state code"),
                }
            }
            ReceiverEvent::TextTracksAdded(p) => {
                out.push(PlayerEvent::TextTracksAdded {
                    tracks: p.subtitle_list,
                    current: p.current_subtitle,
                });
            }
            ReceiverEvent::Error(p) => {
                out.push(PlayerEvent::Error { code: p.code, message: p.message });
            }
        }
        Ok(out)
    }
}

impl std::fmt::Debug for CastSessionBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CastSessionBridge")
            .field("session_state", &self.session_state)
            .field("receiver_app_id", &self.receiver_app_id)
            .field("last_position", &self.last_position)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockCastTransport;

    fn bridge_with(transport: MockCastTransport) -> CastSessionBridge {
        CastSessionBridge::new(Box::new(transport), "88E92036".into())
    }

    #[test]
    fn alive_requires_connection_and_media_session() {
        let mut t = MockCastTransport::new();
        t.expect_is_connected().return_const(true);
        t.expect_has_media_session().return_const(false);
        assert!(!bridge_with(t).is_session_alive());

        let mut t = MockCastTransport::new();
        t.expect_is_connected().return_const(true);
        t.expect_has_media_session().return_const(true);
        assert!(bridge_with(t).is_session_alive());
    }

    #[tokio::test]
    async fn send_without_a_session_fails_fast() {
        let mut t = MockCastTransport::new();
        t.expect_is_connected().return_const(false);
        t.expect_send().never();
        let bridge = bridge_with(t);
        let err = bridge.send(&PlaybackCommand::Pause).await.unwrap_err();
        assert!(matches!(err, PlayerError::Transport(_)));
    }

    #[tokio::test]
    async fn send_puts_the_envelope_on_the_shared_namespace() {
        let mut t = MockCastTransport::new();
        t.expect_is_connected().return_const(true);
        t.expect_has_media_session().return_const(true);
        t.expect_send()
            .withf(|ns, payload| {
                ns == CAST_NAMESPACE && payload == r#"{"commandType":"resume"}"#
            })
            .once()
            .returning(|_, _| Ok(()));
        bridge_with(t).send(&PlaybackCommand::Resume).await.unwrap();
    }

    #[test]
    fn lifecycle_signals_follow_the_session_states() {
        let mut bridge = bridge_with(MockCastTransport::new());
        assert_eq!(
            bridge.handle_session_state(CastSessionState::Starting),
            SessionSignal::None
        );
        assert_eq!(
            bridge.handle_session_state(CastSessionState::Started),
            SessionSignal::Connected
        );
        assert_eq!(
            bridge.handle_session_state(CastSessionState::Ending),
            SessionSignal::None
        );
        assert_eq!(
            bridge.handle_session_state(CastSessionState::Ended),
            SessionSignal::Disconnected
        );
        assert_eq!(
            bridge.handle_session_state(CastSessionState::StartFailed),
            SessionSignal::Disconnected
        );
    }

    #[test]
    fn position_reports_are_cached_for_handover() {
        let mut bridge = bridge_with(MockCastTransport::new());
        let raw = r#"{
            "eventType": "onVideoPositionChanged",
            "eventData": { "videoPosition": 42.0, "videoDuration": 120.0 }
        }"#;
        let events = bridge.handle_receiver_message(raw).unwrap();
        assert!(matches!(
            events.as_slice(),
            [PlayerEvent::PositionChanged { position, .. }] if *position == 42.0
        ));
        assert_eq!(bridge.current_position().position, 42.0);
        assert_eq!(bridge.current_position().duration, 120.0);
    }

    #[test]
    fn unknown_state_codes_are_dropped_not_fatal() {
        let mut bridge = bridge_with(MockCastTransport::new());
        let raw = r#"{"eventType": "onStateChanged", "eventData": {"stateCode": 99}}"#;
        assert!(bridge.handle_receiver_message(raw).unwrap().is_empty());
    }

    #[test]
    fn play_start_data_precedes_the_state_change() {
        let mut bridge = bridge_with(MockCastTransport::new());
        let raw = r#"{
            "eventType": "onStateChanged",
            "eventData": {
                "stateCode": 1,
                "stateData": {
                    "audioTracks": [{ "language": "en" }],
                    "subtitleList": [{ "language": "sv" }]
                }
            }
        }"#;
        let events = bridge.handle_receiver_message(raw).unwrap();
        assert!(matches!(events[0], PlayerEvent::AudioTracksChanged(_)));
        assert!(matches!(events[1], PlayerEvent::TextTracksChanged(_)));
        assert_eq!(
            events[2],
            PlayerEvent::StateChanged(StateCode::PlayStarted)
        );
    }

    #[test]
    fn receiver_errors_normalize_into_player_errors() {
        let mut bridge = bridge_with(MockCastTransport::new());
        let raw = r#"{
            "eventType": "onError",
            "eventData": { "code": 224, "message": "Skip forward not allowed" }
        }"#;
        let events = bridge.handle_receiver_message(raw).unwrap();
        assert!(events[0].is_advisory_error());
    }

    #[test]
    fn garbage_from_the_receiver_is_a_transport_error() {
        let mut bridge = bridge_with(MockCastTransport::new());
        assert!(matches!(
            bridge.handle_receiver_message("not json"),
            Err(PlayerError::Transport(_))
        ));
    }
}
