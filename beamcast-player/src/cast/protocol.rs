//! Receiver wire protocol.
//!
//! Outbound traffic is [`beamcast_model::PlaybackCommand`] serialized
//! as `{commandType, commandData}`. This module holds the inbound
//! side: `{eventType, eventData}` envelopes the receiver posts back
//! on the shared namespace.

use serde::Deserialize;

use beamcast_model::{BufferLengths, ProgramInfo, SubtitleTrack};

/// One message from the receiver application.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "eventType", content = "eventData")]
pub enum ReceiverEvent {
    /// Periodic position report from the receiver's player.
    #[serde(rename = "onVideoPositionChanged")]
    VideoPositionChanged(VideoPositionPayload),
    /// The receiver's player changed discrete state.
    #[serde(rename = "onStateChanged")]
    StateChanged(StateChangedPayload),
    /// Subtitle tracks appeared on the receiver.
    #[serde(rename = "onTextTracksAdded")]
    TextTracksAdded(TextTracksPayload),
    /// The receiver's player reported an error.
    #[serde(rename = "onError")]
    Error(ErrorPayload),
}

/// Payload of `onVideoPositionChanged`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPositionPayload {
    /// Raw media position, seconds.
    pub video_position: f64,
    /// Raw media duration, seconds.
    pub video_duration: f64,
    /// Buffered media per stream.
    #[serde(default)]
    pub buffer_length: BufferLengths,
    /// Whether the receiver's stream allows timeshift.
    #[serde(default)]
    pub timeshift_enabled: bool,
}

/// Payload of `onStateChanged`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChangedPayload {
    /// Numeric state code, see [`beamcast_model::StateCode::from_wire`].
    pub state_code: u32,
    /// Extra data attached to some states, notably play start.
    #[serde(default)]
    pub state_data: Option<StateData>,
}

/// Optional companion data on a state change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateData {
    /// Selectable audio tracks on the receiver.
    #[serde(default)]
    pub audio_tracks: Vec<beamcast_model::AudioTrack>,
    /// Selectable subtitle tracks on the receiver.
    #[serde(default)]
    pub subtitle_list: Vec<SubtitleTrack>,
    /// The live program behind the channel, when known.
    #[serde(default)]
    pub program_info: Option<ProgramInfo>,
}

/// Payload of `onTextTracksAdded`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTracksPayload {
    /// All selectable subtitle tracks.
    #[serde(default)]
    pub subtitle_list: Vec<SubtitleTrack>,
    /// Language of the active track, if any.
    #[serde(rename = "currentSubTitle")]
    pub current_subtitle: Option<String>,
}

/// Payload of `onError`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    /// SDK error code as reported by the receiver.
    pub code: u32,
    /// Human-readable description.
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_report_parses() {
        let raw = r#"{
            "eventType": "onVideoPositionChanged",
            "eventData": {
                "videoPosition": 12.5,
                "videoDuration": 3600.0,
                "bufferLength": { "video": 8.0, "audio": 7.5 },
                "timeshiftEnabled": true
            }
        }"#;
        let ReceiverEvent::VideoPositionChanged(p) = serde_json::from_str(raw).unwrap()
        else {
            panic!("wrong variant");
        };
        assert_eq!(p.video_position, 12.5);
        assert_eq!(p.buffer_length.audio, 7.5);
        assert!(p.timeshift_enabled);
    }

    #[test]
    fn state_change_parses_with_and_without_data() {
        let raw = r#"{"eventType": "onStateChanged", "eventData": {"stateCode": 2}}"#;
        let ReceiverEvent::StateChanged(p) = serde_json::from_str(raw).unwrap() else {
            panic!("wrong variant");
        };
        assert_eq!(p.state_code, 2);
        assert!(p.state_data.is_none());

        let raw = r#"{
            "eventType": "onStateChanged",
            "eventData": {
                "stateCode": 1,
                "stateData": {
                    "audioTracks": [{ "language": "en" }],
                    "subtitleList": [{ "language": "sv", "label": "Svenska" }]
                }
            }
        }"#;
        let ReceiverEvent::StateChanged(p) = serde_json::from_str(raw).unwrap() else {
            panic!("wrong variant");
        };
        let data = p.state_data.unwrap();
        assert_eq!(data.audio_tracks.len(), 1);
        assert_eq!(data.subtitle_list[0].label.as_deref(), Some("Svenska"));
    }

    #[test]
    fn text_tracks_event_keeps_the_receiver_casing() {
        let raw = r#"{
            "eventType": "onTextTracksAdded",
            "eventData": { "subtitleList": [], "currentSubTitle": "en" }
        }"#;
        let ReceiverEvent::TextTracksAdded(p) = serde_json::from_str(raw).unwrap()
        else {
            panic!("wrong variant");
        };
        assert_eq!(p.current_subtitle.as_deref(), Some("en"));
    }
}
