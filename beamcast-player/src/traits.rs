//! Seams to the UI layer, the media SDK and the cast transport.
//!
//! The router only ever talks to these traits. Production wires them
//! to the real UI bindings, the SDK handle and the cast sender
//! framework; tests inject mocks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use beamcast_model::{
    AudioTrack, BeaconFailover, BufferLengths, LogLevel, MetricsUpdate,
    PlayerConfig, PlayerControl, ProgramInfo, SeekableRange, SubtitleTrack,
    VideoQuality,
};

use crate::error::Result;

/// Everything the router tells the UI. All methods are fire-and-forget
/// from the router's point of view.
#[cfg_attr(test, mockall::automock)]
pub trait UiAdapter: Send + Sync {
    /// Shows or hides the busy spinner.
    fn show_spinner(&self, visible: bool);
    /// Switches the play/pause button to its play glyph.
    fn show_play_icon(&self);
    /// Switches the play/pause button to its pause glyph.
    fn show_pause_icon(&self);
    /// Updates the position readout and seekbar. All values are in
    /// the displayed (ad-free) domain, seconds.
    fn update_video_position(&self, position: f64, duration: f64, buffer: f64);
    /// Moves the seekbar knob without a position readout change.
    fn update_video_slider_position(&self, percent: f64);
    /// Shows the wall-clock bounds of the current live program.
    fn update_program_time(&self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>);
    /// Puts up the fatal error panel.
    fn show_error_message(&self, code: Option<u32>, message: &str);
    /// Clears a previously shown error panel.
    fn clear_error_message(&self);
    /// Shows a transient toast.
    fn toast_message(&self, message: &str);
    /// Fills the audio track picker.
    fn populate_audio_tracks(&self, tracks: Vec<AudioTrack>);
    /// Fills the subtitle picker, optionally marking the active track.
    fn populate_subtitle_tracks(&self, tracks: Vec<SubtitleTrack>, current: Option<String>);
    /// Fills the quality picker.
    fn populate_video_qualities(&self, qualities: Vec<VideoQuality>);
    /// Shows or hides the return-to-live button.
    fn show_live_now_button(&self, visible: bool);
    /// Whether the return-to-live button is currently shown.
    fn is_live_now_button_visible(&self) -> bool;
    /// Applies a partial metrics update to the diagnostics overlay.
    fn update_player_metrics(&self, update: MetricsUpdate);
    /// Enables or disables one transport control.
    fn set_control_enabled(&self, control: PlayerControl, enabled: bool);
    /// Returns every control and readout to its idle appearance.
    fn reset_controls(&self);
    /// Enables or disables seek affordances while a seek is in flight.
    fn disable_seek_controls(&self, disabled: bool);
}

/// A live handle onto the local media SDK player.
///
/// Verbs mutate; getters reflect the SDK's current view and are cheap.
/// Configuration setters are individually fallible and applied best
/// effort.
#[cfg_attr(test, mockall::automock)]
pub trait LocalPlayer: Send {
    /// Starts playback of the loaded source.
    fn start(&mut self) -> Result<()>;
    /// Stops playback and releases the session.
    fn stop(&mut self) -> Result<()>;
    /// Pauses at the current position.
    fn pause(&mut self) -> Result<()>;
    /// Resumes from a pause.
    fn resume(&mut self) -> Result<()>;
    /// Seeks to a raw media position, seconds.
    fn seek(&mut self, position: f64) -> Result<()>;
    /// Leaves timeshift and rejoins the live edge.
    fn live_now(&mut self) -> Result<()>;

    /// Current raw media position, seconds.
    fn position(&self) -> f64;
    /// Raw media duration, seconds.
    fn duration(&self) -> f64;
    /// Buffered media per stream.
    fn buffer_lengths(&self) -> BufferLengths;
    /// The live program currently playing, when known.
    fn program_info(&self) -> Option<ProgramInfo>;
    /// The seekable window, when the stream reports one.
    fn seekable_range(&self) -> Option<SeekableRange>;
    /// Whether `position` falls inside the seekable window.
    fn is_in_seekable_range(&self, position: f64) -> bool;
    /// Whether the live channel allows timeshift.
    fn timeshift_enabled(&self) -> bool;
    /// Whether this source is a finite live event rather than a
    /// continuous channel.
    fn is_live_event(&self) -> bool;
    /// Selectable audio tracks.
    fn audio_tracks(&self) -> Vec<AudioTrack>;
    /// Selectable subtitle tracks.
    fn subtitle_tracks(&self) -> Vec<SubtitleTrack>;
    /// Offered quality rungs.
    fn video_qualities(&self) -> Vec<VideoQuality>;

    /// Mutes or unmutes audio.
    fn set_mute(&mut self, mute: bool) -> Result<()>;
    /// Sets the volume, `0.0..=1.0`.
    fn set_volume(&mut self, level: f64) -> Result<()>;
    /// Selects an audio track by language tag.
    fn set_audio_track(&mut self, language: &str) -> Result<()>;
    /// Selects a subtitle track, or disables subtitles with `None`.
    fn set_subtitle_track<'a>(&mut self, language: Option<&'a str>) -> Result<()>;
    /// Toggles closed caption rendering.
    fn enable_cc(&mut self, enabled: bool) -> Result<()>;
    /// Sets the playback rate.
    fn set_play_speed(&mut self, speed: f64) -> Result<()>;
    /// Sets SDK log verbosity.
    fn set_log_level(&mut self, level: LogLevel) -> Result<()>;
    /// Pins playback to a quality rung.
    fn set_video_quality(&mut self, quality_id: &str) -> Result<()>;
    /// Applies beacon fail-open settings.
    fn set_beacon_failover(&mut self, config: BeaconFailover) -> Result<()>;
    /// Queries the in-home network status.
    fn in_home_status(&self) -> Result<bool>;
    /// Overrides the in-home network status.
    fn set_in_home_status(&mut self, in_home: bool) -> Result<()>;
}

/// Builds local players. Splitting resource acquisition from
/// construction lets the router abort cleanly when media keys cannot
/// be reset.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocalPlayerFactory: Send + Sync {
    /// Resets media resources (surfaces, keys) ahead of a new
    /// session. Failure aborts session creation.
    async fn reset_media_resources(&self) -> Result<()>;
    /// Creates a player loaded with `config`.
    async fn create(&self, config: &PlayerConfig) -> Result<Box<dyn LocalPlayer>>;
}

/// The cast sender framework, reduced to what the bridge needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CastTransport: Send + Sync {
    /// Whether a cast session is currently connected.
    fn is_connected(&self) -> bool;
    /// Whether the connected session carries a live media session.
    fn has_media_session(&self) -> bool;
    /// Delivers one serialized message on `namespace`.
    async fn send(&self, namespace: &str, payload: String) -> Result<()>;
}
