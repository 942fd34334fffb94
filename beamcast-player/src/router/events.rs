//! Event-side handling of the router: player and receiver events,
//! and cast session ownership changes.

use chrono::Duration as ChronoDuration;
use tracing::{debug, warn};

use beamcast_model::{
    AdBreak, AdMarkerSet, CastSessionState, MetricsUpdate, PlaybackCommand,
    PlaybackState, PlayerControl, PlayerEvent, StateCode,
};

use crate::cast::SessionSignal;
use crate::constants::SHOW_LIVE_NOW_GAP_SECONDS;
use crate::state_machine::Transition;
use crate::timeline;

use super::PlaybackRouter;

const BEHIND_LIVE_HINT: &str =
    "You are now behind the live, click the 'LiveNow' button to return to Live!";

const TIMESHIFT_HINT: &str =
    "You are now in live timeshift mode, click the 'LiveNow' button to return to Live!";

/// Every transport control the backend may restrict.
const ALL_CONTROLS: [PlayerControl; 11] = [
    PlayerControl::Restart,
    PlayerControl::SkipBackward,
    PlayerControl::Play,
    PlayerControl::Pause,
    PlayerControl::Stop,
    PlayerControl::SkipForward,
    PlayerControl::Volume,
    PlayerControl::VideoSlider,
    PlayerControl::ShowAds,
    PlayerControl::SkipAds,
    PlayerControl::LiveNow,
];

impl PlaybackRouter {
    /// Entry point for every normalized playback event, local or
    /// cast-originated.
    pub async fn handle_player_event(&mut self, event: PlayerEvent) {
        debug!(?event, state = %self.state.current(), "player event");
        match event {
            PlayerEvent::InitComplete | PlayerEvent::DeviceRegistered => {
                self.set_state(PlaybackState::Loading);
                self.ui.show_spinner(true);
            }
            PlayerEvent::PlayReady => self.start_playback().await,
            PlayerEvent::PositionChanged { position, duration, buffer } => {
                self.on_position_changed(position, duration, buffer);
            }
            PlayerEvent::StateChanged(code) => self.on_state_changed(code).await,
            PlayerEvent::SeekComplete => self.on_seek_complete(),
            PlayerEvent::ProgramChanged(info) => {
                let end = info.start + ChronoDuration::milliseconds(info.duration as i64);
                self.ui.update_program_time(Some(info.start), Some(end));
            }
            PlayerEvent::AdMarkerData(breaks) => self.on_ad_marker_data(&breaks),
            PlayerEvent::AdStarted => {
                let timeshift = self
                    .ctx
                    .player
                    .as_ref()
                    .map(|p| p.timeshift_enabled())
                    .unwrap_or(false);
                if self.is_live() && timeshift {
                    self.ctx.reset_ad_elapsed();
                    self.ctx.start_ad_ticker();
                }
            }
            PlayerEvent::AdFinished => self.ctx.stop_ad_ticker(),
            PlayerEvent::AudioTracksChanged(tracks) => {
                self.ui.populate_audio_tracks(tracks);
            }
            PlayerEvent::TextTracksAdded { tracks, current } => {
                self.ui.populate_subtitle_tracks(tracks, current);
            }
            PlayerEvent::TextTracksChanged(tracks) => {
                self.ui.populate_subtitle_tracks(tracks, None);
            }
            PlayerEvent::BitrateChanged(bitrate) => {
                self.ui.update_player_metrics(MetricsUpdate {
                    bitrate: Some(bitrate),
                    ..Default::default()
                });
            }
            PlayerEvent::Metrics { seekable_range, qualities } => {
                self.ctx.seekable_range = seekable_range;
                if !qualities.is_empty() {
                    self.ui.populate_video_qualities(qualities);
                }
            }
            PlayerEvent::ControlRestrictions(codes) => {
                self.ctx.restrictions = codes;
                self.apply_restrictions();
            }
            PlayerEvent::Error { code, message } => {
                self.on_error(code, message).await;
            }
        }
    }

    /// Applies a cast session state change, handing playback over in
    /// whichever direction ownership moved.
    pub async fn handle_cast_session_state(&mut self, state: CastSessionState) {
        match self.cast.handle_session_state(state) {
            SessionSignal::Connected => {
                self.ctx.clear_timers();
                let bookmark_ms = match self.ctx.player.as_mut() {
                    Some(player) => {
                        let position = player.position();
                        if let Err(err) = player.pause() {
                            warn!(%err, "handover pause failed");
                        }
                        position * 1000.0
                    }
                    None => 0.0,
                };
                if self.ctx.config.is_some()
                    && self.state.current() != PlaybackState::Idle
                {
                    let _ = self.send_cast_init(bookmark_ms).await;
                }
            }
            SessionSignal::Disconnected => {
                self.ctx.clear_timers();
                let cast_position = self.cast.current_position().position;
                if let Some(player) = self.ctx.player.as_mut()
                    && player.position() > 1.0
                {
                    if let Err(err) = player.resume() {
                        warn!(%err, "handback resume failed");
                    }
                    // Give the pipeline a beat to resume before the
                    // position correction.
                    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                    if let Err(err) = player.seek(cast_position) {
                        warn!(%err, "handback seek failed");
                    }
                }
                self.ui.clear_error_message();
                self.ui.reset_controls();
            }
            SessionSignal::None => {}
        }
    }

    /// Demuxes a raw receiver message and feeds the resulting events
    /// through the same handling as local player events.
    pub async fn handle_cast_message(&mut self, raw: &str) {
        match self.cast.handle_receiver_message(raw) {
            Ok(events) => {
                for event in events {
                    Box::pin(self.handle_player_event(event)).await;
                }
            }
            Err(err) => warn!(%err, "receiver message dropped"),
        }
    }

    fn on_position_changed(
        &mut self,
        position: f64,
        duration: f64,
        buffer: beamcast_model::BufferLengths,
    ) {
        self.ui.update_player_metrics(MetricsUpdate {
            video_buffer_length: Some(buffer.video),
            audio_buffer_length: Some(buffer.audio),
            ..Default::default()
        });

        let mut position = position;
        let mut duration = duration;
        let reported_duration = duration;
        let mut buffer_len = buffer.effective();
        let live = self.is_live();

        if !self.cast.is_session_alive()
            && let Some(player) = self.ctx.player.as_ref()
        {
            if (live && player.timeshift_enabled()) || player.is_live_event() {
                if !player.is_live_event()
                    && let Some(info) = player.program_info()
                {
                    duration = info.duration_secs();
                }
                let gap = reported_duration - position;
                if reported_duration > 0.0
                    && position > 0.0
                    && gap > SHOW_LIVE_NOW_GAP_SECONDS
                    && !self.ui.is_live_now_button_visible()
                {
                    self.ui.show_live_now_button(true);
                    self.ui.toast_message(BEHIND_LIVE_HINT);
                }
            }
            // Externally packaged live streams report positions on the
            // stream timeline; window them onto the seekable range.
            if self.ctx.external_source
                && live
                && !player.is_live_event()
                && let Some(range) = player.seekable_range()
            {
                self.ui.update_program_time(
                    chrono::DateTime::from_timestamp(range.start as i64, 0),
                    chrono::DateTime::from_timestamp(range.end as i64, 0),
                );
                position -= range.start;
                duration = range.duration();
                buffer_len = 0.0;
                if position < 0.0 {
                    duration += -position;
                    position = 0.0;
                }
            }
        }

        match timeline::media_time_to_display_time(position, self.ctx.markers.as_ref()) {
            Ok(display) => {
                let display_duration = self
                    .ctx
                    .markers
                    .as_ref()
                    .map(AdMarkerSet::content_duration)
                    .unwrap_or(duration);
                self.ui.update_video_position(display, display_duration, buffer_len);
                if display_duration > 0.0 {
                    let percent = (display / display_duration * 100.0).clamp(0.0, 100.0);
                    self.ui.update_video_slider_position(percent);
                }
            }
            Err(err) => warn!(%err, "position report rejected"),
        }
    }

    async fn on_state_changed(&mut self, code: StateCode) {
        if self.cast.is_session_alive() {
            self.on_cast_state_changed(code).await;
            return;
        }
        match code {
            StateCode::PlayStarted => self.on_play_started(),
            StateCode::PlayResumed => {
                self.set_state(PlaybackState::Playing);
                self.ui.show_pause_icon();
                self.ui.show_spinner(false);
            }
            StateCode::PlayPaused => {
                self.set_state(PlaybackState::Paused);
                let timeshift = self
                    .ctx
                    .player
                    .as_ref()
                    .map(|p| p.timeshift_enabled())
                    .unwrap_or(false);
                if self.is_live()
                    && timeshift
                    && !self.ui.is_live_now_button_visible()
                {
                    self.ui.show_live_now_button(true);
                    self.ui.toast_message(TIMESHIFT_HINT);
                }
                self.ui.show_play_icon();
                self.ui.show_spinner(false);
            }
            StateCode::Seeking => {
                self.set_state(PlaybackState::Seeking);
                self.ui.show_spinner(true);
                self.ui.disable_seek_controls(true);
            }
            StateCode::BufferingStarted => {
                // A stall is not a state transition; only the metrics
                // overlay reflects it.
                self.ui.update_player_metrics(MetricsUpdate {
                    player_state: Some("Stalled".into()),
                    ..Default::default()
                });
                self.ui.show_spinner(true);
            }
            StateCode::BufferingStopped => {
                self.ui.update_player_metrics(MetricsUpdate {
                    player_state: Some(self.state.current().to_string()),
                    ..Default::default()
                });
                self.ui.show_spinner(false);
            }
            StateCode::PlayCompleted => self.stop_playback().await,
            StateCode::Done => self.on_done().await,
        }
    }

    /// Receiver state codes while a cast session owns playback.
    async fn on_cast_state_changed(&mut self, code: StateCode) {
        match code {
            StateCode::PlayStarted => {
                self.set_state(PlaybackState::Playing);
                self.ui.show_pause_icon();
                // The receiver took over; park the local player and
                // align the receiver with where it left off.
                let position_ms = match self.ctx.player.as_mut() {
                    Some(player) => {
                        let position = player.position();
                        if let Err(err) = player.pause() {
                            warn!(%err, "local pause on cast start failed");
                        }
                        position * 1000.0
                    }
                    None => 0.0,
                };
                self.ui.show_spinner(false);
                if position_ms > 0.0
                    && let Err(err) =
                        self.cast.send(&PlaybackCommand::Seek(position_ms)).await
                {
                    warn!(%err, "handover seek failed");
                }
            }
            StateCode::PlayPaused => {
                self.set_state(PlaybackState::Paused);
                self.ui.show_play_icon();
            }
            StateCode::PlayResumed => {
                self.set_state(PlaybackState::Playing);
                self.ui.show_pause_icon();
            }
            StateCode::Seeking => {
                self.set_state(PlaybackState::Seeking);
                self.ui.show_spinner(true);
            }
            StateCode::Done => self.on_done().await,
            // The receiver never reports the remaining codes.
            _ => debug!(?code, "unexpected receiver state code"),
        }
    }

    fn on_play_started(&mut self) {
        self.set_state(PlaybackState::Playing);
        let startup_time = self
            .ctx
            .load_started
            .take()
            .map(|started| started.elapsed().as_secs_f64());
        let sticky = self.ctx.sticky.clone();
        if let Some(player) = self.ctx.player.as_mut() {
            if sticky.closed_captions
                && let Err(err) = player.enable_cc(true)
            {
                warn!(%err, "cc replay failed");
            }
            if sticky.playback_speed != 1.0
                && let Err(err) = player.set_play_speed(sticky.playback_speed)
            {
                warn!(%err, "speed replay failed");
            }
        }
        if let Some(player) = self.ctx.player.as_ref() {
            self.ui.populate_audio_tracks(player.audio_tracks());
            self.ui.populate_subtitle_tracks(player.subtitle_tracks(), None);
            self.ui.populate_video_qualities(player.video_qualities());
        }
        self.ui.update_player_metrics(MetricsUpdate {
            startup_time,
            closed_captions: Some(sticky.closed_captions),
            ..Default::default()
        });
        self.ui.show_pause_icon();
        self.ui.show_spinner(false);
        self.ui.show_live_now_button(false);
    }

    fn on_seek_complete(&mut self) {
        if let Transition::Changed { to, .. } = self.state.complete_seek() {
            self.ui.update_player_metrics(MetricsUpdate {
                player_state: Some(to.to_string()),
                ..Default::default()
            });
        }
        if !self.cast.is_session_alive() {
            let timeshift = self
                .ctx
                .player
                .as_ref()
                .map(|p| p.timeshift_enabled())
                .unwrap_or(false);
            if self.is_live() && timeshift && !self.ui.is_live_now_button_visible() {
                self.ui.show_live_now_button(true);
                self.ui.toast_message(BEHIND_LIVE_HINT);
            }
        }
        self.ui.show_spinner(false);
        self.ui.disable_seek_controls(false);
    }

    async fn on_done(&mut self) {
        self.set_state(PlaybackState::Idle);
        self.ctx.reset_for_idle();
        self.ui.reset_controls();
        self.ui.show_play_icon();
        if self.ctx.play_next {
            self.ctx.play_next = false;
            Box::pin(self.play_pause()).await;
        }
    }

    fn on_ad_marker_data(&mut self, breaks: &[AdBreak]) {
        let duration = if self.cast.is_session_alive() {
            self.cast.current_position().duration
        } else {
            self.ctx
                .player
                .as_ref()
                .map(|p| p.duration())
                .unwrap_or_default()
        };
        match AdMarkerSet::from_breaks(breaks, duration, self.is_live()) {
            Ok(markers) => self.ctx.markers = markers,
            Err(err) => warn!(%err, "ad marker data rejected"),
        }
    }

    async fn on_error(&mut self, code: u32, message: String) {
        let advisory = beamcast_model::events::ADVISORY_ERROR_CODES.contains(&code);
        if advisory && !message.is_empty() {
            warn!(code, %message, "playback restriction");
            self.ui.toast_message(&message);
        } else {
            self.ui.show_error_message(Some(code), &message);
            self.stop_playback().await;
        }
        self.apply_restrictions();
    }

    /// Re-derives control enablement from the active restriction
    /// codes: everything on, then the restricted set off.
    fn apply_restrictions(&mut self) {
        for control in ALL_CONTROLS {
            self.ui.set_control_enabled(control, true);
        }
        for code in &self.ctx.restrictions {
            for control in PlayerControl::blocked_by(*code) {
                self.ui.set_control_enabled(*control, false);
            }
        }
    }
}
