//! The playback command router.
//!
//! One object receives every UI intent and decides, per intent, which
//! target executes it: the local SDK player or the cast receiver.
//! The decision always starts from a fresh `is_session_alive()` query
//! on the cast bridge; it is never cached, so a session appearing or
//! vanishing between two clicks is handled correctly.

mod events;

use std::sync::Arc;

use tracing::{info, warn};

use beamcast_config::Settings;
use beamcast_model::{
    BeaconFailover, ExternalSource, LogLevel, MetricsUpdate, PlaybackCommand,
    PlaybackState, PlayerConfig,
};

use crate::cast::CastSessionBridge;
use crate::constants::{
    LIVE_NOW_GRACE_CAST, LIVE_NOW_GRACE_LOCAL, LOCAL_SEEK_FLOOR,
    LOCAL_SEEK_FLOOR_TARGET, SKIP_BACK_SECONDS, SKIP_FORWARD_SECONDS,
};
use crate::error::{PlayerError, Result};
use crate::intent::UiIntent;
use crate::session::SessionContext;
use crate::state_machine::{PlaybackStateMachine, Transition};
use crate::timeline;
use crate::traits::{LocalPlayerFactory, UiAdapter};

/// Routes UI intents to whichever playback target is authoritative
/// and keeps the playback state machine in sync with target events.
pub struct PlaybackRouter {
    ui: Arc<dyn UiAdapter>,
    factory: Box<dyn LocalPlayerFactory>,
    cast: CastSessionBridge,
    settings: Settings,
    state: PlaybackStateMachine,
    ctx: SessionContext,
}

impl PlaybackRouter {
    /// Assembles a router over the injected collaborators.
    pub fn new(
        ui: Arc<dyn UiAdapter>,
        factory: Box<dyn LocalPlayerFactory>,
        cast: CastSessionBridge,
        settings: Settings,
    ) -> Self {
        let mut ctx = SessionContext::new();
        ctx.sticky.closed_captions = settings.player.closed_captions;
        ctx.sticky.log_level = settings.player.log_level;
        Self {
            ui,
            factory,
            cast,
            settings,
            state: PlaybackStateMachine::new(),
            ctx,
        }
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        self.state.current()
    }

    /// The session context, mainly for inspection in tests.
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// The cast bridge.
    pub fn cast(&self) -> &CastSessionBridge {
        &self.cast
    }

    /// Materializes the playback configuration for `source`. The next
    /// session starts with it.
    pub fn select_source(&mut self, source: &ExternalSource) {
        self.ctx.external_source = source.request_url.is_some();
        self.ctx.config = Some(self.settings.config_for(source));
    }

    /// Entry point for every UI intent.
    pub async fn handle_intent(&mut self, intent: UiIntent) {
        info!(?intent, state = %self.state.current(), "ui intent");
        match intent {
            UiIntent::PlayPause => self.play_pause().await,
            UiIntent::Restart => self.restart().await,
            UiIntent::SkipBack => self.skip_back().await,
            UiIntent::SkipForward => self.skip_forward().await,
            UiIntent::Stop => self.stop().await,
            UiIntent::LiveNow => self.live_now().await,
            UiIntent::VolumeToggle { mute } => self.volume_toggle(mute).await,
            UiIntent::VolumeSliderChange { level } => self.volume_change(level).await,
            UiIntent::CcToggle { enabled } => self.cc_toggle(enabled).await,
            UiIntent::SubtitleTrackSelect { track } => {
                self.subtitle_select(track).await;
            }
            UiIntent::AudioTrackSelect { track } => self.audio_select(track).await,
            UiIntent::PlaybackSpeedSelect { speed } => self.speed_select(speed).await,
            UiIntent::PlaybackQualitySelect { quality_id } => {
                self.quality_select(quality_id).await;
            }
            UiIntent::LogLevelSelect { level } => self.log_level_select(level).await,
            UiIntent::VideoSliderPositionChange { percent } => {
                self.slider_seek(percent).await;
            }
            UiIntent::SourceListItemSelected { source } => {
                self.source_selected(source).await;
            }
            UiIntent::SkipAdvertisement => self.skip_ad().await,
            UiIntent::GetInhomeStatus => self.get_inhome_status(),
            UiIntent::SetInhomeStatus { in_home } => self.set_inhome_status(in_home),
            UiIntent::BeaconConfigChange { config } => self.beacon_config(config),
        }
    }

    fn playback_mode(&self) -> beamcast_model::PlaybackMode {
        self.ctx
            .config
            .as_ref()
            .map(|c| c.playback_mode)
            .unwrap_or_default()
    }

    fn is_live(&self) -> bool {
        self.playback_mode().is_live()
    }

    /// Applies a validated state transition, reflecting real changes
    /// into the metrics overlay. Invalid requests are logged and
    /// dropped.
    fn set_state(&mut self, to: PlaybackState) {
        match self.state.transition(to) {
            Ok(Transition::Changed { .. }) => {
                self.ui.update_player_metrics(MetricsUpdate {
                    player_state: Some(to.to_string()),
                    ..Default::default()
                });
            }
            Ok(Transition::Unchanged) => {}
            Err(err) => warn!(%err, "dropping invalid transition"),
        }
    }

    async fn play_pause(&mut self) {
        if self.cast.is_session_alive() {
            match self.state.current() {
                PlaybackState::Paused => {
                    match self.cast.send(&PlaybackCommand::Resume).await {
                        Ok(()) => {
                            self.set_state(PlaybackState::Playing);
                            self.ui.show_spinner(false);
                            self.ui.show_pause_icon();
                        }
                        Err(err) => {
                            warn!(%err, "cast resume failed");
                            self.ui.toast_message("Could not reach the receiver");
                        }
                    }
                }
                // Cast again on the available session.
                PlaybackState::Idle => self.start_playback().await,
                _ => {
                    if self.cast.send(&PlaybackCommand::Pause).await.is_ok() {
                        self.set_state(PlaybackState::Paused);
                        self.ui.show_spinner(false);
                        self.ui.show_play_icon();
                    }
                }
            }
            return;
        }

        if self.ctx.player.is_some() {
            match self.state.current() {
                PlaybackState::Idle => {
                    info!("play/pause in the wrong state");
                }
                PlaybackState::Paused => {
                    let out_of_range = match self.ctx.player.as_ref() {
                        Some(p) => {
                            self.ctx.enforce_seekable_range
                                && !p.is_in_seekable_range(p.position())
                        }
                        None => false,
                    };
                    if out_of_range {
                        self.ui.toast_message(
                            "Paused beyond seekable range! Resuming from Live",
                        );
                        self.live_now().await;
                        return;
                    }
                    if let Some(player) = self.ctx.player.as_mut()
                        && let Err(err) = player.resume()
                    {
                        warn!(%err, "resume failed");
                    }
                }
                _ => {
                    let pure_live = match self.ctx.player.as_ref() {
                        Some(p) => {
                            !self.ctx.external_source
                                && !p.is_live_event()
                                && self.is_live()
                                && !p.timeshift_enabled()
                        }
                        None => false,
                    };
                    if pure_live {
                        self.ui.toast_message("Pause is not allowed in pure live mode!");
                        return;
                    }
                    if let Some(player) = self.ctx.player.as_mut()
                        && let Err(err) = player.pause()
                    {
                        warn!(%err, "pause failed");
                    }
                }
            }
            return;
        }

        self.create_local_session().await;
    }

    /// Creates a new local playback session from the configured
    /// source. Resource acquisition failure aborts back to idle.
    async fn create_local_session(&mut self) {
        self.ui.clear_error_message();
        let Some(config) = self.ctx.config.clone() else {
            self.ui.toast_message("No source selected");
            return;
        };

        if let Err(err) = self.factory.reset_media_resources().await {
            warn!(%err, "aborting session creation");
            self.ui.show_error_message(None, &err.to_string());
            self.set_state(PlaybackState::Idle);
            return;
        }

        self.ctx.load_started = Some(std::time::Instant::now());
        match self.factory.create(&config).await {
            Ok(player) => {
                self.ctx.player = Some(player);
                self.apply_config_params(&config);
            }
            Err(err) => {
                warn!(%err, "player creation failed");
                self.ui.show_error_message(None, &err.to_string());
                self.ctx.player = None;
                self.set_state(PlaybackState::Idle);
            }
        }
    }

    /// Applies configuration and sticky settings onto a fresh player.
    /// Each setter is best effort: a failure is logged and the
    /// session continues without that setting.
    fn apply_config_params(&mut self, config: &PlayerConfig) {
        let sticky = self.ctx.sticky.clone();
        let Some(player) = self.ctx.player.as_mut() else {
            return;
        };
        let results: [(&str, Result<()>); 4] = [
            ("log_level", player.set_log_level(sticky.log_level)),
            ("beacon_failover", player.set_beacon_failover(config.beacon_failover)),
            ("volume", player.set_volume(sticky.volume)),
            ("mute", player.set_mute(sticky.muted)),
        ];
        for (setting, result) in results {
            if let Err(err) = result {
                warn!(setting, %err, "player setting not applied");
            }
        }
    }

    /// Starts playback on the authoritative target once a source is
    /// loaded (or a cast session is available to initialize).
    async fn start_playback(&mut self) {
        if self.cast.is_session_alive() {
            if self.send_cast_init(0.0).await.is_ok() {
                self.set_state(PlaybackState::Loading);
                self.ui.show_spinner(false);
                self.ui.show_pause_icon();
            }
            return;
        }
        if let Some(player) = self.ctx.player.as_mut()
            && let Err(err) = player.start()
        {
            warn!(%err, "start failed");
        }
    }

    /// Builds and sends the receiver init envelope, resuming at
    /// `bookmark_ms` when handing a running session over.
    async fn send_cast_init(&mut self, bookmark_ms: f64) -> Result<()> {
        let Some(config) = self.ctx.config.as_ref() else {
            self.ui.toast_message("No source selected");
            return Err(PlayerError::Transport("no source configured".into()));
        };
        let mut params = config.to_init_params();
        params.is_cc_enabled = self.ctx.sticky.closed_captions;
        params.log_level = self.ctx.sticky.log_level;
        params.start_bookmark = bookmark_ms;
        let result = self
            .cast
            .send(&PlaybackCommand::Init(Box::new(params)))
            .await;
        if let Err(err) = &result {
            warn!(%err, "cast init failed");
            self.ui.toast_message("Could not start playback on the receiver");
        }
        result
    }

    async fn restart(&mut self) {
        if self.cast.is_session_alive() {
            let target_ms = if self.is_live() { 1.0 } else { 0.0 };
            self.dispatch_seek_cast(target_ms).await;
            return;
        }
        if self.state.current() == PlaybackState::Idle {
            return;
        }
        let Some(player) = self.ctx.player.as_ref() else {
            return;
        };
        let timeshift = player.timeshift_enabled();
        let live_event = player.is_live_event();
        let live = self
            .ctx
            .config
            .as_ref()
            .map(|c| c.playback_mode.is_live())
            .unwrap_or_default();
        let target = if live && timeshift && !live_event { 1.0 } else { 0.0 };
        if self.ctx.enforce_seekable_range
            && live
            && !live_event
            && !player.is_in_seekable_range(target)
        {
            self.ui.toast_message("Restart not allowed beyond seekable range!");
            return;
        }
        self.dispatch_seek_local(target);
    }

    async fn skip_back(&mut self) {
        if self.cast.is_session_alive() {
            if !self.ctx.external_source
                && self.is_live()
                && !self.cast.timeshift_enabled()
            {
                self.ui.toast_message("Seek/skip not allowed for pure live!");
                return;
            }
            let mut target_ms =
                (self.cast.current_position().position - SKIP_BACK_SECONDS) * 1000.0;
            if target_ms <= LOCAL_SEEK_FLOOR {
                target_ms = LOCAL_SEEK_FLOOR_TARGET;
            }
            self.dispatch_seek_cast(target_ms).await;
            return;
        }
        self.local_trick_seek(-SKIP_BACK_SECONDS, "SkipBack not allowed beyond seekable range!")
            .await;
    }

    async fn skip_forward(&mut self) {
        if self.cast.is_session_alive() {
            let target_ms =
                ((self.cast.current_position().position + SKIP_FORWARD_SECONDS) * 1000.0).round();
            self.dispatch_seek_cast(target_ms).await;
            return;
        }
        self.local_trick_seek(
            SKIP_FORWARD_SECONDS,
            "SkipForward not allowed beyond seekable range!",
        )
        .await;
    }

    /// Shared local path of both skip buttons.
    async fn local_trick_seek(&mut self, delta: f64, range_toast: &str) {
        if self.state.current() == PlaybackState::Idle {
            return;
        }
        let live = self.is_live();
        let Some(player) = self.ctx.player.as_ref() else {
            return;
        };
        let position = player.position();
        let duration = player.duration();
        let timeshift = player.timeshift_enabled();
        let live_event = player.is_live_event();
        let program_duration = player.program_info().map(|p| p.duration_secs());
        if !self.ctx.external_source && !live_event && live && !timeshift {
            self.ui.toast_message("Seek/skip not allowed for pure live!");
            return;
        }
        // Skipping forward in timeshift is bounded by the program, not
        // the stream.
        let duration = if delta > 0.0 && live && timeshift {
            program_duration.unwrap_or(duration)
        } else {
            duration
        };
        let target = match timeline::trick_seek_target(
            position,
            duration,
            delta,
            self.ctx.markers.as_ref(),
        ) {
            Ok(t) => t,
            Err(err) => {
                warn!(%err, "skip target rejected");
                return;
            }
        };
        if self.ctx.enforce_seekable_range
            && !live_event
            && live
            && self.ctx.seekable_range.is_some()
            && !player.is_in_seekable_range(target)
        {
            self.ui.toast_message(range_toast);
            return;
        }
        let target = if target <= LOCAL_SEEK_FLOOR { LOCAL_SEEK_FLOOR_TARGET } else { target };
        self.dispatch_seek_local(target);
    }

    async fn stop(&mut self) {
        let has_target = self.cast.is_session_alive() || self.ctx.player.is_some();
        if has_target && self.state.current() != PlaybackState::Idle {
            self.ctx.clear_timers();
            self.stop_playback().await;
        }
    }

    /// Stops whichever target currently plays. When a new source is
    /// queued, teardown completion re-enters play/pause.
    async fn stop_playback(&mut self) {
        if self.cast.is_session_alive() {
            if self.cast.send(&PlaybackCommand::Stop).await.is_ok() {
                self.ui.show_spinner(false);
                self.ui.show_play_icon();
            }
            if self.ctx.play_next {
                self.ctx.play_next = false;
                Box::pin(self.play_pause()).await;
            } else if let Some(player) = self.ctx.player.as_mut()
                && let Err(err) = player.stop()
            {
                warn!(%err, "local stop failed");
            }
            return;
        }
        if let Some(player) = self.ctx.player.as_mut()
            && let Err(err) = player.stop()
        {
            warn!(%err, "stop failed");
        }
    }

    async fn live_now(&mut self) {
        if self.cast.is_session_alive() {
            if let Err(err) = self.cast.send(&PlaybackCommand::LiveNow).await {
                warn!(%err, "cast live-now failed");
                self.ui.toast_message("Could not reach the receiver");
                return;
            }
            self.ctx
                .schedule_live_now_pulldown(Arc::clone(&self.ui), LIVE_NOW_GRACE_CAST);
            return;
        }
        if self.ctx.player.is_none() || self.state.current() == PlaybackState::Idle {
            return;
        }
        // No event marks the live jump landing; show a spinner and
        // clear it on the grace timer.
        self.ui.show_spinner(true);
        if let Some(player) = self.ctx.player.as_mut()
            && let Err(err) = player.live_now()
        {
            warn!(%err, "live-now failed");
        }
        self.ctx
            .schedule_live_now_pulldown(Arc::clone(&self.ui), LIVE_NOW_GRACE_LOCAL);
    }

    async fn volume_toggle(&mut self, mute: bool) {
        self.ctx.sticky.muted = mute;
        if self.cast.is_session_alive() {
            let _ = self.cast.send(&PlaybackCommand::SetMute(mute)).await;
            return;
        }
        if self.state.current() != PlaybackState::Idle
            && let Some(player) = self.ctx.player.as_mut()
            && let Err(err) = player.set_mute(mute)
        {
            warn!(%err, "mute failed");
        }
    }

    async fn volume_change(&mut self, level: f64) {
        self.ctx.sticky.volume = level;
        self.ctx.sticky.muted = false;
        if self.cast.is_session_alive() {
            let _ = self.cast.send(&PlaybackCommand::SetVolume(level)).await;
            return;
        }
        if self.state.current() != PlaybackState::Idle
            && let Some(player) = self.ctx.player.as_mut()
        {
            if let Err(err) = player.set_mute(false) {
                warn!(%err, "unmute failed");
            }
            if let Err(err) = player.set_volume(level) {
                warn!(%err, "volume failed");
            }
        }
    }

    async fn cc_toggle(&mut self, enabled: bool) {
        // Remembered even without a session; replayed on start.
        self.ctx.sticky.closed_captions = enabled;
        self.ui.update_player_metrics(MetricsUpdate {
            closed_captions: Some(enabled),
            ..Default::default()
        });
        if self.cast.is_session_alive() {
            let _ = self.cast.send(&PlaybackCommand::EnableCc(enabled)).await;
            return;
        }
        if self.state.current() != PlaybackState::Idle
            && let Some(player) = self.ctx.player.as_mut()
            && let Err(err) = player.enable_cc(enabled)
        {
            warn!(%err, "cc toggle failed");
        }
    }

    async fn subtitle_select(&mut self, track: Option<String>) {
        if self.cast.is_session_alive() {
            let _ = self
                .cast
                .send(&PlaybackCommand::SetSubtitleTrack(track))
                .await;
            return;
        }
        if self.state.current() == PlaybackState::Idle {
            return;
        }
        let Some(player) = self.ctx.player.as_mut() else {
            return;
        };
        if let Err(err) = player.set_subtitle_track(track.as_deref()) {
            warn!(%err, "subtitle selection failed");
        }
    }

    async fn audio_select(&mut self, track: String) {
        if self.cast.is_session_alive() {
            let _ = self.cast.send(&PlaybackCommand::SetAudioTrack(track)).await;
            return;
        }
        if self.state.current() != PlaybackState::Idle
            && let Some(player) = self.ctx.player.as_mut()
            && let Err(err) = player.set_audio_track(&track)
        {
            warn!(%err, "audio selection failed");
        }
    }

    async fn speed_select(&mut self, speed: f64) {
        self.ctx.sticky.playback_speed = speed;
        self.ui.update_player_metrics(MetricsUpdate {
            playback_speed: Some(speed),
            ..Default::default()
        });
        if self.cast.is_session_alive() {
            let _ = self
                .cast
                .send(&PlaybackCommand::SetPlaybackSpeed(speed))
                .await;
            return;
        }
        if self.state.current() != PlaybackState::Idle
            && let Some(player) = self.ctx.player.as_mut()
            && let Err(err) = player.set_play_speed(speed)
        {
            warn!(%err, "speed selection failed");
        }
    }

    async fn quality_select(&mut self, quality_id: String) {
        if self.cast.is_session_alive() {
            let _ = self
                .cast
                .send(&PlaybackCommand::SetVideoQuality(quality_id))
                .await;
            return;
        }
        if self.state.current() != PlaybackState::Idle
            && let Some(player) = self.ctx.player.as_mut()
            && let Err(err) = player.set_video_quality(&quality_id)
        {
            warn!(%err, "quality selection failed");
        }
    }

    async fn log_level_select(&mut self, level: LogLevel) {
        self.ctx.sticky.log_level = level;
        if self.cast.is_session_alive() {
            let _ = self.cast.send(&PlaybackCommand::SetLogLevel(level)).await;
            return;
        }
        // Applies in any state as long as a player exists.
        if let Some(player) = self.ctx.player.as_mut()
            && let Err(err) = player.set_log_level(level)
        {
            warn!(%err, "log level failed");
        }
    }

    async fn slider_seek(&mut self, percent: f64) {
        if self.cast.is_session_alive() {
            if !self.ctx.external_source
                && self.is_live()
                && !self.cast.timeshift_enabled()
            {
                self.ui.toast_message("Seek/skip not allowed for pure live!");
                return;
            }
            let duration = self.cast.current_position().duration;
            match timeline::raw_percent_to_media_time(
                percent,
                self.ctx.markers.as_ref(),
                duration,
            ) {
                Ok(target) => self.dispatch_seek_cast(target * 1000.0).await,
                Err(err) => warn!(%err, "slider position rejected"),
            }
            return;
        }

        if self.state.current() == PlaybackState::Idle {
            self.ui.update_video_slider_position(0.0);
            return;
        }
        let live = self.is_live();
        let Some(player) = self.ctx.player.as_ref() else {
            self.ui.update_video_slider_position(0.0);
            return;
        };
        let mut duration = player.duration();
        let timeshift = player.timeshift_enabled();
        let live_event = player.is_live_event();
        let program_duration = player.program_info().map(|p| p.duration_secs());
        if !self.ctx.external_source && !live_event && live {
            if timeshift {
                duration = program_duration.unwrap_or(duration);
            } else {
                self.ui.toast_message("Seek/skip not allowed for pure live!");
                return;
            }
        }
        if duration <= 0.0 {
            self.ui.update_video_slider_position(0.0);
            return;
        }
        let target = match timeline::raw_percent_to_media_time(
            percent,
            self.ctx.markers.as_ref(),
            duration,
        ) {
            Ok(t) => t,
            Err(err) => {
                warn!(%err, "slider position rejected");
                return;
            }
        };
        if self.ctx.enforce_seekable_range
            && live
            && self.ctx.seekable_range.is_some()
            && !player.is_in_seekable_range(target)
        {
            self.ui.toast_message("Seek/skip not allowed beyond seekable range!");
            return;
        }
        self.dispatch_seek_local(target);
    }

    async fn source_selected(&mut self, source: ExternalSource) {
        self.select_source(&source);
        self.ctx.clear_timers();
        if self.ctx.player.is_some() || self.cast.is_session_alive() {
            // Tear the current session down; completion starts the
            // new one.
            self.ctx.play_next = true;
            self.stop_playback().await;
        } else {
            self.play_pause().await;
        }
    }

    async fn skip_ad(&mut self) {
        if self.state.current() == PlaybackState::Idle || self.ctx.markers.is_none() {
            return;
        }
        let Some(player) = self.ctx.player.as_ref() else {
            return;
        };
        let timeshift = player.timeshift_enabled();
        let position = player.position();
        if self.is_live() && !timeshift {
            self.ui.toast_message("Seek/skip not allowed for pure live!");
            return;
        }
        self.ctx.stop_ad_ticker();
        let elapsed = self.ctx.ad_elapsed();
        match timeline::skip_ad_target(
            position,
            elapsed,
            self.ctx.markers.as_ref(),
            self.playback_mode(),
        ) {
            Ok(Some(target)) => {
                self.dispatch_seek_local(target.max(0.0));
                self.ui.toast_message("Seeked Advertisement");
            }
            Ok(None) => {}
            Err(err) => warn!(%err, "skip-ad target rejected"),
        }
    }

    fn get_inhome_status(&mut self) {
        let Some(player) = self.ctx.player.as_ref() else {
            return;
        };
        match player.in_home_status() {
            Ok(status) => {
                self.ui
                    .toast_message(&format!("Get InHome Status: {status}"));
            }
            Err(err) => {
                self.ui.toast_message(&format!("Get InHome Status: {err}"));
            }
        }
    }

    fn set_inhome_status(&mut self, in_home: bool) {
        let Some(player) = self.ctx.player.as_mut() else {
            return;
        };
        self.ui
            .toast_message(&format!("Set InHome Status: {in_home}"));
        if let Err(err) = player.set_in_home_status(in_home) {
            warn!(%err, "in-home status failed");
        }
    }

    fn beacon_config(&mut self, config: BeaconFailover) {
        let Some(player) = self.ctx.player.as_mut() else {
            return;
        };
        if let Err(err) = player.set_beacon_failover(config) {
            warn!(%err, "beacon config not applied");
        }
    }

    /// Seeks the local player, seconds.
    fn dispatch_seek_local(&mut self, target: f64) {
        let Some(player) = self.ctx.player.as_mut() else {
            return;
        };
        if let Err(err) = player.seek(target) {
            warn!(%err, target, "seek failed");
            return;
        }
        self.set_state(PlaybackState::Seeking);
    }

    /// Seeks the cast target, milliseconds. A session on its way out
    /// falls back to the local player.
    async fn dispatch_seek_cast(&mut self, target_ms: f64) {
        use beamcast_model::CastSessionState::{Ended, Ending};
        self.ui.show_spinner(true);
        if matches!(self.cast.session_state(), Ending | Ended) {
            self.dispatch_seek_local(target_ms / 1000.0);
            self.ui.show_spinner(false);
            return;
        }
        match self.cast.send(&PlaybackCommand::Seek(target_ms)).await {
            Ok(()) => self.ui.show_spinner(false),
            Err(err) => warn!(%err, "cast seek failed"),
        }
    }
}

impl std::fmt::Debug for PlaybackRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackRouter")
            .field("state", &self.state)
            .field("ctx", &self.ctx)
            .field("cast", &self.cast)
            .finish_non_exhaustive()
    }
}
