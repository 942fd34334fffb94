//! Per-session state carried by the router.
//!
//! Everything the original kept in page-level globals lives here as
//! one explicit object: the config snapshot, the local player handle,
//! ad bookkeeping, cached ranges, the settings that survive teardown,
//! and the scoped timers.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;

use beamcast_model::{
    AdMarkerSet, LogLevel, PlayerConfig, SeekableRange,
};

use crate::constants::{AD_TICK_INTERVAL, AD_TICK_STEP};
use crate::traits::{LocalPlayer, UiAdapter};

/// Settings that survive playback teardown and are replayed onto the
/// next session.
#[derive(Debug, Clone, PartialEq)]
pub struct StickySettings {
    /// Closed caption state.
    pub closed_captions: bool,
    /// Playback rate.
    pub playback_speed: f64,
    /// Volume level, `0.0..=1.0`.
    pub volume: f64,
    /// Mute state.
    pub muted: bool,
    /// Player log verbosity.
    pub log_level: LogLevel,
}

impl Default for StickySettings {
    fn default() -> Self {
        Self {
            closed_captions: false,
            playback_speed: 1.0,
            volume: 1.0,
            muted: false,
            log_level: LogLevel::default(),
        }
    }
}

/// All mutable state of the active (or pending) playback session.
pub struct SessionContext {
    /// Configuration of the current or next playback attempt.
    pub config: Option<PlayerConfig>,
    /// Handle onto the local SDK player, present while a local
    /// session exists.
    pub player: Option<Box<dyn LocalPlayer>>,
    /// Ad break bookkeeping for the loaded asset.
    pub markers: Option<AdMarkerSet>,
    /// Seekable window cached from the latest metrics report.
    pub seekable_range: Option<SeekableRange>,
    /// Whether seek targets are validated against the seekable window.
    pub enforce_seekable_range: bool,
    /// Whether the loaded source is an externally packaged stream
    /// (relaxes the pure-live guards).
    pub external_source: bool,
    /// Settings replayed across sessions.
    pub sticky: StickySettings,
    /// Start a new session as soon as the current one finishes
    /// tearing down.
    pub play_next: bool,
    /// Backend restriction codes active for the current program.
    pub restrictions: Vec<u32>,
    /// When the current load began, for the startup-time metric.
    pub load_started: Option<std::time::Instant>,
    ad_elapsed: Arc<Mutex<f64>>,
    ad_ticker: Option<AbortHandle>,
    live_now_grace: Option<AbortHandle>,
}

impl SessionContext {
    /// An empty context with default sticky settings.
    pub fn new() -> Self {
        Self {
            config: None,
            player: None,
            markers: None,
            seekable_range: None,
            enforce_seekable_range: false,
            external_source: false,
            sticky: StickySettings::default(),
            play_next: false,
            restrictions: Vec::new(),
            load_started: None,
            ad_elapsed: Arc::new(Mutex::new(0.0)),
            ad_ticker: None,
            live_now_grace: None,
        }
    }

    /// Seconds of the running ad break already watched.
    pub fn ad_elapsed(&self) -> f64 {
        *self.ad_elapsed.lock()
    }

    /// Starts counting watched ad time. A previous ticker is replaced.
    pub fn start_ad_ticker(&mut self) {
        self.stop_ad_ticker();
        let counter = Arc::clone(&self.ad_elapsed);
        let handle = tokio::spawn(async move {
            let mut tick = tokio::time::interval(AD_TICK_INTERVAL);
            tick.tick().await; // the first tick fires immediately
            loop {
                tick.tick().await;
                *counter.lock() += AD_TICK_STEP;
            }
        });
        self.ad_ticker = Some(handle.abort_handle());
    }

    /// Stops the watched-ad counter without clearing its value.
    pub fn stop_ad_ticker(&mut self) {
        if let Some(h) = self.ad_ticker.take() {
            h.abort();
        }
    }

    /// Clears the watched-ad counter and its ticker.
    pub fn reset_ad_elapsed(&mut self) {
        self.stop_ad_ticker();
        *self.ad_elapsed.lock() = 0.0;
    }

    /// Schedules the optimistic UI pulldown after a return-to-live.
    /// An earlier pending pulldown is cancelled first.
    pub fn schedule_live_now_pulldown(&mut self, ui: Arc<dyn UiAdapter>, delay: Duration) {
        self.cancel_live_now_pulldown();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            ui.show_spinner(false);
            ui.show_live_now_button(false);
            ui.toast_message("You are watching Live!");
        });
        self.live_now_grace = Some(handle.abort_handle());
    }

    /// Cancels a pending live-now pulldown.
    pub fn cancel_live_now_pulldown(&mut self) {
        if let Some(h) = self.live_now_grace.take() {
            h.abort();
        }
    }

    /// Cancels every scoped timer. Called on stop and on target
    /// switch.
    pub fn clear_timers(&mut self) {
        self.stop_ad_ticker();
        self.cancel_live_now_pulldown();
    }

    /// Tears down per-session state when playback goes idle. Sticky
    /// settings and the config snapshot survive for the next session.
    pub fn reset_for_idle(&mut self) {
        self.clear_timers();
        self.player = None;
        self.markers = None;
        self.seekable_range = None;
        self.restrictions.clear();
        self.load_started = None;
        *self.ad_elapsed.lock() = 0.0;
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("has_player", &self.player.is_some())
            .field("markers", &self.markers)
            .field("sticky", &self.sticky)
            .field("play_next", &self.play_next)
            .field("restrictions", &self.restrictions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ad_ticker_accumulates_quarter_seconds() {
        let mut ctx = SessionContext::new();
        ctx.start_ad_ticker();
        // Let the ticker task arm its interval before moving the clock,
        // then hand it the scheduler after every tick boundary.
        tokio::task::yield_now().await;
        for _ in 0..4 {
            tokio::time::advance(AD_TICK_INTERVAL).await;
            tokio::task::yield_now().await;
        }
        assert!((ctx.ad_elapsed() - 1.0).abs() < f64::EPSILON);
        ctx.stop_ad_ticker();
        let frozen = ctx.ad_elapsed();
        tokio::time::advance(Duration::from_millis(1000)).await;
        tokio::task::yield_now().await;
        assert_eq!(ctx.ad_elapsed(), frozen);
    }

    #[test]
    fn idle_reset_preserves_sticky_settings_and_config() {
        let mut ctx = SessionContext::new();
        ctx.sticky.closed_captions = true;
        ctx.sticky.playback_speed = 1.5;
        ctx.restrictions = vec![224];
        ctx.reset_for_idle();
        assert!(ctx.sticky.closed_captions);
        assert_eq!(ctx.sticky.playback_speed, 1.5);
        assert!(ctx.restrictions.is_empty());
        assert!(ctx.player.is_none());
    }
}
