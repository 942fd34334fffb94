//! Tunables shared across the router and the cast bridge.

use std::time::Duration;

/// Seconds jumped by the skip-back control.
pub const SKIP_BACK_SECONDS: f64 = 7.0;

/// Seconds jumped by the skip-forward control.
pub const SKIP_FORWARD_SECONDS: f64 = 30.0;

/// How far behind the live edge playback may drift, in seconds, before
/// the return-to-live affordance is shown.
pub const SHOW_LIVE_NOW_GAP_SECONDS: f64 = 10.0;

/// Grace period after a local return-to-live before the spinner and
/// the live-now button are pulled down. No event marks the jump
/// landing, so the UI is cleared on this timer.
pub const LIVE_NOW_GRACE_LOCAL: Duration = Duration::from_millis(1500);

/// Grace period after a cast return-to-live. The receiver round trip
/// takes longer than the local player does.
pub const LIVE_NOW_GRACE_CAST: Duration = Duration::from_millis(3500);

/// Cadence of the ad-elapsed counter while a live ad break plays.
pub const AD_TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Seconds added to the ad-elapsed counter per tick.
pub const AD_TICK_STEP: f64 = 0.25;

/// Cast message namespace shared with the receiver application.
pub const CAST_NAMESPACE: &str = "urn:x-cast:com.mediakind.cast.media";

/// Local seeks at or below this position are bumped to
/// [`LOCAL_SEEK_FLOOR_TARGET`]; the SDK treats positions near zero as
/// a restart request.
pub const LOCAL_SEEK_FLOOR: f64 = 1.0;

/// Replacement position for seeks caught by [`LOCAL_SEEK_FLOOR`].
pub const LOCAL_SEEK_FLOOR_TARGET: f64 = 2.0;
