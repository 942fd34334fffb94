//! Ad-aware seek time conversions.
//!
//! Stitched ad breaks live inside the raw media timeline, while the
//! seekbar and every on-screen time are drawn in an ad-free domain.
//! These functions convert between the two. They are pure: all state
//! arrives as arguments, results carry two decimal places, and a
//! non-finite input is rejected instead of propagating through the
//! arithmetic.

use beamcast_model::markers::AdMarkerSet;
use beamcast_model::numbers::{checked, fixed_to, InvalidNumber};
use beamcast_model::PlaybackMode;

/// Converts a seekbar percentage into a raw media time, seconds.
///
/// The naive target is `percent/100` of the ad-free duration; the
/// duration of every break whose seekbar position precedes `percent`
/// is then added back, because the player seeks in the raw domain.
pub fn raw_percent_to_media_time(
    percent: f64,
    markers: Option<&AdMarkerSet>,
    duration: f64,
) -> Result<f64, InvalidNumber> {
    let percent = checked(percent)?;
    let duration = checked(duration)?
        - markers.map(AdMarkerSet::total_ad_duration).unwrap_or(0.0);
    let mut target = fixed_to((percent / 100.0) * duration, 2)?;

    if let Some(markers) = markers {
        for (i, &pct) in markers.seekbar_positions().iter().enumerate() {
            if percent > pct {
                target += markers.durations()[i];
            }
        }
    }
    Ok(target)
}

/// Converts a raw media position into the displayed position, seconds.
///
/// Breaks fully behind the position are subtracted; a position inside
/// a break renders as the break's ad-free start, so the displayed time
/// never advances through an ad.
pub fn media_time_to_display_time(
    raw: f64,
    markers: Option<&AdMarkerSet>,
) -> Result<f64, InvalidNumber> {
    let raw = checked(raw)?;
    let mut position = raw;
    if let Some(markers) = markers {
        if let Some(i) = markers.break_containing(raw) {
            position = markers.display_start_times()[i];
        } else {
            for (i, &start) in markers.start_times().iter().enumerate() {
                let len = markers.durations()[i];
                if raw >= start + len {
                    position -= len;
                }
            }
        }
    }
    fixed_to(position.max(0.0), 2)
}

/// Computes the landing position for a skip button press, seconds.
///
/// `delta` is signed: positive skips forward, negative skips back.
/// The naive target clamps to `[0, duration]`; if the hop would cross
/// into or over an ad break boundary it lands on that break's start
/// instead, so a skip can never jump an ad.
pub fn trick_seek_target(
    current: f64,
    duration: f64,
    delta: f64,
    markers: Option<&AdMarkerSet>,
) -> Result<f64, InvalidNumber> {
    let current = checked(current)?;
    let duration = checked(duration)?;
    let delta = checked(delta)?;
    let mut target = if delta > 0.0 {
        fixed_to((current + delta).min(duration), 2)?
    } else {
        fixed_to((current + delta).max(0.0), 2)?
    };

    if let Some(markers) = markers {
        for (i, &start) in markers.start_times().iter().enumerate() {
            let end = start + markers.durations()[i];
            if delta > 0.0 {
                if current <= start && start <= target {
                    target = start;
                    break;
                }
            } else if target <= end && end <= current {
                target = start;
                break;
            }
        }
    }
    Ok(target)
}

/// Computes where skipping the running ad break should land, seconds.
///
/// On demand the target is the end of the break containing `current`;
/// live assets only know the break that just played, so the target is
/// `current` plus that break's length. Either way the seconds of ad
/// already watched (`elapsed`) are credited back. Returns `None` when
/// no break applies.
pub fn skip_ad_target(
    current: f64,
    elapsed: f64,
    markers: Option<&AdMarkerSet>,
    mode: PlaybackMode,
) -> Result<Option<f64>, InvalidNumber> {
    let current = fixed_to(checked(current)?, 2)?;
    let elapsed = checked(elapsed)?;
    let Some(markers) = markers else {
        return Ok(None);
    };

    let target = if mode.is_live() {
        markers.durations().first().map(|len| current + len)
    } else {
        markers
            .break_containing(current)
            .map(|i| markers.start_times()[i] + markers.durations()[i])
    };

    Ok(target.map(|t| (t - elapsed).max(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use beamcast_model::markers::AdBreak;

    /// One 10 s break at 30 s into a 120 s asset (110 s of content).
    fn single_break() -> AdMarkerSet {
        AdMarkerSet::from_breaks(
            &[AdBreak { position: 30_000.0, duration: 10_000.0 }],
            120.0,
            false,
        )
        .unwrap()
        .unwrap()
    }

    /// Breaks at [30, 40) and [90, 110) in a 150 s asset.
    fn double_break() -> AdMarkerSet {
        AdMarkerSet::from_breaks(
            &[
                AdBreak { position: 30_000.0, duration: 10_000.0 },
                AdBreak { position: 90_000.0, duration: 20_000.0 },
            ],
            150.0,
            false,
        )
        .unwrap()
        .unwrap()
    }

    #[test]
    fn halfway_lands_past_the_stitched_break() {
        // 50% of 110 s of content is 55 s; the break before it adds 10.
        let markers = single_break();
        let t = raw_percent_to_media_time(50.0, Some(&markers), 120.0).unwrap();
        assert_eq!(t, 65.0);
    }

    #[test]
    fn percent_mapping_without_markers_is_plain_proportion() {
        let t = raw_percent_to_media_time(25.0, None, 200.0).unwrap();
        assert_eq!(t, 50.0);
    }

    #[test]
    fn percent_mapping_is_monotonic_across_breaks() {
        let markers = double_break();
        let duration = 150.0;
        let mut last = f64::MIN;
        let mut pct = 0.0;
        while pct <= 100.0 {
            let t = raw_percent_to_media_time(pct, Some(&markers), duration).unwrap();
            assert!(t >= last, "mapping went backwards at {pct}%");
            last = t;
            pct += 0.5;
        }
    }

    #[test]
    fn display_time_subtracts_breaks_behind_the_playhead() {
        let markers = double_break();
        // Before any break: unchanged.
        assert_eq!(media_time_to_display_time(20.0, Some(&markers)).unwrap(), 20.0);
        // Past the first break: 10 s removed.
        assert_eq!(media_time_to_display_time(50.0, Some(&markers)).unwrap(), 40.0);
        // Past both: 30 s removed.
        assert_eq!(media_time_to_display_time(140.0, Some(&markers)).unwrap(), 110.0);
    }

    #[test]
    fn display_time_pins_inside_a_break_to_its_start() {
        let markers = double_break();
        // Inside [30, 40): displayed time holds at the break's ad-free
        // start until the break ends.
        assert_eq!(media_time_to_display_time(33.0, Some(&markers)).unwrap(), 30.0);
        assert_eq!(media_time_to_display_time(39.9, Some(&markers)).unwrap(), 30.0);
        // Inside [90, 110): the prior break's 10 s came off too, so the
        // ad-free start is 80, not 90.
        assert_eq!(media_time_to_display_time(100.0, Some(&markers)).unwrap(), 80.0);
        assert_eq!(media_time_to_display_time(110.0, Some(&markers)).unwrap(), 80.0);
    }

    #[test]
    fn skip_back_from_inside_a_break_is_a_plain_hop() {
        // From 35 inside [30, 40), seven seconds back is 28: the break
        // end (40) is not on the traversed path, so no snap happens.
        let markers = double_break();
        let t = trick_seek_target(35.0, 150.0, -7.0, Some(&markers)).unwrap();
        assert_eq!(t, 28.0);
    }

    #[test]
    fn skip_back_over_a_break_end_snaps_to_its_start() {
        // From 45, seven back is 38, crossing the end of [30, 40).
        let markers = double_break();
        let t = trick_seek_target(45.0, 150.0, -7.0, Some(&markers)).unwrap();
        assert_eq!(t, 30.0);
    }

    #[test]
    fn skip_forward_over_a_break_start_snaps_to_it() {
        // From 70, thirty forward is 100, crossing the start of [90, 110).
        let markers = double_break();
        let t = trick_seek_target(70.0, 150.0, 30.0, Some(&markers)).unwrap();
        assert_eq!(t, 90.0);
    }

    #[test]
    fn trick_seek_clamps_to_the_program_bounds() {
        assert_eq!(trick_seek_target(3.0, 150.0, -7.0, None).unwrap(), 0.0);
        assert_eq!(trick_seek_target(140.0, 150.0, 30.0, None).unwrap(), 150.0);
    }

    #[test]
    fn trick_seek_from_outside_a_break_never_lands_inside_one() {
        let markers = double_break();
        let mut pos = 0.0;
        while pos <= 150.0 {
            // Skips initiated inside a break are plain hops; the
            // boundary snap only guards paths that cross into a break.
            if markers.break_containing(pos).is_some() {
                pos += 0.25;
                continue;
            }
            for delta in [-7.0, 30.0] {
                let t = trick_seek_target(pos, 150.0, delta, Some(&markers)).unwrap();
                for (i, &start) in markers.start_times().iter().enumerate() {
                    let end = start + markers.durations()[i];
                    assert!(
                        !(t > start && t < end),
                        "skip from {pos} by {delta} landed at {t}, inside [{start}, {end})"
                    );
                }
            }
            pos += 0.25;
        }
    }

    #[test]
    fn vod_skip_ad_lands_at_the_break_end_less_time_watched() {
        let markers = double_break();
        let t = skip_ad_target(95.0, 5.0, Some(&markers), PlaybackMode::Vod).unwrap();
        assert_eq!(t, Some(105.0));
        // Not inside any break: nothing to skip.
        let t = skip_ad_target(50.0, 0.0, Some(&markers), PlaybackMode::Vod).unwrap();
        assert_eq!(t, None);
    }

    #[test]
    fn live_skip_ad_advances_by_the_last_break_length() {
        let markers = AdMarkerSet::from_breaks(
            &[
                AdBreak { position: 30_000.0, duration: 10_000.0 },
                AdBreak { position: 300_000.0, duration: 15_000.0 },
            ],
            600.0,
            true,
        )
        .unwrap()
        .unwrap();
        let t = skip_ad_target(310.0, 4.0, Some(&markers), PlaybackMode::Live).unwrap();
        assert_eq!(t, Some(321.0));
    }

    #[test]
    fn skip_ad_target_is_never_negative() {
        let markers = double_break();
        let t = skip_ad_target(31.0, 500.0, Some(&markers), PlaybackMode::Vod).unwrap();
        assert_eq!(t, Some(0.0));
    }

    #[test]
    fn non_finite_inputs_are_rejected_everywhere() {
        let markers = double_break();
        assert!(raw_percent_to_media_time(f64::NAN, Some(&markers), 150.0).is_err());
        assert!(raw_percent_to_media_time(50.0, Some(&markers), f64::INFINITY).is_err());
        assert!(media_time_to_display_time(f64::NAN, None).is_err());
        assert!(trick_seek_target(f64::NAN, 150.0, -7.0, None).is_err());
        assert!(trick_seek_target(10.0, 150.0, f64::NEG_INFINITY, None).is_err());
        assert!(skip_ad_target(f64::NAN, 0.0, Some(&markers), PlaybackMode::Vod).is_err());
    }
}
