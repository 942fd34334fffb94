//! Ad break bookkeeping for server-stitched streams.
//!
//! Stitched assets carry their ad breaks inside the media timeline, so
//! the raw player position and the position a viewer should see differ
//! by the duration of every break already behind them. [`AdMarkerSet`]
//! is built once per marker event and answers the domain conversions
//! the seek math needs.

use serde::{Deserialize, Serialize};

use crate::numbers::{fixed_to, InvalidNumber};

/// One stitched ad break as reported by the player, in milliseconds of
/// raw media time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdBreak {
    /// Start of the break in raw media time, milliseconds.
    pub position: f64,
    /// Length of the break, milliseconds.
    pub duration: f64,
}

/// Derived view of all ad breaks in the active asset, in seconds.
///
/// For video-on-demand every break is kept; for live only the most
/// recent break matters and the rest are dropped. All figures are
/// rounded to two decimals at construction so later arithmetic agrees
/// with what the UI renders.
#[derive(Debug, Clone, PartialEq)]
pub struct AdMarkerSet {
    start_times: Vec<f64>,
    durations: Vec<f64>,
    display_start_times: Vec<f64>,
    seekbar_positions: Vec<f64>,
    total_ad_duration: f64,
    content_duration: f64,
    live: bool,
}

impl AdMarkerSet {
    /// Builds the marker set from raw break data.
    ///
    /// `duration` is the full media duration in seconds, breaks
    /// included. Returns `Ok(None)` when there are no breaks, which
    /// callers treat as "clear any previous markers". A non-finite
    /// position or duration anywhere in the input is an error.
    pub fn from_breaks(
        breaks: &[AdBreak],
        duration: f64,
        live: bool,
    ) -> Result<Option<Self>, InvalidNumber> {
        if breaks.is_empty() {
            return Ok(None);
        }
        // Live assets only ever surface the break that just played.
        let breaks: &[AdBreak] = if live {
            std::slice::from_ref(breaks.last().unwrap_or(&breaks[0]))
        } else {
            breaks
        };

        let mut set = Self {
            start_times: Vec::with_capacity(breaks.len()),
            durations: Vec::with_capacity(breaks.len()),
            display_start_times: Vec::with_capacity(breaks.len()),
            seekbar_positions: Vec::new(),
            total_ad_duration: 0.0,
            content_duration: fixed_to(duration, 2)?,
            live,
        };

        let mut elapsed_ad_ms = 0.0;
        for b in breaks {
            set.start_times.push(fixed_to(b.position / 1000.0, 2)?);
            set.durations.push(fixed_to(b.duration / 1000.0, 2)?);
            set.display_start_times
                .push(fixed_to((b.position - elapsed_ad_ms) / 1000.0, 2)?);
            elapsed_ad_ms += b.duration;
        }
        set.total_ad_duration = fixed_to(elapsed_ad_ms / 1000.0, 2)?;

        if !live {
            set.content_duration = fixed_to(duration - set.total_ad_duration, 2)?;
            for &start in &set.display_start_times {
                let pct = fixed_to((start / set.content_duration) * 100.0, 2)?;
                // A marker drawn at 100% would fall off the seekbar.
                set.seekbar_positions.push(pct.min(99.0));
            }
        }

        Ok(Some(set))
    }

    /// Break start times in raw media seconds.
    pub fn start_times(&self) -> &[f64] {
        &self.start_times
    }

    /// Break lengths in seconds, index-aligned with [`start_times`].
    ///
    /// [`start_times`]: Self::start_times
    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    /// Break start times with prior ad time subtracted, in seconds.
    pub fn display_start_times(&self) -> &[f64] {
        &self.display_start_times
    }

    /// Seekbar percentages for each break, empty for live assets.
    pub fn seekbar_positions(&self) -> &[f64] {
        &self.seekbar_positions
    }

    /// Combined length of the retained breaks, seconds.
    pub fn total_ad_duration(&self) -> f64 {
        self.total_ad_duration
    }

    /// Media duration with ad time removed (VOD) or unchanged (live).
    pub fn content_duration(&self) -> f64 {
        self.content_duration
    }

    /// Whether this set was built for a live asset.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Number of retained breaks.
    pub fn len(&self) -> usize {
        self.start_times.len()
    }

    /// True when no breaks were retained. Construction never produces
    /// this, but callers holding an `Option` flatten through it.
    pub fn is_empty(&self) -> bool {
        self.start_times.is_empty()
    }

    /// Index of the break whose closed interval contains `pos`, raw
    /// media seconds.
    pub fn break_containing(&self, pos: f64) -> Option<usize> {
        self.start_times
            .iter()
            .zip(&self.durations)
            .position(|(&start, &len)| pos >= start && pos <= start + len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaks() -> Vec<AdBreak> {
        vec![
            AdBreak { position: 30_000.0, duration: 10_000.0 },
            AdBreak { position: 90_000.0, duration: 20_000.0 },
        ]
    }

    #[test]
    fn vod_set_subtracts_prior_ad_time() {
        let set = AdMarkerSet::from_breaks(&breaks(), 150.0, false)
            .unwrap()
            .unwrap();
        assert_eq!(set.start_times(), &[30.0, 90.0]);
        assert_eq!(set.durations(), &[10.0, 20.0]);
        assert_eq!(set.display_start_times(), &[30.0, 80.0]);
        assert_eq!(set.total_ad_duration(), 30.0);
        assert_eq!(set.content_duration(), 120.0);
        assert_eq!(set.seekbar_positions(), &[25.0, 66.67]);
    }

    #[test]
    fn live_set_keeps_only_the_last_break() {
        let set = AdMarkerSet::from_breaks(&breaks(), 150.0, true)
            .unwrap()
            .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.start_times(), &[90.0]);
        assert_eq!(set.total_ad_duration(), 20.0);
        // Live duration is not reduced and no seekbar markers exist.
        assert_eq!(set.content_duration(), 150.0);
        assert!(set.seekbar_positions().is_empty());
    }

    #[test]
    fn seekbar_positions_are_capped_below_the_right_edge() {
        let tail = [AdBreak { position: 119_500.0, duration: 5_000.0 }];
        let set = AdMarkerSet::from_breaks(&tail, 124.5, false)
            .unwrap()
            .unwrap();
        assert_eq!(set.seekbar_positions(), &[99.0]);
    }

    #[test]
    fn no_breaks_clears_the_set() {
        assert_eq!(AdMarkerSet::from_breaks(&[], 100.0, false), Ok(None));
    }

    #[test]
    fn break_containing_uses_closed_intervals() {
        let set = AdMarkerSet::from_breaks(&breaks(), 150.0, false)
            .unwrap()
            .unwrap();
        assert_eq!(set.break_containing(30.0), Some(0));
        assert_eq!(set.break_containing(40.0), Some(0));
        assert_eq!(set.break_containing(41.0), None);
        assert_eq!(set.break_containing(95.0), Some(1));
        assert_eq!(set.break_containing(0.0), None);
    }

    #[test]
    fn non_finite_break_data_is_rejected() {
        let bad = [AdBreak { position: f64::NAN, duration: 1_000.0 }];
        assert_eq!(
            AdMarkerSet::from_breaks(&bad, 100.0, false),
            Err(InvalidNumber)
        );
    }
}
