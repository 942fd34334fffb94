//! Numeric hygiene for timeline arithmetic.
//!
//! All seek math is done in seconds with two decimal places, and every
//! externally supplied number is validated before it flows into a
//! position computation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A non-finite value (NaN or infinity) reached a timeline computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("non-finite value in timeline arithmetic")]
pub struct InvalidNumber;

/// Rejects NaN and infinities, passing finite values through.
pub fn checked(value: f64) -> Result<f64, InvalidNumber> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidNumber)
    }
}

/// Rounds `value` to `places` decimal places, half away from zero.
///
/// Positions and durations are carried at two decimals so that values
/// shown to the user and values sent to a player agree exactly.
pub fn fixed_to(value: f64, places: u32) -> Result<f64, InvalidNumber> {
    let scale = 10f64.powi(places as i32);
    checked(value).map(|v| (v * scale).round() / scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(fixed_to(1.005, 2), Ok(1.0)); // 1.005 is stored below the half
        assert_eq!(fixed_to(1.015, 2), Ok(1.01)); // likewise
        assert_eq!(fixed_to(2.675, 2), Ok(2.68)); // product lands exactly on the half
        assert_eq!(fixed_to(1.2349, 2), Ok(1.23));
        assert_eq!(fixed_to(1.235, 2), Ok(1.24));
        assert_eq!(fixed_to(-1.235, 2), Ok(-1.24));
    }

    #[test]
    fn zero_places_truncates_to_integers() {
        assert_eq!(fixed_to(12.5, 0), Ok(13.0));
        assert_eq!(fixed_to(12.4, 0), Ok(12.0));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        assert_eq!(fixed_to(f64::NAN, 2), Err(InvalidNumber));
        assert_eq!(fixed_to(f64::INFINITY, 2), Err(InvalidNumber));
        assert_eq!(checked(f64::NEG_INFINITY), Err(InvalidNumber));
        assert_eq!(checked(0.0), Ok(0.0));
    }
}
