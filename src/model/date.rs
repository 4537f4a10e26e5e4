use crate::random::Dice;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds in one day, as used for travel windows.
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Widest travel window accepted, about a century.
pub const MAX_WINDOW_DAYS: u32 = 36_500;

/// A travel date/time, carried as epoch milliseconds.
///
/// Serializes as a bare JSON number and renders as decimal in URL paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TravelDate(pub i64);

impl TravelDate {
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }

    /// `now` plus a whole number of days drawn uniformly from `0..window_days`.
    ///
    /// The window is clamped to `1..=MAX_WINDOW_DAYS`.
    pub fn random_within(dice: &mut dyn Dice, now: DateTime<Utc>, window_days: u32) -> Self {
        let days = dice.below(u64::from(window_days.clamp(1, MAX_WINDOW_DAYS)));
        // days < MAX_WINDOW_DAYS, so the product stays far inside i64
        Self::from_datetime(now).plus_millis(days as i64 * DAY_MS)
    }

    pub fn millis(self) -> i64 {
        self.0
    }

    pub fn plus_millis(self, millis: i64) -> Self {
        Self(self.0 + millis)
    }
}

impl fmt::Display for TravelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedDice;
    use chrono::TimeZone;

    #[test]
    fn test_random_within_adds_whole_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let mut dice = ScriptedDice::new([12]);
        let date = TravelDate::random_within(&mut dice, now, 100);

        assert_eq!(date.millis() - TravelDate::from_datetime(now).millis(), 12 * DAY_MS);
        assert_eq!(date.to_string(), date.millis().to_string());
    }

    #[test]
    fn test_window_is_exclusive() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let mut dice = ScriptedDice::new([500]);
        let date = TravelDate::random_within(&mut dice, now, 100);
        assert_eq!(date.millis() - TravelDate::from_datetime(now).millis(), 99 * DAY_MS);
    }

    #[test]
    fn test_oversized_window_is_clamped() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let mut dice = ScriptedDice::new([u64::MAX]);
        let date = TravelDate::random_within(&mut dice, now, u32::MAX);
        assert_eq!(
            date.millis() - TravelDate::from_datetime(now).millis(),
            i64::from(MAX_WINDOW_DAYS - 1) * DAY_MS
        );
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_value(TravelDate(1_700_000_000_000)).unwrap();
        assert_eq!(json, serde_json::json!(1_700_000_000_000i64));
    }
}
