//! The persisted launch mark.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::traits::PreferenceValue;

/// Timestamp of the last recorded process start, in fractional seconds since
/// the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct LaunchMark {
    /// Seconds since epoch, with sub-second precision.
    pub epoch_seconds: f64,
}

impl LaunchMark {
    /// Build a mark from raw epoch seconds.
    pub fn new(epoch_seconds: f64) -> Self {
        Self { epoch_seconds }
    }

    /// Mark for the given instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self::new(epoch_seconds(now))
    }

    /// Decode a stored preference value.
    ///
    /// Returns `None` for anything that isn't a finite number.
    pub fn from_value(value: &PreferenceValue) -> Option<Self> {
        value
            .as_f64()
            .filter(|secs| secs.is_finite())
            .map(Self::new)
    }

    /// Encode for the preference store.
    pub fn to_value(self) -> PreferenceValue {
        serde_json::Number::from_f64(self.epoch_seconds)
            .map(PreferenceValue::Number)
            .unwrap_or(PreferenceValue::Null)
    }

    /// Seconds elapsed from this mark until `now`. Negative when the mark is
    /// in the future.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> f64 {
        epoch_seconds(now) - self.epoch_seconds
    }

    /// The mark as a UTC timestamp, if it is in chrono's range.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        let micros = (self.epoch_seconds * 1_000_000.0).round();
        if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
            return None;
        }
        let micros = micros as i64;
        let secs = micros.div_euclid(1_000_000);
        let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
        Utc.timestamp_opt(secs, nanos).single()
    }
}

fn epoch_seconds(now: DateTime<Utc>) -> f64 {
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1_000_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_accepts_numbers() {
        assert_eq!(
            LaunchMark::from_value(&json!(1700000000.25)),
            Some(LaunchMark::new(1700000000.25))
        );
        assert_eq!(
            LaunchMark::from_value(&json!(1700000000)),
            Some(LaunchMark::new(1700000000.0))
        );
    }

    #[test]
    fn test_from_value_rejects_non_numbers() {
        assert_eq!(LaunchMark::from_value(&json!("1700000000")), None);
        assert_eq!(LaunchMark::from_value(&json!(null)), None);
        assert_eq!(LaunchMark::from_value(&json!({"t": 1})), None);
    }

    #[test]
    fn test_value_roundtrip_keeps_fraction() {
        let mark = LaunchMark::new(1700000000.5);
        assert_eq!(LaunchMark::from_value(&mark.to_value()), Some(mark));
    }

    #[test]
    fn test_elapsed_secs() {
        let now = Utc.timestamp_opt(1_700_000_100, 0).unwrap();
        let mark = LaunchMark::new(1_700_000_000.0);
        assert_eq!(mark.elapsed_secs(now), 100.0);

        let future = LaunchMark::new(1_700_000_200.0);
        assert_eq!(future.elapsed_secs(now), -100.0);
    }

    #[test]
    fn test_at_and_as_datetime() {
        let now = Utc.timestamp_opt(1_700_000_000, 500_000_000).unwrap();
        let mark = LaunchMark::at(now);
        assert_eq!(mark.epoch_seconds, 1_700_000_000.5);
        assert_eq!(mark.as_datetime(), Some(now));
    }
}
