//! Gauges (health, injuries, wounds, fatigue, composure, frustration).
//!
//! A track is a current value with an upper bound. Sheets store them as
//! `{ "value": n, "max": m }`; both fields default to 0 when absent.

use serde::{Deserialize, Serialize};

/// A numeric gauge with a current value and a maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Current value.
    #[serde(default)]
    pub value: u32,
    /// Maximum value.
    #[serde(default)]
    pub max: u32,
}

impl Track {
    /// Create a track that starts full.
    pub fn full(max: u32) -> Self {
        Self { value: max, max }
    }

    /// Create a track with an explicit current value, clamped to `max`.
    pub fn with_value(value: u32, max: u32) -> Self {
        Self {
            value: value.min(max),
            max,
        }
    }

    /// Adjust the track by a delta, clamping to `0..=max`. Returns the new value.
    pub fn adjust(&mut self, delta: i64) -> u32 {
        let next = i64::from(self.value)
            .saturating_add(delta)
            .clamp(0, i64::from(self.max));
        self.value = u32::try_from(next).unwrap_or(self.max);
        self.value
    }

    /// Returns true if the track is at zero.
    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// Returns true if the track is at or above its maximum.
    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }

    /// Returns the fraction of the track that is filled (0.0 to 1.0).
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            return 1.0;
        }
        f64::from(self.value.min(self.max)) / f64::from(self.max)
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.value, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_starts_at_max() {
        let t = Track::full(6);
        assert_eq!(t.value, 6);
        assert!(t.is_full());
        assert!(!t.is_empty());
    }

    #[test]
    fn with_value_clamps_initial() {
        let t = Track::with_value(100, 3);
        assert_eq!(t.value, 3);
    }

    #[test]
    fn adjust_clamps_both_ends() {
        let mut t = Track::full(5);
        assert_eq!(t.adjust(10), 5);
        assert_eq!(t.adjust(-2), 3);
        assert_eq!(t.adjust(-20), 0);
        assert!(t.is_empty());
    }

    #[test]
    fn fraction() {
        let mut t = Track::full(4);
        assert!((t.fraction() - 1.0).abs() < f64::EPSILON);
        t.adjust(-2);
        assert!((t.fraction() - 0.5).abs() < f64::EPSILON);
        assert!((Track::default().fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let t: Track = serde_json::from_str(r#"{ "value": 2 }"#).unwrap();
        assert_eq!(t, Track { value: 2, max: 0 });
    }

    #[test]
    fn display() {
        assert_eq!(Track::with_value(1, 3).to_string(), "1/3");
    }
}
