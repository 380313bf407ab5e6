//! Cumulative per-session emotion counts and derived percentages.
//!
//! This is the only place cumulative session state lives. One count is
//! recorded per frame that had at least one detected face, for that frame's
//! dominant smoothed emotion.

use crate::detector::types::{Emotion, EMOTION_COUNT};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Dense percentage distribution over the emotion set.
///
/// Each value is individually within [0,100]. Values need not sum to exactly
/// 100 because of rounding. Serializes as a JSON object keyed by emotion name
/// (`{"happy": 62.5, ...}`); on deserialization, missing emotions default to
/// 0 and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    percentages: [f64; EMOTION_COUNT],
}

impl Distribution {
    /// Create an all-zero distribution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a distribution from `(emotion, percentage)` pairs.
    pub fn from_percentages(pairs: impl IntoIterator<Item = (Emotion, f64)>) -> Self {
        let mut dist = Self::new();
        for (emotion, pct) in pairs {
            dist.set(emotion, pct);
        }
        dist
    }

    /// Percentage for one emotion.
    pub fn get(&self, emotion: Emotion) -> f64 {
        self.percentages[emotion.index()]
    }

    /// Set the percentage for one emotion, clamped into [0,100].
    pub fn set(&mut self, emotion: Emotion, pct: f64) {
        let pct = if pct.is_finite() { pct } else { 0.0 };
        self.percentages[emotion.index()] = pct.clamp(0.0, 100.0);
    }

    /// Iterate `(emotion, percentage)` in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.iter().map(|&e| (e, self.get(e)))
    }

    /// Sum of all percentages.
    pub fn sum(&self) -> f64 {
        self.percentages.iter().sum()
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(EMOTION_COUNT))?;
        for emotion in Emotion::ALL {
            map.serialize_entry(emotion.as_str(), &self.get(emotion))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Distribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DistributionVisitor;

        impl<'de> Visitor<'de> for DistributionVisitor {
            type Value = Distribution;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of emotion names to percentages")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut dist = Distribution::new();
                while let Some((key, value)) = access.next_entry::<String, f64>()? {
                    if let Some(emotion) = Emotion::from_model_label(&key) {
                        dist.set(emotion, value);
                    }
                }
                Ok(dist)
            }
        }

        deserializer.deserialize_map(DistributionVisitor)
    }
}

/// Cumulative detection counts for one tracking session.
///
/// Counts are monotonically non-decreasing between resets and reset
/// atomically at session start. All reads are pure.
#[derive(Debug, Clone, Default)]
pub struct SessionAccumulator {
    counts: [u64; EMOTION_COUNT],
}

impl SessionAccumulator {
    /// Create an accumulator with all counts at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one detection for the frame's dominant emotion.
    pub fn record(&mut self, emotion: Emotion) {
        self.counts[emotion.index()] += 1;
    }

    /// Count for one emotion.
    pub fn count(&self, emotion: Emotion) -> u64 {
        self.counts[emotion.index()]
    }

    /// Consistent snapshot of all counts, in priority order.
    pub fn counts(&self) -> [u64; EMOTION_COUNT] {
        self.counts
    }

    /// Total detections across all emotions.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Percentage distribution, rounded to one decimal place.
    ///
    /// All zero when no detections have been recorded yet (never a
    /// divide-by-zero).
    pub fn distribution(&self) -> Distribution {
        let total = self.total();
        if total == 0 {
            return Distribution::new();
        }

        let mut dist = Distribution::new();
        for emotion in Emotion::ALL {
            let pct = (self.count(emotion) as f64 / total as f64 * 1000.0).round() / 10.0;
            dist.set(emotion, pct);
        }
        dist
    }

    /// The session's dominant emotion: highest count, ties broken by
    /// declaration order. `None` when nothing has been recorded.
    pub fn dominant(&self) -> Option<Emotion> {
        if self.total() == 0 {
            return None;
        }

        let mut best = Emotion::ALL[0];
        for emotion in Emotion::ALL {
            if self.count(emotion) > self.count(best) {
                best = emotion;
            }
        }
        Some(best)
    }

    /// Reset all counts to zero for a fresh session.
    pub fn reset(&mut self) {
        self.counts = [0; EMOTION_COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_accumulator_is_degenerate_not_fatal() {
        let acc = SessionAccumulator::new();
        assert_eq!(acc.total(), 0);
        assert_eq!(acc.dominant(), None);
        assert_eq!(acc.distribution().sum(), 0.0);
    }

    #[test]
    fn test_distribution_one_decimal_rounding() {
        let mut acc = SessionAccumulator::new();
        for _ in 0..2 {
            acc.record(Emotion::Happy);
        }
        acc.record(Emotion::Sad);
        let dist = acc.distribution();
        assert_eq!(dist.get(Emotion::Happy), 66.7);
        assert_eq!(dist.get(Emotion::Sad), 33.3);
    }

    #[test]
    fn test_distribution_sums_near_100() {
        let mut acc = SessionAccumulator::new();
        for (i, emotion) in Emotion::ALL.iter().enumerate() {
            for _ in 0..=i {
                acc.record(*emotion);
            }
        }
        let dist = acc.distribution();
        let tolerance = 0.1 * EMOTION_COUNT as f64;
        assert!((dist.sum() - 100.0).abs() <= tolerance);
        for (_, pct) in dist.iter() {
            assert!((0.0..=100.0).contains(&pct));
        }
    }

    #[test]
    fn test_dominant_with_tie_prefers_declaration_order() {
        let mut acc = SessionAccumulator::new();
        acc.record(Emotion::Bored);
        acc.record(Emotion::Neutral);
        assert_eq!(acc.dominant(), Some(Emotion::Neutral));
    }

    #[test]
    fn test_reads_are_idempotent() {
        let mut acc = SessionAccumulator::new();
        acc.record(Emotion::Happy);
        acc.record(Emotion::Angry);
        assert_eq!(acc.distribution(), acc.distribution());
        assert_eq!(acc.dominant(), acc.dominant());
        assert_eq!(acc.total(), acc.total());
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut acc = SessionAccumulator::new();
        acc.record(Emotion::Surprised);
        acc.reset();
        assert_eq!(acc.total(), 0);
        assert_eq!(acc.dominant(), None);
    }

    #[test]
    fn test_distribution_serde_round_trip() {
        let dist = Distribution::from_percentages([(Emotion::Happy, 70.0), (Emotion::Sad, 30.0)]);
        let json = serde_json::to_string(&dist).unwrap();
        assert!(json.contains("\"happy\":70.0"));
        let back: Distribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dist);
    }

    #[test]
    fn test_distribution_deserialize_partial_and_unknown() {
        let back: Distribution =
            serde_json::from_str(r#"{"happy": 55.0, "fearful": 45.0}"#).unwrap();
        assert_eq!(back.get(Emotion::Happy), 55.0);
        assert_eq!(back.get(Emotion::Neutral), 0.0);
    }
}
