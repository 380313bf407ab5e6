//! Boundary types for the external face-detection/expression model.
//!
//! The detector itself is an external collaborator. This module defines the
//! closed emotion set the core tracks and the per-face score vector handed
//! across the boundary. Per-face geometry and identity never cross it.

use serde::{Deserialize, Serialize};

/// The closed, ordered set of emotions tracked by the core.
///
/// Declaration order doubles as the tie-break priority: whenever two
/// emotions have equal smoothed scores or equal counts, the first-declared
/// one wins. This keeps dominant-emotion queries deterministic instead of
/// depending on map iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Neutral,
    Surprised,
    Sad,
    Angry,
    Bored,
}

/// Number of tracked emotions.
pub const EMOTION_COUNT: usize = 6;

impl Emotion {
    /// All emotions in declaration (priority) order.
    pub const ALL: [Emotion; EMOTION_COUNT] = [
        Emotion::Happy,
        Emotion::Neutral,
        Emotion::Surprised,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Bored,
    ];

    /// Stable index into dense per-emotion arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name used in serialized payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Neutral => "neutral",
            Emotion::Surprised => "surprised",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Bored => "bored",
        }
    }

    /// Map an expression label from the external model onto our emotion set.
    ///
    /// The model emits a superset of our labels. "disgusted" is folded into
    /// [`Emotion::Bored`] (similar low-energy, negative-valence profile);
    /// labels we do not track (e.g. "fearful") return `None` and are ignored.
    pub fn from_model_label(label: &str) -> Option<Emotion> {
        match label {
            "happy" => Some(Emotion::Happy),
            "neutral" => Some(Emotion::Neutral),
            "surprised" => Some(Emotion::Surprised),
            "sad" => Some(Emotion::Sad),
            "angry" => Some(Emotion::Angry),
            "bored" | "disgusted" => Some(Emotion::Bored),
            _ => None,
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-face confidence scores across the tracked emotion set.
///
/// One vector is produced per detected face per frame. Scores are confidences
/// in [0,1]. A vector carries no face identity, position or size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionVector {
    scores: [f64; EMOTION_COUNT],
}

impl ExpressionVector {
    /// Create an all-zero vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vector from `(emotion, score)` pairs.
    ///
    /// Emotions absent from the input stay at 0 (a partial vector is an
    /// input anomaly, not an error). Scores are clamped into [0,1].
    pub fn from_scores(pairs: impl IntoIterator<Item = (Emotion, f64)>) -> Self {
        let mut vector = Self::new();
        for (emotion, score) in pairs {
            vector.set(emotion, score);
        }
        vector
    }

    /// Build a vector from raw model output labels.
    ///
    /// Labels outside our emotion set are dropped; when the model's "bored"
    /// proxy and a direct "bored" score both appear, the later value wins.
    pub fn from_model_scores<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mapped = pairs
            .into_iter()
            .filter_map(|(label, score)| Emotion::from_model_label(label).map(|e| (e, score)));
        Self::from_scores(mapped)
    }

    /// Get the score for one emotion.
    pub fn get(&self, emotion: Emotion) -> f64 {
        self.scores[emotion.index()]
    }

    /// Set the score for one emotion, clamped into [0,1].
    pub fn set(&mut self, emotion: Emotion, score: f64) {
        let score = if score.is_finite() { score } else { 0.0 };
        self.scores[emotion.index()] = score.clamp(0.0, 1.0);
    }
}

/// The single group-level expression vector for one frame.
///
/// Per-emotion mean across every face detected in the frame. This is a
/// one-way reduction: face count and geometry are deliberately not part of
/// the type, so nothing downstream can re-identify individuals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupFrameVector {
    scores: [f64; EMOTION_COUNT],
}

impl GroupFrameVector {
    pub(crate) fn from_raw(scores: [f64; EMOTION_COUNT]) -> Self {
        Self { scores }
    }

    /// Get the group score for one emotion.
    pub fn get(&self, emotion: Emotion) -> f64 {
        self.scores[emotion.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_order_is_priority_order() {
        assert_eq!(Emotion::ALL[0], Emotion::Happy);
        assert_eq!(Emotion::ALL[EMOTION_COUNT - 1], Emotion::Bored);
        for (i, emotion) in Emotion::ALL.iter().enumerate() {
            assert_eq!(emotion.index(), i);
        }
    }

    #[test]
    fn test_model_label_mapping() {
        assert_eq!(Emotion::from_model_label("happy"), Some(Emotion::Happy));
        assert_eq!(Emotion::from_model_label("disgusted"), Some(Emotion::Bored));
        assert_eq!(Emotion::from_model_label("fearful"), None);
    }

    #[test]
    fn test_partial_vector_defaults_to_zero() {
        let vector = ExpressionVector::from_scores([(Emotion::Happy, 0.9)]);
        assert_eq!(vector.get(Emotion::Happy), 0.9);
        assert_eq!(vector.get(Emotion::Sad), 0.0);
    }

    #[test]
    fn test_scores_clamped_to_unit_range() {
        let vector = ExpressionVector::from_scores([
            (Emotion::Happy, 1.7),
            (Emotion::Angry, -0.3),
            (Emotion::Sad, f64::NAN),
        ]);
        assert_eq!(vector.get(Emotion::Happy), 1.0);
        assert_eq!(vector.get(Emotion::Angry), 0.0);
        assert_eq!(vector.get(Emotion::Sad), 0.0);
    }

    #[test]
    fn test_model_scores_drop_unknown_labels() {
        let vector =
            ExpressionVector::from_model_scores([("happy", 0.5), ("fearful", 0.9), ("disgusted", 0.2)]);
        assert_eq!(vector.get(Emotion::Happy), 0.5);
        assert_eq!(vector.get(Emotion::Bored), 0.2);
    }
}
