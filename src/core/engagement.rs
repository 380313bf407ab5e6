//! Engagement scoring: collapse a mood distribution into one 0-100 number.
//!
//! Each emotion carries a fixed weight reflecting how "positively activated"
//! it is. The score is the weighted sum of the distribution's percentages,
//! clamped and rounded. Stateless; recomputed on demand.

use crate::core::accumulator::Distribution;
use crate::detector::types::Emotion;
use serde::{Deserialize, Serialize};

/// Engagement weight per emotion.
///
/// High-arousal positive emotions score near 1.0, neutral sits in the
/// middle, low-arousal negative emotions near 0.
pub const fn engagement_weight(emotion: Emotion) -> f64 {
    match emotion {
        Emotion::Happy => 1.0,
        Emotion::Surprised => 0.8,
        Emotion::Neutral => 0.5,
        Emotion::Bored => 0.15,
        Emotion::Sad => 0.1,
        Emotion::Angry => 0.0,
    }
}

/// Compute the engagement score for a distribution.
///
/// `score = round(clamp(sum(weight * pct), 0, 100))`. Pure; never fails for
/// well-formed input. An all-zero distribution scores 0.
pub fn engagement_score(distribution: &Distribution) -> u8 {
    let weighted: f64 = distribution
        .iter()
        .map(|(emotion, pct)| engagement_weight(emotion) * pct)
        .sum();
    weighted.clamp(0.0, 100.0).round() as u8
}

/// Display band for an engagement score. A pure step function; computed,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementBand {
    Excellent,
    Good,
    Moderate,
    Low,
    VeryLow,
}

impl EngagementBand {
    /// Classify a score into its display band.
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => EngagementBand::Excellent,
            60..=79 => EngagementBand::Good,
            40..=59 => EngagementBand::Moderate,
            20..=39 => EngagementBand::Low,
            _ => EngagementBand::VeryLow,
        }
    }

    /// Human-readable label for display.
    pub fn as_str(self) -> &'static str {
        match self {
            EngagementBand::Excellent => "Excellent",
            EngagementBand::Good => "Good",
            EngagementBand::Moderate => "Moderate",
            EngagementBand::Low => "Low",
            EngagementBand::VeryLow => "Very Low",
        }
    }
}

impl std::fmt::Display for EngagementBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
