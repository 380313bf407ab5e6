//! Privacy gate for anything leaving the core's trust boundary.
//!
//! Raw per-session statistics never cross the boundary directly. Every
//! outbound payload goes through [`SessionSummary::build`], which applies
//! Laplace noise to the percentage distribution and coarsens the absolute
//! detection total in one place.
//!
//! Noising is applied exactly once per outbound payload. Consumers that need
//! the same payload several times (a summary upload, repeated chat-context
//! turns) must reuse the built summary; re-noising the same underlying data
//! spends additional privacy budget per call.

pub mod noise;

use crate::config::ConfigError;
use crate::core::accumulator::Distribution;
use crate::core::engagement::{engagement_score, EngagementBand};
use crate::core::timeline::MoodSnapshot;
use crate::detector::types::Emotion;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

// Re-export the mechanism functions
pub use noise::{coarsen_count, laplace_sample, privatize};

/// Privacy-safe session summary: the only payload shape handed to external
/// collaborators (summary upload, chat context).
///
/// The distribution has been noised, the total coarsened to the nearest
/// ten, and the timeline carries only session-relative offsets. The
/// engagement score is computed from the noised distribution so the exact
/// one cannot be recovered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Detection total, coarsened to the nearest ten
    pub total_detections: u64,
    /// The event's dominant mood, if any detections occurred
    pub dominant_mood: Option<Emotion>,
    /// Noised percentage distribution
    pub emotion_percentages: Distribution,
    /// Engagement score of the noised distribution
    pub engagement_score: u8,
    /// Engagement display band
    pub engagement_band: EngagementBand,
    /// Interval-level mood timeline (already privacy-safe)
    pub timeline: Vec<MoodSnapshot>,
}

impl SessionSummary {
    /// Build an outbound summary, applying the privacy gate exactly once.
    ///
    /// `distribution` and `timeline` are the session's exact values; the
    /// returned summary contains only their privatized forms. Fails only on
    /// an invalid epsilon.
    pub fn build<R: Rng + ?Sized>(
        total_detections: u64,
        dominant_mood: Option<Emotion>,
        distribution: &Distribution,
        timeline: &[MoodSnapshot],
        epsilon: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let noised = privatize(distribution, epsilon, rng)?;
        let score = engagement_score(&noised);
        info!(
            epsilon,
            total = coarsen_count(total_detections),
            "privacy gate applied to outbound session summary"
        );
        Ok(Self {
            total_detections: coarsen_count(total_detections),
            dominant_mood,
            emotion_percentages: noised,
            engagement_score: score,
            engagement_band: EngagementBand::from_score(score),
            timeline: timeline.to_vec(),
        })
    }
}
