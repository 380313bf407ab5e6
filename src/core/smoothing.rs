//! Temporal smoothing of the group expression signal.
//!
//! A single adversarial or noisy frame should not flip the reported mood.
//! Each emotion's score runs through an exponential moving average:
//!
//!   smoothed = alpha * raw + (1 - alpha) * smoothed
//!
//! where alpha in (0, 1) controls responsiveness. Lower alpha means stronger
//! smoothing and more resistance to single-frame spikes.

use crate::config::ConfigError;
use crate::detector::types::{Emotion, GroupFrameVector, EMOTION_COUNT};

/// Exponential-moving-average smoother over the group expression vector.
///
/// Holds the per-emotion smoothed state for one tracking session. The state
/// is only updated on frames that actually produced a group vector; frames
/// with no faces leave it unchanged (no decay).
#[derive(Debug, Clone)]
pub struct EmaSmoother {
    /// Smoothing factor, validated to lie strictly inside (0, 1)
    alpha: f64,
    /// Smoothed score per emotion, all zero at session start
    state: [f64; EMOTION_COUNT],
    /// Whether any frame has been folded in yet
    has_signal: bool,
}

impl EmaSmoother {
    /// Create a smoother with the given smoothing factor.
    ///
    /// Rejects alpha outside (0, 1) instead of clamping; a bad factor is a
    /// caller dimensioning mistake that must surface at construction time.
    pub fn new(alpha: f64) -> Result<Self, ConfigError> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
            return Err(ConfigError::InvalidSmoothingFactor(alpha));
        }
        Ok(Self {
            alpha,
            state: [0.0; EMOTION_COUNT],
            has_signal: false,
        })
    }

    /// Fold one group frame vector into the smoothed state and return the
    /// frame's dominant emotion.
    ///
    /// The dominant emotion is the argmax of the smoothed scores; ties go to
    /// the first-declared emotion in [`Emotion::ALL`].
    pub fn update(&mut self, group: &GroupFrameVector) -> Emotion {
        for emotion in Emotion::ALL {
            let i = emotion.index();
            self.state[i] = self.alpha * group.get(emotion) + (1.0 - self.alpha) * self.state[i];
        }
        self.has_signal = true;
        self.dominant()
    }

    /// The current smoothed mood, or `None` before the first detection.
    pub fn current_mood(&self) -> Option<Emotion> {
        self.has_signal.then(|| self.dominant())
    }

    /// Smoothed score for one emotion. Always within [0,1].
    pub fn score(&self, emotion: Emotion) -> f64 {
        self.state[emotion.index()]
    }

    /// The smoothing factor this smoother was built with.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Clear all smoothed state for a fresh session.
    pub fn reset(&mut self) {
        self.state = [0.0; EMOTION_COUNT];
        self.has_signal = false;
    }

    fn dominant(&self) -> Emotion {
        let mut best = Emotion::ALL[0];
        let mut best_score = self.state[best.index()];
        // Strict comparison keeps the first-declared emotion on ties
        for emotion in Emotion::ALL {
            if self.state[emotion.index()] > best_score {
                best = emotion;
                best_score = self.state[emotion.index()];
            }
        }
        best
    }
}
