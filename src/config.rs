//! Configuration for the eventmood core.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default EMA smoothing factor. Lower means stronger smoothing and more
/// resistance to sudden adversarial shifts.
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.3;

/// Default timeline sampling interval.
pub const DEFAULT_SNAPSHOT_INTERVAL: Duration = Duration::from_secs(30);

/// Default privacy budget for the Laplace mechanism. Smaller epsilon means
/// more noise: stronger privacy, weaker utility.
pub const DEFAULT_EPSILON: f64 = 1.0;

/// Default minimum detection confidence handed to the external detector.
pub const DEFAULT_MIN_DETECTION_CONFIDENCE: f64 = 0.7;

/// Tunable parameters for one tracking session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// EMA smoothing factor, strictly inside (0, 1)
    pub smoothing_alpha: f64,

    /// Timeline sampling interval
    #[serde(with = "duration_serde")]
    pub snapshot_interval: Duration,

    /// Privacy budget for outbound noising, strictly positive
    pub epsilon: f64,

    /// Minimum detection confidence for the external detector, in [0, 1].
    /// Filters low-confidence faces before they ever reach the core.
    pub min_detection_confidence: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            snapshot_interval: DEFAULT_SNAPSHOT_INTERVAL,
            epsilon: DEFAULT_EPSILON,
            min_detection_confidence: DEFAULT_MIN_DETECTION_CONFIDENCE,
        }
    }
}

impl TrackerConfig {
    /// Validate all parameters.
    ///
    /// Out-of-range values are rejected rather than clamped: silent clamping
    /// would mask a caller's dimensioning mistake.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.smoothing_alpha.is_finite()
            || self.smoothing_alpha <= 0.0
            || self.smoothing_alpha >= 1.0
        {
            return Err(ConfigError::InvalidSmoothingFactor(self.smoothing_alpha));
        }
        if self.snapshot_interval.is_zero() {
            return Err(ConfigError::InvalidSnapshotInterval);
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if !self.min_detection_confidence.is_finite()
            || !(0.0..=1.0).contains(&self.min_detection_confidence)
        {
            return Err(ConfigError::InvalidConfidence(self.min_detection_confidence));
        }
        Ok(())
    }
}

/// Configuration errors. All fail fast at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Smoothing factor outside (0, 1)
    InvalidSmoothingFactor(f64),
    /// Zero-length sampling interval
    InvalidSnapshotInterval,
    /// Privacy budget outside (0, inf)
    InvalidEpsilon(f64),
    /// Detection confidence outside [0, 1]
    InvalidConfidence(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidSmoothingFactor(alpha) => {
                write!(f, "smoothing factor must be in (0, 1), got {alpha}")
            }
            ConfigError::InvalidSnapshotInterval => {
                write!(f, "snapshot interval must be non-zero")
            }
            ConfigError::InvalidEpsilon(epsilon) => {
                write!(f, "epsilon must be a finite value in (0, inf), got {epsilon}")
            }
            ConfigError::InvalidConfidence(confidence) => {
                write!(f, "detection confidence must be in [0, 1], got {confidence}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Serde support for Duration.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TrackerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.smoothing_alpha, 0.3);
        assert_eq!(config.snapshot_interval, Duration::from_secs(30));
        assert_eq!(config.epsilon, 1.0);
    }

    #[test]
    fn test_invalid_alpha_rejected_not_clamped() {
        let config = TrackerConfig {
            smoothing_alpha: 1.5,
            ..TrackerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSmoothingFactor(1.5))
        );
    }

    #[test]
    fn test_invalid_epsilon_rejected() {
        for epsilon in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = TrackerConfig {
                epsilon,
                ..TrackerConfig::default()
            };
            assert!(config.validate().is_err(), "epsilon {epsilon} should fail");
        }
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = TrackerConfig {
            snapshot_interval: Duration::ZERO,
            ..TrackerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidSnapshotInterval));
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = TrackerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"snapshot_interval\":30"));
        let back: TrackerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.smoothing_alpha, config.smoothing_alpha);
        assert_eq!(back.snapshot_interval, config.snapshot_interval);
    }
}
