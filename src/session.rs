//! Session lifecycle and the owning pipeline context.
//!
//! All per-session state lives in one explicit [`MoodSession`] object owned
//! by the caller; there is no ambient global state. The session walks a
//! fixed state machine:
//!
//! ```text
//! idle -> loading -> tracking -> summary -> idle
//!            |
//!            +-> idle (setup failure, full reset)
//! ```
//!
//! Frames and timeline ticks are only accepted while tracking. The core owns
//! no timers and performs no I/O; the host scheduler paces detection frames
//! (~2 Hz) and drives the sampling ticks with a monotonic elapsed-time
//! source.

use crate::config::{ConfigError, TrackerConfig};
use crate::core::accumulator::{Distribution, SessionAccumulator};
use crate::core::aggregate::aggregate_frame;
use crate::core::engagement::engagement_score;
use crate::core::smoothing::EmaSmoother;
use crate::core::timeline::{MoodSnapshot, TimelineSampler};
use crate::detector::types::{Emotion, ExpressionVector};
use crate::privacy::SessionSummary;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Lifecycle phase of a tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No session in progress; all state zeroed
    Idle,
    /// Start requested; waiting for the external model and capture source
    Loading,
    /// Accepting frames and ticks
    Tracking,
    /// Stopped; state frozen and exposed read-only
    Summary,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Loading => "loading",
            SessionStatus::Tracking => "tracking",
            SessionStatus::Summary => "summary",
        }
    }
}

/// State-machine misuse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The requested transition is not valid from the current state
    InvalidTransition {
        from: SessionStatus,
        action: &'static str,
    },
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InvalidTransition { from, action } => {
                write!(f, "cannot {action} while session is {}", from.as_str())
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Observability counters for one session. Counts only, never content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames processed while tracking
    pub frames_processed: u64,
    /// Processed frames that contained no faces
    pub frames_no_faces: u64,
    /// Frames ignored because the session was not tracking
    pub frames_dropped: u64,
}

/// One tracking session: owns the whole aggregation pipeline.
///
/// Frames flow strictly sequentially through aggregation, smoothing and
/// accumulation, so no locking is needed. The session is discarded (or
/// [`restart`]ed) rather than shared across sessions.
///
/// [`restart`]: MoodSession::restart
#[derive(Debug)]
pub struct MoodSession {
    config: TrackerConfig,
    status: SessionStatus,
    /// Instance id for log correlation; never part of outbound payloads
    session_id: Uuid,
    smoother: EmaSmoother,
    accumulator: SessionAccumulator,
    sampler: TimelineSampler,
    stats: SessionStats,
}

impl MoodSession {
    /// Create an idle session with the given configuration.
    ///
    /// Fails fast on any invalid parameter; nothing is clamped.
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let smoother = EmaSmoother::new(config.smoothing_alpha)?;
        let sampler = TimelineSampler::new(config.snapshot_interval)?;
        Ok(Self {
            config,
            status: SessionStatus::Idle,
            session_id: Uuid::new_v4(),
            smoother,
            accumulator: SessionAccumulator::new(),
            sampler,
            stats: SessionStats::default(),
        })
    }

    /// Create an idle session with default configuration.
    pub fn with_defaults() -> Self {
        // Default config is statically valid
        Self::new(TrackerConfig::default()).expect("default config must validate")
    }

    // --- State machine ---

    /// Request session start: `idle -> loading`. Zeroes all state.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.expect(SessionStatus::Idle, "start")?;
        self.reset_state();
        self.status = SessionStatus::Loading;
        info!(session_id = %self.session_id, "session loading");
        Ok(())
    }

    /// External model ready and capture attached: `loading -> tracking`.
    pub fn model_ready(&mut self) -> Result<(), SessionError> {
        self.expect(SessionStatus::Loading, "begin tracking")?;
        self.status = SessionStatus::Tracking;
        info!(session_id = %self.session_id, "session tracking");
        Ok(())
    }

    /// Setup failure: `loading -> idle`, state fully reset.
    pub fn fail_loading(&mut self) -> Result<(), SessionError> {
        self.expect(SessionStatus::Loading, "abort loading")?;
        self.reset_state();
        self.status = SessionStatus::Idle;
        warn!(session_id = %self.session_id, "session setup failed, back to idle");
        Ok(())
    }

    /// Explicit stop: `tracking -> summary`.
    ///
    /// Stops accepting frames immediately, forces one final timeline flush
    /// at the given session-elapsed time, and freezes all cumulative state.
    pub fn stop(&mut self, elapsed: Duration) -> Result<(), SessionError> {
        self.expect(SessionStatus::Tracking, "stop")?;
        self.sampler.flush(elapsed, &self.accumulator.counts());
        self.status = SessionStatus::Summary;
        info!(
            session_id = %self.session_id,
            total_detections = self.accumulator.total(),
            snapshots = self.sampler.snapshots().len(),
            "session stopped"
        );
        Ok(())
    }

    /// Explicit restart: `summary -> idle`. Full reset, fresh session id.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.expect(SessionStatus::Summary, "restart")?;
        self.reset_state();
        self.session_id = Uuid::new_v4();
        self.status = SessionStatus::Idle;
        Ok(())
    }

    // --- Tracking-phase inputs ---

    /// Process one detection frame.
    ///
    /// Runs the sequential pipeline: aggregate all faces into a group
    /// vector, fold it into the smoothed state, and record the frame's
    /// dominant emotion. Returns that dominant emotion, or `None` when the
    /// frame had no faces or the session is not tracking (such frames are
    /// dropped, never an error).
    pub fn process_frame(&mut self, faces: &[ExpressionVector]) -> Option<Emotion> {
        if self.status != SessionStatus::Tracking {
            self.stats.frames_dropped += 1;
            debug!(status = self.status.as_str(), "frame dropped outside tracking");
            return None;
        }

        self.stats.frames_processed += 1;
        let Some(group) = aggregate_frame(faces) else {
            // No signal: smoothed state and counts stay untouched
            self.stats.frames_no_faces += 1;
            return None;
        };

        let dominant = self.smoother.update(&group);
        self.accumulator.record(dominant);
        Some(dominant)
    }

    /// Timeline sampling tick at the given session-elapsed time.
    ///
    /// Only meaningful while tracking; ticks in any other state are ignored.
    pub fn tick(&mut self, elapsed: Duration) -> Option<&MoodSnapshot> {
        if self.status != SessionStatus::Tracking {
            return None;
        }
        self.sampler.on_tick(elapsed, &self.accumulator.counts())
    }

    // --- Read-only views (pure, valid in any state) ---

    /// Current lifecycle phase.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The smoothed "current group mood", `None` before any detection.
    pub fn current_mood(&self) -> Option<Emotion> {
        self.smoother.current_mood()
    }

    /// Total detections recorded this session.
    pub fn total_detections(&self) -> u64 {
        self.accumulator.total()
    }

    /// Cumulative percentage distribution.
    pub fn distribution(&self) -> Distribution {
        self.accumulator.distribution()
    }

    /// The event-level dominant emotion, `None` with no detections.
    pub fn dominant_emotion(&self) -> Option<Emotion> {
        self.accumulator.dominant()
    }

    /// Read-only mood timeline. Safe to expose directly: snapshots carry
    /// relative offsets and interval-level percentages only.
    pub fn timeline(&self) -> &[MoodSnapshot] {
        self.sampler.snapshots()
    }

    /// Engagement score of the current cumulative distribution.
    pub fn engagement(&self) -> u8 {
        engagement_score(&self.accumulator.distribution())
    }

    /// Observability counters.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// The session configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Instance id for log correlation.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Build the privacy-gated outbound summary using the configured
    /// epsilon. The mandatory gate for any payload crossing the trust
    /// boundary; call once per payload and reuse the result.
    pub fn summary<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SessionSummary, ConfigError> {
        SessionSummary::build(
            self.accumulator.total(),
            self.accumulator.dominant(),
            &self.accumulator.distribution(),
            self.sampler.snapshots(),
            self.config.epsilon,
            rng,
        )
    }

    fn expect(&self, required: SessionStatus, action: &'static str) -> Result<(), SessionError> {
        if self.status == required {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                from: self.status,
                action,
            })
        }
    }

    fn reset_state(&mut self) {
        self.smoother.reset();
        self.accumulator.reset();
        self.sampler.reset();
        self.stats = SessionStats::default();
    }
}
