//! Eventmood - Privacy-first group mood aggregation core.
//!
//! This library turns a stream of per-frame facial-expression score vectors
//! (produced by an external detection model) into a smoothed group mood, a
//! cumulative event-level emotion distribution, a periodic mood timeline,
//! and a single engagement score.
//!
//! # Privacy Guarantees
//!
//! - **No individuals**: all faces in a frame are averaged into one group
//!   vector; face count, geometry and identity never enter the pipeline
//! - **No absolute time**: timeline entries carry session-relative offsets
//!   only, so they cannot be correlated against external events
//! - **Noised exports**: every distribution crossing the trust boundary
//!   passes through the Laplace privacy gate exactly once
//! - **Ephemeral**: all state lives in one session object and dies with it
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                       Eventmood Core                           │
//! ├────────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌───────────┐   ┌─────────────┐               │
//! │  │  Frame    │──▶│   EMA     │──▶│  Session    │               │
//! │  │ Aggregate │   │ Smoother  │   │ Accumulator │               │
//! │  └───────────┘   └───────────┘   └─────────────┘               │
//! │                                     │         │                │
//! │                                     ▼         ▼                │
//! │                              ┌──────────┐  ┌────────────┐      │
//! │                              │ Timeline │  │ Engagement │      │
//! │                              │ Sampler  │  │   Scorer   │      │
//! │                              └──────────┘  └────────────┘      │
//! │                                     │         │                │
//! │                                     ▼         ▼                │
//! │                              ┌─────────────────────┐           │
//! │                              │    Privacy Gate     │──▶ export │
//! │                              │ (Laplace + coarsen) │           │
//! │                              └─────────────────────┘           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use eventmood::{Emotion, ExpressionVector, MoodSession};
//! use std::time::Duration;
//!
//! let mut session = MoodSession::with_defaults();
//! session.start().unwrap();
//! session.model_ready().unwrap();
//!
//! // One detection frame with a single happy face
//! let face = ExpressionVector::from_scores([(Emotion::Happy, 0.9)]);
//! session.process_frame(&[face]);
//!
//! session.stop(Duration::from_secs(30)).unwrap();
//! assert_eq!(session.dominant_emotion(), Some(Emotion::Happy));
//! ```

pub mod config;
pub mod core;
pub mod detector;
pub mod privacy;
pub mod session;

// Re-export key types at crate root for convenience
pub use config::{ConfigError, TrackerConfig};
pub use core::{
    aggregate_frame, engagement_score, Distribution, EmaSmoother, EngagementBand, MoodSnapshot,
    SessionAccumulator, TimelineSampler,
};
pub use detector::{Emotion, ExpressionVector, GroupFrameVector};
pub use privacy::{coarsen_count, privatize, SessionSummary};
pub use session::{MoodSession, SessionError, SessionStats, SessionStatus};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Privacy declaration that can be displayed to users.
pub const PRIVACY_DECLARATION: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║              EVENTMOOD CORE - PRIVACY DECLARATION                ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  This library aggregates audience-level emotion statistics.      ║
║                                                                  ║
║  ✓ WHAT WE COMPUTE:                                              ║
║    • One averaged emotion profile per frame (the whole group)    ║
║    • Smoothed current mood and cumulative percentages            ║
║    • A timeline of interval-level mood mixes                     ║
║                                                                  ║
║  ✗ WHAT WE NEVER KEEP:                                           ║
║    • Individual faces, bounding boxes, or face counts            ║
║    • Raw expression vectors beyond the current frame             ║
║    • Absolute timestamps (session-relative offsets only)         ║
║    • Exact statistics in exports (noised and coarsened)          ║
║                                                                  ║
║  All data is ephemeral and dies with the session.                ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝
"#;
