//! External detector boundary for the eventmood core.
//!
//! The face-detection/expression model lives outside this crate. The host
//! runs it at a bounded rate (~2 Hz) and hands the core one possibly-empty
//! list of [`ExpressionVector`]s per frame. A failed detection pass is
//! indistinguishable from "no faces this frame" on purpose.

pub mod types;

// Re-export commonly used types
pub use types::{Emotion, ExpressionVector, GroupFrameVector, EMOTION_COUNT};
