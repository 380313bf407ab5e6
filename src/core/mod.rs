//! Core aggregation pipeline for the eventmood crate.
//!
//! This module contains:
//! - Frame aggregation: per-face vectors collapsed into one group vector
//! - Temporal smoothing of the group signal (EMA)
//! - Cumulative session accumulation and derived percentages
//! - Interval-delta timeline sampling
//! - Engagement scoring

pub mod accumulator;
pub mod aggregate;
pub mod engagement;
pub mod smoothing;
pub mod timeline;

// Re-export commonly used types
pub use accumulator::{Distribution, SessionAccumulator};
pub use aggregate::aggregate_frame;
pub use engagement::{engagement_score, engagement_weight, EngagementBand};
pub use smoothing::EmaSmoother;
pub use timeline::{MoodSnapshot, TimelineSampler};
