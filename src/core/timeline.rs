//! Periodic mood timeline built from interval deltas.
//!
//! Every sampling interval the host ticks the sampler with the accumulator's
//! current counts. The sampler diffs them against the counts captured at the
//! previous tick and appends one snapshot describing *this interval's* mood
//! mix. Intervals with no activity are skipped entirely rather than recorded
//! as flat zero entries.
//!
//! Snapshots carry only session-relative offsets, never wall-clock
//! timestamps, so the timeline cannot be correlated against external events.

use crate::config::ConfigError;
use crate::core::accumulator::Distribution;
use crate::detector::types::{Emotion, EMOTION_COUNT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// One timeline entry: the emotion mix over a completed sampling interval.
///
/// Immutable after creation. `elapsed_secs` is seconds since session start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSnapshot {
    /// Session-relative offset in seconds (never an absolute timestamp)
    pub elapsed_secs: u64,
    /// Display label in `m:ss` form, e.g. "0:30", "1:00"
    pub label: String,
    /// Each emotion's share of this interval's detections, in percent
    pub shares: Distribution,
}

/// Samples the session accumulator on a fixed wall-clock interval and keeps
/// an append-only sequence of [`MoodSnapshot`]s.
///
/// The sampler owns no timer: the host's scheduler calls [`on_tick`]
/// (and [`flush`] on session end) with the monotonic session-elapsed time.
///
/// [`on_tick`]: TimelineSampler::on_tick
/// [`flush`]: TimelineSampler::flush
#[derive(Debug, Clone)]
pub struct TimelineSampler {
    /// Nominal sampling interval (documentation of cadence; ticks are
    /// driven by the host clock)
    interval: Duration,
    /// Counts captured at the previous tick
    prev_counts: [u64; EMOTION_COUNT],
    /// Completed snapshots, append-only
    snapshots: Vec<MoodSnapshot>,
}

impl TimelineSampler {
    /// Create a sampler with the given sampling interval.
    pub fn new(interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::InvalidSnapshotInterval);
        }
        Ok(Self {
            interval,
            prev_counts: [0; EMOTION_COUNT],
            snapshots: Vec::new(),
        })
    }

    /// Process one sampling tick.
    ///
    /// `elapsed` is the monotonic session-elapsed time at tick time and
    /// `counts` a consistent snapshot of the accumulator's counts. Returns
    /// the appended snapshot, or `None` when the interval saw no detections
    /// (the interval is skipped, nothing is appended).
    pub fn on_tick(
        &mut self,
        elapsed: Duration,
        counts: &[u64; EMOTION_COUNT],
    ) -> Option<&MoodSnapshot> {
        let mut deltas = [0u64; EMOTION_COUNT];
        let mut total_delta = 0u64;
        for emotion in Emotion::ALL {
            let i = emotion.index();
            deltas[i] = counts[i].saturating_sub(self.prev_counts[i]);
            total_delta += deltas[i];
        }

        if total_delta == 0 {
            debug!(elapsed_secs = elapsed.as_secs(), "no activity this interval, skipping snapshot");
            return None;
        }

        let mut shares = Distribution::new();
        for emotion in Emotion::ALL {
            let pct = (deltas[emotion.index()] as f64 / total_delta as f64 * 100.0).round();
            shares.set(emotion, pct);
        }

        let elapsed_secs = elapsed.as_secs();
        let snapshot = MoodSnapshot {
            elapsed_secs,
            label: format_offset(elapsed_secs),
            shares,
        };
        debug!(label = %snapshot.label, interval_detections = total_delta, "timeline snapshot");

        self.prev_counts = *counts;
        self.snapshots.push(snapshot);
        self.snapshots.last()
    }

    /// Force one final tick on session end, even when the last interval is
    /// incomplete. Uses the same delta logic as a regular tick.
    pub fn flush(
        &mut self,
        elapsed: Duration,
        counts: &[u64; EMOTION_COUNT],
    ) -> Option<&MoodSnapshot> {
        self.on_tick(elapsed, counts)
    }

    /// Read-only view of the snapshots taken so far.
    pub fn snapshots(&self) -> &[MoodSnapshot] {
        &self.snapshots
    }

    /// The nominal sampling interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Clear all snapshots and delta baselines for a fresh session.
    pub fn reset(&mut self) {
        self.prev_counts = [0; EMOTION_COUNT];
        self.snapshots.clear();
    }
}

/// Format a session-relative offset as `m:ss`.
fn format_offset(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
