use std::time::Duration;

use shared::protocol::CountersSnapshot;
use tokio::time::Instant;

/// Per-run instrumentation: comparison and swap tallies, progress, timing.
#[derive(Debug, Clone, Default)]
pub struct Counters {
    comparisons: u64,
    swaps: u64,
    progress: f64,
    started_at: Option<Instant>,
    elapsed: Option<Duration>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record_comparison(&mut self) {
        self.comparisons += 1;
    }

    pub fn record_swap(&mut self) {
        self.swaps += 1;
    }

    /// Clamps `ratio` into `[0, 1]` and never lets progress move backwards
    /// within a run. Returns the stored value.
    pub fn set_progress(&mut self, ratio: f64) -> f64 {
        let clamped = if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        };
        self.progress = self.progress.max(clamped);
        self.progress
    }

    pub fn start_clock(&mut self) {
        self.started_at = Some(Instant::now());
        self.elapsed = None;
    }

    pub fn finish_clock(&mut self) -> Duration {
        let elapsed = self
            .started_at
            .take()
            .map(|started| started.elapsed())
            .unwrap_or_default();
        self.elapsed = Some(elapsed);
        elapsed
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            comparisons: self.comparisons,
            swaps: self.swaps,
            progress: self.progress,
            elapsed: self.elapsed,
        }
    }
}

#[cfg(test)]
#[path = "tests/counters_tests.rs"]
mod tests;
