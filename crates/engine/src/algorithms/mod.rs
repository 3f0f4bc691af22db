//! Step sequences for the six algorithms and the context they run against.
//!
//! Every algorithm drives the sequence exclusively through [`StepContext`],
//! which keeps counting, event emission, rendering and pacing in one place.
//! The recursive algorithms are written as explicit work stacks so a paced
//! run never needs boxed recursive futures.

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

use shared::{
    domain::{Algorithm, Highlight, Magnitude},
    protocol::{RunStatus, StepEvent},
};
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::{counters::Counters, pacer::Pacer, renderer::Renderer, sequence::SequenceModel};

pub use merge::merge_work;

pub async fn run(algorithm: Algorithm, ctx: &mut StepContext<'_>) {
    debug!(%algorithm, len = ctx.len(), "executing step sequence");
    match algorithm {
        Algorithm::Bubble => bubble::run(ctx).await,
        Algorithm::Selection => selection::run(ctx).await,
        Algorithm::Insertion => insertion::run(ctx).await,
        Algorithm::Merge => merge::run(ctx).await,
        Algorithm::Quick => quick::run(ctx).await,
        Algorithm::Heap => heap::run(ctx).await,
    }
}

pub struct StepContext<'a> {
    sequence: &'a mut SequenceModel,
    counters: &'a mut Counters,
    pacer: &'a Pacer,
    renderer: &'a mut dyn Renderer,
    status: Option<&'a watch::Sender<RunStatus>>,
}

impl<'a> StepContext<'a> {
    pub fn new(
        sequence: &'a mut SequenceModel,
        counters: &'a mut Counters,
        pacer: &'a Pacer,
        renderer: &'a mut dyn Renderer,
    ) -> Self {
        Self {
            sequence,
            counters,
            pacer,
            renderer,
            status: None,
        }
    }

    pub fn with_status(mut self, status: &'a watch::Sender<RunStatus>) -> Self {
        self.status = Some(status);
        self
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn value(&self, index: usize) -> Magnitude {
        self.sequence.get(index)
    }

    pub fn values(&self) -> &[Magnitude] {
        self.sequence.values()
    }

    /// Counted comparison of positions `i` and `j`, shown and paced before
    /// the caller evaluates it.
    pub async fn compare(&mut self, i: usize, j: usize) {
        self.counters.record_comparison();
        self.publish_stats();
        self.inspect(i, j).await;
    }

    /// Shows a comparison without counting it.
    pub async fn inspect(&mut self, i: usize, j: usize) {
        self.emit(StepEvent::Compare { i, j });
        self.renderer.highlight(i, j, Highlight::Comparing);
        self.pacer.pause().await;
    }

    /// Counts and announces a comparison the caller has already evaluated.
    /// The event trails the comparison and is not paced on its own; the
    /// mutation that follows carries the pause.
    pub fn tally_comparison(&mut self, i: usize, j: usize) {
        self.counters.record_comparison();
        self.publish_stats();
        self.emit(StepEvent::Compare { i, j });
    }

    pub async fn swap(&mut self, i: usize, j: usize) {
        self.counters.record_swap();
        self.publish_stats();
        let event = StepEvent::Swap { i, j };
        self.emit(event);
        self.renderer.highlight(i, j, Highlight::Swapping);
        self.pacer.pause().await;
        self.commit(event);
    }

    /// Counted relocation: copies the value at `from` into `index`.
    pub async fn shift(&mut self, index: usize, from: usize) {
        let value = self.sequence.get(from);
        self.counters.record_swap();
        self.publish_stats();
        let event = StepEvent::Overwrite { index, value };
        self.emit(event);
        self.renderer.highlight(from, index, Highlight::Swapping);
        self.pacer.pause().await;
        self.commit(event);
    }

    /// Uncounted, unpaced write of a value held outside the sequence.
    pub fn place(&mut self, index: usize, value: Magnitude) {
        let event = StepEvent::Overwrite { index, value };
        self.emit(event);
        self.commit(event);
    }

    pub fn release(&mut self, i: usize, j: usize) {
        self.renderer.clear_highlight(i, j);
    }

    pub fn settle(&mut self, index: usize) {
        self.emit(StepEvent::Settle { index });
        self.renderer.settle(index);
    }

    pub fn report_progress(&mut self, ratio: f64) {
        let progress = self.counters.set_progress(ratio);
        self.renderer.progress(progress);
        if let Some(status) = self.status {
            status.send_modify(|current| current.counters.progress = progress);
        }
    }

    fn emit(&mut self, event: StepEvent) {
        trace!(?event, "step");
        self.renderer.step(&event);
    }

    fn commit(&mut self, event: StepEvent) {
        self.sequence.apply(event);
        self.renderer.draw(self.sequence.values());
        if let Some(status) = self.status {
            let values = self.sequence.values();
            status.send_modify(|current| {
                current.sequence.clear();
                current.sequence.extend_from_slice(values);
            });
        }
    }

    fn publish_stats(&mut self) {
        let snapshot = self.counters.snapshot();
        self.renderer.stats(&snapshot);
        if let Some(status) = self.status {
            status.send_modify(|current| current.counters = snapshot);
        }
    }
}

/// `done / total` as a progress ratio; an empty traversal is complete.
fn ratio(done: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        done as f64 / total as f64
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
