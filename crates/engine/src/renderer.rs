use shared::{
    domain::{Highlight, Magnitude},
    protocol::{CountersSnapshot, StepEvent},
};

/// Presentation surface driven by a run. Implementations only observe; the
/// sequence they are handed is a read-only view of the working state.
pub trait Renderer: Send {
    fn draw(&mut self, sequence: &[Magnitude]);
    fn highlight(&mut self, i: usize, j: usize, kind: Highlight);
    fn clear_highlight(&mut self, i: usize, j: usize);
    fn settle(&mut self, index: usize);

    /// Raw event feed, called once per event before the highlight or draw it causes.
    fn step(&mut self, _event: &StepEvent) {}

    fn stats(&mut self, _counters: &CountersSnapshot) {}

    fn progress(&mut self, _ratio: f64) {}

    fn settle_all(&mut self, len: usize) {
        for index in 0..len {
            self.settle(index);
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _sequence: &[Magnitude]) {}
    fn highlight(&mut self, _i: usize, _j: usize, _kind: Highlight) {}
    fn clear_highlight(&mut self, _i: usize, _j: usize) {}
    fn settle(&mut self, _index: usize) {}
}
