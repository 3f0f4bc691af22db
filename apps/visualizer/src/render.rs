//! Renderer implementations for the terminal front-end.

use std::io::Write;

use shared::{
    domain::{Highlight, Magnitude, Theme},
    protocol::{CountersSnapshot, StepEvent},
};
use sort_engine::Renderer;
use tokio::sync::watch;
use tracing::warn;

const BAR_WIDTH: usize = 48;
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    idle: &'static str,
    comparing: &'static str,
    swapping: &'static str,
    settled: &'static str,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            idle: "\x1b[94m",
            comparing: "\x1b[93m",
            swapping: "\x1b[91m",
            settled: "\x1b[92m",
        },
        Theme::Light => Palette {
            idle: "\x1b[34m",
            comparing: "\x1b[33m",
            swapping: "\x1b[31m",
            settled: "\x1b[32m",
        },
    }
}

/// Width of a bar for `value`, proportional to the largest magnitude.
pub fn bar_len(value: Magnitude, max: Magnitude, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    let scaled = (u64::from(value) * width as u64).div_ceil(u64::from(max));
    scaled.min(width as u64) as usize
}

/// Horizontal ANSI bars, one row per position, redrawn on every visible step.
pub struct TerminalRenderer<W: Write + Send> {
    out: W,
    theme: watch::Receiver<Theme>,
    values: Vec<Magnitude>,
    marks: Vec<Option<Highlight>>,
    settled: Vec<bool>,
    counters: CountersSnapshot,
    progress: f64,
    clear: bool,
    write_failed: bool,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W, theme: watch::Receiver<Theme>) -> Self {
        Self {
            out,
            theme,
            values: Vec::new(),
            marks: Vec::new(),
            settled: Vec::new(),
            counters: CountersSnapshot::default(),
            progress: 0.0,
            clear: true,
            write_failed: false,
        }
    }

    #[cfg(test)]
    /// Appends frames instead of clearing the screen between them.
    pub fn without_clear(mut self) -> Self {
        self.clear = false;
        self
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn frame(&self) -> String {
        let palette = palette(*self.theme.borrow());
        let max = self.values.iter().copied().max().unwrap_or_default();
        let mut frame = String::new();
        if self.clear {
            frame.push_str(CLEAR_SCREEN);
        }
        for (index, value) in self.values.iter().enumerate() {
            let mark = self.marks.get(index).copied().flatten();
            let settled = self.settled.get(index).copied().unwrap_or(false);
            let color = match (mark, settled) {
                (Some(Highlight::Comparing), _) => palette.comparing,
                (Some(Highlight::Swapping), _) => palette.swapping,
                (None, true) => palette.settled,
                (None, false) => palette.idle,
            };
            let bar = "█".repeat(bar_len(*value, max, BAR_WIDTH));
            frame.push_str(&format!("{value:>4} {color}{bar}{RESET}\n"));
        }
        let filled = (self.progress * BAR_WIDTH as f64).floor() as usize;
        frame.push_str(&format!(
            "comparisons {}  swaps {}  [{}{}] {:>3}%\n",
            self.counters.comparisons,
            self.counters.swaps,
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
            (self.progress * 100.0).floor() as u32,
        ));
        frame
    }

    fn present(&mut self) {
        let frame = self.frame();
        let result = self
            .out
            .write_all(frame.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(error) = result {
            if !self.write_failed {
                warn!(%error, "terminal renderer failed to write frame");
                self.write_failed = true;
            }
        }
    }

    fn mark(&mut self, index: usize, mark: Option<Highlight>) {
        if let Some(slot) = self.marks.get_mut(index) {
            *slot = mark;
        }
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, sequence: &[Magnitude]) {
        if sequence.len() != self.values.len() {
            self.marks = vec![None; sequence.len()];
            self.settled = vec![false; sequence.len()];
        }
        self.values.clear();
        self.values.extend_from_slice(sequence);
        self.present();
    }

    fn highlight(&mut self, i: usize, j: usize, kind: Highlight) {
        self.mark(i, Some(kind));
        self.mark(j, Some(kind));
        self.present();
    }

    fn clear_highlight(&mut self, i: usize, j: usize) {
        self.mark(i, None);
        self.mark(j, None);
    }

    fn settle(&mut self, index: usize) {
        if let Some(slot) = self.settled.get_mut(index) {
            *slot = true;
        }
    }

    fn stats(&mut self, counters: &CountersSnapshot) {
        self.counters = *counters;
        if counters.comparisons == 0 && counters.swaps == 0 {
            // Counters were reset: a new run or a fresh sequence.
            self.settled.iter_mut().for_each(|settled| *settled = false);
            self.marks.iter_mut().for_each(|mark| *mark = None);
        }
    }

    fn progress(&mut self, ratio: f64) {
        self.progress = ratio;
    }

    fn settle_all(&mut self, len: usize) {
        for index in 0..len {
            self.settle(index);
        }
        self.present();
    }
}

/// Streams every step event as one JSON object per line.
pub struct JsonRenderer<W: Write + Send> {
    out: W,
    write_failed: bool,
}

impl<W: Write + Send> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            write_failed: false,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Renderer for JsonRenderer<W> {
    fn draw(&mut self, _sequence: &[Magnitude]) {}

    fn highlight(&mut self, _i: usize, _j: usize, _kind: Highlight) {}

    fn clear_highlight(&mut self, _i: usize, _j: usize) {}

    fn settle(&mut self, _index: usize) {}

    fn step(&mut self, event: &StepEvent) {
        let result = serde_json::to_writer(&mut self.out, event)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(error) = result {
            if !self.write_failed {
                warn!(%error, "json renderer failed to write event");
                self.write_failed = true;
            }
        }
    }

    /// Completion marks bypass the step feed, so they are written here.
    fn settle_all(&mut self, len: usize) {
        for index in 0..len {
            self.step(&StepEvent::Settle { index });
        }
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
