use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{Algorithm, Magnitude, RunState};

/// One observable algorithmic action, in program order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepEvent {
    Compare { i: usize, j: usize },
    Swap { i: usize, j: usize },
    Overwrite { index: usize, value: Magnitude },
    Settle { index: usize },
}

impl StepEvent {
    pub fn positions(&self) -> (usize, usize) {
        match *self {
            StepEvent::Compare { i, j } | StepEvent::Swap { i, j } => (i, j),
            StepEvent::Overwrite { index, .. } | StepEvent::Settle { index } => (index, index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CountersSnapshot {
    pub comparisons: u64,
    pub swaps: u64,
    pub progress: f64,
    pub elapsed: Option<Duration>,
}

/// Read-only view published by the run controller after every change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunStatus {
    pub state: RunState,
    pub algorithm: Algorithm,
    pub counters: CountersSnapshot,
    pub sequence: Vec<Magnitude>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub comparisons: u64,
    pub swaps: u64,
    pub elapsed: Duration,
    pub sequence: Vec<Magnitude>,
}
