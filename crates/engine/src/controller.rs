use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use rand::Rng;
use shared::{
    domain::{Algorithm, Magnitude, MagnitudeRange, RunState},
    protocol::{CountersSnapshot, RunReport, RunStatus},
};
use thiserror::Error;
use tokio::sync::{watch, Mutex, MutexGuard};
use tracing::{debug, info};

use crate::{
    algorithms::{self, StepContext},
    counters::Counters,
    pacer::{Pacer, DEFAULT_SPEED},
    renderer::Renderer,
    sequence::SequenceModel,
};

pub const DEFAULT_SIZE: usize = 30;
pub const MAX_SIZE: usize = 200;

/// Bounds a requested sequence size to the size control's range.
pub fn clamp_size(size: usize) -> usize {
    size.clamp(1, MAX_SIZE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("a {algorithm} run is in progress")]
    Busy { algorithm: Algorithm },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    Completed(RunReport),
    /// Another run held the controller; nothing was changed.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub size: usize,
    pub speed: u8,
    pub algorithm: Algorithm,
    pub range: MagnitudeRange,
    pub time_unit: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            speed: DEFAULT_SPEED,
            algorithm: Algorithm::default(),
            range: MagnitudeRange::default(),
            time_unit: Duration::from_millis(1),
        }
    }
}

struct Workspace {
    sequence: SequenceModel,
    counters: Counters,
    pacer: Pacer,
    algorithm: Algorithm,
    size: usize,
    range: MagnitudeRange,
    renderer: Box<dyn Renderer>,
}

struct Shared {
    running: AtomicBool,
    workspace: Mutex<Workspace>,
    status: watch::Sender<RunStatus>,
}

/// Owns the sequence and counters of one visualizer and gates runs on the
/// Idle/Running flag. Clones share the same state.
#[derive(Clone)]
pub struct RunController {
    shared: Arc<Shared>,
}

/// Clears the running flag when the run ends or its future is dropped.
struct RunningFlag<'a>(&'a AtomicBool);

impl Drop for RunningFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl RunController {
    pub fn new(config: ControllerConfig, renderer: Box<dyn Renderer>) -> Self {
        let mut sequence = SequenceModel::new();
        sequence.generate(clamp_size(config.size), config.range);
        Self::build(config, sequence, renderer)
    }

    pub fn with_sequence(
        config: ControllerConfig,
        values: Vec<Magnitude>,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        Self::build(config, SequenceModel::from_values(values), renderer)
    }

    fn build(
        config: ControllerConfig,
        sequence: SequenceModel,
        mut renderer: Box<dyn Renderer>,
    ) -> Self {
        renderer.draw(sequence.values());
        let (status, _) = watch::channel(RunStatus {
            state: RunState::Idle,
            algorithm: config.algorithm,
            counters: CountersSnapshot::default(),
            sequence: sequence.values().to_vec(),
        });
        let workspace = Workspace {
            size: clamp_size(config.size),
            sequence,
            counters: Counters::new(),
            pacer: Pacer::new(config.speed, config.time_unit),
            algorithm: config.algorithm,
            range: config.range,
            renderer,
        };

        Self {
            shared: Arc::new(Shared {
                running: AtomicBool::new(false),
                workspace: Mutex::new(workspace),
                status,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RunStatus> {
        self.shared.status.subscribe()
    }

    pub fn status(&self) -> RunStatus {
        self.shared.status.borrow().clone()
    }

    pub fn run_state(&self) -> RunState {
        if self.shared.running.load(Ordering::Acquire) {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    /// Selects by name; unrecognized names select bubble.
    pub async fn select_algorithm(&self, name: &str) -> Result<Algorithm, ControllerError> {
        self.select(Algorithm::from_name(name)).await
    }

    pub async fn select(&self, algorithm: Algorithm) -> Result<Algorithm, ControllerError> {
        let mut workspace = self.idle_workspace().await?;
        workspace.algorithm = algorithm;
        self.shared
            .status
            .send_modify(|status| status.algorithm = algorithm);
        debug!(%algorithm, "algorithm selected");
        Ok(algorithm)
    }

    /// Stores a new size, bounded to `1..=MAX_SIZE`, and generates a fresh
    /// sequence of that length.
    pub async fn configure_size(&self, size: usize) -> Result<usize, ControllerError> {
        let mut workspace = self.idle_workspace().await?;
        workspace.size = clamp_size(size);
        let (size, range) = (workspace.size, workspace.range);
        workspace.sequence.generate(size, range);
        self.refresh(&mut workspace);
        debug!(size, "sequence size configured");
        Ok(size)
    }

    /// Takes effect from the next run.
    pub async fn configure_speed(&self, speed: u8) -> Result<u8, ControllerError> {
        let mut workspace = self.idle_workspace().await?;
        workspace.pacer.set_speed(speed);
        let speed = workspace.pacer.speed();
        debug!(speed, "speed configured");
        Ok(speed)
    }

    pub async fn generate(&self) -> Result<(), ControllerError> {
        let mut workspace = self.idle_workspace().await?;
        let (size, range) = (workspace.size, workspace.range);
        workspace.sequence.generate(size, range);
        self.refresh(&mut workspace);
        debug!(size, "sequence generated");
        Ok(())
    }

    pub async fn generate_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(), ControllerError> {
        let mut workspace = self.idle_workspace().await?;
        let (size, range) = (workspace.size, workspace.range);
        workspace.sequence.generate_with(rng, size, range);
        self.refresh(&mut workspace);
        debug!(size, "sequence generated from caller rng");
        Ok(())
    }

    /// Replaces the sequence wholesale and snapshots it for reset.
    pub async fn load(&self, values: Vec<Magnitude>) -> Result<(), ControllerError> {
        let mut workspace = self.idle_workspace().await?;
        workspace.sequence.load(values);
        workspace.size = clamp_size(workspace.sequence.len());
        self.refresh(&mut workspace);
        Ok(())
    }

    /// Restores the generation snapshot. `Ok(false)` when there was none.
    pub async fn reset(&self) -> Result<bool, ControllerError> {
        let mut workspace = self.idle_workspace().await?;
        let restored = workspace.sequence.reset();
        self.refresh(&mut workspace);
        debug!(restored, "sequence reset");
        Ok(restored)
    }

    /// Runs the selected algorithm to completion. A second start while one
    /// is running returns [`StartOutcome::Rejected`] without touching any state.
    pub async fn start(&self) -> StartOutcome {
        if self
            .shared
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("start ignored, run already in progress");
            return StartOutcome::Rejected;
        }
        let running = RunningFlag(&self.shared.running);

        let mut guard = self.shared.workspace.lock().await;
        let workspace = &mut *guard;
        let algorithm = workspace.algorithm;

        workspace.counters.reset();
        workspace.renderer.stats(&workspace.counters.snapshot());
        workspace.renderer.progress(0.0);
        workspace.counters.start_clock();
        self.shared.status.send_modify(|status| {
            status.state = RunState::Running;
            status.algorithm = algorithm;
            status.counters = CountersSnapshot::default();
            status.sequence.clear();
            status.sequence.extend_from_slice(workspace.sequence.values());
        });
        info!(
            %algorithm,
            size = workspace.sequence.len(),
            speed = workspace.pacer.speed(),
            "sort run started"
        );

        {
            let mut ctx = StepContext::new(
                &mut workspace.sequence,
                &mut workspace.counters,
                &workspace.pacer,
                workspace.renderer.as_mut(),
            )
            .with_status(&self.shared.status);
            algorithms::run(algorithm, &mut ctx).await;
        }

        workspace.renderer.settle_all(workspace.sequence.len());
        let progress = workspace.counters.set_progress(1.0);
        workspace.renderer.progress(progress);
        let elapsed = workspace.counters.finish_clock();
        let counters = workspace.counters.snapshot();
        workspace.renderer.stats(&counters);

        let report = RunReport {
            algorithm,
            comparisons: counters.comparisons,
            swaps: counters.swaps,
            elapsed,
            sequence: workspace.sequence.values().to_vec(),
        };
        drop(guard);
        drop(running);

        self.shared.status.send_modify(|status| {
            status.state = RunState::Idle;
            status.counters = counters;
        });
        info!(
            %algorithm,
            comparisons = report.comparisons,
            swaps = report.swaps,
            elapsed_ms = elapsed.as_millis() as u64,
            "sort run finished"
        );

        StartOutcome::Completed(report)
    }

    async fn idle_workspace(&self) -> Result<MutexGuard<'_, Workspace>, ControllerError> {
        if self.shared.running.load(Ordering::Acquire) {
            let algorithm = self.shared.status.borrow().algorithm;
            debug!(%algorithm, "command ignored while running");
            return Err(ControllerError::Busy { algorithm });
        }
        Ok(self.shared.workspace.lock().await)
    }

    /// Clears counters and republishes after the sequence was replaced.
    fn refresh(&self, workspace: &mut Workspace) {
        workspace.counters.reset();
        let counters = workspace.counters.snapshot();
        workspace.renderer.draw(workspace.sequence.values());
        workspace.renderer.stats(&counters);
        workspace.renderer.progress(0.0);
        self.shared.status.send_modify(|status| {
            status.counters = counters;
            status.sequence.clear();
            status.sequence.extend_from_slice(workspace.sequence.values());
        });
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
