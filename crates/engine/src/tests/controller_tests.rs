use std::sync::Mutex as StdMutex;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use shared::{domain::Highlight, protocol::StepEvent};

use super::*;

#[derive(Default)]
struct Journal {
    progress: Vec<f64>,
    settled: Vec<usize>,
    draws: usize,
    events: usize,
}

#[derive(Clone, Default)]
struct SharedJournal(Arc<StdMutex<Journal>>);

impl SharedJournal {
    fn read<T>(&self, f: impl FnOnce(&Journal) -> T) -> T {
        f(&self.0.lock().expect("journal lock"))
    }
}

impl Renderer for SharedJournal {
    fn draw(&mut self, _sequence: &[Magnitude]) {
        self.0.lock().expect("journal lock").draws += 1;
    }

    fn highlight(&mut self, _i: usize, _j: usize, _kind: Highlight) {}

    fn clear_highlight(&mut self, _i: usize, _j: usize) {}

    fn settle(&mut self, index: usize) {
        self.0.lock().expect("journal lock").settled.push(index);
    }

    fn step(&mut self, _event: &StepEvent) {
        self.0.lock().expect("journal lock").events += 1;
    }

    fn progress(&mut self, ratio: f64) {
        self.0.lock().expect("journal lock").progress.push(ratio);
    }
}

fn unpaced_config() -> ControllerConfig {
    ControllerConfig {
        time_unit: Duration::ZERO,
        ..ControllerConfig::default()
    }
}

fn controller(values: Vec<Magnitude>) -> (RunController, SharedJournal) {
    let journal = SharedJournal::default();
    let controller =
        RunController::with_sequence(unpaced_config(), values, Box::new(journal.clone()));
    (controller, journal)
}

fn completed(outcome: StartOutcome) -> RunReport {
    match outcome {
        StartOutcome::Completed(report) => report,
        StartOutcome::Rejected => panic!("run was rejected"),
    }
}

#[tokio::test]
async fn new_controller_generates_configured_size() {
    let config = ControllerConfig {
        size: 12,
        ..unpaced_config()
    };
    let controller = RunController::new(config, Box::new(crate::NullRenderer));
    let status = controller.status();
    assert_eq!(status.sequence.len(), 12);
    assert_eq!(status.state, RunState::Idle);
    assert!(status.sequence.iter().all(|v| (10..=309).contains(v)));
}

#[tokio::test]
async fn bubble_run_reports_exact_instrumentation() {
    let (controller, _) = controller(vec![4, 3, 2, 1]);
    let report = completed(controller.start().await);

    assert_eq!(report.algorithm, Algorithm::Bubble);
    assert_eq!(report.comparisons, 6);
    assert_eq!(report.swaps, 6);
    assert_eq!(report.sequence, vec![1, 2, 3, 4]);
    assert_eq!(controller.run_state(), RunState::Idle);
}

#[tokio::test]
async fn selection_run_reports_exact_instrumentation() {
    let (controller, _) = controller(vec![4, 3, 2, 1]);
    controller.select(Algorithm::Selection).await.expect("idle");
    let report = completed(controller.start().await);

    assert_eq!(report.comparisons, 6);
    assert_eq!(report.swaps, 2);
    assert_eq!(report.sequence, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn unknown_algorithm_name_falls_back_to_bubble() {
    let (controller, _) = controller(vec![4, 3, 2, 1]);
    controller.select(Algorithm::Heap).await.expect("idle");
    let selected = controller.select_algorithm("bogosort").await.expect("idle");
    assert_eq!(selected, Algorithm::Bubble);

    let report = completed(controller.start().await);
    assert_eq!(report.algorithm, Algorithm::Bubble);
    assert_eq!(report.comparisons, 6);
    assert_eq!(report.swaps, 6);
}

#[tokio::test]
async fn completion_settles_everything_and_reports_full_progress() {
    let (controller, journal) = controller(vec![5, 1, 4, 2, 3]);
    controller.select(Algorithm::Merge).await.expect("idle");
    completed(controller.start().await);

    journal.read(|journal| {
        assert_eq!(journal.progress.last().copied(), Some(1.0));
        let during_run = journal
            .progress
            .iter()
            .skip_while(|ratio| **ratio != 0.0)
            .copied()
            .collect::<Vec<_>>();
        assert!(during_run.windows(2).all(|pair| pair[0] <= pair[1]));
        for index in 0..5 {
            assert!(journal.settled.contains(&index));
        }
        assert!(journal.events > 0);
    });

    let status = controller.status();
    assert_eq!(status.counters.progress, 1.0);
    assert!(status.counters.elapsed.is_some());
}

#[tokio::test]
async fn reset_after_run_restores_generated_sequence() {
    let (controller, _) = controller(vec![1]);
    controller.configure_size(25).await.expect("idle");
    controller
        .generate_with(&mut Xoshiro256PlusPlus::seed_from_u64(3))
        .await
        .expect("idle");
    let generated = controller.status().sequence;
    assert_eq!(generated.len(), 25);

    controller.select(Algorithm::Quick).await.expect("idle");
    let report = completed(controller.start().await);
    assert!(report.sequence.windows(2).all(|pair| pair[0] <= pair[1]));

    assert!(controller.reset().await.expect("idle"));
    let status = controller.status();
    assert_eq!(status.sequence, generated);
    assert_eq!(status.counters, CountersSnapshot::default());
}

#[tokio::test]
async fn configure_size_stays_within_the_size_control() {
    let (controller, _) = controller(vec![2, 1]);

    assert_eq!(controller.configure_size(5_000).await, Ok(MAX_SIZE));
    assert_eq!(controller.status().sequence.len(), MAX_SIZE);

    assert_eq!(controller.configure_size(0).await, Ok(1));
    assert_eq!(controller.status().sequence.len(), 1);

    let oversized = RunController::new(
        ControllerConfig {
            size: MAX_SIZE + 1,
            ..unpaced_config()
        },
        Box::new(crate::NullRenderer),
    );
    assert_eq!(oversized.status().sequence.len(), MAX_SIZE);
}

#[tokio::test]
async fn start_while_running_is_rejected_without_effect() {
    let (controller, _) = controller(vec![4, 3, 2, 1]);
    let mut status = controller.subscribe();

    let runner = controller.clone();
    let run = tokio::spawn(async move { runner.start().await });

    status
        .wait_for(|status| status.state == RunState::Running)
        .await
        .expect("status channel");

    assert_eq!(controller.start().await, StartOutcome::Rejected);
    assert_eq!(controller.run_state(), RunState::Running);
    assert_eq!(
        controller.generate().await,
        Err(ControllerError::Busy {
            algorithm: Algorithm::Bubble
        })
    );
    assert!(controller.select(Algorithm::Heap).await.is_err());
    assert!(controller.reset().await.is_err());
    assert!(controller.configure_speed(10).await.is_err());

    let report = completed(run.await.expect("run task"));
    assert_eq!(report.comparisons, 6);
    assert_eq!(report.swaps, 6);
    assert_eq!(report.sequence, vec![1, 2, 3, 4]);
    assert_eq!(controller.run_state(), RunState::Idle);
    assert_eq!(controller.status().state, RunState::Idle);
}

#[tokio::test]
async fn each_run_starts_from_zeroed_counters() {
    let (controller, _) = controller(vec![3, 2, 1]);
    let first = completed(controller.start().await);
    assert_eq!(first.comparisons, 3);

    // Already sorted now: bubble still compares every pair but never swaps.
    let second = completed(controller.start().await);
    assert_eq!(second.comparisons, 3);
    assert_eq!(second.swaps, 0);
}

#[tokio::test]
async fn speed_is_clamped_to_control_range() {
    let (controller, _) = controller(vec![2, 1]);
    assert_eq!(controller.configure_speed(0).await, Ok(1));
    assert_eq!(controller.configure_speed(200).await, Ok(10));
}

#[tokio::test]
async fn load_replaces_sequence_and_snapshot() {
    let (controller, journal) = controller(vec![9, 9]);
    let draws_before = journal.read(|journal| journal.draws);
    controller.load(vec![2, 7, 1]).await.expect("idle");

    assert_eq!(controller.status().sequence, vec![2, 7, 1]);
    assert!(journal.read(|journal| journal.draws) > draws_before);

    completed(controller.start().await);
    controller.reset().await.expect("idle");
    assert_eq!(controller.status().sequence, vec![2, 7, 1]);
}
