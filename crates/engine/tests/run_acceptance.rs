use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use shared::domain::{Algorithm, MagnitudeRange, RunState};
use sort_engine::{ControllerConfig, NullRenderer, RunController, StartOutcome};
use std::time::Duration;

fn config(size: usize) -> ControllerConfig {
    ControllerConfig {
        size,
        time_unit: Duration::ZERO,
        range: MagnitudeRange::new(1, 40).expect("range"),
        ..ControllerConfig::default()
    }
}

#[tokio::test]
async fn every_algorithm_leaves_a_non_decreasing_sequence() {
    let controller = RunController::new(config(48), Box::new(NullRenderer));

    for (round, algorithm) in Algorithm::ALL.into_iter().enumerate() {
        for seed in 0..4u64 {
            controller
                .generate_with(&mut Xoshiro256PlusPlus::seed_from_u64(seed * 97 + round as u64))
                .await
                .expect("idle");
            controller.select(algorithm).await.expect("idle");

            let StartOutcome::Completed(report) = controller.start().await else {
                panic!("{algorithm} run rejected");
            };
            assert!(
                report.sequence.windows(2).all(|pair| pair[0] <= pair[1]),
                "{algorithm} seed {seed} left {:?}",
                report.sequence
            );
            assert_eq!(report.sequence.len(), 48);
        }
    }
}

#[tokio::test]
async fn generate_start_reset_round_trip() {
    let controller = RunController::new(config(30), Box::new(NullRenderer));
    controller.generate().await.expect("idle");
    let before = controller.status().sequence;

    controller.select_algorithm("heap").await.expect("idle");
    assert!(matches!(controller.start().await, StartOutcome::Completed(_)));
    controller.reset().await.expect("idle");

    assert_eq!(controller.status().sequence, before);
    assert_eq!(controller.status().state, RunState::Idle);
}

#[tokio::test]
async fn progress_observed_through_status_never_decreases() {
    let controller = RunController::with_sequence(
        config(0),
        (1..=20).rev().collect(),
        Box::new(NullRenderer),
    );
    controller.select(Algorithm::Insertion).await.expect("idle");

    let mut status = controller.subscribe();
    let runner = controller.clone();
    let run = tokio::spawn(async move { runner.start().await });

    let mut observed = Vec::new();
    loop {
        status.changed().await.expect("status channel");
        let current = status.borrow_and_update().clone();
        observed.push(current.counters.progress);
        if current.state == RunState::Idle && current.counters.progress >= 1.0 {
            break;
        }
    }

    assert!(matches!(run.await.expect("run task"), StartOutcome::Completed(_)));
    assert!(observed.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(observed.last().copied(), Some(1.0));
}

#[tokio::test]
async fn paced_run_takes_at_least_one_delay_per_step() {
    let controller = RunController::with_sequence(
        ControllerConfig {
            speed: 10,
            time_unit: Duration::from_millis(1),
            ..ControllerConfig::default()
        },
        vec![2, 1],
        Box::new(NullRenderer),
    );

    let StartOutcome::Completed(report) = controller.start().await else {
        panic!("run rejected");
    };
    // One compare and one swap, 40 ms each at top speed.
    assert!(report.elapsed >= Duration::from_millis(80));
    assert_eq!(report.sequence, vec![1, 2]);
}
