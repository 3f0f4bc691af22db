use super::*;

#[test]
fn delay_shrinks_as_speed_grows() {
    assert_eq!(Pacer::delay_for(1), 400);
    assert_eq!(Pacer::delay_for(5), 240);
    assert_eq!(Pacer::delay_for(10), 40);
}

#[test]
fn speed_outside_control_range_is_clamped() {
    assert_eq!(Pacer::delay_for(0), Pacer::delay_for(1));
    assert_eq!(Pacer::delay_for(42), Pacer::delay_for(10));
    assert_eq!(Pacer::new(99, Duration::ZERO).speed(), MAX_SPEED);
}

#[test]
fn delay_is_counted_in_time_units() {
    let pacer = Pacer::new(8, Duration::from_millis(2));
    assert_eq!(pacer.delay(), Duration::from_millis(240));
    assert_eq!(Pacer::unpaced().delay(), Duration::ZERO);
}

#[tokio::test]
async fn suspend_waits_for_the_delay() {
    let pacer = Pacer::new(10, Duration::from_millis(1));
    let started = tokio::time::Instant::now();
    pacer.pause().await;
    assert!(started.elapsed() >= Duration::from_millis(40));
}

#[tokio::test]
async fn zero_delay_still_yields() {
    let pacer = Pacer::unpaced();
    pacer.suspend(Duration::ZERO).await;
    pacer.pause().await;
}
