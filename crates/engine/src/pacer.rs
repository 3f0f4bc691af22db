use std::time::Duration;

pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 10;
pub const DEFAULT_SPEED: u8 = 5;
const UNITS_PER_SPEED_STEP: u64 = 40;

/// Converts a speed setting into the delay between observable steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    speed: u8,
    unit: Duration,
}

impl Pacer {
    pub fn new(speed: u8, unit: Duration) -> Self {
        Self {
            speed: clamp_speed(speed),
            unit,
        }
    }

    /// Pacer whose suspension only yields to the scheduler.
    pub fn unpaced() -> Self {
        Self::new(DEFAULT_SPEED, Duration::ZERO)
    }

    /// Delay in time units: `(11 - speed) * 40`, speed clamped to `1..=10`.
    pub fn delay_for(speed: u8) -> u64 {
        (u64::from(MAX_SPEED) + 1 - u64::from(clamp_speed(speed))) * UNITS_PER_SPEED_STEP
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: u8) {
        self.speed = clamp_speed(speed);
    }

    pub fn unit(&self) -> Duration {
        self.unit
    }

    pub fn delay(&self) -> Duration {
        let units = u32::try_from(Self::delay_for(self.speed)).unwrap_or(u32::MAX);
        self.unit.saturating_mul(units)
    }

    /// The one point where a run gives control back to the host scheduler.
    pub async fn suspend(&self, duration: Duration) {
        if duration.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(duration).await;
        }
    }

    pub async fn pause(&self) {
        self.suspend(self.delay()).await;
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED, Duration::from_millis(1))
    }
}

pub fn clamp_speed(speed: u8) -> u8 {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

#[cfg(test)]
#[path = "tests/pacer_tests.rs"]
mod tests;
