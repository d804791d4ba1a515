use std::time::{Duration, Instant};

use log::warn;

use crate::shutdown::ShutdownToken;
use crate::sync::{ReadinessGate, SensorChannel, WaitError};
use crate::types::Pose;

/// Direction in which the altitude must cross the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Condition holds once altitude rises to the threshold (takeoff).
    Rising,
    /// Condition holds once altitude falls to the threshold (landing).
    Falling,
}

/// Polling state machine detecting a one-directional crossing of the
/// vehicle altitude through a threshold.
///
/// Thresholds and epsilon are caller-supplied; nothing here is
/// hard-wired to a particular vehicle.
pub struct HeightMonitor {
    poll_period: Duration,
    epsilon: f64,
    shutdown: ShutdownToken,
}

impl HeightMonitor {
    pub fn new(poll_period: Duration, epsilon: f64, shutdown: ShutdownToken) -> Self {
        Self {
            poll_period,
            epsilon,
            shutdown,
        }
    }

    /// Block until the altitude crosses `threshold` in the `crossing`
    /// direction, sampling one pose per poll period through the
    /// readiness gate.
    ///
    /// If the condition already holds at the first sample this returns
    /// immediately: commanding takeoff while airborne is a no-op wait.
    /// There is no overall timeout; the wait ends only on success or
    /// shutdown.
    ///
    /// # Returns
    /// Elapsed wall-clock time until the crossing was observed.
    pub fn await_height(
        &self,
        gate: &ReadinessGate,
        pose: &SensorChannel<Pose>,
        threshold: f64,
        crossing: Crossing,
    ) -> Result<Duration, WaitError> {
        let start = Instant::now();
        loop {
            if self.shutdown.is_triggered() {
                return Err(WaitError::Cancelled);
            }

            let altitude = gate.await_value(pose)?.altitude();
            let reached = match crossing {
                Crossing::Rising => altitude >= threshold - self.epsilon,
                Crossing::Falling => altitude <= threshold + self.epsilon,
            };
            if reached {
                let elapsed = start.elapsed();
                warn!(
                    "altitude {altitude:.2} crossed threshold {threshold:.2} after {:.2}s",
                    elapsed.as_secs_f64()
                );
                return Ok(elapsed);
            }

            std::thread::sleep(self.poll_period);
        }
    }
}
