use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and threshold parameters of the control link.
///
/// Defaults match the rates the simulated vehicle is tuned for; none
/// of them are hard-wired into the monitors themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Busy-poll frequency for handshakes and height sampling [Hz]
    pub poll_rate_hz: f64,

    /// Bound on a single readiness-gate message wait [s]
    pub wait_timeout_s: f64,

    /// Fixed settle delay after publishing a velocity command [s]
    pub settle_delay_s: f64,

    /// Altitude at which takeoff counts as complete [m]
    pub takeoff_height_m: f64,

    /// Altitude at which landing counts as complete [m]
    pub landing_height_m: f64,

    /// Acceptance band applied around both thresholds [m]
    pub height_epsilon_m: f64,

    /// Cap on readiness attempts; `None` retries forever. Test
    /// environments opt into a bound to avoid hangs.
    pub max_wait_attempts: Option<u32>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            poll_rate_hz: 30.0,
            wait_timeout_s: 5.0,
            settle_delay_s: 0.5,
            takeoff_height_m: 1.2,
            landing_height_m: 0.6,
            height_epsilon_m: 0.05,
            max_wait_attempts: None,
        }
    }
}

impl LinkConfig {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file = std::fs::File::open(path)?;
        let config = serde_yaml::from_reader(file)?;
        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn poll_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.poll_rate_hz)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.wait_timeout_s)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs_f64(self.settle_delay_s)
    }
}
