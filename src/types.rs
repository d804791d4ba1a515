use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Ground-truth pose of the vehicle in the world frame (z-up).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pose {
    /// Position in world space [m]
    pub position: Vector3<f64>,

    /// Attitude quaternion (rotation from body to world frame)
    pub orientation: UnitQuaternion<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
        }
    }
}

impl Pose {
    /// Create a new pose at a specific position with identity attitude
    pub fn at_position(position: Vector3<f64>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Height above the ground plane [m]
    pub fn altitude(&self) -> f64 {
        self.position.z
    }
}

/// Velocity setpoint published on the command channel.
///
/// Built fresh for every move command and never retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VelocityCommand {
    /// Linear velocity in body frame [m/s]
    pub linear: Vector3<f64>,

    /// Yaw rate [rad/s]
    pub yaw_rate: f64,
}

impl VelocityCommand {
    pub fn new(linear: Vector3<f64>, yaw_rate: f64) -> Self {
        Self { linear, yaw_rate }
    }

    /// Zero setpoint, holding the current position.
    pub fn hover() -> Self {
        Self::new(Vector3::zeros(), 0.0)
    }
}

/// Raw camera frame as delivered by the transport.
///
/// The payload is opaque to this layer; decoding is the task layer's
/// business.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Empty trigger payload for the takeoff and land channels.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Signal;
