mod config;
mod facade;

pub use config::LinkConfig;
pub use facade::{
    DroneChannels, DroneEnv, StepReport, IMAGE_CHANNEL, LAND_CHANNEL, POSE_CHANNEL,
    TAKEOFF_CHANNEL, VELOCITY_CHANNEL,
};
