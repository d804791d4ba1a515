mod drone;
mod error;
mod shutdown;
mod sync;
mod task;
mod transport;
mod types;

pub use drone::{
    DroneChannels, DroneEnv, LinkConfig, StepReport, IMAGE_CHANNEL, LAND_CHANNEL, POSE_CHANNEL,
    TAKEOFF_CHANNEL, VELOCITY_CHANNEL,
};
pub use error::EnvError;
pub use shutdown::ShutdownToken;
pub use sync::{
    Crossing, HeightMonitor, PublisherHandshake, ReadinessGate, SensorCache, SensorChannel,
    WaitError,
};
pub use task::{Action, Observation, TaskHooks, UnimplementedHooks};
pub use transport::{
    MemoryPublisher, MemorySubscriber, MemoryTopic, MessageCallback, NoopSim, Publication,
    SimControl, Subscription, TransportError,
};
pub use types::{ImageFrame, Pose, Signal, VelocityCommand};
