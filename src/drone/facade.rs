use log::{debug, info};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::drone::LinkConfig;
use crate::error::EnvError;
use crate::shutdown::ShutdownToken;
use crate::sync::{Crossing, HeightMonitor, PublisherHandshake, ReadinessGate, SensorChannel};
use crate::task::{Action, Observation, TaskHooks};
use crate::transport::{Publication, SimControl, Subscription};
use crate::types::{ImageFrame, Pose, Signal, VelocityCommand};

pub const IMAGE_CHANNEL: &str = "drone/front_camera/image_raw";
pub const POSE_CHANNEL: &str = "drone/gt_pose";
pub const VELOCITY_CHANNEL: &str = "cmd_vel";
pub const TAKEOFF_CHANNEL: &str = "drone/takeoff";
pub const LAND_CHANNEL: &str = "drone/land";

/// Transport handles for the five vehicle channels, injected at
/// construction.
pub struct DroneChannels {
    pub image: Box<dyn Subscription<ImageFrame>>,
    pub pose: Box<dyn Subscription<Pose>>,
    pub velocity: Box<dyn Publication<VelocityCommand>>,
    pub takeoff: Box<dyn Publication<Signal>>,
    pub land: Box<dyn Publication<Signal>>,
}

/// Result of one environment step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub obs: Observation,
    pub reward: f64,
    pub done: bool,
}

/// Synchronous control surface over the asynchronous vehicle bus.
///
/// Every public operation blocks until its simulated effect has been
/// observed, so a training loop can treat the vehicle as a
/// deterministic step function. Operations must be invoked
/// sequentially; the facade is not a concurrent API.
pub struct DroneEnv {
    image: SensorChannel<ImageFrame>,
    pose: SensorChannel<Pose>,
    velocity: Box<dyn Publication<VelocityCommand>>,
    takeoff_trigger: Box<dyn Publication<Signal>>,
    land_trigger: Box<dyn Publication<Signal>>,
    sim: Box<dyn SimControl>,
    gate: ReadinessGate,
    handshake: PublisherHandshake,
    monitor: HeightMonitor,
    config: LinkConfig,
    shutdown: ShutdownToken,
    hooks: Box<dyn TaskHooks>,
}

impl DroneEnv {
    /// Bring the link up.
    ///
    /// Runs, in order: unpause the simulation, block until both inbound
    /// channels have delivered at least one message, attach the cache
    /// listeners, block until every outbound channel has a subscriber,
    /// re-pause the simulation. A constructed facade is therefore never
    /// one-sided: its sensor reads return without blocking and its
    /// first published command has a consumer.
    pub fn connect(
        channels: DroneChannels,
        sim: Box<dyn SimControl>,
        hooks: Box<dyn TaskHooks>,
        config: LinkConfig,
        shutdown: ShutdownToken,
    ) -> Result<Self, EnvError> {
        let gate = ReadinessGate::new(
            config.wait_timeout(),
            config.max_wait_attempts,
            shutdown.clone(),
        );
        let handshake = PublisherHandshake::new(config.poll_period(), shutdown.clone());
        let monitor = HeightMonitor::new(
            config.poll_period(),
            config.height_epsilon_m,
            shutdown.clone(),
        );

        let image = SensorChannel::new(IMAGE_CHANNEL, channels.image);
        let pose = SensorChannel::new(POSE_CHANNEL, channels.pose);

        sim.unpause();

        gate.await_value(&image)?;
        gate.await_value(&pose)?;
        debug!("all sensors ready");

        image.attach_listener();
        pose.attach_listener();

        handshake.ensure_connected(channels.velocity.as_ref(), VELOCITY_CHANNEL)?;
        handshake.ensure_connected(channels.takeoff.as_ref(), TAKEOFF_CHANNEL)?;
        handshake.ensure_connected(channels.land.as_ref(), LAND_CHANNEL)?;
        debug!("all publishers connected");

        sim.pause();
        info!("drone link up, simulation paused");

        Ok(Self {
            image,
            pose,
            velocity: channels.velocity,
            takeoff_trigger: channels.takeoff,
            land_trigger: channels.land,
            sim,
            gate,
            handshake,
            monitor,
            config,
            shutdown,
            hooks,
        })
    }

    /// Command takeoff and block until the vehicle is airborne.
    ///
    /// The simulation is unpaused for the duration of the climb and
    /// re-paused once the takeoff threshold is crossed.
    pub fn takeoff(&self) -> Result<(), EnvError> {
        info!("takeoff commanded");
        self.sim.unpause();
        self.handshake
            .ensure_connected(self.takeoff_trigger.as_ref(), TAKEOFF_CHANNEL)?;
        self.takeoff_trigger.publish(Signal)?;
        self.monitor.await_height(
            &self.gate,
            &self.pose,
            self.config.takeoff_height_m,
            Crossing::Rising,
        )?;
        self.sim.pause();
        Ok(())
    }

    /// Command landing and block until the vehicle is down.
    pub fn land(&self) -> Result<(), EnvError> {
        info!("landing commanded");
        self.sim.unpause();
        self.handshake
            .ensure_connected(self.land_trigger.as_ref(), LAND_CHANNEL)?;
        self.land_trigger.publish(Signal)?;
        self.monitor.await_height(
            &self.gate,
            &self.pose,
            self.config.landing_height_m,
            Crossing::Falling,
        )?;
        self.sim.pause();
        Ok(())
    }

    /// Publish a velocity setpoint and wait the fixed settle delay.
    ///
    /// The simulation pause state is left untouched: movement happens
    /// inside a step, where the caller owns the pause bracket.
    pub fn command_velocity(&self, linear: Vector3<f64>, yaw_rate: f64) -> Result<(), EnvError> {
        self.handshake
            .ensure_connected(self.velocity.as_ref(), VELOCITY_CHANNEL)?;
        let command = VelocityCommand::new(linear, yaw_rate);
        debug!("publishing velocity command {command:?}");
        self.velocity.publish(command)?;
        if !self
            .shutdown
            .sleep(self.config.settle_delay(), self.config.poll_period())
        {
            return Err(EnvError::Cancelled);
        }
        Ok(())
    }

    /// Most recent pose, without blocking.
    ///
    /// Always succeeds after construction.
    pub fn latest_pose(&self) -> Result<Pose, EnvError> {
        self.pose
            .latest()
            .ok_or(EnvError::SensorUnavailable(POSE_CHANNEL))
    }

    /// Most recent camera frame, without blocking.
    ///
    /// Always succeeds after construction.
    pub fn latest_image(&self) -> Result<ImageFrame, EnvError> {
        self.image
            .latest()
            .ok_or(EnvError::SensorUnavailable(IMAGE_CHANNEL))
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Drive one step through the task hooks: map the action, command
    /// the vehicle, then observe, terminate and score.
    pub fn step(&mut self, action: &Action) -> Result<StepReport, EnvError> {
        let command = self.hooks.set_action(action)?;
        self.command_velocity(command.linear, command.yaw_rate)?;

        let pose = self.latest_pose()?;
        let image = self.latest_image()?;
        let obs = self.hooks.get_obs(&pose, &image)?;
        let done = self.hooks.is_done(&obs)?;
        let reward = self.hooks.compute_reward(&obs, done)?;

        Ok(StepReport { obs, reward, done })
    }

    /// Start a fresh episode through the task hooks and return the
    /// initial observation.
    pub fn reset_episode(&mut self) -> Result<Observation, EnvError> {
        self.hooks.set_init_pose()?;
        self.hooks.init_env_variables()?;

        let pose = self.latest_pose()?;
        let image = self.latest_image()?;
        self.hooks.get_obs(&pose, &image)
    }

    // Task-layer surface, delegated to the hooks. On a facade built
    // without a task layer each of these fails with NotImplemented.

    pub fn compute_reward(&mut self, obs: &Observation, done: bool) -> Result<f64, EnvError> {
        self.hooks.compute_reward(obs, done)
    }

    pub fn is_done(&mut self, obs: &Observation) -> Result<bool, EnvError> {
        self.hooks.is_done(obs)
    }

    pub fn get_obs(&mut self) -> Result<Observation, EnvError> {
        let pose = self.latest_pose()?;
        let image = self.latest_image()?;
        self.hooks.get_obs(&pose, &image)
    }
}
