use std::collections::HashMap;

use crate::error::EnvError;
use crate::types::{ImageFrame, Pose, VelocityCommand};

/// Action vector handed down by the policy, keyed by actuator name.
pub type Action = HashMap<String, f64>;

/// Observation vector handed back to the policy, keyed by signal name.
pub type Observation = HashMap<String, f64>;

/// Domain logic supplied by a concrete task layer.
///
/// The control facade depends only on this capability interface; a
/// task crate implements it with its own reward, observation and
/// action semantics and hands it to the facade at construction. Every
/// method defaults to [`EnvError::NotImplemented`], so invoking a hook
/// that the task layer did not supply is a hard error rather than a
/// silent no-op.
///
/// Hooks are pure domain logic: the facade performs all channel I/O
/// and feeds the hooks the latest sensor readings.
pub trait TaskHooks: Send {
    /// Restore whatever start state the task defines for an episode.
    fn set_init_pose(&mut self) -> Result<(), EnvError> {
        Err(EnvError::NotImplemented("set_init_pose"))
    }

    /// Reset per-episode bookkeeping.
    fn init_env_variables(&mut self) -> Result<(), EnvError> {
        Err(EnvError::NotImplemented("init_env_variables"))
    }

    /// Map a policy action onto a velocity setpoint for this step.
    fn set_action(&mut self, _action: &Action) -> Result<VelocityCommand, EnvError> {
        Err(EnvError::NotImplemented("set_action"))
    }

    /// Build the observation from the latest sensor readings.
    fn get_obs(&mut self, _pose: &Pose, _image: &ImageFrame) -> Result<Observation, EnvError> {
        Err(EnvError::NotImplemented("get_obs"))
    }

    /// Decide whether the episode has terminated.
    fn is_done(&mut self, _obs: &Observation) -> Result<bool, EnvError> {
        Err(EnvError::NotImplemented("is_done"))
    }

    /// Score the current step.
    fn compute_reward(&mut self, _obs: &Observation, _done: bool) -> Result<f64, EnvError> {
        Err(EnvError::NotImplemented("compute_reward"))
    }
}

/// Placeholder hooks for a facade constructed without a task layer.
///
/// Every hook fails with [`EnvError::NotImplemented`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnimplementedHooks;

impl TaskHooks for UnimplementedHooks {}
