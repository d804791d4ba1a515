use thiserror::Error;

use crate::sync::WaitError;
use crate::transport::TransportError;

/// Top-level error type of the control link.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("operation cancelled by shutdown")]
    Cancelled,

    #[error("readiness wait gave up after {0} attempts")]
    Unready(u32),

    #[error("task hook `{0}` not implemented")]
    NotImplemented(&'static str),

    #[error("no cached value on channel `{0}`")]
    SensorUnavailable(&'static str),
}

impl From<WaitError> for EnvError {
    fn from(err: WaitError) -> Self {
        match err {
            WaitError::Cancelled => EnvError::Cancelled,
            WaitError::AttemptsExhausted(attempts) => EnvError::Unready(attempts),
        }
    }
}
