//! Error types for the simulator

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid parameter `{param}` = {value}: {reason}")]
    InvalidParameter {
        param: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("invalid horizon {0}: expected a finite positive time")]
    InvalidHorizon(f64),

    #[error("server busy at t={time}: start_processing called while a job is in service")]
    ServerBusy { time: f64 },

    #[error("server idle: finish_processing called with no job in service")]
    ServerIdle,

    #[error("event timestamp is NaN")]
    NanTimestamp,

    #[error("could not parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("could not read configuration: {0}")]
    Io(#[from] io::Error),
}
