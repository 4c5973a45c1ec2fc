use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::distribution::Law;
use crate::error::{Result, SimError};
use crate::queues::job::JobType;

/// Everything one run needs. `Default` is the reference scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub horizon: f64,
    pub seed: Option<u64>,
    pub type1_arrival: Law,
    pub type2_arrival: Law,
    pub type1_service: Law,
    pub type2_service: Law,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            horizon: 500.,
            seed: None,
            type1_arrival: Law::Erlang { k: 2, theta: 3. },
            type2_arrival: Law::Normal { mu: 2., sigma: 2. },
            type1_service: Law::Normal { mu: 2., sigma: 1.5 },
            type2_service: Law::Normal { mu: 1.5, sigma: 0.5 },
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        SimConfig::from_toml_str(&s)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.horizon.is_finite() && self.horizon > 0.) {
            return Err(SimError::InvalidHorizon(self.horizon));
        }
        self.type1_arrival.validate_duration()?;
        self.type2_arrival.validate_duration()?;
        self.type1_service.validate_duration()?;
        self.type2_service.validate_duration()?;
        Ok(())
    }

    pub fn arrival_law(&self, job_type: JobType) -> &Law {
        match job_type {
            JobType::J1 => &self.type1_arrival,
            JobType::J2 => &self.type2_arrival,
        }
    }

    pub fn service_law(&self, job_type: JobType) -> &Law {
        match job_type {
            JobType::J1 => &self.type1_service,
            JobType::J2 => &self.type2_service,
        }
    }
}
