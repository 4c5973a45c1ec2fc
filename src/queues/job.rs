use std::fmt;

use serde::Serialize;

use crate::distribution::Law;
use crate::error::Result;
use crate::variates::VariateGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum JobType {
    J1,
    J2,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            JobType::J1 => write!(f, "J1"),
            JobType::J2 => write!(f, "J2"),
        }
    }
}

/// One unit of work. The processing time is fixed when the job is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    job_type: JobType,
    processing_time: f64,
}

impl Job {
    /// Draws a positive processing time from `service`, the law bound to `job_type`.
    pub fn new(job_type: JobType, service: &Law, gen: &mut VariateGenerator) -> Result<Self> {
        Ok(Job {
            job_type,
            processing_time: gen.duration(service)?,
        })
    }

    pub fn get_type(&self) -> JobType {
        self.job_type
    }

    pub fn get_processing_time(&self) -> f64 {
        self.processing_time
    }
}

#[cfg(test)]
pub(crate) fn job_with(job_type: JobType, processing_time: f64) -> Job {
    Job { job_type, processing_time }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn processing_time_comes_from_the_bound_law() {
        let law = Law::Normal { mu: 1.5, sigma: 0.5 };
        let mut a = VariateGenerator::seeded(8);
        let mut b = VariateGenerator::seeded(8);
        let job = Job::new(JobType::J2, &law, &mut a).unwrap();
        assert_eq!(job.get_type(), JobType::J2);
        assert_eq!(job.get_processing_time(), b.duration(&law).unwrap());
        assert!(job.get_processing_time() > 0.);
    }

    #[test]
    fn rejects_an_unvalidated_service_law() {
        let mut gen = VariateGenerator::seeded(8);
        let law = Law::Normal { mu: -1e6, sigma: 1. };
        match Job::new(JobType::J1, &law, &mut gen) {
            Err(SimError::InvalidParameter { param, .. }) => assert_eq!(param, "mu"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
        assert!(Job::new(JobType::J2, &Law::Normal { mu: 1., sigma: 0. }, &mut gen).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(JobType::J1.to_string(), "J1");
        assert_eq!(JobType::J2.to_string(), "J2");
    }
}
