use serde::Serialize;

use crate::error::{Result, SimError};
use crate::queues::job::Job;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServerStatus {
    Idle,
    Busy,
}

/// Single server. The status is derived from the job slot, so
/// `Busy` and "holds a job" can never disagree.
#[derive(Debug, Default)]
pub struct Server {
    current_job: Option<Job>,
}

impl Server {
    pub fn new() -> Self {
        Server { current_job: None }
    }

    pub fn status(&self) -> ServerStatus {
        match self.current_job {
            Some(_) => ServerStatus::Busy,
            None => ServerStatus::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.current_job.is_none()
    }

    pub fn current_job(&self) -> Option<&Job> {
        self.current_job.as_ref()
    }

    /// Puts `job` in service at `at_time` and returns its completion time.
    pub fn start_processing(&mut self, job: Job, at_time: f64) -> Result<f64> {
        if self.current_job.is_some() {
            return Err(SimError::ServerBusy { time: at_time });
        }
        let completion = at_time + job.get_processing_time();
        self.current_job = Some(job);
        Ok(completion)
    }

    /// Releases the job in service.
    pub fn finish_processing(&mut self) -> Result<Job> {
        self.current_job.take().ok_or(SimError::ServerIdle)
    }
}
