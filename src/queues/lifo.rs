use std::fmt;

use crate::queues::job::{Job, JobType};

/// Holding area for jobs waiting on the server. The most recently pushed
/// job is the first one out.
#[derive(Debug, Default)]
pub struct WaitQueue {
    jobs: Vec<Job>,
}

impl WaitQueue {
    pub fn new() -> Self {
        WaitQueue { jobs: Vec::new() }
    }

    pub fn push(&mut self, job: Job) {
        self.jobs.push(job);
    }

    pub fn pop(&mut self) -> Option<Job> {
        self.jobs.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Job types in insertion order, oldest first.
    pub fn contents(&self) -> Vec<JobType> {
        self.jobs.iter().map(|j| j.get_type()).collect()
    }
}

impl fmt::Display for WaitQueue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let types: Vec<String> = self.jobs.iter().map(|j| j.get_type().to_string()).collect();
        write!(f, "[{}]", types.join(", "))
    }
}
