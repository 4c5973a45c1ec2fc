//! Per-event trace records and summary metrics handed to reporting.

use serde::Serialize;

use crate::queues::job::JobType;
use crate::queues::server::ServerStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    Arrival(JobType),
    ServiceCompletion,
}

/// State of the system right after one event was applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub event: usize,
    pub kind: EventKind,
    pub current_time: f64,
    pub next_type1_arrival: f64,
    pub next_type2_arrival: f64,
    /// `None` while no completion is pending.
    pub next_service_completion: Option<f64>,
    pub server_status: ServerStatus,
    pub queue_length: usize,
    pub queue_content: Vec<JobType>,
    pub downtime: f64,
    pub max_queue_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub horizon: f64,
    pub events: usize,
    pub downtime: f64,
    /// Idle share of the horizon (MoE1).
    pub downtime_fraction: f64,
    /// Largest queue length seen after any event (MoE2).
    pub max_queue_length: usize,
}
