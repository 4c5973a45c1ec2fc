//! Event loop for a single server fed by two independent arrival streams,
//! with a LIFO wait queue in front of it.
//!
//! Each call to `make_transition` picks the earliest of the three pending
//! timestamps (type-1 arrival, type-2 arrival, service completion), moves the
//! clock there, applies that one event and appends a `Snapshot` to the trace.
//! On equal timestamps the event listed first in that order wins; the others
//! fire on the following transitions at the same clock value.

use ordered_float::NotNan;
use tracing::{debug, info, info_span, trace};

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::queues::job::{Job, JobType};
use crate::queues::lifo::WaitQueue;
use crate::queues::server::Server;
use crate::trace::{EventKind, Metrics, Snapshot};
use crate::variates::VariateGenerator;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub time: f64,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub trace: Vec<Snapshot>,
    pub metrics: Metrics,
}

pub struct Simulation {
    config: SimConfig,
    gen: VariateGenerator,
    server: Server,
    queue: WaitQueue,
    time: f64,
    next_type1_arrival: f64,
    next_type2_arrival: f64,
    next_service_completion: Option<f64>,
    downtime: f64,
    max_queue_length: usize,
    trace: Vec<Snapshot>,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Simulation> {
        let gen = VariateGenerator::new(config.seed);
        Simulation::with_generator(config, gen)
    }

    /// Builds the engine around an existing generator. The first arrival of
    /// each stream is drawn here, type 1 first.
    pub fn with_generator(config: SimConfig, mut gen: VariateGenerator) -> Result<Simulation> {
        config.validate()?;
        let next_type1_arrival = gen.duration(&config.type1_arrival)?;
        let next_type2_arrival = gen.duration(&config.type2_arrival)?;

        Ok(Simulation {
            config,
            gen,
            server: Server::new(),
            queue: WaitQueue::new(),
            time: 0.,
            next_type1_arrival,
            next_type2_arrival,
            next_service_completion: None,
            downtime: 0.,
            max_queue_length: 0,
            trace: Vec::new(),
        })
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_finished(&self) -> bool {
        self.time >= self.config.horizon
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    pub fn queue(&self) -> &WaitQueue {
        &self.queue
    }

    pub fn trace(&self) -> &[Snapshot] {
        &self.trace
    }

    pub fn next_arrival(&self, job_type: JobType) -> f64 {
        match job_type {
            JobType::J1 => self.next_type1_arrival,
            JobType::J2 => self.next_type2_arrival,
        }
    }

    pub fn next_service_completion(&self) -> Option<f64> {
        self.next_service_completion
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            horizon: self.config.horizon,
            events: self.trace.len(),
            downtime: self.downtime,
            downtime_fraction: self.downtime / self.config.horizon,
            max_queue_length: self.max_queue_length,
        }
    }

    /// Earliest pending event. A missing completion never wins.
    pub fn next_event(&self) -> Result<(f64, EventKind)> {
        let mut best = (key(self.next_type1_arrival)?, EventKind::Arrival(JobType::J1));

        let type2 = key(self.next_type2_arrival)?;
        if type2 < best.0 {
            best = (type2, EventKind::Arrival(JobType::J2));
        }
        if let Some(completion) = self.next_service_completion {
            let completion = key(completion)?;
            if completion < best.0 {
                best = (completion, EventKind::ServiceCompletion);
            }
        }

        Ok((best.0.into_inner(), best.1))
    }

    /// Applies exactly one event.
    pub fn make_transition(&mut self) -> Result<Transition> {
        let (next_time, kind) = self.next_event()?;

        // idle time past the horizon is not counted
        if self.server.is_idle() && self.time < next_time {
            let until = next_time.min(self.config.horizon);
            if until > self.time {
                self.downtime += until - self.time;
            }
        }

        self.time = next_time;

        match kind {
            EventKind::Arrival(job_type) => self.arrival(job_type)?,
            EventKind::ServiceCompletion => self.service_completion()?,
        }

        self.max_queue_length = self.max_queue_length.max(self.queue.len());
        self.record(kind);

        debug!(
            time = self.time,
            event = ?kind,
            queue = %self.queue,
            server = ?self.server.status(),
            "transition"
        );

        Ok(Transition { time: self.time, kind })
    }

    /// Runs until the clock reaches the horizon.
    pub fn run(mut self) -> Result<Report> {
        let span = info_span!("simulation", horizon = self.config.horizon, seed = ?self.config.seed);
        let _enter = span.enter();

        info!("simulation started");
        while !self.is_finished() {
            self.make_transition()?;
        }

        let metrics = self.metrics();
        info!(
            events = metrics.events,
            downtime_fraction = metrics.downtime_fraction,
            max_queue_length = metrics.max_queue_length,
            "simulation finished"
        );

        Ok(Report {
            trace: self.trace,
            metrics,
        })
    }

    fn arrival(&mut self, job_type: JobType) -> Result<()> {
        let job = Job::new(job_type, self.config.service_law(job_type), &mut self.gen)?;

        if self.server.is_idle() {
            let completion = self.server.start_processing(job, self.time)?;
            trace!(time = self.time, completion, "job enters service on arrival");
            self.next_service_completion = Some(completion);
        } else {
            self.queue.push(job);
        }

        // renewal: the next gap is counted from this arrival's scheduled time
        let gap = self.gen.duration(self.config.arrival_law(job_type))?;
        match job_type {
            JobType::J1 => self.next_type1_arrival += gap,
            JobType::J2 => self.next_type2_arrival += gap,
        }
        Ok(())
    }

    fn service_completion(&mut self) -> Result<()> {
        let done = self.server.finish_processing()?;
        trace!(time = self.time, job = %done.get_type(), "job leaves service");

        self.next_service_completion = match self.queue.pop() {
            Some(job) => Some(self.server.start_processing(job, self.time)?),
            None => None,
        };
        Ok(())
    }

    fn record(&mut self, kind: EventKind) {
        let snapshot = Snapshot {
            event: self.trace.len(),
            kind,
            current_time: self.time,
            next_type1_arrival: self.next_type1_arrival,
            next_type2_arrival: self.next_type2_arrival,
            next_service_completion: self.next_service_completion,
            server_status: self.server.status(),
            queue_length: self.queue.len(),
            queue_content: self.queue.contents(),
            downtime: self.downtime,
            max_queue_length: self.max_queue_length,
        };
        self.trace.push(snapshot);
    }
}

fn key(time: f64) -> Result<NotNan<f64>> {
    NotNan::new(time).map_err(|_| SimError::NanTimestamp)
}
