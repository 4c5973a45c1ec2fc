//! Discrete-event simulation of one server fed by two independent job
//! streams, with a last-in-first-out wait queue.
//!
//! ```no_run
//! use lifo_queue_sim::{SimConfig, Simulation};
//!
//! let report = Simulation::new(SimConfig::default().with_seed(7))?.run()?;
//! println!("MoE1 = {}", report.metrics.downtime_fraction);
//! println!("MoE2 = {}", report.metrics.max_queue_length);
//! # Ok::<(), lifo_queue_sim::SimError>(())
//! ```

pub mod config;
pub mod distribution;
pub mod error;
pub mod logging;
pub mod queues;
pub mod simulation;
pub mod trace;
pub mod variates;

pub use config::SimConfig;
pub use distribution::Law;
pub use error::SimError;
pub use queues::job::{Job, JobType};
pub use queues::lifo::WaitQueue;
pub use queues::server::{Server, ServerStatus};
pub use simulation::{Report, Simulation, Transition};
pub use trace::{EventKind, Metrics, Snapshot};
pub use variates::{SampleSet, VariateGenerator};
