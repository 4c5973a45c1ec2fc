use std::env;
use std::process;

use tracing::error;

use lifo_queue_sim::logging::init_logging;
use lifo_queue_sim::{SimConfig, SimError, Simulation};

fn main() {
    init_logging("info");

    if let Err(e) = run(env::args()) {
        error!(error = %e, "simulation failed");
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

// usage: lifo_queue_sim [config.toml]
fn run(mut args: env::Args) -> Result<(), SimError> {
    let config = match args.nth(1) {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };

    let report = Simulation::new(config)?.run()?;

    println!("Downtime factor (MoE1): {}", report.metrics.downtime_fraction);
    println!("Max. of all jobs in queue (MoE2): {}", report.metrics.max_queue_length);
    Ok(())
}
