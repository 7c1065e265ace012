// CLI for the profiling workload.
//
// Record a call graph with:
//  valgrind --tool=callgrind ./target/debug/profiling_example
// or
//  perf record -g ./target/release/profiling_example

use clap::Parser;
use profiling_example::{
    INTENSIVE_ITERATIONS, MODERATE_BATCHES, MODERATE_REPETITIONS, SIMPLE_TASKS, SimulationConfig,
    Tiers,
};
use std::io;
use std::time::Instant;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Outer iterations of the intensive computation
    #[arg(long, default_value_t = INTENSIVE_ITERATIONS)]
    intensive_iterations: u32,
    /// Number of moderate work calls
    #[arg(long, default_value_t = MODERATE_BATCHES)]
    moderate_batches: u32,
    /// Repetitions per moderate work call
    #[arg(long, default_value_t = MODERATE_REPETITIONS)]
    moderate_repetitions: u32,
    /// Number of simple task calls
    #[arg(long, default_value_t = SIMPLE_TASKS)]
    simple_tasks: u32,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            intensive_iterations: self.intensive_iterations,
            moderate_batches: self.moderate_batches,
            moderate_repetitions: self.moderate_repetitions,
            simple_tasks: self.simple_tasks,
        }
    }
}

fn main() -> Result<(), String> {
    env_logger::init();
    let config = Args::parse().config();
    log::debug!("{config:?}");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let start_time = Instant::now();
    profiling_example::run_simulation(&mut out, &mut Tiers, &config)
        .map_err(|e| format!("Unable to write output: {e}"))?;
    let elapsed = start_time.elapsed();

    profiling_example::write_total_time(&mut out, elapsed)
        .map_err(|e| format!("Unable to write output: {e}"))
}
