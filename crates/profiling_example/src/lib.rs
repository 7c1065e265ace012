
// CPU workloads in three cost tiers for a call-graph profiler.
//
// The tiers are shaped so callgrind (or perf) attributes clearly different
// amounts of time to each:
//
//  + intensive - one call, a long nested loop of sqrt and pow
//  + moderate  - a batch of calls summing sin, cos and log terms
//  + simple    - many calls, a single sqrt each

use std::hint::black_box;
use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

/// Outer iterations of the single intensive call.
pub const INTENSIVE_ITERATIONS: u32 = 200;

/// Number of moderate calls.
pub const MODERATE_BATCHES: u32 = 50;

/// Repetitions passed to each moderate call.
pub const MODERATE_REPETITIONS: u32 = 100;

/// Number of simple calls.
pub const SIMPLE_TASKS: u32 = 1000;

// the moderate base grows by this much per batch
const MODERATE_BASE_STEP: i32 = 10;

// exclusive end of the intensive inner loop, which starts at 1
const INTENSIVE_INNER_END: u32 = 2000;

const MODERATE_LOG_TERMS: u32 = 100;

// short intensive runs are padded with a sleep of this many ms per iteration
const SLEEP_BELOW_ITERATIONS: u32 = 10;
const SLEEP_MS_PER_ITERATION: u64 = 50;

/// Consumes a significant amount of CPU time.
///
/// Sums `trunc(sqrt(j * i) + 1.0001^j)` over `i` in `0..iterations` and `j`
/// in `1..2000`. Fewer than 10 iterations also sleeps for `50 * iterations`
/// ms; the sleep shows up in wall-clock time only and does not change the
/// result.
pub fn intensive_computation(iterations: u32) -> i64 {
    let mut sum: i64 = 0;
    for i in 0..iterations {
        for j in 1..INTENSIVE_INNER_END {
            let j = f64::from(j);
            sum += ((j * f64::from(i)).sqrt() + 1.0001f64.powf(j)) as i64;
        }
    }

    if iterations < SLEEP_BELOW_ITERATIONS {
        thread::sleep(Duration::from_millis(
            SLEEP_MS_PER_ITERATION * u64::from(iterations),
        ));
    }

    sum
}

/// A moderately expensive function called multiple times.
///
/// __Arguments:__
///
/// + `base` - offset for the trigonometric and logarithm arguments
///
/// + `repetitions` - each adds `sin(base + i) * cos(base - i)` and
///   `log(k + base + 1)` for `k` in `0..100`
///
pub fn moderate_work(base: i32, repetitions: u32) -> f64 {
    let base = f64::from(base);
    let mut result = 0.0;

    for i in 0..repetitions {
        let i = f64::from(i);
        result += (base + i).sin() * (base - i).cos();
        for k in 0..MODERATE_LOG_TERMS {
            result += (f64::from(k) + base + 1.0).ln();
        }
    }

    result
}

/// A cheap function, called many times.
pub fn simple_task(id: u32) {
    // keep the sqrt from being optimized out of the profile
    let val = black_box((f64::from(id) + 1.0).sqrt());
    if id % 100 == 0 {
        log::trace!("Simple task {id} processed, result: {val}");
    }
}

/// The three tiers driven by [`run_simulation`].
pub trait Workload {
    fn intensive(&mut self, iterations: u32) -> i64;
    fn moderate(&mut self, base: i32, repetitions: u32) -> f64;
    fn simple(&mut self, id: u32);
}

/// The real workload.
pub struct Tiers;

impl Workload for Tiers {
    fn intensive(&mut self, iterations: u32) -> i64 {
        intensive_computation(iterations)
    }

    fn moderate(&mut self, base: i32, repetitions: u32) -> f64 {
        moderate_work(base, repetitions)
    }

    fn simple(&mut self, id: u32) {
        simple_task(id)
    }
}

/// Call counts and sizes for one simulation run.
///
/// The default reproduces the fixed workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub intensive_iterations: u32,
    pub moderate_batches: u32,
    pub moderate_repetitions: u32,
    pub simple_tasks: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            intensive_iterations: INTENSIVE_ITERATIONS,
            moderate_batches: MODERATE_BATCHES,
            moderate_repetitions: MODERATE_REPETITIONS,
            simple_tasks: SIMPLE_TASKS,
        }
    }
}

/// Base passed to the moderate call of the given batch.
pub fn moderate_base(batch: u32) -> i32 {
    i32::try_from(batch).map_or(i32::MAX, |b| b.saturating_mul(MODERATE_BASE_STEP))
}

/// Runs the intensive tier once, then the moderate batches, then the simple
/// tasks, writing a banner before and after each tier.
pub fn run_simulation(
    out: &mut impl Write,
    workload: &mut impl Workload,
    config: &SimulationConfig,
) -> io::Result<()> {
    writeln!(out, "Starting intensive computation...")?;
    let start = Instant::now();
    let intensive_result = workload.intensive(config.intensive_iterations);
    log::info!("Intensive tier time: {:?}", start.elapsed());
    writeln!(out, "Intensive computation finished. Result: {intensive_result}")?;

    writeln!(out, "Starting moderate work series...")?;
    let start = Instant::now();
    for i in 0..config.moderate_batches {
        let mod_res = workload.moderate(moderate_base(i), config.moderate_repetitions);
        if i % 10 == 0 {
            log::debug!("Moderate work batch {i} result: {mod_res}");
        }
    }
    log::info!("Moderate tier time: {:?}", start.elapsed());
    writeln!(out, "Moderate work finished.")?;

    writeln!(out, "Starting simple tasks...")?;
    let start = Instant::now();
    for i in 0..config.simple_tasks {
        workload.simple(i);
    }
    log::info!("Simple tier time: {:?}", start.elapsed());
    writeln!(out, "Simple tasks finished.")?;

    out.flush()
}

/// Writes the final elapsed-time line in whole milliseconds.
pub fn write_total_time(out: &mut impl Write, elapsed: Duration) -> io::Result<()> {
    writeln!(out, "Total execution time: {} ms", elapsed.as_millis())?;
    out.flush()
}
