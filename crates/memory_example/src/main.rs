// CLI for the memory checker demonstration.
//
// Inspect with:
//  valgrind --leak-check=full --track-origins=yes ./target/debug/memory_example

use clap::Parser;
use std::io;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {}

fn main() -> Result<(), String> {
    env_logger::init();
    let _args = Args::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    memory_example::run(&mut out).map_err(|e| format!("Unable to write output: {e}"))
}
