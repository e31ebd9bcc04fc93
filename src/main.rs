//! Coalescer CLI: teach the people dir, then sort the pictures dir.

use anyhow::Result;
use clap::Parser;
use coalescer::engine::Cli;
use coalescer::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
