use anyhow::Context;
use clap::Parser;
use std::process;
use univaf_processor::BatchProcessor;
use univaf_processor::cli::{Args, setup_logging};

fn main() {
    // Parse command line arguments
    let args = Args::parse();
    setup_logging(&args);

    match run(&args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let dates = args.dates().context("Invalid date selection")?;
    let config = args.to_config().context("Invalid path configuration")?;

    let processor =
        BatchProcessor::from_config(config).context("Failed to prepare processing run")?;
    processor
        .run(&dates)
        .context("Processing aborted; fix the input and rerun the affected dates")?;

    Ok(())
}
