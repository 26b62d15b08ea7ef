//! Command-line interface components.

use crate::config::{MissingIdPolicy, PathConfig, ProcessorConfig};
use crate::error::{ProcessorError, Result};
use crate::processor::discovery::date_range;
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "univaf_processor")]
#[command(about = "Normalize raw vaccine availability scrapes into per-date availability files and a location registry")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// First date to process, YYYY-MM-DD (defaults to yesterday)
    #[arg(short, long, value_name = "DATE")]
    pub start_date: Option<NaiveDate>,

    /// Last date to process, inclusive (defaults to the start date)
    #[arg(short, long, value_name = "DATE")]
    pub end_date: Option<NaiveDate>,

    /// Ignore previously collected locations and start from an empty registry
    #[arg(short, long)]
    pub clean_run: bool,

    /// Directory holding univaf_raw/ and univaf_clean/
    #[arg(long, value_name = "PATH")]
    pub data_root: Option<PathBuf>,

    /// Raw JSON input directory (overrides the data root layout)
    #[arg(long, value_name = "PATH")]
    pub raw_dir: Option<PathBuf>,

    /// Output directory for availability files and the location registry
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Identifier table CSV
    #[arg(long, value_name = "FILE")]
    pub ids_file: Option<PathBuf>,

    /// Skip records whose id is not in the identifier table instead of aborting
    #[arg(long)]
    pub skip_unknown_ids: bool,

    /// Show a progress bar while reading raw files
    #[arg(long)]
    pub progress: bool,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Get the log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// The inclusive list of dates to process
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        let start = match self.start_date {
            Some(date) => date,
            None => Local::now().date_naive().pred_opt().ok_or_else(|| {
                ProcessorError::configuration("Cannot determine yesterday's date")
            })?,
        };
        let end = self.end_date.unwrap_or(start);
        date_range(start, end)
    }

    /// Build the run configuration from the data root and path overrides
    pub fn to_config(&self) -> Result<ProcessorConfig> {
        let root = match &self.data_root {
            Some(root) => root.clone(),
            None => PathConfig::default_root()?,
        };

        let mut config = ProcessorConfig::new(&root);
        if let Some(raw_dir) = &self.raw_dir {
            config = config.with_raw_dir(raw_dir.clone());
        }
        if let Some(output_dir) = &self.output_dir {
            config = config.with_output_dir(output_dir.clone());
        }
        if let Some(ids_file) = &self.ids_file {
            config = config.with_ids_file(ids_file.clone());
        }
        if self.clean_run {
            config = config.with_clean_run();
        }
        if self.skip_unknown_ids {
            config = config.with_missing_id_policy(MissingIdPolicy::Skip);
        }
        if self.progress && !self.quiet {
            config = config.with_progress();
        }

        Ok(config)
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("univaf_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}
