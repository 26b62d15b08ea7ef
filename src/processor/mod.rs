//! Batch processing engine.
//!
//! Orchestrates a processing run: discovering the raw files of each date,
//! normalizing every record, writing per-date availability files and
//! accumulating the location registry, which is persisted once at the end.

pub mod discovery;
pub mod reader;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{
    discovery::FileDiscovery,
    reader::{parse_record, read_raw_file},
    writer::AvailabilityWriter,
};

use crate::config::{MissingIdPolicy, ProcessorConfig};
use crate::error::{ProcessorError, Result};
use crate::identifiers::IdentifierTable;
use crate::models::{DateStats, RunStats};
use crate::normalizer::{NormalizeOutcome, RecordNormalizer};
use crate::registry::LocationRegistry;

use chrono::NaiveDate;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Drives a run over one or more dates
#[derive(Debug)]
pub struct BatchProcessor {
    config: ProcessorConfig,
    ids: IdentifierTable,
    file_discovery: FileDiscovery,
}

impl BatchProcessor {
    /// Create a processor with an already loaded identifier table
    pub fn new(config: ProcessorConfig, ids: IdentifierTable) -> Self {
        let file_discovery = FileDiscovery::new(config.paths.raw_dir.clone());
        Self {
            config,
            ids,
            file_discovery,
        }
    }

    /// Create a processor, loading the identifier table named by the config
    pub fn from_config(config: ProcessorConfig) -> Result<Self> {
        config.paths.validate()?;
        let ids = IdentifierTable::load(&config.paths.ids_file)?;
        Ok(Self::new(config, ids))
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// The registry a run starts from: empty for a clean run, otherwise
    /// whatever was persisted previously
    pub fn initial_registry(&self) -> Result<LocationRegistry> {
        if self.config.clean_run {
            info!("clean_run=true, previously collected locations are not read");
            Ok(LocationRegistry::new())
        } else {
            info!("clean_run=false, keeping previously collected locations");
            LocationRegistry::load(&self.config.paths.locations_file)
        }
    }

    /// Process every date in ascending order, then persist the registry
    pub fn run(&self, dates: &[NaiveDate]) -> Result<RunStats> {
        let start_time = Instant::now();
        let mut dates = dates.to_vec();
        dates.sort();
        dates.dedup();

        println!("{}", "Starting availability processing".bright_green().bold());
        println!(
            "  {} {}",
            "Raw input:".bright_cyan(),
            self.config.paths.raw_dir.display()
        );
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            self.config.paths.output_dir.display()
        );
        info!(
            "Processing dates: [{}]",
            dates
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut registry = self.initial_registry()?;
        let mut stats = RunStats::default();

        for date in &dates {
            let (updated, date_stats) = self.process_date(*date, registry)?;
            registry = updated;
            println!(
                "  {} {} ({} rows from {} files)",
                "Done".bright_green(),
                date.to_string().bright_white().bold(),
                date_stats.rows_written,
                date_stats.files_read
            );
            stats.dates.push(date_stats);
        }

        let locations_path = &self.config.paths.locations_file;
        registry.persist(locations_path)?;

        stats.locations_held = registry.len();
        stats.locations_path = locations_path.clone();
        stats.processing_time_ms = start_time.elapsed().as_millis();

        self.report(&stats);
        Ok(stats)
    }

    /// Process all raw files of one date.
    ///
    /// Takes the registry by value and hands it back updated, together with
    /// the date's statistics. On failure the date's partial output file is
    /// removed and the error is returned.
    pub fn process_date(
        &self,
        date: NaiveDate,
        mut registry: LocationRegistry,
    ) -> Result<(LocationRegistry, DateStats)> {
        info!("Processing {}", date);

        let output_path = self.config.paths.availability_file(date);
        let files = self.file_discovery.files_for_date(date)?;
        if files.is_empty() {
            warn!(
                "No raw files for {} in {}",
                date,
                self.file_discovery.raw_dir().display()
            );
        }

        let mut writer = AvailabilityWriter::open(&output_path)?;
        let mut stats = DateStats {
            date: Some(date),
            output_path: output_path.clone(),
            ..Default::default()
        };

        let progress_bar = if self.config.show_progress {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        for path in &files {
            if let Some(pb) = &progress_bar {
                pb.set_message(format!(
                    "Reading {}",
                    path.file_name().unwrap_or_default().to_string_lossy()
                ));
            }

            let result = self.process_file(path, &mut registry, &mut writer, &mut stats);
            if let Err(e) = result {
                if let Some(pb) = &progress_bar {
                    pb.abandon_with_message("Processing aborted");
                }
                drop(writer);
                discard_partial_output(&output_path);
                return Err(e);
            }

            stats.files_read += 1;
            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
        }

        if let Some(pb) = &progress_bar {
            pb.finish_with_message(format!("{} complete", date));
        }

        stats.rows_written = writer.close()?;
        info!(
            "Wrote {} availability records to {}",
            stats.rows_written,
            output_path.display()
        );

        Ok((registry, stats))
    }

    /// Normalize every record of one raw file into the registry and writer
    fn process_file(
        &self,
        path: &Path,
        registry: &mut LocationRegistry,
        writer: &mut AvailabilityWriter,
        stats: &mut DateStats,
    ) -> Result<()> {
        info!("Reading {}", path.display());
        let normalizer = RecordNormalizer::new(&self.ids);
        let records = read_raw_file(path)?;

        for (index, value) in records.iter().enumerate() {
            stats.records_read += 1;

            let outcome = parse_record(value).and_then(|raw| normalizer.normalize(&raw));
            let outcome = match outcome {
                Ok(outcome) => outcome,
                Err(e) => return Err(record_failure(path, index, value, e)),
            };

            match outcome {
                NormalizeOutcome::Normalized(record) => {
                    registry.upsert(record.internal_id, record.location);
                    writer.append(&record.observation)?;
                }
                NormalizeOutcome::UnresolvedId { composite_id } => {
                    match self.config.missing_id_policy {
                        MissingIdPolicy::Abort => {
                            let e = ProcessorError::UnresolvedIdentifier { composite_id };
                            return Err(record_failure(path, index, value, e));
                        }
                        MissingIdPolicy::Skip => {
                            warn!(
                                "In {} - skipping record {} with unknown id {}",
                                path.display(),
                                index,
                                composite_id
                            );
                            stats.records_skipped += 1;
                        }
                    }
                }
            }
        }

        debug!(
            "Finished {} ({} records)",
            path.display(),
            records.len()
        );
        Ok(())
    }

    /// Print the processing summary
    fn report(&self, stats: &RunStats) {
        println!("\n{}", "Processing Summary".bright_green().bold());
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            stats.processing_time_ms.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Dates processed:".bright_cyan(),
            stats.dates.len().to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Files read:".bright_cyan(),
            stats.total_files().to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Availability rows:".bright_cyan(),
            stats.total_rows().to_string().bright_white().bold()
        );
        if stats.total_skipped() > 0 {
            println!(
                "  {} {}",
                "Records skipped:".bright_red(),
                stats.total_skipped().to_string().bright_red().bold()
            );
        }
        println!(
            "  {} {} ({})",
            "Locations:".bright_cyan(),
            stats.locations_held.to_string().bright_white().bold(),
            stats.locations_path.display()
        );
    }
}

/// Log the offending record in full and wrap the error with its position
fn record_failure(path: &Path, index: usize, value: &Value, e: ProcessorError) -> ProcessorError {
    error!(
        "Failed to process record {} in {}: {}",
        index,
        path.display(),
        e
    );
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    error!("Problem data:\n{}", pretty);
    ProcessorError::record_failed(path, index, e)
}

/// Remove an output file that was only partly written
fn discard_partial_output(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => warn!("Removed incomplete output {}", path.display()),
        Err(e) => warn!(
            "Could not remove incomplete output {}: {}",
            path.display(),
            e
        ),
    }
}
