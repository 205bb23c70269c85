use serde::Serialize;

use crate::config::Config;
use crate::error::{BatchError, FileError, UnsupportedCategoryError};
use crate::pipeline::archive::{self, ArchiveEntry};
use crate::pipeline::decode::Decoder;
use crate::pipeline::persist::{PersistOutcome, Persister};
use crate::pipeline::{classify, dump, identify, normalize, timeseries};
use crate::store::Destination;
use crate::types::sport::SportCategory;
use crate::types::workout::Workout;

/// Result of one file that made it through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub category: SportCategory,
    pub workout: Workout,
    pub rows: usize,
    pub persisted: PersistOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub files: usize,
    pub persisted: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Shared collaborators for every file of a batch.
pub struct Pipeline<'a> {
    pub config: &'a Config,
    pub decoder: &'a dyn Decoder,
    pub persister: Persister<'a>,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        decoder: &'a dyn Decoder,
        destination: &'a dyn Destination,
        selection: &[String],
    ) -> Result<Self, UnsupportedCategoryError> {
        Ok(Self {
            config,
            decoder,
            persister: Persister::new(destination, config, selection)?,
        })
    }

    /// Runs one file end to end: decode, build, classify, normalise,
    /// identify, dump, persist.
    pub fn process_file(&self, entry: &ArchiveEntry) -> Result<FileOutcome, FileError> {
        let bytes = entry.fit_bytes()?;
        let messages = self.decoder.decode(&bytes)?;
        let record_count = messages.records.len();

        let table = timeseries::build(&messages);
        let category = classify::classify(&messages.sports, &table)?;
        let normalized = normalize::normalize(category, &table);
        let workout = identify::identify(&normalized)?;

        if let Some(dir) = &self.config.debug_dump_dir {
            dump::append(dir, &normalized, &workout);
        }

        let persisted = self.persister.persist(&normalized, &workout)?;

        tracing::info!(
            "*** {} with #Records: {} (workout {})",
            category,
            record_count,
            workout.workout_id
        );

        Ok(FileOutcome {
            category,
            workout,
            rows: normalized.rows.len(),
            persisted,
        })
    }

    /// Processes every entry in order. A failing file is logged and skipped.
    pub fn run_batch(&self, entries: &[ArchiveEntry]) -> BatchReport {
        let mut report = BatchReport::default();

        for entry in entries {
            tracing::info!("Parse file: {}", entry.name);
            report.files += 1;

            match self.process_file(entry) {
                Ok(outcome) => {
                    if matches!(outcome.persisted, PersistOutcome::Written { .. }) {
                        report.persisted += 1;
                    }
                }
                Err(FileError::Decode(err)) => {
                    report.failed += 1;
                    tracing::warn!("Parse error in {}: {}", entry.name, err);
                }
                Err(FileError::Persistence(err)) => {
                    report.failed += 1;
                    tracing::warn!("Data of {} not saved: {}", entry.name, err);
                }
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!("Unsupported sport or corrupt data in {}: {}", entry.name, err);
                }
            }
        }

        report
    }
}

/// Unpacks an upload and runs every recording it holds through the pipeline.
/// Only upload-level problems surface as errors.
pub fn ingest(
    config: &Config,
    decoder: &dyn Decoder,
    destination: &dyn Destination,
    selection: &[String],
    filename: &str,
    bytes: Vec<u8>,
) -> Result<BatchReport, BatchError> {
    let pipeline = Pipeline::new(config, decoder, destination, selection)?;
    let entries = archive::unpack(filename, bytes)?;
    Ok(pipeline.run_batch(&entries))
}
