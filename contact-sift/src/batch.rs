use crate::inputs::InputFile;
use crate::output::{write_result, WrittenOutputs};
use anyhow::{Context, Result};
use extractors::{ContactAccumulator, NamePolicy, Pipeline, SiftResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub written: Vec<WrittenOutputs>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed + self.failed
    }
}

pub struct BatchRunner {
    pipeline: Pipeline,
    policy: NamePolicy,
    output_dir: PathBuf,
}

impl BatchRunner {
    pub fn new(pipeline: Pipeline, policy: NamePolicy, output_dir: PathBuf) -> Self {
        Self {
            pipeline,
            policy,
            output_dir,
        }
    }

    fn read(input: &InputFile) -> Result<Vec<u8>> {
        tracing::info!("Reading {} file: {}", input.format, input.path.display());
        std::fs::read(&input.path)
            .with_context(|| format!("Failed to read {}", input.path.display()))
    }

    fn log_counts(result: &SiftResult) {
        tracing::info!(
            "Found {} total email(s): {} valid, {} suspicious",
            result.total(),
            result.valid.len(),
            result.suspicious.len()
        );
    }

    /// Processes and writes one document on its own.
    pub fn process_file(&self, input: &InputFile, stem: &str) -> Result<WrittenOutputs> {
        let content = Self::read(input)?;
        let result = self
            .pipeline
            .process(input.format, &content, self.policy)
            .with_context(|| format!("Error processing '{}'", input.path.display()))?;

        if result.is_empty() {
            tracing::info!("No email addresses found in '{}'", input.path.display());
        }
        Self::log_counts(&result);

        write_result(&self.output_dir, stem, &result)
    }

    /// Every document gets its own outputs. `stem_override` renames the
    /// outputs of a single-document run.
    ///
    /// A document whose stem was already claimed by an earlier input fails
    /// instead of overwriting that input's outputs.
    pub fn run_each(&self, inputs: &[InputFile], stem_override: Option<&str>) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let mut claimed: HashMap<String, &Path> = HashMap::new();

        for input in inputs {
            let stem = stem_override
                .map(str::to_string)
                .unwrap_or_else(|| input.stem());

            // Case-insensitive file systems map `Team` and `team` to one file.
            if let Some(first) = claimed.get(&stem.to_lowercase()) {
                summary.failed += 1;
                tracing::error!(
                    "Skipping '{}': its outputs '{}_*.csv' would overwrite those of '{}'",
                    input.path.display(),
                    stem,
                    first.display()
                );
                continue;
            }
            claimed.insert(stem.to_lowercase(), &input.path);

            match self.process_file(input, &stem) {
                Ok(written) => {
                    summary.processed += 1;
                    summary.written.push(written);
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!("{:#}", e);
                }
            }
        }

        summary
    }

    /// All documents feed one accumulator, in input order, and one pair of
    /// outputs named after `stem` is written.
    pub fn run_merged(&self, inputs: &[InputFile], stem: &str) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let mut accumulator = ContactAccumulator::new(self.policy);

        for input in inputs {
            let ingested = Self::read(input).and_then(|content| {
                self.pipeline
                    .ingest(input.format, &content, &mut accumulator)
                    .with_context(|| format!("Error processing '{}'", input.path.display()))
            });

            match ingested {
                Ok(stats) => {
                    summary.processed += 1;
                    tracing::info!(
                        "{}: {} email(s), {} new",
                        input.path.display(),
                        stats.extracted,
                        stats.added
                    );
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!("{:#}", e);
                }
            }
        }

        if summary.processed == 0 {
            return summary;
        }

        let result = self.pipeline.finish(accumulator);
        Self::log_counts(&result);

        match write_result(&self.output_dir, stem, &result) {
            Ok(written) => summary.written.push(written),
            Err(e) => {
                tracing::error!("{:#}", e);
                summary.failed += summary.processed;
                summary.processed = 0;
            }
        }

        summary
    }
}
