// netlytics-core/src/application/pipeline.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use futures::StreamExt;
use tracing::{error, info, instrument, warn};

use crate::application::summary::{FailureKind, PipelineSummary, SourceOutcome, SourceStatus};
use crate::domain::project::PipelineConfig;
use crate::domain::sources::{SourceKind, clean_source};
use crate::error::NetlyticsError;
use crate::infrastructure::fs::save_json;
use crate::ports::{TableReader, TableWriter};

/// Runs every selected source through read → clean → write and persists the
/// summary. A failing source never stops its siblings.
///
/// With `concurrency > 1` sources run on blocking worker threads; the summary
/// keeps registry order either way.
#[instrument(skip_all, fields(project = %project_dir.display()))]
pub async fn run_pipeline(
    project_dir: &Path,
    config: Arc<PipelineConfig>,
    reader: Arc<dyn TableReader>,
    writer: Arc<dyn TableWriter>,
    select: Option<SourceKind>,
) -> Result<PipelineSummary, NetlyticsError> {
    let started_at = Utc::now();
    let sources: Vec<SourceKind> = match select {
        Some(kind) => vec![kind],
        None => SourceKind::ALL.to_vec(),
    };
    info!(
        sources = sources.len(),
        concurrency = config.concurrency,
        skip_missing = config.skip_missing,
        "Starting pipeline"
    );

    let outcomes: Vec<SourceOutcome> = if config.concurrency <= 1 {
        sources
            .into_iter()
            .map(|kind| process_source(project_dir, &config, reader.as_ref(), writer.as_ref(), kind))
            .collect()
    } else {
        let tasks = sources.into_iter().map(|kind| {
            let ctx = WorkerContext {
                project_dir: project_dir.to_path_buf(),
                config: Arc::clone(&config),
                reader: Arc::clone(&reader),
                writer: Arc::clone(&writer),
            };
            async move { ctx.run(kind).await }
        });
        futures::stream::iter(tasks)
            .buffered(config.concurrency)
            .collect()
            .await
    };

    let summary = PipelineSummary::new(
        config.name.clone(),
        started_at,
        config.skip_missing,
        outcomes,
    );

    let report_file = config.report_file(project_dir);
    save_json(&report_file, &summary)?;

    let counts = summary.counts;
    info!(
        succeeded = counts.succeeded,
        skipped = counts.skipped,
        failed = counts.failed,
        success = summary.success(),
        report = %report_file.display(),
        "Pipeline finished"
    );
    Ok(summary)
}

struct WorkerContext {
    project_dir: PathBuf,
    config: Arc<PipelineConfig>,
    reader: Arc<dyn TableReader>,
    writer: Arc<dyn TableWriter>,
}

impl WorkerContext {
    async fn run(self, kind: SourceKind) -> SourceOutcome {
        let input_file = self.config.input_file(kind).to_string();
        let project_dir = self.project_dir.clone();
        let config = Arc::clone(&self.config);
        let writer = Arc::clone(&self.writer);
        tokio::task::spawn_blocking(move || {
            process_source(
                &self.project_dir,
                &self.config,
                self.reader.as_ref(),
                self.writer.as_ref(),
                kind,
            )
        })
        .await
        .unwrap_or_else(|e| {
            error!(source = %kind, error = %e, "Worker task aborted");
            discard_stale_output(&project_dir, &config, writer.as_ref(), kind);
            SourceOutcome::pending(kind, input_file)
                .failed(FailureKind::Internal, format!("worker task aborted: {e}"))
        })
    }
}

/// Runs one source. Anything short of success also removes the previous
/// run's output for that source.
#[instrument(skip(project_dir, config, reader, writer), fields(source = %kind))]
fn process_source(
    project_dir: &Path,
    config: &PipelineConfig,
    reader: &dyn TableReader,
    writer: &dyn TableWriter,
    kind: SourceKind,
) -> SourceOutcome {
    let outcome = clean_one(project_dir, config, reader, writer, kind);
    if outcome.status != SourceStatus::Succeeded {
        discard_stale_output(project_dir, config, writer, kind);
    }
    outcome
}

fn discard_stale_output(
    project_dir: &Path,
    config: &PipelineConfig,
    writer: &dyn TableWriter,
    kind: SourceKind,
) {
    let output = config.output_path(project_dir, kind);
    if let Err(e) = writer.discard(&output) {
        warn!(error = %e, path = %output.display(), "Failed to remove stale output");
    }
}

fn clean_one(
    project_dir: &Path,
    config: &PipelineConfig,
    reader: &dyn TableReader,
    writer: &dyn TableWriter,
    kind: SourceKind,
) -> SourceOutcome {
    let outcome = SourceOutcome::pending(kind, config.input_file(kind));
    let input = config.input_path(project_dir, kind);

    if !input.is_file() {
        if config.skip_missing {
            warn!(path = %input.display(), "Input file missing, skipping");
            return outcome.skipped();
        }
        error!(path = %input.display(), "Input file missing");
        return outcome.failed(
            FailureKind::MissingInput,
            format!("input file not found: {}", input.display()),
        );
    }

    let cleaner = kind.cleaner();
    let raw = match reader.read(&input, cleaner.profile().required) {
        Ok(raw) => raw,
        Err(e) => {
            error!(error = %e, "Failed to read input");
            return outcome.failed(FailureKind::Unreadable, e.to_string());
        }
    };

    let cleaned = match clean_source(cleaner, &raw, config.digest_length) {
        Ok(cleaned) => cleaned,
        Err(e) => {
            let failure = if e.is_schema_drift() {
                FailureKind::SchemaDrift
            } else {
                FailureKind::Internal
            };
            error!(error = %e, kind = %failure, "Cleaning failed");
            return outcome.failed(failure, e.to_string());
        }
    };

    let output = config.output_path(project_dir, kind);
    if let Err(e) = writer.write(&cleaned.table, &output) {
        error!(error = %e, path = %output.display(), "Failed to write output");
        return outcome.failed(FailureKind::WriteFailed, e.to_string());
    }

    let report = &cleaned.report;
    info!(
        rows_in = report.rows_in,
        rows_out = report.rows_out,
        duplicates = report.duplicates_removed,
        datetime_failures = report.datetime_parse_failures,
        "Source cleaned"
    );
    let output_file = Path::new(&config.cleaned_path)
        .join(kind.output_file())
        .display()
        .to_string();
    outcome.succeeded(output_file, cleaned.report)
}
