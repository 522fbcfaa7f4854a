// netlytics-core/src/application/summary.rs

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::governance::QualityReport;
use crate::domain::sources::SourceKind;
use crate::error::NetlyticsError;
use crate::infrastructure::error::InfrastructureError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Pending,
    Skipped,
    Succeeded,
    Failed,
}

impl std::fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Skipped => "skipped",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Input absent and skip-missing off.
    MissingInput,
    /// Export layout changed: collision or absent required column.
    SchemaDrift,
    /// File present but cannot be decoded as a table.
    Unreadable,
    WriteFailed,
    Internal,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::MissingInput => "missing_input",
            Self::SchemaDrift => "schema_drift",
            Self::Unreadable => "unreadable",
            Self::WriteFailed => "write_failed",
            Self::Internal => "internal",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceError {
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceOutcome {
    pub source: SourceKind,
    pub status: SourceStatus,
    pub input_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SourceError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<QualityReport>,
}

impl SourceOutcome {
    pub fn pending(source: SourceKind, input_file: impl Into<String>) -> Self {
        Self {
            source,
            status: SourceStatus::Pending,
            input_file: input_file.into(),
            output_file: None,
            rows: None,
            columns: None,
            error: None,
            report: None,
        }
    }

    pub fn skipped(mut self) -> Self {
        self.status = SourceStatus::Skipped;
        self
    }

    pub fn failed(mut self, kind: FailureKind, message: impl Into<String>) -> Self {
        self.status = SourceStatus::Failed;
        self.error = Some(SourceError {
            kind,
            message: message.into(),
        });
        self
    }

    pub fn succeeded(mut self, output_file: impl Into<String>, report: QualityReport) -> Self {
        self.status = SourceStatus::Succeeded;
        self.output_file = Some(output_file.into());
        self.rows = Some(report.rows_out);
        self.columns = Some(report.columns);
        self.report = Some(report);
        self
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.error.as_ref().map(|e| e.kind)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub pending: usize,
}

impl StatusCounts {
    fn tally(sources: &[SourceOutcome]) -> Self {
        sources.iter().fold(Self::default(), |mut acc, o| {
            match o.status {
                SourceStatus::Succeeded => acc.succeeded += 1,
                SourceStatus::Skipped => acc.skipped += 1,
                SourceStatus::Failed => acc.failed += 1,
                SourceStatus::Pending => acc.pending += 1,
            }
            acc
        })
    }
}

/// The run's record of truth: one outcome per attempted source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub skip_missing: bool,
    pub success: bool,
    pub counts: StatusCounts,
    pub sources: Vec<SourceOutcome>,
}

impl PipelineSummary {
    pub fn new(
        name: impl Into<String>,
        started_at: DateTime<Utc>,
        skip_missing: bool,
        sources: Vec<SourceOutcome>,
    ) -> Self {
        Self {
            name: name.into(),
            started_at,
            finished_at: Utc::now(),
            skip_missing,
            success: run_succeeded(skip_missing, &sources),
            counts: StatusCounts::tally(&sources),
            sources,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn outcome(&self, source: SourceKind) -> Option<&SourceOutcome> {
        self.sources.iter().find(|o| o.source == source)
    }

    /// Reads a summary written by a previous run.
    pub fn load(path: &Path) -> Result<Self, NetlyticsError> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| NetlyticsError::Infrastructure(InfrastructureError::Json(e)))
    }
}

/// Schema drift always fails the run. Other failures only count when
/// skip-missing is off.
pub fn run_succeeded(skip_missing: bool, sources: &[SourceOutcome]) -> bool {
    !sources.iter().any(|o| match o.status {
        SourceStatus::Failed => !skip_missing || o.failure_kind() == Some(FailureKind::SchemaDrift),
        SourceStatus::Pending => true,
        _ => false,
    })
}
