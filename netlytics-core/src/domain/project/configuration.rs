// src/domain/project/configuration.rs

use crate::domain::sources::SourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Clone, Validate, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default = "default_name")]
    pub name: String,

    /// Directory holding the LinkedIn export CSVs.
    #[serde(default = "default_raw_path")]
    #[validate(length(min = 1, message = "raw-path cannot be empty"))]
    pub raw_path: String,

    #[serde(default = "default_cleaned_path")]
    #[validate(length(min = 1, message = "cleaned-path cannot be empty"))]
    pub cleaned_path: String,

    #[serde(default = "default_report_path")]
    #[validate(length(min = 1, message = "report-path cannot be empty"))]
    pub report_path: String,

    /// Hex characters kept from each SHA-256 digest.
    #[serde(default = "default_digest_length")]
    #[validate(range(min = 4, max = 64))]
    pub digest_length: usize,

    #[serde(default)]
    pub skip_missing: bool,

    /// Sources processed at once. 1 keeps the run strictly sequential.
    #[serde(default = "default_concurrency")]
    #[validate(range(min = 1, max = 16))]
    pub concurrency: usize,

    /// Share of malformed rows above which a whole file is rejected.
    #[serde(default = "default_malformed_row_threshold")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub malformed_row_threshold: f64,

    /// Leading records searched for the header row (LinkedIn prepends notes).
    #[serde(default = "default_preamble_scan_lines")]
    #[validate(range(min = 1, max = 100))]
    pub preamble_scan_lines: usize,

    /// Per-source input file names, overriding the export defaults.
    #[serde(default)]
    pub inputs: BTreeMap<SourceKind, String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            raw_path: default_raw_path(),
            cleaned_path: default_cleaned_path(),
            report_path: default_report_path(),
            digest_length: default_digest_length(),
            skip_missing: false,
            concurrency: default_concurrency(),
            malformed_row_threshold: default_malformed_row_threshold(),
            preamble_scan_lines: default_preamble_scan_lines(),
            inputs: BTreeMap::new(),
        }
    }
}

impl PipelineConfig {
    pub fn input_file(&self, kind: SourceKind) -> &str {
        self.inputs
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_input_file())
    }

    pub fn input_path(&self, project_dir: &Path, kind: SourceKind) -> PathBuf {
        project_dir.join(&self.raw_path).join(self.input_file(kind))
    }

    pub fn output_path(&self, project_dir: &Path, kind: SourceKind) -> PathBuf {
        project_dir.join(&self.cleaned_path).join(kind.output_file())
    }

    pub fn report_file(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.report_path)
    }
}

fn default_name() -> String {
    "linkedin-networking".to_string()
}
fn default_raw_path() -> String {
    "data/raw".to_string()
}
fn default_cleaned_path() -> String {
    "data/cleaned".to_string()
}
fn default_report_path() -> String {
    "outputs/pipeline_report.json".to_string()
}
fn default_digest_length() -> usize {
    8
}
fn default_concurrency() -> usize {
    1
}
fn default_malformed_row_threshold() -> f64 {
    0.5
}
fn default_preamble_scan_lines() -> usize {
    10
}
