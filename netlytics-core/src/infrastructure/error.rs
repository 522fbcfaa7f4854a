// netlytics-core/src/infrastructure/error.rs

use crate::domain::error::DomainError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(netlytics::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CSV ---
    #[error("CSV Error: {0}")]
    #[diagnostic(
        code(netlytics::infra::csv),
        help("Check quoting and delimiters in the file.")
    )]
    Csv(#[from] csv::Error),

    #[error("File '{path}' is unreadable: {malformed} of {total} rows are malformed")]
    #[diagnostic(
        code(netlytics::infra::malformed_file),
        help("Too many rows have the wrong number of fields. Re-export the file from LinkedIn.")
    )]
    MalformedFile {
        path: String,
        malformed: usize,
        total: usize,
    },

    #[error("File '{0}' has no header row")]
    #[diagnostic(code(netlytics::infra::empty_file))]
    EmptyFile(String),

    // --- CONFIG / SERIALIZATION ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(netlytics::infra::yaml),
        help("Check your YAML syntax (indentation, types, key names).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Error: {0}")]
    #[diagnostic(code(netlytics::infra::json))]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(netlytics::infra::config_invalid),
        help("See the allowed ranges in netlytics.yaml.")
    )]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    // --- TABLE CONSTRUCTION ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Table(#[from] DomainError),
}
