// netlytics-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum NetlyticsError {
    // --- DOMAIN (schema, standardization rules) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (IO, CSV, config) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- APPLICATION ---
    #[error("Internal Error: {0}")]
    #[diagnostic(code(netlytics::internal))]
    InternalError(String),

    #[error("Unsafe path traversal detected: {0}")]
    #[diagnostic(
        code(netlytics::unsafe_path),
        help("Output paths in netlytics.yaml must stay inside the project directory.")
    )]
    UnsafePath(String),
}

impl From<std::io::Error> for NetlyticsError {
    fn from(err: std::io::Error) -> Self {
        NetlyticsError::Infrastructure(InfrastructureError::Io(err))
    }
}
