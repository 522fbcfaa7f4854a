pub mod error;
pub mod governance;
pub mod normalize;
pub mod project;
pub mod sources;
pub mod standardize;
pub mod table;

// Re-exports to keep imports short elsewhere
pub use error::DomainError;
pub use standardize::{SOURCE_TABLE_COLUMN, StandardizeSpec, standardize};
