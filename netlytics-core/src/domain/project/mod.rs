// netlytics-core/src/domain/project/mod.rs

pub mod configuration;
pub use configuration::PipelineConfig;
