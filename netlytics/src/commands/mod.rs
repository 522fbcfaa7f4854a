// netlytics/src/commands/mod.rs

pub mod clean;
pub mod report;
pub mod run;
