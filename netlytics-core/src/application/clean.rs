// netlytics-core/src/application/clean.rs

use std::fs;
use std::path::{Component, Path};

use tracing::info;

use crate::domain::project::PipelineConfig;
use crate::error::NetlyticsError;

/// Removes the cleaned directory and the pipeline report. Raw inputs are
/// never touched. Returns the relative paths actually removed.
pub fn clean_project(
    project_dir: &Path,
    config: &PipelineConfig,
) -> Result<Vec<String>, NetlyticsError> {
    info!("Removing pipeline outputs");

    let mut removed = Vec::new();
    for target in [&config.cleaned_path, &config.report_path] {
        ensure_inside_project(target)?;
        let full_path = project_dir.join(target);
        if !full_path.exists() {
            continue;
        }
        if full_path.is_dir() {
            fs::remove_dir_all(&full_path)?;
        } else {
            fs::remove_file(&full_path)?;
        }
        info!(path = %full_path.display(), "Artifact removed");
        removed.push(target.clone());
    }
    Ok(removed)
}

/// Relative paths without `..`, and not the project root itself.
fn ensure_inside_project(target: &str) -> Result<(), NetlyticsError> {
    let path = Path::new(target);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    let is_root = path.components().all(|c| matches!(c, Component::CurDir));
    if escapes || is_root {
        return Err(NetlyticsError::UnsafePath(target.to_string()));
    }
    Ok(())
}
