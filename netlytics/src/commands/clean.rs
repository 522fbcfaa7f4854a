// netlytics/src/commands/clean.rs
//
// USE CASE: Remove pipeline outputs.

use std::path::PathBuf;

use netlytics_core::application::clean_project;
use netlytics_core::infrastructure::config::load_pipeline_config;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let result = load_pipeline_config(&project_dir)
        .map_err(Into::into)
        .and_then(|config| clean_project(&project_dir, &config));

    match result {
        Ok(removed) if removed.is_empty() => println!("🧹 Nothing to clean."),
        Ok(removed) => {
            for path in removed {
                println!("   🗑️  Artifact removed: {}", path);
            }
        }
        Err(e) => {
            eprintln!("❌ Clean failed:\n{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    }
    Ok(())
}
