// netlytics/src/commands/run.rs
//
// USE CASE: Clean every export source and write the pipeline report.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use netlytics_core::application::{SourceStatus, run_pipeline};
use netlytics_core::domain::sources::SourceKind;
use netlytics_core::infrastructure::config::load_pipeline_config;
use netlytics_core::infrastructure::{CsvTableReader, CsvTableWriter};

pub async fn execute(
    project_dir: PathBuf,
    skip_missing: bool,
    select: Option<SourceKind>,
    concurrency: Option<usize>,
) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    println!("⚙️  Loading configuration...");
    let mut config = load_pipeline_config(&project_dir).with_context(|| {
        format!(
            "Failed to load pipeline configuration from {:?}",
            project_dir
        )
    })?;
    config.skip_missing |= skip_missing;
    if let Some(n) = concurrency {
        anyhow::ensure!((1..=16).contains(&n), "--concurrency must be between 1 and 16");
        config.concurrency = n;
    }
    tracing::debug!(?config, "Effective configuration");
    println!("   Project: {}", config.name);
    if config.skip_missing {
        println!("   Skip-missing mode: ON");
    }

    let reader = Arc::new(CsvTableReader::from_config(&config));
    let writer = Arc::new(CsvTableWriter);
    let config = Arc::new(config);

    let summary = match run_pipeline(&project_dir, Arc::clone(&config), reader, writer, select).await
    {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR:\n{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    };

    for outcome in &summary.sources {
        match (&outcome.status, &outcome.error) {
            (SourceStatus::Succeeded, _) => println!(
                "   ✅ {:<18} {} rows",
                outcome.source,
                outcome.rows.unwrap_or_default()
            ),
            (SourceStatus::Skipped, _) => {
                println!("   ⏭️  {:<18} skipped ({} absent)", outcome.source, outcome.input_file)
            }
            (_, Some(err)) => eprintln!("   ❌ {:<18} [{}] {}", outcome.source, err.kind, err.message),
            (_, None) => eprintln!("   ❌ {:<18} did not complete", outcome.source),
        }
    }
    println!(
        "   Report: {}",
        config.report_file(&project_dir).display()
    );

    if summary.success() {
        println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
        Ok(())
    } else {
        eprintln!(
            "\n❌ FAILURE. {} source(s) failed.",
            summary.counts.failed
        );
        std::process::exit(1);
    }
}
