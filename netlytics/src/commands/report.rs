// netlytics/src/commands/report.rs
//
// USE CASE: Print the last pipeline report.

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use netlytics_core::application::{PipelineSummary, SourceOutcome};
use netlytics_core::domain::governance::QualityReport;
use netlytics_core::infrastructure::config::load_pipeline_config;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let config = load_pipeline_config(&project_dir)?;
    let report_file = config.report_file(&project_dir);
    if !report_file.exists() {
        anyhow::bail!(
            "❌ Report not found at: {}\n👉 Have you run 'netlytics run'?",
            report_file.display()
        );
    }
    let summary = PipelineSummary::load(&report_file)
        .with_context(|| format!("Failed to read report at {:?}", report_file))?;

    println!(
        "\n📊 {} (run {} → {})",
        summary.name,
        summary.started_at.format("%Y-%m-%d %H:%M:%S"),
        summary.finished_at.format("%H:%M:%S")
    );
    println!("{}", render(&summary));
    println!(
        "   {} succeeded, {} skipped, {} failed",
        summary.counts.succeeded, summary.counts.skipped, summary.counts.failed
    );

    if !summary.success() {
        eprintln!("\n❌ The recorded run failed.");
        std::process::exit(1);
    }
    Ok(())
}

pub(crate) fn render(summary: &PipelineSummary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "source",
            "status",
            "rows in",
            "rows out",
            "duplicates",
            "datetime failures",
            "detail",
        ]);
    for outcome in &summary.sources {
        table.add_row(row(outcome));
    }
    table
}

fn row(outcome: &SourceOutcome) -> Vec<String> {
    let metric = |f: fn(&QualityReport) -> usize| {
        outcome
            .report
            .as_ref()
            .map(|r| f(r).to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    let detail = match (&outcome.error, &outcome.output_file) {
        (Some(err), _) => format!("[{}] {}", err.kind, err.message),
        (None, Some(path)) => path.clone(),
        (None, None) => outcome.input_file.clone(),
    };
    vec![
        outcome.source.to_string(),
        outcome.status.to_string(),
        metric(|r| r.rows_in),
        metric(|r| r.rows_out),
        metric(|r| r.duplicates_removed),
        metric(|r| r.datetime_parse_failures),
        detail,
    ]
}
