// netlytics/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use netlytics_core::domain::sources::SourceKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "netlytics")]
#[command(about = "Cleans and anonymizes LinkedIn data exports", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Cleans every export source and writes the pipeline report
    Run {
        /// Project directory (holds netlytics.yaml and data/raw)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Tolerate absent input files (marked as skipped)
        #[arg(long)]
        skip_missing: bool,

        /// Run only one source (ex: "messages", "guide-messages")
        #[arg(long, short)]
        select: Option<SourceKind>,

        /// Sources processed in parallel (overrides netlytics.yaml)
        #[arg(long, short = 'j')]
        concurrency: Option<usize>,
    },

    /// 🧹 Removes cleaned files and the pipeline report
    Clean {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 📊 Prints the last pipeline report
    Report {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}
