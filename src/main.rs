//! trace-lens - A terminal inspector for automation execution traces
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use trace_lens::{HeadlessOptions, OutputFormat};
use tracelens_app::config;
use tracelens_core::logging;
use tracelens_core::prelude::*;

/// trace-lens - Inspect recorded automation traces in the terminal
#[derive(Parser, Debug)]
#[command(name = "tracelens")]
#[command(about = "A terminal inspector for automation execution traces", long_about = None)]
struct Args {
    /// Path to a trace JSON file
    #[arg(value_name = "TRACE")]
    trace: Option<PathBuf>,

    /// Print the detail of one task to stdout instead of starting the TUI
    #[arg(long)]
    headless: bool,

    /// Task index (0-based, across all executions)
    #[arg(long, value_name = "N")]
    task: Option<usize>,

    /// Headless output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Mark matched element M as highlighted
    #[arg(long, value_name = "M")]
    highlight: Option<usize>,

    /// Write a default .tracelens/config.toml into the current directory and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init()?;

    if args.init_config {
        let cwd = std::env::current_dir()?;
        config::init_config_dir(&cwd)?;
        eprintln!("Wrote {}", cwd.join(".tracelens/config.toml").display());
        return Ok(());
    }

    let Some(trace_path) = args.trace else {
        eprintln!("No trace file given.");
        eprintln!();
        eprintln!("Usage: tracelens <TRACE> [--headless] [--task N] [--format json|text]");
        std::process::exit(2);
    };

    if !trace_path.exists() {
        let err = Error::trace_not_found(trace_path.clone());
        eprintln!("❌ {}", err);
        std::process::exit(1);
    }

    logging::log_session_start(&trace_path, args.headless);

    if args.headless {
        let options = HeadlessOptions {
            task: args.task,
            format: args.format,
            highlight: args.highlight,
        };
        return trace_lens::run_headless(&trace_path, &options);
    }

    let result = trace_lens::run(&trace_path).await;
    if result.is_err() {
        if let Ok(log_file) = logging::get_current_log_file() {
            eprintln!("Details in {}", log_file.display());
        }
    }
    result
}
