//! tasklight-check - task document format report
//!
//! Developer-facing entry point: validates the task document against the
//! checklist grammar and prints the violations and progress counts. The
//! report is advisory, so the exit code stays 0 even when violations are
//! found; findings are output, not failure.

mod report;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tasklight_core::validate;
use tasklight_core::Config;

#[derive(Parser)]
#[command(name = "tasklight-check")]
#[command(about = "Validate the task document's checklist format")]
#[command(version)]
struct Args {
    /// Project root (defaults to the current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Task document path, overriding the configured one
    #[arg(long)]
    checklist: Option<PathBuf>,

    /// Output format: text (default) or json
    #[arg(short, long, default_value = "text")]
    format: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let root = match args.root {
        Some(root) => root,
        None => env::current_dir().context("failed to resolve current directory")?,
    };
    let config = Config::load(&root).context("failed to load configuration")?;
    let checklist_path = args
        .checklist
        .unwrap_or_else(|| config.checklist_path(&root));

    let (lines, violations) = report::collect_violations(&checklist_path);
    let progress = validate::progress(&lines);

    if args.format == "json" {
        let payload = serde_json::json!({
            "document": checklist_path,
            "progress": progress,
            "violations": violations,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let mut out = io::stdout().lock();
    writeln!(out, "{}", checklist_path.display())?;
    writeln!(
        out,
        "  progress: {}/{} tasks complete",
        progress.completed, progress.total
    )?;
    if violations.is_empty() {
        writeln!(out, "  format: clean")?;
    } else {
        writeln!(out, "  format violations:")?;
        report::render_violations(&mut out, &violations)?;
    }

    Ok(())
}
