//! tasklight-hook - lifecycle hook entry points
//!
//! Invoked by the host agent runtime at session boundaries and after every
//! tool use, with the hook payload as JSON on stdin. Depending on the
//! lifecycle point this either appends to the action log or prints a
//! checklist report to stderr (the stream the host surfaces to the agent).
//!
//! Instrumentation must never block the action it observes: whatever goes
//! wrong inside a hook, the process logs it and still exits 0. That
//! fail-open boundary lives here in `main` and nowhere else; the library
//! underneath returns ordinary typed errors.

mod report;

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tasklight_core::validate;
use tasklight_core::{ActionLog, ActionSummary, Config, ToolEvent};

#[derive(Parser)]
#[command(name = "tasklight-hook")]
#[command(about = "Lifecycle hooks for session telemetry and checklist compliance")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record the tool invocation described on stdin
    PostToolUse,
    /// Report checklist progress and the next task at session start
    SessionStart,
    /// Hand off recorded actions before context compaction
    PreCompact,
    /// Verify task document format before the session ends
    SessionEnd,
}

fn main() {
    // Even a usage error must not fail the host; print it and exit clean.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return;
        }
    };

    if let Err(e) = run(&args.command) {
        tracing::error!(error = %e, "hook failed");
    }
}

fn run(command: &Command) -> Result<()> {
    let payload: serde_json::Value =
        serde_json::from_reader(io::stdin().lock()).context("failed to read hook payload")?;

    // Only recording cares about the payload's shape. The session reports
    // use it solely to locate the project, so an unexpected shape falls
    // back to defaults and the report still prints.
    let event: ToolEvent = match command {
        Command::PostToolUse => {
            serde_json::from_value(payload).context("unexpected tool payload shape")?
        }
        _ => serde_json::from_value(payload).unwrap_or_default(),
    };

    let root = project_root(&event)?;
    let config = Config::load(&root).context("failed to load configuration")?;

    // Diagnostics are best-effort; a hook without a log file still works.
    let _log_guard =
        tasklight_core::logging::init(&config.logging, &Config::log_dir(&root)).ok();

    match command {
        Command::PostToolUse => post_tool_use(&event, &root),
        Command::SessionStart => session_start(&config, &root),
        Command::PreCompact => pre_compact(&config, &root),
        Command::SessionEnd => session_end(&config, &root),
    }
}

/// The observed session's working directory, falling back to our own.
fn project_root(event: &ToolEvent) -> Result<PathBuf> {
    match &event.cwd {
        Some(cwd) => Ok(cwd.clone()),
        None => env::current_dir().context("failed to resolve current directory"),
    }
}

fn post_tool_use(event: &ToolEvent, root: &Path) -> Result<()> {
    let log = ActionLog::new(Config::actions_dir(root));
    let summary = ActionSummary::from_event(event);
    let record = log.append(&summary)?;

    tracing::debug!(
        tool = %record.tool,
        target = %record.target,
        session = event.session_id.as_deref().unwrap_or("unknown"),
        "Recorded action"
    );
    Ok(())
}

fn session_start(config: &Config, root: &Path) -> Result<()> {
    let checklist_path = config.checklist_path(root);
    let (lines, violations) = report::collect_violations(&checklist_path);
    let progress = validate::progress(&lines);

    let mut err = io::stderr().lock();
    writeln!(err, "tasklight session start")?;
    writeln!(
        err,
        "  progress: {}/{} tasks complete",
        progress.completed, progress.total
    )?;
    if let Some(next) = validate::next_task(&lines) {
        writeln!(err, "  next: line {}: {}", next.number, next.text.trim())?;
    }
    if !violations.is_empty() {
        writeln!(err, "  format violations: {}", violations.len())?;
    }
    Ok(())
}

/// Surfaces what the external task-matching process needs: where the
/// recorded actions and the task document live. The matching itself is not
/// our job.
fn pre_compact(config: &Config, root: &Path) -> Result<()> {
    let log = ActionLog::new(Config::actions_dir(root));
    let actions = log.read_all()?;

    let mut err = io::stderr().lock();
    writeln!(err, "tasklight pre-compact")?;
    writeln!(err, "  recorded actions: {}", actions.len())?;
    writeln!(err, "  action log: {}", log.path().display())?;
    writeln!(
        err,
        "  task document: {}",
        config.checklist_path(root).display()
    )?;
    Ok(())
}

fn session_end(config: &Config, root: &Path) -> Result<()> {
    let checklist_path = config.checklist_path(root);
    let (lines, violations) = report::collect_violations(&checklist_path);
    let progress = validate::progress(&lines);

    let mut err = io::stderr().lock();
    writeln!(err, "tasklight session end")?;
    writeln!(
        err,
        "  progress: {}/{} tasks complete",
        progress.completed, progress.total
    )?;
    if violations.is_empty() {
        writeln!(err, "  format: clean")?;
    } else {
        writeln!(err, "  format violations:")?;
        report::render_violations(&mut err, &violations)?;
    }
    Ok(())
}
