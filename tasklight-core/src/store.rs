//! Append-only action log
//!
//! One compact JSON object per line in `<state dir>/actions.jsonl`. The log
//! only ever grows; no record is edited, reordered, or rotated here.
//!
//! # Concurrency
//!
//! Hook processes are short-lived and uncoordinated: overlapping tool
//! invocations may append at the same time. Each record is serialized to a
//! full line first and written with a single `write_all` on a file opened in
//! append mode, so the kernel's atomic-append guarantee keeps lines from
//! interleaving. No ordering is guaranteed between concurrent writers; the
//! `time` field is the only ordering signal consumers may rely on.
//!
//! # Resilience
//!
//! Reads tolerate torn lines: a record left half-written by a killed
//! process is skipped with a warning and the rest of the log still loads.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::action::ActionSummary;
use crate::error::Result;

/// File name of the action log inside the state directory.
pub const ACTIONS_FILE: &str = "actions.jsonl";

/// One persisted tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Name of the tool that ran
    pub tool: String,
    /// What the tool operated on
    pub target: String,
    /// Write time, seconds since the Unix epoch
    pub time: i64,
}

/// Handle on the on-disk action log.
///
/// The directory is an explicit constructor argument rather than a global,
/// so tests can point the log at a temporary location.
#[derive(Debug, Clone)]
pub struct ActionLog {
    dir: PathBuf,
}

impl ActionLog {
    /// Creates a handle for the log inside `dir`. Nothing touches the disk
    /// until the first append.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the log file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(ACTIONS_FILE)
    }

    /// Appends one summarized action, stamping the write time, and returns
    /// the stored record.
    ///
    /// Creates the directory and file on first use. Errors surface to the
    /// caller; the hook binary's fail-open boundary decides what to do with
    /// them.
    pub fn append(&self, summary: &ActionSummary) -> Result<ActionRecord> {
        let record = ActionRecord {
            tool: summary.tool.clone(),
            target: summary.target.clone(),
            time: Utc::now().timestamp(),
        };

        fs::create_dir_all(&self.dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path())?;

        // Single write of the whole line keeps concurrent appends atomic.
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        file.write_all(line.as_bytes())?;

        Ok(record)
    }

    /// Loads every record in append order.
    ///
    /// A missing file reads as an empty log. Lines that do not parse are
    /// skipped with a warning rather than aborting the whole read.
    pub fn read_all(&self) -> Result<Vec<ActionRecord>> {
        let path = self.path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(
                        line = index + 1,
                        error = %e,
                        path = %path.display(),
                        "Skipping malformed action record"
                    );
                }
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tempfile::TempDir;

    fn summary(tool: &str, target: &str) -> ActionSummary {
        ActionSummary {
            tool: tool.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn test_append_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let log = ActionLog::new(dir.path().join("state"));

        log.append(&summary("Edit", "src/main.rs")).unwrap();
        log.append(&summary("Bash", "cargo fmt")).unwrap();

        let records = log.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tool, "Edit");
        assert_eq!(records[0].target, "src/main.rs");
        assert_eq!(records[1].tool, "Bash");
        assert!(records[0].time > 0);
    }

    #[test]
    fn test_append_creates_directory() {
        let dir = TempDir::new().unwrap();
        let log = ActionLog::new(dir.path().join("deep/nested/state"));

        log.append(&summary("Read", "README.md")).unwrap();
        assert!(log.path().exists());
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let dir = TempDir::new().unwrap();
        let log = ActionLog::new(dir.path().join("state"));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_each_append_is_one_line() {
        let dir = TempDir::new().unwrap();
        let log = ActionLog::new(dir.path());

        for i in 0..5 {
            log.append(&summary("Bash", &format!("step {i}"))).unwrap();
        }

        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.lines().count(), 5);
        for line in content.lines() {
            serde_json::from_str::<ActionRecord>(line).unwrap();
        }
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let log = ActionLog::new(dir.path());

        log.append(&summary("Edit", "a.rs")).unwrap();

        // Simulate a torn write from a killed process.
        let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
        file.write_all(b"{\"tool\":\"Bash\",\"tar").unwrap();
        file.write_all(b"\n").unwrap();

        log.append(&summary("Edit", "b.rs")).unwrap();

        let records = log.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].target, "a.rs");
        assert_eq!(records[1].target, "b.rs");
    }

    #[test]
    fn test_concurrent_appends_keep_every_line_parseable() {
        let dir = TempDir::new().unwrap();
        let log = ActionLog::new(dir.path().join("state"));

        let writers = 8;
        let per_writer = 25;

        let handles: Vec<_> = (0..writers)
            .map(|w| {
                let log = log.clone();
                thread::spawn(move || {
                    for i in 0..per_writer {
                        log.append(&summary(&format!("Tool{w}"), &format!("target-{i}")))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let records = log.read_all().unwrap();
        assert_eq!(records.len(), writers * per_writer);

        let content = fs::read_to_string(log.path()).unwrap();
        for line in content.lines() {
            serde_json::from_str::<ActionRecord>(line).unwrap();
        }
    }
}
