//! Structural rules for the task document
//!
//! The task document follows a strict line-level grammar so a later step can
//! count completed vs. total tasks by pattern matching alone:
//!
//! ```text
//! - [ ] 1.2 **Implement the widget**
//! - [x] 1.1 **Design the widget**
//! ```
//!
//! Three rules are checked independently on every line; a single line can
//! trigger more than one violation. Violations are reported in line order
//! and never auto-corrected. Line number 0 is reserved for document-level
//! problems such as a missing file.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::checklist::ChecklistLine;
use crate::error::Error;

/// Rule text for tasks written as document headings.
pub const RULE_HEADING_TASK: &str =
    "tasks must be checklist items (`- [ ] <id> **<description>**`), not headings";

/// Rule text for malformed completed markers.
pub const RULE_CHECKED_MARKER: &str = "completed markers must be exactly `- [x]`, with no interior space";

/// Rule text for unbolded task descriptions.
pub const RULE_BOLD_DESCRIPTION: &str = "incomplete task descriptions must be wrapped in `**`";

/// Rule text for document-level failures.
pub const RULE_DOCUMENT_READABLE: &str = "the task document must exist and be readable";

/// A task expressed as a heading: heading marker, purely numeric dotted id,
/// bold title. Letter-suffixed sub-ids ("1.2.A") intentionally do not match.
static HEADING_TASK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s+\d+(?:\.\d+)+\s+\*\*").unwrap());

/// A completed checkbox with a stray space before the closing bracket.
static CHECKED_MARKER_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^- \[x\s+\]").unwrap());

/// An incomplete item whose description does not open with bold emphasis.
static UNBOLDED_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- \[ \] \d+(?:\.\d+)*(?:\.[A-Za-z]+)? [^*]").unwrap());

/// A well-formed completed item.
static COMPLETED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^- \[x\] ").unwrap());

/// A well-formed (or at least openable) incomplete item.
static INCOMPLETE_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^- \[ \] ").unwrap());

/// One broken rule at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// 1-based line number; 0 for document-level problems
    pub line: usize,
    /// Human-readable description of what is wrong on this line
    pub issue: String,
    /// The rule that was broken
    pub rule: &'static str,
}

/// Completed/total task counts, derived purely by pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Items matching the completed grammar
    pub completed: usize,
    /// Completed plus incomplete items
    pub total: usize,
}

/// Applies every rule to every line. Pure; the same document always yields
/// the same violation sequence.
pub fn validate(lines: &[ChecklistLine]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for line in lines {
        if HEADING_TASK.is_match(&line.text) {
            violations.push(Violation {
                line: line.number,
                issue: format!("task written as a heading: `{}`", line.text.trim()),
                rule: RULE_HEADING_TASK,
            });
        }
        if CHECKED_MARKER_SPACE.is_match(&line.text) {
            violations.push(Violation {
                line: line.number,
                issue: "completed marker contains a stray space before `]`".to_string(),
                rule: RULE_CHECKED_MARKER,
            });
        }
        if UNBOLDED_DESCRIPTION.is_match(&line.text) {
            violations.push(Violation {
                line: line.number,
                issue: format!("task description is not bold: `{}`", line.text.trim()),
                rule: RULE_BOLD_DESCRIPTION,
            });
        }
    }

    violations
}

/// Maps a document read failure to a single line-0 violation carrying the
/// attempted path, so a validation run still completes and reports.
pub fn document_violation(error: &Error) -> Violation {
    Violation {
        line: 0,
        issue: error.to_string(),
        rule: RULE_DOCUMENT_READABLE,
    }
}

/// Counts completed and total tasks by marker pattern alone.
pub fn progress(lines: &[ChecklistLine]) -> Progress {
    let completed = lines
        .iter()
        .filter(|l| COMPLETED_ITEM.is_match(&l.text))
        .count();
    let incomplete = lines
        .iter()
        .filter(|l| INCOMPLETE_ITEM.is_match(&l.text))
        .count();
    Progress {
        completed,
        total: completed + incomplete,
    }
}

/// First incomplete item in document order, if any.
pub fn next_task(lines: &[ChecklistLine]) -> Option<&ChecklistLine> {
    lines.iter().find(|l| INCOMPLETE_ITEM.is_match(&l.text))
}
