//! Violation collection and rendering shared by the hook and check binaries.

use std::io::{self, Write};
use std::path::Path;

use tasklight_core::checklist::{self, ChecklistLine};
use tasklight_core::validate::{self, Violation};

/// Validates the task document at `path`.
///
/// A read failure is not an error here: it comes back as a single
/// document-level violation alongside an empty line list, so callers always
/// have something to report.
pub fn collect_violations(path: &Path) -> (Vec<ChecklistLine>, Vec<Violation>) {
    match checklist::read_lines(path) {
        Ok(lines) => {
            let violations = validate::validate(&lines);
            (lines, violations)
        }
        Err(error) => (Vec::new(), vec![validate::document_violation(&error)]),
    }
}

/// Renders violations as indented diagnostic lines.
pub fn render_violations(out: &mut impl Write, violations: &[Violation]) -> io::Result<()> {
    for violation in violations {
        if violation.line == 0 {
            writeln!(out, "  document: {} ({})", violation.issue, violation.rule)?;
        } else {
            writeln!(
                out,
                "  line {}: {} ({})",
                violation.line, violation.issue, violation.rule
            )?;
        }
    }
    Ok(())
}
