//! Canonical action summaries from tool-use hook payloads
//!
//! The host runtime hands every tool invocation to the post-tool-use hook as
//! a JSON payload whose `tool_input` shape varies by tool. [`ActionSummary`]
//! reduces that payload to a fixed two-field record (tool name + one
//! descriptive target string) so the action log stays small and uniform as a
//! session grows. The reduction is deliberately lossy.
//!
//! Target extraction walks a fixed priority order, most structured signal
//! first:
//!
//! 1. `file_path` (Edit, Write, Read, NotebookEdit)
//! 2. `command` (Bash), truncated past 100 characters
//! 3. `query` (WebSearch)
//! 4. `url` (WebFetch)
//! 5. `pattern` plus optional `path` (Grep, Glob)
//! 6. `todos` (TodoWrite), rendered as an item count
//! 7. `prompt` (Task), truncated past 50 characters
//!
//! Summarization is total: malformed or missing fields degrade to the
//! `"Unknown"` / `"N/A"` sentinels, never to an error.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

/// Sentinel tool name when the payload carries none.
pub const UNKNOWN_TOOL: &str = "Unknown";

/// Sentinel target when no recognized field is present.
pub const NO_TARGET: &str = "N/A";

/// Commands longer than this are truncated.
const MAX_COMMAND_LEN: usize = 100;

/// Prompts longer than this are truncated.
const MAX_PROMPT_LEN: usize = 50;

const ELLIPSIS: &str = "...";

/// A tool-use hook payload as delivered on stdin.
///
/// Uses `#[serde(default)]` liberally so partial payloads deserialize
/// instead of failing; every consumer copes with absent fields.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ToolEvent {
    /// Session the invocation belongs to
    pub session_id: Option<String>,
    /// Path to the session transcript, if the runtime provides one
    pub transcript_path: Option<String>,
    /// Working directory of the observed session
    pub cwd: Option<PathBuf>,
    /// Lifecycle event name (e.g. "PostToolUse")
    pub hook_event_name: Option<String>,
    /// Name of the invoked tool
    pub tool_name: Option<String>,
    /// Tool arguments; shape varies by tool
    pub tool_input: Option<Value>,
}

/// The canonical, lossy reduction of one tool invocation.
///
/// [`crate::store::ActionLog::append`] stamps the write time and persists
/// the summary as an [`crate::store::ActionRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSummary {
    /// Name of the tool that ran
    pub tool: String,
    /// What the tool operated on: a path, command, query, url, pattern,
    /// todo count, or prompt excerpt
    pub target: String,
}

impl ActionSummary {
    /// Summarizes a hook payload. Never fails.
    pub fn from_event(event: &ToolEvent) -> Self {
        let tool = event
            .tool_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_TOOL.to_string());

        let target = event
            .tool_input
            .as_ref()
            .and_then(extract_target)
            .unwrap_or_else(|| NO_TARGET.to_string());

        Self { tool, target }
    }
}

/// Picks the most meaningful target field, first match wins.
///
/// A recognized key holding an unexpected type is treated as absent and the
/// walk continues down the priority order.
fn extract_target(input: &Value) -> Option<String> {
    let input = input.as_object()?;

    if let Some(path) = str_field(input, "file_path") {
        return Some(path.to_string());
    }
    if let Some(command) = str_field(input, "command") {
        return Some(truncate(command, MAX_COMMAND_LEN));
    }
    if let Some(query) = str_field(input, "query") {
        return Some(query.to_string());
    }
    if let Some(url) = str_field(input, "url") {
        return Some(url.to_string());
    }
    if let Some(pattern) = str_field(input, "pattern") {
        return Some(match str_field(input, "path").filter(|p| !p.is_empty()) {
            Some(path) => format!("{pattern} in {path}"),
            None => pattern.to_string(),
        });
    }
    if let Some(todos) = input.get("todos").and_then(Value::as_array) {
        return Some(format!("todo-update ({} items)", todos.len()));
    }
    if let Some(prompt) = str_field(input, "prompt") {
        return Some(truncate(prompt, MAX_PROMPT_LEN));
    }

    None
}

fn str_field<'a>(input: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a str> {
    input.get(key).and_then(Value::as_str)
}

/// Truncates to exactly `max` characters, the last three being `...`.
/// Counts characters, not bytes, so multi-byte text never splits mid-char.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max - ELLIPSIS.chars().count()).collect();
    format!("{kept}{ELLIPSIS}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(tool_name: Option<&str>, tool_input: Option<Value>) -> ToolEvent {
        ToolEvent {
            tool_name: tool_name.map(String::from),
            tool_input,
            ..ToolEvent::default()
        }
    }

    #[test]
    fn test_missing_everything_yields_sentinels() {
        let summary = ActionSummary::from_event(&ToolEvent::default());
        assert_eq!(summary.tool, "Unknown");
        assert_eq!(summary.target, "N/A");
    }

    #[test]
    fn test_unrecognized_input_yields_sentinel_target() {
        let summary = ActionSummary::from_event(&event(
            Some("Mystery"),
            Some(json!({"something_else": true})),
        ));
        assert_eq!(summary.tool, "Mystery");
        assert_eq!(summary.target, "N/A");
    }

    #[test]
    fn test_file_path_wins_over_everything() {
        let summary = ActionSummary::from_event(&event(
            Some("Edit"),
            Some(json!({
                "file_path": "src/main.rs",
                "command": "cargo build",
                "prompt": "do things"
            })),
        ));
        assert_eq!(summary.target, "src/main.rs");
    }

    #[test]
    fn test_short_command_kept_verbatim() {
        let cmd = "x".repeat(100);
        let summary =
            ActionSummary::from_event(&event(Some("Bash"), Some(json!({"command": cmd}))));
        assert_eq!(summary.target, cmd);
    }

    #[test]
    fn test_long_command_truncated_to_exactly_100() {
        let cmd = "x".repeat(101);
        let summary =
            ActionSummary::from_event(&event(Some("Bash"), Some(json!({"command": cmd}))));
        assert_eq!(summary.target.chars().count(), 100);
        assert!(summary.target.ends_with("..."));
        assert!(summary.target.starts_with(&"x".repeat(97)));
    }

    #[test]
    fn test_long_prompt_truncated_to_exactly_50() {
        let prompt = "p".repeat(51);
        let summary =
            ActionSummary::from_event(&event(Some("Task"), Some(json!({"prompt": prompt}))));
        assert_eq!(summary.target.chars().count(), 50);
        assert!(summary.target.ends_with("..."));
    }

    #[test]
    fn test_short_prompt_kept_verbatim() {
        let summary = ActionSummary::from_event(&event(
            Some("Task"),
            Some(json!({"prompt": "summarize the repo"})),
        ));
        assert_eq!(summary.target, "summarize the repo");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 101 two-byte characters; a byte-indexed slice would panic.
        let cmd = "é".repeat(101);
        let summary =
            ActionSummary::from_event(&event(Some("Bash"), Some(json!({"command": cmd}))));
        assert_eq!(summary.target.chars().count(), 100);
        assert!(summary.target.ends_with("..."));
    }

    #[test]
    fn test_pattern_with_path_renders_scope() {
        let summary = ActionSummary::from_event(&event(
            Some("Grep"),
            Some(json!({"pattern": "fn main", "path": "src/"})),
        ));
        assert_eq!(summary.target, "fn main in src/");
    }

    #[test]
    fn test_pattern_without_path_stands_alone() {
        let summary =
            ActionSummary::from_event(&event(Some("Glob"), Some(json!({"pattern": "**/*.rs"}))));
        assert_eq!(summary.target, "**/*.rs");
    }

    #[test]
    fn test_pattern_with_empty_path_stands_alone() {
        let summary = ActionSummary::from_event(&event(
            Some("Grep"),
            Some(json!({"pattern": "TODO", "path": ""})),
        ));
        assert_eq!(summary.target, "TODO");
    }

    #[test]
    fn test_todos_render_as_count() {
        let summary = ActionSummary::from_event(&event(
            Some("TodoWrite"),
            Some(json!({"todos": [{"content": "a"}, {"content": "b"}, {"content": "c"}]})),
        ));
        assert_eq!(summary.target, "todo-update (3 items)");
    }

    #[test]
    fn test_non_string_field_falls_through() {
        // file_path is present but not a string, so command should win.
        let summary = ActionSummary::from_event(&event(
            Some("Bash"),
            Some(json!({"file_path": 42, "command": "ls"})),
        ));
        assert_eq!(summary.target, "ls");
    }

    #[test]
    fn test_partial_payload_deserializes() {
        let event: ToolEvent = serde_json::from_str(r#"{"tool_name": "Read"}"#).unwrap();
        let summary = ActionSummary::from_event(&event);
        assert_eq!(summary.tool, "Read");
        assert_eq!(summary.target, "N/A");
    }
}
