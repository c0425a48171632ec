//! # tasklight-core
//!
//! Core library for tasklight - session telemetry and checklist compliance
//! for AI-assisted development workflows.
//!
//! This library provides:
//! - Canonical action summaries of tool-use hook payloads
//! - An append-only, concurrently-writable action log (JSONL)
//! - Task document parsing into numbered lines
//! - Structural format validation of the task checklist
//! - Configuration and logging infrastructure
//!
//! ## Architecture
//!
//! Two independent pipelines share nothing but the error type:
//!
//! - **Telemetry:** hook payload → [`ActionSummary`] → [`ActionLog::append`].
//!   Downstream consumers read the whole log back with
//!   [`ActionLog::read_all`] and match records against tasks themselves;
//!   that matching is an external concern and is not implemented here.
//! - **Compliance:** task document → [`checklist::read_lines`] →
//!   [`validate::validate`] → ordered [`Violation`]s for a caller to render.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tasklight_core::{ActionLog, ActionSummary, ToolEvent};
//!
//! let payload = r#"{"tool_name":"Edit","tool_input":{"file_path":"src/main.rs"}}"#;
//! let event: ToolEvent = serde_json::from_str(payload).unwrap();
//!
//! let log = ActionLog::new(".tasklight");
//! log.append(&ActionSummary::from_event(&event)).unwrap();
//! ```

// Re-export commonly used items at the crate root
pub use action::{ActionSummary, ToolEvent};
pub use config::Config;
pub use error::{Error, Result};
pub use store::{ActionLog, ActionRecord};
pub use validate::{Progress, Violation};

// Public modules
pub mod action;
pub mod checklist;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod validate;
