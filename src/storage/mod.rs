//! # Storage Layer
//!
//! File-facing side of Recap CLI: resolved configuration and the patched
//! summary document.
//!
//! ## Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Config | TOML | `~/.config/recap/config.toml` (platform-dependent) |
//! | Summary | Markdown between sentinel comments | the configured README |
//!
//! All document writes are atomic (temp file + rename). Concurrent runs
//! against the same document are not coordinated; the last writer wins.
//!
//! ## Key Types
//!
//! - [`Config`] - Flags > environment > config file > defaults
//! - [`SummaryDocument`] - Read/merge/rewrite the marker-delimited region

mod config;
mod document;

pub use config::{Config, ConfigError, FileConfig, Overrides, DEFAULT_README, DEFAULT_USERNAME};
pub use document::{render_summary, SummaryDocument, END_MARKER, START_MARKER};
