//! Diagnostic reporting
//!
//! The pipeline stages never print on their own; they report through a
//! [`Reporter`] passed in by the caller. The CLI hands in its `Output`,
//! tests hand in [`Silent`] or a collecting reporter.

/// Sink for per-stage diagnostics
pub trait Reporter {
    /// Reports a recoverable problem (skipped record, failed request)
    fn warn(&self, message: &str);

    /// Reports progress detail, shown only in verbose mode
    fn debug(&self, message: &str);
}

/// Reporter that discards everything
#[derive(Debug, Default)]
pub struct Silent;

impl Reporter for Silent {
    fn warn(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
}
