//! Summary document patching
//!
//! The target document (usually a profile `README.md`) is opaque text
//! except for one region bounded by the start and end markers. That region
//! is owned by recap and rewritten wholesale on every run; everything
//! outside it is preserved byte for byte.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::Summary;
use crate::report::Reporter;

/// Opening sentinel of the managed region
pub const START_MARKER: &str = "<!-- GITHUB_SUMMARY_START -->";

/// Closing sentinel of the managed region
pub const END_MARKER: &str = "<!-- GITHUB_SUMMARY_END -->";

/// Renders a summary as the markdown lines placed between the markers
///
/// Line order is fixed: totals, repo count, heading, then one bullet per
/// repository in lexicographic order. An empty set renders a placeholder
/// bullet instead.
pub fn render_summary(summary: &Summary) -> String {
    let mut lines = vec![
        format!("**Total public events this year:** {}", summary.total_events),
        format!("**Repositories contributed to:** {}", summary.unique_repos),
        "## Repositories:".to_string(),
    ];

    if summary.repos.is_empty() {
        lines.push("- No repositories found".to_string());
    } else {
        lines.extend(summary.repos.iter().map(|repo| format!("- {repo}")));
    }

    lines.join("\n")
}

/// The document holding the marker-delimited summary region
pub struct SummaryDocument {
    /// Path of the document to patch
    path: PathBuf,

    start_marker: String,
    end_marker: String,
}

impl SummaryDocument {
    /// Creates a document with the default markers
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_markers(path, START_MARKER, END_MARKER)
    }

    /// Creates a document with custom markers
    pub fn with_markers(path: impl Into<PathBuf>, start: &str, end: &str) -> Self {
        Self {
            path: path.into(),
            start_marker: start.to_string(),
            end_marker: end.to_string(),
        }
    }

    /// Returns the document path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renders the marker-wrapped block for a summary
    pub fn render_block(&self, summary: &Summary) -> String {
        format!(
            "{}\n{}\n{}",
            self.start_marker,
            render_summary(summary),
            self.end_marker
        )
    }

    /// Merges the summary into the document and rewrites it in place
    ///
    /// An unreadable document degrades to empty content; a failed write is
    /// fatal and propagates.
    pub fn apply(&self, summary: &Summary, reporter: &dyn Reporter) -> Result<()> {
        let content = self.read_current(reporter);
        let merged = self.merge(&content, summary);
        self.write_content(&merged)
    }

    /// Reads the current document, degrading to empty on any read failure
    fn read_current(&self, reporter: &dyn Reporter) -> String {
        match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                reporter.debug(&format!(
                    "{} does not exist yet, starting from empty content",
                    self.path.display()
                ));
                String::new()
            }
            Err(err) => {
                reporter.warn(&format!(
                    "could not read {} ({err}); treating it as empty",
                    self.path.display()
                ));
                String::new()
            }
        }
    }

    /// Replaces the first marker span, or appends a fresh block
    ///
    /// Replacement needs both markers, verbatim and in order. Anything
    /// else (no markers, end before start, unclosed start) appends.
    fn merge(&self, content: &str, summary: &Summary) -> String {
        let block = self.render_block(summary);

        if let Some(start_idx) = content.find(&self.start_marker) {
            let after_start = start_idx + self.start_marker.len();
            if let Some(end_rel) = content[after_start..].find(&self.end_marker) {
                let end_idx = after_start + end_rel + self.end_marker.len();
                return format!("{}{}{}", &content[..start_idx], block, &content[end_idx..]);
            }
        }

        format!("{content}\n\n{block}")
    }

    /// Writes the document atomically (temp file + rename)
    fn write_content(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        let mut temp_path = self.path.as_os_str().to_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::summarize;
    use crate::report::test_support::Recording;
    use crate::report::Silent;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn summary_of(repos: &[&str]) -> Summary {
        Summary {
            total_events: repos.len(),
            unique_repos: repos.iter().collect::<BTreeSet<_>>().len(),
            repos: repos.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn renders_fixed_line_order() {
        let rendered = render_summary(&summary_of(&["zeta/z", "alpha/a"]));

        assert_eq!(
            rendered,
            "**Total public events this year:** 2\n\
             **Repositories contributed to:** 2\n\
             ## Repositories:\n\
             - alpha/a\n\
             - zeta/z"
        );
    }

    #[test]
    fn empty_summary_renders_placeholder() {
        let rendered = render_summary(&summarize(&[], &Silent));

        assert!(rendered.contains("**Total public events this year:** 0"));
        assert!(rendered.ends_with("- No repositories found"));
    }

    #[test]
    fn apply_creates_missing_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        let doc = SummaryDocument::new(&path);

        doc.apply(&summary_of(&["a/b"]), &Silent).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, format!("\n\n{}", doc.render_block(&summary_of(&["a/b"]))));
    }

    #[test]
    fn apply_appends_when_markers_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "# Hello\n\nSome intro.\n").unwrap();
        let doc = SummaryDocument::new(&path);

        doc.apply(&summary_of(&["a/b"]), &Silent).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Hello\n\nSome intro.\n\n\n"));
        assert_eq!(written.matches(START_MARKER).count(), 1);
        assert_eq!(written.matches(END_MARKER).count(), 1);
    }

    #[test]
    fn apply_replaces_existing_region_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        let before = format!(
            "# Profile\n\n{START_MARKER}\nstale lines\nmore stale\n{END_MARKER}\n\n## Contact\n"
        );
        fs::write(&path, &before).unwrap();
        let doc = SummaryDocument::new(&path);

        doc.apply(&summary_of(&["a/b"]), &Silent).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Profile\n\n"));
        assert!(written.ends_with("\n\n## Contact\n"));
        assert!(!written.contains("stale"));
        assert!(written.contains("- a/b"));
    }

    #[test]
    fn apply_twice_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "intro\n").unwrap();
        let doc = SummaryDocument::new(&path);
        let summary = summary_of(&["a/b", "c/d"]);

        doc.apply(&summary, &Silent).unwrap();
        let first = fs::read_to_string(&path).unwrap();

        doc.apply(&summary, &Silent).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn out_of_order_markers_fall_back_to_append() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        let before = format!("{END_MARKER}\ntext\n{START_MARKER}\n");
        fs::write(&path, &before).unwrap();
        let doc = SummaryDocument::new(&path);

        doc.apply(&summary_of(&[]), &Silent).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(&before));
        assert_eq!(written.matches(START_MARKER).count(), 2);
    }

    #[test]
    fn only_first_region_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        let before = format!(
            "{START_MARKER}\nfirst\n{END_MARKER}\nmiddle\n{START_MARKER}\nsecond\n{END_MARKER}\n"
        );
        fs::write(&path, &before).unwrap();
        let doc = SummaryDocument::new(&path);

        doc.apply(&summary_of(&["a/b"]), &Silent).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("first"));
        assert!(written.contains("second"));
        assert!(written.ends_with(&format!("middle\n{START_MARKER}\nsecond\n{END_MARKER}\n")));
    }

    #[test]
    fn unreadable_document_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, [0xff, 0xfe, 0xfd]).unwrap();
        let doc = SummaryDocument::new(&path);
        let reporter = Recording::default();

        doc.apply(&summary_of(&[]), &reporter).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains(START_MARKER));
        assert_eq!(reporter.warnings.borrow().len(), 1);
    }

    #[test]
    fn custom_markers_are_honored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "<!-- S -->\nold\n<!-- E -->\n").unwrap();
        let doc = SummaryDocument::with_markers(&path, "<!-- S -->", "<!-- E -->");

        doc.apply(&summary_of(&["a/b"]), &Silent).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("old"));
        assert!(written.contains("- a/b"));
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        let doc = SummaryDocument::new(&path);

        doc.apply(&summary_of(&["a/b"]), &Silent).unwrap();

        assert!(!dir.path().join("README.md.tmp").exists());
        assert!(path.exists());
    }

    proptest! {
        /// Bytes outside the marker span survive any merge untouched
        #[test]
        fn merge_preserves_surrounding_content(
            prefix in "[a-z \n#*-]{0,40}",
            region in "[a-z \n]{0,20}",
            suffix in "[a-z \n#*-]{0,40}",
        ) {
            let doc = SummaryDocument::new("unused.md");
            let content = format!("{prefix}{START_MARKER}{region}{END_MARKER}{suffix}");
            let summary = summary_of(&["a/b"]);

            let merged = doc.merge(&content, &summary);

            prop_assert!(merged.starts_with(&prefix));
            prop_assert!(merged.ends_with(&suffix));
        }

        /// Merging twice gives the same bytes as merging once
        #[test]
        fn merge_is_idempotent(content in "[a-z \n#*-]{0,80}") {
            let doc = SummaryDocument::new("unused.md");
            let summary = summary_of(&["a/b", "c/d"]);

            let once = doc.merge(&content, &summary);
            let twice = doc.merge(&once, &summary);

            prop_assert_eq!(once, twice);
        }
    }
}
