//! Public event records
//!
//! Events come straight off the GitHub events feed. Only the fields the
//! summary needs are kept; everything else in the payload is ignored.

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;

/// Reference to the repository an event happened in
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoRef {
    /// Full repository name, e.g. `owner/project`
    pub name: String,
}

/// One public activity record from the events feed
///
/// `created_at` is required: a record without a parseable timestamp cannot
/// be year-filtered and is rejected during deserialization. `repo` is kept
/// optional so an otherwise valid record survives to the summarizer, which
/// decides what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Event {
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub repo: Option<RepoRef>,
}

impl Event {
    /// Calendar year the event happened in (UTC)
    pub fn year(&self) -> i32 {
        self.created_at.year()
    }

    /// Repository name, if the record carried one
    pub fn repo_name(&self) -> Option<&str> {
        self.repo.as_ref().map(|r| r.name.as_str())
    }
}
