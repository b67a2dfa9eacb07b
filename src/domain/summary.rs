//! Yearly activity summary
//!
//! Reduces an event sequence to aggregate counts and the set of
//! repositories touched. Pure except for reporter warnings.

use std::collections::BTreeSet;

use serde::Serialize;

use super::Event;
use crate::report::Reporter;

/// Aggregate view of one year of public activity
///
/// `repos` is a `BTreeSet` so iteration (and the JSON array) is already in
/// lexicographic order, which is the order the rendered bullet list uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Events counted, without deduplication
    pub total_events: usize,
    /// Number of distinct repositories
    pub unique_repos: usize,
    /// Distinct repository names
    pub repos: BTreeSet<String>,
}

impl Summary {
    /// Returns true if no activity was recorded
    pub fn is_empty(&self) -> bool {
        self.total_events == 0
    }
}

/// Reduces events to a [`Summary`]
///
/// Events without a repository name are malformed for counting purposes:
/// they are reported and excluded from both `total_events` and the set.
pub fn summarize(events: &[Event], reporter: &dyn Reporter) -> Summary {
    let mut total_events = 0;
    let mut repos = BTreeSet::new();

    for event in events {
        match event.repo_name() {
            Some(name) => {
                total_events += 1;
                repos.insert(name.to_string());
            }
            None => {
                reporter.warn(&format!(
                    "skipping event from {} with no repository",
                    event.created_at
                ));
            }
        }
    }

    Summary {
        total_events,
        unique_repos: repos.len(),
        repos,
    }
}
