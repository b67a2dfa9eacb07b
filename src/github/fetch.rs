//! Year-bounded pagination over the events feed
//!
//! The feed is served newest-first, so the first record from an older year
//! means every later page is older still and fetching can stop. An
//! out-of-order feed would truncate early here; that matches the feed's
//! documented ordering and is left as-is.

use serde_json::Value;

use crate::domain::Event;
use crate::report::Reporter;

use super::client::{FetchError, GithubClient};

/// Source of event pages
///
/// The one seam between pagination logic and the network; tests drive
/// [`collect_yearly_events`] through a scripted implementation.
pub trait EventPager {
    /// Fetches the 1-indexed page of a user's public events
    fn page(&self, username: &str, page: u32) -> Result<Vec<Value>, FetchError>;
}

impl EventPager for GithubClient {
    fn page(&self, username: &str, page: u32) -> Result<Vec<Value>, FetchError> {
        self.events_page(username, page)
    }
}

/// Collects the user's events for one calendar year
///
/// Failure policy, in order of appearance:
/// - request-level failure (transport error, non-2xx): empty result
/// - page body that is not an event array: whatever was accumulated so far
/// - malformed record: skipped, the rest of the page is still processed
pub fn collect_yearly_events(
    pager: &dyn EventPager,
    username: &str,
    year: i32,
    reporter: &dyn Reporter,
) -> Vec<Event> {
    let mut events = Vec::new();
    let mut page = 1;

    loop {
        let records = match pager.page(username, page) {
            Ok(records) => records,
            Err(err) if err.is_request_failure() => {
                reporter.warn(&format!(
                    "events request for page {page} failed ({err}); continuing with no events"
                ));
                return Vec::new();
            }
            Err(err) => {
                reporter.warn(&format!(
                    "could not decode page {page} ({err}); keeping {} events fetched so far",
                    events.len()
                ));
                return events;
            }
        };

        if records.is_empty() {
            reporter.debug(&format!("page {page} is empty, feed exhausted"));
            break;
        }

        let mut crossed_year_boundary = false;
        for record in records {
            let event = match serde_json::from_value::<Event>(record) {
                Ok(event) => event,
                Err(err) => {
                    reporter.warn(&format!("skipping malformed record on page {page}: {err}"));
                    continue;
                }
            };

            match event.year() {
                y if y == year => events.push(event),
                y if y < year => crossed_year_boundary = true,
                _ => {}
            }
        }

        if crossed_year_boundary {
            reporter.debug(&format!("page {page} crossed into a previous year, stopping"));
            break;
        }

        page += 1;
    }

    reporter.debug(&format!(
        "collected {} events for {year} across {page} page(s)",
        events.len()
    ));
    events
}
