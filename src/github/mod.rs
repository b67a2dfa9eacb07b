//! GitHub API access
//!
//! All network details (endpoint paths, authentication headers, pagination
//! mechanics) live here; the domain layer only ever sees parsed [`Event`]s.
//!
//! [`Event`]: crate::domain::Event

mod client;
mod fetch;

pub use client::{FetchError, GithubClient, DEFAULT_API_URL, DEFAULT_PAGE_SIZE};
pub use fetch::{collect_yearly_events, EventPager};
