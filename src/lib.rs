//! Recap CLI - Yearly GitHub activity summaries for your README
//!
//! Recap fetches a user's public event feed, filters it to one calendar
//! year, reduces it to a small summary, and rewrites a marker-delimited
//! section of a markdown document with the result. Runs are stateless and
//! idempotent: unchanged activity produces an unchanged document.

pub mod domain;
pub mod github;
pub mod report;
pub mod storage;
pub mod cli;

pub use domain::{summarize, Event, RepoRef, Summary};
