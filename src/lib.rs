//! Fetches Composer security advisories from the GitHub GraphQL API
//!
//! The crate ingests the paginated `securityVulnerabilities` feed and
//! produces normalized advisories: a `vendor/package` reference plus the
//! affected version branches. A single corrupt record never aborts a run;
//! broken pages and broken configuration do.

pub mod advisory;
pub mod feed;
pub mod range;
