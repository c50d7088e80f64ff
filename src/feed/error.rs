//! Error types for the advisory feed
//!
//! Two channels exist on purpose: [`FeedError`] is fatal and ends the feed
//! (configuration, transport, page schema), while per-edge failures
//! ([`MalformedVersionRange`], [`crate::advisory::MalformedAdvisory`]) are
//! recovered into a skip by the pagination driver and only cross its
//! boundary when the fail-fast range policy is selected.

use thiserror::Error;

use crate::range::MalformedVersionRange;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid response schema: {0}")]
    InvalidResponseSchema(String),

    #[error("malformed version range: {0}")]
    MalformedVersionRange(#[from] MalformedVersionRange),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}
