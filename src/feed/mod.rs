//! Advisory ingestion from the GitHub GraphQL API
//!
//! The feed walks the paginated `securityVulnerabilities` query and turns
//! raw edges into normalized [`crate::advisory::Advisory`] records.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌───────────┐   ┌──────────┐   ┌──────────┐
//! │   client   │──▶│ transport │──▶│   page   │──▶│ advisory │
//! │ (paginate) │   │  (POST)   │   │ (decode) │   │ (build)  │
//! └────────────┘   └───────────┘   └──────────┘   └──────────┘
//!        │                               │
//!        ▼                               ▼
//! ┌────────────┐                  ┌──────────┐
//! │   ignore   │                  │  range   │
//! │  (oracle)  │                  │ (parse)  │
//! └────────────┘                  └──────────┘
//! ```
//!
//! # Modules
//!
//! - [`client`]: pagination driver exposing the lazy advisory stream
//! - [`transport`]: `Transport` trait and the reqwest-backed implementation
//! - [`page`]: decoding of one raw response page, fatal on schema violations
//! - [`query`]: GraphQL query text construction
//! - [`ignore`]: membership oracle for operator-excluded packages
//! - [`error`]: the feed error taxonomy

pub mod client;
pub mod error;
pub mod ignore;
pub mod page;
pub mod query;
pub mod transport;
