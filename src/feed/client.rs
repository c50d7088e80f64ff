//! Paginated advisory fetching
//!
//! [`AdvisoryFeed`] drives the cursor pagination: it issues one GraphQL
//! request at a time, applies the per-edge skip rules, and yields
//! [`Advisory`] records through a lazy stream. Record-level problems are
//! recovered into skips; configuration, transport and page-schema problems
//! end the stream with an error.

use std::collections::VecDeque;

use futures::Stream;
use tracing::{debug, error};

use crate::advisory::{Advisory, Branch, is_composer_reference};
use crate::feed::error::FeedError;
use crate::feed::ignore::{IgnoreList, NoIgnores};
use crate::feed::page::{self, Edge, Page};
use crate::feed::query::advisories_query;
use crate::feed::transport::{ApiToken, GraphqlRequest, Transport};
use crate::range::VersionRange;

/// What to do with an edge whose version range does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRangePolicy {
    /// Log the edge at error level and continue with the rest of the page
    #[default]
    Skip,
    /// Surface the parse failure through the stream and stop
    Fail,
}

/// Client for the GitHub security-vulnerabilities feed
pub struct AdvisoryFeed<T> {
    transport: T,
    token: ApiToken,
    ignore_list: Box<dyn IgnoreList>,
    malformed_range_policy: MalformedRangePolicy,
}

struct FetchState {
    cursor: String,
    pending: VecDeque<Advisory>,
    done: bool,
}

impl<T: Transport> AdvisoryFeed<T> {
    /// Creates a feed over the given transport.
    ///
    /// Fails with [`FeedError::InvalidConfiguration`] when the token is
    /// empty, before any request is made.
    pub fn new(transport: T, token: &str) -> Result<Self, FeedError> {
        Ok(Self {
            transport,
            token: ApiToken::new(token)?,
            ignore_list: Box::new(NoIgnores),
            malformed_range_policy: MalformedRangePolicy::default(),
        })
    }

    /// Replaces the ignore oracle (the default ignores nothing)
    pub fn with_ignore_list(mut self, ignore_list: impl IgnoreList + 'static) -> Self {
        self.ignore_list = Box::new(ignore_list);
        self
    }

    pub fn with_malformed_range_policy(mut self, policy: MalformedRangePolicy) -> Self {
        self.malformed_range_policy = policy;
        self
    }

    /// Returns a lazy, single-pass stream of advisories.
    ///
    /// Pages are fetched as the stream is polled: the next page goes out
    /// only after every record of the current page has been yielded, and
    /// dropping the stream stops all fetching. Output order follows edge
    /// order within a page and fetch order across pages; duplicates coming
    /// from upstream are yielded as-is.
    pub fn fetch_advisories(&self) -> impl Stream<Item = Result<Advisory, FeedError>> + '_ {
        let state = FetchState {
            cursor: String::new(),
            pending: VecDeque::new(),
            done: false,
        };

        futures::stream::try_unfold(state, move |mut state| async move {
            loop {
                if let Some(advisory) = state.pending.pop_front() {
                    return Ok(Some((advisory, state)));
                }
                if state.done {
                    return Ok(None);
                }

                let page = self.fetch_page(&state.cursor).await?;
                for edge in page.edges {
                    if let Some(advisory) = self.process_edge(edge)? {
                        state.pending.push_back(advisory);
                    }
                }
                match page.next_cursor {
                    Some(cursor) => state.cursor = cursor,
                    None => state.done = true,
                }
            }
        })
    }

    async fn fetch_page(&self, cursor: &str) -> Result<Page, FeedError> {
        debug!(cursor, "fetching advisory page");

        let request = GraphqlRequest {
            query: advisories_query(cursor),
        };
        let response = self.transport.post(&self.token, &request).await?;

        page::decode_page(response.status, &response.body)
    }

    /// Applies the skip rules to one edge; `Ok(None)` means skipped.
    fn process_edge(&self, edge: Edge) -> Result<Option<Advisory>, FeedError> {
        let node = edge.node;

        if node.advisory.withdrawn_at.is_some() {
            return Ok(None);
        }

        let package = node.package.name;
        if self.ignore_list.is_ignored(&package) {
            return Ok(None);
        }
        // Not a vendor/package name: data we do not handle, not an error
        if !is_composer_reference(&package) {
            return Ok(None);
        }

        let range = match VersionRange::parse(&node.vulnerable_version_range) {
            Ok(range) => range,
            Err(e) => match self.malformed_range_policy {
                MalformedRangePolicy::Skip => {
                    error!(
                        advisory_id = %node.advisory.ghsa_id,
                        package = %package,
                        error = %e,
                        "skipping advisory with malformed version range"
                    );
                    return Ok(None);
                }
                MalformedRangePolicy::Fail => return Err(e.into()),
            },
        };

        let branch = Branch {
            versions: range.clause_texts(),
        };
        // The reference shape was checked above; treat a builder rejection
        // as one more malformed record to skip, never a feed failure
        Ok(Advisory::new(package, vec![branch]).ok())
    }
}
