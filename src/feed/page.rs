//! Decoding of one raw GraphQL response page
//!
//! Page-level corruption means the upstream contract is broken, so any
//! deviation from the expected shape is fatal here, unlike a single bad
//! advisory, which the driver recovers from per edge.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::feed::error::FeedError;

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Data,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Data {
    security_vulnerabilities: VulnerabilityConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VulnerabilityConnection {
    edges: Vec<Edge>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

/// One raw record within a page
#[derive(Debug, Clone, Deserialize)]
pub struct Edge {
    pub cursor: String,
    pub node: Node,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub vulnerable_version_range: String,
    pub package: Package,
    pub advisory: AdvisoryInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Package {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryInfo {
    pub ghsa_id: String,
    /// Non-null means the advisory was retracted upstream
    pub withdrawn_at: Option<DateTime<Utc>>,
}

/// One decoded page of advisory edges.
///
/// `next_cursor` is `Some` exactly when the API reported a following page;
/// the decoder enforces that `hasNextPage` never comes with a null
/// `endCursor`, so the driver never has to re-check it.
#[derive(Debug)]
pub struct Page {
    pub edges: Vec<Edge>,
    pub next_cursor: Option<String>,
}

/// Decodes a raw response body into a typed page.
///
/// Fails with [`FeedError::InvalidResponseSchema`] on a non-200 status,
/// a body that is not JSON, or JSON that does not match the expected shape.
pub fn decode_page(status: u16, body: &[u8]) -> Result<Page, FeedError> {
    if status != 200 {
        return Err(FeedError::InvalidResponseSchema(format!(
            "unexpected status: {status}"
        )));
    }

    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| FeedError::InvalidResponseSchema(e.to_string()))?;

    let connection = envelope.data.security_vulnerabilities;
    let next_cursor = if connection.page_info.has_next_page {
        match connection.page_info.end_cursor {
            Some(cursor) if !cursor.is_empty() => Some(cursor),
            _ => {
                return Err(FeedError::InvalidResponseSchema(
                    "hasNextPage is true but endCursor is missing".to_string(),
                ));
            }
        }
    } else {
        None
    };

    Ok(Page {
        edges: connection.edges,
        next_cursor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn page_json(edges: &str, has_next_page: bool, end_cursor: &str) -> String {
        format!(
            r#"{{"data": {{"securityVulnerabilities": {{
                "edges": [{edges}],
                "pageInfo": {{"hasNextPage": {has_next_page}, "endCursor": {end_cursor}}}
            }}}}}}"#
        )
    }

    fn edge_json(cursor: &str, package: &str, range: &str, withdrawn_at: &str) -> String {
        format!(
            r#"{{"cursor": "{cursor}",
                "node": {{
                    "vulnerableVersionRange": "{range}",
                    "package": {{"name": "{package}"}},
                    "advisory": {{"ghsaId": "GHSA-aaaa-bbbb-cccc", "withdrawnAt": {withdrawn_at}}}
                }}}}"#
        )
    }

    #[test]
    fn decode_page_returns_typed_edges() {
        let body = page_json(
            &edge_json("c1", "vendor/package", "> 1.0, < 2.0", "null"),
            false,
            "null",
        );

        let page = decode_page(200, body.as_bytes()).unwrap();

        assert_eq!(page.edges.len(), 1);
        let edge = &page.edges[0];
        assert_eq!(edge.cursor, "c1");
        assert_eq!(edge.node.package.name, "vendor/package");
        assert_eq!(edge.node.vulnerable_version_range, "> 1.0, < 2.0");
        assert_eq!(edge.node.advisory.ghsa_id, "GHSA-aaaa-bbbb-cccc");
        assert!(edge.node.advisory.withdrawn_at.is_none());
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn decode_page_parses_withdrawn_timestamp() {
        let body = page_json(
            &edge_json("c1", "vendor/package", "< 1.0", r#""2024-01-15T00:00:00Z""#),
            false,
            "null",
        );

        let page = decode_page(200, body.as_bytes()).unwrap();

        assert!(page.edges[0].node.advisory.withdrawn_at.is_some());
    }

    #[test]
    fn decode_page_exposes_cursor_only_when_more_pages_follow() {
        let body = page_json("", true, r#""next-cursor""#);

        let page = decode_page(200, body.as_bytes()).unwrap();

        assert_eq!(page.next_cursor.as_deref(), Some("next-cursor"));
    }

    #[rstest]
    #[case(500)]
    #[case(401)]
    #[case(404)]
    fn decode_page_rejects_non_200_status(#[case] status: u16) {
        let body = page_json("", false, "null");

        let result = decode_page(status, body.as_bytes());

        assert!(matches!(result, Err(FeedError::InvalidResponseSchema(_))));
    }

    #[rstest]
    #[case(b"not json at all".as_slice())]
    #[case(br#"{"data": {}}"#.as_slice())] // missing securityVulnerabilities
    #[case(br#"{"data": {"securityVulnerabilities": {"edges": []}}}"#.as_slice())] // missing pageInfo
    #[case(br#"{"data": {"securityVulnerabilities": {"edges": "nope", "pageInfo": {"hasNextPage": false, "endCursor": null}}}}"#.as_slice())]
    #[case(br#"{"data": {"securityVulnerabilities": {"edges": [], "pageInfo": {"hasNextPage": "yes", "endCursor": null}}}}"#.as_slice())]
    fn decode_page_rejects_schema_violations(#[case] body: &[u8]) {
        let result = decode_page(200, body);

        assert!(matches!(result, Err(FeedError::InvalidResponseSchema(_))));
    }

    #[rstest]
    #[case("null")]
    #[case(r#""""#)] // empty cursor is as unusable as a missing one
    fn decode_page_rejects_next_page_without_cursor(#[case] end_cursor: &str) {
        let body = page_json("", true, end_cursor);

        let result = decode_page(200, body.as_bytes());

        assert!(matches!(result, Err(FeedError::InvalidResponseSchema(_))));
    }

    #[test]
    fn decode_page_rejects_malformed_withdrawn_timestamp() {
        let body = page_json(
            &edge_json("c1", "vendor/package", "< 1.0", r#""yesterday""#),
            false,
            "null",
        );

        let result = decode_page(200, body.as_bytes());

        assert!(matches!(result, Err(FeedError::InvalidResponseSchema(_))));
    }
}
