//! GraphQL query construction
//!
//! One hardcoded query shape: Composer-ecosystem security vulnerabilities,
//! 100 per page. The only variable part is the pagination cursor.

/// Renders the advisories query for one page.
///
/// An empty cursor means the first page and omits the `after:` argument
/// entirely; any other cursor is inserted verbatim.
pub fn advisories_query(cursor: &str) -> String {
    let after = if cursor.is_empty() {
        String::new()
    } else {
        format!(r#", after: "{cursor}""#)
    };

    format!(
        "query {{ securityVulnerabilities(first: 100, ecosystem: COMPOSER{after}) {{ \
         edges {{ cursor node {{ vulnerableVersionRange package {{ name }} \
         advisory {{ ghsaId withdrawnAt }} }} }} \
         pageInfo {{ hasNextPage endCursor }} }} }}"
    )
}
