//! Ignore-list oracle
//!
//! Some packages are excluded from the feed by operator decision. The core
//! only sees a membership oracle; the list contents live with the caller.

use std::collections::HashSet;

/// Membership oracle for packages that must not produce advisories
pub trait IgnoreList: Send + Sync {
    fn is_ignored(&self, package: &str) -> bool;
}

/// Oracle that ignores nothing, the default for a new feed
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIgnores;

impl IgnoreList for NoIgnores {
    fn is_ignored(&self, _package: &str) -> bool {
        false
    }
}

impl IgnoreList for HashSet<String> {
    fn is_ignored(&self, package: &str) -> bool {
        self.contains(package)
    }
}
