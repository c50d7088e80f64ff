//! Normalized advisory model
//!
//! An [`Advisory`] couples a Composer package reference (`vendor/package`)
//! with the version branches it affects. Instances are only built through
//! [`Advisory::new`], which rejects malformed references, so every advisory
//! held downstream is shape-correct by construction.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedAdvisory {
    #[error("package reference {0:?} is not of the form vendor/package")]
    BadReference(String),

    #[error("advisory for {0:?} has no version branches")]
    NoBranches(String),

    #[error("branch for {0:?} must hold one or two version constraints, got {1}")]
    BadBranch(String, usize),
}

/// Returns true when `name` is a Composer package reference: exactly one
/// `/` separator with non-empty vendor and package segments.
pub fn is_composer_reference(name: &str) -> bool {
    let mut parts = name.split('/');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(vendor), Some(package), None) if !vendor.is_empty() && !package.is_empty()
    )
}

/// One grouping of version constraints affected by an advisory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub versions: Vec<String>,
}

/// A vulnerable package and the version branches it is vulnerable in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    reference: String,
    branches: Vec<Branch>,
}

impl Advisory {
    /// Builds an advisory from an already-parsed reference and branches.
    ///
    /// The reference must be `vendor/package` shaped and at least one branch
    /// with one or two constraints must be present.
    pub fn new(
        reference: impl Into<String>,
        branches: Vec<Branch>,
    ) -> Result<Self, MalformedAdvisory> {
        let reference = reference.into();

        if !is_composer_reference(&reference) {
            return Err(MalformedAdvisory::BadReference(reference));
        }
        if branches.is_empty() {
            return Err(MalformedAdvisory::NoBranches(reference));
        }
        for branch in &branches {
            if branch.versions.is_empty() || branch.versions.len() > 2 {
                return Err(MalformedAdvisory::BadBranch(
                    reference,
                    branch.versions.len(),
                ));
            }
        }

        Ok(Self {
            reference,
            branches,
        })
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }
}
