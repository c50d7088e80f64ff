//! Free-text version range parsing
//!
//! GitHub reports affected versions as free text such as `"> 0.12.0, < 0.12.1"`.
//! A range is a comma-separated list of at most two clauses, each of the form
//! `<operator><space><version>` with operator one of `>`, `>=`, `<`, `<=`.
//! Downstream consumers compare the rendered text, so parsing keeps each
//! clause verbatim and [`VersionRange`]'s `Display` reproduces the input
//! exactly, including the original spacing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Matches one trimmed clause: operator, a single space, dotted numeric version
static CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(>=|<=|>|<) (\d+(?:\.\d+)*)$").unwrap());

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedVersionRange {
    #[error("version range is empty")]
    Empty,

    #[error("version range {0:?} has more than two clauses")]
    TooManyClauses(String),

    #[error("unparseable version clause {0:?}")]
    BadClause(String),
}

/// Comparison operator of a single version bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl ConstraintOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintOp::Greater => ">",
            ConstraintOp::GreaterOrEqual => ">=",
            ConstraintOp::Less => "<",
            ConstraintOp::LessOrEqual => "<=",
        }
    }
}

/// One bound of a version range, e.g. `< 0.12.1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    op: ConstraintOp,
    version: String,
    /// Clause text as split from the input, spacing untouched
    raw: String,
}

impl Constraint {
    pub fn op(&self) -> ConstraintOp {
        self.op
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The clause exactly as it appeared in the input
    pub fn as_text(&self) -> &str {
        &self.raw
    }
}

/// A parsed version range of one or two bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    constraints: Vec<Constraint>,
}

impl VersionRange {
    /// Parses a raw range expression into one or two bounds.
    ///
    /// Fails on empty input, more than two comma-separated clauses, or any
    /// clause that does not match `<operator><space><version>` after trimming.
    pub fn parse(raw: &str) -> Result<Self, MalformedVersionRange> {
        if raw.trim().is_empty() {
            return Err(MalformedVersionRange::Empty);
        }

        let clauses: Vec<&str> = raw.split(',').collect();
        if clauses.len() > 2 {
            return Err(MalformedVersionRange::TooManyClauses(raw.to_string()));
        }

        let constraints = clauses
            .into_iter()
            .map(Self::parse_clause)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { constraints })
    }

    fn parse_clause(clause: &str) -> Result<Constraint, MalformedVersionRange> {
        let captures = CLAUSE_RE
            .captures(clause.trim())
            .ok_or_else(|| MalformedVersionRange::BadClause(clause.to_string()))?;

        let op = match &captures[1] {
            ">" => ConstraintOp::Greater,
            ">=" => ConstraintOp::GreaterOrEqual,
            "<" => ConstraintOp::Less,
            "<=" => ConstraintOp::LessOrEqual,
            _ => return Err(MalformedVersionRange::BadClause(clause.to_string())),
        };

        Ok(Constraint {
            op,
            version: captures[2].to_string(),
            raw: clause.to_string(),
        })
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Clause texts in input order, verbatim
    pub fn clause_texts(&self) -> Vec<String> {
        self.constraints.iter().map(|c| c.raw.clone()).collect()
    }
}

impl fmt::Display for VersionRange {
    /// Rejoins the verbatim clauses, reproducing the parsed input exactly
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<&str> = self.constraints.iter().map(|c| c.raw.as_str()).collect();
        write!(f, "{}", clauses.join(","))
    }
}
