//! Variable assignment scanner.
//!
//! Recognises `NAME = value` and `NAME := value` on logical lines.  Rule
//! lines, recipes, comments and everything else are skipped.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;
use crate::filter::{anchored, LineFilter};
use crate::lines::{join_continued, JoinContinued};

const ASSIGNMENT_PATTERN: &str = r"[ ]*([A-Za-z0-9_]+)[ ]*(:?=)(.*)";

fn assignment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| anchored(ASSIGNMENT_PATTERN).expect("assignment pattern is valid"))
}

/// Assignment operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`: store the raw text.
    Deferred,
    /// `:=`: evaluate against the variables known so far.
    Immediate,
}

impl AssignOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Deferred => "=",
            AssignOp::Immediate => ":=",
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignOp {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "=" => Ok(AssignOp::Deferred),
            ":=" => Ok(AssignOp::Immediate),
            _ => Err(format!("unknown assignment operator '{s}'")),
        }
    }
}

/// One `NAME op value` line.  `value` is everything after the operator,
/// untrimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub op: AssignOp,
    pub value: String,
}

impl Assignment {
    fn from_groups(groups: Vec<Option<String>>) -> Option<Self> {
        let mut groups = groups.into_iter();
        let name = groups.next()??;
        let op = groups.next()??.parse().ok()?;
        let value = groups.next()?.unwrap_or_default();
        Some(Assignment { name, op, value })
    }
}

/// Iterator over the assignments of a stream of physical lines.
#[derive(Debug)]
pub struct Assignments<I> {
    inner: LineFilter<JoinContinued<I>>,
}

/// Join continued lines of `lines` and scan them for assignments.
pub fn scan_assignments<I>(lines: I) -> Assignments<I::IntoIter>
where
    I: IntoIterator<Item = Result<String>>,
{
    Assignments {
        inner: LineFilter::new(join_continued(lines), assignment_re().clone()),
    }
}

impl<I: Iterator<Item = Result<String>>> Iterator for Assignments<I> {
    type Item = Result<Assignment>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let groups = match self.inner.next()? {
                Ok(groups) => groups,
                Err(e) => return Some(Err(e)),
            };
            if let Some(a) = Assignment::from_groups(groups) {
                tracing::trace!(name = %a.name, op = %a.op, value = %a.value, "scanned assignment");
                return Some(Ok(a));
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
