//! Makefile variable extraction.
//!
//! Runs a file through continuation joining and the assignment scanner and
//! folds the assignments into a [`MakeVars`]:
//!
//! - `NAME = value` stores `value` trimmed, unevaluated.
//! - `NAME := value` evaluates `value` against the variables defined so far
//!   and stores the trimmed result.
//!
//! Extraction works on its own copy of the initial variables; the caller's
//! mapping is never touched.  Any error aborts the whole extraction.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{MakeError, Result};
use crate::eval::evaluate;
use crate::lines::{physical_lines_str, PhysicalLines};
use crate::scan::{scan_assignments, AssignOp, Assignment};
use crate::vars::MakeVars;

/// Extract all variable definitions from the Makefile at `path`.
///
/// `initial` holds variables that are already defined; they are included in
/// the result unless the file overwrites them.
pub fn extract_variables(path: &Path, initial: Option<&MakeVars>) -> Result<MakeVars> {
    let file = File::open(path).map_err(|e| MakeError::io(Some(path), e))?;
    tracing::debug!(path = %path.display(), "extracting make variables");
    let lines = PhysicalLines::with_path(BufReader::new(file), path);
    fold_assignments(lines, initial)
}

/// Same as [`extract_variables`] for an already-open reader.
pub fn extract_from_reader<R: BufRead>(reader: R, initial: Option<&MakeVars>) -> Result<MakeVars> {
    fold_assignments(PhysicalLines::new(reader), initial)
}

/// Same as [`extract_variables`] for in-memory text.
pub fn extract_from_str(text: &str, initial: Option<&MakeVars>) -> Result<MakeVars> {
    fold_assignments(physical_lines_str(text), initial)
}

fn fold_assignments<I>(lines: I, initial: Option<&MakeVars>) -> Result<MakeVars>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut vars = initial.cloned().unwrap_or_default();
    for assignment in scan_assignments(lines) {
        let Assignment { name, op, value } = assignment?;
        let value = match op {
            AssignOp::Deferred => value.trim().to_owned(),
            AssignOp::Immediate => evaluate(&value, &vars)?.trim().to_owned(),
        };
        tracing::debug!(%name, %op, %value, "stored variable");
        vars.set(name, value);
    }
    Ok(vars)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
