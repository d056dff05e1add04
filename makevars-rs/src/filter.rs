//! Regex line filter.
//!
//! Matches each line against a pattern anchored at the start of the line and
//! yields the capture groups of the lines that match.  Lines that do not
//! match are skipped silently.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use regex::Regex;

use crate::error::{MakeError, Result};
use crate::lines::PhysicalLines;

/// Captured groups of one matching line, in group order.  A group that did
/// not participate in the match is `None`.
pub type Groups = Vec<Option<String>>;

/// Iterator produced by [`filter_lines`] and [`filter_file`].
#[derive(Debug)]
pub struct LineFilter<I> {
    lines: I,
    re: Regex,
}

/// Compile `pattern` so that it only matches at the start of a line.
///
/// The match does not need to reach the end of the line.
pub(crate) fn anchored(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&format!("^(?:{pattern})"))?)
}

/// Filter `lines` through `pattern`.
pub fn filter_lines<I>(lines: I, pattern: &str) -> Result<LineFilter<I::IntoIter>>
where
    I: IntoIterator<Item = Result<String>>,
{
    Ok(LineFilter::new(lines.into_iter(), anchored(pattern)?))
}

/// Filter the physical lines of the file at `path` through `pattern`.
///
/// The file stays open for as long as the returned iterator lives.
pub fn filter_file(path: &Path, pattern: &str) -> Result<LineFilter<PhysicalLines<BufReader<File>>>> {
    let re = anchored(pattern)?;
    let file = File::open(path).map_err(|e| MakeError::io(Some(path), e))?;
    Ok(LineFilter::new(PhysicalLines::with_path(BufReader::new(file), path), re))
}

impl<I> LineFilter<I> {
    pub(crate) fn new(lines: I, re: Regex) -> Self {
        Self { lines, re }
    }
}

impl<I: Iterator<Item = Result<String>>> Iterator for LineFilter<I> {
    type Item = Result<Groups>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            let text = line.strip_suffix('\n').unwrap_or(&line);
            if let Some(caps) = self.re.captures(text) {
                let groups = caps
                    .iter()
                    .skip(1)
                    .map(|m| m.map(|m| m.as_str().to_owned()))
                    .collect();
                return Some(Ok(groups));
            }
        }
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
