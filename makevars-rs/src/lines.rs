//! Physical and logical lines.
//!
//! A physical line is one line of input with its `\n` still attached (the
//! last line of a file may lack it).  A logical line is one or more physical
//! lines glued together at backslash continuations:
//!
//! ```text
//! SOURCES := main.c \      ┐
//!            util.c        ┘ → "SOURCES := main.c            util.c\n"
//! ```
//!
//! Both are lazy iterators; neither can be restarted.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error::{MakeError, Result};

// ── Physical lines ────────────────────────────────────────────────────────────

/// Reads physical lines from `R`, keeping the trailing newline.
///
/// [`BufRead::lines`] strips the terminator, which would make a final
/// `"foo\\"` indistinguishable from `"foo\\\n"`, so this reads with
/// [`BufRead::read_line`] instead.
#[derive(Debug)]
pub struct PhysicalLines<R> {
    reader: R,
    path: Option<PathBuf>,
    done: bool,
}

impl<R: BufRead> PhysicalLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, path: None, done: false }
    }

    /// Like [`new`](Self::new), naming `path` in read errors.
    pub fn with_path(reader: R, path: &Path) -> Self {
        Self { reader, path: Some(path.to_owned()), done: false }
    }
}

impl<R: BufRead> Iterator for PhysicalLines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => Some(Ok(line)),
            Err(e) => {
                self.done = true;
                Some(Err(MakeError::io(self.path.as_deref(), e)))
            }
        }
    }
}

/// Physical lines of an in-memory string.
pub fn physical_lines_str(text: &str) -> impl Iterator<Item = Result<String>> + '_ {
    text.split_inclusive('\n').map(|l| Ok(l.to_owned()))
}

// ── Continuation joining ──────────────────────────────────────────────────────

/// Joins backslash-continued physical lines into logical lines.
///
/// The trailing newline of the last physical line in a group is kept; the
/// continued lines lose their `\` and `\n`.  If the input ends in the middle
/// of a continuation, the final item is [`MakeError::DanglingContinuation`].
#[derive(Debug)]
pub struct JoinContinued<I> {
    lines: I,
    buf: String,
    done: bool,
}

/// Wrap `lines` so that it yields logical lines.
pub fn join_continued<I>(lines: I) -> JoinContinued<I::IntoIter>
where
    I: IntoIterator<Item = Result<String>>,
{
    JoinContinued { lines: lines.into_iter(), buf: String::new(), done: false }
}

impl<I: Iterator<Item = Result<String>>> Iterator for JoinContinued<I> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    if self.buf.is_empty() {
                        return None;
                    }
                    return Some(Err(MakeError::DanglingContinuation));
                }
            };
            if let Some(head) = line.strip_suffix("\\\n") {
                self.buf.push_str(head);
            } else if let Some(head) = line.strip_suffix('\\') {
                self.buf.push_str(head);
            } else {
                self.buf.push_str(&line);
                return Some(Ok(std::mem::take(&mut self.buf)));
            }
        }
    }
}

impl<I: Iterator<Item = Result<String>>> std::iter::FusedIterator for JoinContinued<I> {}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn logical(text: &str) -> Result<Vec<String>> {
        join_continued(physical_lines_str(text)).collect()
    }

    #[test]
    fn physical_lines_keep_newline() {
        let got: Vec<String> = PhysicalLines::new("a\nb\\\nc".as_bytes())
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(got, ["a\n", "b\\\n", "c"]);
    }

    #[test]
    fn physical_lines_str_matches_reader() {
        let text = "x = 1\n\ny = 2\\\n";
        let a: Vec<String> = physical_lines_str(text).collect::<Result<_>>().unwrap();
        let b: Vec<String> = PhysicalLines::new(text.as_bytes()).collect::<Result<_>>().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn plain_lines_pass_through() {
        assert_eq!(logical("a\nb\n").unwrap(), ["a\n", "b\n"]);
    }

    #[test]
    fn continuation_joins() {
        assert_eq!(logical("a\\\nb\n").unwrap(), ["ab\n"]);
    }

    #[test]
    fn multi_line_continuation() {
        assert_eq!(
            logical("X := one \\\n  two \\\n  three\nY = 1\n").unwrap(),
            ["X := one   two   three\n", "Y = 1\n"]
        );
    }

    #[test]
    fn last_line_without_newline() {
        assert_eq!(logical("a\nb").unwrap(), ["a\n", "b"]);
    }

    #[test]
    fn empty_input() {
        assert!(logical("").unwrap().is_empty());
    }

    #[test]
    fn dangling_continuation_with_newline() {
        let mut it = join_continued(physical_lines_str("a\nb\\\n"));
        assert_eq!(it.next().unwrap().unwrap(), "a\n");
        assert!(matches!(it.next(), Some(Err(MakeError::DanglingContinuation))));
        assert!(it.next().is_none());
    }

    #[test]
    fn dangling_continuation_without_newline() {
        assert!(matches!(logical("a \\"), Err(MakeError::DanglingContinuation)));
    }

    #[test]
    fn lone_continuation_yields_nothing() {
        // "\\\n" strips to "" so the buffer stays empty: not dangling.
        assert_eq!(logical("\\\n").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn backslash_in_middle_is_literal() {
        assert_eq!(logical("a\\b\n").unwrap(), ["a\\b\n"]);
    }
}
