//! Error type shared by every stage of variable extraction.
//!
//! None of these are recovered from inside the crate: a malformed Makefile
//! aborts the whole extraction and is reported to the caller.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MakeError {
    /// The last physical line ended with a backslash continuation.
    #[error("continuation on last line")]
    DanglingContinuation,

    /// A `$(name)` reference named a variable that is not defined.
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },

    /// A `$(` was never closed.
    #[error("open without close in \"{expr}\"")]
    UnbalancedReference { expr: String },

    /// `addsuffix` did not split into exactly a suffix and an argument list.
    #[error("addsuffix expects 2 comma-separated arguments, got {parts} in \"{call}\"")]
    Arity { call: String, parts: usize },

    /// Boolean text was neither `true` nor `false`.
    #[error("invalid boolean \"{text}\"")]
    InvalidBoolean { text: String },

    /// Reading the input failed.
    #[error("{}: {source}", display_path(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// A line filter pattern did not compile.
    #[error("invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl MakeError {
    pub(crate) fn io(path: Option<&std::path::Path>, source: std::io::Error) -> Self {
        MakeError::Io { path: path.map(ToOwned::to_owned), source }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "<input>".to_owned(),
    }
}

pub type Result<T> = std::result::Result<T, MakeError>;

// ── Tests ─────────────────────────────────────────────────────────────────────
