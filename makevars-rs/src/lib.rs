//! Read variable definitions out of Makefile-style build scripts without
//! running make.
//!
//! Only the part of make that build configuration needs is understood:
//! `NAME = value` and `NAME := value` assignments, backslash line
//! continuations, `$(NAME)` references and the `addsuffix` function.
//! Rules, recipes, conditionals and includes are skipped.
//!
//! # Quick start
//!
//! ```rust
//! use makevars::{extract_from_str, parse_bool};
//!
//! let vars = extract_from_str("FOO = bar\nBAZ := $(FOO)baz\nLTO = false\n", None).unwrap();
//! assert_eq!(vars.get("BAZ"), Some("barbaz"));
//! assert!(!parse_bool(vars.get("LTO").unwrap()).unwrap());
//! ```

pub mod boolean;
pub mod cli;
pub mod error;
pub mod eval;
pub mod extract;
pub mod filter;
pub mod lines;
pub mod scan;
pub mod vars;

// Re-exports for convenience.
pub use boolean::parse_bool;
pub use error::{MakeError, Result};
pub use eval::{evaluate, VarLookup};
pub use extract::{extract_from_reader, extract_from_str, extract_variables};
pub use filter::{filter_file, filter_lines};
pub use lines::join_continued;
pub use scan::{scan_assignments, AssignOp, Assignment};
pub use vars::MakeVars;
