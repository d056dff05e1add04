//! `$(...)` reference evaluation.
//!
//! Supported forms:
//!
//! | Form                          | Result                                          |
//! |-------------------------------|-------------------------------------------------|
//! | `$(NAME)`                     | value of `NAME`, looked up verbatim             |
//! | `$(addsuffix SUFFIX, A B ...)`| `ASUFFIX BSUFFIX ...`                           |
//!
//! References nest (`$($(KIND)_FLAGS)`), so evaluation runs a stack of
//! frames: `$(` opens a frame, `)` closes the top one, resolves its text and
//! appends the result to the frame below.  Resolved values are not scanned
//! again; only references present in the input are expanded.
//!
//! A `)` with no open reference is literal text.  A `$(` with no `)` is an
//! error.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{MakeError, Result};
use crate::vars::MakeVars;

const ADDSUFFIX: &str = "addsuffix ";

/// Variable source for [`evaluate`].
pub trait VarLookup {
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl VarLookup for MakeVars {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

impl<S: BuildHasher> VarLookup for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl VarLookup for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<T: VarLookup + ?Sized> VarLookup for &T {
    fn lookup(&self, name: &str) -> Option<&str> {
        (**self).lookup(name)
    }
}

// ── Tokens ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Text(&'a str),
}

fn delimiter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\(|\)").expect("delimiter pattern is valid"))
}

/// Split `expr` at `$(` and `)`, keeping the delimiters as tokens.
fn tokenize(expr: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for m in delimiter_re().find_iter(expr) {
        if m.start() > last {
            tokens.push(Token::Text(&expr[last..m.start()]));
        }
        tokens.push(if m.as_str() == ")" { Token::Close } else { Token::Open });
        last = m.end();
    }
    if last < expr.len() {
        tokens.push(Token::Text(&expr[last..]));
    }
    tokens
}

// ── Evaluation ────────────────────────────────────────────────────────────────

/// Expand every `$(...)` reference in `expr` against `vars`.
///
/// Fails with [`MakeError::UndefinedVariable`] for an unknown name,
/// [`MakeError::UnbalancedReference`] for an unclosed `$(`, and
/// [`MakeError::Arity`] for a malformed `addsuffix` call.
pub fn evaluate<V: VarLookup + ?Sized>(expr: &str, vars: &V) -> Result<String> {
    // Bottom frame collects the output; each open reference adds one.
    let mut stack: Vec<String> = vec![String::new()];

    for token in tokenize(expr) {
        match token {
            Token::Open => stack.push(String::new()),
            Token::Close if stack.len() > 1 => {
                let name = stack.pop().unwrap_or_default();
                let value = resolve(&name, vars)?;
                if let Some(top) = stack.last_mut() {
                    top.push_str(&value);
                }
            }
            Token::Close => {
                if let Some(top) = stack.last_mut() {
                    top.push(')');
                }
            }
            Token::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    top.push_str(text);
                }
            }
        }
    }

    if stack.len() != 1 {
        return Err(MakeError::UnbalancedReference { expr: expr.to_owned() });
    }
    Ok(stack.pop().unwrap_or_default())
}

/// Resolve the text between `$(` and `)`.
fn resolve<V: VarLookup + ?Sized>(name: &str, vars: &V) -> Result<String> {
    if let Some(call) = name.strip_prefix(ADDSUFFIX) {
        return addsuffix(call, name);
    }
    match vars.lookup(name) {
        Some(value) => {
            tracing::trace!(name, value, "resolved reference");
            Ok(value.to_owned())
        }
        None => Err(MakeError::UndefinedVariable { name: name.to_owned() }),
    }
}

/// `addsuffix SUFFIX, ARGS`: append `SUFFIX` to each word of `ARGS`.
fn addsuffix(call: &str, full: &str) -> Result<String> {
    let parts: Vec<&str> = call.split(',').collect();
    let [suffix, args] = parts[..] else {
        return Err(MakeError::Arity { call: full.to_owned(), parts: parts.len() });
    };
    let suffix = suffix.trim();
    Ok(args
        .split_whitespace()
        .map(|arg| format!("{arg}{suffix}"))
        .collect::<Vec<_>>()
        .join(" "))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> MakeVars {
        pairs.iter().copied().collect()
    }

    fn eval(expr: &str, pairs: &[(&str, &str)]) -> Result<String> {
        evaluate(expr, &vars(pairs))
    }

    #[test]
    fn tokenize_keeps_delimiters() {
        use Token::*;
        assert_eq!(
            tokenize("a$(B)c)"),
            vec![Text("a"), Open, Text("B"), Close, Text("c"), Close]
        );
        assert_eq!(tokenize("$($(X))"), vec![Open, Open, Text("X"), Close, Close]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn lone_dollar_and_paren_are_text() {
        assert_eq!(tokenize("$ ( $x"), vec![Token::Text("$ ( $x")]);
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(eval("-O2 -Wall", &[]).unwrap(), "-O2 -Wall");
        assert_eq!(eval("", &[]).unwrap(), "");
    }

    #[test]
    fn single_reference() {
        assert_eq!(eval("$(X)", &[("X", "1")]).unwrap(), "1");
    }

    #[test]
    fn adjacent_references() {
        assert_eq!(eval("$(A)$(B)", &[("A", "x"), ("B", "y")]).unwrap(), "xy");
    }

    #[test]
    fn reference_with_surrounding_text() {
        assert_eq!(
            eval("-I$(SRC)/include -DV=$(VER)", &[("SRC", "src"), ("VER", "3")]).unwrap(),
            "-Isrc/include -DV=3"
        );
    }

    #[test]
    fn nested_reference() {
        let pairs = [("KIND", "OPT"), ("OPT_FLAGS", "-O3")];
        assert_eq!(eval("$($(KIND)_FLAGS)", &pairs).unwrap(), "-O3");
    }

    #[test]
    fn resolved_values_are_not_rescanned() {
        assert_eq!(eval("$(A)", &[("A", "$(B)")]).unwrap(), "$(B)");
    }

    #[test]
    fn lookup_is_verbatim() {
        assert!(matches!(
            eval("$( X )", &[("X", "1")]),
            Err(MakeError::UndefinedVariable { ref name }) if name == " X "
        ));
        assert!(matches!(
            eval("$(x)", &[("X", "1")]),
            Err(MakeError::UndefinedVariable { ref name }) if name == "x"
        ));
    }

    #[test]
    fn missing_variable() {
        assert!(matches!(
            eval("$(MISSING)", &[]),
            Err(MakeError::UndefinedVariable { ref name }) if name == "MISSING"
        ));
    }

    #[test]
    fn unclosed_reference() {
        assert!(matches!(
            eval("$(A", &[("A", "1")]),
            Err(MakeError::UnbalancedReference { ref expr }) if expr == "$(A"
        ));
        assert!(matches!(eval("x $($(A)", &[("A", "1")]), Err(MakeError::UnbalancedReference { .. })));
    }

    #[test]
    fn stray_close_is_literal() {
        assert_eq!(eval("a)b", &[]).unwrap(), "a)b");
        assert_eq!(eval("$(A))", &[("A", "1")]).unwrap(), "1)");
    }

    #[test]
    fn addsuffix() {
        assert_eq!(eval("$(addsuffix .c, foo bar)", &[]).unwrap(), "foo.c bar.c");
        assert_eq!(eval("$(addsuffix  .o ,a  b\tc )", &[]).unwrap(), "a.o b.o c.o");
    }

    #[test]
    fn addsuffix_with_nested_references() {
        let pairs = [("EXT", ".cc"), ("SRCS", "main util")];
        assert_eq!(eval("$(addsuffix $(EXT), $(SRCS))", &pairs).unwrap(), "main.cc util.cc");
    }

    #[test]
    fn addsuffix_no_args() {
        assert_eq!(eval("[$(addsuffix .c, )]", &[]).unwrap(), "[]");
    }

    #[test]
    fn addsuffix_arity() {
        assert!(matches!(
            eval("$(addsuffix .c foo)", &[]),
            Err(MakeError::Arity { parts: 1, .. })
        ));
        assert!(matches!(
            eval("$(addsuffix .c, a, b)", &[]),
            Err(MakeError::Arity { parts: 3, .. })
        ));
    }

    #[test]
    fn other_functions_are_variable_names() {
        assert!(matches!(
            eval("$(addprefix x, a)", &[]),
            Err(MakeError::UndefinedVariable { ref name }) if name == "addprefix x, a"
        ));
        assert_eq!(eval("$(odd name)", &[("odd name", "ok")]).unwrap(), "ok");
        // No trailing space: not the function.
        assert!(matches!(eval("$(addsuffix)", &[]), Err(MakeError::UndefinedVariable { .. })));
    }

    #[test]
    fn works_with_std_maps() {
        let mut map = HashMap::new();
        map.insert("A".to_owned(), "1".to_owned());
        assert_eq!(evaluate("$(A)", &map).unwrap(), "1");

        let tree: BTreeMap<String, String> = [("B".to_owned(), "2".to_owned())].into();
        assert_eq!(evaluate("$(B)", &tree).unwrap(), "2");
    }
}
