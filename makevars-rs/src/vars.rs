//! Variable mapping produced by extraction.
//!
//! Plain string-valued name → value table.  Deferred (`=`) values are kept
//! as raw text; nothing in here re-expands them.

use std::collections::{BTreeMap, HashMap};

use crate::boolean::parse_bool;
use crate::error::Result;

/// Name → value mapping of Makefile variables.
///
/// Iteration is ordered by name so that dumps are stable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MakeVars {
    vars: BTreeMap<String, String>,
}

impl MakeVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or overwrite) a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Get the string value of a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Get the value of a variable parsed as a boolean.
    ///
    /// `None` if the variable is not set; an error if it is set to anything
    /// other than `true` or `false`.
    pub fn get_bool(&self, name: &str) -> Option<Result<bool>> {
        self.get(name).map(parse_bool)
    }

    /// Returns `true` if the variable is set.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Iterate over all variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MakeVars {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut vars = MakeVars::new();
        vars.extend(iter);
        vars
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for MakeVars {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl From<HashMap<String, String>> for MakeVars {
    fn from(map: HashMap<String, String>) -> Self {
        Self { vars: map.into_iter().collect() }
    }
}

impl From<BTreeMap<String, String>> for MakeVars {
    fn from(vars: BTreeMap<String, String>) -> Self {
        Self { vars }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
