//! Mutable per-explorer state, keyed by node path.
//!
//! Entries are rebuilt on every render; this is the only thing that survives
//! between renders. It lives exactly as long as the owning explorer.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::value::{Function, Value};

use super::expansion::DefaultExpansion;
use super::path::TreePath;

/// Cached result of the last invocation of a callable node.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Returned(Value),
    /// Error marker; the message is shown inline at the node.
    Failed(String),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

#[derive(Debug, Default)]
pub struct TreeState {
    expanded: HashMap<TreePath, bool>,
    open_pages: HashMap<TreePath, BTreeSet<usize>>,
    invocations: HashMap<TreePath, Outcome>,
}

impl TreeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit toggle if one happened, otherwise the node's default.
    pub fn is_expanded(&self, path: &TreePath, default: &DefaultExpansion) -> bool {
        self.expanded
            .get(path)
            .copied()
            .unwrap_or_else(|| default.is_expanded())
    }

    /// Set the expansion flag to `explicit`, or flip it. Returns the new flag.
    pub fn toggle(
        &mut self,
        path: &TreePath,
        default: &DefaultExpansion,
        explicit: Option<bool>,
    ) -> bool {
        let next = explicit.unwrap_or_else(|| !self.is_expanded(path, default));
        tracing::debug!(path = %path, expanded = next, "toggle");
        self.expanded.insert(path.clone(), next);
        next
    }

    pub fn is_page_open(&self, path: &TreePath, index: usize) -> bool {
        self.open_pages
            .get(path)
            .is_some_and(|pages| pages.contains(&index))
    }

    /// Open page indices for `path`, ascending.
    pub fn open_pages(&self, path: &TreePath) -> Vec<usize> {
        self.open_pages
            .get(path)
            .map(|pages| pages.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Open the page if closed, close it if open. Returns whether it's open now.
    pub fn toggle_page(&mut self, path: &TreePath, index: usize) -> bool {
        let pages = self.open_pages.entry(path.clone()).or_default();
        let open = if pages.remove(&index) {
            false
        } else {
            pages.insert(index);
            true
        };
        if pages.is_empty() {
            self.open_pages.remove(path);
        }
        tracing::debug!(path = %path, page = index, open, "toggle page");
        open
    }

    /// Call `function` with no arguments and cache the outcome at `path`.
    ///
    /// Replaces any earlier outcome. Failures become [`Outcome::Failed`].
    pub fn invoke(&mut self, path: &TreePath, function: &Function) -> &Outcome {
        let outcome = match function.call() {
            Ok(value) => {
                tracing::debug!(path = %path, result = ?value, "invoked");
                Outcome::Returned(value)
            }
            Err(message) => {
                tracing::warn!(path = %path, error = %message, "invocation failed");
                Outcome::Failed(message)
            }
        };
        self.invocations.insert(path.clone(), outcome);
        &self.invocations[path]
    }

    pub fn invocation(&self, path: &TreePath) -> Option<&Outcome> {
        self.invocations.get(path)
    }
}

/// Serializable view of the state, printed after an interactive `--json` session.
#[derive(Debug, Serialize)]
pub struct StateSummary {
    pub expanded: Vec<(TreePath, bool)>,
    pub open_pages: Vec<(TreePath, Vec<usize>)>,
    pub invoked: Vec<TreePath>,
}

impl TreeState {
    pub fn summary(&self) -> StateSummary {
        let mut expanded: Vec<_> = self.expanded.iter().map(|(p, e)| (p.clone(), *e)).collect();
        expanded.sort();
        let mut open_pages: Vec<_> = self
            .open_pages
            .iter()
            .map(|(p, pages)| (p.clone(), pages.iter().copied().collect()))
            .collect();
        open_pages.sort();
        let mut invoked: Vec<_> = self.invocations.keys().cloned().collect();
        invoked.sort();
        StateSummary {
            expanded,
            open_pages,
            invoked,
        }
    }
}
