//! Node labels and the paths built from them.

use std::fmt;

use serde::{Serialize, Serializer};

/// The key, index, or name shown for one tree node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// Position in an array or iteration order
    Index(usize),
    /// Mapping key or caller-supplied name
    Key(String),
    /// Cached result of re-invoking a callable
    Result,
}

impl Label {
    pub fn key(key: impl Into<String>) -> Self {
        Label::Key(key.into())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Index(i) => write!(f, "{i}"),
            Label::Key(k) => f.write_str(k),
            Label::Result => f.write_str("(result)"),
        }
    }
}

impl From<&str> for Label {
    fn from(key: &str) -> Self {
        Label::Key(key.to_string())
    }
}

impl From<String> for Label {
    fn from(key: String) -> Self {
        Label::Key(key)
    }
}

impl From<usize> for Label {
    fn from(index: usize) -> Self {
        Label::Index(index)
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Label::Index(i) => serializer.serialize_u64(*i as u64),
            Label::Key(k) => serializer.serialize_str(k),
            Label::Result => serializer.serialize_str("(result)"),
        }
    }
}

/// Ordered labels from the root to a node.
///
/// Unique within one tree and stable across renders of the same logical node,
/// which makes it the key for all per-node state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TreePath(Vec<Label>);

impl TreePath {
    pub fn root(label: impl Into<Label>) -> Self {
        TreePath(vec![label.into()])
    }

    /// A new path one level below this one.
    pub fn child(&self, label: Label) -> Self {
        let mut labels = Vec::with_capacity(self.0.len() + 1);
        labels.extend(self.0.iter().cloned());
        labels.push(label);
        TreePath(labels)
    }

    pub fn parent(&self) -> Option<TreePath> {
        match self.0.len() {
            0 | 1 => None,
            n => Some(TreePath(self.0[..n - 1].to_vec())),
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.0
    }

    pub fn last(&self) -> Option<&Label> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, prefix: &TreePath) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl From<Vec<Label>> for TreePath {
    fn from(labels: Vec<Label>) -> Self {
        TreePath(labels)
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" › ")?;
            }
            write!(f, "{label}")?;
        }
        Ok(())
    }
}
