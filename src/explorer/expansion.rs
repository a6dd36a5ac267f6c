//! Default-expansion policy.
//!
//! A default expansion is either a flag or a mapping from child label to a
//! nested default expansion, which lets callers pre-open arbitrary named
//! paths. In config files and on the command line it is written as JSON/TOML:
//! `true`, `false`, or `{ "rows": { "0": true } }`.

use std::collections::BTreeMap;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExplorerError;

use super::path::Label;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ExpansionRepr", into = "ExpansionRepr")]
pub enum DefaultExpansion {
    /// Absent or `false`
    #[default]
    Collapsed,
    /// `true`: expand this node, and give each child a one-entry mapping
    All,
    /// Expand this node; children take their entry from the mapping
    Paths(BTreeMap<String, DefaultExpansion>),
}

impl DefaultExpansion {
    /// Default expansion for the child named `label`.
    pub fn resolve(&self, label: &Label) -> DefaultExpansion {
        match self {
            DefaultExpansion::Collapsed => DefaultExpansion::Collapsed,
            DefaultExpansion::All => {
                let mut only = BTreeMap::new();
                only.insert(label.to_string(), DefaultExpansion::All);
                DefaultExpansion::Paths(only)
            }
            DefaultExpansion::Paths(children) => children
                .get(&label.to_string())
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Presence check used when a node has never been toggled.
    ///
    /// Any mapping counts as expanded, including an empty one.
    pub fn is_expanded(&self) -> bool {
        !matches!(self, DefaultExpansion::Collapsed)
    }

    /// Mapping that opens every node along `labels`, e.g. `["rows", "0"]`.
    pub fn along<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        labels
            .into_iter()
            .rev()
            .fold(DefaultExpansion::All, |inner, label| {
                let mut map = BTreeMap::new();
                map.insert(label, inner);
                DefaultExpansion::Paths(map)
            })
    }
}

/// Free-function form of [`DefaultExpansion::resolve`].
pub fn resolve(parent: &DefaultExpansion, label: &Label) -> DefaultExpansion {
    parent.resolve(label)
}

impl From<bool> for DefaultExpansion {
    fn from(flag: bool) -> Self {
        if flag {
            DefaultExpansion::All
        } else {
            DefaultExpansion::Collapsed
        }
    }
}

/// Parses the JSON form, e.g. `true` or `{"state": true}`.
impl FromStr for DefaultExpansion {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s.trim()).map_err(|e| ExplorerError::InvalidExpansion(e.to_string()))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ExpansionRepr {
    Flag(bool),
    Paths(BTreeMap<String, DefaultExpansion>),
    Absent(()),
}

impl From<ExpansionRepr> for DefaultExpansion {
    fn from(repr: ExpansionRepr) -> Self {
        match repr {
            ExpansionRepr::Flag(flag) => flag.into(),
            ExpansionRepr::Paths(map) => DefaultExpansion::Paths(map),
            ExpansionRepr::Absent(()) => DefaultExpansion::Collapsed,
        }
    }
}

impl From<DefaultExpansion> for ExpansionRepr {
    fn from(expansion: DefaultExpansion) -> Self {
        match expansion {
            DefaultExpansion::Collapsed => ExpansionRepr::Flag(false),
            DefaultExpansion::All => ExpansionRepr::Flag(true),
            DefaultExpansion::Paths(map) => ExpansionRepr::Paths(map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(entries: &[(&str, DefaultExpansion)]) -> DefaultExpansion {
        DefaultExpansion::Paths(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn true_expands_exactly_one_child() {
        let child = resolve(&DefaultExpansion::All, &Label::key("a"));
        assert_eq!(child, paths(&[("a", DefaultExpansion::All)]));
        assert!(child.is_expanded());

        // Grandchildren with a different label stay collapsed.
        let grandchild = child.resolve(&Label::Index(0));
        assert_eq!(grandchild, DefaultExpansion::Collapsed);
    }

    #[test]
    fn mapping_lookup() {
        let parent = paths(&[("a", DefaultExpansion::All)]);
        assert_eq!(parent.resolve(&Label::key("a")), DefaultExpansion::All);
        assert_eq!(parent.resolve(&Label::key("b")), DefaultExpansion::Collapsed);
    }

    #[test]
    fn collapsed_stays_collapsed() {
        let child = DefaultExpansion::Collapsed.resolve(&Label::key("a"));
        assert_eq!(child, DefaultExpansion::Collapsed);
        assert!(!child.is_expanded());
    }

    #[test]
    fn index_labels_match_string_keys() {
        let parent = paths(&[("0", DefaultExpansion::All)]);
        assert_eq!(parent.resolve(&Label::Index(0)), DefaultExpansion::All);
    }

    #[test]
    fn empty_mapping_counts_as_expanded() {
        assert!(DefaultExpansion::Paths(BTreeMap::new()).is_expanded());
    }

    #[test]
    fn along_builds_nested_path() {
        let expansion = DefaultExpansion::along(["rows", "0"]);
        let rows = expansion.resolve(&Label::key("rows"));
        assert!(rows.is_expanded());
        assert_eq!(rows.resolve(&Label::Index(0)), DefaultExpansion::All);
        assert_eq!(rows.resolve(&Label::Index(1)), DefaultExpansion::Collapsed);
    }

    #[test]
    fn deserializes_flags_and_mappings() {
        let parsed: DefaultExpansion = serde_json::from_str("true").unwrap();
        assert_eq!(parsed, DefaultExpansion::All);

        let parsed: DefaultExpansion = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, DefaultExpansion::Collapsed);

        let parsed: DefaultExpansion =
            serde_json::from_str(r#"{"state": {"sorting": true}, "columns": false}"#).unwrap();
        let state = parsed.resolve(&Label::key("state"));
        assert_eq!(state.resolve(&Label::key("sorting")), DefaultExpansion::All);
        assert_eq!(
            parsed.resolve(&Label::key("columns")),
            DefaultExpansion::Collapsed
        );
    }

    #[test]
    fn serializes_back_to_flags() {
        let json = serde_json::to_string(&paths(&[("a", DefaultExpansion::All)])).unwrap();
        assert_eq!(json, r#"{"a":true}"#);
    }

    #[test]
    fn parses_from_command_line_text() {
        assert_eq!(" true ".parse::<DefaultExpansion>(), Ok(DefaultExpansion::All));
        let parsed: DefaultExpansion = r#"{"rows": true}"#.parse().unwrap();
        assert!(parsed.resolve(&Label::key("rows")).is_expanded());
        assert!(matches!(
            "rows".parse::<DefaultExpansion>(),
            Err(ExplorerError::InvalidExpansion(_))
        ));
    }
}
