//! Entry construction.
//!
//! An [`EntrySeed`] is the cheap description of a node that hasn't been
//! classified yet; [`EntrySeed::build`] turns it into an [`Entry`] with its
//! children enumerated one level deep. Nothing below the visible frontier is
//! ever built, and building never touches per-node state.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::rc::Rc;

use crate::value::Value;

use super::classify::{classify, Kind};
use super::expansion::DefaultExpansion;
use super::paginate::paginate;
use super::path::{Label, TreePath};

/// Per-path page size overrides, inherited by descendants.
pub type PageSizeOverrides = Rc<HashMap<TreePath, NonZeroUsize>>;

/// Inherited context for one node, before classification.
#[derive(Debug, Clone)]
pub struct EntrySeed {
    pub label: Label,
    pub value: Value,
    pub path: TreePath,
    pub depth: usize,
    pub default_expansion: DefaultExpansion,
    pub page_size: NonZeroUsize,
    overrides: PageSizeOverrides,
    /// Identities of the aggregates above this node
    ancestors: Rc<Vec<usize>>,
}

impl EntrySeed {
    /// Seed for the root of an explorer.
    pub fn root(
        label: Label,
        value: Value,
        depth: usize,
        default_expansion: DefaultExpansion,
        page_size: NonZeroUsize,
        overrides: PageSizeOverrides,
    ) -> Self {
        let path = TreePath::root(label.clone());
        let page_size = overrides.get(&path).copied().unwrap_or(page_size);
        Self {
            label,
            value,
            path,
            depth,
            default_expansion,
            page_size,
            overrides,
            ancestors: Rc::default(),
        }
    }

    /// Seed for a child of `self` carrying `value` under `label`.
    ///
    /// A child that points back at one of its ancestors starts collapsed, so
    /// default expansion can't follow a cycle forever.
    fn child(&self, label: Label, value: Value) -> Self {
        let path = self.path.child(label.clone());
        let page_size = self.overrides.get(&path).copied().unwrap_or(self.page_size);

        let ancestors = match self.value.identity() {
            Some(id) => {
                let mut ancestors = Vec::clone(&self.ancestors);
                ancestors.push(id);
                Rc::new(ancestors)
            }
            None => Rc::clone(&self.ancestors),
        };
        let revisits = value
            .identity()
            .is_some_and(|id| ancestors.contains(&id));
        let default_expansion = if revisits {
            tracing::debug!(path = %path, "reference cycle, collapsing by default");
            DefaultExpansion::Collapsed
        } else {
            self.default_expansion.resolve(&label)
        };

        Self {
            default_expansion,
            label,
            value,
            path,
            depth: self.depth + 1,
            page_size,
            overrides: Rc::clone(&self.overrides),
            ancestors,
        }
    }

    /// Classify the value and enumerate its children.
    pub fn build(&self) -> Entry {
        let kind = classify(&self.value);
        let children = kind.is_container().then(|| {
            enumerate(&self.value, kind)
                .into_iter()
                .map(|(label, value)| self.child(label, value))
                .collect()
        });

        Entry {
            seed: self.clone(),
            kind,
            children,
        }
    }
}

/// Children of a container value in kind-specific order.
fn enumerate(value: &Value, kind: Kind) -> Vec<(Label, Value)> {
    match (kind, value) {
        (Kind::Object, Value::Object(obj)) => match obj.try_borrow() {
            Ok(obj) => obj
                .fields()
                .iter()
                .map(|(k, v)| (Label::Key(k.clone()), v.clone()))
                .collect(),
            Err(_) => {
                tracing::warn!("object is mutably borrowed, listing no children");
                Vec::new()
            }
        },
        (Kind::Array | Kind::Iterable, _) => value
            .iter_values()
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Label::Index(i), v))
            .collect(),
        _ => Vec::new(),
    }
}

/// One classified tree node.
#[derive(Debug, Clone)]
pub struct Entry {
    seed: EntrySeed,
    pub kind: Kind,
    children: Option<Vec<EntrySeed>>,
}

impl Entry {
    pub fn label(&self) -> &Label {
        &self.seed.label
    }

    pub fn value(&self) -> &Value {
        &self.seed.value
    }

    pub fn path(&self) -> &TreePath {
        &self.seed.path
    }

    pub fn depth(&self) -> usize {
        self.seed.depth
    }

    pub fn default_expansion(&self) -> &DefaultExpansion {
        &self.seed.default_expansion
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.seed.page_size
    }

    /// Present for arrays, iterables and objects; `None` otherwise.
    pub fn child_entries(&self) -> Option<&[EntrySeed]> {
        self.children.as_deref()
    }

    /// Children split into pages; empty when there are no children.
    pub fn child_pages(&self) -> Vec<&[EntrySeed]> {
        match &self.children {
            Some(children) => paginate(children, self.seed.page_size),
            None => Vec::new(),
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, Vec::len)
    }

    pub fn child(&self, label: &Label) -> Option<&EntrySeed> {
        self.children
            .as_ref()?
            .iter()
            .find(|seed| &seed.label == label)
    }

    /// Seed for the sub-tree showing a callable's cached result.
    ///
    /// It starts collapsed and lives under a dedicated `Result` segment.
    pub fn result_seed(&self, value: Value) -> EntrySeed {
        let mut seed = self.seed.child(Label::Result, value);
        seed.default_expansion = DefaultExpansion::Collapsed;
        seed
    }

    pub fn seed(&self) -> &EntrySeed {
        &self.seed
    }
}
