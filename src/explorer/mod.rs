//! Generic value-tree explorer
//!
//! Turns an arbitrary [`Value`] into a lazily expanded, paginated tree with
//! per-node expansion state and on-demand re-invocation of callables.
//!
//! # Module Structure
//!
//! - `classify` - Kind discrimination with fixed-priority rules
//! - `expansion` - Default-expansion policy inherited from parent to child
//! - `paginate` - Fixed-size paging of child entries
//! - `entry` - Entry construction, one level at a time
//! - `state` - Expansion flags, open pages and cached invocation results
//! - `render` - Pure mapping from entry + state to a visual node
//! - `serialize` - Leaf text that never fails

mod classify;
mod entry;
mod expansion;
mod paginate;
mod path;
mod render;
mod serialize;
mod state;

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::rc::Rc;

use crate::error::ExplorerError;
use crate::value::Value;

pub use classify::{classify, Kind};
pub use entry::{Entry, EntrySeed, PageSizeOverrides};
pub use expansion::{resolve, DefaultExpansion};
pub use paginate::{page_range, paginate, DEFAULT_PAGE_SIZE};
pub use path::{Label, TreePath};
pub use render::{
    render, render_default, DefaultRenderer, GroupBody, PageGroup, RenderedOutcome, Renderer,
    Visual,
};
pub use serialize::{default_text, to_display_string, try_serialize, CIRCULAR, DEFAULT_MAX_LEAF_CHARS};
pub use state::{Outcome, StateSummary, TreeState};

/// Construction options for an [`Explorer`].
#[derive(Debug, Clone)]
pub struct ExplorerOptions {
    pub page_size: NonZeroUsize,
    /// Depth of the root, for embedding inside another tree
    pub depth: usize,
    pub default_expanded: DefaultExpansion,
    pub max_leaf_chars: usize,
    /// Page size for the node at a path and everything below it
    pub page_size_overrides: HashMap<TreePath, NonZeroUsize>,
}

impl Default for ExplorerOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            depth: 0,
            default_expanded: DefaultExpansion::Collapsed,
            max_leaf_chars: DEFAULT_MAX_LEAF_CHARS,
            page_size_overrides: HashMap::new(),
        }
    }
}

impl ExplorerOptions {
    pub fn builder() -> ExplorerOptionsBuilder {
        ExplorerOptionsBuilder::default()
    }
}

/// Validating builder for [`ExplorerOptions`].
#[derive(Debug, Clone, Default)]
pub struct ExplorerOptionsBuilder {
    page_size: Option<usize>,
    depth: usize,
    default_expanded: DefaultExpansion,
    max_leaf_chars: Option<usize>,
    overrides: Vec<(TreePath, usize)>,
}

impl ExplorerOptionsBuilder {
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn default_expanded(mut self, expansion: impl Into<DefaultExpansion>) -> Self {
        self.default_expanded = expansion.into();
        self
    }

    pub fn max_leaf_chars(mut self, max: usize) -> Self {
        self.max_leaf_chars = Some(max);
        self
    }

    pub fn override_page_size(mut self, path: TreePath, page_size: usize) -> Self {
        self.overrides.push((path, page_size));
        self
    }

    pub fn build(self) -> Result<ExplorerOptions, ExplorerError> {
        let page_size = match self.page_size {
            Some(size) => NonZeroUsize::new(size).ok_or(ExplorerError::InvalidPageSize)?,
            None => DEFAULT_PAGE_SIZE,
        };
        let page_size_overrides = self
            .overrides
            .into_iter()
            .map(|(path, size)| {
                NonZeroUsize::new(size)
                    .map(|size| (path, size))
                    .ok_or(ExplorerError::InvalidPageSize)
            })
            .collect::<Result<_, _>>()?;

        Ok(ExplorerOptions {
            page_size,
            depth: self.depth,
            default_expanded: self.default_expanded,
            max_leaf_chars: self.max_leaf_chars.unwrap_or(DEFAULT_MAX_LEAF_CHARS),
            page_size_overrides,
        })
    }
}

/// One root explorer instance: a value, its options, and its own state.
pub struct Explorer {
    root: EntrySeed,
    state: TreeState,
    renderer: Box<dyn Renderer>,
}

impl Explorer {
    pub fn new(label: impl Into<Label>, value: Value, options: &ExplorerOptions) -> Self {
        let root = EntrySeed::root(
            label.into(),
            value,
            options.depth,
            options.default_expanded.clone(),
            options.page_size,
            Rc::new(options.page_size_overrides.clone()),
        );
        Self {
            root,
            state: TreeState::new(),
            renderer: Box::new(DefaultRenderer {
                max_leaf_chars: options.max_leaf_chars,
            }),
        }
    }

    /// Replace the default renderer.
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn label(&self) -> &Label {
        &self.root.label
    }

    pub fn root_path(&self) -> &TreePath {
        &self.root.path
    }

    pub fn root_entry(&self) -> Entry {
        self.root.build()
    }

    pub fn state(&self) -> &TreeState {
        &self.state
    }

    pub fn render(&self) -> Visual {
        self.renderer.render(&self.root.build(), &self.state)
    }

    /// Build the entry at `path`, following cached invocation results through
    /// `Result` segments.
    pub fn locate(&self, path: &TreePath) -> Option<Entry> {
        let (first, rest) = path.labels().split_first()?;
        if first != &self.root.label {
            return None;
        }

        let mut entry = self.root.build();
        for label in rest {
            let seed = match label {
                Label::Result => match self.state.invocation(entry.path())? {
                    Outcome::Returned(value) => entry.result_seed(value.clone()),
                    Outcome::Failed(_) => return None,
                },
                _ => entry.child(label)?.clone(),
            };
            entry = seed.build();
        }
        Some(entry)
    }

    pub fn is_expanded(&self, path: &TreePath) -> bool {
        self.locate(path)
            .is_some_and(|entry| self.state.is_expanded(path, entry.default_expansion()))
    }

    /// Set or flip the expansion flag of the node at `path`.
    pub fn toggle(&mut self, path: &TreePath, explicit: Option<bool>) -> Result<bool, ExplorerError> {
        let entry = self
            .locate(path)
            .ok_or_else(|| ExplorerError::NoSuchNode(path.clone()))?;
        Ok(self.state.toggle(path, entry.default_expansion(), explicit))
    }

    /// Open or close one page of the node at `path`.
    pub fn toggle_page(&mut self, path: &TreePath, index: usize) -> Result<bool, ExplorerError> {
        let entry = self
            .locate(path)
            .ok_or_else(|| ExplorerError::NoSuchNode(path.clone()))?;
        if index >= entry.child_pages().len() {
            return Err(ExplorerError::NoSuchNode(path.clone()));
        }
        Ok(self.state.toggle_page(path, index))
    }

    /// Re-invoke the callable at `path` and cache its outcome.
    pub fn invoke(&mut self, path: &TreePath) -> Result<&Outcome, ExplorerError> {
        let entry = self
            .locate(path)
            .ok_or_else(|| ExplorerError::NoSuchNode(path.clone()))?;
        match entry.value() {
            Value::Function(function) => Ok(self.state.invoke(path, function)),
            _ => Err(ExplorerError::NotCallable(path.clone())),
        }
    }
}

impl std::fmt::Debug for Explorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer")
            .field("root", &self.root.path)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_rejects_zero_page_size() {
        let err = ExplorerOptions::builder().page_size(0).build().unwrap_err();
        assert_eq!(err, ExplorerError::InvalidPageSize);

        let err = ExplorerOptions::builder()
            .override_page_size(TreePath::root("x"), 0)
            .build()
            .unwrap_err();
        assert_eq!(err, ExplorerError::InvalidPageSize);
    }

    #[test]
    fn builder_defaults() {
        let options = ExplorerOptions::builder().build().unwrap();
        assert_eq!(options.page_size.get(), 100);
        assert_eq!(options.depth, 0);
        assert_eq!(options.default_expanded, DefaultExpansion::Collapsed);
    }

    #[test]
    fn root_depth_is_configurable() {
        let options = ExplorerOptions::builder().depth(3).build().unwrap();
        let explorer = Explorer::new("nested", Value::object([("a", Value::Int(1))]), &options);
        let root = explorer.root_entry();
        assert_eq!(root.depth(), 3);
        assert_eq!(root.child_entries().unwrap()[0].depth, 4);
    }

    #[test]
    fn locate_walks_children() {
        let value = Value::object([("rows", Value::array([Value::Int(5)]))]);
        let explorer = Explorer::new("root", value, &ExplorerOptions::default());
        let path = TreePath::root("root")
            .child(Label::key("rows"))
            .child(Label::Index(0));
        let entry = explorer.locate(&path).unwrap();
        assert_eq!(entry.value(), &Value::Int(5));
        assert!(explorer.locate(&TreePath::root("other")).is_none());
    }

    #[test]
    fn interaction_errors() {
        let value = Value::object([("n", Value::Int(1))]);
        let mut explorer = Explorer::new("root", value, &ExplorerOptions::default());
        let missing = TreePath::root("root").child(Label::key("zzz"));
        assert_eq!(
            explorer.toggle(&missing, None),
            Err(ExplorerError::NoSuchNode(missing.clone()))
        );
        let n = TreePath::root("root").child(Label::key("n"));
        assert_eq!(
            explorer.invoke(&n).map(|_| ()),
            Err(ExplorerError::NotCallable(n))
        );
        assert!(explorer.toggle_page(&TreePath::root("root"), 5).is_err());
    }
}
