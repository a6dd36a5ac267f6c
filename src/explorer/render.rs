//! Rendering entries into visual nodes.
//!
//! Rendering is a pure function of an [`Entry`] and a [`TreeState`]: it
//! decides what is visible and recurses into visible children only, building
//! their entries on the way down.

use serde::Serialize;

use super::classify::Kind;
use super::entry::{Entry, EntrySeed};
use super::paginate::page_range;
use super::path::{Label, TreePath};
use super::serialize::{to_display_string, DEFAULT_MAX_LEAF_CHARS};
use super::state::{Outcome, TreeState};

/// Rendered form of one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Visual {
    /// Non-empty array, iterable or object
    Group {
        path: TreePath,
        label: Label,
        kind: Kind,
        count: usize,
        expanded: bool,
        body: GroupBody,
    },
    /// Callable with a re-invoke control
    Callable {
        path: TreePath,
        label: Label,
        outcome: Option<RenderedOutcome>,
    },
    /// `label: text`
    Leaf {
        path: TreePath,
        label: Label,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", content = "children", rename_all = "snake_case")]
pub enum GroupBody {
    Collapsed,
    /// Single page: children shown directly
    Inline(Vec<Visual>),
    /// Several pages, each toggled on its own
    Paged(Vec<PageGroup>),
}

/// One page of a paged group. `children` is empty while the page is closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageGroup {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub open: bool,
    pub children: Vec<Visual>,
}

impl PageGroup {
    /// `[start … end]`
    pub fn range_label(&self) -> String {
        format!("[{} … {}]", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum RenderedOutcome {
    Returned(Box<Visual>),
    Failed(String),
}

impl Visual {
    pub fn path(&self) -> &TreePath {
        match self {
            Visual::Group { path, .. } | Visual::Callable { path, .. } | Visual::Leaf { path, .. } => path,
        }
    }

    pub fn label(&self) -> &Label {
        match self {
            Visual::Group { label, .. }
            | Visual::Callable { label, .. }
            | Visual::Leaf { label, .. } => label,
        }
    }

    /// Child count text for groups, e.g. `(Iterable) 3 items`.
    pub fn summary(&self) -> Option<String> {
        match self {
            Visual::Group { kind, count, .. } => Some(count_summary(*kind, *count)),
            _ => None,
        }
    }
}

fn count_summary(kind: Kind, count: usize) -> String {
    let prefix = if kind == Kind::Iterable { "(Iterable) " } else { "" };
    let noun = if count == 1 { "item" } else { "items" };
    format!("{prefix}{count} {noun}")
}

/// Maps an entry and the current state to a visual node.
///
/// Implementations recurse through [`Renderer::render_child`] so overrides
/// apply at every level.
pub trait Renderer {
    fn render(&self, entry: &Entry, state: &TreeState) -> Visual;

    fn render_child(&self, seed: &EntrySeed, state: &TreeState) -> Visual {
        self.render(&seed.build(), state)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DefaultRenderer {
    pub max_leaf_chars: usize,
}

impl Default for DefaultRenderer {
    fn default() -> Self {
        Self {
            max_leaf_chars: DEFAULT_MAX_LEAF_CHARS,
        }
    }
}

impl Renderer for DefaultRenderer {
    fn render(&self, entry: &Entry, state: &TreeState) -> Visual {
        render_default(self, entry, state, self.max_leaf_chars)
    }
}

/// Render `entry` with the default renderer.
pub fn render(entry: &Entry, state: &TreeState) -> Visual {
    DefaultRenderer::default().render(entry, state)
}

/// The default rendering rules, recursing through `renderer`.
///
/// Custom renderers can delegate here for the kinds they don't handle.
pub fn render_default<R: Renderer + ?Sized>(
    renderer: &R,
    entry: &Entry,
    state: &TreeState,
    max_leaf_chars: usize,
) -> Visual {
    let path = entry.path().clone();
    let label = entry.label().clone();

    match entry.kind {
        Kind::Callable => {
            let outcome = state.invocation(entry.path()).map(|outcome| match outcome {
                Outcome::Returned(value) => RenderedOutcome::Returned(Box::new(
                    renderer.render_child(&entry.result_seed(value.clone()), state),
                )),
                Outcome::Failed(message) => RenderedOutcome::Failed(message.clone()),
            });
            Visual::Callable {
                path,
                label,
                outcome,
            }
        }
        kind if kind.is_container() && entry.child_count() > 0 => {
            let expanded = state.is_expanded(entry.path(), entry.default_expansion());
            let body = if expanded {
                group_body(renderer, entry, state)
            } else {
                GroupBody::Collapsed
            };
            Visual::Group {
                path,
                label,
                kind,
                count: entry.child_count(),
                expanded,
                body,
            }
        }
        // Scalars and empty containers
        _ => Visual::Leaf {
            path,
            label,
            text: to_display_string(entry.value(), max_leaf_chars),
        },
    }
}

fn group_body<R: Renderer + ?Sized>(renderer: &R, entry: &Entry, state: &TreeState) -> GroupBody {
    let pages = entry.child_pages();
    if pages.len() == 1 {
        return GroupBody::Inline(
            pages[0]
                .iter()
                .map(|seed| renderer.render_child(seed, state))
                .collect(),
        );
    }

    let total = entry.child_count();
    let groups = pages
        .iter()
        .enumerate()
        .map(|(index, page)| {
            let range = page_range(index, entry.page_size(), total);
            let open = state.is_page_open(entry.path(), index);
            let children = if open {
                page.iter()
                    .map(|seed| renderer.render_child(seed, state))
                    .collect()
            } else {
                Vec::new()
            };
            PageGroup {
                index,
                start: *range.start(),
                end: *range.end(),
                open,
                children,
            }
        })
        .collect();
    GroupBody::Paged(groups)
}
