//! Cursor state over the visible rows of one or more explorers.

use tablescope::explorer::Explorer;
use tablescope::panel::Panel;

use super::render::{flatten, Row, RowAction};

/// Something the tree view can browse.
pub trait Surface {
    fn explorers(&self) -> Vec<&Explorer>;
    fn explorer_mut(&mut self, index: usize) -> Option<&mut Explorer>;

    fn is_open(&self) -> bool {
        true
    }

    /// Flip the open flag. Returns the new value.
    fn toggle_open(&mut self) -> bool {
        true
    }
}

impl Surface for Explorer {
    fn explorers(&self) -> Vec<&Explorer> {
        vec![self]
    }

    fn explorer_mut(&mut self, index: usize) -> Option<&mut Explorer> {
        (index == 0).then_some(self)
    }
}

impl Surface for Panel {
    fn explorers(&self) -> Vec<&Explorer> {
        self.sections().map(|(_, explorer)| explorer).collect()
    }

    fn explorer_mut(&mut self, index: usize) -> Option<&mut Explorer> {
        self.sections_mut().nth(index).map(|(_, explorer)| explorer)
    }

    fn is_open(&self) -> bool {
        Panel::is_open(self)
    }

    fn toggle_open(&mut self) -> bool {
        Panel::toggle_open(self)
    }
}

/// Tree view action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeAction {
    /// Move cursor up
    Up,
    /// Move cursor down
    Down,
    /// Toggle group, toggle page or re-invoke
    Activate,
    /// Open the group or page under the cursor
    Expand,
    /// Close the row under the cursor, or jump to its parent
    Collapse,
    /// Show or hide the whole panel
    TogglePanel,
    /// Quit
    Quit,
}

pub struct TreeView<S> {
    surface: S,
    cursor: usize,
    rows: Vec<Row>,
}

impl<S: Surface> TreeView<S> {
    pub fn new(surface: S) -> Self {
        let mut view = Self {
            surface,
            cursor: 0,
            rows: Vec::new(),
        };
        view.rebuild_rows();
        view
    }

    /// Re-render every explorer and clamp the cursor.
    pub fn rebuild_rows(&mut self) {
        self.rows = if self.surface.is_open() {
            self.surface
                .explorers()
                .into_iter()
                .enumerate()
                .flat_map(|(index, explorer)| flatten(index, &explorer.render()))
                .collect()
        } else {
            Vec::new()
        };
        if !self.rows.is_empty() && self.cursor >= self.rows.len() {
            self.cursor = self.rows.len() - 1;
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_open(&self) -> bool {
        self.surface.is_open()
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Apply an action. Returns `true` when the view should close.
    pub fn handle_action(&mut self, action: TreeAction) -> bool {
        match action {
            TreeAction::Up => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            TreeAction::Down => {
                if self.cursor + 1 < self.rows.len() {
                    self.cursor += 1;
                }
            }
            TreeAction::Activate => self.apply(None),
            TreeAction::Expand => self.apply(Some(true)),
            TreeAction::Collapse => {
                let is_open = self.rows.get(self.cursor).is_some_and(Row::is_open);
                if is_open {
                    self.apply(Some(false));
                } else if let Some(parent) = self.parent_row() {
                    self.cursor = parent;
                }
            }
            TreeAction::TogglePanel => {
                self.surface.toggle_open();
                self.rebuild_rows();
            }
            TreeAction::Quit => return true,
        }
        false
    }

    /// Run the row's action. `target` asks for a specific open state and
    /// leaves callables alone.
    fn apply(&mut self, target: Option<bool>) {
        let Some(row) = self.rows.get(self.cursor) else {
            return;
        };
        let (tree, open) = (row.tree, row.is_open());
        let Some(action) = row.action.clone() else {
            return;
        };
        let Some(explorer) = self.surface.explorer_mut(tree) else {
            return;
        };

        let result = match action {
            RowAction::Toggle(path) => explorer.toggle(&path, target).map(|_| ()),
            RowAction::TogglePage(path, index) => {
                if target.is_some_and(|want| want == open) {
                    Ok(())
                } else {
                    explorer.toggle_page(&path, index).map(|_| ())
                }
            }
            RowAction::Invoke(path) => {
                if target.is_some() {
                    Ok(())
                } else {
                    explorer.invoke(&path).map(|_| ())
                }
            }
        };
        if let Err(err) = result {
            tracing::warn!(error = %err, "tree action failed");
        }
        self.rebuild_rows();
    }

    fn parent_row(&self) -> Option<usize> {
        let current = self.rows.get(self.cursor)?;
        self.rows[..self.cursor]
            .iter()
            .rposition(|row| row.tree == current.tree && row.depth < current.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::tree_view::render::RowContent;
    use tablescope::explorer::{ExplorerOptions, Label, TreePath};
    use tablescope::panel::{JsonSnapshot, MemoryStore, PanelPreference};
    use tablescope::Value;

    fn view() -> TreeView<Explorer> {
        let value = Value::object([
            ("n", Value::Int(1)),
            ("list", Value::array((0..5).map(Value::Int))),
            ("f", Value::function(|| Ok(Value::str("hi")))),
        ]);
        // Root children inline, the list paged in twos.
        let list = TreePath::root("root").child(Label::key("list"));
        let options = ExplorerOptions::builder()
            .page_size(3)
            .override_page_size(list, 2)
            .build()
            .unwrap();
        TreeView::new(Explorer::new("root", value, &options))
    }

    #[test]
    fn starts_with_collapsed_root() {
        let view = view();
        assert_eq!(view.rows().len(), 1);
        assert_eq!(view.cursor(), 0);
    }

    #[test]
    fn activate_expands_and_cursor_stays_in_bounds() {
        let mut view = view();
        view.handle_action(TreeAction::Activate);
        // root, n, list, f
        assert_eq!(view.rows().len(), 4);

        for _ in 0..10 {
            view.handle_action(TreeAction::Down);
        }
        assert_eq!(view.cursor(), 3);
        view.handle_action(TreeAction::Up);
        assert_eq!(view.cursor(), 2);
    }

    #[test]
    fn expand_opens_pages_without_closing_them() {
        let mut view = view();
        view.handle_action(TreeAction::Expand);
        view.handle_action(TreeAction::Down);
        view.handle_action(TreeAction::Down);
        // list: 5 items in pages of 2, three page rows
        view.handle_action(TreeAction::Expand);
        assert_eq!(view.rows().len(), 7);
        assert!(matches!(view.rows()[3].content, RowContent::Page { open: false, .. }));

        view.handle_action(TreeAction::Down);
        view.handle_action(TreeAction::Expand);
        view.handle_action(TreeAction::Expand);
        assert!(view.rows()[3].is_open());
        assert_eq!(view.rows().len(), 9);
    }

    #[test]
    fn collapse_jumps_to_parent_then_closes_it() {
        let mut view = view();
        view.handle_action(TreeAction::Expand);
        view.handle_action(TreeAction::Down);
        view.handle_action(TreeAction::Collapse);
        assert_eq!(view.cursor(), 0);
        view.handle_action(TreeAction::Collapse);
        assert_eq!(view.rows().len(), 1);
    }

    #[test]
    fn activate_invokes_callables() {
        let mut view = view();
        view.handle_action(TreeAction::Expand);
        view.handle_action(TreeAction::Down);
        view.handle_action(TreeAction::Down);
        view.handle_action(TreeAction::Down);
        view.handle_action(TreeAction::Activate);

        let last = view.rows().last().unwrap();
        assert_eq!(
            last.content,
            RowContent::Leaf {
                label: Label::Result,
                text: "\"hi\"".to_string()
            }
        );
    }

    #[test]
    fn panel_toggle_hides_rows() {
        let snapshot = JsonSnapshot::parse(r#"{"state": {}}"#).unwrap();
        let panel = Panel::new(
            &snapshot,
            &ExplorerOptions::default(),
            PanelPreference::load(Box::new(MemoryStore::new()), true),
        );
        let mut view = TreeView::new(panel);
        assert_eq!(view.rows().len(), 9);

        view.handle_action(TreeAction::TogglePanel);
        assert!(!view.is_open());
        assert!(view.rows().is_empty());

        view.handle_action(TreeAction::TogglePanel);
        assert_eq!(view.rows().len(), 9);
        assert!(view.into_surface().section(tablescope::Section::State).is_some());
    }

    #[test]
    fn quit_closes_view() {
        let mut view = view();
        assert!(view.handle_action(TreeAction::Quit));
        assert!(!view.handle_action(TreeAction::Down));
    }
}
