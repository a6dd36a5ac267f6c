//! Flattening visual trees into terminal rows.

use tablescope::explorer::{GroupBody, Label, RenderedOutcome, TreePath, Visual};

use crate::ui::theme::{colors, paint, strong, Icons};

/// What activating a row does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Toggle(TreePath),
    TogglePage(TreePath, usize),
    Invoke(TreePath),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowContent {
    Group {
        label: Label,
        expanded: bool,
        summary: String,
    },
    Page {
        range: String,
        open: bool,
    },
    Callable {
        label: Label,
    },
    Leaf {
        label: Label,
        text: String,
    },
    Error {
        message: String,
    },
}

/// One visible line of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Index of the tree this row belongs to
    pub tree: usize,
    pub depth: usize,
    pub content: RowContent,
    pub action: Option<RowAction>,
}

impl Row {
    pub fn is_open(&self) -> bool {
        match self.content {
            RowContent::Group { expanded, .. } => expanded,
            RowContent::Page { open, .. } => open,
            _ => false,
        }
    }
}

/// Visible rows of `visual`, top to bottom.
pub fn flatten(tree: usize, visual: &Visual) -> Vec<Row> {
    let mut rows = Vec::new();
    push_rows(tree, visual, 0, &mut rows);
    rows
}

fn push_rows(tree: usize, visual: &Visual, depth: usize, rows: &mut Vec<Row>) {
    match visual {
        Visual::Group {
            path,
            label,
            expanded,
            body,
            ..
        } => {
            rows.push(Row {
                tree,
                depth,
                content: RowContent::Group {
                    label: label.clone(),
                    expanded: *expanded,
                    summary: visual.summary().unwrap_or_default(),
                },
                action: Some(RowAction::Toggle(path.clone())),
            });
            match body {
                GroupBody::Collapsed => {}
                GroupBody::Inline(children) => {
                    for child in children {
                        push_rows(tree, child, depth + 1, rows);
                    }
                }
                GroupBody::Paged(pages) => {
                    for page in pages {
                        rows.push(Row {
                            tree,
                            depth: depth + 1,
                            content: RowContent::Page {
                                range: page.range_label(),
                                open: page.open,
                            },
                            action: Some(RowAction::TogglePage(path.clone(), page.index)),
                        });
                        for child in &page.children {
                            push_rows(tree, child, depth + 2, rows);
                        }
                    }
                }
            }
        }
        Visual::Callable {
            path,
            label,
            outcome,
        } => {
            rows.push(Row {
                tree,
                depth,
                content: RowContent::Callable {
                    label: label.clone(),
                },
                action: Some(RowAction::Invoke(path.clone())),
            });
            match outcome {
                Some(RenderedOutcome::Returned(result)) => {
                    push_rows(tree, result, depth + 1, rows)
                }
                Some(RenderedOutcome::Failed(message)) => rows.push(Row {
                    tree,
                    depth: depth + 1,
                    content: RowContent::Error {
                        message: message.clone(),
                    },
                    action: None,
                }),
                None => {}
            }
        }
        Visual::Leaf { label, text, .. } => rows.push(Row {
            tree,
            depth,
            content: RowContent::Leaf {
                label: label.clone(),
                text: text.clone(),
            },
            action: None,
        }),
    }
}

/// Format a row as one line of text, without the cursor column.
pub fn format_row(row: &Row, icons: &Icons, color: bool) -> String {
    let indent = "  ".repeat(row.depth);
    let body = match &row.content {
        RowContent::Group {
            label,
            expanded,
            summary,
        } => format!(
            "{} {} {}",
            icons.toggle(*expanded),
            strong(&label.to_string(), color),
            paint(summary, colors::GRAY, color)
        ),
        RowContent::Page { range, open } => {
            format!("{} {}", icons.toggle(*open), paint(range, colors::GRAY, color))
        }
        RowContent::Callable { label } => format!(
            "{} {}",
            strong(&label.to_string(), color),
            paint(icons.refresh, colors::ACTIVE, color)
        ),
        RowContent::Leaf { label, text } => {
            format!("{}: {}", label, paint(text, colors::DANGER, color))
        }
        RowContent::Error { message } => paint(
            &format!("{} {}", icons.error, message),
            colors::WARNING,
            color,
        ),
    };
    format!("{indent}{body}")
}

/// Plain multi-line rendering of one tree.
pub fn render_text(visual: &Visual, icons: &Icons, color: bool) -> String {
    flatten(0, visual)
        .iter()
        .map(|row| format_row(row, icons, color))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablescope::explorer::{Explorer, ExplorerOptions};
    use tablescope::Value;

    fn explorer(value: Value, page_size: usize) -> Explorer {
        let options = ExplorerOptions::builder()
            .page_size(page_size)
            .build()
            .unwrap();
        Explorer::new("root", value, &options)
    }

    fn sample() -> Value {
        Value::object([
            ("a", Value::Int(1)),
            (
                "b",
                Value::array([Value::Int(10), Value::Int(20), Value::Int(30)]),
            ),
        ])
    }

    #[test]
    fn collapsed_root() {
        let explorer = explorer(sample(), 2);
        let text = render_text(&explorer.render(), &Icons::new(true), false);
        insta::assert_snapshot!(text, @"▶ root 2 items");
    }

    #[test]
    fn expanded_tree_with_pages() {
        let mut explorer = explorer(sample(), 2);
        let root = TreePath::root("root");
        let b = root.child(Label::key("b"));
        explorer.toggle(&root, None).unwrap();
        explorer.toggle(&b, None).unwrap();
        explorer.toggle_page(&b, 1).unwrap();

        let text = render_text(&explorer.render(), &Icons::new(true), false);
        insta::assert_snapshot!(text, @r"
        ▼ root 2 items
          a: 1
          ▼ b 3 items
            ▶ [0 … 1]
            ▼ [2 … 2]
              2: 30
        ");
    }

    #[test]
    fn ascii_icons() {
        let mut explorer = explorer(sample(), 100);
        explorer.toggle(&TreePath::root("root"), None).unwrap();

        let text = render_text(&explorer.render(), &Icons::new(false), false);
        insta::assert_snapshot!(text, @r"
        [v] root 2 items
          a: 1
          [>] b 3 items
        ");
    }

    #[test]
    fn callable_outcomes() {
        let value = Value::object([
            ("ok", Value::function(|| Ok(Value::Int(43)))),
            ("bad", Value::function(|| Err("boom".to_string()))),
        ]);
        let mut explorer = explorer(value, 100);
        let root = TreePath::root("root");
        explorer.toggle(&root, None).unwrap();
        explorer.invoke(&root.child(Label::key("ok"))).unwrap();
        explorer.invoke(&root.child(Label::key("bad"))).unwrap();

        let text = render_text(&explorer.render(), &Icons::new(false), false);
        insta::assert_snapshot!(text, @r"
        [v] root 2 items
          ok [r]
            (result): 43
          bad [r]
            [!] boom
        ");
    }

    #[test]
    fn rows_carry_actions() {
        let mut explorer = explorer(sample(), 2);
        let root = TreePath::root("root");
        let b = root.child(Label::key("b"));
        explorer.toggle(&root, None).unwrap();
        explorer.toggle(&b, None).unwrap();

        let rows = flatten(3, &explorer.render());
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|row| row.tree == 3));
        assert_eq!(rows[0].action, Some(RowAction::Toggle(root)));
        assert_eq!(rows[1].action, None);
        assert_eq!(rows[3].action, Some(RowAction::TogglePage(b, 0)));
        assert_eq!(rows[3].depth, 2);
    }

    #[test]
    fn color_paints_leaf_values() {
        let explorer = explorer(Value::Int(7), 100);
        let plain = render_text(&explorer.render(), &Icons::new(true), false);
        let colored = render_text(&explorer.render(), &Icons::new(true), true);
        assert_eq!(plain, "root: 7");
        assert!(colored.starts_with("root: \u{1b}"));
    }
}
