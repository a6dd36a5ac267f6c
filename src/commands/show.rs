use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tablescope::{Explorer, Value};

use crate::cli::{ColorWhen, ExplorerArgs};
use crate::ui::context::UiContext;
use crate::ui::theme::Icons;
use crate::ui::tree_view::{render_text, run_interactive, TreeView};

pub fn cmd_show(
    file: &Path,
    label: &str,
    args: &ExplorerArgs,
    json: bool,
    color: Option<ColorWhen>,
) -> Result<()> {
    let config = super::load_config();
    let ui = UiContext::new(json, color, &config);
    let options = super::explorer_options(&config, args)?;

    let content =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let document: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;
    tracing::info!(file = %file.display(), "loaded document");

    let explorer = Explorer::new(label, Value::from(document), &options);
    let icons = Icons::new(ui.unicode);

    if args.interactive {
        let title = format!("tablescope {}", file.display());
        let mut view = TreeView::new(explorer);
        run_interactive(&mut view, &title, &icons, ui.color)?;
        // With --json, report where the session left the tree.
        if ui.json {
            let summary = view.into_surface().state().summary();
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        return Ok(());
    }

    let visual = explorer.render();
    if ui.json {
        println!("{}", serde_json::to_string_pretty(&visual)?);
    } else {
        println!("{}", render_text(&visual, &icons, ui.color));
    }
    Ok(())
}
