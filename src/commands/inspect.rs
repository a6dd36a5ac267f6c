use std::path::Path;

use anyhow::{Context, Result};
use tablescope::panel::{
    JsonFileStore, JsonSnapshot, MemoryStore, Panel, PanelPreference, PreferenceStore, Section,
};

use crate::cli::{ColorWhen, ExplorerArgs};
use crate::ui::context::UiContext;
use crate::ui::theme::Icons;
use crate::ui::tree_view::{render_text, run_interactive, TreeView};

pub fn cmd_inspect(
    file: &Path,
    sections: &[String],
    args: &ExplorerArgs,
    json: bool,
    color: Option<ColorWhen>,
) -> Result<()> {
    let config = super::load_config();
    let ui = UiContext::new(json, color, &config);
    let options = super::explorer_options(&config, args)?;
    let sections = parse_sections(sections)?;

    let snapshot = JsonSnapshot::load(file).context("failed to load snapshot")?;
    tracing::info!(file = %file.display(), sections = sections.len(), "loaded snapshot");

    let preference = PanelPreference::load(preference_store(args.interactive), true);
    let panel = Panel::with_sections(&snapshot, &sections, &options, preference);
    let icons = Icons::new(ui.unicode);

    if args.interactive {
        let title = format!("tablescope {}", file.display());
        let mut view = TreeView::new(panel);
        run_interactive(&mut view, &title, &icons, ui.color)?;
        return Ok(());
    }

    let view = panel.render();
    if ui.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let blocks: Vec<String> = view
        .sections
        .iter()
        .map(|section| render_text(&section.tree, &icons, ui.color))
        .collect();
    println!("{}", blocks.join("\n\n"));
    Ok(())
}

/// Every section when none are named.
fn parse_sections(names: &[String]) -> Result<Vec<Section>> {
    if names.is_empty() {
        return Ok(Section::ALL.to_vec());
    }
    let sections = names
        .iter()
        .map(|name| name.parse::<Section>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sections)
}

/// Only interactive sessions remember the open flag between runs.
fn preference_store(interactive: bool) -> Box<dyn PreferenceStore> {
    if !interactive {
        return Box::new(MemoryStore::new());
    }
    match JsonFileStore::user_default() {
        Ok(store) => Box::new(store),
        Err(err) => {
            tracing::debug!(error = %err, "using in-memory preferences");
            Box::new(MemoryStore::new())
        }
    }
}
