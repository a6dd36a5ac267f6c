//! Table devtools panel
//!
//! A panel is nine independent explorers over one [`TableSnapshot`], plus a
//! persisted open/closed flag.

mod preferences;
mod snapshot;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TablescopeError;
use crate::explorer::{Explorer, ExplorerOptions, Visual};
use crate::value::Value;

pub use preferences::{
    JsonFileStore, MemoryStore, PanelPreference, PreferenceStore, PANEL_OPEN_KEY,
};
pub use snapshot::{JsonSnapshot, TableSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Instance,
    State,
    Columns,
    CoreModel,
    ColumnFilteredRows,
    GlobalFilteredRows,
    SortedRows,
    GroupedRows,
    ExpandedRows,
}

impl Section {
    /// Panel order.
    pub const ALL: [Section; 9] = [
        Section::Instance,
        Section::State,
        Section::Columns,
        Section::CoreModel,
        Section::ColumnFilteredRows,
        Section::GlobalFilteredRows,
        Section::SortedRows,
        Section::GroupedRows,
        Section::ExpandedRows,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Instance => "Instance",
            Section::State => "State",
            Section::Columns => "Columns",
            Section::CoreModel => "Core Model",
            Section::ColumnFilteredRows => "Column Filtered Rows",
            Section::GlobalFilteredRows => "Global Filtered Rows",
            Section::SortedRows => "Sorted Rows",
            Section::GroupedRows => "Grouped Rows",
            Section::ExpandedRows => "Expanded Rows",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Section::Instance => "instance",
            Section::State => "state",
            Section::Columns => "columns",
            Section::CoreModel => "core-model",
            Section::ColumnFilteredRows => "column-filtered-rows",
            Section::GlobalFilteredRows => "global-filtered-rows",
            Section::SortedRows => "sorted-rows",
            Section::GroupedRows => "grouped-rows",
            Section::ExpandedRows => "expanded-rows",
        }
    }

    /// The value this section inspects.
    pub fn fetch(self, snapshot: &dyn TableSnapshot) -> Value {
        match self {
            Section::Instance => snapshot.instance(),
            Section::State => snapshot.state(),
            Section::Columns => snapshot.columns(),
            Section::CoreModel => snapshot.core_row_model(),
            Section::ColumnFilteredRows => snapshot.column_filtered_row_model(),
            Section::GlobalFilteredRows => snapshot.global_filtered_row_model(),
            Section::SortedRows => snapshot.sorted_row_model(),
            Section::GroupedRows => snapshot.grouped_row_model(),
            Section::ExpandedRows => snapshot.expanded_row_model(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Section {
    type Err = TablescopeError;

    /// Accepts the slug or the title, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        Section::ALL
            .into_iter()
            .find(|section| section.slug() == wanted)
            .ok_or_else(|| TablescopeError::UnknownSection {
                name: s.to_string(),
                expected: Section::ALL.map(Section::slug).join(", "),
            })
    }
}

/// One rendered section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub section: Section,
    pub title: &'static str,
    pub tree: Visual,
}

/// Rendered panel. Sections are empty while the panel is closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub open: bool,
    pub sections: Vec<SectionView>,
}

pub struct Panel {
    sections: Vec<(Section, Explorer)>,
    preference: PanelPreference,
}

impl Panel {
    /// One explorer per section, each rooted at the section title.
    pub fn new(
        snapshot: &dyn TableSnapshot,
        options: &ExplorerOptions,
        preference: PanelPreference,
    ) -> Self {
        Self::with_sections(snapshot, &Section::ALL, options, preference)
    }

    /// Restrict the panel to `sections`, kept in the given order.
    pub fn with_sections(
        snapshot: &dyn TableSnapshot,
        sections: &[Section],
        options: &ExplorerOptions,
        preference: PanelPreference,
    ) -> Self {
        let sections = sections
            .iter()
            .map(|&section| {
                let value = section.fetch(snapshot);
                (section, Explorer::new(section.title(), value, options))
            })
            .collect();
        Self {
            sections,
            preference,
        }
    }

    pub fn sections(&self) -> impl Iterator<Item = (Section, &Explorer)> {
        self.sections.iter().map(|(section, explorer)| (*section, explorer))
    }

    pub fn sections_mut(&mut self) -> impl Iterator<Item = (Section, &mut Explorer)> {
        self.sections
            .iter_mut()
            .map(|(section, explorer)| (*section, explorer))
    }

    pub fn section(&self, section: Section) -> Option<&Explorer> {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, explorer)| explorer)
    }

    pub fn section_mut(&mut self, section: Section) -> Option<&mut Explorer> {
        self.sections
            .iter_mut()
            .find(|(s, _)| *s == section)
            .map(|(_, explorer)| explorer)
    }

    pub fn is_open(&self) -> bool {
        self.preference.is_open()
    }

    pub fn toggle_open(&mut self) -> bool {
        self.preference.toggle()
    }

    pub fn render(&self) -> PanelView {
        let open = self.is_open();
        let sections = if open {
            self.sections
                .iter()
                .map(|(section, explorer)| SectionView {
                    section: *section,
                    title: section.title(),
                    tree: explorer.render(),
                })
                .collect()
        } else {
            Vec::new()
        };
        PanelView { open, sections }
    }
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("sections", &self.sections.len())
            .field("preference", &self.preference)
            .finish()
    }
}
