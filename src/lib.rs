//! Tablescope - inspect table instances as explorable value trees
//!
//! Tablescope turns arbitrary runtime values into lazily expanded, paginated
//! trees whose nodes can be toggled, paged and re-invoked. The table panel
//! lays nine of those trees over one table snapshot.

pub mod config;
pub mod error;
pub mod explorer;
pub mod panel;
pub mod value;

// Re-exports for convenience
pub use config::{ColorMode, Config};
pub use error::{ExplorerError, TablescopeError, TablescopeResult};
pub use explorer::{
    DefaultExpansion, Entry, Explorer, ExplorerOptions, Label, Outcome, Renderer, TreePath,
    Visual,
};
pub use panel::{JsonSnapshot, Panel, PanelPreference, Section, TableSnapshot};
pub use value::{Function, Object, Value};
