//! Terminal UI for the tablescope binary.

pub mod context;
pub mod terminal;
pub mod theme;
pub mod tree_view;
