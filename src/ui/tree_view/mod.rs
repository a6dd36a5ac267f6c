//! Tree View Widget
//!
//! Terminal presentation of explorer trees.
//!
//! # Module Structure
//!
//! - `render` - Flattening visual trees into rows and formatting them
//! - `view` - Cursor state and action handling over a browsable surface
//! - `input` - Keyboard input handling and interactive loop

mod input;
mod render;
mod view;

pub use input::run_interactive;
pub use render::render_text;
pub use view::TreeView;
