use crossterm::style::{Color, Stylize};

/// Design tokens for the Tablescope terminal UI.
///
/// All colors, icons and rules used by the tree view come from this module.
pub mod colors {
    use super::Color;

    /// #3f4e60
    pub const GRAY: Color = Color::Rgb { r: 0x3f, g: 0x4e, b: 0x60 };
    /// #ff0085
    pub const DANGER: Color = Color::Rgb { r: 0xff, g: 0x00, b: 0x85 };
    /// #006bff
    pub const ACTIVE: Color = Color::Rgb { r: 0x00, g: 0x6b, b: 0xff };
    /// #ffb200
    pub const WARNING: Color = Color::Rgb { r: 0xff, g: 0xb2, b: 0x00 };
}

pub mod icons {
    pub const EXPAND: &str = "▼";
    pub const COLLAPSE: &str = "▶";
    pub const REFRESH: &str = "🔄";
    pub const ERROR: &str = "✗";
    pub const CURSOR: &str = "›";
    pub const RULE: &str = "─";
}

pub mod icons_ascii {
    pub const EXPAND: &str = "[v]";
    pub const COLLAPSE: &str = "[>]";
    pub const REFRESH: &str = "[r]";
    pub const ERROR: &str = "[!]";
    pub const CURSOR: &str = ">";
    pub const RULE: &str = "-";
}

/// Icon set picked once from the terminal's unicode support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icons {
    pub expand: &'static str,
    pub collapse: &'static str,
    pub refresh: &'static str,
    pub error: &'static str,
    pub cursor: &'static str,
    pub rule: &'static str,
}

impl Icons {
    pub fn new(unicode: bool) -> Self {
        if unicode {
            Self {
                expand: icons::EXPAND,
                collapse: icons::COLLAPSE,
                refresh: icons::REFRESH,
                error: icons::ERROR,
                cursor: icons::CURSOR,
                rule: icons::RULE,
            }
        } else {
            Self {
                expand: icons_ascii::EXPAND,
                collapse: icons_ascii::COLLAPSE,
                refresh: icons_ascii::REFRESH,
                error: icons_ascii::ERROR,
                cursor: icons_ascii::CURSOR,
                rule: icons_ascii::RULE,
            }
        }
    }

    pub fn toggle(&self, expanded: bool) -> &'static str {
        if expanded {
            self.expand
        } else {
            self.collapse
        }
    }
}

/// Paint `text` with `color` when color output is enabled.
pub fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        format!("{}", text.with(color))
    } else {
        text.to_string()
    }
}

/// Bold `text` when color output is enabled.
pub fn strong(text: &str, enabled: bool) -> String {
    if enabled {
        format!("{}", text.bold())
    } else {
        text.to_string()
    }
}
