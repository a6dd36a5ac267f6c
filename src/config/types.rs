//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ExplorerError;
use crate::explorer::{DefaultExpansion, ExplorerOptions, DEFAULT_MAX_LEAF_CHARS};

use super::loader::{self, ConfigWarning};

/// Explorer defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_max_leaf_chars")]
    pub max_leaf_chars: usize,

    #[serde(default)]
    pub default_expanded: DefaultExpansion,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_leaf_chars: default_max_leaf_chars(),
            default_expanded: DefaultExpansion::Collapsed,
        }
    }
}

fn default_page_size() -> usize {
    100
}

fn default_max_leaf_chars() -> usize {
    DEFAULT_MAX_LEAF_CHARS
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Tablescope configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub explorer: ExplorerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Project config under `project_root`, else user config, else defaults,
    /// with environment overrides applied.
    pub fn load_or_default(project_root: Option<&Path>) -> (Self, Vec<ConfigWarning>) {
        loader::load_or_default(project_root)
    }

    /// Explorer options described by this config.
    pub fn explorer_options(&self) -> Result<ExplorerOptions, ExplorerError> {
        ExplorerOptions::builder()
            .page_size(self.explorer.page_size)
            .max_leaf_chars(self.explorer.max_leaf_chars)
            .default_expanded(self.explorer.default_expanded.clone())
            .build()
    }
}
