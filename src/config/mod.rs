//! Configuration module for Tablescope
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (TABLESCOPE_*)
//! 3. Project config (./.tablescope.toml)
//! 4. User config (<config dir>/tablescope/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{ColorMode, Config, ExplorerConfig, OutputConfig};
