//! Command implementations for the tablescope binary.

pub mod inspect;
pub mod show;

use anyhow::{Context, Result};
use tablescope::config::ConfigWarning;
use tablescope::explorer::{DefaultExpansion, ExplorerOptions};
use tablescope::Config;

use crate::cli::ExplorerArgs;

/// Layered config for the working directory, with unknown keys reported.
pub fn load_config() -> Config {
    let cwd = std::env::current_dir().ok();
    let (config, warnings) = Config::load_or_default(cwd.as_deref());
    print_config_warnings(&warnings);
    config
}

pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!("⚠ Unknown config key '{}' in {}:{}", w.key, w.file.display(), line);
        } else {
            eprintln!("⚠ Unknown config key '{}' in {}", w.key, w.file.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}

/// Config values with command-line flags laid over them.
pub fn explorer_options(config: &Config, args: &ExplorerArgs) -> Result<ExplorerOptions> {
    let mut config = config.clone();
    if let Some(size) = args.page_size {
        config.explorer.page_size = size;
    }
    if let Some(max) = args.max_leaf_chars {
        config.explorer.max_leaf_chars = max;
    }
    if let Some(text) = &args.expand {
        config.explorer.default_expanded = text
            .parse::<DefaultExpansion>()
            .context("invalid --expand value")?;
    }
    Ok(config.explorer_options()?)
}
