//! Tablescope CLI - inspect table snapshots as explorable value trees
//!
//! Usage: tablescope <COMMAND>
//!
//! Commands:
//!   inspect  Inspect a table snapshot in the devtools panel
//!   show     Explore any JSON file as a single tree

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect {
            file,
            sections,
            explorer,
        } => commands::inspect::cmd_inspect(
            &file,
            &sections,
            &explorer,
            cli.json,
            cli.color,
        ),
        Commands::Show {
            file,
            label,
            explorer,
        } => commands::show::cmd_show(&file, &label, &explorer, cli.json, cli.color),
    }
}

/// Map `-v` count to a default filter; `RUST_LOG` wins when set.
fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tablescope={}", level_for(verbose))));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(3), "trace");
        assert_eq!(level_for(9), "trace");
    }
}
