//! CLI Argument Parsing
//!
//! Global flags (--json, --color, --verbose) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Tablescope - inspect table snapshots as explorable value trees
#[derive(Parser, Debug)]
#[command(name = "tablescope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print the rendered tree as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command that builds explorers
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ExplorerArgs {
    /// Children shown per page (overrides config)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Default expansion: `true`, `false` or a JSON object of labels
    #[arg(long)]
    pub expand: Option<String>,

    /// Maximum width of leaf values
    #[arg(long)]
    pub max_leaf_chars: Option<usize>,

    /// Browse the tree with the keyboard
    #[arg(short, long)]
    pub interactive: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect a table snapshot in the devtools panel
    Inspect {
        /// Snapshot JSON document
        file: PathBuf,

        /// Only show these sections (repeatable, e.g. `core-model`)
        #[arg(short, long = "section")]
        sections: Vec<String>,

        #[command(flatten)]
        explorer: ExplorerArgs,
    },

    /// Explore any JSON file as a single tree
    Show {
        /// JSON file
        file: PathBuf,

        /// Root label
        #[arg(long, default_value = "root")]
        label: String,

        #[command(flatten)]
        explorer: ExplorerArgs,
    },
}
