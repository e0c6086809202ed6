use std::env;

use anyhow::Result;
use clap::{Parser, Subcommand};
use world_builder::commands::{
    add_node_command, edit_node_command, init_command, list_nodes_command, show_node_command,
    tree_command,
};
use world_builder::{init_logging, resolve_config, resolve_editor};

/// Plain-text world-building notes, one file per node.
///
/// This CLI is a thin wrapper around `world-core` (exposed in code as
/// `world_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "world-builder",
    version,
    about = "World Builder CLI",
    long_about = None
)]
struct Cli {
    /// Data directory. Defaults to $WORLD_BUILDER_DIR, then ~/.local/share/world_builder.
    #[arg(short = 'd', long = "dir", global = true)]
    dir: Option<String>,

    /// Increase log verbosity (-v info, -vv debug). WORLD_BUILDER_LOG overrides.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a data directory.
    Init,

    /// Add a node.
    Add {
        /// Node name; the file is named after its slug.
        name: String,

        /// Node type (e.g., Continent, Kingdom).
        #[arg(short = 't', long = "type", default_value = "Node")]
        node_type: String,

        /// Parent node name or slug, a path like /continents/edoras, or '-' for none.
        #[arg(short = 'p', long)]
        parent: Option<String>,

        /// Initial notes.
        #[arg(short = 'n', long, default_value = "")]
        notes: String,

        /// Overwrite the node if it already exists.
        #[arg(short = 'f', long, default_value_t = false)]
        force: bool,
    },

    /// List nodes.
    List {
        /// Only show nodes of this type (e.g., Kingdom). Case-insensitive.
        #[arg(short = 't', long = "type")]
        node_type: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show a node.
    Show {
        /// Node name or slug.
        name: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Edit a node in $EDITOR.
    Edit {
        /// Node name or slug.
        name: String,
    },

    /// Print the hierarchy tree.
    Tree {
        /// Start from a specific node name or slug.
        #[arg(short = 'r', long)]
        root: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = resolve_config(cli.dir.as_deref())?;
    tracing::debug!(dir = %config.data_dir.display(), "resolved data directory");

    match cli.command {
        Command::Init => init_command(&config)?,
        Command::Add { name, node_type, parent, notes, force } => {
            add_node_command(&config, &name, &node_type, parent.as_deref(), &notes, force)?;
        }
        Command::List { node_type, json } => {
            list_nodes_command(&config, node_type.as_deref(), json)?
        }
        Command::Show { name, json } => show_node_command(&config, &name, json)?,
        Command::Edit { name } => {
            let editor = resolve_editor(env::var("EDITOR").ok(), env::var("VISUAL").ok());
            edit_node_command(&config, &name, &editor)?;
        }
        Command::Tree { root, json } => tree_command(&config, root.as_deref(), json)?,
    }

    Ok(())
}
