use anyhow::Result;
use clap::{Parser, Subcommand};
use design_bridge::commands::*;
use log::LevelFilter;

/// Match rendered UI elements to design-tool nodes and group nodes into sections.
///
/// This CLI is a thin wrapper around `bridge-core` (exposed in code as `bridge_core`).
/// All substantive logic lives in the library so it can be tested thoroughly
/// and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "design-bridge",
    version,
    about = "Match rendered UI elements to design nodes",
    long_about = None
)]
struct Cli {
    /// Log engine decisions at debug level (overrides RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new workspace at the given root.
    ///
    /// This will:
    /// - Create a `.bridge` metadata directory and a `reports` directory.
    /// - Write a `.bridge/workspace.json` config file.
    /// - Create the workspace database.
    Init {
        /// Workspace root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Optional workspace name. If omitted, the name is derived from the root directory.
        #[arg(long)]
        name: Option<String>,
    },

    /// Show information about an existing workspace.
    Info {
        #[arg(long, default_value = ".")]
        root: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Match rendered elements to design nodes.
    Match {
        #[arg(long, default_value = ".")]
        root: String,

        /// Design nodes (JSON or YAML array).
        #[arg(long)]
        nodes: String,

        /// Rendered element bounds (JSON or YAML array).
        #[arg(long)]
        rendered: String,

        /// `exclusive` (each node is rank-1 for at most one element) or `top-k`.
        #[arg(long, default_value = "exclusive")]
        policy: String,

        /// Engine config file overriding the workspace settings.
        #[arg(long)]
        config: Option<String>,

        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also write the result under `reports/`.
        #[arg(long, default_value_t = false)]
        report: bool,
    },

    /// Group design nodes into semantic sections.
    ///
    /// Without `--groups`, every node becomes its own group.
    Group {
        #[arg(long, default_value = ".")]
        root: String,

        #[arg(long)]
        nodes: String,

        /// Proposed groups (JSON or YAML array); groups without children are auto-mapped.
        #[arg(long)]
        groups: Option<String>,

        #[arg(long)]
        config: Option<String>,

        #[arg(long, default_value_t = false)]
        json: bool,

        #[arg(long, default_value_t = false)]
        report: bool,
    },

    /// Split nodes into top-to-bottom sections.
    Sections {
        #[arg(long, default_value = ".")]
        root: String,

        #[arg(long)]
        nodes: String,

        /// Vertical gap (px) that starts a new section.
        #[arg(long, default_value_t = 24.0)]
        gap: f64,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Cluster nodes whose top-left corners are close together.
    Clusters {
        #[arg(long, default_value = ".")]
        root: String,

        #[arg(long)]
        nodes: String,

        /// Link distance (px); chains of closer nodes form one cluster.
        #[arg(long, default_value_t = 50.0)]
        max_distance: f64,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Bucket nodes sharing a rounded x (columns) or y (rows) coordinate.
    Align {
        #[arg(long, default_value = ".")]
        root: String,

        #[arg(long)]
        nodes: String,

        /// `x` or `y`.
        #[arg(long, default_value = "x")]
        axis: String,

        #[arg(long, default_value_t = 8.0)]
        tolerance: f64,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Record that a component label corresponds to a design node.
    Confirm {
        #[arg(long, default_value = ".")]
        root: String,

        /// Component label as it appears in rendered bounds.
        #[arg(long)]
        component: String,

        /// Design node id. Required unless `--remove` is set.
        #[arg(long)]
        node: Option<String>,

        /// Forget the stored confirmation instead.
        #[arg(long, default_value_t = false)]
        remove: bool,
    },

    /// List stored confirmations.
    Confirmations {
        #[arg(long, default_value = ".")]
        root: String,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List recorded matching and grouping runs.
    Runs {
        #[arg(long, default_value = ".")]
        root: String,

        /// Only `matching` or `grouping` runs.
        #[arg(long)]
        kind: Option<String>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match cli.command {
        Command::Init { root, name } => init_command(&root, name)?,
        Command::Info { root, json } => info_command(&root, json)?,
        Command::Match { root, nodes, rendered, policy, config, json, report } => {
            match_command(&root, &nodes, &rendered, &policy, config.as_deref(), json, report)?
        }
        Command::Group { root, nodes, groups, config, json, report } => {
            group_command(&root, &nodes, groups.as_deref(), config.as_deref(), json, report)?
        }
        Command::Sections { root, nodes, gap, json } => sections_command(&root, &nodes, gap, json)?,
        Command::Clusters { root, nodes, max_distance, json } => {
            clusters_command(&root, &nodes, max_distance, json)?
        }
        Command::Align { root, nodes, axis, tolerance, json } => {
            align_command(&root, &nodes, &axis, tolerance, json)?
        }
        Command::Confirm { root, component, node, remove } => {
            confirm_command(&root, &component, node.as_deref(), remove)?
        }
        Command::Confirmations { root, json } => confirmations_command(&root, json)?,
        Command::Runs { root, kind, json } => runs_command(&root, kind.as_deref(), json)?,
    }

    Ok(())
}
