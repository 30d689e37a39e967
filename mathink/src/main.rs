///
/// mathink - Command Line Entry Point
///
/// Inspects saved ink sessions: lists their terminal nodes and replays taps
/// to show which node a point selects. `init` writes a default config.
///

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mathink::config::CONFIG_FILE_NAME;
use mathink::{format_nodes, init_config, load_config, load_session, Config, MathInkManager, Point};

#[derive(Parser)]
#[command(name = "mathink")]
#[command(about = "Inspect handwritten math ink sessions", long_about = None)]
struct Cli {
    /// Path to a mathink.toml config (defaults to ./mathink.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default mathink.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// List the terminal nodes of a session
    Nodes {
        /// Session JSON file
        session: PathBuf,
    },
    /// Tap a point and print the node it selects
    Select {
        /// Session JSON file
        session: PathBuf,

        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        #[arg(long, allow_negative_numbers = true)]
        y: f64,

        /// Number of taps; overlapping nodes rotate on each tap
        #[arg(long, default_value_t = 1)]
        taps: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(EnvFilter::try_from_env("MATHINK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    if let Commands::Init { dir } = &cli.command {
        let path = init_config(dir).into_diagnostic()?;
        println!("Created {}", path.display());
        return Ok(());
    }

    let config = resolve_config(cli.config.as_deref())?;
    let mut manager = MathInkManager::new(config.manager);

    match cli.command {
        Commands::Init { .. } => {}
        Commands::Nodes { session } => {
            load_session(&session).into_diagnostic()?.restore(&mut manager).into_diagnostic()?;
            print!("{}", format_nodes(manager.nodes()));
        }
        Commands::Select { session, x, y, taps } => {
            load_session(&session).into_diagnostic()?.restore(&mut manager).into_diagnostic()?;
            let point = Point::new(x, y);

            for tap in 1..=taps {
                match manager.select_node(Some(point)) {
                    Some(node) => println!(
                        "tap {}: node {} candidates={:?} frame=({}, {}, {}, {})",
                        tap,
                        manager.selected_index().unwrap_or_default(),
                        node.candidates,
                        node.frame.origin.x,
                        node.frame.origin.y,
                        node.frame.size.width,
                        node.frame.size.height,
                    ),
                    None => println!("tap {}: no node", tap),
                }
            }
        }
    }

    Ok(())
}

fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "Loading config");
        return load_config(path).into_diagnostic();
    }

    let local = Path::new(CONFIG_FILE_NAME);
    if local.is_file() {
        debug!(path = %local.display(), "Loading config");
        return load_config(local).into_diagnostic();
    }

    Ok(Config::default())
}
