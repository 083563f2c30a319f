//! waypath CLI - run path queries against a scene file.
//!
//! - `waypath -s scene.yaml path --from 0,0 --to 10,10` - find a path
//! - `waypath -s scene.yaml snap --at 12,3` - move a point onto the region
//! - `waypath -s scene.yaml vertices --near 5,5` - rank boundary vertices
//! - `waypath -s scene.yaml check --from 0,0 --to 9,9` - test line of sight
//!
//! Results are printed to stdout as JSON; logs go to stderr.

mod query;
mod scene;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use crate::query::Coords;
use crate::scene::Scene;

#[derive(Parser)]
#[command(name = "waypath")]
#[command(about = "Point-to-point pathfinding over polygon and mesh regions", version)]
struct Cli {
    /// Scene file (.yaml, .yml or .json)
    #[arg(short, long)]
    scene: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find a path between two points
    Path {
        /// Start point, e.g. `1,2` or `1,0,2`
        #[arg(long, value_parser = query::parse_coords)]
        from: Coords,

        /// Goal point
        #[arg(long, value_parser = query::parse_coords)]
        to: Coords,
    },

    /// Snap a point onto the region
    Snap {
        #[arg(long, value_parser = query::parse_coords)]
        at: Coords,
    },

    /// List boundary vertices ranked by distance to a point
    Vertices {
        #[arg(long, value_parser = query::parse_coords)]
        near: Coords,

        /// Only print the closest N vertices
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Test whether the straight segment between two points stays on the region
    Check {
        #[arg(long, value_parser = query::parse_coords)]
        from: Coords,

        #[arg(long, value_parser = query::parse_coords)]
        to: Coords,

        /// Treat foreign obstacles as absent
        #[arg(long)]
        ignore_foreign: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let scene = Scene::load(&cli.scene)?;
    tracing::info!(scene = %cli.scene.display(), "Scene loaded");

    let output = query::run(&scene, &cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
