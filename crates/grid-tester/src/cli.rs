//! Command-line interface definitions for grid-tester.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use launcher_grid::Orientation;
use logging::LogArgs;

/// Command-line interface for the `grid-tester` binary.
#[derive(Parser, Debug)]
#[command(
    name = "grid-tester",
    about = "Inspect launcher grid placement against a scene file",
    version
)]
pub struct Cli {
    /// Logging controls shared across workspace binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// Which operation to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level tester commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every coordinate transform of a pointer position.
    Transform(PointArgs),
    /// Drop an item at a pointer position and print where it lands.
    Drop(PointArgs),
    /// Load and validate a scene.
    Check(SceneArgs),
}

/// Scene selection.
#[derive(Args, Debug, Clone)]
pub struct SceneArgs {
    /// Path to a scene file (RON).
    #[arg(long, value_name = "PATH")]
    pub scene: PathBuf,
}

/// A pointer position acting on one item of one page.
#[derive(Args, Debug, Clone)]
pub struct PointArgs {
    /// Scene to load.
    #[command(flatten)]
    pub scene: SceneArgs,

    /// Page the pointer is over.
    #[arg(long)]
    pub page: String,

    /// Item being moved.
    #[arg(long)]
    pub item: String,

    /// Override the orientation resolved from the scene's screen,
    /// e.g. `landscape-primary`.
    #[arg(long)]
    pub orientation: Option<Orientation>,

    /// Pointer x in px, relative to the page box.
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    /// Pointer y in px, relative to the page box.
    #[arg(allow_negative_numbers = true)]
    pub y: f64,
}
