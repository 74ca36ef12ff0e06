//! Error handling for the grid-tester crate.

use std::result;

use thiserror::Error;

/// Convenient result type for grid-tester operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running the tester.
#[derive(Debug, Error)]
pub enum Error {
    /// Scene loading or validation errors.
    #[error("{}", .0.pretty())]
    Scene(#[from] grid_config::Error),
    /// Unknown page or item ids.
    #[error("Grid error: {0}")]
    Grid(#[from] launcher_grid::Error),
    /// Report serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
