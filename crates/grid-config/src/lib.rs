//! Scene files for the launcher grid.
//!
//! A scene is a RON document holding pages, items, named lists, and the
//! screen state they are shown on. [`load_from_path`] reads and validates one
//! into a [`launcher_grid::GridState`].

/// Scene errors.
mod error;
/// File loading and RON parsing.
mod loader;
/// Scene document model.
mod scene;

pub use error::Error;
pub use loader::{LoadedScene, load_from_path, parse_str};
pub use scene::Scene;
