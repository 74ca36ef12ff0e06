//! Parse and load scene files.

use std::{ffi::OsStr, fs, path::Path};

use launcher_grid::{GridState, Orientation, ScreenSnapshot};
use ron::{Options, extensions::Extensions};
use tracing::debug;

use crate::{Error, Scene};

/// A scene loaded from disk and turned into grid state.
#[derive(Clone, Debug)]
pub struct LoadedScene {
    /// Screen state from the file.
    pub screen: ScreenSnapshot,
    /// Orientation resolved from `screen`.
    pub orientation: Orientation,
    /// Validated grid state.
    pub state: GridState,
}

/// Parse scene text. `path` is only used to label errors.
pub fn parse_str(src: &str, path: Option<&Path>) -> Result<Scene, Error> {
    let options = Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME)
        .with_default_extension(Extensions::UNWRAP_NEWTYPES);
    options.from_str(src).map_err(|e| Error::Parse {
        path: path.map(Path::to_path_buf),
        message: e.to_string(),
    })
}

/// Load a scene from a `.ron` file at `path` and build its grid state.
pub fn load_from_path(path: &Path) -> Result<LoadedScene, Error> {
    if path.extension() != Some(OsStr::new("ron")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported scene format (expected a .ron file)".to_string(),
        });
    }
    let src = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    let scene = parse_str(&src, Some(path))?;
    let screen = scene.screen;
    let orientation = scene.orientation();
    let state = scene
        .into_state()
        .map_err(|e| e.with_path(path.to_path_buf()))?;
    debug!(path = %path.display(), %orientation, "scene: loaded");
    Ok(LoadedScene {
        screen,
        orientation,
        state,
    })
}
