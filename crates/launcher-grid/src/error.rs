use thiserror::Error;

/// Errors raised by grid state lookups and validation.
///
/// Transforms and the cell resolver never fail; these only surface from the
/// repository layer and from parsing platform labels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No page with this id exists in the grid state.
    #[error("unknown page: {0}")]
    UnknownPage(String),

    /// No item with this id exists in the grid state.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// A string did not name one of the four screen orientations.
    #[error("invalid orientation label: {0:?}")]
    InvalidOrientation(String),

    /// A grid state invariant does not hold.
    #[error("grid invariant violated: {0}")]
    Invariant(String),
}

/// Result alias for grid state operations.
pub type Result<T> = std::result::Result<T, Error>;
