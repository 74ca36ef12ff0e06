//! Placement logic for grid-based launcher pages.
//!
//! Items are pinned to cells of a page grid. This crate maps pointer
//! positions into grid coordinates for any screen orientation and resolves
//! where a dropped item lands without colliding with settled items.
//!
//! - [`orientation`]: effective screen orientation from platform state.
//! - [`transform`]: conversions between pointer px, orient px and cell units.
//! - [`resolve`]: drop-cell search (direct, neighbours, raster scan).
//! - [`state`]: pages, items, and the per-call [`GridArgs`] bundle.
//! - [`screen`]: screen-change notifications.
//! - [`style`]: style declarations and explicit initialization.
#![warn(missing_docs)]

pub mod agent;
mod error;
pub mod geom;
pub mod orientation;
pub mod resolve;
pub mod screen;
pub mod state;
pub mod style;
pub mod transform;

pub use agent::is_mobile;
pub use error::{Error, Result};
pub use geom::{BoxSize, Cell, Layout, Vec2};
pub use orientation::{
    DisplayMode, Orientation, ScreenAxis, ScreenPlatform, ScreenSnapshot, resolve_orientation,
};
pub use resolve::{Resolution, Strategy, redirect_cell, resolve_cell};
pub use screen::{ScreenChange, ScreenEvents, Subscription};
pub use state::{GridArgs, GridState, Item, ItemRepository, Page};
pub use style::{StyleError, StyleSink};
