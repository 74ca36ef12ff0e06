//! Coordinate transforms between the four grid spaces.
//!
//! - pointer px: device pixels relative to the page box as the user sees it.
//! - orient px: pixels in the page's own frame, independent of rotation.
//! - CX: continuous cell units in the page frame.
//! - relative px/CX: offsets from the acted-on item's cell origin.
//!
//! Odd orientation indices swap the box (and, for pointer/orient conversions,
//! the vector) before reflection. Every result has non-finite axes replaced
//! with 0, so zero-sized boxes or layouts degrade instead of propagating NaN.

use crate::{
    geom::{Vec2, finite_or_zero},
    orientation::Orientation,
    state::GridArgs,
};

#[cfg(test)]
mod property_tests;

/// Page box in the page frame: width/height exchanged for odd orientations.
#[inline]
fn oriented_box(args: &GridArgs<'_>, orientation: Orientation) -> Vec2 {
    let size = args.page.size.as_vec();
    if orientation.swaps_axes() {
        size.swapped()
    } else {
        size
    }
}

/// Mirror the axes the orientation flips within `frame`.
#[inline]
fn reflect(v: Vec2, frame: Vec2, orientation: Orientation) -> Vec2 {
    Vec2::new(
        if orientation.reflects_x() {
            frame.x - v.x
        } else {
            v.x
        },
        if orientation.reflects_y() {
            frame.y - v.y
        } else {
            v.y
        },
    )
}

/// Size of one cell in orient px.
#[inline]
fn cell_px(args: &GridArgs<'_>, orientation: Orientation) -> Vec2 {
    let frame = oriented_box(args, orientation);
    let layout = args.page.layout.as_vec();
    Vec2::new(frame.x / layout.x, frame.y / layout.y)
}

/// Origin of the item's cell in orient px.
#[inline]
fn cell_origin_px(args: &GridArgs<'_>, orientation: Orientation) -> Vec2 {
    let unit = cell_px(args, orientation);
    let cell = Vec2::from(args.item.cell);
    Vec2::new(cell.x * unit.x, cell.y * unit.y).zero_if_invalid()
}

/// `round(value / step) * step`, ties away from zero.
#[inline]
fn round_to_multiple(value: f64, step: f64) -> f64 {
    finite_or_zero((value / step).round() * step)
}

/// Device pixels to orientation-normalized pixels.
pub fn pointer_px_to_orient_px(
    pointer_px: Vec2,
    args: &GridArgs<'_>,
    orientation: Orientation,
) -> Vec2 {
    let frame = oriented_box(args, orientation);
    let v = if orientation.swaps_axes() {
        pointer_px.swapped()
    } else {
        pointer_px
    };
    reflect(v, frame, orientation).zero_if_invalid()
}

/// Inverse of [`pointer_px_to_orient_px`]: reflect in the page frame, then
/// swap back for odd orientations.
pub fn orient_px_to_pointer_px(
    orient_px: Vec2,
    args: &GridArgs<'_>,
    orientation: Orientation,
) -> Vec2 {
    let frame = oriented_box(args, orientation);
    let v = reflect(orient_px, frame, orientation).zero_if_invalid();
    if orientation.swaps_axes() {
        v.swapped()
    } else {
        v
    }
}

/// Orient px to continuous cell units.
pub fn orient_px_to_cx(orient_px: Vec2, args: &GridArgs<'_>, orientation: Orientation) -> Vec2 {
    let frame = oriented_box(args, orientation);
    let layout = args.page.layout.as_vec();
    Vec2::new(
        orient_px.x * (layout.x / frame.x),
        orient_px.y * (layout.y / frame.y),
    )
    .zero_if_invalid()
}

/// An offset from the item's cell origin to absolute pointer px.
pub fn relative_to_absolute_in_px(
    relative_px: Vec2,
    args: &GridArgs<'_>,
    orientation: Orientation,
) -> Vec2 {
    let basis = orient_px_to_pointer_px(cell_origin_px(args, orientation), args, orientation);
    (basis + relative_px).zero_if_invalid()
}

/// Absolute cell units to an offset from the item's cell.
pub fn absolute_cx_to_relative_cx(cx: Vec2, args: &GridArgs<'_>) -> Vec2 {
    (cx - Vec2::from(args.item.cell)).zero_if_invalid()
}

/// Absolute pointer px to an orient px offset from the item's cell origin.
pub fn absolute_px_to_relative_in_orient_px(
    absolute_px: Vec2,
    args: &GridArgs<'_>,
    orientation: Orientation,
) -> Vec2 {
    let basis = cell_origin_px(args, orientation);
    let orient_px = pointer_px_to_orient_px(absolute_px, args, orientation);
    (orient_px - basis).zero_if_invalid()
}

/// Snap orient px to the nearest whole cell size per axis. No bounds clamping.
pub fn floor_in_orient_px(orient_px: Vec2, args: &GridArgs<'_>, orientation: Orientation) -> Vec2 {
    let unit = cell_px(args, orientation);
    Vec2::new(
        round_to_multiple(orient_px.x, unit.x),
        round_to_multiple(orient_px.y, unit.y),
    )
}

/// Round cell units to the nearest cell and clamp into the page layout.
pub fn floor_in_cx(cx: Vec2, args: &GridArgs<'_>) -> Vec2 {
    let layout = args.page.layout;
    // An unset axis has no valid cells; pin it to 0.
    let max_col = f64::from(layout.columns.saturating_sub(1));
    let max_row = f64::from(layout.rows.saturating_sub(1));
    let cx = cx.zero_if_invalid();
    Vec2::new(
        cx.x.round().max(0.0).min(max_col),
        cx.y.round().max(0.0).min(max_row),
    )
}
