//! Geometry primitives shared by the transform engine and the cell resolver.

use std::{
    fmt,
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};

/// Columns used when a page layout leaves the column count unset.
pub const DEFAULT_COLUMNS: u32 = 4;
/// Rows used when a page layout leaves the row count unset.
pub const DEFAULT_ROWS: u32 = 8;

/// A 2-vector in one of the grid coordinate spaces (pointer px, orient px, CX).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vec2 {
    /// Construct a vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The same vector with its axes exchanged.
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }

    /// Replace any non-finite component with 0.
    #[must_use]
    pub fn zero_if_invalid(self) -> Self {
        Self {
            x: finite_or_zero(self.x),
            y: finite_or_zero(self.y),
        }
    }

    /// True when both components are within `eps` of `other`.
    #[must_use]
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        approx_eq(self.x, other.x, eps) && approx_eq(self.y, other.y, eps)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from(v: (f64, f64)) -> Self {
        Self::new(v.0, v.1)
    }
}

impl From<Cell> for Vec2 {
    fn from(c: Cell) -> Self {
        Self::new(f64::from(c.col), f64::from(c.row))
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2},{:.2})", self.x, self.y)
    }
}

/// Integer grid coordinate. Candidates may sit outside the page while a drop
/// is being resolved; settled items always lie inside their page layout.
///
/// Serialized as a `[col, row]` sequence. Missing components read as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<i32>", into = "Vec<i32>")]
pub struct Cell {
    /// Column index.
    pub col: i32,
    /// Row index.
    pub row: i32,
}

impl Cell {
    /// Construct a cell from a column and row.
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Round a CX vector to the nearest cell, mapping invalid axes to 0.
    #[must_use]
    pub fn from_cx(cx: Vec2) -> Self {
        let cx = cx.zero_if_invalid();
        Self {
            col: cx.x.round() as i32,
            row: cx.y.round() as i32,
        }
    }

    /// Offset this cell by `(dc, dr)`.
    #[must_use]
    pub const fn offset(self, dc: i32, dr: i32) -> Self {
        Self {
            col: self.col.saturating_add(dc),
            row: self.row.saturating_add(dr),
        }
    }

    /// True when the cell lies inside `[0, columns) x [0, rows)`.
    #[must_use]
    pub fn within(self, columns: u32, rows: u32) -> bool {
        self.col >= 0
            && self.row >= 0
            && (self.col as i64) < i64::from(columns)
            && (self.row as i64) < i64::from(rows)
    }
}

impl From<Vec<i32>> for Cell {
    fn from(v: Vec<i32>) -> Self {
        Self {
            col: v.first().copied().unwrap_or(0),
            row: v.get(1).copied().unwrap_or(0),
        }
    }
}

impl From<Cell> for Vec<i32> {
    fn from(c: Cell) -> Self {
        vec![c.col, c.row]
    }
}

impl From<(i32, i32)> for Cell {
    fn from(v: (i32, i32)) -> Self {
        Self::new(v.0, v.1)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.col, self.row)
    }
}

/// Grid capacity of a page. Zero on an axis means the axis is unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Number of columns.
    #[serde(default)]
    pub columns: u32,
    /// Number of rows.
    #[serde(default)]
    pub rows: u32,
}

impl Layout {
    /// Construct a layout.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Substitute the 4x8 default on any unset axis.
    #[must_use]
    pub const fn or_default(self) -> Self {
        Self {
            columns: if self.columns == 0 {
                DEFAULT_COLUMNS
            } else {
                self.columns
            },
            rows: if self.rows == 0 {
                DEFAULT_ROWS
            } else {
                self.rows
            },
        }
    }

    /// True when either axis is unset.
    #[must_use]
    pub const fn is_unset(self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// Total number of cells.
    #[must_use]
    pub const fn capacity(self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    /// The layout as a CX-space vector.
    #[must_use]
    pub fn as_vec(self) -> Vec2 {
        Vec2::new(f64::from(self.columns), f64::from(self.rows))
    }
}

/// Rendered box of a page in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxSize {
    /// Width in pixels.
    #[serde(default)]
    pub width: f64,
    /// Height in pixels.
    #[serde(default)]
    pub height: f64,
}

impl BoxSize {
    /// Construct a box size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The box as a pixel vector.
    #[must_use]
    pub const fn as_vec(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// True when `a` and `b` differ by at most `eps`.
#[inline]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// `v` when finite, otherwise 0.
#[inline]
pub fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_works() {
        assert!(approx_eq(1.0, 1.0, 0.0));
        assert!(approx_eq(1.0, 1.000_5, 0.001));
        assert!(!approx_eq(1.0, 1.01, 0.001));
    }

    #[test]
    fn invalid_components_become_zero() {
        let v = Vec2::new(f64::NAN, f64::INFINITY).zero_if_invalid();
        assert_eq!(v, Vec2::new(0.0, 0.0));
        let w = Vec2::new(3.5, -2.0).zero_if_invalid();
        assert_eq!(w, Vec2::new(3.5, -2.0));
    }

    #[test]
    fn cell_from_short_sequence_defaults_to_zero() {
        assert_eq!(Cell::from(vec![3]), Cell::new(3, 0));
        assert_eq!(Cell::from(Vec::new()), Cell::new(0, 0));
        assert_eq!(Cell::from(vec![1, 2, 9]), Cell::new(1, 2));
    }

    #[test]
    fn cell_within_bounds() {
        assert!(Cell::new(0, 0).within(4, 8));
        assert!(Cell::new(3, 7).within(4, 8));
        assert!(!Cell::new(4, 0).within(4, 8));
        assert!(!Cell::new(-1, 0).within(4, 8));
        assert!(!Cell::new(0, 8).within(4, 8));
    }

    #[test]
    fn cell_from_cx_rounds_half_away_from_zero() {
        assert_eq!(Cell::from_cx(Vec2::new(1.5, 2.49)), Cell::new(2, 2));
        assert_eq!(Cell::from_cx(Vec2::new(-0.5, f64::NAN)), Cell::new(-1, 0));
    }

    #[test]
    fn layout_defaults_fill_unset_axes() {
        assert_eq!(Layout::new(0, 0).or_default(), Layout::new(4, 8));
        assert_eq!(Layout::new(5, 0).or_default(), Layout::new(5, 8));
        assert_eq!(Layout::new(6, 3).or_default(), Layout::new(6, 3));
        assert!(Layout::new(0, 3).is_unset());
        assert_eq!(Layout::new(4, 8).capacity(), 32);
    }
}
