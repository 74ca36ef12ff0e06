//! Drop-cell resolution.
//!
//! Given a candidate cell, find one the item may occupy: the candidate itself,
//! then its four neighbours (right, left, down, up), then a row-major scan
//! from the candidate that wraps around the page. When every cell is taken
//! the candidate is accepted anyway.
//!
//! Only settled items other than the moving one block a cell. Occupancy is
//! captured once on entry.

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    geom::Cell,
    state::{GridArgs, Item, ItemRepository, Page},
};


/// Neighbour offsets in probe order: right, left, down, up.
const NEIGHBORS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Which stage of the search produced the cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// The candidate was free.
    Direct,
    /// An axis-adjacent neighbour was free.
    Neighbor,
    /// Found by the row-major scan.
    Scan,
    /// The page is full; the candidate was accepted despite the collision.
    Exhausted,
}

/// Outcome of resolving a drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The cell the item should occupy.
    pub cell: Cell,
    /// Search stage that produced `cell`.
    pub strategy: Strategy,
}

impl Resolution {
    /// Pair a cell with the stage that found it.
    fn new(cell: Cell, strategy: Strategy) -> Self {
        Self { cell, strategy }
    }
}

/// Cells held by settled items other than the one being placed.
struct Occupancy {
    cells: Vec<Cell>,
}

impl Occupancy {
    fn capture(args: &GridArgs<'_>) -> Self {
        let moving = &args.item.id;
        let cells = args
            .page
            .list
            .iter()
            .filter_map(|id| args.items.get_by_id(id))
            .filter(|other| &other.id != moving && other.is_settled())
            .map(|other| other.cell)
            .collect();
        Self { cells }
    }

    fn is_busy(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }
}

/// Find the cell an item dropped at `candidate` should occupy. Does not
/// modify anything.
pub fn resolve_cell(candidate: Cell, args: &GridArgs<'_>) -> Resolution {
    let occupancy = Occupancy::capture(args);
    let item = args.item.id.as_str();

    if !occupancy.is_busy(candidate) {
        debug!(item, %candidate, "resolve: direct");
        return Resolution::new(candidate, Strategy::Direct);
    }

    let layout = args.page.layout.or_default();
    let (columns, rows) = (layout.columns, layout.rows);

    if let Some(cell) = NEIGHBORS
        .iter()
        .map(|&(dc, dr)| candidate.offset(dc, dr))
        .filter(|c| c.within(columns, rows))
        .find(|c| !occupancy.is_busy(*c))
    {
        debug!(item, %candidate, %cell, "resolve: neighbor");
        return Resolution::new(cell, Strategy::Neighbor);
    }

    let mut cell = candidate;
    for _ in 0..layout.capacity() {
        if !occupancy.is_busy(cell) {
            debug!(item, %candidate, %cell, "resolve: scan");
            return Resolution::new(cell, Strategy::Scan);
        }
        cell = next_in_raster(cell, columns, rows);
    }

    warn!(
        item,
        %candidate,
        columns,
        rows,
        "resolve: page full, accepting collision"
    );
    Resolution::new(candidate, Strategy::Exhausted)
}

/// Next cell in row-major order, wrapping the column at `columns` and the row
/// at `rows`.
#[inline]
fn next_in_raster(cell: Cell, columns: u32, rows: u32) -> Cell {
    let mut next = cell.offset(1, 0);
    if i64::from(next.col) >= i64::from(columns) {
        next.col = 0;
        next.row = next.row.saturating_add(1);
        if i64::from(next.row) >= i64::from(rows) {
            next.row = 0;
        }
    }
    next
}

/// Resolve a drop and write the winning cell to `item.cell`.
///
/// `items` may or may not contain `item`; the moving item never blocks itself.
pub fn redirect_cell(
    candidate: Cell,
    item: &mut Item,
    items: &dyn ItemRepository,
    page: &Page,
) -> Cell {
    let resolution = resolve_cell(candidate, &GridArgs::new(item, items, page));
    item.cell = resolution.cell;
    item.cell
}
