use std::collections::BTreeMap;

use proptest::prelude::*;

use super::*;
use crate::{
    geom::{BoxSize, Cell, Layout},
    state::{Item, Page},
};

fn orientation_strategy() -> impl Strategy<Value = Orientation> {
    prop::sample::select(Orientation::ALL.to_vec())
}

fn page_strategy() -> impl Strategy<Value = Page> {
    (50.0f64..3000.0, 50.0f64..3000.0, 1u32..16, 1u32..16).prop_map(|(w, h, cols, rows)| {
        Page::new("p", Layout::new(cols, rows), BoxSize::new(w, h))
    })
}

proptest! {
    #[test]
    fn pointer_orient_round_trip(
        page in page_strategy(),
        orientation in orientation_strategy(),
        fx in 0.0f64..=1.0,
        fy in 0.0f64..=1.0,
    ) {
        let item = Item::new("i", Cell::default());
        let items: BTreeMap<String, Item> = BTreeMap::new();
        let args = GridArgs::new(&item, &items, &page);
        let v = Vec2::new(fx * page.size.width, fy * page.size.height);
        let there = pointer_px_to_orient_px(v, &args, orientation);
        let back = orient_px_to_pointer_px(there, &args, orientation);
        prop_assert!(back.approx_eq(v, 1e-6), "{} -> {} -> {}", v, there, back);
    }
}

proptest! {
    #[test]
    fn floor_in_cx_is_idempotent_and_in_bounds(
        page in page_strategy(),
        x in -1.0e6f64..1.0e6,
        y in -1.0e6f64..1.0e6,
    ) {
        let item = Item::new("i", Cell::default());
        let items: BTreeMap<String, Item> = BTreeMap::new();
        let args = GridArgs::new(&item, &items, &page);
        let once = floor_in_cx(Vec2::new(x, y), &args);
        let twice = floor_in_cx(once, &args);
        prop_assert_eq!(once, twice);
        prop_assert!(once.x >= 0.0 && once.x <= f64::from(page.layout.columns - 1));
        prop_assert!(once.y >= 0.0 && once.y <= f64::from(page.layout.rows - 1));
        prop_assert_eq!(once.x.fract(), 0.0);
        prop_assert_eq!(once.y.fract(), 0.0);
    }
}

proptest! {
    #[test]
    fn floor_in_cx_clamps_layout_corner(page in page_strategy()) {
        let item = Item::new("i", Cell::default());
        let items: BTreeMap<String, Item> = BTreeMap::new();
        let args = GridArgs::new(&item, &items, &page);
        let corner = floor_in_cx(page.layout.as_vec(), &args);
        prop_assert_eq!(
            corner,
            Vec2::new(
                f64::from(page.layout.columns - 1),
                f64::from(page.layout.rows - 1)
            )
        );
    }
}

proptest! {
    #[test]
    fn floor_in_orient_px_lands_within_half_a_cell(
        page in page_strategy(),
        orientation in orientation_strategy(),
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
    ) {
        let item = Item::new("i", Cell::default());
        let items: BTreeMap<String, Item> = BTreeMap::new();
        let args = GridArgs::new(&item, &items, &page);
        let unit = cell_px(&args, orientation);
        let snapped = floor_in_orient_px(Vec2::new(x, y), &args, orientation);
        prop_assert!((snapped.x - x).abs() <= unit.x / 2.0 + 1e-6);
        prop_assert!((snapped.y - y).abs() <= unit.y / 2.0 + 1e-6);
    }
}

proptest! {
    #[test]
    fn relative_offsets_survive_upright_round_trip(
        page in page_strategy(),
        col in 0i32..16,
        row in 0i32..16,
        dx in -200.0f64..200.0,
        dy in -200.0f64..200.0,
    ) {
        let item = Item::new("i", Cell::new(col, row));
        let items: BTreeMap<String, Item> = BTreeMap::new();
        let args = GridArgs::new(&item, &items, &page);
        let o = Orientation::PortraitPrimary;
        let abs = relative_to_absolute_in_px(Vec2::new(dx, dy), &args, o);
        let rel = absolute_px_to_relative_in_orient_px(abs, &args, o);
        prop_assert!(rel.approx_eq(Vec2::new(dx, dy), 1e-6), "{}", rel);
    }
}
