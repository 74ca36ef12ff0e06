//! Subcommand implementations. Each returns a serializable report.

use std::collections::BTreeMap;

use grid_config::{LoadedScene, load_from_path};
use launcher_grid::{Cell, Orientation, Resolution, Vec2, transform};
use serde::Serialize;
use tracing::info;

use crate::{
    cli::{PointArgs, SceneArgs},
    error::Result,
};

/// Every transform of one pointer position.
#[derive(Debug, Serialize)]
pub struct TransformReport {
    /// Orientation the transforms ran under.
    pub orientation: Orientation,
    /// Input pointer position.
    pub pointer_px: Vec2,
    /// Pointer position in the page frame.
    pub orient_px: Vec2,
    /// Continuous cell units.
    pub cx: Vec2,
    /// `orient_px` snapped to whole cells.
    pub floor_orient_px: Vec2,
    /// `cx` rounded and clamped into the layout.
    pub floor_cx: Vec2,
    /// `cx` relative to the item's cell.
    pub relative_cx: Vec2,
    /// `pointer_px` relative to the item's cell origin, in orient px.
    pub relative_orient_px: Vec2,
    /// `pointer_px` read as an offset from the item's cell origin.
    pub absolute_px: Vec2,
    /// Snapped `orient_px` mapped back to pointer px.
    pub snapped_pointer_px: Vec2,
}

/// Outcome of a drop.
#[derive(Debug, Serialize)]
pub struct DropReport {
    /// Item that was dropped.
    pub item: String,
    /// Orientation the drop ran under.
    pub orientation: Orientation,
    /// Cell the item held before the drop.
    pub from: Cell,
    /// Where it landed and why.
    pub resolution: Resolution,
}

/// Summary of a valid scene.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Orientation resolved from the scene's screen.
    pub orientation: Orientation,
    /// Item count per page.
    pub pages: BTreeMap<String, usize>,
    /// Total item count.
    pub items: usize,
    /// Named list names.
    pub lists: Vec<String>,
}

/// Load the scene and pick the orientation override, if any.
fn load(args: &PointArgs) -> Result<(LoadedScene, Orientation)> {
    let loaded = load_from_path(&args.scene.scene)?;
    let orientation = args.orientation.unwrap_or(loaded.orientation);
    Ok((loaded, orientation))
}

/// Run every transform on the pointer position.
pub fn transform(args: &PointArgs) -> Result<TransformReport> {
    let (loaded, orientation) = load(args)?;
    let grid = loaded.state.args(&args.page, &args.item)?;
    let pointer_px = Vec2::new(args.x, args.y);

    let orient_px = transform::pointer_px_to_orient_px(pointer_px, &grid, orientation);
    let cx = transform::orient_px_to_cx(orient_px, &grid, orientation);
    let floor_orient_px = transform::floor_in_orient_px(orient_px, &grid, orientation);
    Ok(TransformReport {
        orientation,
        pointer_px,
        orient_px,
        cx,
        floor_orient_px,
        floor_cx: transform::floor_in_cx(cx, &grid),
        relative_cx: transform::absolute_cx_to_relative_cx(cx, &grid),
        relative_orient_px: transform::absolute_px_to_relative_in_orient_px(
            pointer_px,
            &grid,
            orientation,
        ),
        absolute_px: transform::relative_to_absolute_in_px(pointer_px, &grid, orientation),
        snapped_pointer_px: transform::orient_px_to_pointer_px(
            floor_orient_px,
            &grid,
            orientation,
        ),
    })
}

/// Drop the item at the pointer position.
pub fn drop(args: &PointArgs) -> Result<DropReport> {
    let (mut loaded, orientation) = load(args)?;
    let from = loaded.state.item(&args.item)?.cell;
    let resolution = loaded.state.drop_at_pointer(
        &args.page,
        &args.item,
        Vec2::new(args.x, args.y),
        orientation,
    )?;
    info!(
        item = %args.item,
        %from,
        to = %resolution.cell,
        strategy = ?resolution.strategy,
        "drop resolved"
    );
    Ok(DropReport {
        item: args.item.clone(),
        orientation,
        from,
        resolution,
    })
}

/// Load and validate a scene.
pub fn check(args: &SceneArgs) -> Result<CheckReport> {
    let loaded = load_from_path(&args.scene)?;
    let state = &loaded.state;
    Ok(CheckReport {
        orientation: loaded.orientation,
        pages: state
            .pages
            .values()
            .map(|p| (p.id.clone(), state.page_items(p).count()))
            .collect(),
        items: state.items.len(),
        lists: state.lists.keys().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use launcher_grid::Strategy;

    use super::*;
    use crate::error::Error;

    fn sample() -> SceneArgs {
        SceneArgs {
            scene: Path::new(env!("CARGO_MANIFEST_DIR")).join("../grid-config/scenes/home.ron"),
        }
    }

    fn point(item: &str, x: f64, y: f64, orientation: Option<Orientation>) -> PointArgs {
        PointArgs {
            scene: sample(),
            page: "home".into(),
            item: item.into(),
            orientation,
            x,
            y,
        }
    }

    #[test]
    fn check_summarizes_sample() {
        let report = check(&sample()).expect("check");
        assert_eq!(report.orientation, Orientation::PortraitPrimary);
        assert_eq!(report.pages["home"], 4);
        assert_eq!(report.pages["tools"], 1);
        assert_eq!(report.items, 5);
        assert_eq!(report.lists, vec!["dock"]);
    }

    #[test]
    fn transform_reports_landscape_primary() {
        let report = transform(&point(
            "clock",
            100.0,
            50.0,
            Some(Orientation::LandscapePrimary),
        ))
        .expect("transform");
        // Box 400x800 swaps to 800x400; (50, 100) with x mirrored is (750, 100).
        assert!(report.orient_px.approx_eq(Vec2::new(750.0, 100.0), 1e-9));
        // Landscape cells are 200x50.
        assert!(report.cx.approx_eq(Vec2::new(3.75, 2.0), 1e-9));
        assert!(report.floor_cx.approx_eq(Vec2::new(3.0, 2.0), 1e-9));
        assert!(
            report
                .relative_cx
                .approx_eq(Vec2::new(0.75, -5.0), 1e-9)
        );
    }

    #[test]
    fn drop_lands_next_to_occupied_cell() {
        let report = drop(&point("clock", 10.0, 10.0, None)).expect("drop");
        assert_eq!(report.from, Cell::new(3, 7));
        assert_eq!(report.resolution.cell, Cell::new(0, 1));
        assert_eq!(report.resolution.strategy, Strategy::Neighbor);
    }

    #[test]
    fn unknown_item_is_a_grid_error() {
        let err = drop(&point("ghost", 0.0, 0.0, None)).expect_err("unknown");
        assert!(matches!(err, Error::Grid(_)), "{err}");
    }

    #[test]
    fn missing_scene_is_a_scene_error() {
        let args = SceneArgs {
            scene: PathBuf::from("nowhere.ron"),
        };
        let err = check(&args).expect_err("missing");
        assert!(matches!(err, Error::Scene(_)));
        assert!(err.to_string().starts_with("Read error at nowhere.ron"));
    }

    #[test]
    fn report_serializes_cells_as_pairs() {
        // (210, 10) snaps to (2, 0), held by notes; the right neighbour is free.
        let report = drop(&point("clock", 210.0, 10.0, None)).expect("drop");
        let json = serde_json::to_value(&report).expect("json");
        assert_eq!(json["resolution"]["cell"], serde_json::json!([3, 0]));
        assert_eq!(json["resolution"]["strategy"], "neighbor");
        assert_eq!(json["orientation"], "portrait-primary");
    }
}
