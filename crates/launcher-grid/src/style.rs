//! Style declarations consumed by the host's styling layer.
//!
//! The core only produces values; a [`StyleSink`] applies them. Property
//! registration happens once, when the host calls [`initialize`] or
//! [`register_properties`], never at load time.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    orientation::{Orientation, ScreenPlatform, resolve_orientation},
    screen::{ScreenChange, ScreenEvents, Subscription},
};

/// Selector receiving the orientation-dependent cell placement rules.
pub const ITEM_SELECTOR: &str =
    ":where(.grid-item), :where(.grid-page > *), :where(.grid-item-label)";

/// A typed custom property registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyDef {
    /// Property name, e.g. `--grid-r`.
    pub name: &'static str,
    /// Value syntax, e.g. `<number>`.
    pub syntax: &'static str,
    /// Whether the value inherits.
    pub inherits: bool,
    /// Initial value.
    pub initial_value: &'static str,
}

/// One `property: value` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Property name.
    pub property: String,
    /// Property value.
    pub value: String,
}

impl Declaration {
    /// Declaration from a property and a value.
    fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Errors a sink may report for a property registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// The property name is already registered.
    #[error("property {0} already registered")]
    AlreadyRegistered(String),
    /// The sink refused the registration.
    #[error("property {name} rejected: {reason}")]
    Rejected {
        /// Property name.
        name: String,
        /// Reason given by the sink.
        reason: String,
    },
}

/// Receiver for computed style values.
pub trait StyleSink: Send + Sync {
    /// Register a typed custom property.
    fn register_property(&self, def: &PropertyDef) -> Result<(), StyleError>;

    /// Replace the declarations applied to `selector`.
    fn set_rules(&self, selector: &str, declarations: &[Declaration]);
}

/// Custom properties animated by the grid.
pub fn grid_properties() -> [PropertyDef; 4] {
    [
        PropertyDef {
            name: "--grid-r",
            syntax: "<number>",
            inherits: true,
            initial_value: "0",
        },
        PropertyDef {
            name: "--grid-c",
            syntax: "<number>",
            inherits: true,
            initial_value: "0",
        },
        PropertyDef {
            name: "--translate-x",
            syntax: "<length-percentage>",
            inherits: true,
            initial_value: "0px",
        },
        PropertyDef {
            name: "--translate-y",
            syntax: "<length-percentage>",
            inherits: true,
            initial_value: "0px",
        },
    ]
}

/// Register every grid property with `sink`, returning how many succeeded.
/// Failures are logged and skipped.
pub fn register_properties<S: StyleSink + ?Sized>(sink: &S) -> usize {
    let mut ok = 0;
    for def in grid_properties() {
        match sink.register_property(&def) {
            Ok(()) => ok += 1,
            Err(err) => warn!(property = def.name, %err, "style: registration failed"),
        }
    }
    ok
}

/// `calc(calc(calc(var(--grid-<extent>) / var(<fraction>)) * var(<dir>)) * <sign>1px)`
fn translate_formula(extent: &str, fraction: &str, dir: &str, negate: bool) -> String {
    format!(
        "calc(calc(calc(var(--grid-{extent}) / var({fraction})) * var({dir})) * {}1px)",
        if negate { "-" } else { "" }
    )
}

/// Drag translation formulas in screen space for `orientation`.
pub fn oriented_translate(orientation: Orientation) -> [Declaration; 2] {
    // (fraction, direction, negate) for the x and y translations.
    let (x, y) = match orientation {
        Orientation::PortraitPrimary => (
            ("--f-col", "--dir-x", false),
            ("--f-row", "--dir-y", false),
        ),
        Orientation::PortraitSecondary => {
            (("--f-col", "--dir-x", true), ("--f-row", "--dir-y", true))
        }
        Orientation::LandscapePrimary => {
            (("--f-row", "--dir-y", false), ("--f-col", "--dir-x", true))
        }
        Orientation::LandscapeSecondary => {
            (("--f-row", "--dir-y", true), ("--f-col", "--dir-x", false))
        }
    };
    [
        Declaration::new("--translate-x", translate_formula("w", x.0, x.1, x.2)),
        Declaration::new("--translate-y", translate_formula("h", y.0, y.1, y.2)),
    ]
}

/// Keyframes for a drop: start at the pickup cell, settle at the final cell.
pub fn animation_sequence() -> [Vec<Declaration>; 2] {
    [
        vec![
            Declaration::new("--grid-c", "var(--fp-cell-x)"),
            Declaration::new("--grid-r", "var(--fp-cell-y)"),
        ],
        vec![
            Declaration::new("--drag-x", "0"),
            Declaration::new("--drag-y", "0"),
            Declaration::new("--grid-c", "var(--fc-cell-x)"),
            Declaration::new("--grid-r", "var(--fc-cell-y)"),
        ],
    ]
}

/// `grid-column`/`grid-row` placement of a page-frame cell on the rotated
/// screen grid.
pub fn cell_placement(orientation: Orientation) -> [Declaration; 2] {
    const COL: &str = "var(--grid-column)";
    const ROW: &str = "var(--grid-row)";
    const FLIP_COL: &str = "calc(var(--layout-c) - var(--grid-column) + 1)";
    const FLIP_ROW: &str = "calc(var(--layout-r) - var(--grid-row) + 1)";
    let (column, row) = match orientation {
        Orientation::PortraitPrimary => (COL, ROW),
        Orientation::LandscapePrimary => (ROW, FLIP_COL),
        Orientation::PortraitSecondary => (FLIP_COL, FLIP_ROW),
        Orientation::LandscapeSecondary => (FLIP_ROW, COL),
    };
    [
        Declaration::new("grid-column", column),
        Declaration::new("grid-row", row),
    ]
}

/// Register grid properties, apply the placement rules for the current
/// orientation, and keep them current on every screen change.
///
/// The returned subscription keeps the rules live; drop it to stop updating.
pub fn initialize<P, S>(events: &ScreenEvents, platform: Arc<P>, sink: Arc<S>) -> Subscription
where
    P: ScreenPlatform + Send + Sync + 'static,
    S: StyleSink + 'static,
{
    register_properties(&*sink);
    let apply = Arc::new(move |change: ScreenChange| {
        let orientation = resolve_orientation(&*platform);
        debug!(?change, %orientation, "style: updating cell placement");
        sink.set_rules(ITEM_SELECTOR, &cell_placement(orientation));
    });
    let listener = apply.clone();
    let subscription = events.subscribe(move |change| listener(change));
    apply(ScreenChange::InitialFrame);
    subscription
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::orientation::{DisplayMode, ScreenAxis, ScreenSnapshot};

    #[derive(Default)]
    struct RecordingSink {
        registered: Mutex<Vec<&'static str>>,
        rules: Mutex<Vec<(String, Vec<Declaration>)>>,
        reject: Option<&'static str>,
    }

    impl StyleSink for RecordingSink {
        fn register_property(&self, def: &PropertyDef) -> Result<(), StyleError> {
            if self.reject == Some(def.name) {
                return Err(StyleError::Rejected {
                    name: def.name.into(),
                    reason: "unsupported".into(),
                });
            }
            self.registered.lock().push(def.name);
            Ok(())
        }

        fn set_rules(&self, selector: &str, declarations: &[Declaration]) {
            self.rules
                .lock()
                .push((selector.to_string(), declarations.to_vec()));
        }
    }

    struct LivePlatform(Mutex<ScreenSnapshot>);

    impl ScreenPlatform for LivePlatform {
        fn orientation_type(&self) -> Orientation {
            self.0.lock().orientation
        }

        fn display_mode(&self) -> DisplayMode {
            self.0.lock().display_mode
        }

        fn media_orientation(&self) -> Option<ScreenAxis> {
            self.0.lock().media
        }
    }

    #[test]
    fn registration_failures_are_skipped() {
        let sink = RecordingSink {
            reject: Some("--grid-c"),
            ..RecordingSink::default()
        };
        assert_eq!(register_properties(&sink), 3);
        assert_eq!(
            *sink.registered.lock(),
            vec!["--grid-r", "--translate-x", "--translate-y"]
        );
    }

    #[test]
    fn translate_formulas_follow_rotation() {
        let [x, y] = oriented_translate(Orientation::PortraitPrimary);
        assert_eq!(
            x.value,
            "calc(calc(calc(var(--grid-w) / var(--f-col)) * var(--dir-x)) * 1px)"
        );
        assert_eq!(
            y.value,
            "calc(calc(calc(var(--grid-h) / var(--f-row)) * var(--dir-y)) * 1px)"
        );
        let [x, y] = oriented_translate(Orientation::LandscapePrimary);
        assert_eq!(
            x.value,
            "calc(calc(calc(var(--grid-w) / var(--f-row)) * var(--dir-y)) * 1px)"
        );
        assert_eq!(
            y.value,
            "calc(calc(calc(var(--grid-h) / var(--f-col)) * var(--dir-x)) * -1px)"
        );
    }

    #[test]
    fn animation_settles_on_final_cell() {
        let [pickup, settle] = animation_sequence();
        assert_eq!(pickup.len(), 2);
        assert!(
            settle
                .iter()
                .any(|d| d.property == "--grid-c" && d.value == "var(--fc-cell-x)")
        );
    }

    #[test]
    fn initialize_applies_now_and_on_change() {
        let events = ScreenEvents::new();
        let platform = Arc::new(LivePlatform(Mutex::new(ScreenSnapshot::browser(
            Orientation::PortraitPrimary,
        ))));
        let sink = Arc::new(RecordingSink::default());
        let sub = initialize(&events, platform.clone(), sink.clone());

        assert_eq!(sink.registered.lock().len(), 4);
        {
            let rules = sink.rules.lock();
            assert_eq!(rules.len(), 1);
            assert_eq!(rules[0].0, ITEM_SELECTOR);
            assert_eq!(rules[0].1[0].value, "var(--grid-column)");
        }

        *platform.0.lock() = ScreenSnapshot::browser(Orientation::LandscapePrimary);
        events.notify(ScreenChange::OrientationChange);
        {
            let rules = sink.rules.lock();
            assert_eq!(rules.len(), 2);
            assert_eq!(
                rules[1].1,
                cell_placement(Orientation::LandscapePrimary).to_vec()
            );
        }

        drop(sub);
        events.notify(ScreenChange::Resize);
        assert_eq!(sink.rules.lock().len(), 2);
    }
}
