//! Effective screen orientation.
//!
//! Some platforms keep reporting a stale orientation type when the viewport is
//! rotated by window chrome rather than by the device. Outside immersive
//! display modes the reported axis is cross-checked against the live
//! portrait/landscape media state.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Error, Result};

/// Portrait or landscape, without the primary/secondary qualifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenAxis {
    /// Taller than wide.
    Portrait,
    /// Wider than tall.
    Landscape,
}

/// One of the four platform orientation labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Orientation {
    /// Natural upright orientation.
    #[default]
    PortraitPrimary,
    /// Rotated a quarter turn from natural.
    LandscapePrimary,
    /// Upside down.
    PortraitSecondary,
    /// Rotated three quarter turns from natural.
    LandscapeSecondary,
}

impl Orientation {
    /// All orientations in index order.
    pub const ALL: [Self; 4] = [
        Self::PortraitPrimary,
        Self::LandscapePrimary,
        Self::PortraitSecondary,
        Self::LandscapeSecondary,
    ];

    /// Rotation index: portrait-primary=0, landscape-primary=1,
    /// portrait-secondary=2, landscape-secondary=3.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::PortraitPrimary => 0,
            Self::LandscapePrimary => 1,
            Self::PortraitSecondary => 2,
            Self::LandscapeSecondary => 3,
        }
    }

    /// Platform label, e.g. `landscape-primary`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PortraitPrimary => "portrait-primary",
            Self::LandscapePrimary => "landscape-primary",
            Self::PortraitSecondary => "portrait-secondary",
            Self::LandscapeSecondary => "landscape-secondary",
        }
    }

    /// Portrait or landscape.
    #[must_use]
    pub const fn axis(self) -> ScreenAxis {
        match self {
            Self::PortraitPrimary | Self::PortraitSecondary => ScreenAxis::Portrait,
            Self::LandscapePrimary | Self::LandscapeSecondary => ScreenAxis::Landscape,
        }
    }

    #[must_use]
    /// True for the rotated-half-turn variants of each axis.
    pub const fn is_secondary(self) -> bool {
        matches!(self, Self::PortraitSecondary | Self::LandscapeSecondary)
    }

    /// Replace the axis word, keeping the primary/secondary suffix.
    #[must_use]
    pub const fn with_axis(self, axis: ScreenAxis) -> Self {
        match (axis, self.is_secondary()) {
            (ScreenAxis::Portrait, false) => Self::PortraitPrimary,
            (ScreenAxis::Portrait, true) => Self::PortraitSecondary,
            (ScreenAxis::Landscape, false) => Self::LandscapePrimary,
            (ScreenAxis::Landscape, true) => Self::LandscapeSecondary,
        }
    }

    /// Odd indices render the page rotated a quarter turn.
    #[must_use]
    pub const fn swaps_axes(self) -> bool {
        self.index() % 2 == 1
    }

    /// x is mirrored for landscape-primary and portrait-secondary.
    #[must_use]
    pub const fn reflects_x(self) -> bool {
        matches!(self.index(), 1 | 2)
    }

    /// y is mirrored for both secondary orientations.
    #[must_use]
    pub const fn reflects_y(self) -> bool {
        matches!(self.index(), 2 | 3)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|o| o.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidOrientation(s.to_string()))
    }
}

impl TryFrom<String> for Orientation {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Orientation> for String {
    fn from(o: Orientation) -> Self {
        o.label().to_string()
    }
}

/// Display mode the application runs in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Regular browser tab.
    #[default]
    Browser,
    /// Browser with reduced chrome.
    MinimalUi,
    /// Installed app window.
    Standalone,
    /// Full screen.
    Fullscreen,
    /// Installed app drawing into the title bar area.
    WindowControlsOverlay,
}

impl DisplayMode {
    /// Fullscreen, standalone and window-controls-overlay report a trustworthy
    /// orientation type.
    #[must_use]
    pub const fn is_immersive(self) -> bool {
        matches!(
            self,
            Self::Fullscreen | Self::Standalone | Self::WindowControlsOverlay
        )
    }
}

/// Synchronous reads of platform screen state.
pub trait ScreenPlatform {
    /// Orientation type as reported by the platform.
    fn orientation_type(&self) -> Orientation;

    /// Current display mode.
    fn display_mode(&self) -> DisplayMode;

    /// Which of the portrait/landscape media queries currently matches, if any.
    fn media_orientation(&self) -> Option<ScreenAxis>;
}

/// A captured platform state. Used where there is no live platform to query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSnapshot {
    /// Reported orientation type.
    pub orientation: Orientation,
    /// Display mode.
    #[serde(default)]
    pub display_mode: DisplayMode,
    /// Matching media query axis.
    #[serde(default)]
    pub media: Option<ScreenAxis>,
}

impl ScreenSnapshot {
    /// Snapshot of a browser tab with matching media state.
    #[must_use]
    pub const fn browser(orientation: Orientation) -> Self {
        Self {
            orientation,
            display_mode: DisplayMode::Browser,
            media: Some(orientation.axis()),
        }
    }
}

impl ScreenPlatform for ScreenSnapshot {
    fn orientation_type(&self) -> Orientation {
        self.orientation
    }

    fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    fn media_orientation(&self) -> Option<ScreenAxis> {
        self.media
    }
}

/// Determine the effective orientation of the screen.
pub fn resolve_orientation<P: ScreenPlatform + ?Sized>(platform: &P) -> Orientation {
    let reported = platform.orientation_type();
    let mode = platform.display_mode();
    if mode.is_immersive() {
        return reported;
    }
    match platform.media_orientation() {
        Some(axis) if axis != reported.axis() => {
            let corrected = reported.with_axis(axis);
            trace!(%reported, %corrected, ?mode, "orientation: media axis disagrees");
            corrected
        }
        _ => reported,
    }
}
