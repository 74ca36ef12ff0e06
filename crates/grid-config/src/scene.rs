//! Scene file model.

use std::collections::{BTreeMap, BTreeSet};

use launcher_grid::{
    GridState, Item, Layout, Orientation, Page, ScreenSnapshot, resolve_orientation,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Error;

/// 4x8, the same fallback the resolver uses for an unset layout.
fn default_layout() -> Layout {
    Layout::new(0, 0).or_default()
}

/// A launcher grid together with the screen it is shown on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Platform screen state used to resolve the orientation.
    #[serde(default)]
    pub screen: ScreenSnapshot,
    /// Layout applied to any page axis left at 0.
    #[serde(default = "default_layout")]
    pub default_layout: Layout,
    /// Pages in file order.
    #[serde(default)]
    pub pages: Vec<Page>,
    /// Items in file order.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Named item-order lists.
    #[serde(default)]
    pub lists: BTreeMap<String, Vec<String>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            screen: ScreenSnapshot::default(),
            default_layout: default_layout(),
            pages: Vec::new(),
            items: Vec::new(),
            lists: BTreeMap::new(),
        }
    }
}

impl Scene {
    /// Effective orientation of the scene's screen.
    pub fn orientation(&self) -> Orientation {
        resolve_orientation(&self.screen)
    }

    /// Build a validated [`GridState`].
    ///
    /// Duplicate page or item ids are rejected. Unset layout axes are filled
    /// from `default_layout`.
    pub fn into_state(self) -> Result<GridState, Error> {
        let mut state = GridState::new();

        let mut seen = BTreeSet::new();
        for mut page in self.pages {
            if !seen.insert(page.id.clone()) {
                return Err(validation(format!("duplicate page id {}", page.id)));
            }
            if page.layout.columns == 0 {
                page.layout.columns = self.default_layout.columns;
            }
            if page.layout.rows == 0 {
                page.layout.rows = self.default_layout.rows;
            }
            state.insert_page(page);
        }

        for item in self.items {
            if state.items.contains_key(&item.id) {
                return Err(validation(format!("duplicate item id {}", item.id)));
            }
            state.items.insert(item.id.clone(), item);
        }

        for (name, ids) in &self.lists {
            for id in ids {
                state.add_to_list(name, id);
            }
        }

        state.validate()?;
        debug!(
            pages = state.pages.len(),
            items = state.items.len(),
            lists = state.lists.len(),
            "scene: state built"
        );
        Ok(state)
    }
}

/// Validation error without a path.
fn validation(message: String) -> Error {
    Error::Validation {
        path: None,
        message,
    }
}
