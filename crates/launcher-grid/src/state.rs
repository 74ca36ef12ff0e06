//! Grid state: pages, items, and named item-order lists.
//!
//! The state is owned by the caller. Transforms and the resolver borrow it for
//! the duration of one call through [`GridArgs`] and never retain it.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    geom::{BoxSize, Cell, Layout, Vec2},
    orientation::Orientation,
    resolve::{Resolution, resolve_cell},
    transform,
};

/// A launcher entry pinned to a cell of a page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique id.
    pub id: String,
    /// Cell the item occupies.
    #[serde(default)]
    pub cell: Cell,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Icon reference.
    #[serde(default)]
    pub icon: String,
    /// Optional navigation target.
    #[serde(default)]
    pub href: Option<String>,
    /// Optional action name.
    #[serde(default)]
    pub action: Option<String>,
    /// Pointer currently dragging this item. Absent or negative when at rest.
    #[serde(default)]
    pub pointer_id: Option<i32>,
    /// Removed from the page's layout flow, e.g. mid-drag.
    #[serde(default)]
    pub detached: bool,
}

impl Item {
    /// A resting item at `cell`.
    pub fn new(id: impl Into<String>, cell: Cell) -> Self {
        Self {
            id: id.into(),
            cell,
            ..Self::default()
        }
    }

    /// Builder-style label setter.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Builder-style pointer association.
    #[must_use]
    pub const fn with_pointer(mut self, pointer_id: i32) -> Self {
        self.pointer_id = Some(pointer_id);
        self
    }

    /// True when no input pointer is holding the item.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.pointer_id.is_none_or(|p| p < 0)
    }
}

/// A grid surface holding an ordered list of item ids.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Unique id.
    pub id: String,
    /// Item ids in insertion (tab) order.
    #[serde(default)]
    pub list: Vec<String>,
    /// Grid capacity.
    #[serde(default)]
    pub layout: Layout,
    /// Rendered box in pixels.
    #[serde(default)]
    pub size: BoxSize,
}

impl Page {
    /// An empty page.
    pub fn new(id: impl Into<String>, layout: Layout, size: BoxSize) -> Self {
        Self {
            id: id.into(),
            list: Vec::new(),
            layout,
            size,
        }
    }

    /// True when `id` is listed on this page.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.list.iter().any(|i| i == id)
    }
}

/// Lookup of items by id.
pub trait ItemRepository {
    /// The item with `id`, if present.
    fn get_by_id(&self, id: &str) -> Option<&Item>;
}

impl ItemRepository for BTreeMap<String, Item> {
    fn get_by_id(&self, id: &str) -> Option<&Item> {
        self.get(id)
    }
}

impl ItemRepository for HashMap<String, Item> {
    fn get_by_id(&self, id: &str) -> Option<&Item> {
        self.get(id)
    }
}

/// Per-call context: the item acted on, every item, and the page it is on.
#[derive(Clone, Copy)]
pub struct GridArgs<'a> {
    /// Item being placed or transformed.
    pub item: &'a Item,
    /// All items, keyed by id.
    pub items: &'a dyn ItemRepository,
    /// Page the operation happens on.
    pub page: &'a Page,
}

impl<'a> GridArgs<'a> {
    /// Bundle the per-call context.
    pub fn new(item: &'a Item, items: &'a dyn ItemRepository, page: &'a Page) -> Self {
        Self { item, items, page }
    }
}

/// Every page, every item, and the named item-order lists.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridState {
    /// Pages keyed by id.
    pub pages: BTreeMap<String, Page>,
    /// Items keyed by id.
    pub items: BTreeMap<String, Item>,
    /// Named item-order lists. Each list holds unique ids in insertion order.
    pub lists: BTreeMap<String, Vec<String>>,
}

impl ItemRepository for GridState {
    fn get_by_id(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }
}

impl GridState {
    /// An empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a page, returning the replaced one.
    pub fn insert_page(&mut self, page: Page) -> Option<Page> {
        self.pages.insert(page.id.clone(), page)
    }

    /// Insert an item and append its id to `page_id`'s list.
    pub fn insert_item(&mut self, page_id: &str, item: Item) -> Result<()> {
        let page = self
            .pages
            .get_mut(page_id)
            .ok_or_else(|| Error::UnknownPage(page_id.to_string()))?;
        if !page.contains(&item.id) {
            page.list.push(item.id.clone());
        }
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// Remove an item from the items map, every page, and every named list.
    pub fn remove_item(&mut self, id: &str) -> Option<Item> {
        for page in self.pages.values_mut() {
            page.list.retain(|i| i != id);
        }
        for list in self.lists.values_mut() {
            list.retain(|i| i != id);
        }
        self.items.remove(id)
    }

    /// Append `id` to the named list, creating the list if needed.
    pub fn add_to_list(&mut self, list: &str, id: &str) {
        let entries = self.lists.entry(list.to_string()).or_default();
        if !entries.iter().any(|i| i == id) {
            entries.push(id.to_string());
        }
    }

    /// Page by id.
    pub fn page(&self, id: &str) -> Result<&Page> {
        self.pages
            .get(id)
            .ok_or_else(|| Error::UnknownPage(id.to_string()))
    }

    /// Item by id.
    pub fn item(&self, id: &str) -> Result<&Item> {
        self.items
            .get(id)
            .ok_or_else(|| Error::UnknownItem(id.to_string()))
    }

    /// Mutable item by id.
    pub fn item_mut(&mut self, id: &str) -> Result<&mut Item> {
        self.items
            .get_mut(id)
            .ok_or_else(|| Error::UnknownItem(id.to_string()))
    }

    /// Resolve items of a page in list order, skipping dangling ids.
    pub fn page_items<'a>(&'a self, page: &'a Page) -> impl Iterator<Item = &'a Item> + 'a {
        page.list.iter().filter_map(|id| self.items.get(id))
    }

    /// Borrow the per-call context for `item_id` acting on `page_id`.
    pub fn args(&self, page_id: &str, item_id: &str) -> Result<GridArgs<'_>> {
        Ok(GridArgs::new(
            self.item(item_id)?,
            &self.items,
            self.page(page_id)?,
        ))
    }

    /// Find a free cell near `candidate` and assign it to the item.
    pub fn redirect_cell(
        &mut self,
        page_id: &str,
        item_id: &str,
        candidate: Cell,
    ) -> Result<Resolution> {
        let resolution = resolve_cell(candidate, &self.args(page_id, item_id)?);
        self.item_mut(item_id)?.cell = resolution.cell;
        Ok(resolution)
    }

    /// Drop the item at a pointer position: pointer px to orient px, to CX,
    /// snapped to a cell inside the layout, then redirected around collisions.
    pub fn drop_at_pointer(
        &mut self,
        page_id: &str,
        item_id: &str,
        pointer_px: Vec2,
        orientation: Orientation,
    ) -> Result<Resolution> {
        let candidate = {
            let args = self.args(page_id, item_id)?;
            let orient_px = transform::pointer_px_to_orient_px(pointer_px, &args, orientation);
            let cx = transform::orient_px_to_cx(orient_px, &args, orientation);
            let snapped = transform::floor_in_cx(cx, &args);
            debug!(
                item = item_id,
                page = page_id,
                %pointer_px,
                %orient_px,
                %cx,
                %snapped,
                "drop: pointer mapped to candidate"
            );
            Cell::from_cx(snapped)
        };
        self.redirect_cell(page_id, item_id, candidate)
    }

    /// Check that every listed id exists and every settled item lies inside
    /// its page layout.
    pub fn validate(&self) -> Result<()> {
        for page in self.pages.values() {
            let layout = page.layout.or_default();
            for id in &page.list {
                let item = self.items.get(id).ok_or_else(|| {
                    Error::Invariant(format!("page {} lists unknown item {}", page.id, id))
                })?;
                if item.is_settled() && !item.cell.within(layout.columns, layout.rows) {
                    return Err(Error::Invariant(format!(
                        "item {} at {} lies outside page {} ({}x{})",
                        id, item.cell, page.id, layout.columns, layout.rows
                    )));
                }
            }
        }
        for (name, list) in &self.lists {
            if let Some(id) = list.iter().find(|id| !self.items.contains_key(id.as_str())) {
                return Err(Error::Invariant(format!(
                    "list {} references unknown item {}",
                    name, id
                )));
            }
        }
        Ok(())
    }
}
