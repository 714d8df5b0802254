//! Item registry.
//!
//! Items are partitioned by kind, then keyed by id. Id spaces are independent
//! across kinds, so a link and a button may share an id. Within a kind,
//! insertion order is preserved and re-adding an id replaces the item in
//! place.

use indexmap::IndexMap;

use crate::item::{Button, Dropdown, Link, MenuItem, MenuItemKind, OptionRecord};

/// In-memory store of menu items, grouped by kind.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    links: IndexMap<String, MenuItem>,
    buttons: IndexMap<String, MenuItem>,
    dropdowns: IndexMap<String, MenuItem>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: MenuItemKind) -> &IndexMap<String, MenuItem> {
        match kind {
            MenuItemKind::Link => &self.links,
            MenuItemKind::Button => &self.buttons,
            MenuItemKind::Dropdown => &self.dropdowns,
        }
    }

    fn slot_mut(&mut self, kind: MenuItemKind) -> &mut IndexMap<String, MenuItem> {
        match kind {
            MenuItemKind::Link => &mut self.links,
            MenuItemKind::Button => &mut self.buttons,
            MenuItemKind::Dropdown => &mut self.dropdowns,
        }
    }

    /// Stores `item` under its kind and id.
    ///
    /// An existing item with the same kind and id is replaced without moving
    /// it and returned.
    pub fn insert(&mut self, item: MenuItem) -> Option<MenuItem> {
        let kind = item.kind();
        let id = item.id().to_string();
        let previous = self.slot_mut(kind).insert(id, item);
        if let Some(previous) = &previous {
            tracing::debug!("Replaced {} item \"{}\"", kind, previous.id());
        }
        previous
    }

    /// Stores a link; `url` is quote-escaped.
    pub fn upsert_link(&mut self, id: &str, label: &str, url: &str, icon: Option<&str>) {
        let mut link = Link::new(id, label, url);
        if let Some(icon) = icon {
            link = link.icon(icon);
        }
        self.insert(link.into());
    }

    /// Stores a button.
    ///
    /// Unless `is_trigger_expression` is set, `action` is a url and gets
    /// wrapped into a navigation call before quote-escaping.
    pub fn upsert_button(
        &mut self,
        id: &str,
        label: &str,
        action: &str,
        icon: Option<&str>,
        btn_class: Option<&str>,
        is_trigger_expression: bool,
    ) {
        let mut button = if is_trigger_expression {
            Button::trigger(id, label, action)
        } else {
            Button::new(id, label, action)
        };
        if let Some(icon) = icon {
            button = button.icon(icon);
        }
        if let Some(btn_class) = btn_class {
            button = button.class(btn_class);
        }
        self.insert(button.into());
    }

    /// Stores a dropdown; `options` are kept as supplied.
    pub fn upsert_dropdown(
        &mut self,
        id: &str,
        label: &str,
        options: Vec<OptionRecord>,
        icon: Option<&str>,
        btn_class: Option<&str>,
    ) {
        let mut dropdown = Dropdown::new(id, label, options);
        if let Some(icon) = icon {
            dropdown = dropdown.icon(icon);
        }
        if let Some(btn_class) = btn_class {
            dropdown = dropdown.class(btn_class);
        }
        self.insert(dropdown.into());
    }

    /// Items of `kind` in insertion order.
    pub fn items(&self, kind: MenuItemKind) -> impl Iterator<Item = &MenuItem> {
        self.slot(kind).values()
    }

    pub fn get(&self, kind: MenuItemKind, id: &str) -> Option<&MenuItem> {
        self.slot(kind).get(id)
    }

    /// Kinds holding at least one item, in render order.
    pub fn kinds(&self) -> impl Iterator<Item = MenuItemKind> + '_ {
        MenuItemKind::RENDER_ORDER
            .into_iter()
            .filter(|kind| !self.slot(*kind).is_empty())
    }

    pub fn count(&self, kind: MenuItemKind) -> usize {
        self.slot(kind).len()
    }

    pub fn len(&self) -> usize {
        self.links.len() + self.buttons.len() + self.dropdowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
