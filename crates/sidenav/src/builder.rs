//! The sidebar menu builder.
//!
//! [`MenuBuilder`] collects items from any number of callers and renders them
//! in one pass against a [`TemplateEngine`].
//!
//! # Rendering
//!
//! 1. A handle for the container view is created.
//! 2. Kinds are visited in [`MenuItemKind::RENDER_ORDER`]; empty kinds are
//!    skipped. Each remaining kind gets one handle for its item view, which
//!    every item of that kind starts from. Dropdown options are injected as
//!    the repeated `options` block, then the item's scalar fields are
//!    injected, yielding the item's fragment.
//! 3. Fragments, paired with the active marker, are injected into the
//!    container as the repeated `items` block.
//! 4. The subtitle is injected only when one was set.
//!
//! Rendering never mutates the builder, so rendering twice gives the same
//! markup.

use serde::Serialize;
use sidenav_render::{RenderError, TemplateEngine};

use crate::config::SidebarConfig;
use crate::item::{MenuItem, MenuItemKind, OptionRecord};
use crate::registry::ItemRegistry;

/// Which items an active id applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveScope {
    /// Items of every kind whose id matches.
    AnyKind,
    /// Only the item of this kind whose id matches.
    Kind(MenuItemKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveItem {
    id: String,
    scope: ActiveScope,
}

impl ActiveItem {
    fn matches(&self, item: &MenuItem) -> bool {
        match self.scope {
            ActiveScope::AnyKind => item.id() == self.id,
            ActiveScope::Kind(kind) => item.kind() == kind && item.id() == self.id,
        }
    }
}

/// One rendered entry of the container's `items` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRecord {
    pub html_item: String,
    pub class_active: String,
}

/// Collects menu items and renders them into a sidebar.
///
/// ```rust
/// use sidenav::{default_engine, MenuBuilder};
///
/// let engine = default_engine();
/// let mut sidebar = MenuBuilder::new(&engine);
/// sidebar
///     .add_link("servers", "Servers", "/servers", Some("tasks"))
///     .add_button("update", "Update", "/update", None, Some("btn-primary"), false)
///     .set_active_item("servers");
///
/// let html = sidebar.render().unwrap();
/// assert!(html.contains("psm_goTo('/update');"));
/// ```
pub struct MenuBuilder<'e> {
    engine: &'e dyn TemplateEngine,
    config: SidebarConfig,
    registry: ItemRegistry,
    active: Option<ActiveItem>,
    subtitle: Option<String>,
}

impl<'e> MenuBuilder<'e> {
    /// Creates a builder using the default template names.
    pub fn new(engine: &'e dyn TemplateEngine) -> Self {
        Self::with_config(engine, SidebarConfig::default())
    }

    /// Creates a builder using the template names from `config`.
    pub fn with_config(engine: &'e dyn TemplateEngine, config: SidebarConfig) -> Self {
        Self {
            engine,
            config,
            registry: ItemRegistry::new(),
            active: None,
            subtitle: None,
        }
    }

    /// Marks items with this id as active, whatever their kind.
    pub fn set_active_item(&mut self, id: impl Into<String>) -> &mut Self {
        self.active = Some(ActiveItem {
            id: id.into(),
            scope: ActiveScope::AnyKind,
        });
        self
    }

    /// Marks only the item of `kind` with this id as active.
    pub fn set_active_item_of(&mut self, kind: MenuItemKind, id: impl Into<String>) -> &mut Self {
        self.active = Some(ActiveItem {
            id: id.into(),
            scope: ActiveScope::Kind(kind),
        });
        self
    }

    /// Overrides the template's default subtitle.
    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) -> &mut Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Adds a link. See [`ItemRegistry::upsert_link`].
    pub fn add_link(&mut self, id: &str, label: &str, url: &str, icon: Option<&str>) -> &mut Self {
        self.registry.upsert_link(id, label, url, icon);
        self
    }

    /// Adds a button. See [`ItemRegistry::upsert_button`].
    pub fn add_button(
        &mut self,
        id: &str,
        label: &str,
        action: &str,
        icon: Option<&str>,
        btn_class: Option<&str>,
        is_trigger_expression: bool,
    ) -> &mut Self {
        self.registry
            .upsert_button(id, label, action, icon, btn_class, is_trigger_expression);
        self
    }

    /// Adds a dropdown. See [`ItemRegistry::upsert_dropdown`].
    pub fn add_dropdown(
        &mut self,
        id: &str,
        label: &str,
        options: Vec<OptionRecord>,
        icon: Option<&str>,
        btn_class: Option<&str>,
    ) -> &mut Self {
        self.registry
            .upsert_dropdown(id, label, options, icon, btn_class);
        self
    }

    /// Adds a prebuilt item.
    pub fn add_item(&mut self, item: impl Into<MenuItem>) -> &mut Self {
        self.registry.insert(item.into());
        self
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SidebarConfig {
        &self.config
    }

    /// The active id, if one was set.
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.id.as_str())
    }

    pub fn active_scope(&self) -> Option<ActiveScope> {
        self.active.as_ref().map(|active| active.scope)
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Renders every item into the container view.
    ///
    /// # Errors
    ///
    /// Template failures from the engine are returned unchanged.
    pub fn render(&self) -> Result<String, RenderError> {
        tracing::debug!(
            items = self.registry.len(),
            active = self.active_id().unwrap_or(""),
            subtitle = self.subtitle.is_some(),
            "Rendering sidebar"
        );

        let mut container = self
            .engine
            .new_template(&self.config.resource, Some(&self.config.container_view))?;

        let records = self.render_items()?;
        if !records.is_empty() {
            let records = records
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()?;
            self.engine
                .add_template_data_repeat(&mut container, "items", &records, false)?;
        }

        if let Some(subtitle) = &self.subtitle {
            let mut data = serde_json::Map::new();
            data.insert("subtitle".to_string(), subtitle.clone().into());
            self.engine.add_template_data(&mut container, &data, false)?;
        }

        let html = self.engine.get_template(&container)?;
        tracing::debug!(bytes = html.len(), "Rendered sidebar");
        Ok(html)
    }

    /// Renders every item fragment, in kind precedence then insertion order.
    pub fn render_items(&self) -> Result<Vec<ItemRecord>, RenderError> {
        let mut records = Vec::with_capacity(self.registry.len());

        for kind in self.registry.kinds() {
            let view = self.config.view_for(kind);
            let kind_handle = self.engine.new_template(&self.config.resource, Some(&view))?;

            for item in self.registry.items(kind) {
                let mut handle = kind_handle.clone();
                if let Some(options) = item.options() {
                    let options: Vec<_> = options
                        .iter()
                        .cloned()
                        .map(serde_json::Value::Object)
                        .collect();
                    self.engine
                        .add_template_data_repeat(&mut handle, "options", &options, false)?;
                }
                let html_item = self
                    .engine
                    .add_template_data(&mut handle, &item.fields()?, false)?;

                let active = self.active.as_ref().is_some_and(|a| a.matches(item));
                tracing::trace!(kind = %kind, id = item.id(), active, "Rendered item");

                records.push(ItemRecord {
                    html_item,
                    class_active: if active {
                        self.config.active_class.clone()
                    } else {
                        String::new()
                    },
                });
            }
        }

        Ok(records)
    }
}
