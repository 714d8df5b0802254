//! # Sidenav - Navigation Sidebar Assembly
//!
//! `sidenav` collects links, action buttons and dropdown menus contributed by
//! unrelated parts of an application and renders them into one sidebar
//! fragment through a [`TemplateEngine`].
//!
//! ## Core Concepts
//!
//! - [`MenuBuilder`]: Collects items, tracks the active entry and renders
//! - [`ItemRegistry`]: Per-kind, insertion-ordered item store with upsert by id
//! - [`MenuItem`]: [`Link`], [`Button`] or [`Dropdown`]
//! - [`SidebarConfig`]: Template resource, view names and active marker
//!
//! Items render grouped by kind, dropdowns first and links last, in the order
//! they were first added within each kind.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use sidenav::{default_engine, MenuBuilder};
//!
//! let engine = default_engine();
//! let mut sidebar = MenuBuilder::new(&engine);
//!
//! let option = json!({"label": "Nightly", "url": "/reports/nightly"});
//! sidebar
//!     .add_link("servers", "Servers", "/servers", Some("hdd"))
//!     .add_dropdown("reports", "Reports", vec![option.as_object().unwrap().clone()], None, None)
//!     .set_active_item("servers")
//!     .set_subtitle("Operations");
//!
//! let html = sidebar.render().unwrap();
//! assert!(html.find("nav-reports").unwrap() < html.find("nav-servers").unwrap());
//! assert!(html.contains("Operations"));
//! ```
//!
//! ## Templates
//!
//! [`default_engine`] serves the bundled `main_sidebar.tpl.html`. To restyle
//! the sidebar, register a template with the same name inline or point
//! [`SidebarConfig::template_dir`] at a directory holding one; both shadow
//! the bundled copy.

pub mod assets;
mod builder;
mod component;
mod config;
mod item;
mod registry;

pub use builder::{ActiveScope, ItemRecord, MenuBuilder};
pub use component::SidebarComponent;
pub use config::{ConfigError, SidebarConfig};
pub use item::{
    escape_quotes, navigation_trigger, Button, Dropdown, Link, MenuItem, MenuItemKind,
    OptionRecord,
};
pub use registry::ItemRegistry;

pub use sidenav_render::{
    MiniJinjaEngine, RenderError, SimpleEngine, TemplateEngine, TemplateHandle, TemplateRegistry,
};

/// A template registry holding the bundled sidebar templates.
pub fn default_registry() -> TemplateRegistry {
    let mut registry = TemplateRegistry::new();
    registry.add_framework_entries(assets::FRAMEWORK_TEMPLATES);
    registry
}

/// A MiniJinja engine over the bundled sidebar templates.
pub fn default_engine() -> MiniJinjaEngine {
    MiniJinjaEngine::new(default_registry())
}

/// A MiniJinja engine over the bundled templates and, when configured, the
/// templates in `config.template_dir`.
pub fn default_engine_with(config: &SidebarConfig) -> Result<MiniJinjaEngine, ConfigError> {
    let mut registry = default_registry();
    if let Some(dir) = &config.template_dir {
        registry.add_template_dir(dir)?;
    }
    Ok(MiniJinjaEngine::new(registry))
}
