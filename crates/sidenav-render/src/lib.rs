//! # Sidenav Render - Template Handles for Markup Fragments
//!
//! `sidenav-render` is the templating layer underneath `sidenav`. It resolves
//! named template resources, hands out [`TemplateHandle`]s for views inside
//! them, and flattens handles to markup once data has been injected.
//!
//! ## Core Concepts
//!
//! - [`TemplateEngine`]: The capability trait (create, inject, inject repeated, flatten)
//! - [`TemplateHandle`]: Cloneable in-progress instance carrying bindings
//! - [`TemplateRegistry`]: Resource lookup (inline → directories → framework defaults)
//! - [`RenderError`]: Error type for every engine operation
//!
//! ## Quick Start
//!
//! ```rust
//! use sidenav_render::{MiniJinjaEngine, TemplateEngine, TemplateRegistry};
//! use serde_json::json;
//!
//! let mut registry = TemplateRegistry::new();
//! registry.add_inline(
//!     "nav.html",
//!     "{% block list %}<ul>{% for item in items %}<li>{{ item.label }}</li>{% endfor %}</ul>{% endblock %}",
//! );
//!
//! let engine = MiniJinjaEngine::new(registry);
//! let mut handle = engine.new_template("nav.html", Some("list")).unwrap();
//! engine
//!     .add_template_data_repeat(&mut handle, "items", &[json!({"label": "Servers"})], false)
//!     .unwrap();
//!
//! assert_eq!(engine.get_template(&handle).unwrap(), "<ul><li>Servers</li></ul>");
//! ```
//!
//! ## Escaping
//!
//! Every injection carries an `escape` flag. With `escape = true`, bound
//! strings are HTML-escaped when the handle is flattened; with
//! `escape = false` they pass through verbatim. Handles remember the flag per
//! binding, so markup fragments and plain text can share one template.

mod error;
pub mod template;

pub use error::RenderError;

pub use template::{
    strip_extension, walk_template_dir, Binding, MiniJinjaEngine, RegistryError,
    ResolvedTemplate, SimpleEngine, TemplateEngine, TemplateFile, TemplateHandle,
    TemplateRegistry, TEMPLATE_EXTENSIONS,
};
