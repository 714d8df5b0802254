//! Template handles, resource registry and engines.
//!
//! Markup is produced in two phases: a [`TemplateHandle`] is materialized from
//! a named resource (optionally narrowed to one view inside it), then data is
//! injected and the handle is flattened to a string. Both phases go through a
//! [`TemplateEngine`], so components composing markup never depend on a
//! concrete template language.
//!
//! ## Key Types
//!
//! - [`TemplateEngine`]: The templating capability
//! - [`TemplateHandle`]: An in-progress template instance
//! - [`TemplateRegistry`]: Resource resolution from inline, file and framework sources
//! - [`MiniJinjaEngine`]: Jinja-syntax engine, views are `{% block %}`s
//! - [`SimpleEngine`]: Placeholder engine, views are `{#view}` sections

mod engine;
mod handle;
pub mod registry;
mod simple;

pub use engine::{MiniJinjaEngine, TemplateEngine};
pub use handle::{Binding, TemplateHandle};
pub use registry::{
    strip_extension, walk_template_dir, RegistryError, ResolvedTemplate, TemplateFile,
    TemplateRegistry, TEMPLATE_EXTENSIONS,
};
pub use simple::SimpleEngine;
