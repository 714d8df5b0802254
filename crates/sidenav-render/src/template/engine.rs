//! Template engine abstraction.
//!
//! This module defines the [`TemplateEngine`] trait, the templating capability
//! markup components render against. The default implementation is
//! [`MiniJinjaEngine`]; [`SimpleEngine`](super::SimpleEngine) is a lighter
//! placeholder-substitution alternative.
//!
//! # Handles and Views
//!
//! Rendering is a two-phase protocol:
//!
//! 1. [`new_template`](TemplateEngine::new_template) materializes a
//!    [`TemplateHandle`] for a resource and, optionally, a named view inside
//!    it. One resource can hold several views (a container layout and the
//!    fragments rendered into it).
//! 2. Data is injected into the handle as flat key/value pairs
//!    ([`add_template_data`](TemplateEngine::add_template_data)) or as a
//!    repeated block of records
//!    ([`add_template_data_repeat`](TemplateEngine::add_template_data_repeat)),
//!    and the handle is flattened with
//!    [`get_template`](TemplateEngine::get_template).

use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::{AutoEscape, Environment, Value};

use super::handle::TemplateHandle;
use super::registry::{RegistryError, TemplateRegistry};
use crate::error::RenderError;

/// A templating capability that turns handles into markup.
///
/// Implementations decide how a resource is located and how views are
/// extracted from it; callers only see handles.
pub trait TemplateEngine: Send + Sync {
    /// Materializes a fresh handle for `view` inside `resource`.
    ///
    /// A `None` view addresses the whole resource.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TemplateNotFound`] if the resource is unknown,
    /// [`RenderError::ViewNotFound`] if it has no such view, or
    /// [`RenderError::TemplateError`] if it fails to compile.
    fn new_template(&self, resource: &str, view: Option<&str>) -> Result<TemplateHandle, RenderError>;

    /// Flattens a handle's current state to markup.
    fn get_template(&self, handle: &TemplateHandle) -> Result<String, RenderError>;

    /// Binds flat key/value data into the handle and returns the updated rendering.
    ///
    /// With `escape` set, bound string values are HTML-escaped when flattened.
    fn add_template_data(
        &self,
        handle: &mut TemplateHandle,
        data: &serde_json::Map<String, serde_json::Value>,
        escape: bool,
    ) -> Result<String, RenderError> {
        handle.bind_all(data, escape);
        self.get_template(handle)
    }

    /// Binds an ordered list of records to the repeated block `placeholder`
    /// and returns the updated rendering.
    fn add_template_data_repeat(
        &self,
        handle: &mut TemplateHandle,
        placeholder: &str,
        records: &[serde_json::Value],
        escape: bool,
    ) -> Result<String, RenderError> {
        handle.bind(placeholder, serde_json::Value::Array(records.to_vec()), escape);
        self.get_template(handle)
    }
}

/// MiniJinja-based template engine.
///
/// Resources are MiniJinja templates resolved through a [`TemplateRegistry`].
/// Views are top-level `{% block %}`s, rendered on their own; repeated blocks
/// are plain `for` loops over the bound records.
///
/// HTML auto-escaping is enabled for every resource. Data bound with
/// `escape = false` is marked safe and passes through verbatim.
///
/// # Example
///
/// ```rust
/// use sidenav_render::{MiniJinjaEngine, TemplateEngine, TemplateRegistry};
/// use serde_json::json;
///
/// let mut registry = TemplateRegistry::new();
/// registry.add_inline(
///     "menu.html",
///     "{% block entry %}<a href=\"{{ url }}\">{{ label }}</a>{% endblock %}",
/// );
///
/// let engine = MiniJinjaEngine::new(registry);
/// let mut handle = engine.new_template("menu.html", Some("entry")).unwrap();
/// let data = json!({"url": "/home", "label": "Home"});
/// let html = engine
///     .add_template_data(&mut handle, data.as_object().unwrap(), false)
///     .unwrap();
///
/// assert_eq!(html, "<a href=\"/home\">Home</a>");
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
    registry: Arc<TemplateRegistry>,
}

impl MiniJinjaEngine {
    /// Creates an engine that loads resources from `registry`.
    pub fn new(registry: TemplateRegistry) -> Self {
        let registry = Arc::new(registry);
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        let loader_registry = Arc::clone(&registry);
        env.set_loader(move |name| match loader_registry.get_content(name) {
            Ok(content) => Ok(Some(content)),
            Err(RegistryError::NotFound { .. }) => Ok(None),
            Err(err) => Err(minijinja::Error::new(
                minijinja::ErrorKind::InvalidOperation,
                err.to_string(),
            )),
        });

        Self { env, registry }
    }

    /// Returns the registry resources are loaded from.
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// This allows registering custom filters or functions used by templates.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }

    fn render(&self, resource: &str, view: Option<&str>, ctx: Value) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(resource)?;
        match view {
            None => Ok(tmpl.render(ctx)?),
            Some(view) => {
                // The top-level output is discarded; only the block is kept.
                let mut captured = tmpl.render_captured_to(ctx, std::io::sink())?;
                captured
                    .with_state_mut(|state| state.render_block(view))
                    .map_err(|err| match err.kind() {
                        minijinja::ErrorKind::UnknownBlock => RenderError::view_not_found(resource, view),
                        _ => RenderError::from(err),
                    })
            }
        }
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn new_template(&self, resource: &str, view: Option<&str>) -> Result<TemplateHandle, RenderError> {
        // Rendering once with no data surfaces missing resources and views
        // at creation time rather than at flatten time.
        self.render(resource, view, Value::from(BTreeMap::<String, Value>::new()))?;
        Ok(TemplateHandle::new(resource, view.map(str::to_string)))
    }

    fn get_template(&self, handle: &TemplateHandle) -> Result<String, RenderError> {
        let ctx: BTreeMap<String, Value> = handle
            .bindings()
            .map(|(key, binding)| (key.to_string(), to_value(&binding.value, binding.escape)))
            .collect();
        self.render(handle.resource(), handle.view(), Value::from(ctx))
    }
}

/// Converts bound JSON data into a MiniJinja value.
///
/// Unescaped strings, including those nested in records, become safe strings.
fn to_value(value: &serde_json::Value, escape: bool) -> Value {
    if escape {
        return Value::from_serialize(value);
    }
    match value {
        serde_json::Value::String(s) => Value::from_safe_string(s.clone()),
        serde_json::Value::Array(items) => {
            Value::from(items.iter().map(|v| to_value(v, false)).collect::<Vec<_>>())
        }
        serde_json::Value::Object(map) => Value::from(
            map.iter()
                .map(|(k, v)| (k.clone(), to_value(v, false)))
                .collect::<BTreeMap<String, Value>>(),
        ),
        other => Value::from_serialize(other),
    }
}
