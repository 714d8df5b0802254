//! Template handles.
//!
//! A [`TemplateHandle`] is an in-progress template instance: it names a
//! resource and a view inside it, and accumulates data bindings until an
//! engine flattens it to markup. Handles are plain values. Cloning one gives
//! an independent copy, so a single per-view handle can be reused as the
//! starting point for many fragments without bindings leaking between them.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// A value bound into a handle, together with its escaping mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binding {
    /// The bound data.
    pub value: Value,
    /// Whether string values are HTML-escaped when the handle is flattened.
    pub escape: bool,
}

/// An in-progress template instance.
///
/// Created by [`TemplateEngine::new_template`](super::TemplateEngine::new_template)
/// and filled through the engine's injection methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateHandle {
    resource: String,
    view: Option<String>,
    bindings: BTreeMap<String, Binding>,
}

impl TemplateHandle {
    /// Creates an empty handle for `view` inside `resource`.
    ///
    /// A `None` view addresses the whole resource.
    pub fn new(resource: impl Into<String>, view: Option<String>) -> Self {
        Self {
            resource: resource.into(),
            view,
            bindings: BTreeMap::new(),
        }
    }

    /// The resource name this handle was created from.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The view inside the resource, if any.
    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    /// Binds a single value, replacing any previous binding for `key`.
    pub fn bind(&mut self, key: impl Into<String>, value: Value, escape: bool) {
        self.bindings.insert(key.into(), Binding { value, escape });
    }

    /// Binds every entry of `data` as a flat key/value pair.
    pub fn bind_all(&mut self, data: &Map<String, Value>, escape: bool) {
        for (key, value) in data {
            self.bind(key.clone(), value.clone(), escape);
        }
    }

    /// Returns the binding for `key`.
    pub fn binding(&self, key: &str) -> Option<&Binding> {
        self.bindings.get(key)
    }

    /// Returns true if `key` has been bound.
    pub fn is_bound(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    /// Iterates over bindings in key order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(k, b)| (k.as_str(), b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bind_overwrites() {
        let mut handle = TemplateHandle::new("sidebar", Some("container".into()));
        handle.bind("subtitle", json!("first"), false);
        handle.bind("subtitle", json!("second"), true);

        let binding = handle.binding("subtitle").unwrap();
        assert_eq!(binding.value, json!("second"));
        assert!(binding.escape);
    }

    #[test]
    fn test_bind_all_flattens_map() {
        let mut handle = TemplateHandle::new("sidebar", None);
        let data = json!({"id": "home", "label": "Home"});
        handle.bind_all(data.as_object().unwrap(), false);

        assert!(handle.is_bound("id"));
        assert!(handle.is_bound("label"));
        let keys: Vec<&str> = handle.bindings().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["id", "label"]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut base = TemplateHandle::new("sidebar", Some("link".into()));
        base.bind("shared", json!(1), false);

        let mut copy = base.clone();
        copy.bind("id", json!("a"), false);

        assert!(copy.is_bound("shared"));
        assert!(!base.is_bound("id"));
    }
}
