//! Simple template engine using placeholder substitution.
//!
//! [`SimpleEngine`] is a lightweight alternative to
//! [`MiniJinjaEngine`](super::MiniJinjaEngine) for markup that only needs
//! substitution, named views and repeated blocks.
//!
//! # Syntax
//!
//! - `{name}` - Variable substitution (`{user.name}`, `{items.0}` for nested access)
//! - `{name|fallback}` - Substitution with a default used when `name` is unbound
//! - `{#view name}...{/view}` - A named view inside the resource
//! - `{#each name}...{/each}` - Repeated block over the records bound to `name`
//! - `{{` and `}}` - Escaped braces (renders as `{` and `}`)
//!
//! Inside a repeated block, a record's fields shadow outer bindings.
//! Unbound placeholders without a default render as nothing.
//!
//! # Example
//!
//! ```rust
//! use sidenav_render::{SimpleEngine, TemplateEngine, TemplateRegistry};
//! use serde_json::json;
//!
//! let mut registry = TemplateRegistry::new();
//! registry.add_inline(
//!     "menu.html",
//!     "{#view list}<ul>{#each items}<li>{label}</li>{/each}</ul>{/view}",
//! );
//!
//! let engine = SimpleEngine::new(registry);
//! let mut handle = engine.new_template("menu.html", Some("list")).unwrap();
//! let records = vec![json!({"label": "Home"}), json!({"label": "Servers"})];
//! let html = engine
//!     .add_template_data_repeat(&mut handle, "items", &records, false)
//!     .unwrap();
//!
//! assert_eq!(html, "<ul><li>Home</li><li>Servers</li></ul>");
//! ```

use std::sync::Arc;

use minijinja::HtmlEscape;
use serde_json::Value;

use super::handle::TemplateHandle;
use super::registry::TemplateRegistry;
use super::TemplateEngine;
use crate::error::RenderError;

/// A parsed template node.
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Var { name: String, default: Option<String> },
    Each { name: String, body: Vec<Node> },
    View { name: String, body: Vec<Node> },
}

/// A lightweight template engine using placeholder substitution.
///
/// Resources are resolved through a [`TemplateRegistry`] and parsed on every
/// flatten, so file-based resources pick up edits without a restart.
pub struct SimpleEngine {
    registry: Arc<TemplateRegistry>,
}

impl SimpleEngine {
    /// Creates an engine that loads resources from `registry`.
    pub fn new(registry: TemplateRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Returns the registry resources are loaded from.
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    fn load(&self, resource: &str, view: Option<&str>) -> Result<Vec<Node>, RenderError> {
        let source = self.registry.get_content(resource)?;
        let nodes = parse(&source)?;
        match view {
            None => Ok(nodes),
            Some(view) => {
                find_view(&nodes, view).ok_or_else(|| RenderError::view_not_found(resource, view))
            }
        }
    }
}

impl TemplateEngine for SimpleEngine {
    fn new_template(&self, resource: &str, view: Option<&str>) -> Result<TemplateHandle, RenderError> {
        self.load(resource, view)?;
        Ok(TemplateHandle::new(resource, view.map(str::to_string)))
    }

    fn get_template(&self, handle: &TemplateHandle) -> Result<String, RenderError> {
        let nodes = self.load(handle.resource(), handle.view())?;
        let mut out = String::new();
        render_nodes(&nodes, &[Scope::Handle(handle)], &mut out);
        Ok(out)
    }
}

/// A variable lookup scope: the handle's bindings or one repeated-block record.
#[derive(Clone, Copy)]
enum Scope<'v> {
    Handle(&'v TemplateHandle),
    Record { value: &'v Value, escape: bool },
}

impl<'v> Scope<'v> {
    fn lookup(self, path: &str) -> Option<(&'v Value, bool)> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let (value, escape) = match self {
            Scope::Handle(handle) => {
                let binding = handle.binding(head)?;
                (&binding.value, binding.escape)
            }
            Scope::Record { value, escape } => (value.get(head)?, escape),
        };
        match rest {
            Some(rest) => resolve_path(value, rest).map(|v| (v, escape)),
            None => Some((value, escape)),
        }
    }
}

/// Resolves a dotted path in a JSON value.
///
/// Supports nested objects (`user.profile.name`) and array indices (`items.0`).
fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;

    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(arr) => {
                let index: usize = part.parse().ok()?;
                arr.get(index)?
            }
            _ => return None,
        };
    }

    Some(current)
}

/// Formats a JSON value as a string for output.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn find_view(nodes: &[Node], view: &str) -> Option<Vec<Node>> {
    nodes.iter().find_map(|node| match node {
        Node::View { name, body } if name == view => Some(body.clone()),
        Node::View { body, .. } | Node::Each { body, .. } => find_view(body, view),
        _ => None,
    })
}

fn lookup<'v>(scopes: &[Scope<'v>], name: &str) -> Option<(&'v Value, bool)> {
    scopes.iter().rev().find_map(|scope| scope.lookup(name))
}

fn render_nodes<'v>(nodes: &[Node], scopes: &[Scope<'v>], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var { name, default } => match lookup(scopes, name) {
                Some((value, true)) => out.push_str(&HtmlEscape(&format_value(value)).to_string()),
                Some((value, false)) => out.push_str(&format_value(value)),
                None => out.push_str(default.as_deref().unwrap_or_default()),
            },
            Node::View { body, .. } => render_nodes(body, scopes, out),
            Node::Each { name, body } => {
                let Some((Value::Array(records), escape)) = lookup(scopes, name) else {
                    continue;
                };
                for record in records {
                    let mut inner = scopes.to_vec();
                    inner.push(Scope::Record {
                        value: record,
                        escape,
                    });
                    render_nodes(body, &inner, out);
                }
            }
        }
    }
}

/// Parses template source into nodes.
fn parse(source: &str) -> Result<Vec<Node>, RenderError> {
    let mut parser = Parser {
        chars: source.chars().collect(),
        pos: 0,
    };
    let nodes = parser.parse_nodes(None)?;
    Ok(nodes)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn parse_nodes(&mut self, closing: Option<&str>) -> Result<Vec<Node>, RenderError> {
        let mut nodes = Vec::new();
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            self.pos += 1;
            match ch {
                '{' if self.peek() == Some('{') => {
                    self.pos += 1;
                    text.push('{');
                }
                '}' if self.peek() == Some('}') => {
                    self.pos += 1;
                    text.push('}');
                }
                '{' => {
                    let tag = self.read_tag()?;
                    if !text.is_empty() {
                        nodes.push(Node::Text(std::mem::take(&mut text)));
                    }
                    if let Some(kind) = tag.strip_prefix('/') {
                        return match closing {
                            Some(expected) if expected == kind.trim() => Ok(nodes),
                            _ => Err(RenderError::TemplateError(format!(
                                "Unexpected closing tag: {{/{}}}",
                                kind
                            ))),
                        };
                    }
                    nodes.push(self.parse_tag(&tag)?);
                }
                _ => text.push(ch),
            }
        }

        if let Some(expected) = closing {
            return Err(RenderError::TemplateError(format!(
                "Unclosed block: missing {{/{}}}",
                expected
            )));
        }
        if !text.is_empty() {
            nodes.push(Node::Text(text));
        }
        Ok(nodes)
    }

    fn read_tag(&mut self) -> Result<String, RenderError> {
        let mut tag = String::new();
        while let Some(ch) = self.peek() {
            self.pos += 1;
            if ch == '}' {
                return Ok(tag);
            }
            tag.push(ch);
        }
        Err(RenderError::TemplateError(format!(
            "Unclosed variable substitution: {{{}",
            tag
        )))
    }

    fn parse_tag(&mut self, tag: &str) -> Result<Node, RenderError> {
        if let Some(block) = tag.strip_prefix('#') {
            let (kind, name) = block.split_once(char::is_whitespace).ok_or_else(|| {
                RenderError::TemplateError(format!("Block tag without a name: {{{}}}", tag))
            })?;
            let name = name.trim().to_string();
            return match kind {
                "view" => Ok(Node::View {
                    body: self.parse_nodes(Some("view"))?,
                    name,
                }),
                "each" => Ok(Node::Each {
                    body: self.parse_nodes(Some("each"))?,
                    name,
                }),
                other => Err(RenderError::TemplateError(format!(
                    "Unknown block tag: {}",
                    other
                ))),
            };
        }

        let (name, default) = match tag.split_once('|') {
            Some((name, default)) => (name.trim(), Some(default.to_string())),
            None => (tag.trim(), None),
        };
        if name.is_empty() {
            return Err(RenderError::TemplateError(
                "Empty variable name in template".to_string(),
            ));
        }
        Ok(Node::Var {
            name: name.to_string(),
            default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn engine_with(source: &str) -> SimpleEngine {
        let mut registry = TemplateRegistry::new();
        registry.add_inline("menu.html", source);
        SimpleEngine::new(registry)
    }

    fn map(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_simple_substitution() {
        let engine = engine_with("Hello, {name}!");
        let mut handle = engine.new_template("menu.html", None).unwrap();
        let output = engine
            .add_template_data(&mut handle, &map(json!({"name": "World"})), false)
            .unwrap();
        assert_eq!(output, "Hello, World!");
    }

    #[test]
    fn test_nested_access() {
        let engine = engine_with("{user.name} <{user.emails.0}>");
        let mut handle = engine.new_template("menu.html", None).unwrap();
        let data = json!({"user": {"name": "Alice", "emails": ["alice@example.com"]}});
        let output = engine
            .add_template_data(&mut handle, &map(data), false)
            .unwrap();
        assert_eq!(output, "Alice <alice@example.com>");
    }

    #[test]
    fn test_default_and_unbound() {
        let engine = engine_with("[{subtitle|Overview}][{missing}]");
        let handle = engine.new_template("menu.html", None).unwrap();
        assert_eq!(engine.get_template(&handle).unwrap(), "[Overview][]");
    }

    #[test]
    fn test_escaped_braces() {
        let engine = engine_with("function() {{ go({x}); }}");
        let mut handle = engine.new_template("menu.html", None).unwrap();
        let output = engine
            .add_template_data(&mut handle, &map(json!({"x": 1})), false)
            .unwrap();
        assert_eq!(output, "function() { go(1); }");
    }

    #[test]
    fn test_views_are_extracted() {
        let engine = engine_with("{#view a}A:{x}{/view}{#view b}B:{x}{/view}");
        let mut handle = engine.new_template("menu.html", Some("b")).unwrap();
        let output = engine
            .add_template_data(&mut handle, &map(json!({"x": "1"})), false)
            .unwrap();
        assert_eq!(output, "B:1");
    }

    #[test]
    fn test_each_with_outer_fallback() {
        let engine = engine_with("{#each options}{label}@{id};{/each}");
        let mut handle = engine.new_template("menu.html", None).unwrap();
        engine
            .add_template_data(&mut handle, &map(json!({"id": "d1"})), false)
            .unwrap();
        let options = vec![json!({"label": "A"}), json!({"label": "B", "id": "own"})];
        let output = engine
            .add_template_data_repeat(&mut handle, "options", &options, false)
            .unwrap();
        assert_eq!(output, "A@d1;B@own;");
    }

    #[test]
    fn test_escape_flag() {
        let engine = engine_with("<b>{label}</b>");
        let mut handle = engine.new_template("menu.html", None).unwrap();
        let output = engine
            .add_template_data(&mut handle, &map(json!({"label": "<i>\"x\"</i>"})), true)
            .unwrap();
        assert_eq!(output, "<b>&lt;i&gt;&quot;x&quot;&lt;&#x2f;i&gt;</b>");
    }

    #[test]
    fn test_unclosed_block_is_error() {
        let engine = engine_with("{#each items}{label}");
        let result = engine.new_template("menu.html", None);
        assert!(matches!(result, Err(RenderError::TemplateError(_))));
    }

    #[test]
    fn test_mismatched_close_is_error() {
        let engine = engine_with("{#view a}x{/each}");
        assert!(engine.new_template("menu.html", None).is_err());
    }

    #[test]
    fn test_unclosed_variable_is_error() {
        let engine = engine_with("Hello {name");
        assert!(engine.new_template("menu.html", None).is_err());
    }

    #[test]
    fn test_missing_view() {
        let engine = engine_with("{#view a}x{/view}");
        let result = engine.new_template("menu.html", Some("b"));
        assert!(matches!(result, Err(RenderError::ViewNotFound { .. })));
    }

    proptest! {
        #[test]
        fn test_escaped_output_has_no_markup(label in ".*") {
            let engine = engine_with("{label}");
            let mut handle = engine.new_template("menu.html", None).unwrap();
            let data = map(json!({ "label": label }));
            let output = engine.add_template_data(&mut handle, &data, true).unwrap();
            prop_assert!(!output.contains('<'));
            prop_assert!(!output.contains('"'));
        }
    }
}
