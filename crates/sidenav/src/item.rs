//! Menu item model.
//!
//! A sidebar holds three kinds of entries: plain links, action buttons and
//! dropdowns. Each kind is its own struct; [`MenuItem`] ties them together so
//! the registry can store them side by side.
//!
//! String fields that end up inside double-quoted markup attributes (link
//! urls and button actions) are stored with `"` replaced by `\"`. No other
//! escaping is applied here; see [`escape_quotes`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An opaque dropdown option record, passed through to the template as-is.
pub type OptionRecord = Map<String, Value>;

/// The kind of a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuItemKind {
    Link,
    Button,
    Dropdown,
}

impl MenuItemKind {
    /// Render precedence: dropdowns first, links last.
    pub const RENDER_ORDER: [MenuItemKind; 3] = [
        MenuItemKind::Dropdown,
        MenuItemKind::Button,
        MenuItemKind::Link,
    ];

    /// The lowercase name used in view names and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuItemKind::Link => "link",
            MenuItemKind::Button => "button",
            MenuItemKind::Dropdown => "dropdown",
        }
    }
}

impl fmt::Display for MenuItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replaces every `"` with `\"`.
///
/// This is the only sanitization applied to item fields.
pub fn escape_quotes(value: &str) -> String {
    value.replace('"', "\\\"")
}

/// Wraps a url into the client-side navigation call used by buttons.
pub fn navigation_trigger(url: &str) -> String {
    format!("psm_goTo('{}');", url)
}

/// A plain navigation link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    id: String,
    label: String,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
}

impl Link {
    /// Creates a link; `url` is quote-escaped.
    pub fn new(id: impl Into<String>, label: impl Into<String>, url: &str) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            url: escape_quotes(url),
            icon: None,
        }
    }

    /// Sets the icon.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// The escaped url.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// An action button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    id: String,
    label: String,
    onclick: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    btn_class: Option<String>,
}

impl Button {
    /// Creates a button navigating to `url` when clicked.
    ///
    /// The url is wrapped with [`navigation_trigger`] and the result is
    /// quote-escaped.
    pub fn new(id: impl Into<String>, label: impl Into<String>, url: &str) -> Self {
        Self::with_onclick(id, label, &navigation_trigger(url))
    }

    /// Creates a button running a client-side trigger expression verbatim
    /// (apart from quote-escaping).
    pub fn trigger(id: impl Into<String>, label: impl Into<String>, expression: &str) -> Self {
        Self::with_onclick(id, label, expression)
    }

    fn with_onclick(id: impl Into<String>, label: impl Into<String>, onclick: &str) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            onclick: escape_quotes(onclick),
            icon: None,
            btn_class: None,
        }
    }

    /// Sets the icon.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the style/category class.
    pub fn class(mut self, btn_class: impl Into<String>) -> Self {
        self.btn_class = Some(btn_class.into());
        self
    }

    /// The escaped click action.
    pub fn onclick(&self) -> &str {
        &self.onclick
    }
}

/// A dropdown menu with nested options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dropdown {
    id: String,
    label: String,
    // Injected separately as a repeated block.
    #[serde(skip)]
    options: Vec<OptionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    btn_class: Option<String>,
}

impl Dropdown {
    /// Creates a dropdown; `options` are kept unescaped and in order.
    pub fn new(id: impl Into<String>, label: impl Into<String>, options: Vec<OptionRecord>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            options,
            icon: None,
            btn_class: None,
        }
    }

    /// Sets the icon.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the style/category class.
    pub fn class(mut self, btn_class: impl Into<String>) -> Self {
        self.btn_class = Some(btn_class.into());
        self
    }

    /// The option records, in order.
    pub fn options(&self) -> &[OptionRecord] {
        &self.options
    }
}

/// Any menu item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MenuItem {
    Link(Link),
    Button(Button),
    Dropdown(Dropdown),
}

impl MenuItem {
    pub fn kind(&self) -> MenuItemKind {
        match self {
            MenuItem::Link(_) => MenuItemKind::Link,
            MenuItem::Button(_) => MenuItemKind::Button,
            MenuItem::Dropdown(_) => MenuItemKind::Dropdown,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            MenuItem::Link(link) => &link.id,
            MenuItem::Button(button) => &button.id,
            MenuItem::Dropdown(dropdown) => &dropdown.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MenuItem::Link(link) => &link.label,
            MenuItem::Button(button) => &button.label,
            MenuItem::Dropdown(dropdown) => &dropdown.label,
        }
    }

    pub fn icon(&self) -> Option<&str> {
        match self {
            MenuItem::Link(link) => link.icon.as_deref(),
            MenuItem::Button(button) => button.icon.as_deref(),
            MenuItem::Dropdown(dropdown) => dropdown.icon.as_deref(),
        }
    }

    /// Dropdown options; `None` for kinds without nested options.
    pub fn options(&self) -> Option<&[OptionRecord]> {
        match self {
            MenuItem::Dropdown(dropdown) => Some(dropdown.options()),
            _ => None,
        }
    }

    /// The flat scalar fields injected into the item's fragment view.
    ///
    /// Unset optional fields are left out so the template's own defaults apply.
    pub fn fields(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

impl From<Link> for MenuItem {
    fn from(link: Link) -> Self {
        MenuItem::Link(link)
    }
}

impl From<Button> for MenuItem {
    fn from(button: Button) -> Self {
        MenuItem::Button(button)
    }
}

impl From<Dropdown> for MenuItem {
    fn from(dropdown: Dropdown) -> Self {
        MenuItem::Dropdown(dropdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_order() {
        assert_eq!(
            MenuItemKind::RENDER_ORDER,
            [MenuItemKind::Dropdown, MenuItemKind::Button, MenuItemKind::Link]
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(MenuItemKind::Dropdown.to_string(), "dropdown");
        assert_eq!(MenuItemKind::Button.as_str(), "button");
        assert_eq!(MenuItemKind::Link.as_str(), "link");
    }

    #[test]
    fn test_link_url_is_quote_escaped() {
        let link = Link::new("home", "Home", "foo\"bar");
        assert_eq!(link.url(), "foo\\\"bar");
    }

    #[test]
    fn test_button_wraps_url() {
        let button = Button::new("save", "Save", "/path\"x");
        assert_eq!(button.onclick(), "psm_goTo('/path\\\"x');");
    }

    #[test]
    fn test_trigger_button_is_not_wrapped() {
        let button = Button::trigger("del", "Delete", "confirmDelete(\"all\")");
        assert_eq!(button.onclick(), "confirmDelete(\\\"all\\\")");
    }

    #[test]
    fn test_link_fields() {
        let item = MenuItem::from(Link::new("home", "Home", "/").icon("home"));
        let fields = item.fields().unwrap();
        assert_eq!(
            Value::Object(fields),
            json!({"id": "home", "label": "Home", "url": "/", "icon": "home"})
        );
    }

    #[test]
    fn test_button_fields_skip_unset() {
        let item = MenuItem::from(Button::new("b", "B", "/b").class("btn-success"));
        let fields = item.fields().unwrap();
        assert_eq!(
            Value::Object(fields),
            json!({"id": "b", "label": "B", "onclick": "psm_goTo('/b');", "btn_class": "btn-success"})
        );
    }

    #[test]
    fn test_dropdown_fields_exclude_options() {
        let options = vec![json!({"label": "A"}).as_object().cloned().unwrap()];
        let item = MenuItem::from(Dropdown::new("d", "Tools", options));
        let fields = item.fields().unwrap();

        assert!(!fields.contains_key("options"));
        assert_eq!(item.options().map(|o| o.len()), Some(1));
    }

    #[test]
    fn test_accessors() {
        let item = MenuItem::from(Dropdown::new("d", "Tools", Vec::new()).icon("wrench"));
        assert_eq!(item.kind(), MenuItemKind::Dropdown);
        assert_eq!(item.id(), "d");
        assert_eq!(item.label(), "Tools");
        assert_eq!(item.icon(), Some("wrench"));
    }
}
