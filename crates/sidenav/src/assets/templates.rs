//! Framework template definitions.
//!
//! Templates are stored as `(name, content)` pairs for registration
//! with the template registry.

/// Framework-supplied templates.
///
/// Each entry is `(name_with_extension, content)`.
/// The registry makes them available both with and without extension.
pub const FRAMEWORK_TEMPLATES: &[(&str, &str)] =
    &[("main_sidebar.tpl.html", MAIN_SIDEBAR_TEMPLATE)];

/// Default sidebar resource (MiniJinja syntax).
///
/// Views:
/// - `main_sidebar_container`: `items` (records of `html_item`, `class_active`)
///   and `subtitle`, defaulting to "Navigation"
/// - `main_sidebar_types_link`: `id`, `label`, `url`, `icon`
/// - `main_sidebar_types_button`: `id`, `label`, `onclick`, `icon`, `btn_class`
/// - `main_sidebar_types_dropdown`: `id`, `label`, `icon`, `btn_class` and
///   the repeated `options` block (`url`, `label` per option)
pub const MAIN_SIDEBAR_TEMPLATE: &str = include_str!("../../templates/main_sidebar.tpl.html");
