//! Framework-supplied templates.
//!
//! The bundled sidebar resource serves as a default that hosts override by
//! registering a template with the same name, either inline or from a
//! template directory. Framework templates have the lowest resolution
//! priority.

mod templates;

pub use templates::{FRAMEWORK_TEMPLATES, MAIN_SIDEBAR_TEMPLATE};
