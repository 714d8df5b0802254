//! Sidebar configuration.
//!
//! [`SidebarConfig`] names the template resource and views the builder
//! renders against, plus the marker put on the active entry. Every field has
//! a default matching the bundled template, so an empty YAML document is a
//! valid configuration:
//!
//! ```rust
//! use sidenav::SidebarConfig;
//!
//! let config = SidebarConfig::from_yaml("active_class: current\n").unwrap();
//! assert_eq!(config.active_class, "current");
//! assert_eq!(config.resource, "main_sidebar.tpl.html");
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::item::MenuItemKind;

/// Errors raised while loading a [`SidebarConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML document is malformed.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A field holds an unusable value.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// The configured template directory could not be registered.
    #[error("Template directory error: {0}")]
    Templates(#[from] sidenav_render::RegistryError),
}

/// Template names and markers used when rendering a sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    /// Template resource holding the container and item views.
    pub resource: String,
    /// View rendering the whole sidebar.
    pub container_view: String,
    /// Prefix of the per-kind item views; the kind name is appended.
    pub view_prefix: String,
    /// Marker given to the active entry.
    pub active_class: String,
    /// Extra directory searched for template resources.
    pub template_dir: Option<PathBuf>,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            resource: "main_sidebar.tpl.html".to_string(),
            container_view: "main_sidebar_container".to_string(),
            view_prefix: "main_sidebar_types_".to_string(),
            active_class: "active".to_string(),
            template_dir: None,
        }
    }
}

impl SidebarConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // Empty, `~` and comment-only documents are null, not an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        if document.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_value(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Checks that every template name is non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("resource", &self.resource),
            ("container_view", &self.container_view),
            ("view_prefix", &self.view_prefix),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("`{}` must not be empty", field)));
            }
        }
        Ok(())
    }

    /// The view name for items of `kind`.
    pub fn view_for(&self, kind: MenuItemKind) -> String {
        format!("{}{}", self.view_prefix, kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SidebarConfig::default();
        assert_eq!(config.view_for(MenuItemKind::Dropdown), "main_sidebar_types_dropdown");
        assert_eq!(config.view_for(MenuItemKind::Link), "main_sidebar_types_link");
        assert_eq!(config.container_view, "main_sidebar_container");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(SidebarConfig::from_yaml("").unwrap(), SidebarConfig::default());
    }

    #[test]
    fn test_null_yaml_is_default() {
        for yaml in ["~", "null\n", "# nothing configured\n"] {
            assert_eq!(SidebarConfig::from_yaml(yaml).unwrap(), SidebarConfig::default());
        }
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = SidebarConfig::from_yaml(
            "resource: nav.html\nview_prefix: nav_\ntemplate_dir: ./templates\n",
        )
        .unwrap();
        assert_eq!(config.resource, "nav.html");
        assert_eq!(config.view_for(MenuItemKind::Button), "nav_button");
        assert_eq!(config.active_class, "active");
        assert_eq!(config.template_dir, Some(PathBuf::from("./templates")));
    }

    #[test]
    fn test_empty_name_is_invalid() {
        let result = SidebarConfig::from_yaml("container_view: \"\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_yaml() {
        let result = SidebarConfig::from_yaml("resource: [unterminated\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sidebar.yaml");
        std::fs::write(&path, "active_class: selected\n").unwrap();

        let config = SidebarConfig::from_file(&path).unwrap();
        assert_eq!(config.active_class, "selected");
    }

    #[test]
    fn test_missing_file() {
        let result = SidebarConfig::from_file("/no/such/sidebar.yaml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
