//! Named template resources.
//!
//! [`TemplateRegistry`] maps resource names to template source. Three layers
//! are searched, first match wins:
//!
//! 1. inline sources ([`add_inline`](TemplateRegistry::add_inline))
//! 2. files found under template directories ([`add_template_dir`](TemplateRegistry::add_template_dir))
//! 3. framework defaults ([`add_framework`](TemplateRegistry::add_framework))
//!
//! Files and framework defaults answer to their name with and without the
//! extension, so `"main_sidebar"` and `"main_sidebar.tpl.html"` address the
//! same resource. When one directory holds `nav.tpl.html` and `nav.html`,
//! the extensionless name goes to the extension listed first in
//! [`TEMPLATE_EXTENSIONS`]. Two directories providing the same name is an
//! error.
//!
//! ```rust
//! use sidenav_render::TemplateRegistry;
//!
//! let mut registry = TemplateRegistry::new();
//! registry.add_framework("main_sidebar.tpl.html", "bundled");
//! registry.add_inline("main_sidebar.tpl.html", "host");
//!
//! assert_eq!(registry.get_content("main_sidebar.tpl.html").unwrap(), "host");
//! assert_eq!(registry.get_content("main_sidebar").unwrap(), "bundled");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Template file extensions, most preferred first.
pub const TEMPLATE_EXTENSIONS: [&str; 3] = [".tpl.html", ".html", ".jinja"];

/// Splits `name` into its base name and recognized extension.
fn split_extension(name: &str) -> Option<(&str, &'static str)> {
    TEMPLATE_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext).map(|base| (base, *ext)))
}

/// Strips a recognized template extension from `name`.
pub fn strip_extension(name: &str) -> Option<&str> {
    split_extension(name).map(|(base, _)| base)
}

/// A template file found under a template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the directory, `/`-separated, without extension.
    pub name: String,
    /// One of [`TEMPLATE_EXTENSIONS`].
    pub extension: &'static str,
    pub path: PathBuf,
}

impl TemplateFile {
    /// The name including its extension.
    pub fn full_name(&self) -> String {
        format!("{}{}", self.name, self.extension)
    }

    fn rank(&self) -> usize {
        TEMPLATE_EXTENSIONS
            .iter()
            .position(|ext| *ext == self.extension)
            .unwrap_or(TEMPLATE_EXTENSIONS.len())
    }
}

/// Where a resolved template's source lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTemplate {
    /// Held in memory (inline and framework templates).
    Source(String),
    /// On disk, read at lookup time.
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two template directories both provide `name`.
    Collision {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
    NotFound {
        name: String,
    },
    ReadError {
        path: PathBuf,
        message: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Collision {
                name,
                first,
                second,
            } => write!(
                f,
                "template \"{}\" is provided by both {} and {}",
                name,
                first.display(),
                second.display()
            ),
            RegistryError::NotFound { name } => write!(f, "no template named \"{}\"", name),
            RegistryError::ReadError { path, message } => {
                write!(f, "cannot read {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

#[derive(Debug, Clone)]
struct FileSlot {
    root: PathBuf,
    path: PathBuf,
    rank: usize,
}

/// Resolves resource names to template source.
///
/// Engines take the registry by value once it is populated, so lookups never
/// race with registration.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    inline: HashMap<String, String>,
    files: HashMap<String, FileSlot>,
    framework: HashMap<String, String>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `content` under exactly `name`, shadowing files and
    /// framework templates.
    pub fn add_inline(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.inline.insert(name.into(), content.into());
    }

    /// Registers every template file under `dir`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::ReadError`] if `dir` is not a readable directory,
    /// [`RegistryError::Collision`] if a name is already taken by a file
    /// from another directory.
    pub fn add_template_dir(&mut self, dir: impl AsRef<Path>) -> Result<(), RegistryError> {
        let dir = dir.as_ref();
        let read_error = |message: String| RegistryError::ReadError {
            path: dir.to_path_buf(),
            message,
        };
        if !dir.is_dir() {
            return Err(read_error("not a directory".to_string()));
        }

        let files = walk_template_dir(dir).map_err(|e| read_error(e.to_string()))?;
        tracing::debug!(dir = %dir.display(), files = files.len(), "Registered template directory");

        for file in files {
            self.add_file(dir, &file)?;
        }
        Ok(())
    }

    fn add_file(&mut self, root: &Path, file: &TemplateFile) -> Result<(), RegistryError> {
        let rank = file.rank();
        for (name, rank) in [(file.name.clone(), rank + 1), (file.full_name(), 0)] {
            if let Some(existing) = self.files.get(&name) {
                if existing.root != root {
                    return Err(RegistryError::Collision {
                        name,
                        first: existing.path.clone(),
                        second: file.path.clone(),
                    });
                }
                if existing.rank <= rank {
                    continue;
                }
            }
            self.files.insert(
                name,
                FileSlot {
                    root: root.to_path_buf(),
                    path: file.path.clone(),
                    rank,
                },
            );
        }
        Ok(())
    }

    /// Registers a bundled default under `name` and, when `name` has a
    /// recognized extension, under its base name too.
    pub fn add_framework(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        let content = content.into();
        if let Some(base) = strip_extension(&name) {
            self.framework.insert(base.to_string(), content.clone());
        }
        self.framework.insert(name, content);
    }

    /// Registers `(name, content)` pairs with [`add_framework`](Self::add_framework).
    pub fn add_framework_entries(&mut self, entries: &[(&str, &str)]) {
        for (name, content) in entries {
            self.add_framework(*name, *content);
        }
    }

    /// Finds where `name` lives.
    pub fn get(&self, name: &str) -> Result<ResolvedTemplate, RegistryError> {
        if let Some(content) = self.inline.get(name) {
            Ok(ResolvedTemplate::Source(content.clone()))
        } else if let Some(slot) = self.files.get(name) {
            Ok(ResolvedTemplate::File(slot.path.clone()))
        } else if let Some(content) = self.framework.get(name) {
            Ok(ResolvedTemplate::Source(content.clone()))
        } else {
            Err(RegistryError::NotFound {
                name: name.to_string(),
            })
        }
    }

    /// Returns the source of `name`, reading files from disk every time.
    pub fn get_content(&self, name: &str) -> Result<String, RegistryError> {
        match self.get(name)? {
            ResolvedTemplate::Source(content) => Ok(content),
            ResolvedTemplate::File(path) => {
                fs::read_to_string(&path).map_err(|e| RegistryError::ReadError {
                    message: e.to_string(),
                    path,
                })
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.inline.is_empty() && self.files.is_empty() && self.framework.is_empty()
    }
}

/// Lists the template files under `root`, recursively.
///
/// Files without a recognized extension are skipped. Names are relative to
/// `root` and use `/` on every platform.
pub fn walk_template_dir(root: impl AsRef<Path>) -> std::io::Result<Vec<TemplateFile>> {
    let root = root.as_ref();
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if let Some((name, extension)) = split_extension(&relative) {
                found.push(TemplateFile {
                    name: name.to_string(),
                    extension,
                    path: path.clone(),
                });
            }
        }
    }

    found.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(found)
}
