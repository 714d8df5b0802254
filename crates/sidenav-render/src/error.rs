//! The error type shared by every engine operation.
//!
//! Components that compose markup through a [`TemplateEngine`](crate::TemplateEngine)
//! return [`RenderError`] as-is, so a caller can tell a missing resource from
//! a missing view or a broken template without knowing which engine ran.

use std::fmt;

use crate::template::RegistryError;

#[derive(Debug)]
pub enum RenderError {
    /// The template failed to parse or evaluate.
    TemplateError(String),

    /// No resource with this name is registered.
    TemplateNotFound(String),

    /// The resource exists but has no view with this name.
    ViewNotFound { resource: String, view: String },

    /// Bound data could not be converted for the engine.
    SerializationError(String),

    IoError(std::io::Error),

    /// Any other engine failure.
    OperationError(String),
}

impl RenderError {
    pub fn view_not_found(resource: impl Into<String>, view: impl Into<String>) -> Self {
        RenderError::ViewNotFound {
            resource: resource.into(),
            view: view.into(),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::TemplateError(msg) => write!(f, "broken template: {}", msg),
            RenderError::TemplateNotFound(name) => write!(f, "unknown template resource {}", name),
            RenderError::ViewNotFound { resource, view } => {
                write!(f, "template {} has no view \"{}\"", resource, view)
            }
            RenderError::SerializationError(msg) => write!(f, "cannot bind data: {}", msg),
            RenderError::IoError(err) => write!(f, "{}", err),
            RenderError::OperationError(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let RenderError::IoError(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::IoError(err)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::SerializationError(err.to_string())
    }
}

impl From<RegistryError> for RenderError {
    fn from(err: RegistryError) -> Self {
        if let RegistryError::NotFound { name } = err {
            RenderError::TemplateNotFound(name)
        } else {
            RenderError::OperationError(err.to_string())
        }
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind as Kind;

        let message = err.to_string();
        match err.kind() {
            Kind::TemplateNotFound => RenderError::TemplateNotFound(message),
            Kind::BadSerialization => RenderError::SerializationError(message),
            Kind::SyntaxError
            | Kind::BadEscape
            | Kind::UndefinedError
            | Kind::UnknownBlock
            | Kind::UnknownFilter
            | Kind::UnknownFunction
            | Kind::UnknownMethod
            | Kind::UnknownTest => RenderError::TemplateError(message),
            _ => RenderError::OperationError(message),
        }
    }
}
