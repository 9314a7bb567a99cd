//! # Error Taxonomy
//!
//! Every failure the dispatcher detects itself is one of two kinds:
//!
//! - [`LoadError`] - the computed controller resource does not exist (or its
//!   module refused to load). Suggested status 404.
//! - [`RouterError`] - the resource loaded but the request cannot be served by
//!   it: the expected type is missing, the method is missing, the method may not
//!   be called from a URL, or too few parameters were supplied.
//!
//! Both carry structured fields (type name, method, resource path, reason,
//! suggested status) so a presentation layer can render them without parsing
//! messages.
//!
//! Failures raised *inside* a handler are not part of this taxonomy. They
//! travel as [`HandlerError`] on the `Err` side of
//! [`Dispatcher::dispatch`](crate::dispatcher::Dispatcher::dispatch).

use crate::controller::Visibility;
use serde::Serialize;
use std::path::PathBuf;

/// The computed controller resource could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("can't load controller '{controller}': resource '{}' {}", .resource.display(), .reason.as_deref().unwrap_or("does not exist"))]
pub struct LoadError {
    /// Controller identifier (without the type suffix)
    pub controller: String,
    /// Type identifier the resource was expected to define (with the suffix)
    pub type_name: String,
    /// Resource path the loader looked for
    pub resource: PathBuf,
    /// Why loading failed when the resource exists but refused to load
    pub reason: Option<String>,
}

impl LoadError {
    /// Suggested HTTP status for presentation.
    #[must_use]
    pub const fn status(&self) -> u16 {
        404
    }
}

/// Why a method was refused even though the request named it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDenial {
    /// The method identifier is the type's constructor
    Constructor,
    /// The method identifier starts with the internal marker
    InternalMarker,
    /// The method exists but is not public
    NotPublic(Visibility),
}

/// Distinct failure reasons covered by [`RouterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouterErrorKind {
    /// The resource loaded but did not define the expected type
    TypeNotFound,
    /// The type has no member with the requested identifier
    MethodNotFound,
    /// The member exists (or is reserved) but may not be dispatched to
    AccessDenied(AccessDenial),
    /// Fewer parameters were supplied than the method requires
    ParameterCount {
        /// Leading parameters the path must supply
        required: usize,
        /// Parameters taken from the request path
        supplied: usize,
    },
}

impl RouterErrorKind {
    /// Suggested HTTP status for this kind.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            RouterErrorKind::TypeNotFound | RouterErrorKind::MethodNotFound => 404,
            RouterErrorKind::AccessDenied(_) => 403,
            RouterErrorKind::ParameterCount { .. } => 400,
        }
    }

    /// Short human-readable reason.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            RouterErrorKind::TypeNotFound => "type not found".to_string(),
            RouterErrorKind::MethodNotFound => "method not found".to_string(),
            RouterErrorKind::AccessDenied(AccessDenial::Constructor) => {
                "access denied to constructor".to_string()
            }
            RouterErrorKind::AccessDenied(AccessDenial::InternalMarker) => {
                "access denied to internal method".to_string()
            }
            RouterErrorKind::AccessDenied(AccessDenial::NotPublic(visibility)) => {
                format!("access denied to {visibility} method")
            }
            RouterErrorKind::ParameterCount { required, supplied } => {
                format!("parameter count mismatch: {required} required, {supplied} supplied")
            }
        }
    }
}

/// The resolved controller or method cannot serve the request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} (type '{type_name}', method '{method}', resource '{}')", .kind.reason(), .resource.display())]
pub struct RouterError {
    /// Which rule failed
    pub kind: RouterErrorKind,
    /// Type identifier (with the suffix) that was expected or inspected
    pub type_name: String,
    /// Method identifier from the route
    pub method: String,
    /// Resource the type was loaded from
    pub resource: PathBuf,
}

impl RouterError {
    /// Suggested HTTP status for presentation.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.kind.status()
    }
}

/// Failure detected by the dispatcher at one of its stages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// See [`LoadError`]
    #[error(transparent)]
    Load(#[from] LoadError),
    /// See [`RouterError`]
    #[error(transparent)]
    Router(#[from] RouterError),
}

impl DispatchError {
    /// Suggested HTTP status for presentation.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            DispatchError::Load(err) => err.status(),
            DispatchError::Router(err) => err.status(),
        }
    }

    /// Stable name of the failure kind, for logs and error payloads.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            DispatchError::Load(_) => "load_error",
            DispatchError::Router(_) => "router_error",
        }
    }

    /// Type identifier (with the suffix) named by the failure.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            DispatchError::Load(err) => &err.type_name,
            DispatchError::Router(err) => &err.type_name,
        }
    }

    /// The router-side detail, when this is a [`RouterError`].
    #[must_use]
    pub const fn router_kind(&self) -> Option<&RouterErrorKind> {
        match self {
            DispatchError::Load(_) => None,
            DispatchError::Router(err) => Some(&err.kind),
        }
    }

    /// JSON body for the presentation layer.
    ///
    /// Router failures carry the failed rule under `rule`, serialized from
    /// [`RouterErrorKind`] (`"method_not_found"`,
    /// `{"access_denied": {"not_public": "private"}}`, ...).
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            DispatchError::Load(err) => serde_json::json!({
                "kind": self.kind(),
                "status": err.status(),
                "controller": err.controller,
                "type_name": err.type_name,
                "resource": err.resource.display().to_string(),
                "reason": err.reason.as_deref().unwrap_or("resource does not exist"),
            }),
            DispatchError::Router(err) => serde_json::json!({
                "kind": self.kind(),
                "status": err.status(),
                "type_name": err.type_name,
                "method": err.method,
                "resource": err.resource.display().to_string(),
                "rule": err.kind,
                "reason": err.kind.reason(),
            }),
        }
    }
}

/// Failure raised inside an invoked handler (or by the container building it).
///
/// Passed through unmodified; translating it into a response is the caller's job.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct HandlerError(#[from] pub anyhow::Error);

impl HandlerError {
    /// Borrow the underlying error.
    #[must_use]
    pub fn inner(&self) -> &anyhow::Error {
        &self.0
    }

    /// Take the underlying error back.
    #[must_use]
    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

/// Configuration could not be read or is invalid.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config '{}': {source}", .path.display())]
    Read {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid YAML/TOML for the schema
    #[error("failed to parse config '{}': {message}", .path.display())]
    Parse {
        /// File that was being parsed
        path: PathBuf,
        /// Parser message
        message: String,
    },
    /// The configuration parsed but violates a rule
    #[error("invalid config: {0}")]
    Invalid(String),
}
