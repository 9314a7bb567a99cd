//! Route Resolver: combines subsystem matching, path parsing and defaulting
//! into one immutable [`Route`] per request.

use super::naming::{camel, pascal};
use super::path::{self, SegmentVec};
use super::subsystem::SubsystemRegistry;
use crate::config::ConfigSource;
use crate::error::ConfigError;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Method used when the path names none.
pub const DEFAULT_METHOD: &str = "index";

/// Configuration key holding the default controller's SEO name.
pub const DEFAULT_CONTROLLER_KEY: &str = "route.default_controller";

/// Result of resolving a request path.
///
/// Created once per request and read-only afterwards; pass it (or the
/// [`Call`](crate::controller::Call) wrapping it) to whatever needs to know
/// which route is being served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    subsystem: String,
    namespace_root: Option<PathBuf>,
    controller: String,
    controller_seo: String,
    method: String,
    parameters: SegmentVec,
}

impl Route {
    /// Route in the root application.
    ///
    /// `controller_seo` is converted the same way a path segment would be;
    /// `method` is taken as an identifier already.
    #[must_use]
    pub fn new(controller_seo: &str, method: &str, parameters: impl IntoIterator<Item = String>) -> Self {
        Self {
            subsystem: String::new(),
            namespace_root: None,
            controller: pascal(controller_seo),
            controller_seo: controller_seo.to_lowercase(),
            method: method.to_string(),
            parameters: parameters.into_iter().collect(),
        }
    }

    /// Matched subsystem prefix with trailing separator (`admin/reports/`), or `""`.
    #[must_use]
    pub fn subsystem(&self) -> &str {
        &self.subsystem
    }

    /// Subsystem without surrounding separators (`admin/reports`), or `""`.
    #[must_use]
    pub fn subsystem_name(&self) -> &str {
        self.subsystem.trim_matches('/')
    }

    /// Directory of the matched subsystem relative to the controller root.
    #[must_use]
    pub fn namespace_root(&self) -> Option<&PathBuf> {
        self.namespace_root.as_ref()
    }

    /// Controller identifier in Pascal form (`UserManager`).
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Lower-case, unconverted controller segment (`user_manager`).
    #[must_use]
    pub fn controller_seo(&self) -> &str {
        &self.controller_seo
    }

    /// Subsystem-qualified controller identifier (`admin/reports/Summary`).
    #[must_use]
    pub fn controller_class(&self) -> String {
        format!("{}{}", self.subsystem, self.controller)
    }

    /// Type identifier the loader expects: controller identifier plus `suffix`.
    #[must_use]
    pub fn type_name(&self, suffix: &str) -> String {
        format!("{}{}", self.controller, suffix)
    }

    /// Method identifier in camel form.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Parameters in request-path order.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Same route with the parameter list replaced.
    #[must_use]
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = String>) -> Self {
        self.parameters = parameters.into_iter().collect();
        self
    }
}

/// Turns raw virtual paths into [`Route`]s.
///
/// Holds only startup data (the subsystem registry and default controller),
/// so one resolver can be shared by every in-flight request.
#[derive(Debug, Clone)]
pub struct RouteResolver {
    registry: SubsystemRegistry,
    default_controller: String,
}

impl RouteResolver {
    /// Create a resolver.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `default_controller` is empty,
    /// since every route must name a controller.
    pub fn new(registry: SubsystemRegistry, default_controller: &str) -> Result<Self, ConfigError> {
        let default_controller = default_controller.trim_matches('/');
        if pascal(default_controller).is_empty() {
            return Err(ConfigError::Invalid(format!(
                "route.default_controller '{default_controller}' does not name a controller"
            )));
        }
        Ok(Self {
            registry,
            default_controller: default_controller.to_string(),
        })
    }

    /// Create a resolver reading the default controller from a configuration collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the key is absent or empty.
    pub fn from_config(config: &dyn ConfigSource, registry: SubsystemRegistry) -> Result<Self, ConfigError> {
        let default_controller = config.get(DEFAULT_CONTROLLER_KEY).ok_or_else(|| {
            ConfigError::Invalid(format!("missing configuration key '{DEFAULT_CONTROLLER_KEY}'"))
        })?;
        Self::new(registry, &default_controller)
    }

    /// Subsystem registry in use.
    #[must_use]
    pub fn registry(&self) -> &SubsystemRegistry {
        &self.registry
    }

    /// Default controller SEO name.
    #[must_use]
    pub fn default_controller(&self) -> &str {
        &self.default_controller
    }

    /// Resolve a raw virtual path.
    ///
    /// `controller/method/p1/p2` with an optional registered subsystem prefix.
    /// A controller segment that is missing, or that converts to an empty
    /// identifier (`...`), falls back to the default controller. A missing or
    /// empty method segment falls back to [`DEFAULT_METHOD`].
    #[must_use]
    pub fn resolve(&self, raw_path: &str) -> Route {
        let normalized = path::normalize(raw_path);
        let matched = self.registry.resolve(normalized);
        let subsystem = matched.subsystem();
        let namespace_root = matched.entry.map(|e| e.namespace_root());
        let segments = path::split_segments(matched.remainder);

        let (controller, controller_segment) = segments
            .first()
            .map(|s| (pascal(s), s.as_str()))
            .filter(|(identifier, _)| !identifier.is_empty())
            .unwrap_or_else(|| {
                (
                    pascal(&self.default_controller),
                    self.default_controller.as_str(),
                )
            });

        let method = segments
            .get(1)
            .filter(|s| !s.is_empty())
            .map_or_else(|| DEFAULT_METHOD.to_string(), |s| camel(s));

        let parameters: SegmentVec = segments.iter().skip(2).cloned().collect();

        let route = Route {
            subsystem,
            namespace_root,
            controller,
            controller_seo: controller_segment.to_lowercase(),
            method,
            parameters,
        };
        debug!(
            path = raw_path,
            subsystem = %route.subsystem,
            controller = %route.controller,
            method = %route.method,
            params = route.parameters.len(),
            "Route resolved"
        );
        route
    }
}
