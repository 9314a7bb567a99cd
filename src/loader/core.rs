use super::catalog::ControllerCatalog;
use super::source::ModuleSource;
use crate::controller::ControllerType;
use crate::error::{DispatchError, LoadError, RouterError, RouterErrorKind};
use crate::router::naming::upper_first;
use crate::router::Route;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Naming convention mapping a route to a resource path and a type identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLayout {
    root: PathBuf,
    suffix: String,
    extension: String,
}

impl ResourceLayout {
    /// Layout rooted at `root`, e.g. `("app/controllers", "Controller", "rs")`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, suffix: &str, extension: &str) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.to_string(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Controller root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Suffix appended to controller identifiers.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Resource file extension (without the dot).
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `<root>[/<subsystem root>]/<Seo name, first letter upper><suffix>.<ext>`
    #[must_use]
    pub fn resource_path(&self, route: &Route) -> PathBuf {
        let mut path = self.root.clone();
        if let Some(namespace) = route.namespace_root() {
            path.push(namespace);
        }
        path.push(format!(
            "{}{}.{}",
            upper_first(route.controller_seo()),
            self.suffix,
            self.extension
        ));
        path
    }

    /// Type identifier the resource is expected to define.
    #[must_use]
    pub fn type_name(&self, route: &Route) -> String {
        route.type_name(&self.suffix)
    }

    /// Append the resource extension unless `path` already carries it.
    #[must_use]
    pub fn with_extension(&self, path: &Path) -> PathBuf {
        if path.extension().is_some_and(|ext| ext == self.extension.as_str()) {
            path.to_path_buf()
        } else {
            let mut raw = path.as_os_str().to_owned();
            raw.push(".");
            raw.push(&self.extension);
            PathBuf::from(raw)
        }
    }

    /// Controller identifier for messages: `type_name` without the suffix.
    #[must_use]
    pub fn controller_name<'a>(&self, type_name: &'a str) -> &'a str {
        type_name.strip_suffix(self.suffix.as_str()).unwrap_or(type_name)
    }
}

/// Handler Loader: resource existence check, load-once, type lookup.
///
/// Shared across requests. Each resource is loaded at most once per process:
/// concurrent first loads of the same resource wait on one initialisation, and
/// later loads are no-ops. A failed load is not remembered, so it is retried
/// by the next dispatch that needs it.
pub struct HandlerLoader {
    layout: ResourceLayout,
    source: Arc<dyn ModuleSource>,
    catalog: ControllerCatalog,
    loaded: DashMap<PathBuf, Arc<OnceCell<()>>>,
}

impl std::fmt::Debug for HandlerLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerLoader")
            .field("layout", &self.layout)
            .field("catalog", &self.catalog.len())
            .field("loaded", &self.loaded.len())
            .finish_non_exhaustive()
    }
}

impl HandlerLoader {
    /// Loader over `source` using `layout`, with an empty catalog.
    #[must_use]
    pub fn new(layout: ResourceLayout, source: Arc<dyn ModuleSource>) -> Self {
        Self::with_catalog(layout, source, ControllerCatalog::new())
    }

    /// Loader populating an existing catalog.
    #[must_use]
    pub fn with_catalog(
        layout: ResourceLayout,
        source: Arc<dyn ModuleSource>,
        catalog: ControllerCatalog,
    ) -> Self {
        Self {
            layout,
            source,
            catalog,
            loaded: DashMap::new(),
        }
    }

    /// Naming convention in use.
    #[must_use]
    pub fn layout(&self) -> &ResourceLayout {
        &self.layout
    }

    /// Types defined so far.
    #[must_use]
    pub fn catalog(&self) -> &ControllerCatalog {
        &self.catalog
    }

    /// `true` when the source reports `resource` as present.
    #[must_use]
    pub fn exists(&self, resource: &Path) -> bool {
        self.source.exists(resource)
    }

    /// `true` once `resource` has been loaded successfully.
    #[must_use]
    pub fn is_loaded(&self, resource: &Path) -> bool {
        self.loaded
            .get(resource)
            .is_some_and(|cell| cell.get().is_some())
    }

    /// Resolve the route's controller type, loading its resource if needed.
    ///
    /// # Errors
    ///
    /// - [`LoadError`] when the resource does not exist or fails to load
    /// - [`RouterError`] with [`RouterErrorKind::TypeNotFound`] when the
    ///   resource loaded but does not define the expected type
    pub fn load_route(&self, route: &Route) -> Result<(PathBuf, Arc<ControllerType>), DispatchError> {
        let resource = self.layout.resource_path(route);
        let type_name = self.layout.type_name(route);
        let ty = self.load(&resource, &type_name, route.method())?;
        Ok((resource, ty))
    }

    /// Load `resource` and look up `type_name` in it.
    ///
    /// `method` is only carried into the error for context.
    ///
    /// # Errors
    ///
    /// See [`load_route`](Self::load_route).
    pub fn load(
        &self,
        resource: &Path,
        type_name: &str,
        method: &str,
    ) -> Result<Arc<ControllerType>, DispatchError> {
        let controller = self.layout.controller_name(type_name);

        if !self.source.exists(resource) {
            warn!(
                controller,
                resource = %resource.display(),
                "Controller resource does not exist"
            );
            return Err(LoadError {
                controller: controller.to_string(),
                type_name: type_name.to_string(),
                resource: resource.to_path_buf(),
                reason: None,
            }
            .into());
        }

        self.ensure_loaded(resource).map_err(|err| {
            warn!(
                controller,
                resource = %resource.display(),
                error = %err,
                "Controller resource failed to load"
            );
            LoadError {
                controller: controller.to_string(),
                type_name: type_name.to_string(),
                resource: resource.to_path_buf(),
                reason: Some(err.to_string()),
            }
        })?;

        self.catalog.get(type_name).ok_or_else(|| {
            warn!(
                type_name,
                resource = %resource.display(),
                "Resource loaded but does not define the controller type"
            );
            RouterError {
                kind: RouterErrorKind::TypeNotFound,
                type_name: type_name.to_string(),
                method: method.to_string(),
                resource: resource.to_path_buf(),
            }
            .into()
        })
    }

    fn ensure_loaded(&self, resource: &Path) -> anyhow::Result<()> {
        // Clone the cell out so the map shard is not locked while loading.
        let cell = Arc::clone(&self.loaded.entry(resource.to_path_buf()).or_default());
        cell.get_or_try_init(|| {
            let start = Instant::now();
            self.source.load(resource, &self.catalog)?;
            info!(
                resource = %resource.display(),
                types = self.catalog.len(),
                elapsed_us = start.elapsed().as_micros() as u64,
                "Controller resource loaded"
            );
            Ok::<(), anyhow::Error>(())
        })?;
        debug!(resource = %resource.display(), "Controller resource ready");
        Ok(())
    }
}
