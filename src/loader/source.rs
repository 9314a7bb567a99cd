use super::catalog::ControllerCatalog;
use crate::controller::ControllerType;
use anyhow::anyhow;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Filesystem/module-loading collaborator.
///
/// The dispatcher only asks whether a resource exists and, if so, loads it;
/// it never reads resource contents itself. Loading defines the resource's
/// controller types in the catalog.
pub trait ModuleSource: Send + Sync {
    /// `true` when `resource` can be loaded.
    fn exists(&self, resource: &Path) -> bool;

    /// Load `resource`, defining its types in `catalog`.
    ///
    /// # Errors
    ///
    /// Implementation specific; surfaced to callers as a load failure.
    fn load(&self, resource: &Path, catalog: &ControllerCatalog) -> anyhow::Result<()>;
}

/// Module initialiser: defines the types a resource declares.
pub type ModuleInit = Arc<dyn Fn(&ControllerCatalog) -> anyhow::Result<()> + Send + Sync>;

/// [`ModuleSource`] backed by a table of initialisers keyed by resource path.
///
/// Controllers are compiled into the binary and registered at startup against
/// the resource path the convention gives them. With
/// [`require_on_disk`](Self::require_on_disk) a resource additionally has to
/// exist as a file, so removing a controller file disables its routes.
#[derive(Clone, Default)]
pub struct ModuleTable {
    root: PathBuf,
    modules: HashMap<PathBuf, ModuleInit>,
    require_on_disk: bool,
}

impl fmt::Debug for ModuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut modules: Vec<_> = self.modules.keys().collect();
        modules.sort();
        f.debug_struct("ModuleTable")
            .field("root", &self.root)
            .field("modules", &modules)
            .field("require_on_disk", &self.require_on_disk)
            .finish()
    }
}

impl ModuleTable {
    /// Table whose relative registrations are anchored at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            modules: HashMap::new(),
            require_on_disk: false,
        }
    }

    /// Also require each resource to exist as a file.
    #[must_use]
    pub fn require_on_disk(mut self, require: bool) -> Self {
        self.require_on_disk = require;
        self
    }

    /// Register an initialiser for `relative` (joined onto the root).
    #[must_use]
    pub fn module<F>(mut self, relative: impl AsRef<Path>, init: F) -> Self
    where
        F: Fn(&ControllerCatalog) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.modules
            .insert(self.root.join(relative), Arc::new(init));
        self
    }

    /// Register a resource declaring exactly one controller type.
    #[must_use]
    pub fn controller(self, relative: impl AsRef<Path>, ty: ControllerType) -> Self {
        self.module(relative, move |catalog: &ControllerCatalog| {
            catalog.register(ty.clone());
            Ok(())
        })
    }

    /// Number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleSource for ModuleTable {
    fn exists(&self, resource: &Path) -> bool {
        self.modules.contains_key(resource) && (!self.require_on_disk || resource.is_file())
    }

    fn load(&self, resource: &Path, catalog: &ControllerCatalog) -> anyhow::Result<()> {
        let init = self
            .modules
            .get(resource)
            .ok_or_else(|| anyhow!("no module registered for '{}'", resource.display()))?;
        init(catalog)
    }
}
