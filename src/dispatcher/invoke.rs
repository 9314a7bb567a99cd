//! Invoker and the dependency-resolution collaborator.

use crate::controller::{Call, ControllerType, Instance, MethodSpec};
use crate::error::HandlerError;
use crate::router::Route;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Dependency-resolution collaborator: hands out controller instances.
pub trait Container: Send + Sync {
    /// Instance of `ty`, built through its factory or taken from a cache.
    ///
    /// # Errors
    ///
    /// Whatever prevents the instance from being produced; it reaches the
    /// caller of the dispatch as a [`HandlerError`].
    fn resolve(&self, ty: &ControllerType) -> anyhow::Result<Instance>;
}

/// Builds each controller type once and reuses the instance afterwards.
///
/// Instances are keyed by type identifier.
#[derive(Default)]
pub struct SingletonContainer {
    instances: DashMap<String, Instance>,
}

impl std::fmt::Debug for SingletonContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonContainer")
            .field("instances", &self.instances.len())
            .finish()
    }
}

impl SingletonContainer {
    /// Empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instances built so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// `true` when nothing has been built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Container for SingletonContainer {
    fn resolve(&self, ty: &ControllerType) -> anyhow::Result<Instance> {
        let entry = self
            .instances
            .entry(ty.name().to_string())
            .or_try_insert_with(|| {
                debug!(controller = ty.name(), "Constructing controller instance");
                ty.construct()
            })?;
        Ok(Arc::clone(entry.value()))
    }
}

/// Bind the route parameters to `method` and run it on an instance from `container`.
///
/// Supplied values fill the declared parameters in path order; unsupplied
/// optional parameters take their defaults and surplus values are exposed as
/// [`Call::extra`].
///
/// # Errors
///
/// [`HandlerError`] for a failing container or method body.
pub fn invoke(
    container: &dyn Container,
    ty: &ControllerType,
    method: &MethodSpec,
    route: &Route,
) -> Result<Value, HandlerError> {
    let instance = container.resolve(ty)?;
    let (args, extra) = method.bind(route.parameters());
    let call = Call::new(route, args, extra);
    let value = method.invoke(instance.as_ref(), &call)?;
    Ok(value)
}
