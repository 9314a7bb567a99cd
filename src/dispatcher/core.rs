use super::guard;
use super::invoke::{self, Container, SingletonContainer};
use super::request::DispatchRequest;
use crate::config::DispatchConfig;
use crate::controller::ControllerType;
use crate::error::{ConfigError, DispatchError, HandlerError};
use crate::loader::{HandlerLoader, ModuleSource};
use crate::router::{Route, RouteResolver};
use crate::session::{SessionBinder, SessionStore};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};

/// Result of one dispatch that got as far as the dispatcher could take it.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The method ran; its serialized return value
    Dispatched {
        /// Value returned by the invoked method
        return_value: Value,
    },
    /// A stage of the dispatcher refused the request
    Failed(DispatchError),
}

impl DispatchOutcome {
    /// `true` when the method ran.
    #[must_use]
    pub fn is_dispatched(&self) -> bool {
        matches!(self, DispatchOutcome::Dispatched { .. })
    }

    /// Returned value, when the method ran.
    #[must_use]
    pub fn return_value(&self) -> Option<&Value> {
        match self {
            DispatchOutcome::Dispatched { return_value } => Some(return_value),
            DispatchOutcome::Failed(_) => None,
        }
    }

    /// Dispatcher-detected failure, when the method did not run.
    #[must_use]
    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            DispatchOutcome::Dispatched { .. } => None,
            DispatchOutcome::Failed(err) => Some(err),
        }
    }

    /// Convert into a plain `Result`.
    ///
    /// # Errors
    ///
    /// The [`DispatchError`] of a failed outcome.
    pub fn into_result(self) -> Result<Value, DispatchError> {
        match self {
            DispatchOutcome::Dispatched { return_value } => Ok(return_value),
            DispatchOutcome::Failed(err) => Err(err),
        }
    }
}

/// The dispatch engine: resolve → bind session → load → guard → invoke.
///
/// Built once at startup and shared by every request. All per-request data
/// lives in the [`Route`] created for that request and the
/// [`Call`](crate::controller::Call) handed to the method, so concurrent
/// dispatches never observe each other.
pub struct Dispatcher {
    resolver: RouteResolver,
    loader: HandlerLoader,
    container: Arc<dyn Container>,
    binder: SessionBinder,
    path_key: String,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("resolver", &self.resolver)
            .field("loader", &self.loader)
            .field("binder", &self.binder)
            .field("path_key", &self.path_key)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Dispatcher with a [`SingletonContainer`], the default control keys
    /// and the `url` path key.
    #[must_use]
    pub fn new(resolver: RouteResolver, loader: HandlerLoader) -> Self {
        Self {
            resolver,
            loader,
            container: Arc::new(SingletonContainer::new()),
            binder: SessionBinder::default(),
            path_key: "url".to_string(),
        }
    }

    /// Build every stage from a configuration and a module source.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] when the configuration fails validation.
    pub fn from_config(
        config: &DispatchConfig,
        source: Arc<dyn ModuleSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let resolver = RouteResolver::from_config(config, config.registry())?;
        let loader = HandlerLoader::new(config.layout(), source);
        info!(
            default_controller = %config.route.default_controller,
            controller_root = %config.controllers.root.display(),
            subsystems = config.subsystems.len(),
            "Dispatcher configured"
        );
        Ok(Self::new(resolver, loader)
            .with_session_binder(SessionBinder::new(config.session.control_keys.iter().cloned()))
            .with_path_key(&config.request.path_key))
    }

    /// Replace the dependency-resolution collaborator.
    #[must_use]
    pub fn with_container(mut self, container: Arc<dyn Container>) -> Self {
        self.container = container;
        self
    }

    /// Replace the session binder.
    #[must_use]
    pub fn with_session_binder(mut self, binder: SessionBinder) -> Self {
        self.binder = binder;
        self
    }

    /// Query key carrying the virtual path.
    #[must_use]
    pub fn with_path_key(mut self, key: &str) -> Self {
        self.path_key = key.to_string();
        self
    }

    /// Route resolver in use.
    #[must_use]
    pub fn resolver(&self) -> &RouteResolver {
        &self.resolver
    }

    /// Handler loader in use.
    #[must_use]
    pub fn loader(&self) -> &HandlerLoader {
        &self.loader
    }

    /// Query key carrying the virtual path.
    #[must_use]
    pub fn path_key(&self) -> &str {
        &self.path_key
    }

    /// Resolve the request's virtual path without dispatching.
    ///
    /// A request without a path resolves to the default controller.
    #[must_use]
    pub fn resolve(&self, request: &DispatchRequest) -> Route {
        self.resolver
            .resolve(request.path(&self.path_key).unwrap_or_default())
    }

    /// Serve one request.
    ///
    /// Runs inside a `dispatch` span tagged with [`DispatchRequest::request_id`].
    /// The session record is written before the controller is loaded, so it
    /// reflects the requested route even when the dispatch fails.
    ///
    /// # Errors
    ///
    /// [`HandlerError`] when the invoked method (or the container building its
    /// instance) fails. Failures the dispatcher detects itself are returned as
    /// [`DispatchOutcome::Failed`].
    pub fn dispatch(
        &self,
        request: &DispatchRequest,
        session: &dyn SessionStore,
    ) -> Result<DispatchOutcome, HandlerError> {
        let request_id = request.request_id();
        let raw_path = request.path(&self.path_key).unwrap_or_default();
        let span = info_span!("dispatch", %request_id, path = raw_path);
        let _entered = span.enter();

        let route = self.resolver.resolve(raw_path);
        self.binder.bind(session, &route, request);
        self.dispatch_route(&route)
    }

    /// Load, guard and invoke an already resolved route. No session binding.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub fn dispatch_route(&self, route: &Route) -> Result<DispatchOutcome, HandlerError> {
        match self.loader.load_route(route) {
            Ok((resource, ty)) => self.run(&resource, &ty, route),
            Err(err) => Ok(failed(err)),
        }
    }

    /// Load `resource` and invoke `method` on `type_name` directly, bypassing
    /// path resolution.
    ///
    /// `current` is the route being served. The resource extension is
    /// appended when missing. Non-empty `parameters` replace the route
    /// parameters; an empty slice forwards those of `current`.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub fn load_controller(
        &self,
        current: &Route,
        resource: &Path,
        type_name: &str,
        method: &str,
        parameters: &[String],
    ) -> Result<DispatchOutcome, HandlerError> {
        let layout = self.loader.layout();
        let resource = layout.with_extension(resource);
        let controller = layout.controller_name(type_name);
        let forwarded = parameters.is_empty();
        let parameters = if forwarded {
            current.parameters()
        } else {
            parameters
        };
        let route = Route::new(controller, method, parameters.iter().cloned());
        debug!(
            resource = %resource.display(),
            type_name,
            method,
            params = parameters.len(),
            forwarded,
            "Direct controller load"
        );
        match self.loader.load(&resource, type_name, method) {
            Ok(ty) => self.run(&resource, &ty, &route),
            Err(err) => Ok(failed(err)),
        }
    }

    fn run(
        &self,
        resource: &Path,
        ty: &ControllerType,
        route: &Route,
    ) -> Result<DispatchOutcome, HandlerError> {
        let method = match guard::check(ty, route.method(), route.parameters().len(), resource) {
            Ok(method) => method,
            Err(err) => return Ok(failed(err.into())),
        };

        let start = Instant::now();
        let return_value = invoke::invoke(self.container.as_ref(), ty, method, route)
            .inspect_err(|err| {
                warn!(
                    controller = ty.name(),
                    method = route.method(),
                    error = %err,
                    "Handler failed"
                );
            })?;
        info!(
            controller = ty.name(),
            method = route.method(),
            params = route.parameters().len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Request dispatched to controller"
        );
        Ok(DispatchOutcome::Dispatched { return_value })
    }
}

fn failed(err: DispatchError) -> DispatchOutcome {
    warn!(
        kind = err.kind(),
        status = err.status(),
        type_name = err.type_name(),
        error = %err,
        "Dispatch refused"
    );
    DispatchOutcome::Failed(err)
}
