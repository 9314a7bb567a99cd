use crate::router::Route;
use anyhow::anyhow;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Controller instance as handed out by a [`Container`](crate::dispatcher::Container).
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Type-erased bound method: downcasts the instance and runs the body.
pub type MethodFn = Arc<dyn Fn(&(dyn Any + Send + Sync), &Call<'_>) -> anyhow::Result<Value> + Send + Sync>;

/// Type-erased constructor.
pub type FactoryFn = Arc<dyn Fn() -> anyhow::Result<Instance> + Send + Sync>;

/// Who may call a method. Only [`Visibility::Public`] methods are reachable from a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Dispatchable
    Public,
    /// Callable by the controller family, never from a URL
    Protected,
    /// Callable by the controller itself, never from a URL
    Private,
}

impl Visibility {
    /// Lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Visibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Declared method parameter.
///
/// Parameters with a default are optional, but only when no required
/// parameter follows them: positional binding cannot skip a slot, so a
/// default in front of a required parameter is never used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    default: Option<String>,
}

impl Param {
    /// Parameter that must be supplied by the path.
    #[must_use]
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            default: None,
        }
    }

    /// Parameter falling back to `default` when the path omits it.
    #[must_use]
    pub fn optional(name: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            default: Some(default.to_string()),
        }
    }

    /// Parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Default value, `None` for required parameters.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// `true` when the parameter has no default.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Arguments and route context for one method invocation.
#[derive(Debug)]
pub struct Call<'a> {
    route: &'a Route,
    args: Vec<String>,
    extra: Vec<String>,
}

impl<'a> Call<'a> {
    /// Build a call from already bound arguments.
    #[must_use]
    pub fn new(route: &'a Route, args: Vec<String>, extra: Vec<String>) -> Self {
        Self { route, args, extra }
    }

    /// Route being served.
    #[must_use]
    pub fn route(&self) -> &'a Route {
        self.route
    }

    /// Bound arguments, one per declared parameter (defaults filled in).
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Supplied values beyond the declared parameters.
    #[must_use]
    pub fn extra(&self) -> &[String] {
        &self.extra
    }

    /// Bound argument at `index`.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Parse the bound argument at `index`.
    ///
    /// # Errors
    ///
    /// Fails when the argument is absent or does not parse as `T`.
    pub fn parse<T>(&self, index: usize) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let raw = self
            .arg(index)
            .ok_or_else(|| anyhow!("missing argument {index} for {}", self.route.method()))?;
        Ok(raw.parse::<T>()?)
    }
}

/// One callable member of a controller type.
#[derive(Clone)]
pub struct MethodSpec {
    name: String,
    visibility: Visibility,
    params: Vec<Param>,
    body: MethodFn,
}

impl fmt::Debug for MethodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodSpec")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl MethodSpec {
    /// Method identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared visibility.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Declared parameters.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Number of leading parameters the path must supply: everything up to
    /// and including the last parameter without a default.
    #[must_use]
    pub fn required_count(&self) -> usize {
        self.params
            .iter()
            .rposition(Param::is_required)
            .map_or(0, |last| last + 1)
    }

    /// Split supplied values into bound arguments and extras.
    ///
    /// Positions the caller did not supply take the parameter's default.
    #[must_use]
    pub fn bind(&self, supplied: &[String]) -> (Vec<String>, Vec<String>) {
        let args = self
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| {
                supplied
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| p.default.clone().unwrap_or_default())
            })
            .collect();
        let extra = supplied.iter().skip(self.params.len()).cloned().collect();
        (args, extra)
    }

    /// Run the method body against an instance.
    ///
    /// # Errors
    ///
    /// Whatever the body returns, plus a failure when `instance` is not of the
    /// type the method was declared on.
    pub fn invoke(&self, instance: &(dyn Any + Send + Sync), call: &Call<'_>) -> anyhow::Result<Value> {
        (self.body)(instance, call)
    }
}

/// Descriptor of a controller type: how to build it and which methods it has.
///
/// This replaces name-based reflection: the loader registers descriptors in
/// the [`ControllerCatalog`](crate::loader::ControllerCatalog) and the guard
/// inspects them before anything is invoked.
#[derive(Clone)]
pub struct ControllerType {
    name: String,
    constructor: String,
    factory: FactoryFn,
    methods: HashMap<String, MethodSpec>,
}

impl fmt::Debug for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        methods.sort_unstable();
        f.debug_struct("ControllerType")
            .field("name", &self.name)
            .field("constructor", &self.constructor)
            .field("methods", &methods)
            .finish_non_exhaustive()
    }
}

impl ControllerType {
    /// Start describing controller `T`, registered under `name` and built by `factory`.
    pub fn builder<T, F>(name: &str, factory: F) -> ControllerTypeBuilder<T>
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        ControllerTypeBuilder {
            name: name.to_string(),
            constructor: DEFAULT_CONSTRUCTOR.to_string(),
            factory: Arc::new(move || -> anyhow::Result<Instance> { Ok(Arc::new(factory())) }),
            methods: HashMap::new(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Type identifier (`BlogController`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the constructor, never dispatchable.
    #[must_use]
    pub fn constructor_name(&self) -> &str {
        &self.constructor
    }

    /// Member with the given identifier.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodSpec> {
        self.methods.get(name)
    }

    /// All members.
    pub fn methods(&self) -> impl Iterator<Item = &MethodSpec> {
        self.methods.values()
    }

    /// Build a fresh instance.
    ///
    /// # Errors
    ///
    /// Propagates a failing factory.
    pub fn construct(&self) -> anyhow::Result<Instance> {
        (self.factory)()
    }
}

/// Constructor name used when the builder is not told otherwise.
pub const DEFAULT_CONSTRUCTOR: &str = "new";

/// Builder returned by [`ControllerType::builder`].
pub struct ControllerTypeBuilder<T> {
    name: String,
    constructor: String,
    factory: FactoryFn,
    methods: HashMap<String, MethodSpec>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> ControllerTypeBuilder<T> {
    /// Override the constructor name the guard refuses to dispatch to.
    #[must_use]
    pub fn constructor_name(mut self, name: &str) -> Self {
        self.constructor = name.to_string();
        self
    }

    /// Add a public, dispatchable method.
    #[must_use]
    pub fn action<R, F>(self, name: &str, params: &[Param], handler: F) -> Self
    where
        R: Serialize,
        F: Fn(&T, &Call<'_>) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        self.method(name, Visibility::Public, params, handler)
    }

    /// Add a method with explicit visibility.
    #[must_use]
    pub fn method<R, F>(mut self, name: &str, visibility: Visibility, params: &[Param], handler: F) -> Self
    where
        R: Serialize,
        F: Fn(&T, &Call<'_>) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        let type_name = self.name.clone();
        let body: MethodFn = Arc::new(
            move |instance: &(dyn Any + Send + Sync), call: &Call<'_>| -> anyhow::Result<Value> {
                let this = instance
                    .downcast_ref::<T>()
                    .ok_or_else(|| anyhow!("instance is not a {type_name}"))?;
                let value = handler(this, call)?;
                Ok(serde_json::to_value(value)?)
            },
        );
        self.methods.insert(
            name.to_string(),
            MethodSpec {
                name: name.to_string(),
                visibility,
                params: params.to_vec(),
                body,
            },
        );
        self
    }

    /// Finish the descriptor.
    #[must_use]
    pub fn build(self) -> ControllerType {
        ControllerType {
            name: self.name,
            constructor: self.constructor,
            factory: self.factory,
            methods: self.methods,
        }
    }
}
