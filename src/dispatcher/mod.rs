//! # Dispatcher Module
//!
//! The dispatcher ties the stages of one request together:
//!
//! 1. **Resolve** - the virtual path (query key `url` by default) becomes a
//!    [`Route`](crate::router::Route).
//! 2. **Bind** - the route is recorded in the session under the controller's
//!    SEO name ([`SessionBinder`](crate::session::SessionBinder)).
//! 3. **Load** - the controller resource is loaded once and the expected type
//!    looked up ([`HandlerLoader`](crate::loader::HandlerLoader)).
//! 4. **Guard** - constructor, internal marker, membership, visibility and
//!    arity are checked ([`guard::check`]).
//! 5. **Invoke** - an instance is obtained from the [`Container`] and the
//!    method runs with the bound parameters.
//!
//! ## Outcomes
//!
//! [`Dispatcher::dispatch`] returns `Ok(DispatchOutcome::Dispatched { .. })`
//! with the method's serialized return value, or
//! `Ok(DispatchOutcome::Failed(..))` when a stage refused the request
//! ([`LoadError`](crate::error::LoadError) or
//! [`RouterError`](crate::error::RouterError)). Failures raised inside the
//! method itself are returned as `Err(HandlerError)` untouched.
//!
//! ## Example
//!
//! ```rust
//! use seoroute::controller::{ControllerType, Param};
//! use seoroute::dispatcher::{DispatchRequest, Dispatcher};
//! use seoroute::loader::{HandlerLoader, ModuleTable, ResourceLayout};
//! use seoroute::router::{RouteResolver, SubsystemRegistry};
//! use seoroute::session::MemorySession;
//! use std::sync::Arc;
//!
//! struct Blog;
//!
//! let modules = ModuleTable::new("app/controllers").controller(
//!     "BlogController.rs",
//!     ControllerType::builder("BlogController", || Blog)
//!         .action("show", &[Param::required("id")], |_: &Blog, call| {
//!             Ok(format!("post {}", call.arg(0).unwrap_or_default()))
//!         })
//!         .build(),
//! );
//! let loader = HandlerLoader::new(
//!     ResourceLayout::new("app/controllers", "Controller", "rs"),
//!     Arc::new(modules),
//! );
//! let resolver = RouteResolver::new(SubsystemRegistry::default(), "home").unwrap();
//! let dispatcher = Dispatcher::new(resolver, loader);
//!
//! let session = MemorySession::new();
//! let request = DispatchRequest::from_query_string("url=blog/show/42");
//! let outcome = dispatcher.dispatch(&request, &session).unwrap();
//! assert_eq!(outcome.return_value().unwrap(), "post 42");
//! ```

mod core;
pub mod guard;
mod invoke;
mod request;

pub use core::{DispatchOutcome, Dispatcher};
pub use invoke::{invoke, Container, SingletonContainer};
pub use request::DispatchRequest;
