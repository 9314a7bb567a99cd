//! # seoroute
//!
//! **seoroute** maps SEO-style virtual paths onto controller methods:
//!
//! ```text
//! admin/user_manager/get_user/7
//! └─┬─┘ └────┬─────┘ └──┬───┘ │
//!  subsystem controller  method params
//!            UserManager getUser ["7"]
//! ```
//!
//! ## Overview
//!
//! A request carries its virtual path in a query parameter (`url` by
//! default). The [`Dispatcher`] resolves it to a [`Route`], records the route
//! in the session for back navigation, loads the controller resource once per
//! process, checks that the method may be called from a URL and finally
//! invokes it with the path parameters.
//!
//! ## Architecture
//!
//! - **[`router`]** - path parsing, SEO name conversion, subsystem matching, [`Route`]
//! - **[`controller`]** - controller type descriptors and method tables
//! - **[`loader`]** - resource naming convention and load-once module loading
//! - **[`dispatcher`]** - invocation guard, invoker and the [`Dispatcher`] engine
//! - **[`session`]** - dispatch records kept per controller in the session
//! - **[`config`]** / **[`runtime_config`]** - configuration file and environment overrides
//! - **[`error`]** - the [`LoadError`] / [`RouterError`] taxonomy
//! - **[`logging`]** - `tracing` subscriber setup for binaries
//! - **[`cli`]** - the `seoroute` inspection binary
//!
//! ## Request Flow
//!
//! ```text
//! DispatchRequest ──► RouteResolver ──► SessionBinder ──► HandlerLoader
//!                                                             │
//!            DispatchOutcome ◄── Invoker ◄── Invocation Guard ◄┘
//! ```
//!
//! Stage failures come back as [`DispatchOutcome::Failed`] with a suggested
//! status (404 for missing resources, types and methods, 403 for denied
//! methods, 400 for missing parameters). Errors raised by the controller method
//! itself come back as `Err(HandlerError)`.
//!
//! ## Concurrency
//!
//! One [`Dispatcher`] is built at startup and shared by reference (or `Arc`)
//! across threads. Each dispatch owns its [`Route`]; the only shared mutable
//! state is the set of loaded resources, guarded so that every resource is
//! loaded at most once.

pub mod cli;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod ids;
pub mod loader;
pub mod logging;
pub mod router;
pub mod runtime_config;
pub mod session;

pub use config::{ConfigSource, DispatchConfig};
pub use controller::{Call, ControllerType, Param, Visibility};
pub use dispatcher::{DispatchOutcome, DispatchRequest, Dispatcher};
pub use error::{DispatchError, HandlerError, LoadError, RouterError, RouterErrorKind};
pub use loader::{HandlerLoader, ModuleSource, ModuleTable};
pub use router::{Route, RouteResolver};
pub use session::{MemorySession, SessionStore};
