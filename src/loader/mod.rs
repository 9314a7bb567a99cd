//! # Loader Module
//!
//! The Handler Loader maps a [`Route`](crate::router::Route) to a controller
//! resource and a controller type:
//!
//! ```text
//! route "admin/user_manager/list"
//!   resource  <root>/admin/User_managerController.rs
//!   type      UserManagerController
//! ```
//!
//! The resource is checked with [`ModuleSource::exists`] (missing →
//! [`LoadError`](crate::error::LoadError)), loaded once per process with
//! [`ModuleSource::load`] (which defines types in the [`ControllerCatalog`]),
//! and finally the expected type is looked up (absent →
//! [`RouterError`](crate::error::RouterError) "type not found").
//!
//! [`ModuleTable`] is the stock [`ModuleSource`]: controllers are compiled in
//! and registered against the resource path the convention gives them.

mod catalog;
mod core;
mod source;

pub use catalog::ControllerCatalog;
pub use core::{HandlerLoader, ResourceLayout};
pub use source::{ModuleInit, ModuleSource, ModuleTable};
