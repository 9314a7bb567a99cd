//! # Controller Module
//!
//! Controllers are plain Rust types. Instead of discovering their methods by
//! name at runtime, each controller is described once by a [`ControllerType`]:
//! its type identifier, constructor name, factory, and a table of
//! [`MethodSpec`]s (name, [`Visibility`], declared [`Param`]s, and the body).
//!
//! ```rust
//! use seoroute::controller::{ControllerType, Param};
//!
//! #[derive(Default)]
//! struct BlogController;
//!
//! let blog = ControllerType::builder("BlogController", BlogController::default)
//!     .action("show", &[Param::required("id")], |_: &BlogController, call| {
//!         Ok(format!("post {}", call.parse::<u32>(0)?))
//!     })
//!     .action("index", &[Param::optional("page", "1")], |_: &BlogController, call| {
//!         Ok(call.args().to_vec())
//!     })
//!     .build();
//!
//! assert_eq!(blog.method("show").unwrap().required_count(), 1);
//! ```
//!
//! Method bodies receive a [`Call`]: the bound arguments plus the [`Route`](crate::router::Route)
//! being served, so nested code never needs a global "current route".

mod core;

pub use core::{
    Call, ControllerType, ControllerTypeBuilder, FactoryFn, Instance, MethodFn, MethodSpec, Param,
    Visibility, DEFAULT_CONSTRUCTOR,
};
