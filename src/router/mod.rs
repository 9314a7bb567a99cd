//! # Router Module
//!
//! The router module turns a raw virtual path into a [`Route`]: which
//! subsystem, controller, method and parameters a request addresses.
//!
//! ## Overview
//!
//! Resolution runs in three steps:
//!
//! 1. **Subsystem** - the leading segments are matched against the
//!    [`SubsystemRegistry`]; the longest registered prefix wins and is stripped.
//! 2. **Segments** - the remainder is normalized (leading `/`s and one trailing
//!    `/` removed) and split on `/`.
//! 3. **Defaults** - segment 0 names the controller (default controller when
//!    absent), segment 1 the method (`index` when absent), the rest are
//!    parameters in path order.
//!
//! Segment names are written SEO style (`user_manager/get_user`) and converted
//! to identifiers (`UserManager`, `getUser`) by [`naming`].
//!
//! ## Example
//!
//! ```rust
//! use seoroute::router::{RouteResolver, SubsystemRegistry};
//!
//! let resolver = RouteResolver::new(SubsystemRegistry::from_prefixes(["admin"]), "home").unwrap();
//!
//! let route = resolver.resolve("user_manager/get_user/7");
//! assert_eq!(route.controller(), "UserManager");
//! assert_eq!(route.method(), "getUser");
//! assert_eq!(route.parameters(), ["7"]);
//!
//! let route = resolver.resolve("admin/");
//! assert_eq!(route.subsystem(), "admin/");
//! assert_eq!(route.controller(), "Home");
//! assert_eq!(route.method(), "index");
//! ```

mod core;
pub mod naming;
pub mod path;
mod subsystem;
#[cfg(test)]
mod tests;

pub use core::{Route, RouteResolver, DEFAULT_CONTROLLER_KEY, DEFAULT_METHOD};
pub use path::{SegmentVec, MAX_INLINE_SEGMENTS};
pub use subsystem::{SubsystemEntry, SubsystemMatch, SubsystemRegistry};
