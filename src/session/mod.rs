//! # Session Module
//!
//! After a path is resolved, and before the controller is loaded, the Session
//! Binder writes a [`DispatchRecord`] under the controller's SEO name:
//!
//! ```text
//! session["blog"] = {"version":1,"method":"show","parameters":"42","query":"sort=new","body":""}
//! ```
//!
//! The record survives failed dispatches, so "back" navigation always points
//! at the last route the user asked for. Control keys (the virtual-path key and
//! the page-state key by default) never appear in the stored query or body.

mod record;
mod store;

pub use record::{DispatchRecord, SessionBinder, DEFAULT_CONTROL_KEYS, RECORD_VERSION};
pub use store::{MemorySession, SessionStore};
