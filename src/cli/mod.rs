//! # CLI Module
//!
//! Command-line inspection of a configured application, available as the
//! `seoroute` binary.
//!
//! ## Commands
//!
//! ### `resolve`
//!
//! Print the [`Route`](crate::router::Route) a virtual path resolves to:
//!
//! ```bash
//! seoroute resolve --config dispatch.yaml admin/user_manager/list/2
//! ```
//!
//! ### `locate`
//!
//! Print the controller type, method and resource path a virtual path maps
//! to, and whether the resource exists on disk:
//!
//! ```bash
//! seoroute locate --config dispatch.yaml blog/show/42
//! ```
//!
//! `--config` may also come from `SEOROUTE_CONFIG`. Without it the built-in
//! defaults apply. `SEOROUTE_DEFAULT_CONTROLLER` and `SEOROUTE_CONTROLLER_ROOT`
//! override the file (see [`runtime_config`](crate::runtime_config)).

mod commands;


pub use commands::{load_config, locate, run_cli, run_command, Cli, Commands, Location};
