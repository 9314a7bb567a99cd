//! # Runtime Configuration Module
//!
//! Environment variables that override the configuration file at startup,
//! so one build can serve differently laid out deployments.
//!
//! ## Environment Variables
//!
//! ### `SEOROUTE_DEFAULT_CONTROLLER`
//!
//! SEO name of the controller served when the path names none. Replaces
//! `route.default_controller`.
//!
//! ### `SEOROUTE_CONTROLLER_ROOT`
//!
//! Directory holding the controller resources. Replaces `controllers.root`.
//!
//! Empty values are ignored.
//!
//! ## Usage
//!
//! ```rust
//! use seoroute::config::DispatchConfig;
//! use seoroute::runtime_config::RuntimeOverrides;
//!
//! let mut config = DispatchConfig::default();
//! RuntimeOverrides::from_env().apply(&mut config);
//! ```

use crate::config::DispatchConfig;
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Environment variable replacing `route.default_controller`.
pub const DEFAULT_CONTROLLER_VAR: &str = "SEOROUTE_DEFAULT_CONTROLLER";

/// Environment variable replacing `controllers.root`.
pub const CONTROLLER_ROOT_VAR: &str = "SEOROUTE_CONTROLLER_ROOT";

/// Overrides read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeOverrides {
    /// Replacement default controller
    pub default_controller: Option<String>,
    /// Replacement controller root
    pub controller_root: Option<PathBuf>,
}

impl RuntimeOverrides {
    /// Load overrides from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load overrides through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            default_controller: non_empty(DEFAULT_CONTROLLER_VAR),
            controller_root: non_empty(CONTROLLER_ROOT_VAR).map(PathBuf::from),
        }
    }

    /// `true` when no override is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.default_controller.is_none() && self.controller_root.is_none()
    }

    /// Write the overrides into `config`.
    pub fn apply(&self, config: &mut DispatchConfig) {
        if let Some(controller) = &self.default_controller {
            info!(default_controller = %controller, "Default controller overridden from environment");
            config.route.default_controller.clone_from(controller);
        }
        if let Some(root) = &self.controller_root {
            info!(controller_root = %root.display(), "Controller root overridden from environment");
            config.controllers.root.clone_from(root);
        }
    }
}
