//! # Configuration Module
//!
//! [`DispatchConfig`] is the file-backed description of one application:
//! where controllers live, how they are named, which subsystems exist and
//! which request keys the dispatcher treats as control keys.
//!
//! ```yaml
//! route:
//!   default_controller: home
//! controllers:
//!   root: app/controllers
//!   suffix: Controller
//!   extension: rs
//! request:
//!   path_key: url
//! session:
//!   control_keys: [url, getState]
//! subsystems:
//!   - prefix: admin
//!   - prefix: admin/reports
//!     root: admin/reports
//! ```
//!
//! YAML (`.yaml`/`.yml`), TOML (`.toml`) and JSON (`.json`) are accepted; the
//! format is picked from the file extension. Every section is optional.
//!
//! Components that only need a handful of values read them through the
//! [`ConfigSource`] trait with dotted keys (`route.default_controller`), so a
//! host application can supply its own configuration system instead.

use crate::error::ConfigError;
use crate::loader::ResourceLayout;
use crate::router::{SubsystemEntry, SubsystemRegistry};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key/value configuration collaborator.
pub trait ConfigSource {
    /// Value for a dotted key such as `route.default_controller`.
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// `route` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteSection {
    /// SEO name of the controller used when the path names none
    pub default_controller: String,
}

impl Default for RouteSection {
    fn default() -> Self {
        Self {
            default_controller: "home".to_string(),
        }
    }
}

/// `controllers` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerSection {
    /// Controller root directory
    pub root: PathBuf,
    /// Suffix of controller types and resource files
    pub suffix: String,
    /// Resource file extension
    pub extension: String,
}

impl Default for ControllerSection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("app/controllers"),
            suffix: "Controller".to_string(),
            extension: "rs".to_string(),
        }
    }
}

/// `request` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestSection {
    /// Query key carrying the virtual path
    pub path_key: String,
}

impl Default for RequestSection {
    fn default() -> Self {
        Self {
            path_key: "url".to_string(),
        }
    }
}

/// `session` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSection {
    /// Request keys never written into a dispatch record
    pub control_keys: Vec<String>,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            control_keys: crate::session::DEFAULT_CONTROL_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

/// Complete dispatcher configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    /// Route defaults
    pub route: RouteSection,
    /// Controller naming and location
    pub controllers: ControllerSection,
    /// Request keys
    pub request: RequestSection,
    /// Session binding
    pub session: SessionSection,
    /// Registered subsystems
    pub subsystems: Vec<SubsystemEntry>,
}

impl DispatchConfig {
    /// Read, parse and validate a configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] when the file cannot be read,
    /// [`ConfigError::Parse`] when it does not match the schema and
    /// [`ConfigError::Invalid`] when it fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };
        let config: DispatchConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?
            }
            _ => serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        };
        config.validate()?;
        debug!(
            path = %path.display(),
            default_controller = %config.route.default_controller,
            subsystems = config.subsystems.len(),
            "Dispatch configuration loaded"
        );
        Ok(config)
    }

    /// Check the rules the dispatcher relies on.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        if self.route.default_controller.trim_matches('/').is_empty() {
            return invalid("route.default_controller must not be empty");
        }
        if self.controllers.suffix.is_empty() {
            return invalid("controllers.suffix must not be empty");
        }
        if self.controllers.extension.trim_start_matches('.').is_empty() {
            return invalid("controllers.extension must not be empty");
        }
        if self.request.path_key.is_empty() {
            return invalid("request.path_key must not be empty");
        }
        let mut seen = HashSet::new();
        for entry in &self.subsystems {
            let prefix = entry.prefix.trim_matches('/').to_lowercase();
            if prefix.is_empty() {
                return invalid("subsystem prefix must not be empty");
            }
            if !seen.insert(prefix) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate subsystem prefix '{}'",
                    entry.prefix
                )));
            }
        }
        Ok(())
    }

    /// Subsystem registry built from the `subsystems` list.
    #[must_use]
    pub fn registry(&self) -> SubsystemRegistry {
        SubsystemRegistry::new(self.subsystems.iter().cloned())
    }

    /// Resource naming convention from the `controllers` section.
    #[must_use]
    pub fn layout(&self) -> ResourceLayout {
        ResourceLayout::new(
            self.controllers.root.clone(),
            &self.controllers.suffix,
            &self.controllers.extension,
        )
    }
}

impl ConfigSource for DispatchConfig {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            "route.default_controller" => Some(self.route.default_controller.clone()),
            "controllers.root" => Some(self.controllers.root.display().to_string()),
            "controllers.suffix" => Some(self.controllers.suffix.clone()),
            "controllers.extension" => Some(self.controllers.extension.clone()),
            "request.path_key" => Some(self.request.path_key.clone()),
            "session.control_keys" => Some(self.session.control_keys.join(",")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.route.default_controller, "home");
        assert_eq!(config.controllers.root, PathBuf::from("app/controllers"));
        assert_eq!(config.controllers.suffix, "Controller");
        assert_eq!(config.request.path_key, "url");
        assert_eq!(config.session.control_keys, ["url", "getState"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: DispatchConfig = serde_yaml::from_str(
            "route:\n  default_controller: start\nsubsystems:\n  - prefix: admin\n",
        )
        .expect("yaml");
        assert_eq!(config.route.default_controller, "start");
        assert_eq!(config.controllers.extension, "rs");
        assert_eq!(config.subsystems.len(), 1);
        assert!(config.subsystems[0].root.is_none());
    }

    #[test]
    fn test_validation_rules() {
        let mut config = DispatchConfig::default();
        config.route.default_controller = "/".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = DispatchConfig::default();
        config.controllers.suffix.clear();
        assert!(config.validate().is_err());

        let mut config = DispatchConfig::default();
        config.subsystems = vec![SubsystemEntry::new("admin"), SubsystemEntry::new("Admin/")];
        let err = config.validate().expect_err("duplicate");
        assert!(err.to_string().contains("duplicate subsystem prefix"));

        let mut config = DispatchConfig::default();
        config.subsystems = vec![SubsystemEntry::new("")];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_source_keys() {
        let config = DispatchConfig::default();
        assert_eq!(config.get("route.default_controller").as_deref(), Some("home"));
        assert_eq!(config.get("controllers.suffix").as_deref(), Some("Controller"));
        assert_eq!(config.get("session.control_keys").as_deref(), Some("url,getState"));
        assert_eq!(config.get("nope"), None);

        let mut map = HashMap::new();
        map.insert("route.default_controller".to_string(), "start".to_string());
        assert_eq!(ConfigSource::get(&map, "route.default_controller").as_deref(), Some("start"));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let parsed = serde_yaml::from_str::<DispatchConfig>("route:\n  default: x\n");
        assert!(parsed.is_err());
    }
}
