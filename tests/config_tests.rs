use seoroute::config::{ConfigSource, DispatchConfig};
use seoroute::error::ConfigError;
use std::path::PathBuf;

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write config");
    path
}

#[test]
fn test_load_yaml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(
        &dir,
        "dispatch.yaml",
        r#"
route:
  default_controller: welcome
controllers:
  root: src/controllers
  suffix: Ctl
  extension: .rs
session:
  control_keys: [url]
subsystems:
  - prefix: admin
  - prefix: admin/reports
    root: reporting
"#,
    );
    let config = DispatchConfig::load(&path).expect("load");
    assert_eq!(config.get("route.default_controller").as_deref(), Some("welcome"));
    assert_eq!(config.session.control_keys, ["url"]);
    assert_eq!(config.request.path_key, "url");

    let layout = config.layout();
    assert_eq!(layout.suffix(), "Ctl");
    assert_eq!(layout.extension(), "rs");

    let registry = config.registry();
    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.get("admin/reports").map(|e| e.namespace_root()),
        Some(PathBuf::from("reporting"))
    );
}

#[test]
fn test_load_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(
        &dir,
        "dispatch.toml",
        r#"
[route]
default_controller = "start"

[request]
path_key = "q"

[[subsystems]]
prefix = "shop"
root = "modules/shop"
"#,
    );
    let config = DispatchConfig::load(&path).expect("load");
    assert_eq!(config.route.default_controller, "start");
    assert_eq!(config.request.path_key, "q");
    assert_eq!(config.controllers.suffix, "Controller");
    assert_eq!(config.subsystems[0].root, Some(PathBuf::from("modules/shop")));
}

#[test]
fn test_missing_file_is_read_error() {
    let err = DispatchConfig::load("/definitely/not/here.yaml").expect_err("missing");
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(&dir, "dispatch.toml", "route = [");
    let err = DispatchConfig::load(&path).expect_err("malformed");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("dispatch.toml"));
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(
        &dir,
        "dispatch.yml",
        "route:\n  default_controller: ''\n",
    );
    let err = DispatchConfig::load(&path).expect_err("invalid");
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_custom_path_key_used_by_dispatcher() {
    use seoroute::dispatcher::{DispatchRequest, Dispatcher};
    use seoroute::loader::ModuleTable;
    use std::sync::Arc;

    struct Home;
    let mut config = DispatchConfig::default();
    config.request.path_key = "q".to_string();
    let table = ModuleTable::new("app/controllers").controller(
        "HomeController.rs",
        seoroute::controller::ControllerType::builder("HomeController", || Home)
            .action("about", &[], |_: &Home, _| Ok("about"))
            .build(),
    );
    let dispatcher = Dispatcher::from_config(&config, Arc::new(table)).expect("dispatcher");
    assert_eq!(dispatcher.path_key(), "q");

    let request = DispatchRequest::from_query_string("q=home/about&url=ignored");
    let route = dispatcher.resolve(&request);
    assert_eq!(route.method(), "about");
}
