use super::{RouteResolver, SubsystemEntry, SubsystemRegistry, DEFAULT_METHOD};
use crate::config::DispatchConfig;
use std::path::PathBuf;

fn resolver(prefixes: &[&str]) -> RouteResolver {
    RouteResolver::new(SubsystemRegistry::from_prefixes(prefixes.iter().copied()), "home")
        .expect("resolver")
}

#[test]
fn test_empty_path_uses_defaults() {
    let r = resolver(&[]);
    for raw in ["", "/", "?page=1"] {
        let route = r.resolve(raw);
        assert_eq!(route.controller(), "Home", "path {raw:?}");
        assert_eq!(route.controller_seo(), "home");
        assert_eq!(route.method(), DEFAULT_METHOD);
        assert!(route.parameters().is_empty());
        assert_eq!(route.subsystem(), "");
    }
}

#[test]
fn test_underscore_segments() {
    let route = resolver(&[]).resolve("a_b/c_d/1/2");
    assert_eq!(route.controller(), "AB");
    assert_eq!(route.controller_seo(), "a_b");
    assert_eq!(route.method(), "cD");
    assert_eq!(route.parameters(), ["1", "2"]);
}

#[test]
fn test_controller_only() {
    let route = resolver(&[]).resolve("blog/");
    assert_eq!(route.controller(), "Blog");
    assert_eq!(route.method(), "index");
}

#[test]
fn test_empty_method_segment_defaults_to_index() {
    let route = resolver(&[]).resolve("blog//");
    assert_eq!(route.method(), "index");
    assert!(route.parameters().is_empty());
}

#[test]
fn test_parameters_keep_order_and_empties() {
    let route = resolver(&[]).resolve("blog/archive/2024//03/");
    assert_eq!(route.parameters(), ["2024", "", "03"]);
}

#[test]
fn test_seo_name_is_lowercase_unconverted() {
    let route = resolver(&[]).resolve("User_Manager/Get_User");
    assert_eq!(route.controller_seo(), "user_manager");
    assert_eq!(route.controller(), "UserManager");
    assert_eq!(route.method(), "getUser");
}

#[test]
fn test_longest_subsystem_match() {
    let r = resolver(&["admin", "admin/reports"]);
    let route = r.resolve("admin/reports/x");
    assert_eq!(route.subsystem(), "admin/reports/");
    assert_eq!(route.subsystem_name(), "admin/reports");
    assert_eq!(route.controller(), "X");
    assert_eq!(route.controller_class(), "admin/reports/X");
    assert_eq!(route.namespace_root(), Some(&PathBuf::from("admin/reports")));
}

#[test]
fn test_subsystem_root_uses_default_controller() {
    let route = resolver(&["admin"]).resolve("admin");
    assert_eq!(route.subsystem(), "admin/");
    assert_eq!(route.controller(), "Home");
    assert_eq!(route.method(), "index");
}

#[test]
fn test_subsystem_with_custom_root() {
    let registry = SubsystemRegistry::new([SubsystemEntry::with_root("shop", "modules/shop")]);
    let r = RouteResolver::new(registry, "home").expect("resolver");
    let route = r.resolve("shop/cart/add/5");
    assert_eq!(route.namespace_root(), Some(&PathBuf::from("modules/shop")));
    assert_eq!(route.controller(), "Cart");
    assert_eq!(route.parameters(), ["5"]);
}

#[test]
fn test_end_to_end_blog_route() {
    let route = resolver(&[]).resolve("blog/show/42");
    assert_eq!(route.subsystem(), "");
    assert_eq!(route.controller(), "Blog");
    assert_eq!(route.type_name("Controller"), "BlogController");
    assert_eq!(route.method(), "show");
    assert_eq!(route.parameters(), ["42"]);
}

#[test]
fn test_empty_default_controller_rejected() {
    assert!(RouteResolver::new(SubsystemRegistry::default(), "").is_err());
    assert!(RouteResolver::new(SubsystemRegistry::default(), "/").is_err());
    assert!(RouteResolver::new(SubsystemRegistry::default(), "...").is_err());
}

#[test]
fn test_unconvertible_controller_segment_uses_default() {
    let r = resolver(&[]);
    for raw in [".../show", "%%/show", "\u{e9}/show"] {
        let route = r.resolve(raw);
        assert_eq!(route.controller(), "Home", "path {raw:?}");
        assert_eq!(route.controller_seo(), "home");
        assert_eq!(route.type_name("Controller"), "HomeController");
        assert_eq!(route.method(), "show");
    }
}

#[test]
fn test_repeated_leading_slashes() {
    let route = resolver(&["admin"]).resolve("//blog/show/7");
    assert_eq!(route.controller(), "Blog");
    assert_eq!(route.method(), "show");
    assert_eq!(route.parameters(), ["7"]);

    let route = resolver(&["admin"]).resolve("///admin/users");
    assert_eq!(route.subsystem(), "admin/");
    assert_eq!(route.controller(), "Users");
}

#[test]
fn test_from_config_reads_default_controller() {
    let mut config = DispatchConfig::default();
    config.route.default_controller = "welcome_page".to_string();
    let r = RouteResolver::from_config(&config, SubsystemRegistry::default()).expect("resolver");
    let route = r.resolve("");
    assert_eq!(route.controller(), "WelcomePage");
    assert_eq!(route.controller_seo(), "welcome_page");
}

#[test]
fn test_route_serializes() {
    let route = resolver(&[]).resolve("blog/show/42");
    let json = serde_json::to_value(&route).expect("json");
    assert_eq!(json["controller"], "Blog");
    assert_eq!(json["parameters"][0], "42");
}
