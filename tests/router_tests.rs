use seoroute::router::naming::{camel, pascal};
use seoroute::router::{path, RouteResolver, SubsystemEntry, SubsystemRegistry};

fn resolver() -> RouteResolver {
    let registry = SubsystemRegistry::new([
        SubsystemEntry::new("admin"),
        SubsystemEntry::new("admin/reports"),
        SubsystemEntry::with_root("shop", "modules/shop"),
    ]);
    RouteResolver::new(registry, "home").expect("resolver")
}

#[test]
fn test_full_route() {
    let route = resolver().resolve("user_manager/get_user/7/edit");
    assert_eq!(route.subsystem(), "");
    assert_eq!(route.controller(), "UserManager");
    assert_eq!(route.controller_seo(), "user_manager");
    assert_eq!(route.method(), "getUser");
    assert_eq!(route.parameters(), ["7", "edit"]);
    assert_eq!(route.type_name("Controller"), "UserManagerController");
}

#[test]
fn test_longest_subsystem_wins() {
    let r = resolver();
    let route = r.resolve("admin/reports/summary/show");
    assert_eq!(route.subsystem(), "admin/reports/");
    assert_eq!(route.subsystem_name(), "admin/reports");
    assert_eq!(route.controller_class(), "admin/reports/Summary");
    assert_eq!(route.method(), "show");

    let route = r.resolve("admin/users");
    assert_eq!(route.subsystem(), "admin/");
    assert_eq!(route.controller(), "Users");
    assert_eq!(route.method(), "index");
}

#[test]
fn test_subsystem_only_uses_default_controller() {
    let route = resolver().resolve("shop");
    assert_eq!(route.subsystem(), "shop/");
    assert_eq!(route.controller(), "Home");
    assert_eq!(
        route.namespace_root().map(|p| p.to_string_lossy().into_owned()),
        Some("modules/shop".to_string())
    );
}

#[test]
fn test_prefix_must_match_whole_segments() {
    let route = resolver().resolve("administrator/list");
    assert_eq!(route.subsystem(), "");
    assert_eq!(route.controller(), "Administrator");
    assert_eq!(route.method(), "list");
}

#[test]
fn test_trailing_slash_and_query_artifacts() {
    let r = resolver();
    assert_eq!(r.resolve("blog/show/").method(), "show");
    assert!(r.resolve("blog/show/").parameters().is_empty());
    assert_eq!(r.resolve("/blog/show/3?x=1").parameters(), ["3"]);
    // Only one trailing separator is removed; the second yields an empty parameter.
    assert_eq!(r.resolve("blog/show/3//").parameters(), ["3", ""]);
}

#[test]
fn test_parse_segments() {
    assert_eq!(path::parse("a/b/c/").as_slice(), ["a", "b", "c"]);
    assert_eq!(path::parse("/a").as_slice(), ["a"]);
    assert!(path::parse("").is_empty());
}

#[test]
fn test_case_conversion_vectors() {
    let cases = [
        ("user_manager", "UserManager", "userManager"),
        ("get_user", "GetUser", "getUser"),
        ("blog-post", "BlogPost", "blogPost"),
        ("a_b", "AB", "aB"),
        ("v2Report", "V2Report", "v2Report"),
        ("index", "Index", "index"),
    ];
    for (seo, p, c) in cases {
        assert_eq!(pascal(seo), p, "pascal({seo})");
        assert_eq!(camel(seo), c, "camel({seo})");
        assert_eq!(pascal(&pascal(seo)), p, "pascal idempotent for {seo}");
        assert_eq!(camel(&camel(seo)), c, "camel idempotent for {seo}");
    }
    assert_eq!(camel("_secret"), "_secret");
}
