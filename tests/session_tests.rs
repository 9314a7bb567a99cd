mod common;

use common::blog_app;
use seoroute::dispatcher::DispatchRequest;
use seoroute::session::{DispatchRecord, MemorySession, SessionStore, RECORD_VERSION};

#[test]
fn test_each_controller_keeps_its_last_route() {
    let dispatcher = blog_app::dispatcher();
    let session = MemorySession::new();

    for path in ["blog/show/1", "home", "blog/foo/a/b?ignored=1"] {
        let request = DispatchRequest::new().with_path("url", path);
        dispatcher.dispatch(&request, &session).expect("dispatch");
    }

    let blog = DispatchRecord::load(&session, "blog").expect("blog record");
    assert_eq!(blog.version, RECORD_VERSION);
    assert_eq!(blog.method, "foo");
    assert_eq!(blog.parameters, "a/b");
    assert_eq!(blog.back_url("blog"), "blog/foo/a/b");

    let home = DispatchRecord::load(&session, "home").expect("home record");
    assert_eq!(home.method, "index");
    assert_eq!(session.len(), 2);
}

#[test]
fn test_record_for_missing_controller_is_still_written() {
    let dispatcher = blog_app::dispatcher();
    let session = MemorySession::new();
    let request = DispatchRequest::from_query_string("url=nope/get_thing/5&page=2")
        .with_body("name", "a b")
        .with_body("getState", "s");
    let outcome = dispatcher.dispatch(&request, &session).expect("dispatch");
    assert_eq!(outcome.error().map(|e| e.status()), Some(404));

    let record = DispatchRecord::load(&session, "nope").expect("record");
    assert_eq!(record.method, "getthing");
    assert_eq!(record.query, "page=2");
    assert_eq!(record.body, "name=a+b");
}

#[test]
fn test_record_is_json() {
    let dispatcher = blog_app::dispatcher();
    let session = MemorySession::new();
    let request = DispatchRequest::new().with_path("url", "blog/show/9");
    dispatcher.dispatch(&request, &session).expect("dispatch");

    let raw = session.get("blog").expect("stored");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(parsed["method"], "show");
    assert_eq!(parsed["parameters"], "9");
}
