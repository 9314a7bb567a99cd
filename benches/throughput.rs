use criterion::{criterion_group, criterion_main, Criterion};
use seoroute::controller::{ControllerType, Param};
use seoroute::dispatcher::{DispatchRequest, Dispatcher};
use seoroute::loader::{HandlerLoader, ModuleTable, ResourceLayout};
use seoroute::router::{RouteResolver, SubsystemRegistry};
use seoroute::session::MemorySession;
use std::hint::black_box;
use std::sync::Arc;

const PATHS: [&str; 5] = [
    "blog/show/123",
    "admin/user_manager/get_user/7",
    "admin/reports/summary/by_month/2024/01",
    "shop/cart/",
    "a/b/1/2/3/4/5/6/7/8/9",
];

fn resolver() -> RouteResolver {
    let registry = SubsystemRegistry::from_prefixes(["admin", "admin/reports", "shop"]);
    RouteResolver::new(registry, "home").expect("resolver")
}

fn bench_resolve(c: &mut Criterion) {
    let resolver = resolver();
    c.bench_function("route_resolve", |b| {
        b.iter(|| {
            for path in PATHS.iter() {
                black_box(resolver.resolve(path));
            }
        })
    });
}

fn bench_dispatch(c: &mut Criterion) {
    struct Blog;
    let table = ModuleTable::new("app").controller(
        "BlogController.rs",
        ControllerType::builder("BlogController", || Blog)
            .action("show", &[Param::required("id")], |_: &Blog, call| call.parse::<u64>(0))
            .build(),
    );
    let loader = HandlerLoader::new(ResourceLayout::new("app", "Controller", "rs"), Arc::new(table));
    let dispatcher = Dispatcher::new(resolver(), loader);
    let session = MemorySession::new();
    let request = DispatchRequest::from_query_string("url=blog/show/123&sort=new");

    c.bench_function("dispatch_warm", |b| {
        b.iter(|| black_box(dispatcher.dispatch(&request, &session).expect("dispatch")))
    });
}

criterion_group!(benches, bench_resolve, bench_dispatch);
criterion_main!(benches);
