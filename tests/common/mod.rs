#![allow(dead_code)]

pub mod blog_app {
    use seoroute::config::DispatchConfig;
    use seoroute::controller::{ControllerType, Param, Visibility};
    use seoroute::dispatcher::Dispatcher;
    use seoroute::loader::{ControllerCatalog, ModuleTable};
    use seoroute::router::SubsystemEntry;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    pub const ROOT: &str = "app/controllers";

    pub struct Blog;
    pub struct Home;
    pub struct Users;

    pub fn blog() -> ControllerType {
        ControllerType::builder("BlogController", || Blog)
            .action("index", &[Param::optional("page", "1")], |_: &Blog, call| {
                Ok(json!({ "page": call.parse::<u32>(0)? }))
            })
            .action("show", &[Param::required("id")], |_: &Blog, call| {
                Ok(json!({
                    "id": call.arg(0),
                    "controller": call.route().controller_class(),
                }))
            })
            .action(
                "foo",
                &[Param::required("a"), Param::required("b"), Param::optional("c", "dflt")],
                |_: &Blog, call| Ok(json!({ "args": call.args(), "extra": call.extra() })),
            )
            .action("_secret", &[], |_: &Blog, _| Ok("secret"))
            .action("new", &[], |_: &Blog, _| Ok("constructed"))
            .method("helper", Visibility::Protected, &[], |_: &Blog, _| Ok("helper"))
            .method("internal", Visibility::Private, &[], |_: &Blog, _| Ok("internal"))
            .action("fail", &[], |_: &Blog, _| -> anyhow::Result<()> {
                anyhow::bail!("database unavailable")
            })
            .build()
    }

    pub fn home() -> ControllerType {
        ControllerType::builder("HomeController", || Home)
            .action("index", &[], |_: &Home, _| Ok("welcome"))
            .build()
    }

    pub fn users() -> ControllerType {
        ControllerType::builder("UsersController", || Users)
            .action("list", &[Param::optional("page", "1")], |_: &Users, call| {
                Ok(json!({
                    "subsystem": call.route().subsystem(),
                    "page": call.arg(0),
                }))
            })
            .build()
    }

    /// Module table for the blog application; `loads` counts Blog module loads.
    pub fn modules(loads: Arc<AtomicUsize>) -> ModuleTable {
        ModuleTable::new(ROOT)
            .module("BlogController.rs", move |catalog: &ControllerCatalog| {
                loads.fetch_add(1, Ordering::SeqCst);
                catalog.register(blog());
                Ok(())
            })
            .controller("HomeController.rs", home())
            .controller("admin/UsersController.rs", users())
            .module("EmptyController.rs", |_: &ControllerCatalog| Ok(()))
            .module("BrokenController.rs", |_: &ControllerCatalog| {
                anyhow::bail!("unexpected token")
            })
    }

    pub fn config() -> DispatchConfig {
        let mut config = DispatchConfig::default();
        config.controllers.root = ROOT.into();
        config.subsystems = vec![SubsystemEntry::new("admin")];
        config
    }

    pub fn dispatcher() -> Dispatcher {
        dispatcher_counting(Arc::new(AtomicUsize::new(0)))
    }

    pub fn dispatcher_counting(loads: Arc<AtomicUsize>) -> Dispatcher {
        Dispatcher::from_config(&config(), Arc::new(modules(loads))).expect("dispatcher")
    }
}
