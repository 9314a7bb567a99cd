use super::store::SessionStore;
use crate::dispatcher::DispatchRequest;
use crate::router::Route;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::form_urlencoded;

/// Schema version written into every record.
pub const RECORD_VERSION: u32 = 1;

/// Keys excluded from persisted snapshots unless configured otherwise:
/// the key carrying the virtual path and the page-state key.
pub const DEFAULT_CONTROL_KEYS: [&str; 2] = ["url", "getState"];

/// Last dispatch of one controller, kept for back navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Schema version, see [`RECORD_VERSION`]
    pub version: u32,
    /// Lower-cased method identifier
    pub method: String,
    /// Parameters joined with `/`
    pub parameters: String,
    /// Query string without control keys (form-urlencoded)
    pub query: String,
    /// Body parameters without control keys (form-urlencoded)
    pub body: String,
}

impl DispatchRecord {
    /// Snapshot a route and its request, dropping `control_keys` from query and body.
    #[must_use]
    pub fn capture(route: &Route, request: &DispatchRequest, control_keys: &[String]) -> Self {
        Self {
            version: RECORD_VERSION,
            method: route.method().to_lowercase(),
            parameters: route.parameters().join("/"),
            query: encode_without(request.query(), control_keys),
            body: encode_without(request.body(), control_keys),
        }
    }

    /// Record stored for `controller_seo`, if any.
    ///
    /// Records that do not parse or carry another schema version read as absent.
    #[must_use]
    pub fn load(store: &dyn SessionStore, controller_seo: &str) -> Option<Self> {
        let raw = store.get(controller_seo)?;
        match serde_json::from_str::<DispatchRecord>(&raw) {
            Ok(record) if record.version == RECORD_VERSION => Some(record),
            Ok(record) => {
                warn!(
                    controller = controller_seo,
                    version = record.version,
                    expected = RECORD_VERSION,
                    "Ignoring dispatch record with unknown schema version"
                );
                None
            }
            Err(err) => {
                warn!(controller = controller_seo, error = %err, "Ignoring unreadable dispatch record");
                None
            }
        }
    }

    /// Rebuild `controller/method[/params][?query]` for this record.
    #[must_use]
    pub fn back_url(&self, controller_seo: &str) -> String {
        let mut url = format!("{controller_seo}/{}", self.method);
        if !self.parameters.is_empty() {
            url.push('/');
            url.push_str(&self.parameters);
        }
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&self.query);
        }
        url
    }
}

/// Session Binder: persists the resolved route under its controller SEO name.
#[derive(Debug, Clone)]
pub struct SessionBinder {
    control_keys: Vec<String>,
}

impl Default for SessionBinder {
    fn default() -> Self {
        Self::new(DEFAULT_CONTROL_KEYS.iter().map(|k| k.to_string()))
    }
}

impl SessionBinder {
    /// Binder excluding `control_keys` from snapshots.
    #[must_use]
    pub fn new(control_keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            control_keys: control_keys.into_iter().collect(),
        }
    }

    /// Keys excluded from snapshots.
    #[must_use]
    pub fn control_keys(&self) -> &[String] {
        &self.control_keys
    }

    /// Overwrite the record for the route's controller.
    pub fn bind(&self, store: &dyn SessionStore, route: &Route, request: &DispatchRequest) {
        let record = DispatchRecord::capture(route, request, &self.control_keys);
        match serde_json::to_string(&record) {
            Ok(serialized) => {
                store.set(route.controller_seo(), serialized);
                debug!(
                    controller = route.controller_seo(),
                    method = %record.method,
                    "Dispatch record bound to session"
                );
            }
            Err(err) => {
                warn!(controller = route.controller_seo(), error = %err, "Failed to serialize dispatch record");
            }
        }
    }
}

fn encode_without(pairs: &[(String, String)], control_keys: &[String]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(
            pairs
                .iter()
                .filter(|(k, _)| !control_keys.iter().any(|c| c == k)),
        )
        .finish()
}
