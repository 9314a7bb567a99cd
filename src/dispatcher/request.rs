use crate::ids::RequestId;
use url::form_urlencoded;

/// Request data the dispatcher reads: ordered query and body parameters.
///
/// The virtual path travels as an ordinary query parameter under the
/// configured path key (`url` by default).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchRequest {
    query: Vec<(String, String)>,
    body: Vec<(String, String)>,
    request_id: Option<String>,
}

impl DispatchRequest {
    /// Request with no parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an encoded query string (`url=blog/show/42&sort=new`).
    ///
    /// A leading `?` is ignored.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            query: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
            body: Vec::new(),
            request_id: None,
        }
    }

    /// Correlate the dispatch with an id the host application already
    /// assigned (e.g. from an `X-Request-Id` header).
    #[must_use]
    pub fn with_request_id(mut self, id: &str) -> Self {
        self.request_id = Some(id.to_string());
        self
    }

    /// Set the virtual path under `key`, replacing any previous value.
    #[must_use]
    pub fn with_path(mut self, key: &str, path: &str) -> Self {
        self.query.retain(|(k, _)| k != key);
        self.query.insert(0, (key.to_string(), path.to_string()));
        self
    }

    /// Append a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a body parameter.
    #[must_use]
    pub fn with_body(mut self, key: &str, value: &str) -> Self {
        self.body.push((key.to_string(), value.to_string()));
        self
    }

    /// Virtual path stored under `key`; the last occurrence wins.
    #[must_use]
    pub fn path(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Query parameters in request order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Body parameters in request order.
    #[must_use]
    pub fn body(&self) -> &[(String, String)] {
        &self.body
    }

    /// Id the dispatch span is recorded under.
    ///
    /// The caller-supplied id when it parses as a ULID; otherwise a fresh id
    /// is minted on every call.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        RequestId::parse_or_new(self.request_id.as_deref())
    }
}
