use dashmap::DashMap;

/// Session store collaborator: string keys to string values, scoped to one session.
///
/// Distinct sessions use distinct stores; concurrent requests on the same
/// session simply overwrite each other (last write wins).
pub trait SessionStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String);

    /// Value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;
}

/// In-process [`SessionStore`].
#[derive(Debug, Default)]
pub struct MemorySession {
    values: DashMap<String, String>,
}

impl MemorySession {
    /// Empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionStore for MemorySession {
    fn set(&self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| v.value().clone())
    }
}
