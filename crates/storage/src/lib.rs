use std::collections::BTreeMap;

pub mod file;

pub use file::FileStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Unavailable,
    Corrupt(String),
    Io(String),
    QuotaExceeded { requested: usize, max: usize },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "persistent storage unavailable"),
            StorageError::Corrupt(msg) => write!(f, "storage corrupt: {msg}"),
            StorageError::Io(msg) => write!(f, "storage error: {msg}"),
            StorageError::QuotaExceeded { requested, max } => {
                write!(f, "storage quota exceeded: requested={requested} max={max}")
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Injected key-value persistence boundary.
///
/// The tile cache and the auth token store both persist through this trait,
/// which keeps the engine testable without a real browser-local store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<bool, StorageError>;
}

/// In-memory store with an optional byte quota.
///
/// The quota models the bounded browser-local store the engine originally
/// wrote to: a `put` that would overflow fails, and callers decide whether
/// that failure is swallowed (tile cache) or surfaced (token store).
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: BTreeMap<String, String>,
    byte_quota: Option<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_byte_quota(max_bytes: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            byte_quota: Some(max_bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(max) = self.byte_quota {
            let replaced = self.entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let requested = self.used_bytes() - replaced + key.len() + value.len();
            if requested > max {
                return Err(StorageError::QuotaExceeded { requested, max });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.remove(key).is_some())
    }
}
