use storage::{KeyValueStore, StorageError};

/// Fixed key the route guard reads the session token from.
pub const TOKEN_KEY: &str = "token";

/// Session token persistence over an injected key-value store.
///
/// Auth logic itself lives behind `MapApi::login`/`signup`; this only covers
/// the storage boundary the route-guarding shell depends on.
#[derive(Debug)]
pub struct TokenStore<S> {
    store: S,
}

impl<S: KeyValueStore> TokenStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save(&mut self, token: &str) -> Result<(), StorageError> {
        self.store.put(TOKEN_KEY, token)
    }

    pub fn load(&self) -> Result<Option<String>, StorageError> {
        self.store.get(TOKEN_KEY)
    }

    pub fn clear(&mut self) -> Result<bool, StorageError> {
        self.store.remove(TOKEN_KEY)
    }

    /// Presence check, mirroring the route guard.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.store.get(TOKEN_KEY), Ok(Some(_)))
    }
}
