//! Access/refresh token persistence.

use std::sync::Arc;

use crate::storage::KeyValueStore;

/// Fixed storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Fixed storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Token pair persistence under fixed keys.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    /// Create a store over the given storage backend.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Stored access token, when any.
    pub fn access_token(&self) -> Option<String> {
        self.storage.get(ACCESS_TOKEN_KEY)
    }

    /// Stored refresh token, when any.
    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(REFRESH_TOKEN_KEY)
    }

    /// Persist a fresh token pair.
    pub fn set_tokens(&self, access_token: &str, refresh_token: &str) {
        self.storage.set(ACCESS_TOKEN_KEY, access_token);
        self.storage.set(REFRESH_TOKEN_KEY, refresh_token);
    }

    /// Drop both tokens.
    pub fn clear(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
    }
}
