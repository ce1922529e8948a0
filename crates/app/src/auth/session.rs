//! Session state.

use std::sync::{Arc, RwLock};

use jiff::Timestamp;
use kiosk::{
    claims::{Actor, Claims},
    ids::TenantId,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::KeyValueStore;

/// Fixed storage key for the persisted session snapshot.
pub const SESSION_KEY: &str = "session_v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    access_token: String,
    claims: Claims,
}

/// Access token and decoded claims, persisted across restarts.
///
/// The store itself never judges expiry; validity is checked against a
/// caller-supplied clock so guards stay pure.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    inner: RwLock<Option<StoredSession>>,
}

impl SessionStore {
    /// Load the persisted session, discarding an unreadable snapshot.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let inner = storage.get(SESSION_KEY).and_then(|raw| {
            match serde_json::from_str::<StoredSession>(&raw) {
                Ok(session) => Some(session),
                Err(error) => {
                    warn!("discarding unreadable session snapshot: {error}");
                    storage.remove(SESSION_KEY);

                    None
                }
            }
        });

        Self {
            storage,
            inner: RwLock::new(inner),
        }
    }

    /// Install a session and persist it.
    pub fn apply_login(&self, access_token: &str, claims: Claims) {
        let session = StoredSession {
            access_token: access_token.to_string(),
            claims,
        };

        if let Ok(raw) = serde_json::to_string(&session) {
            self.storage.set(SESSION_KEY, &raw);
        }

        if let Ok(mut inner) = self.inner.write() {
            *inner = Some(session);
        }
    }

    /// Drop the session and its persisted snapshot.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            *inner = None;
        }

        self.storage.remove(SESSION_KEY);
    }

    /// Current access token, when a session is installed.
    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .ok()?
            .as_ref()
            .map(|session| session.access_token.clone())
    }

    /// Decoded claims, when a session is installed.
    pub fn claims(&self) -> Option<Claims> {
        self.inner.read().ok()?.as_ref().map(|session| session.claims.clone())
    }

    /// Actor kind of the current session.
    pub fn actor(&self) -> Option<Actor> {
        self.inner.read().ok()?.as_ref().map(|session| session.claims.actor)
    }

    /// Tenant scope of the current session.
    pub fn tenant_id(&self) -> Option<TenantId> {
        self.inner.read().ok()?.as_ref().and_then(|session| session.claims.tenant_id)
    }

    /// Granted roles of the current session.
    pub fn roles(&self) -> Vec<String> {
        self.inner
            .read()
            .ok()
            .and_then(|inner| inner.as_ref().map(|session| session.claims.roles.clone()))
            .unwrap_or_default()
    }

    /// Whether a session is installed and unexpired at `now`.
    pub fn is_authenticated_at(&self, now: Timestamp) -> bool {
        self.claims().is_some_and(|claims| !claims.is_expired_at(now))
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::MemoryStore;

    use super::*;

    fn claims(actor: Actor, tenant: Option<i64>, exp: Option<i64>) -> Claims {
        Claims {
            actor,
            tenant_id: tenant.map(TenantId::new),
            user_id: None,
            client_id: None,
            roles: vec!["SALES".to_string()],
            exp,
        }
    }

    #[test]
    fn login_persists_and_reloads() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let store = SessionStore::new(Arc::clone(&storage));
        store.apply_login("token-a", claims(Actor::User, Some(4), Some(i64::MAX)));

        let reloaded = SessionStore::new(storage);

        assert_eq!(reloaded.token(), Some("token-a".to_string()));
        assert_eq!(reloaded.actor(), Some(Actor::User));
        assert_eq!(reloaded.tenant_id(), Some(TenantId::new(4)));
        assert_eq!(reloaded.roles(), vec!["SALES".to_string()]);
    }

    #[test]
    fn clear_removes_memory_and_snapshot() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let store = SessionStore::new(Arc::clone(&storage));
        store.apply_login("token-a", claims(Actor::Platform, None, Some(i64::MAX)));
        store.clear();

        assert_eq!(store.token(), None);
        assert_eq!(storage.get(SESSION_KEY), None);
    }

    #[test]
    fn unreadable_snapshot_is_discarded() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        storage.set(SESSION_KEY, "{{not json");

        let store = SessionStore::new(Arc::clone(&storage));

        assert_eq!(store.claims(), None);
        assert_eq!(storage.get(SESSION_KEY), None);
    }

    #[test]
    fn authentication_requires_an_unexpired_session() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = SessionStore::new(storage);
        let now = Timestamp::UNIX_EPOCH;

        assert!(!store.is_authenticated_at(now));

        store.apply_login("token-a", claims(Actor::Client, Some(1), Some(10)));

        assert!(store.is_authenticated_at(now));

        store.apply_login("token-b", claims(Actor::Client, Some(1), None));

        assert!(!store.is_authenticated_at(now));
    }
}
