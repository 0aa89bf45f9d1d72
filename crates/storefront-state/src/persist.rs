//! # Auth Persistence
//!
//! Load-on-init and save-on-mutation hooks around [`AuthStore`].
//!
//! ## Hook Pair
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  startup                                                                │
//! │     │  AuthPersistence::restore()                                       │
//! │     │    read "<app>-auth" ──► parse ──► AuthStore::restored(user)      │
//! │     │    (missing / unreadable / malformed ──► Anonymous + warn!)       │
//! │     ▼                                                                   │
//! │  AuthPersistence::attach(&mut store)                                    │
//! │     subscribes a listener:                                              │
//! │       mutation ──► AuthSnapshot ──► changed? ──► write "<app>-auth"     │
//! │                                        │                                │
//! │                                        └── no (modal toggles) ──► skip  │
//! │                                                                         │
//! │  Only { user, isAuthenticated } is persisted; the modal flag never is. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Record Format
//! ```json
//! {"state":{"user":{"id":"1","email":"a@b.co","name":"a"},"isAuthenticated":true},"version":0}
//! ```
//! A bare `{"user":...,"isAuthenticated":...}` record is also accepted.

use serde::{Deserialize, Serialize};
use storefront_core::User;
use tracing::{debug, info, warn};

use crate::auth::{AuthState, AuthStore};
use crate::error::StateResult;
use crate::listeners::SubscriptionId;
use crate::storage::SnapshotStorage;

/// Version written into the record envelope. Never checked on read.
const SNAPSHOT_VERSION: u32 = 0;

/// The persisted subset of auth state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl AuthSnapshot {
    /// Resolves the restored user. User presence decides the session; a
    /// disagreeing `isAuthenticated` flag is logged and ignored.
    pub fn into_user(self) -> Option<User> {
        if self.user.is_some() != self.is_authenticated {
            warn!(
                has_user = self.user.is_some(),
                is_authenticated = self.is_authenticated,
                "auth snapshot flags disagree; using user presence"
            );
        }
        self.user
    }
}

impl From<&AuthState> for AuthSnapshot {
    fn from(state: &AuthState) -> Self {
        AuthSnapshot {
            user: state.user().cloned(),
            is_authenticated: state.is_authenticated(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    state: AuthSnapshot,
    #[serde(default)]
    version: u32,
}

/// Record written without the envelope. Stricter than [`AuthSnapshot`] so
/// that an arbitrary object is not mistaken for an anonymous session.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct BareRecord {
    #[serde(default)]
    user: Option<User>,
    is_authenticated: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Envelope(Envelope),
    Bare(BareRecord),
}

/// Parses a stored record in either accepted layout.
pub fn decode_snapshot(raw: &str) -> StateResult<AuthSnapshot> {
    let record: StoredRecord = serde_json::from_str(raw)?;
    Ok(match record {
        StoredRecord::Envelope(envelope) => envelope.state,
        StoredRecord::Bare(bare) => AuthSnapshot {
            user: bare.user,
            is_authenticated: bare.is_authenticated,
        },
    })
}

/// Serializes a snapshot in the envelope layout.
pub fn encode_snapshot(snapshot: &AuthSnapshot) -> StateResult<String> {
    let envelope = Envelope {
        state: snapshot.clone(),
        version: SNAPSHOT_VERSION,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Binds an [`AuthStore`] to a storage key.
#[derive(Debug, Clone)]
pub struct AuthPersistence<S> {
    storage: S,
    key: String,
}

impl<S> AuthPersistence<S>
where
    S: SnapshotStorage + Clone + 'static,
{
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        AuthPersistence {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the stored snapshot, surfacing every failure.
    pub fn load(&self) -> StateResult<Option<AuthSnapshot>> {
        match self.storage.read(&self.key)? {
            Some(raw) => Ok(Some(decode_snapshot(&raw)?)),
            None => Ok(None),
        }
    }

    /// Writes `snapshot` under the key.
    pub fn save(&self, snapshot: &AuthSnapshot) -> StateResult<()> {
        let raw = encode_snapshot(snapshot)?;
        self.storage.write(&self.key, &raw)
    }

    /// Deletes the stored snapshot.
    pub fn clear(&self) -> StateResult<()> {
        self.storage.remove(&self.key)
    }

    /// Builds the store from the stored snapshot, falling back to an
    /// anonymous store on any failure.
    pub fn restore(&self) -> AuthStore {
        match self.load() {
            Ok(Some(snapshot)) => {
                let user = snapshot.into_user();
                match &user {
                    Some(u) => info!(key = %self.key, user_id = %u.id, "session restored"),
                    None => debug!(key = %self.key, "stored session is anonymous"),
                }
                AuthStore::restored(user)
            }
            Ok(None) => {
                debug!(key = %self.key, "no stored session");
                AuthStore::new()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to restore session; starting anonymous");
                AuthStore::new()
            }
        }
    }

    /// Subscribes a listener that saves the snapshot whenever the persisted
    /// subset changes. Save failures are logged and retried on the next
    /// mutation.
    pub fn attach(&self, store: &mut AuthStore) -> SubscriptionId {
        let persistence = self.clone();
        let mut last_saved = AuthSnapshot::from(store.state());

        store.subscribe(move |state| {
            let snapshot = AuthSnapshot::from(state);
            if snapshot == last_saved {
                return;
            }

            match persistence.save(&snapshot) {
                Ok(()) => {
                    debug!(
                        key = %persistence.key,
                        is_authenticated = snapshot.is_authenticated,
                        "session saved"
                    );
                    last_saved = snapshot;
                }
                Err(e) => {
                    warn!(key = %persistence.key, error = %e, "failed to save session");
                }
            }
        })
    }
}
