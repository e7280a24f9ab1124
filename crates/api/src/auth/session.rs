//! In-memory session store for opaque bearer tokens.
//!
//! Sessions are an injected service on [`crate::state::AppState`], not a
//! process-wide global. Tokens are 32 random bytes, hex-encoded; only a
//! SHA-256 hash of the token is kept server-side, so a leaked store dump
//! cannot be replayed. Entries expire after the configured TTL and are
//! evicted lazily on access.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use isotrack_core::types::DbId;

/// The authenticated principal attached to a live session.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: DbId,
    pub username: String,
    pub role: String,
}

struct Session {
    user: SessionUser,
    expires_at: DateTime<Utc>,
}

/// Token-to-session map with TTL eviction.
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Create a store whose sessions live for `ttl_mins` minutes.
    pub fn new(ttl_mins: i64) -> Self {
        Self {
            ttl: Duration::minutes(ttl_mins),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session for the given user and return the plaintext token.
    ///
    /// The plaintext is handed to the client exactly once; only its hash
    /// is retained.
    pub async fn issue(&self, user: SessionUser) -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        let token: String = bytes.iter().map(|b| format!("{b:02x}")).collect();

        let session = Session {
            user,
            expires_at: Utc::now() + self.ttl,
        };

        let mut sessions = self.sessions.write().await;
        // Opportunistic cleanup so abandoned sessions do not accumulate.
        let now = Utc::now();
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(hash_token(&token), session);

        token
    }

    /// Resolve a plaintext token to its user, if the session is live.
    ///
    /// An expired entry is removed on the spot and treated as absent.
    pub async fn authenticate(&self, token: &str) -> Option<SessionUser> {
        let key = hash_token(token);
        let mut sessions = self.sessions.write().await;
        match sessions.get(&key) {
            Some(session) if session.expires_at > Utc::now() => Some(session.user.clone()),
            Some(_) => {
                sessions.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Revoke a single session by its plaintext token.
    pub async fn revoke(&self, token: &str) {
        self.sessions.write().await.remove(&hash_token(token));
    }

    /// Revoke every session belonging to a user.
    pub async fn revoke_user(&self, user_id: DbId) {
        self.sessions
            .write()
            .await
            .retain(|_, s| s.user.user_id != user_id);
    }

    /// Number of live sessions (expired entries may still be counted
    /// until their next access).
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// SHA-256 hex digest of a token.
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
