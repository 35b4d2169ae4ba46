use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory bearer tokens issued against the shared access password.
/// Tokens are opaque and expire after a fixed TTL; restarting the server
/// invalidates them all.
pub struct TokenStore {
    tokens: RwLock<HashMap<String, DateTime<Utc>>>,
    ttl: Duration,
}

impl TokenStore {
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            tokens: RwLock::new(HashMap::new()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub async fn issue(&self) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = Utc::now() + self.ttl;
        self.tokens.write().await.insert(token.clone(), expires_at);
        token
    }

    pub async fn validate(&self, token: &str) -> bool {
        let now = Utc::now();
        let tokens = self.tokens.read().await;
        match tokens.get(token) {
            Some(expires_at) => *expires_at > now,
            None => false,
        }
    }

    /// Drops expired tokens; callers may run this opportunistically.
    pub async fn prune(&self) {
        let now = Utc::now();
        self.tokens.write().await.retain(|_, exp| *exp > now);
    }
}
