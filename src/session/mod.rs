//! Session gate: token-presence routing over the durable store.
//!
//! Login stores an opaque token under the `"token"` key, logout removes it,
//! and the gate middleware lets product requests through only while a token
//! is stored. The token itself is never validated, refreshed, or expired.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::kv::KvStore;

/// Storage key holding the session token.
pub const TOKEN_KEY: &str = "token";

/// Gate over the persisted session token.
#[derive(Clone)]
pub struct SessionGate {
    kv: KvStore,
}

impl SessionGate {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// The stored token, if any.
    pub async fn token(&self) -> Result<Option<String>, AppError> {
        self.kv.get(TOKEN_KEY).await
    }

    /// Presence alone decides this.
    pub async fn is_authenticated(&self) -> Result<bool, AppError> {
        Ok(self.token().await?.is_some())
    }

    /// Persist the token obtained from a successful login.
    pub async fn store_token(&self, token: &str) -> Result<(), AppError> {
        self.kv.set(TOKEN_KEY, token).await
    }

    /// Drop the session. Clearing an absent token succeeds.
    pub async fn clear_token(&self) -> Result<(), AppError> {
        self.kv.remove(TOKEN_KEY).await
    }
}

/// Middleware gating product routes on a stored session token.
pub async fn session_gate_layer(gate: SessionGate, request: Request, next: Next) -> Response {
    match gate.is_authenticated().await {
        Ok(true) => next.run(request).await,
        Ok(false) => AppError::Unauthorized("Not logged in".to_string()).into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::init_store;
    use tempfile::TempDir;

    async fn test_gate() -> (SessionGate, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_store(&temp_dir.path().join("kv.sqlite"))
            .await
            .expect("Failed to init store");
        (SessionGate::new(KvStore::new(pool)), temp_dir)
    }

    #[tokio::test]
    async fn test_fresh_store_is_unauthenticated() {
        let (gate, _dir) = test_gate().await;
        assert!(!gate.is_authenticated().await.unwrap());
        assert_eq!(gate.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_logout_cycle() {
        let (gate, _dir) = test_gate().await;

        gate.store_token("QpwL5tke4Pnpja7X4").await.unwrap();
        assert!(gate.is_authenticated().await.unwrap());
        assert_eq!(
            gate.token().await.unwrap(),
            Some("QpwL5tke4Pnpja7X4".to_string())
        );

        gate.clear_token().await.unwrap();
        assert!(!gate.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_without_token_succeeds() {
        let (gate, _dir) = test_gate().await;
        gate.clear_token().await.unwrap();
        assert!(!gate.is_authenticated().await.unwrap());
    }
}
