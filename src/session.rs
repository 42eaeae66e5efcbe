//! The signed-in user.
//!
//! Signing in with an identity provider happens elsewhere; what arrives here is the resulting
//! profile. It is kept in the key-value store so that the session survives restarts, and it is
//! what callers read to obtain the user id they pass to the [`Ledger`](crate::Ledger).

use crate::error::{LedgerError, LedgerResult};
use crate::storage::{KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// The key the signed-in user is stored under.
pub const USER_KEY: &str = "@gofinances:user";

/// The profile of a signed-in user as supplied by the identity provider.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Stable, opaque identifier. Ledgers are scoped by it.
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Persists and retrieves the signed-in user.
pub struct Session {
    kv: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Makes `user` the signed-in user, replacing whoever was signed in before.
    pub async fn sign_in(&self, user: &User) -> LedgerResult<()> {
        if user.id.trim().is_empty() {
            return Err(LedgerError::validation("user id must not be empty"));
        }
        let data = serde_json::to_string(user).map_err(|source| StoreError::Serde {
            key: USER_KEY.to_string(),
            source,
        })?;
        self.kv.set(USER_KEY, &data).await?;
        debug!("Signed in user '{}'", user.id);
        Ok(())
    }

    /// Returns the signed-in user, or `None` when nobody is signed in.
    pub async fn current_user(&self) -> LedgerResult<Option<User>> {
        let Some(data) = self.kv.get(USER_KEY).await? else {
            return Ok(None);
        };
        let user = serde_json::from_str(&data).map_err(|source| StoreError::Serde {
            key: USER_KEY.to_string(),
            source,
        })?;
        Ok(Some(user))
    }

    /// Like `current_user` but treats "nobody signed in" as `LedgerError::NoSession`.
    pub async fn require_user(&self) -> LedgerResult<User> {
        self.current_user().await?.ok_or(LedgerError::NoSession)
    }

    /// Forgets the signed-in user. Ledgers are left untouched.
    pub async fn sign_out(&self) -> LedgerResult<()> {
        self.kv.remove(USER_KEY).await?;
        debug!("Signed out");
        Ok(())
    }
}
