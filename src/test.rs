//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::session::{Session, User};
use crate::summary::{Currency, Locale};
use crate::{Config, Ledger};
use tempfile::TempDir;

/// Test environment that sets up a gofinances home directory with a Config and file storage.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a pt-BR/BRL home directory with nobody signed in.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("gofinances");
        let config = Config::create(&root, Locale::PtBr, Currency::Brl)
            .await
            .unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Creates a home directory and signs in a user with the given id.
    pub async fn with_user(id: &str) -> Self {
        let env = Self::new().await;
        let user = User {
            id: id.to_string(),
            name: format!("User {id}"),
            email: format!("{id}@example.com"),
            photo: None,
        };
        env.session().sign_in(&user).await.unwrap();
        env
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// A ledger over the environment's storage directory.
    pub fn ledger(&self) -> Ledger {
        Ledger::new(self.config.key_value_store(), self.config.formatting())
    }

    pub fn session(&self) -> Session {
        Session::new(self.config.key_value_store())
    }
}
