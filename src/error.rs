//! Error types.
//!
//! The ledger core reports failures with the typed [`LedgerError`] so that callers can tell a
//! rejected input apart from a corrupt ledger or a failing storage backend. Everything above
//! the core (configuration, CLI commands) uses `anyhow` through the crate-wide [`Result`].

use crate::storage::StoreError;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The result type returned by the ledger core.
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Failures of the ledger core.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The submitted transaction was rejected. The message is meant to be shown to the user so
    /// that they can correct the input and submit again.
    #[error("Invalid transaction: {0}")]
    Validation(String),

    /// A transaction id could not be produced. Nothing was written.
    #[error("Unable to generate a transaction id: {0}")]
    Generation(String),

    /// The blob stored under `key` exists but does not match the ledger format. This is never
    /// reported for a key that has no blob at all; that is an empty ledger.
    #[error("The ledger stored at '{key}' is corrupt: {reason}")]
    CorruptLedger { key: String, reason: String },

    /// The key-value persistence layer failed.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// No user is signed in, so there is no ledger to operate on.
    #[error("No user is signed in. Run 'gofinances login' first.")]
    NoSession,
}

impl LedgerError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }

    pub(crate) fn corrupt(key: impl Into<String>, reason: impl ToString) -> Self {
        LedgerError::CorruptLedger {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}
