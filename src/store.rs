//! The transaction store: reads and appends a user's ledger in key-value persistence.
//!
//! A ledger is kept as a single JSON blob per user:
//!
//! ```json
//! {
//!   "version": 1,
//!   "transactions": [
//!     {"id": "…", "name": "Salary", "amount": "1000.00", "type": "income",
//!      "category": "salary", "date": "2024-01-05T00:00:00"}
//!   ]
//! }
//! ```
//!
//! Earlier versions of the app wrote a bare array of records; that is still read and is upgraded
//! to the current layout on the next append.

use crate::error::{LedgerError, LedgerResult};
use crate::model::{Transaction, TransactionId};
use crate::storage::KeyValueStore;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, trace};

/// Namespace of every ledger key. The user id follows it verbatim.
pub const LEDGER_KEY_PREFIX: &str = "@gofinances:transactions_user:";

/// The version of the ledger blob this code writes.
pub const LEDGER_VERSION: u32 = 1;

/// The stored form of a ledger.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Ledger")]
pub struct LedgerBlob {
    /// Layout version, currently 1.
    pub version: u32,
    /// Transactions in the order they were recorded.
    pub transactions: Vec<Transaction>,
}

/// The layouts we can read.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLedger {
    Versioned { version: u32, transactions: serde_json::Value },
    Legacy(Vec<serde_json::Value>),
}

/// Returns the storage key of `user_id`'s ledger. Distinct user ids always map to distinct keys
/// because the prefix is fixed and the id is appended unchanged.
pub fn key_for(user_id: &str) -> String {
    format!("{LEDGER_KEY_PREFIX}{user_id}")
}

/// Reads and appends ledgers in a `KeyValueStore`.
///
/// `append` is a read-modify-write of the whole blob. To keep two overlapping appends for the
/// same user from losing one of the transactions, each key has its own async lock which is held
/// for the duration of the append.
pub struct TransactionStore {
    kv: Arc<dyn KeyValueStore>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TransactionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Loads the ledger of `user_id` in recording order. A user that never recorded anything has
    /// an empty ledger.
    ///
    /// # Errors
    /// - `LedgerError::CorruptLedger` if a blob exists but cannot be understood
    /// - `LedgerError::Storage` if the store fails
    pub async fn read_all(&self, user_id: &str) -> LedgerResult<Vec<Transaction>> {
        let key = key_for(user_id);
        self.read_key(&key).await
    }

    /// Appends `transaction` to the end of `user_id`'s ledger. Existing entries are written back
    /// unchanged.
    ///
    /// # Errors
    /// - `LedgerError::Generation` if the ledger already has a transaction with the same id
    /// - `LedgerError::CorruptLedger` if the current blob cannot be understood; nothing is written
    /// - `LedgerError::Storage` if the store fails
    pub async fn append(&self, user_id: &str, transaction: Transaction) -> LedgerResult<()> {
        let key = key_for(user_id);
        let lock = self.lock_for(&key).await;
        let _guard = lock.lock().await;

        let mut transactions = self.read_key(&key).await?;
        if transactions.iter().any(|t| t.id() == transaction.id()) {
            return Err(LedgerError::Generation(format!(
                "the id '{}' is already used in this ledger",
                transaction.id()
            )));
        }
        transactions.push(transaction);

        let blob = LedgerBlob {
            version: LEDGER_VERSION,
            transactions,
        };
        let data = serde_json::to_string(&blob).map_err(|source| {
            crate::storage::StoreError::Serde {
                key: key.clone(),
                source,
            }
        })?;
        self.kv.set(&key, &data).await?;
        debug!(
            "Appended to '{key}', the ledger now has {} transactions",
            blob.transactions.len()
        );
        Ok(())
    }

    async fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(key.to_string()).or_default().clone()
    }

    async fn read_key(&self, key: &str) -> LedgerResult<Vec<Transaction>> {
        let Some(data) = self.kv.get(key).await? else {
            trace!("Nothing stored at '{key}', the ledger is empty");
            return Ok(Vec::new());
        };
        decode(key, &data)
    }
}

/// Parses and checks a stored ledger blob.
fn decode(key: &str, data: &str) -> LedgerResult<Vec<Transaction>> {
    let stored: StoredLedger =
        serde_json::from_str(data).map_err(|e| LedgerError::corrupt(key, e))?;
    let transactions: Vec<Transaction> = match stored {
        StoredLedger::Versioned {
            version,
            transactions,
        } => {
            if version > LEDGER_VERSION {
                return Err(LedgerError::corrupt(
                    key,
                    format!(
                        "layout version {version} is newer than the supported version \
                         {LEDGER_VERSION}"
                    ),
                ));
            }
            serde_json::from_value(transactions).map_err(|e| LedgerError::corrupt(key, e))?
        }
        StoredLedger::Legacy(records) => {
            trace!("'{key}' holds a legacy ledger with {} records", records.len());
            serde_json::from_value(serde_json::Value::Array(records))
                .map_err(|e| LedgerError::corrupt(key, e))?
        }
    };

    let mut seen: HashSet<&TransactionId> = HashSet::with_capacity(transactions.len());
    for (ix, transaction) in transactions.iter().enumerate() {
        transaction
            .check()
            .map_err(|reason| LedgerError::corrupt(key, format!("record {ix}: {reason}")))?;
        if !seen.insert(transaction.id()) {
            return Err(LedgerError::corrupt(
                key,
                format!("record {ix}: duplicate id '{}'", transaction.id()),
            ));
        }
    }
    Ok(transactions)
}
