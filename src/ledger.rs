//! The ledger facade: the two operations the presentation layer needs.

use crate::error::LedgerResult;
use crate::identity::{IdGenerator, RandomIdGenerator};
use crate::model::{OccurredAt, Transaction, TransactionInput};
use crate::storage::KeyValueStore;
use crate::store::TransactionStore;
use crate::summary::{summarize, Formatting, Summary};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Records transactions and produces summaries for a user's ledger.
///
/// The user is always passed in explicitly; the facade holds no notion of who is signed in.
pub struct Ledger {
    store: TransactionStore,
    ids: Box<dyn IdGenerator>,
    formatting: Formatting,
}

impl Ledger {
    /// Creates a ledger over `kv` that assigns random ids.
    pub fn new(kv: Arc<dyn KeyValueStore>, formatting: Formatting) -> Self {
        Self::with_id_generator(kv, formatting, Box::new(RandomIdGenerator))
    }

    pub fn with_id_generator(
        kv: Arc<dyn KeyValueStore>,
        formatting: Formatting,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            store: TransactionStore::new(kv),
            ids,
            formatting,
        }
    }

    pub fn formatting(&self) -> &Formatting {
        &self.formatting
    }

    /// The underlying store, for callers that need the raw ledger.
    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    /// Validates `input`, assigns an id, stamps the current time if `input` has no timestamp, and
    /// appends the transaction to `user_id`'s ledger. Returns the stored transaction.
    ///
    /// # Errors
    /// - `LedgerError::Validation` if the name is blank or the amount is not positive
    /// - `LedgerError::Generation` if no id could be assigned
    /// - `LedgerError::CorruptLedger` or `LedgerError::Storage` from the store
    ///
    /// On any error nothing is written.
    pub async fn record_transaction(
        &self,
        user_id: &str,
        input: TransactionInput,
    ) -> LedgerResult<Transaction> {
        if let Err(e) = input.validate() {
            warn!("Rejected transaction for '{user_id}': {e}");
            return Err(e);
        }
        let id = self.ids.generate()?;
        let transaction = Transaction::new(
            id,
            input.name.trim(),
            input.amount,
            input.kind,
            input.category,
            input.occurred_at.unwrap_or_else(OccurredAt::now),
        );
        self.store.append(user_id, transaction.clone()).await?;
        info!(
            "Recorded {} '{}' of {} for '{user_id}'",
            transaction.kind(),
            transaction.name(),
            transaction.amount()
        );
        Ok(transaction)
    }

    /// Loads `user_id`'s ledger and summarizes it.
    ///
    /// # Errors
    /// - `LedgerError::CorruptLedger` or `LedgerError::Storage` from the store
    pub async fn load_summary(&self, user_id: &str) -> LedgerResult<Summary> {
        let transactions = self.store.read_all(user_id).await?;
        let summary = summarize(&transactions, &self.formatting);
        debug!(
            "Summarized {} transactions for '{user_id}', net {}",
            summary.items.len(),
            summary.net.amount
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::model::{TransactionId, TransactionKind};
    use crate::storage::MemoryStore;
    use crate::store::key_for;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ledger() -> (Arc<MemoryStore>, Ledger) {
        let kv = Arc::new(MemoryStore::new());
        (kv.clone(), Ledger::new(kv, Formatting::default()))
    }

    fn input(kind: &str, amount: &str, date: &str) -> TransactionInput {
        TransactionInput::parse("Entry", amount, kind, "misc", Some(date)).unwrap()
    }

    /// Fails every time, as if the entropy source were gone.
    struct ExhaustedIds;

    impl IdGenerator for ExhaustedIds {
        fn generate(&self) -> LedgerResult<TransactionId> {
            Err(LedgerError::Generation("entropy source unavailable".to_string()))
        }
    }

    /// Hands out the same id every time.
    struct StuckIds(AtomicUsize);

    impl IdGenerator for StuckIds {
        fn generate(&self) -> LedgerResult<TransactionId> {
            self.0.fetch_add(1, Ordering::Relaxed);
            Ok(TransactionId::new("always-the-same"))
        }
    }

    #[tokio::test]
    async fn test_record_then_summarize() {
        let (_, ledger) = ledger();
        ledger
            .record_transaction("u", input("income", "1000.00", "2024-01-05"))
            .await
            .unwrap();
        ledger
            .record_transaction("u", input("outcome", "300.00", "2024-01-10"))
            .await
            .unwrap();
        ledger
            .record_transaction("u", input("income", "500.00", "2024-01-20"))
            .await
            .unwrap();

        let summary = ledger.load_summary("u").await.unwrap();
        assert_eq!(summary.income.formatted_amount, "R$ 1.500,00");
        assert_eq!(summary.outcome.formatted_amount, "R$ 300,00");
        assert_eq!(summary.net.formatted_amount, "R$ 1.200,00");
        assert_eq!(summary.items.len(), 3);
    }

    #[tokio::test]
    async fn test_recorded_ids_are_distinct() {
        let (_, ledger) = ledger();
        let mut ids = HashSet::new();
        for _ in 0..200 {
            let t = ledger
                .record_transaction("u", input("outcome", "1.99", "2024-01-01"))
                .await
                .unwrap();
            ids.insert(t.id().clone());
        }
        assert_eq!(ids.len(), 200);
        assert_eq!(ledger.store().read_all("u").await.unwrap().len(), 200);
    }

    #[tokio::test]
    async fn test_record_returns_what_was_stored() {
        let (_, ledger) = ledger();
        let mut raw = input("income", "42.10", "2024-05-01");
        raw.name = "  Freelance  ".to_string();
        let recorded = ledger.record_transaction("u", raw).await.unwrap();
        assert_eq!(recorded.name(), "Freelance");
        let stored = ledger.store().read_all("u").await.unwrap();
        assert_eq!(stored, vec![recorded]);
    }

    #[tokio::test]
    async fn test_missing_timestamp_is_stamped_now() {
        let (_, ledger) = ledger();
        let before = OccurredAt::now();
        let raw = TransactionInput::parse("Coffee", "7.50", "outcome", "food", None).unwrap();
        let recorded = ledger.record_transaction("u", raw).await.unwrap();
        let after = OccurredAt::now();
        assert!(before <= recorded.occurred_at());
        assert!(recorded.occurred_at() <= after);
    }

    #[tokio::test]
    async fn test_invalid_input_writes_nothing() {
        let (kv, ledger) = ledger();
        let result = ledger
            .record_transaction("u", input("income", "0", "2024-01-01"))
            .await;
        assert!(matches!(result, Err(LedgerError::Validation(_))));
        assert_eq!(kv.get(&key_for("u")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_generation_failure_writes_nothing() {
        let kv = Arc::new(MemoryStore::new());
        let ledger = Ledger::with_id_generator(
            kv.clone(),
            Formatting::default(),
            Box::new(ExhaustedIds),
        );
        let result = ledger
            .record_transaction("u", input("income", "10", "2024-01-01"))
            .await;
        assert!(matches!(result, Err(LedgerError::Generation(_))));
        assert_eq!(kv.get(&key_for("u")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_repeated_id_is_not_stored_twice() {
        let kv = Arc::new(MemoryStore::new());
        let ledger = Ledger::with_id_generator(
            kv,
            Formatting::default(),
            Box::new(StuckIds(AtomicUsize::new(0))),
        );
        ledger
            .record_transaction("u", input("income", "10", "2024-01-01"))
            .await
            .unwrap();
        let second = ledger
            .record_transaction("u", input("income", "20", "2024-01-02"))
            .await;
        assert!(matches!(second, Err(LedgerError::Generation(_))));
        assert_eq!(ledger.store().read_all("u").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_ledger_is_propagated() {
        let (kv, ledger) = ledger();
        kv.set(&key_for("u"), "garbage").await.unwrap();
        assert!(matches!(
            ledger.load_summary("u").await,
            Err(LedgerError::CorruptLedger { .. })
        ));
        assert!(matches!(
            ledger
                .record_transaction("u", input("income", "1", "2024-01-01"))
                .await,
            Err(LedgerError::CorruptLedger { .. })
        ));
        assert_eq!(kv.get(&key_for("u")).await.unwrap().as_deref(), Some("garbage"));
    }

    #[tokio::test]
    async fn test_users_do_not_see_each_other() {
        let (_, ledger) = ledger();
        ledger
            .record_transaction("a", input("income", "10", "2024-01-01"))
            .await
            .unwrap();
        let b = ledger.load_summary("b").await.unwrap();
        assert!(b.items.is_empty());
        assert_eq!(b.income.amount, rust_decimal::Decimal::ZERO);
        assert_eq!(
            ledger.load_summary("a").await.unwrap().items[0].kind,
            TransactionKind::Income
        );
    }
}
