//! Generates the ids of new transactions.

use crate::error::{LedgerError, LedgerResult};
use crate::model::TransactionId;
use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Builder;

/// Produces globally unique transaction ids.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh id, or `LedgerError::Generation` if no id could be produced. A caller must
    /// not store a transaction when this fails.
    fn generate(&self) -> LedgerResult<TransactionId>;
}

/// Draws 128 bits from the operating system's entropy source and renders them as a version 4
/// UUID, e.g. `0b6c3f4e-9d0a-4c1e-8f7d-2a5b6c7d8e9f`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> LedgerResult<TransactionId> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| LedgerError::Generation(e.to_string()))?;
        let uuid = Builder::from_random_bytes(bytes).into_uuid();
        Ok(TransactionId::new(uuid.to_string()))
    }
}
