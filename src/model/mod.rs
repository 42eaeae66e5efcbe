//! Types that represent the core data model, such as `Transaction` and `Amount`.
mod amount;
mod occurred_at;
mod transaction;

pub use amount::{Amount, AmountError};
pub use occurred_at::OccurredAt;
pub use transaction::{Transaction, TransactionId, TransactionInput, TransactionKind, MAX_AMOUNT};
