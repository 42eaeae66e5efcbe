//! gofinances: a local transaction ledger and the aggregation engine that turns it into the
//! figures of a personal finance summary.
//!
//! The core is the [`Ledger`]: it records transactions into a per-user ledger held in a
//! [`KeyValueStore`](storage::KeyValueStore) and summarizes that ledger into totals, labels and a
//! display list.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod identity;
mod ledger;
pub mod model;
pub mod session;
pub mod storage;
pub mod store;
pub mod summary;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, LedgerError, LedgerResult, Result};
pub use ledger::Ledger;
