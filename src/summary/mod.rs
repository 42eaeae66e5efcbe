//! The aggregation engine: derives the highlight figures and the display list from a ledger.
//!
//! [`summarize`] is a pure function of the ledger and the [`Formatting`]. Totals are summed as
//! exact decimals and recomputed on every call; nothing derived is ever stored.

mod format;

pub use format::{Currency, Formatting, Locale};

use crate::model::{OccurredAt, Transaction, TransactionId, TransactionKind};
use rust_decimal::Decimal;
use serde::Serialize;

/// A total plus the label describing its most recent transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryFigure {
    /// The exact total.
    pub amount: Decimal,
    /// `amount` formatted as money.
    pub formatted_amount: String,
    /// Describes the latest transaction behind this figure, empty when there is none.
    pub last_transaction: String,
    /// The timestamp the label refers to.
    pub last_occurred_at: Option<OccurredAt>,
}

/// A transaction projected into display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTransaction {
    pub id: TransactionId,
    pub name: String,
    pub kind: TransactionKind,
    pub category: String,
    pub formatted_amount: String,
    pub formatted_date: String,
}

/// Everything the landing screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub income: SummaryFigure,
    pub outcome: SummaryFigure,
    pub net: SummaryFigure,
    /// One entry per transaction, in ledger order.
    pub items: Vec<DisplayTransaction>,
}

/// Computes the summary of `ledger`.
pub fn summarize(ledger: &[Transaction], formatting: &Formatting) -> Summary {
    let (incomes, outcomes): (Vec<&Transaction>, Vec<&Transaction>) = ledger
        .iter()
        .partition(|t| t.kind() == TransactionKind::Income);

    let income_total = total(&incomes);
    let outcome_total = total(&outcomes);
    let last_income = latest(&incomes);
    let last_outcome = latest(&outcomes);

    let income = SummaryFigure {
        amount: income_total,
        formatted_amount: formatting.money(income_total),
        last_transaction: last_income
            .map(|at| formatting.last_income_label(at))
            .unwrap_or_default(),
        last_occurred_at: last_income,
    };
    let outcome = SummaryFigure {
        amount: outcome_total,
        formatted_amount: formatting.money(outcome_total),
        last_transaction: last_outcome
            .map(|at| formatting.last_outcome_label(at))
            .unwrap_or_default(),
        last_occurred_at: last_outcome,
    };
    let net_total = income_total - outcome_total;
    let net = SummaryFigure {
        amount: net_total,
        formatted_amount: formatting.money(net_total),
        last_transaction: last_income
            .map(|at| formatting.period_label(at))
            .unwrap_or_default(),
        last_occurred_at: last_income,
    };

    let items = ledger
        .iter()
        .map(|t| DisplayTransaction {
            id: t.id().clone(),
            name: t.name().to_string(),
            kind: t.kind(),
            category: t.category().to_string(),
            formatted_amount: formatting.money(t.amount().value()),
            formatted_date: formatting.short_date(t.occurred_at()),
        })
        .collect();

    Summary {
        income,
        outcome,
        net,
        items,
    }
}

fn total(transactions: &[&Transaction]) -> Decimal {
    transactions.iter().map(|t| t.amount().value()).sum()
}

/// The latest timestamp among `transactions`, `None` for an empty slice. `max_by_key` returns the
/// last of several equal maxima, so a tie goes to the transaction recorded later.
fn latest(transactions: &[&Transaction]) -> Option<OccurredAt> {
    transactions
        .iter()
        .max_by_key(|t| t.occurred_at())
        .map(|t| t.occurred_at())
}
