use crate::error::{LedgerError, LedgerResult};
use crate::model::{Amount, OccurredAt};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Whether money came in or went out.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Outcome,
}

serde_plain::derive_display_from_serialize!(TransactionKind);

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_plain::from_str(s.trim()).map_err(|_| {
            LedgerError::validation(format!(
                "'{s}' is not a transaction type, expected 'income' or 'outcome'"
            ))
        })
    }
}

/// The opaque, unique identity of a transaction.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single income or expense entry. Once created it is never changed.
///
/// The serialized field names match what earlier versions of the app wrote, which is why `kind`
/// is stored as `type` and `occurred_at` as `date`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transaction {
    #[schemars(with = "String")]
    id: TransactionId,
    name: String,
    /// Decimal text, e.g. `"1000.00"`.
    #[schemars(with = "String")]
    amount: Amount,
    #[serde(rename = "type")]
    kind: TransactionKind,
    category: String,
    /// ISO-8601 date or date and time.
    #[serde(rename = "date")]
    #[schemars(with = "String")]
    occurred_at: OccurredAt,
}

impl Transaction {
    pub(crate) fn new(
        id: TransactionId,
        name: impl Into<String>,
        amount: Amount,
        kind: TransactionKind,
        category: impl Into<String>,
        occurred_at: OccurredAt,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
            kind,
            category: category.into(),
            occurred_at,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn occurred_at(&self) -> OccurredAt {
        self.occurred_at
    }

    /// Checks the rules every stored transaction must satisfy. Returns a description of the first
    /// broken rule.
    pub(crate) fn check(&self) -> std::result::Result<(), String> {
        if self.id.as_str().trim().is_empty() {
            return Err("transaction id is empty".to_string());
        }
        check_name(&self.name)?;
        check_amount(self.amount)
    }
}

/// The largest amount a single transaction may carry. This keeps sums over any realistic ledger
/// far away from the limits of `Decimal`.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

fn check_name(name: &str) -> std::result::Result<(), String> {
    if name.trim().is_empty() {
        return Err("name must not be empty".to_string());
    }
    Ok(())
}

fn check_amount(amount: Amount) -> std::result::Result<(), String> {
    if !amount.is_positive() {
        return Err(format!("amount must be greater than zero, got {amount}"));
    }
    if amount.value() > Decimal::from(MAX_AMOUNT) {
        return Err(format!("amount must not exceed {MAX_AMOUNT}, got {amount}"));
    }
    Ok(())
}

/// What a user submits to record a transaction. The id is assigned on recording and
/// `occurred_at` defaults to the current time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    pub name: String,
    pub amount: Amount,
    pub kind: TransactionKind,
    pub category: String,
    pub occurred_at: Option<OccurredAt>,
}

impl TransactionInput {
    /// Builds an input from user-typed text, reporting unparseable fields as validation errors.
    pub fn parse(
        name: impl Into<String>,
        amount: &str,
        kind: &str,
        category: impl Into<String>,
        occurred_at: Option<&str>,
    ) -> LedgerResult<Self> {
        let amount = Amount::from_str(amount).map_err(|e| LedgerError::validation(e.to_string()))?;
        let kind = TransactionKind::from_str(kind)?;
        let occurred_at = occurred_at
            .map(OccurredAt::from_str)
            .transpose()
            .map_err(LedgerError::Validation)?;
        Ok(Self {
            name: name.into(),
            amount,
            kind,
            category: category.into(),
            occurred_at,
        })
    }

    pub(crate) fn validate(&self) -> LedgerResult<()> {
        check_name(&self.name).map_err(LedgerError::Validation)?;
        check_amount(self.amount).map_err(LedgerError::Validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(amount: &str) -> TransactionInput {
        TransactionInput::parse("Salary", amount, "income", "salary", None).unwrap()
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            TransactionKind::from_str("income").unwrap(),
            TransactionKind::Income
        );
        assert_eq!(
            TransactionKind::from_str(" outcome ").unwrap(),
            TransactionKind::Outcome
        );
        let err = TransactionKind::from_str("transfer").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TransactionKind::Income.to_string(), "income");
        assert_eq!(TransactionKind::Outcome.to_string(), "outcome");
    }

    #[test]
    fn test_input_parse() {
        let input = TransactionInput::parse(
            "Rent",
            "1200,50",
            "outcome",
            "house",
            Some("2024-02-01"),
        )
        .unwrap();
        assert_eq!(input.amount.value(), Decimal::new(120050, 2));
        assert_eq!(input.kind, TransactionKind::Outcome);
        assert_eq!(input.occurred_at.unwrap().to_string(), "2024-02-01T00:00:00");
    }

    #[test]
    fn test_input_parse_bad_fields() {
        let bad_amount = TransactionInput::parse("Rent", "lots", "outcome", "house", None);
        assert!(matches!(bad_amount, Err(LedgerError::Validation(_))));
        let bad_date = TransactionInput::parse("Rent", "10", "outcome", "house", Some("soon"));
        assert!(matches!(bad_date, Err(LedgerError::Validation(_))));
    }

    #[test]
    fn test_validate() {
        assert!(input("0.01").validate().is_ok());
        assert!(input("1000000000000").validate().is_ok());
        assert!(input("0").validate().is_err());
        assert!(input("-5").validate().is_err());
        assert!(input("1000000000000.01").validate().is_err());

        let mut blank = input("10");
        blank.name = "   ".to_string();
        assert!(matches!(blank.validate(), Err(LedgerError::Validation(_))));
    }

    #[test]
    fn test_serialized_field_names() {
        let t = Transaction::new(
            TransactionId::new("abc"),
            "Salary",
            Amount::new(Decimal::new(100000, 2)),
            TransactionKind::Income,
            "salary",
            OccurredAt::from_str("2024-01-05").unwrap(),
        );
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "abc",
                "name": "Salary",
                "amount": "1000.00",
                "type": "income",
                "category": "salary",
                "date": "2024-01-05T00:00:00"
            })
        );
    }
}
