//! Locale-aware formatting of amounts, dates and summary labels.
//!
//! Everything here works on `Decimal` and calendar dates directly; no value passes through a
//! binary float on its way to text.

use crate::model::OccurredAt;
use chrono::Datelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The languages and regional conventions summaries can be rendered in.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
}

serde_plain::derive_display_from_serialize!(Locale);
serde_plain::derive_fromstr_from_deserialize!(Locale);

/// The currencies amounts can be labelled with.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
    Usd,
    Eur,
}

serde_plain::derive_display_from_serialize!(Currency);
serde_plain::derive_fromstr_from_deserialize!(Currency);

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Brl => "R$",
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }
}

/// The explicit formatting parameters of a summary.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Formatting {
    pub locale: Locale,
    pub currency: Currency,
}

impl Formatting {
    pub const fn new(locale: Locale, currency: Currency) -> Self {
        Self { locale, currency }
    }

    /// Formats `value` as money, e.g. `R$ 1.500,00` for `pt-BR` or `$1,500.00` for `en-US`.
    pub fn money(&self, value: Decimal) -> String {
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let (group_sep, decimal_sep, symbol_sep) = match self.locale {
            Locale::PtBr => ('.', ',', " "),
            Locale::EnUs => (',', '.', ""),
        };

        let abs = rounded.abs();
        let cents = (abs.fract() * Decimal::ONE_HUNDRED)
            .trunc()
            .to_u32()
            .unwrap_or_default();
        let whole = group_digits(&abs.trunc().to_string(), group_sep);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!(
            "{sign}{}{symbol_sep}{whole}{decimal_sep}{:02}",
            self.currency.symbol(),
            cents
        )
    }

    /// A short numeric date, `20/01/24` for `pt-BR` and `01/20/24` for `en-US`.
    pub fn short_date(&self, at: OccurredAt) -> String {
        match self.locale {
            Locale::PtBr => at.value().format("%d/%m/%y").to_string(),
            Locale::EnUs => at.value().format("%m/%d/%y").to_string(),
        }
    }

    /// The day and month name, `20 de janeiro` for `pt-BR` and `January 20` for `en-US`.
    pub fn day_and_month(&self, at: OccurredAt) -> String {
        let date = at.date();
        let month = self.month_name(date.month());
        match self.locale {
            Locale::PtBr => format!("{} de {month}", date.day()),
            Locale::EnUs => format!("{month} {}", date.day()),
        }
    }

    /// The label under the income total.
    pub fn last_income_label(&self, at: OccurredAt) -> String {
        match self.locale {
            Locale::PtBr => format!("Última entrada {}", self.day_and_month(at)),
            Locale::EnUs => format!("Last income {}", self.day_and_month(at)),
        }
    }

    /// The label under the expense total.
    pub fn last_outcome_label(&self, at: OccurredAt) -> String {
        match self.locale {
            Locale::PtBr => format!("Última saída {}", self.day_and_month(at)),
            Locale::EnUs => format!("Last expense {}", self.day_and_month(at)),
        }
    }

    /// The label under the net balance: the span from the first of the month to `at`.
    pub fn period_label(&self, at: OccurredAt) -> String {
        match self.locale {
            Locale::PtBr => format!("01 à {}", self.day_and_month(at)),
            Locale::EnUs => format!(
                "{} 1 to {}",
                self.month_name(at.date().month()),
                at.date().day()
            ),
        }
    }

    fn month_name(&self, month: u32) -> &'static str {
        let ix = month.saturating_sub(1) as usize;
        let names = match self.locale {
            Locale::PtBr => &PT_BR_MONTHS,
            Locale::EnUs => &EN_US_MONTHS,
        };
        names.get(ix).copied().unwrap_or_default()
    }
}

const PT_BR_MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const EN_US_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Inserts `sep` between groups of three digits, counting from the right.
fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (ix, c) in digits.chars().enumerate() {
        if ix > 0 && (len - ix) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}
