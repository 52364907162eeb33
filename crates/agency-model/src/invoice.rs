//! Invoices and money amounts

use crate::date::lenient_date;
use crate::error::{ModelError, ModelResult};
use crate::ids::InvoiceId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Amount in cents
///
/// Deserializes from whole-dollar numbers (`2500`, `18.5`) or display
/// strings (`"$2,500.00"`). Serializes as cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "MoneyRepr", into = "u64")]
pub struct Money(u64);

#[allow(clippy::cast_precision_loss)]
const MAX_CENTS: f64 = u64::MAX as f64;

#[derive(Deserialize)]
#[serde(untagged)]
enum MoneyRepr {
    Whole(u64),
    Fractional(f64),
    Display(String),
}

impl Money {
    /// From cents
    #[inline]
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// From whole dollars, saturating at the largest representable amount
    #[inline]
    #[must_use]
    pub const fn from_dollars(dollars: u64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    /// From whole dollars, `None` when the amount does not fit
    #[inline]
    #[must_use]
    pub const fn checked_from_dollars(dollars: u64) -> Option<Self> {
        match dollars.checked_mul(100) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Cents
    #[inline]
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Saturating addition
    #[inline]
    #[must_use]
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl From<Money> for u64 {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl TryFrom<MoneyRepr> for Money {
    type Error = ModelError;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn try_from(repr: MoneyRepr) -> Result<Self, Self::Error> {
        match repr {
            MoneyRepr::Whole(dollars) => Money::checked_from_dollars(dollars)
                .ok_or_else(|| ModelError::unknown_value("amount", dollars.to_string())),
            MoneyRepr::Fractional(dollars)
                if dollars.is_finite() && dollars >= 0.0 && dollars * 100.0 < MAX_CENTS =>
            {
                Ok(Money((dollars * 100.0).round() as u64))
            }
            MoneyRepr::Fractional(dollars) => Err(ModelError::unknown_value("amount", dollars.to_string())),
            MoneyRepr::Display(text) => text.parse(),
        }
    }
}

impl FromStr for Money {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::unknown_value("amount", s);
        let cleaned: String = s.trim().trim_start_matches('$').chars().filter(|c| *c != ',').collect();
        let (whole, fraction) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), "0"));
        if whole.is_empty() || fraction.len() > 2 {
            return Err(invalid());
        }
        let dollars: u64 = whole.parse().map_err(|_| invalid())?;
        let mut cents: u64 = fraction.parse().map_err(|_| invalid())?;
        if fraction.len() == 1 {
            cents *= 10;
        }
        dollars
            .checked_mul(100)
            .and_then(|whole| whole.checked_add(cents))
            .map(Money)
            .ok_or_else(invalid)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dollars = self.0 / 100;
        let cents = self.0 % 100;
        let digits = dollars.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "${grouped}.{cents:02}")
    }
}

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
        }
    }

    /// Money still owed
    #[must_use]
    pub fn is_outstanding(self) -> bool {
        matches!(self, InvoiceStatus::Sent | InvoiceStatus::Overdue)
    }
}

impl FromStr for InvoiceStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(InvoiceStatus::Draft),
            "Sent" => Ok(InvoiceStatus::Sent),
            "Paid" => Ok(InvoiceStatus::Paid),
            "Overdue" => Ok(InvoiceStatus::Overdue),
            other => Err(ModelError::unknown_status("invoice", other)),
        }
    }
}

impl TryFrom<String> for InvoiceStatus {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Invoice view model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    #[serde(default, alias = "invoiceNum")]
    pub number: String,
    #[serde(default)]
    pub client: String,
    pub amount: Money,
    pub status: InvoiceStatus,
    #[serde(default, with = "lenient_date", alias = "date")]
    pub sent_on: Option<NaiveDate>,
    #[serde(default, with = "lenient_date")]
    pub paid_on: Option<NaiveDate>,
}

impl Invoice {
    /// Check ingestion invariants
    ///
    /// # Errors
    /// A paid invoice must carry its payment date.
    pub fn validate(&self) -> ModelResult<()> {
        if self.status == InvoiceStatus::Paid && self.paid_on.is_none() && self.sent_on.is_none() {
            return Err(ModelError::MissingField("invoice.paidOn"));
        }
        Ok(())
    }
}
