//! Billing and invoice types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AccountId;

/// Invoice ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub Uuid);

impl InvoiceId {
    /// Create a new invoice ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InvoiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Invoice status
///
/// Invoices are only issued for completed plan changes, so every stored
/// invoice is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
}

impl InvoiceStatus {
    /// Status name as stored and displayed
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = InvoiceStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Paid" => Ok(Self::Paid),
            _ => Err(InvoiceStatusParseError(s.to_string())),
        }
    }
}

/// Error parsing an invoice status
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid invoice status: {0}")]
pub struct InvoiceStatusParseError(pub String);

/// Invoice record, immutable once written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice ID
    pub id: InvoiceId,
    /// Account that owns the invoice
    pub account_id: AccountId,
    /// When the invoice was issued
    pub date: DateTime<Utc>,
    /// Line description, e.g. "Pro Plan Subscription"
    pub description: String,
    /// Amount in cents
    pub amount_cents: i64,
    /// Invoice status
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Render for the invoice listing
    pub fn to_view(&self) -> InvoiceView {
        InvoiceView {
            date: self.date.format("%Y-%m-%d").to_string(),
            desc: self.description.clone(),
            amount: format_amount(self.amount_cents),
            status: self.status,
        }
    }
}

/// Invoice as listed by `GET /invoices`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceView {
    /// Issue date, `YYYY-MM-DD`
    pub date: String,
    pub desc: String,
    /// Dollar amount, e.g. "$49.00"
    pub amount: String,
    pub status: InvoiceStatus,
}

/// Format a cent amount as dollars with two decimals
pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}
