//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use aitopia_types::{
    Account, AccountId, Invoice, InvoiceId, InvoiceStatus, Plan, Subscription,
    SubscriptionStatus,
};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

/// Account row from the database
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub plan: String,
    pub subscription_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Subscription columns of an account row
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionRow {
    pub account_id: Uuid,
    pub plan: String,
    pub selected_tools: Vec<String>,
    pub subscription_status: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub subscription_version: i64,
}

/// Invoice row from the database
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub date: DateTime<Utc>,
    pub description: String,
    pub amount_cents: i64,
    pub status: String,
}

fn parse_plan(value: &str) -> DbResult<Plan> {
    value
        .parse()
        .map_err(|_| DbError::InvalidData(format!("plan {value:?}")))
}

// Conversion implementations from Row types to aitopia-types domain types
impl AccountRow {
    /// Convert to domain AccountId
    pub fn account_id(&self) -> AccountId {
        AccountId(self.id)
    }

    /// Convert to domain Account
    pub fn to_account(&self) -> DbResult<Account> {
        Ok(Account {
            id: self.account_id(),
            email: self.email.clone(),
            name: self.name.clone(),
            plan: parse_plan(&self.plan)?,
            status: SubscriptionStatus::from_stored(self.subscription_status.as_deref()),
        })
    }
}

impl SubscriptionRow {
    /// Convert to domain Subscription
    pub fn to_subscription(&self) -> DbResult<Subscription> {
        Ok(Subscription {
            account_id: AccountId(self.account_id),
            plan: parse_plan(&self.plan)?,
            selected_tools: self.selected_tools.clone(),
            status: SubscriptionStatus::from_stored(self.subscription_status.as_deref()),
            start_date: self.start_date,
            end_date: self.end_date,
            version: self.subscription_version,
        })
    }
}

impl InvoiceRow {
    /// Convert to domain Invoice
    pub fn to_invoice(&self) -> DbResult<Invoice> {
        let status: InvoiceStatus = self
            .status
            .parse()
            .map_err(|_| DbError::InvalidData(format!("invoice status {:?}", self.status)))?;

        Ok(Invoice {
            id: InvoiceId(self.id),
            account_id: AccountId(self.account_id),
            date: self.date,
            description: self.description.clone(),
            amount_cents: self.amount_cents,
            status,
        })
    }
}
