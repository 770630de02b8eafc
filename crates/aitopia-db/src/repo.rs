//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// Account repository trait
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<AccountRow>>;

    /// Create a new account on the starter plan with an inactive subscription
    ///
    /// Fails with `DbError::Conflict` if the id or email is taken.
    async fn create(&self, account: CreateAccount) -> DbResult<AccountRow>;

    /// Update name and/or email; returns `None` if the account does not exist
    async fn update_profile(&self, id: Uuid, update: UpdateProfile)
        -> DbResult<Option<AccountRow>>;

    /// Delete an account and its invoices; returns whether a row was removed
    async fn delete(&self, id: Uuid) -> DbResult<bool>;
}

/// Create account input
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Profile update input; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Subscription repository trait
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Load the subscription columns of an account
    async fn find_by_account_id(&self, account_id: Uuid) -> DbResult<Option<SubscriptionRow>>;

    /// Overwrite the subscription and record the invoice, if any, atomically
    ///
    /// Returns `None` when the account does not exist, in which case nothing
    /// is written.
    async fn apply_update(
        &self,
        update: SubscriptionUpdate,
        invoice: Option<CreateInvoice>,
    ) -> DbResult<Option<AppliedUpdate>>;
}

/// Full subscription overwrite
#[derive(Debug, Clone)]
pub struct SubscriptionUpdate {
    pub account_id: Uuid,
    pub plan: String,
    pub selected_tools: Vec<String>,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Result of a committed subscription update
#[derive(Debug, Clone)]
pub struct AppliedUpdate {
    pub subscription: SubscriptionRow,
    pub invoice: Option<InvoiceRow>,
}

/// Invoice repository trait
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Find all invoices for an account, newest first
    async fn find_by_account_id(&self, account_id: Uuid) -> DbResult<Vec<InvoiceRow>>;
}

/// Create invoice input
#[derive(Debug, Clone)]
pub struct CreateInvoice {
    pub id: Uuid,
    pub account_id: Uuid,
    pub date: DateTime<Utc>,
    pub description: String,
    pub amount_cents: i64,
    pub status: String,
}
