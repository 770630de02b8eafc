//! In-memory repositories for testing
//!
//! All three repositories share one [`MemoryStore`], mirroring how the
//! subscription lives on the account row in PostgreSQL.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::{AccountRow, InvoiceRow, SubscriptionRow};
use crate::repo::*;

#[derive(Debug, Clone)]
struct StoredAccount {
    id: Uuid,
    email: String,
    name: String,
    plan: String,
    selected_tools: Vec<String>,
    subscription_status: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    subscription_version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoredAccount {
    fn account_row(&self) -> AccountRow {
        AccountRow {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            plan: self.plan.clone(),
            subscription_status: self.subscription_status.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn subscription_row(&self) -> SubscriptionRow {
        SubscriptionRow {
            account_id: self.id,
            plan: self.plan.clone(),
            selected_tools: self.selected_tools.clone(),
            subscription_status: self.subscription_status.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            subscription_version: self.subscription_version,
        }
    }
}

/// Shared in-memory tables
#[derive(Default, Clone)]
pub struct MemoryStore {
    accounts: Arc<DashMap<Uuid, StoredAccount>>,
    invoices: Arc<DashMap<Uuid, InvoiceRow>>,
    fail_invoice_insert: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository handles over this store
    pub fn repositories(&self) -> MemoryRepositories {
        MemoryRepositories {
            accounts: MemoryAccountRepository(self.clone()),
            subscriptions: MemorySubscriptionRepository(self.clone()),
            invoices: MemoryInvoiceRepository(self.clone()),
        }
    }

    /// Insert an account directly, with the subscription as legacy rows may
    /// hold it (`status` may be absent)
    pub fn insert_account(
        &self,
        id: Uuid,
        email: &str,
        plan: &str,
        selected_tools: Vec<String>,
        status: Option<&str>,
    ) {
        let now = Utc::now();
        self.accounts.insert(
            id,
            StoredAccount {
                id,
                email: email.to_string(),
                name: "Test User".to_string(),
                plan: plan.to_string(),
                selected_tools,
                subscription_status: status.map(str::to_string),
                start_date: None,
                end_date: None,
                subscription_version: 0,
                created_at: now,
                updated_at: now,
            },
        );
    }

    /// Insert an invoice directly
    pub fn insert_invoice(&self, invoice: InvoiceRow) {
        self.invoices.insert(invoice.id, invoice);
    }

    /// Make every subsequent invoice insert fail
    pub fn fail_invoice_inserts(&self, fail: bool) {
        self.fail_invoice_insert.store(fail, Ordering::SeqCst);
    }

    /// Number of invoices stored for an account
    pub fn invoice_count(&self, account_id: Uuid) -> usize {
        self.invoices
            .iter()
            .filter(|r| r.value().account_id == account_id)
            .count()
    }

    /// Current subscription version of an account
    pub fn subscription_version(&self, account_id: Uuid) -> Option<i64> {
        self.accounts
            .get(&account_id)
            .map(|a| a.value().subscription_version)
    }

    fn email_taken(&self, email: &str, except: Uuid) -> bool {
        self.accounts
            .iter()
            .any(|r| r.key() != &except && r.value().email == email)
    }
}

/// In-memory repositories bundled together
#[derive(Clone)]
pub struct MemoryRepositories {
    pub accounts: MemoryAccountRepository,
    pub subscriptions: MemorySubscriptionRepository,
    pub invoices: MemoryInvoiceRepository,
}

/// In-memory account repository
#[derive(Clone)]
pub struct MemoryAccountRepository(MemoryStore);

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<AccountRow>> {
        Ok(self.0.accounts.get(&id).map(|r| r.value().account_row()))
    }

    async fn create(&self, account: CreateAccount) -> DbResult<AccountRow> {
        if self.0.accounts.contains_key(&account.id) {
            return Err(DbError::Conflict("accounts_pkey".to_string()));
        }
        if self.0.email_taken(&account.email, account.id) {
            return Err(DbError::Conflict("accounts_email_key".to_string()));
        }

        let now = Utc::now();
        let stored = StoredAccount {
            id: account.id,
            email: account.email,
            name: account.name,
            plan: "starter".to_string(),
            selected_tools: Vec::new(),
            subscription_status: Some("inactive".to_string()),
            start_date: None,
            end_date: None,
            subscription_version: 0,
            created_at: now,
            updated_at: now,
        };
        let row = stored.account_row();
        self.0.accounts.insert(stored.id, stored);
        Ok(row)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: UpdateProfile,
    ) -> DbResult<Option<AccountRow>> {
        if let Some(email) = &update.email {
            if self.0.email_taken(email, id) {
                return Err(DbError::Conflict("accounts_email_key".to_string()));
            }
        }

        let Some(mut account) = self.0.accounts.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            account.name = name;
        }
        if let Some(email) = update.email {
            account.email = email;
        }
        account.updated_at = Utc::now();
        Ok(Some(account.account_row()))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let removed = self.0.accounts.remove(&id).is_some();
        if removed {
            self.0.invoices.retain(|_, inv| inv.account_id != id);
        }
        Ok(removed)
    }
}

/// In-memory subscription repository
#[derive(Clone)]
pub struct MemorySubscriptionRepository(MemoryStore);

#[async_trait]
impl SubscriptionRepository for MemorySubscriptionRepository {
    async fn find_by_account_id(&self, account_id: Uuid) -> DbResult<Option<SubscriptionRow>> {
        Ok(self
            .0
            .accounts
            .get(&account_id)
            .map(|r| r.value().subscription_row()))
    }

    async fn apply_update(
        &self,
        update: SubscriptionUpdate,
        invoice: Option<CreateInvoice>,
    ) -> DbResult<Option<AppliedUpdate>> {
        // The entry guard is held until the end, like the row lock.
        let Some(mut account) = self.0.accounts.get_mut(&update.account_id) else {
            return Ok(None);
        };

        let invoice = match invoice {
            Some(_) if self.0.fail_invoice_insert.load(Ordering::SeqCst) => {
                return Err(DbError::InvalidData("invoice insert failed".to_string()));
            }
            Some(inv) => Some(InvoiceRow {
                id: inv.id,
                account_id: inv.account_id,
                date: inv.date,
                description: inv.description,
                amount_cents: inv.amount_cents,
                status: inv.status,
            }),
            None => None,
        };

        account.plan = update.plan;
        account.selected_tools = update.selected_tools;
        account.subscription_status = Some(update.status);
        account.start_date = Some(update.start_date);
        account.end_date = Some(update.end_date);
        account.subscription_version += 1;
        account.updated_at = Utc::now();

        if let Some(inv) = &invoice {
            self.0.invoices.insert(inv.id, inv.clone());
        }

        Ok(Some(AppliedUpdate {
            subscription: account.subscription_row(),
            invoice,
        }))
    }
}

/// In-memory invoice repository
#[derive(Clone)]
pub struct MemoryInvoiceRepository(MemoryStore);

#[async_trait]
impl InvoiceRepository for MemoryInvoiceRepository {
    async fn find_by_account_id(&self, account_id: Uuid) -> DbResult<Vec<InvoiceRow>> {
        let mut invoices: Vec<InvoiceRow> = self
            .0
            .invoices
            .iter()
            .filter(|r| r.value().account_id == account_id)
            .map(|r| r.value().clone())
            .collect();
        invoices.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));
        Ok(invoices)
    }
}
