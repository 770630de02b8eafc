//! Billing service implementation

use std::sync::Arc;

use aitopia_db::{
    AccountRepository, CreateAccount, CreateInvoice, DbError, InvoiceRepository, Repositories,
    SubscriptionRepository, SubscriptionUpdate, UpdateProfile,
};
use aitopia_types::{Account, AccountId, Invoice, InvoiceStatus, Subscription, SubscriptionStatus};
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::entitlement::billing_period;
use crate::{BillingError, EntitlementPolicy, PlanTable};

/// Subscription change as submitted by a client
///
/// Fields are optional so that a missing `plan` or a `selectedTools` value
/// that is not an array surfaces as `InvalidInput` in order.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionRequest {
    pub plan: Option<String>,
    pub selected_tools: Option<Vec<String>>,
}

/// Result of a committed subscription update
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    /// Subscription as persisted
    pub subscription: Subscription,
    /// Invoice issued by the update, if the plan is paid
    pub invoice: Option<Invoice>,
}

/// Billing service
#[derive(Clone)]
pub struct BillingService {
    accounts: Arc<dyn AccountRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    invoices: Arc<dyn InvoiceRepository>,
    policy: EntitlementPolicy,
}

impl BillingService {
    /// Create a new billing service
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        invoices: Arc<dyn InvoiceRepository>,
        table: PlanTable,
    ) -> Self {
        Self {
            accounts,
            subscriptions,
            invoices,
            policy: EntitlementPolicy::new(table),
        }
    }

    /// Create a billing service over the PostgreSQL repositories
    pub fn from_repositories(repos: &Repositories, table: PlanTable) -> Self {
        Self::new(
            Arc::new(repos.accounts.clone()),
            Arc::new(repos.subscriptions.clone()),
            Arc::new(repos.invoices.clone()),
            table,
        )
    }

    /// Entitlement policy in force
    pub fn policy(&self) -> &EntitlementPolicy {
        &self.policy
    }

    // ========================================================================
    // Subscription
    // ========================================================================

    /// Validate and apply a subscription change
    ///
    /// On success the subscription is overwritten (plan, tools, active status,
    /// a fresh one-month cycle) and, for paid plans, an invoice is recorded in
    /// the same transaction. Nothing is written when validation fails.
    #[instrument(skip(self, request), fields(account_id = %account_id))]
    pub async fn update_subscription(
        &self,
        account_id: &AccountId,
        request: SubscriptionRequest,
    ) -> Result<UpdateOutcome, BillingError> {
        let (Some(plan), Some(tools)) = (request.plan, request.selected_tools) else {
            return Err(BillingError::missing_fields());
        };

        let selection = self.policy.validate(&plan, &tools)?;
        let (start, end) = billing_period(Utc::now());

        let invoice = self
            .policy
            .invoice_amount(selection.plan)
            .map(|amount_cents| CreateInvoice {
                id: Uuid::new_v4(),
                account_id: account_id.0,
                date: start,
                description: format!("{} Plan Subscription", selection.plan.label()),
                amount_cents,
                status: InvoiceStatus::Paid.as_str().to_string(),
            });

        let update = SubscriptionUpdate {
            account_id: account_id.0,
            plan: selection.plan.as_str().to_string(),
            selected_tools: selection.tools,
            status: SubscriptionStatus::Active.as_str().to_string(),
            start_date: start,
            end_date: end,
        };

        let applied = self
            .subscriptions
            .apply_update(update, invoice)
            .await?
            .ok_or(BillingError::NotFound)?;

        let subscription = applied.subscription.to_subscription()?;
        let invoice = applied.invoice.map(|row| row.to_invoice()).transpose()?;

        info!(
            plan = %subscription.plan,
            tools = subscription.selected_tools.len(),
            version = subscription.version,
            invoiced = invoice.is_some(),
            "subscription updated"
        );

        Ok(UpdateOutcome {
            subscription,
            invoice,
        })
    }

    /// Current subscription of an account
    #[instrument(skip(self), fields(account_id = %account_id))]
    pub async fn get_subscription(&self, account_id: &AccountId) -> Result<Subscription, BillingError> {
        let row = self
            .subscriptions
            .find_by_account_id(account_id.0)
            .await?
            .ok_or(BillingError::NotFound)?;

        Ok(row.to_subscription()?)
    }

    /// All invoices of an account, newest first
    #[instrument(skip(self), fields(account_id = %account_id))]
    pub async fn get_invoices(&self, account_id: &AccountId) -> Result<Vec<Invoice>, BillingError> {
        let rows = self.invoices.find_by_account_id(account_id.0).await?;
        let invoices = rows
            .iter()
            .map(|row| row.to_invoice())
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = invoices.len(), "invoices loaded");
        Ok(invoices)
    }

    // ========================================================================
    // Account lifecycle
    // ========================================================================

    /// Create the account for an authenticated identity if it does not exist
    ///
    /// Returns the account and whether it was created by this call. New
    /// accounts start on the starter plan with no tools and an inactive
    /// subscription.
    #[instrument(skip(self, email, name), fields(account_id = %account_id))]
    pub async fn provision_account(
        &self,
        account_id: &AccountId,
        email: &str,
        name: &str,
    ) -> Result<(Account, bool), BillingError> {
        if let Some(existing) = self.accounts.find_by_id(account_id.0).await? {
            return Ok((existing.to_account()?, false));
        }

        let email = normalize_email(email)?;
        let name = require_non_empty(name, "Name")?;

        let created = self
            .accounts
            .create(CreateAccount {
                id: account_id.0,
                email,
                name,
            })
            .await;

        match created {
            Ok(row) => {
                info!("account provisioned");
                Ok((row.to_account()?, true))
            }
            // A concurrent provision of the same id won the insert.
            Err(DbError::Conflict(_)) => match self.accounts.find_by_id(account_id.0).await? {
                Some(row) => Ok((row.to_account()?, false)),
                None => Err(email_taken()),
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Account profile
    #[instrument(skip(self), fields(account_id = %account_id))]
    pub async fn get_account(&self, account_id: &AccountId) -> Result<Account, BillingError> {
        let row = self
            .accounts
            .find_by_id(account_id.0)
            .await?
            .ok_or(BillingError::NotFound)?;

        Ok(row.to_account()?)
    }

    /// Change name and/or email
    #[instrument(skip(self, name, email), fields(account_id = %account_id))]
    pub async fn update_profile(
        &self,
        account_id: &AccountId,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<Account, BillingError> {
        if name.is_none() && email.is_none() {
            return Err(BillingError::InvalidInput(
                "Name or email is required".to_string(),
            ));
        }

        let update = UpdateProfile {
            name: name.as_deref().map(|n| require_non_empty(n, "Name")).transpose()?,
            email: email.as_deref().map(normalize_email).transpose()?,
        };

        let row = match self.accounts.update_profile(account_id.0, update).await {
            Ok(row) => row.ok_or(BillingError::NotFound)?,
            Err(DbError::Conflict(_)) => return Err(email_taken()),
            Err(e) => return Err(e.into()),
        };

        info!("profile updated");
        Ok(row.to_account()?)
    }

    /// Delete an account and its invoices
    #[instrument(skip(self), fields(account_id = %account_id))]
    pub async fn delete_account(&self, account_id: &AccountId) -> Result<(), BillingError> {
        if !self.accounts.delete(account_id.0).await? {
            return Err(BillingError::NotFound);
        }

        info!("account deleted");
        Ok(())
    }
}

fn email_taken() -> BillingError {
    BillingError::Conflict("Email already in use".to_string())
}

fn require_non_empty(value: &str, field: &str) -> Result<String, BillingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BillingError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn normalize_email(email: &str) -> Result<String, BillingError> {
    let email = require_non_empty(email, "Email")?.to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(BillingError::InvalidInput("Invalid email address".to_string())),
    }
}
