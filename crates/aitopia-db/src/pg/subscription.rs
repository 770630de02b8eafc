//! PostgreSQL subscription repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::{InvoiceRow, SubscriptionRow};
use crate::repo::{AppliedUpdate, CreateInvoice, SubscriptionRepository, SubscriptionUpdate};

/// PostgreSQL subscription repository
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    /// Create a new subscription repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn find_by_account_id(&self, account_id: Uuid) -> DbResult<Option<SubscriptionRow>> {
        let sub = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            SELECT id AS account_id, plan, selected_tools, subscription_status,
                   start_date, end_date, subscription_version
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sub)
    }

    async fn apply_update(
        &self,
        update: SubscriptionUpdate,
        invoice: Option<CreateInvoice>,
    ) -> DbResult<Option<AppliedUpdate>> {
        let mut tx = self.pool.begin().await?;

        // Every subscription column in one statement; writers serialize on the row lock.
        let subscription = sqlx::query_as::<_, SubscriptionRow>(
            r#"
            UPDATE accounts
            SET plan = $2,
                selected_tools = $3,
                subscription_status = $4,
                start_date = $5,
                end_date = $6,
                subscription_version = subscription_version + 1,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id AS account_id, plan, selected_tools, subscription_status,
                      start_date, end_date, subscription_version
            "#,
        )
        .bind(update.account_id)
        .bind(&update.plan)
        .bind(&update.selected_tools)
        .bind(&update.status)
        .bind(update.start_date)
        .bind(update.end_date)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(subscription) = subscription else {
            tx.rollback().await?;
            return Ok(None);
        };

        let invoice = match invoice {
            Some(invoice) => Some(
                sqlx::query_as::<_, InvoiceRow>(
                    r#"
                    INSERT INTO invoices (id, account_id, date, description, amount_cents, status)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING id, account_id, date, description, amount_cents, status
                    "#,
                )
                .bind(invoice.id)
                .bind(invoice.account_id)
                .bind(invoice.date)
                .bind(&invoice.description)
                .bind(invoice.amount_cents)
                .bind(&invoice.status)
                .fetch_one(&mut *tx)
                .await?,
            ),
            None => None,
        };

        tx.commit().await?;

        tracing::debug!(
            account_id = %subscription.account_id,
            version = subscription.subscription_version,
            invoiced = invoice.is_some(),
            "subscription update committed"
        );

        Ok(Some(AppliedUpdate {
            subscription,
            invoice,
        }))
    }
}
