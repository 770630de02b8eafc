//! PostgreSQL invoice repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::InvoiceRow;
use crate::repo::InvoiceRepository;

/// PostgreSQL invoice repository
#[derive(Clone)]
pub struct PgInvoiceRepository {
    pool: PgPool,
}

impl PgInvoiceRepository {
    /// Create a new invoice repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    async fn find_by_account_id(&self, account_id: Uuid) -> DbResult<Vec<InvoiceRow>> {
        let invoices = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, account_id, date, description, amount_cents, status
            FROM invoices
            WHERE account_id = $1
            ORDER BY date DESC, id
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }
}
