//! PostgreSQL account repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::AccountRow;
use crate::repo::{AccountRepository, CreateAccount, UpdateProfile};

/// PostgreSQL account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new account repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<AccountRow>> {
        let account = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, name, plan, subscription_status, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn create(&self, account: CreateAccount) -> DbResult<AccountRow> {
        sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (id, email, name, plan, selected_tools, subscription_status)
            VALUES ($1, $2, $3, 'starter', '{}', 'inactive')
            RETURNING id, email, name, plan, subscription_status, created_at, updated_at
            "#,
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.name)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_write)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: UpdateProfile,
    ) -> DbResult<Option<AccountRow>> {
        sqlx::query_as::<_, AccountRow>(
            r#"
            UPDATE accounts
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, name, plan, subscription_status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from_write)
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
