// SQLite collaborators for the open-account use case

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, warn};
use usecase_core::domain::{Account, AccountStatus};
use usecase_core::port::{CollaboratorError, Compensation, EntityStore, Precondition};

/// Customer registry + account store
///
/// Precondition: the referenced customer exists.
pub struct SqliteAccountStore {
    pool: SqlitePool,
}

impl SqliteAccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a customer (no-op if already known)
    pub async fn register_customer(&self, customer_id: &str) -> Result<(), CollaboratorError> {
        sqlx::query("INSERT OR IGNORE INTO customers (id) VALUES (?)")
            .bind(customer_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Find account by ID
    pub async fn find_account(&self, id: &str) -> Result<Option<Account>, CollaboratorError> {
        let row = sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(AccountRow::into_account).transpose()
    }
}

#[async_trait]
impl Precondition for SqliteAccountStore {
    async fn check(&self, subject_id: &str) -> Result<bool, CollaboratorError> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?)")
                .bind(subject_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        Ok(exists == 1)
    }

    fn describe(&self) -> &str {
        "customer does not exist"
    }
}

#[async_trait]
impl EntityStore<Account> for SqliteAccountStore {
    /// Upsert: a closed account record replaces the open one with the same ID
    ///
    /// Only `status` and `closed_at` may change. Reusing an ID with a different
    /// customer, product or opening time is rejected. Returns the stored row.
    async fn persist(&self, entity: Account) -> Result<Account, CollaboratorError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (id, customer_id, product_code, status, opened_at, closed_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                status = excluded.status,
                closed_at = excluded.closed_at
            WHERE accounts.customer_id = excluded.customer_id
              AND accounts.product_code = excluded.product_code
              AND accounts.opened_at = excluded.opened_at
            RETURNING *
            "#,
        )
        .bind(&entity.id)
        .bind(&entity.customer_id)
        .bind(&entity.product_code)
        .bind(entity.status.to_string())
        .bind(entity.opened_at)
        .bind(entity.closed_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            warn!(account_id = %entity.id, "Account ID reused with different identity");
            return Err(CollaboratorError::Rejected(format!(
                "account {} already exists with a different customer, product or opening time",
                entity.id
            )));
        };

        let stored = row.into_account()?;
        debug!(account_id = %stored.id, status = %stored.status, "Account persisted");
        Ok(stored)
    }
}

#[async_trait]
impl Compensation<Account> for SqliteAccountStore {
    async fn compensate(&self, entity: &Account) -> Result<(), CollaboratorError> {
        sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(&entity.id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: String,
    customer_id: String,
    product_code: String,
    status: String,
    opened_at: i64,
    closed_at: Option<i64>,
}

impl AccountRow {
    fn into_account(self) -> Result<Account, CollaboratorError> {
        let status: AccountStatus = self
            .status
            .parse()
            .map_err(|e| CollaboratorError::Serialization(format!("{}", e)))?;

        Ok(Account {
            id: self.id,
            customer_id: self.customer_id,
            product_code: self.product_code,
            status,
            opened_at: self.opened_at,
            closed_at: self.closed_at,
        })
    }
}
