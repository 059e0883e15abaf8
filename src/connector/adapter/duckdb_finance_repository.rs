use std::path::Path;

use async_trait::async_trait;
use duckdb::{params, params_from_iter, Connection, Row};
use tracing::debug;

use super::duckdb_connection::{date_column, decimal_column, open_database, SharedConnection};
use crate::application::{AccountPayableRepository, AccountReceivableRepository};
use crate::domain::{
    format_date, AccountPayable, AccountReceivable, DomainError, PayableSource, PayableStatus,
};

const PAYABLE_COLUMNS: &str = "id, branch_id, description, amount, due_on, status, \
     source_kind, source_id, created_at, paid_at";

const RECEIVABLE_COLUMNS: &str =
    "id, branch_id, description, amount, due_on, status, created_at, received_at";

struct PayableRow {
    id: String,
    branch_id: String,
    description: String,
    amount: String,
    due_on: String,
    status: String,
    source_kind: String,
    source_id: Option<String>,
    created_at: i64,
    paid_at: Option<i64>,
}

impl PayableRow {
    fn read(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            branch_id: row.get(1)?,
            description: row.get(2)?,
            amount: row.get(3)?,
            due_on: row.get(4)?,
            status: row.get(5)?,
            source_kind: row.get(6)?,
            source_id: row.get(7)?,
            created_at: row.get(8)?,
            paid_at: row.get(9)?,
        })
    }

    fn into_payable(self) -> Result<AccountPayable, DomainError> {
        Ok(AccountPayable::reconstitute(
            self.id,
            self.branch_id,
            self.description,
            decimal_column(&self.amount, "accounts_payable.amount")?,
            date_column(&self.due_on, "accounts_payable.due_on")?,
            self.status
                .parse()
                .map_err(|e| DomainError::storage(format!("Corrupt payable status: {}", e)))?,
            PayableSource::from_parts(&self.source_kind, self.source_id)?,
            self.created_at,
            self.paid_at,
        ))
    }
}

struct ReceivableRow {
    id: String,
    branch_id: String,
    description: String,
    amount: String,
    due_on: String,
    status: String,
    created_at: i64,
    received_at: Option<i64>,
}

impl ReceivableRow {
    fn read(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            branch_id: row.get(1)?,
            description: row.get(2)?,
            amount: row.get(3)?,
            due_on: row.get(4)?,
            status: row.get(5)?,
            created_at: row.get(6)?,
            received_at: row.get(7)?,
        })
    }

    fn into_receivable(self) -> Result<AccountReceivable, DomainError> {
        Ok(AccountReceivable::reconstitute(
            self.id,
            self.branch_id,
            self.description,
            decimal_column(&self.amount, "accounts_receivable.amount")?,
            date_column(&self.due_on, "accounts_receivable.due_on")?,
            self.status
                .parse()
                .map_err(|e| DomainError::storage(format!("Corrupt receivable status: {}", e)))?,
            self.created_at,
            self.received_at,
        ))
    }
}

/// Accounts payable and receivable share one adapter and one schema.
pub struct DuckdbFinanceRepository {
    conn: SharedConnection,
}

impl DuckdbFinanceRepository {
    pub async fn new(db_path: &Path) -> Result<Self, DomainError> {
        Self::with_connection(open_database(db_path)?).await
    }

    /// Create a new adapter using an existing shared connection.
    pub async fn with_connection(conn: SharedConnection) -> Result<Self, DomainError> {
        let conn_guard = conn.lock().await;
        Self::initialize_schema(&conn_guard)?;
        drop(conn_guard);

        Ok(Self { conn })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), DomainError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS accounts_payable (
                id TEXT PRIMARY KEY,
                branch_id TEXT NOT NULL,
                description TEXT NOT NULL,
                amount TEXT NOT NULL,
                due_on TEXT NOT NULL,
                status TEXT NOT NULL,
                source_kind TEXT NOT NULL,
                source_id TEXT,
                created_at BIGINT NOT NULL,
                paid_at BIGINT
            );

            CREATE TABLE IF NOT EXISTS accounts_receivable (
                id TEXT PRIMARY KEY,
                branch_id TEXT NOT NULL,
                description TEXT NOT NULL,
                amount TEXT NOT NULL,
                due_on TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at BIGINT NOT NULL,
                received_at BIGINT
            );

            CREATE INDEX IF NOT EXISTS idx_accounts_payable_branch
            ON accounts_payable(branch_id);

            CREATE INDEX IF NOT EXISTS idx_accounts_receivable_branch
            ON accounts_receivable(branch_id);
            "#,
        )
        .map_err(|e| DomainError::storage(format!("Failed to initialize finance schema: {}", e)))?;

        debug!("DuckDB finance tables initialized");
        Ok(())
    }

    fn query_payables(
        conn: &Connection,
        sql: &str,
        args: &[&str],
    ) -> Result<Vec<AccountPayable>, DomainError> {
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params_from_iter(args.iter()), PayableRow::read)
            .map_err(|e| DomainError::storage(format!("Failed to query accounts payable: {}", e)))?;

        let mut payables = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?;
            payables.push(row.into_payable()?);
        }
        Ok(payables)
    }

    fn query_receivables(
        conn: &Connection,
        sql: &str,
        arg: &str,
    ) -> Result<Vec<AccountReceivable>, DomainError> {
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params![arg], ReceivableRow::read)
            .map_err(|e| {
                DomainError::storage(format!("Failed to query accounts receivable: {}", e))
            })?;

        let mut receivables = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?;
            receivables.push(row.into_receivable()?);
        }
        Ok(receivables)
    }
}

#[async_trait]
impl AccountPayableRepository for DuckdbFinanceRepository {
    async fn save(&self, payable: &AccountPayable) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"
            INSERT INTO accounts_payable
                (id, branch_id, description, amount, due_on, status, source_kind, source_id,
                 created_at, paid_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT (id) DO UPDATE SET
                description = excluded.description,
                amount = excluded.amount,
                due_on = excluded.due_on,
                status = excluded.status,
                paid_at = excluded.paid_at
            "#,
            params![
                payable.id(),
                payable.branch_id(),
                payable.description(),
                payable.amount().to_string(),
                format_date(payable.due_on()),
                payable.status().as_str(),
                payable.source().kind(),
                payable.source().reference_id(),
                payable.created_at(),
                payable.paid_at(),
            ],
        )
        .map_err(|e| DomainError::storage(format!("Failed to save account payable: {}", e)))?;

        debug!("Saved account payable {}", payable.id());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AccountPayable>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!("SELECT {} FROM accounts_payable WHERE id = ?1", PAYABLE_COLUMNS);
        Ok(Self::query_payables(&conn, &sql, &[id])?.into_iter().next())
    }

    async fn list_by_branch(
        &self,
        branch_id: &str,
        status: Option<PayableStatus>,
    ) -> Result<Vec<AccountPayable>, DomainError> {
        let conn = self.conn.lock().await;
        match status {
            Some(status) => {
                let sql = format!(
                    "SELECT {} FROM accounts_payable WHERE branch_id = ?1 AND status = ?2 \
                     ORDER BY due_on, created_at",
                    PAYABLE_COLUMNS
                );
                Self::query_payables(&conn, &sql, &[branch_id, status.as_str()])
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM accounts_payable WHERE branch_id = ?1 \
                     ORDER BY due_on, created_at",
                    PAYABLE_COLUMNS
                );
                Self::query_payables(&conn, &sql, &[branch_id])
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM accounts_payable WHERE id = ?1", params![id])
            .map_err(|e| {
                DomainError::storage(format!("Failed to delete account payable: {}", e))
            })?;

        debug!("Deleted account payable {}", id);
        Ok(())
    }
}

#[async_trait]
impl AccountReceivableRepository for DuckdbFinanceRepository {
    async fn save(&self, receivable: &AccountReceivable) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"
            INSERT INTO accounts_receivable
                (id, branch_id, description, amount, due_on, status, created_at, received_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT (id) DO UPDATE SET
                description = excluded.description,
                amount = excluded.amount,
                due_on = excluded.due_on,
                status = excluded.status,
                received_at = excluded.received_at
            "#,
            params![
                receivable.id(),
                receivable.branch_id(),
                receivable.description(),
                receivable.amount().to_string(),
                format_date(receivable.due_on()),
                receivable.status().as_str(),
                receivable.created_at(),
                receivable.received_at(),
            ],
        )
        .map_err(|e| DomainError::storage(format!("Failed to save account receivable: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AccountReceivable>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!(
            "SELECT {} FROM accounts_receivable WHERE id = ?1",
            RECEIVABLE_COLUMNS
        );
        Ok(Self::query_receivables(&conn, &sql, id)?.into_iter().next())
    }

    async fn list_by_branch(&self, branch_id: &str) -> Result<Vec<AccountReceivable>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!(
            "SELECT {} FROM accounts_receivable WHERE branch_id = ?1 ORDER BY due_on, created_at",
            RECEIVABLE_COLUMNS
        );
        Self::query_receivables(&conn, &sql, branch_id)
    }
}
