use std::path::Path;

use async_trait::async_trait;
use duckdb::{params, Connection, Row};
use tracing::debug;

use super::duckdb_connection::{open_database, SharedConnection};
use crate::application::BranchRepository;
use crate::domain::{Branch, DomainError};

const COLUMNS: &str = "id, company_id, name, created_at";

pub struct DuckdbBranchRepository {
    conn: SharedConnection,
}

impl DuckdbBranchRepository {
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
            CREATE TABLE IF NOT EXISTS branches (
                id TEXT PRIMARY KEY,
                company_id TEXT NOT NULL,
                name TEXT NOT NULL,
                created_at BIGINT NOT NULL,
                UNIQUE (company_id, name)
            );
            "#,
        )
        .map_err(|e| DomainError::storage(format!("Failed to initialize branches schema: {}", e)))?;

        debug!("DuckDB branches table initialized");
        Ok(())
    }

    fn map_row(row: &Row<'_>) -> duckdb::Result<Branch> {
        Ok(Branch::reconstitute(
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
        ))
    }
}

#[async_trait]
impl BranchRepository for DuckdbBranchRepository {
    async fn save(&self, branch: &Branch) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"
            INSERT INTO branches (id, company_id, name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (id) DO NOTHING
            "#,
            params![
                branch.id(),
                branch.company_id(),
                branch.name(),
                branch.created_at()
            ],
        )
        .map_err(|e| DomainError::storage(format!("Failed to save branch: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Branch>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM branches WHERE id = ?1", COLUMNS))
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        match stmt.query_row(params![id], Self::map_row) {
            Ok(branch) => Ok(Some(branch)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::storage(format!("Failed to query branch: {}", e))),
        }
    }

    async fn find_by_name(
        &self,
        company_id: &str,
        name: &str,
    ) -> Result<Option<Branch>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM branches WHERE company_id = ?1 AND name = ?2",
                COLUMNS
            ))
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        match stmt.query_row(params![company_id, name], Self::map_row) {
            Ok(branch) => Ok(Some(branch)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to query branch by name: {}",
                e
            ))),
        }
    }

    async fn list(&self, company_id: &str) -> Result<Vec<Branch>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM branches WHERE company_id = ?1 ORDER BY name",
                COLUMNS
            ))
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params![company_id], Self::map_row)
            .map_err(|e| DomainError::storage(format!("Failed to query branches: {}", e)))?;

        let mut branches = Vec::new();
        for row in rows {
            branches
                .push(row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?);
        }
        Ok(branches)
    }
}
