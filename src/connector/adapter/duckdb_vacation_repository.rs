use std::path::Path;

use async_trait::async_trait;
use duckdb::{params, Connection, Row};
use tracing::debug;

use super::duckdb_connection::{date_column, open_database, SharedConnection};
use crate::application::VacationRepository;
use crate::domain::{format_date, DomainError, Vacation};

const COLUMNS: &str = "id, employee_id, starts_on, ends_on, status, created_at";

pub struct DuckdbVacationRepository {
    conn: SharedConnection,
}

impl DuckdbVacationRepository {
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
            CREATE TABLE IF NOT EXISTS vacations (
                id TEXT PRIMARY KEY,
                employee_id TEXT NOT NULL,
                starts_on TEXT NOT NULL,
                ends_on TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at BIGINT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_vacations_employee
            ON vacations(employee_id);
            "#,
        )
        .map_err(|e| {
            DomainError::storage(format!("Failed to initialize vacations schema: {}", e))
        })?;

        debug!("DuckDB vacations table initialized");
        Ok(())
    }

    fn query(
        conn: &Connection,
        where_clause: &str,
        arg: &str,
    ) -> Result<Vec<Vacation>, DomainError> {
        let sql = format!(
            "SELECT {} FROM vacations WHERE {} ORDER BY starts_on, created_at",
            COLUMNS, where_clause
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params![arg], |row: &Row<'_>| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, i64>(5)?,
                ))
            })
            .map_err(|e| DomainError::storage(format!("Failed to query vacations: {}", e)))?;

        let mut vacations = Vec::new();
        for row in rows {
            let (id, employee_id, starts_on, ends_on, status, created_at) =
                row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?;
            vacations.push(Vacation::reconstitute(
                id,
                employee_id,
                date_column(&starts_on, "vacations.starts_on")?,
                date_column(&ends_on, "vacations.ends_on")?,
                status
                    .parse()
                    .map_err(|e| DomainError::storage(format!("Corrupt vacation status: {}", e)))?,
                created_at,
            ));
        }
        Ok(vacations)
    }
}

#[async_trait]
impl VacationRepository for DuckdbVacationRepository {
    async fn save(&self, vacation: &Vacation) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"
            INSERT INTO vacations (id, employee_id, starts_on, ends_on, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (id) DO UPDATE SET
                starts_on = excluded.starts_on,
                ends_on = excluded.ends_on,
                status = excluded.status
            "#,
            params![
                vacation.id(),
                vacation.employee_id(),
                format_date(vacation.starts_on()),
                format_date(vacation.ends_on()),
                vacation.status().as_str(),
                vacation.created_at(),
            ],
        )
        .map_err(|e| DomainError::storage(format!("Failed to save vacation: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Vacation>, DomainError> {
        let conn = self.conn.lock().await;
        Ok(Self::query(&conn, "id = ?1", id)?.into_iter().next())
    }

    async fn list_by_employee(&self, employee_id: &str) -> Result<Vec<Vacation>, DomainError> {
        let conn = self.conn.lock().await;
        Self::query(&conn, "employee_id = ?1", employee_id)
    }
}
