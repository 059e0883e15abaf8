use std::path::Path;

use async_trait::async_trait;
use duckdb::{params, params_from_iter, Connection, Row, ToSql};
use tracing::debug;

use super::duckdb_connection::{decimal_column, open_database, SharedConnection};
use crate::application::SalaryRepository;
use crate::domain::{DomainError, Salary};

const COLUMNS: &str =
    "id, employee_id, branch_id, month, year, amount, status, created_at, paid_at";

const INSERT_SQL: &str = r#"
    INSERT INTO salaries
        (id, employee_id, branch_id, month, year, amount, status, created_at, paid_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

struct SalaryRow {
    id: String,
    employee_id: String,
    branch_id: String,
    month: i64,
    year: i64,
    amount: String,
    status: String,
    created_at: i64,
    paid_at: Option<i64>,
}

impl SalaryRow {
    fn read(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            branch_id: row.get(2)?,
            month: row.get(3)?,
            year: row.get(4)?,
            amount: row.get(5)?,
            status: row.get(6)?,
            created_at: row.get(7)?,
            paid_at: row.get(8)?,
        })
    }

    fn into_salary(self) -> Result<Salary, DomainError> {
        Ok(Salary::reconstitute(
            self.id,
            self.employee_id,
            self.branch_id,
            self.month as u32,
            self.year as i32,
            decimal_column(&self.amount, "salaries.amount")?,
            self.status
                .parse()
                .map_err(|e| DomainError::storage(format!("Corrupt salary status: {}", e)))?,
            self.created_at,
            self.paid_at,
        ))
    }
}

pub struct DuckdbSalaryRepository {
    conn: SharedConnection,
}

impl DuckdbSalaryRepository {
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
            CREATE TABLE IF NOT EXISTS salaries (
                id TEXT PRIMARY KEY,
                employee_id TEXT NOT NULL,
                branch_id TEXT NOT NULL,
                month INTEGER NOT NULL,
                year INTEGER NOT NULL,
                amount TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at BIGINT NOT NULL,
                paid_at BIGINT,
                UNIQUE (employee_id, month, year)
            );

            CREATE INDEX IF NOT EXISTS idx_salaries_period
            ON salaries(branch_id, year, month);
            "#,
        )
        .map_err(|e| DomainError::storage(format!("Failed to initialize salaries schema: {}", e)))?;

        debug!("DuckDB salaries table initialized");
        Ok(())
    }

    fn insert_params(salary: &Salary) -> [Box<dyn ToSql>; 9] {
        [
            Box::new(salary.id().to_string()),
            Box::new(salary.employee_id().to_string()),
            Box::new(salary.branch_id().to_string()),
            Box::new(salary.month() as i64),
            Box::new(salary.year() as i64),
            Box::new(salary.amount().to_string()),
            Box::new(salary.status().as_str()),
            Box::new(salary.created_at()),
            Box::new(salary.paid_at()),
        ]
    }

    fn write_error(context: &str, e: duckdb::Error) -> DomainError {
        let message = e.to_string();
        if message.contains("Duplicate key") || message.contains("Constraint Error") {
            DomainError::already_exists(format!("{}: {}", context, message))
        } else {
            DomainError::storage(format!("{}: {}", context, message))
        }
    }

    fn query(
        conn: &Connection,
        sql: &str,
        args: &[&dyn ToSql],
    ) -> Result<Vec<Salary>, DomainError> {
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params_from_iter(args.iter()), SalaryRow::read)
            .map_err(|e| DomainError::storage(format!("Failed to query salaries: {}", e)))?;

        let mut salaries = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?;
            salaries.push(row.into_salary()?);
        }
        Ok(salaries)
    }
}

#[async_trait]
impl SalaryRepository for DuckdbSalaryRepository {
    async fn save(&self, salary: &Salary) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!(
            "{} ON CONFLICT (id) DO UPDATE SET \
             status = excluded.status, paid_at = excluded.paid_at",
            INSERT_SQL.trim_end()
        );
        conn.execute(&sql, params_from_iter(Self::insert_params(salary).iter()))
            .map_err(|e| Self::write_error("Failed to save salary", e))?;

        Ok(())
    }

    async fn create_batch(&self, salaries: &[Salary]) -> Result<(), DomainError> {
        if salaries.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn.lock().await;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        {
            let mut stmt = tx
                .prepare(INSERT_SQL)
                .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

            for salary in salaries {
                stmt.execute(params_from_iter(Self::insert_params(salary).iter()))
                    .map_err(|e| Self::write_error("Failed to insert salary", e))?;
            }
        }

        tx.commit()
            .map_err(|e| Self::write_error("Failed to commit salaries", e))?;

        debug!("Inserted {} salaries into DuckDB", salaries.len());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Salary>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!("SELECT {} FROM salaries WHERE id = ?1", COLUMNS);
        Ok(Self::query(&conn, &sql, params![id])?.into_iter().next())
    }

    async fn list_by_period(
        &self,
        branch_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<Salary>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!(
            "SELECT {} FROM salaries WHERE branch_id = ?1 AND month = ?2 AND year = ?3 \
             ORDER BY created_at, id",
            COLUMNS
        );
        Self::query(&conn, &sql, params![branch_id, month as i64, year as i64])
    }
}
