use std::path::Path;

use async_trait::async_trait;
use duckdb::{params, params_from_iter, Connection, Row};
use tracing::debug;

use super::duckdb_connection::{date_column, decimal_column, open_database, SharedConnection};
use crate::application::EmployeeRepository;
use crate::domain::{format_date, DomainError, Employee};

const COLUMNS: &str =
    "id, branch_id, name, document, monthly_salary, hired_on, active, created_at, deleted_at";

/// Row as stored; decimals and dates are kept as text.
struct EmployeeRow {
    id: String,
    branch_id: String,
    name: String,
    document: String,
    monthly_salary: Option<String>,
    hired_on: String,
    active: bool,
    created_at: i64,
    deleted_at: Option<i64>,
}

impl EmployeeRow {
    fn read(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            branch_id: row.get(1)?,
            name: row.get(2)?,
            document: row.get(3)?,
            monthly_salary: row.get(4)?,
            hired_on: row.get(5)?,
            active: row.get(6)?,
            created_at: row.get(7)?,
            deleted_at: row.get(8)?,
        })
    }

    fn into_employee(self) -> Result<Employee, DomainError> {
        let monthly_salary = self
            .monthly_salary
            .as_deref()
            .map(|raw| decimal_column(raw, "employees.monthly_salary"))
            .transpose()?;

        Ok(Employee::reconstitute(
            self.id,
            self.branch_id,
            self.name,
            self.document,
            monthly_salary,
            date_column(&self.hired_on, "employees.hired_on")?,
            self.active,
            self.created_at,
            self.deleted_at,
        ))
    }
}

pub struct DuckdbEmployeeRepository {
    conn: SharedConnection,
}

impl DuckdbEmployeeRepository {
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
            CREATE TABLE IF NOT EXISTS employees (
                id TEXT PRIMARY KEY,
                branch_id TEXT NOT NULL,
                name TEXT NOT NULL,
                document TEXT NOT NULL,
                monthly_salary TEXT,
                hired_on TEXT NOT NULL,
                active BOOLEAN NOT NULL,
                created_at BIGINT NOT NULL,
                deleted_at BIGINT
            );

            CREATE INDEX IF NOT EXISTS idx_employees_branch
            ON employees(branch_id);
            "#,
        )
        .map_err(|e| {
            DomainError::storage(format!("Failed to initialize employees schema: {}", e))
        })?;

        debug!("DuckDB employees table initialized");
        Ok(())
    }

    fn query(conn: &Connection, sql: &str, args: &[&str]) -> Result<Vec<Employee>, DomainError> {
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params_from_iter(args.iter()), EmployeeRow::read)
            .map_err(|e| DomainError::storage(format!("Failed to query employees: {}", e)))?;

        let mut employees = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?;
            employees.push(row.into_employee()?);
        }
        Ok(employees)
    }
}

#[async_trait]
impl EmployeeRepository for DuckdbEmployeeRepository {
    async fn save(&self, employee: &Employee) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"
            INSERT INTO employees
                (id, branch_id, name, document, monthly_salary, hired_on, active, created_at,
                 deleted_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                document = excluded.document,
                monthly_salary = excluded.monthly_salary,
                hired_on = excluded.hired_on,
                active = excluded.active,
                deleted_at = excluded.deleted_at
            "#,
            params![
                employee.id(),
                employee.branch_id(),
                employee.name(),
                employee.document(),
                employee.monthly_salary().map(|s| s.to_string()),
                format_date(employee.hired_on()),
                employee.is_active(),
                employee.created_at(),
                employee.deleted_at(),
            ],
        )
        .map_err(|e| DomainError::storage(format!("Failed to save employee: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!("SELECT {} FROM employees WHERE id = ?1", COLUMNS);
        Ok(Self::query(&conn, &sql, &[id])?.into_iter().next())
    }

    async fn find_by_document(
        &self,
        branch_id: &str,
        document: &str,
    ) -> Result<Option<Employee>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!(
            "SELECT {} FROM employees \
             WHERE branch_id = ?1 AND document = ?2 AND deleted_at IS NULL",
            COLUMNS
        );
        Ok(Self::query(&conn, &sql, &[branch_id, document])?.into_iter().next())
    }

    async fn list_by_branch(&self, branch_id: &str) -> Result<Vec<Employee>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!(
            "SELECT {} FROM employees WHERE branch_id = ?1 AND deleted_at IS NULL \
             ORDER BY name, id",
            COLUMNS
        );
        Self::query(&conn, &sql, &[branch_id])
    }
}
