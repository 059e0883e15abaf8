use std::path::Path;

use async_trait::async_trait;
use duckdb::{params, params_from_iter, Connection, Row};
use tracing::debug;

use super::duckdb_connection::{open_database, SharedConnection};
use crate::application::VehicleRepository;
use crate::domain::{DomainError, Vehicle};

const COLUMNS: &str = "id, branch_id, plate, model, current_km, created_at, updated_at, deleted_at";

pub struct DuckdbVehicleRepository {
    conn: SharedConnection,
}

impl DuckdbVehicleRepository {
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
            CREATE TABLE IF NOT EXISTS vehicles (
                id TEXT PRIMARY KEY,
                branch_id TEXT NOT NULL,
                plate TEXT NOT NULL,
                model TEXT NOT NULL,
                current_km BIGINT NOT NULL,
                created_at BIGINT NOT NULL,
                updated_at BIGINT NOT NULL,
                deleted_at BIGINT
            );

            CREATE INDEX IF NOT EXISTS idx_vehicles_branch
            ON vehicles(branch_id);
            "#,
        )
        .map_err(|e| DomainError::storage(format!("Failed to initialize vehicles schema: {}", e)))?;

        debug!("DuckDB vehicles table initialized");
        Ok(())
    }

    fn map_row(row: &Row<'_>) -> duckdb::Result<Vehicle> {
        Ok(Vehicle::reconstitute(
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
        ))
    }

    fn query(conn: &Connection, sql: &str, args: &[&str]) -> Result<Vec<Vehicle>, DomainError> {
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params_from_iter(args.iter()), Self::map_row)
            .map_err(|e| DomainError::storage(format!("Failed to query vehicles: {}", e)))?;

        let mut vehicles = Vec::new();
        for row in rows {
            vehicles
                .push(row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?);
        }
        Ok(vehicles)
    }
}

#[async_trait]
impl VehicleRepository for DuckdbVehicleRepository {
    async fn save(&self, vehicle: &Vehicle) -> Result<(), DomainError> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"
            INSERT INTO vehicles
                (id, branch_id, plate, model, current_km, created_at, updated_at, deleted_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT (id) DO UPDATE SET
                plate = excluded.plate,
                model = excluded.model,
                current_km = excluded.current_km,
                updated_at = excluded.updated_at,
                deleted_at = excluded.deleted_at
            "#,
            params![
                vehicle.id(),
                vehicle.branch_id(),
                vehicle.plate(),
                vehicle.model(),
                vehicle.current_km(),
                vehicle.created_at(),
                vehicle.updated_at(),
                vehicle.deleted_at(),
            ],
        )
        .map_err(|e| DomainError::storage(format!("Failed to save vehicle: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Vehicle>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!("SELECT {} FROM vehicles WHERE id = ?1", COLUMNS);
        Ok(Self::query(&conn, &sql, &[id])?.into_iter().next())
    }

    async fn find_by_plate(
        &self,
        branch_id: &str,
        plate: &str,
    ) -> Result<Option<Vehicle>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!(
            "SELECT {} FROM vehicles WHERE branch_id = ?1 AND plate = ?2 AND deleted_at IS NULL",
            COLUMNS
        );
        Ok(Self::query(&conn, &sql, &[branch_id, plate])?.into_iter().next())
    }

    async fn list_by_branch(&self, branch_id: &str) -> Result<Vec<Vehicle>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!(
            "SELECT {} FROM vehicles WHERE branch_id = ?1 AND deleted_at IS NULL ORDER BY plate",
            COLUMNS
        );
        Self::query(&conn, &sql, &[branch_id])
    }
}
