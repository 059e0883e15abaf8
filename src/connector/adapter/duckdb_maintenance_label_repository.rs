use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use duckdb::{params, Connection, Row};
use tracing::debug;

use super::duckdb_connection::{date_column, decimal_column, open_database, SharedConnection};
use crate::application::MaintenanceLabelRepository;
use crate::domain::{format_date, DomainError, MaintenanceLabel, ReplacementItem};

const LABEL_COLUMNS: &str =
    "id, vehicle_id, branch_id, performed_on, km_at_service, notes, account_payable_id, created_at";

struct LabelRow {
    id: String,
    vehicle_id: String,
    branch_id: String,
    performed_on: String,
    km_at_service: i64,
    notes: Option<String>,
    account_payable_id: Option<String>,
    created_at: i64,
}

impl LabelRow {
    fn read(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            vehicle_id: row.get(1)?,
            branch_id: row.get(2)?,
            performed_on: row.get(3)?,
            km_at_service: row.get(4)?,
            notes: row.get(5)?,
            account_payable_id: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn into_label(self, items: Vec<ReplacementItem>) -> Result<MaintenanceLabel, DomainError> {
        Ok(MaintenanceLabel::reconstitute(
            self.id,
            self.vehicle_id,
            self.branch_id,
            date_column(&self.performed_on, "maintenance_labels.performed_on")?,
            self.km_at_service,
            self.notes,
            items,
            self.account_payable_id,
            self.created_at,
        ))
    }
}

pub struct DuckdbMaintenanceLabelRepository {
    conn: SharedConnection,
}

impl DuckdbMaintenanceLabelRepository {
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
            CREATE TABLE IF NOT EXISTS maintenance_labels (
                id TEXT PRIMARY KEY,
                vehicle_id TEXT NOT NULL,
                branch_id TEXT NOT NULL,
                performed_on TEXT NOT NULL,
                km_at_service BIGINT NOT NULL,
                notes TEXT,
                account_payable_id TEXT,
                created_at BIGINT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS maintenance_items (
                label_id TEXT NOT NULL,
                position INTEGER NOT NULL,
                name TEXT NOT NULL,
                last_change_km BIGINT NOT NULL,
                replace_every_km BIGINT NOT NULL,
                cost TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_maintenance_items_label
            ON maintenance_items(label_id);

            CREATE INDEX IF NOT EXISTS idx_maintenance_labels_vehicle
            ON maintenance_labels(vehicle_id);
            "#,
        )
        .map_err(|e| {
            DomainError::storage(format!("Failed to initialize maintenance schema: {}", e))
        })?;

        debug!("DuckDB maintenance tables initialized");
        Ok(())
    }

    /// Items keyed by label id, in their stored order.
    fn load_items(
        conn: &Connection,
        where_clause: &str,
        arg: &str,
    ) -> Result<HashMap<String, Vec<ReplacementItem>>, DomainError> {
        let sql = format!(
            "SELECT i.label_id, i.name, i.last_change_km, i.replace_every_km, i.cost \
             FROM maintenance_items i JOIN maintenance_labels l ON l.id = i.label_id \
             WHERE {} ORDER BY i.label_id, i.position",
            where_clause
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params![arg], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })
            .map_err(|e| {
                DomainError::storage(format!("Failed to query maintenance items: {}", e))
            })?;

        let mut items: HashMap<String, Vec<ReplacementItem>> = HashMap::new();
        for row in rows {
            let (label_id, name, last_change_km, replace_every_km, cost) =
                row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?;
            items.entry(label_id).or_default().push(ReplacementItem::new(
                name,
                last_change_km,
                replace_every_km,
                decimal_column(&cost, "maintenance_items.cost")?,
            ));
        }
        Ok(items)
    }

    fn load_labels(
        conn: &Connection,
        where_clause: &str,
        arg: &str,
    ) -> Result<Vec<MaintenanceLabel>, DomainError> {
        let mut items = Self::load_items(conn, where_clause, arg)?;

        let sql = format!(
            "SELECT {} FROM maintenance_labels l WHERE {} \
             ORDER BY performed_on DESC, created_at DESC, id",
            LABEL_COLUMNS, where_clause
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params![arg], LabelRow::read)
            .map_err(|e| {
                DomainError::storage(format!("Failed to query maintenance labels: {}", e))
            })?;

        let mut labels = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?;
            let label_items = items.remove(&row.id).unwrap_or_default();
            labels.push(row.into_label(label_items)?);
        }
        Ok(labels)
    }
}

#[async_trait]
impl MaintenanceLabelRepository for DuckdbMaintenanceLabelRepository {
    async fn save(&self, label: &MaintenanceLabel) -> Result<(), DomainError> {
        let mut conn = self.conn.lock().await;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        tx.execute(
            "DELETE FROM maintenance_items WHERE label_id = ?1",
            params![label.id()],
        )
        .map_err(|e| DomainError::storage(format!("Failed to clear maintenance items: {}", e)))?;

        tx.execute(
            r#"
            INSERT INTO maintenance_labels
                (id, vehicle_id, branch_id, performed_on, km_at_service, notes,
                 account_payable_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT (id) DO UPDATE SET
                performed_on = excluded.performed_on,
                km_at_service = excluded.km_at_service,
                notes = excluded.notes,
                account_payable_id = excluded.account_payable_id
            "#,
            params![
                label.id(),
                label.vehicle_id(),
                label.branch_id(),
                format_date(label.performed_on()),
                label.km_at_service(),
                label.notes(),
                label.account_payable_id(),
                label.created_at(),
            ],
        )
        .map_err(|e| DomainError::storage(format!("Failed to save maintenance label: {}", e)))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO maintenance_items \
                     (label_id, position, name, last_change_km, replace_every_km, cost) \
                     VALUES (?, ?, ?, ?, ?, ?)",
                )
                .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

            for (position, item) in label.items().iter().enumerate() {
                stmt.execute(params![
                    label.id(),
                    position as i64,
                    item.name(),
                    item.last_change_km(),
                    item.replace_every_km(),
                    item.cost().to_string(),
                ])
                .map_err(|e| {
                    DomainError::storage(format!("Failed to save maintenance item: {}", e))
                })?;
            }
        }

        tx.commit()
            .map_err(|e| DomainError::storage(format!("Failed to commit: {}", e)))?;

        debug!(
            "Saved maintenance label {} with {} items to DuckDB",
            label.id(),
            label.items().len()
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MaintenanceLabel>, DomainError> {
        let conn = self.conn.lock().await;
        Ok(Self::load_labels(&conn, "l.id = ?1", id)?.into_iter().next())
    }

    async fn list_by_vehicle(
        &self,
        vehicle_id: &str,
    ) -> Result<Vec<MaintenanceLabel>, DomainError> {
        let conn = self.conn.lock().await;
        Self::load_labels(&conn, "l.vehicle_id = ?1", vehicle_id)
    }
}
