use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use duckdb::Connection;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::domain::{parse_date, DomainError};

/// One DuckDB connection shared by every adapter; DuckDB allows a single
/// writer per database file.
pub type SharedConnection = Arc<Mutex<Connection>>;

pub fn open_database(db_path: &Path) -> Result<SharedConnection, DomainError> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::storage(format!("Failed to open DuckDB database: {}", e)))?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub(crate) fn decimal_column(raw: &str, column: &str) -> Result<Decimal, DomainError> {
    Decimal::from_str(raw).map_err(|e| {
        DomainError::storage(format!("Corrupt decimal in {}: {} ({})", column, raw, e))
    })
}

pub(crate) fn date_column(raw: &str, column: &str) -> Result<NaiveDate, DomainError> {
    parse_date(raw)
        .ok_or_else(|| DomainError::storage(format!("Corrupt date in {}: {}", column, raw)))
}
