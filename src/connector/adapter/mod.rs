mod clock;
mod duckdb_branch_repository;
mod duckdb_connection;
mod duckdb_employee_repository;
mod duckdb_finance_repository;
mod duckdb_maintenance_label_repository;
mod duckdb_salary_repository;
mod duckdb_vacation_repository;
mod duckdb_vehicle_repository;
mod in_memory_repositories;

pub use clock::*;
pub use duckdb_branch_repository::*;
pub use duckdb_connection::{open_database, SharedConnection};
pub use duckdb_employee_repository::*;
pub use duckdb_finance_repository::*;
pub use duckdb_maintenance_label_repository::*;
pub use duckdb_salary_repository::*;
pub use duckdb_vacation_repository::*;
pub use duckdb_vehicle_repository::*;
pub use in_memory_repositories::*;
