mod create_maintenance_label;
mod maintenance_due;
mod manage_branches;
mod manage_employees;
mod manage_payables;
mod manage_receivables;
mod manage_vacations;
mod manage_vehicles;
mod process_salaries;

pub use create_maintenance_label::*;
pub use maintenance_due::*;
pub use manage_branches::*;
pub use manage_employees::*;
pub use manage_payables::*;
pub use manage_receivables::*;
pub use manage_vacations::*;
pub use manage_vehicles::*;
pub use process_salaries::*;
