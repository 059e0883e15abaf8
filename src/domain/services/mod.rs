//! Pure business rules with no storage access.

mod maintenance_schedule;
mod payroll_period;

pub use maintenance_schedule::*;
pub use payroll_period::*;
