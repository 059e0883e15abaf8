mod branch_repository;
mod clock;
mod employee_repository;
mod finance_repository;
mod maintenance_label_repository;
mod salary_repository;
mod vacation_repository;
mod vehicle_repository;

pub use branch_repository::*;
pub use clock::*;
pub use employee_repository::*;
pub use finance_repository::*;
pub use maintenance_label_repository::*;
pub use salary_repository::*;
pub use vacation_repository::*;
pub use vehicle_repository::*;
