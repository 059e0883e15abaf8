pub mod branch_controller;
pub mod employee_controller;
pub mod finance_controller;
pub mod maintenance_controller;
pub mod payroll_controller;
pub mod vacation_controller;
pub mod vehicle_controller;

pub use branch_controller::BranchController;
pub use employee_controller::EmployeeController;
pub use finance_controller::FinanceController;
pub use maintenance_controller::MaintenanceController;
pub use payroll_controller::PayrollController;
pub use vacation_controller::VacationController;
pub use vehicle_controller::VehicleController;
