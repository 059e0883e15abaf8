mod branch;
mod employee;
mod finance;
mod maintenance;
mod salary;
mod time;
mod vacation;
mod vehicle;

pub use branch::*;
pub use employee::*;
pub use finance::*;
pub use maintenance::*;
pub use salary::*;
pub use time::*;
pub use vacation::*;
pub use vehicle::*;
