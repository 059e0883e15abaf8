pub mod container;
pub mod controller;
pub mod router;

pub use container::{
    Container, ContainerConfig, DATABASE_FILE, DEFAULT_COMPANY_ID, DEFAULT_MAX_VACATION_DAYS,
    DEFAULT_PAYABLE_DUE_DAYS,
};
pub use router::Router;
