//! # Domain Layer
//!
//! Entities, value types and the pure business rules of the back office.
//! This layer is independent of storage and transport.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
