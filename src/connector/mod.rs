//! # Connector Layer
//!
//! External integrations implementing application ports:
//! - Storage (DuckDB file, or in-memory maps)
//! - Clock (system time, or a fixed date for tests)
//! - Delivery: CLI controllers and the HTTP API

pub mod adapter;
pub mod api;
pub mod http;

pub use adapter::*;
pub use api::{Container, ContainerConfig, Router};
pub use http::serve;
