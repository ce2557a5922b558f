//! Infrastructure layer: production implementations of the application
//! ports.

pub mod config;
pub mod http;
pub mod telemetry;
