pub mod config;
pub mod error;
pub mod quoting;
pub mod telemetry;
