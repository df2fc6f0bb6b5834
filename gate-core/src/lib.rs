//! gate-core: transport-agnostic core for mediagate.

pub mod config;
pub mod errors;

pub use config::{GateConfig, GateConfigSnapshot};
pub use errors::{ErrorKind, GateError};
