//! gate-axum: Axum adapter for mediagate.
//!
//! Exposes the gateway's HTTP surface: `PUT /` uploads, `GET /{id}.{ext}`
//! retrieval and CORS preflight on any path.

pub mod app;
pub mod cors;
pub mod middlewares;
pub mod path;
pub mod routes;
pub mod state;
mod error;
pub use error::{gate_error_from_blob, GateAxumError};
pub use state::{GateState, LinkConfig};

pub use app::{gateway, GateApp};
pub use cors::{OriginPolicy, ReflectOrigin};
pub use path::BlobPath;
