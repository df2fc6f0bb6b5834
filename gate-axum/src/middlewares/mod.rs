mod version;

pub use version::{service_version_layer, SERVICE_VERSION};
