//! # Configuration
//!
//! mediagate uses a minimal string key/value store. Keys are dotted
//! (`http.port`, `upload.max_bytes`) and every value is a string; typed
//! access goes through [`GateConfigSnapshot`].
//!
//! ## Setting and reading values
//! ```rust
//! use gate_core::GateConfig;
//! let mut config = GateConfig::new();
//!
//! config.set("http.port", "3030");
//! let snapshot = config.snapshot();
//! assert_eq!(snapshot.get("http.port"), Some("3030"));
//! assert_eq!(snapshot.get_parsed::<u16>("http.port"), Some(3030));
//! ```
//!
//! ## Environment overrides
//! [`GateConfig::load_env`] maps prefixed variables onto dotted keys:
//!
//! ```bash
//! export MEDIAGATE__UPLOAD__MAX_BYTES=1048576   # upload.max_bytes
//! ```

use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Default)]
pub struct GateConfig {
    values: HashMap<String, String>,
}

impl GateConfig {
    /// Create an empty config store.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Build a config from the process environment. See [`GateConfig::load_env`].
    pub fn from_env(prefix: &str) -> Self {
        let mut config = Self::new();
        config.load_env(prefix, std::env::vars());
        config
    }

    /// Load every `(key, value)` pair whose key starts with `prefix`.
    ///
    /// `MEDIAGATE__S3__ENDPOINT_URL` with prefix `MEDIAGATE__` becomes
    /// `s3.endpoint_url`.
    pub fn load_env<I>(&mut self, prefix: &str, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(prefix) {
                let normalized = stripped.to_lowercase().replace("__", ".");
                self.set(normalized, value);
            }
        }
    }

    /// Set a configuration key to a string value.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    pub fn snapshot(&self) -> GateConfigSnapshot {
        GateConfigSnapshot::new(self.values.clone())
    }
}

/// Immutable, typed view over a [`GateConfig`].
#[derive(Debug, Clone, Default)]
pub struct GateConfigSnapshot {
    map: HashMap<String, String>,
}

impl GateConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    /// Parse the trimmed value; `None` when missing or malformed.
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.trim().parse::<T>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn env_keys_are_normalized() {
        let mut config = GateConfig::new();
        config.load_env(
            "MEDIAGATE__",
            vars(&[
                ("MEDIAGATE__HTTP__PORT", "8080"),
                ("MEDIAGATE__S3__ENDPOINT_URL", "http://localhost:9000"),
                ("PATH", "/usr/bin"),
            ]),
        );

        let snap = config.snapshot();
        assert_eq!(snap.get("http.port"), Some("8080"));
        assert_eq!(snap.get("s3.endpoint_url"), Some("http://localhost:9000"));
        assert_eq!(snap.get("path"), None);
    }

    #[test]
    fn later_values_win() {
        let mut config = GateConfig::new();
        config.set("link.scheme", "https");
        config.set("link.scheme", "http");
        assert_eq!(config.snapshot().get("link.scheme"), Some("http"));
    }

    #[test]
    fn snapshot_parses_trimmed_values() {
        let mut config = GateConfig::new();
        config.set("upload.max_bytes", " 1024 ");
        config.set("http.port", "70000");
        config.set("broken", "12abc");

        let snap = config.snapshot();
        assert_eq!(snap.get_parsed::<u64>("upload.max_bytes"), Some(1024));
        assert_eq!(snap.get_parsed::<u16>("http.port"), None);
        assert_eq!(snap.get_parsed::<u64>("broken"), None);
        assert_eq!(snap.get_parsed::<u64>("missing"), None);
    }
}
