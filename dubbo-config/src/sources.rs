//! Key-value sources consulted during property resolution.
//!
//! Two kinds of source back the resolver: environment-level overrides and
//! persisted property files. Both are synchronous, side-effect-free reads
//! behind the same [`PropertySource`] contract, so tests can substitute an
//! in-memory map for either.

use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;

/// A flat key -> string lookup.
pub trait PropertySource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Process-environment override source.
///
/// Checks the exact key first, then the conventional environment spelling:
/// `dubbo.registry.address` <-> `DUBBO_REGISTRY_ADDRESS`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvOverrides;

impl PropertySource for EnvOverrides {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().or_else(|| {
            let upper = key.replace(['.', '-'], "_").to_uppercase();
            std::env::var(upper).ok()
        })
    }
}

/// In-memory source for programmatic overrides and tests.
#[derive(Debug, Default, Clone)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl PropertySource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Persisted property store loaded from a YAML file flattened into
/// dot-separated keys.
///
/// ```yaml
/// dubbo:
///   registry:
///     address: zookeeper://127.0.0.1:2181
/// ```
///
/// yields `dubbo.registry.address`. Scalar list entries are joined with
/// commas, matching the multi-value name convention.
#[derive(Debug, Default, Clone)]
pub struct PropertyFile {
    values: HashMap<String, String>,
}

impl PropertyFile {
    /// Load a property file. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Load(e.to_string()))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;
        let mut values = HashMap::new();
        flatten_yaml("", &yaml, &mut values);
        Ok(PropertyFile { values })
    }
}

impl PropertySource for PropertyFile {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Flatten a YAML tree into dot-separated string keys.
fn flatten_yaml(prefix: &str, value: &serde_yaml::Value, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key_str = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    other => format!("{other:?}"),
                };
                let full_key = if prefix.is_empty() {
                    key_str
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(&full_key, v, out);
            }
        }
        serde_yaml::Value::Sequence(seq) => {
            if !prefix.is_empty() {
                let joined: Vec<String> = seq.iter().filter_map(scalar_to_string).collect();
                if !joined.is_empty() {
                    out.insert(prefix.to_string(), joined.join(","));
                }
            }
        }
        leaf => {
            if !prefix.is_empty() {
                if let Some(s) = scalar_to_string(leaf) {
                    out.insert(prefix.to_string(), s);
                }
            }
        }
    }
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
