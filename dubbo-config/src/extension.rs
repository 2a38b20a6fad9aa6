//! Extension-existence checks.
//!
//! The registry of pluggable implementations lives outside this engine; it
//! is consulted through [`ExtensionRegistry`] only to verify that a named
//! plugin exists before its name is accepted into a configuration object.

use std::collections::{HashMap, HashSet};

use crate::error::ConfigError;
use crate::validate::{check_multi_name, check_name};

/// Reserved key naming the default value of an accumulated parameter.
pub const DEFAULT_KEY: &str = "default";

/// Leading marker removing a default entry from a multi-value name.
pub const REMOVE_VALUE_PREFIX: char = '-';

/// Lookup contract for named, pluggable implementations of a capability
/// kind (e.g. `"filter"`, `"transporter"`).
pub trait ExtensionRegistry {
    fn has_extension(&self, kind: &str, name: &str) -> bool;
}

/// In-memory registry backed by per-kind name sets. Suitable for embedders
/// that register their plugin names up front, and for tests.
#[derive(Debug, Default)]
pub struct StaticExtensionRegistry {
    extensions: HashMap<String, HashSet<String>>,
}

impl StaticExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: &str, name: &str) -> &mut Self {
        self.extensions
            .entry(kind.to_string())
            .or_default()
            .insert(name.to_string());
        self
    }
}

impl ExtensionRegistry for StaticExtensionRegistry {
    fn has_extension(&self, kind: &str, name: &str) -> bool {
        self.extensions
            .get(kind)
            .is_some_and(|names| names.contains(name))
    }
}

/// Validate a single extension name and verify it is registered.
pub fn check_extension(
    registry: &dyn ExtensionRegistry,
    kind: &'static str,
    property: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_name(property, value)?;
    if !value.is_empty() && !registry.has_extension(kind, value) {
        return Err(ConfigError::UnknownExtension {
            property: property.to_string(),
            kind,
            name: value.to_string(),
        });
    }
    Ok(())
}

/// Validate a comma-separated list of extension names.
///
/// Each token is checked after stripping a leading removal marker; the
/// literal `default` token is always accepted. The first unregistered
/// token fails the whole check, naming that token.
pub fn check_multi_extension(
    registry: &dyn ExtensionRegistry,
    kind: &'static str,
    property: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_multi_name(property, value)?;
    for token in value.split(',') {
        let mut name = token.trim();
        if let Some(stripped) = name.strip_prefix(REMOVE_VALUE_PREFIX) {
            name = stripped;
        }
        if name.is_empty() || name == DEFAULT_KEY {
            continue;
        }
        if !registry.has_extension(kind, name) {
            return Err(ConfigError::UnknownExtension {
                property: property.to_string(),
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> StaticExtensionRegistry {
        let mut registry = StaticExtensionRegistry::new();
        registry.register("filter", "token").register("filter", "accesslog");
        registry
    }

    #[test]
    fn known_extension_passes() {
        assert!(check_extension(&registry(), "filter", "filter", "token").is_ok());
    }

    #[test]
    fn unknown_extension_fails_with_its_name() {
        let err = check_extension(&registry(), "filter", "filter", "nope").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn empty_value_is_accepted() {
        assert!(check_extension(&registry(), "filter", "filter", "").is_ok());
    }

    #[test]
    fn multi_extension_skips_default_and_removal_markers() {
        let r = registry();
        assert!(check_multi_extension(&r, "filter", "filter", "token,default,-accesslog").is_ok());
        let err =
            check_multi_extension(&r, "filter", "filter", "token,missing").unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn multi_extension_strips_marker_before_lookup() {
        // "-token" removes a registered default; still a known name.
        assert!(check_multi_extension(&registry(), "filter", "filter", "-token").is_ok());
        assert!(check_multi_extension(&registry(), "filter", "filter", "-gone").is_err());
    }
}
