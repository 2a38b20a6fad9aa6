//! Stateless pattern/length checks applied to field values before
//! acceptance.
//!
//! Every check is a no-op for empty values; setters call these before
//! storing, so an invalid value is rejected at the point it enters a
//! configuration object (strict policy).

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::ConfigError;

pub const MAX_LENGTH: usize = 200;
pub const MAX_PATH_LENGTH: usize = 200;

static PATTERN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\-._0-9a-zA-Z]+$").unwrap());

static PATTERN_MULTI_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[,\-._0-9a-zA-Z]+$").unwrap());

static PATTERN_METHOD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][0-9a-zA-Z]*$").unwrap());

static PATTERN_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[/\-$._0-9a-zA-Z]+$").unwrap());

static PATTERN_NAME_HAS_SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[:*,/\-._0-9a-zA-Z]+$").unwrap());

static PATTERN_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*,\-._0-9a-zA-Z]+$").unwrap());

/// Check a property value against a length limit and an optional pattern.
///
/// Empty values pass unconditionally; absence is not an error at this
/// layer (required-ness is a materialization-time concern).
pub fn check_property(
    property: &str,
    value: &str,
    max_length: usize,
    pattern: Option<&Regex>,
) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Ok(());
    }
    if value.chars().count() > max_length {
        return Err(ConfigError::Invalid {
            property: property.to_string(),
            value: value.to_string(),
            constraint: format!("longer than {max_length} characters"),
        });
    }
    if let Some(pattern) = pattern {
        if !pattern.is_match(value) {
            return Err(ConfigError::Invalid {
                property: property.to_string(),
                value: value.to_string(),
                constraint: format!(
                    "contains illegal character, allowed characters match {}",
                    pattern.as_str()
                ),
            });
        }
    }
    Ok(())
}

/// Generic name: digits, letters, `-`, `_`, `.`.
pub fn check_name(property: &str, value: &str) -> Result<(), ConfigError> {
    check_property(property, value, MAX_LENGTH, Some(&PATTERN_NAME))
}

/// Comma-separated variant of [`check_name`].
pub fn check_multi_name(property: &str, value: &str) -> Result<(), ConfigError> {
    check_property(property, value, MAX_LENGTH, Some(&PATTERN_MULTI_NAME))
}

/// Method name: a letter followed by letters/digits.
pub fn check_method_name(property: &str, value: &str) -> Result<(), ConfigError> {
    check_property(property, value, MAX_LENGTH, Some(&PATTERN_METHOD_NAME))
}

/// Filesystem path: name characters plus `/` and `$`.
pub fn check_path_name(property: &str, value: &str) -> Result<(), ConfigError> {
    check_property(property, value, MAX_PATH_LENGTH, Some(&PATTERN_PATH))
}

/// Name allowing the routing symbols `:`, `*`, `,`, `/`.
pub fn check_name_has_symbol(property: &str, value: &str) -> Result<(), ConfigError> {
    check_property(property, value, MAX_LENGTH, Some(&PATTERN_NAME_HAS_SYMBOL))
}

/// Parameter key: name characters plus `*` and `,`.
pub fn check_key(property: &str, value: &str) -> Result<(), ConfigError> {
    check_property(property, value, MAX_LENGTH, Some(&PATTERN_KEY))
}

/// Length-only check.
pub fn check_length(property: &str, value: &str) -> Result<(), ConfigError> {
    check_property(property, value, MAX_LENGTH, None)
}

/// Length-only check with the path limit.
pub fn check_path_length(property: &str, value: &str) -> Result<(), ConfigError> {
    check_property(property, value, MAX_PATH_LENGTH, None)
}

/// Check every entry of a free-form extension map.
pub fn check_parameter_name(parameters: &IndexMap<String, String>) -> Result<(), ConfigError> {
    for (key, value) in parameters {
        check_name_has_symbol(key, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_accepts_letters_digits_and_separators() {
        assert!(check_name("name", "abc-DEF.1").is_ok());
    }

    #[test]
    fn name_rejects_slash() {
        let err = check_name("name", "abc/def").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("name"));
        assert!(msg.contains("abc/def"));
    }

    #[test]
    fn name_rejects_over_max_length() {
        let long = "x".repeat(MAX_LENGTH + 1);
        let err = check_name("name", &long).unwrap_err();
        assert!(err.to_string().contains("longer than 200"));
    }

    #[test]
    fn empty_value_always_passes() {
        assert!(check_name("name", "").is_ok());
        assert!(check_method_name("method", "").is_ok());
    }

    #[test]
    fn method_name_must_start_with_a_letter() {
        assert!(check_method_name("name", "findAll2").is_ok());
        assert!(check_method_name("name", "2find").is_err());
        assert!(check_method_name("name", "find_all").is_err());
    }

    #[test]
    fn path_allows_slash_and_dollar() {
        assert!(check_path_name("file", "/var/cache/$registry.cache").is_ok());
        assert!(check_path_name("file", "a b").is_err());
    }

    #[test]
    fn multi_name_allows_commas() {
        assert!(check_multi_name("filter", "token,accesslog").is_ok());
        assert!(check_name("filter", "token,accesslog").is_err());
    }

    #[test]
    fn parameter_map_entries_are_checked() {
        let mut params = IndexMap::new();
        params.insert("route".to_string(), "a:b,c/*".to_string());
        assert!(check_parameter_name(&params).is_ok());
        params.insert("bad".to_string(), "white space".to_string());
        assert!(check_parameter_name(&params).is_err());
    }
}
