//! Flattens a resolved configuration object into the parameter and
//! attribute maps consumed by the connection-descriptor builder.
//!
//! Unlike resolution, materialization is strict: its output constitutes
//! the wire-visible service contract, so any failure aborts the whole
//! operation instead of being logged and skipped.

use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::extension::DEFAULT_KEY;
use crate::schema::{camel_to_dotted, Configurable};
use crate::value::AttributeValue;

/// Materialize a configuration object into a fresh ordered parameter map.
pub fn materialize<C: Configurable + 'static>(config: &C) -> Result<IndexMap<String, String>, ConfigError> {
    let mut parameters = IndexMap::new();
    append_parameters(&mut parameters, config, None)?;
    Ok(parameters)
}

/// Append a configuration object's parameters to `parameters`.
///
/// For every non-excluded field, in table order:
/// - key is the metadata override or the dot-separated derived name;
/// - an empty value fails if the field is required, otherwise it is
///   skipped;
/// - an `escaped` value is form-urlencoded;
/// - an `append` value is prepended with any prior `default.<key>` value,
///   then any prior `<key>` value, comma-separated;
/// - `prefix`, when supplied, is prepended to the final key.
///
/// The extension map, if any, is merged in afterwards with `-` replaced by
/// `.` in its keys, overwriting on collision.
pub fn append_parameters<C: Configurable + 'static>(
    parameters: &mut IndexMap<String, String>,
    config: &C,
    prefix: Option<&str>,
) -> Result<(), ConfigError> {
    for field in C::fields() {
        if field.meta.excluded {
            continue;
        }
        let key = match field.meta.key {
            Some(key) => key.to_string(),
            None => camel_to_dotted(field.name),
        };
        let rendered = (field.get)(config)
            .map(|value| value.to_string().trim().to_string())
            .unwrap_or_default();
        if rendered.is_empty() {
            if field.meta.required {
                return Err(ConfigError::MissingRequired {
                    owner: C::tag(),
                    key,
                });
            }
            continue;
        }

        let mut value = rendered;
        if field.meta.escaped {
            value = escape(&value);
        }
        if field.meta.append {
            let mut parts: Vec<String> = Vec::new();
            if let Some(prior) = parameters.get(&format!("{DEFAULT_KEY}.{key}")) {
                if !prior.is_empty() {
                    parts.push(prior.clone());
                }
            }
            if let Some(prior) = parameters.get(key.as_str()) {
                if !prior.is_empty() {
                    parts.push(prior.clone());
                }
            }
            parts.push(value);
            value = parts.join(",");
        }
        parameters.insert(prefixed(prefix, key), value);
    }

    if let Some(extensions) = config.extensions() {
        for (key, value) in extensions {
            parameters.insert(
                prefixed(prefix, key.replace('-', ".")),
                value.clone(),
            );
        }
    }
    Ok(())
}

/// Append a configuration object's attribute fields to `attributes`.
///
/// Only fields flagged as attributes are considered; the key is the
/// metadata override or the camelCase field name, and unset fields are
/// skipped. No escaping, accumulation, or required check applies.
pub fn append_attributes<C: Configurable + 'static>(
    attributes: &mut IndexMap<String, AttributeValue>,
    config: &C,
    prefix: Option<&str>,
) {
    for field in C::fields() {
        if !field.meta.attribute {
            continue;
        }
        let Some(get_attr) = field.get_attr else {
            continue;
        };
        let Some(value) = get_attr(config) else {
            continue;
        };
        let key = field
            .meta
            .key
            .map(str::to_string)
            .unwrap_or_else(|| field.name.to_string());
        attributes.insert(prefixed(prefix, key), value);
    }
}

fn prefixed(prefix: Option<&str>, key: String) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}.{key}"),
        _ => key,
    }
}

fn escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
