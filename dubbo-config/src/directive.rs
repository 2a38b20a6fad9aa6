//! Imports values from a declarative directive (the annotation form of a
//! configuration) onto a configuration object's matching setters.
//!
//! Import is best-effort: members the target type does not support are
//! silently skipped, and any other per-member failure is logged without
//! aborting the remaining members.

use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::schema::Configurable;
use crate::value::{PropertyKind, PropertyValue};

/// A value carried by a directive member.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Strings(Vec<String>),
}

/// One member of a directive instance: its name, the value the caller
/// supplied, and the member's declared default.
#[derive(Debug, Clone)]
pub struct DirectiveMember {
    pub name: &'static str,
    pub value: DirectiveValue,
    pub default: DirectiveValue,
}

impl DirectiveMember {
    pub fn new(name: &'static str, value: DirectiveValue, default: DirectiveValue) -> Self {
        DirectiveMember {
            name,
            value,
            default,
        }
    }
}

/// A declarative configuration directive.
pub trait Directive {
    fn members(&self) -> Vec<DirectiveMember>;
}

/// Copy a directive's non-default members onto `config`.
///
/// Member-name synonyms `interfaceClass` and `interfaceName` both target
/// the `interface` field. A `filter` or `listener` string array is joined
/// with commas into a single value; a `parameters` string array is read as
/// alternating key/value pairs and installed as the extension map.
pub fn apply_directive<C: Configurable + 'static>(config: &mut C, directive: &dyn Directive) {
    for member in directive.members() {
        if member.value == member.default {
            continue;
        }
        let property = match member.name {
            "interfaceClass" | "interfaceName" => "interface",
            name => name,
        };

        if property == "parameters" {
            let DirectiveValue::Strings(pairs) = &member.value else {
                tracing::warn!(
                    member = member.name,
                    "Directive parameters member is not a string array; skipping"
                );
                continue;
            };
            match pairs_to_map(pairs) {
                Ok(map) => {
                    if let Err(err) = config.set_extensions(map) {
                        tracing::warn!(member = member.name, %err, "Cannot install extension map");
                    }
                }
                Err(err) => {
                    tracing::warn!(member = member.name, %err, "Malformed parameters member");
                }
            }
            continue;
        }

        let value = match (&member.value, property) {
            (DirectiveValue::Strings(items), "filter" | "listener") => {
                DirectiveValue::String(items.join(","))
            }
            (value, _) => value.clone(),
        };

        // The target type does not support this member: skip silently.
        let Some((field, setter)) = C::fields()
            .iter()
            .filter(|field| field.name == property)
            .find_map(|field| field.set.map(|setter| (field, setter)))
        else {
            continue;
        };

        match convert(value, field.kind, property) {
            Ok(converted) => {
                if let Err(err) = setter(config, converted) {
                    tracing::warn!(member = member.name, %err, "Directive value rejected by setter");
                }
            }
            Err(err) => {
                tracing::warn!(member = member.name, %err, "Cannot convert directive value");
            }
        }
    }
}

fn pairs_to_map(pairs: &[String]) -> Result<IndexMap<String, String>, ConfigError> {
    if pairs.len() % 2 != 0 {
        return Err(ConfigError::Invalid {
            property: "parameters".to_string(),
            value: pairs.join(","),
            constraint: "expects an even number of key/value entries".to_string(),
        });
    }
    let mut map = IndexMap::new();
    for pair in pairs.chunks(2) {
        map.insert(pair[0].clone(), pair[1].clone());
    }
    Ok(map)
}

fn convert(
    value: DirectiveValue,
    kind: PropertyKind,
    property: &str,
) -> Result<PropertyValue, ConfigError> {
    match (value, kind) {
        (DirectiveValue::Bool(b), PropertyKind::Bool) => Ok(PropertyValue::Bool(b)),
        (DirectiveValue::Int(i), PropertyKind::Int) => Ok(PropertyValue::Int(i)),
        (DirectiveValue::Int(i), PropertyKind::Float) => Ok(PropertyValue::Float(i as f64)),
        (DirectiveValue::Float(x), PropertyKind::Float) => Ok(PropertyValue::Float(x)),
        (DirectiveValue::String(s), kind) => kind.parse(property, &s),
        (_, kind) => Err(ConfigError::TypeMismatch {
            property: property.to_string(),
            expected: kind.name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::MethodConfig;

    struct MethodDirective {
        name: &'static str,
        retries: i64,
        sticky: bool,
        parameters: Vec<String>,
    }

    impl Directive for MethodDirective {
        fn members(&self) -> Vec<DirectiveMember> {
            vec![
                DirectiveMember::new(
                    "name",
                    DirectiveValue::String(self.name.to_string()),
                    DirectiveValue::String(String::new()),
                ),
                DirectiveMember::new(
                    "retries",
                    DirectiveValue::Int(self.retries),
                    DirectiveValue::Int(2),
                ),
                DirectiveMember::new(
                    "sticky",
                    DirectiveValue::Bool(self.sticky),
                    DirectiveValue::Bool(false),
                ),
                DirectiveMember::new(
                    "parameters",
                    DirectiveValue::Strings(self.parameters.clone()),
                    DirectiveValue::Strings(Vec::new()),
                ),
                // A member the method schema has no setter for.
                DirectiveMember::new(
                    "cluster",
                    DirectiveValue::String("failover".to_string()),
                    DirectiveValue::String(String::new()),
                ),
            ]
        }
    }

    #[test]
    fn non_default_members_are_copied() {
        let mut method = MethodConfig::new();
        apply_directive(
            &mut method,
            &MethodDirective {
                name: "findUser",
                retries: 5,
                sticky: true,
                parameters: vec!["token".to_string(), "abc".to_string()],
            },
        );
        assert_eq!(method.name(), Some("findUser"));
        assert_eq!(method.retries(), Some(5));
        assert_eq!(method.sticky(), Some(true));
        assert_eq!(
            method.parameters().unwrap().get("token").map(String::as_str),
            Some("abc")
        );
    }

    #[test]
    fn default_members_are_skipped() {
        let mut method = MethodConfig::new();
        apply_directive(
            &mut method,
            &MethodDirective {
                name: "findUser",
                retries: 2, // equals the declared default
                sticky: false,
                parameters: Vec::new(),
            },
        );
        assert_eq!(method.retries(), None);
        assert_eq!(method.sticky(), None);
    }

    #[test]
    fn odd_parameter_pairs_are_dropped() {
        let mut method = MethodConfig::new();
        apply_directive(
            &mut method,
            &MethodDirective {
                name: "findUser",
                retries: 2,
                sticky: false,
                parameters: vec!["orphan".to_string()],
            },
        );
        assert!(method.parameters().is_none());
    }
}
