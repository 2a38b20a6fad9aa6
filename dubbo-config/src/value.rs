use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;

/// The primitive shape of a configuration field.
///
/// Drives string-to-value parsing during property resolution and directive
/// import. Collection-shaped fields (nested config lists, extension maps)
/// are handled outside the field tables and have no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Bool,
    Int,
    Float,
    Char,
    String,
}

impl PropertyKind {
    /// Human-readable type name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            PropertyKind::Bool => "bool",
            PropertyKind::Int => "i64",
            PropertyKind::Float => "f64",
            PropertyKind::Char => "char",
            PropertyKind::String => "String",
        }
    }

    /// Parse a raw string into a value of this kind.
    ///
    /// A character field takes the first code point of the string, or the
    /// null character when the string is empty. The other kinds use standard
    /// textual parsing.
    pub fn parse(&self, property: &str, raw: &str) -> Result<PropertyValue, ConfigError> {
        match self {
            PropertyKind::Bool => raw
                .parse::<bool>()
                .map(PropertyValue::Bool)
                .map_err(|_| self.mismatch(property)),
            PropertyKind::Int => raw
                .parse::<i64>()
                .map(PropertyValue::Int)
                .map_err(|_| self.mismatch(property)),
            PropertyKind::Float => raw
                .parse::<f64>()
                .map(PropertyValue::Float)
                .map_err(|_| self.mismatch(property)),
            PropertyKind::Char => Ok(PropertyValue::Char(raw.chars().next().unwrap_or('\0'))),
            PropertyKind::String => Ok(PropertyValue::String(raw.to_string())),
        }
    }

    fn mismatch(&self, property: &str) -> ConfigError {
        ConfigError::TypeMismatch {
            property: property.to_string(),
            expected: self.name(),
        }
    }
}

/// A boxed primitive field value.
///
/// `Option<PropertyValue>` is the unit of state in the field tables: `None`
/// means "unset", which is distinct from a legitimate `false` or `0`.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    String(String),
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Bool(_) => PropertyKind::Bool,
            PropertyValue::Int(_) => PropertyKind::Int,
            PropertyValue::Float(_) => PropertyKind::Float,
            PropertyValue::Char(_) => PropertyKind::Char,
            PropertyValue::String(_) => PropertyKind::String,
        }
    }

    /// Convert into a `String`, stringifying non-string values.
    pub fn into_string(self) -> String {
        match self {
            PropertyValue::String(s) => s,
            other => other.to_string(),
        }
    }

    pub fn into_bool(self, property: &str) -> Result<bool, ConfigError> {
        match self {
            PropertyValue::Bool(b) => Ok(b),
            PropertyValue::String(s) => match PropertyKind::Bool.parse(property, &s)? {
                PropertyValue::Bool(b) => Ok(b),
                _ => unreachable!(),
            },
            other => Err(other.reject(property, "bool")),
        }
    }

    pub fn into_int(self, property: &str) -> Result<i64, ConfigError> {
        match self {
            PropertyValue::Int(i) => Ok(i),
            PropertyValue::String(s) => match PropertyKind::Int.parse(property, &s)? {
                PropertyValue::Int(i) => Ok(i),
                _ => unreachable!(),
            },
            other => Err(other.reject(property, "i64")),
        }
    }

    pub fn into_float(self, property: &str) -> Result<f64, ConfigError> {
        match self {
            PropertyValue::Float(x) => Ok(x),
            PropertyValue::Int(i) => Ok(i as f64),
            PropertyValue::String(s) => match PropertyKind::Float.parse(property, &s)? {
                PropertyValue::Float(x) => Ok(x),
                _ => unreachable!(),
            },
            other => Err(other.reject(property, "f64")),
        }
    }

    pub fn into_char(self, property: &str) -> Result<char, ConfigError> {
        match self {
            PropertyValue::Char(c) => Ok(c),
            PropertyValue::String(s) => Ok(s.chars().next().unwrap_or('\0')),
            other => Err(other.reject(property, "char")),
        }
    }

    fn reject(self, property: &str, expected: &'static str) -> ConfigError {
        ConfigError::TypeMismatch {
            property: property.to_string(),
            expected,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Int(i) => write!(f, "{i}"),
            PropertyValue::Float(x) => write!(f, "{x}"),
            PropertyValue::Char(c) => write!(f, "{c}"),
            PropertyValue::String(s) => f.write_str(s),
        }
    }
}

/// A typed (non-stringifiable) attribute value, used for object-valued
/// callback references that cannot be embedded into an address query string.
#[derive(Clone)]
pub enum AttributeValue {
    String(String),
    Object(Arc<dyn Any + Send + Sync>),
}

impl AttributeValue {
    /// Wrap an arbitrary callback object.
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        AttributeValue::Object(Arc::new(value))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            AttributeValue::Object(_) => None,
        }
    }

    /// Downcast an object attribute to a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            AttributeValue::Object(obj) => obj.downcast_ref::<T>(),
            AttributeValue::String(_) => None,
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => f.debug_tuple("String").field(s).finish(),
            AttributeValue::Object(_) => f.write_str("Object(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool() {
        assert_eq!(
            PropertyKind::Bool.parse("check", "true").unwrap(),
            PropertyValue::Bool(true)
        );
        assert!(PropertyKind::Bool.parse("check", "yes!").is_err());
    }

    #[test]
    fn parse_char_takes_first_code_point() {
        assert_eq!(
            PropertyKind::Char.parse("sep", "abc").unwrap(),
            PropertyValue::Char('a')
        );
        assert_eq!(
            PropertyKind::Char.parse("sep", "").unwrap(),
            PropertyValue::Char('\0')
        );
    }

    #[test]
    fn parse_int_failure_names_the_property() {
        let err = PropertyKind::Int.parse("timeout", "fast").unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn attribute_downcast() {
        struct Callback;
        let attr = AttributeValue::object(Callback);
        assert!(attr.downcast_ref::<Callback>().is_some());
        assert!(attr.downcast_ref::<String>().is_none());
        assert!(attr.as_str().is_none());
    }
}
