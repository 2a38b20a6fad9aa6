use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::value::{AttributeValue, PropertyKind, PropertyValue};

/// Materialization metadata for a single schema field.
///
/// This is the compile-time replacement for per-getter runtime annotations:
/// each flag changes how (or whether) the field surfaces in the parameter
/// map built for the connection address.
#[derive(Debug, Clone, Copy)]
pub struct FieldMeta {
    /// Parameter-key override. When absent, the key is derived from the
    /// field name (dot-separated for parameters, camelCase for attributes).
    pub key: Option<&'static str>,
    /// Never materialized into the parameter map.
    pub excluded: bool,
    /// Materialization fails if the field is still empty after resolution.
    pub required: bool,
    /// Value is form-urlencoded on materialization.
    pub escaped: bool,
    /// Value is comma-concatenated with prior values already present under
    /// the `default.`-scoped and unscoped forms of the same key.
    pub append: bool,
    /// Field is surfaced through the attribute materializer.
    pub attribute: bool,
}

impl FieldMeta {
    pub const fn new() -> Self {
        FieldMeta {
            key: None,
            excluded: false,
            required: false,
            escaped: false,
            append: false,
            attribute: false,
        }
    }

    pub const fn key(mut self, key: &'static str) -> Self {
        self.key = Some(key);
        self
    }

    pub const fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn escaped(mut self) -> Self {
        self.escaped = true;
        self
    }

    pub const fn append(mut self) -> Self {
        self.append = true;
        self
    }

    pub const fn attribute(mut self) -> Self {
        self.attribute = true;
        self
    }
}

impl Default for FieldMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// One row of a configuration type's static field table.
///
/// The table replaces getter/setter reflection: an ordered list of
/// `(name, kind, metadata, accessor, mutator)` tuples declared once per
/// type. Table order is the discovery order used by resolution,
/// materialization, and rendering.
pub struct FieldDef<C> {
    /// Field name in lower camel case (e.g. `"onreturnMethod"`).
    pub name: &'static str,
    pub kind: PropertyKind,
    pub meta: FieldMeta,
    /// Read the current value; `None` means the field is unset.
    pub get: fn(&C) -> Option<PropertyValue>,
    /// Assign a resolved value through the type's validating setter.
    /// `None` marks a read-only field that resolution must not touch.
    pub set: Option<fn(&mut C, PropertyValue) -> Result<(), ConfigError>>,
    /// Typed accessor for attribute fields (callback references).
    pub get_attr: Option<fn(&C) -> Option<AttributeValue>>,
}

/// A declarative configuration object with a static field schema.
///
/// Implementors are plain data holders; all resolution and materialization
/// logic lives in the engine and is driven entirely by [`FieldDef`] tables.
pub trait Configurable {
    /// Lower-cased tag grouping all override keys for this kind
    /// (e.g. `"registry"` -> `dubbo.registry.*`).
    fn tag() -> &'static str
    where
        Self: Sized;

    /// The ordered field table.
    fn fields() -> &'static [FieldDef<Self>]
    where
        Self: Sized;

    /// Optional identifier scoping environment/property lookups and
    /// distinguishing multiple instances of the same kind.
    fn id(&self) -> Option<&str>;

    /// The free-form string-to-string extension map, if this kind carries
    /// one. Entries are merged into the parameter map after the schema
    /// fields, overwriting on key collision.
    fn extensions(&self) -> Option<&IndexMap<String, String>> {
        None
    }

    /// Replace the extension map. The default implementation ignores the
    /// call, so kinds without an extension map silently skip directive
    /// members targeting it.
    fn set_extensions(&mut self, parameters: IndexMap<String, String>) -> Result<(), ConfigError> {
        let _ = parameters;
        Ok(())
    }
}

/// Split a camelCase field name into a dot-separated property name
/// (`"requestTimeout"` -> `"request.timeout"`).
pub fn camel_to_dotted(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('.');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
