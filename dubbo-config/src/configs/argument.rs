use crate::error::ConfigError;
use crate::render::render_descriptor;
use crate::schema::{Configurable, FieldDef, FieldMeta};
use crate::validate::check_name;
use crate::value::{PropertyKind, PropertyValue};

/// Per-argument configuration for a method, matched either by position
/// (`index`) or by declared type name.
#[derive(Debug, Default, Clone)]
pub struct ArgumentConfig {
    id: Option<String>,
    /// Zero-based argument position.
    index: Option<i64>,
    /// Declared type name of the argument.
    arg_type: Option<String>,
    /// Whether the argument carries a callback reference.
    callback: Option<bool>,
}

impl ArgumentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: String) -> Result<(), ConfigError> {
        check_name("id", &id)?;
        self.id = Some(id);
        Ok(())
    }

    pub fn index(&self) -> Option<i64> {
        self.index
    }

    pub fn set_index(&mut self, index: i64) {
        self.index = Some(index);
    }

    pub fn arg_type(&self) -> Option<&str> {
        self.arg_type.as_deref()
    }

    pub fn set_type(&mut self, arg_type: String) {
        self.arg_type = Some(arg_type);
    }

    pub fn callback(&self) -> Option<bool> {
        self.callback
    }

    pub fn set_callback(&mut self, callback: bool) {
        self.callback = Some(callback);
    }
}

impl Configurable for ArgumentConfig {
    fn tag() -> &'static str {
        "argument"
    }

    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<ArgumentConfig>] = &[
            FieldDef {
                name: "id",
                kind: PropertyKind::String,
                meta: FieldMeta::new().excluded(),
                get: |c| c.id.clone().map(PropertyValue::String),
                set: Some(|c, v| c.set_id(v.into_string())),
                get_attr: None,
            },
            FieldDef {
                name: "index",
                kind: PropertyKind::Int,
                meta: FieldMeta::new().excluded(),
                get: |c| c.index.map(PropertyValue::Int),
                set: Some(|c, v| {
                    c.set_index(v.into_int("index")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "type",
                kind: PropertyKind::String,
                meta: FieldMeta::new().excluded(),
                get: |c| c.arg_type.clone().map(PropertyValue::String),
                set: Some(|c, v| {
                    c.set_type(v.into_string());
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "callback",
                kind: PropertyKind::Bool,
                meta: FieldMeta::new(),
                get: |c| c.callback.map(PropertyValue::Bool),
                set: Some(|c, v| {
                    c.set_callback(v.into_bool("callback")?);
                    Ok(())
                }),
                get_attr: None,
            },
        ];
        FIELDS
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl std::fmt::Display for ArgumentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render_descriptor(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::materialize;

    #[test]
    fn only_callback_reaches_the_parameter_map() {
        let mut argument = ArgumentConfig::new();
        argument.set_index(0);
        argument.set_type("java.lang.String".to_string());
        argument.set_callback(true);

        let parameters = materialize(&argument).unwrap();
        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters.get("callback").map(String::as_str), Some("true"));
    }
}
