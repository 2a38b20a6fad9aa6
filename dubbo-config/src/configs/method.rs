use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::render::render_descriptor;
use crate::schema::{Configurable, FieldDef, FieldMeta};
use crate::validate::{check_method_name, check_multi_name, check_name, check_parameter_name};
use crate::value::{AttributeValue, PropertyKind, PropertyValue};

use super::ArgumentConfig;

/// Method-level configuration.
///
/// The method name doubles as the instance identifier when no id was set,
/// and becomes the key prefix when the method's parameters are merged into
/// a service-level map. The async-call hooks (`oninvoke`, `onreturn`,
/// `onthrow`) are object-valued callback references surfaced through the
/// attribute materializer, never through the parameter map.
#[derive(Debug, Default, Clone)]
pub struct MethodConfig {
    id: Option<String>,
    /// Method name.
    name: Option<String>,
    /// Invocation timeout in milliseconds.
    timeout: Option<i64>,
    /// Retry count for failed invocations.
    retries: Option<i64>,
    /// Load-balancing strategy name.
    loadbalance: Option<String>,
    /// Whether the method is invoked asynchronously.
    is_async: Option<bool>,
    /// Maximum concurrent invocations.
    actives: Option<i64>,
    /// Maximum threads serving this method on the provider side.
    executes: Option<i64>,
    deprecated: Option<bool>,
    /// Pin all invocations of this method to one provider.
    sticky: Option<bool>,
    /// Whether an async invocation produces a return value.
    returned: Option<bool>,
    /// Callback invoked before an async call.
    oninvoke: Option<AttributeValue>,
    oninvoke_method: Option<String>,
    /// Callback invoked when an async call returns.
    onreturn: Option<AttributeValue>,
    onreturn_method: Option<String>,
    /// Callback invoked when an async call throws.
    onthrow: Option<AttributeValue>,
    onthrow_method: Option<String>,
    /// Per-argument configuration.
    arguments: Option<Vec<ArgumentConfig>>,
    /// Free-form extension parameters.
    parameters: Option<IndexMap<String, String>>,
}

impl MethodConfig {
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

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the method name. The name also becomes the identifier when no
    /// id was set, so scoped override keys work per method out of the box.
    pub fn set_name(&mut self, name: String) -> Result<(), ConfigError> {
        check_method_name("name", &name)?;
        if self.id.is_none() {
            self.id = Some(name.clone());
        }
        self.name = Some(name);
        Ok(())
    }

    pub fn timeout(&self) -> Option<i64> {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: i64) {
        self.timeout = Some(timeout);
    }

    pub fn retries(&self) -> Option<i64> {
        self.retries
    }

    pub fn set_retries(&mut self, retries: i64) {
        self.retries = Some(retries);
    }

    pub fn loadbalance(&self) -> Option<&str> {
        self.loadbalance.as_deref()
    }

    pub fn set_loadbalance(&mut self, loadbalance: String) -> Result<(), ConfigError> {
        check_multi_name("loadbalance", &loadbalance)?;
        self.loadbalance = Some(loadbalance);
        Ok(())
    }

    pub fn is_async(&self) -> Option<bool> {
        self.is_async
    }

    pub fn set_async(&mut self, is_async: bool) {
        self.is_async = Some(is_async);
    }

    pub fn actives(&self) -> Option<i64> {
        self.actives
    }

    pub fn set_actives(&mut self, actives: i64) {
        self.actives = Some(actives);
    }

    pub fn executes(&self) -> Option<i64> {
        self.executes
    }

    pub fn set_executes(&mut self, executes: i64) {
        self.executes = Some(executes);
    }

    pub fn deprecated(&self) -> Option<bool> {
        self.deprecated
    }

    pub fn set_deprecated(&mut self, deprecated: bool) {
        self.deprecated = Some(deprecated);
    }

    pub fn sticky(&self) -> Option<bool> {
        self.sticky
    }

    pub fn set_sticky(&mut self, sticky: bool) {
        self.sticky = Some(sticky);
    }

    pub fn returned(&self) -> Option<bool> {
        self.returned
    }

    pub fn set_return(&mut self, returned: bool) {
        self.returned = Some(returned);
    }

    pub fn oninvoke(&self) -> Option<&AttributeValue> {
        self.oninvoke.as_ref()
    }

    pub fn set_oninvoke(&mut self, callback: AttributeValue) {
        self.oninvoke = Some(callback);
    }

    pub fn oninvoke_method(&self) -> Option<&str> {
        self.oninvoke_method.as_deref()
    }

    pub fn set_oninvoke_method(&mut self, method: String) {
        self.oninvoke_method = Some(method);
    }

    pub fn onreturn(&self) -> Option<&AttributeValue> {
        self.onreturn.as_ref()
    }

    pub fn set_onreturn(&mut self, callback: AttributeValue) {
        self.onreturn = Some(callback);
    }

    pub fn onreturn_method(&self) -> Option<&str> {
        self.onreturn_method.as_deref()
    }

    pub fn set_onreturn_method(&mut self, method: String) {
        self.onreturn_method = Some(method);
    }

    pub fn onthrow(&self) -> Option<&AttributeValue> {
        self.onthrow.as_ref()
    }

    pub fn set_onthrow(&mut self, callback: AttributeValue) {
        self.onthrow = Some(callback);
    }

    pub fn onthrow_method(&self) -> Option<&str> {
        self.onthrow_method.as_deref()
    }

    pub fn set_onthrow_method(&mut self, method: String) {
        self.onthrow_method = Some(method);
    }

    pub fn arguments(&self) -> Option<&[ArgumentConfig]> {
        self.arguments.as_deref()
    }

    pub fn set_arguments(&mut self, arguments: Vec<ArgumentConfig>) {
        self.arguments = Some(arguments);
    }

    pub fn parameters(&self) -> Option<&IndexMap<String, String>> {
        self.parameters.as_ref()
    }

    pub fn set_parameters(
        &mut self,
        parameters: IndexMap<String, String>,
    ) -> Result<(), ConfigError> {
        check_parameter_name(&parameters)?;
        self.parameters = Some(parameters);
        Ok(())
    }
}

impl Configurable for MethodConfig {
    fn tag() -> &'static str {
        "method"
    }

    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<MethodConfig>] = &[
            FieldDef {
                name: "id",
                kind: PropertyKind::String,
                meta: FieldMeta::new().excluded(),
                get: |c| c.id.clone().map(PropertyValue::String),
                set: Some(|c, v| c.set_id(v.into_string())),
                get_attr: None,
            },
            FieldDef {
                name: "name",
                kind: PropertyKind::String,
                meta: FieldMeta::new().excluded(),
                get: |c| c.name.clone().map(PropertyValue::String),
                set: Some(|c, v| c.set_name(v.into_string())),
                get_attr: None,
            },
            FieldDef {
                name: "timeout",
                kind: PropertyKind::Int,
                meta: FieldMeta::new(),
                get: |c| c.timeout.map(PropertyValue::Int),
                set: Some(|c, v| {
                    c.set_timeout(v.into_int("timeout")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "retries",
                kind: PropertyKind::Int,
                meta: FieldMeta::new(),
                get: |c| c.retries.map(PropertyValue::Int),
                set: Some(|c, v| {
                    c.set_retries(v.into_int("retries")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "loadbalance",
                kind: PropertyKind::String,
                meta: FieldMeta::new(),
                get: |c| c.loadbalance.clone().map(PropertyValue::String),
                set: Some(|c, v| c.set_loadbalance(v.into_string())),
                get_attr: None,
            },
            FieldDef {
                name: "async",
                kind: PropertyKind::Bool,
                meta: FieldMeta::new(),
                get: |c| c.is_async.map(PropertyValue::Bool),
                set: Some(|c, v| {
                    c.set_async(v.into_bool("async")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "actives",
                kind: PropertyKind::Int,
                meta: FieldMeta::new(),
                get: |c| c.actives.map(PropertyValue::Int),
                set: Some(|c, v| {
                    c.set_actives(v.into_int("actives")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "executes",
                kind: PropertyKind::Int,
                meta: FieldMeta::new(),
                get: |c| c.executes.map(PropertyValue::Int),
                set: Some(|c, v| {
                    c.set_executes(v.into_int("executes")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "deprecated",
                kind: PropertyKind::Bool,
                meta: FieldMeta::new(),
                get: |c| c.deprecated.map(PropertyValue::Bool),
                set: Some(|c, v| {
                    c.set_deprecated(v.into_bool("deprecated")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "sticky",
                kind: PropertyKind::Bool,
                meta: FieldMeta::new(),
                get: |c| c.sticky.map(PropertyValue::Bool),
                set: Some(|c, v| {
                    c.set_sticky(v.into_bool("sticky")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "return",
                kind: PropertyKind::Bool,
                meta: FieldMeta::new(),
                get: |c| c.returned.map(PropertyValue::Bool),
                set: Some(|c, v| {
                    c.set_return(v.into_bool("return")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "oninvoke",
                kind: PropertyKind::String,
                meta: FieldMeta::new().key("oninvoke.instance").excluded().attribute(),
                get: |_| None,
                set: None,
                get_attr: Some(|c| c.oninvoke.clone()),
            },
            FieldDef {
                name: "oninvokeMethod",
                kind: PropertyKind::String,
                meta: FieldMeta::new().key("oninvoke.method").excluded().attribute(),
                get: |c| c.oninvoke_method.clone().map(PropertyValue::String),
                set: Some(|c, v| {
                    c.set_oninvoke_method(v.into_string());
                    Ok(())
                }),
                get_attr: Some(|c| c.oninvoke_method.clone().map(AttributeValue::String)),
            },
            FieldDef {
                name: "onreturn",
                kind: PropertyKind::String,
                meta: FieldMeta::new().key("onreturn.instance").excluded().attribute(),
                get: |_| None,
                set: None,
                get_attr: Some(|c| c.onreturn.clone()),
            },
            FieldDef {
                name: "onreturnMethod",
                kind: PropertyKind::String,
                meta: FieldMeta::new().key("onreturn.method").excluded().attribute(),
                get: |c| c.onreturn_method.clone().map(PropertyValue::String),
                set: Some(|c, v| {
                    c.set_onreturn_method(v.into_string());
                    Ok(())
                }),
                get_attr: Some(|c| c.onreturn_method.clone().map(AttributeValue::String)),
            },
            FieldDef {
                name: "onthrow",
                kind: PropertyKind::String,
                meta: FieldMeta::new().key("onthrow.instance").excluded().attribute(),
                get: |_| None,
                set: None,
                get_attr: Some(|c| c.onthrow.clone()),
            },
            FieldDef {
                name: "onthrowMethod",
                kind: PropertyKind::String,
                meta: FieldMeta::new().key("onthrow.method").excluded().attribute(),
                get: |c| c.onthrow_method.clone().map(PropertyValue::String),
                set: Some(|c, v| {
                    c.set_onthrow_method(v.into_string());
                    Ok(())
                }),
                get_attr: Some(|c| c.onthrow_method.clone().map(AttributeValue::String)),
            },
        ];
        FIELDS
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extensions(&self) -> Option<&IndexMap<String, String>> {
        self.parameters.as_ref()
    }

    fn set_extensions(&mut self, parameters: IndexMap<String, String>) -> Result<(), ConfigError> {
        self.set_parameters(parameters)
    }
}

impl std::fmt::Display for MethodConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render_descriptor(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{append_attributes, materialize};
    use indexmap::IndexMap as Map;

    #[test]
    fn name_doubles_as_id() {
        let mut method = MethodConfig::new();
        method.set_name("findUser".to_string()).unwrap();
        assert_eq!(method.id(), Some("findUser"));

        let mut explicit = MethodConfig::new();
        explicit.set_id("custom".to_string()).unwrap();
        explicit.set_name("findUser".to_string()).unwrap();
        assert_eq!(explicit.id(), Some("custom"));
    }

    #[test]
    fn id_follows_the_name_pattern() {
        let mut method = MethodConfig::new();
        assert!(method.set_id("find,list".to_string()).is_err());
        assert_eq!(method.id(), None);
        assert!(method.set_id("find-user.v2".to_string()).is_ok());
    }

    #[test]
    fn method_name_is_validated() {
        let mut method = MethodConfig::new();
        assert!(method.set_name("find-user".to_string()).is_err());
        assert!(method.set_name("2find".to_string()).is_err());
        assert!(method.set_name("findUser2".to_string()).is_ok());
    }

    #[test]
    fn callbacks_surface_as_attributes_not_parameters() {
        struct NotifyHandler;

        let mut method = MethodConfig::new();
        method.set_name("findUser".to_string()).unwrap();
        method.set_onreturn(AttributeValue::object(NotifyHandler));
        method.set_onreturn_method("onFound".to_string());
        method.set_retries(3);

        let parameters = materialize(&method).unwrap();
        assert_eq!(parameters.get("retries").map(String::as_str), Some("3"));
        assert!(!parameters.contains_key("onreturn.instance"));
        assert!(!parameters.contains_key("onreturn.method"));

        let mut attributes = Map::new();
        append_attributes(&mut attributes, &method, None);
        assert!(attributes["onreturn.instance"]
            .downcast_ref::<NotifyHandler>()
            .is_some());
        assert_eq!(attributes["onreturn.method"].as_str(), Some("onFound"));
    }

    #[test]
    fn attribute_keys_take_the_method_prefix() {
        let mut method = MethodConfig::new();
        method.set_name("findUser".to_string()).unwrap();
        method.set_onthrow_method("onError".to_string());

        let mut attributes = Map::new();
        append_attributes(&mut attributes, &method, method.name());
        assert_eq!(
            attributes["findUser.onthrow.method"].as_str(),
            Some("onError")
        );
    }
}
