use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::render::render_descriptor;
use crate::schema::{Configurable, FieldDef, FieldMeta};
use crate::validate::{
    check_length, check_name, check_parameter_name, check_path_length,
};
use crate::value::{PropertyKind, PropertyValue};

/// Registry-center configuration.
///
/// The address is embedded directly into the connection descriptor rather
/// than its query string, so it is excluded from parameter
/// materialization, as is the identifier.
#[derive(Debug, Default, Clone)]
pub struct RegistryConfig {
    id: Option<String>,
    /// Registry server address.
    address: Option<String>,
    /// Username to log into the registry, if it requires authentication.
    username: Option<String>,
    password: Option<String>,
    /// Registry default port.
    port: Option<i64>,
    /// Address protocol (e.g. `zookeeper`).
    protocol: Option<String>,
    /// Network transport implementation name.
    transporter: Option<String>,
    server: Option<String>,
    client: Option<String>,
    cluster: Option<String>,
    /// Service registration group; groups are isolated from each other.
    group: Option<String>,
    version: Option<String>,
    /// Request timeout towards the registry, in milliseconds.
    timeout: Option<i64>,
    /// Session/heartbeat timeout towards the registry, in milliseconds.
    session: Option<i64>,
    /// File caching the registry's dynamic address list for recovery.
    file: Option<String>,
    /// Wait time before stopping, in milliseconds.
    wait: Option<i64>,
    /// Whether to fail at boot when the registry is unavailable.
    check: Option<bool>,
    dynamic: Option<bool>,
    register: Option<bool>,
    subscribe: Option<bool>,
    /// Free-form extension parameters.
    parameters: Option<IndexMap<String, String>>,
    is_default: Option<bool>,
}

impl RegistryConfig {
    /// Placeholder address for a registry that is intentionally absent.
    pub const NO_AVAILABLE: &'static str = "N/A";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(address: impl Into<String>) -> Self {
        let mut config = Self::new();
        config.set_address(address.into());
        config
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: String) -> Result<(), ConfigError> {
        check_name("id", &id)?;
        self.id = Some(id);
        Ok(())
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn set_address(&mut self, address: String) {
        self.address = Some(address);
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn set_username(&mut self, username: String) -> Result<(), ConfigError> {
        check_name("username", &username)?;
        self.username = Some(username);
        Ok(())
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn set_password(&mut self, password: String) -> Result<(), ConfigError> {
        check_length("password", &password)?;
        self.password = Some(password);
        Ok(())
    }

    pub fn port(&self) -> Option<i64> {
        self.port
    }

    pub fn set_port(&mut self, port: i64) {
        self.port = Some(port);
    }

    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    pub fn set_protocol(&mut self, protocol: String) -> Result<(), ConfigError> {
        check_name("protocol", &protocol)?;
        self.protocol = Some(protocol);
        Ok(())
    }

    pub fn transporter(&self) -> Option<&str> {
        self.transporter.as_deref()
    }

    pub fn set_transporter(&mut self, transporter: String) -> Result<(), ConfigError> {
        check_name("transporter", &transporter)?;
        self.transporter = Some(transporter);
        Ok(())
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    pub fn set_server(&mut self, server: String) -> Result<(), ConfigError> {
        check_name("server", &server)?;
        self.server = Some(server);
        Ok(())
    }

    pub fn client(&self) -> Option<&str> {
        self.client.as_deref()
    }

    pub fn set_client(&mut self, client: String) -> Result<(), ConfigError> {
        check_name("client", &client)?;
        self.client = Some(client);
        Ok(())
    }

    pub fn cluster(&self) -> Option<&str> {
        self.cluster.as_deref()
    }

    pub fn set_cluster(&mut self, cluster: String) {
        self.cluster = Some(cluster);
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn set_group(&mut self, group: String) {
        self.group = Some(group);
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_version(&mut self, version: String) {
        self.version = Some(version);
    }

    pub fn timeout(&self) -> Option<i64> {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: i64) {
        self.timeout = Some(timeout);
    }

    pub fn session(&self) -> Option<i64> {
        self.session
    }

    pub fn set_session(&mut self, session: i64) {
        self.session = Some(session);
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn set_file(&mut self, file: String) -> Result<(), ConfigError> {
        check_path_length("file", &file)?;
        self.file = Some(file);
        Ok(())
    }

    pub fn wait(&self) -> Option<i64> {
        self.wait
    }

    pub fn set_wait(&mut self, wait: i64) {
        self.wait = Some(wait);
    }

    pub fn check(&self) -> Option<bool> {
        self.check
    }

    pub fn set_check(&mut self, check: bool) {
        self.check = Some(check);
    }

    pub fn dynamic(&self) -> Option<bool> {
        self.dynamic
    }

    pub fn set_dynamic(&mut self, dynamic: bool) {
        self.dynamic = Some(dynamic);
    }

    pub fn register(&self) -> Option<bool> {
        self.register
    }

    pub fn set_register(&mut self, register: bool) {
        self.register = Some(register);
    }

    pub fn subscribe(&self) -> Option<bool> {
        self.subscribe
    }

    pub fn set_subscribe(&mut self, subscribe: bool) {
        self.subscribe = Some(subscribe);
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

    pub fn is_default(&self) -> Option<bool> {
        self.is_default
    }

    pub fn set_default(&mut self, is_default: bool) {
        self.is_default = Some(is_default);
    }
}

impl Configurable for RegistryConfig {
    fn tag() -> &'static str {
        "registry"
    }

    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<RegistryConfig>] = &[
            FieldDef {
                name: "id",
                kind: PropertyKind::String,
                meta: FieldMeta::new().excluded(),
                get: |c| c.id.clone().map(PropertyValue::String),
                set: Some(|c, v| c.set_id(v.into_string())),
                get_attr: None,
            },
            FieldDef {
                name: "address",
                kind: PropertyKind::String,
                meta: FieldMeta::new().excluded(),
                get: |c| c.address.clone().map(PropertyValue::String),
                set: Some(|c, v| {
                    c.set_address(v.into_string());
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "username",
                kind: PropertyKind::String,
                meta: FieldMeta::new(),
                get: |c| c.username.clone().map(PropertyValue::String),
                set: Some(|c, v| c.set_username(v.into_string())),
                get_attr: None,
            },
            FieldDef {
                name: "password",
                kind: PropertyKind::String,
                meta: FieldMeta::new(),
                get: |c| c.password.clone().map(PropertyValue::String),
                set: Some(|c, v| c.set_password(v.into_string())),
                get_attr: None,
            },
            FieldDef {
                name: "port",
                kind: PropertyKind::Int,
                meta: FieldMeta::new(),
                get: |c| c.port.map(PropertyValue::Int),
                set: Some(|c, v| {
                    c.set_port(v.into_int("port")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "protocol",
                kind: PropertyKind::String,
                meta: FieldMeta::new(),
                get: |c| c.protocol.clone().map(PropertyValue::String),
                set: Some(|c, v| c.set_protocol(v.into_string())),
                get_attr: None,
            },
            FieldDef {
                name: "transporter",
                kind: PropertyKind::String,
                meta: FieldMeta::new(),
                get: |c| c.transporter.clone().map(PropertyValue::String),
                set: Some(|c, v| c.set_transporter(v.into_string())),
                get_attr: None,
            },
            FieldDef {
                name: "server",
                kind: PropertyKind::String,
                meta: FieldMeta::new(),
                get: |c| c.server.clone().map(PropertyValue::String),
                set: Some(|c, v| c.set_server(v.into_string())),
                get_attr: None,
            },
            FieldDef {
                name: "client",
                kind: PropertyKind::String,
                meta: FieldMeta::new(),
                get: |c| c.client.clone().map(PropertyValue::String),
                set: Some(|c, v| c.set_client(v.into_string())),
                get_attr: None,
            },
            FieldDef {
                name: "cluster",
                kind: PropertyKind::String,
                meta: FieldMeta::new(),
                get: |c| c.cluster.clone().map(PropertyValue::String),
                set: Some(|c, v| {
                    c.set_cluster(v.into_string());
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "group",
                kind: PropertyKind::String,
                meta: FieldMeta::new(),
                get: |c| c.group.clone().map(PropertyValue::String),
                set: Some(|c, v| {
                    c.set_group(v.into_string());
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "version",
                kind: PropertyKind::String,
                meta: FieldMeta::new(),
                get: |c| c.version.clone().map(PropertyValue::String),
                set: Some(|c, v| {
                    c.set_version(v.into_string());
                    Ok(())
                }),
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
                name: "session",
                kind: PropertyKind::Int,
                meta: FieldMeta::new(),
                get: |c| c.session.map(PropertyValue::Int),
                set: Some(|c, v| {
                    c.set_session(v.into_int("session")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "file",
                kind: PropertyKind::String,
                meta: FieldMeta::new(),
                get: |c| c.file.clone().map(PropertyValue::String),
                set: Some(|c, v| c.set_file(v.into_string())),
                get_attr: None,
            },
            FieldDef {
                name: "wait",
                kind: PropertyKind::Int,
                meta: FieldMeta::new(),
                get: |c| c.wait.map(PropertyValue::Int),
                set: Some(|c, v| {
                    c.set_wait(v.into_int("wait")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "check",
                kind: PropertyKind::Bool,
                meta: FieldMeta::new(),
                get: |c| c.check.map(PropertyValue::Bool),
                set: Some(|c, v| {
                    c.set_check(v.into_bool("check")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "dynamic",
                kind: PropertyKind::Bool,
                meta: FieldMeta::new(),
                get: |c| c.dynamic.map(PropertyValue::Bool),
                set: Some(|c, v| {
                    c.set_dynamic(v.into_bool("dynamic")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "register",
                kind: PropertyKind::Bool,
                meta: FieldMeta::new(),
                get: |c| c.register.map(PropertyValue::Bool),
                set: Some(|c, v| {
                    c.set_register(v.into_bool("register")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "subscribe",
                kind: PropertyKind::Bool,
                meta: FieldMeta::new(),
                get: |c| c.subscribe.map(PropertyValue::Bool),
                set: Some(|c, v| {
                    c.set_subscribe(v.into_bool("subscribe")?);
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "default",
                kind: PropertyKind::Bool,
                meta: FieldMeta::new(),
                get: |c| c.is_default.map(PropertyValue::Bool),
                set: Some(|c, v| {
                    c.set_default(v.into_bool("default")?);
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

    fn extensions(&self) -> Option<&IndexMap<String, String>> {
        self.parameters.as_ref()
    }

    fn set_extensions(&mut self, parameters: IndexMap<String, String>) -> Result<(), ConfigError> {
        self.set_parameters(parameters)
    }
}

impl std::fmt::Display for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render_descriptor(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_validate_before_storing() {
        let mut registry = RegistryConfig::new();
        assert!(registry.set_protocol("zoo keeper".to_string()).is_err());
        assert_eq!(registry.protocol(), None);
        assert!(registry.set_protocol("zookeeper".to_string()).is_ok());
        assert_eq!(registry.protocol(), Some("zookeeper"));
    }

    #[test]
    fn file_accepts_paths() {
        let mut registry = RegistryConfig::new();
        assert!(registry
            .set_file("/var/cache/dubbo.registry".to_string())
            .is_ok());
    }

    #[test]
    fn bad_parameter_entries_are_rejected() {
        let mut registry = RegistryConfig::new();
        let mut params = IndexMap::new();
        params.insert("key".to_string(), "has space".to_string());
        assert!(registry.set_parameters(params).is_err());
        assert!(registry.parameters().is_none());
    }
}
