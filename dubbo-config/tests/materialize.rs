//! End-to-end materialization behavior for field metadata the shipped
//! schemas exercise sparsely: required, escaped, and append flags, and
//! the attribute channel.

use indexmap::IndexMap;

use dubbo_config::error::ConfigError;
use dubbo_config::params::{append_attributes, append_parameters, materialize};
use dubbo_config::schema::{Configurable, FieldDef, FieldMeta};
use dubbo_config::value::{AttributeValue, PropertyKind, PropertyValue};

#[derive(Debug, Default)]
struct ServiceConfig {
    id: Option<String>,
    group: Option<String>,
    version: Option<String>,
    token: Option<String>,
    owner: Option<String>,
    notify: Option<AttributeValue>,
    parameters: Option<IndexMap<String, String>>,
}

impl Configurable for ServiceConfig {
    fn tag() -> &'static str {
        "service"
    }

    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<ServiceConfig>] = &[
            FieldDef {
                name: "id",
                kind: PropertyKind::String,
                meta: FieldMeta::new().excluded(),
                get: |c| c.id.clone().map(PropertyValue::String),
                set: Some(|c, v| {
                    c.id = Some(v.into_string());
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "group",
                kind: PropertyKind::String,
                meta: FieldMeta::new().append(),
                get: |c| c.group.clone().map(PropertyValue::String),
                set: Some(|c, v| {
                    c.group = Some(v.into_string());
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "version",
                kind: PropertyKind::String,
                meta: FieldMeta::new().required(),
                get: |c| c.version.clone().map(PropertyValue::String),
                set: Some(|c, v| {
                    c.version = Some(v.into_string());
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "token",
                kind: PropertyKind::String,
                meta: FieldMeta::new().escaped(),
                get: |c| c.token.clone().map(PropertyValue::String),
                set: Some(|c, v| {
                    c.token = Some(v.into_string());
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "owner",
                kind: PropertyKind::String,
                meta: FieldMeta::new(),
                get: |c| c.owner.clone().map(PropertyValue::String),
                set: Some(|c, v| {
                    c.owner = Some(v.into_string());
                    Ok(())
                }),
                get_attr: None,
            },
            FieldDef {
                name: "notify",
                kind: PropertyKind::String,
                meta: FieldMeta::new().excluded().attribute(),
                get: |_| None,
                set: None,
                get_attr: Some(|c| c.notify.clone()),
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
        self.parameters = Some(parameters);
        Ok(())
    }
}

fn configured() -> ServiceConfig {
    ServiceConfig {
        version: Some("1.0.0".to_string()),
        ..ServiceConfig::default()
    }
}

#[test]
fn append_merges_default_scoped_then_unscoped_then_own_value() {
    let mut config = configured();
    config.group = Some("C".to_string());

    let mut parameters = IndexMap::new();
    parameters.insert("default.group".to_string(), "A".to_string());
    parameters.insert("group".to_string(), "B".to_string());
    append_parameters(&mut parameters, &config, None).unwrap();

    assert_eq!(parameters["group"], "A,B,C");
}

#[test]
fn append_without_prior_values_keeps_the_value_plain() {
    let mut config = configured();
    config.group = Some("demo".to_string());

    let parameters = materialize(&config).unwrap();
    assert_eq!(parameters["group"], "demo");
}

#[test]
fn missing_required_field_aborts_and_names_the_key() {
    let config = ServiceConfig::default();

    let err = materialize(&config).unwrap_err();
    match &err {
        ConfigError::MissingRequired { owner, key } => {
            assert_eq!(*owner, "service");
            assert_eq!(key, "version");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        err.to_string(),
        "Missing required parameter 'service.version'"
    );
}

#[test]
fn blank_required_value_counts_as_missing() {
    let mut config = ServiceConfig::default();
    config.version = Some("   ".to_string());

    assert!(materialize(&config).is_err());
}

#[test]
fn escaped_value_is_form_urlencoded() {
    let mut config = configured();
    config.token = Some("a=b&c d".to_string());

    let parameters = materialize(&config).unwrap();
    assert_eq!(parameters["token"], "a%3Db%26c+d");
}

#[test]
fn extension_keys_are_normalized_and_win_collisions() {
    let mut config = configured();
    config.owner = Some("ops".to_string());
    let mut extensions = IndexMap::new();
    extensions.insert("retry-period".to_string(), "30".to_string());
    extensions.insert("owner".to_string(), "override".to_string());
    config.parameters = Some(extensions);

    let parameters = materialize(&config).unwrap();
    assert_eq!(parameters["retry.period"], "30");
    assert_eq!(parameters["owner"], "override");
}

#[test]
fn attributes_flow_through_their_own_channel() {
    struct Notifier;

    let mut config = configured();
    config.notify = Some(AttributeValue::object(Notifier));

    let parameters = materialize(&config).unwrap();
    assert!(!parameters.contains_key("notify"));

    let mut attributes = IndexMap::new();
    append_attributes(&mut attributes, &config, Some("findUser"));
    assert!(attributes["findUser.notify"].downcast_ref::<Notifier>().is_some());
}
