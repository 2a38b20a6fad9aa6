//! Configuration resolution and parameter materialization for Dubbo-style
//! service configs.
//!
//! Configuration objects are plain structs describing a static field table
//! ([`schema::Configurable`]). The engine fills unset fields from override
//! and persisted property sources ([`resolver`]), flattens set fields into
//! URL parameter maps ([`params`]), imports declarative directives
//! ([`directive`]), and renders tag-style diagnostic descriptors
//! ([`render`]).

pub mod configs;
pub mod directive;
pub mod error;
pub mod extension;
pub mod legacy;
pub mod params;
pub mod render;
pub mod resolver;
pub mod schema;
pub mod sources;
pub mod validate;
pub mod value;

pub use configs::{ArgumentConfig, MethodConfig, RegistryConfig};
pub use directive::{Directive, DirectiveMember, DirectiveValue, apply_directive};
pub use error::ConfigError;
pub use extension::{ExtensionRegistry, StaticExtensionRegistry, check_extension, check_multi_extension};
pub use params::{append_attributes, append_parameters, materialize};
pub use render::render_descriptor;
pub use resolver::{ResolveContext, resolve_properties};
pub use schema::{Configurable, FieldDef, FieldMeta};
pub use sources::{EnvOverrides, MapSource, PropertyFile, PropertySource};
pub use value::{AttributeValue, PropertyKind, PropertyValue};
