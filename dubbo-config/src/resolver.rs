//! Fills the unset fields of a configuration object from environment-level
//! overrides and persisted properties.
//!
//! Resolution is best-effort by design: a failure on one field is logged
//! and never aborts resolution of the others. Downstream materialization
//! enforces required-ness strictly, so a partially resolved object is an
//! acceptable outcome here.

use crate::legacy::{convert_legacy_value, legacy_key};
use crate::schema::{camel_to_dotted, Configurable};
use crate::sources::PropertySource;

/// The two key-value sources consulted during resolution.
pub struct ResolveContext<'a> {
    /// Environment-level overrides (highest precedence).
    pub overrides: &'a dyn PropertySource,
    /// Persisted property store.
    pub properties: &'a dyn PropertySource,
}

impl<'a> ResolveContext<'a> {
    pub fn new(overrides: &'a dyn PropertySource, properties: &'a dyn PropertySource) -> Self {
        ResolveContext {
            overrides,
            properties,
        }
    }
}

/// Resolve every unset settable field of `config`.
///
/// Explicitly set fields are never overwritten. For each unset field the
/// first non-empty value wins, in order:
///
/// 1. `dubbo.<tag>.<id>.<property>` from the overrides (id set only)
/// 2. `dubbo.<tag>.<property>` from the overrides
/// 3. `dubbo.<tag>.<id>.<property>` from the persisted properties
/// 4. `dubbo.<tag>.<property>` from the persisted properties
/// 5. the legacy persisted property mapped to `dubbo.<tag>.<property>`,
///    with its value-shape conversion applied
///
/// The found string is parsed to the field's declared kind and assigned
/// through the validating setter.
pub fn resolve_properties<C: Configurable + 'static>(config: &mut C, ctx: &ResolveContext<'_>) {
    let prefix = format!("dubbo.{}.", C::tag());
    let id = config
        .id()
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    for field in C::fields() {
        let Some(setter) = field.set else {
            continue;
        };
        if (field.get)(config).is_some() {
            continue;
        }
        let property = camel_to_dotted(field.name);

        let mut value: Option<String> = None;
        if let Some(id) = &id {
            let key = format!("{prefix}{id}.{property}");
            if let Some(found) = non_empty(ctx.overrides.get(&key)) {
                tracing::debug!(key, "using environment override");
                value = Some(found);
            }
        }
        if value.is_none() {
            let key = format!("{prefix}{property}");
            if let Some(found) = non_empty(ctx.overrides.get(&key)) {
                tracing::debug!(key, "using environment override");
                value = Some(found);
            }
        }
        // Setters may fill sibling fields as a side effect, so re-check the
        // accessor before consulting the persisted store.
        if value.is_none() && (field.get)(config).is_none() {
            if let Some(id) = &id {
                value = non_empty(ctx.properties.get(&format!("{prefix}{id}.{property}")));
            }
            if value.is_none() {
                value = non_empty(ctx.properties.get(&format!("{prefix}{property}")));
            }
            if value.is_none() {
                if let Some(legacy) = legacy_key(&format!("{prefix}{property}")) {
                    if let Some(stored) = non_empty(ctx.properties.get(legacy)) {
                        value = Some(convert_legacy_value(legacy, &stored));
                    }
                }
            }
        }

        let Some(raw) = value else {
            continue;
        };
        match field.kind.parse(field.name, &raw) {
            Ok(parsed) => {
                if let Err(err) = setter(config, parsed) {
                    tracing::warn!(
                        field = field.name,
                        %err,
                        "Resolved value rejected by setter; leaving field unset"
                    );
                }
            }
            Err(err) => {
                tracing::warn!(
                    field = field.name,
                    %err,
                    "Cannot convert resolved value; leaving field unset"
                );
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
