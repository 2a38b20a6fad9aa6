//! Translation of current override keys to their historically used names.
//!
//! The table is a compile-time constant with no construction side effects.
//! A handful of legacy keys changed value shape as well as name; those are
//! converted by [`convert_legacy_value`] when a legacy key supplies the
//! value.

/// (current key, legacy key) pairs. Fixed; never extended at runtime.
pub const LEGACY_PROPERTIES: &[(&str, &str)] = &[
    ("dubbo.protocol.name", "dubbo.service.protocol"),
    ("dubbo.protocol.host", "dubbo.service.server.host"),
    ("dubbo.protocol.port", "dubbo.service.server.port"),
    ("dubbo.protocol.threads", "dubbo.service.max.thread.pool.size"),
    ("dubbo.consumer.timeout", "dubbo.service.invoke.timeout"),
    ("dubbo.consumer.retries", "dubbo.service.max.retry.providers"),
    ("dubbo.consumer.check", "dubbo.service.allow.no.provider"),
    ("dubbo.service.url", "dubbo.service.address"),
];

/// Look up the legacy key for a current override key.
pub fn legacy_key(current: &str) -> Option<&'static str> {
    LEGACY_PROPERTIES
        .iter()
        .find(|(cur, _)| *cur == current)
        .map(|(_, legacy)| *legacy)
}

/// Convert a value read under a legacy key into its current shape.
///
/// The stored retry count is one less than the effective count, and the
/// stored "allow no provider" flag is the logical inverse of "check".
/// Values that fail to parse pass through unchanged; the caller's type
/// conversion will reject them.
pub fn convert_legacy_value(legacy_key: &str, value: &str) -> String {
    if value.is_empty() {
        return value.to_string();
    }
    match legacy_key {
        "dubbo.service.max.retry.providers" => value
            .parse::<i64>()
            .map(|n| (n + 1).to_string())
            .unwrap_or_else(|_| value.to_string()),
        "dubbo.service.allow.no.provider" => value
            .parse::<bool>()
            .map(|allow| (!allow).to_string())
            .unwrap_or_else(|_| value.to_string()),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_current_keys_to_legacy_names() {
        assert_eq!(
            legacy_key("dubbo.consumer.retries"),
            Some("dubbo.service.max.retry.providers")
        );
        assert_eq!(legacy_key("dubbo.registry.address"), None);
    }

    #[test]
    fn retry_count_is_offset_by_one() {
        assert_eq!(
            convert_legacy_value("dubbo.service.max.retry.providers", "2"),
            "3"
        );
    }

    #[test]
    fn allow_no_provider_is_inverted() {
        assert_eq!(
            convert_legacy_value("dubbo.service.allow.no.provider", "true"),
            "false"
        );
        assert_eq!(
            convert_legacy_value("dubbo.service.allow.no.provider", "false"),
            "true"
        );
    }

    #[test]
    fn other_keys_pass_through() {
        assert_eq!(
            convert_legacy_value("dubbo.service.protocol", "dubbo"),
            "dubbo"
        );
    }

    #[test]
    fn unparsable_values_pass_through() {
        assert_eq!(
            convert_legacy_value("dubbo.service.max.retry.providers", "many"),
            "many"
        );
    }
}
