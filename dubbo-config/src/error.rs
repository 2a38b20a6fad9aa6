/// Error type for configuration operations.
///
/// Strict paths (parameter/attribute materialization, validation, extension
/// checks) surface these as fatal; best-effort paths (property resolution,
/// directive import) log them and continue.
#[derive(Debug)]
pub enum ConfigError {
    /// A field value violated a length or character-class constraint.
    Invalid {
        property: String,
        value: String,
        constraint: String,
    },
    /// A required parameter was still absent at materialization time.
    MissingRequired { owner: &'static str, key: String },
    /// A named extension is not registered for the given capability kind.
    UnknownExtension {
        property: String,
        kind: &'static str,
        name: String,
    },
    /// A value could not be converted to the field's declared type.
    TypeMismatch {
        property: String,
        expected: &'static str,
    },
    /// An I/O or YAML parsing error occurred while loading a property file.
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid {
                property,
                value,
                constraint,
            } => {
                write!(f, "Invalid {property}=\"{value}\": {constraint}")
            }
            ConfigError::MissingRequired { owner, key } => {
                write!(f, "Missing required parameter '{owner}.{key}'")
            }
            ConfigError::UnknownExtension {
                property,
                kind,
                name,
            } => {
                write!(f, "No such extension '{name}' for {property}/{kind}")
            }
            ConfigError::TypeMismatch { property, expected } => {
                write!(f, "Config type mismatch for '{property}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
