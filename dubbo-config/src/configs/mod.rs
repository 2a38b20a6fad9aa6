//! Concrete configuration schemas: plain data holders with validating
//! setters and a static field table each. All resolution and
//! materialization behavior lives in the engine modules.

mod argument;
mod method;
mod registry;

pub use argument::ArgumentConfig;
pub use method::MethodConfig;
pub use registry::RegistryConfig;
