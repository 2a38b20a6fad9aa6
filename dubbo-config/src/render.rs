use std::fmt::Write;

use crate::schema::Configurable;

/// Render a tag-style diagnostic descriptor for a configuration object:
/// `<dubbo:registry timeout="5000" check="true" />`.
///
/// Every set primitive field appears as a camelCase attribute, in table
/// order. Purely diagnostic; infallible by construction.
pub fn render_descriptor<C: Configurable + 'static>(config: &C) -> String {
    let mut buf = String::from("<dubbo:");
    buf.push_str(C::tag());
    for field in C::fields() {
        if let Some(value) = (field.get)(config) {
            let _ = write!(buf, " {}=\"{}\"", field.name, value);
        }
    }
    buf.push_str(" />");
    buf
}
