//! The generated client configuration module.
//!
//! The browser loads `/js/core/defaults.js`; the gateway generates it from
//! the environment-resolved [`ClientDefaults`] at startup, so the static
//! asset on disk is never mutated.

use agora_core::ClientDefaults;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Render the JavaScript module the front-end imports its configuration
/// from.
pub fn render_defaults_module(defaults: &ClientDefaults) -> serde_json::Result<String> {
    // Four-space indent, matching how the asset was historically written.
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    defaults.serialize(&mut serializer)?;
    let json = String::from_utf8(buffer).map_err(|e| {
        serde::ser::Error::custom(format!("defaults serialized to non-UTF-8: {}", e))
    })?;

    Ok(format!(
        "const defaults = Object.freeze({json});\n\n\
         export const {{ APP_NAME, API_BASE, TIMEOUT_MS }} = defaults;\n"
    ))
}
