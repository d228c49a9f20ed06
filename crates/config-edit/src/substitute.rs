//! Placeholder substitution across a parsed configuration

use serde_json::Value;

use crate::tree::ConfigValue;

/// Replace every string equal to `placeholder` with `replacement`.
///
/// Strings are compared after trimming both sides; only whole values match,
/// never substrings of a larger string. Keys, ordering and non-string scalars
/// are left as they are.
///
/// ```
/// use config_edit::substitute::replace_all;
/// use serde_json::json;
///
/// let config = json!({"name": " $APP ", "label": "$APP-suffix"});
/// let replaced = replace_all("$APP", "my-app", &config);
/// assert_eq!(replaced, json!({"name": "my-app", "label": "$APP-suffix"}));
/// ```
pub fn replace_all(placeholder: &str, replacement: &str, config: &ConfigValue) -> ConfigValue {
    substitute(config, placeholder.trim(), replacement)
}

fn substitute(value: &ConfigValue, needle: &str, replacement: &str) -> ConfigValue {
    match value {
        Value::String(s) if s.trim() == needle => Value::String(replacement.to_string()),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| substitute(item, needle, replacement))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), substitute(item, needle, replacement)))
                .collect(),
        ),
        other => other.clone(),
    }
}
