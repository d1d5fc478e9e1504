//! Deep merge of settings documents.
//!
//! Only object/object conflicts recurse. Any other conflict keeps the value
//! from `primary` and drops the one from `secondary` without comment, so
//! arrays are never concatenated and scalars are never combined.

use serde_json::Value;

use crate::settings::Settings;

/// Merge `secondary` into a copy of `primary`.
///
/// Keys only present in one input are carried over unchanged. When a key is
/// present in both and both values are objects, the objects are merged with
/// the same precedence; otherwise the value from `primary` wins.
///
/// # Examples
///
/// ```
/// use codei::merge::merge;
/// use serde_json::json;
///
/// let local = json!({"editor": {"fontSize": 12}}).as_object().cloned().unwrap();
/// let template = json!({"editor": {"fontSize": 14, "wordWrap": true}})
///     .as_object()
///     .cloned()
///     .unwrap();
/// let merged = merge(&local, &template);
/// assert_eq!(
///     serde_json::Value::Object(merged),
///     json!({"editor": {"fontSize": 12, "wordWrap": true}})
/// );
/// ```
#[must_use]
pub fn merge(primary: &Settings, secondary: &Settings) -> Settings {
    let mut merged = primary.clone();
    for (key, value) in secondary {
        match (merged.get_mut(key), value) {
            (Some(Value::Object(ours)), Value::Object(theirs)) => {
                *ours = merge(ours, theirs);
            }
            (Some(_), _) => {}
            (None, _) => {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    merged
}
