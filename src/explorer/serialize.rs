//! Safe leaf serialization.
//!
//! Leaves are shown as JSON text. Anything JSON can't express falls back to
//! the value's default text form, and cycles become a fixed placeholder, so
//! turning a value into a string never fails.

use std::collections::HashSet;

use unicode_width::UnicodeWidthChar;

use crate::error::SerializeError;
use crate::value::Value;

/// Placeholder shown for a leaf whose value refers back to itself.
pub const CIRCULAR: &str = "[Circular]";

/// Default display width for leaf text.
pub const DEFAULT_MAX_LEAF_CHARS: usize = 500;

const MAX_NESTING: usize = 128;

/// Display string for a leaf value, at most `max_width` columns wide.
pub fn to_display_string(value: &Value, max_width: usize) -> String {
    let text = match try_serialize(value) {
        Ok(text) => text,
        Err(SerializeError::Cycle) => {
            tracing::debug!(value = ?value, "cycle in leaf value");
            CIRCULAR.to_string()
        }
        Err(err) => {
            tracing::debug!(value = ?value, error = %err, "falling back to default text");
            default_text(value)
        }
    };
    truncate(&text, max_width)
}

/// Structural JSON serialization of a value.
pub fn try_serialize(value: &Value) -> Result<String, SerializeError> {
    let mut ancestors = HashSet::new();
    let json = to_json(value, &mut ancestors, 0)?;
    serde_json::to_string(&json).map_err(|e| SerializeError::Unsupported(e.to_string()))
}

fn to_json(
    value: &Value,
    ancestors: &mut HashSet<usize>,
    nesting: usize,
) -> Result<serde_json::Value, SerializeError> {
    if nesting > MAX_NESTING {
        return Err(SerializeError::Unsupported("nesting too deep".to_string()));
    }

    let json = match value {
        Value::Undefined => return Err(SerializeError::Unsupported("undefined".to_string())),
        Value::Function(_) => return Err(SerializeError::Unsupported("function".to_string())),
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(n) => serde_json::Value::from(*n),
        Value::Float(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .ok_or_else(|| SerializeError::Unsupported(format!("non-finite number {n}")))?,
        Value::Str(s) => serde_json::Value::String(s.to_string()),
        Value::Array(_) | Value::Set(_) | Value::Map(_) | Value::Object(_) => {
            let id = value.identity().unwrap_or_default();
            if !ancestors.insert(id) {
                return Err(SerializeError::Cycle);
            }
            let json = aggregate_to_json(value, ancestors, nesting);
            ancestors.remove(&id);
            json?
        }
    };
    Ok(json)
}

fn aggregate_to_json(
    value: &Value,
    ancestors: &mut HashSet<usize>,
    nesting: usize,
) -> Result<serde_json::Value, SerializeError> {
    match value {
        Value::Object(obj) => {
            let obj = obj
                .try_borrow()
                .map_err(|_| SerializeError::Unsupported("object is being modified".to_string()))?;
            let mut map = serde_json::Map::new();
            for (key, field) in obj.fields().iter().chain(obj.hidden()) {
                // Fields JSON can't hold are dropped; in arrays they become null.
                if matches!(field, Value::Undefined | Value::Function(_)) {
                    continue;
                }
                map.insert(key.clone(), to_json(field, ancestors, nesting + 1)?);
            }
            Ok(serde_json::Value::Object(map))
        }
        _ => {
            let items = value
                .iter_values()
                .iter()
                .map(|item| match item {
                    Value::Undefined | Value::Function(_) => Ok(serde_json::Value::Null),
                    _ => to_json(item, ancestors, nesting + 1),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(serde_json::Value::Array(items))
        }
    }
}

/// The value's own text form, used when JSON serialization isn't possible.
pub fn default_text(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(n) if n.is_nan() => "NaN".to_string(),
        Value::Float(n) if n.is_infinite() => {
            let sign = if *n > 0.0 { "" } else { "-" };
            format!("{sign}Infinity")
        }
        Value::Float(n) => n.to_string(),
        Value::Str(s) => s.to_string(),
        Value::Function(f) => match f.name() {
            Some(name) => format!("[Function: {name}]"),
            None => "[Function]".to_string(),
        },
        Value::Object(obj) => {
            let class = obj
                .try_borrow()
                .ok()
                .and_then(|o| o.class_name().map(str::to_string))
                .unwrap_or_else(|| "Object".to_string());
            format!("[object {class}]")
        }
        other => format!("[object {}]", other.type_name()),
    }
}

fn truncate(text: &str, max_width: usize) -> String {
    let mut width = 0;
    for (idx, ch) in text.char_indices() {
        width += ch.width().unwrap_or(0);
        if width > max_width {
            let mut out = String::with_capacity(idx + 3);
            out.push_str(&text[..idx]);
            out.push('…');
            return out;
        }
    }
    text.to_string()
}
