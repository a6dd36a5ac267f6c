//! Value classification.

use serde::Serialize;

use crate::value::Value;

/// Classification tag for an inspected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Array,
    Iterable,
    Object,
    Callable,
    /// Primitives, null, undefined
    Other,
}

impl Kind {
    /// Kinds whose values enumerate child entries.
    pub fn is_container(self) -> bool {
        matches!(self, Kind::Array | Kind::Iterable | Kind::Object)
    }
}

/// Classify a value. First match wins:
///
/// 1. array-like → `Array` (arrays also iterate, this rule must come first)
/// 2. non-null aggregate that iterates → `Iterable`
/// 3. callable → `Callable`
/// 4. non-null aggregate → `Object`
/// 5. anything else → `Other`
pub fn classify(value: &Value) -> Kind {
    if value.is_array_like() {
        Kind::Array
    } else if value.is_aggregate() && value.is_iterable() {
        Kind::Iterable
    } else if value.is_callable() {
        Kind::Callable
    } else if value.is_aggregate() {
        Kind::Object
    } else {
        Kind::Other
    }
}
