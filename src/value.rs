//! Dynamically-typed values inspected by the explorer.
//!
//! A [`Value`] is a cheap-to-clone handle: aggregates are reference counted
//! and shared, so a snapshot handed to several explorers is never copied and
//! cyclic graphs can be represented. The explorer only ever reads through
//! these handles.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared, interior-mutable storage used by aggregate values.
pub type Shared<T> = Rc<RefCell<T>>;

/// Signature of a zero-argument callable value.
pub type CallFn = dyn Fn() -> Result<Value, String>;

/// A runtime value of unknown shape.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    /// Ordered, index-addressable sequence.
    Array(Shared<Vec<Value>>),
    /// Iterable collection of unique members.
    Set(Shared<Vec<Value>>),
    /// Iterable collection of key/value pairs.
    Map(Shared<Vec<(Value, Value)>>),
    /// Plain mapping.
    Object(Shared<Object>),
    Function(Function),
}

impl Value {
    pub fn str(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    pub fn map(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(Rc::new(RefCell::new(pairs.into_iter().collect())))
    }

    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        let mut object = Object::new();
        for (key, value) in fields {
            object.insert(key, value);
        }
        Value::Object(Rc::new(RefCell::new(object)))
    }

    pub fn function(f: impl Fn() -> Result<Value, String> + 'static) -> Self {
        Value::Function(Function::new(f))
    }

    /// Ordered sequence with index access (a plain array).
    pub fn is_array_like(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Non-null value of aggregate/object nature.
    ///
    /// `Null` never qualifies, and callables are not aggregates.
    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Value::Array(_) | Value::Set(_) | Value::Map(_) | Value::Object(_)
        )
    }

    /// Whether the value exposes an iteration capability.
    pub fn is_iterable(&self) -> bool {
        matches!(
            self,
            Value::Array(_) | Value::Set(_) | Value::Map(_) | Value::Str(_)
        )
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Values produced by iterating this value, in iteration order.
    ///
    /// `Map` yields `[key, value]` arrays. Non-iterables, and aggregates that
    /// are mutably borrowed elsewhere, yield nothing.
    pub fn iter_values(&self) -> Vec<Value> {
        match self {
            Value::Array(items) | Value::Set(items) => items
                .try_borrow()
                .map(|items| items.clone())
                .unwrap_or_default(),
            Value::Map(pairs) => pairs
                .try_borrow()
                .map(|pairs| {
                    pairs
                        .iter()
                        .map(|(k, v)| Value::array([k.clone(), v.clone()]))
                        .collect()
                })
                .unwrap_or_default(),
            Value::Str(s) => s.chars().map(|c| Value::str(c.to_string())).collect(),
            _ => Vec::new(),
        }
    }

    /// Identity of the shared allocation behind an aggregate.
    pub(crate) fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(rc) | Value::Set(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Map(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Object(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            _ => None,
        }
    }

    /// Short type name, as shown in fallbacks and summaries.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::Str(_) => "string",
            Value::Array(_) => "Array",
            Value::Set(_) => "Set",
            Value::Map(_) => "Map",
            Value::Object(_) => "Object",
            Value::Function(_) => "Function",
        }
    }
}

impl PartialEq for Value {
    /// Scalars compare by value, aggregates and functions by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) | (Value::Set(a), Value::Set(b)) => {
                Rc::ptr_eq(a, b)
            }
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(&a.call, &b.call),
            _ => false,
        }
    }
}

// Shallow on purpose: a derived impl would recurse forever on cyclic graphs.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Array(items) => write!(f, "Array({})", shallow_len(items, Vec::len)),
            Value::Set(items) => write!(f, "Set({})", shallow_len(items, Vec::len)),
            Value::Map(pairs) => write!(f, "Map({})", shallow_len(pairs, Vec::len)),
            Value::Object(obj) => match obj.try_borrow() {
                Ok(obj) => write!(
                    f,
                    "{} {{{} fields}}",
                    obj.class_name().unwrap_or("Object"),
                    obj.len()
                ),
                Err(_) => f.write_str("Object {..}"),
            },
            Value::Function(func) => write!(f, "Function({})", func.name().unwrap_or("anonymous")),
        }
    }
}

fn shallow_len<T>(cell: &RefCell<T>, len: impl Fn(&T) -> usize) -> String {
    cell.try_borrow()
        .map(|inner| len(&inner).to_string())
        .unwrap_or_else(|_| "..".to_string())
}

/// A plain mapping with insertion-ordered enumerable fields.
///
/// Hidden fields model non-enumerable own properties: they are not listed as
/// children but still show up when the object is serialized as a leaf.
#[derive(Default)]
pub struct Object {
    class: Option<String>,
    fields: Vec<(String, Value)>,
    hidden: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::default()
        }
    }

    /// Insert or replace an enumerable field, keeping its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        upsert(&mut self.fields, key.into(), value);
    }

    pub fn insert_hidden(&mut self, key: impl Into<String>, value: Value) {
        upsert(&mut self.hidden, key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .chain(self.hidden.iter())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn hidden(&self) -> &[(String, Value)] {
        &self.hidden
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(Rc::new(RefCell::new(self)))
    }
}

fn upsert(fields: &mut Vec<(String, Value)>, key: String, value: Value) {
    match fields.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => fields.push((key, value)),
    }
}

/// A zero-argument callable value.
#[derive(Clone)]
pub struct Function {
    name: Option<Rc<str>>,
    call: Rc<CallFn>,
}

impl Function {
    pub fn new(f: impl Fn() -> Result<Value, String> + 'static) -> Self {
        Self {
            name: None,
            call: Rc::new(f),
        }
    }

    pub fn named(name: impl AsRef<str>, f: impl Fn() -> Result<Value, String> + 'static) -> Self {
        Self {
            name: Some(Rc::from(name.as_ref())),
            call: Rc::new(f),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn call(&self) -> Result<Value, String> {
        (self.call)()
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::str(s),
            serde_json::Value::Array(items) => Value::array(items.into_iter().map(Value::from)),
            serde_json::Value::Object(map) => {
                Value::object(map.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_not_an_aggregate() {
        assert!(!Value::Null.is_aggregate());
        assert!(!Value::Undefined.is_aggregate());
    }

    #[test]
    fn arrays_are_also_iterable() {
        let arr = Value::array([Value::Int(1)]);
        assert!(arr.is_array_like());
        assert!(arr.is_iterable());
        assert!(arr.is_aggregate());
    }

    #[test]
    fn map_iterates_pairs() {
        let map = Value::map([(Value::str("k"), Value::Int(1))]);
        let items = map.iter_values();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].iter_values(), vec![Value::str("k"), Value::Int(1)]);
    }

    #[test]
    fn object_insert_replaces_in_place() {
        let mut obj = Object::new();
        obj.insert("a", Value::Int(1));
        obj.insert("b", Value::Int(2));
        obj.insert("a", Value::Int(3));
        let keys: Vec<_> = obj.fields().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(obj.get("a"), Some(&Value::Int(3)));
    }

    #[test]
    fn debug_does_not_recurse_into_cycles() {
        let value = Object::new().into_value();
        if let Value::Object(obj) = &value {
            obj.borrow_mut().insert("me", value.clone());
        }
        assert_eq!(format!("{value:?}"), "Object {1 fields}");
    }

    #[test]
    fn json_objects_keep_document_order() {
        let json: serde_json::Value = serde_json::from_str(r#"{"z": 1, "a": [true, null]}"#).unwrap();
        let value = Value::from(json);
        let Value::Object(obj) = &value else {
            panic!("expected object");
        };
        let keys: Vec<_> = obj.borrow().fields().iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn functions_compare_by_identity() {
        let f = Function::named("answer", || Ok(Value::Int(42)));
        let a = Value::Function(f.clone());
        let b = Value::Function(f);
        assert_eq!(a, b);
        assert_ne!(a, Value::function(|| Ok(Value::Int(42))));
    }
}
