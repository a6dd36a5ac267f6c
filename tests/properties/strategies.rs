//! Shared generators.

use proptest::prelude::*;

use tablescope::explorer::{Label, TreePath};
use tablescope::Value;

pub fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_map(Value::Float),
        "[a-z0-9 ]{0,12}".prop_map(|s| Value::str(s)),
    ]
}

/// Acyclic values of bounded size, including callables.
pub fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(|items| Value::array(items)),
            proptest::collection::vec(inner.clone(), 0..6).prop_map(|items| Value::set(items)),
            proptest::collection::vec((inner.clone(), inner.clone()), 0..4)
                .prop_map(|pairs| Value::map(pairs)),
            proptest::collection::vec(("[a-z]{1,6}", inner.clone()), 0..6)
                .prop_map(|fields| Value::object(fields)),
            inner.prop_map(|v| Value::function(move || Ok(v.clone()))),
        ]
    })
}

pub fn label() -> impl Strategy<Value = Label> {
    prop_oneof![
        (0usize..1000).prop_map(Label::Index),
        "[a-z]{1,8}".prop_map(|key| Label::key(key)),
    ]
}

pub fn tree_path() -> impl Strategy<Value = TreePath> {
    proptest::collection::vec(label(), 1..5).prop_map(TreePath::from)
}
