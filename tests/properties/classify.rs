//! Property tests for value classification.

use proptest::prelude::*;

use tablescope::explorer::{classify, Kind};
use tablescope::Value;

use crate::strategies::value;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: classification is deterministic.
    #[test]
    fn property_classify_is_deterministic(v in value()) {
        prop_assert_eq!(classify(&v), classify(&v.clone()));
    }

    /// PROPERTY: arrays are `Array` even though they also iterate.
    #[test]
    fn property_arrays_always_classify_as_array(items in proptest::collection::vec(value(), 0..8)) {
        prop_assert_eq!(classify(&Value::array(items)), Kind::Array);
    }

    /// PROPERTY: only aggregates are containers.
    #[test]
    fn property_containers_are_aggregates(v in value()) {
        let kind = classify(&v);
        prop_assert_eq!(kind.is_container(), v.is_aggregate());
        if matches!(v, Value::Null | Value::Undefined) {
            prop_assert_eq!(kind, Kind::Other);
        }
    }
}
