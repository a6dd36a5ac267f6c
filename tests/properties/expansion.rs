//! Property tests for default-expansion resolution.

use proptest::prelude::*;

use tablescope::explorer::{resolve, DefaultExpansion};

use crate::strategies::label;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `resolve(true, l)` is `{l: true}`.
    #[test]
    fn property_true_resolves_to_single_entry_mapping(l in label()) {
        let child = resolve(&DefaultExpansion::All, &l);
        prop_assert!(child.is_expanded());
        prop_assert_eq!(child.resolve(&l), DefaultExpansion::All);
    }

    /// PROPERTY: collapsed stays collapsed at every depth.
    #[test]
    fn property_collapsed_is_absorbing(labels in proptest::collection::vec(label(), 0..6)) {
        let mut current = DefaultExpansion::Collapsed;
        for l in &labels {
            current = resolve(&current, l);
        }
        prop_assert_eq!(current, DefaultExpansion::Collapsed);
    }

    /// PROPERTY: a mapping entry is found by its label text, anything else is collapsed.
    #[test]
    fn property_mapping_lookup(a in label(), b in label()) {
        let expansion = DefaultExpansion::along([a.to_string()]);
        prop_assert_eq!(resolve(&expansion, &a), DefaultExpansion::All);
        if a.to_string() != b.to_string() {
            prop_assert_eq!(resolve(&expansion, &b), DefaultExpansion::Collapsed);
        }
    }
}
