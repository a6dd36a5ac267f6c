//! Property tests for per-path tree state.

use proptest::prelude::*;

use tablescope::explorer::{DefaultExpansion, TreeState};

use crate::strategies::tree_path;

fn expansion() -> impl Strategy<Value = DefaultExpansion> {
    prop_oneof![
        Just(DefaultExpansion::Collapsed),
        Just(DefaultExpansion::All),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `toggle(path, Some(x))` is idempotent.
    #[test]
    fn property_explicit_toggle_is_idempotent(
        path in tree_path(),
        default in expansion(),
        flag in any::<bool>(),
    ) {
        let mut state = TreeState::new();
        state.toggle(&path, &default, Some(flag));
        prop_assert_eq!(state.is_expanded(&path, &default), flag);
        state.toggle(&path, &default, Some(flag));
        prop_assert_eq!(state.is_expanded(&path, &default), flag);
    }

    /// PROPERTY: `toggle(path, None)` twice restores the original flag.
    #[test]
    fn property_flip_is_an_involution(path in tree_path(), default in expansion()) {
        let mut state = TreeState::new();
        let before = state.is_expanded(&path, &default);
        let flipped = state.toggle(&path, &default, None);
        prop_assert_eq!(flipped, !before);
        state.toggle(&path, &default, None);
        prop_assert_eq!(state.is_expanded(&path, &default), before);
    }

    /// PROPERTY: toggling a page twice leaves it closed, other pages untouched.
    #[test]
    fn property_page_toggle_is_an_involution(
        path in tree_path(),
        page in 0usize..20,
        other in 0usize..20,
    ) {
        prop_assume!(page != other);
        let mut state = TreeState::new();
        state.toggle_page(&path, other);

        prop_assert!(state.toggle_page(&path, page));
        prop_assert!(!state.toggle_page(&path, page));
        prop_assert!(!state.is_page_open(&path, page));
        prop_assert_eq!(state.open_pages(&path), vec![other]);
    }
}
