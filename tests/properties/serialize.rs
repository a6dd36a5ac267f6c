//! Property tests for leaf serialization and rendering.

use proptest::prelude::*;
use unicode_width::UnicodeWidthStr;

use tablescope::explorer::{to_display_string, TreePath, CIRCULAR};
use tablescope::{Explorer, ExplorerOptions, Value};

use crate::strategies::value;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: display strings never exceed the width limit (plus the ellipsis).
    #[test]
    fn property_display_string_is_bounded(v in value(), max in 0usize..40) {
        let text = to_display_string(&v, max);
        prop_assert!(text.width() <= max + 1, "{:?} is wider than {}", text, max);
    }

    /// PROPERTY: acyclic values never show the cycle placeholder.
    #[test]
    fn property_acyclic_values_are_not_circular(v in value()) {
        prop_assert_ne!(to_display_string(&v, usize::MAX), CIRCULAR);
    }

    /// PROPERTY: a self-referencing array always shows the cycle placeholder.
    #[test]
    fn property_cycles_render(v in value()) {
        let holder = Value::array([]);
        if let Value::Array(items) = &holder {
            items.borrow_mut().push(holder.clone());
            items.borrow_mut().push(v);
        }
        let text = to_display_string(&holder, 500);
        prop_assert_eq!(text, CIRCULAR);
    }

    /// PROPERTY: fully expanded rendering of any value completes.
    #[test]
    fn property_expanded_render_never_panics(v in value(), page_size in 1usize..4) {
        let options = ExplorerOptions::builder()
            .page_size(page_size)
            .default_expanded(true)
            .build()
            .unwrap();
        let mut explorer = Explorer::new("root", v, &options);
        let root = TreePath::root("root");
        explorer.toggle(&root, Some(true)).unwrap();
        let visual = explorer.render();
        prop_assert_eq!(visual.path(), &root);
    }
}
