//! Property tests for child pagination.

use std::num::NonZeroUsize;

use proptest::prelude::*;

use tablescope::explorer::{page_range, paginate};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: pages concatenate back to the input, all but the last are full.
    #[test]
    fn property_pages_partition_entries(
        entries in proptest::collection::vec(any::<u16>(), 0..300),
        size in 1usize..50,
    ) {
        let page_size = NonZeroUsize::new(size).unwrap();
        let pages = paginate(&entries, page_size);

        prop_assert_eq!(pages.len(), entries.len().div_ceil(size));
        let joined: Vec<u16> = pages.iter().flat_map(|page| page.iter().copied()).collect();
        prop_assert_eq!(&joined, &entries);
        if let Some((_, full)) = pages.split_last() {
            prop_assert!(full.iter().all(|page| page.len() == size));
        }
    }

    /// PROPERTY: page ranges start at `index * size` and never pass the last child.
    #[test]
    fn property_page_ranges_cover_their_page(
        total in 1usize..500,
        size in 1usize..50,
    ) {
        let page_size = NonZeroUsize::new(size).unwrap();
        let pages = total.div_ceil(size);
        let mut next = 0;
        for index in 0..pages {
            let range = page_range(index, page_size, total);
            prop_assert_eq!(*range.start(), next);
            prop_assert_eq!(*range.start(), index * size);
            prop_assert!(*range.end() < total);
            next = range.end() + 1;
        }
        prop_assert_eq!(next, total);
    }
}
