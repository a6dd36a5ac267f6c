//! Fixed-size paging of child entries.

use std::num::NonZeroUsize;
use std::ops::RangeInclusive;

/// Page size used when the caller doesn't pick one.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(size) => size,
    None => panic!("default page size must be non-zero"),
};

/// Split `entries` into contiguous pages of `page_size`, in order.
///
/// Every page but the last is full; an empty input yields no pages.
pub fn paginate<T>(entries: &[T], page_size: NonZeroUsize) -> Vec<&[T]> {
    entries.chunks(page_size.get()).collect()
}

/// Inclusive child-index range covered by page `index`.
///
/// The end is clamped to the last child, so a short final page reports the
/// indices it actually holds.
pub fn page_range(index: usize, page_size: NonZeroUsize, total: usize) -> RangeInclusive<usize> {
    let start = index * page_size.get();
    let end = (start + page_size.get()).min(total).max(start + 1) - 1;
    start..=end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn splits_with_short_last_page() {
        let items = [10, 20, 30];
        let pages = paginate(&items, size(2));
        assert_eq!(pages, vec![&[10, 20][..], &[30][..]]);
    }

    #[test]
    fn exact_multiple_has_no_short_page() {
        let items: Vec<u32> = (0..6).collect();
        let pages = paginate(&items, size(3));
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.len() == 3));
    }

    #[test]
    fn empty_input_has_no_pages() {
        let items: [u8; 0] = [];
        assert!(paginate(&items, size(5)).is_empty());
    }

    #[test]
    fn ranges_clamp_to_total() {
        assert_eq!(page_range(0, size(2), 3), 0..=1);
        assert_eq!(page_range(1, size(2), 3), 2..=2);
        assert_eq!(page_range(1, size(100), 250), 100..=199);
        assert_eq!(page_range(2, size(100), 250), 200..=249);
    }
}
