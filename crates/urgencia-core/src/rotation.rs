//! Display rotation controller.
//!
//! Pages a bounded physical display through a longer ordered list. The
//! phase is local to one display surface; it is never broadcast and never
//! synchronized between displays.

/// Patients shown per page on the waiting-room display.
pub const PAGE_CAPACITY: usize = 3;

/// Seconds between automatic page advances.
pub const ROTATION_INTERVAL_SECS: u64 = 8;

/// Cycles through fixed-size pages of a list on a caller-driven cadence.
///
/// Any list-length change re-anchors to page 0: recency wins over
/// continuity, so the top-priority page is always shown right after a
/// change.
#[derive(Debug)]
pub struct RotationController {
    capacity: usize,
    len: usize,
    page: usize,
}

impl RotationController {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "page capacity must be positive");
        Self {
            capacity,
            len: 0,
            page: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages for the current list length, never zero.
    pub fn page_count(&self) -> usize {
        if self.len == 0 {
            1
        } else {
            self.len.div_ceil(self.capacity)
        }
    }

    /// Inform the controller of the current list length. A change resets
    /// the phase to page 0.
    pub fn sync_len(&mut self, len: usize) {
        if len != self.len {
            self.len = len;
            self.page = 0;
        }
    }

    /// Timer tick: advance to the next page, wrapping to 0.
    pub fn tick(&mut self) {
        self.page = (self.page + 1) % self.page_count();
    }

    /// The slice of `items` visible on the current page.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.page * self.capacity;
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.capacity).min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_items_make_three_pages() {
        let mut pager = RotationController::new(PAGE_CAPACITY);
        pager.sync_len(7);
        assert_eq!(pager.page_count(), 3);
    }

    #[test]
    fn three_ticks_return_to_page_zero() {
        let mut pager = RotationController::new(PAGE_CAPACITY);
        pager.sync_len(7);
        pager.tick();
        assert_eq!(pager.page(), 1);
        pager.tick();
        assert_eq!(pager.page(), 2);
        pager.tick();
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn length_change_resets_to_page_zero() {
        let mut pager = RotationController::new(PAGE_CAPACITY);
        pager.sync_len(9);
        pager.tick();
        pager.tick();
        assert_eq!(pager.page(), 2);

        pager.sync_len(8);
        assert_eq!(pager.page(), 0);

        // Same length keeps the phase.
        pager.tick();
        pager.sync_len(8);
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn window_slices_the_current_page() {
        let items: Vec<u32> = (0..7).collect();
        let mut pager = RotationController::new(PAGE_CAPACITY);
        pager.sync_len(items.len());

        assert_eq!(pager.window(&items), &[0, 1, 2]);
        pager.tick();
        assert_eq!(pager.window(&items), &[3, 4, 5]);
        pager.tick();
        assert_eq!(pager.window(&items), &[6]);
        pager.tick();
        assert_eq!(pager.window(&items), &[0, 1, 2]);
    }

    #[test]
    fn empty_list_is_one_empty_page() {
        let items: Vec<u32> = Vec::new();
        let mut pager = RotationController::new(PAGE_CAPACITY);
        pager.sync_len(0);
        assert_eq!(pager.page_count(), 1);
        assert!(pager.window(&items).is_empty());
        pager.tick();
        assert_eq!(pager.page(), 0);
    }
}
