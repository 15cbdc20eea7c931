//! Abstractions for offset pagination.

use std::ops::RangeInclusive;

/// A page sliced out of a list of items.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Page<'a, T> {
    /// Items on this [`Page`], never more than the page size.
    pub items: &'a [T],

    /// Total number of pages in the whole list.
    pub total_pages: usize,

    /// [`DisplayRange`] of this [`Page`].
    pub range: DisplayRange,
}

/// 1-based inclusive range of the items shown on a [`Page`], along with the
/// total number of items.
///
/// `start` and `end` are both `0` whenever the [`Page`] is empty.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DisplayRange {
    /// Position of the first item on the page.
    pub start: usize,

    /// Position of the last item on the page.
    pub end: usize,

    /// Total number of items in the list.
    pub total: usize,
}

/// Slices the `page` (1-based) of the provided `items`.
///
/// Doesn't clamp the `page`: out of range pages yield an empty [`Page`].
/// A zero `size` is treated as `1`.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, size: usize) -> Page<'_, T> {
    let size = size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(size);

    let offset = page.checked_sub(1).map(|p| p.saturating_mul(size));
    let (offset, slice) = offset
        .and_then(|o| {
            let end = o.saturating_add(size).min(total);
            Some((o, items.get(o..end)?))
        })
        .unwrap_or_default();
    let end = offset + slice.len();

    let range = if slice.is_empty() {
        DisplayRange {
            start: 0,
            end: 0,
            total,
        }
    } else {
        DisplayRange {
            start: offset + 1,
            end,
            total,
        }
    };

    Page {
        items: slice,
        total_pages,
        range,
    }
}

/// State of a paginated list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageState {
    /// Current 1-based page.
    current: usize,

    /// Number of items per page.
    size: usize,

    /// Total number of items.
    total_items: usize,
}

impl PageState {
    /// Creates a new [`PageState`] on the first page of an empty list.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            current: 1,
            size: size.max(1),
            total_items: 0,
        }
    }

    /// Returns the current 1-based page.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Returns the number of items per page.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.size)
    }

    /// Sets the total number of items, clamping the current page downward so
    /// it stays within `1..=max(total_pages, 1)`.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current = self.current.clamp(1, self.total_pages().max(1));
    }

    /// Moves to the first page.
    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Moves to the `target` page if it's within `1..=total_pages`.
    ///
    /// Returns whether the move was accepted.
    pub fn go_to(&mut self, target: usize) -> bool {
        let accepted = (1..=self.total_pages()).contains(&target);
        if accepted {
            self.current = target;
        }
        accepted
    }

    /// Returns the [`Window`] of page buttons around the current page.
    #[must_use]
    pub fn window(&self, radius: usize) -> Window {
        let total_pages = self.total_pages();
        Window {
            pages: self.current.saturating_sub(radius).max(1)
                ..=self.current.saturating_add(radius).min(total_pages),
            has_previous: self.current > 1,
            has_next: self.current < total_pages,
        }
    }
}

/// Page buttons of a pagination bar.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Window {
    /// Page numbers to display. Empty when there are no pages.
    pub pages: RangeInclusive<usize>,

    /// Indicator whether a previous page exists.
    pub has_previous: bool,

    /// Indicator whether a next page exists.
    pub has_next: bool,
}
