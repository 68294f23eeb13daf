//! Abstractions for page-number pagination.
//!
//! Pages are numbered from `1`. Every page number handed out by this module
//! lies within `1..=total_pages`, and `total_pages` is never less than `1`,
//! so an empty collection still has a single (empty) page.

use std::{fmt, num::NonZeroUsize};

use derive_more::{Display, Into};

/// Maximum number of page numbers shown by [`slots()`] at once.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// Number of items on a single [`Page`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Creates a new [`PageSize`] if the given `size` is positive.
    #[must_use]
    pub const fn new(size: usize) -> Option<Self> {
        match NonZeroUsize::new(size) {
            Some(size) => Some(Self(size)),
            None => None,
        }
    }

    /// Returns the number of items as a plain [`usize`].
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(9))
    }
}

/// Calculates how many pages `count` items occupy, never less than `1`.
#[must_use]
pub fn total_pages(count: usize, size: PageSize) -> usize {
    count.div_ceil(size.get()).max(1)
}

/// Clamps the `requested` page number into `1..=total_pages`.
#[must_use]
pub fn clamp(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// Requested page number.
    ///
    /// May be out of range: it's clamped against the actual number of pages
    /// when a [`Page`] is built.
    pub page: usize,

    /// Number of items per page.
    pub size: PageSize,
}

impl Arguments {
    /// Creates new [`Arguments`] out of raw client input.
    ///
    /// A missing or non-positive `page` means the first page. A missing
    /// `size` falls back to the `default` one.
    ///
    /// [`None`] is returned if the provided `size` isn't a positive number.
    pub fn new<Num>(
        page: Option<Num>,
        size: Option<Num>,
        default: PageSize,
    ) -> Option<Self>
    where
        Num: TryInto<usize> + fmt::Debug,
    {
        let size = match size {
            Some(s) => PageSize::new(s.try_into().ok()?)?,
            None => default,
        };
        let page = page.and_then(|p| p.try_into().ok()).unwrap_or(1);
        Some(Self { page, size })
    }

    /// Creates [`Arguments`] requesting the first page of the given `size`.
    #[must_use]
    pub const fn first(size: PageSize) -> Self {
        Self { page: 1, size }
    }
}

/// Pagination selector.
#[derive(Clone, Debug)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied before paginating.
    pub filter: F,
}

/// A single page out of a larger (already filtered) collection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub items: Vec<T>,

    /// Number of this [`Page`], within `1..=total_pages`.
    pub current: usize,

    /// Total number of pages in the collection.
    pub total_pages: usize,

    /// Total number of items in the collection.
    pub total_count: usize,

    /// Number of items per page.
    pub size: PageSize,
}

impl<T> Page<T> {
    /// Indicates whether there is a page after this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    /// Indicates whether there is a page before this one.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    /// Returns page selector [`Slot`]s around this [`Page`].
    #[must_use]
    pub fn slots(&self) -> Vec<Slot> {
        slots(self.total_pages, self.current)
    }

    /// Maps the items of this [`Page`], keeping its position.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current: self.current,
            total_pages: self.total_pages,
            total_count: self.total_count,
            size: self.size,
        }
    }
}

/// Cuts the requested [`Page`] out of the provided `items`.
///
/// The requested page number is clamped before use, so the result always
/// describes an existing page.
#[must_use]
pub fn paginate<T>(items: Vec<T>, arguments: Arguments) -> Page<T> {
    let Arguments { page, size } = arguments;

    let total_count = items.len();
    let total_pages = total_pages(total_count, size);
    let current = clamp(page, total_pages);

    let items = items
        .into_iter()
        .skip((current - 1) * size.get())
        .take(size.get())
        .collect();

    Page {
        items,
        current,
        total_pages,
        total_count,
        size,
    }
}

/// Stateful page cursor of a paginated view.
///
/// Holds `1 <= current <= max(1, total_pages)` as long as every mutation
/// is given the actual number of pages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cursor {
    /// Currently selected page number.
    current: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self { current: 1 }
    }
}

impl Cursor {
    /// Returns the currently selected page number.
    #[must_use]
    pub const fn get(self) -> usize {
        self.current
    }

    /// Moves this [`Cursor`] to the `page`, clamped into range.
    pub fn go_to(&mut self, page: usize, total_pages: usize) -> usize {
        self.current = clamp(page, total_pages);
        self.current
    }

    /// Moves this [`Cursor`] to the next page, if any.
    pub fn next(&mut self, total_pages: usize) -> usize {
        self.go_to(self.current.saturating_add(1), total_pages)
    }

    /// Moves this [`Cursor`] to the previous page, if any.
    pub fn previous(&mut self, total_pages: usize) -> usize {
        self.go_to(self.current.saturating_sub(1), total_pages)
    }

    /// Re-clamps this [`Cursor`] after the collection changed its size.
    pub fn clamp(&mut self, total_pages: usize) -> usize {
        self.go_to(self.current, total_pages)
    }

    /// Moves this [`Cursor`] back to the first page.
    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Returns [`Arguments`] selecting the page under this [`Cursor`].
    #[must_use]
    pub const fn arguments(self, size: PageSize) -> Arguments {
        Arguments {
            page: self.current,
            size,
        }
    }
}

/// Single position in a page selector control.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Slot {
    /// Selectable page number.
    Number(usize),

    /// Gap between non-adjacent page numbers.
    Ellipsis,
}

/// Lays out page selector [`Slot`]s for the `current` page.
///
/// Produces at most [`MAX_VISIBLE_PAGES`] numbers and two ellipses: the first
/// and the last page are always present, together with the neighbourhood of
/// the `current` one.
#[must_use]
pub fn slots(total_pages: usize, current: usize) -> Vec<Slot> {
    use Slot::{Ellipsis, Number};

    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(Number).collect();
    }

    if current <= 3 {
        (1..=4)
            .map(Number)
            .chain([Ellipsis, Number(total_pages)])
            .collect()
    } else if current >= total_pages - 2 {
        [Number(1), Ellipsis]
            .into_iter()
            .chain((total_pages - 3..=total_pages).map(Number))
            .collect()
    } else {
        vec![
            Number(1),
            Ellipsis,
            Number(current - 1),
            Number(current),
            Number(current + 1),
            Ellipsis,
            Number(total_pages),
        ]
    }
}

/// Defines pagination types for a concrete node and filter.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}
