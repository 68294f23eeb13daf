//! Case-insensitive substring search over a fixed set of fields.

use derive_more::{AsRef, Display};

/// Item which can be matched by a search [`Query`].
pub trait Searchable {
    /// Returns the text fields of this item a [`Query`] is matched against.
    ///
    /// The item matches if *any* of the returned fields contains the query.
    fn search_fields(&self) -> impl IntoIterator<Item = &str>;
}

impl<T: Searchable> Searchable for &T {
    fn search_fields(&self) -> impl IntoIterator<Item = &str> {
        (**self).search_fields()
    }
}

/// Search query as typed by a user.
#[derive(AsRef, Clone, Debug, Default, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Query(String);

impl Query {
    /// Creates a new [`Query`] out of raw user input.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Indicates whether this [`Query`] matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether the provided `item` matches this [`Query`].
    #[must_use]
    pub fn matches(&self, item: &impl Searchable) -> bool {
        if self.is_empty() {
            return true;
        }
        let needle = self.0.to_lowercase();
        Self::matches_lowercase(&needle, item)
    }

    /// Checks the `item` against an already lowercased `needle`.
    fn matches_lowercase(needle: &str, item: &impl Searchable) -> bool {
        item.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl From<String> for Query {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for Query {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

/// Keeps only the `items` matching the `query`, preserving their order.
///
/// An empty `query` keeps everything.
#[must_use]
pub fn filter<T: Searchable>(items: Vec<T>, query: &Query) -> Vec<T> {
    if query.is_empty() {
        return items;
    }
    let needle = query.0.to_lowercase();
    items
        .into_iter()
        .filter(|item| Query::matches_lowercase(&needle, item))
        .collect()
}
