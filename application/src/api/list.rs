//! Paginated lists of GraphQL objects.

use common::pagination::{self, Page};
use juniper::{GraphQLEnum, GraphQLObject};
use service::access;

use crate::{api, Context};

/// Converts a count into a GraphQL `Int`, saturating on overflow.
fn int(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Defines a GraphQL page object over a list of `$node`s.
macro_rules! define_page {
    ($(#[doc = $doc:literal])* $name:ident, $node:ty, $gql:literal) => {
        $(#[doc = $doc])*
        #[derive(Clone, Debug, GraphQLObject)]
        #[graphql(name = $gql, context = Context)]
        pub struct $name {
            /// Items on this page.
            pub items: Vec<$node>,

            /// Number of this page, starting from `1`.
            pub current_page: i32,

            /// Total number of pages, never less than `1`.
            pub total_pages: i32,

            /// Total number of items matching the search query.
            pub total_count: i32,

            /// Indicates whether there is a next page.
            pub has_next: bool,

            /// Indicates whether there is a previous page.
            pub has_previous: bool,

            /// Page selector layout around this page.
            pub slots: Vec<Slot>,

            /// Actions the viewer may perform on the items.
            pub actions: Actions,
        }

        impl $name {
            /// Creates a new page out of the provided [`Page`].
            pub(crate) fn new<T: Into<$node>>(
                page: Page<T>,
                actions: access::Actions,
            ) -> Self {
                let slots = page.slots().into_iter().map(Into::into).collect();
                Self {
                    current_page: int(page.current),
                    total_pages: int(page.total_pages),
                    total_count: int(page.total_count),
                    has_next: page.has_next(),
                    has_previous: page.has_previous(),
                    items: page.items.into_iter().map(Into::into).collect(),
                    slots,
                    actions: actions.into(),
                }
            }
        }
    };
}

define_page!(
    /// Page of `User`s.
    UserPage,
    api::User,
    "UserPage"
);

define_page!(
    /// Page of `Product`s.
    ProductPage,
    api::Product,
    "ProductPage"
);

/// Kind of a page selector `Slot`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum SlotKind {
    /// Selectable page number.
    Page,

    /// Gap between non-adjacent page numbers.
    Ellipsis,
}

/// Single position in a page selector.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "PageSlot")]
pub struct Slot {
    /// Kind of this `Slot`.
    pub kind: SlotKind,

    /// Page number, if this `Slot` is a `PAGE`.
    pub page: Option<i32>,
}

impl From<pagination::Slot> for Slot {
    fn from(slot: pagination::Slot) -> Self {
        match slot {
            pagination::Slot::Number(n) => Self {
                kind: SlotKind::Page,
                page: Some(int(n)),
            },
            pagination::Slot::Ellipsis => Self {
                kind: SlotKind::Ellipsis,
                page: None,
            },
        }
    }
}

/// Actions available in a list.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "ListActions")]
pub struct Actions {
    /// Whether a new item can be created.
    pub create: bool,

    /// Whether an item can be edited.
    pub edit: bool,

    /// Whether an item can be deleted.
    pub delete: bool,
}

impl From<access::Actions> for Actions {
    fn from(a: access::Actions) -> Self {
        Self {
            create: a.create,
            edit: a.edit,
            delete: a.delete,
        }
    }
}
