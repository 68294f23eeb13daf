//! JSON frames sent by page routes and live lists.

use common::pagination::{self, Page};
use serde::Serialize;
use service::{access, domain, read, view::Snapshot};

/// Serialized state of a paginated list.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct List<T> {
    /// Rows of the shown page.
    pub items: Vec<T>,

    /// Number of the shown page, starting from `1`.
    pub current_page: usize,

    /// Total number of pages, never less than `1`.
    pub total_pages: usize,

    /// Number of items matching the query.
    pub total_count: usize,

    /// Whether there is a next page.
    pub has_next: bool,

    /// Whether there is a previous page.
    pub has_previous: bool,

    /// Page selector layout.
    pub slots: Vec<Slot>,

    /// Applied search query.
    pub query: String,

    /// Actions the viewer may perform.
    pub actions: Actions,
}

impl<T> List<T> {
    /// Creates a new [`List`] frame out of the provided [`Snapshot`].
    pub fn new<S: Into<T>>(snapshot: Snapshot<S>) -> Self {
        let Snapshot {
            page,
            query,
            actions,
        } = snapshot;
        let slots = page.slots().into_iter().map(Into::into).collect();
        let Page {
            items,
            current,
            total_pages,
            total_count,
            ..
        } = page;
        Self {
            has_next: current < total_pages,
            has_previous: current > 1,
            items: items.into_iter().map(Into::into).collect(),
            current_page: current,
            total_pages,
            total_count,
            slots,
            query: query.to_string(),
            actions: actions.into(),
        }
    }
}

/// Single position of a page selector.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Slot {
    /// Selectable page number.
    Page {
        /// Page number.
        page: usize,
    },

    /// Gap between non-adjacent page numbers.
    Ellipsis,
}

impl From<pagination::Slot> for Slot {
    fn from(slot: pagination::Slot) -> Self {
        match slot {
            pagination::Slot::Number(page) => Self::Page { page },
            pagination::Slot::Ellipsis => Self::Ellipsis,
        }
    }
}

/// Actions available in a list.
#[derive(Clone, Copy, Debug, Serialize)]
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

/// Row of a user list.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier.
    pub id: String,
    /// Name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: &'static str,
    /// Account status.
    pub status: &'static str,
    /// RFC 3339 creation moment.
    pub created_at: String,
}

impl From<domain::User> for User {
    fn from(u: domain::User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.to_string(),
            email: u.email.to_string(),
            role: u.role.as_str(),
            status: u.status.as_str(),
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Row of a product list.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier.
    pub id: String,
    /// Name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Price with two fraction digits.
    pub price: String,
    /// Units in stock.
    pub stock: u32,
    /// Category.
    pub category: String,
    /// RFC 3339 creation moment.
    pub created_at: String,
}

impl From<domain::Product> for Product {
    fn from(p: domain::Product) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.to_string(),
            description: p.description.to_string(),
            price: p.price.to_string(),
            stock: p.stock,
            category: p.category.to_string(),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Personal dashboard.
#[derive(Clone, Debug, Serialize)]
pub struct Dashboard {
    /// Role the dashboard is built for.
    pub role: &'static str,

    /// Visible navigation entries.
    pub navigation: Vec<NavItem>,

    /// Visible statistic cards.
    pub stats: Vec<Stat>,
}

impl From<read::Dashboard> for Dashboard {
    fn from(d: read::Dashboard) -> Self {
        Self {
            role: d.role.as_str(),
            navigation: d
                .navigation
                .into_iter()
                .map(|i| NavItem {
                    href: i.href,
                    title: i.title,
                })
                .collect(),
            stats: d
                .stats
                .into_iter()
                .map(|s| Stat {
                    title: s.card.to_string(),
                    value: s.value.to_string(),
                })
                .collect(),
        }
    }
}

/// Navigation entry.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct NavItem {
    /// Location the entry leads to.
    pub href: &'static str,
    /// Human-readable title.
    pub title: &'static str,
}

/// Statistic card.
#[derive(Clone, Debug, Serialize)]
pub struct Stat {
    /// Human-readable title.
    pub title: String,
    /// Decimal value.
    pub value: String,
}

/// Administrative overview.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    /// Number of all users.
    pub total_users: usize,
    /// Number of active users.
    pub active_users: usize,
    /// Number of all products.
    pub total_products: usize,
    /// Number of product units in stock.
    pub units_in_stock: u64,
    /// First users of the store.
    pub recent_users: Vec<User>,
    /// First products of the store.
    pub inventory: Vec<Product>,
}

impl From<read::Overview> for Overview {
    fn from(o: read::Overview) -> Self {
        Self {
            total_users: o.total_users,
            active_users: o.active_users,
            total_products: o.total_products,
            units_in_stock: o.units_in_stock,
            recent_users: o.recent_users.into_iter().map(Into::into).collect(),
            inventory: o.inventory.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::pagination::Slot as PageSlot;
    use serde_json::json;

    use super::Slot;

    #[test]
    fn tags_slots() {
        assert_eq!(
            serde_json::to_value(Slot::from(PageSlot::Number(3))).unwrap(),
            json!({"type": "page", "page": 3}),
        );
        assert_eq!(
            serde_json::to_value(Slot::from(PageSlot::Ellipsis)).unwrap(),
            json!({"type": "ellipsis"}),
        );
    }
}
