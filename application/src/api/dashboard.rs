//! Dashboard-related GraphQL objects.

use juniper::GraphQLObject;
use service::{access, read};

use crate::{api, Context, Session};

/// The principal performing the request.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Viewer {
    /// Indicates whether the request carries a valid session token.
    pub authenticated: bool,

    /// Identity provider subject, if authenticated.
    pub subject: Option<String>,

    /// Resolved `UserRole` of the principal.
    pub role: api::user::Role,

    /// Navigation menu visible to the principal.
    pub navigation: Vec<NavItem>,
}

impl From<Option<Session>> for Viewer {
    fn from(session: Option<Session>) -> Self {
        let role = session.as_ref().map(|s| s.role).unwrap_or_default();
        Self {
            authenticated: session.is_some(),
            subject: session.map(|s| s.subject.to_string()),
            role: role.into(),
            navigation: access::navigation(role).map(Into::into).collect(),
        }
    }
}

/// Personal dashboard of the principal.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Dashboard {
    /// `UserRole` the `Dashboard` is built for.
    pub role: api::user::Role,

    /// Navigation menu visible to the principal.
    pub navigation: Vec<NavItem>,

    /// Statistics visible to the principal, in display order.
    pub stats: Vec<Stat>,
}

impl From<read::Dashboard> for Dashboard {
    fn from(d: read::Dashboard) -> Self {
        Self {
            role: d.role.into(),
            navigation: d.navigation.into_iter().map(Into::into).collect(),
            stats: d.stats.into_iter().map(Into::into).collect(),
        }
    }
}

/// Entry of the navigation menu.
#[derive(Clone, Debug, GraphQLObject)]
pub struct NavItem {
    /// Location the entry leads to.
    pub href: String,

    /// Title of the entry.
    pub title: String,
}

impl From<access::NavItem> for NavItem {
    fn from(i: access::NavItem) -> Self {
        Self {
            href: i.href.to_owned(),
            title: i.title.to_owned(),
        }
    }
}

/// Single statistic of a `Dashboard`.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Stat {
    /// Title of the card showing this `Stat`.
    pub title: String,

    /// Decimal value of this `Stat`.
    pub value: String,
}

impl From<read::dashboard::Stat> for Stat {
    fn from(s: read::dashboard::Stat) -> Self {
        Self {
            title: s.card.to_string(),
            value: s.value.to_string(),
        }
    }
}

/// Administrative overview of the stored records.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct Overview {
    /// Number of all `User`s.
    pub total_users: i32,

    /// Number of active `User`s.
    pub active_users: i32,

    /// Number of all `Product`s.
    pub total_products: i32,

    /// Number of `Product` units in stock.
    pub units_in_stock: i32,

    /// First `User`s of the store.
    pub recent_users: Vec<api::User>,

    /// First `Product`s of the store.
    pub inventory: Vec<api::Product>,
}

impl From<read::Overview> for Overview {
    fn from(o: read::Overview) -> Self {
        Self {
            total_users: int(o.total_users),
            active_users: int(o.active_users),
            total_products: int(o.total_products),
            units_in_stock: int(o.units_in_stock),
            recent_users: o.recent_users.into_iter().map(Into::into).collect(),
            inventory: o.inventory.into_iter().map(Into::into).collect(),
        }
    }
}

/// Converts a count into a GraphQL `Int`, saturating on overflow.
fn int<N: TryInto<i32>>(n: N) -> i32 {
    n.try_into().unwrap_or(i32::MAX)
}
