//! [`Dashboard`] read model definition.

use rust_decimal::Decimal;

use crate::{
    access::{self, Card, NavItem},
    domain::Role,
};

/// Personal dashboard of a principal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dashboard {
    /// [`Role`] the [`Dashboard`] is built for.
    pub role: Role,

    /// Navigation menu visible to the [`Role`].
    pub navigation: Vec<NavItem>,

    /// [`Stat`]s visible to the [`Role`], in display order.
    pub stats: Vec<Stat>,
}

impl Dashboard {
    /// Creates a new [`Dashboard`] for the provided [`Role`], picking the
    /// visible [`Stat`]s out of `values`.
    #[must_use]
    pub fn new(role: Role, values: impl Fn(Card) -> Decimal) -> Self {
        Self {
            role,
            navigation: access::navigation(role).collect(),
            stats: Card::visible(role)
                .map(|card| Stat {
                    card,
                    value: values(card),
                })
                .collect(),
        }
    }
}

/// Single statistic shown on a [`Dashboard`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Stat {
    /// [`Card`] presenting this [`Stat`].
    pub card: Card,

    /// Value of this [`Stat`].
    pub value: Decimal,
}
