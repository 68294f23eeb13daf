//! [`Product`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api::scalar, define_error, Context};

/// A [`Product`] of the catalog.
#[derive(Clone, Debug, From)]
pub struct Product(domain::Product);

/// A `Product` of the catalog.
#[graphql_object(context = Context)]
impl Product {
    /// Unique identifier of this `Product`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `Product`.
    #[must_use]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Description of this `Product`.
    #[must_use]
    pub fn description(&self) -> Description {
        self.0.description.clone().into()
    }

    /// Unit price of this `Product`.
    #[must_use]
    pub fn price(&self) -> Price {
        self.0.price.into()
    }

    /// Number of units in stock.
    #[must_use]
    pub fn stock(&self) -> i32 {
        i32::try_from(self.0.stock).unwrap_or(i32::MAX)
    }

    /// Category of this `Product`.
    #[must_use]
    pub fn category(&self) -> Category {
        self.0.category.clone().into()
    }

    /// `DateTime` when this `Product` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Product`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::product::Id)]
#[into(domain::product::Id)]
#[graphql(name = "ProductId", transparent)]
pub struct Id(Uuid);

/// Name of a `Product`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProductName",
    with = scalar::Via::<domain::product::Name>,
)]
pub struct Name(domain::product::Name);

/// Description of a `Product`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProductDescription",
    with = scalar::Via::<domain::product::Description>,
)]
pub struct Description(domain::product::Description);

/// Category of a `Product`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProductCategory",
    with = scalar::Via::<domain::product::Category>,
)]
pub struct Category(domain::product::Category);

/// Price of a `Product`, as a decimal string with two fraction digits.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProductPrice",
    with = scalar::Via::<domain::product::Price>,
)]
pub struct Price(domain::product::Price);

define_error! {
    enum ProductError {
        #[code = "PRODUCT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Product` does not exist"]
        NotExists,
    }
}
