//! [`Query`] collection related to the multiple [`Product`]s.

use common::operations::By;

use crate::domain::Product;
#[cfg(doc)]
use crate::{read, Query};

use super::DatabaseQuery;

/// Queries all the [`Product`]s in store order.
pub type All = DatabaseQuery<By<Vec<Product>, ()>>;

/// Queries a [`read::product::list::Page`] of [`Product`]s.
pub type List = super::List<Product>;
