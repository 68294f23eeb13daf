//! [`Query`] collection related to the multiple [`User`]s.

use common::operations::By;

use crate::domain::User;
#[cfg(doc)]
use crate::{read, Query};

use super::DatabaseQuery;

/// Queries all the [`User`]s in store order.
pub type All = DatabaseQuery<By<Vec<User>, ()>>;

/// Queries a [`read::user::list::Page`] of [`User`]s.
pub type List = super::List<User>;
