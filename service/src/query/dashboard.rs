//! [`Query`] of a personal [`read::Dashboard`].

use common::operations::{By, Select};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    access::Card,
    domain::{Product, Role, Status, User},
    infra::{database, Database},
    read, Service,
};

use super::Query;

/// Queries the [`read::Dashboard`] of a principal with the provided [`Role`].
#[derive(Clone, Copy, Debug)]
pub struct Dashboard {
    /// [`Role`] of the principal.
    pub role: Role,
}

impl<Db> Query<Dashboard> for Service<Db>
where
    Db: Database<
            Select<By<Vec<User>, ()>>,
            Ok = Vec<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Product>, ()>>,
            Ok = Vec<Product>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = read::Dashboard;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Dashboard { role }: Dashboard,
    ) -> Result<Self::Ok, Self::Err> {
        let users = self
            .database()
            .execute(Select(By::<Vec<User>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let products = self
            .database()
            .execute(Select(By::<Vec<Product>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(read::Dashboard::new(role, |card| match card {
            Card::ActiveUsers => users
                .iter()
                .filter(|u| u.status == Status::Active)
                .count()
                .into(),
            Card::Products => products.len().into(),
            Card::Revenue => products
                .iter()
                .map(|p| p.price.amount() * Decimal::from(p.stock))
                .sum(),
            Card::DataEntries => (users.len() + products.len()).into(),
        }))
    }
}
