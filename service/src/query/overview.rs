//! [`Query`] of the admin [`read::Overview`].

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{Product, User},
    infra::{database, Database},
    read, Service,
};

use super::Query;

/// Queries the admin [`read::Overview`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AdminOverview;

impl<Db> Query<AdminOverview> for Service<Db>
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
    type Ok = read::Overview;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: AdminOverview) -> Result<Self::Ok, Self::Err> {
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

        Ok(read::Overview::new(users, products))
    }
}

#[cfg(test)]
mod spec {
    use crate::{infra::Memory, Service};

    use super::{AdminOverview, Query as _};

    #[tokio::test]
    async fn summarizes_store() {
        let svc = Service::mock(Memory::seeded());

        let overview = svc.execute(AdminOverview).await.unwrap();
        assert_eq!(overview.total_users, 7);
        assert_eq!(overview.active_users, 5);
        assert_eq!(overview.total_products, 7);
        assert_eq!(overview.units_in_stock, 192);
        assert_eq!(overview.recent_users.len(), 3);
        assert_eq!(overview.inventory[0].name.to_string(), "Laptop Pro");
    }
}
