//! [`Query`] definition.

pub mod dashboard;
pub mod overview;
pub mod product;
pub mod products;
pub mod user;
pub mod users;

use std::marker::PhantomData;

use common::{
    operations::{By, Select},
    pagination::{self, Page, Selector},
    search, Searchable,
};
use tracerr::Traced;

use crate::{
    infra::{database, Database},
    Service,
};

pub use self::{dashboard::Dashboard, overview::AdminOverview};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Database`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct DatabaseQuery<T>(T);

impl<W, B> DatabaseQuery<By<W, B>> {
    /// Creates a new [`DatabaseQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, W, B> Query<DatabaseQuery<By<W, B>>> for Service<Db>
where
    Db: Database<Select<By<W, B>>, Ok = W, Err = Traced<database::Error>>,
{
    type Ok = W;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        DatabaseQuery(by): DatabaseQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// [`Query`] selecting a [`Page`] of `T`s matching a [`search::Query`].
///
/// The whole collection is read, filtered preserving the store order, and
/// only then paginated. The requested page is clamped into range.
#[derive(Clone, Debug)]
pub struct List<T> {
    /// [`Selector`] of the [`Page`].
    selector: Selector<search::Query>,

    /// Type of the listed items.
    _of: PhantomData<fn() -> T>,
}

impl<T> List<T> {
    /// Creates a new [`List`] query with the provided [`Selector`].
    #[must_use]
    pub fn new(selector: Selector<search::Query>) -> Self {
        Self {
            selector,
            _of: PhantomData,
        }
    }
}

impl<Db, T> Query<List<T>> for Service<Db>
where
    Db: Database<
        Select<By<Vec<T>, ()>>,
        Ok = Vec<T>,
        Err = Traced<database::Error>,
    >,
    T: Searchable,
{
    type Ok = Page<T>;
    type Err = Traced<database::Error>;

    async fn execute(&self, query: List<T>) -> Result<Self::Ok, Self::Err> {
        let Selector { arguments, filter } = query.selector;

        let all = self
            .database()
            .execute(Select(By::<Vec<T>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(pagination::paginate(search::filter(all, &filter), arguments))
    }
}

#[cfg(test)]
mod spec {
    use common::{
        pagination::{Arguments, PageSize, Selector},
        search,
    };

    use crate::{
        domain::{Product, User},
        infra::Memory,
        Service,
    };

    use super::{List, Query as _};

    fn selector(query: &str, page: usize) -> Selector<search::Query> {
        Selector {
            arguments: Arguments {
                page,
                size: PageSize::new(5).unwrap(),
            },
            filter: search::Query::new(query),
        }
    }

    #[tokio::test]
    async fn pages_seven_users_by_five() {
        let svc = Service::mock(Memory::seeded());

        let first = svc.execute(List::<User>::new(selector("", 1))).await.unwrap();
        assert_eq!(first.items.len(), 5);
        assert_eq!(first.total_pages, 2);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let second = svc.execute(List::<User>::new(selector("", 2))).await.unwrap();
        assert_eq!(second.items.len(), 2);
        assert_eq!(second.items[0].name.to_string(), "Diana Prince");
        assert!(!second.has_next());
        assert!(second.has_previous());
    }

    #[tokio::test]
    async fn filters_before_paginating() {
        let svc = Service::mock(Memory::seeded());

        let page = svc
            .execute(List::<Product>::new(selector("WIRELESS", 1)))
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].name.to_string(), "Wireless Mouse");

        let page = svc
            .execute(List::<Product>::new(selector("electronics", 9)))
            .await
            .unwrap();
        assert_eq!(page.current, 1);
        assert_eq!(page.total_count, 3);

        let nothing = svc
            .execute(List::<User>::new(selector("nobody", 1)))
            .await
            .unwrap();
        assert!(nothing.items.is_empty());
        assert_eq!(nothing.total_pages, 1);
    }
}
