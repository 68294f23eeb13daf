//! Live [`ListView`]s of stored records.
//!
//! Every [`ListView`] owns its search query, [`Debounce`]r and page
//! [`Cursor`], so two views never influence each other.

use std::{marker::PhantomData, time::Duration};

use common::{
    pagination::{Cursor, Page, PageSize, Selector},
    search, Debounce,
};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::{
    access::Actions,
    domain::{Product, Role, User},
    infra::database,
    query::{self, Query},
    Service,
};

/// Default number of rows on a [`ListView`] page.
pub const DEFAULT_PAGE_SIZE: PageSize = match PageSize::new(5) {
    Some(size) => size,
    None => unreachable!(),
};

/// [`ListView`]s configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Number of rows on a single page.
    #[default(DEFAULT_PAGE_SIZE)]
    pub page_size: PageSize,

    /// Delay of applying a typed search query.
    #[default(Duration::from_millis(300))]
    pub search_debounce: Duration,
}

/// Paginated, searchable list of `T`s shown to a single consumer.
///
/// Typed queries go through a [`Debounce`]r: only a query that stayed
/// unchanged for [`Config::search_debounce`] is applied, and applying a new
/// query moves the [`Cursor`] back to the first page.
#[derive(Debug)]
pub struct ListView<T> {
    /// [`Role`] of the consumer.
    role: Role,

    /// [`Actions`] the consumer is allowed to perform.
    actions: Actions,

    /// Number of rows on a single page.
    page_size: PageSize,

    /// Typed search query.
    typed: Debounce<search::Query>,

    /// Search query the shown [`Page`] is filtered with.
    applied: search::Query,

    /// Currently shown page.
    cursor: Cursor,

    /// Number of pages the last loaded [`Page`] reported.
    total_pages: usize,

    /// Type of the listed items.
    _of: PhantomData<fn() -> T>,
}

impl<T> ListView<T> {
    /// Creates a new [`ListView`] showing the first page of everything.
    ///
    /// # Panics
    ///
    /// If called outside of a [`tokio`] runtime with a non-zero
    /// [`Config::search_debounce`].
    #[must_use]
    pub fn new(role: Role, actions: Actions, config: Config) -> Self {
        Self {
            role,
            actions,
            page_size: config.page_size,
            typed: Debounce::new(search::Query::default(), config.search_debounce),
            applied: search::Query::default(),
            cursor: Cursor::default(),
            total_pages: 1,
            _of: PhantomData,
        }
    }

    /// Returns the [`Role`] of the consumer of this [`ListView`].
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns [`Actions`] allowed in this [`ListView`].
    #[must_use]
    pub const fn actions(&self) -> Actions {
        self.actions
    }

    /// Returns the search query the shown [`Page`] is filtered with.
    #[must_use]
    pub fn query(&self) -> &search::Query {
        &self.applied
    }

    /// Returns the currently shown page number.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.cursor.get()
    }

    /// Records a typed search query.
    ///
    /// It's applied only once typing pauses, see [`ListView::settled()`].
    pub fn search(&self, raw: impl Into<String>) {
        self.typed.set(search::Query::new(raw));
    }

    /// Waits for a typed search query to settle and applies it.
    ///
    /// Returns whether the applied query has changed. A changed query moves
    /// this [`ListView`] to the first page.
    ///
    /// Cancel safe.
    pub async fn settled(&mut self) -> bool {
        let query = self.typed.changed().await;
        if query == self.applied {
            return false;
        }
        log::debug!("search query settled on `{query}`");
        self.applied = query;
        self.cursor.reset();
        true
    }

    /// Moves to the provided `page`, clamped into range.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.cursor.go_to(page, self.total_pages)
    }

    /// Moves to the next page, if any.
    pub fn next(&mut self) -> usize {
        self.cursor.next(self.total_pages)
    }

    /// Moves to the previous page, if any.
    pub fn previous(&mut self) -> usize {
        self.cursor.previous(self.total_pages)
    }

    /// Returns the [`query::List`] selecting the currently shown [`Page`].
    #[must_use]
    pub fn list(&self) -> query::List<T> {
        query::List::new(Selector {
            arguments: self.cursor.arguments(self.page_size),
            filter: self.applied.clone(),
        })
    }

    /// Accepts a freshly loaded [`Page`] as the shown one.
    ///
    /// The [`Cursor`] follows the [`Page`], so it stays in range when the
    /// filtered collection shrinks.
    pub fn replace(&mut self, page: Page<T>) -> Snapshot<T> {
        self.total_pages = page.total_pages;
        _ = self.cursor.go_to(page.current, page.total_pages);
        Snapshot {
            page,
            query: self.applied.clone(),
            actions: self.actions,
        }
    }

    /// Loads the currently shown [`Page`] with the provided [`Service`].
    ///
    /// # Errors
    ///
    /// If the [`Service`] fails to execute the [`query::List`].
    pub async fn load<Db>(
        &mut self,
        service: &Service<Db>,
    ) -> Result<Snapshot<T>, Traced<database::Error>>
    where
        Service<Db>: Query<
            query::List<T>,
            Ok = Page<T>,
            Err = Traced<database::Error>,
        >,
    {
        let page = service
            .execute(self.list())
            .await
            .map_err(tracerr::wrap!())?;
        Ok(self.replace(page))
    }
}

impl ListView<User> {
    /// Creates a new [`ListView`] of [`User`]s for the provided [`Role`].
    #[must_use]
    pub fn users(role: Role, config: Config) -> Self {
        Self::new(role, Actions::for_users(role), config)
    }
}

impl ListView<Product> {
    /// Creates a new [`ListView`] of [`Product`]s for the provided [`Role`].
    #[must_use]
    pub fn products(role: Role, config: Config) -> Self {
        Self::new(role, Actions::for_products(role), config)
    }
}

/// State of a [`ListView`] ready to be shown.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot<T> {
    /// Shown [`Page`].
    pub page: Page<T>,

    /// Search query the [`Page`] is filtered with.
    pub query: search::Query,

    /// [`Actions`] allowed on the [`Page`].
    pub actions: Actions,
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use tokio::time;

    use crate::{
        domain::{Product, Role, User},
        infra::Memory,
        Service,
    };

    use super::{Config, ListView};

    #[tokio::test(start_paused = true)]
    async fn applies_query_after_debounce() {
        let svc = Service::mock(Memory::seeded());
        let mut view = ListView::<Product>::products(Role::User, Config::default());

        let snapshot = view.load(&svc).await.unwrap();
        assert_eq!(snapshot.page.total_count, 7);
        assert!(snapshot.actions.is_view_only());

        view.search("w");
        time::sleep(Duration::from_millis(100)).await;
        view.search("wire");
        time::sleep(Duration::from_millis(100)).await;
        view.search("wireless");
        assert_eq!(view.query().to_string(), "");

        assert!(view.settled().await);
        assert_eq!(view.query().to_string(), "wireless");

        let snapshot = view.load(&svc).await.unwrap();
        assert_eq!(snapshot.page.total_count, 1);
        assert_eq!(snapshot.page.items[0].name.to_string(), "Wireless Mouse");
        assert_eq!(snapshot.query.to_string(), "wireless");
    }

    #[tokio::test(start_paused = true)]
    async fn new_query_resets_to_first_page() {
        let svc = Service::mock(Memory::seeded());
        let mut view = ListView::<User>::users(Role::Admin, Config::default());

        _ = view.load(&svc).await.unwrap();
        assert_eq!(view.next(), 2);
        let snapshot = view.load(&svc).await.unwrap();
        assert_eq!(snapshot.page.items.len(), 2);
        assert!(snapshot.actions.delete);

        view.search("e");
        assert!(view.settled().await);
        assert_eq!(view.current_page(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn clamps_cursor_when_collection_shrinks() {
        let svc = Service::mock(Memory::seeded());
        let mut view = ListView::<User>::users(
            Role::Admin,
            Config {
                search_debounce: Duration::ZERO,
                ..Config::default()
            },
        );

        _ = view.load(&svc).await.unwrap();
        assert_eq!(view.go_to(10), 2);
        assert_eq!(view.previous(), 1);
        assert_eq!(view.previous(), 1);

        view.search("admin");
        assert!(view.settled().await);

        let snapshot = view.load(&svc).await.unwrap();
        assert_eq!(snapshot.page.total_pages, 1);
        assert_eq!(snapshot.page.items.len(), 2);
        assert_eq!(view.next(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn views_are_independent() {
        let svc = Service::mock(Memory::seeded());
        let mut first = ListView::<User>::users(Role::Admin, Config::default());
        let mut second = ListView::<User>::users(Role::Admin, Config::default());

        first.search("jane");
        assert!(first.settled().await);
        assert_eq!(first.load(&svc).await.unwrap().page.total_count, 1);
        assert_eq!(second.load(&svc).await.unwrap().page.total_count, 7);
        assert_eq!(second.query().to_string(), "");
    }
}
