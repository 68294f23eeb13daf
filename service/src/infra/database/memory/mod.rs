//! In-memory [`Database`] implementation.

mod seed;

use std::sync::Arc;

use common::operations::{By, Delete, Insert, Select, Update};
use tokio::sync::RwLock;
use tracerr::Traced;

use crate::{
    domain::{product, user, Product, User},
    infra::{database, Database},
};

/// In-memory [`Database`] living as long as the process does.
///
/// Clones share the same records. Concurrent writers are serialized, and
/// the last write wins.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Stored [`User`]s, in insertion order.
    users: Arc<RwLock<Vec<User>>>,

    /// Stored [`Product`]s, in insertion order.
    products: Arc<RwLock<Vec<Product>>>,
}

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`Memory`] database filled with mock records.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            users: Arc::new(RwLock::new(seed::users())),
            products: Arc::new(RwLock::new(seed::products())),
        }
    }
}

/// Record stored in a [`Memory`] database.
pub trait Record: Clone {
    /// Type of this [`Record`] ID.
    type Id: Copy + Eq;

    /// Returns the ID of this [`Record`].
    fn id(&self) -> Self::Id;

    /// Returns the collection of this [`Record`] kind in the `db`.
    fn collection(db: &Memory) -> &RwLock<Vec<Self>>;
}

impl Record for User {
    type Id = user::Id;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn collection(db: &Memory) -> &RwLock<Vec<Self>> {
        &db.users
    }
}

impl Record for Product {
    type Id = product::Id;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn collection(db: &Memory) -> &RwLock<Vec<Self>> {
        &db.products
    }
}

impl<T: Record> Database<Select<By<Vec<T>, ()>>> for Memory {
    type Ok = Vec<T>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<T>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(T::collection(self).read().await.clone())
    }
}

impl<T: Record> Database<Select<By<Option<T>, T::Id>>> for Memory {
    type Ok = Option<T>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<T>, T::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(T::collection(self)
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }
}

impl<T: Record> Database<Insert<T>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(record): Insert<T>,
    ) -> Result<Self::Ok, Self::Err> {
        T::collection(self).write().await.push(record);
        Ok(())
    }
}

impl<T: Record> Database<Update<T>> for Memory {
    /// Whether the record existed and was replaced.
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(record): Update<T>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut records = T::collection(self).write().await;
        let id = record.id();
        Ok(records
            .iter_mut()
            .find(|r| r.id() == id)
            .map(|stored| *stored = record)
            .is_some())
    }
}

impl<T: Record> Database<Delete<By<Option<T>, T::Id>>> for Memory {
    type Ok = Option<T>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Option<T>, T::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut records = T::collection(self).write().await;
        let position = records.iter().position(|r| r.id() == id);
        Ok(position.map(|i| records.remove(i)))
    }
}
