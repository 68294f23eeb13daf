//! [`Command`] for creating a new [`Product`].

use common::{operations::Insert, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{product, Product},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Product`].
#[derive(Clone, Debug)]
pub struct CreateProduct {
    /// [`product::Name`] of a new [`Product`].
    pub name: product::Name,

    /// [`product::Description`] of a new [`Product`].
    pub description: product::Description,

    /// [`product::Price`] of a new [`Product`].
    pub price: product::Price,

    /// Units in stock of a new [`Product`].
    pub stock: u32,

    /// [`product::Category`] of a new [`Product`].
    pub category: product::Category,
}

impl<Db> Command<CreateProduct> for Service<Db>
where
    Db: Database<Insert<Product>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Product;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProduct,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProduct {
            name,
            description,
            price,
            stock,
            category,
        } = cmd;

        let product = Product {
            id: product::Id::new(),
            name,
            description,
            price,
            stock,
            category,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(product.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!("`Product(id: {})` created", product.id);

        Ok(product)
    }
}

/// Error of [`CreateProduct`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
