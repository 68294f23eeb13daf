//! [`Command`] for partially updating a [`Product`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{product, Product},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for partially updating a [`Product`].
///
/// Fields left as [`None`] keep their current values.
#[derive(Clone, Debug)]
pub struct UpdateProduct {
    /// ID of the [`Product`] to update.
    pub product_id: product::Id,

    /// New [`product::Name`] of the [`Product`].
    pub name: Option<product::Name>,

    /// New [`product::Description`] of the [`Product`].
    pub description: Option<product::Description>,

    /// New [`product::Price`] of the [`Product`].
    pub price: Option<product::Price>,

    /// New units in stock of the [`Product`].
    pub stock: Option<u32>,

    /// New [`product::Category`] of the [`Product`].
    pub category: Option<product::Category>,
}

impl UpdateProduct {
    /// Creates a new [`UpdateProduct`] changing nothing.
    #[must_use]
    pub const fn new(product_id: product::Id) -> Self {
        Self {
            product_id,
            name: None,
            description: None,
            price: None,
            stock: None,
            category: None,
        }
    }
}

impl<Db> Command<UpdateProduct> for Service<Db>
where
    Db: Database<
            Select<By<Option<Product>, product::Id>>,
            Ok = Option<Product>,
            Err = Traced<database::Error>,
        > + Database<
            Update<Product>,
            Ok = bool,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Product;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProduct,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProduct {
            product_id,
            name,
            description,
            price,
            stock,
            category,
        } = cmd;

        let mut product = self
            .database()
            .execute(Select(By::<Option<Product>, _>::new(product_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ProductNotExists(product_id))
            .map_err(tracerr::wrap!())?;

        let before = product.clone();
        if let Some(name) = name {
            product.name = name;
        }
        if let Some(description) = description {
            product.description = description;
        }
        if let Some(price) = price {
            product.price = price;
        }
        if let Some(stock) = stock {
            product.stock = stock;
        }
        if let Some(category) = category {
            product.category = category;
        }
        if product == before {
            return Ok(product);
        }

        let updated = self
            .database()
            .execute(Update(product.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !updated {
            // Deleted concurrently.
            return Err(tracerr::new!(E::ProductNotExists(product_id)));
        }

        Ok(product)
    }
}

/// Error of [`UpdateProduct`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Product`] doesn't exist.
    #[display("`Product(id: {_0})` does not exist")]
    #[from(ignore)]
    ProductNotExists(#[error(not(source))] product::Id),
}

#[cfg(test)]
mod spec {
    use uuid::Uuid;

    use crate::{
        command::{CreateProduct, DeleteProduct},
        domain::product,
        infra::Memory,
        query, Query as _, Service,
    };

    use super::{Command as _, ExecutionError, UpdateProduct};

    #[tokio::test]
    async fn changes_only_provided_fields() {
        let svc = Service::mock(Memory::seeded());
        let lamp = product::Id::from(Uuid::from_u128(7));

        let updated = svc
            .execute(UpdateProduct {
                price: "29.50".parse().ok(),
                stock: Some(0),
                ..UpdateProduct::new(lamp)
            })
            .await
            .unwrap();
        assert_eq!(updated.price.to_string(), "29.50");
        assert_eq!(updated.stock, 0);
        assert_eq!(updated.name.to_string(), "Desk Lamp");
    }

    #[tokio::test]
    async fn manages_product_lifecycle() {
        let svc = Service::mock(Memory::seeded());

        let created = svc
            .execute(CreateProduct {
                name: product::Name::new("Standing Desk").unwrap(),
                description: product::Description::new("Electric desk")
                    .unwrap(),
                price: "499.00".parse().unwrap(),
                stock: 5,
                category: product::Category::new("Office").unwrap(),
            })
            .await
            .unwrap();
        let all = svc.execute(query::products::All::by(())).await.unwrap();
        assert_eq!(all.len(), 8);

        let deleted = svc
            .execute(DeleteProduct::from(created.id))
            .await
            .unwrap();
        assert_eq!(deleted, created);

        let err = svc
            .execute(UpdateProduct::new(created.id))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::ProductNotExists(_)));
    }
}
