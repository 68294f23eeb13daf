//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::command::{self, Command as _};

use crate::{
    api::{self, product::ProductError, user::UserError},
    define_error, AsError, Context, Error,
};

/// Root of all GraphQL mutations.
///
/// Every mutation requires the principal to be an admin.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";

    /// Converts a GraphQL `stock` argument into a number of units.
    fn stock(stock: i32, ctx: &Context) -> Result<u32, Error> {
        u32::try_from(stock)
            .map_err(|_| StockError::Negative.into())
            .map_err(ctx.error())
    }
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `User`.
    ///
    /// A missing `role` means `USER`, a missing `status` means `ACTIVE`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the principal is not an admin;
    /// - `EMAIL_OCCUPIED` - the `email` is already used by another `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "createUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user(
        name: api::user::Name,
        email: api::user::Email,
        role: Option<api::user::Role>,
        status: Option<api::user::Status>,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        _ = ctx.require_admin().await?;

        ctx.service()
            .execute(command::CreateUser {
                name: name.into(),
                email: email.into(),
                role: role.map(Into::into).unwrap_or_default(),
                status: status.map(Into::into).unwrap_or_default(),
            })
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Updates the provided fields of the `User` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the principal is not an admin;
    /// - `USER_NOT_EXISTS` - the `User` does not exist;
    /// - `EMAIL_OCCUPIED` - the `email` is already used by another `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "updateUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_user(
        id: api::user::Id,
        name: Option<api::user::Name>,
        email: Option<api::user::Email>,
        role: Option<api::user::Role>,
        status: Option<api::user::Status>,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        _ = ctx.require_admin().await?;

        ctx.service()
            .execute(command::UpdateUser {
                name: name.map(Into::into),
                email: email.map(Into::into),
                role: role.map(Into::into),
                status: status.map(Into::into),
                ..command::UpdateUser::new(id.into())
            })
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Deletes the `User` with the specified ID, returning it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the principal is not an admin;
    /// - `USER_NOT_EXISTS` - the `User` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "deleteUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_user(
        id: api::user::Id,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        _ = ctx.require_admin().await?;

        ctx.service()
            .execute(command::DeleteUser {
                user_id: id.into(),
            })
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Creates a new `Product`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the principal is not an admin;
    /// - `NEGATIVE_STOCK` - the `stock` is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createProduct",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_product(
        name: api::product::Name,
        description: api::product::Description,
        price: api::product::Price,
        stock: i32,
        category: api::product::Category,
        ctx: &Context,
    ) -> Result<api::Product, Error> {
        _ = ctx.require_admin().await?;

        ctx.service()
            .execute(command::CreateProduct {
                name: name.into(),
                description: description.into(),
                price: price.into(),
                stock: Self::stock(stock, ctx)?,
                category: category.into(),
            })
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Updates the provided fields of the `Product` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the principal is not an admin;
    /// - `PRODUCT_NOT_EXISTS` - the `Product` does not exist;
    /// - `NEGATIVE_STOCK` - the `stock` is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "updateProduct",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_product(
        id: api::product::Id,
        name: Option<api::product::Name>,
        description: Option<api::product::Description>,
        price: Option<api::product::Price>,
        stock: Option<i32>,
        category: Option<api::product::Category>,
        ctx: &Context,
    ) -> Result<api::Product, Error> {
        _ = ctx.require_admin().await?;

        let stock = stock.map(|s| Self::stock(s, ctx)).transpose()?;
        ctx.service()
            .execute(command::UpdateProduct {
                product_id: id.into(),
                name: name.map(Into::into),
                description: description.map(Into::into),
                price: price.map(Into::into),
                stock,
                category: category.map(Into::into),
            })
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Deletes the `Product` with the specified ID, returning it.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the principal is not an admin;
    /// - `PRODUCT_NOT_EXISTS` - the `Product` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "deleteProduct",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_product(
        id: api::product::Id,
        ctx: &Context,
    ) -> Result<api::Product, Error> {
        _ = ctx.require_admin().await?;

        ctx.service()
            .execute(command::DeleteProduct {
                product_id: id.into(),
            })
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }
}

define_error! {
    enum StockError {
        #[code = "NEGATIVE_STOCK"]
        #[status = BAD_REQUEST]
        #[message = "Stock must not be negative"]
        Negative,
    }
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(UserError::EmailOccupied.into()),
        }
    }
}

impl AsError for command::update_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(UserError::EmailOccupied.into()),
            Self::UserNotExists(_) => Some(UserError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => Some(UserError::NotExists.into()),
        }
    }
}

impl AsError for command::create_product::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::update_product::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ProductNotExists(_) => Some(ProductError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_product::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ProductNotExists(_) => Some(ProductError::NotExists.into()),
        }
    }
}
