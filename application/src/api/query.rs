//! GraphQL [`Query`]s definitions.

use common::{pagination, search};
use juniper::graphql_object;
use service::{access::Actions, query, Query as _};

use crate::{
    api::{self, product::ProductError, user::UserError},
    AsError, Context, Error,
};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";

    /// Builds a list [`pagination::Selector`] out of raw client input.
    fn selector(
        search: Option<String>,
        page: Option<i32>,
        page_size: Option<i32>,
        ctx: &Context,
    ) -> Result<pagination::Selector<search::Query>, Error> {
        let arguments = pagination::Arguments::new(
            page,
            page_size,
            ctx.service().config().lists.page_size,
        )
        .ok_or_else(|| api::PaginationError::InvalidPageSize.into())
        .map_err(ctx.error())?;

        Ok(pagination::Selector {
            arguments,
            filter: search.map(search::Query::new).unwrap_or_default(),
        })
    }
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the principal performing this request.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the provided token is invalid or expired.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "viewer",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn viewer(ctx: &Context) -> Result<api::dashboard::Viewer, Error> {
        Ok(ctx.try_current_session().await?.into())
    }

    /// Returns the personal `Dashboard` of the principal.
    ///
    /// Cards and navigation entries the principal may not see are omitted.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "dashboard",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn dashboard(
        ctx: &Context,
    ) -> Result<api::dashboard::Dashboard, Error> {
        let role = ctx.current_role().await?;
        ctx.service()
            .execute(query::Dashboard { role })
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Fetches a page of `User`s matching the `search` query.
    ///
    /// The `page` is clamped into the existing range.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the principal is not an admin;
    /// - `INVALID_PAGE_SIZE` - the `pageSize` is not positive.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "users",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            page_size = ?page_size,
            search = ?search,
        ),
    )]
    pub async fn users(
        search: Option<String>,
        page: Option<i32>,
        page_size: Option<i32>,
        ctx: &Context,
    ) -> Result<api::list::UserPage, Error> {
        let role = ctx.require_admin().await?;

        let selector = Self::selector(search, page, page_size, ctx)?;
        ctx.service()
            .execute(query::users::List::new(selector))
            .await
            .map(|page| api::list::UserPage::new(page, Actions::for_users(role)))
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Returns the `User` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the principal is not an admin;
    /// - `USER_NOT_EXISTS` - the `User` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "user",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn user(
        id: api::user::Id,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        _ = ctx.require_admin().await?;

        ctx.service()
            .execute(query::user::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches a page of `Product`s matching the `search` query.
    ///
    /// Available to any principal, though only admins get the list actions.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGE_SIZE` - the `pageSize` is not positive.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "products",
            otel.name = Self::SPAN_NAME,
            page = ?page,
            page_size = ?page_size,
            search = ?search,
        ),
    )]
    pub async fn products(
        search: Option<String>,
        page: Option<i32>,
        page_size: Option<i32>,
        ctx: &Context,
    ) -> Result<api::list::ProductPage, Error> {
        let role = ctx.current_role().await?;

        let selector = Self::selector(search, page, page_size, ctx)?;
        ctx.service()
            .execute(query::products::List::new(selector))
            .await
            .map(|page| {
                api::list::ProductPage::new(page, Actions::for_products(role))
            })
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Returns the `Product` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PRODUCT_NOT_EXISTS` - the `Product` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "product",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn product(
        id: api::product::Id,
        ctx: &Context,
    ) -> Result<api::Product, Error> {
        _ = ctx.current_role().await?;

        ctx.service()
            .execute(query::product::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ProductError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the administrative `Overview` of the stored records.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the principal is not an admin.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "adminOverview",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn admin_overview(
        ctx: &Context,
    ) -> Result<api::dashboard::Overview, Error> {
        _ = ctx.require_admin().await?;

        ctx.service()
            .execute(query::AdminOverview)
            .await
            .map(Into::into)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }
}
