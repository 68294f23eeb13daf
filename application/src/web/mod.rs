//! Role-gated page routes.
//!
//! Every route declares the [`Level`] it requires. A principal lacking it is
//! redirected with `303 See Other` to [`DEFAULT_REDIRECT`] before
//! anything is rendered.
//!
//! [`DEFAULT_REDIRECT`]: service::access::DEFAULT_REDIRECT

pub mod frame;
pub mod live;

use axum::{
    extract::{Path, Query},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use common::{pagination, search};
use serde::Deserialize;
use service::{
    access::{Actions, Decision, Gate, Level},
    domain::{user, Role},
    query,
    view::Snapshot,
    Query as _,
};
use tracing as log;

use crate::{api::user::UserError, AsError, Context, Error};

/// Returns the [`Router`] serving the page routes.
pub fn router() -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/dashboard/data", get(products))
        .route("/dashboard/data/live", get(live::products))
        .route("/admin", get(admin))
        .route("/admin/users", get(users))
        .route("/admin/users/live", get(live::users))
        .route("/admin/users/:id", get(user))
}

/// Resolves the [`Role`] of the principal and checks it against the
/// `required` [`Level`].
///
/// # Errors
///
/// With a ready [`Response`]: a redirect if the principal lacks the `required`
/// [`Level`], or an [`Error`] if its token is invalid.
pub(crate) async fn gate(
    ctx: &Context,
    required: Level,
) -> Result<Role, Response> {
    let role = ctx
        .current_role()
        .await
        .map_err(IntoResponse::into_response)?;

    let mut gate = Gate::new(required);
    match gate.resolve(role).0 {
        Decision::Render => Ok(role),
        Decision::RedirectTo(location) => {
            log::debug!("`{role}` lacks `{required}` level, redirecting");
            Err(Redirect::to(location).into_response())
        }
    }
}

/// Query parameters of a list page.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListParams {
    /// Search query.
    pub search: Option<String>,

    /// Requested page number, clamped into range.
    pub page: Option<usize>,
}

impl ListParams {
    /// Builds a [`pagination::Selector`] out of these [`ListParams`].
    fn selector(
        self,
        ctx: &Context,
    ) -> pagination::Selector<search::Query> {
        pagination::Selector {
            arguments: pagination::Arguments {
                page: self.page.unwrap_or(1),
                size: ctx.service().config().lists.page_size,
            },
            filter: self.search.map(search::Query::new).unwrap_or_default(),
        }
    }
}

/// Personal dashboard of any principal.
#[tracing::instrument(skip_all)]
async fn dashboard(ctx: Context) -> Result<Json<frame::Dashboard>, Response> {
    let role = gate(&ctx, Level::User).await?;

    ctx.service()
        .execute(query::Dashboard { role })
        .await
        .map(|d| Json(d.into()))
        .map_err(|e| e.into_error().into_response())
}

/// Product catalog, view-only for non-admins.
#[tracing::instrument(skip_all, fields(params = ?params))]
async fn products(
    ctx: Context,
    Query(params): Query<ListParams>,
) -> Result<Json<frame::List<frame::Product>>, Response> {
    let role = gate(&ctx, Level::User).await?;

    let selector = params.selector(&ctx);
    let query = selector.filter.clone();
    ctx.service()
        .execute(query::products::List::new(selector))
        .await
        .map(|page| {
            Json(frame::List::new(Snapshot {
                page,
                query,
                actions: Actions::for_products(role),
            }))
        })
        .map_err(|e| e.into_error().into_response())
}

/// Administrative overview.
#[tracing::instrument(skip_all)]
async fn admin(ctx: Context) -> Result<Json<frame::Overview>, Response> {
    _ = gate(&ctx, Level::Admin).await?;

    ctx.service()
        .execute(query::AdminOverview)
        .await
        .map(|o| Json(o.into()))
        .map_err(|e| e.into_error().into_response())
}

/// User management list.
#[tracing::instrument(skip_all, fields(params = ?params))]
async fn users(
    ctx: Context,
    Query(params): Query<ListParams>,
) -> Result<Json<frame::List<frame::User>>, Response> {
    let role = gate(&ctx, Level::Admin).await?;

    let selector = params.selector(&ctx);
    let query = selector.filter.clone();
    ctx.service()
        .execute(query::users::List::new(selector))
        .await
        .map(|page| {
            Json(frame::List::new(Snapshot {
                page,
                query,
                actions: Actions::for_users(role),
            }))
        })
        .map_err(|e| e.into_error().into_response())
}

/// Single user opened for editing.
#[tracing::instrument(skip_all, fields(id = %id))]
async fn user(
    ctx: Context,
    Path(id): Path<String>,
) -> Result<Json<frame::User>, Response> {
    _ = gate(&ctx, Level::Admin).await?;

    let not_exists = || Error::from(UserError::NotExists).into_response();
    let id = id.parse::<user::Id>().map_err(|_| not_exists())?;
    ctx.service()
        .execute(query::user::ById::by(id))
        .await
        .map_err(|e| e.into_error().into_response())?
        .map(|u| Json(u.into()))
        .ok_or_else(not_exists)
}

#[cfg(test)]
mod spec {
    use super::ListParams;

    #[test]
    fn list_params_are_optional() {
        let params: ListParams =
            serde_json::from_str(r#"{"search":"wire"}"#).unwrap();

        assert_eq!(params.search.as_deref(), Some("wire"));
        assert_eq!(params.page, None);
    }
}
