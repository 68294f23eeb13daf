//! Application provides API for interacting with the [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod args;
pub mod config;
mod context;
pub mod error;
pub mod web;

use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    routing::{on, MethodFilter},
    Extension, Json, Router,
};
use derive_more::Debug;
use juniper::{http::GraphQLBatchResponse, DefaultScalarValue, ScalarValue};
use juniper_axum::extract::JuniperRequest;
// Used in binary.
use axum_client_ip as _;
use tracing_subscriber as _;
#[cfg(test)]
use tower as _;

pub use self::{
    args::Args,
    config::Config,
    context::{Context, Session},
    error::{AsError, Error},
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<service::infra::Memory>;

/// [`juniper`] GraphQL response.
#[derive(Debug)]
pub struct JuniperResponse<S = DefaultScalarValue>
where
    S: ScalarValue,
{
    /// Status code of the response.
    pub status_code: http::StatusCode,

    /// Underlying GraphQL response.
    #[debug(skip)]
    pub response: GraphQLBatchResponse<S>,
}

impl<S> IntoResponse for JuniperResponse<S>
where
    S: ScalarValue,
{
    fn into_response(self) -> Response {
        let Self {
            status_code,
            response,
        } = self;

        // Field errors leave the response `Ok`, so the status is decided by
        // the `errors` lists instead.
        let body = match serde_json::to_value(&response) {
            Ok(body) => body,
            Err(e) => return Error::internal(&e).into_response(),
        };
        if has_errors(&body) {
            (status_code, Json(body)).into_response()
        } else {
            Json(body).into_response()
        }
    }
}

/// Checks whether the serialized (possibly batched) GraphQL response carries
/// a non-empty `errors` list.
fn has_errors(body: &serde_json::Value) -> bool {
    use serde_json::Value;

    match body {
        Value::Array(batch) => batch.iter().any(has_errors),
        Value::Object(single) => single
            .get("errors")
            .and_then(Value::as_array)
            .is_some_and(|errors| !errors.is_empty()),
        Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::String(_) => false,
    }
}

/// GraphQL API handler.
pub async fn graphql(
    Extension(schema): Extension<Arc<api::Schema>>,
    context: Context,
    JuniperRequest(gql_request): JuniperRequest,
) -> JuniperResponse {
    JuniperResponse {
        status_code: context.error_status_code(),
        response: gql_request.execute(&*schema, &context).await,
    }
}

/// Builds the [`Router`] serving the GraphQL API and the page routes over
/// the provided [`Service`].
pub fn router(service: Service) -> Router {
    web::router()
        .route(
            "/graphql",
            on(MethodFilter::GET.or(MethodFilter::POST), graphql),
        )
        .layer(Extension(Arc::new(api::schema())))
        .layer(Extension(service))
}

#[cfg(test)]
mod spec {
    use axum::{body, response::IntoResponse as _};
    use http::StatusCode;
    use juniper::{
        http::{GraphQLBatchResponse, GraphQLResponse},
        DefaultScalarValue,
    };
    use serde_json::{json, Value};

    use super::{has_errors, JuniperResponse};

    async fn body_of(response: axum::response::Response) -> Value {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("JSON body")
    }

    #[tokio::test]
    async fn uses_status_code_for_field_errors() {
        let response = JuniperResponse::<DefaultScalarValue> {
            status_code: StatusCode::FORBIDDEN,
            response: GraphQLBatchResponse::Single(GraphQLResponse::from_result(
                Ok((
                    juniper::Value::null(),
                    vec![juniper::ExecutionError::at_origin(
                        juniper::FieldError::new(
                            "Not an admin",
                            juniper::Value::null(),
                        ),
                    )],
                )),
            )),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_of(response).await;
        assert_eq!(body["errors"][0]["message"], "Not an admin");
    }

    #[tokio::test]
    async fn responds_ok_without_errors() {
        let response = JuniperResponse::<DefaultScalarValue> {
            status_code: StatusCode::FORBIDDEN,
            response: GraphQLBatchResponse::Single(GraphQLResponse::from_result(
                Ok((juniper::Value::null(), vec![])),
            )),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn detects_errors_in_batches() {
        assert!(has_errors(&json!([
            {"data": null},
            {"data": null, "errors": [{"message": "x"}]},
        ])));
        assert!(!has_errors(&json!([{"data": {}}, {"data": {}}])));
        assert!(!has_errors(&json!({"data": {}, "errors": []})));
    }
}
