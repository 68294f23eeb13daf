//! HTTP-level tests of the page routes and the GraphQL API.

use axum::{body::Body, Router};
use http::{header, Request, StatusCode};
use serde_json::{json, Value};
use service::infra::Memory;
use tower::ServiceExt as _;

const SECRET: &[u8] = b"secret";

fn app() -> Router {
    let config = service::Config {
        jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(SECRET),
        lists: service::view::Config::default(),
    };
    application::router(service::Service::new(config, Memory::seeded()))
}

fn token(role: Option<&str>) -> String {
    let mut claims = json!({"sub": "user_1", "exp": 4_102_444_800_i64});
    if let Some(role) = role {
        claims["public_metadata"] = json!({"role": role});
    }
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(SECRET),
    )
    .unwrap()
}

async fn get(uri: &str, token: Option<&str>) -> (StatusCode, http::HeaderMap, Value) {
    let mut req = Request::get(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let resp = app().oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

async fn graphql(query: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut req = Request::post("/graphql")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let resp = app()
        .oneshot(
            req.body(Body::from(json!({"query": query}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn redirects_non_admin_from_admin_panel() {
    let user = token(Some("user"));
    for uri in ["/admin", "/admin/users"] {
        let (status, headers, _) = get(uri, Some(&user)).await;

        assert_eq!(status, StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(headers[header::LOCATION], "/dashboard", "{uri}");
    }

    let (status, headers, _) = get("/admin", None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/dashboard");
}

#[tokio::test]
async fn renders_admin_overview_for_admin() {
    let (status, _, body) = get("/admin", Some(&token(Some("admin")))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalUsers"], 7);
    assert_eq!(body["unitsInStock"], 192);
    assert_eq!(body["recentUsers"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn paginates_users() {
    let admin = token(Some("admin"));

    let (status, _, first) = get("/admin/users", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["items"].as_array().unwrap().len(), 5);
    assert_eq!(first["totalPages"], 2);
    assert_eq!(first["hasNext"], true);
    assert_eq!(first["hasPrevious"], false);
    assert_eq!(first["actions"]["delete"], true);

    let (_, _, second) = get("/admin/users?page=2", Some(&admin)).await;
    assert_eq!(second["items"].as_array().unwrap().len(), 2);
    assert_eq!(second["currentPage"], 2);
    assert_eq!(second["hasNext"], false);
    assert_eq!(second["hasPrevious"], true);
    assert_eq!(
        second["slots"],
        json!([{"type": "page", "page": 1}, {"type": "page", "page": 2}]),
    );

    let (_, _, clamped) = get("/admin/users?page=99", Some(&admin)).await;
    assert_eq!(clamped["currentPage"], 2);
}

#[tokio::test]
async fn searches_products_view_only_for_users() {
    let (status, _, body) =
        get("/dashboard/data?search=wireless", Some(&token(None))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["items"][0]["name"], "Wireless Mouse");
    assert_eq!(body["query"], "wireless");
    assert_eq!(
        body["actions"],
        json!({"create": false, "edit": false, "delete": false}),
    );
}

#[tokio::test]
async fn hides_revenue_from_users() {
    let titles = |body: &Value| {
        body["stats"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["title"].as_str().unwrap().to_owned())
            .collect::<Vec<_>>()
    };

    let (_, _, user) = get("/dashboard", None).await;
    assert_eq!(user["role"], "user");
    assert_eq!(titles(&user), ["Active Users", "Products", "Data Entries"]);
    assert_eq!(user["navigation"].as_array().unwrap().len(), 2);

    let (_, _, admin) = get("/dashboard", Some(&token(Some("admin")))).await;
    assert_eq!(
        titles(&admin),
        ["Active Users", "Products", "Revenue", "Data Entries"],
    );
    assert_eq!(admin["navigation"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn reports_missing_user() {
    let admin = token(Some("admin"));

    let (status, _, body) = get(
        "/admin/users/00000000-0000-0000-0000-0000000000ff",
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "USER_NOT_EXISTS");

    let (status, _, body) = get(
        "/admin/users/00000000-0000-0000-0000-000000000001",
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "John Doe");
}

#[tokio::test]
async fn rejects_invalid_token() {
    let (status, _, body) = get("/dashboard", Some("not-a-jwt")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTHORIZATION_REQUIRED");
}

#[tokio::test]
async fn rejects_graphql_mutations_of_non_admins() {
    let (status, body) = graphql(
        r#"mutation {
            deleteUser(id: "00000000-0000-0000-0000-000000000001") { id }
        }"#,
        Some(&token(Some("user"))),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["errors"][0]["extensions"]["code"], "NOT_ADMIN");
}

#[tokio::test]
async fn lists_users_through_graphql_only_for_admins() {
    let query = "{ users { totalCount actions { create edit delete } } }";

    let (status, body) = graphql(query, Some(&token(Some("admin")))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["users"]["totalCount"], 7);
    assert_eq!(
        body["data"]["users"]["actions"],
        json!({"create": true, "edit": true, "delete": true}),
    );

    let (status, body) = graphql(query, Some(&token(Some("user")))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["errors"][0]["extensions"]["code"], "NOT_ADMIN");
}

#[tokio::test]
async fn deletes_user_through_graphql() {
    let admin = token(Some("admin"));
    let app = app();
    let run = |query: &'static str| {
        let app = app.clone();
        let admin = admin.clone();
        async move {
            let resp = app
                .oneshot(
                    Request::post("/graphql")
                        .header(header::CONTENT_TYPE, "application/json")
                        .header(header::AUTHORIZATION, format!("Bearer {admin}"))
                        .body(Body::from(json!({"query": query}).to_string()))
                        .unwrap(),
                )
                .await
                .unwrap();
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
                .await
                .unwrap();
            serde_json::from_slice::<Value>(&bytes).unwrap()
        }
    };

    let deleted = run(
        r#"mutation {
            deleteUser(id: "00000000-0000-0000-0000-000000000002") { name }
        }"#,
    )
    .await;
    assert_eq!(deleted["data"]["deleteUser"]["name"], "Jane Smith");

    let listed = run("{ users(pageSize: 10) { totalCount items { id } } }").await;
    assert_eq!(listed["data"]["users"]["totalCount"], 6);
    assert!(!listed["data"]["users"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .any(|u| u["id"] == "00000000-0000-0000-0000-000000000002"));
}
