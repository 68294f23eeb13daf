//! Live lists served over WebSocket.
//!
//! Each connection owns a single [`ListView`] built for the [`Role`] resolved
//! when the connection was upgraded. Closing the connection drops the view,
//! cancelling any pending search.

use std::fmt;

use axum::{
    extract::{ws::Message, WebSocketUpgrade},
    response::Response,
};
use common::pagination::Page;
use futures::{Sink, SinkExt as _, Stream, StreamExt as _};
use serde::{Deserialize, Serialize};
use service::{
    access::Level,
    domain::{Product, User},
    infra::database,
    query, ListView, Query,
};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use service::domain::Role;

use crate::{web::frame, AsError as _, Context, Service};

/// Message sent by a live list client.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    /// Typed search query, applied once typing pauses.
    Search {
        /// Raw query.
        query: String,
    },

    /// Jump to the provided page.
    Page {
        /// Page number, clamped into range.
        page: usize,
    },

    /// Move to the next page.
    Next,

    /// Move to the previous page.
    Previous,

    /// Re-read the shown page.
    Refresh,
}

/// Error frame sent when the shown page cannot be loaded.
#[derive(Clone, Debug, Serialize)]
struct ErrorFrame {
    /// Error code.
    code: &'static str,

    /// Error message.
    message: String,
}

/// Live product catalog of any principal.
#[tracing::instrument(skip_all)]
pub(super) async fn products(ctx: Context, ws: WebSocketUpgrade) -> Response {
    let role = match super::gate(&ctx, Level::User).await {
        Ok(role) => role,
        Err(redirect) => return redirect,
    };
    let service = ctx.service().clone();
    ws.on_upgrade(move |socket| async move {
        let view =
            ListView::<Product>::products(role, service.config().lists);
        let (outgoing, incoming) = socket.split();
        serve::<_, frame::Product, _, _>(outgoing, incoming, view, &service)
            .await;
    })
}

/// Live user management list.
#[tracing::instrument(skip_all)]
pub(super) async fn users(ctx: Context, ws: WebSocketUpgrade) -> Response {
    let role = match super::gate(&ctx, Level::Admin).await {
        Ok(role) => role,
        Err(redirect) => return redirect,
    };
    let service = ctx.service().clone();
    ws.on_upgrade(move |socket| async move {
        let view = ListView::<User>::users(role, service.config().lists);
        let (outgoing, incoming) = socket.split();
        serve::<_, frame::User, _, _>(outgoing, incoming, view, &service)
            .await;
    })
}

/// Serves the provided [`ListView`] over the `incoming` and `outgoing`
/// halves of a socket until the `incoming` one closes.
///
/// A frame is pushed on connect, after each navigation message, and after
/// each settled search query.
async fn serve<T, F, Out, In>(
    mut outgoing: Out,
    mut incoming: In,
    mut view: ListView<T>,
    service: &Service,
) where
    Service:
        Query<query::List<T>, Ok = Page<T>, Err = Traced<database::Error>>,
    T: Into<F>,
    F: Serialize,
    Out: Sink<Message> + Unpin,
    Out::Error: fmt::Display,
    In: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    log::debug!("live list opened for `{}`", view.role());

    if push::<T, F, _>(&mut outgoing, &mut view, service).await.is_err() {
        return;
    }
    loop {
        tokio::select! {
            msg = incoming.next() => {
                let text = match msg {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(
                        Message::Binary(_) | Message::Ping(_) | Message::Pong(_),
                    )) => continue,
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                };
                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::Search { query }) => {
                        view.search(query);
                        continue;
                    }
                    Ok(ClientMessage::Page { page }) => _ = view.go_to(page),
                    Ok(ClientMessage::Next) => _ = view.next(),
                    Ok(ClientMessage::Previous) => _ = view.previous(),
                    Ok(ClientMessage::Refresh) => {}
                    Err(e) => {
                        log::debug!("ignoring malformed live list message: {e}");
                        continue;
                    }
                }
            }
            changed = view.settled() => {
                if !changed {
                    continue;
                }
            }
        }
        if push::<T, F, _>(&mut outgoing, &mut view, service).await.is_err() {
            break;
        }
    }

    log::debug!("live list closed for `{}`", view.role());
}

/// Loads the shown page of the [`ListView`] and sends it as a frame.
///
/// # Errors
///
/// If the frame cannot be sent to the `outgoing` socket half.
async fn push<T, F, Out>(
    outgoing: &mut Out,
    view: &mut ListView<T>,
    service: &Service,
) -> Result<(), ()>
where
    Service:
        Query<query::List<T>, Ok = Page<T>, Err = Traced<database::Error>>,
    T: Into<F>,
    F: Serialize,
    Out: Sink<Message> + Unpin,
    Out::Error: fmt::Display,
{
    let json = match view.load(service).await {
        Ok(snapshot) => {
            serde_json::to_string(&frame::List::<F>::new(snapshot))
        }
        Err(e) => {
            log::error!("failed to load live list page: {e}");
            let e = e.into_error();
            serde_json::to_string(&ErrorFrame {
                code: e.code,
                message: e.message,
            })
        }
    };
    let json = match json {
        Ok(json) => json,
        Err(e) => {
            log::error!("failed to serialize live list frame: {e}");
            return Ok(());
        }
    };

    outgoing
        .send(Message::Text(json))
        .await
        .map_err(|e| log::debug!("failed to push live list frame: {e}"))
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use axum::extract::ws::Message;
    use futures::{channel::mpsc, StreamExt as _};
    use serde_json::Value;
    use service::{
        domain::{Role, User},
        infra::Memory,
        view, ListView,
    };
    use tokio::time;

    use crate::{web::frame, Service};

    use super::{serve, ClientMessage};

    #[test]
    fn parses_client_messages() {
        for (raw, expected) in [
            (
                r#"{"type":"search","query":"wire"}"#,
                ClientMessage::Search {
                    query: "wire".into(),
                },
            ),
            (r#"{"type":"page","page":2}"#, ClientMessage::Page { page: 2 }),
            (r#"{"type":"next"}"#, ClientMessage::Next),
            (r#"{"type":"previous"}"#, ClientMessage::Previous),
            (r#"{"type":"refresh"}"#, ClientMessage::Refresh),
        ] {
            assert_eq!(
                serde_json::from_str::<ClientMessage>(raw).unwrap(),
                expected,
            );
        }
    }

    #[test]
    fn rejects_unknown_messages() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"x"}"#)
            .is_err());
    }

    fn text(raw: &str) -> Result<Message, axum::Error> {
        Ok(Message::Text(raw.to_owned()))
    }

    async fn next_frame(frames: &mut mpsc::UnboundedReceiver<Message>) -> Value {
        match frames.next().await {
            Some(Message::Text(json)) => serde_json::from_str(&json).unwrap(),
            other => panic!("expected text frame, got: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn serves_list_view_until_socket_closes() {
        let service = Service::new(
            service::Config {
                jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                    b"secret",
                ),
                lists: view::Config::default(),
            },
            Memory::seeded(),
        );
        let (client, incoming) = mpsc::unbounded();
        let (outgoing, mut frames) = mpsc::unbounded();
        let list =
            ListView::<User>::users(Role::Admin, view::Config::default());
        let served = tokio::spawn(async move {
            serve::<_, frame::User, _, _>(outgoing, incoming, list, &service)
                .await;
        });

        let initial = next_frame(&mut frames).await;
        assert_eq!(initial["currentPage"], 1);
        assert_eq!(initial["totalPages"], 2);
        assert_eq!(initial["totalCount"], 7);
        assert_eq!(initial["items"].as_array().unwrap().len(), 5);

        for (msg, page) in [
            (r#"{"type":"next"}"#, 2),
            (r#"{"type":"next"}"#, 2),
            (r#"{"type":"previous"}"#, 1),
            (r#"{"type":"previous"}"#, 1),
            (r#"{"type":"page","page":9}"#, 2),
        ] {
            client.unbounded_send(text(msg)).unwrap();
            let shown = next_frame(&mut frames).await;
            assert_eq!(shown["currentPage"], page, "{msg}");
        }

        let typed = time::Instant::now();
        client
            .unbounded_send(text(r#"{"type":"search","query":"adm"}"#))
            .unwrap();
        client
            .unbounded_send(text(r#"{"type":"search","query":"admin"}"#))
            .unwrap();
        assert!(
            time::timeout(Duration::from_millis(299), frames.next())
                .await
                .is_err(),
            "search applied before typing paused",
        );
        let searched = next_frame(&mut frames).await;
        assert!(typed.elapsed() >= Duration::from_millis(300));
        assert_eq!(searched["query"], "admin");
        assert_eq!(searched["currentPage"], 1);
        assert_eq!(searched["totalPages"], 1);
        assert_eq!(searched["totalCount"], 2);

        client.unbounded_send(text("not a message")).unwrap();
        assert!(
            time::timeout(Duration::from_secs(1), frames.next())
                .await
                .is_err(),
            "malformed message produced a frame",
        );

        client.unbounded_send(text(r#"{"type":"refresh"}"#)).unwrap();
        let refreshed = next_frame(&mut frames).await;
        assert_eq!(refreshed["query"], "admin");
        assert_eq!(refreshed["totalCount"], 2);

        client
            .unbounded_send(text(r#"{"type":"search","query":"wire"}"#))
            .unwrap();
        drop(client);

        served.await.unwrap();
        assert!(frames.next().await.is_none());
    }
}
