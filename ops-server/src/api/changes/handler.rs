//! Change feed WebSocket handler

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use shared::message::ChangeEvent;
use shared::types::Collection;
use tokio::sync::broadcast;
use tokio::time::Duration;

use crate::core::ServerState;
use crate::message::ChangeFeed;
use crate::utils::{AppError, AppResult, ErrorCode};

const PING_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
pub struct ChangesQuery {
    /// 只推送该集合，缺省推送全部
    collection: Option<String>,
}

/// GET /api/changes/ws?collection=orders
pub async fn handle_ws(
    State(state): State<ServerState>,
    Query(query): Query<ChangesQuery>,
    ws: WebSocketUpgrade,
) -> AppResult<impl IntoResponse> {
    let collection = match query.collection.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<Collection>().map_err(|_| {
            AppError::with_message(
                ErrorCode::InvalidRequest,
                format!("unknown collection: {raw}"),
            )
            .with_detail("field", "collection")
        })?),
    };

    if state.feed.shutdown_token().is_cancelled() {
        return Err(AppError::new(ErrorCode::ChangeFeedClosed));
    }

    let feed = state.feed.clone();
    Ok(ws.on_upgrade(move |socket| change_session(socket, feed, collection)))
}

/// GET /api/changes/versions
pub async fn versions(State(state): State<ServerState>) -> Json<BTreeMap<&'static str, u64>> {
    Json(
        Collection::ALL
            .into_iter()
            .map(|c| (c.name(), state.feed.version(c)))
            .collect(),
    )
}

fn open_receiver(feed: &ChangeFeed, collection: Option<Collection>) -> broadcast::Receiver<ChangeEvent> {
    match collection {
        Some(c) => feed.subscribe(c),
        None => feed.subscribe_all(),
    }
}

fn resync_events(feed: &ChangeFeed, collection: Option<Collection>) -> Vec<ChangeEvent> {
    let collections = match collection {
        Some(c) => vec![c],
        None => Collection::ALL.to_vec(),
    };
    collections
        .into_iter()
        .map(|c| ChangeEvent::resync(c, feed.version(c)))
        .collect()
}

async fn change_session(socket: WebSocket, feed: ChangeFeed, collection: Option<Collection>) {
    let (mut sink, mut stream) = socket.split();
    let scope = collection.map(|c| c.name()).unwrap_or("all");
    tracing::info!(scope, "Change feed client connected");

    // 先订阅再发 resync，避免丢失中间的写入
    let mut rx = open_receiver(&feed, collection);
    for event in resync_events(&feed, collection) {
        if send_event(&mut sink, &event).await.is_err() {
            return;
        }
    }

    let shutdown = feed.shutdown_token().clone();
    let mut ping_interval = tokio::time::interval(PING_INTERVAL);
    ping_interval.tick().await;

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                let _ = sink.send(Message::Close(None)).await;
                break;
            }

            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(vec![].into())).await.is_err() {
                    break;
                }
            }

            received = rx.recv() => {
                match received {
                    Ok(event) => {
                        if send_event(&mut sink, &event).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(scope, skipped, "Change feed client lagged, sending resync");
                        rx = open_receiver(&feed, collection);
                        let mut failed = false;
                        for event in resync_events(&feed, collection) {
                            if send_event(&mut sink, &event).await.is_err() {
                                failed = true;
                                break;
                            }
                        }
                        if failed {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                    // 客户端只读，其余帧忽略
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    tracing::info!(scope, "Change feed client disconnected");
}

async fn send_event<S>(sink: &mut S, event: &ChangeEvent) -> Result<(), ()>
where
    S: futures::Sink<Message, Error = axum::Error> + Unpin,
{
    let json = serde_json::to_string(event).map_err(|_| ())?;
    sink.send(Message::Text(json.into())).await.map_err(|_| ())
}
