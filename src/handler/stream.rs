// handler/stream.rs
//! SSE endpoints forwarding hub events to connected clients.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::Path,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
    routing::get,
    Extension, Router,
};
use tokio::sync::broadcast;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use uuid::Uuid;

use crate::{events::job_topic, AppState};

pub fn stream_handler() -> Router {
    Router::new()
        .route("/", get(global_feed))
        .route("/jobs/:job_id", get(job_feed))
}

fn into_sse(
    rx: broadcast::Receiver<serde_json::Value>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(value) => {
            let event_type = value
                .get("event")
                .and_then(|e| e.as_str())
                .unwrap_or("message")
                .to_string();

            Some(Ok::<_, Infallible>(
                Event::default().event(event_type).data(value.to_string()),
            ))
        }
        // A lagged receiver dropped messages; tell the client rather
        // than silently skipping.
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(_)) => {
            Some(Ok(Event::default().event("lagged").data("{}")))
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Announcements every client should see, e.g. new job offers.
pub async fn global_feed(
    Extension(app_state): Extension<Arc<AppState>>,
) -> impl IntoResponse {
    into_sse(app_state.events.subscribe_global())
}

/// Events scoped to a single job, e.g. worker check-ins.
pub async fn job_feed(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> impl IntoResponse {
    let rx = app_state.events.subscribe_topic(&job_topic(job_id)).await;
    into_sse(rx)
}
