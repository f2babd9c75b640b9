use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use apidefender_console::backend::{Backend, HttpBackend};
use apidefender_console::workflow::start_polling;

mod common;
use common::spawn_backend;

const TICK: Duration = Duration::from_millis(25);

async fn progress_handler(
    State(calls): State<Arc<AtomicUsize>>,
    Query(q): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
    // Every third response fails to exercise transient-error handling.
    if n % 3 == 0 {
        return (StatusCode::INTERNAL_SERVER_ERROR, "flaky").into_response();
    }
    Json(json!({
        "id": q.get("id"),
        "status": "running",
        "elapsedMs": n as u64 * 1000,
        "lastLogLines": [format!("tick {}", n)]
    }))
    .into_response()
}

fn router(calls: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route("/api/progress", get(progress_handler))
        .with_state(calls)
}

#[tokio::test]
async fn test_cancellation_stops_all_network_traffic() {
    let calls = Arc::new(AtomicUsize::new(0));
    let url = spawn_backend(router(calls.clone())).await;
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&url));

    let poller = start_polling(backend, "sess-1".into(), TICK);
    let mut rx = poller.subscribe();
    rx.changed().await.unwrap();
    rx.changed().await.unwrap();

    poller.stop().await;
    let calls_at_stop = calls.load(Ordering::SeqCst);

    // Several would-be tick intervals elapse; the counter must not move.
    tokio::time::sleep(TICK * 6).await;
    assert_eq!(calls.load(Ordering::SeqCst), calls_at_stop);
}

#[tokio::test]
async fn test_transient_http_failures_do_not_stop_the_loop() {
    let calls = Arc::new(AtomicUsize::new(0));
    let url = spawn_backend(router(calls.clone())).await;
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&url));

    let poller = start_polling(backend, "sess-1".into(), TICK);
    let mut rx = poller.subscribe();

    // Collect four successful snapshots; call 3 and call 6 return 500, so
    // reaching four snapshots proves the loop rode through failures.
    let mut seen = Vec::new();
    for _ in 0..4 {
        rx.changed().await.unwrap();
        seen.push(rx.borrow().clone().unwrap().last_log_lines[0].clone());
    }
    assert_eq!(seen, vec!["tick 1", "tick 2", "tick 4", "tick 5"]);

    poller.stop().await;
    assert!(calls.load(Ordering::SeqCst) >= 5);
}
