use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use counter_tui::messages::{NetworkCommand, NetworkResponse, RequestKind};
use counter_tui::network::actor::execute;
use counter_tui::{CountAction, CounterClient, NetworkActor};
use tokio::sync::mpsc;

#[derive(Default)]
struct MockApi {
    count: i64,
    next_id: i64,
    // newest first, like the real API
    history: Vec<Value>,
}

impl MockApi {
    fn record(&mut self, action: &str) {
        self.next_id += 1;
        self.history.insert(
            0,
            json!({
                "id": self.next_id,
                "count_value": self.count,
                "action": action,
                "timestamp": format!("2025-03-01T10:00:{:02}.000000", self.next_id),
            }),
        );
    }
}

type Shared = Arc<Mutex<MockApi>>;

async fn get_count(State(api): State<Shared>) -> Json<Value> {
    let api = api.lock().unwrap();
    Json(json!({ "count": api.count }))
}

async fn increment(State(api): State<Shared>) -> Json<Value> {
    let mut api = api.lock().unwrap();
    api.count += 1;
    api.record("increment");
    Json(json!({ "count": api.count, "message": "Counter incremented" }))
}

async fn decrement(State(api): State<Shared>) -> Json<Value> {
    let mut api = api.lock().unwrap();
    api.count -= 1;
    api.record("decrement");
    Json(json!({ "count": api.count }))
}

async fn custom(State(api): State<Shared>, Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    let value = body["value"].as_i64().ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    let mut api = api.lock().unwrap();
    api.count += value;
    api.record("custom");
    Ok(Json(json!({ "count": api.count })))
}

async fn reset(State(api): State<Shared>) -> Json<Value> {
    let mut api = api.lock().unwrap();
    api.count = 0;
    api.record("reset");
    Json(json!({ "count": api.count }))
}

async fn history(State(api): State<Shared>) -> Json<Value> {
    let api = api.lock().unwrap();
    Json(json!({ "history": api.history }))
}

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn mock_api() -> String {
    let router = Router::new()
        .route("/count", get(get_count))
        .route("/count/increment", post(increment))
        .route("/count/decrement", post(decrement))
        .route("/count/custom", post(custom))
        .route("/count/reset", post(reset))
        .route("/count/history", get(history))
        .with_state(Shared::default());
    spawn_server(router).await
}

fn client(base_url: &str) -> CounterClient {
    CounterClient::new(base_url, Duration::from_secs(5))
}

#[tokio::test]
async fn test_full_session_against_api() {
    let base = mock_api().await;
    let client = client(&format!("{}/", base));

    assert_eq!(client.fetch_count().await.unwrap(), 0);

    let outcome = client.apply(CountAction::Increment).await.unwrap();
    assert_eq!(outcome.count, 1);
    assert_eq!(outcome.message.as_deref(), Some("Counter incremented"));

    assert_eq!(client.apply(CountAction::Custom(5)).await.unwrap().count, 6);
    assert_eq!(client.apply(CountAction::Decrement).await.unwrap().count, 5);
    assert_eq!(client.apply(CountAction::Reset).await.unwrap().count, 0);

    let items = client.fetch_history().await.unwrap();
    let actions: Vec<&str> = items.iter().map(|h| h.action.as_str()).collect();
    assert_eq!(actions, vec!["reset", "decrement", "custom", "increment"]);
    assert_eq!(items[1].count_value, 5);
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let router = Router::new().route("/count", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let base = spawn_server(router).await;

    let err = client(&base).fetch_count().await.unwrap_err();
    assert!(err.to_string().contains("500"), "unexpected error: {:#}", err);
}

#[tokio::test]
async fn test_malformed_body_is_reported() {
    let router = Router::new().route("/count/history", get(|| async { Json(json!({ "items": [] })) }));
    let base = spawn_server(router).await;

    let err = client(&base).fetch_history().await.unwrap_err();
    assert!(format!("{:#}", err).contains("Unexpected response"));
}

#[tokio::test]
async fn test_execute_maps_results_to_responses() {
    let base = mock_api().await;
    let client = client(&base);

    let response = execute(&client, NetworkCommand::Apply { id: 7, action: CountAction::Increment }).await;
    match response {
        Some(NetworkResponse::Applied { id, count, .. }) => {
            assert_eq!(id, 7);
            assert_eq!(count, 1);
        }
        other => panic!("unexpected response {:?}", other),
    }

    assert!(execute(&client, NetworkCommand::Shutdown).await.is_none());
}

#[tokio::test]
async fn test_unreachable_api_becomes_error_response() {
    // Grab a free port, then close it again
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{}", addr));
    let response = execute(&client, NetworkCommand::FetchCount { id: 1 }).await;
    match response {
        Some(NetworkResponse::Error { id, kind, message }) => {
            assert_eq!(id, 1);
            assert_eq!(kind, RequestKind::FetchCount);
            assert!(!message.is_empty());
        }
        other => panic!("unexpected response {:?}", other),
    }
}

#[tokio::test]
async fn test_network_actor_answers_and_shuts_down() {
    let base = mock_api().await;
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(NetworkActor::new(client(&base), resp_tx).run(cmd_rx));

    cmd_tx.send(NetworkCommand::Apply { id: 3, action: CountAction::Increment }).unwrap();
    let response = tokio::time::timeout(Duration::from_secs(5), resp_rx.recv()).await.unwrap();
    match response {
        Some(NetworkResponse::Applied { id, action, count, message }) => {
            assert_eq!(id, 3);
            assert_eq!(action, CountAction::Increment);
            assert_eq!(count, 1);
            assert_eq!(message.as_deref(), Some("Counter incremented"));
        }
        other => panic!("unexpected response {:?}", other),
    }

    cmd_tx.send(NetworkCommand::Shutdown).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_shutdown_cancels_pending_requests() {
    let router = Router::new().route(
        "/count",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Json(json!({ "count": 1 }))
        }),
    );
    let base = spawn_server(router).await;
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(NetworkActor::new(client(&base), resp_tx).run(cmd_rx));

    cmd_tx.send(NetworkCommand::FetchCount { id: 1 }).unwrap();
    cmd_tx.send(NetworkCommand::Shutdown).unwrap();
    tokio::time::timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();

    // the aborted request drops its sender without answering
    let leftover = tokio::time::timeout(Duration::from_secs(5), resp_rx.recv()).await.unwrap();
    assert!(leftover.is_none());
}
