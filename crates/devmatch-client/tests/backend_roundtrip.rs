/// Integration test: run the typed client against a mock backend and
/// verify the wire format end to end, push channel included.
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::ws::{Message, WebSocket},
    extract::{Path, Query, State, WebSocketUpgrade},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};

use devmatch_client::{ApiClient, ClientError, MatchSubscription};
use devmatch_types::api::ResolveUserRequest;
use devmatch_types::events::PushEvent;
use devmatch_types::models::{Decision, Profile};

#[derive(Default)]
struct MockBackend {
    resolves: AtomicUsize,
    decisions: Mutex<Vec<(String, String, String)>>,
}

fn profile(id: &str, name: &str) -> Profile {
    Profile {
        id: id.into(),
        name: name.into(),
        bio: format!("{name} bio"),
        avatar: format!("https://avatars.example/{id}.png"),
    }
}

async fn spawn_backend(state: Arc<MockBackend>) -> SocketAddr {
    let app = Router::new()
        .route("/devs", post(resolve_user).get(list_devs))
        .route("/devs/{id}/likes", post(record_like))
        .route("/devs/{id}/dislikes", post(record_dislike))
        .route("/ws", get(ws_upgrade))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn resolve_user(
    State(state): State<Arc<MockBackend>>,
    Json(req): Json<ResolveUserRequest>,
) -> impl IntoResponse {
    state.resolves.fetch_add(1, Ordering::SeqCst);
    if req.username == "broken" {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    // Full user document, like the reference backend returns.
    Json(serde_json::json!({
        "_id": format!("id-{}", req.username),
        "name": req.username,
        "bio": "",
        "avatar": "",
        "likes": [],
        "dislikes": [],
    }))
    .into_response()
}

async fn list_devs(headers: HeaderMap) -> impl IntoResponse {
    let user = headers
        .get("user")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if user.is_empty() {
        return StatusCode::BAD_REQUEST.into_response();
    }
    Json(vec![
        profile("a", "Ada"),
        profile("b", "Grace"),
        profile("c", "Edsger"),
    ])
    .into_response()
}

async fn record_like(
    State(state): State<Arc<MockBackend>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> StatusCode {
    record(&state, &id, &headers, "like")
}

async fn record_dislike(
    State(state): State<Arc<MockBackend>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> StatusCode {
    record(&state, &id, &headers, "dislike")
}

fn record(state: &MockBackend, candidate_id: &str, headers: &HeaderMap, kind: &str) -> StatusCode {
    let Some(user) = headers.get("user").and_then(|v| v.to_str().ok()) else {
        return StatusCode::BAD_REQUEST;
    };
    state.decisions.lock().unwrap().push((
        user.to_string(),
        candidate_id.to_string(),
        kind.to_string(),
    ));
    StatusCode::OK
}

async fn ws_upgrade(
    Query(params): Query<HashMap<String, String>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| push_matches(socket, params))
}

async fn push_matches(mut socket: WebSocket, params: HashMap<String, String>) {
    let user = params.get("user").cloned().unwrap_or_default();

    let event = PushEvent::Match(profile("m1", &format!("match-for-{user}")));
    let text = serde_json::to_string(&event).unwrap();
    if socket.send(Message::Text(text.into())).await.is_err() {
        return;
    }

    // Hold the connection open until the client goes away.
    while let Some(Ok(_)) = socket.recv().await {}
}

#[tokio::test]
async fn resolve_user_returns_backend_id() {
    let state = Arc::new(MockBackend::default());
    let addr = spawn_backend(state.clone()).await;
    let client = ApiClient::new(format!("http://{addr}"));

    let id = client.resolve_user("octocat").await.unwrap();
    assert_eq!(id, "id-octocat");
    assert_eq!(state.resolves.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn resolve_failure_is_request_rejected() {
    let state = Arc::new(MockBackend::default());
    let addr = spawn_backend(state).await;
    let client = ApiClient::new(format!("http://{addr}"));

    let err = client.resolve_user("broken").await.unwrap_err();
    assert!(matches!(err, ClientError::RequestRejected { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn unreachable_backend_is_backend_unavailable() {
    // Nothing listens on port 1.
    let client = ApiClient::new("http://127.0.0.1:1");

    let err = client.resolve_user("octocat").await.unwrap_err();
    assert!(matches!(err, ClientError::BackendUnavailable(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn list_candidates_is_scoped_by_user_header() {
    let state = Arc::new(MockBackend::default());
    let addr = spawn_backend(state).await;
    let client = ApiClient::new(format!("http://{addr}"));

    let profiles = client.list_candidates("u1").await.unwrap();
    assert_eq!(profiles.len(), 3);
    assert_eq!(profiles[0].name, "Ada");
    assert_eq!(profiles[2].id, "c");
}

#[tokio::test]
async fn record_decision_hits_the_matching_route() {
    let state = Arc::new(MockBackend::default());
    let addr = spawn_backend(state.clone()).await;
    let client = ApiClient::new(format!("http://{addr}"));

    client
        .record_decision("u1", "a", Decision::Like)
        .await
        .unwrap();
    client
        .record_decision("u1", "b", Decision::Dislike)
        .await
        .unwrap();

    let decisions = state.decisions.lock().unwrap().clone();
    assert_eq!(decisions.len(), 2);
    assert_eq!(decisions[0], ("u1".into(), "a".into(), "like".into()));
    assert_eq!(decisions[1], ("u1".into(), "b".into(), "dislike".into()));
}

#[tokio::test]
async fn subscription_delivers_match_push() {
    let state = Arc::new(MockBackend::default());
    let addr = spawn_backend(state).await;

    let mut sub = MatchSubscription::connect(&format!("http://{addr}"), "u9")
        .await
        .unwrap();

    let event = tokio::time::timeout(Duration::from_secs(5), sub.next_event())
        .await
        .expect("push should arrive well within the timeout")
        .expect("channel should still be open");

    let PushEvent::Match(profile) = event;
    assert_eq!(profile.name, "match-for-u9");

    sub.close();
}

#[tokio::test]
async fn subscription_connect_to_dead_port_fails() {
    let err = MatchSubscription::connect("http://127.0.0.1:1", "u1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Gateway(_) | ClientError::ConnectTimeout
    ));
}
