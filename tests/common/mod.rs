// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Shared test harness: an in-process fake of the Eventure API.
//!
//! The fake keeps users and events in memory, records every call it
//! receives, and can be told to fail or delay writes so tests can drive
//! the rollback and in-flight paths.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use eventure::config::Config;
use eventure::models::{Category, Evaluation, Event, UserRecord};
use eventure::services::Credentials;
use eventure::App;

/// One request the fake handled.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub event_id: Option<String>,
}

/// A stored account, including the password the real API never returns.
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub token: String,
    pub participate: Vec<String>,
    pub commented: Vec<String>,
}

/// In-memory backend state shared with the test body.
#[derive(Default)]
pub struct Backend {
    pub users: Mutex<Vec<StoredUser>>,
    pub events: Mutex<Vec<Event>>,
    pub calls: Mutex<Vec<RecordedCall>>,
    /// When set, user-side writes return HTTP 500
    pub fail_user_writes: AtomicBool,
    /// When set, event-side writes return HTTP 500
    pub fail_event_writes: AtomicBool,
    /// Per-write delay, for exercising the in-flight guard
    pub write_delay_ms: AtomicU64,
}

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn err(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

fn record(state: &Backend, method: &str, path: &str, event_id: Option<String>) {
    state.calls.lock().unwrap().push(RecordedCall {
        method: method.to_string(),
        path: path.to_string(),
        event_id,
    });
}

fn authed(state: &Backend, headers: &HeaderMap) -> Result<StoredUser, (StatusCode, Json<Value>)> {
    let token = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| err(StatusCode::UNAUTHORIZED, "Missing token"))?;
    state
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|u| u.token == token)
        .cloned()
        .ok_or_else(|| err(StatusCode::UNAUTHORIZED, "Unknown token"))
}

async fn user_write_gate(state: &Backend) -> Result<(), (StatusCode, Json<Value>)> {
    let delay = state.write_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
    }
    if state.fail_user_writes.load(Ordering::SeqCst) {
        return Err(err(StatusCode::INTERNAL_SERVER_ERROR, "Injected failure"));
    }
    Ok(())
}

async fn event_write_gate(state: &Backend) -> Result<(), (StatusCode, Json<Value>)> {
    let delay = state.write_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
    }
    if state.fail_event_writes.load(Ordering::SeqCst) {
        return Err(err(StatusCode::INTERNAL_SERVER_ERROR, "Injected failure"));
    }
    Ok(())
}

fn user_json(user: &StoredUser) -> Value {
    json!({
        "nom": user.name,
        "email": user.email,
        "token": user.token,
        "participate": user.participate,
        "commented": user.commented,
    })
}

fn body_event_id(body: &Value) -> String {
    body["eventId"].as_str().unwrap_or_default().to_string()
}

// ─── Account handlers ───

async fn login(State(state): State<Arc<Backend>>, Json(body): Json<Value>) -> Reply {
    record(&state, "POST", "/api/user/login", None);
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let users = state.users.lock().unwrap();
    match users
        .iter()
        .find(|u| u.email == email && u.password == password)
    {
        Some(user) => Ok(Json(user_json(user))),
        None => Err(err(StatusCode::BAD_REQUEST, "Incorrect email or password")),
    }
}

async fn signup(State(state): State<Arc<Backend>>, Json(body): Json<Value>) -> Reply {
    record(&state, "POST", "/api/user/signup", None);
    let name = body["nom"].as_str().unwrap_or_default().to_string();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();

    let mut users = state.users.lock().unwrap();
    if users.iter().any(|u| u.email == email) {
        return Err(err(StatusCode::BAD_REQUEST, "Email already in use"));
    }
    let id = format!("user{}", users.len() + 1);
    let user = StoredUser {
        token: make_token(&id),
        id,
        name,
        email,
        password,
        participate: Vec::new(),
        commented: Vec::new(),
    };
    users.push(user.clone());
    Ok(Json(user_json(&user)))
}

async fn update_user(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    record(&state, "PATCH", "/api/user/update-user", None);
    let user = authed(&state, &headers)?;

    let mut users = state.users.lock().unwrap();
    let stored = users.iter_mut().find(|u| u.id == user.id).unwrap();
    if let Some(name) = body["newNom"].as_str() {
        stored.name = name.to_string();
    }
    if let Some(email) = body["newEmail"].as_str() {
        stored.email = email.to_string();
    }
    Ok(Json(json!({ "message": "Profile updated" })))
}

async fn get_participate(State(state): State<Arc<Backend>>, headers: HeaderMap) -> Reply {
    record(&state, "GET", "/api/user/participate", None);
    let user = authed(&state, &headers)?;
    Ok(Json(json!({ "participate": user.participate })))
}

async fn user_comments(State(state): State<Arc<Backend>>, headers: HeaderMap) -> Reply {
    record(&state, "GET", "/api/user/user-comments", None);
    let user = authed(&state, &headers)?;

    let events = state.events.lock().unwrap();
    let summaries: Vec<Value> = user
        .commented
        .iter()
        .map(|event_id| match events.iter().find(|e| e.id == *event_id) {
            Some(event) => {
                let evaluations: Vec<&Evaluation> = event
                    .evaluations
                    .iter()
                    .filter(|ev| ev.name == user.name)
                    .collect();
                json!({
                    "eventId": event_id,
                    "eventTitle": event.title,
                    "evaluations": evaluations,
                })
            }
            None => json!({
                "eventId": event_id,
                "eventTitle": "(deleted)",
                "evaluations": [],
            }),
        })
        .collect();
    Ok(Json(json!({ "eventsWithUserComments": summaries })))
}

async fn add_event(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let event_id = body_event_id(&body);
    record(&state, "PATCH", "/api/user/add-event", Some(event_id.clone()));
    user_write_gate(&state).await?;
    let user = authed(&state, &headers)?;

    let mut users = state.users.lock().unwrap();
    let stored = users.iter_mut().find(|u| u.id == user.id).unwrap();
    if !stored.participate.contains(&event_id) {
        stored.participate.push(event_id);
    }
    Ok(Json(json!({ "participate": stored.participate })))
}

async fn remove_event(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let event_id = body_event_id(&body);
    record(
        &state,
        "PATCH",
        "/api/user/remove-event",
        Some(event_id.clone()),
    );
    user_write_gate(&state).await?;
    let user = authed(&state, &headers)?;

    let mut users = state.users.lock().unwrap();
    let stored = users.iter_mut().find(|u| u.id == user.id).unwrap();
    stored.participate.retain(|id| *id != event_id);
    Ok(Json(json!({ "participate": stored.participate })))
}

async fn add_comment(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let event_id = body_event_id(&body);
    record(
        &state,
        "PATCH",
        "/api/user/add-comment",
        Some(event_id.clone()),
    );
    user_write_gate(&state).await?;
    let user = authed(&state, &headers)?;

    let mut users = state.users.lock().unwrap();
    let stored = users.iter_mut().find(|u| u.id == user.id).unwrap();
    if !stored.commented.contains(&event_id) {
        stored.commented.push(event_id);
    }
    Ok(Json(json!({ "commented": stored.commented })))
}

async fn remove_comment(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let event_id = body_event_id(&body);
    record(
        &state,
        "PATCH",
        "/api/user/remove-comment",
        Some(event_id.clone()),
    );
    user_write_gate(&state).await?;
    let user = authed(&state, &headers)?;

    let mut users = state.users.lock().unwrap();
    let stored = users.iter_mut().find(|u| u.id == user.id).unwrap();
    stored.commented.retain(|id| *id != event_id);
    Ok(Json(json!({ "commented": stored.commented })))
}

// ─── Event handlers ───

async fn list_all(State(state): State<Arc<Backend>>, headers: HeaderMap) -> Reply {
    record(&state, "GET", "/api/events/all", None);
    authed(&state, &headers)?;
    let events = state.events.lock().unwrap();
    Ok(Json(serde_json::to_value(&*events).unwrap()))
}

async fn list_mine(State(state): State<Arc<Backend>>, headers: HeaderMap) -> Reply {
    record(&state, "GET", "/api/events", None);
    let user = authed(&state, &headers)?;
    let events = state.events.lock().unwrap();
    let mine: Vec<&Event> = events
        .iter()
        .filter(|e| e.creator.as_deref() == Some(user.id.as_str()))
        .collect();
    Ok(Json(serde_json::to_value(&mine).unwrap()))
}

async fn create_event(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    record(&state, "POST", "/api/events", None);
    event_write_gate(&state).await?;
    let user = authed(&state, &headers)?;

    let mut events = state.events.lock().unwrap();
    let mut doc = body;
    doc["_id"] = json!(format!("evt{}", events.len() + 1));
    doc["creator"] = json!(user.id);
    doc["attendees"] = json!([]);
    doc["evaluations"] = json!([]);
    let event: Event = serde_json::from_value(doc)
        .map_err(|e| err(StatusCode::BAD_REQUEST, &e.to_string()))?;
    events.push(event.clone());
    Ok(Json(serde_json::to_value(&event).unwrap()))
}

async fn get_event(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Reply {
    record(
        &state,
        "GET",
        &format!("/api/events/{event_id}"),
        Some(event_id.clone()),
    );
    authed(&state, &headers)?;
    let events = state.events.lock().unwrap();
    match events.iter().find(|e| e.id == event_id) {
        Some(event) => Ok(Json(serde_json::to_value(event).unwrap())),
        None => Err(err(StatusCode::NOT_FOUND, "Event not found")),
    }
}

async fn update_event(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    record(
        &state,
        "PATCH",
        &format!("/api/events/{event_id}"),
        Some(event_id.clone()),
    );
    event_write_gate(&state).await?;
    authed(&state, &headers)?;

    let mut events = state.events.lock().unwrap();
    let existing = events
        .iter_mut()
        .find(|e| e.id == event_id)
        .ok_or_else(|| err(StatusCode::NOT_FOUND, "Event not found"))?;

    let mut doc = body;
    doc["_id"] = json!(existing.id);
    doc["creator"] = serde_json::to_value(&existing.creator).unwrap();
    doc["attendees"] = serde_json::to_value(&existing.attendees).unwrap();
    doc["evaluations"] = serde_json::to_value(&existing.evaluations).unwrap();
    *existing = serde_json::from_value(doc)
        .map_err(|e| err(StatusCode::BAD_REQUEST, &e.to_string()))?;
    Ok(Json(serde_json::to_value(&*existing).unwrap()))
}

async fn delete_event(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Reply {
    record(
        &state,
        "DELETE",
        &format!("/api/events/{event_id}"),
        Some(event_id.clone()),
    );
    event_write_gate(&state).await?;
    authed(&state, &headers)?;

    let mut events = state.events.lock().unwrap();
    let before = events.len();
    events.retain(|e| e.id != event_id);
    if events.len() == before {
        return Err(err(StatusCode::NOT_FOUND, "Event not found"));
    }
    Ok(Json(json!({ "message": "Event deleted" })))
}

async fn attend(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let event_id = body_event_id(&body);
    record(&state, "POST", "/api/events/attend", Some(event_id.clone()));
    event_write_gate(&state).await?;
    let user = authed(&state, &headers)?;

    let mut events = state.events.lock().unwrap();
    let event = events
        .iter_mut()
        .find(|e| e.id == event_id)
        .ok_or_else(|| err(StatusCode::NOT_FOUND, "Event not found"))?;
    event.attendees.insert(user.id);
    Ok(Json(json!({ "message": "Attending" })))
}

async fn remove_attendee(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let event_id = body_event_id(&body);
    record(
        &state,
        "POST",
        "/api/events/remove-attendee",
        Some(event_id.clone()),
    );
    event_write_gate(&state).await?;
    let user = authed(&state, &headers)?;

    let mut events = state.events.lock().unwrap();
    let event = events
        .iter_mut()
        .find(|e| e.id == event_id)
        .ok_or_else(|| err(StatusCode::NOT_FOUND, "Event not found"))?;
    event.attendees.remove(&user.id);
    Ok(Json(json!({ "message": "No longer attending" })))
}

async fn evaluate(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let event_id = body_event_id(&body);
    record(
        &state,
        "POST",
        "/api/events/evaluate",
        Some(event_id.clone()),
    );
    event_write_gate(&state).await?;
    let user = authed(&state, &headers)?;

    let mut events = state.events.lock().unwrap();
    let event = events
        .iter_mut()
        .find(|e| e.id == event_id)
        .ok_or_else(|| err(StatusCode::NOT_FOUND, "Event not found"))?;
    event.evaluations.push(Evaluation {
        id: None,
        name: user.name,
        rating: body["note"].as_u64().unwrap_or_default() as u8,
        comment: body["comment"].as_str().unwrap_or_default().to_string(),
    });
    Ok(Json(json!({ "message": "Evaluation added" })))
}

async fn remove_evaluate(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let event_id = body_event_id(&body);
    record(
        &state,
        "POST",
        "/api/events/remove-evaluate",
        Some(event_id.clone()),
    );
    event_write_gate(&state).await?;
    let user = authed(&state, &headers)?;

    let mut events = state.events.lock().unwrap();
    let event = events
        .iter_mut()
        .find(|e| e.id == event_id)
        .ok_or_else(|| err(StatusCode::NOT_FOUND, "Event not found"))?;
    event.evaluations.retain(|ev| ev.name != user.name);
    Ok(Json(json!({ "message": "Evaluation removed" })))
}

async fn upload(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    _body: axum::body::Bytes,
) -> Reply {
    let path = format!("/api/cloudinary/upload?{}", query.unwrap_or_default());
    record(&state, "POST", &path, None);
    authed(&state, &headers)?;
    Ok(Json(json!({ "url": "https://covers.test/uploaded.jpg" })))
}

fn router(backend: Arc<Backend>) -> Router {
    Router::new()
        .route("/api/user/login", post(login))
        .route("/api/user/signup", post(signup))
        .route("/api/user/update-user", patch(update_user))
        .route("/api/user/participate", get(get_participate))
        .route("/api/user/user-comments", get(user_comments))
        .route("/api/user/add-event", patch(add_event))
        .route("/api/user/remove-event", patch(remove_event))
        .route("/api/user/add-comment", patch(add_comment))
        .route("/api/user/remove-comment", patch(remove_comment))
        .route("/api/events/all", get(list_all))
        .route("/api/events", get(list_mine).post(create_event))
        .route(
            "/api/events/{id}",
            get(get_event).patch(update_event).delete(delete_event),
        )
        .route("/api/events/attend", post(attend))
        .route("/api/events/remove-attendee", post(remove_attendee))
        .route("/api/events/evaluate", post(evaluate))
        .route("/api/events/remove-evaluate", post(remove_evaluate))
        .route("/api/cloudinary/upload", post(upload))
        .with_state(backend)
}

// ─── Test app ───

/// The app under test wired to a fresh fake backend.
pub struct TestApp {
    pub app: App,
    pub backend: Arc<Backend>,
    _session_dir: tempfile::TempDir,
}

/// Spin up the fake API on an ephemeral port and build an `App` against it.
pub async fn test_app() -> TestApp {
    let backend = Arc::new(Backend::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().unwrap();
    let service = router(Arc::clone(&backend));
    tokio::spawn(async move {
        axum::serve(listener, service).await.unwrap();
    });

    let session_dir = tempfile::tempdir().unwrap();
    let config = Config {
        api_url: format!("http://{addr}"),
        session_file: session_dir.path().join("session.json"),
        upload_platform: "android".to_string(),
        request_timeout_secs: 5,
    };
    let app = App::new(config).expect("build app");
    app.load_session().await.expect("load empty session");

    TestApp {
        app,
        backend,
        _session_dir: session_dir,
    }
}

// ─── Seed helpers ───

/// Unsigned JWT whose payload carries the given user ID, like the real API.
pub fn make_token(user_id: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"_id":"{user_id}"}}"#));
    format!("{header}.{payload}.testsig")
}

pub fn seed_user(backend: &Backend, id: &str, name: &str, email: &str) -> StoredUser {
    let user = StoredUser {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
        token: make_token(id),
        participate: Vec::new(),
        commented: Vec::new(),
    };
    backend.users.lock().unwrap().push(user.clone());
    user
}

/// Log in through the real login flow with the seeded password.
pub async fn login_as(test: &TestApp, email: &str) -> UserRecord {
    test.app
        .account
        .login(&Credentials {
            email: email.to_string(),
            password: "password123".to_string(),
        })
        .await
        .expect("login")
}

pub fn event_at(id: &str, title: &str, date: DateTime<Utc>) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        description: "Description".to_string(),
        address: "1 rue de la Paix".to_string(),
        postal_code: "75002".to_string(),
        city: "Paris".to_string(),
        date,
        max_attendees: 50,
        category: Category::Musique,
        cover_url: String::new(),
        api_url: None,
        creator: None,
        attendees: Default::default(),
        evaluations: Vec::new(),
    }
}

pub fn future_event(id: &str, title: &str) -> Event {
    event_at(id, title, Utc::now() + Duration::days(7))
}

pub fn past_event(id: &str, title: &str) -> Event {
    event_at(id, title, Utc::now() - Duration::days(7))
}

pub fn seed_event(backend: &Backend, event: Event) {
    backend.events.lock().unwrap().push(event);
}

/// Snapshot a stored user by email.
pub fn stored_user(backend: &Backend, email: &str) -> StoredUser {
    backend
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|u| u.email == email)
        .cloned()
        .expect("user seeded")
}

/// All recorded calls whose path matches exactly.
pub fn calls_to(backend: &Backend, path: &str) -> Vec<RecordedCall> {
    backend
        .calls
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c.path == path)
        .cloned()
        .collect()
}
