#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use hvz_api::config::{Config, Environment};
use hvz_api::domain::GamePhase;
use hvz_api::dto::{CreateGameRequest, RegisterPlayerRequest, RegisteredPlayerResponse};
use hvz_api::services::{GameService, PlayerService};
use hvz_api::state::AppState;

// ─────────────────────────────────────────────────────────────────────────────
// Infrastructure
// ─────────────────────────────────────────────────────────────────────────────

/// Fresh in-memory `SQLite` game store with all migrations applied.
pub async fn test_db() -> DatabaseConnection {
    let db = hvz_api::db::connect("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// Build the app router on top of `db`.
pub fn test_app(db: DatabaseConnection) -> Router {
    let state = AppState {
        db,
        config: Config {
            database_url: "sqlite::memory:".to_string(),
            server_host: std::net::IpAddr::from([127, 0, 0, 1]),
            server_port: 0,
            environment: Environment::Development,
            log_level: "warn".to_string(),
            frontend_url: "http://localhost:3001".to_string(),
        },
    };

    hvz_api::routes::router().with_state(state)
}

/// Fixed reference instant used as T0 in service-level tests.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP helpers
// ─────────────────────────────────────────────────────────────────────────────

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    let body_str = String::from_utf8(body.to_vec()).unwrap_or_default();

    (status, body_str)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap_or_default()
}

/// Send a GET request to the app and return (status, body).
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_default();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_default();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, String) {
    send(app, json_request("POST", uri, body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, String) {
    send(app, json_request("PUT", uri, body)).await
}

pub async fn patch_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, String) {
    send(app, json_request("PATCH", uri, body)).await
}

pub fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Seeding through the services
// ─────────────────────────────────────────────────────────────────────────────

/// Create a game whose start window is `[begin, end)`.
pub async fn seed_game(db: &DatabaseConnection, begin: DateTime<Utc>, end: DateTime<Utc>) -> i32 {
    GameService::create_game(
        db,
        CreateGameRequest {
            title: "Campus Outbreak".to_string(),
            description: Some("Week-long game on the main quad".to_string()),
            begin_time: begin,
            end_time: end,
            admin_id: "admin-1".to_string(),
        },
        begin - Duration::days(1),
    )
    .await
    .expect("create game")
    .id
}

/// Register `user_id` at the given position.
pub async fn seed_player(
    db: &DatabaseConnection,
    game_id: i32,
    user_id: &str,
    latitude: f64,
    longitude: f64,
) -> RegisteredPlayerResponse {
    PlayerService::register(
        db,
        game_id,
        RegisterPlayerRequest {
            user_id: user_id.to_string(),
            latitude,
            longitude,
        },
        t0(),
    )
    .await
    .expect("register player")
}

/// Game windowed around `now`, opened for registration, with the given players
/// registered at the origin, then started. Returns the game id and the
/// registered players in order.
pub async fn seed_active_game(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
    users: &[&str],
) -> (i32, Vec<RegisteredPlayerResponse>) {
    let game_id = seed_game(db, now - Duration::hours(1), now + Duration::hours(1)).await;
    GameService::advance(db, game_id, GamePhase::Registration, now)
        .await
        .expect("open registration");

    let mut players = Vec::with_capacity(users.len());
    for user in users {
        players.push(seed_player(db, game_id, user, 0.0, 0.0).await);
    }

    GameService::advance(db, game_id, GamePhase::Active, now)
        .await
        .expect("start game");

    (game_id, players)
}
