#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use axum::Router;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use common::{delete, get, parse, patch_json, post_json, put_json, test_app, test_db};

async fn app() -> Router {
    test_app(test_db().await)
}

/// Create a game whose window contains the current instant, return its id.
async fn create_game(app: &Router) -> i64 {
    let now = Utc::now();
    let (status, body) = post_json(
        app,
        "/api/v1/games",
        &json!({
            "title": "Dorm Outbreak",
            "beginTime": now - Duration::hours(1),
            "endTime": now + Duration::hours(1),
            "adminId": "admin-1",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create game failed: {body}");
    parse(&body)["id"].as_i64().unwrap_or_default()
}

async fn advance(app: &Router, game_id: i64, phase: &str) -> (StatusCode, Value) {
    let (status, body) = post_json(
        app,
        &format!("/api/v1/games/{game_id}/advance"),
        &json!({ "phase": phase }),
    )
    .await;
    (status, parse(&body))
}

async fn register(app: &Router, game_id: i64, user: &str) -> Value {
    let (status, body) = post_json(
        app,
        &format!("/api/v1/games/{game_id}/players"),
        &json!({ "userId": user, "latitude": 0.0, "longitude": 0.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    parse(&body)
}

/// Game in `Active` with the given players; returns the game id and registrations.
async fn active_game(app: &Router, users: &[&str]) -> (i64, Vec<Value>) {
    let game_id = create_game(app).await;
    assert_eq!(advance(app, game_id, "registration").await.0, StatusCode::OK);
    let mut players = Vec::new();
    for user in users {
        players.push(register(app, game_id, user).await);
    }
    assert_eq!(advance(app, game_id, "active").await.0, StatusCode::OK);
    (game_id, players)
}

// ─────────────────────────────────────────────────────────────────────────────
// Health
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_root_returns_200() {
    let app = app().await;
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let v = parse(&body);
    assert_eq!(v["status"], "healthy");
    assert!(v["version"].is_string());
}

#[tokio::test]
async fn health_api_reports_database() {
    let app = app().await;
    let (status, body) = get(&app, "/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["database"]["connected"], true);
}

// ─────────────────────────────────────────────────────────────────────────────
// Games
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_fetch_game() {
    let app = app().await;
    let game_id = create_game(&app).await;

    let (status, body) = get(&app, &format!("/api/v1/games/{game_id}")).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let v = parse(&body);
    assert_eq!(v["title"], "Dorm Outbreak");
    assert_eq!(v["phase"], "created");
    assert_eq!(v["playerCount"], 0);
}

#[tokio::test]
async fn create_game_with_bad_window_is_400() {
    let app = app().await;
    let now = Utc::now();

    let (status, body) = post_json(
        &app,
        "/api/v1/games",
        &json!({
            "title": "Backwards",
            "beginTime": now,
            "endTime": now - Duration::minutes(1),
            "adminId": "admin-1",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse(&body)["error"]["code"], "INVALID_GAME_CONFIGURATION");
}

#[tokio::test]
async fn skipping_a_phase_is_409() {
    let app = app().await;
    let game_id = create_game(&app).await;

    let (status, v) = advance(&app, game_id, "active").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(v["error"]["code"], "ILLEGAL_PHASE_TRANSITION");
}

#[tokio::test]
async fn starting_without_players_is_409() {
    let app = app().await;
    let game_id = create_game(&app).await;
    advance(&app, game_id, "registration").await;

    let (status, v) = advance(&app, game_id, "active").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(v["error"]["code"], "NO_PLAYERS_REGISTERED");
}

#[tokio::test]
async fn unknown_game_is_404() {
    let app = app().await;

    let (status, body) = get(&app, "/api/v1/games/12345").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(parse(&body)["error"]["code"], "GAME_NOT_FOUND");
}

#[tokio::test]
async fn patch_and_delete_game() {
    let app = app().await;
    let game_id = create_game(&app).await;

    let (status, body) = patch_json(
        &app,
        &format!("/api/v1/games/{game_id}"),
        &json!({ "description": "Bring socks" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(parse(&body)["description"], "Bring socks");

    let (status, _) = delete(&app, &format!("/api/v1/games/{game_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, &format!("/api/v1/games/{game_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cancel_then_advance_is_409() {
    let app = app().await;
    let game_id = create_game(&app).await;

    let (status, body) = post_json(&app, &format!("/api/v1/games/{game_id}/cancel"), &json!({})).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(parse(&body)["phase"], "cancelled");

    let (status, _) = advance(&app, game_id, "registration").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

// ─────────────────────────────────────────────────────────────────────────────
// Players & infection
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn bite_code_only_in_registration_response() {
    let app = app().await;
    let (game_id, players) = active_game(&app, &["alice"]).await;
    assert!(players[0]["biteCode"].is_string());

    let (status, body) = get(&app, &format!("/api/v1/games/{game_id}/players")).await;

    assert_eq!(status, StatusCode::OK);
    let v = parse(&body);
    assert_eq!(v["count"], 1);
    assert!(v["players"][0].get("biteCode").is_none());
    assert!(!body.contains(players[0]["biteCode"].as_str().unwrap_or("unreachable")));
}

#[tokio::test]
async fn infect_over_http() {
    let app = app().await;
    let (game_id, players) = active_game(&app, &["alice", "bob"]).await;
    let bob_id = players[1]["id"].as_i64().unwrap_or_default();
    let code = players[1]["biteCode"].clone();

    let (status, body) = post_json(
        &app,
        &format!("/api/v1/games/{game_id}/infections"),
        &json!({ "biteCode": code }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(parse(&body)["victimId"], bob_id);

    let (status, body) = get(
        &app,
        &format!("/api/v1/games/{game_id}/players/{bob_id}/faction"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["faction"], "zombie");

    let (status, body) = post_json(
        &app,
        &format!("/api/v1/games/{game_id}/infections"),
        &json!({ "biteCode": code }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(parse(&body)["error"]["code"], "INVALID_BITE_CODE");

    let (_, body) = get(&app, &format!("/api/v1/games/{game_id}/players?faction=zombie")).await;
    assert_eq!(parse(&body)["count"], 1);
}

#[tokio::test]
async fn duplicate_registration_is_409() {
    let app = app().await;
    let (game_id, _) = active_game(&app, &["alice"]).await;

    let (status, body) = post_json(
        &app,
        &format!("/api/v1/games/{game_id}/players"),
        &json!({ "userId": "alice", "latitude": 0.0, "longitude": 0.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(parse(&body)["error"]["code"], "DUPLICATE_REGISTRATION");
}

#[tokio::test]
async fn position_of_unknown_player_is_404() {
    let app = app().await;
    let (game_id, _) = active_game(&app, &["alice"]).await;

    let (status, body) = put_json(
        &app,
        &format!("/api/v1/games/{game_id}/players/999/position"),
        &json!({ "latitude": 1.0, "longitude": 1.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(parse(&body)["error"]["code"], "PLAYER_NOT_FOUND");
}

// ─────────────────────────────────────────────────────────────────────────────
// Maps, points, reveal
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn map_and_safezone_reveal_flow() {
    let app = app().await;
    let (game_id, players) = active_game(&app, &["alice"]).await;
    let alice_id = players[0]["id"].as_i64().unwrap_or_default();
    let now = Utc::now();

    let (status, body) = post_json(
        &app,
        &format!("/api/v1/games/{game_id}/maps"),
        &json!({ "name": "Campus", "latitude": 0.0, "longitude": 0.0, "radius": 800 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let map_id = parse(&body)["id"].as_i64().unwrap_or_default();

    let (status, body) = post_json(
        &app,
        &format!("/api/v1/maps/{map_id}/safezones"),
        &json!({
            "title": "Library",
            "latitude": 0.0,
            "longitude": 0.0,
            "radius": 10,
            "humanVisible": true,
            "zombieVisible": false,
            "beginTime": now - Duration::minutes(5),
            "endTime": now + Duration::minutes(30),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(parse(&body)["kind"], "safezone");

    let (status, body) = get(
        &app,
        &format!("/api/v1/games/{game_id}/players/{alice_id}/visible"),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let v = parse(&body);
    assert_eq!(v["count"], 1);
    assert_eq!(v["points"][0]["title"], "Library");

    let (_, body) = get(&app, &format!("/api/v1/maps/{map_id}/points")).await;
    assert_eq!(parse(&body)["count"], 1);
    let (_, body) = get(&app, &format!("/api/v1/maps/{map_id}/missions")).await;
    assert_eq!(parse(&body)["count"], 0);
}

#[tokio::test]
async fn unknown_point_collection_is_404() {
    let app = app().await;
    let game_id = create_game(&app).await;
    let (_, body) = post_json(
        &app,
        &format!("/api/v1/games/{game_id}/maps"),
        &json!({ "name": "Campus", "latitude": 0.0, "longitude": 0.0, "radius": 800 }),
    )
    .await;
    let map_id = parse(&body)["id"].as_i64().unwrap_or_default();

    let (status, body) = get(&app, &format!("/api/v1/maps/{map_id}/treasures")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(parse(&body)["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn supply_without_drop_is_400() {
    let app = app().await;
    let game_id = create_game(&app).await;
    let (_, body) = post_json(
        &app,
        &format!("/api/v1/games/{game_id}/maps"),
        &json!({ "name": "Campus", "latitude": 0.0, "longitude": 0.0, "radius": 800 }),
    )
    .await;
    let map_id = parse(&body)["id"].as_i64().unwrap_or_default();

    let (status, body) = post_json(
        &app,
        &format!("/api/v1/maps/{map_id}/supplies"),
        &json!({
            "title": "Crate",
            "latitude": 0.0,
            "longitude": 0.0,
            "radius": 5,
            "humanVisible": true,
            "zombieVisible": true,
            "endTime": Utc::now() + Duration::hours(1),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse(&body)["error"]["code"], "INVALID_POINT_OF_INTEREST");
}

#[tokio::test]
async fn patch_with_null_clears_and_absent_keeps() {
    let app = app().await;
    let game_id = create_game(&app).await;
    let uri = format!("/api/v1/games/{game_id}");
    patch_json(&app, &uri, &json!({ "description": "Bring socks" })).await;

    let (status, body) = patch_json(&app, &uri, &json!({ "title": "Renamed" })).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(parse(&body)["description"], "Bring socks");

    let (status, body) = patch_json(&app, &uri, &json!({ "description": null })).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(parse(&body)["description"].is_null());
}
