use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::dto::{CreateMapRequest, UpdateMapRequest};
use crate::error::AppError;
use crate::services::MapService;
use crate::state::AppState;

/// Game-scoped map routes, nested under `/games/{id}`
pub fn game_router() -> Router<AppState> {
    Router::new().route("/maps", post(create_map).get(list_maps))
}

/// Map routes: `/maps/...`
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{map_id}",
        get(get_map).patch(update_map).delete(delete_map),
    )
}

/// `POST /games/:id/maps` - Add a map to a game.
async fn create_map(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
    Json(req): Json<CreateMapRequest>,
) -> Result<impl IntoResponse, AppError> {
    let map = MapService::create_map(&state.db, game_id, req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(map)))
}

async fn list_maps(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(MapService::list_maps(&state.db, game_id).await?))
}

async fn get_map(
    State(state): State<AppState>,
    Path(map_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(MapService::get_map(&state.db, map_id).await?))
}

async fn update_map(
    State(state): State<AppState>,
    Path(map_id): Path<i32>,
    Json(req): Json<UpdateMapRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(MapService::update_map(&state.db, map_id, req).await?))
}

/// `DELETE /maps/:map_id` - Delete a map and its points of interest.
async fn delete_map(
    State(state): State<AppState>,
    Path(map_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    MapService::delete_map(&state.db, map_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
