use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::dto::{AdvanceGameRequest, CreateGameRequest, UpdateGameRequest};
use crate::error::AppError;
use crate::services::GameService;
use crate::state::AppState;

/// Game lifecycle router: `/games/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_game).get(list_games))
        .route(
            "/{id}",
            get(get_game).patch(update_game).delete(delete_game),
        )
        .route("/{id}/advance", post(advance_game))
        .route("/{id}/cancel", post(cancel_game))
}

/// `POST /games` - Create a new game.
async fn create_game(
    State(state): State<AppState>,
    Json(req): Json<CreateGameRequest>,
) -> Result<impl IntoResponse, AppError> {
    let game = GameService::create_game(&state.db, req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// `GET /games` - List all games.
async fn list_games(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(GameService::list_games(&state.db).await?))
}

/// `GET /games/:id` - Get a game with head counts.
async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(GameService::get_game(&state.db, id).await?))
}

/// `PATCH /games/:id` - Update title, description or time window.
async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateGameRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(
        GameService::update_game(&state.db, id, req, Utc::now()).await?,
    ))
}

/// `DELETE /games/:id` - Delete a game and everything it owns.
async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    GameService::delete_game(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /games/:id/advance` - Move the game to its next phase.
async fn advance_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<AdvanceGameRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(
        GameService::advance(&state.db, id, req.phase, Utc::now()).await?,
    ))
}

/// `POST /games/:id/cancel` - Call the game off.
async fn cancel_game(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(GameService::cancel(&state.db, id, Utc::now()).await?))
}
