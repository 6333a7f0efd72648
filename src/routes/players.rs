use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;

use crate::dto::{
    AssignSquadRequest, FactionResponse, InfectRequest, PlayerFilter, RegisterPlayerRequest,
    UpdatePositionRequest,
};
use crate::error::AppError;
use crate::services::{PlayerService, PointService};
use crate::state::AppState;

/// Player and infection routes, nested under `/games/{id}`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/players", post(register_player).get(list_players))
        .route(
            "/players/{player_id}",
            get(get_player).delete(delete_player),
        )
        .route("/players/{player_id}/position", put(update_position))
        .route("/players/{player_id}/squad", put(assign_squad))
        .route("/players/{player_id}/faction", get(get_faction))
        .route("/players/{player_id}/visible", get(visible_points))
        .route("/infections", post(infect).get(list_infections))
}

/// `POST /games/:game_id/players` - Register and receive a bite code.
async fn register_player(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
    Json(req): Json<RegisterPlayerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let player = PlayerService::register(&state.db, game_id, req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// `GET /games/:game_id/players` - List players, optionally `?faction=zombie`.
async fn list_players(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
    Query(filter): Query<PlayerFilter>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(
        PlayerService::list_players(&state.db, game_id, filter).await?,
    ))
}

async fn get_player(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(
        PlayerService::get_player(&state.db, game_id, player_id).await?,
    ))
}

async fn delete_player(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    PlayerService::delete_player(&state.db, game_id, player_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /games/:game_id/players/:player_id/position` - Report the player's location.
async fn update_position(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(i32, i32)>,
    Json(req): Json<UpdatePositionRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(
        PlayerService::update_position(
            &state.db,
            game_id,
            player_id,
            req.latitude,
            req.longitude,
        )
        .await?,
    ))
}

async fn assign_squad(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(i32, i32)>,
    Json(req): Json<AssignSquadRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(
        PlayerService::assign_squad(&state.db, game_id, player_id, req.squad_id).await?,
    ))
}

async fn get_faction(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let faction = PlayerService::faction_of(&state.db, game_id, player_id).await?;
    Ok(Json(FactionResponse { player_id, faction }))
}

/// `GET /games/:game_id/players/:player_id/visible` - Points this player can see right now.
async fn visible_points(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(
        PointService::visible_points(&state.db, game_id, player_id, Utc::now()).await?,
    ))
}

/// `POST /games/:game_id/infections` - Enter the bite code of the zombie who tagged you.
async fn infect(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
    Json(req): Json<InfectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let infection = PlayerService::infect(&state.db, game_id, &req.bite_code, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(infection)))
}

async fn list_infections(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(
        PlayerService::list_infections(&state.db, game_id).await?,
    ))
}
