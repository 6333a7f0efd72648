use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::domain::PoiKind;
use crate::dto::{CreatePointRequest, UpdatePointRequest};
use crate::error::AppError;
use crate::services::PointService;
use crate::state::AppState;

/// Point-of-interest routes, nested under `/maps/{map_id}`.
///
/// `{kind}` is one of `supplies`, `safezones` or `missions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/points", get(list_all_points))
        .route("/{kind}", get(list_points).post(create_point))
        .route(
            "/{kind}/{point_id}",
            get(get_point).patch(update_point).delete(delete_point),
        )
}

fn parse_kind(segment: &str) -> Result<PoiKind, AppError> {
    PoiKind::from_collection(segment)
        .ok_or_else(|| AppError::NotFound(format!("Unknown point collection '{segment}'")))
}

/// `GET /maps/:map_id/points` - Every point on the map regardless of kind.
async fn list_all_points(
    State(state): State<AppState>,
    Path(map_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(PointService::list_points(&state.db, map_id, None).await?))
}

async fn list_points(
    State(state): State<AppState>,
    Path((map_id, kind)): Path<(i32, String)>,
) -> Result<impl IntoResponse, AppError> {
    let kind = parse_kind(&kind)?;
    Ok(Json(
        PointService::list_points(&state.db, map_id, Some(kind)).await?,
    ))
}

async fn create_point(
    State(state): State<AppState>,
    Path((map_id, kind)): Path<(i32, String)>,
    Json(req): Json<CreatePointRequest>,
) -> Result<impl IntoResponse, AppError> {
    let kind = parse_kind(&kind)?;
    let point = PointService::create_point(&state.db, map_id, kind, req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(point)))
}

async fn get_point(
    State(state): State<AppState>,
    Path((map_id, kind, point_id)): Path<(i32, String, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let kind = parse_kind(&kind)?;
    Ok(Json(
        PointService::get_point(&state.db, map_id, kind, point_id).await?,
    ))
}

/// `PATCH /maps/:map_id/:kind/:point_id` - Change individual fields.
async fn update_point(
    State(state): State<AppState>,
    Path((map_id, kind, point_id)): Path<(i32, String, i32)>,
    Json(req): Json<UpdatePointRequest>,
) -> Result<impl IntoResponse, AppError> {
    let kind = parse_kind(&kind)?;
    Ok(Json(
        PointService::update_point(&state.db, map_id, kind, point_id, req).await?,
    ))
}

async fn delete_point(
    State(state): State<AppState>,
    Path((map_id, kind, point_id)): Path<(i32, String, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let kind = parse_kind(&kind)?;
    PointService::delete_point(&state.db, map_id, kind, point_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
