use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{GameError, PoiKind, PointFields, Position, TimeWindow, list_visible};
use crate::dto::{CreatePointRequest, PointResponse, PointsListResponse, UpdatePointRequest};
use crate::entities::{map, point_of_interest};
use crate::services::{GameService, MapService, PlayerService};

/// CRUD for supplies, safezones and missions, plus the reveal query.
pub struct PointService;

impl PointService {
    /// Create a point of interest of `kind` on a map
    pub async fn create_point(
        db: &DatabaseConnection,
        map_id: i32,
        kind: PoiKind,
        request: CreatePointRequest,
        now: DateTime<Utc>,
    ) -> Result<PointResponse, GameError> {
        MapService::find_map(db, map_id).await?;

        PointFields {
            kind,
            title: &request.title,
            description: request.description.as_deref(),
            position: Position::new(request.latitude, request.longitude),
            radius: request.radius,
            window: TimeWindow::new(request.begin_time, request.end_time),
            drop_kind: request.drop_kind,
            amount: request.amount,
        }
        .validate()?;

        let point = point_of_interest::ActiveModel {
            created_at: Set(now),
            map_id: Set(map_id),
            kind: Set(kind.as_str().to_string()),
            title: Set(request.title.trim().to_string()),
            description: Set(request.description),
            latitude: Set(request.latitude),
            longitude: Set(request.longitude),
            radius: Set(request.radius),
            human_visible: Set(request.human_visible),
            zombie_visible: Set(request.zombie_visible),
            begin_time: Set(request.begin_time),
            end_time: Set(request.end_time),
            drop_kind: Set(request.drop_kind.map(|d| d.as_str().to_string())),
            amount: Set(request.amount),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(map_id, point_id = point.id, %kind, "Point of interest created");

        Ok(PointResponse::from(&point))
    }

    /// Get one point of interest on a map
    pub async fn get_point(
        db: &DatabaseConnection,
        map_id: i32,
        kind: PoiKind,
        point_id: i32,
    ) -> Result<PointResponse, GameError> {
        let point = Self::find_point(db, map_id, kind, point_id).await?;
        Ok(PointResponse::from(&point))
    }

    /// Points of a map in creation order, optionally of one kind only
    pub async fn list_points(
        db: &DatabaseConnection,
        map_id: i32,
        kind: Option<PoiKind>,
    ) -> Result<PointsListResponse, GameError> {
        MapService::find_map(db, map_id).await?;

        let mut query = point_of_interest::Entity::find()
            .filter(point_of_interest::Column::MapId.eq(map_id))
            .order_by_asc(point_of_interest::Column::Id);
        if let Some(kind) = kind {
            query = query.filter(point_of_interest::Column::Kind.eq(kind.as_str()));
        }

        let points: Vec<PointResponse> = query
            .all(db)
            .await?
            .iter()
            .map(PointResponse::from)
            .collect();
        let count = points.len();

        Ok(PointsListResponse { points, count })
    }

    /// Field-by-field update; the merged result must still satisfy every invariant
    pub async fn update_point(
        db: &DatabaseConnection,
        map_id: i32,
        kind: PoiKind,
        point_id: i32,
        request: UpdatePointRequest,
    ) -> Result<PointResponse, GameError> {
        let point = Self::find_point(db, map_id, kind, point_id).await?;

        let title = request.title.unwrap_or_else(|| point.title.clone());
        let description = request
            .description
            .unwrap_or_else(|| point.description.clone());
        let latitude = request.latitude.unwrap_or(point.latitude);
        let longitude = request.longitude.unwrap_or(point.longitude);
        let radius = request.radius.unwrap_or(point.radius);
        let begin_time = request.begin_time.unwrap_or(point.begin_time);
        let end_time = request.end_time.unwrap_or(point.end_time);
        let drop_kind = request.drop_kind.or_else(|| point.drop_kind());
        let amount = request.amount.or(point.amount);

        PointFields {
            kind,
            title: &title,
            description: description.as_deref(),
            position: Position::new(latitude, longitude),
            radius,
            window: TimeWindow::new(begin_time, end_time),
            drop_kind,
            amount,
        }
        .validate()?;

        let mut active: point_of_interest::ActiveModel = point.into();
        active.title = Set(title.trim().to_string());
        active.description = Set(description);
        active.latitude = Set(latitude);
        active.longitude = Set(longitude);
        active.radius = Set(radius);
        active.begin_time = Set(begin_time);
        active.end_time = Set(end_time);
        active.drop_kind = Set(drop_kind.map(|d| d.as_str().to_string()));
        active.amount = Set(amount);
        if let Some(human_visible) = request.human_visible {
            active.human_visible = Set(human_visible);
        }
        if let Some(zombie_visible) = request.zombie_visible {
            active.zombie_visible = Set(zombie_visible);
        }
        let point = active.update(db).await?;

        tracing::info!(map_id, point_id, "Point of interest updated");

        Ok(PointResponse::from(&point))
    }

    pub async fn delete_point(
        db: &DatabaseConnection,
        map_id: i32,
        kind: PoiKind,
        point_id: i32,
    ) -> Result<(), GameError> {
        Self::find_point(db, map_id, kind, point_id).await?;

        point_of_interest::Entity::delete_by_id(point_id)
            .exec(db)
            .await?;

        tracing::info!(map_id, point_id, "Point of interest deleted");

        Ok(())
    }

    /// Every point on every map of the game that `player_id` can currently see
    ///
    /// All points are judged against the single `now` snapshot.
    pub async fn visible_points(
        db: &DatabaseConnection,
        game_id: i32,
        player_id: i32,
        now: DateTime<Utc>,
    ) -> Result<PointsListResponse, GameError> {
        GameService::ensure_active(db, game_id).await?;

        let actor = PlayerService::find_player(db, game_id, player_id)
            .await?
            .actor();

        let map_ids: Vec<i32> = map::Entity::find()
            .filter(map::Column::GameId.eq(game_id))
            .all(db)
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect();

        let candidates = point_of_interest::Entity::find()
            .filter(point_of_interest::Column::MapId.is_in(map_ids))
            .order_by_asc(point_of_interest::Column::Id)
            .all(db)
            .await?;

        let points: Vec<PointResponse> = list_visible(actor, &candidates, now)
            .map(PointResponse::from)
            .collect();
        let count = points.len();

        tracing::debug!(
            game_id,
            player_id,
            candidates = candidates.len(),
            visible = count,
            "Visible points resolved"
        );

        Ok(PointsListResponse { points, count })
    }

    async fn find_point(
        db: &DatabaseConnection,
        map_id: i32,
        kind: PoiKind,
        point_id: i32,
    ) -> Result<point_of_interest::Model, GameError> {
        MapService::find_map(db, map_id).await?;

        point_of_interest::Entity::find_by_id(point_id)
            .filter(point_of_interest::Column::MapId.eq(map_id))
            .filter(point_of_interest::Column::Kind.eq(kind.as_str()))
            .one(db)
            .await?
            .ok_or(GameError::PoiNotFound(point_id))
    }
}
