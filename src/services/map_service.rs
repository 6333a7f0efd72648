use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::{GameError, Position};
use crate::dto::{CreateMapRequest, MapResponse, UpdateMapRequest};
use crate::entities::{map, point_of_interest};
use crate::services::GameService;

const NAME_MAX_LEN: usize = 50;
const DESCRIPTION_MAX_LEN: usize = 300;

pub struct MapService;

impl MapService {
    /// Create a map for a game
    pub async fn create_map(
        db: &DatabaseConnection,
        game_id: i32,
        request: CreateMapRequest,
        now: DateTime<Utc>,
    ) -> Result<MapResponse, GameError> {
        GameService::find_game(db, game_id).await?;

        Self::validate(
            &request.name,
            request.description.as_deref(),
            Position::new(request.latitude, request.longitude),
            request.radius,
        )?;

        let map = map::ActiveModel {
            created_at: Set(now),
            game_id: Set(game_id),
            name: Set(request.name.trim().to_string()),
            description: Set(request.description),
            latitude: Set(request.latitude),
            longitude: Set(request.longitude),
            radius: Set(request.radius),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(game_id, map_id = map.id, "Map created");

        Ok(map.into())
    }

    pub async fn get_map(db: &DatabaseConnection, map_id: i32) -> Result<MapResponse, GameError> {
        Ok(Self::find_map(db, map_id).await?.into())
    }

    /// Maps of a game in creation order
    pub async fn list_maps(
        db: &DatabaseConnection,
        game_id: i32,
    ) -> Result<Vec<MapResponse>, GameError> {
        GameService::find_game(db, game_id).await?;

        let maps = map::Entity::find()
            .filter(map::Column::GameId.eq(game_id))
            .order_by_asc(map::Column::Id)
            .all(db)
            .await?;

        Ok(maps.into_iter().map(MapResponse::from).collect())
    }

    /// Partial update: only the supplied fields change
    pub async fn update_map(
        db: &DatabaseConnection,
        map_id: i32,
        request: UpdateMapRequest,
    ) -> Result<MapResponse, GameError> {
        let map = Self::find_map(db, map_id).await?;

        let name = request.name.clone().unwrap_or_else(|| map.name.clone());
        let description = request
            .description
            .clone()
            .unwrap_or_else(|| map.description.clone());
        let latitude = request.latitude.unwrap_or(map.latitude);
        let longitude = request.longitude.unwrap_or(map.longitude);
        let radius = request.radius.unwrap_or(map.radius);

        Self::validate(
            &name,
            description.as_deref(),
            Position::new(latitude, longitude),
            radius,
        )?;

        let mut active: map::ActiveModel = map.into();
        active.name = Set(name.trim().to_string());
        active.description = Set(description);
        active.latitude = Set(latitude);
        active.longitude = Set(longitude);
        active.radius = Set(radius);
        let map = active.update(db).await?;

        tracing::info!(map_id, "Map updated");

        Ok(map.into())
    }

    /// Delete a map and every point of interest on it
    pub async fn delete_map(db: &DatabaseConnection, map_id: i32) -> Result<(), GameError> {
        Self::find_map(db, map_id).await?;

        let txn = db.begin().await?;
        point_of_interest::Entity::delete_many()
            .filter(point_of_interest::Column::MapId.eq(map_id))
            .exec(&txn)
            .await?;
        map::Entity::delete_by_id(map_id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(map_id, "Map deleted");

        Ok(())
    }

    /// Load a map or fail with `MapNotFound`
    pub async fn find_map<C: ConnectionTrait>(db: &C, map_id: i32) -> Result<map::Model, GameError> {
        map::Entity::find_by_id(map_id)
            .one(db)
            .await?
            .ok_or(GameError::MapNotFound(map_id))
    }

    fn validate(
        name: &str,
        description: Option<&str>,
        center: Position,
        radius: i32,
    ) -> Result<(), GameError> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > NAME_MAX_LEN {
            return Err(GameError::InvalidGameConfiguration(format!(
                "map name must be 1-{NAME_MAX_LEN} characters"
            )));
        }

        if description.is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_LEN) {
            return Err(GameError::InvalidGameConfiguration(format!(
                "map description must be at most {DESCRIPTION_MAX_LEN} characters"
            )));
        }

        if !center.is_valid() {
            return Err(GameError::InvalidPosition {
                latitude: center.latitude,
                longitude: center.longitude,
            });
        }

        if radius <= 0 {
            return Err(GameError::InvalidGameConfiguration(
                "map radius must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
