use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::{Faction, GameError, GamePhase};
use crate::dto::{
    CreateGameRequest, GameDetailsResponse, GamePhaseResponse, GameResponse, UpdateGameRequest,
};
use crate::entities::{game, infection, map, player, point_of_interest};

const TITLE_MAX_LEN: usize = 50;
const DESCRIPTION_MAX_LEN: usize = 300;

/// Owns a game's phase state machine.
pub struct GameService;

impl GameService {
    /// Create a new game in the `Created` phase
    pub async fn create_game(
        db: &DatabaseConnection,
        request: CreateGameRequest,
        now: DateTime<Utc>,
    ) -> Result<GameResponse, GameError> {
        Self::validate_details(&request.title, request.description.as_deref())?;

        if request.admin_id.trim().is_empty() {
            return Err(GameError::InvalidGameConfiguration(
                "adminId is required".to_string(),
            ));
        }

        Self::validate_window(request.begin_time, request.end_time)?;

        let game = game::ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            title: Set(request.title.trim().to_string()),
            description: Set(request.description),
            begin_time: Set(request.begin_time),
            end_time: Set(request.end_time),
            phase: Set(GamePhase::Created.as_str().to_string()),
            admin_id: Set(request.admin_id),
            ..Default::default()
        };

        let game = game.insert(db).await?;

        tracing::info!(game_id = game.id, admin_id = %game.admin_id, "Game created");

        Ok(game.into())
    }

    /// Get a game with its current head counts
    pub async fn get_game(
        db: &DatabaseConnection,
        game_id: i32,
    ) -> Result<GameDetailsResponse, GameError> {
        let game = Self::find_game(db, game_id).await?;

        let player_count = Self::count_players(db, game_id, None).await?;
        let zombie_count = Self::count_players(db, game_id, Some(Faction::Zombie)).await?;

        Ok(GameDetailsResponse {
            game: game.into(),
            player_count,
            human_count: player_count - zombie_count,
            zombie_count,
        })
    }

    /// List all games, oldest first
    pub async fn list_games(db: &DatabaseConnection) -> Result<Vec<GameResponse>, GameError> {
        let games = game::Entity::find()
            .order_by_asc(game::Column::Id)
            .all(db)
            .await?;

        Ok(games.into_iter().map(GameResponse::from).collect())
    }

    /// Update title, description or time window of a game that has not finished
    pub async fn update_game(
        db: &DatabaseConnection,
        game_id: i32,
        request: UpdateGameRequest,
        now: DateTime<Utc>,
    ) -> Result<GameResponse, GameError> {
        let game = Self::find_game(db, game_id).await?;
        let phase = game.phase();

        if phase.is_terminal() {
            return Err(GameError::InvalidGameConfiguration(format!(
                "game is {phase} and can no longer be edited"
            )));
        }

        let title = request.title.as_deref().unwrap_or(&game.title);
        let description = request
            .description
            .clone()
            .unwrap_or_else(|| game.description.clone());
        Self::validate_details(title, description.as_deref())?;

        let begin_time = request.begin_time.unwrap_or(game.begin_time);
        let end_time = request.end_time.unwrap_or(game.end_time);
        Self::validate_window(begin_time, end_time)?;

        let mut active: game::ActiveModel = game.into();
        if let Some(title) = request.title {
            active.title = Set(title.trim().to_string());
        }
        active.description = Set(description);
        active.begin_time = Set(begin_time);
        active.end_time = Set(end_time);
        active.updated_at = Set(now);

        let game = active.update(db).await?;

        tracing::info!(game_id, "Game updated");

        Ok(game.into())
    }

    /// Advance a game one step along `Created -> Registration -> Active -> Ended`
    ///
    /// Starting a game additionally requires at least one registered player and
    /// `now` inside the game's `[begin_time, end_time)` window.
    pub async fn advance(
        db: &DatabaseConnection,
        game_id: i32,
        target: GamePhase,
        now: DateTime<Utc>,
    ) -> Result<GamePhaseResponse, GameError> {
        let game = Self::find_game(db, game_id).await?;
        let current = game.phase();

        if !current.can_advance_to(target) {
            return Err(GameError::IllegalPhaseTransition {
                from: current,
                to: target,
            });
        }

        if target == GamePhase::Active {
            if Self::count_players(db, game_id, None).await? == 0 {
                return Err(GameError::NoPlayersRegistered(game_id));
            }

            if !game.window().is_active(now) {
                return Err(GameError::GameNotInWindow(game_id));
            }
        }

        Self::transition(db, game_id, current, target, now).await?;

        tracing::info!(game_id, from = %current, to = %target, "Game phase advanced");

        Ok(GamePhaseResponse {
            id: game_id,
            phase: target,
            message: format!("Game moved to {target}"),
        })
    }

    /// Cancel a game from any non-terminal phase
    pub async fn cancel(
        db: &DatabaseConnection,
        game_id: i32,
        now: DateTime<Utc>,
    ) -> Result<GamePhaseResponse, GameError> {
        let game = Self::find_game(db, game_id).await?;
        let current = game.phase();

        if current.is_terminal() {
            return Err(GameError::IllegalPhaseTransition {
                from: current,
                to: GamePhase::Cancelled,
            });
        }

        Self::transition(db, game_id, current, GamePhase::Cancelled, now).await?;

        tracing::info!(game_id, from = %current, "Game cancelled");

        Ok(GamePhaseResponse {
            id: game_id,
            phase: GamePhase::Cancelled,
            message: "Game cancelled".to_string(),
        })
    }

    /// Delete a game together with its maps, points of interest, players and infections
    pub async fn delete_game(db: &DatabaseConnection, game_id: i32) -> Result<(), GameError> {
        Self::find_game(db, game_id).await?;

        let txn = db.begin().await?;

        let map_ids: Vec<i32> = map::Entity::find()
            .filter(map::Column::GameId.eq(game_id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect();

        point_of_interest::Entity::delete_many()
            .filter(point_of_interest::Column::MapId.is_in(map_ids))
            .exec(&txn)
            .await?;
        map::Entity::delete_many()
            .filter(map::Column::GameId.eq(game_id))
            .exec(&txn)
            .await?;
        infection::Entity::delete_many()
            .filter(infection::Column::GameId.eq(game_id))
            .exec(&txn)
            .await?;
        player::Entity::delete_many()
            .filter(player::Column::GameId.eq(game_id))
            .exec(&txn)
            .await?;
        game::Entity::delete_by_id(game_id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(game_id, "Game deleted");

        Ok(())
    }

    /// Load a game or fail with `GameNotFound`
    pub async fn find_game<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
    ) -> Result<game::Model, GameError> {
        game::Entity::find_by_id(game_id)
            .one(db)
            .await?
            .ok_or(GameError::GameNotFound(game_id))
    }

    /// Load a game that is currently `Active`, or fail with `GameNotActive`
    pub async fn ensure_active<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
    ) -> Result<game::Model, GameError> {
        let game = Self::find_game(db, game_id).await?;
        let phase = game.phase();

        if !phase.is_active() {
            return Err(GameError::GameNotActive { game_id, phase });
        }

        Ok(game)
    }

    /// Compare-and-set the phase column so two racing transitions cannot both apply
    async fn transition(
        db: &DatabaseConnection,
        game_id: i32,
        from: GamePhase,
        to: GamePhase,
        now: DateTime<Utc>,
    ) -> Result<(), GameError> {
        let result = game::Entity::update_many()
            .col_expr(game::Column::Phase, Expr::value(to.as_str()))
            .col_expr(game::Column::UpdatedAt, Expr::value(now))
            .filter(game::Column::Id.eq(game_id))
            .filter(game::Column::Phase.eq(from.as_str()))
            .exec(db)
            .await?;

        if result.rows_affected == 1 {
            return Ok(());
        }

        let actual = Self::find_game(db, game_id).await?.phase();
        Err(GameError::IllegalPhaseTransition {
            from: actual,
            to,
        })
    }

    async fn count_players(
        db: &DatabaseConnection,
        game_id: i32,
        faction: Option<Faction>,
    ) -> Result<u64, GameError> {
        let mut query = player::Entity::find().filter(player::Column::GameId.eq(game_id));
        if let Some(faction) = faction {
            query = query.filter(player::Column::Faction.eq(faction.as_str()));
        }

        Ok(query.count(db).await?)
    }

    fn validate_details(title: &str, description: Option<&str>) -> Result<(), GameError> {
        let title = title.trim();
        if title.is_empty() || title.chars().count() > TITLE_MAX_LEN {
            return Err(GameError::InvalidGameConfiguration(format!(
                "title must be 1-{TITLE_MAX_LEN} characters"
            )));
        }

        if description.is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_LEN) {
            return Err(GameError::InvalidGameConfiguration(format!(
                "description must be at most {DESCRIPTION_MAX_LEN} characters"
            )));
        }

        Ok(())
    }

    fn validate_window(begin: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), GameError> {
        if begin < end {
            Ok(())
        } else {
            Err(GameError::InvalidGameConfiguration(
                "beginTime must be before endTime".to_string(),
            ))
        }
    }
}
