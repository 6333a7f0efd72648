use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};

use crate::domain::{
    Faction, GameError, GamePhase, Position, generate_bite_code, is_valid_bite_code, normalize_bite_code,
};
use crate::dto::{
    InfectionResponse, PlayerFilter, PlayerResponse, PlayersListResponse, RegisterPlayerRequest,
    RegisteredPlayerResponse,
};
use crate::entities::{game, infection, player};
use crate::services::GameService;

/// Maximum attempts to generate a bite code not yet used in the game
const MAX_CODE_GENERATION_ATTEMPTS: u32 = 10;

/// Owns player faction state and the bite-code protocol.
pub struct PlayerService;

impl PlayerService {
    /// Register a user as a human player with a fresh bite code
    ///
    /// Legal while the game is in `Registration` or `Active`.
    pub async fn register(
        db: &DatabaseConnection,
        game_id: i32,
        request: RegisterPlayerRequest,
        now: DateTime<Utc>,
    ) -> Result<RegisteredPlayerResponse, GameError> {
        let game = GameService::find_game(db, game_id).await?;
        let phase = game.phase();

        if !phase.accepts_registration() {
            return Err(GameError::GameNotActive { game_id, phase });
        }

        let position = Self::validate_position(request.latitude, request.longitude)?;

        let existing = player::Entity::find()
            .filter(player::Column::GameId.eq(game_id))
            .filter(player::Column::UserId.eq(&request.user_id))
            .one(db)
            .await?;

        if existing.is_some() {
            return Err(GameError::DuplicateRegistration {
                game_id,
                user_id: request.user_id,
            });
        }

        for _ in 0..MAX_CODE_GENERATION_ATTEMPTS {
            let bite_code = Self::generate_unique_code(db, game_id).await?;

            let player = player::ActiveModel {
                created_at: Set(now),
                game_id: Set(game_id),
                user_id: Set(request.user_id.clone()),
                faction: Set(Faction::Human.as_str().to_string()),
                squad_id: Set(None),
                latitude: Set(position.latitude),
                longitude: Set(position.longitude),
                bite_code: Set(bite_code.clone()),
                bite_code_consumed_at: Set(None),
                ..Default::default()
            };

            match player.insert(db).await {
                Ok(player) => {
                    tracing::info!(game_id, player_id = player.id, "Player registered");

                    return Ok(RegisteredPlayerResponse {
                        player: player.into(),
                        bite_code,
                    });
                }
                Err(err) => match Self::unique_violation(&err) {
                    // Another registration took the same code in the meantime
                    Some(message) if is_bite_code_conflict(&message) => {
                        tracing::warn!(game_id, "Bite code collision on insert, retrying");
                    }
                    // A concurrent registration of the same user loses on the unique index
                    Some(_) => {
                        return Err(GameError::DuplicateRegistration {
                            game_id,
                            user_id: request.user_id,
                        });
                    }
                    None => return Err(err.into()),
                },
            }
        }

        Err(code_space_exhausted())
    }

    /// Consume a bite code: its owner turns into a zombie and the code is retired
    ///
    /// The check-and-consume is a single conditional update, so of several
    /// concurrent calls with the same code exactly one succeeds.
    pub async fn infect(
        db: &DatabaseConnection,
        game_id: i32,
        bite_code: &str,
        now: DateTime<Utc>,
    ) -> Result<InfectionResponse, GameError> {
        let txn = db.begin().await?;

        GameService::ensure_active(&txn, game_id).await?;

        let code = normalize_bite_code(bite_code);
        if !is_valid_bite_code(&code) {
            return Err(GameError::InvalidBiteCode);
        }

        let victim = player::Entity::find()
            .filter(player::Column::GameId.eq(game_id))
            .filter(player::Column::BiteCode.eq(&code))
            .filter(player::Column::BiteCodeConsumedAt.is_null())
            .one(&txn)
            .await?
            .ok_or(GameError::InvalidBiteCode)?;

        Self::consume_bite_code(&txn, game_id, victim.id, &code, now).await?;

        let infection = infection::ActiveModel {
            game_id: Set(game_id),
            victim_id: Set(victim.id),
            infected_at: Set(now),
            latitude: Set(victim.latitude),
            longitude: Set(victim.longitude),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        tracing::info!(game_id, player_id = victim.id, "Player infected");

        Ok(infection.into())
    }

    /// Retire `code` and turn its holder into a zombie, provided the code is
    /// still unconsumed and the game is `Active` at the moment of the write.
    ///
    /// Losing a race on the code yields `InvalidBiteCode`; a game that left
    /// `Active` in the meantime yields `GameNotActive`.
    pub async fn consume_bite_code<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
        victim_id: i32,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<(), GameError> {
        let active_game = Query::select()
            .column(game::Column::Id)
            .from(game::Entity)
            .and_where(game::Column::Id.eq(game_id))
            .and_where(game::Column::Phase.eq(GamePhase::Active.as_str()))
            .to_owned();

        let consumed = player::Entity::update_many()
            .col_expr(player::Column::Faction, Expr::value(Faction::Zombie.as_str()))
            .col_expr(player::Column::BiteCodeConsumedAt, Expr::value(now))
            .filter(player::Column::Id.eq(victim_id))
            .filter(player::Column::BiteCode.eq(code))
            .filter(player::Column::BiteCodeConsumedAt.is_null())
            .filter(player::Column::GameId.in_subquery(active_game))
            .exec(db)
            .await?;

        if consumed.rows_affected == 1 {
            return Ok(());
        }

        GameService::ensure_active(db, game_id).await?;
        Err(GameError::InvalidBiteCode)
    }

    /// Overwrite a player's position; the latest write wins
    pub async fn update_position(
        db: &DatabaseConnection,
        game_id: i32,
        player_id: i32,
        latitude: f64,
        longitude: f64,
    ) -> Result<PlayerResponse, GameError> {
        GameService::ensure_active(db, game_id).await?;

        let position = Self::validate_position(latitude, longitude)?;
        let player = Self::find_player(db, game_id, player_id).await?;

        let mut active: player::ActiveModel = player.into();
        active.latitude = Set(position.latitude);
        active.longitude = Set(position.longitude);
        let player = active.update(db).await?;

        tracing::debug!(game_id, player_id, "Player position updated");

        Ok(player.into())
    }

    /// Current faction of a player in a running game
    pub async fn faction_of(
        db: &DatabaseConnection,
        game_id: i32,
        player_id: i32,
    ) -> Result<Faction, GameError> {
        GameService::ensure_active(db, game_id).await?;

        let player = Self::find_player(db, game_id, player_id).await?;
        Ok(player.faction())
    }

    /// All players of a game in registration order, optionally by faction
    pub async fn list_players(
        db: &DatabaseConnection,
        game_id: i32,
        filter: PlayerFilter,
    ) -> Result<PlayersListResponse, GameError> {
        GameService::find_game(db, game_id).await?;

        let mut query = player::Entity::find()
            .filter(player::Column::GameId.eq(game_id))
            .order_by_asc(player::Column::Id);
        if let Some(faction) = filter.faction {
            query = query.filter(player::Column::Faction.eq(faction.as_str()));
        }

        let players: Vec<PlayerResponse> = query
            .all(db)
            .await?
            .into_iter()
            .map(PlayerResponse::from)
            .collect();
        let count = players.len();

        Ok(PlayersListResponse { players, count })
    }

    /// Get one player of a game
    pub async fn get_player(
        db: &DatabaseConnection,
        game_id: i32,
        player_id: i32,
    ) -> Result<PlayerResponse, GameError> {
        GameService::find_game(db, game_id).await?;
        Ok(Self::find_player(db, game_id, player_id).await?.into())
    }

    /// Put a player into a squad, or take them out of it with `None`
    pub async fn assign_squad(
        db: &DatabaseConnection,
        game_id: i32,
        player_id: i32,
        squad_id: Option<i32>,
    ) -> Result<PlayerResponse, GameError> {
        GameService::find_game(db, game_id).await?;
        let player = Self::find_player(db, game_id, player_id).await?;

        let mut active: player::ActiveModel = player.into();
        active.squad_id = Set(squad_id);
        let player = active.update(db).await?;

        tracing::info!(game_id, player_id, ?squad_id, "Player squad assigned");

        Ok(player.into())
    }

    /// Remove a player and their infection records
    pub async fn delete_player(
        db: &DatabaseConnection,
        game_id: i32,
        player_id: i32,
    ) -> Result<(), GameError> {
        GameService::find_game(db, game_id).await?;
        Self::find_player(db, game_id, player_id).await?;

        let txn = db.begin().await?;
        infection::Entity::delete_many()
            .filter(infection::Column::VictimId.eq(player_id))
            .exec(&txn)
            .await?;
        player::Entity::delete_by_id(player_id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(game_id, player_id, "Player deleted");

        Ok(())
    }

    /// Infection events of a game, oldest first
    pub async fn list_infections(
        db: &DatabaseConnection,
        game_id: i32,
    ) -> Result<Vec<InfectionResponse>, GameError> {
        GameService::find_game(db, game_id).await?;

        let infections = infection::Entity::find()
            .filter(infection::Column::GameId.eq(game_id))
            .order_by_asc(infection::Column::InfectedAt)
            .order_by_asc(infection::Column::Id)
            .all(db)
            .await?;

        Ok(infections.into_iter().map(InfectionResponse::from).collect())
    }

    /// Load a player that belongs to `game_id`, or fail with `PlayerNotFound`
    pub async fn find_player<C: ConnectionTrait>(
        db: &C,
        game_id: i32,
        player_id: i32,
    ) -> Result<player::Model, GameError> {
        player::Entity::find_by_id(player_id)
            .filter(player::Column::GameId.eq(game_id))
            .one(db)
            .await?
            .ok_or(GameError::PlayerNotFound { game_id, player_id })
    }

    /// Generate a bite code not held by any player of the game, consumed or not
    async fn generate_unique_code(
        db: &DatabaseConnection,
        game_id: i32,
    ) -> Result<String, GameError> {
        for _ in 0..MAX_CODE_GENERATION_ATTEMPTS {
            let code = generate_bite_code();

            let existing = player::Entity::find()
                .filter(player::Column::GameId.eq(game_id))
                .filter(player::Column::BiteCode.eq(&code))
                .one(db)
                .await?;

            if existing.is_none() {
                return Ok(code);
            }
        }

        Err(code_space_exhausted())
    }

    fn validate_position(latitude: f64, longitude: f64) -> Result<Position, GameError> {
        let position = Position::new(latitude, longitude);
        if position.is_valid() {
            Ok(position)
        } else {
            Err(GameError::InvalidPosition {
                latitude,
                longitude,
            })
        }
    }

    /// The driver message of a unique-constraint violation, if `err` is one
    fn unique_violation(err: &DbErr) -> Option<String> {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Some(message),
            _ => None,
        }
    }
}

/// Whether a unique violation hit the `(game_id, bite_code)` index rather
/// than the one-registration-per-user index.
///
/// Postgres names the index (`idx_player_game_bite_code`), `SQLite` lists
/// the columns (`player.game_id, player.bite_code`); both mention `bite_code`.
fn is_bite_code_conflict(message: &str) -> bool {
    message.contains("bite_code")
}

fn code_space_exhausted() -> GameError {
    GameError::Storage(DbErr::Custom(
        "Failed to generate unique bite code after multiple attempts".to_string(),
    ))
}
