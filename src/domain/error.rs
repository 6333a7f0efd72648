//! Error kinds surfaced by the game rules.
//!
//! Every failure of a lifecycle, ledger or visibility operation is one of
//! these variants. Nothing is retried or swallowed here; the transport layer
//! maps each kind to a stable response via [`GameError::code`].

use sea_orm::DbErr;

use super::phase::GamePhase;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Invalid game configuration: {0}")]
    InvalidGameConfiguration(String),

    #[error("Cannot move game from '{from}' to '{to}'")]
    IllegalPhaseTransition { from: GamePhase, to: GamePhase },

    #[error("Game {0} has no registered players")]
    NoPlayersRegistered(i32),

    #[error("Game {0} can only start between its begin and end time")]
    GameNotInWindow(i32),

    #[error("Game {game_id} is '{phase}', which does not allow this action")]
    GameNotActive { game_id: i32, phase: GamePhase },

    #[error("User '{user_id}' already has a player in game {game_id}")]
    DuplicateRegistration { game_id: i32, user_id: String },

    #[error("Bite code is unknown or has already been used")]
    InvalidBiteCode,

    #[error("Player {player_id} not found in game {game_id}")]
    PlayerNotFound { game_id: i32, player_id: i32 },

    #[error("Game {0} not found")]
    GameNotFound(i32),

    #[error("Map {0} not found")]
    MapNotFound(i32),

    #[error("Point of interest {0} not found")]
    PoiNotFound(i32),

    #[error("Invalid point of interest: {0}")]
    InvalidPointOfInterest(String),

    #[error("Position ({latitude}, {longitude}) is outside the valid coordinate range")]
    InvalidPosition { latitude: f64, longitude: f64 },

    #[error("Storage error: {0}")]
    Storage(#[from] DbErr),
}

impl GameError {
    /// Stable machine-readable identifier of the error kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidGameConfiguration(_) => "INVALID_GAME_CONFIGURATION",
            Self::IllegalPhaseTransition { .. } => "ILLEGAL_PHASE_TRANSITION",
            Self::NoPlayersRegistered(_) => "NO_PLAYERS_REGISTERED",
            Self::GameNotInWindow(_) => "GAME_NOT_IN_WINDOW",
            Self::GameNotActive { .. } => "GAME_NOT_ACTIVE",
            Self::DuplicateRegistration { .. } => "DUPLICATE_REGISTRATION",
            Self::InvalidBiteCode => "INVALID_BITE_CODE",
            Self::PlayerNotFound { .. } => "PLAYER_NOT_FOUND",
            Self::GameNotFound(_) => "GAME_NOT_FOUND",
            Self::MapNotFound(_) => "MAP_NOT_FOUND",
            Self::PoiNotFound(_) => "POI_NOT_FOUND",
            Self::InvalidPointOfInterest(_) => "INVALID_POINT_OF_INTEREST",
            Self::InvalidPosition { .. } => "INVALID_POSITION",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}
