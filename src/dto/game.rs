use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::GamePhase;
use crate::entities::game;

// ============ Request DTOs ============

/// POST /api/v1/games - Create game request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    /// Game title (1-50 chars)
    pub title: String,
    pub description: Option<String>,
    /// Earliest instant the game may be started
    pub begin_time: DateTime<Utc>,
    /// The game can no longer be started from this instant on
    pub end_time: DateTime<Utc>,
    /// Identifier of the administrating user
    pub admin_id: String,
}

/// PATCH /api/v1/games/:id - Partial update, absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameRequest {
    pub title: Option<String>,
    /// `null` clears the description
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    pub begin_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// POST /api/v1/games/:id/advance - Move to the next phase
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceGameRequest {
    pub phase: GamePhase,
}

// ============ Response DTOs ============

/// Game details response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub begin_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub phase: GamePhase,
    pub admin_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<game::Model> for GameResponse {
    fn from(game: game::Model) -> Self {
        Self {
            id: game.id,
            phase: game.phase(),
            title: game.title,
            description: game.description,
            begin_time: game.begin_time,
            end_time: game.end_time,
            admin_id: game.admin_id,
            created_at: game.created_at,
            updated_at: game.updated_at,
        }
    }
}

/// Game details with live head counts
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetailsResponse {
    #[serde(flatten)]
    pub game: GameResponse,
    pub player_count: u64,
    pub human_count: u64,
    pub zombie_count: u64,
}

/// Phase change response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePhaseResponse {
    pub id: i32,
    pub phase: GamePhase,
    pub message: String,
}
