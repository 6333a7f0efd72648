use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Faction;
use crate::entities::{infection, player};

// ============ Request DTOs ============

/// POST /api/v1/games/:id/players - Register for a game
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPlayerRequest {
    pub user_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// POST /api/v1/games/:id/infections - "I got bitten, here is my attacker's code"
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfectRequest {
    pub bite_code: String,
}

/// PUT /api/v1/games/:id/players/:player_id/position
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePositionRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// PUT /api/v1/games/:id/players/:player_id/squad
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignSquadRequest {
    pub squad_id: Option<i32>,
}

/// GET /api/v1/games/:id/players?faction=zombie
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PlayerFilter {
    pub faction: Option<Faction>,
}

// ============ Response DTOs ============

/// Player details response. Never carries the bite code.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: i32,
    pub game_id: i32,
    pub user_id: String,
    pub faction: Faction,
    pub squad_id: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
    pub joined_at: DateTime<Utc>,
}

impl From<player::Model> for PlayerResponse {
    fn from(player: player::Model) -> Self {
        Self {
            id: player.id,
            faction: player.faction(),
            game_id: player.game_id,
            user_id: player.user_id,
            squad_id: player.squad_id,
            latitude: player.latitude,
            longitude: player.longitude,
            joined_at: player.created_at,
        }
    }
}

/// Registration response: the only place a player's own bite code is revealed
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredPlayerResponse {
    #[serde(flatten)]
    pub player: PlayerResponse,
    pub bite_code: String,
}

/// List of players in a game
#[derive(Debug, Serialize)]
pub struct PlayersListResponse {
    pub players: Vec<PlayerResponse>,
    pub count: usize,
}

/// Faction lookup response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionResponse {
    pub player_id: i32,
    pub faction: Faction,
}

/// A recorded infection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfectionResponse {
    pub id: i32,
    pub game_id: i32,
    pub victim_id: i32,
    pub infected_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<infection::Model> for InfectionResponse {
    fn from(infection: infection::Model) -> Self {
        Self {
            id: infection.id,
            game_id: infection.game_id,
            victim_id: infection.victim_id,
            infected_at: infection.infected_at,
            latitude: infection.latitude,
            longitude: infection.longitude,
        }
    }
}
