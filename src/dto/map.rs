use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::map;

/// POST /api/v1/games/:id/maps
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMapRequest {
    pub name: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Play-area radius in meters
    pub radius: i32,
}

/// PATCH /api/v1/maps/:id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMapRequest {
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapResponse {
    pub id: i32,
    pub game_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: i32,
    pub created_at: DateTime<Utc>,
}

impl From<map::Model> for MapResponse {
    fn from(map: map::Model) -> Self {
        Self {
            id: map.id,
            game_id: map.game_id,
            name: map.name,
            description: map.description,
            latitude: map.latitude,
            longitude: map.longitude,
            radius: map.radius,
            created_at: map.created_at,
        }
    }
}
