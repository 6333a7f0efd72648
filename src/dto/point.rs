use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DropKind, PoiKind};
use crate::entities::point_of_interest;

/// POST /api/v1/maps/:map_id/{supplies|safezones|missions}
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePointRequest {
    pub title: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: i32,
    pub human_visible: bool,
    pub zombie_visible: bool,
    pub begin_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
    pub drop_kind: Option<DropKind>,
    pub amount: Option<i32>,
}

/// PATCH /api/v1/maps/:map_id/{kind}/:id - field-by-field update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePointRequest {
    pub title: Option<String>,
    /// `null` clears the description
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<i32>,
    pub human_visible: Option<bool>,
    pub zombie_visible: Option<bool>,
    /// `null` makes the point active from the start
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub begin_time: Option<Option<DateTime<Utc>>>,
    pub end_time: Option<DateTime<Utc>>,
    pub drop_kind: Option<DropKind>,
    pub amount: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointResponse {
    pub id: i32,
    pub map_id: i32,
    pub kind: Option<PoiKind>,
    pub title: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: i32,
    pub human_visible: bool,
    pub zombie_visible: bool,
    pub begin_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_kind: Option<DropKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i32>,
}

impl From<&point_of_interest::Model> for PointResponse {
    fn from(point: &point_of_interest::Model) -> Self {
        Self {
            id: point.id,
            map_id: point.map_id,
            kind: point.kind(),
            title: point.title.clone(),
            description: point.description.clone(),
            latitude: point.latitude,
            longitude: point.longitude,
            radius: point.radius,
            human_visible: point.human_visible,
            zombie_visible: point.zombie_visible,
            begin_time: point.begin_time,
            end_time: point.end_time,
            drop_kind: point.drop_kind(),
            amount: point.amount,
        }
    }
}

/// List of points, e.g. the reveal query result
#[derive(Debug, Serialize)]
pub struct PointsListResponse {
    pub points: Vec<PointResponse>,
    pub count: usize,
}
