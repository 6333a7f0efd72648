use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{
    DropKind, FactionVisibility, Geofence, PoiKind, PointOfInterest, Position, TimeWindow,
};

/// Supplies, safezones and missions share this table; `kind` tells them apart.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "point_of_interest")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeUtc,
    pub map_id: i32,
    pub kind: String,
    pub title: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: i32,
    pub human_visible: bool,
    pub zombie_visible: bool,
    pub begin_time: Option<DateTimeUtc>,
    pub end_time: DateTimeUtc,
    pub drop_kind: Option<String>,
    pub amount: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::map::Entity",
        from = "Column::MapId",
        to = "super::map::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Map,
}

impl Related<super::map::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Map.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[must_use]
    pub fn kind(&self) -> Option<PoiKind> {
        PoiKind::from_str(&self.kind)
    }

    #[must_use]
    pub fn drop_kind(&self) -> Option<DropKind> {
        self.drop_kind.as_deref().and_then(DropKind::from_str)
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }
}

impl PointOfInterest for Model {
    fn visibility(&self) -> FactionVisibility {
        FactionVisibility::new(self.human_visible, self.zombie_visible)
    }

    fn window(&self) -> TimeWindow {
        TimeWindow::new(self.begin_time, self.end_time)
    }

    fn geofence(&self) -> Geofence {
        Geofence::new(self.position(), f64::from(self.radius))
    }
}
