use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{GamePhase, TimeWindow};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub title: String,
    pub description: Option<String>,
    pub begin_time: DateTimeUtc,
    pub end_time: DateTimeUtc,
    pub phase: String,
    pub admin_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::player::Entity")]
    Players,
    #[sea_orm(has_many = "super::map::Entity")]
    Maps,
    #[sea_orm(has_many = "super::infection::Entity")]
    Infections,
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl Related<super::map::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Maps.def()
    }
}

impl Related<super::infection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Infections.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Stored phase. Unknown values are treated as cancelled so they never admit play.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        GamePhase::from_str(&self.phase).unwrap_or(GamePhase::Cancelled)
    }

    /// The window in which the game may be started.
    #[must_use]
    pub const fn window(&self) -> TimeWindow {
        TimeWindow::between(self.begin_time, self.end_time)
    }
}
