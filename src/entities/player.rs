use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{Actor, Faction, Position};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "player")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeUtc,
    pub game_id: i32,
    pub user_id: String,
    pub faction: String,
    pub squad_id: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing)]
    pub bite_code: String,
    pub bite_code_consumed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game::Entity",
        from = "Column::GameId",
        to = "super::game::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Game,
    #[sea_orm(has_many = "super::infection::Entity")]
    Infections,
}

impl Related<super::game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::infection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Infections.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[must_use]
    pub fn faction(&self) -> Faction {
        Faction::from_str(&self.faction).unwrap_or_default()
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }

    /// The player as seen by the visibility rules.
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::new(self.faction(), self.position())
    }
}
