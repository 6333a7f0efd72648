pub use sea_orm_migration::prelude::*;

mod m20261018_000001_create_game_table;
mod m20261018_000002_create_player_table;
mod m20261018_000003_create_map_table;
mod m20261018_000004_create_point_of_interest_table;
mod m20261018_000005_create_infection_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000001_create_game_table::Migration),
            Box::new(m20261018_000002_create_player_table::Migration),
            Box::new(m20261018_000003_create_map_table::Migration),
            Box::new(m20261018_000004_create_point_of_interest_table::Migration),
            Box::new(m20261018_000005_create_infection_table::Migration),
        ]
    }
}
