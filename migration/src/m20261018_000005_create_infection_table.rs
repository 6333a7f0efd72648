use sea_orm_migration::prelude::*;

/// Creates the `infection` table: one row per consumed bite code.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Infection {
    Table,
    Id,
    GameId,
    VictimId,
    InfectedAt,
    Latitude,
    Longitude,
}

#[derive(DeriveIden)]
enum Game {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Player {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Infection::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Infection::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Infection::GameId).integer().not_null())
                    .col(ColumnDef::new(Infection::VictimId).integer().not_null())
                    .col(
                        ColumnDef::new(Infection::InfectedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Infection::Latitude).double().not_null())
                    .col(ColumnDef::new(Infection::Longitude).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_infection_game_id")
                            .from(Infection::Table, Infection::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_infection_victim_id")
                            .from(Infection::Table, Infection::VictimId)
                            .to(Player::Table, Player::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Infection::Table).to_owned())
            .await
    }
}
