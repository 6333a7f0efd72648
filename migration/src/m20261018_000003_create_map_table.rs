use sea_orm_migration::prelude::*;

/// Creates the `map` table: the bounded play area of a game.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Map {
    Table,
    Id,
    CreatedAt,
    GameId,
    Name,
    Description,
    Latitude,
    Longitude,
    Radius,
}

#[derive(DeriveIden)]
enum Game {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Map::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Map::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Map::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Map::GameId).integer().not_null())
                    .col(ColumnDef::new(Map::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Map::Description).string_len(300).null())
                    .col(ColumnDef::new(Map::Latitude).double().not_null())
                    .col(ColumnDef::new(Map::Longitude).double().not_null())
                    .col(ColumnDef::new(Map::Radius).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_map_game_id")
                            .from(Map::Table, Map::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Map::Table).to_owned())
            .await
    }
}
