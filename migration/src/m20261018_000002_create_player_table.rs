use sea_orm_migration::prelude::*;

/// Creates the `player` table. A user registers at most once per game and
/// bite codes are unique within a game, consumed or not.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Player {
    Table,
    Id,
    CreatedAt,
    GameId,
    UserId,
    Faction,
    SquadId,
    Latitude,
    Longitude,
    BiteCode,
    BiteCodeConsumedAt,
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
                    .table(Player::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Player::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Player::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Player::GameId).integer().not_null())
                    .col(ColumnDef::new(Player::UserId).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Player::Faction)
                            .string_len(10)
                            .not_null()
                            .default("human"),
                    )
                    .col(ColumnDef::new(Player::SquadId).integer().null())
                    .col(ColumnDef::new(Player::Latitude).double().not_null())
                    .col(ColumnDef::new(Player::Longitude).double().not_null())
                    .col(ColumnDef::new(Player::BiteCode).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Player::BiteCodeConsumedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_game_id")
                            .from(Player::Table, Player::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_player_game_user")
                    .table(Player::Table)
                    .col(Player::GameId)
                    .col(Player::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_player_game_bite_code")
                    .table(Player::Table)
                    .col(Player::GameId)
                    .col(Player::BiteCode)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Player::Table).to_owned())
            .await
    }
}
