use sea_orm_migration::prelude::*;

/// Creates the `point_of_interest` table shared by supplies, safezones and
/// missions. Drop columns are only populated for supplies.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum PointOfInterest {
    Table,
    Id,
    CreatedAt,
    MapId,
    Kind,
    Title,
    Description,
    Latitude,
    Longitude,
    Radius,
    HumanVisible,
    ZombieVisible,
    BeginTime,
    EndTime,
    DropKind,
    Amount,
}

#[derive(DeriveIden)]
enum Map {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PointOfInterest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PointOfInterest::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PointOfInterest::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PointOfInterest::MapId).integer().not_null())
                    .col(ColumnDef::new(PointOfInterest::Kind).string_len(10).not_null())
                    .col(ColumnDef::new(PointOfInterest::Title).string_len(20).not_null())
                    .col(
                        ColumnDef::new(PointOfInterest::Description)
                            .string_len(300)
                            .null(),
                    )
                    .col(ColumnDef::new(PointOfInterest::Latitude).double().not_null())
                    .col(ColumnDef::new(PointOfInterest::Longitude).double().not_null())
                    .col(ColumnDef::new(PointOfInterest::Radius).integer().not_null())
                    .col(
                        ColumnDef::new(PointOfInterest::HumanVisible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PointOfInterest::ZombieVisible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PointOfInterest::BeginTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PointOfInterest::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PointOfInterest::DropKind).string_len(10).null())
                    .col(ColumnDef::new(PointOfInterest::Amount).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_point_of_interest_map_id")
                            .from(PointOfInterest::Table, PointOfInterest::MapId)
                            .to(Map::Table, Map::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PointOfInterest::Table).to_owned())
            .await
    }
}
