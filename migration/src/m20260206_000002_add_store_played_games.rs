use sea_orm_migration::prelude::*;

/// Store Played Games (门店级防重复记录)
/// 同一客户在同一家门店, 同一种条件类型只能换取一次游戏机会,
/// 跨活动生效; 记录最近一次消耗该类型的活动。
#[derive(DeriveIden)]
enum StorePlayedGames {
    Table,
    Id,
    Email,
    StoreId,
    ConditionType,
    CampaignId,
    PlayedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StorePlayedGames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StorePlayedGames::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StorePlayedGames::Email)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StorePlayedGames::StoreId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StorePlayedGames::ConditionType)
                            .custom(Alias::new("condition_type"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StorePlayedGames::CampaignId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StorePlayedGames::PlayedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 幂等 upsert 依赖该唯一索引 (email + store + condition_type)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_store_played_games_unique")
                    .table(StorePlayedGames::Table)
                    .col(StorePlayedGames::Email)
                    .col(StorePlayedGames::StoreId)
                    .col(StorePlayedGames::ConditionType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_store_played_games_campaign")
                    .table(StorePlayedGames::Table)
                    .col(StorePlayedGames::CampaignId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(StorePlayedGames::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
