use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

/// Campaigns (活动表 - 每个门店可发布多个扫码抽奖活动)
#[derive(DeriveIden)]
enum Campaigns {
    Table,
    Id,
    StoreId,
    PublicId,
    Name,
    IsActive,
    MaxParticipants,
    MinDaysBetweenPlays,
    PrizeClaimExpiryDays,
    CreatedAt,
    UpdatedAt,
}

/// Campaign Conditions (活动参与条件 - 有序, 完成后可解锁游戏)
#[derive(DeriveIden)]
enum CampaignConditions {
    Table,
    Id,
    CampaignId,
    ConditionType,
    Title,
    DisplayOrder,
    EnablesGame,
    IsRequired,
    CreatedAt,
}

/// Games (活动绑定的游戏配置, 一个活动至多一个游戏)
#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
    CampaignId,
    GameType,
    Config,
    CreatedAt,
}

/// Prizes (奖品表 - 有限库存 + 概率)
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    CampaignId,
    Name,
    Description,
    Value,
    Color,
    Probability,
    InitialStock,
    Remaining,
    DisplayOrder,
    CreatedAt,
    UpdatedAt,
}

/// Participants (参与者 - 按 (campaign_id, email) 唯一)
#[derive(DeriveIden)]
enum Participants {
    Table,
    Id,
    CampaignId,
    Email,
    Name,
    HasPlayed,
    PlayCount,
    PlayedAt,
    CompletedConditions,
    PlayedConditions,
    CreatedAt,
    UpdatedAt,
}

/// Winners (中奖记录 - 由抽奖流程独占创建)
#[derive(DeriveIden)]
enum Winners {
    Table,
    Id,
    CampaignId,
    PrizeId,
    PrizeName,
    Email,
    Name,
    ClaimCode,
    Status,
    ExpiresAt,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 枚举类型
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("condition_type"))
                    .values(vec![
                        Alias::new("google_review"),
                        Alias::new("social_follow"),
                        Alias::new("newsletter"),
                        Alias::new("survey"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("game_type"))
                    .values(vec![
                        Alias::new("wheel"),
                        Alias::new("wheel_mini"),
                        Alias::new("slot_machine"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("claim_status"))
                    .values(vec![
                        Alias::new("pending"),
                        Alias::new("redeemed"),
                        Alias::new("expired"),
                    ])
                    .to_owned(),
            )
            .await?;

        // 活动表
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaigns::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campaigns::StoreId).big_integer().not_null())
                    .col(ColumnDef::new(Campaigns::PublicId).uuid().not_null())
                    .col(ColumnDef::new(Campaigns::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Campaigns::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Campaigns::MaxParticipants)
                            .integer()
                            .null(), // NULL = 不限人数
                    )
                    .col(
                        ColumnDef::new(Campaigns::MinDaysBetweenPlays)
                            .integer()
                            .null(), // NULL = 无冷却
                    )
                    .col(
                        ColumnDef::new(Campaigns::PrizeClaimExpiryDays)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(
                        ColumnDef::new(Campaigns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Campaigns::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 扫码入口使用 public_id, 必须唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_campaigns_public_id_unique")
                    .table(Campaigns::Table)
                    .col(Campaigns::PublicId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_campaigns_store")
                    .table(Campaigns::Table)
                    .col(Campaigns::StoreId)
                    .to_owned(),
            )
            .await?;

        // 条件表
        manager
            .create_table(
                Table::create()
                    .table(CampaignConditions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CampaignConditions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CampaignConditions::CampaignId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CampaignConditions::ConditionType)
                            .custom(Alias::new("condition_type"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CampaignConditions::Title)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CampaignConditions::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CampaignConditions::EnablesGame)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CampaignConditions::IsRequired)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CampaignConditions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_campaign_conditions_campaign")
                    .table(CampaignConditions::Table)
                    .col(CampaignConditions::CampaignId)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(CampaignConditions::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_campaign_condition_campaign")
                            .from_tbl(CampaignConditions::Table)
                            .from_col(CampaignConditions::CampaignId)
                            .to_tbl(Campaigns::Table)
                            .to_col(Campaigns::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 游戏配置表
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::CampaignId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Games::GameType)
                            .custom(Alias::new("game_type"))
                            .not_null(),
                    )
                    .col(ColumnDef::new(Games::Config).json_binary().not_null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 一个活动至多绑定一个游戏
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_games_campaign_unique")
                    .table(Games::Table)
                    .col(Games::CampaignId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Games::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_game_campaign")
                            .from_tbl(Games::Table)
                            .from_col(Games::CampaignId)
                            .to_tbl(Campaigns::Table)
                            .to_col(Campaigns::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 奖品表
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::CampaignId).big_integer().not_null())
                    .col(ColumnDef::new(Prizes::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Prizes::Description).text().null())
                    .col(ColumnDef::new(Prizes::Value).string_len(255).null())
                    .col(ColumnDef::new(Prizes::Color).string_len(16).null())
                    .col(ColumnDef::new(Prizes::Probability).double().not_null())
                    .col(
                        ColumnDef::new(Prizes::InitialStock)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Prizes::Remaining)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Prizes::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Prizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Prizes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prizes_campaign")
                    .table(Prizes::Table)
                    .col(Prizes::CampaignId)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Prizes::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_prize_campaign")
                            .from_tbl(Prizes::Table)
                            .from_col(Prizes::CampaignId)
                            .to_tbl(Campaigns::Table)
                            .to_col(Campaigns::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 参与者表
        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participants::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Participants::CampaignId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::Email)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Participants::Name).string_len(255).null())
                    .col(
                        ColumnDef::new(Participants::HasPlayed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Participants::PlayCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Participants::PlayedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Participants::CompletedConditions)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Participants::PlayedConditions)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Participants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Participants::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一活动同一邮箱只允许一条参与记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_participants_campaign_email_unique")
                    .table(Participants::Table)
                    .col(Participants::CampaignId)
                    .col(Participants::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Participants::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_participant_campaign")
                            .from_tbl(Participants::Table)
                            .from_col(Participants::CampaignId)
                            .to_tbl(Campaigns::Table)
                            .to_col(Campaigns::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 中奖记录表
        manager
            .create_table(
                Table::create()
                    .table(Winners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Winners::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Winners::CampaignId).big_integer().not_null())
                    .col(ColumnDef::new(Winners::PrizeId).big_integer().not_null())
                    .col(ColumnDef::new(Winners::PrizeName).string_len(255).not_null())
                    .col(ColumnDef::new(Winners::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Winners::Name).string_len(255).null())
                    .col(ColumnDef::new(Winners::ClaimCode).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Winners::Status)
                            .custom(Alias::new("claim_status"))
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Winners::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Winners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 兑奖码唯一 (线下核销凭证)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_winners_claim_code_unique")
                    .table(Winners::Table)
                    .col(Winners::ClaimCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_winners_campaign")
                    .table(Winners::Table)
                    .col(Winners::CampaignId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_winners_prize")
                    .table(Winners::Table)
                    .col(Winners::PrizeId)
                    .to_owned(),
            )
            .await?;

        // 外键（不加 ON DELETE CASCADE, 保证中奖历史仍然存在）
        manager
            .alter_table(
                Table::alter()
                    .table(Winners::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_winner_prize")
                            .from_tbl(Winners::Table)
                            .from_col(Winners::PrizeId)
                            .to_tbl(Prizes::Table)
                            .to_col(Prizes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序: 中奖 -> 参与者 -> 奖品 -> 游戏 -> 条件 -> 活动
        manager
            .drop_table(Table::drop().if_exists().table(Winners::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Participants::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Games::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(CampaignConditions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Campaigns::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().if_exists().name(Alias::new("claim_status")).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().if_exists().name(Alias::new("game_type")).to_owned())
            .await?;
        manager
            .drop_type(
                Type::drop()
                    .if_exists()
                    .name(Alias::new("condition_type"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
