use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 抽奖活动实体
/// 概念说明:
/// - public_id: 二维码/链接中暴露的活动标识 (UUID), 内部主键不对外
/// - max_participants: 参与人数上限 (NULL 表示不限)
/// - min_days_between_plays: 同一参与者两次抽奖之间的最小间隔天数 (NULL 表示无冷却)
/// - prize_claim_expiry_days: 中奖后兑奖码有效天数
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 所属门店
    pub store_id: i64,
    /// 对外活动标识 (唯一)
    pub public_id: Uuid,
    pub name: String,
    /// 是否上线
    pub is_active: bool,
    /// 参与人数上限 (NULL=不限)
    pub max_participants: Option<i32>,
    /// 抽奖冷却天数 (NULL=无冷却)
    pub min_days_between_plays: Option<i32>,
    /// 兑奖码有效天数
    pub prize_claim_expiry_days: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
