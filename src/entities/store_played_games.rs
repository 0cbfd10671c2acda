use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entities::ConditionType;

/// 门店级防重复记录实体
/// 按 (email, store_id, condition_type) 唯一; 防止同一客户在同一门店
/// 通过相同条件类型跨活动重复换取抽奖机会。每次成功抽奖 upsert,
/// campaign_id / played_at 指向最近一次消耗。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "store_played_games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub email: String,
    pub store_id: i64,
    pub condition_type: ConditionType,
    /// 最近一次消耗该类型的活动
    pub campaign_id: i64,
    pub played_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
