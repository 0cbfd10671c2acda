use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 奖品实体
/// 概念说明:
/// - probability: 中奖概率 (0..1), 活动内所有奖品之和 <= 1, 剩余质量为"谢谢参与"
/// - remaining: 剩余库存, remaining > 0 才参与抽取; 仅抽奖流程原子扣减
/// - display_order: 奖品在活动内的展示顺序, 同时决定游戏配置中 prize_index 的指向
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub campaign_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// 展示价值文案 (如 "10% off", "Free drink")
    pub value: Option<String>,
    /// 转盘扇区颜色 (十六进制)
    pub color: Option<String>,
    /// 中奖概率 (0..1)
    pub probability: f64,
    /// 配置时的初始库存
    pub initial_stock: i32,
    /// 剩余库存
    pub remaining: i32,
    pub display_order: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// 是否还有库存
    pub fn is_in_stock(&self) -> bool {
        self.remaining > 0
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
