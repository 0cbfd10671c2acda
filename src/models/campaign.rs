use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{
    ConditionType, GameType, campaign_condition_entity as condition_entity,
    prize_entity,
};

/// 参与条件（对客户展示）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConditionPublicResponse {
    pub id: i64,
    pub condition_type: ConditionType,
    pub title: String,
    pub display_order: i32,
    pub enables_game: bool,
    pub is_required: bool,
}

impl From<&condition_entity::Model> for ConditionPublicResponse {
    fn from(m: &condition_entity::Model) -> Self {
        ConditionPublicResponse {
            id: m.id,
            condition_type: m.condition_type,
            title: m.title.clone(),
            display_order: m.display_order,
            enables_game: m.enables_game,
            is_required: m.is_required,
        }
    }
}

/// 奖品（对客户展示, 不暴露概率与库存）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizePublicResponse {
    pub name: String,
    pub description: Option<String>,
    pub value: Option<String>,
    pub color: Option<String>,
}

impl From<&prize_entity::Model> for PrizePublicResponse {
    fn from(m: &prize_entity::Model) -> Self {
        PrizePublicResponse {
            name: m.name.clone(),
            description: m.description.clone(),
            value: m.value.clone(),
            color: m.color.clone(),
        }
    }
}

/// 活动公开信息（扫码落地页数据）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CampaignPublicResponse {
    pub public_id: Uuid,
    pub name: String,
    /// 未配置游戏时为 null
    pub game_type: Option<GameType>,
    /// 按 display_order 排序
    pub conditions: Vec<ConditionPublicResponse>,
    /// 仅有库存的奖品
    pub prizes: Vec<PrizePublicResponse>,
}
