use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 参与条件类型
/// 跨活动的门店级防重复按该类型去重 (见 store_played_games)
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "condition_type")]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    #[sea_orm(string_value = "google_review")]
    GoogleReview,
    #[sea_orm(string_value = "social_follow")]
    SocialFollow,
    #[sea_orm(string_value = "newsletter")]
    Newsletter,
    #[sea_orm(string_value = "survey")]
    Survey,
}

impl std::fmt::Display for ConditionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionType::GoogleReview => write!(f, "google_review"),
            ConditionType::SocialFollow => write!(f, "social_follow"),
            ConditionType::Newsletter => write!(f, "newsletter"),
            ConditionType::Survey => write!(f, "survey"),
        }
    }
}

/// 活动参与条件实体
/// display_order 在同一活动内构成全序; enables_game=true 的条件完成后可换取一次抽奖机会
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "campaign_conditions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub campaign_id: i64,
    pub condition_type: ConditionType,
    /// 展示给客户的条件标题
    pub title: String,
    /// 展示顺序 (同一活动内全序)
    pub display_order: i32,
    /// 完成后是否解锁一次游戏机会
    pub enables_game: bool,
    pub is_required: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
