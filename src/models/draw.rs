use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{ConditionType, participant_entity, prize_entity};

/// 不可抽奖原因
/// 每个变体对应一个稳定的错误码, 客户端据此渲染提示文案
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IneligibleReason {
    /// 冷却期未过, 还需等待 days_remaining 天
    CooldownNotElapsed { days_remaining: i64 },
    /// 活动参与人数已达上限
    CampaignFull,
    /// 尚未完成任何可解锁游戏的条件
    NoConditionCompleted,
    /// 可用的解锁条件已全部消耗 (含门店级同类型去重)
    AllPlayableConditionsExhausted,
    /// 无条件活动每人仅可抽一次
    AlreadyPlayed,
}

impl IneligibleReason {
    pub fn code(&self) -> &'static str {
        match self {
            IneligibleReason::CooldownNotElapsed { .. } => "COOLDOWN_NOT_ELAPSED",
            IneligibleReason::CampaignFull => "CAMPAIGN_FULL",
            IneligibleReason::NoConditionCompleted => "NO_CONDITION_COMPLETED",
            IneligibleReason::AllPlayableConditionsExhausted => {
                "ALL_PLAYABLE_CONDITIONS_EXHAUSTED"
            }
            IneligibleReason::AlreadyPlayed => "ALREADY_PLAYED",
        }
    }

    pub fn days_remaining(&self) -> Option<i64> {
        match self {
            IneligibleReason::CooldownNotElapsed { days_remaining } => Some(*days_remaining),
            _ => None,
        }
    }
}

impl std::fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IneligibleReason::CooldownNotElapsed { days_remaining } => {
                write!(f, "You can play again in {days_remaining} day(s)")
            }
            IneligibleReason::CampaignFull => {
                write!(f, "This campaign has reached its participant limit")
            }
            IneligibleReason::NoConditionCompleted => {
                write!(f, "Complete a campaign condition to unlock the game")
            }
            IneligibleReason::AllPlayableConditionsExhausted => {
                write!(f, "All available plays have been used")
            }
            IneligibleReason::AlreadyPlayed => write!(f, "You have already played this campaign"),
        }
    }
}

/// 抽奖资格查询参数
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EligibilityQuery {
    /// 参与者邮箱
    pub email: String,
}

/// 抽奖资格响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EligibilityResponse {
    pub can_play: bool,
    /// can_play=true 时本次抽奖将消耗的条件
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocking_condition_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocking_condition_type: Option<ConditionType>,
    /// can_play=false 时的机器可读原因码
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// 仅冷却未过时返回
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
}

impl EligibilityResponse {
    pub fn eligible(
        unlocking_condition_id: Option<i64>,
        unlocking_condition_type: Option<ConditionType>,
    ) -> Self {
        EligibilityResponse {
            can_play: true,
            unlocking_condition_id,
            unlocking_condition_type,
            reason_code: None,
            message: None,
            days_remaining: None,
        }
    }

    pub fn ineligible(reason: &IneligibleReason) -> Self {
        EligibilityResponse {
            can_play: false,
            unlocking_condition_id: None,
            unlocking_condition_type: None,
            reason_code: Some(reason.code().to_string()),
            message: Some(reason.to_string()),
            days_remaining: reason.days_remaining(),
        }
    }
}

/// 抽奖请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlayRequest {
    pub email: String,
    pub name: Option<String>,
}

/// 条件完成上报（由评价校验层在确认后调用）
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CompleteConditionRequest {
    pub email: String,
    pub name: Option<String>,
}

/// 参与者信息响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantResponse {
    pub email: String,
    pub name: Option<String>,
    pub has_played: bool,
    pub play_count: i32,
    pub played_at: Option<DateTime<Utc>>,
    pub completed_conditions: Vec<i64>,
    pub played_conditions: Vec<i64>,
}

impl From<participant_entity::Model> for ParticipantResponse {
    fn from(m: participant_entity::Model) -> Self {
        ParticipantResponse {
            email: m.email,
            name: m.name,
            has_played: m.has_played,
            play_count: m.play_count,
            played_at: m.played_at,
            completed_conditions: m.completed_conditions.0,
            played_conditions: m.played_conditions.0,
        }
    }
}

/// 中奖后返回给客户的奖品信息
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WonPrizeResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub value: Option<String>,
    pub color: Option<String>,
}

impl From<&prize_entity::Model> for WonPrizeResponse {
    fn from(m: &prize_entity::Model) -> Self {
        WonPrizeResponse {
            id: m.id,
            name: m.name.clone(),
            description: m.description.clone(),
            value: m.value.clone(),
            color: m.color.clone(),
        }
    }
}

/// 游戏动画结果
/// none 表示未中奖或未配置游戏, 前端播放通用"未中奖"动画
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualOutcome {
    None,
    /// 转盘停在指定扇区
    WheelSegment { segment_id: i32 },
    /// 老虎机显示指定图案组合
    SlotSymbols { symbols: Vec<String> },
}

/// 抽奖结果响应
/// 中奖时 prize / claim_code / claim_expires_at 齐全, 未中奖时全部为 null
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResultResponse {
    pub participant: ParticipantResponse,
    pub has_won: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize: Option<WonPrizeResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_expires_at: Option<DateTime<Utc>>,
    pub outcome: VisualOutcome,
}
