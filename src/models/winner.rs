use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{ClaimStatus, winner_entity};

use super::PaginatedResponse;

/// 中奖记录查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct WinnerQuery {
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 20)
    pub per_page: Option<u32>,
}

/// 中奖记录响应（门店后台）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WinnerResponse {
    pub id: i64,
    pub prize_id: i64,
    /// 奖品名称 (中奖时快照)
    pub prize_name: String,
    pub email: String,
    pub name: Option<String>,
    pub claim_code: String,
    pub status: ClaimStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<winner_entity::Model> for WinnerResponse {
    fn from(m: winner_entity::Model) -> Self {
        WinnerResponse {
            id: m.id,
            prize_id: m.prize_id,
            prize_name: m.prize_name,
            email: m.email,
            name: m.name,
            claim_code: m.claim_code,
            status: m.status,
            expires_at: m.expires_at,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// 中奖记录分页响应
pub type WinnerPageResponse = PaginatedResponse<WinnerResponse>;
