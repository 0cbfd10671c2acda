use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::entities::winner_entity as winners;
use crate::error::AppResult;
use crate::models::{
    PaginatedResponse, PaginationParams, WinnerPageResponse, WinnerQuery, WinnerResponse,
};

#[derive(Clone)]
pub struct WinnerService {
    pool: DatabaseConnection,
}

impl WinnerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 获取活动中奖记录（分页, 按时间倒序）
    pub async fn list_winners(
        &self,
        campaign_id: i64,
        query: &WinnerQuery,
    ) -> AppResult<WinnerPageResponse> {
        let params = PaginationParams::new(query.page, query.per_page);
        let offset = params.get_offset();
        let limit = params.get_limit();

        let base_query = winners::Entity::find().filter(winners::Column::CampaignId.eq(campaign_id));

        let total = base_query.clone().count(&self.pool).await? as i64;

        let items_models = base_query
            .order_by(winners::Column::CreatedAt, Order::Desc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<WinnerResponse> = items_models.into_iter().map(Into::into).collect();

        Ok(PaginatedResponse::new(
            items,
            params.page.unwrap_or(1),
            params.page_size.unwrap_or(20),
            total,
        ))
    }
}
