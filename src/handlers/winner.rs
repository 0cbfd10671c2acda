use crate::models::*;
use crate::services::{CampaignService, WinnerService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/campaigns/{public_id}/winners",
    tag = "winner",
    params(
        ("public_id" = Uuid, Path, description = "活动对外标识"),
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    responses(
        (status = 200, description = "获取中奖记录成功", body = PaginatedResponse<WinnerResponse>),
        (status = 404, description = "活动不存在")
    )
)]
/// 分页获取活动中奖记录（门店后台, 倒序）
/// 活动下线后仍可读取历史记录
pub async fn list_winners(
    campaign_service: web::Data<CampaignService>,
    winner_service: web::Data<WinnerService>,
    path: web::Path<Uuid>,
    query: web::Query<WinnerQuery>,
) -> Result<HttpResponse> {
    let public_id = path.into_inner();

    let campaign = match campaign_service.find_by_public_id(public_id).await {
        Ok(campaign) => campaign,
        Err(e) => return Ok(e.error_response()),
    };

    match winner_service
        .list_winners(campaign.id, &query.into_inner())
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn winner_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/campaigns/{public_id}/winners", web::get().to(list_winners));
}
