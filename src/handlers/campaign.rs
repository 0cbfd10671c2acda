use crate::models::*;
use crate::services::{CampaignService, EligibilityOutcome, EligibilityService};
use crate::utils::normalize_email;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/campaigns/{public_id}",
    tag = "campaign",
    params(
        ("public_id" = Uuid, Path, description = "活动对外标识 (二维码中的 UUID)")
    ),
    responses(
        (status = 200, description = "获取活动公开信息成功", body = CampaignPublicResponse),
        (status = 404, description = "活动不存在"),
        (status = 410, description = "活动已下线")
    )
)]
/// 获取活动公开信息（扫码落地页数据）
/// 条件按展示顺序返回, 奖品仅含有库存的, 不暴露概率与库存数
pub async fn get_campaign(
    service: web::Data<CampaignService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let public_id = path.into_inner();
    match service.public_view(public_id).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/campaigns/{public_id}/eligibility",
    tag = "campaign",
    params(
        ("public_id" = Uuid, Path, description = "活动对外标识"),
        ("email" = String, Query, description = "参与者邮箱")
    ),
    responses(
        (status = 200, description = "资格判定结果 (can_play + 原因码)", body = EligibilityResponse),
        (status = 404, description = "活动不存在"),
        (status = 410, description = "活动已下线")
    )
)]
/// 查询参与者当前抽奖资格（只读, 不消耗机会）
/// can_play=false 时附带原因码与提示文案, 冷却中还会返回剩余天数
pub async fn get_eligibility(
    campaign_service: web::Data<CampaignService>,
    eligibility_service: web::Data<EligibilityService>,
    path: web::Path<Uuid>,
    query: web::Query<EligibilityQuery>,
) -> Result<HttpResponse> {
    let public_id = path.into_inner();
    let email = match normalize_email(&query.email) {
        Ok(email) => email,
        Err(e) => return Ok(e.error_response()),
    };

    let snapshot = match campaign_service.load_snapshot_by_public_id(public_id).await {
        Ok(snapshot) => snapshot,
        Err(e) => return Ok(e.error_response()),
    };

    match eligibility_service.evaluate(&snapshot, &email).await {
        Ok(outcome) => {
            let data = match outcome {
                EligibilityOutcome::Eligible(permit) => EligibilityResponse::eligible(
                    permit.unlocking_condition_id,
                    permit.unlocking_condition_type,
                ),
                EligibilityOutcome::Ineligible(reason) => EligibilityResponse::ineligible(&reason),
            };
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn campaign_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/campaigns/{public_id}", web::get().to(get_campaign))
        .route(
            "/campaigns/{public_id}/eligibility",
            web::get().to(get_eligibility),
        );
}
