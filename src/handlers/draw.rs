use crate::models::*;
use crate::services::{CampaignService, DrawService, ParticipantService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/campaigns/{public_id}/play",
    tag = "draw",
    params(
        ("public_id" = Uuid, Path, description = "活动对外标识")
    ),
    request_body = PlayRequest,
    responses(
        (status = 200, description = "抽奖完成 (中奖或未中奖)", body = DrawResultResponse),
        (status = 404, description = "活动不存在"),
        (status = 409, description = "不符合抽奖资格 (原因见错误码)"),
        (status = 410, description = "活动已下线")
    )
)]
/// 进行一次抽奖:
/// 1. 重新加载活动快照并校验资格
/// 2. 在有库存奖品上按概率抽取
/// 3. 记录参与/门店级防重复, 中奖时扣库存并生成兑奖码 (同一事务)
/// 4. 返回奖品 + 兑奖码 + 游戏动画结果
pub async fn play(
    service: web::Data<DrawService>,
    path: web::Path<Uuid>,
    request: web::Json<PlayRequest>,
) -> Result<HttpResponse> {
    let public_id = path.into_inner();
    match service.play(public_id, &request.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/campaigns/{public_id}/conditions/{condition_id}/complete",
    tag = "draw",
    params(
        ("public_id" = Uuid, Path, description = "活动对外标识"),
        ("condition_id" = i64, Path, description = "条件 ID")
    ),
    request_body = CompleteConditionRequest,
    responses(
        (status = 200, description = "条件完成已记录", body = ParticipantResponse),
        (status = 404, description = "活动或条件不存在"),
        (status = 410, description = "活动已下线")
    )
)]
/// 上报条件完成（由评价校验层确认后调用, 幂等）
/// 只记录完成状态, 不消耗抽奖机会
pub async fn complete_condition(
    campaign_service: web::Data<CampaignService>,
    participant_service: web::Data<ParticipantService>,
    path: web::Path<(Uuid, i64)>,
    request: web::Json<CompleteConditionRequest>,
) -> Result<HttpResponse> {
    let (public_id, condition_id) = path.into_inner();

    let snapshot = match campaign_service.load_snapshot_by_public_id(public_id).await {
        Ok(snapshot) => snapshot,
        Err(e) => return Ok(e.error_response()),
    };

    match participant_service
        .complete_condition(&snapshot, condition_id, &request.into_inner())
        .await
    {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/campaigns/{public_id}/play", web::post().to(play))
        .route(
            "/campaigns/{public_id}/conditions/{condition_id}/complete",
            web::post().to(complete_condition),
        );
}
