use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{ClaimStatus, ConditionType, GameType};
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::campaign::get_campaign,
        handlers::campaign::get_eligibility,
        handlers::draw::play,
        handlers::draw::complete_condition,
        handlers::winner::list_winners,
    ),
    components(
        schemas(
            CampaignPublicResponse,
            ConditionPublicResponse,
            PrizePublicResponse,
            ConditionType,
            GameType,
            ClaimStatus,
            EligibilityQuery,
            EligibilityResponse,
            PlayRequest,
            CompleteConditionRequest,
            ParticipantResponse,
            WonPrizeResponse,
            VisualOutcome,
            DrawResultResponse,
            WinnerQuery,
            WinnerResponse,
            ApiError,
        )
    ),
    tags(
        (name = "campaign", description = "Campaign public info and eligibility API"),
        (name = "draw", description = "Condition completion and prize draw API"),
        (name = "winner", description = "Winner listing API"),
    ),
    info(
        title = "RevSpin Backend API",
        version = "1.0.0",
        description = "Review-for-prize campaign draw engine REST API documentation",
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
