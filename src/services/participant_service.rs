use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};

use crate::entities::{ConditionIdSet, participant_entity as participants};
use crate::error::{AppError, AppResult};
use crate::models::{CompleteConditionRequest, ParticipantResponse};
use crate::services::CampaignSnapshot;
use crate::utils::normalize_email;

#[derive(Clone)]
pub struct ParticipantService {
    pool: DatabaseConnection,
}

impl ParticipantService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 标记条件完成（由评价校验层确认后调用）
    ///
    /// 首次完成时创建参与记录; 重复上报幂等。
    /// 只记录完成状态, 不消耗抽奖机会; 消耗发生在抽奖时。
    pub async fn complete_condition(
        &self,
        snapshot: &CampaignSnapshot,
        condition_id: i64,
        request: &CompleteConditionRequest,
    ) -> AppResult<ParticipantResponse> {
        let email = normalize_email(&request.email)?;

        // 条件必须属于该活动
        if !snapshot.conditions.iter().any(|c| c.id == condition_id) {
            return Err(AppError::NotFound(
                "Condition not found in campaign".to_string(),
            ));
        }

        let existing = participants::Entity::find()
            .filter(participants::Column::CampaignId.eq(snapshot.campaign.id))
            .filter(participants::Column::Email.eq(&email))
            .one(&self.pool)
            .await?;

        let model = match existing {
            Some(participant) => {
                let mut completed = participant.completed_conditions.clone();
                if completed.insert(condition_id) {
                    let kept_name = participant
                        .name
                        .clone()
                        .or_else(|| request.name.clone());

                    let mut active = participant.into_active_model();
                    active.completed_conditions = Set(completed);
                    active.name = Set(kept_name);
                    active.updated_at = Set(Some(Utc::now()));
                    active.update(&self.pool).await?
                } else {
                    // 已记录过该条件, 无需更新
                    participant
                }
            }
            None => {
                participants::ActiveModel {
                    campaign_id: Set(snapshot.campaign.id),
                    email: Set(email),
                    name: Set(request.name.clone()),
                    has_played: Set(false),
                    play_count: Set(0),
                    completed_conditions: Set(ConditionIdSet::from(vec![condition_id])),
                    played_conditions: Set(ConditionIdSet::default()),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await?
            }
        };

        Ok(model.into())
    }
}
