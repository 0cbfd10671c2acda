use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::entities::{
    ConditionType, participant_entity as participants, store_played_game_entity as spg,
};
use crate::error::AppResult;
use crate::models::IneligibleReason;
use crate::services::CampaignSnapshot;

/// 本次抽奖许可
/// 无条件活动没有可消耗的条件, unlocking_condition_* 为 None
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayPermit {
    pub unlocking_condition_id: Option<i64>,
    pub unlocking_condition_type: Option<ConditionType>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EligibilityOutcome {
    Eligible(PlayPermit),
    Ineligible(IneligibleReason),
}

/// 资格判定所需的参与者侧状态, 一次性读出后判定为纯函数
#[derive(Clone, Debug, Default)]
pub struct ParticipantContext {
    pub participant: Option<participants::Model>,
    /// 该活动当前参与者总数（按唯一 (campaign, email) 计）
    pub participant_count: u64,
    /// 该 (email, store) 已消耗过抽奖机会的条件类型
    pub store_played_types: HashSet<ConditionType>,
}

#[derive(Clone)]
pub struct EligibilityService {
    pool: DatabaseConnection,
}

impl EligibilityService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 判定参与者当前是否可以抽奖
    pub async fn evaluate(
        &self,
        snapshot: &CampaignSnapshot,
        email: &str,
    ) -> AppResult<EligibilityOutcome> {
        let ctx = self.fetch_context(snapshot, email).await?;
        Ok(decide(snapshot, &ctx, Utc::now()))
    }

    async fn fetch_context(
        &self,
        snapshot: &CampaignSnapshot,
        email: &str,
    ) -> AppResult<ParticipantContext> {
        let participant = participants::Entity::find()
            .filter(participants::Column::CampaignId.eq(snapshot.campaign.id))
            .filter(participants::Column::Email.eq(email))
            .one(&self.pool)
            .await?;

        let participant_count = participants::Entity::find()
            .filter(participants::Column::CampaignId.eq(snapshot.campaign.id))
            .count(&self.pool)
            .await?;

        let store_played_types: HashSet<ConditionType> = spg::Entity::find()
            .filter(spg::Column::Email.eq(email))
            .filter(spg::Column::StoreId.eq(snapshot.campaign.store_id))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|row| row.condition_type)
            .collect();

        Ok(ParticipantContext {
            participant,
            participant_count,
            store_played_types,
        })
    }
}

/// 资格判定（纯函数, 按顺序第一条不通过即返回）:
/// 1. 冷却期
/// 2. 参与人数上限（仅新参与者, 已有参与记录不增加人数）
/// 3. 条件解锁: 已完成 ∩ enables_game − 已消耗 − 门店级同类型已消耗,
///    取 display_order 最小者（同序按 id）
/// 4. 无条件活动: 每人仅一次
pub fn decide(
    snapshot: &CampaignSnapshot,
    ctx: &ParticipantContext,
    now: DateTime<Utc>,
) -> EligibilityOutcome {
    // 冷却: 只有抽过奖的参与者才有 played_at
    if let (Some(participant), Some(cooldown_days)) = (
        ctx.participant.as_ref(),
        snapshot.campaign.min_days_between_plays,
    ) {
        if let Some(played_at) = participant.played_at {
            let elapsed_days = (now - played_at).num_days();
            if elapsed_days < cooldown_days as i64 {
                return EligibilityOutcome::Ineligible(IneligibleReason::CooldownNotElapsed {
                    days_remaining: cooldown_days as i64 - elapsed_days,
                });
            }
        }
    }

    // 人数上限
    if let Some(cap) = snapshot.campaign.max_participants {
        if ctx.participant.is_none() && ctx.participant_count >= cap as u64 {
            return EligibilityOutcome::Ineligible(IneligibleReason::CampaignFull);
        }
    }

    if snapshot.has_conditions() {
        let Some(participant) = ctx.participant.as_ref() else {
            // 抽奖前至少要完成一个解锁条件
            return EligibilityOutcome::Ineligible(IneligibleReason::NoConditionCompleted);
        };

        let mut playable: Vec<_> = snapshot
            .conditions
            .iter()
            .filter(|c| c.enables_game)
            .filter(|c| participant.completed_conditions.contains(c.id))
            .filter(|c| !participant.played_conditions.contains(c.id))
            .filter(|c| !ctx.store_played_types.contains(&c.condition_type))
            .collect();

        if playable.is_empty() {
            return EligibilityOutcome::Ineligible(
                IneligibleReason::AllPlayableConditionsExhausted,
            );
        }

        playable.sort_by_key(|c| (c.display_order, c.id));
        let chosen = playable[0];
        return EligibilityOutcome::Eligible(PlayPermit {
            unlocking_condition_id: Some(chosen.id),
            unlocking_condition_type: Some(chosen.condition_type),
        });
    }

    // 无条件活动
    match ctx.participant.as_ref() {
        Some(p) if p.has_played => {
            EligibilityOutcome::Ineligible(IneligibleReason::AlreadyPlayed)
        }
        _ => EligibilityOutcome::Eligible(PlayPermit {
            unlocking_condition_id: None,
            unlocking_condition_type: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        ConditionIdSet, campaign_condition_entity as conditions, campaign_entity as campaigns,
        participant_entity as participants,
    };
    use chrono::Duration;

    fn campaign() -> campaigns::Model {
        campaigns::Model {
            id: 1,
            store_id: 10,
            public_id: uuid::Uuid::nil(),
            name: "Review & Win".to_string(),
            is_active: true,
            max_participants: None,
            min_days_between_plays: None,
            prize_claim_expiry_days: 30,
            created_at: None,
            updated_at: None,
        }
    }

    fn condition(
        id: i64,
        condition_type: ConditionType,
        display_order: i32,
        enables_game: bool,
    ) -> conditions::Model {
        conditions::Model {
            id,
            campaign_id: 1,
            condition_type,
            title: format!("condition {id}"),
            display_order,
            enables_game,
            is_required: true,
            created_at: None,
        }
    }

    fn participant(
        completed: Vec<i64>,
        played: Vec<i64>,
        play_count: i32,
        played_at: Option<DateTime<Utc>>,
    ) -> participants::Model {
        participants::Model {
            id: 100,
            campaign_id: 1,
            email: "alice@example.com".to_string(),
            name: None,
            has_played: play_count > 0,
            play_count,
            played_at,
            completed_conditions: ConditionIdSet::from(completed),
            played_conditions: ConditionIdSet::from(played),
            created_at: None,
            updated_at: None,
        }
    }

    fn snapshot(
        campaign: campaigns::Model,
        condition_list: Vec<conditions::Model>,
    ) -> CampaignSnapshot {
        CampaignSnapshot {
            campaign,
            game: None,
            conditions: condition_list,
            prizes: vec![],
        }
    }

    fn permit_for(outcome: EligibilityOutcome) -> PlayPermit {
        match outcome {
            EligibilityOutcome::Eligible(permit) => permit,
            EligibilityOutcome::Ineligible(reason) => panic!("expected eligible, got {reason:?}"),
        }
    }

    #[test]
    fn test_cooldown_blocks_and_reports_days_remaining() {
        let mut c = campaign();
        c.min_days_between_plays = Some(3);
        let now = Utc::now();
        let ctx = ParticipantContext {
            participant: Some(participant(
                vec![1],
                vec![],
                1,
                Some(now - Duration::days(1)),
            )),
            participant_count: 1,
            store_played_types: HashSet::new(),
        };
        let snap = snapshot(c, vec![condition(1, ConditionType::GoogleReview, 0, true)]);

        let outcome = decide(&snap, &ctx, now);
        assert_eq!(
            outcome,
            EligibilityOutcome::Ineligible(IneligibleReason::CooldownNotElapsed {
                days_remaining: 2
            })
        );
    }

    #[test]
    fn test_cooldown_elapsed_allows_play() {
        let mut c = campaign();
        c.min_days_between_plays = Some(3);
        let now = Utc::now();
        let ctx = ParticipantContext {
            participant: Some(participant(
                vec![1, 2],
                vec![1],
                1,
                Some(now - Duration::days(4)),
            )),
            participant_count: 1,
            store_played_types: HashSet::new(),
        };
        let snap = snapshot(
            c,
            vec![
                condition(1, ConditionType::GoogleReview, 0, true),
                condition(2, ConditionType::SocialFollow, 1, true),
            ],
        );

        let permit = permit_for(decide(&snap, &ctx, now));
        assert_eq!(permit.unlocking_condition_id, Some(2));
    }

    #[test]
    fn test_campaign_full_blocks_new_participants() {
        let mut c = campaign();
        c.max_participants = Some(100);
        let ctx = ParticipantContext {
            participant: None,
            participant_count: 100,
            store_played_types: HashSet::new(),
        };
        let snap = snapshot(c, vec![condition(1, ConditionType::GoogleReview, 0, true)]);

        assert_eq!(
            decide(&snap, &ctx, Utc::now()),
            EligibilityOutcome::Ineligible(IneligibleReason::CampaignFull)
        );
    }

    #[test]
    fn test_existing_participant_not_blocked_by_cap() {
        let mut c = campaign();
        c.max_participants = Some(100);
        let ctx = ParticipantContext {
            participant: Some(participant(vec![1], vec![], 0, None)),
            participant_count: 100,
            store_played_types: HashSet::new(),
        };
        let snap = snapshot(c, vec![condition(1, ConditionType::GoogleReview, 0, true)]);

        let permit = permit_for(decide(&snap, &ctx, Utc::now()));
        assert_eq!(permit.unlocking_condition_id, Some(1));
    }

    #[test]
    fn test_no_participation_row_requires_condition() {
        let ctx = ParticipantContext::default();
        let snap = snapshot(
            campaign(),
            vec![condition(1, ConditionType::GoogleReview, 0, true)],
        );

        assert_eq!(
            decide(&snap, &ctx, Utc::now()),
            EligibilityOutcome::Ineligible(IneligibleReason::NoConditionCompleted)
        );
    }

    #[test]
    fn test_lowest_display_order_condition_is_consumed_first() {
        let ctx = ParticipantContext {
            participant: Some(participant(vec![1, 2], vec![], 0, None)),
            participant_count: 1,
            store_played_types: HashSet::new(),
        };
        let snap = snapshot(
            campaign(),
            vec![
                condition(2, ConditionType::SocialFollow, 1, true),
                condition(1, ConditionType::GoogleReview, 0, true),
            ],
        );

        let permit = permit_for(decide(&snap, &ctx, Utc::now()));
        assert_eq!(permit.unlocking_condition_id, Some(1));
        assert_eq!(
            permit.unlocking_condition_type,
            Some(ConditionType::GoogleReview)
        );
    }

    #[test]
    fn test_display_order_tie_breaks_by_condition_id() {
        let ctx = ParticipantContext {
            participant: Some(participant(vec![7, 3], vec![], 0, None)),
            participant_count: 1,
            store_played_types: HashSet::new(),
        };
        let snap = snapshot(
            campaign(),
            vec![
                condition(7, ConditionType::SocialFollow, 0, true),
                condition(3, ConditionType::Newsletter, 0, true),
            ],
        );

        let permit = permit_for(decide(&snap, &ctx, Utc::now()));
        assert_eq!(permit.unlocking_condition_id, Some(3));
    }

    #[test]
    fn test_played_condition_is_never_selected_again() {
        // 单调性: 已消耗的条件重复判定永不再被选中
        let ctx = ParticipantContext {
            participant: Some(participant(vec![1, 2], vec![1], 1, None)),
            participant_count: 1,
            store_played_types: HashSet::new(),
        };
        let snap = snapshot(
            campaign(),
            vec![
                condition(1, ConditionType::GoogleReview, 0, true),
                condition(2, ConditionType::SocialFollow, 1, true),
            ],
        );

        let permit = permit_for(decide(&snap, &ctx, Utc::now()));
        assert_eq!(permit.unlocking_condition_id, Some(2));

        // 仅剩已消耗条件时直接耗尽
        let ctx = ParticipantContext {
            participant: Some(participant(vec![1], vec![1], 1, None)),
            participant_count: 1,
            store_played_types: HashSet::new(),
        };
        assert_eq!(
            decide(&snap, &ctx, Utc::now()),
            EligibilityOutcome::Ineligible(IneligibleReason::AllPlayableConditionsExhausted)
        );
    }

    #[test]
    fn test_store_level_dedup_excludes_condition_type() {
        // 同门店另一活动已消耗过 google_review 类型
        let ctx = ParticipantContext {
            participant: Some(participant(vec![1], vec![], 0, None)),
            participant_count: 1,
            store_played_types: HashSet::from([ConditionType::GoogleReview]),
        };
        let snap = snapshot(
            campaign(),
            vec![condition(1, ConditionType::GoogleReview, 0, true)],
        );

        assert_eq!(
            decide(&snap, &ctx, Utc::now()),
            EligibilityOutcome::Ineligible(IneligibleReason::AllPlayableConditionsExhausted)
        );
    }

    #[test]
    fn test_non_game_enabling_condition_does_not_unlock() {
        let ctx = ParticipantContext {
            participant: Some(participant(vec![1], vec![], 0, None)),
            participant_count: 1,
            store_played_types: HashSet::new(),
        };
        let snap = snapshot(
            campaign(),
            vec![condition(1, ConditionType::Survey, 0, false)],
        );

        assert_eq!(
            decide(&snap, &ctx, Utc::now()),
            EligibilityOutcome::Ineligible(IneligibleReason::AllPlayableConditionsExhausted)
        );
    }

    #[test]
    fn test_no_condition_campaign_allows_single_play() {
        let snap = snapshot(campaign(), vec![]);

        let permit = permit_for(decide(&snap, &ParticipantContext::default(), Utc::now()));
        assert_eq!(permit.unlocking_condition_id, None);
        assert_eq!(permit.unlocking_condition_type, None);

        let ctx = ParticipantContext {
            participant: Some(participant(vec![], vec![], 1, Some(Utc::now()))),
            participant_count: 1,
            store_played_types: HashSet::new(),
        };
        assert_eq!(
            decide(&snap, &ctx, Utc::now()),
            EligibilityOutcome::Ineligible(IneligibleReason::AlreadyPlayed)
        );
    }
}
