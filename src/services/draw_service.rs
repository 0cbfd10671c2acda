use chrono::{DateTime, Duration, Utc};
use sea_orm::sea_query::{Alias, Expr, OnConflict, PostgresQueryBuilder, Query};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IntoActiveModel, QueryFilter, Set, TransactionTrait,
    UpdateResult,
};
use uuid::Uuid;

use crate::entities::{
    ClaimStatus, ConditionIdSet, ConditionType, participant_entity as participants,
    prize_entity as prizes, store_played_game_entity as spg, winner_entity as winners,
};
use crate::error::{AppError, AppResult};
use crate::models::{DrawResultResponse, PlayRequest, WonPrizeResponse};
use crate::services::{
    CampaignService, CampaignSnapshot, EligibilityOutcome, EligibilityService, PlayPermit,
    map_outcome, select_prize,
};
use crate::utils::{generate_unique_claim_code, normalize_email};

#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
    campaign_service: CampaignService,
    eligibility_service: EligibilityService,
}

impl DrawService {
    pub fn new(
        pool: DatabaseConnection,
        campaign_service: CampaignService,
        eligibility_service: EligibilityService,
    ) -> Self {
        Self {
            pool,
            campaign_service,
            eligibility_service,
        }
    }

    /// 抽奖入口
    ///
    /// 逻辑:
    /// 1. 重新加载活动快照 (奖品仅含有库存)
    /// 2. 校验参与资格, 得到本次消耗的解锁条件
    /// 3. 执行抽奖并持久化 (见 execute)
    pub async fn play(&self, public_id: Uuid, request: &PlayRequest) -> AppResult<DrawResultResponse> {
        let email = normalize_email(&request.email)?;

        let snapshot = self
            .campaign_service
            .load_snapshot_by_public_id(public_id)
            .await?;

        // 既无奖品也无条件的活动不可抽奖
        if snapshot.prizes.is_empty() && !snapshot.has_conditions() {
            return Err(AppError::ValidationError(
                "Campaign has no prizes and no conditions configured".to_string(),
            ));
        }

        let permit = match self.eligibility_service.evaluate(&snapshot, &email).await? {
            EligibilityOutcome::Eligible(permit) => permit,
            EligibilityOutcome::Ineligible(reason) => {
                return Err(AppError::Ineligible(reason));
            }
        };

        self.execute(&snapshot, &email, request.name.as_deref(), &permit)
            .await
    }

    /// 执行抽奖并持久化
    ///
    /// 1. 在有库存奖品上按概率抽取
    /// 2. 参与记录 upsert (play_count+1, 记录消耗的条件)
    /// 3. 门店级防重复 upsert (单条幂等语句)
    /// 4. 中奖时: 条件扣减库存 + 创建兑奖记录, 两者同一事务提交;
    ///    扣减失败 (并发抢走最后一件) 则降级为未中奖, 参与记录照常提交
    pub async fn execute(
        &self,
        snapshot: &CampaignSnapshot,
        email: &str,
        name: Option<&str>,
        permit: &PlayPermit,
    ) -> AppResult<DrawResultResponse> {
        let now = Utc::now();
        let txn = self.pool.begin().await?;

        let mut won_prize_id = select_prize(&snapshot.prizes, &mut rand::thread_rng());

        let participant = self
            .upsert_participant(&txn, snapshot, email, name, permit, now)
            .await?;

        if let Some(condition_type) = permit.unlocking_condition_type {
            self.record_store_played_game(&txn, snapshot, email, condition_type, now)
                .await?;
        }

        let mut claim: Option<(String, DateTime<Utc>)> = None;
        if let Some(prize_id) = won_prize_id {
            if self.try_decrement_stock(&txn, prize_id).await? {
                let prize = snapshot.prize_by_id(prize_id).ok_or_else(|| {
                    AppError::InternalError(format!("Selected prize {prize_id} missing from snapshot"))
                })?;
                let claim_code = generate_unique_claim_code(&txn).await?;
                let expires_at =
                    now + Duration::days(snapshot.campaign.prize_claim_expiry_days as i64);

                winners::ActiveModel {
                    campaign_id: Set(snapshot.campaign.id),
                    prize_id: Set(prize_id),
                    prize_name: Set(prize.name.clone()),
                    email: Set(email.to_string()),
                    name: Set(name.map(str::to_string)),
                    claim_code: Set(claim_code.clone()),
                    status: Set(ClaimStatus::Pending),
                    expires_at: Set(expires_at),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;

                claim = Some((claim_code, expires_at));
            } else {
                // 并发抢走了最后一件库存: 降级为未中奖
                log::warn!(
                    "Prize {prize_id} ran out of stock mid-draw, downgrading to no-win"
                );
                won_prize_id = None;
            }
        }

        txn.commit().await?;

        let outcome = map_outcome(
            snapshot.game.as_ref(),
            &snapshot.prizes,
            won_prize_id,
            &mut rand::thread_rng(),
        );
        let prize = won_prize_id
            .and_then(|id| snapshot.prize_by_id(id))
            .map(WonPrizeResponse::from);

        Ok(DrawResultResponse {
            participant: participant.into(),
            has_won: prize.is_some(),
            prize,
            claim_code: claim.as_ref().map(|(code, _)| code.clone()),
            claim_expires_at: claim.map(|(_, expires_at)| expires_at),
            outcome,
        })
    }

    /// 参与记录 upsert
    /// 条件消耗采用集合并集, 重复执行幂等
    async fn upsert_participant(
        &self,
        txn: &DatabaseTransaction,
        snapshot: &CampaignSnapshot,
        email: &str,
        name: Option<&str>,
        permit: &PlayPermit,
        now: DateTime<Utc>,
    ) -> AppResult<participants::Model> {
        let existing = participants::Entity::find()
            .filter(participants::Column::CampaignId.eq(snapshot.campaign.id))
            .filter(participants::Column::Email.eq(email))
            .one(txn)
            .await?;

        let model = match existing {
            Some(participant) => {
                let play_count = participant.play_count + 1;
                let mut played = participant.played_conditions.clone();
                if let Some(condition_id) = permit.unlocking_condition_id {
                    played.insert(condition_id);
                }
                // 已有姓名不被后续请求覆盖
                let kept_name = participant.name.clone().or_else(|| name.map(str::to_string));

                let mut active = participant.into_active_model();
                active.has_played = Set(true);
                active.play_count = Set(play_count);
                active.played_at = Set(Some(now));
                active.played_conditions = Set(played);
                active.name = Set(kept_name);
                active.updated_at = Set(Some(now));
                active.update(txn).await?
            }
            None => {
                let mut played = ConditionIdSet::default();
                if let Some(condition_id) = permit.unlocking_condition_id {
                    played.insert(condition_id);
                }

                participants::ActiveModel {
                    campaign_id: Set(snapshot.campaign.id),
                    email: Set(email.to_string()),
                    name: Set(name.map(str::to_string)),
                    has_played: Set(true),
                    play_count: Set(1),
                    played_at: Set(Some(now)),
                    completed_conditions: Set(ConditionIdSet::default()),
                    played_conditions: Set(played),
                    ..Default::default()
                }
                .insert(txn)
                .await?
            }
        };

        Ok(model)
    }

    /// 门店级防重复 upsert
    /// 单条 INSERT .. ON CONFLICT .. DO UPDATE, 不做先读后写,
    /// 并发时以唯一键 (email, store_id, condition_type) 合并
    async fn record_store_played_game(
        &self,
        txn: &DatabaseTransaction,
        snapshot: &CampaignSnapshot,
        email: &str,
        condition_type: ConditionType,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let insert = Query::insert()
            .into_table(spg::Entity)
            .columns([
                spg::Column::Email,
                spg::Column::StoreId,
                spg::Column::ConditionType,
                spg::Column::CampaignId,
                spg::Column::PlayedAt,
            ])
            .values_panic([
                email.into(),
                snapshot.campaign.store_id.into(),
                Expr::val(condition_type.to_value()).as_enum(Alias::new("condition_type")),
                snapshot.campaign.id.into(),
                now.into(),
            ])
            .on_conflict(
                OnConflict::columns([
                    spg::Column::Email,
                    spg::Column::StoreId,
                    spg::Column::ConditionType,
                ])
                .update_columns([spg::Column::CampaignId, spg::Column::PlayedAt])
                .to_owned(),
            )
            .to_owned();

        let (sql, values) = insert.build(PostgresQueryBuilder);
        let stmt = sea_orm::Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            sql,
            values,
        );
        txn.execute(stmt).await?;
        Ok(())
    }

    /// 原子扣减库存 (update .. where remaining > 0)
    /// 返回是否扣减成功; 两个并发抽奖至多一个成功, remaining 不可能为负
    async fn try_decrement_stock(
        &self,
        txn: &DatabaseTransaction,
        prize_id: i64,
    ) -> AppResult<bool> {
        let result: UpdateResult = prizes::Entity::update_many()
            .col_expr(
                prizes::Column::Remaining,
                Expr::col(prizes::Column::Remaining).sub(1),
            )
            .filter(prizes::Column::Id.eq(prize_id))
            .filter(prizes::Column::Remaining.gt(0))
            .exec(txn)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
