use crate::entities::{
    GameType, campaign_condition_entity as conditions, campaign_entity as campaigns,
    game_entity as games, prize_entity as prizes,
};
use crate::error::{AppError, AppResult};
use crate::models::CampaignPublicResponse;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

/// 活动快照: 一次抽奖流程所需的全部只读状态
///
/// - conditions 按 display_order 升序 (同序按 id), 构成全序
/// - prizes 仅含有库存奖品 (remaining > 0), 按 display_order 升序;
///   奖品在该列表中的位置即游戏配置引用的 prize_index
#[derive(Clone, Debug)]
pub struct CampaignSnapshot {
    pub campaign: campaigns::Model,
    pub game: Option<games::Model>,
    pub conditions: Vec<conditions::Model>,
    pub prizes: Vec<prizes::Model>,
}

impl CampaignSnapshot {
    pub fn game_type(&self) -> Option<GameType> {
        self.game.as_ref().map(|g| g.game_type)
    }

    pub fn prize_by_id(&self, prize_id: i64) -> Option<&prizes::Model> {
        self.prizes.iter().find(|p| p.id == prize_id)
    }

    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }
}

#[derive(Clone)]
pub struct CampaignService {
    pool: DatabaseConnection,
}

impl CampaignService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 按内部 ID 加载活动快照
    pub async fn load_snapshot(&self, campaign_id: i64) -> AppResult<CampaignSnapshot> {
        let campaign = campaigns::Entity::find_by_id(campaign_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Campaign not found".to_string()))?;
        self.assemble(campaign).await
    }

    /// 按对外 UUID 加载活动快照（扫码入口）
    pub async fn load_snapshot_by_public_id(&self, public_id: Uuid) -> AppResult<CampaignSnapshot> {
        let campaign = self.find_by_public_id(public_id).await?;
        self.assemble(campaign).await
    }

    /// 按对外 UUID 查找活动, 不校验上线状态（后台读取用）
    pub async fn find_by_public_id(&self, public_id: Uuid) -> AppResult<campaigns::Model> {
        campaigns::Entity::find()
            .filter(campaigns::Column::PublicId.eq(public_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Campaign not found".to_string()))
    }

    /// 活动公开信息（落地页数据, 不暴露概率与库存）
    pub async fn public_view(&self, public_id: Uuid) -> AppResult<CampaignPublicResponse> {
        let snapshot = self.load_snapshot_by_public_id(public_id).await?;
        Ok(CampaignPublicResponse {
            public_id: snapshot.campaign.public_id,
            name: snapshot.campaign.name.clone(),
            game_type: snapshot.game_type(),
            conditions: snapshot.conditions.iter().map(Into::into).collect(),
            prizes: snapshot.prizes.iter().map(Into::into).collect(),
        })
    }

    /// 组装快照; 未上线活动直接拒绝, 纯读无副作用
    async fn assemble(&self, campaign: campaigns::Model) -> AppResult<CampaignSnapshot> {
        if !campaign.is_active {
            return Err(AppError::CampaignInactive);
        }

        let game = games::Entity::find()
            .filter(games::Column::CampaignId.eq(campaign.id))
            .one(&self.pool)
            .await?;

        let condition_list = conditions::Entity::find()
            .filter(conditions::Column::CampaignId.eq(campaign.id))
            .order_by_asc(conditions::Column::DisplayOrder)
            .order_by_asc(conditions::Column::Id)
            .all(&self.pool)
            .await?;

        // 无库存奖品对抽奖层不可见
        let prize_list = prizes::Entity::find()
            .filter(prizes::Column::CampaignId.eq(campaign.id))
            .filter(prizes::Column::Remaining.gt(0))
            .order_by_asc(prizes::Column::DisplayOrder)
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(CampaignSnapshot {
            campaign,
            game,
            conditions: condition_list,
            prizes: prize_list,
        })
    }
}
