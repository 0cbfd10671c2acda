use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// 条件 ID 集合 (JSON 列, 保持插入顺序, 按集合语义去重)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ConditionIdSet(pub Vec<i64>);

impl ConditionIdSet {
    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    /// 加入集合; 已存在时不变 (幂等)
    pub fn insert(&mut self, id: i64) -> bool {
        if self.0.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<i64>> for ConditionIdSet {
    fn from(ids: Vec<i64>) -> Self {
        let mut set = ConditionIdSet::default();
        for id in ids {
            set.insert(id);
        }
        set
    }
}

/// 参与者实体
/// 按 (campaign_id, email) 唯一; 首次完成条件或首次抽奖时创建, 本引擎从不删除
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "participants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub campaign_id: i64,
    pub email: String,
    pub name: Option<String>,
    pub has_played: bool,
    pub play_count: i32,
    /// 最近一次抽奖时间 (冷却计算基准)
    pub played_at: Option<DateTime<Utc>>,
    /// 已完成的条件 ID
    #[sea_orm(column_type = "JsonBinary")]
    pub completed_conditions: ConditionIdSet,
    /// 已被抽奖消耗的条件 ID
    #[sea_orm(column_type = "JsonBinary")]
    pub played_conditions: ConditionIdSet,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_id_set_insert_is_idempotent() {
        let mut set = ConditionIdSet::default();
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert_eq!(set.0, vec![3]);
    }

    #[test]
    fn test_condition_id_set_from_vec_dedups() {
        let set = ConditionIdSet::from(vec![1, 2, 2, 1]);
        assert_eq!(set.0, vec![1, 2]);
    }
}
