use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter, FromJsonQueryResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 游戏类型
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "game_type")]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    #[sea_orm(string_value = "wheel")]
    Wheel,
    #[sea_orm(string_value = "wheel_mini")]
    WheelMini,
    #[sea_orm(string_value = "slot_machine")]
    SlotMachine,
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameType::Wheel => write!(f, "wheel"),
            GameType::WheelMini => write!(f, "wheel_mini"),
            GameType::SlotMachine => write!(f, "slot_machine"),
        }
    }
}

/// 转盘扇区
/// prize_index 指向活动奖品列表中的位置 (按 display_order 排序, 见快照加载);
/// 未绑定奖品的扇区为"谢谢参与"扇区
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelSegment {
    pub segment_id: i32,
    pub label: Option<String>,
    pub prize_index: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelConfig {
    pub segments: Vec<WheelSegment>,
}

/// 老虎机中奖图案 (三个符号一组, 绑定一个奖品位置)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPattern {
    pub symbols: [String; 3],
    pub prize_index: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub winning_patterns: Vec<SlotPattern>,
}

/// 游戏配置 (JSON 列, 加载快照时解析一次)
/// wheel / wheel_mini 共用 Wheel 变体, slot_machine 使用 Slot 变体
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameConfig {
    Wheel(WheelConfig),
    Slot(SlotConfig),
}

/// 活动绑定的游戏实体 (一个活动至多一个, 活动运行期间不可变)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub campaign_id: i64,
    pub game_type: GameType,
    #[sea_orm(column_type = "JsonBinary")]
    pub config: GameConfig,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_config_round_trips_from_json() {
        let raw = serde_json::json!({
            "type": "wheel",
            "segments": [
                { "segment_id": 0, "label": "10% Off", "prize_index": 0 },
                { "segment_id": 1, "label": null, "prize_index": null }
            ]
        });
        let config: GameConfig = serde_json::from_value(raw).unwrap();
        match config {
            GameConfig::Wheel(wheel) => {
                assert_eq!(wheel.segments.len(), 2);
                assert_eq!(wheel.segments[0].prize_index, Some(0));
                assert!(wheel.segments[1].prize_index.is_none());
            }
            GameConfig::Slot(_) => panic!("expected wheel config"),
        }
    }

    #[test]
    fn test_slot_config_decodes_symbol_triples() {
        let raw = serde_json::json!({
            "type": "slot",
            "winning_patterns": [
                { "symbols": ["cherry", "cherry", "cherry"], "prize_index": 0 },
                { "symbols": ["seven", "seven", "seven"], "prize_index": 1 }
            ]
        });
        let config: GameConfig = serde_json::from_value(raw).unwrap();
        match config {
            GameConfig::Slot(slot) => {
                assert_eq!(slot.winning_patterns.len(), 2);
                assert_eq!(slot.winning_patterns[0].symbols[1], "cherry");
            }
            GameConfig::Wheel(_) => panic!("expected slot config"),
        }
    }
}
