use rand::Rng;

use crate::entities::{GameConfig, game_entity as games, prize_entity as prizes};
use crate::models::VisualOutcome;

/// 将中奖结果映射为游戏动画结果
///
/// 未中奖或未配置游戏时返回 None 结果（前端播放通用"未中奖"动画）。
/// 转盘: 取奖品在快照奖品列表中的位置, 找到绑定该位置的第一个扇区;
/// 无绑定扇区时转盘自由停靠, 同样返回 None 结果。
/// 老虎机: 绑定该位置的图案可能有多个, 随机选一个;
/// 只影响动画显示, 不影响奖品归属。
pub fn map_outcome<R: Rng + ?Sized>(
    game: Option<&games::Model>,
    prize_list: &[prizes::Model],
    won_prize_id: Option<i64>,
    rng: &mut R,
) -> VisualOutcome {
    let (Some(game), Some(prize_id)) = (game, won_prize_id) else {
        return VisualOutcome::None;
    };
    let Some(prize_index) = prize_list.iter().position(|p| p.id == prize_id) else {
        return VisualOutcome::None;
    };
    let prize_index = prize_index as u32;

    match &game.config {
        GameConfig::Wheel(wheel) => wheel
            .segments
            .iter()
            .find(|segment| segment.prize_index == Some(prize_index))
            .map(|segment| VisualOutcome::WheelSegment {
                segment_id: segment.segment_id,
            })
            .unwrap_or(VisualOutcome::None),
        GameConfig::Slot(slot) => {
            let matching: Vec<_> = slot
                .winning_patterns
                .iter()
                .filter(|pattern| pattern.prize_index == prize_index)
                .collect();
            if matching.is_empty() {
                return VisualOutcome::None;
            }
            let chosen = matching[rng.gen_range(0..matching.len())];
            VisualOutcome::SlotSymbols {
                symbols: chosen.symbols.to_vec(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{GameType, SlotConfig, SlotPattern, WheelConfig, WheelSegment};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn prize(id: i64) -> prizes::Model {
        prizes::Model {
            id,
            campaign_id: 1,
            name: format!("prize {id}"),
            description: None,
            value: None,
            color: None,
            probability: 0.1,
            initial_stock: 5,
            remaining: 5,
            display_order: id as i32,
            created_at: None,
            updated_at: None,
        }
    }

    fn wheel_game(segments: Vec<WheelSegment>) -> games::Model {
        games::Model {
            id: 1,
            campaign_id: 1,
            game_type: GameType::Wheel,
            config: GameConfig::Wheel(WheelConfig { segments }),
            created_at: None,
        }
    }

    fn slot_game(winning_patterns: Vec<SlotPattern>) -> games::Model {
        games::Model {
            id: 1,
            campaign_id: 1,
            game_type: GameType::SlotMachine,
            config: GameConfig::Slot(SlotConfig { winning_patterns }),
            created_at: None,
        }
    }

    fn segment(segment_id: i32, prize_index: Option<u32>) -> WheelSegment {
        WheelSegment {
            segment_id,
            label: None,
            prize_index,
        }
    }

    fn pattern(symbols: [&str; 3], prize_index: u32) -> SlotPattern {
        SlotPattern {
            symbols: symbols.map(str::to_string),
            prize_index,
        }
    }

    #[test]
    fn test_no_win_maps_to_empty_outcome() {
        let game = wheel_game(vec![segment(0, Some(0))]);
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = map_outcome(Some(&game), &[prize(7)], None, &mut rng);
        assert_eq!(outcome, VisualOutcome::None);
    }

    #[test]
    fn test_unconfigured_game_maps_to_empty_outcome() {
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = map_outcome(None, &[prize(7)], Some(7), &mut rng);
        assert_eq!(outcome, VisualOutcome::None);
    }

    #[test]
    fn test_wheel_maps_prize_to_bound_segment() {
        let game = wheel_game(vec![segment(0, None), segment(1, Some(1)), segment(2, Some(0))]);
        let prize_list = vec![prize(7), prize(8)];
        let mut rng = StdRng::seed_from_u64(1);

        // prize 8 位于列表下标 1, 绑定在扇区 1
        let outcome = map_outcome(Some(&game), &prize_list, Some(8), &mut rng);
        assert_eq!(outcome, VisualOutcome::WheelSegment { segment_id: 1 });
    }

    #[test]
    fn test_wheel_without_binding_falls_back_to_empty() {
        let game = wheel_game(vec![segment(0, None), segment(1, Some(0))]);
        let prize_list = vec![prize(7), prize(8)];
        let mut rng = StdRng::seed_from_u64(1);

        // prize 8 (下标 1) 没有绑定扇区
        let outcome = map_outcome(Some(&game), &prize_list, Some(8), &mut rng);
        assert_eq!(outcome, VisualOutcome::None);
    }

    #[test]
    fn test_wheel_duplicate_bindings_take_first_segment_in_order() {
        let game = wheel_game(vec![segment(3, Some(0)), segment(5, Some(0))]);
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = map_outcome(Some(&game), &[prize(7)], Some(7), &mut rng);
        assert_eq!(outcome, VisualOutcome::WheelSegment { segment_id: 3 });
    }

    #[test]
    fn test_slot_maps_prize_to_its_pattern() {
        let game = slot_game(vec![
            pattern(["cherry", "cherry", "cherry"], 0),
            pattern(["seven", "seven", "seven"], 1),
        ]);
        let prize_list = vec![prize(7), prize(8)];
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = map_outcome(Some(&game), &prize_list, Some(8), &mut rng);
        assert_eq!(
            outcome,
            VisualOutcome::SlotSymbols {
                symbols: vec!["seven".to_string(), "seven".to_string(), "seven".to_string()]
            }
        );
    }

    #[test]
    fn test_slot_picks_among_multiple_matching_patterns() {
        let game = slot_game(vec![
            pattern(["bar", "bar", "bar"], 0),
            pattern(["bell", "bell", "bell"], 0),
        ]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            match map_outcome(Some(&game), &[prize(7)], Some(7), &mut rng) {
                VisualOutcome::SlotSymbols { symbols } => {
                    assert!(symbols == vec!["bar"; 3] || symbols == vec!["bell"; 3]);
                }
                other => panic!("expected slot symbols, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_slot_prize_without_pattern_maps_to_empty() {
        let game = slot_game(vec![pattern(["bar", "bar", "bar"], 0)]);
        let prize_list = vec![prize(7), prize(8)];
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = map_outcome(Some(&game), &prize_list, Some(8), &mut rng);
        assert_eq!(outcome, VisualOutcome::None);
    }
}
