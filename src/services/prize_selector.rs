use rand::Rng;

use crate::entities::prize_entity as prizes;

/// 按概率质量抽取奖品
///
/// 在 [0,1) 上取一个均匀随机数, 按快照顺序累计各奖品概率,
/// 随机数首次落入累计区间内的奖品即中奖; 落入所有概率之和以外的
/// 剩余质量则未中奖（合法结果, 非错误）。
/// 概率之和 <= 1 由活动配置端保证, 此处不重新归一化。
pub fn select_prize<R: Rng + ?Sized>(prize_list: &[prizes::Model], rng: &mut R) -> Option<i64> {
    pick_with_roll(prize_list, rng.gen_range(0.0..1.0))
}

/// 确定性内核: 给定 roll 值抽取（测试直接注入边界值）
pub fn pick_with_roll(prize_list: &[prizes::Model], roll: f64) -> Option<i64> {
    let mut cumulative = 0.0_f64;
    for prize in prize_list {
        // 防御过期快照: 无库存奖品不参与抽取
        if !prize.is_in_stock() {
            continue;
        }
        cumulative += prize.probability;
        if roll < cumulative {
            return Some(prize.id);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn prize(id: i64, probability: f64, remaining: i32) -> prizes::Model {
        prizes::Model {
            id,
            campaign_id: 1,
            name: format!("prize {id}"),
            description: None,
            value: None,
            color: None,
            probability,
            initial_stock: remaining,
            remaining,
            display_order: id as i32,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_roll_falls_into_first_band() {
        let list = vec![prize(1, 0.5, 10), prize(2, 0.3, 10)];
        assert_eq!(pick_with_roll(&list, 0.0), Some(1));
        assert_eq!(pick_with_roll(&list, 0.4999), Some(1));
    }

    #[test]
    fn test_roll_falls_into_second_band() {
        let list = vec![prize(1, 0.5, 10), prize(2, 0.3, 10)];
        assert_eq!(pick_with_roll(&list, 0.5), Some(2));
        assert_eq!(pick_with_roll(&list, 0.79), Some(2));
    }

    #[test]
    fn test_residual_mass_means_no_prize() {
        let list = vec![prize(1, 0.5, 10), prize(2, 0.3, 10)];
        assert_eq!(pick_with_roll(&list, 0.8), None);
        assert_eq!(pick_with_roll(&list, 0.99), None);
    }

    #[test]
    fn test_certain_prize_always_wins() {
        let list = vec![prize(1, 1.0, 1)];
        assert_eq!(pick_with_roll(&list, 0.0), Some(1));
        assert_eq!(pick_with_roll(&list, 0.9999), Some(1));
    }

    #[test]
    fn test_out_of_stock_prize_is_skipped() {
        // 快照过期场景: 列表里混入了无库存奖品
        let list = vec![prize(1, 0.5, 0), prize(2, 0.3, 10)];
        assert_eq!(pick_with_roll(&list, 0.1), Some(2));
        assert_eq!(pick_with_roll(&list, 0.3), None);
    }

    #[test]
    fn test_empty_list_never_wins() {
        assert_eq!(pick_with_roll(&[], 0.0), None);
    }

    #[test]
    fn test_empirical_rates_approach_configured_probabilities() {
        let list = vec![prize(1, 0.5, 1_000_000), prize(2, 0.3, 1_000_000)];
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 20_000;
        let mut wins = [0usize; 2];
        let mut no_prize = 0usize;

        for _ in 0..trials {
            match select_prize(&list, &mut rng) {
                Some(1) => wins[0] += 1,
                Some(2) => wins[1] += 1,
                Some(_) => unreachable!(),
                None => no_prize += 1,
            }
        }

        let rate = |n: usize| n as f64 / trials as f64;
        assert!((rate(wins[0]) - 0.5).abs() < 0.02);
        assert!((rate(wins[1]) - 0.3).abs() < 0.02);
        assert!((rate(no_prize) - 0.2).abs() < 0.02);
    }
}
