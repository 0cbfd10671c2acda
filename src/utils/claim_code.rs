use crate::entities::winner_entity;
use crate::error::AppResult;
use rand::Rng;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};

/// 兑奖码字符集: 大写字母+数字, 去掉易混淆的 0/O/1/I
const CLAIM_CODE_CHARS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CLAIM_CODE_LEN: usize = 8;

fn random_claim_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CLAIM_CODE_LEN)
        .map(|_| CLAIM_CODE_CHARS[rng.gen_range(0..CLAIM_CODE_CHARS.len())] as char)
        .collect()
}

/// 生成唯一兑奖码（8位, 人工可抄写）
/// 冲突时重新生成; 32^8 空间下碰撞概率极低, 循环几乎总是一次通过
pub async fn generate_unique_claim_code<C: ConnectionTrait>(db: &C) -> AppResult<String> {
    loop {
        let code = random_claim_code();

        let exists = winner_entity::Entity::find()
            .filter(winner_entity::Column::ClaimCode.eq(&code))
            .count(db)
            .await?;

        if exists == 0 {
            return Ok(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_code_length_and_charset() {
        let code = random_claim_code();
        assert_eq!(code.len(), CLAIM_CODE_LEN);
        assert!(code.bytes().all(|b| CLAIM_CODE_CHARS.contains(&b)));
    }

    #[test]
    fn test_claim_code_avoids_ambiguous_chars() {
        for _ in 0..100 {
            let code = random_claim_code();
            assert!(!code.contains('0'));
            assert!(!code.contains('O'));
            assert!(!code.contains('1'));
            assert!(!code.contains('I'));
        }
    }
}
