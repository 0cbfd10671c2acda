pub mod campaign_conditions;
pub mod campaigns;
pub mod games;
pub mod participants;
pub mod prizes;
pub mod store_played_games;
pub mod winners;

pub use campaign_conditions as campaign_condition_entity;
pub use campaigns as campaign_entity;
pub use games as game_entity;
pub use participants as participant_entity;
pub use prizes as prize_entity;
pub use store_played_games as store_played_game_entity;
pub use winners as winner_entity;

pub use campaign_conditions::ConditionType;
pub use games::{GameConfig, GameType, SlotConfig, SlotPattern, WheelConfig, WheelSegment};
pub use participants::ConditionIdSet;
pub use winners::ClaimStatus;
