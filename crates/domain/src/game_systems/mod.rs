//! Encounter rule systems.
//!
//! Rules that need randomness take a [`SeededRng`] from the host. Each
//! encounter with bespoke content gets its own module.

pub mod choice_of_balance;
mod traits;

pub use choice_of_balance::{
    draw_negative_rewards, draw_positive_rewards, ChoiceOfBalance, NegativeReward,
    PositiveReward, RewardInfo, RewardOption, StrengthFormat,
};
pub use traits::{pick, SeededRng};
