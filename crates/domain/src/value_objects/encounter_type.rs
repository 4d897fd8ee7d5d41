//! Mystery encounter identity and rarity tier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rarity tier of a mystery encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MysteryEncounterTier {
    Common,
    Great,
    Ultra,
    Rogue,
}

impl MysteryEncounterTier {
    /// Tiers from most to least frequent; indexes line up with spawn tier weights.
    pub const ALL: [MysteryEncounterTier; 4] = [Self::Common, Self::Great, Self::Ultra, Self::Rogue];

    pub const fn index(self) -> usize {
        match self {
            Self::Common => 0,
            Self::Great => 1,
            Self::Ultra => 2,
            Self::Rogue => 3,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Great => "Great",
            Self::Ultra => "Ultra",
            Self::Rogue => "Rogue",
        }
    }
}

impl fmt::Display for MysteryEncounterTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Known mystery encounters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MysteryEncounterType {
    MysteriousChallengers,
    MysteriousChest,
    DarkDeal,
    FightOrFlight,
    TrainingSession,
    SleepingSnorlax,
    ChoiceOfBalance,
    LostAtSea,
}

impl MysteryEncounterType {
    pub const ALL: [MysteryEncounterType; 8] = [
        Self::MysteriousChallengers,
        Self::MysteriousChest,
        Self::DarkDeal,
        Self::FightOrFlight,
        Self::TrainingSession,
        Self::SleepingSnorlax,
        Self::ChoiceOfBalance,
        Self::LostAtSea,
    ];

    /// Encounters of `tier` that may appear on `wave`, in declaration order.
    pub fn candidates(tier: MysteryEncounterTier, wave: u32) -> Vec<MysteryEncounterType> {
        Self::ALL
            .into_iter()
            .filter(|encounter| encounter.tier() == tier && encounter.is_available_at(wave))
            .collect()
    }

    /// Tier the encounter is registered under.
    pub fn tier(&self) -> MysteryEncounterTier {
        match self {
            Self::MysteriousChest | Self::FightOrFlight | Self::LostAtSea => {
                MysteryEncounterTier::Common
            }
            Self::MysteriousChallengers | Self::SleepingSnorlax | Self::ChoiceOfBalance => {
                MysteryEncounterTier::Great
            }
            Self::TrainingSession => MysteryEncounterTier::Ultra,
            Self::DarkDeal => MysteryEncounterTier::Rogue,
        }
    }

    /// Inclusive wave window in which the encounter may appear.
    pub fn wave_range(&self) -> (u32, u32) {
        match self {
            Self::MysteriousChest => (2, 180),
            Self::LostAtSea => (11, 179),
            _ => (10, 180),
        }
    }

    pub fn is_available_at(&self, wave: u32) -> bool {
        let (min, max) = self.wave_range();
        (min..=max).contains(&wave)
    }
}
