//! AuraKind value object - the category of effect an aura applies.
//!
//! Replaces the loosely typed string/number aura "type" with a closed enum.
//! Stat slots map onto kinds through [`BattleStat::aura_kind`](super::BattleStat::aura_kind),
//! never through numeric identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Effect categories an aura can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuraKind {
    /// Flat money grant
    Money,
    /// Attack stat stages
    Atk,
    /// Special attack stat stages
    SpAtk,
    /// Defense stat stages
    Def,
    /// Special defense stat stages
    SpDef,
    /// Speed stat stages
    Spd,
    /// Evasion stat stages
    Eva,
    /// Accuracy stat stages
    Acc,
    /// Experience multiplier
    Xp,
    /// Income multiplier (fraction, e.g. -0.4 = 40% less)
    Income,
    /// Luck delta; a zero-strength luck aura forces the luck floor
    Luck,
    /// Rare candy grant
    Candy,
    /// Chance to restore PP (fraction)
    Pp,
}

impl AuraKind {
    /// Short label used in option text (e.g. "SP. ATK").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Money => "MONEY",
            Self::Atk => "ATK",
            Self::SpAtk => "SP. ATK",
            Self::Def => "DEF",
            Self::SpDef => "SP. DEF",
            Self::Spd => "SPEED",
            Self::Acc => "ACC",
            Self::Eva => "EVA",
            Self::Xp => "XP",
            Self::Income => "INCOME",
            Self::Luck => "LUCK",
            Self::Candy => "CANDY",
            Self::Pp => "PP",
        }
    }

    /// Returns every kind, in declaration order.
    pub fn all() -> [AuraKind; 13] {
        [
            Self::Money,
            Self::Atk,
            Self::SpAtk,
            Self::Def,
            Self::SpDef,
            Self::Spd,
            Self::Eva,
            Self::Acc,
            Self::Xp,
            Self::Income,
            Self::Luck,
            Self::Candy,
            Self::Pp,
        ]
    }

    /// Whether this kind modifies a battle stat stage.
    pub fn is_battle_stat(&self) -> bool {
        matches!(
            self,
            Self::Atk | Self::SpAtk | Self::Def | Self::SpDef | Self::Spd | Self::Eva | Self::Acc
        )
    }
}

impl fmt::Display for AuraKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for AuraKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MONEY" => Ok(Self::Money),
            "ATK" => Ok(Self::Atk),
            "SP. ATK" | "SP_ATK" | "SPATK" => Ok(Self::SpAtk),
            "DEF" => Ok(Self::Def),
            "SP. DEF" | "SP_DEF" | "SPDEF" => Ok(Self::SpDef),
            "SPEED" | "SPD" => Ok(Self::Spd),
            "EVA" => Ok(Self::Eva),
            "ACC" => Ok(Self::Acc),
            "XP" => Ok(Self::Xp),
            "INCOME" => Ok(Self::Income),
            "LUCK" => Ok(Self::Luck),
            "CANDY" => Ok(Self::Candy),
            "PP" => Ok(Self::Pp),
            _ => Err(DomainError::parse(format!("Unknown aura kind: {}", s))),
        }
    }
}
