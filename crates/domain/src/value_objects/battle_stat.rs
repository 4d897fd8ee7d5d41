//! BattleStat and StatStages - the stat slots auras fold into.
//!
//! `BattleStat` names a slot on the host's battle data; `aura_kind()` is the
//! explicit mapping table from slot to [`AuraKind`]. Nothing here relies on
//! the two enums sharing a numeric ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::AuraKind;

/// Battle stats that stage-modifying auras can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BattleStat {
    Atk,
    SpAtk,
    Def,
    SpDef,
    Spd,
    Eva,
    Acc,
}

impl BattleStat {
    /// Every stat slot, in the order the reward tables draw from.
    pub const ALL: [BattleStat; 7] = [
        Self::Atk,
        Self::SpAtk,
        Self::Def,
        Self::SpDef,
        Self::Spd,
        Self::Eva,
        Self::Acc,
    ];

    /// The aura kind that modifies this slot.
    pub const fn aura_kind(self) -> AuraKind {
        match self {
            Self::Atk => AuraKind::Atk,
            Self::SpAtk => AuraKind::SpAtk,
            Self::Def => AuraKind::Def,
            Self::SpDef => AuraKind::SpDef,
            Self::Spd => AuraKind::Spd,
            Self::Eva => AuraKind::Eva,
            Self::Acc => AuraKind::Acc,
        }
    }

    /// Reverse lookup; `None` for kinds that are not stat stages.
    pub fn from_aura_kind(kind: AuraKind) -> Option<Self> {
        Self::ALL.into_iter().find(|stat| stat.aura_kind() == kind)
    }

    const fn slot(self) -> usize {
        match self {
            Self::Atk => 0,
            Self::SpAtk => 1,
            Self::Def => 2,
            Self::SpDef => 3,
            Self::Spd => 4,
            Self::Eva => 5,
            Self::Acc => 6,
        }
    }
}

impl fmt::Display for BattleStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.aura_kind().display_name())
    }
}

/// Per-entity stat modifier slots owned by the caller.
///
/// The ledger adds aura totals into these; it never reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatStages([f64; 7]);

impl StatStages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: BattleStat) -> f64 {
        self.0[stat.slot()]
    }

    pub fn add(&mut self, stat: BattleStat, amount: f64) {
        self.0[stat.slot()] += amount;
    }

    pub fn set(&mut self, stat: BattleStat, value: f64) {
        self.0[stat.slot()] = value;
    }

    /// Iterate `(stat, value)` pairs in [`BattleStat::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (BattleStat, f64)> + '_ {
        BattleStat::ALL.into_iter().map(move |stat| (stat, self.get(stat)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_table_round_trips() {
        for stat in BattleStat::ALL {
            assert_eq!(BattleStat::from_aura_kind(stat.aura_kind()), Some(stat));
        }
        assert_eq!(BattleStat::from_aura_kind(AuraKind::Luck), None);
        assert_eq!(BattleStat::from_aura_kind(AuraKind::Income), None);
    }

    #[test]
    fn stages_accumulate_per_slot() {
        let mut stages = StatStages::new();
        stages.add(BattleStat::Spd, 1.0);
        stages.add(BattleStat::Spd, 2.0);
        stages.add(BattleStat::Def, -1.0);
        assert_eq!(stages.get(BattleStat::Spd), 3.0);
        assert_eq!(stages.get(BattleStat::Def), -1.0);
        assert_eq!(stages.get(BattleStat::Atk), 0.0);
    }

    #[test]
    fn iter_follows_all_order() {
        let mut stages = StatStages::new();
        stages.set(BattleStat::Acc, 4.0);
        let collected: Vec<_> = stages.iter().collect();
        assert_eq!(collected.len(), 7);
        assert_eq!(collected[0], (BattleStat::Atk, 0.0));
        assert_eq!(collected[6], (BattleStat::Acc, 4.0));
    }

    #[test]
    fn display_uses_aura_label() {
        assert_eq!(BattleStat::SpDef.to_string(), "SP. DEF");
    }
}
