//! Choice of Balance - a bargain encounter that trades a drawback for a boon.
//!
//! Each option pairs one negative reward with one positive reward. The
//! negative aura starts immediately; the positive aura is delayed by the
//! negative duration, so the player suffers first and benefits afterwards.
//!
//! Localized text lives with the host. Option descriptions are assembled
//! from descriptor keys through an injected translation function.

use serde::{Deserialize, Serialize};

use super::traits::{pick, SeededRng};
use crate::aggregates::AuraLedger;
use crate::entities::Aura;
use crate::value_objects::{
    ActivationDelay, AuraDuration, AuraKind, AuraTarget, BattleStat, TeamTarget,
};
use crate::DomainError;

/// Localization namespace for every key this encounter produces.
pub const NAMESPACE: &str = "mysteryEncounter:choice_of_balance";

/// Options offered per encounter: `MIN_OPTIONS + rng(EXTRA_OPTION_ROLL)`.
pub const MIN_OPTIONS: usize = 2;
const EXTRA_OPTION_ROLL: u32 = 2;

/// Static row of the reward table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardInfo {
    /// Descriptor suffix under [`NAMESPACE`]
    pub dialogue_key: &'static str,
    pub strength: f64,
    pub duration: AuraDuration,
}

/// How a reward's strength reads in option text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthFormat {
    /// `0.4` -> `40%`
    Percent,
    /// `1` -> `1`
    Count,
    /// `5000` -> `$5000`
    Money,
    /// No strength shown
    Hidden,
}

impl StrengthFormat {
    pub fn format(self, strength: f64) -> Option<String> {
        match self {
            Self::Percent => Some(format!("{}%", (strength * 100.0).abs().round())),
            Self::Count => Some(format!("{}", strength.abs())),
            Self::Money => Some(format!("${}", strength)),
            Self::Hidden => None,
        }
    }
}

// =============================================================================
// Reward tables
// =============================================================================

/// Drawbacks an option can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NegativeReward {
    Income,
    Luck,
    PlayerStats,
    EnemyStats,
    AddPokemon,
    DamageToPlayer,
    NoReroll,
}

impl NegativeReward {
    pub const ALL: [NegativeReward; 7] = [
        Self::Income,
        Self::Luck,
        Self::PlayerStats,
        Self::EnemyStats,
        Self::AddPokemon,
        Self::DamageToPlayer,
        Self::NoReroll,
    ];

    pub fn info(self) -> RewardInfo {
        let (dialogue_key, strength, duration) = match self {
            Self::Income => ("negative_income", -0.4, AuraDuration::waves(5)),
            Self::Luck => ("negative_luck", 0.0, AuraDuration::waves(15)),
            Self::PlayerStats => ("negative_player_stats", -1.0, AuraDuration::waves(10)),
            Self::EnemyStats => ("negative_enemy_stats", 1.0, AuraDuration::waves(8)),
            Self::AddPokemon => ("negative_add_pokemon", 0.0, AuraDuration::waves(15)),
            Self::DamageToPlayer => ("negative_damage_to_player", 0.1, AuraDuration::waves(5)),
            Self::NoReroll => ("negative_no_reroll", 0.0, AuraDuration::waves(7)),
        };
        RewardInfo {
            dialogue_key,
            strength,
            duration,
        }
    }

    pub fn strength_format(self) -> StrengthFormat {
        match self {
            Self::Income | Self::DamageToPlayer => StrengthFormat::Percent,
            Self::Luck | Self::PlayerStats | Self::EnemyStats => StrengthFormat::Count,
            Self::AddPokemon | Self::NoReroll => StrengthFormat::Hidden,
        }
    }

    pub fn needs_stat(self) -> bool {
        matches!(self, Self::PlayerStats | Self::EnemyStats)
    }

    /// Aura kind this drawback becomes; `None` for drawbacks the host
    /// resolves directly (extra pokemon, damage, no reroll).
    pub fn aura_kind(self, stat: Option<BattleStat>) -> Option<AuraKind> {
        match self {
            Self::Income => Some(AuraKind::Income),
            Self::Luck => Some(AuraKind::Luck),
            Self::PlayerStats | Self::EnemyStats => stat.map(BattleStat::aura_kind),
            Self::AddPokemon | Self::DamageToPlayer | Self::NoReroll => None,
        }
    }

    pub fn team(self) -> TeamTarget {
        match self {
            Self::PlayerStats => TeamTarget::Player,
            Self::EnemyStats => TeamTarget::Enemy,
            _ => TeamTarget::All,
        }
    }
}

/// Boons an option can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositiveReward {
    Income,
    Luck,
    PlayerStats,
    EnemyStats,
    Pp,
    InstantMoney,
    InstantCandy,
}

impl PositiveReward {
    pub const ALL: [PositiveReward; 7] = [
        Self::Income,
        Self::Luck,
        Self::PlayerStats,
        Self::EnemyStats,
        Self::Pp,
        Self::InstantMoney,
        Self::InstantCandy,
    ];

    pub fn info(self) -> RewardInfo {
        let (dialogue_key, strength, duration) = match self {
            Self::Income => ("positive_income", 0.7, AuraDuration::PERMANENT),
            Self::Luck => ("positive_luck", 5.0, AuraDuration::PERMANENT),
            Self::PlayerStats => ("positive_player_stats", 1.0, AuraDuration::waves(13)),
            Self::EnemyStats => ("positive_enemy_stats", -1.0, AuraDuration::waves(12)),
            Self::Pp => ("positive_pp_chance", 0.2, AuraDuration::waves(40)),
            Self::InstantMoney => ("positive_instant_money", 5000.0, AuraDuration::INSTANT),
            Self::InstantCandy => ("positive_instant_candy", 0.0, AuraDuration::INSTANT),
        };
        RewardInfo {
            dialogue_key,
            strength,
            duration,
        }
    }

    pub fn strength_format(self) -> StrengthFormat {
        match self {
            Self::Income | Self::Pp => StrengthFormat::Percent,
            Self::Luck | Self::PlayerStats | Self::EnemyStats => StrengthFormat::Count,
            Self::InstantMoney => StrengthFormat::Money,
            Self::InstantCandy => StrengthFormat::Hidden,
        }
    }

    pub fn needs_stat(self) -> bool {
        matches!(self, Self::PlayerStats | Self::EnemyStats)
    }

    pub fn aura_kind(self, stat: Option<BattleStat>) -> Option<AuraKind> {
        match self {
            Self::Income => Some(AuraKind::Income),
            Self::Luck => Some(AuraKind::Luck),
            Self::PlayerStats | Self::EnemyStats => stat.map(BattleStat::aura_kind),
            Self::Pp => Some(AuraKind::Pp),
            Self::InstantMoney => Some(AuraKind::Money),
            Self::InstantCandy => Some(AuraKind::Candy),
        }
    }

    pub fn team(self) -> TeamTarget {
        match self {
            Self::PlayerStats => TeamTarget::Player,
            Self::EnemyStats => TeamTarget::Enemy,
            _ => TeamTarget::All,
        }
    }
}

/// Draw `count` distinct entries from `table`, removing each pick from the
/// pool so any generator terminates after `count` rolls.
fn draw_distinct<T, R>(table: &[T], count: usize, rng: &mut R) -> Result<Vec<T>, DomainError>
where
    T: Copy,
    R: SeededRng + ?Sized,
{
    if count > table.len() {
        return Err(DomainError::validation(format!(
            "Cannot draw {} distinct rewards from a table of {}",
            count,
            table.len()
        )));
    }
    let mut pool = table.to_vec();
    let mut drawn = Vec::with_capacity(count);
    while drawn.len() < count {
        // Tables are small; the length always fits.
        let len = u32::try_from(pool.len()).unwrap_or(u32::MAX);
        let index = (rng.rand_seed_int(len) as usize).min(pool.len() - 1);
        drawn.push(pool.swap_remove(index));
    }
    Ok(drawn)
}

/// `count` distinct drawbacks.
///
/// # Errors
///
/// `DomainError::Validation` if `count` exceeds the table size.
pub fn draw_negative_rewards<R>(count: usize, rng: &mut R) -> Result<Vec<NegativeReward>, DomainError>
where
    R: SeededRng + ?Sized,
{
    draw_distinct(&NegativeReward::ALL, count, rng)
}

/// `count` distinct boons.
///
/// # Errors
///
/// `DomainError::Validation` if `count` exceeds the table size.
pub fn draw_positive_rewards<R>(count: usize, rng: &mut R) -> Result<Vec<PositiveReward>, DomainError>
where
    R: SeededRng + ?Sized,
{
    draw_distinct(&PositiveReward::ALL, count, rng)
}

// =============================================================================
// RewardOption
// =============================================================================

/// One selectable bargain: a drawback now, a boon afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardOption {
    negative: NegativeReward,
    positive: PositiveReward,
    negative_stat: Option<BattleStat>,
    positive_stat: Option<BattleStat>,
    negative_aura: Option<Aura>,
    positive_aura: Option<Aura>,
}

impl RewardOption {
    /// Roll stat picks for stat rewards and build both auras.
    pub fn roll<R>(negative: NegativeReward, positive: PositiveReward, rng: &mut R) -> Self
    where
        R: SeededRng + ?Sized,
    {
        let negative_stat = if negative.needs_stat() {
            pick(&BattleStat::ALL, rng).copied()
        } else {
            None
        };
        let positive_stat = if positive.needs_stat() {
            pick(&BattleStat::ALL, rng).copied()
        } else {
            None
        };
        Self::with_stats(negative, positive, negative_stat, positive_stat)
    }

    /// Build an option with explicit stat picks (no randomness).
    pub fn with_stats(
        negative: NegativeReward,
        positive: PositiveReward,
        negative_stat: Option<BattleStat>,
        positive_stat: Option<BattleStat>,
    ) -> Self {
        let negative_info = negative.info();
        let positive_info = positive.info();
        let negative_duration = negative_info.duration;

        let negative_aura = negative.aura_kind(negative_stat).map(|kind| {
            Aura::new(
                AuraTarget::All,
                negative_info.strength,
                negative_duration,
                kind,
                negative.team(),
            )
        });
        let positive_aura = positive.aura_kind(positive_stat).map(|kind| {
            Aura::new(
                AuraTarget::All,
                positive_info.strength,
                positive_info.duration,
                kind,
                positive.team(),
            )
            .with_activation_delay(ActivationDelay::after(negative_duration))
        });

        Self {
            negative,
            positive,
            negative_stat,
            positive_stat,
            negative_aura,
            positive_aura,
        }
    }

    pub fn negative(&self) -> NegativeReward {
        self.negative
    }

    pub fn positive(&self) -> PositiveReward {
        self.positive
    }

    pub fn negative_stat(&self) -> Option<BattleStat> {
        self.negative_stat
    }

    pub fn positive_stat(&self) -> Option<BattleStat> {
        self.positive_stat
    }

    pub fn negative_aura(&self) -> Option<&Aura> {
        self.negative_aura.as_ref()
    }

    pub fn positive_aura(&self) -> Option<&Aura> {
        self.positive_aura.as_ref()
    }

    /// Auras this option contributes, drawback first.
    pub fn auras(&self) -> impl Iterator<Item = &Aura> {
        self.negative_aura.iter().chain(self.positive_aura.iter())
    }

    /// Compose the option description, e.g.
    /// `"Income down 40% for 5 waves then Income up 70% rest of run"`.
    ///
    /// `translate` receives fully namespaced keys such as
    /// `mysteryEncounter:choice_of_balance_for`.
    pub fn describe<F>(&self, translate: F) -> String
    where
        F: Fn(&str) -> String,
    {
        let text = |suffix: &str| translate(&format!("{}_{}", NAMESPACE, suffix));
        let negative_info = self.negative.info();
        let positive_info = self.positive.info();

        let mut parts = vec![text(negative_info.dialogue_key)];
        parts.extend(self.negative.strength_format().format(negative_info.strength));
        parts.push(text("for"));
        parts.push(waves_text(negative_info.duration, &text));
        parts.push(text("then"));
        parts.push(text(positive_info.dialogue_key));
        parts.extend(self.positive.strength_format().format(positive_info.strength));
        if !positive_info.duration.is_expired() {
            parts.push(text("for"));
        }
        parts.push(waves_text(positive_info.duration, &text));
        parts.join(" ")
    }

    /// Dialogue tokens naming the stats picked for stat rewards.
    pub fn stat_tokens(&self) -> Vec<(String, String)> {
        let mut tokens = Vec::new();
        if let Some(stat) = self.negative_stat {
            let key = match self.negative {
                NegativeReward::EnemyStats => "negativeEnemySTAT",
                _ => "negativePlayerSTAT",
            };
            tokens.push((key.to_string(), stat.aura_kind().display_name().to_string()));
        }
        if let Some(stat) = self.positive_stat {
            let key = match self.positive {
                PositiveReward::EnemyStats => "positiveEnemySTAT",
                _ => "positivePlayerSTAT",
            };
            tokens.push((key.to_string(), stat.aura_kind().display_name().to_string()));
        }
        tokens
    }
}

fn waves_text(duration: AuraDuration, text: &dyn Fn(&str) -> String) -> String {
    if duration.is_permanent() {
        text("rest_of_run")
    } else if duration.is_expired() {
        text("instantly")
    } else {
        format!("{} {}", duration.value(), text("waves"))
    }
}

// =============================================================================
// Encounter state
// =============================================================================

/// A generated Choice of Balance encounter: its options and which one was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOfBalance {
    options: Vec<RewardOption>,
    chosen: Option<usize>,
}

impl ChoiceOfBalance {
    /// Roll 2 or 3 options with distinct drawbacks and distinct boons.
    ///
    /// # Errors
    ///
    /// As [`generate_with_count`](Self::generate_with_count).
    pub fn generate<R>(rng: &mut R) -> Result<Self, DomainError>
    where
        R: SeededRng + ?Sized,
    {
        let count = MIN_OPTIONS + rng.rand_seed_int(EXTRA_OPTION_ROLL) as usize;
        Self::generate_with_count(count, rng)
    }

    /// Roll exactly `count` options.
    ///
    /// # Errors
    ///
    /// `DomainError::Validation` if `count` exceeds either reward table.
    pub fn generate_with_count<R>(count: usize, rng: &mut R) -> Result<Self, DomainError>
    where
        R: SeededRng + ?Sized,
    {
        let negatives = draw_negative_rewards(count, rng)?;
        let positives = draw_positive_rewards(count, rng)?;
        let options = negatives
            .into_iter()
            .zip(positives)
            .map(|(negative, positive)| RewardOption::roll(negative, positive, rng))
            .collect();
        Ok(Self {
            options,
            chosen: None,
        })
    }

    pub fn from_options(options: Vec<RewardOption>) -> Self {
        Self {
            options,
            chosen: None,
        }
    }

    pub fn options(&self) -> &[RewardOption] {
        &self.options
    }

    pub fn chosen(&self) -> Option<&RewardOption> {
        self.chosen.and_then(|index| self.options.get(index))
    }

    /// Dialogue tokens for the encounter screen: picked stats plus one
    /// `dynamicN` description per option.
    pub fn dialogue_tokens<F>(&self, translate: F) -> Vec<(String, String)>
    where
        F: Fn(&str) -> String,
    {
        let mut tokens: Vec<(String, String)> =
            self.options.iter().flat_map(RewardOption::stat_tokens).collect();
        for (i, option) in self.options.iter().enumerate() {
            tokens.push((format!("dynamic{}", i + 1), option.describe(&translate)));
        }
        tokens
    }

    /// Take option `index` (0-based) and push its auras into `ledger`.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if `index` is out of range
    /// - `DomainError::InvalidStateTransition` if an option was already taken
    pub fn choose(&mut self, index: usize, ledger: &mut AuraLedger) -> Result<&RewardOption, DomainError> {
        if let Some(previous) = self.chosen {
            return Err(DomainError::invalid_state_transition(format!(
                "Choice of Balance option {} was already chosen",
                previous + 1
            )));
        }
        let option = self
            .options
            .get(index)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "Option {} does not exist; {} options offered",
                    index + 1,
                    self.options.len()
                ))
            })?;
        for aura in option.auras() {
            ledger.push(aura.clone());
        }
        self.chosen = Some(index);
        Ok(option)
    }
}
