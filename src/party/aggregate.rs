//! Party stat aggregation
//!
//! Everything here is a pure function of the members, their synergies and
//! the party's mission history. Percentage-like outputs are clamped after
//! every computation.

use serde::{Deserialize, Serialize};

use crate::adventurer::{Adventurer, AdventurerClass};
use crate::core::config::PartyConfig;
use crate::equipment::{BonusMap, StatKey};
use crate::party::synergy::{distinct_classes, Synergy};

/// Upper bound of cohesion and morale
pub const MAX_SCORE: f32 = 100.0;

/// Neutral point of cohesion and morale; modifiers are zero here
const NEUTRAL_SCORE: f32 = 50.0;

/// Synergy bonuses summed per key and scaled by cohesion and morale.
/// Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedBonusSet(BonusMap);

impl CombinedBonusSet {
    /// Bonus for a key, 0 if no active synergy grants it
    pub fn get(&self, key: StatKey) -> f32 {
        self.0.get(&key).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, key: StatKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKey, f32)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BonusMap {
        &self.0
    }
}

/// Snapshot of a party's derived numbers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyStats {
    pub cohesion: f32,
    pub morale: f32,
    pub combined_bonuses: CombinedBonusSet,
    pub combat_power: f32,
    pub overall_health: f32,
}

/// Mission history inputs to the formulas. The offsets carry the mission
/// adjustments to cohesion and morale across formula recomputations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionHistory {
    pub missions_completed: u32,
    pub success_rate: f32,
    pub cohesion_offset: f32,
    pub morale_offset: f32,
}

fn clamp_score(value: f32) -> f32 {
    value.clamp(0.0, MAX_SCORE)
}

/// Map a 0-100 score to a modifier centred on zero
fn score_modifier(score: f32) -> f32 {
    (score - NEUTRAL_SCORE) / 100.0
}

/// Party unity from class diversity, leadership and shared history
pub fn compute_cohesion(
    members: &[&Adventurer],
    leader: Option<&Adventurer>,
    missions_completed: u32,
    config: &PartyConfig,
) -> f32 {
    clamp_score(cohesion_formula(members, leader, missions_completed, config))
}

/// Cohesion before clamping
pub fn cohesion_formula(
    members: &[&Adventurer],
    leader: Option<&Adventurer>,
    missions_completed: u32,
    config: &PartyConfig,
) -> f32 {
    if members.len() == 1 {
        return MAX_SCORE;
    }

    let classes: Vec<AdventurerClass> = members.iter().map(|m| m.class).collect();
    let distinct = distinct_classes(&classes);

    let mut cohesion = config.base_cohesion;
    if distinct >= config.diversity_class_count {
        cohesion += config.diversity_bonus;
    } else if distinct == 1 {
        cohesion -= config.monoclass_penalty;
    }
    if let Some(leader) = leader {
        cohesion += leader.charisma() as f32 * config.leader_charisma_factor;
    }
    cohesion += (missions_completed as f32 * config.cohesion_per_mission).min(config.max_mission_cohesion);
    cohesion
}

/// Average rarity quality over every equipped slot of every member
pub fn average_equipment_quality(members: &[&Adventurer]) -> f32 {
    let (total, count) = members
        .iter()
        .flat_map(|m| m.equipment())
        .fold((0.0, 0u32), |(total, count), item| (total + item.quality(), count + 1));

    if count == 0 {
        0.0
    } else {
        total / count as f32
    }
}

/// Party motivation from loyalty, recent success and gear
pub fn compute_morale(members: &[&Adventurer], success_rate: f32, config: &PartyConfig) -> f32 {
    clamp_score(morale_formula(members, success_rate, config))
}

/// Morale before clamping
pub fn morale_formula(members: &[&Adventurer], success_rate: f32, config: &PartyConfig) -> f32 {
    if members.is_empty() {
        return config.empty_morale;
    }

    let mut morale = members.iter().map(|m| m.loyalty).sum::<f32>() / members.len() as f32;
    if success_rate > config.high_success_rate {
        morale += config.success_rate_morale;
    } else if success_rate < config.low_success_rate {
        morale -= config.success_rate_morale;
    }
    morale += average_equipment_quality(members) * config.equipment_quality_factor;
    morale
}

/// Union of synergy bonus maps, summing shared keys
pub fn raw_bonus_sum(synergies: &[Synergy]) -> BonusMap {
    let mut raw = BonusMap::new();
    for synergy in synergies {
        for (key, value) in &synergy.bonuses {
            *raw.entry(*key).or_insert(0.0) += value;
        }
    }
    raw
}

pub fn combine_bonuses(synergies: &[Synergy], cohesion: f32, morale: f32, config: &PartyConfig) -> CombinedBonusSet {
    let scale = 1.0
        + score_modifier(cohesion) * config.cohesion_bonus_weight
        + score_modifier(morale) * config.morale_bonus_weight;

    let mut combined = raw_bonus_sum(synergies);
    for value in combined.values_mut() {
        *value *= scale;
    }
    CombinedBonusSet(combined)
}

/// Sum of individual power scaled by synergies, cohesion and morale
pub fn compute_combat_power(
    members: &[&Adventurer],
    bonuses: &CombinedBonusSet,
    cohesion: f32,
    morale: f32,
    config: &PartyConfig,
) -> f32 {
    if members.is_empty() {
        return 0.0;
    }

    let base_power: f32 = members.iter().map(|m| m.combat_power()).sum();
    let synergy_multiplier = 1.0 + bonuses.get(StatKey::AllStats) / 100.0 + bonuses.get(StatKey::Damage) / 100.0;
    let cohesion_bonus = score_modifier(cohesion) * config.cohesion_power_weight;
    let morale_bonus = score_modifier(morale) * config.morale_power_weight;

    base_power * synergy_multiplier * (1.0 + cohesion_bonus + morale_bonus)
}

/// Mean health ratio, 0 for an empty party
pub fn overall_health(members: &[&Adventurer]) -> f32 {
    if members.is_empty() {
        return 0.0;
    }
    members.iter().map(|m| m.health_ratio()).sum::<f32>() / members.len() as f32
}

/// Derived stats from already-known cohesion and morale
pub fn derive_stats(
    members: &[&Adventurer],
    synergies: &[Synergy],
    cohesion: f32,
    morale: f32,
    config: &PartyConfig,
) -> PartyStats {
    let cohesion = clamp_score(cohesion);
    let morale = clamp_score(morale);
    let combined_bonuses = combine_bonuses(synergies, cohesion, morale, config);
    let combat_power = compute_combat_power(members, &combined_bonuses, cohesion, morale, config);

    PartyStats {
        cohesion,
        morale,
        combined_bonuses,
        combat_power,
        overall_health: overall_health(members),
    }
}

/// Full aggregation: cohesion and morale from their formulas plus the
/// mission offsets, then everything derived from them
pub fn aggregate(
    members: &[&Adventurer],
    leader: Option<&Adventurer>,
    synergies: &[Synergy],
    history: MissionHistory,
    config: &PartyConfig,
) -> PartyStats {
    let cohesion = cohesion_formula(members, leader, history.missions_completed, config) + history.cohesion_offset;
    let morale = morale_formula(members, history.success_rate, config) + history.morale_offset;
    derive_stats(members, synergies, cohesion, morale, config)
}
