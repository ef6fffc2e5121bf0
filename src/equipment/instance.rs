//! Generated equipment

use serde::{Deserialize, Serialize};

use crate::adventurer::AdventurerClass;
use crate::core::types::ItemId;
use crate::equipment::{EquipmentSlot, Rarity, StatBonuses, StatKey};

/// A concrete item produced by the generator. Never mutated after creation;
/// re-rolling produces a new instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentInstance {
    pub id: ItemId,
    pub template_id: String,
    /// Template name with prefixes in front and suffixes behind
    pub name: String,
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    pub level: u32,
    /// Template stats after rarity and level scaling
    pub base_stats: StatBonuses,
    /// `base_stats` plus every applied affix delta
    pub stat_bonuses: StatBonuses,
    /// Applied affix ids in draw order, no duplicates
    pub affixes: Vec<String>,
    pub class_requirement: Option<AdventurerClass>,
}

impl EquipmentInstance {
    pub fn bonus(&self, key: StatKey) -> i32 {
        self.stat_bonuses.get(&key).copied().unwrap_or(0)
    }

    pub fn has_affix(&self, affix_id: &str) -> bool {
        self.affixes.iter().any(|a| a == affix_id)
    }

    /// Quality scalar used by party morale
    pub fn quality(&self) -> f32 {
        self.rarity.quality()
    }

    pub fn usable_by(&self, class: AdventurerClass) -> bool {
        self.class_requirement.map_or(true, |required| required == class)
    }

    /// Contribution to its wearer's combat power: positive bonuses plus a
    /// level and quality term. Penalties never make an item worth less than
    /// wearing nothing.
    pub fn power(&self) -> i32 {
        let positive: i32 = self.stat_bonuses.values().filter(|v| **v > 0).sum();
        let tier = (self.level as f32 * self.quality() * 10.0).round() as i32;
        positive + tier
    }
}
