//! Stat keys shared by equipment, synergies and party bonuses

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every stat an item, affix or synergy can touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatKey {
    // Core stats
    Strength,
    Dexterity,
    Intelligence,
    Constitution,
    Charisma,

    // Derived
    Damage,
    Defense,
    MagicDamage,
    Health,
    Mana,
    HealthRegen,
    ManaRegen,
    CriticalChance,
    Initiative,
    Evasion,

    /// Applies to all five core stats
    AllStats,
}

impl StatKey {
    pub fn core() -> &'static [StatKey] {
        &[
            StatKey::Strength,
            StatKey::Dexterity,
            StatKey::Intelligence,
            StatKey::Constitution,
            StatKey::Charisma,
        ]
    }

    pub fn is_core(&self) -> bool {
        Self::core().contains(self)
    }
}

/// Resolved integer bonuses on an item
pub type StatBonuses = BTreeMap<StatKey, i32>;

/// Fractional bonuses from synergies and party aggregation
pub type BonusMap = BTreeMap<StatKey, f32>;

/// Equipment slots an adventurer can fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
    Helmet,
    Boots,
}

impl EquipmentSlot {
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Weapon,
            EquipmentSlot::Armor,
            EquipmentSlot::Accessory,
            EquipmentSlot::Helmet,
            EquipmentSlot::Boots,
        ]
    }
}
