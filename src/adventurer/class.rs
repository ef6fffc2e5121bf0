//! Adventurer classes and their per-class data

use serde::{Deserialize, Serialize};

use crate::adventurer::stats::CoreStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AdventurerClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
    Ranger,
    Paladin,
}

/// Per-class tuning row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassInfo {
    pub name: &'static str,
    /// Stats at level 1 before recruitment variance
    pub base_stats: CoreStats,
    /// Stats gained on each level-up
    pub growth: CoreStats,
    /// Counts towards offensive formation synergies
    pub damage_dealer: bool,
}

const fn stats(strength: i32, dexterity: i32, intelligence: i32, constitution: i32, charisma: i32) -> CoreStats {
    CoreStats { strength, dexterity, intelligence, constitution, charisma }
}

const CLASS_TABLE: [ClassInfo; 6] = [
    ClassInfo {
        name: "Warrior",
        base_stats: stats(14, 10, 6, 13, 8),
        growth: stats(2, 1, 0, 2, 0),
        damage_dealer: true,
    },
    ClassInfo {
        name: "Mage",
        base_stats: stats(6, 9, 15, 8, 10),
        growth: stats(0, 1, 3, 0, 1),
        damage_dealer: true,
    },
    ClassInfo {
        name: "Rogue",
        base_stats: stats(9, 15, 9, 9, 9),
        growth: stats(1, 3, 0, 1, 0),
        damage_dealer: true,
    },
    ClassInfo {
        name: "Cleric",
        base_stats: stats(9, 7, 12, 11, 12),
        growth: stats(1, 0, 2, 1, 1),
        damage_dealer: false,
    },
    ClassInfo {
        name: "Ranger",
        base_stats: stats(10, 14, 9, 10, 8),
        growth: stats(1, 2, 1, 1, 0),
        damage_dealer: true,
    },
    ClassInfo {
        name: "Paladin",
        base_stats: stats(13, 7, 9, 12, 13),
        growth: stats(2, 0, 1, 1, 1),
        damage_dealer: false,
    },
];

impl AdventurerClass {
    pub fn all() -> &'static [AdventurerClass] {
        &[
            AdventurerClass::Warrior,
            AdventurerClass::Mage,
            AdventurerClass::Rogue,
            AdventurerClass::Cleric,
            AdventurerClass::Ranger,
            AdventurerClass::Paladin,
        ]
    }

    pub fn info(&self) -> &'static ClassInfo {
        &CLASS_TABLE[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    pub fn base_stats(&self) -> CoreStats {
        self.info().base_stats
    }

    pub fn growth(&self) -> CoreStats {
        self.info().growth
    }

    pub fn is_damage_dealer(&self) -> bool {
        self.info().damage_dealer
    }
}
