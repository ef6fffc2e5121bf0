//! Rarity tiers and their per-tier data
//!
//! Everything that varies by rarity lives in one table so that adding a tier
//! is a data change.

use serde::{Deserialize, Serialize};

/// Ordinal quality tier. Declaration order is the rarity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Artifact,
}

/// Per-rarity tuning row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RarityInfo {
    pub name: &'static str,
    /// Scales template base stats
    pub stat_multiplier: f64,
    /// Half-open `[min, max)` range of affixes rolled; `(0, 0)` means none
    pub affix_range: (u32, u32),
    /// Quality scalar used by party morale
    pub quality: f32,
    /// Multiplier on the crafting cost of a base item
    pub cost_factor: u32,
}

const RARITY_TABLE: [RarityInfo; 6] = [
    RarityInfo { name: "Common", stat_multiplier: 1.0, affix_range: (0, 0), quality: 0.2, cost_factor: 1 },
    RarityInfo { name: "Uncommon", stat_multiplier: 1.25, affix_range: (0, 2), quality: 0.4, cost_factor: 2 },
    RarityInfo { name: "Rare", stat_multiplier: 1.6, affix_range: (1, 3), quality: 0.6, cost_factor: 4 },
    RarityInfo { name: "Epic", stat_multiplier: 2.0, affix_range: (2, 4), quality: 0.8, cost_factor: 8 },
    RarityInfo { name: "Legendary", stat_multiplier: 2.5, affix_range: (3, 5), quality: 1.0, cost_factor: 16 },
    RarityInfo { name: "Artifact", stat_multiplier: 3.5, affix_range: (4, 6), quality: 1.2, cost_factor: 40 },
];

impl Rarity {
    pub fn all() -> &'static [Rarity] {
        &[
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
            Rarity::Artifact,
        ]
    }

    pub fn info(&self) -> &'static RarityInfo {
        &RARITY_TABLE[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    pub fn stat_multiplier(&self) -> f64 {
        self.info().stat_multiplier
    }

    pub fn affix_range(&self) -> (u32, u32) {
        self.info().affix_range
    }

    pub fn quality(&self) -> f32 {
        self.info().quality
    }
}
