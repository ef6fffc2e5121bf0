//! Equipment layer - catalog, procedural generation and crafting

pub mod catalog;
pub mod crafting;
pub mod generator;
pub mod instance;
pub mod rarity;
pub mod stats;

pub use catalog::{AffixDefinition, EquipmentCatalog, EquipmentTemplate};
pub use crafting::crafting_cost;
pub use generator::{level_multiplier, scale_stat, EquipmentGenerator};
pub use instance::EquipmentInstance;
pub use rarity::{Rarity, RarityInfo};
pub use stats::{BonusMap, EquipmentSlot, StatBonuses, StatKey};
