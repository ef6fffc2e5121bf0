//! Crafting costs and affordability-gated generation

use crate::adventurer::AdventurerClass;
use crate::city::{ResourceCost, ResourceKind, ResourceLedger};
use crate::core::error::Result;
use crate::core::rng::RandomSource;
use crate::equipment::{EquipmentGenerator, EquipmentInstance, EquipmentSlot, Rarity};

/// Gold per item level before the rarity factor
const GOLD_PER_LEVEL: u32 = 10;

/// Materials for a Common item of each slot
fn base_materials(slot: EquipmentSlot) -> &'static [(ResourceKind, u32)] {
    match slot {
        EquipmentSlot::Weapon => &[(ResourceKind::Iron, 4), (ResourceKind::Wood, 2)],
        EquipmentSlot::Armor => &[(ResourceKind::Iron, 3), (ResourceKind::Leather, 4)],
        EquipmentSlot::Accessory => &[(ResourceKind::Gold, 5), (ResourceKind::Gems, 1)],
        EquipmentSlot::Helmet => &[(ResourceKind::Iron, 3)],
        EquipmentSlot::Boots => &[(ResourceKind::Leather, 3), (ResourceKind::Cloth, 1)],
    }
}

/// Resources needed to craft an item
pub fn crafting_cost(slot: EquipmentSlot, rarity: Rarity, level: u32) -> ResourceCost {
    let factor = rarity.info().cost_factor;
    let mut cost = ResourceCost::new();
    for (resource, amount) in base_materials(slot) {
        *cost.entry(*resource).or_insert(0) += amount * factor;
    }
    *cost.entry(ResourceKind::Gold).or_insert(0) += GOLD_PER_LEVEL * level.max(1) * factor;
    cost
}

impl EquipmentGenerator<'_> {
    /// Generate an item only if the ledger covers its crafting cost.
    ///
    /// `Ok(None)` means the city cannot afford it. The ledger is never
    /// charged here; the caller owns resource bookkeeping.
    pub fn craft<R: RandomSource + ?Sized, L: ResourceLedger + ?Sized>(
        &mut self,
        ledger: &L,
        rng: &mut R,
        slot: EquipmentSlot,
        rarity: Rarity,
        level: u32,
        class_hint: Option<AdventurerClass>,
    ) -> Result<Option<EquipmentInstance>> {
        let cost = crafting_cost(slot, rarity, level);
        if !ledger.can_afford(&cost) {
            tracing::debug!(?slot, rarity = rarity.name(), level, "cannot afford crafting cost");
            return Ok(None);
        }
        self.generate(rng, slot, rarity, level, class_hint).map(Some)
    }
}
