//! Procedural equipment generation
//!
//! 1. Pick a template for the slot (first one preferring the class hint,
//!    otherwise a uniform random choice).
//! 2. Scale its base stats by rarity and level, rounding each value.
//! 3. Roll an affix count from the rarity's half-open range.
//! 4. Draw that many affixes by weight without replacement from the pool of
//!    affixes the rarity unlocks, stopping early if the pool runs dry.

use crate::adventurer::AdventurerClass;
use crate::core::error::{GuildError, Result};
use crate::core::rng::RandomSource;
use crate::core::types::ItemId;
use crate::equipment::catalog::{AffixDefinition, EquipmentCatalog, EquipmentTemplate};
use crate::equipment::{EquipmentInstance, EquipmentSlot, Rarity, StatBonuses};

/// Stat scaling per level above 1
const LEVEL_SCALING: f64 = 0.1;

/// `1 + (level - 1) * 0.1`; level 0 is treated as level 1
pub fn level_multiplier(level: u32) -> f64 {
    1.0 + level.saturating_sub(1) as f64 * LEVEL_SCALING
}

/// Scale one template stat for a rarity and level
pub fn scale_stat(base: f64, rarity: Rarity, level: u32) -> i32 {
    (base * rarity.stat_multiplier() * level_multiplier(level)).round() as i32
}

/// Builds equipment instances from a catalog
#[derive(Debug)]
pub struct EquipmentGenerator<'a> {
    catalog: &'a EquipmentCatalog,
    next_id: u64,
}

impl<'a> EquipmentGenerator<'a> {
    pub fn new(catalog: &'a EquipmentCatalog) -> Self {
        Self { catalog, next_id: 1 }
    }

    /// Resume id allocation after previously issued items
    pub fn with_next_id(catalog: &'a EquipmentCatalog, next_id: u64) -> Self {
        Self { catalog, next_id }
    }

    pub fn catalog(&self) -> &EquipmentCatalog {
        self.catalog
    }

    /// Generate one item. Fails only when the catalog has no template for
    /// `slot`.
    pub fn generate<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        slot: EquipmentSlot,
        rarity: Rarity,
        level: u32,
        class_hint: Option<AdventurerClass>,
    ) -> Result<EquipmentInstance> {
        let template = self.select_template(rng, slot, class_hint)?;

        let base_stats: StatBonuses = template
            .base_stats
            .iter()
            .map(|(key, base)| (*key, scale_stat(*base, rarity, level)))
            .collect();

        let mut stat_bonuses = base_stats.clone();
        let mut name = template.name.clone();
        let mut affixes = Vec::new();

        let (min, max) = rarity.affix_range();
        let affix_count = rng.range(min as i64, max as i64).max(0) as usize;
        let mut pool = self.catalog.affix_pool(rarity);

        for _ in 0..affix_count {
            let Some(affix) = draw_weighted(rng, &mut pool) else {
                tracing::debug!(
                    rarity = rarity.name(),
                    wanted = affix_count,
                    applied = affixes.len(),
                    "affix pool exhausted"
                );
                break;
            };

            for (key, delta) in &affix.stats {
                *stat_bonuses.entry(*key).or_insert(0) += delta;
            }
            name = if affix.is_prefix {
                format!("{} {}", affix.name, name)
            } else {
                format!("{} {}", name, affix.name)
            };
            affixes.push(affix.id.clone());
        }

        let id = ItemId(self.next_id);
        self.next_id += 1;

        tracing::debug!(
            item = %name,
            ?slot,
            rarity = rarity.name(),
            level,
            affixes = affixes.len(),
            "generated equipment"
        );

        Ok(EquipmentInstance {
            id,
            template_id: template.id.clone(),
            name,
            slot,
            rarity,
            level,
            base_stats,
            stat_bonuses,
            affixes,
            class_requirement: template.class_requirement,
        })
    }

    fn select_template<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        slot: EquipmentSlot,
        class_hint: Option<AdventurerClass>,
    ) -> Result<&'a EquipmentTemplate> {
        let templates = self.catalog.templates_for(slot);
        if templates.is_empty() {
            tracing::warn!(?slot, "catalog has no templates for slot");
            return Err(GuildError::NoTemplateForSlot(slot));
        }

        if let Some(class) = class_hint {
            if let Some(preferred) = templates.iter().find(|t| t.prefers(class)) {
                return Ok(preferred);
            }
        }

        let idx = rng.pick(templates.len()).unwrap_or(0);
        Ok(&templates[idx])
    }
}

/// Weighted draw without replacement: scan cumulative weights against a
/// uniform roll in `[0, total)` and remove the hit from the pool.
fn draw_weighted<'c, R: RandomSource + ?Sized>(
    rng: &mut R,
    pool: &mut Vec<&'c AffixDefinition>,
) -> Option<&'c AffixDefinition> {
    if pool.is_empty() {
        return None;
    }

    let total: f64 = pool.iter().map(|a| a.weight as f64).sum();
    let roll = rng.uniform(0.0, total);

    let mut cumulative = 0.0;
    let mut chosen = pool.len() - 1;
    for (idx, affix) in pool.iter().enumerate() {
        cumulative += affix.weight as f64;
        if roll < cumulative {
            chosen = idx;
            break;
        }
    }

    Some(pool.remove(chosen))
}
