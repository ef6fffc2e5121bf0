//! Adventurer entity - stats, equipment, health and progression

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::adventurer::{AdventurerClass, CoreStats};
use crate::core::config::AdventurerConfig;
use crate::core::types::{AdventurerId, PartyId};
use crate::equipment::{EquipmentInstance, EquipmentSlot, StatKey};

/// Loyalty bounds
const MAX_LOYALTY: f32 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adventurer {
    pub id: AdventurerId,
    pub name: String,
    pub class: AdventurerClass,
    pub level: u32,
    /// Experience towards the next level
    pub experience: u32,
    /// Base stats without equipment
    pub stats: CoreStats,
    /// 0-100, feeds party morale
    pub loyalty: f32,
    pub missions_completed: u32,
    pub missions_failed: u32,

    current_health: i32,
    /// Max health from stats alone; equipment Health adds on top
    base_max_health: i32,
    is_injured: bool,
    on_mission: bool,
    party_id: Option<PartyId>,
    equipment: BTreeMap<EquipmentSlot, EquipmentInstance>,
}

impl Adventurer {
    /// A level 1 adventurer with the class's base stats at full health
    pub fn new(id: AdventurerId, name: impl Into<String>, class: AdventurerClass, config: &AdventurerConfig) -> Self {
        Self::with_stats(id, name, class, class.base_stats(), config)
    }

    /// A level 1 adventurer with explicit stats
    pub fn with_stats(
        id: AdventurerId,
        name: impl Into<String>,
        class: AdventurerClass,
        stats: CoreStats,
        config: &AdventurerConfig,
    ) -> Self {
        let base_max_health = health_for(&stats, config);
        Self {
            id,
            name: name.into(),
            class,
            level: 1,
            experience: 0,
            stats,
            loyalty: config.starting_loyalty.clamp(0.0, MAX_LOYALTY),
            missions_completed: 0,
            missions_failed: 0,
            current_health: base_max_health,
            base_max_health,
            is_injured: false,
            on_mission: false,
            party_id: None,
            equipment: BTreeMap::new(),
        }
    }

    // === HEALTH ===

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn max_health(&self) -> i32 {
        let equipment: i32 = self.equipment.values().map(|e| e.bonus(StatKey::Health)).sum();
        (self.base_max_health + equipment).max(1)
    }

    pub fn health_ratio(&self) -> f32 {
        self.current_health as f32 / self.max_health() as f32
    }

    pub fn is_injured(&self) -> bool {
        self.is_injured
    }

    /// Apply damage; returns the amount actually taken
    pub fn take_damage(&mut self, amount: i32, config: &AdventurerConfig) -> i32 {
        let taken = amount.max(0).min(self.current_health);
        self.current_health -= taken;
        if self.health_ratio() < config.injury_threshold && !self.is_injured {
            self.is_injured = true;
            tracing::debug!(adventurer = %self.name, health = self.current_health, "adventurer injured");
        }
        taken
    }

    /// Restore health up to max; returns the amount actually healed
    pub fn heal(&mut self, amount: i32, config: &AdventurerConfig) -> i32 {
        let healed = amount.max(0).min(self.max_health() - self.current_health);
        self.current_health += healed;
        if self.is_injured && self.health_ratio() >= config.recovery_threshold {
            self.is_injured = false;
            tracing::debug!(adventurer = %self.name, "adventurer recovered");
        }
        healed
    }

    /// Daily recovery. Adventurers away on a mission do not rest.
    pub fn rest_day(&mut self, config: &AdventurerConfig) -> i32 {
        if self.on_mission {
            return 0;
        }
        let amount = (self.max_health() as f32 * config.daily_heal_fraction).round() as i32;
        self.heal(amount, config)
    }

    // === AVAILABILITY ===

    /// Free to join a party or leave on a mission
    pub fn is_available(&self) -> bool {
        !self.is_injured && !self.on_mission && self.current_health > 0
    }

    pub fn on_mission(&self) -> bool {
        self.on_mission
    }

    pub fn party_id(&self) -> Option<PartyId> {
        self.party_id
    }

    pub(crate) fn set_party(&mut self, party_id: Option<PartyId>) {
        self.party_id = party_id;
    }

    /// Mark as away; false if not available
    pub fn begin_mission(&mut self) -> bool {
        if !self.is_available() {
            return false;
        }
        self.on_mission = true;
        true
    }

    /// Return from a mission, updating history, loyalty and experience.
    /// Returns the number of levels gained.
    pub fn finish_mission(&mut self, success: bool, config: &AdventurerConfig) -> u32 {
        self.on_mission = false;
        let xp = if success {
            self.missions_completed += 1;
            self.loyalty = (self.loyalty + config.loyalty_per_mission).min(MAX_LOYALTY);
            config.mission_success_xp
        } else {
            self.missions_failed += 1;
            self.loyalty = (self.loyalty - config.loyalty_per_mission).max(0.0);
            config.mission_failure_xp
        };
        self.gain_experience(xp, config)
    }

    /// Fraction of this adventurer's missions that succeeded
    pub fn mission_success_rate(&self) -> f32 {
        let total = self.missions_completed + self.missions_failed;
        if total == 0 {
            return 0.0;
        }
        self.missions_completed as f32 / total as f32
    }

    // === PROGRESSION ===

    pub fn xp_to_next_level(&self, config: &AdventurerConfig) -> u32 {
        self.level * config.xp_per_level
    }

    /// Add experience, levelling as often as it allows. Returns levels gained.
    pub fn gain_experience(&mut self, xp: u32, config: &AdventurerConfig) -> u32 {
        if self.level >= config.max_level {
            return 0;
        }
        self.experience = self.experience.saturating_add(xp);
        let mut gained = 0;
        while self.experience >= self.xp_to_next_level(config) {
            self.experience -= self.xp_to_next_level(config);
            if !self.level_up(config) {
                break;
            }
            gained += 1;
        }
        if self.level >= config.max_level {
            self.experience = 0;
        }
        gained
    }

    /// Raise level by one, applying class growth. False at the level cap.
    pub fn level_up(&mut self, config: &AdventurerConfig) -> bool {
        if self.level >= config.max_level {
            return false;
        }
        self.level += 1;
        self.stats = self.stats + self.class.growth();

        let new_max = health_for(&self.stats, config);
        let delta = new_max - self.base_max_health;
        self.base_max_health = new_max;
        self.current_health = (self.current_health + delta.max(0)).min(self.max_health());

        tracing::info!(adventurer = %self.name, level = self.level, "level up");
        true
    }

    // === EQUIPMENT ===

    /// Class requirement is the only gate; unrestricted items fit anyone
    pub fn can_equip(&self, item: &EquipmentInstance) -> bool {
        item.usable_by(self.class)
    }

    /// Put an item in its slot. Returns the displaced item, or hands the
    /// rejected item back if the class cannot use it.
    pub fn equip(&mut self, item: EquipmentInstance) -> Result<Option<EquipmentInstance>, EquipmentInstance> {
        if !self.can_equip(&item) {
            return Err(item);
        }
        let previous = self.equipment.insert(item.slot, item);
        self.clamp_health();
        Ok(previous)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<EquipmentInstance> {
        let removed = self.equipment.remove(&slot);
        self.clamp_health();
        removed
    }

    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&EquipmentInstance> {
        self.equipment.get(&slot)
    }

    /// Equipped items in slot order
    pub fn equipment(&self) -> impl Iterator<Item = &EquipmentInstance> {
        self.equipment.values()
    }

    /// Base stats plus equipment core-stat bonuses, never below zero
    pub fn effective_stats(&self) -> CoreStats {
        let mut stats = self.stats;
        for item in self.equipment.values() {
            stats.apply_bonuses(&item.stat_bonuses);
        }
        stats.floored(0)
    }

    /// Effective charisma, used for leadership
    pub fn charisma(&self) -> i32 {
        self.effective_stats().charisma
    }

    /// Core stat sum times level, plus the power of every equipped item
    pub fn combat_power(&self) -> f32 {
        let stat_power = self.stats.total().max(0) as f32 * self.level as f32;
        let item_power: i32 = self.equipment.values().map(EquipmentInstance::power).sum();
        stat_power + item_power as f32
    }

    fn clamp_health(&mut self) {
        self.current_health = self.current_health.clamp(0, self.max_health());
    }
}

fn health_for(stats: &CoreStats, config: &AdventurerConfig) -> i32 {
    config.base_health + stats.constitution.max(0) * config.health_per_constitution
}
