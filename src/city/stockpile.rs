//! Stockpile - in-memory resource storage implementing the ledger boundary

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::city::resource::{ResourceCost, ResourceKind, ResourceLedger};

/// Default capacity for a resource that has never been configured
const DEFAULT_CAPACITY: u32 = 1000;

/// A stockpile holding the city resources the guild draws on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stockpile {
    /// Resources stored: kind -> (current, capacity)
    resources: AHashMap<ResourceKind, (u32, u32)>,
}

impl Stockpile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set capacity for a resource kind
    pub fn set_capacity(&mut self, resource: ResourceKind, capacity: u32) {
        let entry = self.resources.entry(resource).or_insert((0, 0));
        entry.1 = capacity;
        entry.0 = entry.0.min(capacity);
    }

    /// Get current amount of a resource
    pub fn get(&self, resource: ResourceKind) -> u32 {
        self.resources.get(&resource).map(|(c, _)| *c).unwrap_or(0)
    }

    /// Get capacity for a resource
    pub fn capacity(&self, resource: ResourceKind) -> u32 {
        self.resources
            .get(&resource)
            .map(|(_, cap)| *cap)
            .unwrap_or(DEFAULT_CAPACITY)
    }

    /// Try to add resources, returns amount actually added
    pub fn add(&mut self, resource: ResourceKind, amount: u32) -> u32 {
        let entry = self.resources.entry(resource).or_insert((0, DEFAULT_CAPACITY));
        let space = entry.1.saturating_sub(entry.0);
        let added = amount.min(space);
        entry.0 += added;
        added
    }

    /// Try to remove resources, returns amount actually removed
    pub fn remove(&mut self, resource: ResourceKind, amount: u32) -> u32 {
        if let Some(entry) = self.resources.get_mut(&resource) {
            let removed = amount.min(entry.0);
            entry.0 -= removed;
            removed
        } else {
            0
        }
    }

    /// Deduct a whole cost, returns false (and changes nothing) if any part
    /// is short
    pub fn spend(&mut self, cost: &ResourceCost) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        for (resource, amount) in cost {
            self.remove(*resource, *amount);
        }
        true
    }
}

impl ResourceLedger for Stockpile {
    fn can_afford(&self, cost: &ResourceCost) -> bool {
        cost.iter().all(|(res, amount)| self.get(*res) >= *amount)
    }
}
