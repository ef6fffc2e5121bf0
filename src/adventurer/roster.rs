//! Roster - owns every adventurer the guild employs

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::adventurer::recruit::generate_recruit;
use crate::adventurer::{Adventurer, AdventurerClass};
use crate::core::config::AdventurerConfig;
use crate::core::rng::RandomSource;
use crate::core::types::AdventurerId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    adventurers: AHashMap<AdventurerId, Adventurer>,
    next_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> AdventurerId {
        self.next_id += 1;
        AdventurerId(self.next_id)
    }

    /// Hire a level 1 adventurer with the class's base stats
    pub fn hire(&mut self, name: impl Into<String>, class: AdventurerClass, config: &AdventurerConfig) -> AdventurerId {
        let id = self.allocate_id();
        self.adventurers.insert(id, Adventurer::new(id, name, class, config));
        id
    }

    /// Recruit a randomly rolled adventurer
    pub fn recruit<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &AdventurerConfig,
        class: Option<AdventurerClass>,
        level: u32,
    ) -> AdventurerId {
        let id = self.allocate_id();
        self.adventurers.insert(id, generate_recruit(id, rng, config, class, level));
        id
    }

    pub fn get(&self, id: AdventurerId) -> Option<&Adventurer> {
        self.adventurers.get(&id)
    }

    pub fn get_mut(&mut self, id: AdventurerId) -> Option<&mut Adventurer> {
        self.adventurers.get_mut(&id)
    }

    pub fn contains(&self, id: AdventurerId) -> bool {
        self.adventurers.contains_key(&id)
    }

    /// Let an adventurer go. Refused while they belong to a party or are
    /// away on a mission.
    pub fn dismiss(&mut self, id: AdventurerId) -> Option<Adventurer> {
        let adventurer = self.adventurers.get(&id)?;
        if adventurer.party_id().is_some() || adventurer.on_mission() {
            return None;
        }
        self.adventurers.remove(&id)
    }

    /// All ids in ascending order
    pub fn ids(&self) -> Vec<AdventurerId> {
        let mut ids: Vec<_> = self.adventurers.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Adventurers free to join a party, in id order
    pub fn available(&self) -> Vec<AdventurerId> {
        self.ids()
            .into_iter()
            .filter(|id| self.adventurers.get(id).is_some_and(|a| a.is_available() && a.party_id().is_none()))
            .collect()
    }

    /// Resolve ids to adventurers, skipping unknown ids
    pub fn resolve<'a>(&'a self, ids: &[AdventurerId]) -> Vec<&'a Adventurer> {
        ids.iter().filter_map(|id| self.adventurers.get(id)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Adventurer> {
        self.adventurers.values()
    }

    pub fn len(&self) -> usize {
        self.adventurers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adventurers.is_empty()
    }
}
