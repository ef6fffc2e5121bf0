//! Five-dimensional core stats

use serde::{Deserialize, Serialize};
use std::ops::Add;

use crate::equipment::{StatBonuses, StatKey};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreStats {
    pub strength: i32,
    pub dexterity: i32,
    pub intelligence: i32,
    pub constitution: i32,
    pub charisma: i32,
}

impl CoreStats {
    pub fn new(strength: i32, dexterity: i32, intelligence: i32, constitution: i32, charisma: i32) -> Self {
        Self { strength, dexterity, intelligence, constitution, charisma }
    }

    /// Sum of all five stats
    pub fn total(&self) -> i32 {
        self.strength + self.dexterity + self.intelligence + self.constitution + self.charisma
    }

    /// Read a core stat. Non-core keys read as 0.
    pub fn get(&self, key: StatKey) -> i32 {
        match key {
            StatKey::Strength => self.strength,
            StatKey::Dexterity => self.dexterity,
            StatKey::Intelligence => self.intelligence,
            StatKey::Constitution => self.constitution,
            StatKey::Charisma => self.charisma,
            _ => 0,
        }
    }

    /// Add to a core stat. Non-core keys are ignored.
    pub fn add(&mut self, key: StatKey, amount: i32) {
        match key {
            StatKey::Strength => self.strength += amount,
            StatKey::Dexterity => self.dexterity += amount,
            StatKey::Intelligence => self.intelligence += amount,
            StatKey::Constitution => self.constitution += amount,
            StatKey::Charisma => self.charisma += amount,
            _ => {}
        }
    }

    /// Apply item bonuses: core keys add directly, AllStats adds to each
    pub fn apply_bonuses(&mut self, bonuses: &StatBonuses) {
        for (key, value) in bonuses {
            if *key == StatKey::AllStats {
                for core in StatKey::core() {
                    self.add(*core, *value);
                }
            } else {
                self.add(*key, *value);
            }
        }
    }

    /// Clamp every stat to at least `floor`
    pub fn floored(self, floor: i32) -> Self {
        Self {
            strength: self.strength.max(floor),
            dexterity: self.dexterity.max(floor),
            intelligence: self.intelligence.max(floor),
            constitution: self.constitution.max(floor),
            charisma: self.charisma.max(floor),
        }
    }
}

impl Add for CoreStats {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            strength: self.strength + rhs.strength,
            dexterity: self.dexterity + rhs.dexterity,
            intelligence: self.intelligence + rhs.intelligence,
            constitution: self.constitution + rhs.constitution,
            charisma: self.charisma + rhs.charisma,
        }
    }
}
