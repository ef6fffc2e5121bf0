//! Core identifiers shared across the simulation

use serde::{Deserialize, Serialize};

/// Unique identifier for adventurers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AdventurerId(pub u32);

impl AdventurerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for parties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartyId(pub u32);

impl PartyId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for generated equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

/// Simulation day counter, advanced by the external scheduler
pub type Day = u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adventurer_id_equality() {
        assert_eq!(AdventurerId::new(1), AdventurerId(1));
        assert_ne!(AdventurerId::new(1), AdventurerId::new(2));
    }

    #[test]
    fn test_ids_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<PartyId, &str> = HashMap::new();
        map.insert(PartyId(7), "vanguard");
        assert_eq!(map.get(&PartyId(7)), Some(&"vanguard"));
        assert_eq!(map.get(&PartyId(8)), None);
    }
}
