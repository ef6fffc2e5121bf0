//! Resource kinds and the affordability boundary consumed from the city

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// City resources that equipment crafting can cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    Gold,
    Wood,
    Iron,
    Leather,
    Cloth,
    Gems,
}

/// Required amount per resource
pub type ResourceCost = BTreeMap<ResourceKind, u32>;

/// Read-only view of city resources. Bookkeeping (spending, income) stays
/// with the city; this core only asks whether a cost is covered.
pub trait ResourceLedger {
    fn can_afford(&self, cost: &ResourceCost) -> bool;
}
