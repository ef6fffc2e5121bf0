//! Parties - grouping adventurers, synergies and derived party stats

pub mod aggregate;
pub mod formation;
pub mod mission;
#[allow(clippy::module_inception)]
pub mod party;
pub mod summary;
pub mod synergy;

pub use aggregate::{CombinedBonusSet, MissionHistory, PartyStats};
pub use formation::Formation;
pub use mission::next_success_rate;
pub use party::Party;
pub use summary::PartySummary;
pub use synergy::{evaluate_synergies, Synergy};
