//! Adventurers - classes, stats, the entity itself and the roster that owns them

#[allow(clippy::module_inception)]
pub mod adventurer;
pub mod class;
pub mod recruit;
pub mod roster;
pub mod stats;

pub use adventurer::Adventurer;
pub use class::{AdventurerClass, ClassInfo};
pub use recruit::generate_recruit;
pub use roster::Roster;
pub use stats::CoreStats;
