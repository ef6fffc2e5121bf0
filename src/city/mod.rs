//! City boundary - resources the guild draws on

pub mod resource;
pub mod stockpile;

pub use resource::{ResourceCost, ResourceKind, ResourceLedger};
pub use stockpile::Stockpile;
