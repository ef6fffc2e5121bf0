use thiserror::Error;

use crate::equipment::EquipmentSlot;

/// Failures that indicate misconfiguration rather than a gameplay refusal.
///
/// Gameplay refusals (adding an unavailable adventurer, removing a
/// non-member, levelling past the cap) are reported as `false` / `None`
/// by the operation itself and never reach this type.
#[derive(Error, Debug)]
pub enum GuildError {
    #[error("No equipment template registered for slot {0:?}")]
    NoTemplateForSlot(EquipmentSlot),

    #[error("Catalog parse error: {0}")]
    CatalogParse(String),

    #[error("Invalid catalog entry: {0}")]
    InvalidCatalog(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GuildError>;
