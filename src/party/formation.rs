//! Tactical stances a party can adopt

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formation {
    #[default]
    Balanced,
    Offensive,
    Defensive,
    Magic,
    Stealth,
    Custom,
}

impl Formation {
    pub fn all() -> &'static [Formation] {
        &[
            Formation::Balanced,
            Formation::Offensive,
            Formation::Defensive,
            Formation::Magic,
            Formation::Stealth,
            Formation::Custom,
        ]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Formation::Balanced => "No particular emphasis",
            Formation::Offensive => "Damage dealers up front",
            Formation::Defensive => "Hold the line and protect the weak",
            Formation::Magic => "Casters at the center of a warded circle",
            Formation::Stealth => "Move unseen, strike first",
            Formation::Custom => "Player-arranged positions",
        }
    }
}
