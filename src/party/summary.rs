//! Compact party overview for UI and logs

use serde::{Deserialize, Serialize};

use crate::adventurer::Roster;
use crate::party::Party;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartySummary {
    pub size: usize,
    pub avg_level: f32,
    pub combat_power: f32,
    pub cohesion: f32,
    pub morale: f32,
    pub success_rate: f32,
    pub active_synergy_names: Vec<String>,
}

impl Party {
    pub fn summary(&self, roster: &Roster) -> PartySummary {
        let members = roster.resolve(self.members());
        let avg_level = if members.is_empty() {
            0.0
        } else {
            members.iter().map(|m| m.level as f32).sum::<f32>() / members.len() as f32
        };

        PartySummary {
            size: self.len(),
            avg_level,
            combat_power: self.combat_power(),
            cohesion: self.cohesion(),
            morale: self.morale(),
            success_rate: self.success_rate(),
            active_synergy_names: self.synergies().iter().map(|s| s.name.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adventurer::AdventurerClass;
    use crate::core::config::{AdventurerConfig, PartyConfig};
    use crate::core::types::PartyId;

    #[test]
    fn test_summary_reflects_party() {
        let config = AdventurerConfig::default();
        let mut roster = Roster::new();
        let w = roster.hire("Brom", AdventurerClass::Warrior, &config);
        let c = roster.hire("Ilse", AdventurerClass::Cleric, &config);
        roster.get_mut(c).unwrap().level_up(&config);

        let mut party = Party::new(PartyId(1), "Vanguard", PartyConfig::default());
        party.add_member(&mut roster, w);
        party.add_member(&mut roster, c);

        let summary = party.summary(&roster);
        assert_eq!(summary.size, 2);
        assert_eq!(summary.avg_level, 1.5);
        assert_eq!(summary.combat_power, party.combat_power());
        assert_eq!(summary.active_synergy_names, vec!["Tank & Heal".to_string()]);
    }

    #[test]
    fn test_empty_summary() {
        let party = Party::new(PartyId(1), "Nobody", PartyConfig::default());
        let summary = party.summary(&Roster::new());
        assert_eq!(summary.size, 0);
        assert_eq!(summary.avg_level, 0.0);
        assert!(summary.active_synergy_names.is_empty());
    }
}
