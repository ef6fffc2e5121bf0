//! Mission outcome bookkeeping
//!
//! Outcomes feed back into the party: success builds cohesion and morale,
//! failure erodes morale, and the success rate is kept as a running average.

use crate::adventurer::Roster;
use crate::party::aggregate::MAX_SCORE;
use crate::party::Party;

/// Running average success rate after one more mission. `completed` already
/// counts the mission being recorded.
pub fn next_success_rate(old_rate: f32, completed: u32, success: bool) -> f32 {
    if completed == 0 {
        return 0.0;
    }
    let previous = (old_rate * (completed - 1) as f32).round() as u32;
    let successful = previous + u32::from(success);
    (successful as f32 / completed as f32).clamp(0.0, 1.0)
}

impl Party {
    /// Record a finished mission. The score deltas land on the stored
    /// cohesion and morale and are kept as offsets for later rebuilds.
    pub fn complete_mission(&mut self, roster: &Roster, success: bool) {
        self.history.missions_completed += 1;

        let (cohesion_gain, morale_gain, morale_loss) = {
            let config = self.config();
            (config.success_cohesion_gain, config.success_morale_gain, config.failure_morale_loss)
        };
        if success {
            self.cohesion = (self.cohesion + cohesion_gain).min(MAX_SCORE);
            self.morale = (self.morale + morale_gain).min(MAX_SCORE);
        } else {
            self.morale = (self.morale - morale_loss).max(0.0);
        }
        self.history.success_rate =
            next_success_rate(self.history.success_rate, self.history.missions_completed, success);

        self.anchor_offsets(roster);
        self.refresh_derived(roster);

        tracing::info!(
            party = %self.name,
            success,
            missions = self.history.missions_completed,
            success_rate = self.history.success_rate,
            cohesion = self.cohesion,
            morale = self.morale,
            "mission completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PartyConfig;
    use crate::core::types::PartyId;

    #[test]
    fn test_running_average() {
        assert_eq!(next_success_rate(0.0, 1, true), 1.0);
        assert_eq!(next_success_rate(1.0, 2, false), 0.5);
        assert!((next_success_rate(0.5, 3, true) - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(next_success_rate(0.0, 0, true), 0.0);
    }

    #[test]
    fn test_success_raises_scores() {
        let roster = Roster::new();
        let mut party = Party::new(PartyId(1), "P", PartyConfig::default());
        let (cohesion, morale) = (party.cohesion(), party.morale());

        party.complete_mission(&roster, true);
        assert_eq!(party.missions_completed(), 1);
        assert_eq!(party.success_rate(), 1.0);
        assert_eq!(party.cohesion(), (cohesion + 2.0).min(100.0));
        assert_eq!(party.morale(), (morale + 3.0).min(100.0));
    }

    #[test]
    fn test_failure_lowers_morale_only() {
        let roster = Roster::new();
        let mut party = Party::new(PartyId(1), "P", PartyConfig::default());
        party.complete_mission(&roster, true);
        let (cohesion, morale) = (party.cohesion(), party.morale());

        party.complete_mission(&roster, false);
        assert_eq!(party.success_rate(), 0.5);
        assert_eq!(party.cohesion(), cohesion);
        assert_eq!(party.morale(), morale - 5.0);
    }

    #[test]
    fn test_mission_scores_survive_rebuilds() {
        use crate::adventurer::AdventurerClass;
        use crate::core::config::AdventurerConfig;

        let config = AdventurerConfig::default();
        let mut roster = Roster::new();
        let a = roster.hire("Brom", AdventurerClass::Warrior, &config);
        let b = roster.hire("Vask", AdventurerClass::Mage, &config);
        let mut party = Party::new(PartyId(1), "P", PartyConfig::default());
        party.add_member(&mut roster, a);
        party.add_member(&mut roster, b);

        party.complete_mission(&roster, false);
        let (cohesion, morale) = (party.cohesion(), party.morale());

        party.set_leader(&roster, a);
        party.set_formation(&roster, party.formation());
        party.recalculate(&roster);
        assert!((party.cohesion() - cohesion).abs() < 1e-4);
        assert!((party.morale() - morale).abs() < 1e-4);
    }

    #[test]
    fn test_scores_stay_clamped() {
        let roster = Roster::new();
        let mut party = Party::new(PartyId(1), "P", PartyConfig::default());
        for _ in 0..40 {
            party.complete_mission(&roster, false);
        }
        assert_eq!(party.morale(), 0.0);
        for _ in 0..60 {
            party.complete_mission(&roster, true);
        }
        assert_eq!(party.cohesion(), 100.0);
        assert_eq!(party.morale(), 100.0);
    }
}
