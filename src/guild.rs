//! Guild - the single owner of the roster and its parties
//!
//! The host game drives the guild through a handful of call-ins: forming
//! parties, dispatching them, reporting mission results and advancing days.
//! Mission resolution itself happens elsewhere and only reports back here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::adventurer::{AdventurerClass, Roster};
use crate::core::config::GuildConfig;
use crate::core::error::Result;
use crate::core::rng::RandomSource;
use crate::core::types::{AdventurerId, Day, PartyId};
use crate::equipment::EquipmentInstance;
use crate::party::{Formation, Party, PartySummary};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guild {
    config: GuildConfig,
    roster: Roster,
    parties: BTreeMap<PartyId, Party>,
    next_party_id: u32,
    day: Day,
}

impl Guild {
    pub fn new(config: GuildConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            roster: Roster::new(),
            parties: BTreeMap::new(),
            next_party_id: 0,
            day: 0,
        })
    }

    pub fn config(&self) -> &GuildConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn day(&self) -> Day {
        self.day
    }

    // === ADVENTURERS ===

    pub fn hire(&mut self, name: impl Into<String>, class: AdventurerClass) -> AdventurerId {
        self.roster.hire(name, class, &self.config.adventurer)
    }

    pub fn recruit<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        class: Option<AdventurerClass>,
        level: u32,
    ) -> AdventurerId {
        let id = self.roster.recruit(rng, &self.config.adventurer, class, level);
        if let Some(recruit) = self.roster.get(id) {
            tracing::info!(name = %recruit.name, class = recruit.class.name(), level = recruit.level, "recruited");
        }
        id
    }

    /// Equip an item and refresh the wearer's party. The item comes back
    /// as `Err` when the adventurer is unknown or cannot use it.
    pub fn equip(
        &mut self,
        adventurer: AdventurerId,
        item: EquipmentInstance,
    ) -> std::result::Result<Option<EquipmentInstance>, EquipmentInstance> {
        let Some(member) = self.roster.get_mut(adventurer) else {
            return Err(item);
        };
        let previous = member.equip(item)?;
        let party_id = member.party_id();
        self.refresh_party(party_id);
        Ok(previous)
    }

    /// Damage an adventurer outside of mission reporting
    pub fn wound(&mut self, adventurer: AdventurerId, amount: i32) -> i32 {
        let Some(member) = self.roster.get_mut(adventurer) else {
            return 0;
        };
        let taken = member.take_damage(amount, &self.config.adventurer);
        let party_id = member.party_id();
        self.refresh_party(party_id);
        taken
    }

    // === PARTIES ===

    pub fn create_party(&mut self, name: impl Into<String>) -> PartyId {
        self.next_party_id += 1;
        let id = PartyId(self.next_party_id);
        let party = Party::new(id, name, self.config.party.clone());
        tracing::debug!(party = %party.name, "party created");
        self.parties.insert(id, party);
        id
    }

    pub fn party(&self, id: PartyId) -> Option<&Party> {
        self.parties.get(&id)
    }

    /// Parties in id order
    pub fn parties(&self) -> impl Iterator<Item = &Party> {
        self.parties.values()
    }

    pub fn add_member(&mut self, party: PartyId, adventurer: AdventurerId) -> bool {
        match self.parties.get_mut(&party) {
            Some(p) => p.add_member(&mut self.roster, adventurer),
            None => false,
        }
    }

    /// Refused while the adventurer is away with the party
    pub fn remove_member(&mut self, party: PartyId, adventurer: AdventurerId) -> bool {
        match self.parties.get_mut(&party) {
            Some(p) => p.remove_member(&mut self.roster, adventurer),
            None => false,
        }
    }

    pub fn set_leader(&mut self, party: PartyId, adventurer: AdventurerId) -> bool {
        match self.parties.get_mut(&party) {
            Some(p) => p.set_leader(&self.roster, adventurer),
            None => false,
        }
    }

    pub fn set_formation(&mut self, party: PartyId, formation: Formation) -> bool {
        match self.parties.get_mut(&party) {
            Some(p) => p.set_formation(&self.roster, formation),
            None => false,
        }
    }

    pub fn summary(&self, party: PartyId) -> Option<PartySummary> {
        self.parties.get(&party).map(|p| p.summary(&self.roster))
    }

    /// Send a party out. Refused for an empty party or if any member is
    /// unavailable; nobody leaves in that case.
    pub fn dispatch(&mut self, party: PartyId) -> bool {
        let Some(p) = self.parties.get(&party) else {
            return false;
        };
        if p.is_empty() {
            return false;
        }
        let ready = p
            .members()
            .iter()
            .all(|id| self.roster.get(*id).is_some_and(|a| a.is_available()));
        if !ready {
            tracing::debug!(party = %p.name, "dispatch refused, members unavailable");
            return false;
        }

        for id in p.members() {
            if let Some(member) = self.roster.get_mut(*id) {
                member.begin_mission();
            }
        }
        tracing::info!(party = %p.name, combat_power = p.combat_power(), "party dispatched");
        true
    }

    /// Report a mission result. Damage is applied to members first, then
    /// each member returns with experience and loyalty changes, and finally
    /// the party records the outcome. Refused unless the party is away.
    pub fn on_mission_completed(&mut self, party: PartyId, success: bool, damage: &[(AdventurerId, i32)]) -> bool {
        let Some(p) = self.parties.get_mut(&party) else {
            return false;
        };
        if !p.is_away(&self.roster) {
            tracing::debug!(party = %p.name, "mission report refused, party not dispatched");
            return false;
        }

        let config = &self.config.adventurer;
        for (id, amount) in damage {
            if !p.contains(*id) {
                continue;
            }
            if let Some(member) = self.roster.get_mut(*id) {
                member.take_damage(*amount, config);
            }
        }
        for id in p.members() {
            if let Some(member) = self.roster.get_mut(*id) {
                let levels = member.finish_mission(success, config);
                if levels > 0 {
                    tracing::debug!(adventurer = %member.name, levels, "levelled on mission");
                }
            }
        }

        p.complete_mission(&self.roster, success);
        true
    }

    /// Advance one day: idle adventurers rest and every party refreshes
    pub fn on_new_day(&mut self) {
        self.day += 1;
        let config = &self.config.adventurer;
        for id in self.roster.ids() {
            if let Some(adventurer) = self.roster.get_mut(id) {
                adventurer.rest_day(config);
            }
        }
        for party in self.parties.values_mut() {
            party.recalculate(&self.roster);
        }
        tracing::debug!(day = self.day, "new day");
    }

    /// Dissolve a party, releasing its members. False if it does not exist
    /// or any member is still away.
    pub fn disband(&mut self, party: PartyId) -> bool {
        let Some(p) = self.parties.get_mut(&party) else {
            return false;
        };
        let Some(released) = p.disband(&mut self.roster) else {
            return false;
        };
        tracing::info!(party = %p.name, released = released.len(), "party disbanded");
        self.parties.remove(&party);
        true
    }

    fn refresh_party(&mut self, party: Option<PartyId>) {
        if let Some(p) = party.and_then(|id| self.parties.get_mut(&id)) {
            p.recalculate(&self.roster);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guild() -> Guild {
        Guild::new(GuildConfig::default()).unwrap()
    }

    fn staffed() -> (Guild, PartyId, Vec<AdventurerId>) {
        let mut g = guild();
        let ids = vec![
            g.hire("Brom", AdventurerClass::Warrior),
            g.hire("Ilse", AdventurerClass::Cleric),
            g.hire("Vask", AdventurerClass::Mage),
        ];
        let party = g.create_party("Vanguard");
        for id in &ids {
            assert!(g.add_member(party, *id));
        }
        (g, party, ids)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GuildConfig::default();
        config.party.max_size = 0;
        assert!(Guild::new(config).is_err());
    }

    #[test]
    fn test_unknown_party_operations_fail() {
        let mut g = guild();
        let a = g.hire("Solo", AdventurerClass::Rogue);
        assert!(!g.add_member(PartyId(42), a));
        assert!(!g.dispatch(PartyId(42)));
        assert!(!g.on_mission_completed(PartyId(42), true, &[]));
        assert!(!g.disband(PartyId(42)));
        assert!(g.summary(PartyId(42)).is_none());
    }

    #[test]
    fn test_dispatch_marks_members_away() {
        let (mut g, party, ids) = staffed();
        assert!(g.dispatch(party));
        assert!(ids.iter().all(|id| g.roster().get(*id).unwrap().on_mission()));
        // already away
        assert!(!g.dispatch(party));
    }

    #[test]
    fn test_empty_party_cannot_dispatch() {
        let mut g = guild();
        let party = g.create_party("Ghosts");
        assert!(!g.dispatch(party));
    }

    #[test]
    fn test_mission_completion_round_trip() {
        let (mut g, party, ids) = staffed();
        g.dispatch(party);
        assert!(g.on_mission_completed(party, true, &[(ids[0], 30)]));

        let p = g.party(party).unwrap();
        assert_eq!(p.missions_completed(), 1);
        assert_eq!(p.success_rate(), 1.0);

        let brom = g.roster().get(ids[0]).unwrap();
        assert!(!brom.on_mission());
        assert_eq!(brom.missions_completed, 1);
        assert!(brom.current_health() < brom.max_health());
        // 100 xp at level 1 is exactly one level
        assert_eq!(brom.level, 2);
    }

    #[test]
    fn test_damage_to_non_members_ignored() {
        let (mut g, party, _) = staffed();
        let outsider = g.hire("Outsider", AdventurerClass::Ranger);
        g.dispatch(party);
        g.on_mission_completed(party, false, &[(outsider, 50)]);
        let o = g.roster().get(outsider).unwrap();
        assert_eq!(o.current_health(), o.max_health());
    }

    #[test]
    fn test_mission_report_requires_dispatch() {
        let (mut g, party, ids) = staffed();
        assert!(!g.on_mission_completed(party, true, &[]));
        assert_eq!(g.party(party).unwrap().missions_completed(), 0);
        let brom = g.roster().get(ids[0]).unwrap();
        assert_eq!(brom.level, 1);
        assert_eq!(brom.missions_completed, 0);

        g.dispatch(party);
        assert!(g.on_mission_completed(party, true, &[]));
        // members are home again
        assert!(!g.on_mission_completed(party, true, &[]));
    }

    #[test]
    fn test_members_stay_while_away() {
        let (mut g, party, ids) = staffed();
        g.dispatch(party);

        assert!(!g.remove_member(party, ids[1]));
        assert!(!g.disband(party));
        assert!(g.party(party).unwrap().contains(ids[1]));

        g.on_mission_completed(party, false, &[]);
        assert!(g.remove_member(party, ids[1]));
        let ilse = g.roster().get(ids[1]).unwrap();
        assert!(!ilse.on_mission());
        assert_eq!(ilse.missions_failed, 1);

        let next = g.create_party("Second");
        assert!(g.add_member(next, ids[1]));
        assert!(g.disband(party));
    }

    #[test]
    fn test_new_day_heals_and_advances() {
        let (mut g, party, ids) = staffed();
        g.wound(ids[1], 40);
        let before = g.roster().get(ids[1]).unwrap().current_health();
        let health_before = g.party(party).unwrap().overall_health();

        g.on_new_day();
        assert_eq!(g.day(), 1);
        assert!(g.roster().get(ids[1]).unwrap().current_health() > before);
        assert!(g.party(party).unwrap().overall_health() > health_before);
    }

    #[test]
    fn test_disband_frees_members() {
        let (mut g, party, ids) = staffed();
        assert!(g.disband(party));
        assert!(g.party(party).is_none());
        assert!(ids.iter().all(|id| g.roster().get(*id).unwrap().party_id().is_none()));

        let next = g.create_party("Reformed");
        assert!(g.add_member(next, ids[0]));
    }

    #[test]
    fn test_equip_refreshes_party_power() {
        use crate::core::types::ItemId;
        use crate::equipment::{EquipmentSlot, Rarity, StatBonuses, StatKey};

        let (mut g, party, ids) = staffed();
        let before = g.party(party).unwrap().combat_power();
        let mut bonuses = StatBonuses::new();
        bonuses.insert(StatKey::Strength, 5);
        let item = EquipmentInstance {
            id: ItemId(1),
            template_id: "longsword".into(),
            name: "Longsword".into(),
            slot: EquipmentSlot::Weapon,
            rarity: Rarity::Rare,
            level: 1,
            base_stats: bonuses.clone(),
            stat_bonuses: bonuses,
            affixes: Vec::new(),
            class_requirement: None,
        };

        assert_eq!(g.equip(ids[0], item), Ok(None));
        assert!(g.party(party).unwrap().combat_power() > before);
    }
}
