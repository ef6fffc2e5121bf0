//! Party roster management
//!
//! A party stores member ids only; the adventurers themselves live in the
//! guild's [`Roster`], which every mutating operation takes explicitly.
//! Refusals are signalled by a `false` return and leave the party untouched.

use serde::{Deserialize, Serialize};

use crate::adventurer::{Adventurer, Roster};
use crate::core::config::PartyConfig;
use crate::core::types::{AdventurerId, PartyId};
use crate::party::aggregate::{self, CombinedBonusSet, MissionHistory, PartyStats};
use crate::party::synergy::{evaluate_synergies, Synergy};
use crate::party::Formation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    id: PartyId,
    pub name: String,
    /// Insertion order, unique
    members: Vec<AdventurerId>,
    leader: Option<AdventurerId>,
    formation: Formation,
    pub(crate) cohesion: f32,
    pub(crate) morale: f32,
    /// Mission count, success rate and the mission offsets on the scores
    pub(crate) history: MissionHistory,
    synergies: Vec<Synergy>,
    stats: PartyStats,
    config: PartyConfig,
}

impl Party {
    pub fn new(id: PartyId, name: impl Into<String>, config: PartyConfig) -> Self {
        let mut party = Self {
            id,
            name: name.into(),
            members: Vec::new(),
            leader: None,
            formation: Formation::default(),
            cohesion: 0.0,
            morale: 0.0,
            history: MissionHistory::default(),
            synergies: Vec::new(),
            stats: PartyStats::default(),
            config,
        };
        party.recalculate(&Roster::new());
        party
    }

    // === ACCESSORS ===

    pub fn id(&self) -> PartyId {
        self.id
    }

    pub fn members(&self) -> &[AdventurerId] {
        &self.members
    }

    pub fn contains(&self, id: AdventurerId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.config.max_size
    }

    pub fn leader(&self) -> Option<AdventurerId> {
        self.leader
    }

    pub fn formation(&self) -> Formation {
        self.formation
    }

    pub fn cohesion(&self) -> f32 {
        self.cohesion
    }

    pub fn morale(&self) -> f32 {
        self.morale
    }

    pub fn missions_completed(&self) -> u32 {
        self.history.missions_completed
    }

    pub fn success_rate(&self) -> f32 {
        self.history.success_rate
    }

    pub fn synergies(&self) -> &[Synergy] {
        &self.synergies
    }

    pub fn stats(&self) -> &PartyStats {
        &self.stats
    }

    pub fn combined_bonuses(&self) -> &CombinedBonusSet {
        &self.stats.combined_bonuses
    }

    pub fn combat_power(&self) -> f32 {
        self.stats.combat_power
    }

    pub fn overall_health(&self) -> f32 {
        self.stats.overall_health
    }

    pub fn config(&self) -> &PartyConfig {
        &self.config
    }

    // === ROSTER OPERATIONS ===

    /// Add an adventurer. Refused for unknown ids, existing members, a full
    /// party, or an adventurer who is unavailable or already in a party.
    /// The first member of a leaderless party becomes its leader.
    pub fn add_member(&mut self, roster: &mut Roster, id: AdventurerId) -> bool {
        if self.contains(id) || self.is_full() {
            return false;
        }
        let Some(adventurer) = roster.get_mut(id) else {
            return false;
        };
        if !adventurer.is_available() || adventurer.party_id().is_some() {
            return false;
        }

        adventurer.set_party(Some(self.id));
        self.members.push(id);
        if self.leader.is_none() {
            self.leader = Some(id);
        }
        self.recalculate(roster);

        tracing::debug!(party = %self.name, adventurer = ?id, size = self.members.len(), "member added");
        true
    }

    /// Remove a member. A departing leader is replaced by the remaining
    /// member with the highest charisma plus level.
    pub fn remove_member(&mut self, roster: &mut Roster, id: AdventurerId) -> bool {
        let Some(index) = self.members.iter().position(|m| *m == id) else {
            return false;
        };
        if roster.get(id).is_some_and(|a| a.on_mission()) {
            return false;
        }

        self.members.remove(index);
        if let Some(adventurer) = roster.get_mut(id) {
            adventurer.set_party(None);
        }
        if self.leader == Some(id) {
            self.leader = best_leader(&roster.resolve(&self.members));
            tracing::debug!(party = %self.name, leader = ?self.leader, "leader reassigned");
        }
        self.recalculate(roster);

        tracing::debug!(party = %self.name, adventurer = ?id, size = self.members.len(), "member removed");
        true
    }

    /// Make a member the leader. Synergies do not depend on leadership so
    /// only the stats are recomputed.
    pub fn set_leader(&mut self, roster: &Roster, id: AdventurerId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.leader = Some(id);
        self.recalculate_stats(roster);
        true
    }

    pub fn set_formation(&mut self, roster: &Roster, formation: Formation) -> bool {
        self.formation = formation;
        self.recalculate(roster);
        tracing::debug!(party = %self.name, ?formation, synergies = self.synergies.len(), "formation changed");
        true
    }

    /// Release every member, leaving an empty leaderless party.
    /// Returns the released ids, or `None` while the party is away.
    pub fn disband(&mut self, roster: &mut Roster) -> Option<Vec<AdventurerId>> {
        if self.is_away(roster) {
            return None;
        }
        let released = std::mem::take(&mut self.members);
        for id in &released {
            if let Some(adventurer) = roster.get_mut(*id) {
                adventurer.set_party(None);
            }
        }
        self.leader = None;
        self.recalculate(roster);
        Some(released)
    }

    /// Any member currently out on a mission
    pub fn is_away(&self, roster: &Roster) -> bool {
        self.members
            .iter()
            .any(|id| roster.get(*id).is_some_and(|a| a.on_mission()))
    }

    // === RECOMPUTATION ===

    /// Rebuild synergies and every stat. Cohesion and morale come from
    /// their formulas plus the accumulated mission offsets, so a rebuild
    /// with unchanged inputs reproduces the stored scores.
    pub fn recalculate(&mut self, roster: &Roster) {
        let members = roster.resolve(&self.members);
        self.synergies = evaluate_synergies(&members, self.formation);
        self.recalculate_stats(roster);
    }

    fn recalculate_stats(&mut self, roster: &Roster) {
        let members = roster.resolve(&self.members);
        let leader = self.leader.and_then(|id| roster.get(id));
        self.stats = aggregate::aggregate(&members, leader, &self.synergies, self.history, &self.config);
        self.cohesion = self.stats.cohesion;
        self.morale = self.stats.morale;
    }

    /// Rebuild synergies and derived stats around the stored cohesion and
    /// morale
    pub(crate) fn refresh_derived(&mut self, roster: &Roster) {
        let members = roster.resolve(&self.members);
        self.synergies = evaluate_synergies(&members, self.formation);
        self.stats = aggregate::derive_stats(&members, &self.synergies, self.cohesion, self.morale, &self.config);
        self.cohesion = self.stats.cohesion;
        self.morale = self.stats.morale;
    }

    /// Fold the stored scores into the mission offsets so that later
    /// rebuilds keep them
    pub(crate) fn anchor_offsets(&mut self, roster: &Roster) {
        let members = roster.resolve(&self.members);
        let leader = self.leader.and_then(|id| roster.get(id));
        let cohesion = aggregate::cohesion_formula(&members, leader, self.history.missions_completed, &self.config);
        let morale = aggregate::morale_formula(&members, self.history.success_rate, &self.config);
        self.history.cohesion_offset = self.cohesion - cohesion;
        self.history.morale_offset = self.morale - morale;
    }
}

/// Highest charisma plus level; the earliest member wins ties
fn best_leader(members: &[&Adventurer]) -> Option<AdventurerId> {
    let mut best: Option<(&Adventurer, i64)> = None;
    for member in members {
        let score = member.charisma() as i64 + member.level as i64;
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((member, score));
        }
    }
    best.map(|(m, _)| m.id)
}
