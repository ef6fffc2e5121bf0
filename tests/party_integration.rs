//! Integration tests for party composition and mission feedback
//!
//! These tests drive a party through the roster the way the host game does:
//! - Building a party and reading its synergies and derived stats
//! - Mission outcomes feeding back into cohesion, morale and success rate
//! - Recalculation being a pure function of party state

use guild_hall::adventurer::{AdventurerClass, Roster};
use guild_hall::core::config::{AdventurerConfig, PartyConfig};
use guild_hall::core::types::{AdventurerId, PartyId};
use guild_hall::equipment::StatKey;
use guild_hall::party::aggregate::raw_bonus_sum;
use guild_hall::party::{Formation, Party};

fn hire_all(roster: &mut Roster, classes: &[AdventurerClass]) -> Vec<AdventurerId> {
    let config = AdventurerConfig::default();
    classes
        .iter()
        .enumerate()
        .map(|(i, class)| roster.hire(format!("Hero {}", i + 1), *class, &config))
        .collect()
}

fn party_of(roster: &mut Roster, classes: &[AdventurerClass]) -> (Party, Vec<AdventurerId>) {
    let ids = hire_all(roster, classes);
    let mut party = Party::new(PartyId(1), "Company", PartyConfig::default());
    for id in &ids {
        assert!(party.add_member(roster, *id));
    }
    (party, ids)
}

// ============================================================================
// Composition
// ============================================================================

/// Two warriors, a cleric and a mage with the first warrior leading
#[test]
fn test_mixed_party_cohesion_and_synergy() {
    let mut roster = Roster::new();
    let (party, ids) = party_of(
        &mut roster,
        &[
            AdventurerClass::Warrior,
            AdventurerClass::Warrior,
            AdventurerClass::Cleric,
            AdventurerClass::Mage,
        ],
    );

    assert_eq!(party.leader(), Some(ids[0]));
    let names: Vec<&str> = party.synergies().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Tank & Heal"]);

    let leader = roster.get(ids[0]).unwrap();
    let expected = (50.0 + 20.0 + leader.charisma() as f32 * 2.0).clamp(0.0, 100.0);
    assert_eq!(party.cohesion(), expected);
}

/// Every combined bonus is its raw synergy sum scaled by cohesion and morale
#[test]
fn test_combined_bonuses_exact() {
    let mut roster = Roster::new();
    let (mut party, _) = party_of(
        &mut roster,
        &[
            AdventurerClass::Warrior,
            AdventurerClass::Cleric,
            AdventurerClass::Mage,
            AdventurerClass::Mage,
            AdventurerClass::Rogue,
        ],
    );
    party.set_formation(&roster, Formation::Magic);

    let raw = raw_bonus_sum(party.synergies());
    assert!(raw.len() >= 4);
    let cohesion_mod = (party.cohesion() - 50.0) / 100.0;
    let morale_mod = (party.morale() - 50.0) / 100.0;
    let scale = 1.0 + cohesion_mod * 0.2 + morale_mod * 0.15;

    for (key, value) in &raw {
        let combined = party.combined_bonuses().get(*key);
        assert!((combined - value * scale).abs() < 1e-4, "{:?}: {} vs {}", key, combined, value * scale);
    }
    assert_eq!(party.combined_bonuses().len(), raw.len());
}

/// Overlapping synergies sum their shared keys before scaling
#[test]
fn test_overlapping_synergies_sum() {
    let mut roster = Roster::new();
    let (mut party, _) = party_of(&mut roster, &[AdventurerClass::Warrior, AdventurerClass::Cleric]);
    party.set_formation(&roster, Formation::Defensive);

    let raw = raw_bonus_sum(party.synergies());
    // Tank & Heal 15 plus Fortress 30
    assert_eq!(raw.get(&StatKey::Defense), Some(&45.0));
}

/// Recalculating with no intervening change yields identical stats
#[test]
fn test_recalculation_is_idempotent() {
    let mut roster = Roster::new();
    let (mut party, _) = party_of(
        &mut roster,
        &[AdventurerClass::Rogue, AdventurerClass::Rogue, AdventurerClass::Ranger],
    );
    party.set_formation(&roster, Formation::Offensive);

    party.recalculate(&roster);
    let first = (party.stats().clone(), party.synergies().to_vec());
    party.recalculate(&roster);
    assert_eq!(party.stats(), &first.0);
    assert_eq!(party.synergies(), first.1.as_slice());
}

/// Setting the same formation twice matches setting it once
#[test]
fn test_repeated_formation_is_idempotent() {
    let mut roster = Roster::new();
    let (mut party, _) = party_of(
        &mut roster,
        &[AdventurerClass::Mage, AdventurerClass::Cleric, AdventurerClass::Mage],
    );

    party.set_formation(&roster, Formation::Magic);
    let once = (party.stats().clone(), party.synergies().to_vec());
    party.set_formation(&roster, Formation::Magic);
    assert_eq!(party.stats(), &once.0);
    assert_eq!(party.synergies(), once.1.as_slice());
}

/// A leader change moves cohesion but never the synergy list
#[test]
fn test_leader_change_moves_cohesion_only() {
    let mut roster = Roster::new();
    let (mut party, ids) = party_of(&mut roster, &[AdventurerClass::Warrior, AdventurerClass::Paladin]);
    roster.get_mut(ids[1]).unwrap().stats.charisma = 20;
    let synergies = party.synergies().to_vec();
    let before = party.cohesion();

    assert!(party.set_leader(&roster, ids[1]));
    assert!(party.cohesion() > before);
    assert_eq!(party.synergies(), synergies.as_slice());
}

/// Removing the leader hands leadership to the best remaining member
#[test]
fn test_leader_reassignment_on_removal() {
    let mut roster = Roster::new();
    let (mut party, ids) = party_of(
        &mut roster,
        &[AdventurerClass::Warrior, AdventurerClass::Rogue, AdventurerClass::Paladin],
    );
    // Paladin base charisma outranks the rogue's
    assert!(party.remove_member(&mut roster, ids[0]));
    let rogue = roster.get(ids[1]).unwrap();
    let paladin = roster.get(ids[2]).unwrap();
    let expected = if paladin.charisma() as i64 + paladin.level as i64 > rogue.charisma() as i64 + rogue.level as i64 {
        ids[2]
    } else {
        ids[1]
    };
    assert_eq!(party.leader(), Some(expected));
}

/// A seventh adventurer and a repeated add are both refused without side effects
#[test]
fn test_full_and_duplicate_adds_refused() {
    let mut roster = Roster::new();
    let (mut party, ids) = party_of(&mut roster, &[AdventurerClass::Mage; 6]);
    let extra = hire_all(&mut roster, &[AdventurerClass::Cleric])[0];
    let before = party.stats().clone();

    assert!(!party.add_member(&mut roster, extra));
    assert!(!party.add_member(&mut roster, ids[2]));
    assert_eq!(party.len(), 6);
    assert_eq!(party.stats(), &before);
    assert_eq!(roster.get(extra).unwrap().party_id(), None);
}

// ============================================================================
// Mission feedback
// ============================================================================

/// First mission succeeds: history starts and scores rise
#[test]
fn test_first_mission_success() {
    let mut roster = Roster::new();
    let (mut party, _) = party_of(&mut roster, &[AdventurerClass::Warrior, AdventurerClass::Mage]);
    let (cohesion, morale) = (party.cohesion(), party.morale());

    party.complete_mission(&roster, true);
    assert_eq!(party.missions_completed(), 1);
    assert_eq!(party.success_rate(), 1.0);
    assert_eq!(party.cohesion(), (cohesion + 2.0).min(100.0));
    assert_eq!(party.morale(), (morale + 3.0).min(100.0));
}

/// A failure after one success halves the rate and costs morale
#[test]
fn test_failure_after_success() {
    let mut roster = Roster::new();
    let (mut party, _) = party_of(&mut roster, &[AdventurerClass::Warrior, AdventurerClass::Mage]);
    party.complete_mission(&roster, true);
    let morale = party.morale();

    party.complete_mission(&roster, false);
    assert_eq!(party.missions_completed(), 2);
    assert_eq!(party.success_rate(), 0.5);
    assert_eq!(party.morale(), (morale - 5.0).max(0.0));
}

/// Roster edits after a mission keep the mission's cohesion and morale adjustments
#[test]
fn test_mission_adjustments_survive_roster_edits() {
    let mut roster = Roster::new();
    let (mut party, ids) = party_of(
        &mut roster,
        &[AdventurerClass::Warrior, AdventurerClass::Cleric, AdventurerClass::Mage],
    );
    party.complete_mission(&roster, true);
    party.complete_mission(&roster, false);
    let morale = party.morale();

    // A new leader moves cohesion by the charisma difference only
    let cohesion = party.cohesion();
    let old_leader = roster.get(ids[0]).unwrap().charisma();
    let new_leader = roster.get(ids[1]).unwrap().charisma();
    assert!(party.set_leader(&roster, ids[1]));
    assert!((party.morale() - morale).abs() < 1e-4);
    let expected = (cohesion + (new_leader - old_leader) as f32 * 2.0).clamp(0.0, 100.0);
    assert!((party.cohesion() - expected).abs() < 1e-4);

    assert!(party.set_formation(&roster, Formation::Defensive));
    assert!((party.morale() - morale).abs() < 1e-4);
}

/// Mission scores feed into combat power through the derived stats
#[test]
fn test_mission_outcomes_move_combat_power() {
    let mut roster = Roster::new();
    let (mut party, _) = party_of(&mut roster, &[AdventurerClass::Ranger, AdventurerClass::Cleric]);
    let before = party.combat_power();

    party.complete_mission(&roster, false);
    assert!(party.combat_power() < before);
}
