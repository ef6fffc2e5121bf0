//! Property tests for generation and party score bounds

use proptest::prelude::*;

use guild_hall::adventurer::AdventurerClass;
use guild_hall::core::config::GuildConfig;
use guild_hall::core::rng::SeededRandom;
use guild_hall::equipment::{EquipmentCatalog, EquipmentGenerator, EquipmentSlot, Rarity};
use guild_hall::guild::Guild;
use guild_hall::party::Formation;

fn rarity() -> impl Strategy<Value = Rarity> {
    (0..Rarity::all().len()).prop_map(|i| Rarity::all()[i])
}

fn slot() -> impl Strategy<Value = EquipmentSlot> {
    (0..EquipmentSlot::all().len()).prop_map(|i| EquipmentSlot::all()[i])
}

fn class() -> impl Strategy<Value = AdventurerClass> {
    (0..AdventurerClass::all().len()).prop_map(|i| AdventurerClass::all()[i])
}

#[derive(Debug, Clone)]
enum Op {
    Hire(AdventurerClass),
    Add(usize),
    Remove(usize),
    Lead(usize),
    Form(usize),
    Mission(bool),
    Wound(usize, i32),
    Rest,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        class().prop_map(Op::Hire),
        (0usize..12).prop_map(Op::Add),
        (0usize..12).prop_map(Op::Remove),
        (0usize..12).prop_map(Op::Lead),
        (0usize..6).prop_map(Op::Form),
        any::<bool>().prop_map(Op::Mission),
        ((0usize..12), (0i32..200)).prop_map(|(i, d)| Op::Wound(i, d)),
        Just(Op::Rest),
    ]
}

proptest! {
    #[test]
    fn generated_items_respect_rarity_budget(
        seed in any::<u64>(),
        rarity in rarity(),
        slot in slot(),
        level in 1u32..60,
        hint in proptest::option::of(class()),
    ) {
        let catalog = EquipmentCatalog::with_defaults();
        let mut rng = SeededRandom::new(seed);
        let mut generator = EquipmentGenerator::new(&catalog);
        let item = generator.generate(&mut rng, slot, rarity, level, hint).unwrap();

        let (min, max) = rarity.affix_range();
        let count = item.affixes.len() as u32;
        prop_assert!(count <= max.saturating_sub(1).max(min));
        prop_assert!(count >= min.min(catalog.affix_pool(rarity).len() as u32));

        let mut seen = item.affixes.clone();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), item.affixes.len());
    }

    #[test]
    fn party_scores_stay_in_bounds(ops in proptest::collection::vec(op(), 1..60)) {
        let mut guild = Guild::new(GuildConfig::default()).unwrap();
        let party = guild.create_party("Props");

        for op in ops {
            let ids = guild.roster().ids();
            let nth = |i: usize| ids.get(i % ids.len().max(1)).copied();
            match op {
                Op::Hire(class) => {
                    guild.hire("Prop", class);
                }
                Op::Add(i) => {
                    if let Some(id) = nth(i) {
                        guild.add_member(party, id);
                    }
                }
                Op::Remove(i) => {
                    if let Some(id) = nth(i) {
                        guild.remove_member(party, id);
                    }
                }
                Op::Lead(i) => {
                    if let Some(id) = nth(i) {
                        guild.set_leader(party, id);
                    }
                }
                Op::Form(i) => {
                    guild.set_formation(party, Formation::all()[i]);
                }
                Op::Mission(success) => {
                    if guild.dispatch(party) {
                        guild.on_mission_completed(party, success, &[]);
                    }
                }
                Op::Wound(i, amount) => {
                    if let Some(id) = nth(i) {
                        guild.wound(id, amount);
                    }
                }
                Op::Rest => guild.on_new_day(),
            }

            let p = guild.party(party).unwrap();
            prop_assert!((0.0..=100.0).contains(&p.cohesion()));
            prop_assert!((0.0..=100.0).contains(&p.morale()));
            prop_assert!((0.0..=1.0).contains(&p.success_rate()));
            prop_assert!(p.len() <= guild.config().party.max_size);
            if !p.is_empty() {
                prop_assert!(p.leader().is_some_and(|l| p.contains(l)));
            } else {
                prop_assert!(p.leader().is_none());
            }
        }
    }
}
