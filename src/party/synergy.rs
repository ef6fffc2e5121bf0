//! Synergy evaluation
//!
//! Synergies are pure functions of roster composition and formation. Every
//! rule is checked independently and any subset may fire; the aggregator
//! sums the bonus maps of all that do. Results are rebuilt from scratch on
//! each call.

use serde::{Deserialize, Serialize};

use crate::adventurer::{Adventurer, AdventurerClass};
use crate::equipment::{BonusMap, StatKey};
use crate::party::Formation;

/// An active bonus condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synergy {
    pub name: String,
    pub description: String,
    pub bonuses: BonusMap,
}

/// When a rule fires
#[derive(Debug, Clone, Copy)]
enum Condition {
    /// At least one member of each class
    ClassPair(AdventurerClass, AdventurerClass),
    /// At least `min` members of one class
    ClassCount { class: AdventurerClass, min: usize },
    /// At least this many distinct classes
    DistinctClasses(usize),
    /// Formation is active and at least `min` members pass `filter`
    Formation {
        formation: Formation,
        filter: ClassFilter,
        min: usize,
    },
}

/// Which members count towards a formation rule
#[derive(Debug, Clone, Copy)]
enum ClassFilter {
    DamageDealers,
    Among(&'static [AdventurerClass]),
}

impl ClassFilter {
    fn matches(&self, class: AdventurerClass) -> bool {
        match self {
            ClassFilter::DamageDealers => class.is_damage_dealer(),
            ClassFilter::Among(classes) => classes.contains(&class),
        }
    }
}

struct SynergyRule {
    name: &'static str,
    description: &'static str,
    condition: Condition,
    bonuses: &'static [(StatKey, f32)],
}

const SYNERGY_RULES: &[SynergyRule] = &[
    SynergyRule {
        name: "Tank & Heal",
        description: "A warrior holds the line while a cleric keeps them standing",
        condition: Condition::ClassPair(AdventurerClass::Warrior, AdventurerClass::Cleric),
        bonuses: &[(StatKey::Defense, 15.0), (StatKey::HealthRegen, 10.0)],
    },
    SynergyRule {
        name: "Arcane Focus",
        description: "Multiple mages amplify each other's spells",
        condition: Condition::ClassCount { class: AdventurerClass::Mage, min: 2 },
        bonuses: &[(StatKey::MagicDamage, 25.0), (StatKey::ManaRegen, 15.0)],
    },
    SynergyRule {
        name: "Shadow Strike",
        description: "Rogues coordinate ambushes from the shadows",
        condition: Condition::ClassCount { class: AdventurerClass::Rogue, min: 2 },
        bonuses: &[(StatKey::CriticalChance, 20.0), (StatKey::Initiative, 15.0)],
    },
    SynergyRule {
        name: "Perfect Balance",
        description: "A diverse party covers every weakness",
        condition: Condition::DistinctClasses(4),
        bonuses: &[(StatKey::AllStats, 10.0)],
    },
    SynergyRule {
        name: "All-Out Attack",
        description: "Damage dealers press the offensive together",
        condition: Condition::Formation {
            formation: Formation::Offensive,
            filter: ClassFilter::DamageDealers,
            min: 3,
        },
        bonuses: &[(StatKey::Damage, 25.0), (StatKey::Initiative, 10.0)],
    },
    SynergyRule {
        name: "Fortress",
        description: "Shields locked, wounds tended",
        condition: Condition::Formation {
            formation: Formation::Defensive,
            filter: ClassFilter::Among(&[AdventurerClass::Warrior, AdventurerClass::Cleric]),
            min: 2,
        },
        bonuses: &[(StatKey::Defense, 30.0), (StatKey::HealthRegen, 5.0)],
    },
    SynergyRule {
        name: "Magical Circle",
        description: "Casters channel power through a shared ward",
        condition: Condition::Formation {
            formation: Formation::Magic,
            filter: ClassFilter::Among(&[AdventurerClass::Mage, AdventurerClass::Cleric]),
            min: 3,
        },
        bonuses: &[(StatKey::MagicDamage, 20.0), (StatKey::ManaRegen, 20.0)],
    },
];

impl Condition {
    fn holds(&self, classes: &[AdventurerClass], formation: Formation) -> bool {
        let count = |class: AdventurerClass| classes.iter().filter(|c| **c == class).count();
        match *self {
            Condition::ClassPair(a, b) => count(a) >= 1 && count(b) >= 1,
            Condition::ClassCount { class, min } => count(class) >= min,
            Condition::DistinctClasses(min) => distinct_classes(classes) >= min,
            Condition::Formation { formation: required, filter, min } => {
                formation == required && classes.iter().filter(|c| filter.matches(**c)).count() >= min
            }
        }
    }
}

/// Number of distinct classes in a class list
pub fn distinct_classes(classes: &[AdventurerClass]) -> usize {
    let mut seen: Vec<AdventurerClass> = Vec::with_capacity(classes.len());
    for class in classes {
        if !seen.contains(class) {
            seen.push(*class);
        }
    }
    seen.len()
}

/// Synergies active for a class list under a formation. Fewer than two
/// members never have synergies.
pub fn evaluate_classes(classes: &[AdventurerClass], formation: Formation) -> Vec<Synergy> {
    if classes.len() < 2 {
        return Vec::new();
    }

    SYNERGY_RULES
        .iter()
        .filter(|rule| rule.condition.holds(classes, formation))
        .map(|rule| Synergy {
            name: rule.name.to_string(),
            description: rule.description.to_string(),
            bonuses: rule.bonuses.iter().copied().collect(),
        })
        .collect()
}

/// Synergies active for a set of members under a formation
pub fn evaluate_synergies(members: &[&Adventurer], formation: Formation) -> Vec<Synergy> {
    let classes: Vec<AdventurerClass> = members.iter().map(|m| m.class).collect();
    evaluate_classes(&classes, formation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use AdventurerClass::*;

    fn names(synergies: &[Synergy]) -> Vec<&str> {
        synergies.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_single_member_has_no_synergies() {
        assert!(evaluate_classes(&[Warrior], Formation::Offensive).is_empty());
        assert!(evaluate_classes(&[], Formation::Balanced).is_empty());
    }

    #[test]
    fn test_tank_and_heal() {
        let synergies = evaluate_classes(&[Warrior, Cleric], Formation::Balanced);
        assert_eq!(names(&synergies), vec!["Tank & Heal"]);
        assert_eq!(synergies[0].bonuses.get(&StatKey::Defense), Some(&15.0));
        assert_eq!(synergies[0].bonuses.get(&StatKey::HealthRegen), Some(&10.0));
    }

    #[test]
    fn test_class_counts() {
        assert_eq!(names(&evaluate_classes(&[Mage, Mage], Formation::Balanced)), vec!["Arcane Focus"]);
        assert_eq!(names(&evaluate_classes(&[Rogue, Rogue], Formation::Balanced)), vec!["Shadow Strike"]);
        assert!(evaluate_classes(&[Mage, Rogue], Formation::Balanced).is_empty());
    }

    #[test]
    fn test_perfect_balance_needs_four_classes() {
        let three = evaluate_classes(&[Mage, Rogue, Ranger], Formation::Balanced);
        assert!(!names(&three).contains(&"Perfect Balance"));

        let four = evaluate_classes(&[Mage, Rogue, Ranger, Paladin], Formation::Balanced);
        assert_eq!(names(&four), vec!["Perfect Balance"]);
    }

    #[test]
    fn test_formation_rules_only_in_matching_formation() {
        let attackers = [Warrior, Mage, Ranger];
        assert!(evaluate_classes(&attackers, Formation::Balanced).is_empty());
        assert_eq!(names(&evaluate_classes(&attackers, Formation::Offensive)), vec!["All-Out Attack"]);
        assert!(evaluate_classes(&attackers, Formation::Magic).is_empty());
    }

    #[test]
    fn test_all_out_attack_ignores_support_classes() {
        let support = [Warrior, Mage, Cleric, Paladin];
        assert!(!names(&evaluate_classes(&support, Formation::Offensive)).contains(&"All-Out Attack"));

        let strikers = [Rogue, Ranger, Mage, Cleric];
        assert!(names(&evaluate_classes(&strikers, Formation::Offensive)).contains(&"All-Out Attack"));
    }

    #[test]
    fn test_fortress() {
        let synergies = evaluate_classes(&[Warrior, Warrior], Formation::Defensive);
        assert_eq!(names(&synergies), vec!["Fortress"]);
    }

    #[test]
    fn test_magical_circle_counts_clerics() {
        let synergies = evaluate_classes(&[Mage, Cleric, Cleric], Formation::Magic);
        assert_eq!(names(&synergies), vec!["Magical Circle"]);
    }

    #[test]
    fn test_rules_stack_independently() {
        let synergies = evaluate_classes(&[Warrior, Warrior, Cleric, Mage, Mage, Rogue], Formation::Defensive);
        assert_eq!(
            names(&synergies),
            vec!["Tank & Heal", "Arcane Focus", "Perfect Balance", "Fortress"]
        );
    }

    #[test]
    fn test_distinct_classes() {
        assert_eq!(distinct_classes(&[]), 0);
        assert_eq!(distinct_classes(&[Mage, Mage, Cleric]), 2);
    }
}
