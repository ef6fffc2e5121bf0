//! Equipment catalog - item templates and affix definitions
//!
//! Templates are grouped by slot in registration order; the generator relies
//! on that order when resolving a class hint. Affixes are a flat list of
//! prefixes and suffixes, each gated by a minimum rarity.

use ahash::AHashMap;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::adventurer::AdventurerClass;
use crate::core::error::{GuildError, Result};
use crate::equipment::{EquipmentSlot, Rarity, StatBonuses, StatKey};

/// A base item archetype for one slot
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentTemplate {
    pub id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    /// Unscaled stat values, multiplied by rarity and level on generation
    pub base_stats: BTreeMap<StatKey, f64>,
    /// Classes this template is tailored for (used by class hints)
    pub preferred_classes: Vec<AdventurerClass>,
    /// Only this class may equip items built from the template
    pub class_requirement: Option<AdventurerClass>,
}

impl EquipmentTemplate {
    pub fn prefers(&self, class: AdventurerClass) -> bool {
        self.preferred_classes.contains(&class)
    }
}

/// A prefix or suffix modifier
#[derive(Debug, Clone, PartialEq)]
pub struct AffixDefinition {
    pub id: String,
    /// Display text: "Sharp" for a prefix, "of the Bear" for a suffix
    pub name: String,
    pub is_prefix: bool,
    /// Additive deltas, may be negative
    pub stats: StatBonuses,
    pub min_rarity: Rarity,
    /// Relative selection weight, always > 0
    pub weight: u32,
}

/// Registry of everything the generator can build
#[derive(Debug, Clone, Default)]
pub struct EquipmentCatalog {
    templates: AHashMap<EquipmentSlot, Vec<EquipmentTemplate>>,
    affixes: Vec<AffixDefinition>,
}

impl EquipmentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template at the end of its slot's list
    pub fn add_template(&mut self, template: EquipmentTemplate) {
        self.templates.entry(template.slot).or_default().push(template);
    }

    /// Register an affix. Rejects zero weights and duplicate ids.
    pub fn add_affix(&mut self, affix: AffixDefinition) -> Result<()> {
        if affix.weight == 0 {
            return Err(GuildError::InvalidCatalog(format!(
                "affix '{}' has zero selection weight",
                affix.id
            )));
        }
        if self.affix(&affix.id).is_some() {
            return Err(GuildError::InvalidCatalog(format!(
                "duplicate affix id '{}'",
                affix.id
            )));
        }
        self.affixes.push(affix);
        Ok(())
    }

    /// Templates for a slot, in registration order
    pub fn templates_for(&self, slot: EquipmentSlot) -> &[EquipmentTemplate] {
        self.templates.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn template(&self, id: &str) -> Option<&EquipmentTemplate> {
        self.templates.values().flatten().find(|t| t.id == id)
    }

    pub fn affixes(&self) -> &[AffixDefinition] {
        &self.affixes
    }

    pub fn affix(&self, id: &str) -> Option<&AffixDefinition> {
        self.affixes.iter().find(|a| a.id == id)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &AffixDefinition> {
        self.affixes.iter().filter(|a| a.is_prefix)
    }

    pub fn suffixes(&self) -> impl Iterator<Item = &AffixDefinition> {
        self.affixes.iter().filter(|a| !a.is_prefix)
    }

    /// Every affix a `rarity` item may roll, in catalog order
    pub fn affix_pool(&self, rarity: Rarity) -> Vec<&AffixDefinition> {
        self.affixes.iter().filter(|a| a.min_rarity <= rarity).collect()
    }

    /// Built-in item and affix tables
    pub fn with_defaults() -> Self {
        use AdventurerClass::*;
        use EquipmentSlot::*;
        use StatKey::*;

        let mut catalog = Self::new();

        let templates: &[(&str, &str, EquipmentSlot, &[(StatKey, f64)], &[AdventurerClass], Option<AdventurerClass>)] = &[
            // Weapons
            ("longsword", "Longsword", Weapon, &[(Damage, 9.0), (Strength, 3.0)], &[Warrior, Paladin], None),
            ("arcane_staff", "Arcane Staff", Weapon, &[(MagicDamage, 12.0), (Intelligence, 3.0), (Mana, 8.0)], &[Mage, Cleric], None),
            ("twin_daggers", "Twin Daggers", Weapon, &[(Damage, 7.0), (CriticalChance, 5.0), (Dexterity, 1.0)], &[Rogue], Some(Rogue)),
            ("hunting_bow", "Hunting Bow", Weapon, &[(Damage, 8.0), (Dexterity, 3.0), (Initiative, 1.0)], &[Ranger], None),
            // Armor
            ("plate_mail", "Plate Mail", Armor, &[(Defense, 12.0), (Constitution, 3.0), (Evasion, -1.0)], &[Warrior, Paladin], None),
            ("mage_robes", "Mage Robes", Armor, &[(Defense, 3.0), (Mana, 15.0), (Intelligence, 1.0)], &[Mage, Cleric], None),
            ("leather_jerkin", "Leather Jerkin", Armor, &[(Defense, 7.0), (Evasion, 4.0), (Dexterity, 1.0)], &[Rogue, Ranger], None),
            // Accessories
            ("signet_ring", "Signet Ring", Accessory, &[(Charisma, 3.0), (HealthRegen, 1.0)], &[Paladin, Cleric], None),
            ("focus_amulet", "Amulet of Focus", Accessory, &[(ManaRegen, 3.0), (Intelligence, 1.0)], &[Mage], None),
            ("lucky_charm", "Lucky Charm", Accessory, &[(CriticalChance, 4.0), (Initiative, 1.0)], &[Rogue, Ranger], None),
            // Helmets
            ("great_helm", "Great Helm", Helmet, &[(Defense, 5.0), (Health, 12.0)], &[Warrior, Paladin], None),
            ("circlet", "Circlet", Helmet, &[(Intelligence, 3.0), (Mana, 8.0)], &[Mage, Cleric], None),
            ("hood", "Hood", Helmet, &[(Evasion, 3.0), (Dexterity, 1.0)], &[Rogue, Ranger], None),
            // Boots
            ("iron_greaves", "Iron Greaves", Boots, &[(Defense, 4.0), (Constitution, 1.0)], &[Warrior, Paladin], None),
            ("soft_boots", "Soft Boots", Boots, &[(Initiative, 3.0), (Evasion, 1.0)], &[Rogue, Ranger, Mage], None),
            ("pilgrim_sandals", "Pilgrim Sandals", Boots, &[(HealthRegen, 1.0), (Charisma, 1.0)], &[Cleric], None),
        ];

        for (id, name, slot, stats, classes, requirement) in templates {
            catalog.add_template(EquipmentTemplate {
                id: (*id).into(),
                name: (*name).into(),
                slot: *slot,
                base_stats: stats.iter().copied().collect(),
                preferred_classes: classes.to_vec(),
                class_requirement: *requirement,
            });
        }

        let affixes: &[(&str, &str, bool, &[(StatKey, i32)], Rarity, u32)] = &[
            // Prefixes
            ("sharp", "Sharp", true, &[(Damage, 3)], Rarity::Uncommon, 30),
            ("sturdy", "Sturdy", true, &[(Defense, 3)], Rarity::Uncommon, 30),
            ("swift", "Swift", true, &[(Initiative, 2), (Evasion, 1)], Rarity::Uncommon, 25),
            ("mystic", "Mystic", true, &[(MagicDamage, 4), (Mana, 5)], Rarity::Rare, 20),
            ("brutal", "Brutal", true, &[(Damage, 6), (Defense, -2)], Rarity::Rare, 15),
            ("blessed", "Blessed", true, &[(HealthRegen, 3), (Charisma, 2)], Rarity::Epic, 10),
            ("heroic", "Heroic", true, &[(AllStats, 2)], Rarity::Legendary, 5),
            ("godforged", "Godforged", true, &[(AllStats, 4), (Damage, 8)], Rarity::Artifact, 2),
            // Suffixes
            ("of_the_bear", "of the Bear", false, &[(Strength, 2), (Constitution, 2)], Rarity::Uncommon, 30),
            ("of_the_fox", "of the Fox", false, &[(Dexterity, 3)], Rarity::Uncommon, 30),
            ("of_the_owl", "of the Owl", false, &[(Intelligence, 3)], Rarity::Uncommon, 30),
            ("of_vigor", "of Vigor", false, &[(Health, 15)], Rarity::Rare, 20),
            ("of_the_leech", "of the Leech", false, &[(HealthRegen, 2), (ManaRegen, -1)], Rarity::Rare, 15),
            ("of_precision", "of Precision", false, &[(CriticalChance, 6)], Rarity::Epic, 12),
            ("of_the_titan", "of the Titan", false, &[(Strength, 5), (Constitution, 5)], Rarity::Legendary, 6),
            ("of_eternity", "of Eternity", false, &[(AllStats, 3), (HealthRegen, 4)], Rarity::Artifact, 2),
        ];

        for (id, name, is_prefix, stats, min_rarity, weight) in affixes {
            catalog.affixes.push(AffixDefinition {
                id: (*id).into(),
                name: (*name).into(),
                is_prefix: *is_prefix,
                stats: stats.iter().copied().collect(),
                min_rarity: *min_rarity,
                weight: *weight,
            });
        }

        catalog
    }

    /// Load a catalog from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a catalog from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let data: TomlCatalog =
            toml::from_str(content).map_err(|e| GuildError::CatalogParse(e.to_string()))?;

        let mut catalog = Self::new();
        for template in data.templates {
            catalog.add_template(template.into_template()?);
        }
        for affix in data.affixes {
            catalog.add_affix(affix.into_affix()?)?;
        }
        Ok(catalog)
    }
}

/// TOML representation of a catalog file
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    templates: Vec<TomlTemplate>,
    #[serde(default)]
    affixes: Vec<TomlAffix>,
}

#[derive(Debug, Deserialize)]
struct TomlTemplate {
    id: String,
    name: String,
    slot: String,
    #[serde(default)]
    preferred_classes: Vec<String>,
    class_requirement: Option<String>,
    #[serde(default)]
    stats: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct TomlAffix {
    id: String,
    name: String,
    kind: String,
    min_rarity: String,
    weight: u32,
    #[serde(default)]
    stats: BTreeMap<String, i32>,
}

impl TomlTemplate {
    fn into_template(self) -> Result<EquipmentTemplate> {
        let slot = parse_named(EquipmentSlot::all(), &self.slot, "slot")?;
        let preferred_classes = self
            .preferred_classes
            .iter()
            .map(|c| parse_named(AdventurerClass::all(), c, "class"))
            .collect::<Result<Vec<_>>>()?;
        let class_requirement = self
            .class_requirement
            .as_deref()
            .map(|c| parse_named(AdventurerClass::all(), c, "class"))
            .transpose()?;
        let base_stats = self
            .stats
            .into_iter()
            .map(|(k, v)| Ok((parse_stat(&k)?, v)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(EquipmentTemplate {
            id: self.id,
            name: self.name,
            slot,
            base_stats,
            preferred_classes,
            class_requirement,
        })
    }
}

impl TomlAffix {
    fn into_affix(self) -> Result<AffixDefinition> {
        let is_prefix = match self.kind.to_lowercase().as_str() {
            "prefix" => true,
            "suffix" => false,
            _ => {
                return Err(GuildError::InvalidCatalog(format!(
                    "affix '{}' has unknown kind '{}'",
                    self.id, self.kind
                )))
            }
        };
        let min_rarity = parse_named(Rarity::all(), &self.min_rarity, "rarity")?;
        let stats = self
            .stats
            .into_iter()
            .map(|(k, v)| Ok((parse_stat(&k)?, v)))
            .collect::<Result<StatBonuses>>()?;

        Ok(AffixDefinition {
            id: self.id,
            name: self.name,
            is_prefix,
            stats,
            min_rarity,
            weight: self.weight,
        })
    }
}

/// Case-insensitive lookup of an enum variant by its Debug name
fn parse_named<T: std::fmt::Debug + Copy>(all: &[T], raw: &str, what: &str) -> Result<T> {
    let wanted = raw.to_lowercase();
    all.iter()
        .copied()
        .find(|v| format!("{:?}", v).to_lowercase() == wanted)
        .ok_or_else(|| GuildError::InvalidCatalog(format!("unknown {} '{}'", what, raw)))
}

const ALL_STAT_KEYS: [StatKey; 16] = [
    StatKey::Strength,
    StatKey::Dexterity,
    StatKey::Intelligence,
    StatKey::Constitution,
    StatKey::Charisma,
    StatKey::Damage,
    StatKey::Defense,
    StatKey::MagicDamage,
    StatKey::Health,
    StatKey::Mana,
    StatKey::HealthRegen,
    StatKey::ManaRegen,
    StatKey::CriticalChance,
    StatKey::Initiative,
    StatKey::Evasion,
    StatKey::AllStats,
];

fn parse_stat(raw: &str) -> Result<StatKey> {
    parse_named(&ALL_STAT_KEYS, raw, "stat")
}
