//! Simulation configuration with documented constants
//!
//! All tuning numbers for adventurers and parties live here. The config is
//! passed explicitly into the roster, parties and guild; nothing reads it
//! through a global.

use serde::{Deserialize, Serialize};

use crate::core::error::{GuildError, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildConfig {
    pub adventurer: AdventurerConfig,
    pub party: PartyConfig,
}

/// Adventurer progression and health tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdventurerConfig {
    /// Level cap. `level_up` refuses past this.
    pub max_level: u32,

    /// Experience needed per level: reaching level N+1 costs `N * xp_per_level`
    pub xp_per_level: u32,

    /// Max health granted per point of constitution
    pub health_per_constitution: i32,

    /// Flat max health every adventurer starts with
    pub base_health: i32,

    /// Health ratio below which an adventurer becomes injured
    ///
    /// Injured adventurers are unavailable for parties until they recover.
    pub injury_threshold: f32,

    /// Health ratio at or above which an injury clears
    ///
    /// Must be >= injury_threshold so an adventurer cannot flap between
    /// injured and healthy on a single heal.
    pub recovery_threshold: f32,

    /// Fraction of max health restored on each new day
    pub daily_heal_fraction: f32,

    /// Experience for each member when a mission succeeds
    pub mission_success_xp: u32,

    /// Experience for each member when a mission fails
    pub mission_failure_xp: u32,

    /// Loyalty of a freshly recruited adventurer (0-100)
    pub starting_loyalty: f32,

    /// Loyalty change per mission (gain on success, loss on failure)
    pub loyalty_per_mission: f32,
}

impl Default for AdventurerConfig {
    fn default() -> Self {
        Self {
            max_level: 50,
            xp_per_level: 100,
            health_per_constitution: 5,
            base_health: 50,
            injury_threshold: 0.25,
            recovery_threshold: 0.5,
            daily_heal_fraction: 0.2,
            mission_success_xp: 100,
            mission_failure_xp: 40,
            starting_loyalty: 50.0,
            loyalty_per_mission: 2.0,
        }
    }
}

/// Party scoring tuning
///
/// Defaults reproduce the documented cohesion, morale and combat power
/// formulas exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyConfig {
    /// Maximum roster size
    pub max_size: usize,

    // === COHESION ===
    /// Cohesion before modifiers for a party of 2+
    pub base_cohesion: f32,
    /// Distinct classes needed for the diversity bonus
    pub diversity_class_count: usize,
    /// Bonus when the diversity threshold is met
    pub diversity_bonus: f32,
    /// Penalty when every member shares one class
    pub monoclass_penalty: f32,
    /// Cohesion per point of leader charisma
    pub leader_charisma_factor: f32,
    /// Cohesion per completed mission
    pub cohesion_per_mission: f32,
    /// Cap on cohesion earned from mission history
    pub max_mission_cohesion: f32,

    // === MORALE ===
    /// Morale of an empty party
    pub empty_morale: f32,
    /// Success rate above which morale gets the bonus
    pub high_success_rate: f32,
    /// Success rate below which morale gets the penalty
    pub low_success_rate: f32,
    /// Morale swing from success rate (applied as +/-)
    pub success_rate_morale: f32,
    /// Morale per point of average equipment quality
    pub equipment_quality_factor: f32,

    // === BONUS SCALING ===
    /// Weight of (cohesion - 50) / 100 on combined bonuses
    pub cohesion_bonus_weight: f32,
    /// Weight of (morale - 50) / 100 on combined bonuses
    pub morale_bonus_weight: f32,
    /// Weight of (cohesion - 50) / 100 on combat power
    pub cohesion_power_weight: f32,
    /// Weight of (morale - 50) / 100 on combat power
    pub morale_power_weight: f32,

    // === MISSION OUTCOMES ===
    pub success_cohesion_gain: f32,
    pub success_morale_gain: f32,
    pub failure_morale_loss: f32,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            max_size: 6,

            base_cohesion: 50.0,
            diversity_class_count: 3,
            diversity_bonus: 20.0,
            monoclass_penalty: 10.0,
            leader_charisma_factor: 2.0,
            cohesion_per_mission: 2.0,
            max_mission_cohesion: 30.0,

            empty_morale: 50.0,
            high_success_rate: 0.7,
            low_success_rate: 0.3,
            success_rate_morale: 20.0,
            equipment_quality_factor: 10.0,

            cohesion_bonus_weight: 0.2,
            morale_bonus_weight: 0.15,
            cohesion_power_weight: 0.3,
            morale_power_weight: 0.2,

            success_cohesion_gain: 2.0,
            success_morale_gain: 3.0,
            failure_morale_loss: 5.0,
        }
    }
}

impl GuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML. Missing keys fall back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GuildConfig =
            toml::from_str(content).map_err(|e| GuildError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let adv = &self.adventurer;
        if adv.max_level == 0 {
            return Err(GuildError::InvalidConfig("max_level must be at least 1".into()));
        }
        if adv.xp_per_level == 0 {
            return Err(GuildError::InvalidConfig("xp_per_level must be positive".into()));
        }
        if adv.injury_threshold > adv.recovery_threshold {
            return Err(GuildError::InvalidConfig(format!(
                "injury_threshold ({}) should be <= recovery_threshold ({})",
                adv.injury_threshold, adv.recovery_threshold
            )));
        }
        if !(0.0..=1.0).contains(&adv.daily_heal_fraction) {
            return Err(GuildError::InvalidConfig(format!(
                "daily_heal_fraction ({}) must be within [0, 1]",
                adv.daily_heal_fraction
            )));
        }

        let party = &self.party;
        if party.max_size == 0 {
            return Err(GuildError::InvalidConfig("max_size must be at least 1".into()));
        }
        if party.low_success_rate > party.high_success_rate {
            return Err(GuildError::InvalidConfig(format!(
                "low_success_rate ({}) should be <= high_success_rate ({})",
                party.low_success_rate, party.high_success_rate
            )));
        }

        Ok(())
    }
}
