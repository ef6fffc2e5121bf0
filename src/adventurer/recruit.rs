//! Recruitment - random adventurers drawn through the injected source

use crate::adventurer::{Adventurer, AdventurerClass, CoreStats};
use crate::core::config::AdventurerConfig;
use crate::core::rng::RandomSource;
use crate::core::types::AdventurerId;

/// Per-stat variance applied to class base stats, half-open `[-2, 3)`
const STAT_VARIANCE: (i64, i64) = (-2, 3);

/// Loyalty spread around the configured starting loyalty
const LOYALTY_VARIANCE: f64 = 10.0;

const FIRST_SYLLABLES: &[&str] = &["Al", "Bran", "Cor", "Da", "El", "Fen", "Gar", "Hal", "Is", "Jor", "Ka", "Lys", "Mor", "Ny", "Os", "Per", "Ri", "Sel", "Tor", "Vy"];
const LAST_SYLLABLES: &[&str] = &["dric", "wen", "mir", "ra", "thas", "is", "den", "ric", "ana", "vek", "lin", "dor", "mae", "wyn", "gar"];

/// Generate a recruit. `class` of `None` picks one uniformly.
pub fn generate_recruit<R: RandomSource + ?Sized>(
    id: AdventurerId,
    rng: &mut R,
    config: &AdventurerConfig,
    class: Option<AdventurerClass>,
    level: u32,
) -> Adventurer {
    let class = class.unwrap_or_else(|| {
        let all = AdventurerClass::all();
        all[rng.pick(all.len()).unwrap_or(0)]
    });

    let base = class.base_stats();
    let (lo, hi) = STAT_VARIANCE;
    let mut vary = |v: i32| v + rng.range(lo, hi) as i32;
    let stats = CoreStats::new(
        vary(base.strength),
        vary(base.dexterity),
        vary(base.intelligence),
        vary(base.constitution),
        vary(base.charisma),
    )
    .floored(1);

    let name = generate_name(rng);
    let mut adventurer = Adventurer::with_stats(id, name, class, stats, config);

    let loyalty = config.starting_loyalty as f64 + rng.uniform(-LOYALTY_VARIANCE, LOYALTY_VARIANCE);
    adventurer.loyalty = loyalty.clamp(0.0, 100.0) as f32;

    while adventurer.level < level && adventurer.level_up(config) {}

    tracing::debug!(
        adventurer = %adventurer.name,
        class = class.name(),
        level = adventurer.level,
        "recruited adventurer"
    );
    adventurer
}

fn generate_name<R: RandomSource + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_SYLLABLES[rng.pick(FIRST_SYLLABLES.len()).unwrap_or(0)];
    let last = LAST_SYLLABLES[rng.pick(LAST_SYLLABLES.len()).unwrap_or(0)];
    format!("{}{}", first, last)
}
