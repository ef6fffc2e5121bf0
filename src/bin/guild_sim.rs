//! Headless Guild Simulation
//!
//! Recruits a roster, outfits it from the equipment catalog, forms parties
//! and runs them through a stretch of days with a simple stand-in for
//! mission resolution. Prints party summaries at the end.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use guild_hall::city::{ResourceKind, Stockpile};
use guild_hall::core::config::GuildConfig;
use guild_hall::core::rng::{RandomSource, SeededRandom};
use guild_hall::core::types::{AdventurerId, PartyId};
use guild_hall::equipment::{crafting_cost, EquipmentCatalog, EquipmentGenerator, EquipmentSlot, Rarity};
use guild_hall::guild::Guild;
use guild_hall::party::{Formation, PartySummary};

/// Headless Guild Simulation - parties, gear and missions
#[derive(Parser, Debug)]
#[command(name = "guild_sim")]
#[command(about = "Run a seeded adventurer guild simulation and report party summaries")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Days to simulate
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// Number of parties to form
    #[arg(long, default_value_t = 2)]
    parties: usize,

    /// Recruits per party
    #[arg(long, default_value_t = 4)]
    party_size: usize,

    /// Guild config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Equipment catalog (TOML); the built-in catalog is used when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunReport {
    seed: u64,
    days: u32,
    missions: u32,
    successes: u32,
    items_crafted: usize,
    parties: Vec<PartySummary>,
}

const FORMATIONS: [Formation; 3] = [Formation::Defensive, Formation::Offensive, Formation::Magic];
const MISSION_DIFFICULTY: (f64, f64) = (400.0, 1600.0);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = SeededRandom::new(seed);

    let config = match &args.config {
        Some(path) => GuildConfig::load_from_toml(path)?,
        None => GuildConfig::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => EquipmentCatalog::load_from_toml(path)?,
        None => EquipmentCatalog::with_defaults(),
    };

    tracing::info!(seed, days = args.days, "starting guild simulation");

    let mut guild = Guild::new(config)?;
    let mut generator = EquipmentGenerator::new(&catalog);
    let mut stockpile = Stockpile::new();
    for kind in [ResourceKind::Gold, ResourceKind::Iron, ResourceKind::Wood, ResourceKind::Leather] {
        stockpile.add(kind, 600);
    }

    // Form parties from fresh recruits
    let mut party_ids: Vec<PartyId> = Vec::new();
    for index in 0..args.parties {
        let party = guild.create_party(format!("Company {}", index + 1));
        for _ in 0..args.party_size {
            let level = rng.range(1, 6) as u32;
            let recruit = guild.recruit(&mut rng, None, level);
            guild.add_member(party, recruit);
        }
        guild.set_formation(party, FORMATIONS[index % FORMATIONS.len()]);
        party_ids.push(party);
    }

    // Outfit everyone: a crafted weapon when the stockpile allows, found armor otherwise
    let mut items_crafted = 0;
    let members: Vec<AdventurerId> = guild.roster().ids();
    for id in members {
        let Some((class, level)) = guild.roster().get(id).map(|a| (a.class, a.level)) else {
            continue;
        };
        let rarity = roll_rarity(&mut rng);

        let cost = crafting_cost(EquipmentSlot::Weapon, rarity, level);
        if let Some(weapon) = generator.craft(&stockpile, &mut rng, EquipmentSlot::Weapon, rarity, level, Some(class))? {
            if stockpile.spend(&cost) {
                items_crafted += 1;
                equip_logged(&mut guild, id, weapon);
            }
        }

        let armor_rarity = roll_rarity(&mut rng);
        let armor = generator.generate(&mut rng, EquipmentSlot::Armor, armor_rarity, level, Some(class))?;
        equip_logged(&mut guild, id, armor);
    }

    // Day loop
    let mut missions = 0;
    let mut successes = 0;
    for _ in 0..args.days {
        for party in &party_ids {
            if !guild.dispatch(*party) {
                continue;
            }
            let (success, damage) = resolve_mission(&guild, *party, &mut rng);
            missions += 1;
            successes += u32::from(success);
            guild.on_mission_completed(*party, success, &damage);
        }
        guild.on_new_day();
    }

    let summaries: Vec<PartySummary> = party_ids.iter().filter_map(|p| guild.summary(*p)).collect();
    let report = RunReport {
        seed,
        days: args.days,
        missions,
        successes,
        items_crafted,
        parties: summaries,
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }
    Ok(())
}

/// Rarer tiers become progressively less likely
fn roll_rarity(rng: &mut SeededRandom) -> Rarity {
    let roll = rng.uniform(0.0, 1.0);
    match roll {
        r if r < 0.45 => Rarity::Common,
        r if r < 0.75 => Rarity::Uncommon,
        r if r < 0.90 => Rarity::Rare,
        r if r < 0.97 => Rarity::Epic,
        r if r < 0.995 => Rarity::Legendary,
        _ => Rarity::Artifact,
    }
}

fn equip_logged(guild: &mut Guild, id: AdventurerId, item: guild_hall::equipment::EquipmentInstance) {
    let name = item.name.clone();
    match guild.equip(id, item) {
        Ok(_) => tracing::debug!(adventurer = ?id, item = %name, "equipped"),
        Err(rejected) => tracing::debug!(adventurer = ?id, item = %rejected.name, "cannot equip"),
    }
}

/// Stand-in for the host game's mission resolution: combat power against
/// a random difficulty, with damage spread across the party on failure.
fn resolve_mission(guild: &Guild, party: PartyId, rng: &mut SeededRandom) -> (bool, Vec<(AdventurerId, i32)>) {
    let Some(p) = guild.party(party) else {
        return (false, Vec::new());
    };
    let difficulty = rng.uniform(MISSION_DIFFICULTY.0, MISSION_DIFFICULTY.1);
    let success = p.combat_power() as f64 * rng.uniform(0.5, 1.5) >= difficulty;

    let max_damage = if success { 15 } else { 45 };
    let damage = p.members().iter().map(|id| (*id, rng.range(0, max_damage) as i32)).collect();
    (success, damage)
}

fn print_text(report: &RunReport) {
    println!("Guild Simulation (seed {})", report.seed);
    println!("==============================");
    println!(
        "{} days, {} missions, {} successful, {} items crafted",
        report.days, report.missions, report.successes, report.items_crafted
    );
    for (index, summary) in report.parties.iter().enumerate() {
        println!("\n--- Company {} ---", index + 1);
        println!("Members: {} (avg level {:.1})", summary.size, summary.avg_level);
        println!("Combat power: {:.0}", summary.combat_power);
        println!("Cohesion: {:.0}  Morale: {:.0}", summary.cohesion, summary.morale);
        println!("Success rate: {:.0}%", summary.success_rate * 100.0);
        if summary.active_synergy_names.is_empty() {
            println!("Synergies: none");
        } else {
            println!("Synergies: {}", summary.active_synergy_names.join(", "));
        }
    }
}
