//! delve_sim - Headless encounter runner
//!
//! Pits one character against a monster race round after round and prints
//! a JSON report of every blow, trap, potion and status tick.

mod encounter;

use clap::Parser;
use delve_core::config::{
    default_constants, default_monster_races, load_monster_races, load_toml, CombatConstants,
};
use delve_core::types::Floor;
use delve_core::{Ctx, GameRng, Player, TracingSink};
use encounter::{Encounter, EncounterPlan};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Run a seeded encounter and print the report as JSON
#[derive(Parser, Debug)]
#[command(name = "delve_sim")]
#[command(about = "Simulate a character fighting a monster race")]
struct Args {
    /// Monster race id to fight
    #[arg(long, default_value = "cave_spider")]
    monster: String,

    /// Rounds to play
    #[arg(long, default_value_t = 50)]
    rounds: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Dungeon depth; 0 is the surface
    #[arg(long, default_value_t = 5)]
    depth: i32,

    /// Character level
    #[arg(long, default_value_t = 10)]
    level: i32,

    /// Character max HP
    #[arg(long, default_value_t = 200)]
    hp: i32,

    /// Spring a random trap every N rounds (0 disables)
    #[arg(long, default_value_t = 5)]
    trap_every: u32,

    /// Monster race table (TOML); the bundled table is used when absent
    #[arg(long)]
    races: Option<PathBuf>,

    /// Combat constants (TOML); the bundled constants are used when absent
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Print only the totals, not every round
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let races = match &args.races {
        Some(path) => load_monster_races(path)?,
        None => default_monster_races(),
    };
    let constants: CombatConstants = match &args.constants {
        Some(path) => load_toml(path)?,
        None => default_constants(),
    };
    let Some(race) = races.get(&args.monster) else {
        let mut known: Vec<&str> = races.keys().map(String::as_str).collect();
        known.sort_unstable();
        let known = known.join(", ");
        return Err(format!("unknown monster '{}' (known: {known})", args.monster).into());
    };

    tracing::info!(seed, monster = %race.name, rounds = args.rounds, "starting encounter");

    let mut rng = GameRng::new(seed);
    let mut sink = TracingSink;
    let mut ctx = Ctx::new(&mut rng, &mut sink, &constants).with_floor(Floor::at_depth(args.depth));
    let mut player = Player::default().with_level(args.level).with_hp(args.hp);

    let plan = EncounterPlan {
        rounds: args.rounds,
        trap_every: args.trap_every,
        quaff_below: 33,
    };
    let mut report = Encounter::new(race).run(&mut player, plan, seed, &mut ctx);
    if args.summary {
        report.rounds.clear();
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
