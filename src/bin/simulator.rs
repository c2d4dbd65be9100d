//! Dungeon Legacy Headless Simulator
//!
//! Plays seeded sessions on autopilot through the same `GameSession` API a
//! front end would use, and prints a balance summary.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --seed N        RNG seed (default: 42)
//!   --runs N        Number of runs with incrementing seeds (default: 1)
//!   --steps N       Autopilot actions per run (default: 2000)
//!   --class NAME    warrior, mage or rogue (default: warrior)
//!   --config FILE   Engine config JSON
//!   --quiet         Only final summary line

use dungeon_legacy::character::{Character, CharacterClass};
use dungeon_legacy::core::constants::HEALTH_POTION_ID;
use dungeon_legacy::core::{CombatPhase, EngineConfig, GameEvent, GameSession};
use dungeon_legacy::items::{Item, ItemKind};
use dungeon_legacy::utils::build_info;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::process;

/// Seconds of game time that pass per autopilot action
const STEP_SECONDS: f64 = 0.5;
/// Below this health percentage the autopilot drinks a potion
const POTION_THRESHOLD_PERCENT: f64 = 30.0;
/// Actions without a kill before the autopilot gives up on a dungeon
const STALE_STEP_LIMIT: u32 = 300;
const KILL_QUEST_ID: &str = "quest_1";

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    seed: u64,
    runs: u32,
    steps: u32,
    class: CharacterClass,
    config_path: Option<PathBuf>,
    quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            runs: 1,
            steps: 2_000,
            class: CharacterClass::Warrior,
            config_path: None,
            quiet: false,
        }
    }
}

fn parse_args() -> SimConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                config.seed = parse_number(&args, i, "--seed");
            }
            "--runs" => {
                i += 1;
                config.runs = parse_number(&args, i, "--runs");
            }
            "--steps" => {
                i += 1;
                config.steps = parse_number(&args, i, "--steps");
            }
            "--class" => {
                i += 1;
                let name = args.get(i).map(String::as_str).unwrap_or_default();
                config.class = CharacterClass::from_name(name).unwrap_or_else(|| {
                    fail(&format!("--class expects warrior, mage or rogue, got '{name}'"))
                });
            }
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config.config_path = Some(PathBuf::from(path)),
                    None => fail("--config requires a file path"),
                }
            }
            "--quiet" => config.quiet = true,
            "--version" | "-V" => {
                println!("dungeon-legacy simulator {}", build_info::version_string());
                process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => fail(&format!("Unknown argument: {other}")),
        }
        i += 1;
    }
    config
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    args.get(i)
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(|| fail(&format!("{flag} requires a number")))
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    print_usage();
    process::exit(1);
}

fn print_usage() {
    eprintln!(
        "Dungeon Legacy Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --seed N        RNG seed (default: 42)\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 1)\n\
         \x20 --steps N       Autopilot actions per run (default: 2000)\n\
         \x20 --class NAME    warrior, mage or rogue (default: warrior)\n\
         \x20 --config FILE   Engine config JSON\n\
         \x20 --quiet         Only final summary line\n\
         \x20 --version, -V   Show version\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Simulation Statistics ────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct SimStats {
    steps: u32,
    kills: u32,
    died: bool,
    dungeons_cleared: u32,
    dungeons_abandoned: u32,
    potions_drunk: u32,
    items_looted: u32,
    quests_completed: u32,
    final_level: u32,
    final_level_progress: f64,
    final_gold: u32,
}

impl SimStats {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::MonsterDefeated { .. } => self.kills += 1,
                GameEvent::LootGained { .. } => self.items_looted += 1,
                GameEvent::PotionConsumed { .. } => self.potions_drunk += 1,
                GameEvent::QuestCompleted { .. } => self.quests_completed += 1,
                GameEvent::PlayerDefeated => self.died = true,
                _ => {}
            }
        }
    }
}

// ── Autopilot ────────────────────────────────────────────────────────

/// Weapon damage or armor defense, zero for everything else.
fn gear_score(item: &Item) -> u32 {
    match item.kind {
        ItemKind::Weapon { damage, .. } => damage,
        ItemKind::Armor { defense, .. } => defense,
        _ => 0,
    }
}

/// Equips inventory gear that beats what occupies its slot.
fn upgrade_gear(session: &mut GameSession, stats: &mut SimStats) {
    let character = session.character();
    let equipped = &character.equipped;
    let upgrade = character
        .inventory
        .iter()
        .filter(|item| item.is_weapon() || item.is_armor())
        .find(|item| {
            let current = if item.is_weapon() {
                equipped.weapon.as_ref()
            } else {
                equipped.armor.as_ref()
            };
            current.map_or(true, |worn| gear_score(item) > gear_score(worn))
        })
        .map(|item| item.id.clone());

    if let Some(item_id) = upgrade {
        if let Ok(events) = session.equip(&item_id) {
            debug!("autopilot equipped {item_id}");
            stats.record(&events);
        }
    }
}

fn claim_finished_quests(session: &mut GameSession, stats: &mut SimStats) {
    let ready: Vec<String> = session
        .quests()
        .iter()
        .filter(|q| q.is_completed && !q.rewards_claimed)
        .map(|q| q.id.clone())
        .collect();
    for quest_id in ready {
        if let Ok(events) = session.claim_quest_rewards(&quest_id) {
            stats.record(&events);
        }
    }
}

fn needs_potion(character: &Character) -> bool {
    character.health_percent() < POTION_THRESHOLD_PERCENT && character.has_item(HEALTH_POTION_ID)
}

fn run_simulation(sim: &SimConfig, engine: &EngineConfig, seed: u64) -> SimStats {
    let mut stats = SimStats::default();
    let hero = match Character::new("Simulator", sim.class) {
        Ok(hero) => hero,
        Err(e) => fail(&format!("could not create character: {e}")),
    };
    let engine = EngineConfig {
        seed: Some(seed),
        ..engine.clone()
    };
    let mut session = match GameSession::new(hero, engine) {
        Ok(session) => session,
        Err(e) => fail(&format!("invalid engine config: {e}")),
    };
    let mut walk_rng = ChaCha8Rng::seed_from_u64(seed.wrapping_mul(31).wrapping_add(7));
    let mut stale_steps = 0;

    upgrade_gear(&mut session, &mut stats);

    for step in 0..sim.steps {
        stats.steps = step + 1;
        stale_steps += 1;

        let events = match session.phase() {
            CombatPhase::Defeated => break,
            CombatPhase::Resolving { .. } => session.update(STEP_SECONDS),
            CombatPhase::InCombat { .. } => {
                if needs_potion(session.character()) {
                    session.consume(HEALTH_POTION_ID).unwrap_or_default()
                } else {
                    session.attack().unwrap_or_default()
                }
            }
            CombatPhase::Idle => {
                if session.all_monsters_defeated() || stale_steps > STALE_STEP_LIMIT {
                    if session.all_monsters_defeated() {
                        stats.dungeons_cleared += 1;
                    } else {
                        stats.dungeons_abandoned += 1;
                    }
                    stale_steps = 0;
                    if session.enter_dungeon().is_err() {
                        break;
                    }
                    Vec::new()
                } else if needs_potion(session.character()) {
                    session.consume(HEALTH_POTION_ID).unwrap_or_default()
                } else {
                    let (dx, dy) = DIRECTIONS.choose(&mut walk_rng).copied().unwrap_or((1, 0));
                    session.move_by(dx, dy).unwrap_or_default()
                }
            }
        };

        stats.record(&events);
        let kills = events
            .iter()
            .filter(|e| matches!(e, GameEvent::MonsterDefeated { .. }))
            .count() as u32;
        if kills > 0 {
            stale_steps = 0;
            if let Ok(quest_events) = session.advance_quest(KILL_QUEST_ID, kills) {
                stats.record(&quest_events);
            }
        }
        if events.iter().any(|e| matches!(e, GameEvent::LootGained { .. })) {
            upgrade_gear(&mut session, &mut stats);
        }
        claim_finished_quests(&mut session, &mut stats);
    }

    stats.final_level = session.character().level;
    stats.final_level_progress = session.character().experience_percent();
    stats.final_gold = session.character().gold;
    info!(
        "seed {seed}: level {} after {} steps",
        stats.final_level, stats.steps
    );
    stats
}

// ── Output ───────────────────────────────────────────────────────────

fn print_summary(stats: &SimStats, seed: u64) {
    println!("=== Simulation (seed={seed}) ===");
    println!("  Steps:             {}", stats.steps);
    println!(
        "  Final level:       {} ({:.0}% to next)",
        stats.final_level, stats.final_level_progress
    );
    println!("  Final gold:        {}", stats.final_gold);
    println!("  Kills:             {}", stats.kills);
    println!("  Died:              {}", if stats.died { "yes" } else { "no" });
    println!("  Dungeons cleared:  {}", stats.dungeons_cleared);
    println!("  Dungeons left:     {}", stats.dungeons_abandoned);
    println!("  Items looted:      {}", stats.items_looted);
    println!("  Potions drunk:     {}", stats.potions_drunk);
    println!("  Quests completed:  {}", stats.quests_completed);
}

fn print_multi_run_summary(all: &[SimStats]) {
    let runs = all.len().max(1) as f64;
    let avg = |f: fn(&SimStats) -> u32| all.iter().map(|s| f(s) as f64).sum::<f64>() / runs;
    let deaths = all.iter().filter(|s| s.died).count();

    println!("=== {} runs ===", all.len());
    println!("  Avg level:         {:.2}", avg(|s| s.final_level));
    println!("  Avg kills:         {:.1}", avg(|s| s.kills));
    println!("  Avg gold:          {:.1}", avg(|s| s.final_gold));
    println!("  Avg cleared:       {:.2}", avg(|s| s.dungeons_cleared));
    println!("  Avg quests:        {:.2}", avg(|s| s.quests_completed));
    println!(
        "  Deaths:            {deaths} ({:.0}%)",
        deaths as f64 / runs * 100.0
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let config = parse_args();

    let engine = match &config.config_path {
        Some(path) => EngineConfig::load(path)
            .unwrap_or_else(|e| fail(&format!("could not load {}: {e}", path.display()))),
        None => EngineConfig::default(),
    };

    if !config.quiet {
        eprintln!(
            "Dungeon Legacy Simulator {}: {} step(s) x {} run(s), seed={}, class={}",
            build_info::version_string(),
            config.steps,
            config.runs,
            config.seed,
            config.class.name(),
        );
    }

    let mut all_stats = Vec::with_capacity(config.runs as usize);
    for run in 0..config.runs {
        let seed = config.seed + run as u64;
        let stats = run_simulation(&config, &engine, seed);

        if config.runs == 1 {
            print_summary(&stats, seed);
        } else if !config.quiet {
            println!(
                "  Run {}: L{} kills={} gold={} cleared={} died={}",
                run + 1,
                stats.final_level,
                stats.kills,
                stats.final_gold,
                stats.dungeons_cleared,
                stats.died,
            );
        }
        all_stats.push(stats);
    }

    if config.runs > 1 {
        println!();
        print_multi_run_summary(&all_stats);
    }
}
