//! island — end-to-end islander-sim run.
//!
//! Five islanders on the classic zebra-puzzle island: each owns a house,
//! travels between houses by a weighted preference over house colors, and
//! swaps knowledge, pets, and houses along the way.  Inputs are embedded
//! semicolon CSVs in the same formats the file loaders accept.

use std::io::Cursor;
use std::time::Instant;

use anyhow::Result;

use isle_core::SimConfig;
use isle_event::EventKind;
use isle_io::{
    KnowledgeLogWriter, ObserverLogWriter, load_geography_reader, load_initial_data_reader,
    load_strategies_reader,
};
use isle_sim::EnvironmentBuilder;
use isle_world::World;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;
const MAX_TIME: u64 = 2_000;
const OUTPUT_DIR: &str = "output/island";

// ── Input CSVs ────────────────────────────────────────────────────────────────

// id;nationality;w1..w6;house_pct;pet_pct — weights index house colors in
// ascending house-id order (1=yellow … 5=green; column 6 is unused here).
const STRATEGIES_CSV: &str = "\
1;Norwegian;0;10;20;10;40;0;15;25
2;Ukrainian;30;0;10;30;10;0;10;40
3;Englishman;20;20;0;20;20;0;20;20
4;Spaniard;5;45;25;0;5;0;5;35
5;Japanese;25;10;25;20;0;0;30;10
";

// house_id;color;nationality;drink;cigarette;pet
const INITIAL_CSV: &str = "\
1;yellow;Norwegian;water;Kools;fox
2;blue;Ukrainian;tea;Chesterfield;horse
3;red;Englishman;milk;Old Gold;snails
4;ivory;Spaniard;orange juice;Lucky Strike;dog
5;green;Japanese;coffee;Parliament;zebra
";

// id;name;d1..d5 — NA = no road between those houses.
const GEOGRAPHY_CSV: &str = "\
1;Yellow house;0;2;4;NA;7
2;Blue house;2;0;1;3;NA
3;Red house;4;1;0;2;5
4;Ivory house;NA;3;2;0;1
5;Green house;7;NA;5;1;0
";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== island — islander discrete-event simulation ===");
    println!("Agents: 5  |  Horizon: {MAX_TIME}  |  Seed: {SEED}");
    println!();

    // 1. Load inputs.
    let strategies = load_strategies_reader(Cursor::new(STRATEGIES_CSV))?;
    let (agents, houses) = load_initial_data_reader(Cursor::new(INITIAL_CSV), &strategies)?;
    let matrix = load_geography_reader(Cursor::new(GEOGRAPHY_CSV))?;
    println!(
        "Loaded {} agents, {} houses, {}×{} travel matrix",
        agents.len(),
        houses.len(),
        matrix.house_count(),
        matrix.house_count()
    );

    // 2. Assemble the world and the environment.
    let world = World::new(agents, houses, matrix)?;
    let config = SimConfig::new(SEED, MAX_TIME);
    let mut env = EnvironmentBuilder::new(config).world(world).build()?;

    // 3. Per-agent knowledge logs stream out while the run progresses.
    let log_dir = format!("{OUTPUT_DIR}/logs");
    let mut knowledge_writer = KnowledgeLogWriter::new(&log_dir)?;

    // 4. Run.
    let t0 = Instant::now();
    env.run(&mut knowledge_writer)?;
    let elapsed = t0.elapsed();
    knowledge_writer.finish()?;

    // 5. Observer log with the final knowledge dump.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let observer_path = format!("{OUTPUT_DIR}/observer.csv");
    let mut observer_writer = ObserverLogWriter::create(observer_path.as_ref())?;
    observer_writer.write_log(env.log())?;
    observer_writer.write_knowledge_dump(&env.world)?;
    observer_writer.finish()?;

    // 6. Summary.
    let count = |kind: EventKind| env.log().iter().filter(|r| r.kind == kind).count();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  records    : {}", env.log().len());
    println!("  StartTrip  : {}", count(EventKind::StartTrip));
    println!("  FinishTrip : {}", count(EventKind::FinishTrip));
    println!("  ChangePet  : {}", count(EventKind::ChangePet));
    println!("  changeHouse: {}", count(EventKind::ChangeHouse));
    println!("  observer log: {observer_path}");
    println!("  knowledge logs: {log_dir}/agent_<id>_knowledge.log");
    println!();

    // 7. Final islander table.
    println!(
        "{:<12} {:<6} {:<10} {:<8} {:<8}",
        "Nationality", "Home", "Location", "Pet", "Known"
    );
    println!("{}", "-".repeat(48));
    for agent in env.world.agents.values() {
        println!(
            "{:<12} {:<6} {:<10} {:<8} {:<8}",
            agent.nationality,
            agent.home.0,
            agent.location.0,
            agent.pet,
            agent.knowledge.len(),
        );
    }

    Ok(())
}
