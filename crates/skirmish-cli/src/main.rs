//! Skirmish command line runner
//!
//! Loads the data directory, plays one match between two teams and records
//! the result in the stats file. Also lists the stored records.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use skirmish_core::combat::{Combat, CombatEvent, CombatObserver, NullObserver, RoundEngine};
use skirmish_core::{
    Catalog, CombatConfig, DataPaths, EntityStore, MatchReport, Side, StatsBook, Team,
};
use tracing::info;

/// Skirmish - turn-based team combat
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Run team matches and inspect the stored records", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding characters.json, items.json, teams.json and stats.json
    #[arg(long, global = true, default_value = DataPaths::DEFAULT_DIR)]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one match between two teams
    Fight(FightArgs),
    /// List characters with their teams
    Characters,
    /// List items
    Items,
    /// List teams and their members
    Teams,
    /// Show team statistics
    Stats,
}

#[derive(clap::Args, Debug)]
struct FightArgs {
    /// First team, by name or 1-based position (names win)
    team1: String,

    /// Second team, by name or 1-based position (names win)
    team2: String,

    /// Combat settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for a reproducible match
    #[arg(long)]
    seed: Option<u64>,

    /// Round limit before the match is called a draw
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Do not write the stats file
    #[arg(long)]
    no_save: bool,

    /// Print the match report as JSON instead of narrating
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = DataPaths::new(&cli.data);
    paths
        .ensure_present()
        .with_context(|| format!("checking data directory {}", cli.data.display()))?;

    match cli.command {
        Command::Fight(args) => fight(&paths, &args),
        Command::Characters => list_characters(&paths),
        Command::Items => list_items(&paths),
        Command::Teams => list_teams(&paths),
        Command::Stats => list_stats(&paths),
    }
}

fn load_catalog(paths: &DataPaths) -> Result<Catalog> {
    Catalog::load(paths)
        .with_context(|| format!("loading data from {}", paths.characters.display()))
}

fn load_stats(path: &Path) -> Result<StatsBook> {
    StatsBook::load(path).with_context(|| format!("loading stats from {}", path.display()))
}

/// Resolves a team by name, or by 1-based position when no name matches.
fn resolve_team<'a>(catalog: &'a Catalog, key: &str) -> Result<&'a Team> {
    if let Some(team) = catalog.team_by_name(key) {
        return Ok(team);
    }
    match key.parse::<usize>() {
        Ok(0) => bail!("team positions start at 1"),
        Ok(position) => Ok(catalog.team_at(position - 1)?),
        Err(_) => Ok(catalog.require_team(key)?),
    }
}

fn combat_config(args: &FightArgs) -> Result<CombatConfig> {
    let mut config = match &args.config {
        Some(path) => CombatConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => CombatConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(max_rounds) = args.max_rounds {
        config = config.with_max_rounds(max_rounds);
    }
    Ok(config)
}

fn fight(paths: &DataPaths, args: &FightArgs) -> Result<()> {
    let catalog = load_catalog(paths)?;
    let team1 = resolve_team(&catalog, &args.team1)?;
    let team2 = resolve_team(&catalog, &args.team2)?;
    let config = combat_config(args)?;

    let mut rng = config.rng();
    let combat = Combat::prepare(&catalog, team1, team2, &mut rng);

    let mut engine = RoundEngine::new(combat, config, rng);
    if args.json {
        let report = engine.run(&mut NullObserver);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return record(paths, &report, args.no_save);
    }

    println!("\nInitializing teams...");
    let mut narrator = Narrator::new([team1.name.clone(), team2.name.clone()]);
    let report = engine.run(&mut narrator);

    for side in Side::BOTH {
        println!("\n{side} Summary:");
        for line in &report.summaries[side.index()] {
            println!("\t{line}");
        }
    }
    println!("\n{}", report.verdict());
    record(paths, &report, args.no_save)
}

fn record(paths: &DataPaths, report: &MatchReport, no_save: bool) -> Result<()> {
    if no_save {
        return Ok(());
    }
    let mut book = load_stats(&paths.stats)?;
    report.apply_to(&mut book);
    book.save(&paths.stats)
        .with_context(|| format!("saving stats to {}", paths.stats.display()))?;
    info!(path = %paths.stats.display(), "stats saved");
    Ok(())
}

/// Prints the match as it happens.
#[derive(Debug)]
struct Narrator {
    team_names: [String; 2],
    last_side: Option<Side>,
}

impl Narrator {
    fn new(team_names: [String; 2]) -> Self {
        Self {
            team_names,
            last_side: None,
        }
    }
}

impl CombatObserver for Narrator {
    fn on_event(&mut self, event: &CombatEvent) {
        match event {
            CombatEvent::CombatReady {
                side,
                name,
                weapon,
                armor,
                ..
            } => {
                if self.last_side != Some(*side) {
                    println!("\n{side} - {}", self.team_names[side.index()]);
                    self.last_side = Some(*side);
                }
                println!("\t- {name}\n\t\tWEAPON: {weapon}\n\t\tARMOR: {armor}");
            }
            CombatEvent::RoundStarted { round } => {
                if *round == 1 {
                    println!("\nCombat ready!");
                }
                println!("\n--- ROUND {round} ---\n");
            }
            CombatEvent::Attack {
                attacker_name,
                target_name,
                weapon,
                attack_value,
                final_damage,
                ..
            } => {
                println!(
                    "{attacker_name} ATTACKS {target_name} WITH {weapon} FOR {attack_value:.2} DAMAGE!"
                );
                println!("\t{target_name} RECEIVES {final_damage:.2} DAMAGE.");
            }
            CombatEvent::ItemDestroyed { item, .. } => println!("{item} is destroyed!"),
            CombatEvent::KnockedOut { name, .. } => println!("{name} has been knocked out!"),
            CombatEvent::AttackSkipped { attacker, reason, .. } => {
                println!("Attack by {attacker} skipped ({reason:?})");
            }
            CombatEvent::RoundResolved { .. } => {}
            CombatEvent::MatchEnded { rounds, .. } => println!("\nMatch over after {rounds} rounds."),
        }
    }
}

fn list_characters(paths: &DataPaths) -> Result<()> {
    let catalog = load_catalog(paths)?;
    for (position, character) in catalog.characters().iter().enumerate() {
        println!("{}) {}", position + 1, character.name());
        println!("{}", character.details());
        let teams = catalog.teams_for_character(character.id());
        if teams.is_empty() {
            println!("\tTEAMS: none");
        } else {
            println!("\tTEAMS: {}", teams.join(", "));
        }
    }
    Ok(())
}

fn list_items(paths: &DataPaths) -> Result<()> {
    let catalog = load_catalog(paths)?;
    for (position, item) in catalog.items().iter().enumerate() {
        println!("{}) {}", position + 1, item.name);
        println!("{}", item.details());
    }
    Ok(())
}

fn list_teams(paths: &DataPaths) -> Result<()> {
    let catalog = load_catalog(paths)?;
    for (position, team) in catalog.teams().iter().enumerate() {
        println!("{}) {}", position + 1, team.name);
        for member in &team.members {
            let name = catalog
                .character(member.id)
                .map_or("<unknown>", |c| c.name());
            println!("\t- {name} ({})", member.strategy);
        }
    }
    Ok(())
}

fn list_stats(paths: &DataPaths) -> Result<()> {
    let book = load_stats(&paths.stats)?;
    if book.entries().is_empty() {
        println!("No matches recorded yet.");
    }
    for stats in book.entries() {
        println!("{}{}", stats.team_name, stats.details());
    }
    Ok(())
}
