//! Autobalance CLI
//!
//! Keeps a roster of ranked players and splits the ten selected ones into two
//! balanced teams, avoiding teammate pairs that played together recently.

use anyhow::{Context, Result, anyhow};
use autobalance::application::{BalanceSession, SessionReporter};
use autobalance::config::Config;
use autobalance::domain::participant::Side;
use autobalance::infrastructure::SessionStore;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Balanced 5v5 team maker", long_about = None)]
struct Cli {
    /// TOML file overriding balancing settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding session.json (default: $AUTOBALANCE_DATA_DIR or ~/.autobalance)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Team {
    A,
    B,
}

impl From<Team> for Side {
    fn from(team: Team) -> Self {
        match team {
            Team::A => Side::A,
            Team::B => Side::B,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Register a player
    Add {
        name: String,

        /// Rank label, e.g. gold2 or master
        #[arg(short, long, default_value = "silver4")]
        rank: String,

        /// Register even if a player with the same name exists
        #[arg(long)]
        allow_duplicate: bool,
    },
    /// Remove a player (by id or unique name)
    Remove { player: String },
    /// Select players for the next match
    Select { players: Vec<String> },
    /// Deselect players
    Deselect { players: Vec<String> },
    /// Change a player's rank
    Rank { player: String, rank: String },
    /// Show the roster
    List,
    /// Show the rank table
    Ranks,
    /// Split the selected players into two teams
    Balance {
        /// Seed for the random fallback search
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Record which team won the current match
    Record {
        #[arg(value_enum)]
        winner: Team,
    },
    /// Show match history
    History,
    /// Delete all match history
    ClearHistory,
    /// Reset a player's streak, or everyone's with --all
    ResetStreak {
        player: Option<String>,

        #[arg(long)]
        all: bool,
    },
    /// Show current streak leaders
    Streaks,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(path) = &cli.config {
        info!("Loading balancing settings from: {}", path.display());
        config = config.with_overrides(path)?;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let store = SessionStore::new(&config.data_dir)?;
    let mut session = match store.load()? {
        Some(snapshot) => BalanceSession::from_snapshot(config.balancer.clone(), snapshot),
        None => BalanceSession::new(config.balancer.clone()),
    };
    let reporter = SessionReporter::new(config.balancer.rating_model(), config.balancer.lookback);

    let changed = run(cli.command, &mut session, &reporter)?;
    if changed {
        store.save(&session.snapshot())?;
    }
    Ok(())
}

/// Runs one command. Returns true if the session must be saved.
fn run(
    command: Commands,
    session: &mut BalanceSession,
    reporter: &SessionReporter,
) -> Result<bool> {
    match command {
        Commands::Add {
            name,
            rank,
            allow_duplicate,
        } => {
            let id = session.roster_mut().add(&name, &rank, allow_duplicate)?;
            println!("✅ Added {} ({})", name.trim(), id);
            Ok(true)
        }
        Commands::Remove { player } => {
            let id = resolve_id(session, &player)?;
            let removed = session.roster_mut().remove(&id)?;
            println!("🗑️  Removed {}", removed.name);
            Ok(true)
        }
        Commands::Select { players } => {
            set_selection(session, &players, true)?;
            reporter.print_roster(session.roster());
            Ok(true)
        }
        Commands::Deselect { players } => {
            set_selection(session, &players, false)?;
            reporter.print_roster(session.roster());
            Ok(true)
        }
        Commands::Rank { player, rank } => {
            let id = resolve_id(session, &player)?;
            session.roster_mut().update_rank(&id, &rank)?;
            println!("✅ {} is now {}", player, rank.to_uppercase());
            Ok(true)
        }
        Commands::List => {
            reporter.print_roster(session.roster());
            Ok(false)
        }
        Commands::Ranks => {
            reporter.print_ranks();
            Ok(false)
        }
        Commands::Balance { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_rng(&mut rand::rng()),
            };
            let report = session.auto_balance(&mut rng)?;
            reporter.print_assignment(&report.assignment, &report.changes);
            Ok(true)
        }
        Commands::Record { winner } => {
            let record = session.record_result(winner.into(), Utc::now())?;
            println!("{}", reporter.format_record(record));
            reporter.print_streak_leaders(&session.roster().streak_leaders());
            Ok(true)
        }
        Commands::History => {
            reporter.print_history(session.history());
            Ok(false)
        }
        Commands::ClearHistory => {
            session.clear_history();
            println!("🗑️  Match history cleared");
            Ok(true)
        }
        Commands::ResetStreak { player, all } => {
            match (player, all) {
                (_, true) => {
                    session.roster_mut().reset_all_streaks();
                    println!("✅ All streaks reset");
                }
                (Some(player), false) => {
                    let id = resolve_id(session, &player)?;
                    session.roster_mut().reset_streak(&id)?;
                    println!("✅ Streak reset for {}", player);
                }
                (None, false) => return Err(anyhow!("Name a player or pass --all")),
            }
            Ok(true)
        }
        Commands::Streaks => {
            reporter.print_streak_leaders(&session.roster().streak_leaders());
            Ok(false)
        }
    }
}

fn resolve_id(session: &BalanceSession, key: &str) -> Result<String> {
    session
        .roster()
        .resolve(key)
        .map(|p| p.id.clone())
        .with_context(|| format!("No unique player matches '{}'", key))
}

fn set_selection(session: &mut BalanceSession, players: &[String], selected: bool) -> Result<()> {
    for player in players {
        let id = resolve_id(session, player)?;
        session.roster_mut().set_selected(&id, selected)?;
    }
    Ok(())
}
