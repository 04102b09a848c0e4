//! Headless battle runner.
//!
//! Loads content from a data directory, starts one seeded battle and lets a
//! naive policy play it out. Run with: `cargo run -p battle-sim -- --enemy slime`

mod autoplay;

use std::path::PathBuf;

use anyhow::Result;
use battle_content::ContentFactory;
use battle_core::{BattleEngine, EnemySetup, RowId};
use clap::Parser;

/// Run one auto-played battle and log its outcome
#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Headless auto-play of a single battle", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding config.toml and tables.ron (defaults to the bundled sample data)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Seed of the battle's random stream
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Comma separated card ids; the whole card pool when omitted
    #[arg(long, value_delimiter = ',')]
    deck: Vec<String>,

    /// Enemy row id, optionally with an HP override (`slime` or `slime:40`)
    #[arg(long = "enemy", value_parser = parse_enemy, required = true)]
    enemies: Vec<EnemySetup>,

    /// Overrides `turn_limit` from config.toml
    #[arg(long)]
    turn_limit: Option<u32>,
}

fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();
    let factory = match &cli.data {
        Some(dir) => ContentFactory::new(dir.clone()),
        None => ContentFactory::bundled(),
    };

    let mut config = factory.load_config()?;
    if let Some(limit) = cli.turn_limit {
        config.turn_limit = limit;
    }
    let tables = factory.load_tables()?;
    tracing::info!(
        data = %factory.data_dir().display(),
        cards = tables.card_count(),
        "content loaded"
    );

    let deck: Vec<RowId> = if cli.deck.is_empty() {
        tables.card_pool().map(|card| card.id.clone()).collect()
    } else {
        cli.deck
    };

    let turn_limit = config.turn_limit;
    let mut engine = BattleEngine::start(&tables, config, cli.seed, &deck, &cli.enemies)?;
    let report = autoplay::run(&mut engine, turn_limit)?;

    match report.outcome {
        Some(outcome) => tracing::info!(
            %outcome,
            turns = report.turns,
            cards_played = report.cards_played,
            player_hp = report.player_hp,
            "battle finished"
        ),
        None => tracing::warn!(
            turn_limit,
            cards_played = report.cards_played,
            player_hp = report.player_hp,
            "battle stopped at the turn limit"
        ),
    }
    Ok(())
}

/// Logs to stderr, `RUST_LOG` on top of an INFO default.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_enemy(raw: &str) -> Result<EnemySetup, String> {
    let raw = raw.trim();
    let (id, hp) = match raw.split_once(':') {
        Some((id, hp)) => (id.trim(), Some(hp.trim())),
        None => (raw, None),
    };
    if id.is_empty() {
        return Err(format!("missing enemy id in '{raw}'"));
    }

    let setup = EnemySetup::new(id);
    match hp {
        None => Ok(setup),
        Some(hp) => match hp.parse::<i32>() {
            Ok(hp) if hp > 0 => Ok(setup.with_hp(hp)),
            _ => Err(format!("invalid HP override '{hp}' for enemy '{id}'")),
        },
    }
}
