use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::io;
use tilesweep_core::*;

mod game;
mod input;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal")]
struct Cli {
    /// Board size: S (3x3), M (8x8) or L (15x15); asked for when omitted
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Seed for mine placement, taken from the clock when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn init_logging(level: log::LevelFilter) {
    use tracing_subscriber::filter::LevelFilter;

    let level = match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn clock_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity.log_level_filter());

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();

    let difficulty = match cli.difficulty {
        Some(difficulty) => difficulty,
        None => match game::prompt_difficulty(&mut input, &mut output)? {
            Some(difficulty) => difficulty,
            None => return Ok(()),
        },
    };
    let seed = cli.seed.unwrap_or_else(clock_seed);
    log::info!("Starting {:?} game with seed {}", difficulty, seed);

    let mut session = GameSession::new(difficulty, seed);
    game::play(&mut session, &mut input, &mut output)
}
