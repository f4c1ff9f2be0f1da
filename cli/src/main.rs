use std::io;

use anyhow::Context;
use clap::Parser;
use minescan_core::{GameSession, RandomMineGenerator};
use minescan_protocol::EventBuffer;

mod driver;

/// Plays rounds on a fixed 8×8 board with 4 mines, one action per input line.
///
/// Input lines are either `<x> <y> <c|f|s>` (reveal, flag, scan) or JSON objects like
/// `{"x": 3, "y": 4, "action": "reveal"}`. Events are written to stdout as JSON lines.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many completed rounds
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Print the visible board to stderr after every action
    #[arg(long)]
    show_board: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let session = GameSession::new(RandomMineGenerator::new(seed), EventBuffer::new())
        .context("Could not start the first round")?;

    let mut driver = driver::Driver::new(session, io::stdout().lock())
        .with_round_limit(args.rounds)
        .with_board_output(args.show_board);
    let summary = driver.run(io::stdin().lock())?;

    log::info!(
        "Played {} rounds: {} won, {} lost",
        summary.won + summary.lost,
        summary.won,
        summary.lost
    );
    Ok(())
}
