//! Self-play driver: two independent searches play one game of connect-four.
//!
//! Each side owns its own search tree and arena. After every drop both
//! trees are advanced with the played column and the position is checked
//! for a win or a full board.

use clap::Parser;
use tracing::{debug, info};

use connect4_mcts::core::{wall_clock_seed, Board, PlayerId, PlayerPair};
use connect4_mcts::mcts::{MCTSSearch, SearchConfig};
use connect4_mcts::rules::{check_outcome, drop_position, CheckResult};
use connect4_mcts::SearchError;

#[derive(Parser, Debug)]
#[command(name = "selfplay")]
#[command(about = "Play one game of connect-four between two MCTS searches")]
struct Args {
    /// Arena budget per side, in MiB
    #[arg(long, default_value_t = 16)]
    arena_mb: usize,

    /// Playouts per move
    #[arg(long, default_value_t = 100_000)]
    playouts: u32,

    /// Random seed (defaults to the wall clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<(), SearchError> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let seed = args.seed.unwrap_or_else(wall_clock_seed);
    let config = SearchConfig::default()
        .with_arena_bytes(args.arena_mb * 1024 * 1024)
        .with_playouts(args.playouts);

    // Each side draws from its own stream.
    let mut searches = PlayerPair::new(
        MCTSSearch::new(config.clone().with_seed(seed))?,
        MCTSSearch::new(config.clone().with_seed(seed.wrapping_add(1)))?,
    );
    info!(
        seed,
        arena_bytes = config.arena_bytes,
        nodes = searches[PlayerId::FIRST].tree().arena().capacity(),
        playouts = config.playouts,
        "starting self-play"
    );

    let mut board = Board::new();
    let mut ply = 0u32;
    loop {
        let mover = searches[PlayerId::FIRST].turn();
        let Some(column) = searches[mover].choose_move(config.playouts) else {
            // Only an arena that cannot hold a single child ends up here.
            info!(%mover, "no move found, stopping");
            break;
        };

        let position = drop_position(board.occupied(), column);
        board.place(mover, position);
        ply += 1;

        let stats = searches[mover].stats().clone();
        for (_, search) in searches.iter_mut() {
            search.advance(column);
        }
        info!(
            ply,
            %mover,
            column,
            playouts = stats.playouts,
            aborted = stats.aborted,
            time_us = stats.time_us,
            "move played"
        );
        debug!("position after ply {ply}\n{board}");

        match check_outcome(board.stones(mover), board.stones(mover.opponent()), position) {
            CheckResult::Unresolved => continue,
            CheckResult::Win(line) => {
                info!(%mover, line = %format!("{line:#x}"), "game won\n{board}");
                break;
            }
            CheckResult::Draw => {
                info!("game drawn\n{board}");
                break;
            }
        }
    }

    Ok(())
}
