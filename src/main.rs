use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tictactoe::{Game, HumanPlayer, MinimaxPlayer, Player, RandomPlayer, Tally};

/// Play tic-tac-toe against an exhaustive minimax engine.
#[derive(Parser, Debug)]
#[command(name = "tictactoe", version, about)]
struct Cli {
    /// Who plays X (moves first)
    #[arg(short = 'x', long = "player-x", value_enum, default_value_t = PlayerKind::Human)]
    player_x: PlayerKind,

    /// Who plays O
    #[arg(short = 'o', long = "player-o", value_enum, default_value_t = PlayerKind::Minimax)]
    player_o: PlayerKind,

    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 1)]
    games: usize,

    /// Seed for random players
    #[arg(long)]
    seed: Option<u64>,

    /// Only print the final tally
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    Human,
    Random,
    Minimax,
}

impl PlayerKind {
    fn build(self, seed: Option<u64>) -> Box<dyn Player> {
        match self {
            PlayerKind::Human => Box::new(HumanPlayer::stdio()),
            PlayerKind::Random => match seed {
                Some(seed) => Box::new(RandomPlayer::seeded(seed)),
                None => Box::new(RandomPlayer::new()),
            },
            PlayerKind::Minimax => Box::new(MinimaxPlayer::new()),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let uses_human = cli.player_x == PlayerKind::Human || cli.player_o == PlayerKind::Human;

    let player_x = cli.player_x.build(cli.seed);
    let player_o = cli.player_o.build(cli.seed.map(|seed| seed.wrapping_add(1)));
    let mut game = Game::new(player_x, player_o).verbose(uses_human || !cli.quiet);

    let mut tally = Tally::default();
    for i in 0..cli.games {
        if !cli.quiet {
            println!("Game {}", i + 1);
        }
        tally.record(game.play()?);
    }

    println!("{}", tally);
    Ok(())
}
