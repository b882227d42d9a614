//! Headless computer-vs-computer Thayam matches.
//! Plays a batch of seeded games and prints a JSON summary.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use thayam::ai::{ComputerPlayer, GreedyHeuristic, HeuristicWeights, MoveSelector, UniformRandom};
use thayam::core::{random_seed, GameRng, MatchConfig, PlayerId, PlayerMap};
use thayam::turn::Match;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Greedy,
    Random,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Thayam match simulator")]
struct Args {
    /// Seats in play (2, 3 or 4).
    #[arg(short, long, default_value = "4")]
    players: usize,

    /// Number of games to play.
    #[arg(short, long, default_value = "10")]
    games: u32,

    /// Base seed; game `i` uses `seed + i`. Random if omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Give up on a game after this many turns.
    #[arg(long, default_value = "5000")]
    max_turns: u32,

    /// Move selection policy for every seat.
    #[arg(long, value_enum, default_value = "greedy")]
    policy: Policy,

    /// Heuristic weights as JSON (missing fields take defaults).
    #[arg(long)]
    weights: Option<String>,

    /// Write the summary here instead of stdout.
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Debug, Serialize)]
struct GameSummary {
    game: u32,
    seed: u64,
    winner: Option<PlayerId>,
    turns: u32,
    moves: usize,
    cuts: Vec<(PlayerId, u32)>,
}

#[derive(Debug, Serialize)]
struct Summary {
    players: usize,
    policy: String,
    games: Vec<GameSummary>,
    wins: Vec<(PlayerId, u32)>,
    unfinished: u32,
    mean_turns: f64,
}

fn selector(policy: Policy, weights: &HeuristicWeights) -> Box<dyn MoveSelector> {
    match policy {
        Policy::Greedy => Box::new(GreedyHeuristic::new(weights.clone())),
        Policy::Random => Box::new(UniformRandom),
    }
}

fn play_game(
    index: u32,
    seed: u64,
    args: &Args,
    weights: &HeuristicWeights,
) -> Result<GameSummary, Box<dyn std::error::Error>> {
    let config = MatchConfig::new(args.players)
        .with_seed(seed)
        .with_turn_end_grace(Duration::ZERO);
    let mut game = Match::start(config)?;

    let rng = GameRng::new(seed);
    let mut seats = PlayerMap::new(|seat| {
        ComputerPlayer::new(
            seat,
            selector(args.policy, weights),
            rng.for_context(&format!("seat-{seat}")),
        )
    });

    while !game.is_over() && game.turn_number() <= args.max_turns {
        let seat = game.active_player();
        let turn = game.turn_number();
        seats[seat].play_turn(&mut game);

        if game.pending_turn_end().is_some() {
            game.complete_pending_turn()?;
        } else if !game.is_over() && game.active_player() == seat && game.turn_number() == turn {
            warn!(game = index, seat = %seat, turn, "turn stalled, abandoning game");
            break;
        }
    }

    let summary = GameSummary {
        game: index,
        seed,
        winner: game.winner(),
        turns: game.turn_number(),
        moves: game.state().history().len(),
        cuts: game.players().iter().map(|p| (*p, game.cuts(*p))).collect(),
    };
    info!(
        game = index,
        seed,
        winner = ?summary.winner,
        turns = summary.turns,
        moves = summary.moves,
        "game finished"
    );
    Ok(summary)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    MatchConfig::new(args.players).validate()?;
    let weights: HeuristicWeights = match &args.weights {
        Some(json) => serde_json::from_str(json)?,
        None => HeuristicWeights::default(),
    };
    let base_seed = args.seed.unwrap_or_else(random_seed);

    let mut games = Vec::with_capacity(args.games as usize);
    for index in 0..args.games {
        games.push(play_game(index, base_seed.wrapping_add(index as u64), &args, &weights)?);
    }

    let mut wins = PlayerMap::with_value(0u32);
    let mut unfinished = 0;
    for game in &games {
        match game.winner {
            Some(winner) => wins[winner] += 1,
            None => unfinished += 1,
        }
    }
    let mean_turns = if games.is_empty() {
        0.0
    } else {
        games.iter().map(|g| f64::from(g.turns)).sum::<f64>() / games.len() as f64
    };

    let active = MatchConfig::new(args.players).active_players();
    let summary = Summary {
        players: args.players,
        policy: format!("{:?}", args.policy).to_lowercase(),
        wins: active.iter().map(|p| (*p, wins[*p])).collect(),
        games,
        unfinished,
        mean_turns,
    };

    let json = serde_json::to_string_pretty(&summary)?;
    match &args.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
