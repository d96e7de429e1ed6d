use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;

use tilemerge::analysis::greedy_choice;
use tilemerge::config::GameConfig;
use tilemerge::engine::Game;

/// Play games with a one-ply greedy policy built on move analysis.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML file with `size`, `probability_of_two` and `seed`; flags override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Board side length
    #[arg(long)]
    size: Option<usize>,
    /// Probability that a spawned tile is a 2
    #[arg(long = "prob-two")]
    prob_two: Option<f64>,
    /// RNG seed; game i uses seed + i
    #[arg(long)]
    seed: Option<u64>,
    /// Number of independent games (run in parallel when > 1)
    #[arg(long, default_value_t = 1)]
    games: u64,
    /// Stop a game after this many moves
    #[arg(long)]
    max_moves: Option<u64>,
    /// Print every move's events (single game only)
    #[arg(long)]
    show_events: bool,
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy)]
struct Summary {
    moves: u64,
    score: u64,
    max_tile: u32,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let base = match args.config.as_ref().map(GameConfig::from_toml).transpose() {
        Ok(cfg) => cfg.unwrap_or_default(),
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(2);
        }
    };
    let cfg = GameConfig {
        size: args.size.unwrap_or(base.size),
        probability_of_two: args.prob_two.unwrap_or(base.probability_of_two),
        seed: args.seed.or(base.seed),
    };
    if let Err(e) = cfg.validate() {
        eprintln!("Invalid settings: {e}");
        std::process::exit(2);
    }

    if args.games <= 1 {
        let summary = play(&cfg, args.max_moves, !args.quiet, args.show_events);
        println!(
            "Moves made: {}, Score: {}, Highest tile: {}",
            summary.moves, summary.score, summary.max_tile
        );
        return;
    }

    info!("running {} games on a {}x{} board", args.games, cfg.size, cfg.size);
    let pb = if args.quiet { ProgressBar::hidden() } else { ProgressBar::new(args.games) };
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games | {elapsed_precise}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let summaries: Vec<Summary> = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let game_cfg = GameConfig { seed: cfg.seed.map(|s| s.wrapping_add(i)), ..cfg.clone() };
            let s = play(&game_cfg, args.max_moves, false, false);
            pb.inc(1);
            s
        })
        .collect();
    pb.finish_and_clear();

    for (i, s) in summaries.iter().enumerate() {
        println!("game {:>4}: moves {:>6} | score {:>8} | max tile {:>6}", i, s.moves, s.score, s.max_tile);
    }
    let best = summaries.iter().map(|s| s.max_tile).max().unwrap_or(0);
    let mean = summaries.iter().map(|s| s.score as f64).sum::<f64>() / summaries.len().max(1) as f64;
    println!("Games: {} | mean score: {:.1} | best tile: {}", summaries.len(), mean, best);
}

fn play(cfg: &GameConfig, max_moves: Option<u64>, print_boards: bool, show_events: bool) -> Summary {
    let mut game = match Game::new(cfg.clone()) {
        Ok(g) => g,
        Err(e) => {
            warn!("could not start game: {e}");
            return Summary { moves: 0, score: 0, max_tile: 0 };
        }
    };
    if print_boards {
        println!("{}", game.board());
    }
    let mut moves = 0u64;
    while !game.is_game_over() {
        if max_moves.is_some_and(|limit| moves >= limit) {
            break;
        }
        let Some(dir) = greedy_choice(&game.analyze_all()) else { break };
        let out = game.make_move(dir);
        moves += 1;
        if print_boards {
            println!("{} (score {})", dir, game.score());
            if show_events {
                for ev in &out.events {
                    println!(
                        "  ({}, {}) -> ({}, {}) = {}{}",
                        ev.from_row,
                        ev.from_col,
                        ev.to_row,
                        ev.to_col,
                        ev.new_value,
                        if ev.merged { " merged" } else { "" }
                    );
                }
            }
            println!("{}", game.board());
        }
    }
    Summary { moves, score: game.score(), max_tile: game.max_tile() }
}
