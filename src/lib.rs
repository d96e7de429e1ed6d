//! tilemerge: a deterministic 2048-style merge engine with dry-run lookahead
//!
//! This crate provides:
//! - A square `Grid` of tile values and a `Game` that owns it together with the
//!   score and a per-game seeded RNG (`engine` module)
//! - A non-mutating move simulator and parallel four-way analysis (`analysis` module)
//! - Monotonicity and smoothness board features (`analysis::heuristic`)
//! - TOML-loadable game settings (`config` module)
//!
//! Quick start:
//! ```
//! use tilemerge::config::GameConfig;
//! use tilemerge::engine::{Direction, Game};
//!
//! // Deterministic game with a seeded RNG
//! let mut game = Game::new(GameConfig::default().with_seed(42)).unwrap();
//! let out = game.make_move(Direction::Left);
//! if !out.moved {
//!     // ineffective move: nothing changed, nothing spawned
//!     assert_eq!(game.grid().count_empty(), 14);
//! }
//! ```
//!
//! Full loop with greedy lookahead
//! ```
//! use tilemerge::analysis::greedy_choice;
//! use tilemerge::config::GameConfig;
//! use tilemerge::engine::Game;
//!
//! let mut game = Game::new(GameConfig::default().with_seed(123)).unwrap();
//! let mut moves = 0u32;
//! while !game.is_game_over() && moves < 8 {
//!     match greedy_choice(&game.analyze_all()) {
//!         Some(dir) => {
//!             assert!(game.make_move(dir).moved);
//!             moves += 1;
//!         }
//!         None => break,
//!     }
//! }
//! let _features = (game.monotonicity(), game.smoothness(), game.max_tile());
//! assert!(moves > 0);
//! ```
//!
pub mod analysis;
pub mod config;
pub mod engine;
