//! # holdem-engine: No-Limit Texas Hold'em rules engine
//!
//! A deterministic multi-seat Hold'em table with a table-driven hand
//! evaluator, side-pot accounting and a per-phase hand history. Every game
//! owns a seeded RNG, so a sequence of actions replays exactly.
//!
//! ## Core Modules
//!
//! - [`cards`] - Bit-packed card encoding, parsing and formatting
//! - [`deck`] - Seeded deck with a community reserve fixed up front
//! - [`lookup`] - Prime-product tables behind the evaluator
//! - [`hand`] - Hand ranks from 1 (royal flush) to 7462 (seven high)
//! - [`preflop`] - Two-card strength table used before the flop
//! - [`player`] - Seats, player states and action types
//! - [`pot`] - Commitment ledger, side pots and pot awards
//! - [`rules`] - Pure action validation
//! - [`history`] - Hand phases and the per-phase hand log
//! - [`game`] - The table state machine
//! - [`agent`] - Interface for decision makers
//! - [`engine`] - Driver that plays hands with agents
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate, rank_to_string};
//!
//! let hole = parse_cards("Ah Kh").unwrap();
//! let board = parse_cards("Qh Jh Th 2c 3d").unwrap();
//! let rank = evaluate(&hole, &board).unwrap();
//! assert_eq!(rank.get(), 1);
//! assert_eq!(rank_to_string(rank), "Straight Flush");
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let a = Deck::new_with_seed(42);
//! let b = Deck::new_with_seed(42);
//! assert_eq!(a.cards(), b.cards());
//! assert_eq!(a.community(), b.community());
//! ```
//!
//! ## Action Validation
//!
//! ```rust
//! use holdem_engine::game::{Game, GameConfig};
//! use holdem_engine::player::ActionType;
//!
//! let mut game = Game::new(GameConfig { max_players: 2, ..GameConfig::default() }).unwrap();
//! game.start_hand().unwrap();
//! let seat = game.current_player().unwrap();
//! assert!(!game.validate_move(seat, ActionType::Check, None));
//! assert!(game.validate_move(seat, ActionType::Call, None));
//! ```

pub mod agent;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod history;
pub mod lookup;
pub mod player;
pub mod pot;
pub mod preflop;
pub mod rules;
