//! # holdem-ai: table agents
//!
//! Ready-made [`Agent`] implementations for the Hold'em engine.
//!
//! ## Core Components
//!
//! - [`random`] - Seeded random player that only proposes legal moves
//! - [`score`] - Heuristic player driven by the table's hand ranks
//! - [`create_agent`] - Factory by kind name
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::create_agent;
//! use holdem_engine::agent::Agent;
//! use holdem_engine::engine::Engine;
//! use holdem_engine::game::GameConfig;
//!
//! let agents: Vec<Box<dyn Agent>> = (0..3)
//!     .map(|seat| create_agent("score", seat).unwrap())
//!     .collect();
//! let config = GameConfig { max_players: 3, ..GameConfig::default() };
//! let mut engine = Engine::new(config, agents).unwrap();
//! let outcome = engine.play_hand().unwrap();
//! assert_eq!(outcome.chip_deltas.iter().sum::<i64>(), 0);
//! ```

pub use holdem_engine::agent::{Agent, Proposal};

pub mod random;
pub mod score;

/// Kind names accepted by [`create_agent`].
pub const AGENT_KINDS: [&str; 2] = ["random", "score"];

/// Builds an agent by kind name, seeding its RNG with `seed`.
///
/// # Supported Kinds
///
/// - `"random"` - [`random::RandomAgent`]
/// - `"score"` - [`score::ScoreAgent`]
///
/// Returns `None` for anything else.
///
/// # Example
///
/// ```rust
/// use holdem_ai::create_agent;
///
/// let agent = create_agent("random", 7).unwrap();
/// assert_eq!(agent.name(), "RandomAgent");
/// assert!(create_agent("shark", 7).is_none());
/// ```
pub fn create_agent(kind: &str, seed: u64) -> Option<Box<dyn Agent>> {
    match kind {
        "random" => Some(Box::new(random::RandomAgent::new(seed))),
        "score" => Some(Box::new(score::ScoreAgent::new(seed))),
        _ => None,
    }
}

/// CHECK when it is legal, otherwise FOLD.
pub(crate) fn check_or_fold(game: &holdem_engine::game::Game, player_id: usize) -> Proposal {
    use holdem_engine::player::ActionType;
    if game.validate_move(player_id, ActionType::Check, None) {
        Proposal::new(ActionType::Check)
    } else {
        Proposal::new(ActionType::Fold)
    }
}
