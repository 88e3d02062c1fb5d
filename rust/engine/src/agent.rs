use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::player::ActionType;

/// An action an agent wants to take, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub action: ActionType,
    /// Raise-to total for RAISE
    pub value: Option<u32>,
}

impl Proposal {
    pub fn new(action: ActionType) -> Self {
        Self {
            action,
            value: None,
        }
    }

    pub fn raise_to(total: u32) -> Self {
        Self {
            action: ActionType::Raise,
            value: Some(total),
        }
    }
}

/// Decision-making interface for a seat at the table.
///
/// Agents see the whole game and may propose anything; the caller checks the
/// proposal with [`Game::validate_move`] before applying it.
///
/// # Example Implementation
///
/// ```rust
/// use holdem_engine::agent::{Agent, Proposal};
/// use holdem_engine::game::Game;
/// use holdem_engine::player::ActionType;
///
/// struct CallingStation;
///
/// impl Agent for CallingStation {
///     fn propose(&mut self, game: &Game, player_id: usize) -> Proposal {
///         if game.chips_to_call(player_id) > 0 {
///             Proposal::new(ActionType::Call)
///         } else {
///             Proposal::new(ActionType::Check)
///         }
///     }
///
///     fn name(&self) -> &str {
///         "CallingStation"
///     }
/// }
/// ```
pub trait Agent: Send {
    /// Picks an action for `player_id`, which is the player to act.
    fn propose(&mut self, game: &Game, player_id: usize) -> Proposal;

    fn name(&self) -> &str;
}
