use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::agent::Agent;
use crate::errors::GameError;
use crate::game::{Game, GameConfig};
use crate::player::ActionType;
use crate::pot::PotAward;

/// Summary of one finished hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandOutcome {
    pub hand_number: u64,
    pub pot_winners: BTreeMap<usize, PotAward>,
    /// Stack change per seat over the hand
    pub chip_deltas: Vec<i64>,
    /// Proposals replaced by CHECK or FOLD
    pub corrections: u32,
}

/// Runs a game by asking one agent per seat for its moves.
///
/// Proposals that fail validation are replaced by CHECK when that is legal
/// and FOLD otherwise.
///
/// # Examples
///
/// ```
/// use holdem_engine::agent::{Agent, Proposal};
/// use holdem_engine::engine::Engine;
/// use holdem_engine::game::{Game, GameConfig};
/// use holdem_engine::player::ActionType;
///
/// struct Folder;
/// impl Agent for Folder {
///     fn propose(&mut self, _: &Game, _: usize) -> Proposal {
///         Proposal::new(ActionType::Fold)
///     }
///     fn name(&self) -> &str {
///         "Folder"
///     }
/// }
///
/// let config = GameConfig { max_players: 2, ..GameConfig::default() };
/// let agents: Vec<Box<dyn Agent>> = vec![Box::new(Folder), Box::new(Folder)];
/// let mut engine = Engine::new(config, agents).unwrap();
/// let outcome = engine.play_hand().unwrap();
/// assert_eq!(outcome.chip_deltas.iter().sum::<i64>(), 0);
/// ```
pub struct Engine {
    game: Game,
    agents: Vec<Box<dyn Agent>>,
}

impl Engine {
    pub fn new(config: GameConfig, agents: Vec<Box<dyn Agent>>) -> Result<Self, GameError> {
        if agents.len() != config.max_players {
            return Err(GameError::InvalidConfig(format!(
                "{} agents for {} seats",
                agents.len(),
                config.max_players
            )));
        }
        Ok(Self {
            game: Game::new(config)?,
            agents,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn agent_names(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.name()).collect()
    }

    /// Plays one hand to settlement, re-staking busted seats first when the
    /// table cannot run.
    pub fn play_hand(&mut self) -> Result<HandOutcome, GameError> {
        if !self.game.is_game_running() {
            self.game.reset_game()?;
        }
        let before: Vec<u32> = self.game.players().iter().map(|p| p.chips()).collect();
        self.game.start_hand()?;

        let mut corrections = 0;
        while let Some(player_id) = self.game.current_player() {
            let agent = &mut self.agents[player_id];
            let proposal = agent.propose(&self.game, player_id);
            let (action, value) =
                if self
                    .game
                    .validate_move(player_id, proposal.action, proposal.value)
                {
                    (proposal.action, proposal.value)
                } else {
                    let fallback = if self.game.validate_move(player_id, ActionType::Check, None) {
                        ActionType::Check
                    } else {
                        ActionType::Fold
                    };
                    warn!(
                        player = player_id,
                        agent = agent.name(),
                        proposed = ?proposal.action,
                        value = ?proposal.value,
                        ?fallback,
                        "illegal proposal replaced"
                    );
                    corrections += 1;
                    (fallback, None)
                };
            self.game.take_action(action, value)?;
        }

        let chip_deltas = self
            .game
            .players()
            .iter()
            .zip(&before)
            .map(|(p, &b)| i64::from(p.chips()) - i64::from(b))
            .collect();
        let pot_winners = self
            .game
            .hand_history()
            .settle()
            .map(|s| s.pot_winners.clone())
            .unwrap_or_default();
        debug!(hand = self.game.hand_number(), corrections, "hand finished");
        Ok(HandOutcome {
            hand_number: self.game.hand_number(),
            pot_winners,
            chip_deltas,
            corrections,
        })
    }

    pub fn play(&mut self, hands: usize) -> Result<Vec<HandOutcome>, GameError> {
        (0..hands).map(|_| self.play_hand()).collect()
    }
}
