use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use holdem_engine::game::Game;
use holdem_engine::player::ActionType;

use crate::{check_or_fold, Agent, Proposal};

const MAX_TRIES: usize = 32;

/// Picks weighted random moves and keeps drawing until the table
/// accepts one.
///
/// Weights: 15% fold, 15% check, 10% call, 60% raise. A raise goes to the
/// current bet plus the call amount plus 2 to 15 chips, and becomes an
/// all-in when that reaches the stack.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn sample(&mut self, game: &Game, player_id: usize) -> Proposal {
        let roll: f64 = self.rng.random();
        if roll < 0.15 {
            return Proposal::new(ActionType::Fold);
        }
        if roll < 0.30 {
            return Proposal::new(ActionType::Check);
        }
        if roll < 0.40 {
            return Proposal::new(ActionType::Call);
        }
        let bet = game.player_bet_amount(player_id);
        let stack = bet + game.players()[player_id].chips();
        let target = bet + game.chips_to_call(player_id) + self.rng.random_range(2..=15);
        if target >= stack {
            Proposal::new(ActionType::AllIn)
        } else {
            Proposal::raise_to(target)
        }
    }
}

impl Agent for RandomAgent {
    fn propose(&mut self, game: &Game, player_id: usize) -> Proposal {
        for attempt in 0..MAX_TRIES {
            let proposal = self.sample(game, player_id);
            if game.validate_move(player_id, proposal.action, proposal.value) {
                return proposal;
            }
            trace!(player = player_id, attempt, ?proposal, "resampling");
        }
        check_or_fold(game, player_id)
    }

    fn name(&self) -> &str {
        "RandomAgent"
    }
}
