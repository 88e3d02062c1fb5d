//! Heuristic agent driven by hand ranks.
//!
//! The agent reads every live player's rank from the table, so it plays with
//! full information. It compares its own rank with the best rank among the
//! other live hands and turns the gap into a "temperature": a small gap
//! keeps it in the hand, a large one makes it fold.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use holdem_engine::game::Game;
use holdem_engine::lookup::MAX_HIGH_CARD;
use holdem_engine::player::ActionType;

use crate::{check_or_fold, Agent, Proposal};

const LEADER_FOLD: f64 = 0.05;
const LEADER_PASSIVE: f64 = 0.40;
const FOLD_BELOW: f64 = 0.82;
const RAISE_FROM: f64 = 0.95;
const BETA_ALPHA: usize = 2;
const BETA_BETA: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Fold,
    Passive,
    Raise,
}

#[derive(Debug, Clone)]
pub struct ScoreAgent {
    rng: ChaCha8Rng,
}

impl ScoreAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Maps the rank gap to the leader onto `[0, 1]`, with noise.
    ///
    /// # Arguments
    ///
    /// * `gap` - Own rank minus the best opposing rank, positive when behind
    ///
    /// # Returns
    ///
    /// Close to 1 when the gap is small, falling towards 0 as it grows
    fn temperature(&mut self, gap: u16) -> f64 {
        let d = f64::from(gap);
        let noise = self.rng.random_range(0.1..1.5) * d;
        let worst = f64::from(MAX_HIGH_CARD);
        let t = 1.0 - (d + noise).min(worst - 1.0) / worst;
        t * self.rng.random_range(0.9..1.0)
    }

    fn intent(&mut self, game: &Game, player_id: usize) -> Option<Intent> {
        let scores = game.player_hand_scores();
        let mine = *scores.get(&player_id)?;
        let best_other = scores
            .iter()
            .filter(|&(&id, _)| id != player_id)
            .map(|(_, &rank)| rank)
            .min();
        let roll: f64 = self.rng.random();

        let intent = match best_other {
            Some(best) if best < mine => {
                let t = self.temperature(mine.get() - best.get());
                trace!(player = player_id, temperature = t, "behind");
                if t < FOLD_BELOW {
                    Intent::Fold
                } else if t < RAISE_FROM {
                    Intent::Passive
                } else {
                    Intent::Raise
                }
            }
            _ if roll < LEADER_FOLD => Intent::Fold,
            _ if roll < LEADER_PASSIVE => Intent::Passive,
            _ => Intent::Raise,
        };
        Some(intent)
    }

    /// Second smallest of 51 uniforms, a Beta(2, 50) draw.
    fn beta_fraction(&mut self) -> f64 {
        let mut draws: Vec<f64> = (0..BETA_ALPHA + BETA_BETA - 1)
            .map(|_| self.rng.random())
            .collect();
        draws.sort_by(f64::total_cmp);
        draws[BETA_ALPHA - 1]
    }

    fn raise(&mut self, game: &Game, player_id: usize) -> Proposal {
        let bet = game.player_bet_amount(player_id);
        let chips = game.players()[player_id].chips();
        let sized = (self.beta_fraction() * f64::from(chips)).floor() as u32;
        let target = (bet + game.chips_to_call(player_id) + 1)
            .max(game.min_raise())
            .max(sized);
        if target >= bet + chips {
            Proposal::new(ActionType::AllIn)
        } else {
            Proposal::raise_to(target)
        }
    }
}

impl Agent for ScoreAgent {
    fn propose(&mut self, game: &Game, player_id: usize) -> Proposal {
        let to_call = game.chips_to_call(player_id);
        let passive = if to_call > 0 {
            Proposal::new(ActionType::Call)
        } else {
            Proposal::new(ActionType::Check)
        };
        let proposal = match self.intent(game, player_id) {
            Some(Intent::Raise) => {
                let raise = self.raise(game, player_id);
                // raising can be closed by a short all-in
                if game.validate_move(player_id, raise.action, raise.value) {
                    raise
                } else {
                    passive
                }
            }
            Some(Intent::Passive) => passive,
            Some(Intent::Fold) | None => Proposal::new(ActionType::Fold),
        };
        if game.validate_move(player_id, proposal.action, proposal.value) {
            proposal
        } else {
            check_or_fold(game, player_id)
        }
    }

    fn name(&self) -> &str {
        "ScoreAgent"
    }
}
