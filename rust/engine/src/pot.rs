//! Pot and side-pot accounting.
//!
//! Chips committed during a hand are tracked per seat in a [`Ledger`]. The pot
//! list is never edited in place: it is rebuilt from the ledger, layered by
//! the totals of all-in players, whenever the ledger changes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::hand::HandRank;
use crate::player::PlayerState;

/// One layer of the hand's chips and the players who can win it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    amount: u32,
    raised: u32,
    cap: Option<u32>,
    player_amounts: BTreeMap<usize, u32>,
    player_amounts_without_remove: BTreeMap<usize, u32>,
    eligible: BTreeSet<usize>,
}

impl Pot {
    /// Settled chips: earlier rounds plus whatever folded players left behind.
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Bet level inside this pot for the current round.
    pub fn raised(&self) -> u32 {
        self.raised
    }

    /// Per-player ceiling of a side pot; `None` for the open top pot.
    pub fn cap(&self) -> Option<u32> {
        self.cap
    }

    /// Current-round commitments of players still in this pot.
    pub fn player_amounts(&self) -> &BTreeMap<usize, u32> {
        &self.player_amounts
    }

    /// Whole-hand commitments, folded players included.
    pub fn player_amounts_without_remove(&self) -> &BTreeMap<usize, u32> {
        &self.player_amounts_without_remove
    }

    pub fn eligible(&self) -> &BTreeSet<usize> {
        &self.eligible
    }

    pub fn player_amount(&self, player_id: usize) -> u32 {
        self.player_amounts.get(&player_id).copied().unwrap_or(0)
    }

    pub fn chips_to_call(&self, player_id: usize) -> u32 {
        self.raised.saturating_sub(self.player_amount(player_id))
    }

    /// Settled amount plus outstanding bets of the current round.
    pub fn total(&self) -> u32 {
        self.amount + self.player_amounts.values().sum::<u32>()
    }
}

/// Chips each seat has put in this hand, overall and in the current round.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    committed: Vec<u32>,
    round: Vec<u32>,
}

impl Ledger {
    pub fn new(seats: usize) -> Self {
        Self {
            committed: vec![0; seats],
            round: vec![0; seats],
        }
    }

    pub fn commit(&mut self, seat: usize, amount: u32) {
        self.committed[seat] += amount;
        self.round[seat] += amount;
    }

    pub fn committed(&self, seat: usize) -> u32 {
        self.committed.get(seat).copied().unwrap_or(0)
    }

    pub fn round(&self, seat: usize) -> u32 {
        self.round.get(seat).copied().unwrap_or(0)
    }

    /// Highest commitment of the current round.
    pub fn bet_level(&self) -> u32 {
        self.round.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.committed.iter().sum()
    }

    /// Moves current-round bets into the settled part of the pots.
    pub fn close_round(&mut self) {
        self.round.iter_mut().for_each(|r| *r = 0);
    }

    /// Lays the committed chips out as an ordered list of pots.
    ///
    /// Each distinct all-in total closes a layer; players qualify for a layer
    /// when they are still in the hand and either reached its cap or can still
    /// bet. A final open layer exists while chips sit above the last cap or at
    /// least two players can keep betting.
    pub fn build_pots(&self, states: &[PlayerState]) -> Vec<Pot> {
        let caps: BTreeSet<u32> = states
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == PlayerState::AllIn)
            .map(|(i, _)| self.committed(i))
            .collect();

        let mut layers: Vec<(u32, Option<u32>)> = Vec::with_capacity(caps.len() + 1);
        let mut lo = 0;
        for &cap in &caps {
            layers.push((lo, Some(cap)));
            lo = cap;
        }
        let above = self.committed.iter().any(|&c| c > lo);
        let bettors = states.iter().filter(|s| s.is_active()).count();
        if layers.is_empty() || above || bettors >= 2 {
            layers.push((lo, None));
        }

        layers
            .into_iter()
            .map(|(lo, hi)| self.layer(lo, hi, states))
            .collect()
    }

    fn layer(&self, lo: u32, hi: Option<u32>, states: &[PlayerState]) -> Pot {
        let share = |x: u32| match hi {
            Some(h) => x.clamp(lo, h) - lo,
            None => x.saturating_sub(lo),
        };
        let mut pot = Pot {
            cap: hi.map(|h| h - lo),
            ..Pot::default()
        };
        for (seat, &state) in states.iter().enumerate() {
            let total = self.committed(seat);
            let before = share(total - self.round(seat));
            let now = share(total);
            let this_round = now - before;

            if now > 0 {
                pot.player_amounts_without_remove.insert(seat, now);
            }
            pot.raised = pot.raised.max(this_round);

            let qualifies = state.in_pot()
                && (state.is_active() || hi.is_some_and(|h| total >= h));
            if qualifies {
                pot.eligible.insert(seat);
                pot.amount += before;
                if this_round > 0 {
                    pot.player_amounts.insert(seat, this_round);
                }
            } else {
                pot.amount += now;
            }
        }
        pot
    }
}

/// Result of settling one pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    pub amount: u32,
    /// Winning rank, when hands were compared
    pub rank: Option<HandRank>,
    pub winners: Vec<usize>,
}

/// Picks the winners of a pot.
///
/// `seat_order` lists seats starting left of the button; it orders the
/// winners, which decides who receives odd chips.
pub fn award(pot: &Pot, scores: &BTreeMap<usize, HandRank>, seat_order: &[usize]) -> PotAward {
    let mut contenders: Vec<usize> = seat_order
        .iter()
        .copied()
        .filter(|id| pot.eligible.contains(id))
        .collect();
    if contenders.is_empty() {
        // Nobody left to claim it: the chips go back to whoever put in the most.
        let top = pot
            .player_amounts_without_remove
            .values()
            .copied()
            .max()
            .unwrap_or(0);
        contenders = seat_order
            .iter()
            .copied()
            .filter(|id| pot.player_amounts_without_remove.get(id) == Some(&top))
            .collect();
    }

    // A single claimant takes the pot without a showdown.
    let best = if contenders.len() > 1 {
        contenders.iter().filter_map(|id| scores.get(id)).min().copied()
    } else {
        None
    };
    let winners = match best {
        Some(rank) => contenders
            .into_iter()
            .filter(|id| scores.get(id) == Some(&rank))
            .collect(),
        None => contenders,
    };
    PotAward {
        amount: pot.total(),
        rank: best,
        winners,
    }
}

/// Splits `amount` evenly; the remainder goes one chip at a time from the
/// front of `winners`.
pub fn split(amount: u32, winners: &[usize]) -> Vec<(usize, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as u32;
    let (share, odd) = (amount / n, amount % n);
    winners
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, share + u32::from((i as u32) < odd)))
        .collect()
}
