use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::ActionType;
use crate::pot::PotAward;

/// Stage of a single hand. Moves strictly forward within a hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum HandPhase {
    /// Button, blinds and dealing
    Prehand,
    /// Hole cards dealt, first betting round
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
    /// Pots awarded
    Settle,
}

impl HandPhase {
    pub fn next(self) -> HandPhase {
        match self {
            HandPhase::Prehand => HandPhase::Preflop,
            HandPhase::Preflop => HandPhase::Flop,
            HandPhase::Flop => HandPhase::Turn,
            HandPhase::Turn => HandPhase::River,
            HandPhase::River | HandPhase::Settle => HandPhase::Settle,
        }
    }

    /// Community cards revealed on entering this phase.
    pub fn new_cards(self) -> usize {
        match self {
            HandPhase::Flop => 3,
            HandPhase::Turn | HandPhase::River => 1,
            HandPhase::Prehand | HandPhase::Preflop | HandPhase::Settle => 0,
        }
    }

    pub fn is_betting_round(self) -> bool {
        matches!(
            self,
            HandPhase::Preflop | HandPhase::Flop | HandPhase::Turn | HandPhase::River
        )
    }
}

/// Records a single player decision during a betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerAction {
    /// Seat that acted
    pub player_id: usize,
    /// The action taken by the player
    pub action_type: ActionType,
    /// Raise-to total for RAISE, `None` otherwise
    pub value: Option<u32>,
    /// Chips moved from the player's stack
    pub chips: u32,
}

/// Blind postings and seat roles. Not a betting round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PrehandHistory {
    pub btn_loc: usize,
    pub sb_loc: usize,
    pub bb_loc: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Chips posted per seat, in posting order
    pub blinds: Vec<(usize, u32)>,
    /// Stacks before blinds were posted
    pub player_chips: BTreeMap<usize, u32>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BettingRoundHistory {
    /// Board cards revealed when the round began
    pub new_cards: Vec<Card>,
    pub actions: Vec<PlayerAction>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SettleHistory {
    /// Board cards dealt without betting when everyone left was all-in
    pub new_cards: Vec<Card>,
    /// Pot index to its award
    pub pot_winners: BTreeMap<usize, PotAward>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PhaseHistory {
    Prehand(PrehandHistory),
    Betting(BettingRoundHistory),
    Settle(SettleHistory),
}

/// Per-hand log keyed by phase. Entries are only ever appended.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandHistory {
    entries: BTreeMap<HandPhase, PhaseHistory>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, phase: HandPhase) -> Option<&PhaseHistory> {
        self.entries.get(&phase)
    }

    pub fn prehand(&self) -> Option<&PrehandHistory> {
        match self.entries.get(&HandPhase::Prehand) {
            Some(PhaseHistory::Prehand(p)) => Some(p),
            _ => None,
        }
    }

    pub fn round(&self, phase: HandPhase) -> Option<&BettingRoundHistory> {
        match self.entries.get(&phase) {
            Some(PhaseHistory::Betting(r)) => Some(r),
            _ => None,
        }
    }

    pub fn settle(&self) -> Option<&SettleHistory> {
        match self.entries.get(&HandPhase::Settle) {
            Some(PhaseHistory::Settle(s)) => Some(s),
            _ => None,
        }
    }

    /// Most recent entry with its phase.
    pub fn latest(&self) -> Option<(HandPhase, &PhaseHistory)> {
        self.entries.iter().next_back().map(|(p, h)| (*p, h))
    }

    pub fn phases(&self) -> impl Iterator<Item = HandPhase> + '_ {
        self.entries.keys().copied()
    }

    /// Every betting action of the hand in order; blind postings excluded.
    pub fn actions(&self) -> impl Iterator<Item = (HandPhase, &PlayerAction)> + '_ {
        self.entries.iter().flat_map(|(phase, entry)| {
            let actions: &[PlayerAction] = match entry {
                PhaseHistory::Betting(r) => &r.actions,
                PhaseHistory::Prehand(_) | PhaseHistory::Settle(_) => &[],
            };
            actions.iter().map(move |a| (*phase, a))
        })
    }

    /// Last betting action of each player this hand.
    pub fn last_actions(&self) -> BTreeMap<usize, PlayerAction> {
        self.actions()
            .map(|(_, a)| (a.player_id, *a))
            .collect()
    }

    pub(crate) fn record_prehand(&mut self, prehand: PrehandHistory) {
        self.entries
            .insert(HandPhase::Prehand, PhaseHistory::Prehand(prehand));
    }

    pub(crate) fn open_round(&mut self, phase: HandPhase, new_cards: Vec<Card>) {
        self.entries.insert(
            phase,
            PhaseHistory::Betting(BettingRoundHistory {
                new_cards,
                actions: Vec::new(),
            }),
        );
    }

    pub(crate) fn push_action(&mut self, phase: HandPhase, action: PlayerAction) {
        if let Some(PhaseHistory::Betting(r)) = self.entries.get_mut(&phase) {
            r.actions.push(action);
        }
    }

    pub(crate) fn record_settle(&mut self, settle: SettleHistory) {
        self.entries
            .insert(HandPhase::Settle, PhaseHistory::Settle(settle));
    }
}
