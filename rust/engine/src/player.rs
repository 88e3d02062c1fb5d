use serde::{Deserialize, Serialize};

/// A seat's eligibility to act in the current betting round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    /// Has acted and matched the current bet
    In,
    /// Still owes a decision this round
    ToCall,
    /// No chips left; can still win pots
    AllIn,
    /// Folded
    Out,
    /// Not dealt into this hand
    Skip,
}

impl PlayerState {
    /// Can still take actions this hand.
    pub fn is_active(self) -> bool {
        matches!(self, PlayerState::In | PlayerState::ToCall)
    }

    /// Still holds a claim on at least one pot.
    pub fn in_pot(self) -> bool {
        matches!(
            self,
            PlayerState::In | PlayerState::ToCall | PlayerState::AllIn
        )
    }
}

/// Represents a player action during a betting round.
/// RAISE carries a "raise to" total for the round; the rest take no value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if no bet to call)
    Check,
    /// Call the current bet
    Call,
    /// Raise the round's bet level to the given total
    Raise,
    /// Bet all remaining chips
    AllIn,
}

impl ActionType {
    pub const ALL: [ActionType; 5] = [
        ActionType::Fold,
        ActionType::Check,
        ActionType::Call,
        ActionType::Raise,
        ActionType::AllIn,
    ];
}

/// A seat at the table. Chips change only through the game's action
/// application and settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: usize,
    chips: u32,
    state: PlayerState,
    last_pot: usize,
}

impl Player {
    pub fn new(id: usize, chips: u32) -> Self {
        Self {
            id,
            chips,
            state: PlayerState::Skip,
            last_pot: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn state(&self) -> PlayerState {
        self.state
    }
    /// Index of the highest pot this player can win.
    pub fn last_pot(&self) -> usize {
        self.last_pot
    }

    pub(crate) fn set_state(&mut self, state: PlayerState) {
        self.state = state;
    }

    pub(crate) fn set_last_pot(&mut self, pot: usize) {
        self.last_pot = pot;
    }

    pub(crate) fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }

    pub(crate) fn set_chips(&mut self, amount: u32) {
        self.chips = amount;
    }

    /// Moves up to `amount` chips off the stack and returns how many moved.
    /// An emptied stack puts a dealt player all-in.
    pub(crate) fn bet(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        if self.chips == 0 && self.state.is_active() {
            self.state = PlayerState::AllIn;
        }
        paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bet_caps_at_stack_and_goes_all_in() {
        let mut p = Player::new(0, 30);
        p.set_state(PlayerState::ToCall);
        assert_eq!(p.bet(10), 10);
        assert_eq!(p.state(), PlayerState::ToCall);
        assert_eq!(p.bet(50), 20);
        assert_eq!(p.chips(), 0);
        assert_eq!(p.state(), PlayerState::AllIn);
    }

    #[test]
    fn state_predicates() {
        assert!(PlayerState::ToCall.is_active());
        assert!(!PlayerState::AllIn.is_active());
        assert!(PlayerState::AllIn.in_pot());
        assert!(!PlayerState::Out.in_pot());
        assert!(!PlayerState::Skip.in_pot());
    }
}
