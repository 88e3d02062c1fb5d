use crate::errors::GameError;
use crate::player::{ActionType as A, PlayerState};

/// An action that passed validation, with the chips it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Raise { to: u32, chips: u32 },
    AllIn(u32),
}

impl ValidatedAction {
    pub fn chips(self) -> u32 {
        match self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(c) | ValidatedAction::AllIn(c) => c,
            ValidatedAction::Raise { chips, .. } => chips,
        }
    }
}

/// What the acting player faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Situation {
    pub player_id: usize,
    pub state: PlayerState,
    pub chips: u32,
    /// Chips needed to match the current bet
    pub to_call: u32,
    /// Chips already put in this round
    pub bet_amount: u32,
    /// Smallest legal raise-to total
    pub min_raise_to: u32,
    /// False after an all-in short of a full raise, for players who had
    /// already acted on the bet it raised
    pub can_raise: bool,
}

/// Smallest legal "raise to" total: the current level plus the larger of the
/// big blind and the last full raise.
pub fn min_raise_to(bet_level: u32, big_blind: u32, last_raise: u32) -> u32 {
    bet_level + big_blind.max(last_raise)
}

/// Validates an action for the player to act.
///
/// Never substitutes one action for another: an action that does not fit
/// the situation is an error, including a CALL with nothing to call and a
/// RAISE above the stack. When raising is closed, an ALL_IN is only accepted
/// if it does not exceed the call.
///
/// # Examples
///
/// ```
/// use holdem_engine::player::{ActionType, PlayerState};
/// use holdem_engine::rules::{validate_action, Situation, ValidatedAction};
///
/// let s = Situation {
///     player_id: 0,
///     state: PlayerState::ToCall,
///     chips: 95,
///     to_call: 5,
///     bet_amount: 5,
///     min_raise_to: 20,
///     can_raise: true,
/// };
/// assert_eq!(validate_action(&s, ActionType::Call, None), Ok(ValidatedAction::Call(5)));
/// assert_eq!(
///     validate_action(&s, ActionType::Raise, Some(30)),
///     Ok(ValidatedAction::Raise { to: 30, chips: 25 })
/// );
/// assert!(validate_action(&s, ActionType::Check, None).is_err());
/// assert!(validate_action(&s, ActionType::Raise, Some(15)).is_err());
/// ```
pub fn validate_action(
    s: &Situation,
    action: A,
    value: Option<u32>,
) -> Result<ValidatedAction, GameError> {
    if !s.state.is_active() || s.chips == 0 {
        return Err(GameError::PlayerCannotAct(s.player_id));
    }
    if action != A::Raise && value.is_some() {
        return Err(GameError::UnexpectedValue(action));
    }
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if s.to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CheckFacingBet { to_call: s.to_call })
            }
        }
        A::Call => {
            if s.to_call == 0 {
                Err(GameError::NothingToCall)
            } else {
                Ok(ValidatedAction::Call(s.to_call.min(s.chips)))
            }
        }
        A::Raise => {
            let to = value.ok_or(GameError::MissingRaiseValue)?;
            if !s.can_raise {
                return Err(GameError::RaiseNotReopened(s.player_id));
            }
            if to < s.min_raise_to {
                return Err(GameError::InvalidBetAmount {
                    amount: to,
                    minimum: s.min_raise_to,
                });
            }
            let maximum = s.bet_amount + s.chips;
            if to > maximum {
                return Err(GameError::InsufficientChips {
                    amount: to,
                    maximum,
                });
            }
            Ok(ValidatedAction::Raise {
                to,
                chips: to - s.bet_amount,
            })
        }
        A::AllIn => {
            if !s.can_raise && s.chips > s.to_call {
                return Err(GameError::RaiseNotReopened(s.player_id));
            }
            Ok(ValidatedAction::AllIn(s.chips))
        }
    }
}
