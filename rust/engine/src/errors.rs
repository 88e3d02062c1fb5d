use thiserror::Error;

use crate::player::ActionType;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card token: {0:?}")]
    InvalidCard(String),
    #[error("Invalid deck: {0}")]
    InvalidDeck(String),
    #[error("Cannot draw {requested} cards, only {remaining} remain")]
    DeckUnderflow { requested: usize, remaining: usize },
    #[error("Cannot evaluate {hole} hole cards with {board} board cards")]
    InvalidHandSize { hole: usize, board: usize },
    #[error("Invalid game configuration: {0}")]
    InvalidConfig(String),
    #[error("Hand already in progress")]
    HandInProgress,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Not enough players with chips to start a hand")]
    NotEnoughPlayers,
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Player {0} cannot act in the current state")]
    PlayerCannotAct(usize),
    #[error("Player {0} may not raise: the last all-in was short of a full raise")]
    RaiseNotReopened(usize),
    #[error("Cannot check while facing {to_call} chips")]
    CheckFacingBet { to_call: u32 },
    #[error("Nothing to call")]
    NothingToCall,
    #[error("{0:?} takes no value")]
    UnexpectedValue(ActionType),
    #[error("Raise requires a value")]
    MissingRaiseValue,
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("Raise to {amount} exceeds the player's maximum of {maximum}")]
    InsufficientChips { amount: u32, maximum: u32 },
    #[error("Illegal action {action:?} ({value:?}) for player {player_id}: {reason}")]
    IllegalAction {
        player_id: usize,
        action: ActionType,
        value: Option<u32>,
        reason: String,
    },
}
