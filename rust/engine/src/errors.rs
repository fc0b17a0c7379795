use thiserror::Error;

use crate::game::Phase;
use crate::player::ActionKind;

/// Rejection of a betting action. Recoverable: the caller decides what to do
/// instead (typically an auto-fold), the engine never substitutes one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Seat {seat} cannot act (folded, all-in, or eliminated)")]
    CannotAct { seat: usize },
    #[error("Action {kind} is not valid for seat {seat} (valid: {valid:?})")]
    NotAllowed {
        seat: usize,
        kind: ActionKind,
        valid: Vec<ActionKind>,
    },
    #[error("Raise requires an amount")]
    MissingAmount,
    #[error("Raise to {amount} is below minimum raise to {minimum} (all-in for {all_in} is also valid)")]
    BelowMinimum { amount: u32, minimum: u32, all_in: u32 },
    #[error("Raise to {amount} exceeds maximum of {maximum}")]
    AboveMaximum { amount: u32, maximum: u32 },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("Cannot deal {count} cards (must be >= 1)")]
    InvalidCount { count: usize },
    #[error("Cannot take {requested} cards, only {remaining} remaining")]
    Exhausted { requested: usize, remaining: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("Expected 2 hole cards, got {count}")]
    HoleCards { count: usize },
    #[error("Expected 3-5 community cards, got {count}")]
    BoardCards { count: usize },
    #[error("Duplicate card in hand")]
    DuplicateCard,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("No player sits at seat {0}")]
    UnknownSeat(usize),
    #[error("Invalid seating: {0}")]
    InvalidSeating(String),
    #[error("At least 2 players with chips are needed to deal, found {found}")]
    NotEnoughPlayers { found: usize },
    #[error("{amount} chips are still in the pot")]
    PotNotAwarded { amount: u32 },
    #[error("Expected exactly 1 active player, found {found}")]
    ExpectedSingleActivePlayer { found: usize },
    #[error("No players with hole cards at showdown")]
    NoShowdownHands,
    #[error("Pot {index} ({amount} chips) has no winners")]
    UnawardedPot { index: usize, amount: u32 },
    #[error("Operation not allowed in phase {0}")]
    InvalidPhase(Phase),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
