//! Error types for command parsing and move validation.
//!
//! None of these are fatal: every one leaves the board untouched and the
//! game loop simply asks for the next command.

use thiserror::Error;

use crate::card::Card;
use crate::pile::PileId;

/// The command text did not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unexpected '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("command ends too early")]
    UnexpectedEnd,
    #[error("unexpected trailing input at position {pos}")]
    TrailingInput { pos: usize },
    #[error("no {kind} {index} (valid: 1-{max})")]
    IndexOutOfRange {
        kind: &'static str,
        index: u32,
        max: u32,
    },
    #[error("card count must be at least 1")]
    ZeroCount,
    #[error("card count is larger than the deck")]
    CountTooLarge,
}

/// The command parsed, but the rules of Klondike forbid it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("{0} is empty")]
    EmptySource(PileId),
    #[error("the top card of {0} is face-down")]
    FaceDownSource(PileId),
    #[error("{pile} has only {available} card(s), {requested} requested")]
    NotEnoughCards {
        pile: PileId,
        requested: usize,
        available: usize,
    },
    #[error("source and destination are both {0}")]
    SamePile(PileId),
    #[error("cards cannot be moved onto {0}")]
    InvalidDestination(PileId),
    #[error("the top card of {0} is face-down; turn it up first")]
    FaceDownDestination(PileId),
    #[error("only a king may go on an empty tableau, not {0}")]
    NotOnEmptyTableau(Card),
    #[error("{card} cannot go on {onto}")]
    TableauMismatch { card: Card, onto: Card },
    #[error("an empty foundation must start with an ace, not {0}")]
    NotAnAce(Card),
    #[error("{card} does not follow {onto} on a foundation")]
    FoundationMismatch { card: Card, onto: Card },
    #[error("stock and waste are both empty")]
    NothingToDeal,
    #[error("{0} has no card to turn up")]
    EmptyTableau(PileId),
}

/// Anything that can go wrong handling one command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid command: {0}")]
    Parse(#[from] ParseError),
    #[error("illegal move: {0}")]
    Rule(#[from] RuleViolation),
    #[error("the game is already won")]
    GameOver,
}
