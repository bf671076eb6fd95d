//! The boundary to the rules library: whatever generates moves and applies
//! them implements [`GameState`]. The search only reads through this trait.

use std::fmt;

use thiserror::Error;

use crate::board::{Player, Position, Square};

/// Failures raised by a rules implementation.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },
    #[error("square {0} is not a playable square")]
    InvalidSquare(Square),
    #[error("square {0} is already occupied")]
    OccupiedSquare(Square),
    #[error("illegal move {mv} in {fen}")]
    IllegalMove { mv: String, fen: String },
    #[error("invalid game tree: {0}")]
    InvalidTree(String),
}

impl GameError {
    pub(crate) fn invalid_fen(fen: &str, reason: impl Into<String>) -> Self {
        GameError::InvalidFen { fen: fen.to_string(), reason: reason.into() }
    }
}

/// Legal moves split the way draughts rules classify them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMoves<M> {
    pub quiet: Vec<M>,
    pub captures: Vec<M>,
}

impl<M> Default for LegalMoves<M> {
    fn default() -> Self {
        Self { quiet: Vec::new(), captures: Vec::new() }
    }
}

pub trait GameState: Clone {
    type Move: Clone + fmt::Display;

    fn legal_moves(&self) -> Result<LegalMoves<Self::Move>, GameError>;

    /// Applies `mv` in place. Callers clone first when they need the parent.
    fn push(&mut self, mv: &Self::Move) -> Result<(), GameError>;

    fn has_player_won(&self, player: Player) -> bool;

    /// Stable serialization of placement and side to move, used as hash input.
    fn canonical_key(&self) -> Result<Vec<u8>, GameError>;

    fn turn(&self) -> Player;

    fn position(&self) -> &Position;
}
