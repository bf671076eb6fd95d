//! Fixed-depth minimax for 10x10 draughts with a per-search transposition table.
//!
//! The rules live behind [`game::GameState`]; this crate evaluates, searches and
//! picks a move. [`tree::TreeGame`] is a ready-made state over an explicit
//! position graph.

pub mod board;
pub mod engine;
pub mod eval;
pub mod game;
pub mod tree;
pub mod tt;

pub use board::{Fen, Piece, Player, Position};
pub use engine::{Engine, PlayResult, Search, SearchConfig, SearchError, SearchInfo};
pub use eval::evaluate;
pub use game::{GameError, GameState, LegalMoves};
pub use tree::{GameTree, TreeGame};
pub use tt::{KeyScheme, TranspositionTable};
