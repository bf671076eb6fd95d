use std::time::{Duration, Instant};

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Player;
use crate::eval::evaluate;
use crate::game::{GameError, GameState};
use crate::tt::{hash_key, KeyScheme, TranspositionTable};

pub const DEFAULT_DEPTH: u32 = 3;
pub const WIN_SCORE: i32 = 100;
pub const LOSS_SCORE: i32 = -100;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no legal quiet move in the root position")]
    NoLegalMove,
    #[error(transparent)]
    Game(#[from] GameError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Depth searched below each root move.
    pub depth: u32,
    pub key_scheme: KeyScheme,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            key_scheme: KeyScheme::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchInfo {
    pub score: i32,
    pub evaluations: u64,
    pub table_size: usize,
    pub elapsed_ms: u64,
}

/// What the engine hands back to the game driver.
#[derive(Debug, Clone, Serialize)]
pub struct PlayResult<M> {
    pub best_move: M,
    pub ponder: Option<M>,
    pub info: SearchInfo,
}

/// Per-call search state. Dropping it discards the table and the counters.
pub struct Search {
    table: TranspositionTable,
    evaluations: u64,
}

impl Search {
    pub fn new(key_scheme: KeyScheme) -> Self {
        Self {
            table: TranspositionTable::new(key_scheme),
            evaluations: 0,
        }
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    /// Minimax over quiet moves to `depth`, scored for `perspective`.
    pub fn search_recursive<G: GameState>(&mut self, state: &G, depth: u32, perspective: Player) -> Result<i32, SearchError> {
        let key = hash_key(&state.canonical_key()?);
        if let Some(score) = self.table.get(key, depth) {
            trace!("table hit {:016x} at depth {}: {}", key, depth, score);
            return Ok(score);
        }

        if depth == 0 {
            let score = evaluate(state.position(), perspective);
            self.evaluations += 1;
            self.table.store(key, depth, score);
            return Ok(score);
        }

        // captures are not part of the tree
        let quiet_moves = state.legal_moves()?.quiet;
        if quiet_moves.is_empty() {
            return Ok(if state.has_player_won(perspective) { WIN_SCORE } else { LOSS_SCORE });
        }

        let mut scores = Vec::with_capacity(quiet_moves.len());
        for mv in &quiet_moves {
            let mut child = state.clone();
            child.push(mv)?;
            scores.push(self.search_recursive(&child, depth - 1, perspective)?);
        }

        let best = if state.turn() == perspective {
            scores.into_iter().max()
        } else {
            scores.into_iter().min()
        };
        let score = best.unwrap_or(LOSS_SCORE);
        self.table.store(key, depth, score);
        Ok(score)
    }
}

pub struct Engine {
    config: SearchConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Engine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Picks the root quiet move with the best minimax score.
    ///
    /// Ties go to the move enumerated first. `time_limit` is not enforced;
    /// cost depends only on branching factor and the configured depth.
    pub fn choose_move<G: GameState>(&self, state: &G, time_limit: Option<Duration>) -> Result<PlayResult<G::Move>, SearchError> {
        let start = Instant::now();
        if let Some(limit) = time_limit {
            debug!("time limit of {:?} is not enforced", limit);
        }

        let perspective = state.turn();
        let moves = state.legal_moves()?.quiet;
        if moves.is_empty() {
            return Err(SearchError::NoLegalMove);
        }

        let mut search = Search::new(self.config.key_scheme);
        let mut scores = Vec::with_capacity(moves.len());
        for mv in &moves {
            let mut child = state.clone();
            child.push(mv)?;
            let score = search.search_recursive(&child, self.config.depth, perspective)?;
            debug!("root move {} scored {}", mv, score);
            scores.push(score);
        }

        // first maximum wins
        let (best_index, best_score) = scores.iter().copied().enumerate()
            .fold((0, scores[0]), |best, (i, score)| if score > best.1 { (i, score) } else { best });
        let best_move = moves[best_index].clone();

        let info = SearchInfo {
            score: best_score,
            evaluations: search.evaluations(),
            table_size: search.table().len(),
            elapsed_ms: start.elapsed().as_millis() as u64,
        };
        info!("Best move: {}, with score: {} out of {} positions calculated.", best_move, info.score, info.evaluations);
        info!("{} positions are stored in transposition table.", info.table_size);
        info!("search for {} took {:?}", perspective, start.elapsed());

        Ok(PlayResult { best_move, ponder: None, info })
    }
}
