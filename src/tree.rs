//! A [`GameState`] over an explicit position graph read from JSON.
//!
//! ```json
//! {
//!   "start": "W:W31,32:B1,2",
//!   "nodes": [
//!     { "fen": "W:W31,32:B1,2",
//!       "quiet": [ { "move": "31-27", "to": "B:W27,32:B1,2" } ],
//!       "captures": [],
//!       "winner": null }
//!   ]
//! }
//! ```
//!
//! FENs are normalized when the tree is loaded, so two edges that spell the
//! same position differently land on the same node.

use std::sync::Arc;

use log::debug;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::board::{Fen, Player, Position};
use crate::game::{GameError, GameState, LegalMoves};

#[derive(Deserialize)]
struct TreeFile {
    start: Fen,
    nodes: Vec<NodeFile>,
}

#[derive(Deserialize)]
struct NodeFile {
    fen: Fen,
    #[serde(default)]
    quiet: Vec<EdgeFile>,
    #[serde(default)]
    captures: Vec<EdgeFile>,
    #[serde(default)]
    winner: Option<Player>,
}

#[derive(Deserialize)]
struct EdgeFile {
    #[serde(rename = "move")]
    mv: String,
    to: Fen,
}

#[derive(Debug, Clone)]
struct Edge {
    mv: String,
    to: String,
}

#[derive(Debug, Clone, Default)]
struct Node {
    quiet: Vec<Edge>,
    captures: Vec<Edge>,
    winner: Option<Player>,
}

#[derive(Debug)]
pub struct GameTree {
    start: Fen,
    nodes: FxHashMap<String, Node>,
}

fn edges(edges: Vec<EdgeFile>) -> Vec<Edge> {
    edges.into_iter().map(|edge| Edge { mv: edge.mv, to: edge.to.to_string() }).collect()
}

impl GameTree {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let file: TreeFile = serde_json::from_str(json).map_err(|e| GameError::InvalidTree(e.to_string()))?;
        Self::from_file(file)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, GameError> {
        let file: TreeFile = serde_json::from_value(value).map_err(|e| GameError::InvalidTree(e.to_string()))?;
        Self::from_file(file)
    }

    fn from_file(file: TreeFile) -> Result<Self, GameError> {
        let mut nodes = FxHashMap::with_capacity_and_hasher(file.nodes.len(), Default::default());
        for node in file.nodes {
            let fen = node.fen.to_string();
            let node = Node {
                quiet: edges(node.quiet),
                captures: edges(node.captures),
                winner: node.winner,
            };
            if nodes.insert(fen.clone(), node).is_some() {
                return Err(GameError::InvalidTree(format!("duplicate node {}", fen)));
            }
        }
        debug!("loaded game tree with {} nodes", nodes.len());
        Ok(Self { start: file.start, nodes })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The game at the tree's start position.
    pub fn start(self: &Arc<Self>) -> TreeGame {
        TreeGame {
            tree: Arc::clone(self),
            key: self.start.to_string(),
            fen: self.start.clone(),
        }
    }
}

/// A position inside a [`GameTree`]. Positions missing from the tree have no moves.
#[derive(Debug, Clone)]
pub struct TreeGame {
    tree: Arc<GameTree>,
    key: String,
    fen: Fen,
}

impl TreeGame {
    fn node(&self) -> Option<&Node> {
        self.tree.nodes.get(&self.key)
    }

    pub fn fen(&self) -> &Fen {
        &self.fen
    }
}

impl GameState for TreeGame {
    type Move = String;

    fn legal_moves(&self) -> Result<LegalMoves<String>, GameError> {
        Ok(match self.node() {
            Some(node) => LegalMoves {
                quiet: node.quiet.iter().map(|edge| edge.mv.clone()).collect(),
                captures: node.captures.iter().map(|edge| edge.mv.clone()).collect(),
            },
            None => LegalMoves::default(),
        })
    }

    fn push(&mut self, mv: &String) -> Result<(), GameError> {
        let to = self.node()
            .and_then(|node| node.quiet.iter().chain(&node.captures).find(|edge| &edge.mv == mv))
            .map(|edge| edge.to.clone())
            .ok_or_else(|| GameError::IllegalMove { mv: mv.clone(), fen: self.key.clone() })?;
        self.fen = to.parse()?;
        self.key = to;
        Ok(())
    }

    fn has_player_won(&self, player: Player) -> bool {
        self.node().and_then(|node| node.winner) == Some(player)
    }

    fn canonical_key(&self) -> Result<Vec<u8>, GameError> {
        Ok(self.key.as_bytes().to_vec())
    }

    fn turn(&self) -> Player {
        self.fen.turn
    }

    fn position(&self) -> &Position {
        &self.fen.position
    }
}
