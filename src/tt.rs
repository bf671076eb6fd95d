//! Score cache for one search call.
//!
//! Entries are keyed by a 64-bit Fx hash of the position's canonical key.
//! Colliding positions share an entry; nothing compares the full key.

use std::hash::Hasher;

use rustc_hash::{FxHashMap, FxHasher};
use serde::{Deserialize, Serialize};

/// What a table entry is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyScheme {
    /// Placement and side to move only. A score stored at one remaining
    /// depth is returned for any other depth.
    #[default]
    Position,
    /// Placement, side to move and remaining depth.
    PositionAndDepth,
}

pub fn hash_key(canonical_key: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(canonical_key);
    hasher.finish()
}

#[derive(Debug, Default)]
pub struct TranspositionTable {
    scheme: KeyScheme,
    entries: FxHashMap<(u64, u32), i32>,
}

impl TranspositionTable {
    pub fn new(scheme: KeyScheme) -> Self {
        Self {
            scheme,
            entries: FxHashMap::default(),
        }
    }

    fn slot(&self, key: u64, depth: u32) -> (u64, u32) {
        match self.scheme {
            KeyScheme::Position => (key, 0),
            KeyScheme::PositionAndDepth => (key, depth),
        }
    }

    pub fn get(&self, key: u64, depth: u32) -> Option<i32> {
        self.entries.get(&self.slot(key, depth)).copied()
    }

    /// Later stores overwrite earlier ones.
    pub fn store(&mut self, key: u64, depth: u32, score: i32) {
        let slot = self.slot(key, depth);
        self.entries.insert(slot, score);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
