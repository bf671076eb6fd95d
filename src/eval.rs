//! Static material evaluation.

use crate::board::{Piece, Player, Position};

pub const KING_VALUE: i32 = 4;
pub const MAN_VALUE: i32 = 1;

#[inline]
pub fn piece_value(piece: Piece) -> i32 {
    if piece.king { KING_VALUE } else { MAN_VALUE }
}

/// Scores `position` for `perspective`: own material minus the opponent's.
pub fn evaluate(position: &Position, perspective: Player) -> i32 {
    position.pieces()
        .map(|(_, piece)| {
            let value = piece_value(piece);
            if piece.player == perspective { value } else { -value }
        })
        .sum()
}
