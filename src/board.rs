use std::fmt;
use std::str::FromStr;

use bitvec::{prelude::*, slice::IterOnes};
use serde::de::{Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::game::GameError;

const ROWS: usize = 10;
const SQUARES_PER_ROW: usize = 5;
pub const SQUARES: usize = ROWS * SQUARES_PER_ROW;
pub type BitBoard = BitArr!(for SQUARES, in u8, Lsb0);
// bit i is playable square i + 1, numbered row by row from black's back rank

/// Square number on the 10x10 board, 1..=50.
pub type Square = u8;

pub trait SquareSet {
    fn empty() -> Self;
    fn set_square(&mut self, square: Square, value: bool);
    fn has_square(&self, square: Square) -> bool;
    type IterSquares<'a>: Iterator<Item=Square> + 'a where Self: 'a;
    fn iter_squares(&'_ self) -> Self::IterSquares<'_>;
}

impl SquareSet for BitBoard {
    fn empty() -> Self {
        bitarr!(u8, Lsb0; 0; SQUARES)
    }

    fn set_square(&mut self, square: Square, value: bool) {
        self.set(square as usize - 1, value);
    }

    fn has_square(&self, square: Square) -> bool {
        self[square as usize - 1]
    }

    type IterSquares<'a> = std::iter::Map<IterOnes<'a, u8, Lsb0>, fn(usize) -> Square>;

    fn iter_squares(&'_ self) -> Self::IterSquares<'_> {
        self.iter_ones().map(|idx| (idx + 1) as Square)
    }
}

pub fn is_valid_square(square: Square) -> bool {
    (1..=SQUARES as Square).contains(&square)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    fn letter(self) -> char {
        match self {
            Player::White => 'W',
            Player::Black => 'B',
        }
    }

    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "W" | "w" => Some(Player::White),
            "B" | "b" => Some(Player::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => f.write_str("white"),
            Player::Black => f.write_str("black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub player: Player,
    pub king: bool,
}

impl Piece {
    pub fn man(player: Player) -> Self {
        Self { player, king: false }
    }

    pub fn king(player: Player) -> Self {
        Self { player, king: true }
    }
}

/// Piece placement on the 50 playable squares. Turn is not part of it.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Position {
    white_squares: BitBoard,
    black_squares: BitBoard,
    king_squares: BitBoard,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    pub fn new() -> Self {
        Self {
            white_squares: BitBoard::empty(),
            black_squares: BitBoard::empty(),
            king_squares: BitBoard::empty(),
        }
    }

    /// Places `piece` on an empty square.
    pub fn put(&mut self, square: Square, piece: Piece) -> Result<(), GameError> {
        if !is_valid_square(square) {
            return Err(GameError::InvalidSquare(square));
        }
        if self.piece_at(square).is_some() {
            return Err(GameError::OccupiedSquare(square));
        }
        match piece.player {
            Player::White => self.white_squares.set_square(square, true),
            Player::Black => self.black_squares.set_square(square, true),
        }
        self.king_squares.set_square(square, piece.king);
        Ok(())
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if !is_valid_square(square) {
            return None;
        }
        let king = self.king_squares.has_square(square);
        if self.white_squares.has_square(square) {
            Some(Piece { player: Player::White, king })
        } else if self.black_squares.has_square(square) {
            Some(Piece { player: Player::Black, king })
        } else {
            None
        }
    }

    fn player_squares(&self, player: Player) -> &BitBoard {
        match player {
            Player::White => &self.white_squares,
            Player::Black => &self.black_squares,
        }
    }

    /// Occupied squares of one side, ascending.
    pub fn player_pieces(&self, player: Player) -> impl Iterator<Item=(Square, Piece)> + '_ {
        self.player_squares(player).iter_squares().map(move |square| {
            (square, Piece { player, king: self.king_squares.has_square(square) })
        })
    }

    /// Every occupied square: white pieces first, then black.
    pub fn pieces(&self) -> impl Iterator<Item=(Square, Piece)> + '_ {
        self.player_pieces(Player::White).chain(self.player_pieces(Player::Black))
    }

    pub fn count(&self, player: Player) -> usize {
        self.player_squares(player).count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.white_squares.not_any() && self.black_squares.not_any()
    }
}

/// Draughts FEN: side to move plus placement, e.g. `W:W31,32,K45:B1-3`.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Fen {
    pub turn: Player,
    pub position: Position,
}

impl Fen {
    pub fn new(turn: Player, position: Position) -> Self {
        Self { turn, position }
    }

    fn write_side(&self, f: &mut fmt::Formatter<'_>, player: Player) -> fmt::Result {
        write!(f, ":{}", player.letter())?;
        for (i, (square, piece)) in self.position.player_pieces(player).enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if piece.king {
                f.write_str("K")?;
            }
            write!(f, "{}", square)?;
        }
        Ok(())
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.turn.letter())?;
        self.write_side(f, Player::White)?;
        self.write_side(f, Player::Black)
    }
}

fn parse_square(text: &str, fen: &str) -> Result<Square, GameError> {
    text.trim().parse::<Square>().map_err(|_| GameError::invalid_fen(fen, format!("bad square number {:?}", text)))
}

impl FromStr for Fen {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.trim().trim_end_matches('.');
        let mut fields = body.split(':');
        let turn = fields.next()
            .and_then(|field| Player::from_letter(field.trim()))
            .ok_or_else(|| GameError::invalid_fen(s, "missing side to move"))?;

        let mut position = Position::new();
        for field in fields {
            let field = field.trim();
            let (letter, list) = field.split_at(field.char_indices().nth(1).map_or(field.len(), |(i, _)| i));
            let player = Player::from_letter(letter)
                .ok_or_else(|| GameError::invalid_fen(s, format!("unknown side {:?}", letter)))?;

            for entry in list.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
                let (king, squares) = match entry.strip_prefix(|c: char| c == 'K' || c == 'k') {
                    Some(rest) => (true, rest),
                    None => (false, entry),
                };
                let (first, last) = match squares.split_once('-') {
                    Some((from, to)) => (parse_square(from, s)?, parse_square(to, s)?),
                    None => {
                        let square = parse_square(squares, s)?;
                        (square, square)
                    }
                };
                if first > last {
                    return Err(GameError::invalid_fen(s, format!("empty range {:?}", entry)));
                }
                for square in first..=last {
                    position.put(square, Piece { player, king })
                        .map_err(|e| GameError::invalid_fen(s, e.to_string()))?;
                }
            }
        }

        Ok(Fen { turn, position })
    }
}

impl Serialize for Fen {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        serializer.collect_str(self)
    }
}

struct FenVisitor;
impl<'de> Visitor<'de> for FenVisitor {
    type Value = Fen;
    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a draughts FEN string")
    }
    fn visit_str<E>(self, value: &str) -> Result<Fen, E> where E: serde::de::Error {
        value.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Fen {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        deserializer.deserialize_str(FenVisitor)
    }
}
