use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;
use tenxten_engine::{evaluate, Fen, GameState, GameTree, KeyScheme, Piece, Player, Position, Search};

fn arb_player() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::White), Just(Player::Black)]
}

/// Any placement of men and kings of both colours on distinct squares.
fn arb_position() -> impl Strategy<Value = Position> {
    // 0 empty, 1 white man, 2 white king, 3 black man, 4 black king
    prop::collection::vec(0u8..5, 50).prop_map(|cells| {
        let mut position = Position::new();
        for (i, cell) in cells.into_iter().enumerate() {
            let square = (i + 1) as u8;
            let piece = match cell {
                1 => Piece::man(Player::White),
                2 => Piece::king(Player::White),
                3 => Piece::man(Player::Black),
                4 => Piece::king(Player::Black),
                _ => continue,
            };
            position.put(square, piece).unwrap();
        }
        position
    })
}

/// At least one piece, all owned by `owner`.
fn arb_one_sided() -> impl Strategy<Value = (Player, Position)> {
    (arb_player(), prop::collection::btree_set(1u8..=50, 1..=20), any::<u64>()).prop_map(
        |(owner, squares, kings): (Player, BTreeSet<u8>, u64)| {
            let mut position = Position::new();
            for square in squares {
                let king = kings & (1u64 << (square - 1)) != 0;
                position.put(square, Piece { player: owner, king }).unwrap();
            }
            (owner, position)
        },
    )
}

fn leaf_game(turn: Player, position: Position) -> impl GameState {
    let fen = Fen::new(turn, position);
    let tree = Arc::new(GameTree::from_value(json!({ "start": fen.to_string(), "nodes": [] })).unwrap());
    tree.start()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn prop_swapping_perspective_negates(position in arb_position()) {
        prop_assert_eq!(evaluate(&position, Player::White), -evaluate(&position, Player::Black));
    }

    #[test]
    fn prop_one_sided_takes_the_owner_sign((owner, position) in arb_one_sided()) {
        prop_assert!(evaluate(&position, owner) > 0);
        prop_assert!(evaluate(&position, owner.opponent()) < 0);
    }

    #[test]
    fn prop_material_sum(position in arb_position(), perspective in arb_player()) {
        let expected: i32 = position.pieces()
            .map(|(_, piece)| {
                let value = if piece.king { 4 } else { 1 };
                if piece.player == perspective { value } else { -value }
            })
            .sum();
        prop_assert_eq!(evaluate(&position, perspective), expected);
    }

    #[test]
    fn prop_depth_zero_is_evaluate(
        position in arb_position(),
        turn in arb_player(),
        perspective in arb_player(),
        depth_keyed in any::<bool>(),
    ) {
        let game = leaf_game(turn, position);
        let scheme = if depth_keyed { KeyScheme::PositionAndDepth } else { KeyScheme::Position };
        let mut search = Search::new(scheme);
        let score = search.search_recursive(&game, 0, perspective).unwrap();
        prop_assert_eq!(score, evaluate(game.position(), perspective));
        prop_assert_eq!(search.evaluations(), 1);
    }
}
