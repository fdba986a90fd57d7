//! Castling candidate generation, including the stacked-rook variants.
//!
//! The king always lands on the G or C file; the rook landing square (F or
//! D) decides which variant is emitted:
//!
//! | corner       | F/D empty        | F/D own non-king singleton |
//! |--------------|------------------|----------------------------|
//! | rook alone   | `CastleK`/`Q`    | `CastleKKlik`/`QKlik`      |
//! | rook stacked | `CastleKChoice`  | `CastleKUnklikKlik`        |
//!
//! A choice is resolved by the caller to either the rook-only castle or the
//! both-pieces-cross variant. Safety is tested on the king's origin here
//! and on its pass square against the hypothetical board with the king
//! lifted off its origin; the destination square is covered by the ordinary
//! legality filter.

use crate::board::state::Position;
use crate::board::types::{Color, Kind, Move, MoveKind, Square, SquareStack, Wing};

impl Position {
    pub(crate) fn castling_candidates(&self, color: Color, moves: &mut Vec<Move>) {
        let home_rank = color.back_rank();
        let king_sq = Square::new(home_rank, 4);
        let king_stack = self.stack_at(king_sq);

        let king_home = king_stack.len() == 1
            && king_stack
                .top()
                .is_some_and(|p| p.color == color && p.is_king());
        if !king_home {
            return;
        }
        if self.is_attacked(king_sq, color.opponent()) {
            return;
        }

        for wing in Wing::BOTH {
            if !self.castling_rights().has(color, wing) {
                continue;
            }

            let corner = wing.corner(color);
            let rook_dest = wing.rook_destination(color);
            let king_dest = wing.king_destination(color);

            let corner_stack = self.stack_at(corner);
            let has_rook = corner_stack
                .iter()
                .any(|p| p.color == color && p.kind == Kind::Rook);
            if !has_rook {
                continue;
            }

            if !self.is_empty_square(king_dest) {
                continue;
            }
            if wing == Wing::Queen && !self.is_empty_square(Square::new(home_rank, 1)) {
                continue;
            }

            let mut walked = self.scratch();
            walked.set_stack(king_sq, SquareStack::empty());
            if walked.is_attacked(rook_dest, color.opponent()) {
                continue;
            }

            let dest_stack = self.stack_at(rook_dest);
            let dest_own_singleton = dest_stack.len() == 1
                && dest_stack.color() == Some(color)
                && !dest_stack.contains_king();

            let kind = match (corner_stack.is_stacked(), dest_stack.is_empty(), wing) {
                (false, true, Wing::King) => MoveKind::CastleK,
                (false, true, Wing::Queen) => MoveKind::CastleQ,
                (false, false, Wing::King) if dest_own_singleton => MoveKind::CastleKKlik,
                (false, false, Wing::Queen) if dest_own_singleton => MoveKind::CastleQKlik,
                (true, true, Wing::King) => MoveKind::CastleKChoice,
                (true, true, Wing::Queen) => MoveKind::CastleQChoice,
                (true, false, Wing::King) if dest_own_singleton => MoveKind::CastleKUnklikKlik,
                (true, false, Wing::Queen) if dest_own_singleton => MoveKind::CastleQUnklikKlik,
                _ => continue,
            };

            moves.push(Move::new(king_sq, king_dest, kind));
        }
    }
}
