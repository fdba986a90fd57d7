//! Pseudo-move generation.
//!
//! Two entry points mirror the two ways a player can pick up pieces:
//! [`Position::candidates_from`] treats the source square's contents as a
//! unit (the default selection), [`Position::unklik_candidates`] names one
//! of two stacked pieces by index. Both emit tagged candidates; king-safety
//! filtering happens in the executor.

mod castling;
mod pawns;
mod sliders;

pub(crate) use pawns::PawnTarget;

use super::state::Position;
use super::types::{Color, Kind, Move, MoveKind, PawnId, Square, SquareStack};

impl Position {
    /// Whole-square candidates: the square's contents move as a unit.
    ///
    /// Castling variants are included when the square holds the king.
    /// Candidates are generated for the color owning the square; turn
    /// enforcement happens at submission.
    #[must_use]
    pub fn candidates_from(&self, from: Square) -> Vec<Move> {
        let stack = self.stack_at(from);
        let Some(color) = stack.color() else {
            return Vec::new();
        };

        let mut moves = Vec::new();
        if stack.is_stacked() {
            self.combined_candidates(from, stack, color, &mut moves);
        } else {
            let piece = stack.bottom().expect("non-empty square");
            match piece.kind {
                Kind::Pawn(id) => self.single_pawn_candidates(from, color, id, &mut moves),
                kind => self.single_piece_candidates(from, color, kind, &mut moves),
            }
            if piece.is_king() {
                self.castling_candidates(color, &mut moves);
            }
        }
        moves
    }

    /// Per-piece candidates: the stacked piece at `index` moves alone.
    ///
    /// Returns nothing unless the square holds a stack and the index names
    /// one of its two pieces; the session maps that to `BadUnclickIndex`.
    #[must_use]
    pub fn unklik_candidates(&self, from: Square, index: u8) -> Vec<Move> {
        let stack = self.stack_at(from);
        if !stack.is_stacked() || index > 1 {
            return Vec::new();
        }
        let piece = stack.get(index as usize).expect("index within stack");

        let mut moves = Vec::new();
        match piece.kind {
            Kind::Pawn(id) => {
                let promo_rank = piece.color.pawn_promotion_rank();
                for target in self.pawn_targets(from, piece.color, id) {
                    match target {
                        PawnTarget::Push(to) => {
                            moves.push(Move::with_unklik(from, to, MoveKind::Unklik, index));
                            if to.rank() != promo_rank && self.en_passant_target() == Some(to) {
                                moves.push(Move::with_unklik(
                                    from,
                                    to,
                                    MoveKind::EnPassantUnklik,
                                    index,
                                ));
                            }
                        }
                        PawnTarget::PushKlik(to) => {
                            moves.push(Move::with_unklik(from, to, MoveKind::UnklikKlik, index));
                        }
                        PawnTarget::Capture(to) => {
                            moves.push(Move::with_unklik(from, to, MoveKind::Unklik, index));
                        }
                    }
                }
            }
            kind => {
                for to in self.piece_targets(from, kind) {
                    let target = self.stack_at(to);
                    if target.is_empty() || target.color() == Some(piece.color.opponent()) {
                        moves.push(Move::with_unklik(from, to, MoveKind::Unklik, index));
                    } else if target.len() == 1 && !target.contains_king() && !kind.is_king() {
                        moves.push(Move::with_unklik(from, to, MoveKind::UnklikKlik, index));
                    }
                }
            }
        }
        moves
    }

    /// Every pseudo-candidate for the side to move, including unkliks and
    /// castling. Choices are emitted as their choice kind.
    #[must_use]
    pub fn pseudo_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for sq in Square::all() {
            let stack = self.stack_at(sq);
            if stack.color() != Some(self.side_to_move()) {
                continue;
            }
            if stack.is_stacked() {
                moves.extend(self.unklik_candidates(sq, 0));
                moves.extend(self.unklik_candidates(sq, 1));
            }
            moves.extend(self.candidates_from(sq));
        }
        moves
    }

    fn single_piece_candidates(
        &self,
        from: Square,
        color: Color,
        kind: Kind,
        moves: &mut Vec<Move>,
    ) {
        for to in self.piece_targets(from, kind) {
            let target = self.stack_at(to);
            if target.is_empty() || target.color() == Some(color.opponent()) {
                moves.push(Move::new(from, to, MoveKind::Normal));
            } else if target.len() == 1 && !target.contains_king() && !kind.is_king() {
                moves.push(Move::new(from, to, MoveKind::Klik));
            }
        }
    }

    fn single_pawn_candidates(
        &self,
        from: Square,
        color: Color,
        id: PawnId,
        moves: &mut Vec<Move>,
    ) {
        let promo_rank = color.pawn_promotion_rank();
        for target in self.pawn_targets(from, color, id) {
            match target {
                PawnTarget::Push(to) => {
                    // A straight push onto the en-passant target reads both
                    // as a plain advance and as the capture; surface the
                    // choice instead of picking one.
                    if to.rank() != promo_rank && self.en_passant_target() == Some(to) {
                        moves.push(Move::new(from, to, MoveKind::EnPassantChoice));
                    } else {
                        moves.push(Move::new(from, to, MoveKind::Normal));
                    }
                }
                PawnTarget::PushKlik(to) => moves.push(Move::new(from, to, MoveKind::Klik)),
                PawnTarget::Capture(to) => moves.push(Move::new(from, to, MoveKind::Normal)),
            }
        }
    }

    /// Candidates for a stack moving as a unit: the union of both members'
    /// geometries, with two prunes. A stack carrying a pawn may not land on
    /// the mover's back rank, and may reach the promotion rank only through
    /// the pawn's own geometry. Combined units never klik (three pieces
    /// cannot share a square).
    fn combined_candidates(
        &self,
        from: Square,
        stack: SquareStack,
        color: Color,
        moves: &mut Vec<Move>,
    ) {
        let mut all_targets = 0u64;
        let mut pawn_targets = 0u64;
        let mut ep_targets = 0u64;
        let has_pawn = stack.iter().any(|p| p.is_pawn());

        for piece in stack.iter() {
            match piece.kind {
                Kind::Pawn(id) => {
                    for target in self.pawn_targets(from, color, id) {
                        match target {
                            PawnTarget::Push(to) => {
                                all_targets |= 1 << to.as_index();
                                pawn_targets |= 1 << to.as_index();
                                if self.en_passant_target() == Some(to) {
                                    ep_targets |= 1 << to.as_index();
                                }
                            }
                            PawnTarget::Capture(to) => {
                                all_targets |= 1 << to.as_index();
                                pawn_targets |= 1 << to.as_index();
                            }
                            PawnTarget::PushKlik(_) => {}
                        }
                    }
                }
                kind => {
                    for to in self.piece_targets(from, kind) {
                        all_targets |= 1 << to.as_index();
                    }
                }
            }
        }

        for to in Square::all() {
            let bit = 1u64 << to.as_index();
            if all_targets & bit == 0 {
                continue;
            }
            if has_pawn && to.rank() == color.back_rank() {
                continue;
            }
            if has_pawn && to.rank() == color.pawn_promotion_rank() && pawn_targets & bit == 0 {
                continue;
            }

            let target = self.stack_at(to);
            if target.is_empty() {
                if ep_targets & bit != 0 {
                    moves.push(Move::new(from, to, MoveKind::EnPassantChoice));
                } else {
                    moves.push(Move::new(from, to, MoveKind::Normal));
                }
            } else if target.color() == Some(color.opponent()) {
                moves.push(Move::new(from, to, MoveKind::Normal));
            }
        }
    }
}
