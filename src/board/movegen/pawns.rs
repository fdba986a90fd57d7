//! Pawn target generation.
//!
//! Pawns push straight (one square, or two from the starting rank while
//! their identity is still unmoved), capture diagonally, and may initiate a
//! klik only on a straight push. The klik-to-promotion-rank case is
//! excluded here: a pawn may never stack on its promotion rank.

use crate::board::state::Position;
use crate::board::types::{Color, PawnId, Square};

/// One pseudo-target of a single pawn.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum PawnTarget {
    /// Straight push onto an empty square (may be the en-passant target,
    /// may be the promotion rank)
    Push(Square),
    /// Straight push onto an own non-king singleton, forming a stack
    PushKlik(Square),
    /// Diagonal capture of an enemy-occupied square
    Capture(Square),
}

impl Position {
    /// All pseudo-targets of a pawn of `color` with identity `id` standing
    /// on `from`.
    pub(crate) fn pawn_targets(&self, from: Square, color: Color, id: PawnId) -> Vec<PawnTarget> {
        let mut targets = Vec::with_capacity(4);
        let dir = color.pawn_direction();
        let promo_rank = color.pawn_promotion_rank();

        if let Some(one) = from.offset(dir, 0) {
            let one_stack = self.stack_at(one);
            if one_stack.is_empty() {
                targets.push(PawnTarget::Push(one));

                let may_double = from.rank() == color.pawn_start_rank()
                    && self.pawn_may_double_push(color, id);
                if may_double {
                    if let Some(two) = from.offset(2 * dir, 0) {
                        let two_stack = self.stack_at(two);
                        if two_stack.is_empty() {
                            targets.push(PawnTarget::Push(two));
                        } else if two_stack.len() == 1
                            && two_stack.color() == Some(color)
                            && !two_stack.contains_king()
                        {
                            targets.push(PawnTarget::PushKlik(two));
                        }
                    }
                }
            } else if one_stack.len() == 1
                && one_stack.color() == Some(color)
                && !one_stack.contains_king()
                && one.rank() != promo_rank
            {
                targets.push(PawnTarget::PushKlik(one));
            }
        }

        for df in [-1, 1] {
            if let Some(diag) = from.offset(dir, df) {
                let diag_stack = self.stack_at(diag);
                if !diag_stack.is_empty() && diag_stack.color() == Some(color.opponent()) {
                    targets.push(PawnTarget::Capture(diag));
                }
            }
        }

        targets
    }
}
