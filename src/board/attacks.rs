//! Attack and check oracle.
//!
//! `is_attacked` answers whether any piece of a color can pseudo-capture a
//! square; king safety of the attacker is ignored (pins are irrelevant
//! here). Stacked attackers radiate the geometry of every contained piece.

use once_cell::sync::Lazy;

use super::state::Position;
use super::types::{Color, Kind, Square};

pub(crate) const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub(crate) const KING_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub(crate) const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub(crate) const ROOK_DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Pre-computed knight targets for every square
pub(crate) static KNIGHT_TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| {
    std::array::from_fn(|idx| {
        let sq = Square::from_index(idx);
        KNIGHT_OFFSETS
            .iter()
            .filter_map(|&(dr, df)| sq.offset(dr, df))
            .collect()
    })
});

/// Pre-computed king targets for every square
pub(crate) static KING_TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| {
    std::array::from_fn(|idx| {
        let sq = Square::from_index(idx);
        KING_OFFSETS
            .iter()
            .filter_map(|&(dr, df)| sq.offset(dr, df))
            .collect()
    })
});

impl Position {
    /// Whether any piece of `by_color` attacks `sq`.
    #[must_use]
    pub fn is_attacked(&self, sq: Square, by_color: Color) -> bool {
        for &attacker_sq in &KNIGHT_TARGETS[sq.as_index()] {
            if self
                .stack_at(attacker_sq)
                .iter()
                .any(|p| p.color == by_color && p.kind == Kind::Knight)
            {
                return true;
            }
        }

        for &attacker_sq in &KING_TARGETS[sq.as_index()] {
            if self
                .stack_at(attacker_sq)
                .iter()
                .any(|p| p.color == by_color && p.kind.is_king())
            {
                return true;
            }
        }

        for &(dr, df) in &BISHOP_DIRECTIONS {
            if self.ray_hits(sq, dr, df, by_color, Kind::attacks_diagonally) {
                return true;
            }
        }
        for &(dr, df) in &ROOK_DIRECTIONS {
            if self.ray_hits(sq, dr, df, by_color, Kind::attacks_straight) {
                return true;
            }
        }

        // Pawns attack the two forward-diagonal squares only, so the
        // attacker sits one rank behind `sq` from its own point of view.
        let dr = -by_color.pawn_direction();
        for df in [-1, 1] {
            if let Some(attacker_sq) = sq.offset(dr, df) {
                if self
                    .stack_at(attacker_sq)
                    .iter()
                    .any(|p| p.color == by_color && p.is_pawn())
                {
                    return true;
                }
            }
        }

        false
    }

    /// Walk a ray from `sq`; true if the first occupied square holds a
    /// `by_color` piece whose kind passes `axis`.
    fn ray_hits(
        &self,
        sq: Square,
        dr: isize,
        df: isize,
        by_color: Color,
        axis: impl Fn(Kind) -> bool,
    ) -> bool {
        let mut current = sq;
        while let Some(next) = current.offset(dr, df) {
            current = next;
            let stack = self.stack_at(current);
            if !stack.is_empty() {
                return stack.iter().any(|p| p.color == by_color && axis(p.kind));
            }
        }
        false
    }

    /// Whether a color's king is in check. Kingless hand-built boards are
    /// never in check.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king_sq) => self.is_attacked(king_sq, color.opponent()),
            None => false,
        }
    }
}
