//! Pseudo-target geometry for the non-pawn kinds.

use crate::board::attacks::{
    BISHOP_DIRECTIONS, KING_TARGETS, KNIGHT_TARGETS, ROOK_DIRECTIONS,
};
use crate::board::state::Position;
use crate::board::types::{Kind, Square};

impl Position {
    /// Pseudo-targets of a non-pawn kind standing on `from`: every empty
    /// square the piece can reach plus the first occupied square on each
    /// line (of either color; the caller classifies it).
    pub(crate) fn piece_targets(&self, from: Square, kind: Kind) -> Vec<Square> {
        match kind {
            Kind::Knight => KNIGHT_TARGETS[from.as_index()].clone(),
            Kind::King => KING_TARGETS[from.as_index()].clone(),
            Kind::Bishop => self.slider_targets(from, &BISHOP_DIRECTIONS),
            Kind::Rook => self.slider_targets(from, &ROOK_DIRECTIONS),
            Kind::Queen => {
                let mut targets = self.slider_targets(from, &BISHOP_DIRECTIONS);
                targets.extend(self.slider_targets(from, &ROOK_DIRECTIONS));
                targets
            }
            Kind::Pawn(_) => Vec::new(),
        }
    }

    fn slider_targets(&self, from: Square, directions: &[(isize, isize)]) -> Vec<Square> {
        let mut targets = Vec::with_capacity(14);
        for &(dr, df) in directions {
            let mut current = from;
            while let Some(next) = current.offset(dr, df) {
                current = next;
                targets.push(current);
                if !self.is_empty_square(current) {
                    break;
                }
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_knight_targets_from_corner() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
        let mut targets = pos.piece_targets(sq("a1"), Kind::Knight);
        targets.sort();
        assert_eq!(targets, vec![sq("c2"), sq("b3")]);
    }

    #[test]
    fn test_rook_blocked_by_first_occupied() {
        let pos = Position::from_fen("4k3/8/8/8/4p3/8/8/R3K3 w - - 0 1").unwrap();
        let targets = pos.piece_targets(sq("a1"), Kind::Rook);
        // Eastward the ray stops at the first occupied square (e1)
        assert!(targets.contains(&sq("e1")));
        assert!(!targets.contains(&sq("f1")));
        assert!(targets.contains(&sq("a8")));
    }

    #[test]
    fn test_queen_is_rook_plus_bishop() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").unwrap();
        let queen: Vec<Square> = pos.piece_targets(sq("a1"), Kind::Queen);
        let rook = pos.piece_targets(sq("a1"), Kind::Rook);
        let bishop = pos.piece_targets(sq("a1"), Kind::Bishop);
        assert_eq!(queen.len(), rook.len() + bishop.len());
    }

    #[test]
    fn test_slider_stops_at_stack() {
        let pos = Position::from_fen("4k3/8/8/8/(np)7/8/8/R3K3 w - - 0 1").unwrap();
        let targets = pos.piece_targets(sq("a1"), Kind::Rook);
        assert!(targets.contains(&sq("a4")));
        assert!(!targets.contains(&sq("a5")));
    }
}
