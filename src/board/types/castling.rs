//! Castling wings and the rights bound to them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;
use super::square::Square;

/// The two wings a king may castle to.
///
/// Each wing names the corner whose rook carries the right, and the squares
/// the king and rook land on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Wing {
    King,
    Queen,
}

impl Wing {
    /// Both wings, kingside first
    pub const BOTH: [Wing; 2] = [Wing::King, Wing::Queen];

    #[inline]
    const fn index(self) -> usize {
        match self {
            Wing::King => 0,
            Wing::Queen => 1,
        }
    }

    /// The corner square whose rook carries this wing's right.
    /// The rook may be stacked there with a companion.
    #[inline]
    #[must_use]
    pub(crate) const fn corner(self, color: Color) -> Square {
        let file = match self {
            Wing::King => 7,
            Wing::Queen => 0,
        };
        Square::new(color.back_rank(), file)
    }

    /// Where the rook (alone, klikked, or with its whole stack) lands
    #[inline]
    #[must_use]
    pub(crate) const fn rook_destination(self, color: Color) -> Square {
        let file = match self {
            Wing::King => 5,
            Wing::Queen => 3,
        };
        Square::new(color.back_rank(), file)
    }

    /// Where the king lands
    #[inline]
    #[must_use]
    pub(crate) const fn king_destination(self, color: Color) -> Square {
        let file = match self {
            Wing::King => 6,
            Wing::Queen => 2,
        };
        Square::new(color.back_rank(), file)
    }
}

/// Which castling rights are still alive, per color and wing.
///
/// A right survives while the king has never moved and the rook born on
/// the wing's corner has never left it. Stacking bends the usual
/// square-touch bookkeeping: a friendly piece klikking onto the corner
/// changes nothing, and a companion unklikking away leaves the rook (and
/// the right) in place. Rights die only through the events below.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights {
    alive: [[bool; 2]; 2], // [color][wing]
}

impl CastlingRights {
    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights {
            alive: [[false; 2]; 2],
        }
    }

    /// All four rights alive
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights {
            alive: [[true; 2]; 2],
        }
    }

    /// Whether a wing's right is still alive
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, wing: Wing) -> bool {
        self.alive[color.index()][wing.index()]
    }

    /// Bring a right to life (initial setup, FEN, builders)
    #[inline]
    pub fn grant(&mut self, color: Color, wing: Wing) {
        self.alive[color.index()][wing.index()] = true;
    }

    /// The king of `color` moved, castling included: both wings die.
    #[inline]
    pub(crate) fn on_king_move(&mut self, color: Color) {
        self.alive[color.index()] = [false, false];
    }

    /// A moving unit containing this color's rook left `square`. If that
    /// square is a right-bearing corner the wing dies, whether the rook
    /// moved whole-square, unklikked out from under a companion, or
    /// carried its companion along.
    #[inline]
    pub(crate) fn on_rook_departure(&mut self, color: Color, square: Square) {
        self.kill_corner(color, square);
    }

    /// An enemy capture destroyed the stack on `square`; a resident rook
    /// died with it.
    #[inline]
    pub(crate) fn on_corner_capture(&mut self, owner: Color, square: Square) {
        self.kill_corner(owner, square);
    }

    fn kill_corner(&mut self, color: Color, square: Square) {
        for wing in Wing::BOTH {
            if wing.corner(color) == square {
                self.alive[color.index()][wing.index()] = false;
            }
        }
    }
}
