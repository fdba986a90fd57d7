//! Square contents: an ordered sequence of zero, one, or two pieces.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece};

/// The contents of one board square.
///
/// When two pieces share a square they are *stacked* and move as a unit
/// unless one is unklikked off. Order is observable (it affects display and
/// notation) but never legality. A stack never holds a king and never holds
/// pieces of different colors.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SquareStack {
    slots: [Option<Piece>; 2],
}

impl SquareStack {
    /// An empty square
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        SquareStack { slots: [None, None] }
    }

    /// A square holding one piece
    #[inline]
    #[must_use]
    pub const fn single(piece: Piece) -> Self {
        SquareStack {
            slots: [Some(piece), None],
        }
    }

    /// A square holding a stack, bottom piece first
    #[inline]
    #[must_use]
    pub const fn pair(bottom: Piece, top: Piece) -> Self {
        SquareStack {
            slots: [Some(bottom), Some(top)],
        }
    }

    /// Number of pieces on the square (0-2)
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        match self.slots {
            [None, _] => 0,
            [Some(_), None] => 1,
            [Some(_), Some(_)] => 2,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.slots[0].is_none()
    }

    /// True when two pieces share the square
    #[inline]
    #[must_use]
    pub const fn is_stacked(self) -> bool {
        self.slots[1].is_some()
    }

    /// The piece at a stack index (0 = bottom, 1 = top)
    #[inline]
    #[must_use]
    pub const fn get(self, index: usize) -> Option<Piece> {
        if index < 2 {
            self.slots[index]
        } else {
            None
        }
    }

    /// The topmost piece, if any
    #[inline]
    #[must_use]
    pub const fn top(self) -> Option<Piece> {
        match self.slots {
            [_, Some(p)] => Some(p),
            [p, None] => p,
        }
    }

    /// The bottom piece, if any
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> Option<Piece> {
        self.slots[0]
    }

    /// The color of the occupants, if any.
    /// Stacks are single-colored, so the bottom piece decides.
    #[inline]
    #[must_use]
    pub fn color(self) -> Option<Color> {
        self.slots[0].map(|p| p.color)
    }

    /// True if any occupant is a king
    #[inline]
    #[must_use]
    pub fn contains_king(self) -> bool {
        self.iter().any(Piece::is_king)
    }

    /// Add a piece on top. The square must have room.
    #[inline]
    pub fn push(&mut self, piece: Piece) {
        debug_assert!(!self.is_stacked(), "push onto a full stack");
        if self.slots[0].is_none() {
            self.slots[0] = Some(piece);
        } else {
            self.slots[1] = Some(piece);
        }
    }

    /// Remove and return the piece at `index`, shifting the other down.
    #[inline]
    pub fn remove(&mut self, index: usize) -> Option<Piece> {
        let piece = self.get(index)?;
        if index == 0 {
            self.slots[0] = self.slots[1];
        }
        self.slots[1] = None;
        Some(piece)
    }

    /// Remove everything from the square
    #[inline]
    pub fn clear(&mut self) {
        self.slots = [None, None];
    }

    /// Iterate the pieces bottom-to-top
    #[inline]
    pub fn iter(self) -> impl Iterator<Item = Piece> {
        self.slots.into_iter().flatten()
    }
}
