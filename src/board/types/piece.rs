//! Piece, color, and pawn identity types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Colors of the two sides.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors in index order (White=0, Black=1)
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Returns the opposite color
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Back rank for this color (0 for White, 7 for Black).
    /// A pawn may never stand on its own back rank.
    #[inline]
    #[must_use]
    pub(crate) const fn back_rank(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Pawn forward direction (+1 for White, -1 for Black)
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_direction(self) -> isize {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Pawn starting rank (1 for White, 6 for Black)
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_start_rank(self) -> usize {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Pawn promotion rank (7 for White, 0 for Black)
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_promotion_rank(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Identity tag of a pawn, 0-7, allocated at initial setup from the pawn's
/// file of origin.
///
/// The tag travels with the pawn through every move it survives (klik,
/// unklik, diagonal capture, stack transport) and exists solely so the
/// moved-pawn set can record whether *this* pawn instance has ever moved.
/// Promotion discards it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PawnId(u8);

impl PawnId {
    /// All identities in order
    pub const ALL: [PawnId; 8] = [
        PawnId(0),
        PawnId(1),
        PawnId(2),
        PawnId(3),
        PawnId(4),
        PawnId(5),
        PawnId(6),
        PawnId(7),
    ];

    /// Create a pawn identity. Returns `None` unless `id` is 0-7.
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if id < 8 {
            Some(PawnId(id))
        } else {
            None
        }
    }

    /// The raw 0-7 tag
    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Bit for this identity in a per-color moved-pawn mask
    #[inline]
    #[must_use]
    pub(crate) const fn bit(self) -> u8 {
        1 << self.0
    }
}

impl fmt::Display for PawnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Piece kinds. Pawns carry their identity tag inside the variant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Kind {
    Pawn(PawnId),
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Kind {
    #[inline]
    #[must_use]
    pub const fn is_pawn(self) -> bool {
        matches!(self, Kind::Pawn(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_king(self) -> bool {
        matches!(self, Kind::King)
    }

    /// The pawn identity, if this is a pawn
    #[inline]
    #[must_use]
    pub const fn pawn_id(self) -> Option<PawnId> {
        match self {
            Kind::Pawn(id) => Some(id),
            _ => None,
        }
    }

    /// Returns true if this kind attacks diagonally (Bishop, Queen)
    #[inline]
    #[must_use]
    pub const fn attacks_diagonally(self) -> bool {
        matches!(self, Kind::Bishop | Kind::Queen)
    }

    /// Returns true if this kind attacks along ranks/files (Rook, Queen)
    #[inline]
    #[must_use]
    pub const fn attacks_straight(self) -> bool {
        matches!(self, Kind::Rook | Kind::Queen)
    }

    /// True for kinds a pawn may promote to (Queen, Rook, Bishop, Knight)
    #[inline]
    #[must_use]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(self, Kind::Queen | Kind::Rook | Kind::Bishop | Kind::Knight)
    }

    /// Lowercase character for the kind (pawn identity is not encoded)
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Kind::Pawn(_) => 'p',
            Kind::Knight => 'n',
            Kind::Bishop => 'b',
            Kind::Rook => 'r',
            Kind::Queen => 'q',
            Kind::King => 'k',
        }
    }

    /// Parse a non-pawn kind from a character. Pawn characters return
    /// `None` because a pawn cannot exist without an identity; FEN parsing
    /// assigns identities separately.
    #[must_use]
    pub fn non_pawn_from_char(c: char) -> Option<Kind> {
        match c.to_ascii_lowercase() {
            'n' => Some(Kind::Knight),
            'b' => Some(Kind::Bishop),
            'r' => Some(Kind::Rook),
            'q' => Some(Kind::Queen),
            'k' => Some(Kind::King),
            _ => None,
        }
    }
}

/// A colored piece as stored on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece {
    pub color: Color,
    pub kind: Kind,
}

impl Piece {
    #[inline]
    #[must_use]
    pub const fn new(color: Color, kind: Kind) -> Self {
        Piece { color, kind }
    }

    #[inline]
    #[must_use]
    pub const fn is_pawn(self) -> bool {
        self.kind.is_pawn()
    }

    #[inline]
    #[must_use]
    pub const fn is_king(self) -> bool {
        self.kind.is_king()
    }

    /// Character with case based on color (uppercase for White)
    #[inline]
    #[must_use]
    pub fn to_fen_char(self) -> char {
        let c = self.kind.to_char();
        if matches!(self.color, Color::White) {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_char())
    }
}
