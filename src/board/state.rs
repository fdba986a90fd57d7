//! Position state: board squares, side to move, castling rights, en passant
//! target, the moved-pawn set, counters, and the move history.

use std::fmt;

use super::types::{
    CastlingRights, Color, Kind, Move, MoveKind, PawnId, Piece, Square, SquareStack,
};

/// The set of pawn identities that have made at least one move, per color.
///
/// A pawn may double-push only while its identity is absent from this set,
/// regardless of the square it currently occupies (stack transport can put a
/// moved pawn back on its starting rank).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub struct MovedPawns {
    masks: [u8; 2],
}

impl MovedPawns {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        MovedPawns { masks: [0, 0] }
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, color: Color, id: PawnId) -> bool {
        self.masks[color.index()] & id.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, color: Color, id: PawnId) {
        self.masks[color.index()] |= id.bit();
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.masks[0] == 0 && self.masks[1] == 0
    }

    /// Identities recorded for a color, in ascending order
    pub fn ids(self, color: Color) -> impl Iterator<Item = PawnId> {
        let mask = self.masks[color.index()];
        PawnId::ALL
            .into_iter()
            .filter(move |id| mask & id.bit() != 0)
    }
}

/// One committed move in the audit log: the notation string tagged with the
/// color that played it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HistoryEntry {
    pub color: Color,
    pub notation: String,
}

/// A Klikschaak position.
///
/// Owns the board array, the moved-pawn set, and the move history; a
/// `Session` owns exactly one `Position` and mutates it only through
/// [`Position::commit_move`](crate::board::Position::commit_move).
#[derive(Clone, Debug)]
pub struct Position {
    pub(crate) squares: [SquareStack; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) moved_pawns: MovedPawns,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove: u32,
    pub(crate) king_sq: [Option<Square>; 2],
    pub(crate) history: Vec<HistoryEntry>,
}

impl Position {
    /// The standard Klikschaak starting position.
    ///
    /// Pawn identities are allocated from the file of origin.
    #[must_use]
    pub fn initial_setup() -> Self {
        let mut position = Position::empty();
        let back_rank = [
            Kind::Rook,
            Kind::Knight,
            Kind::Bishop,
            Kind::Queen,
            Kind::King,
            Kind::Bishop,
            Kind::Knight,
            Kind::Rook,
        ];
        for (file, &kind) in back_rank.iter().enumerate() {
            position.put_piece(Square::new(0, file), Piece::new(Color::White, kind));
            position.put_piece(Square::new(7, file), Piece::new(Color::Black, kind));
        }
        for file in 0..8 {
            let id = PawnId::new(file as u8).expect("file is 0-7");
            position.put_piece(
                Square::new(1, file),
                Piece::new(Color::White, Kind::Pawn(id)),
            );
            position.put_piece(
                Square::new(6, file),
                Piece::new(Color::Black, Kind::Pawn(id)),
            );
        }
        position.castling = CastlingRights::all();
        position
    }

    /// An empty board with White to move and no rights
    #[must_use]
    pub(crate) fn empty() -> Self {
        Position {
            squares: [SquareStack::empty(); 64],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            moved_pawns: MovedPawns::new(),
            halfmove_clock: 0,
            fullmove: 1,
            king_sq: [None, None],
            history: Vec::new(),
        }
    }

    /// The side to move
    #[inline]
    #[must_use]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Current castling rights
    #[inline]
    #[must_use]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// The en-passant target square, if the previous ply was a double push
    #[inline]
    #[must_use]
    pub const fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// The moved-pawn set
    #[inline]
    #[must_use]
    pub const fn moved_pawns(&self) -> MovedPawns {
        self.moved_pawns
    }

    #[inline]
    #[must_use]
    pub const fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub const fn fullmove_number(&self) -> u32 {
        self.fullmove
    }

    /// The committed-move audit log, oldest first
    #[inline]
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Contents of a square
    #[inline]
    #[must_use]
    pub const fn stack_at(&self, sq: Square) -> SquareStack {
        self.squares[sq.as_index()]
    }

    #[inline]
    #[must_use]
    pub const fn is_empty_square(&self, sq: Square) -> bool {
        self.squares[sq.as_index()].is_empty()
    }

    /// Where a color's king stands. `None` only for artificial kingless
    /// boards built by hand; parsed positions always have both kings.
    #[inline]
    #[must_use]
    pub const fn king_square(&self, color: Color) -> Option<Square> {
        self.king_sq[color.index()]
    }

    /// Whether a pawn with this identity still has its double push
    #[inline]
    #[must_use]
    pub fn pawn_may_double_push(&self, color: Color, id: PawnId) -> bool {
        !self.moved_pawns.contains(color, id)
    }

    /// Place a piece on top of a square, keeping the king cache current.
    pub(crate) fn put_piece(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.as_index()].push(piece);
        if piece.is_king() {
            self.king_sq[piece.color.index()] = Some(sq);
        }
    }

    /// Replace the contents of a square wholesale.
    pub(crate) fn set_stack(&mut self, sq: Square, stack: SquareStack) {
        self.squares[sq.as_index()] = stack;
        for piece in stack.iter() {
            if piece.is_king() {
                self.king_sq[piece.color.index()] = Some(sq);
            }
        }
    }

    /// Recompute the king cache from the board array.
    pub(crate) fn refresh_king_cache(&mut self) {
        self.king_sq = [None, None];
        for sq in Square::all() {
            for piece in self.stack_at(sq).iter() {
                if piece.is_king() {
                    self.king_sq[piece.color.index()] = Some(sq);
                }
            }
        }
    }

    /// A copy for hypothetical-move tests. The audit log is not cloned;
    /// scratch boards are discarded after the check test.
    #[must_use]
    pub(crate) fn scratch(&self) -> Position {
        Position {
            squares: self.squares,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            moved_pawns: self.moved_pawns,
            halfmove_clock: self.halfmove_clock,
            fullmove: self.fullmove,
            king_sq: self.king_sq,
            history: Vec::new(),
        }
    }

    /// Append a committed move to the audit log.
    pub(crate) fn record(&mut self, color: Color, notation: String) {
        self.history.push(HistoryEntry { color, notation });
    }

    /// Pieces of one color with their squares; stacked pieces are yielded
    /// individually with the same square.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().flat_map(move |sq| {
            self.stack_at(sq)
                .iter()
                .filter(move |p| p.color == color)
                .map(move |p| (sq, p))
        })
    }

    /// Whether the committed move record describes a straight double pawn
    /// push (sets the en-passant target).
    #[must_use]
    pub(crate) fn is_double_push(mv: &Move, moved_pawn: bool, dest_was_empty: bool) -> bool {
        moved_pawn
            && dest_was_empty
            && mv.from.file() == mv.to.file()
            && mv.from.rank().abs_diff(mv.to.rank()) == 2
            && matches!(mv.kind, MoveKind::Normal | MoveKind::Unklik)
    }
}

impl PartialEq for Position {
    /// Position equality covers everything FEN round-trips: the board with
    /// pawn identities, side to move, castling, en passant, counters, and
    /// the moved-pawn set. The audit log is not position state.
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.moved_pawns == other.moved_pawns
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove == other.fullmove
    }
}

impl Eq for Position {}

impl Default for Position {
    fn default() -> Self {
        Position::initial_setup()
    }
}

impl fmt::Display for Position {
    /// Grid rendering with two-character cells: singletons print the piece
    /// and a space, stacks print bottom then top (top lowercased).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for rank in (0..8).rev() {
            write!(f, "{} | ", rank + 1)?;
            for file in 0..8 {
                let stack = self.stack_at(Square::new(rank, file));
                match (stack.bottom(), stack.top()) {
                    (None, _) => write!(f, ". ")?,
                    (Some(bottom), Some(top)) if stack.is_stacked() => write!(
                        f,
                        "{}{}",
                        bottom.to_fen_char(),
                        top.to_fen_char().to_ascii_lowercase()
                    )?,
                    (Some(single), _) => write!(f, "{} ", single.to_fen_char())?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +-----------------+")?;
        writeln!(f, "    a b c d e f g h")?;
        write!(f, "Turn: {}", self.side_to_move)
    }
}
