//! Fluent builder for constructing positions.
//!
//! Allows creating positions piece by piece rather than parsing FEN strings.
//! Used heavily by the test suite for hand-crafted setups with stacks.
//!
//! # Example
//! ```
//! use klikschaak::board::{Color, Kind, PositionBuilder, Square};
//!
//! let position = PositionBuilder::new()
//!     .piece(Square::new(0, 4), Color::White, Kind::King)
//!     .piece(Square::new(7, 4), Color::Black, Kind::King)
//!     .stack(Square::new(0, 0), Color::White, Kind::Rook, Kind::Knight)
//!     .side_to_move(Color::White)
//!     .build();
//! assert!(position.stack_at(Square::new(0, 0)).is_stacked());
//! ```

use super::state::Position;
use super::types::{CastlingRights, Color, Kind, PawnId, Piece, Square, SquareStack, Wing};

/// A fluent builder for constructing `Position` values.
///
/// Pawns placed without an explicit identity get one assigned at `build`
/// time: the pawn's file if unclaimed, otherwise the lowest unclaimed tag.
/// Pawns away from their color's starting rank are recorded as moved.
#[derive(Clone, Debug, Default)]
pub struct PositionBuilder {
    stacks: Vec<(Square, SquareStack)>,
    side_to_move: Option<Color>,
    castling: CastlingRights,
    en_passant: Option<Square>,
    moved_pawns: Vec<(Color, PawnId)>,
    halfmove_clock: u32,
}

impl PositionBuilder {
    /// Create a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            stacks: Vec::new(),
            side_to_move: None,
            castling: CastlingRights::none(),
            en_passant: None,
            moved_pawns: Vec::new(),
            halfmove_clock: 0,
        }
    }

    /// Place a single piece, replacing whatever was on the square.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, kind: Kind) -> Self {
        self.stacks.retain(|(sq, _)| *sq != square);
        self.stacks
            .push((square, SquareStack::single(Piece::new(color, kind))));
        self
    }

    /// Place a stack (bottom piece first), replacing whatever was there.
    #[must_use]
    pub fn stack(mut self, square: Square, color: Color, bottom: Kind, top: Kind) -> Self {
        self.stacks.retain(|(sq, _)| *sq != square);
        self.stacks.push((
            square,
            SquareStack::pair(Piece::new(color, bottom), Piece::new(color, top)),
        ));
        self
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.stacks.retain(|(sq, _)| *sq != square);
        self
    }

    /// Set the side to move.
    #[must_use]
    pub fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = Some(color);
        self
    }

    /// Set castling rights wholesale.
    #[must_use]
    pub fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling = rights;
        self
    }

    /// Enable kingside castling for a color.
    #[must_use]
    pub fn castle_kingside(mut self, color: Color) -> Self {
        self.castling.grant(color, Wing::King);
        self
    }

    /// Enable queenside castling for a color.
    #[must_use]
    pub fn castle_queenside(mut self, color: Color) -> Self {
        self.castling.grant(color, Wing::Queen);
        self
    }

    /// Set the en passant target square.
    #[must_use]
    pub fn en_passant(mut self, square: Square) -> Self {
        self.en_passant = Some(square);
        self
    }

    /// Record a pawn identity as having moved.
    #[must_use]
    pub fn pawn_moved(mut self, color: Color, id: PawnId) -> Self {
        self.moved_pawns.push((color, id));
        self
    }

    /// Set the halfmove clock.
    #[must_use]
    pub fn halfmove_clock(mut self, clock: u32) -> Self {
        self.halfmove_clock = clock;
        self
    }

    /// Build the position.
    #[must_use]
    pub fn build(self) -> Position {
        let mut position = Position::empty();
        for (square, stack) in &self.stacks {
            position.set_stack(*square, *stack);
        }

        // Assign identities to pawns placed with the placeholder tag and
        // mark displaced pawns as moved.
        let mut claimed = [0u8; 2];
        for sq in Square::all() {
            for index in 0..position.stack_at(sq).len() {
                let stack = position.stack_at(sq);
                let piece = stack.get(index).expect("index within stack");
                let Some(id) = piece.kind.pawn_id() else {
                    continue;
                };
                let color = piece.color;
                let assigned = if claimed[color.index()] & id.bit() == 0 {
                    id
                } else {
                    lowest_unclaimed(claimed[color.index()]).unwrap_or(id)
                };
                claimed[color.index()] |= assigned.bit();
                if assigned != id {
                    let replacement = Piece::new(color, Kind::Pawn(assigned));
                    let rebuilt = match (index, stack.bottom(), stack.top()) {
                        (0, _, Some(top)) if stack.is_stacked() => {
                            SquareStack::pair(replacement, top)
                        }
                        (0, _, _) => SquareStack::single(replacement),
                        (_, Some(bottom), _) => SquareStack::pair(bottom, replacement),
                        _ => SquareStack::single(replacement),
                    };
                    position.set_stack(sq, rebuilt);
                }
                if sq.rank() != color.pawn_start_rank() || sq.file() != assigned.get() as usize {
                    position.moved_pawns.insert(color, assigned);
                }
            }
        }

        for (color, id) in self.moved_pawns {
            position.moved_pawns.insert(color, id);
        }

        position.side_to_move = self.side_to_move.unwrap_or(Color::White);
        position.castling = self.castling;
        position.en_passant = self.en_passant;
        position.halfmove_clock = self.halfmove_clock;
        position.refresh_king_cache();
        position
    }
}

fn lowest_unclaimed(mask: u8) -> Option<PawnId> {
    PawnId::ALL.into_iter().find(|id| mask & id.bit() == 0)
}

/// Shorthand for a pawn kind when the identity does not matter: the builder
/// reassigns placeholder tags at `build` time.
#[must_use]
pub fn pawn() -> Kind {
    Kind::Pawn(PawnId::new(0).expect("0 is a valid id"))
}
