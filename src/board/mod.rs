mod apply;
mod attacks;
mod builder;
mod error;
mod fen;
mod movegen;
mod notation;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use builder::{pawn, PositionBuilder};
pub use error::{FenError, MoveError, SquareError, TokenError};
pub use fen::STARTING_FEN;
pub use state::{HistoryEntry, MovedPawns, Position};
pub use types::{
    CastlingRights, Color, Kind, Move, MoveKind, PawnId, Piece, Square, SquareStack, TokenPattern,
    Wing,
};
