//! Error types for board and session operations.

use std::fmt;

use super::types::Square;

/// Error type for position-string (FEN) parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few parts (needs at least 4)
    TooFewParts { found: usize },
    /// Invalid piece character in position string
    InvalidPiece { char: char },
    /// Unterminated stack group `(..` in position string
    UnclosedStack { rank: usize },
    /// A stack group holds an invalid combination of pieces
    InvalidStack { rank: usize, file: usize },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Invalid rank in position string
    InvalidRank { rank: usize },
    /// Too many files in a rank
    TooManyFiles { rank: usize, files: usize },
    /// Invalid moved-pawn set field
    InvalidMovedPawns { found: String },
    /// Invalid pawn identity field
    InvalidPawnIds { found: String },
    /// A side has no king, or more than one
    BadKingCount { color_name: &'static str, found: usize },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::UnclosedStack { rank } => {
                write!(f, "Unclosed stack group in rank {rank}")
            }
            FenError::InvalidStack { rank, file } => {
                write!(f, "Invalid stack contents at rank {rank}, file {file}")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidRank { rank } => {
                write!(f, "Invalid rank index {rank} in FEN")
            }
            FenError::TooManyFiles { rank, files } => {
                write!(f, "Too many files ({files}) in rank {rank}")
            }
            FenError::InvalidMovedPawns { found } => {
                write!(f, "Invalid moved-pawn field '{found}'")
            }
            FenError::InvalidPawnIds { found } => {
                write!(f, "Invalid pawn identity field '{found}'")
            }
            FenError::BadKingCount { color_name, found } => {
                write!(f, "{color_name} must have exactly one king, found {found}")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for compact move-token parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Token too short to hold two squares
    TooShort { len: usize },
    /// Invalid square notation in token
    InvalidSquare { notation: String },
    /// Invalid suffix characters after the squares
    InvalidSuffix { suffix: String },
    /// Unknown move-kind tag after ':'
    UnknownTag { tag: String },
    /// Token matches more than one legal move; a `:tag` is required
    Ambiguous { token: String },
    /// Token matches no legal move
    NoMatch { token: String },
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::TooShort { len } => {
                write!(f, "Move token must have at least 4 characters, found {len}")
            }
            TokenError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            TokenError::InvalidSuffix { suffix } => {
                write!(f, "Invalid move token suffix '{suffix}'")
            }
            TokenError::UnknownTag { tag } => {
                write!(f, "Unknown move-kind tag '{tag}'")
            }
            TokenError::Ambiguous { token } => {
                write!(f, "Move token '{token}' is ambiguous, append a :tag")
            }
            TokenError::NoMatch { token } => {
                write!(f, "No legal move matches '{token}'")
            }
        }
    }
}

impl std::error::Error for TokenError {}

/// Error type for move submission.
///
/// Every variant is surfaced to the caller; nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Submitted by the side not on move
    NotYourTurn,
    /// Source square is empty
    NoPieceOnSource { square: Square },
    /// Source square holds opposing pieces
    NotYourPiece { square: Square },
    /// Unklik index outside `{0,1}` or the source holds a single piece
    BadUnclickIndex { index: u8 },
    /// The (from, to, kind) triple is not in the legal set, including
    /// moves that would leave the mover's own king in check
    IllegalMove,
    /// Submitted before the session was started
    GameNotStarted,
    /// Submitted after a terminal state was reached
    GameOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::NotYourTurn => write!(f, "Not your turn"),
            MoveError::NoPieceOnSource { square } => {
                write!(f, "No piece on source square {square}")
            }
            MoveError::NotYourPiece { square } => {
                write!(f, "Piece on {square} belongs to the opponent")
            }
            MoveError::BadUnclickIndex { index } => {
                write!(f, "Bad unklik index {index}")
            }
            MoveError::IllegalMove => write!(f, "Illegal move"),
            MoveError::GameNotStarted => write!(f, "Game has not started"),
            MoveError::GameOver => write!(f, "Game is over"),
        }
    }
}

impl std::error::Error for MoveError {}
