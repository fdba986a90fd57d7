//! Rules engine for Klikschaak, a chess variant in which up to two friendly
//! pieces may share a square and move jointly.
//!
//! Provides the authoritative rules core:
//! - Position model with stacked squares, pawn identities, and a FEN-like
//!   string form extended with `(XY)` stack groups
//! - Tagged pseudo-move generation (klik, unklik, unklik-klik, the castling
//!   family, en passant, and the surfaced choice variants)
//! - Legality filtering and a single committing executor
//! - Game sessions with termination detection, resignation, and draw
//!   agreement
//!
//! # Quick Start
//!
//! ```
//! use klikschaak::board::Position;
//! use klikschaak::session::{PlayerId, Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::default());
//! let white = PlayerId(1);
//! let black = PlayerId(2);
//! session.join(white).unwrap();
//! session.join(black).unwrap();
//! session.start().unwrap();
//!
//! let mv = session.position().resolve_token("e2e4").unwrap();
//! session.submit(white, &mv).unwrap();
//! assert_eq!(session.position().history().len(), 1);
//! ```
//!
//! # Building Positions
//!
//! ```
//! use klikschaak::board::{Color, Kind, Position, PositionBuilder, Square};
//!
//! // From the FEN-like string (stacks in parentheses, bottom first)
//! let position = Position::from_fen("4k3/8/8/8/4(NP)3/8/8/4K3 w - - 0 1").unwrap();
//! assert!(position.stack_at("e4".parse().unwrap()).is_stacked());
//!
//! // Or with the builder
//! let position = PositionBuilder::new()
//!     .piece(Square::new(0, 4), Color::White, Kind::King)
//!     .piece(Square::new(7, 4), Color::Black, Kind::King)
//!     .stack(Square::new(3, 4), Color::White, Kind::Knight, Kind::Bishop)
//!     .build();
//! assert_eq!(position.candidates_from(Square::new(3, 4)).len(), 21);
//! ```
//!
//! # Features
//!
//! - `serde` - Enable serialization for the value types (`Piece`, `Color`,
//!   `Square`, `Move`, `CastlingRights`, ...)
//! - `logging` - Enable debug logging via the `log` crate

// Enable pedantic lints with sensible domain-specific exceptions
#![warn(clippy::pedantic)]
// Rules code has intentionally similar names (king_sq/king_dest, etc.)
#![allow(clippy::similar_names)]
// Index casts are ubiquitous and safe here (square and stack indices)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// Module-level documentation is sufficient for this codebase
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod board;
pub mod session;
pub mod sync;
