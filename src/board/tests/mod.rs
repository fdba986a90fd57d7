//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `klik.rs` - Klik, unklik, and combined stack movement
//! - `castling.rs` - Castling execution and right maintenance
//! - `en_passant.rs` - En passant target lifecycle and choice resolution
//! - `promotion.rs` - Promotion triggers and execution
//! - `apply.rs` - Executor mechanics and bookkeeping
//! - `edge_cases.rs` - Check evasion, pins, terminal positions
//! - `proptest.rs` - Property-based random playouts

mod castling;

use super::{Move, MoveKind, Position, Square};

/// Test helper: parse a square.
fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

/// Test helper: the executable legal moves (choices expanded).
fn executable_moves(position: &Position) -> Vec<Move> {
    position
        .legal_moves()
        .iter()
        .flat_map(super::apply::expand_choice)
        .filter(|mv| position.is_legal(mv))
        .collect()
}

/// Test helper: filter moves by coordinates and kind.
fn find(moves: &[Move], from: &str, to: &str, kind: MoveKind) -> Vec<Move> {
    let from = sq(from);
    let to = sq(to);
    moves
        .iter()
        .copied()
        .filter(|m| m.from == from && m.to == to && m.kind == kind)
        .collect()
}
