//! Castling execution, the stacked-rook variants, and right maintenance.

use super::{executable_moves, find, sq};
use crate::board::{Color, Kind, Move, MoveKind, Position, Wing};

#[test]
fn test_plain_castle_execution() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let notation = pos
        .commit_move(&Move::new(sq("e1"), sq("g1"), MoveKind::CastleK))
        .unwrap();
    assert_eq!(notation, "O-O");
    assert!(pos.stack_at(sq("g1")).top().unwrap().is_king());
    assert_eq!(pos.stack_at(sq("f1")).top().unwrap().kind, Kind::Rook);
    assert!(pos.is_empty_square(sq("e1")));
    assert!(pos.is_empty_square(sq("h1")));
    assert!(!pos.castling_rights().has(Color::White, Wing::King));
    assert!(!pos.castling_rights().has(Color::White, Wing::Queen));
    assert!(pos.castling_rights().has(Color::Black, Wing::King));
}

#[test]
fn test_queenside_castle_execution() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let notation = pos
        .commit_move(&Move::new(sq("e1"), sq("c1"), MoveKind::CastleQ))
        .unwrap();
    assert_eq!(notation, "O-O-O");
    assert!(pos.stack_at(sq("c1")).top().unwrap().is_king());
    assert_eq!(pos.stack_at(sq("d1")).top().unwrap().kind, Kind::Rook);
}

#[test]
fn test_castle_klik_stacks_rook_on_resident() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4KP1R w K - 0 1").unwrap();
    let mv = pos.resolve_token("e1g1").unwrap();
    assert_eq!(mv.kind, MoveKind::CastleKKlik);
    let notation = pos.commit_move(&mv).unwrap();
    assert_eq!(notation, "O-O (rook klik)");

    let f1 = pos.stack_at(sq("f1"));
    assert!(f1.is_stacked());
    assert!(f1.bottom().unwrap().is_pawn());
    assert_eq!(f1.top().unwrap().kind, Kind::Rook);
    assert!(pos.stack_at(sq("g1")).top().unwrap().is_king());
}

#[test]
fn test_stacked_rook_choice_rook_only() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2(RB) w K - 0 1").unwrap();
    let moves = pos.legal_moves();
    assert_eq!(find(&moves, "e1", "g1", MoveKind::CastleKChoice).len(), 1);

    pos.commit_move(&Move::new(sq("e1"), sq("g1"), MoveKind::CastleK))
        .unwrap();
    assert!(pos.stack_at(sq("g1")).top().unwrap().is_king());
    assert_eq!(pos.stack_at(sq("f1")).top().unwrap().kind, Kind::Rook);
    assert_eq!(pos.stack_at(sq("f1")).len(), 1);
    // The bishop companion stays on the corner
    assert_eq!(pos.stack_at(sq("h1")).top().unwrap().kind, Kind::Bishop);
    assert_eq!(pos.stack_at(sq("h1")).len(), 1);
}

#[test]
fn test_stacked_rook_choice_both_cross() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2(RB) w K - 0 1").unwrap();
    let notation = pos
        .commit_move(&Move::new(sq("e1"), sq("g1"), MoveKind::CastleKBoth))
        .unwrap();
    assert_eq!(notation, "O-O (both)");

    let f1 = pos.stack_at(sq("f1"));
    assert!(f1.is_stacked());
    assert_eq!(f1.bottom().unwrap().kind, Kind::Rook);
    assert_eq!(f1.top().unwrap().kind, Kind::Bishop);
    assert!(pos.is_empty_square(sq("h1")));
}

#[test]
fn test_choice_kind_itself_is_not_executable() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2(RB) w K - 0 1").unwrap();
    let err = pos
        .commit_move(&Move::new(sq("e1"), sq("g1"), MoveKind::CastleKChoice))
        .unwrap_err();
    assert_eq!(err, crate::board::MoveError::IllegalMove);
}

#[test]
fn test_stacked_rook_occupied_destination() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4KP1(RB) w K - 0 1").unwrap();
    let mv = pos.resolve_token("e1g1").unwrap();
    assert_eq!(mv.kind, MoveKind::CastleKUnklikKlik);
    pos.commit_move(&mv).unwrap();

    let f1 = pos.stack_at(sq("f1"));
    assert!(f1.bottom().unwrap().is_pawn());
    assert_eq!(f1.top().unwrap().kind, Kind::Rook);
    assert_eq!(pos.stack_at(sq("h1")).top().unwrap().kind, Kind::Bishop);
}

#[test]
fn test_klik_onto_corner_keeps_right() {
    // The c2 knight re-enters a1 by klik; queenside castling survives
    // because the rook never left its corner
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/2N5/R3K3 w Q - 0 1").unwrap();
    let mv = pos.resolve_token("c2a1k").unwrap();
    pos.commit_move(&mv).unwrap();

    let a1 = pos.stack_at(sq("a1"));
    assert!(a1.is_stacked());
    assert_eq!(a1.bottom().unwrap().kind, Kind::Rook);
    assert_eq!(a1.top().unwrap().kind, Kind::Knight);
    assert!(pos.castling_rights().has(Color::White, Wing::Queen));
}

#[test]
fn test_rook_unklik_off_corner_clears_right() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/(RN)3K3 w Q - 0 1").unwrap();
    let mv = pos.resolve_token("a1a4u0").unwrap();
    pos.commit_move(&mv).unwrap();
    assert!(!pos.castling_rights().has(Color::White, Wing::Queen));
}

#[test]
fn test_companion_unklik_off_corner_keeps_right() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/(RN)3K3 w Q - 0 1").unwrap();
    let mv = pos.resolve_token("a1b3u1").unwrap();
    pos.commit_move(&mv).unwrap();
    assert_eq!(pos.stack_at(sq("a1")).top().unwrap().kind, Kind::Rook);
    assert!(pos.castling_rights().has(Color::White, Wing::Queen));
}

#[test]
fn test_capturing_corner_stack_clears_right() {
    let mut pos = Position::from_fen("r3k3/8/8/8/8/8/8/(RN)3K3 b Q - 0 1").unwrap();
    let mv = pos.resolve_token("a8a1").unwrap();
    pos.commit_move(&mv).unwrap();
    // Both corner pieces are gone and the right with them
    assert_eq!(pos.stack_at(sq("a1")).len(), 1);
    assert_eq!(pos.stack_at(sq("a1")).top().unwrap().color, Color::Black);
    assert!(!pos.castling_rights().has(Color::White, Wing::Queen));
}

#[test]
fn test_king_move_clears_both_rights() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mv = pos.resolve_token("e1f1").unwrap();
    pos.commit_move(&mv).unwrap();
    assert!(!pos.castling_rights().has(Color::White, Wing::King));
    assert!(!pos.castling_rights().has(Color::White, Wing::Queen));
    assert!(pos.castling_rights().has(Color::Black, Wing::King));
    assert!(pos.castling_rights().has(Color::Black, Wing::Queen));
}

#[test]
fn test_whole_stack_move_off_corner_clears_right() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/(RN)3K3 w Q - 0 1").unwrap();
    let moves = executable_moves(&pos);
    let whole = find(&moves, "a1", "a5", MoveKind::Normal);
    assert_eq!(whole.len(), 1);
    pos.commit_move(&whole[0]).unwrap();
    assert!(!pos.castling_rights().has(Color::White, Wing::Queen));
}
