//! End-to-end scenarios driven through the session API.

use klikschaak::board::{
    Color, Kind, Move, MoveKind, Position, Square, TokenError, Wing, STARTING_FEN,
};
use klikschaak::session::{PlayerId, Session, SessionConfig, Submitted, Terminal};

const WHITE: PlayerId = PlayerId(10);
const BLACK: PlayerId = PlayerId(20);

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn started(position: Position) -> Session {
    let mut session = Session::with_position(SessionConfig::default(), position);
    session.join(WHITE).unwrap();
    session.join(BLACK).unwrap();
    session.start().unwrap();
    session
}

fn play(session: &mut Session, player: PlayerId, token: &str) -> Submitted {
    let mv = session.position().resolve_token(token).unwrap();
    session.submit(player, &mv).unwrap()
}

#[test]
fn scenario_three_opening_moves() {
    let mut session = started(Position::from_fen(STARTING_FEN).unwrap());
    play(&mut session, WHITE, "e2e4");
    play(&mut session, BLACK, "e7e5");
    play(&mut session, WHITE, "g1f3");

    let position = session.position();
    assert_eq!(position.stack_at(sq("f3")).top().unwrap().kind, Kind::Knight);
    assert_eq!(position.stack_at(sq("f3")).top().unwrap().color, Color::White);
    assert_eq!(position.side_to_move(), Color::Black);
    assert_eq!(position.en_passant_target(), None);
    assert_eq!(position.history().len(), 3);
}

#[test]
fn scenario_klik_onto_corner_preserves_castling() {
    // Knight re-enters the queenside corner by klik; the rook never moved,
    // so O-O-O stays available
    let position = Position::from_fen("4k3/8/8/8/8/8/2N5/R3K3 w Q - 0 1").unwrap();
    let mut session = started(position);

    play(&mut session, WHITE, "c2a1k");
    let a1 = session.position().stack_at(sq("a1"));
    assert!(a1.is_stacked());
    assert_eq!(a1.bottom().unwrap().kind, Kind::Rook);
    assert_eq!(a1.top().unwrap().kind, Kind::Knight);
    assert!(session.position().castling_rights().has(Color::White, Wing::Queen));

    play(&mut session, BLACK, "e8d8");

    // The castle now runs with a stacked rook: a choice on an empty d1
    let moves = session.position().legal_moves();
    assert!(moves
        .iter()
        .any(|m| m.kind == MoveKind::CastleQChoice && m.to == sq("c1")));
}

#[test]
fn scenario_unklik_promotion() {
    let position = Position::from_fen("k7/4(RP)3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let mut session = started(position);

    let mv = session.position().resolve_token("e7e8qu1").unwrap();
    let Submitted::Committed { notation, terminal } = session.submit(WHITE, &mv).unwrap() else {
        panic!("expected commit");
    };
    assert_eq!(notation, "Pe7-e8=Q (unklik)");
    assert_eq!(terminal, None);

    let position = session.position();
    let e7 = position.stack_at(sq("e7"));
    assert_eq!(e7.len(), 1);
    assert_eq!(e7.top().unwrap().kind, Kind::Rook);
    let e8 = position.stack_at(sq("e8"));
    assert_eq!(e8.len(), 1);
    assert_eq!(e8.top().unwrap().kind, Kind::Queen);
    assert_eq!(position.side_to_move(), Color::Black);
    assert!(!position.is_in_check(Color::White));
}

#[test]
fn scenario_queen_diagonal_onto_ep_target_is_plain() {
    // (QP) on c5 with the ep target on b6: only the queen reaches b6, and
    // diagonally at that, so no choice surfaces and the move is Normal
    let position = Position::from_fen("4k3/8/8/1p(QP)5/8/8/8/4K3 w - b6 0 1").unwrap();
    let session = started(position);

    let moves = session.position().legal_moves();
    let to_b6: Vec<_> = moves.iter().filter(|m| m.to == sq("b6")).collect();
    assert_eq!(to_b6.len(), 1);
    assert_eq!(to_b6[0].kind, MoveKind::Normal);
    assert!(moves.iter().all(|m| m.kind != MoveKind::EnPassantChoice));
}

#[test]
fn scenario_stacked_pawn_straight_push_surfaces_choice() {
    let position = Position::from_fen("4k3/8/8/8/1(PP)6/8/8/4K3 w - b5 0 1").unwrap();
    let mut session = started(position);

    let moves = session.position().legal_moves();
    assert!(moves
        .iter()
        .any(|m| m.kind == MoveKind::EnPassantChoice && m.to == sq("b5")));

    // The bare token is ambiguous until the player resolves the choice
    assert!(matches!(
        session.position().resolve_token("b4b5"),
        Err(TokenError::Ambiguous { .. })
    ));
    let resolved = session.position().resolve_token("b4b5:en-passant").unwrap();
    let Submitted::Committed { notation, .. } = session.submit(WHITE, &resolved).unwrap() else {
        panic!("expected commit");
    };
    assert!(notation.ends_with("e.p."));
}

#[test]
fn scenario_stalemate_after_queen_closes_in() {
    let position = Position::from_fen("8/8/8/8/1q6/8/2k5/K7 b - - 0 1").unwrap();
    let mut session = started(position);

    let Submitted::Committed { terminal, .. } = play(&mut session, BLACK, "b4b3") else {
        panic!("expected commit");
    };
    assert_eq!(terminal, Some(Terminal::Stalemate));
    assert!(!session.is_active());
}

#[test]
fn scenario_stacked_rook_castle_choice_both_resolutions() {
    let fen = "4k3/8/8/8/8/8/8/4K2(RB) w K - 0 1";

    // Resolution one: rook only, the bishop stays home
    let mut session = started(Position::from_fen(fen).unwrap());
    let moves = session.position().legal_moves();
    assert!(moves.iter().any(|m| m.kind == MoveKind::CastleKChoice));

    session
        .submit(WHITE, &Move::new(sq("e1"), sq("g1"), MoveKind::CastleK))
        .unwrap();
    let position = session.position();
    assert!(position.stack_at(sq("g1")).top().unwrap().is_king());
    assert_eq!(position.stack_at(sq("f1")).top().unwrap().kind, Kind::Rook);
    assert_eq!(position.stack_at(sq("h1")).top().unwrap().kind, Kind::Bishop);

    // Resolution two: both pieces cross as a stack
    let mut session = started(Position::from_fen(fen).unwrap());
    session
        .submit(WHITE, &Move::new(sq("e1"), sq("g1"), MoveKind::CastleKBoth))
        .unwrap();
    let position = session.position();
    assert!(position.stack_at(sq("g1")).top().unwrap().is_king());
    let f1 = position.stack_at(sq("f1"));
    assert_eq!(f1.bottom().unwrap().kind, Kind::Rook);
    assert_eq!(f1.top().unwrap().kind, Kind::Bishop);
    assert!(position.is_empty_square(sq("h1")));
}

#[test]
fn scenario_full_game_to_checkmate_with_stacks() {
    // A short game where White builds a stack, unkliks, and mates
    let mut session = started(Position::from_fen(STARTING_FEN).unwrap());
    play(&mut session, WHITE, "e2e4");
    play(&mut session, BLACK, "e7e5");
    play(&mut session, WHITE, "f1c4");
    play(&mut session, BLACK, "b8c6");
    play(&mut session, WHITE, "d1h5");
    play(&mut session, BLACK, "g8f6");
    let Submitted::Committed { notation, terminal } = play(&mut session, WHITE, "h5f7") else {
        panic!("expected commit");
    };
    assert_eq!(notation, "Qh5xf7");
    assert_eq!(
        terminal,
        Some(Terminal::Checkmate {
            winner: Color::White
        })
    );
}

#[test]
fn scenario_snapshot_mid_game_for_observer() {
    let mut session = started(Position::from_fen(STARTING_FEN).unwrap());
    play(&mut session, WHITE, "e2e4");
    let observer = session.snapshot();
    play(&mut session, BLACK, "e7e5");
    assert_eq!(observer.position().history().len(), 1);
    assert_eq!(session.position().history().len(), 2);
}
