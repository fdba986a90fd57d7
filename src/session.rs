//! Game sessions: turn order, termination detection, resignation, and draw
//! agreement.
//!
//! A session owns exactly one [`Position`] and mutates it only through
//! `commit_move`. Operations are not re-entrant; anything a `submit`
//! produces (notation, a pending promotion, a terminal state) is returned
//! to the caller, never delivered through callbacks.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Color, Kind, Move, MoveError, Position, Square};

/// Opaque reference to a seated player. The transport layer decides what
/// the number means.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlayerId(pub u64);

/// Per-session rule configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionConfig {
    /// Promote to a queen without surfacing the decision
    pub auto_promote_to_queen: bool,
}

/// Absorbing terminal states. `winner` is the color that takes the point.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Terminal {
    Checkmate { winner: Color },
    Stalemate,
    Resigned { winner: Color },
    DrawAgreed,
    TimeoutOrDisconnect { winner: Color },
}

/// Errors from session lifecycle operations (`join`, `start`, draw flow).
/// Move submission uses the [`MoveError`] taxonomy instead.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionError {
    /// Both seats are taken
    Full,
    /// `start` before both seats are filled
    NotReady,
    /// `start` after the game already started
    AlreadyStarted,
    /// The player is not seated in this session
    UnknownPlayer,
    /// The operation needs an active game
    NotActive,
    /// `respond_draw` with no standing offer from the opponent
    NoDrawOffer,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Full => write!(f, "Session already has two players"),
            SessionError::NotReady => write!(f, "Both seats must be filled before starting"),
            SessionError::AlreadyStarted => write!(f, "Session already started"),
            SessionError::UnknownPlayer => write!(f, "Player is not part of this session"),
            SessionError::NotActive => write!(f, "Game is not active"),
            SessionError::NoDrawOffer => write!(f, "No draw offer to respond to"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Successful outcome of a `submit`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Submitted {
    /// The move was committed; `terminal` is set when it ended the game
    Committed {
        notation: String,
        terminal: Option<Terminal>,
    },
    /// The move reaches a promotion rank and needs a piece choice; nothing
    /// was committed. Resubmit the same move with `promotion` filled in.
    PromotionPending { square: Square, color: Color },
}

#[derive(Clone, Debug)]
enum Phase {
    Setup,
    Active,
    Over(Terminal),
}

/// One game of Klikschaak between two seated players.
#[derive(Clone, Debug)]
pub struct Session {
    position: Position,
    config: SessionConfig,
    seats: [Option<PlayerId>; 2],
    phase: Phase,
    draw_offer: Option<Color>,
}

impl Session {
    /// Create a session in the setup phase with the standard initial
    /// position.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Session {
            position: Position::initial_setup(),
            config,
            seats: [None, None],
            phase: Phase::Setup,
            draw_offer: None,
        }
    }

    /// Create a session over a custom position (analysis, tests).
    #[must_use]
    pub fn with_position(config: SessionConfig, position: Position) -> Self {
        Session {
            position,
            config,
            seats: [None, None],
            phase: Phase::Setup,
            draw_offer: None,
        }
    }

    /// Seat a player. White fills first; re-joining returns the seat
    /// already held (reconnects are idempotent).
    pub fn join(&mut self, player: PlayerId) -> Result<Color, SessionError> {
        if let Some(color) = self.player_color(player) {
            return Ok(color);
        }
        for color in Color::BOTH {
            if self.seats[color.index()].is_none() {
                self.seats[color.index()] = Some(player);
                return Ok(color);
            }
        }
        Err(SessionError::Full)
    }

    /// Move from setup to active play.
    pub fn start(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Setup => {}
            _ => return Err(SessionError::AlreadyStarted),
        }
        if self.seats.iter().any(Option::is_none) {
            return Err(SessionError::NotReady);
        }
        self.phase = Phase::Active;
        Ok(())
    }

    /// Submit a move for the seated player.
    ///
    /// On a promotion-triggering move without a chosen piece this returns
    /// [`Submitted::PromotionPending`] and commits nothing, unless the
    /// session auto-promotes to queen.
    pub fn submit(&mut self, player: PlayerId, mv: &Move) -> Result<Submitted, MoveError> {
        match self.phase {
            Phase::Setup => return Err(MoveError::GameNotStarted),
            Phase::Over(_) => return Err(MoveError::GameOver),
            Phase::Active => {}
        }
        let color = self.player_color(player).ok_or(MoveError::NotYourTurn)?;
        if color != self.position.side_to_move() {
            return Err(MoveError::NotYourTurn);
        }

        let mut normalized = self.position.validate(mv)?;
        if normalized.promotion.is_none() && self.position.triggers_promotion(&normalized) {
            if self.config.auto_promote_to_queen {
                normalized.promotion = Some(Kind::Queen);
            } else {
                return Ok(Submitted::PromotionPending {
                    square: normalized.to,
                    color,
                });
            }
        }

        let notation = self.position.commit_move(&normalized)?;
        self.draw_offer = None;

        let terminal = self.detect_termination();
        if let Some(terminal) = terminal {
            self.phase = Phase::Over(terminal);
        }

        #[cfg(feature = "logging")]
        log::debug!(
            "{color} played {notation}; terminal: {terminal:?}",
        );

        Ok(Submitted::Committed { notation, terminal })
    }

    /// Resign voluntarily. Returns false when nothing happened (unknown
    /// player or no active game).
    pub fn resign(&mut self, player: PlayerId) -> bool {
        self.forfeit(player, false)
    }

    /// Forfeit labelled as a timeout or disconnect. The transport calls
    /// this for the side whose clock ran out; the rules treatment is
    /// identical to resignation.
    pub fn abandon(&mut self, player: PlayerId) -> bool {
        self.forfeit(player, true)
    }

    fn forfeit(&mut self, player: PlayerId, timeout: bool) -> bool {
        if !matches!(self.phase, Phase::Active) {
            return false;
        }
        let Some(color) = self.player_color(player) else {
            return false;
        };
        let winner = color.opponent();
        self.phase = Phase::Over(if timeout {
            Terminal::TimeoutOrDisconnect { winner }
        } else {
            Terminal::Resigned { winner }
        });
        true
    }

    /// Offer a draw. The offer stands until answered or until any move is
    /// committed.
    pub fn offer_draw(&mut self, player: PlayerId) -> Result<(), SessionError> {
        if !matches!(self.phase, Phase::Active) {
            return Err(SessionError::NotActive);
        }
        let color = self
            .player_color(player)
            .ok_or(SessionError::UnknownPlayer)?;
        self.draw_offer = Some(color);
        Ok(())
    }

    /// Answer the opponent's standing draw offer. Returns whether the game
    /// ended in agreement.
    pub fn respond_draw(&mut self, player: PlayerId, accept: bool) -> Result<bool, SessionError> {
        if !matches!(self.phase, Phase::Active) {
            return Err(SessionError::NotActive);
        }
        let color = self
            .player_color(player)
            .ok_or(SessionError::UnknownPlayer)?;
        if self.draw_offer != Some(color.opponent()) {
            return Err(SessionError::NoDrawOffer);
        }
        self.draw_offer = None;
        if accept {
            self.phase = Phase::Over(Terminal::DrawAgreed);
        }
        Ok(accept)
    }

    /// Deep copy for observers and reconnection; the copy shares nothing
    /// with the live session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.clone()
    }

    /// The current position.
    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The terminal state, once reached.
    #[must_use]
    pub fn terminal(&self) -> Option<Terminal> {
        match self.phase {
            Phase::Over(terminal) => Some(terminal),
            _ => None,
        }
    }

    /// Whether moves are currently accepted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active)
    }

    /// The color a player is seated as.
    #[must_use]
    pub fn player_color(&self, player: PlayerId) -> Option<Color> {
        Color::BOTH
            .into_iter()
            .find(|color| self.seats[color.index()] == Some(player))
    }

    /// The standing draw offer, if any.
    #[must_use]
    pub fn draw_offer(&self) -> Option<Color> {
        self.draw_offer
    }

    /// Checkmate or stalemate detection for the side now to move. Unklik
    /// and unklik-klik moves are part of the probe, so a player with only a
    /// stack escape is not stalemated.
    fn detect_termination(&self) -> Option<Terminal> {
        if self.position.has_legal_move() {
            return None;
        }
        let defender = self.position.side_to_move();
        if self.position.is_in_check(defender) {
            Some(Terminal::Checkmate {
                winner: defender.opponent(),
            })
        } else {
            Some(Terminal::Stalemate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MoveKind;

    const WHITE: PlayerId = PlayerId(1);
    const BLACK: PlayerId = PlayerId(2);

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn started_session() -> Session {
        let mut session = Session::new(SessionConfig::default());
        session.join(WHITE).unwrap();
        session.join(BLACK).unwrap();
        session.start().unwrap();
        session
    }

    fn started_with(fen: &str) -> Session {
        let mut session =
            Session::with_position(SessionConfig::default(), Position::from_fen(fen).unwrap());
        session.join(WHITE).unwrap();
        session.join(BLACK).unwrap();
        session.start().unwrap();
        session
    }

    #[test]
    fn test_join_assigns_colors_then_full() {
        let mut session = Session::new(SessionConfig::default());
        assert_eq!(session.join(WHITE), Ok(Color::White));
        assert_eq!(session.join(BLACK), Ok(Color::Black));
        assert_eq!(session.join(PlayerId(3)), Err(SessionError::Full));
        // Rejoining is idempotent
        assert_eq!(session.join(WHITE), Ok(Color::White));
    }

    #[test]
    fn test_start_needs_two_players() {
        let mut session = Session::new(SessionConfig::default());
        assert_eq!(session.start(), Err(SessionError::NotReady));
        session.join(WHITE).unwrap();
        assert_eq!(session.start(), Err(SessionError::NotReady));
        session.join(BLACK).unwrap();
        assert_eq!(session.start(), Ok(()));
        assert_eq!(session.start(), Err(SessionError::AlreadyStarted));
    }

    #[test]
    fn test_submit_before_start() {
        let mut session = Session::new(SessionConfig::default());
        session.join(WHITE).unwrap();
        let mv = Move::new(sq("e2"), sq("e4"), MoveKind::Normal);
        assert_eq!(session.submit(WHITE, &mv), Err(MoveError::GameNotStarted));
    }

    #[test]
    fn test_turn_order_enforced() {
        let mut session = started_session();
        let mv = Move::new(sq("e7"), sq("e5"), MoveKind::Normal);
        assert_eq!(session.submit(BLACK, &mv), Err(MoveError::NotYourTurn));
        assert_eq!(
            session.submit(PlayerId(9), &Move::new(sq("e2"), sq("e4"), MoveKind::Normal)),
            Err(MoveError::NotYourTurn)
        );
    }

    #[test]
    fn test_submit_normal_move_flips_turn() {
        let mut session = started_session();
        let result = session
            .submit(WHITE, &Move::new(sq("e2"), sq("e4"), MoveKind::Normal))
            .unwrap();
        assert_eq!(
            result,
            Submitted::Committed {
                notation: "Pe2-e4".to_string(),
                terminal: None
            }
        );
        assert_eq!(session.position().side_to_move(), Color::Black);
        assert_eq!(session.position().history().len(), 1);
    }

    #[test]
    fn test_submit_illegal_move() {
        let mut session = started_session();
        assert_eq!(
            session.submit(WHITE, &Move::new(sq("e2"), sq("e5"), MoveKind::Normal)),
            Err(MoveError::IllegalMove)
        );
        assert_eq!(
            session.submit(WHITE, &Move::new(sq("e4"), sq("e5"), MoveKind::Normal)),
            Err(MoveError::NoPieceOnSource { square: sq("e4") })
        );
        assert_eq!(
            session.submit(WHITE, &Move::new(sq("e7"), sq("e5"), MoveKind::Normal)),
            Err(MoveError::NotYourPiece { square: sq("e7") })
        );
    }

    #[test]
    fn test_promotion_pending_then_resubmit() {
        let mut session = started_with("7k/4P3/8/8/8/8/8/4K3 w - - 0 1");
        let push = Move::new(sq("e7"), sq("e8"), MoveKind::Normal);
        let outcome = session.submit(WHITE, &push).unwrap();
        assert_eq!(
            outcome,
            Submitted::PromotionPending {
                square: sq("e8"),
                color: Color::White
            }
        );
        // Nothing committed yet
        assert_eq!(session.position().side_to_move(), Color::White);

        let outcome = session.submit(WHITE, &push.promoting(Kind::Rook)).unwrap();
        let Submitted::Committed { notation, .. } = outcome else {
            panic!("expected commit");
        };
        assert_eq!(notation, "Pe7-e8=R");
        assert_eq!(
            session.position().stack_at(sq("e8")).top().unwrap().kind,
            Kind::Rook
        );
    }

    #[test]
    fn test_auto_promotion_config() {
        let mut session = Session::with_position(
            SessionConfig {
                auto_promote_to_queen: true,
            },
            Position::from_fen("7k/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap(),
        );
        session.join(WHITE).unwrap();
        session.join(BLACK).unwrap();
        session.start().unwrap();

        let outcome = session
            .submit(WHITE, &Move::new(sq("e7"), sq("e8"), MoveKind::Normal))
            .unwrap();
        let Submitted::Committed { notation, .. } = outcome else {
            panic!("expected commit");
        };
        assert_eq!(notation, "Pe7-e8=Q");
    }

    #[test]
    fn test_checkmate_detection() {
        // Fool's mate delivered by the queen
        let mut session = started_session();
        let moves = [
            (WHITE, "f2f3"),
            (BLACK, "e7e5"),
            (WHITE, "g2g4"),
            (BLACK, "d8h4"),
        ];
        let mut last = None;
        for (player, token) in moves {
            let mv = session.position().resolve_token(token).unwrap();
            last = Some(session.submit(player, &mv).unwrap());
        }
        let Some(Submitted::Committed { terminal, .. }) = last else {
            panic!("expected commit");
        };
        assert_eq!(
            terminal,
            Some(Terminal::Checkmate {
                winner: Color::Black
            })
        );
        assert!(!session.is_active());
        assert_eq!(
            session.submit(WHITE, &Move::new(sq("e2"), sq("e3"), MoveKind::Normal)),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn test_stalemate_detection() {
        // After Qb4-b3 the white king is not in check but has no move
        let mut session = started_with("8/8/8/8/1q6/8/2k5/K7 b - - 0 1");
        let mv = session.position().resolve_token("b4b3").unwrap();
        let Submitted::Committed { terminal, .. } = session.submit(BLACK, &mv).unwrap() else {
            panic!("expected commit");
        };
        assert_eq!(terminal, Some(Terminal::Stalemate));
    }

    #[test]
    fn test_resign_and_noop() {
        let mut session = started_session();
        assert!(!session.resign(PlayerId(9)));
        assert!(session.resign(BLACK));
        assert_eq!(
            session.terminal(),
            Some(Terminal::Resigned {
                winner: Color::White
            })
        );
        // Absorbing: a second resign is a no-op
        assert!(!session.resign(WHITE));
    }

    #[test]
    fn test_abandon_labels_timeout() {
        let mut session = started_session();
        assert!(session.abandon(WHITE));
        assert_eq!(
            session.terminal(),
            Some(Terminal::TimeoutOrDisconnect {
                winner: Color::Black
            })
        );
    }

    #[test]
    fn test_draw_offer_flow() {
        let mut session = started_session();
        assert_eq!(
            session.respond_draw(BLACK, true),
            Err(SessionError::NoDrawOffer)
        );
        session.offer_draw(WHITE).unwrap();
        // The offerer cannot answer their own offer
        assert_eq!(
            session.respond_draw(WHITE, true),
            Err(SessionError::NoDrawOffer)
        );
        assert_eq!(session.respond_draw(BLACK, false), Ok(false));
        assert!(session.is_active());

        session.offer_draw(WHITE).unwrap();
        assert_eq!(session.respond_draw(BLACK, true), Ok(true));
        assert_eq!(session.terminal(), Some(Terminal::DrawAgreed));
    }

    #[test]
    fn test_move_clears_draw_offer() {
        let mut session = started_session();
        session.offer_draw(BLACK).unwrap();
        let mv = session.position().resolve_token("e2e4").unwrap();
        session.submit(WHITE, &mv).unwrap();
        assert_eq!(session.draw_offer(), None);
        assert_eq!(
            session.respond_draw(WHITE, true),
            Err(SessionError::NoDrawOffer)
        );
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut session = started_session();
        let snapshot = session.snapshot();
        let mv = session.position().resolve_token("e2e4").unwrap();
        session.submit(WHITE, &mv).unwrap();
        assert_eq!(snapshot.position().side_to_move(), Color::White);
        assert_eq!(session.position().side_to_move(), Color::Black);
        assert!(snapshot.position().history().is_empty());
    }

    #[test]
    fn test_determinism_of_submit() {
        let base = started_session();
        let mv = base.position().resolve_token("g1f3").unwrap();
        let mut a = base.clone();
        let mut b = base.clone();
        let ra = a.submit(WHITE, &mv).unwrap();
        let rb = b.submit(WHITE, &mv).unwrap();
        assert_eq!(ra, rb);
        assert_eq!(a.position(), b.position());
        assert_eq!(a.position().to_fen(), b.position().to_fen());
    }
}
