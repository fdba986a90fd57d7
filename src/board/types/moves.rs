//! Move representation and the compact move-token grammar.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::castling::Wing;
use super::piece::Kind;
use super::square::Square;
use crate::board::error::TokenError;

/// The closed set of move types.
///
/// Every combinatorial branch of the rules produces exactly one of these
/// tags, so the executor and the test suite exercise exactly one semantics
/// per token. The `*Choice` kinds are surfaced to the caller for resolution
/// and are never executed directly.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveKind {
    /// Single piece or whole stack moves; captures destroy the entire
    /// destination stack
    Normal,
    /// A singleton joins a friendly singleton, forming a stack
    Klik,
    /// One piece leaves a stack; the other stays behind
    Unklik,
    /// One piece leaves a stack and joins a friendly singleton
    UnklikKlik,
    /// Straight push onto the en-passant target, capturing the passed pawn
    EnPassant,
    /// En passant performed by a piece unklikking out of a stack
    EnPassantUnklik,
    /// The same push is both a plain advance and an en-passant capture;
    /// the caller picks `Normal` or `EnPassant`
    EnPassantChoice,
    /// Kingside castle, rook alone lands on the F file
    CastleK,
    /// Queenside castle, rook alone lands on the D file
    CastleQ,
    /// Kingside castle, rook kliks onto a resident piece on F
    CastleKKlik,
    /// Queenside castle, rook kliks onto a resident piece on D
    CastleQKlik,
    /// Kingside castle with a stacked rook; the rook alone kliks onto F,
    /// its companion stays on the corner
    CastleKUnklikKlik,
    /// Queenside counterpart of `CastleKUnklikKlik`
    CastleQUnklikKlik,
    /// Kingside castle with a stacked rook and an empty F; the caller picks
    /// `CastleK` (rook only) or `CastleKBoth`
    CastleKChoice,
    /// Queenside counterpart of `CastleKChoice`
    CastleQChoice,
    /// Both pieces of the stacked corner cross to F
    CastleKBoth,
    /// Both pieces of the stacked corner cross to D
    CastleQBoth,
}

impl MoveKind {
    #[inline]
    #[must_use]
    pub const fn is_castle(self) -> bool {
        self.castle_wing().is_some()
    }

    /// The wing a castle kind belongs to
    #[inline]
    #[must_use]
    pub const fn castle_wing(self) -> Option<Wing> {
        match self {
            MoveKind::CastleK
            | MoveKind::CastleKKlik
            | MoveKind::CastleKUnklikKlik
            | MoveKind::CastleKChoice
            | MoveKind::CastleKBoth => Some(Wing::King),
            MoveKind::CastleQ
            | MoveKind::CastleQKlik
            | MoveKind::CastleQUnklikKlik
            | MoveKind::CastleQChoice
            | MoveKind::CastleQBoth => Some(Wing::Queen),
            _ => None,
        }
    }

    /// True for kinds the caller must resolve before execution
    #[inline]
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(
            self,
            MoveKind::EnPassantChoice | MoveKind::CastleKChoice | MoveKind::CastleQChoice
        )
    }

    /// True for kinds that capture the passed pawn behind the destination
    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        matches!(self, MoveKind::EnPassant | MoveKind::EnPassantUnklik)
    }

    /// True for kinds that name one of two stacked pieces by index
    #[inline]
    #[must_use]
    pub const fn uses_unklik_index(self) -> bool {
        matches!(
            self,
            MoveKind::Unklik | MoveKind::UnklikKlik | MoveKind::EnPassantUnklik
        )
    }

    /// The executable kinds a choice resolves to
    #[must_use]
    pub const fn choice_resolutions(self) -> Option<[MoveKind; 2]> {
        match self {
            MoveKind::EnPassantChoice => Some([MoveKind::Normal, MoveKind::EnPassant]),
            MoveKind::CastleKChoice => Some([MoveKind::CastleK, MoveKind::CastleKBoth]),
            MoveKind::CastleQChoice => Some([MoveKind::CastleQ, MoveKind::CastleQBoth]),
            _ => None,
        }
    }

    /// Kebab-case tag used by the compact token grammar
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            MoveKind::Normal => "normal",
            MoveKind::Klik => "klik",
            MoveKind::Unklik => "unklik",
            MoveKind::UnklikKlik => "unklik-klik",
            MoveKind::EnPassant => "en-passant",
            MoveKind::EnPassantUnklik => "en-passant-unklik",
            MoveKind::EnPassantChoice => "en-passant-choice",
            MoveKind::CastleK => "castle-k",
            MoveKind::CastleQ => "castle-q",
            MoveKind::CastleKKlik => "castle-k-klik",
            MoveKind::CastleQKlik => "castle-q-klik",
            MoveKind::CastleKUnklikKlik => "castle-k-unklik-klik",
            MoveKind::CastleQUnklikKlik => "castle-q-unklik-klik",
            MoveKind::CastleKChoice => "castle-k-choice",
            MoveKind::CastleQChoice => "castle-q-choice",
            MoveKind::CastleKBoth => "castle-k-both",
            MoveKind::CastleQBoth => "castle-q-both",
        }
    }

    /// Parse a kebab-case tag back to a kind
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<MoveKind> {
        const ALL: [MoveKind; 17] = [
            MoveKind::Normal,
            MoveKind::Klik,
            MoveKind::Unklik,
            MoveKind::UnklikKlik,
            MoveKind::EnPassant,
            MoveKind::EnPassantUnklik,
            MoveKind::EnPassantChoice,
            MoveKind::CastleK,
            MoveKind::CastleQ,
            MoveKind::CastleKKlik,
            MoveKind::CastleQKlik,
            MoveKind::CastleKUnklikKlik,
            MoveKind::CastleQUnklikKlik,
            MoveKind::CastleKChoice,
            MoveKind::CastleQChoice,
            MoveKind::CastleKBoth,
            MoveKind::CastleQBoth,
        ];
        ALL.into_iter().find(|k| k.tag() == tag)
    }
}

/// A candidate or submitted move.
///
/// Candidates come out of the generator with `promotion` unset; a submission
/// that triggers promotion carries the chosen piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    /// Which stacked piece moves (0 = bottom, 1 = top), for the unklik kinds
    pub unklik_index: Option<u8>,
    /// Promotion piece for a pawn reaching its promotion rank
    pub promotion: Option<Kind>,
}

impl Move {
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Move {
            from,
            to,
            kind,
            unklik_index: None,
            promotion: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_unklik(from: Square, to: Square, kind: MoveKind, index: u8) -> Self {
        Move {
            from,
            to,
            kind,
            unklik_index: Some(index),
            promotion: None,
        }
    }

    /// The same move with a promotion piece attached
    #[inline]
    #[must_use]
    pub const fn promoting(mut self, kind: Kind) -> Self {
        self.promotion = Some(kind);
        self
    }

    /// The same move retagged as a different kind (used when resolving a
    /// choice candidate)
    #[inline]
    #[must_use]
    pub const fn retagged(mut self, kind: MoveKind) -> Self {
        self.kind = kind;
        self
    }

    /// Compact string form: `<from><to>` plus optional promotion character,
    /// klik/unklik suffix, and `:<tag>` for kinds the suffix alone cannot
    /// name.
    #[must_use]
    pub fn to_token(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);

        if let Some(promo) = self.promotion {
            s.push(promo.to_char());
        }

        match self.kind {
            MoveKind::Klik => s.push('k'),
            MoveKind::Unklik | MoveKind::EnPassantUnklik => {
                s.push('u');
                s.push((b'0' + self.unklik_index.unwrap_or(0)) as char);
            }
            MoveKind::UnklikKlik => {
                s.push('U');
                s.push((b'0' + self.unklik_index.unwrap_or(0)) as char);
            }
            _ => {}
        }

        let tagged = !matches!(
            self.kind,
            MoveKind::Normal
                | MoveKind::Klik
                | MoveKind::Unklik
                | MoveKind::UnklikKlik
                | MoveKind::CastleK
                | MoveKind::CastleQ
        );
        if tagged {
            s.push(':');
            s.push_str(self.kind.tag());
        }

        s
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_token())
    }
}

/// Suffix read from a compact token
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum TokenSuffix {
    None,
    Klik,
    Unklik(u8),
    UnklikKlik(u8),
}

/// A lexed compact token, not yet resolved against a position.
///
/// `matches` decides whether a legal executable move fits the token; the
/// caller resolves ambiguity (several matches) by appending a `:tag`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenPattern {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Kind>,
    suffix: TokenSuffix,
    tag: Option<MoveKind>,
}

impl TokenPattern {
    /// Lex a compact move token.
    pub fn lex(token: &str) -> Result<TokenPattern, TokenError> {
        let (body, tag) = match token.split_once(':') {
            Some((body, tag)) => {
                let kind = MoveKind::from_tag(tag).ok_or_else(|| TokenError::UnknownTag {
                    tag: tag.to_string(),
                })?;
                (body, Some(kind))
            }
            None => (token, None),
        };

        if body.len() < 4 {
            return Err(TokenError::TooShort { len: body.len() });
        }
        if !body.is_ascii() {
            return Err(TokenError::InvalidSquare {
                notation: token.to_string(),
            });
        }
        let from: Square = body[0..2].parse().map_err(|_| TokenError::InvalidSquare {
            notation: token.to_string(),
        })?;
        let to: Square = body[2..4].parse().map_err(|_| TokenError::InvalidSquare {
            notation: token.to_string(),
        })?;

        let mut rest = body[4..].chars().peekable();
        let promotion = match rest.peek() {
            Some('q') => Some(Kind::Queen),
            Some('r') => Some(Kind::Rook),
            Some('b') => Some(Kind::Bishop),
            Some('n') => Some(Kind::Knight),
            _ => None,
        };
        if promotion.is_some() {
            rest.next();
        }

        let suffix = match rest.next() {
            None => TokenSuffix::None,
            Some('k') => TokenSuffix::Klik,
            Some(c @ ('u' | 'U')) => {
                let index = match rest.next() {
                    Some(d @ '0'..='1') => d as u8 - b'0',
                    _ => {
                        return Err(TokenError::InvalidSuffix {
                            suffix: body[4..].to_string(),
                        })
                    }
                };
                if c == 'u' {
                    TokenSuffix::Unklik(index)
                } else {
                    TokenSuffix::UnklikKlik(index)
                }
            }
            Some(_) => {
                return Err(TokenError::InvalidSuffix {
                    suffix: body[4..].to_string(),
                })
            }
        };
        if rest.next().is_some() {
            return Err(TokenError::InvalidSuffix {
                suffix: body[4..].to_string(),
            });
        }

        Ok(TokenPattern {
            from,
            to,
            promotion,
            suffix,
            tag,
        })
    }

    /// Whether an executable legal move fits this token.
    /// Promotion is carried into the final move, not matched against.
    #[must_use]
    pub fn matches(&self, mv: &Move) -> bool {
        if mv.from != self.from || mv.to != self.to {
            return false;
        }
        if let Some(tag) = self.tag {
            if mv.kind != tag {
                return false;
            }
        }
        match self.suffix {
            TokenSuffix::None => {
                if mv.kind.uses_unklik_index() || mv.kind == MoveKind::Klik {
                    return false;
                }
                // Bare tokens cover Normal, EnPassant, and castling,
                // disambiguated by state or an explicit tag.
                self.tag.is_some()
                    || matches!(mv.kind, MoveKind::Normal | MoveKind::EnPassant)
                    || mv.kind.is_castle()
            }
            TokenSuffix::Klik => mv.kind == MoveKind::Klik,
            TokenSuffix::Unklik(i) => {
                matches!(mv.kind, MoveKind::Unklik | MoveKind::EnPassantUnklik)
                    && mv.unklik_index == Some(i)
            }
            TokenSuffix::UnklikKlik(i) => {
                mv.kind == MoveKind::UnklikKlik && mv.unklik_index == Some(i)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_kind_castle_wings() {
        assert_eq!(MoveKind::CastleK.castle_wing(), Some(Wing::King));
        assert_eq!(MoveKind::CastleQBoth.castle_wing(), Some(Wing::Queen));
        assert_eq!(MoveKind::Normal.castle_wing(), None);
        assert!(MoveKind::CastleKUnklikKlik.is_castle());
        assert!(!MoveKind::EnPassant.is_castle());
    }

    #[test]
    fn test_kind_choice_resolutions() {
        assert_eq!(
            MoveKind::CastleKChoice.choice_resolutions(),
            Some([MoveKind::CastleK, MoveKind::CastleKBoth])
        );
        assert_eq!(
            MoveKind::EnPassantChoice.choice_resolutions(),
            Some([MoveKind::Normal, MoveKind::EnPassant])
        );
        assert_eq!(MoveKind::Normal.choice_resolutions(), None);
    }

    #[test]
    fn test_kind_tag_round_trip() {
        for kind in [
            MoveKind::Normal,
            MoveKind::Klik,
            MoveKind::UnklikKlik,
            MoveKind::EnPassantUnklik,
            MoveKind::CastleQUnklikKlik,
            MoveKind::CastleKChoice,
            MoveKind::CastleKBoth,
        ] {
            assert_eq!(MoveKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(MoveKind::from_tag("castle-x"), None);
    }

    #[test]
    fn test_move_to_token_plain() {
        let mv = Move::new(sq("e2"), sq("e4"), MoveKind::Normal);
        assert_eq!(mv.to_token(), "e2e4");
    }

    #[test]
    fn test_move_to_token_klik_and_unklik() {
        assert_eq!(
            Move::new(sq("c4"), sq("d2"), MoveKind::Klik).to_token(),
            "c4d2k"
        );
        assert_eq!(
            Move::with_unklik(sq("e4"), sq("d6"), MoveKind::Unklik, 0).to_token(),
            "e4d6u0"
        );
        assert_eq!(
            Move::with_unklik(sq("e4"), sq("c3"), MoveKind::UnklikKlik, 1).to_token(),
            "e4c3U1"
        );
    }

    #[test]
    fn test_move_to_token_promotion_before_suffix() {
        let mv = Move::with_unklik(sq("e7"), sq("e8"), MoveKind::Unklik, 1).promoting(Kind::Queen);
        assert_eq!(mv.to_token(), "e7e8qu1");
    }

    #[test]
    fn test_move_to_token_tagged() {
        let mv = Move::new(sq("e1"), sq("g1"), MoveKind::CastleKChoice);
        assert_eq!(mv.to_token(), "e1g1:castle-k-choice");
        let ep = Move::new(sq("b5"), sq("b6"), MoveKind::EnPassant);
        assert_eq!(ep.to_token(), "b5b6:en-passant");
        let plain = Move::new(sq("e1"), sq("g1"), MoveKind::CastleK);
        assert_eq!(plain.to_token(), "e1g1");
    }

    #[test]
    fn test_lex_rejects_garbage() {
        assert!(matches!(
            TokenPattern::lex("e2"),
            Err(TokenError::TooShort { .. })
        ));
        assert!(matches!(
            TokenPattern::lex("z9e4"),
            Err(TokenError::InvalidSquare { .. })
        ));
        assert!(matches!(
            TokenPattern::lex("e2e4x"),
            Err(TokenError::InvalidSuffix { .. })
        ));
        assert!(matches!(
            TokenPattern::lex("e2e4u7"),
            Err(TokenError::InvalidSuffix { .. })
        ));
        assert!(matches!(
            TokenPattern::lex("e1g1:castle-x"),
            Err(TokenError::UnknownTag { .. })
        ));
    }

    #[test]
    fn test_lex_and_match_bare() {
        let pattern = TokenPattern::lex("e2e4").unwrap();
        assert!(pattern.matches(&Move::new(sq("e2"), sq("e4"), MoveKind::Normal)));
        assert!(pattern.matches(&Move::new(sq("e2"), sq("e4"), MoveKind::EnPassant)));
        assert!(!pattern.matches(&Move::new(sq("e2"), sq("e4"), MoveKind::Klik)));
        assert!(!pattern.matches(&Move::new(sq("e2"), sq("e3"), MoveKind::Normal)));
    }

    #[test]
    fn test_lex_and_match_suffixes() {
        let klik = TokenPattern::lex("c4d2k").unwrap();
        assert!(klik.matches(&Move::new(sq("c4"), sq("d2"), MoveKind::Klik)));
        assert!(!klik.matches(&Move::new(sq("c4"), sq("d2"), MoveKind::Normal)));

        let unklik = TokenPattern::lex("e4d6u1").unwrap();
        assert!(unklik.matches(&Move::with_unklik(sq("e4"), sq("d6"), MoveKind::Unklik, 1)));
        assert!(unklik.matches(&Move::with_unklik(
            sq("e4"),
            sq("d6"),
            MoveKind::EnPassantUnklik,
            1
        )));
        assert!(!unklik.matches(&Move::with_unklik(sq("e4"), sq("d6"), MoveKind::Unklik, 0)));
    }

    #[test]
    fn test_lex_and_match_tagged() {
        let tagged = TokenPattern::lex("b5b6:en-passant").unwrap();
        assert!(tagged.matches(&Move::new(sq("b5"), sq("b6"), MoveKind::EnPassant)));
        assert!(!tagged.matches(&Move::new(sq("b5"), sq("b6"), MoveKind::Normal)));

        let both = TokenPattern::lex("e1g1:castle-k-both").unwrap();
        assert!(both.matches(&Move::new(sq("e1"), sq("g1"), MoveKind::CastleKBoth)));
        assert!(!both.matches(&Move::new(sq("e1"), sq("g1"), MoveKind::CastleK)));
    }

    #[test]
    fn test_lex_promotion() {
        let pattern = TokenPattern::lex("e7e8q").unwrap();
        assert_eq!(pattern.promotion, Some(Kind::Queen));
        assert!(pattern.matches(&Move::new(sq("e7"), sq("e8"), MoveKind::Normal)));

        let unklik = TokenPattern::lex("e7e8nu1").unwrap();
        assert_eq!(unklik.promotion, Some(Kind::Knight));
        assert!(unklik.matches(&Move::with_unklik(sq("e7"), sq("e8"), MoveKind::Unklik, 1)));
    }
}
