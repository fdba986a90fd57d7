//! Audit and display notation.
//!
//! One short human-readable token per committed move: piece glyph(s), the
//! from-square, `-` or `x`, the to-square, then `=<glyph>` for promotion,
//! a parenthetical qualifier for the klik family, and ` e.p.` for en
//! passant. Castling prints `O-O`/`O-O-O` with parenthetical qualifiers for
//! the stacked variants. The grammar is for audit and display only; no two
//! move kinds ever print identically, but consumers must not parse it back.
//!
//! The compact machine grammar lives in `types::moves`;
//! [`Position::resolve_token`] maps a compact token onto the legal set.

use super::apply::expand_choice;
use super::error::TokenError;
use super::state::Position;
use super::types::{Move, MoveKind, Wing};

impl Position {
    /// Render the notation for a move about to be committed.
    ///
    /// Must be called on the pre-move position; the executor does so inside
    /// `commit_move`.
    #[must_use]
    pub fn notation_for(&self, mv: &Move) -> String {
        if let Some(wing) = mv.kind.castle_wing() {
            let mut s = match wing {
                Wing::King => "O-O",
                Wing::Queen => "O-O-O",
            }
            .to_string();
            match mv.kind {
                MoveKind::CastleKKlik | MoveKind::CastleQKlik => s.push_str(" (rook klik)"),
                MoveKind::CastleKUnklikKlik | MoveKind::CastleQUnklikKlik => {
                    s.push_str(" (rook unklik-klik)");
                }
                MoveKind::CastleKBoth | MoveKind::CastleQBoth => s.push_str(" (both)"),
                MoveKind::CastleKChoice | MoveKind::CastleQChoice => s.push_str(" (choice)"),
                _ => {}
            }
            return s;
        }

        let stack = self.stack_at(mv.from);
        let mut s = String::new();
        match mv.kind {
            MoveKind::Unklik | MoveKind::UnklikKlik | MoveKind::EnPassantUnklik => {
                if let Some(piece) = stack.get(mv.unklik_index.unwrap_or(0) as usize) {
                    s.push(piece.to_fen_char());
                }
            }
            _ => {
                for piece in stack.iter() {
                    s.push(piece.to_fen_char());
                }
            }
        }

        let capture = self.stack_at(mv.to).color() == Some(self.side_to_move().opponent())
            || mv.kind.is_en_passant();
        s.push_str(&mv.from.to_string());
        s.push(if capture { 'x' } else { '-' });
        s.push_str(&mv.to.to_string());

        if let Some(promo) = mv.promotion {
            s.push('=');
            s.push(promo.to_char().to_ascii_uppercase());
        }

        match mv.kind {
            MoveKind::Klik => s.push_str(" (klik)"),
            MoveKind::Unklik | MoveKind::EnPassantUnklik => s.push_str(" (unklik)"),
            MoveKind::UnklikKlik => s.push_str(" (unklik-klik)"),
            _ => {}
        }
        if mv.kind.is_en_passant() {
            s.push_str(" e.p.");
        }

        s
    }

    /// Resolve a compact move token against the current legal set.
    ///
    /// Bare tokens that fit several legal moves (a surfaced choice, or an
    /// unklik that doubles as en passant) fail with `Ambiguous`; the caller
    /// retries with a `:tag` suffix.
    pub fn resolve_token(&self, token: &str) -> Result<Move, TokenError> {
        let pattern = super::types::TokenPattern::lex(token)?;

        let mut matches: Vec<Move> = Vec::new();
        for candidate in self.legal_moves() {
            for resolution in expand_choice(&candidate) {
                if self.is_legal(&resolution)
                    && pattern.matches(&resolution)
                    && !matches.contains(&resolution)
                {
                    matches.push(resolution);
                }
            }
        }

        match matches.as_slice() {
            [] => Err(TokenError::NoMatch {
                token: token.to_string(),
            }),
            [only] => {
                let mut resolved = *only;
                resolved.promotion = pattern.promotion;
                Ok(resolved)
            }
            _ => Err(TokenError::Ambiguous {
                token: token.to_string(),
            }),
        }
    }
}
