//! The FEN-like position string.
//!
//! Standard FEN extended two ways:
//! - a stacked square is written as a parenthesized group `(XY)` where `X`
//!   is the bottom piece and `Y` the top, counting as one file;
//! - two optional trailing fields make round-trips exact: field 7 is the
//!   moved-pawn set as a comma-separated identity list (`w0,w3,b5`, `-`
//!   when empty), field 8 assigns identities to pawns in board scan order
//!   (`w<digits>b<digits>`, `-` when no pawns survive).
//!
//! Six-field strings are accepted: identities then default to the pawn's
//! file where unclaimed (lowest unclaimed otherwise) and every pawn away
//! from its home square is considered moved. `to_fen` omits the extension
//! fields whenever they carry exactly those defaults, so ordinary positions
//! print as ordinary FEN.

use std::str::FromStr;

use super::error::FenError;
use super::state::Position;
use super::types::{Color, Kind, PawnId, Piece, Square, SquareStack, Wing};

/// The standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parse a position from its FEN-like string form.
    ///
    /// Enforces the structural invariants: exactly one king per color, no
    /// king inside a stack, no mixed-color stack.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let mut position = Position::empty();
        parse_board(&mut position, parts[0])?;

        position.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        for c in parts[2].chars() {
            match c {
                'K' => position.castling.grant(Color::White, Wing::King),
                'Q' => position.castling.grant(Color::White, Wing::Queen),
                'k' => position.castling.grant(Color::Black, Wing::King),
                'q' => position.castling.grant(Color::Black, Wing::Queen),
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }

        position.en_passant = if parts[3] == "-" {
            None
        } else {
            Some(
                Square::from_str(parts[3]).map_err(|_| FenError::InvalidEnPassant {
                    found: parts[3].to_string(),
                })?,
            )
        };

        if let Some(half) = parts.get(4) {
            position.halfmove_clock = half.parse().unwrap_or(0);
        }
        if let Some(full) = parts.get(5) {
            position.fullmove = full.parse().unwrap_or(1);
        }

        let ids = match parts.get(7) {
            Some(field) => Some(parse_pawn_ids(field, &position)?),
            None => None,
        };
        assign_pawn_ids(&mut position, ids);

        match parts.get(6) {
            Some(field) => parse_moved_pawns(field, &mut position)?,
            None => apply_default_moved_set(&mut position),
        }

        for color in Color::BOTH {
            let found = position
                .pieces(color)
                .filter(|(_, piece)| piece.is_king())
                .count();
            if found != 1 {
                return Err(FenError::BadKingCount {
                    color_name: match color {
                        Color::White => "White",
                        Color::Black => "Black",
                    },
                    found,
                });
            }
        }
        position.refresh_king_cache();

        Ok(position)
    }

    /// Render the position in its FEN-like string form.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let stack = self.stack_at(Square::new(rank, file));
                if stack.is_empty() {
                    empty += 1;
                    continue;
                }
                if empty > 0 {
                    row.push_str(&empty.to_string());
                    empty = 0;
                }
                if stack.is_stacked() {
                    row.push('(');
                    for piece in stack.iter() {
                        row.push(piece.to_fen_char());
                    }
                    row.push(')');
                } else {
                    row.push(stack.top().expect("non-empty square").to_fen_char());
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let mut castling = String::new();
        if self.castling.has(Color::White, Wing::King) {
            castling.push('K');
        }
        if self.castling.has(Color::White, Wing::Queen) {
            castling.push('Q');
        }
        if self.castling.has(Color::Black, Wing::King) {
            castling.push('k');
        }
        if self.castling.has(Color::Black, Wing::Queen) {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        let mut fen = format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            match self.side_to_move {
                Color::White => 'w',
                Color::Black => 'b',
            },
            castling,
            ep,
            self.halfmove_clock,
            self.fullmove,
        );

        if !self.extension_is_default() {
            fen.push(' ');
            fen.push_str(&moved_pawns_field(self));
            fen.push(' ');
            fen.push_str(&pawn_ids_field(self));
        }

        fen
    }

    /// Whether the identity assignment and moved set match what a six-field
    /// string would reconstruct.
    fn extension_is_default(&self) -> bool {
        let mut derived = self.scratch();
        assign_pawn_ids(&mut derived, None);
        derived.moved_pawns = super::state::MovedPawns::new();
        apply_default_moved_set(&mut derived);
        derived.squares == self.squares && derived.moved_pawns == self.moved_pawns
    }
}

/// Pawns of a color in board scan order (rank 8 first, files a-h, bottom of
/// a stack before its top), as (square, stack index) pairs.
fn pawn_slots(position: &Position, color: Color) -> Vec<(Square, usize)> {
    let mut slots = Vec::new();
    for rank in (0..8).rev() {
        for file in 0..8 {
            let sq = Square::new(rank, file);
            for (index, piece) in position.stack_at(sq).iter().enumerate() {
                if piece.color == color && piece.is_pawn() {
                    slots.push((sq, index));
                }
            }
        }
    }
    slots
}

fn replace_pawn_id(position: &mut Position, sq: Square, index: usize, id: PawnId) {
    let stack = position.stack_at(sq);
    let piece = stack.get(index).expect("pawn slot exists");
    let replacement = Piece::new(piece.color, Kind::Pawn(id));
    let rebuilt = match (index, stack.bottom(), stack.top()) {
        (0, _, Some(top)) if stack.is_stacked() => SquareStack::pair(replacement, top),
        (0, _, _) => SquareStack::single(replacement),
        (_, Some(bottom), _) => SquareStack::pair(bottom, replacement),
        _ => SquareStack::single(replacement),
    };
    position.set_stack(sq, rebuilt);
}

/// Rewrite every pawn's identity: from the explicit per-color lists when
/// given, otherwise by the documented default (file where unclaimed, lowest
/// unclaimed otherwise).
fn assign_pawn_ids(position: &mut Position, ids: Option<[Vec<PawnId>; 2]>) {
    for color in Color::BOTH {
        let slots = pawn_slots(position, color);
        match &ids {
            Some(lists) => {
                for (&(sq, index), &id) in slots.iter().zip(&lists[color.index()]) {
                    replace_pawn_id(position, sq, index, id);
                }
            }
            None => {
                let mut claimed = 0u8;
                for (sq, index) in slots {
                    let file_id = PawnId::new(sq.file() as u8).expect("file is 0-7");
                    let id = if claimed & file_id.bit() == 0 {
                        file_id
                    } else {
                        PawnId::ALL
                            .into_iter()
                            .find(|candidate| claimed & candidate.bit() == 0)
                            .unwrap_or(file_id)
                    };
                    claimed |= id.bit();
                    replace_pawn_id(position, sq, index, id);
                }
            }
        }
    }
}

/// Default moved set: every pawn not standing on its home square (starting
/// rank, file equal to its identity) has necessarily moved.
fn apply_default_moved_set(position: &mut Position) {
    for color in Color::BOTH {
        for (sq, index) in pawn_slots(position, color) {
            let piece = position.stack_at(sq).get(index).expect("pawn slot exists");
            let id = piece.kind.pawn_id().expect("slot holds a pawn");
            if sq.rank() != color.pawn_start_rank() || sq.file() != id.get() as usize {
                position.moved_pawns.insert(color, id);
            }
        }
    }
}

fn parse_board(position: &mut Position, board: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = board.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidRank { rank: ranks.len() });
    }

    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx;
        let mut file = 0usize;
        let mut chars = rank_str.chars().peekable();

        while let Some(c) = chars.next() {
            if file >= 8 {
                return Err(FenError::TooManyFiles {
                    rank: rank_idx,
                    files: file + 1,
                });
            }
            if let Some(run) = c.to_digit(10) {
                file += run as usize;
            } else if c == '(' {
                let mut pieces = Vec::new();
                loop {
                    match chars.next() {
                        Some(')') => break,
                        Some(inner) => pieces.push(parse_piece_char(inner)?),
                        None => return Err(FenError::UnclosedStack { rank: rank_idx }),
                    }
                }
                let &[bottom, top] = pieces.as_slice() else {
                    return Err(FenError::InvalidStack {
                        rank: rank_idx,
                        file,
                    });
                };
                if bottom.color != top.color || bottom.is_king() || top.is_king() {
                    return Err(FenError::InvalidStack {
                        rank: rank_idx,
                        file,
                    });
                }
                position.set_stack(Square::new(rank, file), SquareStack::pair(bottom, top));
                file += 1;
            } else {
                let piece = parse_piece_char(c)?;
                position.put_piece(Square::new(rank, file), piece);
                file += 1;
            }
        }
    }
    Ok(())
}

/// Pawns parse with a placeholder identity; `assign_pawn_ids` rewrites every
/// tag afterwards.
fn parse_piece_char(c: char) -> Result<Piece, FenError> {
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let kind = match c.to_ascii_lowercase() {
        'p' => Kind::Pawn(PawnId::new(0).expect("0 is a valid id")),
        other => Kind::non_pawn_from_char(other).ok_or(FenError::InvalidPiece { char: c })?,
    };
    Ok(Piece::new(color, kind))
}

fn parse_moved_pawns(field: &str, position: &mut Position) -> Result<(), FenError> {
    if field == "-" {
        return Ok(());
    }
    for token in field.split(',') {
        let mut chars = token.chars();
        let color = match chars.next() {
            Some('w') => Color::White,
            Some('b') => Color::Black,
            _ => {
                return Err(FenError::InvalidMovedPawns {
                    found: field.to_string(),
                })
            }
        };
        let id = chars
            .next()
            .and_then(|d| d.to_digit(10))
            .and_then(|d| PawnId::new(d as u8))
            .ok_or_else(|| FenError::InvalidMovedPawns {
                found: field.to_string(),
            })?;
        if chars.next().is_some() {
            return Err(FenError::InvalidMovedPawns {
                found: field.to_string(),
            });
        }
        position.moved_pawns.insert(color, id);
    }
    Ok(())
}

fn parse_pawn_ids(field: &str, position: &Position) -> Result<[Vec<PawnId>; 2], FenError> {
    let mut lists: [Vec<PawnId>; 2] = [Vec::new(), Vec::new()];
    if field != "-" {
        let mut current: Option<Color> = None;
        for c in field.chars() {
            match c {
                'w' => current = Some(Color::White),
                'b' => current = Some(Color::Black),
                '0'..='7' => {
                    let color = current.ok_or_else(|| FenError::InvalidPawnIds {
                        found: field.to_string(),
                    })?;
                    let id = PawnId::new(c as u8 - b'0').expect("digit is 0-7");
                    if lists[color.index()].contains(&id) {
                        return Err(FenError::InvalidPawnIds {
                            found: field.to_string(),
                        });
                    }
                    lists[color.index()].push(id);
                }
                _ => {
                    return Err(FenError::InvalidPawnIds {
                        found: field.to_string(),
                    })
                }
            }
        }
    }
    for color in Color::BOTH {
        if lists[color.index()].len() != pawn_slots(position, color).len() {
            return Err(FenError::InvalidPawnIds {
                found: field.to_string(),
            });
        }
    }
    Ok(lists)
}

fn moved_pawns_field(position: &Position) -> String {
    let mut tokens = Vec::new();
    for color in Color::BOTH {
        let prefix = match color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        for id in position.moved_pawns().ids(color) {
            tokens.push(format!("{prefix}{id}"));
        }
    }
    if tokens.is_empty() {
        "-".to_string()
    } else {
        tokens.join(",")
    }
}

fn pawn_ids_field(position: &Position) -> String {
    let mut field = String::new();
    let mut any = false;
    for color in Color::BOTH {
        let slots = pawn_slots(position, color);
        field.push(match color {
            Color::White => 'w',
            Color::Black => 'b',
        });
        for (sq, index) in slots {
            let piece = position.stack_at(sq).get(index).expect("pawn slot exists");
            let id = piece.kind.pawn_id().expect("slot holds a pawn");
            field.push((b'0' + id.get()) as char);
            any = true;
        }
    }
    if any {
        field
    } else {
        "-".to_string()
    }
}
