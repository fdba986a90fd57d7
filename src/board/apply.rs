//! Legality filter and move executor.
//!
//! Candidates are validated against the generated set, then applied to a
//! scratch board to drop anything leaving the mover's own king attacked.
//! [`Position::commit_move`] is the single mutating entry point: it
//! validates, emits notation, applies the mechanics, and runs the
//! bookkeeping that flips the side to move, rewrites the en-passant target,
//! maintains castling rights, and grows the moved-pawn set.

use super::error::MoveError;
use super::state::Position;
use super::types::{Color, Kind, Move, MoveKind, Piece, Square, SquareStack};

impl Position {
    /// Whether applying an executable move would leave the mover's king
    /// safe. Choice kinds are not executable and always report illegal.
    #[must_use]
    pub fn is_legal(&self, mv: &Move) -> bool {
        if mv.kind.is_choice() {
            return false;
        }
        let mover = self.side_to_move();
        let mut scratch = self.scratch();
        scratch.make(mv);
        !scratch.is_in_check(mover)
    }

    /// Every legal candidate for the side to move. Choice candidates are
    /// retained (for the caller to surface) when at least one of their
    /// resolutions is legal.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.pseudo_moves()
            .into_iter()
            .filter(|mv| {
                expand_choice(mv)
                    .iter()
                    .any(|resolution| self.is_legal(resolution))
            })
            .collect()
    }

    /// Cheaper termination probe: true as soon as one legal move exists.
    /// Unklik and unklik-klik moves count, so a bare whole-square sweep can
    /// never declare a false stalemate.
    #[must_use]
    pub fn has_legal_move(&self) -> bool {
        for sq in Square::all() {
            let stack = self.stack_at(sq);
            if stack.color() != Some(self.side_to_move()) {
                continue;
            }
            let mut candidates = self.candidates_from(sq);
            if stack.is_stacked() {
                candidates.extend(self.unklik_candidates(sq, 0));
                candidates.extend(self.unklik_candidates(sq, 1));
            }
            for mv in candidates {
                if expand_choice(&mv)
                    .iter()
                    .any(|resolution| self.is_legal(resolution))
                {
                    return true;
                }
            }
        }
        false
    }

    /// Validate a submission against the legal set.
    ///
    /// Returns the matched executable move with the submitted promotion
    /// carried over. Choice candidates match through their resolutions; the
    /// choice kind itself is not executable.
    pub fn validate(&self, mv: &Move) -> Result<Move, MoveError> {
        let stack = self.stack_at(mv.from);
        if stack.is_empty() {
            return Err(MoveError::NoPieceOnSource { square: mv.from });
        }
        if stack.color() != Some(self.side_to_move()) {
            return Err(MoveError::NotYourPiece { square: mv.from });
        }
        if mv.kind.uses_unklik_index() {
            let index = mv.unklik_index.ok_or(MoveError::BadUnclickIndex { index: 2 })?;
            if index > 1 || !stack.is_stacked() {
                return Err(MoveError::BadUnclickIndex { index });
            }
        }
        if mv.kind.is_choice() {
            return Err(MoveError::IllegalMove);
        }

        let mut candidates = self.candidates_from(mv.from);
        if stack.is_stacked() {
            candidates.extend(self.unklik_candidates(mv.from, 0));
            candidates.extend(self.unklik_candidates(mv.from, 1));
        }

        let matched = candidates
            .iter()
            .flat_map(|candidate| expand_choice(candidate))
            .find(|resolution| {
                resolution.to == mv.to
                    && resolution.kind == mv.kind
                    && resolution.unklik_index == mv.unklik_index
            })
            .ok_or(MoveError::IllegalMove)?;

        if !self.is_legal(&matched) {
            return Err(MoveError::IllegalMove);
        }

        if let Some(promo) = mv.promotion {
            if !promo.is_promotion_choice() || !self.triggers_promotion(&matched) {
                return Err(MoveError::IllegalMove);
            }
        }

        let mut result = matched;
        result.promotion = mv.promotion;
        Ok(result)
    }

    /// Whether the (validated) move lands a mover pawn on its promotion
    /// rank. Klik and unklik-klik moves never do: pawns cannot stack on the
    /// promotion rank.
    #[must_use]
    pub fn triggers_promotion(&self, mv: &Move) -> bool {
        let mover = self.side_to_move();
        if mv.to.rank() != mover.pawn_promotion_rank() {
            return false;
        }
        match mv.kind {
            MoveKind::Normal => self.stack_at(mv.from).iter().any(Piece::is_pawn),
            MoveKind::Unklik => mv
                .unklik_index
                .and_then(|index| self.stack_at(mv.from).get(index as usize))
                .is_some_and(Piece::is_pawn),
            _ => false,
        }
    }

    /// Validate, notate, apply, and log a move. Returns the notation.
    ///
    /// This is the only mutating entry point; a session calls nothing else.
    pub fn commit_move(&mut self, mv: &Move) -> Result<String, MoveError> {
        let normalized = self.validate(mv)?;
        let mover = self.side_to_move();
        let notation = self.notation_for(&normalized);
        self.make(&normalized);
        self.record(mover, notation.clone());
        Ok(notation)
    }

    /// Mechanically apply an executable move and run the bookkeeping.
    /// Total: legality was established by the caller.
    pub(crate) fn make(&mut self, mv: &Move) {
        debug_assert!(!mv.kind.is_choice(), "choice kinds are not executable");

        let mover = self.side_to_move();
        let from_idx = mv.from.as_index();
        let to_idx = mv.to.as_index();
        let dest_before = self.squares[to_idx];
        let mut captured = dest_before.color() == Some(mover.opponent());
        let mut unit = SquareStack::empty();

        match mv.kind {
            MoveKind::Normal | MoveKind::EnPassant => {
                unit = self.squares[from_idx];
                self.squares[from_idx] = SquareStack::empty();
                self.squares[to_idx] = unit;
                if mv.kind == MoveKind::EnPassant {
                    captured |= self.remove_passed_pawn(mv.to, mover);
                }
            }
            MoveKind::Klik => {
                unit = self.squares[from_idx];
                let piece = unit.bottom().expect("klik moves a singleton");
                self.squares[from_idx] = SquareStack::empty();
                self.squares[to_idx].push(piece);
            }
            MoveKind::Unklik | MoveKind::EnPassantUnklik => {
                let index = mv.unklik_index.unwrap_or(0) as usize;
                if let Some(piece) = self.squares[from_idx].remove(index) {
                    unit = SquareStack::single(piece);
                    self.squares[to_idx] = unit;
                }
                if mv.kind == MoveKind::EnPassantUnklik {
                    captured |= self.remove_passed_pawn(mv.to, mover);
                }
            }
            MoveKind::UnklikKlik => {
                let index = mv.unklik_index.unwrap_or(0) as usize;
                if let Some(piece) = self.squares[from_idx].remove(index) {
                    unit = SquareStack::single(piece);
                    self.squares[to_idx].push(piece);
                }
            }
            _ => {
                unit = self.make_castle(mv, mover);
            }
        }

        for piece in unit.iter() {
            if piece.is_king() {
                self.king_sq[mover.index()] = Some(mv.to);
            }
        }

        // Promotion: the chosen piece replaces every mover pawn that landed
        // on the promotion rank; a carried non-pawn companion stays.
        if let Some(promo) = mv.promotion {
            if promo.is_promotion_choice() && mv.to.rank() == mover.pawn_promotion_rank() {
                self.promote_pawns_on(mv.to, mover, promo);
            }
        }

        self.update_castling_rights(mv, mover, unit, dest_before, captured);

        let unit_has_pawn = unit.iter().any(Piece::is_pawn);
        for piece in unit.iter() {
            if let Some(id) = piece.kind.pawn_id() {
                self.moved_pawns.insert(mover, id);
            }
        }

        self.en_passant = None;
        if Position::is_double_push(mv, unit_has_pawn, dest_before.is_empty()) {
            let between = Square::new(
                (mv.from.rank() + mv.to.rank()) / 2,
                mv.from.file(),
            );
            self.en_passant = Some(between);
        }

        if unit_has_pawn || captured {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        self.side_to_move = mover.opponent();
        if self.side_to_move == Color::White {
            self.fullmove += 1;
        }
    }

    /// Castle mechanics: the king walks to G/C, the rook (alone, klikked,
    /// or with its whole stack) lands on F/D per the variant. Returns the
    /// pieces that moved.
    fn make_castle(&mut self, mv: &Move, mover: Color) -> SquareStack {
        let wing = mv.kind.castle_wing().expect("castle kind");
        let corner = wing.corner(mover);
        let rook_dest = wing.rook_destination(mover);

        let king = self.squares[mv.from.as_index()]
            .remove(0)
            .expect("king on castle source");

        match mv.kind {
            MoveKind::CastleKBoth | MoveKind::CastleQBoth => {
                let corner_stack = self.squares[corner.as_index()];
                self.squares[corner.as_index()] = SquareStack::empty();
                self.squares[rook_dest.as_index()] = corner_stack;
            }
            kind => {
                let rook_index = self.squares[corner.as_index()]
                    .iter()
                    .position(|p| p.color == mover && p.kind == Kind::Rook)
                    .expect("rook on corner");
                let rook = self.squares[corner.as_index()]
                    .remove(rook_index)
                    .expect("rook extracted");
                if matches!(
                    kind,
                    MoveKind::CastleKKlik
                        | MoveKind::CastleQKlik
                        | MoveKind::CastleKUnklikKlik
                        | MoveKind::CastleQUnklikKlik
                ) {
                    self.squares[rook_dest.as_index()].push(rook);
                } else {
                    self.squares[rook_dest.as_index()] = SquareStack::single(rook);
                }
            }
        }

        self.squares[mv.to.as_index()] = SquareStack::single(king);
        SquareStack::single(king)
    }

    /// Remove the passed pawn behind the destination (from the mover's
    /// point of view). Guarded: only an enemy stack containing a pawn is
    /// taken; captures destroy the whole stack.
    fn remove_passed_pawn(&mut self, dest: Square, mover: Color) -> bool {
        let Some(behind) = dest.offset(-mover.pawn_direction(), 0) else {
            return false;
        };
        let stack = self.stack_at(behind);
        if stack.color() == Some(mover.opponent()) && stack.iter().any(Piece::is_pawn) {
            self.squares[behind.as_index()] = SquareStack::empty();
            return true;
        }
        false
    }

    fn promote_pawns_on(&mut self, sq: Square, mover: Color, promo: Kind) {
        let stack = self.stack_at(sq);
        let mut rebuilt = SquareStack::empty();
        for piece in stack.iter() {
            if piece.color == mover && piece.is_pawn() {
                rebuilt.push(Piece::new(mover, promo));
            } else {
                rebuilt.push(piece);
            }
        }
        self.squares[sq.as_index()] = rebuilt;
    }

    /// Feed the move's right-relevant events to the rights tracker: a king
    /// move (castling included), the rook itself leaving a corner, or a
    /// corner stack being captured. A klik onto the corner or an unklik of
    /// the rook's companion raises no event, so those rights live on.
    fn update_castling_rights(
        &mut self,
        mv: &Move,
        mover: Color,
        unit: SquareStack,
        dest_before: SquareStack,
        captured: bool,
    ) {
        if mv.kind.is_castle() || unit.iter().any(Piece::is_king) {
            self.castling.on_king_move(mover);
        }
        if unit.iter().any(|p| p.kind == Kind::Rook) {
            self.castling.on_rook_departure(mover, mv.from);
        }
        if captured {
            if let Some(owner) = dest_before.color() {
                self.castling.on_corner_capture(owner, mv.to);
            }
        }
    }
}

/// The executable moves a candidate stands for: the candidate itself, or
/// both resolutions of a choice.
#[must_use]
pub fn expand_choice(mv: &Move) -> Vec<Move> {
    match mv.kind.choice_resolutions() {
        Some(kinds) => kinds.into_iter().map(|kind| mv.retagged(kind)).collect(),
        None => vec![*mv],
    }
}
