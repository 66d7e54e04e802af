//! The authoritative game position, wrapped around `shakmaty::Chess`.
//!
//! Coordinates follow the board grid used by the rendering layer: `x` is the
//! rank index (0 = rank 1, White's home rank) and `y` is the file index
//! (0 = the a-file). Conversion to and from `shakmaty::Square` happens only
//! inside this file.

use std::collections::HashMap;

use bevy::prelude::Resource;
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, EnPassantMode, File, Move, Position, Rank, Role, Square};
use thiserror::Error;

use crate::rendering::pieces::{PieceColor, PieceKind};

/// Errors surfaced by the rules bridge.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("could not parse position snapshot: {message}")]
    FenParse { message: String },

    #[error("snapshot does not describe a playable position: {message}")]
    InvalidPosition { message: String },

    #[error("move from {from} to {to} is not legal in this position")]
    IllegalMove { from: String, to: String },
}

pub type RulesResult<T> = Result<T, RulesError>;

/// Everything the rest of the crate needs to know about a move that was just
/// played: where it went, what it captured, and which side effects (castling
/// rook shift, en passant victim, promotion) the entity layer must mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub from: (u8, u8),
    pub to: (u8, u8),
    /// Standard algebraic notation, computed before the move was applied.
    pub san: String,
    pub captured: Option<PieceKind>,
    /// Square the captured piece actually stood on. Differs from `to` only
    /// for en passant.
    pub capture_square: Option<(u8, u8)>,
    pub is_en_passant: bool,
    /// Rook origin and destination when the move castles.
    pub castling_rook: Option<((u8, u8), (u8, u8))>,
    pub promotion: Option<PieceKind>,
    /// Whether the opponent is in check after this move.
    pub gives_check: bool,
}

/// The single source of truth for the game position.
///
/// Wraps `shakmaty::Chess` and keeps a repetition tally that `shakmaty`
/// itself does not track. Every mutation goes through [`RulesBoard::play`],
/// [`RulesBoard::restore`] or [`RulesBoard::reset`] so the tally never drifts
/// from the position.
#[derive(Resource, Debug, Clone)]
pub struct RulesBoard {
    position: Chess,
    /// Position occurrence counts keyed by the piece-placement / side /
    /// castling / en-passant part of the FEN. Clocks are excluded on purpose:
    /// repetition compares positions, not move counters.
    repetitions: HashMap<String, u32>,
}

impl Default for RulesBoard {
    fn default() -> Self {
        let mut board = Self {
            position: Chess::default(),
            repetitions: HashMap::new(),
        };
        board.note_position();
        board
    }
}

impl RulesBoard {
    /// Back to the starting position, repetition tally included.
    pub fn reset(&mut self) {
        self.position = Chess::default();
        self.repetitions.clear();
        self.note_position();
    }

    pub fn turn(&self) -> PieceColor {
        piece_color(self.position.turn())
    }

    pub fn fullmove_number(&self) -> u32 {
        self.position.fullmoves().get()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.position.halfmoves()
    }

    pub fn piece_at(&self, square: (u8, u8)) -> Option<(PieceColor, PieceKind)> {
        let piece = self.position.board().piece_at(to_square(square))?;
        Some((piece_color(piece.color), piece_kind(piece.role)))
    }

    /// Every piece currently on the board, for rebuilding the entity layer.
    pub fn pieces(&self) -> Vec<((u8, u8), PieceColor, PieceKind)> {
        let mut out = Vec::with_capacity(32);
        for x in 0..8u8 {
            for y in 0..8u8 {
                if let Some((color, kind)) = self.piece_at((x, y)) {
                    out.push(((x, y), color, kind));
                }
            }
        }
        out
    }

    pub fn king_square(&self, color: PieceColor) -> Option<(u8, u8)> {
        self.position
            .board()
            .king_of(engine_color(color))
            .map(square_coords)
    }

    /// Destination squares reachable from `from`, deduplicated across
    /// promotion variants. Castling is reported as the king's two-square hop
    /// (g- or c-file), never as a move onto the rook.
    pub fn legal_targets_from(&self, from: (u8, u8)) -> Vec<(u8, u8)> {
        let origin = to_square(from);
        let mut targets: Vec<(u8, u8)> = Vec::new();
        for mv in &self.position.legal_moves() {
            let Some((move_from, move_to)) = clicked_squares(mv) else {
                continue;
            };
            if move_from != origin {
                continue;
            }
            let coords = square_coords(move_to);
            if !targets.contains(&coords) {
                targets.push(coords);
            }
        }
        targets
    }

    /// All legal moves matching a `from` → `to` click pair. Usually a single
    /// move; four when the pair is a promotion push (one per piece choice).
    pub fn candidate_moves(&self, from: (u8, u8), to: (u8, u8)) -> Vec<Move> {
        let origin = to_square(from);
        let target = to_square(to);
        let mut candidates = Vec::new();
        for mv in &self.position.legal_moves() {
            let Some((move_from, move_to)) = clicked_squares(mv) else {
                continue;
            };
            if move_from == origin && move_to == target {
                candidates.push(mv.clone());
            }
        }
        candidates
    }

    /// Whether a `from` → `to` click pair needs a promotion piece choice
    /// before it can be played.
    pub fn needs_promotion_choice(&self, from: (u8, u8), to: (u8, u8)) -> bool {
        self.candidate_moves(from, to)
            .iter()
            .any(|mv| mv.promotion().is_some())
    }

    /// Applies a move previously obtained from [`Self::candidate_moves`] and
    /// reports everything the entity layer must mirror.
    pub fn play(&mut self, mv: &Move) -> RulesResult<PlayedMove> {
        let san = San::from_move(&self.position, mv.clone()).to_string();
        let color = piece_color(self.position.turn());

        let (from, to, captured, capture_square, is_en_passant, castling_rook) = match mv {
            Move::Normal {
                from, to, capture, ..
            } => (
                square_coords(*from),
                square_coords(*to),
                capture.map(piece_kind),
                capture.map(|_| square_coords(*to)),
                false,
                None,
            ),
            Move::EnPassant { from, to } => {
                // The victim pawn sits beside the destination, on the
                // capturing pawn's starting rank.
                let victim = Square::from_coords(to.file(), from.rank());
                (
                    square_coords(*from),
                    square_coords(*to),
                    Some(PieceKind::Pawn),
                    Some(square_coords(victim)),
                    true,
                    None,
                )
            }
            Move::Castle { king, rook } => {
                let (king_to, rook_to) = castle_destinations(*rook);
                (
                    square_coords(*king),
                    square_coords(king_to),
                    None,
                    None,
                    false,
                    Some((square_coords(*rook), square_coords(rook_to))),
                )
            }
            Move::Put { .. } => {
                return Err(RulesError::IllegalMove {
                    from: "hand".to_string(),
                    to: "board".to_string(),
                })
            }
        };

        let kind = piece_kind(mv.role());
        let promotion = mv.promotion().map(piece_kind);

        self.position = self
            .position
            .clone()
            .play(mv.clone())
            .map_err(|_| RulesError::IllegalMove {
                from: algebraic(from),
                to: algebraic(to),
            })?;
        self.note_position();

        Ok(PlayedMove {
            kind,
            color,
            from,
            to,
            san,
            captured,
            capture_square,
            is_en_passant,
            castling_rook,
            promotion,
            gives_check: self.position.is_check(),
        })
    }

    /// Resolves a `from` → `to` pair to one concrete legal move.
    ///
    /// `promote_to` picks among promotion candidates; when `None`, a plain
    /// move is preferred and a forced promotion falls back to a queen. Used
    /// by the engine reply path and by tests; interactive play goes through
    /// [`Self::candidate_moves`] so the promotion dialog can intervene.
    pub fn resolve_move(
        &self,
        from: (u8, u8),
        to: (u8, u8),
        promote_to: Option<PieceKind>,
    ) -> RulesResult<Move> {
        let candidates = self.candidate_moves(from, to);
        let chosen = match promote_to {
            Some(kind) => candidates
                .iter()
                .find(|mv| mv.promotion() == Some(engine_role(kind)))
                .cloned(),
            None => candidates
                .iter()
                .find(|mv| mv.promotion().is_none())
                .or_else(|| {
                    candidates
                        .iter()
                        .find(|mv| mv.promotion() == Some(Role::Queen))
                })
                .cloned(),
        };
        chosen.ok_or_else(|| RulesError::IllegalMove {
            from: algebraic(from),
            to: algebraic(to),
        })
    }

    /// Every legal move in the current position.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves().iter().cloned().collect()
    }

    /// [`Self::resolve_move`] followed by [`Self::play`].
    pub fn play_between(
        &mut self,
        from: (u8, u8),
        to: (u8, u8),
        promote_to: Option<PieceKind>,
    ) -> RulesResult<PlayedMove> {
        let mv = self.resolve_move(from, to, promote_to)?;
        self.play(&mv)
    }

    /// Opaque snapshot of the full position, restorable via
    /// [`Self::restore`]. Suitable for undo stacks and engine queries.
    pub fn snapshot(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    /// Replaces the position with a previously taken snapshot.
    ///
    /// The repetition tally restarts at one for the restored position; a
    /// snapshot cannot carry the history that led to it.
    pub fn restore(&mut self, snapshot: &str) -> RulesResult<()> {
        let fen: Fen = snapshot.parse().map_err(|err| RulesError::FenParse {
            message: format!("{err}"),
        })?;
        self.position = fen
            .into_position(CastlingMode::Standard)
            .map_err(|err| RulesError::InvalidPosition {
                message: format!("{err}"),
            })?;
        self.repetitions.clear();
        self.note_position();
        Ok(())
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    /// Fifty full moves without a capture or pawn move.
    pub fn is_fifty_moves(&self) -> bool {
        self.position.halfmoves() >= 100
    }

    /// Whether the current position has now occurred five times.
    pub fn is_fivefold_repetition(&self) -> bool {
        let key = Self::position_key(&self.snapshot());
        self.repetitions.get(&key).copied().unwrap_or(0) >= 5
    }

    fn note_position(&mut self) {
        let key = Self::position_key(&self.snapshot());
        *self.repetitions.entry(key).or_insert(0) += 1;
    }

    /// Placement, side to move, castling rights and en-passant square:
    /// the fields that define position identity for repetition purposes.
    fn position_key(fen: &str) -> String {
        fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
    }
}

/// `(x, y)` grid coordinates to a `shakmaty` square. Callers guarantee both
/// components are below 8.
pub(crate) fn to_square(square: (u8, u8)) -> Square {
    Square::from_coords(File::new(square.1 as u32), Rank::new(square.0 as u32))
}

pub(crate) fn square_coords(square: Square) -> (u8, u8) {
    (u32::from(square.rank()) as u8, u32::from(square.file()) as u8)
}

/// Human-readable square name, e.g. `e4`.
pub fn algebraic(square: (u8, u8)) -> String {
    format!("{}{}", (b'a' + square.1) as char, square.0 + 1)
}

/// The pair of squares a player clicks to express a move. Castling maps to
/// the king's origin and its g- or c-file destination; drops have no click
/// representation and yield `None`.
fn clicked_squares(mv: &Move) -> Option<(Square, Square)> {
    match mv {
        Move::Normal { from, to, .. } | Move::EnPassant { from, to } => Some((*from, *to)),
        Move::Castle { king, rook } => {
            let (king_to, _) = castle_destinations(*rook);
            Some((*king, king_to))
        }
        Move::Put { .. } => None,
    }
}

/// King and rook destinations implied by the rook's starting file: kingside
/// rooks send the king to g and the rook to f, queenside to c and d.
fn castle_destinations(rook: Square) -> (Square, Square) {
    if rook.file() == File::H {
        (
            Square::from_coords(File::G, rook.rank()),
            Square::from_coords(File::F, rook.rank()),
        )
    } else {
        (
            Square::from_coords(File::C, rook.rank()),
            Square::from_coords(File::D, rook.rank()),
        )
    }
}

fn piece_kind(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn engine_role(kind: PieceKind) -> Role {
    match kind {
        PieceKind::Pawn => Role::Pawn,
        PieceKind::Knight => Role::Knight,
        PieceKind::Bishop => Role::Bishop,
        PieceKind::Rook => Role::Rook,
        PieceKind::Queen => Role::Queen,
        PieceKind::King => Role::King,
    }
}

fn piece_color(color: shakmaty::Color) -> PieceColor {
    match color {
        shakmaty::Color::White => PieceColor::White,
        shakmaty::Color::Black => PieceColor::Black,
    }
}

fn engine_color(color: PieceColor) -> shakmaty::Color {
    match color {
        PieceColor::White => shakmaty::Color::White,
        PieceColor::Black => shakmaty::Color::Black,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_conversion_round_trips() {
        for x in 0..8u8 {
            for y in 0..8u8 {
                assert_eq!(square_coords(to_square((x, y))), (x, y));
            }
        }
    }

    #[test]
    fn algebraic_names_match_convention() {
        assert_eq!(algebraic((0, 0)), "a1");
        assert_eq!(algebraic((0, 4)), "e1");
        assert_eq!(algebraic((7, 7)), "h8");
        assert_eq!(algebraic((3, 4)), "e4");
    }

    #[test]
    fn starting_position_has_expected_shape() {
        let board = RulesBoard::default();
        assert_eq!(board.turn(), PieceColor::White);
        assert_eq!(board.pieces().len(), 32);
        assert_eq!(
            board.piece_at((0, 4)),
            Some((PieceColor::White, PieceKind::King))
        );
        assert_eq!(
            board.piece_at((7, 3)),
            Some((PieceColor::Black, PieceKind::Queen))
        );
        assert_eq!(board.piece_at((4, 4)), None);
    }

    #[test]
    fn knight_has_two_targets_from_the_start() {
        let board = RulesBoard::default();
        let mut targets = board.legal_targets_from((0, 6));
        targets.sort_unstable();
        assert_eq!(targets, vec![(2, 5), (2, 7)]);
    }

    #[test]
    fn playing_a_move_switches_the_turn() {
        let mut board = RulesBoard::default();
        let played = board.play_between((1, 4), (3, 4), None).unwrap();
        assert_eq!(played.san, "e4");
        assert_eq!(played.color, PieceColor::White);
        assert_eq!(played.kind, PieceKind::Pawn);
        assert!(!played.gives_check);
        assert_eq!(board.turn(), PieceColor::Black);
    }

    #[test]
    fn illegal_moves_are_rejected_without_mutating() {
        let mut board = RulesBoard::default();
        let before = board.snapshot();
        let err = board.play_between((0, 4), (4, 4), None).unwrap_err();
        assert!(matches!(err, RulesError::IllegalMove { .. }));
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn scholars_mate_is_checkmate() {
        let mut board = RulesBoard::default();
        board.play_between((1, 4), (3, 4), None).unwrap(); // e4
        board.play_between((6, 4), (4, 4), None).unwrap(); // e5
        board.play_between((0, 5), (3, 2), None).unwrap(); // Bc4
        board.play_between((7, 1), (5, 2), None).unwrap(); // Nc6
        board.play_between((0, 3), (4, 7), None).unwrap(); // Qh5
        board.play_between((7, 6), (5, 5), None).unwrap(); // Nf6
        let played = board.play_between((4, 7), (6, 5), None).unwrap(); // Qxf7#
        assert_eq!(played.captured, Some(PieceKind::Pawn));
        assert!(played.gives_check);
        assert!(board.is_check());
        assert!(board.is_checkmate());
        assert!(!board.is_stalemate());
    }

    #[test]
    fn castling_reports_the_rook_shift() {
        let mut board = RulesBoard::default();
        board.play_between((1, 4), (3, 4), None).unwrap(); // e4
        board.play_between((6, 4), (4, 4), None).unwrap(); // e5
        board.play_between((0, 6), (2, 5), None).unwrap(); // Nf3
        board.play_between((7, 1), (5, 2), None).unwrap(); // Nc6
        board.play_between((0, 5), (3, 2), None).unwrap(); // Bc4
        board.play_between((7, 6), (5, 5), None).unwrap(); // Nf6

        // The king's two-square hop must be offered as a destination.
        assert!(board.legal_targets_from((0, 4)).contains(&(0, 6)));

        let played = board.play_between((0, 4), (0, 6), None).unwrap();
        assert_eq!(played.san, "O-O");
        assert_eq!(played.castling_rook, Some(((0, 7), (0, 5))));
        assert_eq!(
            board.piece_at((0, 6)),
            Some((PieceColor::White, PieceKind::King))
        );
        assert_eq!(
            board.piece_at((0, 5)),
            Some((PieceColor::White, PieceKind::Rook))
        );
        assert_eq!(board.piece_at((0, 7)), None);
    }

    #[test]
    fn en_passant_removes_the_bypassing_pawn() {
        let mut board = RulesBoard::default();
        board.play_between((1, 4), (3, 4), None).unwrap(); // e4
        board.play_between((6, 0), (5, 0), None).unwrap(); // a6
        board.play_between((3, 4), (4, 4), None).unwrap(); // e5
        board.play_between((6, 3), (4, 3), None).unwrap(); // d5

        let played = board.play_between((4, 4), (5, 3), None).unwrap(); // exd6
        assert!(played.is_en_passant);
        assert_eq!(played.captured, Some(PieceKind::Pawn));
        assert_eq!(played.capture_square, Some((4, 3)));
        assert_eq!(board.piece_at((4, 3)), None);
    }

    #[test]
    fn promotion_push_offers_four_candidates() {
        let mut board = RulesBoard::default();
        board
            .restore("8/4P2k/8/8/8/8/8/4K3 w - - 0 1")
            .unwrap();
        assert!(board.needs_promotion_choice((6, 4), (7, 4)));
        assert_eq!(board.candidate_moves((6, 4), (7, 4)).len(), 4);

        let played = board
            .play_between((6, 4), (7, 4), Some(PieceKind::Knight))
            .unwrap();
        assert_eq!(played.promotion, Some(PieceKind::Knight));
        assert_eq!(
            board.piece_at((7, 4)),
            Some((PieceColor::White, PieceKind::Knight))
        );
    }

    #[test]
    fn snapshot_restore_round_trips() {
        let mut board = RulesBoard::default();
        board.play_between((1, 4), (3, 4), None).unwrap();
        board.play_between((6, 2), (4, 2), None).unwrap();
        let saved = board.snapshot();

        board.play_between((0, 6), (2, 5), None).unwrap();
        assert_ne!(board.snapshot(), saved);

        board.restore(&saved).unwrap();
        assert_eq!(board.snapshot(), saved);
        assert_eq!(board.turn(), PieceColor::White);
    }

    #[test]
    fn restore_rejects_garbage() {
        let mut board = RulesBoard::default();
        assert!(matches!(
            board.restore("not a position"),
            Err(RulesError::FenParse { .. })
        ));
    }

    #[test]
    fn fivefold_repetition_trips_after_shuffling() {
        let mut board = RulesBoard::default();
        assert!(!board.is_fivefold_repetition());
        // Four full knight shuffles return to the start position for the
        // fifth time overall.
        for _ in 0..4 {
            board.play_between((0, 6), (2, 5), None).unwrap();
            board.play_between((7, 6), (5, 5), None).unwrap();
            board.play_between((2, 5), (0, 6), None).unwrap();
            board.play_between((5, 5), (7, 6), None).unwrap();
        }
        assert!(board.is_fivefold_repetition());
    }

    #[test]
    fn repetition_tally_restarts_after_restore() {
        let mut board = RulesBoard::default();
        for _ in 0..2 {
            board.play_between((0, 6), (2, 5), None).unwrap();
            board.play_between((7, 6), (5, 5), None).unwrap();
            board.play_between((2, 5), (0, 6), None).unwrap();
            board.play_between((5, 5), (7, 6), None).unwrap();
        }
        let saved = board.snapshot();
        board.restore(&saved).unwrap();
        assert!(!board.is_fivefold_repetition());
    }

    #[test]
    fn fifty_move_rule_reads_the_halfmove_clock() {
        let mut board = RulesBoard::default();
        board
            .restore("4k3/8/8/8/8/8/8/4K2R w - - 99 80")
            .unwrap();
        assert!(!board.is_fifty_moves());
        board.play_between((0, 7), (1, 7), None).unwrap(); // Rh2
        assert!(board.is_fifty_moves());
    }

    #[test]
    fn halfmove_clock_resets_on_pawn_moves() {
        let mut board = RulesBoard::default();
        board.play_between((0, 6), (2, 5), None).unwrap();
        board.play_between((7, 6), (5, 5), None).unwrap();
        assert_eq!(board.halfmove_clock(), 2);
        board.play_between((1, 4), (3, 4), None).unwrap();
        assert_eq!(board.halfmove_clock(), 0);
    }

    #[test]
    fn king_square_tracks_the_king() {
        let mut board = RulesBoard::default();
        assert_eq!(board.king_square(PieceColor::White), Some((0, 4)));
        board.play_between((1, 4), (3, 4), None).unwrap();
        board.play_between((6, 4), (4, 4), None).unwrap();
        board.play_between((0, 4), (1, 4), None).unwrap(); // Ke2
        assert_eq!(board.king_square(PieceColor::White), Some((1, 4)));
        assert_eq!(board.king_square(PieceColor::Black), Some((7, 4)));
    }
}
