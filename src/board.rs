//! The 4x5 board: the owned piece collection and the derived cell grid.
//!
//! The piece collection is the single source of truth. The grid caches, per
//! cell, the name of the occupying piece; after every mutation it is rebuilt
//! from the footprints, so the two can never drift apart.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::moves::{Cell, Move, MoveError};
use crate::pieces::{starting_pieces, Name, Piece};

/// Grid width in cells (x direction).
pub const WIDTH: usize = 4;

/// Grid length in cells (y direction).
pub const LENGTH: usize = 5;

/// The derived cell grid: `None` for empty, else the occupying piece's name.
pub type Grid = [[Option<Name>; WIDTH]; LENGTH];

/// Whether `(x, y)` lies on the grid.
pub fn in_bounds(x: i32, y: i32) -> bool {
    (0..WIDTH as i32).contains(&x) && (0..LENGTH as i32).contains(&y)
}

/// A board configuration: pieces plus the grid derived from them.
///
/// Cloning produces a fully independent copy, which is what lets the
/// explorer branch hypothetical futures off one parent without touching it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Grid,
    pieces: Vec<Piece>,
}

impl Board {
    /// The fixed starting configuration.
    pub fn new() -> Self {
        Self::from_pieces(starting_pieces())
    }

    /// Builds a board from an arbitrary piece collection.
    ///
    /// Used by puzzle sub-variants and tests. Panics if two pieces share a
    /// name or their footprints overlap or leave the grid; an invalid
    /// collection is a caller defect, not a recoverable condition.
    pub fn from_pieces(pieces: Vec<Piece>) -> Self {
        let mut names = FxHashSet::default();
        for piece in &pieces {
            assert!(
                names.insert(piece.name),
                "duplicate piece name {}",
                piece.name
            );
        }
        let mut board = Self {
            cells: [[None; WIDTH]; LENGTH],
            pieces,
        };
        board.rebuild();
        board
    }

    /// The pieces on the board, in insertion order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Looks up a piece by name.
    pub fn piece(&self, name: Name) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.name == name)
    }

    /// The derived cell grid.
    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    /// The occupant of cell `(x, y)`, which must be on the grid.
    pub fn cell(&self, x: i32, y: i32) -> Option<Name> {
        self.cells[y as usize][x as usize]
    }

    /// The set of currently empty cells.
    pub fn empty_cells(&self) -> FxHashSet<Cell> {
        let mut empties = FxHashSet::default();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, occupant) in row.iter().enumerate() {
                if occupant.is_none() {
                    empties.insert((x as i32, y as i32));
                }
            }
        }
        empties
    }

    /// Rederives the grid from the piece footprints.
    ///
    /// A cell claimed twice, or a footprint cell off the grid, can only come
    /// from a defect in move validation and is fatal.
    pub fn rebuild(&mut self) {
        self.cells = [[None; WIDTH]; LENGTH];
        for piece in &self.pieces {
            for (x, y) in piece.footprint() {
                assert!(
                    in_bounds(x, y),
                    "piece {} left the grid at ({x}, {y})",
                    piece.name
                );
                let slot = &mut self.cells[y as usize][x as usize];
                if let Some(existing) = *slot {
                    panic!(
                        "pieces {existing} and {} overlap at ({x}, {y})",
                        piece.name
                    );
                }
                *slot = Some(piece.name);
            }
        }
    }

    /// Every legal move on the board, pieces in insertion order and
    /// directions in the fixed enumeration order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for piece in &self.pieces {
            for offset in piece.legal_moves(self) {
                moves.push(Move::new(piece.name, offset));
            }
        }
        moves
    }

    /// Applies a move, leaving the board unchanged on failure.
    ///
    /// The collision check runs against the live piece set rather than the
    /// cached grid, and the grid is rebuilt only after the piece has moved.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), MoveError> {
        let idx = self
            .pieces
            .iter()
            .position(|p| p.name == mv.piece)
            .ok_or(MoveError::UnknownPiece(mv.piece))?;

        let mut moved = self.pieces[idx];
        let others: Vec<&Piece> = self.pieces.iter().filter(|p| p.name != mv.piece).collect();
        moved.apply_move(mv.offset, &others)?;

        self.pieces[idx] = moved;
        self.rebuild();
        Ok(())
    }

    /// Removes a piece from the board and rebuilds the grid.
    ///
    /// Supported for puzzle sub-variants with fewer pieces; the exploration
    /// loop never deletes.
    pub fn delete_piece(&mut self, name: Name) -> Result<(), MoveError> {
        let idx = self
            .pieces
            .iter()
            .position(|p| p.name == name)
            .ok_or(MoveError::UnknownPiece(name))?;
        self.pieces.remove(idx);
        self.rebuild();
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Renders the grid as 5 rows of 2-character cells, "xx" for empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for (x, occupant) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                match occupant {
                    Some(name) => write!(f, "{name}")?,
                    None => write!(f, "xx")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::DIRECTIONS;
    use crate::pieces::{Color, Piece};

    fn name(color: Color, number: u8) -> Name {
        Name::new(color, number)
    }

    fn mv(color: Color, number: u8, offset: (i32, i32)) -> Move {
        Move::new(name(color, number), offset)
    }

    #[test]
    fn test_initial_render() {
        let board = Board::new();
        insta::assert_snapshot!(board.to_string(), @r"
        xx g1 g1 xx
        p1 g1 g1 p3
        p1 h1 h1 p3
        p2 r1 r3 p4
        p2 r2 r4 p4
        ");
    }

    #[test]
    fn test_render_cell_counts() {
        let rendered = Board::new().to_string();
        assert_eq!(rendered.matches("xx").count(), 2);
        for piece in ["p1", "p2", "p3", "p4", "h1"] {
            assert_eq!(rendered.matches(piece).count(), 2);
        }
        for piece in ["r1", "r2", "r3", "r4"] {
            assert_eq!(rendered.matches(piece).count(), 1);
        }
        assert_eq!(rendered.matches("g1").count(), 4);
    }

    #[test]
    fn test_initial_legal_moves() {
        let board = Board::new();
        assert_eq!(
            board.legal_moves(),
            vec![mv(Color::Purple, 1, (0, -1)), mv(Color::Purple, 3, (0, -1))]
        );
    }

    #[test]
    fn test_legal_moves_after_opening_slides() {
        let mut board = Board::new();
        board.apply_move(mv(Color::Purple, 1, (0, -1))).unwrap();
        board
            .apply_move(mv(Color::PurpleHorizontal, 1, (-1, 0)))
            .unwrap();
        assert_eq!(
            board.legal_moves(),
            vec![
                mv(Color::Purple, 3, (0, -1)),
                mv(Color::PurpleHorizontal, 1, (1, 0)),
                mv(Color::Red, 3, (0, -1)),
            ]
        );
    }

    #[test]
    fn test_delete_piece_opens_moves() {
        let mut board = Board::new();
        board.delete_piece(name(Color::Purple, 1)).unwrap();

        let h1 = board.piece(name(Color::PurpleHorizontal, 1)).unwrap();
        assert_eq!(h1.legal_moves(&board), vec![(-1, 0)]);
        let p2 = board.piece(name(Color::Purple, 2)).unwrap();
        assert_eq!(p2.legal_moves(&board), vec![(0, -1)]);

        board.apply_move(mv(Color::Purple, 2, (0, -1))).unwrap();
        let g1 = board.piece(name(Color::Green, 1)).unwrap();
        assert_eq!(g1.legal_moves(&board), vec![(-1, 0)]);
        let p2 = board.piece(name(Color::Purple, 2)).unwrap();
        assert_eq!(p2.legal_moves(&board), vec![(0, 1), (0, -1)]);
        let r2 = board.piece(name(Color::Red, 2)).unwrap();
        assert_eq!(r2.legal_moves(&board), vec![(-1, 0)]);
        for number in [1, 3, 4] {
            let red = board.piece(name(Color::Red, number)).unwrap();
            assert!(red.legal_moves(&board).is_empty());
        }
        let h1 = board.piece(name(Color::PurpleHorizontal, 1)).unwrap();
        assert!(h1.legal_moves(&board).is_empty());
    }

    #[test]
    fn test_delete_unknown_piece() {
        let mut board = Board::new();
        assert_eq!(
            board.delete_piece(name(Color::Red, 9)),
            Err(MoveError::UnknownPiece(name(Color::Red, 9)))
        );
    }

    #[test]
    fn test_moves_off_the_edges_fail() {
        let mut board = Board::new();
        assert_eq!(
            board.apply_move(mv(Color::Purple, 1, (-1, 0))),
            Err(MoveError::OutOfBounds)
        );
        assert_eq!(
            board.apply_move(mv(Color::Green, 1, (0, -1))),
            Err(MoveError::OutOfBounds)
        );
        assert_eq!(
            board.apply_move(mv(Color::Purple, 4, (1, 0))),
            Err(MoveError::OutOfBounds)
        );
        assert_eq!(
            board.apply_move(mv(Color::Purple, 4, (0, 1))),
            Err(MoveError::OutOfBounds)
        );
    }

    #[test]
    fn test_moves_onto_other_pieces_fail() {
        let mut board = Board::new();
        for bad in [
            mv(Color::Green, 1, (-1, 0)),
            mv(Color::Green, 1, (1, 0)),
            mv(Color::Green, 1, (0, 1)),
            mv(Color::Red, 1, (-1, 0)),
            mv(Color::Red, 1, (1, 0)),
            mv(Color::Red, 1, (0, -1)),
            mv(Color::Red, 1, (0, 1)),
        ] {
            assert!(matches!(
                board.apply_move(bad),
                Err(MoveError::Collision(_))
            ));
        }
    }

    #[test]
    fn test_green_descent_reports_the_blocker() {
        let mut board = Board::new();
        assert_eq!(
            board.apply_move(mv(Color::Green, 1, (0, 1))),
            Err(MoveError::Collision(name(Color::PurpleHorizontal, 1)))
        );
    }

    #[test]
    fn test_unknown_piece_move() {
        let mut board = Board::new();
        assert_eq!(
            board.apply_move(mv(Color::Purple, 7, (0, -1))),
            Err(MoveError::UnknownPiece(name(Color::Purple, 7)))
        );
    }

    #[test]
    fn test_invalid_direction_move() {
        let mut board = Board::new();
        assert_eq!(
            board.apply_move(mv(Color::Purple, 1, (0, -2))),
            Err(MoveError::InvalidDirection((0, -2)))
        );
    }

    #[test]
    fn test_board_unchanged_after_failed_moves() {
        let board = Board::new();
        for bad in [
            mv(Color::Purple, 1, (-1, 0)),
            mv(Color::Green, 1, (0, 1)),
            mv(Color::Purple, 1, (2, 0)),
            mv(Color::Purple, 7, (0, -1)),
        ] {
            let mut attempt = board.clone();
            assert!(attempt.apply_move(bad).is_err());
            assert_eq!(attempt, board);
        }
    }

    #[test]
    fn test_legal_moves_are_sound_and_complete() {
        let board = Board::new();
        let legal = board.legal_moves();
        for piece in board.pieces() {
            for offset in DIRECTIONS {
                let mv = Move::new(piece.name, offset);
                let mut attempt = board.clone();
                if legal.contains(&mv) {
                    assert_eq!(attempt.apply_move(mv), Ok(()));
                } else {
                    assert!(matches!(
                        attempt.apply_move(mv),
                        Err(MoveError::OutOfBounds | MoveError::Collision(_))
                    ));
                }
            }
        }
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut board = Board::new();
        board.rebuild();
        let once = *board.cells();
        board.rebuild();
        assert_eq!(*board.cells(), once);
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::new();
        let mut branch = board.clone();
        branch.apply_move(mv(Color::Purple, 1, (0, -1))).unwrap();
        assert_ne!(branch, board);
        assert_eq!(board.piece(name(Color::Purple, 1)).unwrap().location(), (0, 1));
    }

    #[test]
    fn test_grid_matches_footprints_after_moves() {
        let mut board = Board::new();
        board.apply_move(mv(Color::Purple, 1, (0, -1))).unwrap();
        assert_eq!(board.cell(0, 0), Some(name(Color::Purple, 1)));
        assert_eq!(board.cell(0, 1), Some(name(Color::Purple, 1)));
        assert_eq!(board.cell(0, 2), None);
    }

    #[test]
    #[should_panic(expected = "duplicate piece name")]
    fn test_duplicate_names_are_fatal() {
        Board::from_pieces(vec![
            Piece::new(Color::Red, 1, 1, 1, (0, 0)),
            Piece::new(Color::Red, 1, 1, 1, (1, 0)),
        ]);
    }

    #[test]
    #[should_panic(expected = "overlap")]
    fn test_overlapping_footprints_are_fatal() {
        Board::from_pieces(vec![
            Piece::new(Color::Red, 1, 1, 1, (0, 0)),
            Piece::new(Color::Green, 1, 2, 2, (0, 0)),
        ]);
    }
}
