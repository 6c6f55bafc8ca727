//! Piece definitions: colors, names and the sliding pieces themselves.
//!
//! Each piece is an axis-aligned rectangle identified by a color class and a
//! number unique within that color. Pieces never rotate or resize; the only
//! mutable field is `location`.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::board::{in_bounds, Board};
use crate::moves::{Cell, MoveError, Offset, DIRECTIONS};

/// The closed set of piece color classes.
///
/// The horizontal purple piece gets its own class rather than a flag on
/// `Purple`: the two classes have different footprints and must never be
/// treated as interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Purple,
    PurpleHorizontal,
    Red,
    Green,
}

impl Color {
    /// One-letter code used in piece names.
    pub fn code(self) -> char {
        match self {
            Color::Purple => 'p',
            Color::PurpleHorizontal => 'h',
            Color::Red => 'r',
            Color::Green => 'g',
        }
    }

    /// Human-readable label used by piece display.
    pub fn label(self) -> &'static str {
        match self {
            Color::Purple => "Purple",
            Color::PurpleHorizontal => "Horizontal Purple",
            Color::Red => "Red",
            Color::Green => "Green",
        }
    }

    /// Whether same-colored pieces of this class count as interchangeable
    /// for equivalence detection.
    ///
    /// The single 2x2 green piece and the single horizontal purple piece are
    /// exempt: their positional identity matters.
    pub fn interchangeable(self) -> bool {
        match self {
            Color::Purple | Color::Red => true,
            Color::PurpleHorizontal | Color::Green => false,
        }
    }
}

/// A piece identifier: color class plus a number unique within the color.
///
/// Renders as the color code followed by the number ("p1", "r3", "h1").
/// Names must be unique across the whole piece collection; the board uses
/// them as its mapping key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Name {
    pub color: Color,
    pub number: u8,
}

impl Name {
    /// Creates a name from a color class and a per-color number.
    pub fn new(color: Color, number: u8) -> Self {
        Self { color, number }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.code(), self.number)
    }
}

/// A sliding piece: a `width x length` rectangle at a grid location.
///
/// `location` is the minimum-x, minimum-y corner of the rectangle. Width and
/// length are fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub name: Name,
    width: i32,
    length: i32,
    location: Cell,
}

impl Piece {
    /// Creates a piece of the given color, number and footprint at `location`.
    pub fn new(color: Color, number: u8, width: i32, length: i32, location: Cell) -> Self {
        assert!(width >= 1 && length >= 1, "piece must cover at least one cell");
        Self {
            name: Name::new(color, number),
            width,
            length,
            location,
        }
    }

    /// The width of the piece in cells (x direction).
    pub fn width(&self) -> i32 {
        self.width
    }

    /// The length of the piece in cells (y direction).
    pub fn length(&self) -> i32 {
        self.length
    }

    /// The minimum-x, minimum-y corner of the piece.
    pub fn location(&self) -> Cell {
        self.location
    }

    /// The cells this piece currently occupies.
    pub fn footprint(&self) -> Vec<Cell> {
        self.footprint_at(self.location)
    }

    /// The cells the piece would occupy with its corner at `origin`.
    fn footprint_at(&self, origin: Cell) -> Vec<Cell> {
        let (x, y) = origin;
        let mut cells = Vec::with_capacity((self.width * self.length) as usize);
        for j in 0..self.length {
            for i in 0..self.width {
                cells.push((x + i, y + j));
            }
        }
        cells
    }

    /// The unit directions this piece can legally slide in on `board`.
    ///
    /// A direction passes iff every shifted footprint cell stays on the grid
    /// and lands on an empty cell or on this piece itself (the piece vacates
    /// its own cells in the same step). Directions are reported in the fixed
    /// [`DIRECTIONS`] order.
    pub fn legal_moves(&self, board: &Board) -> Vec<Offset> {
        DIRECTIONS
            .into_iter()
            .filter(|&offset| self.can_shift(offset, board))
            .collect()
    }

    fn can_shift(&self, (dx, dy): Offset, board: &Board) -> bool {
        self.footprint().into_iter().all(|(x, y)| {
            let (nx, ny) = (x + dx, y + dy);
            in_bounds(nx, ny)
                && board
                    .cell(nx, ny)
                    .map_or(true, |occupant| occupant == self.name)
        })
    }

    /// Slides the piece one cell by `offset`, checking against `others`, the
    /// rest of the live piece set.
    ///
    /// Validation order: the offset must be a unit direction, the shifted
    /// footprint must stay on the grid, and it must not intersect any other
    /// piece. The location is committed only after every check passes, so a
    /// failed move leaves the piece untouched.
    pub fn apply_move(&mut self, offset: Offset, others: &[&Piece]) -> Result<(), MoveError> {
        if !DIRECTIONS.contains(&offset) {
            return Err(MoveError::InvalidDirection(offset));
        }

        let target = (self.location.0 + offset.0, self.location.1 + offset.1);
        let shifted: FxHashSet<Cell> = self.footprint_at(target).into_iter().collect();
        if shifted.iter().any(|&(x, y)| !in_bounds(x, y)) {
            return Err(MoveError::OutOfBounds);
        }
        for other in others {
            if other.footprint().iter().any(|cell| shifted.contains(cell)) {
                return Err(MoveError::Collision(other.name));
            }
        }

        self.location = target;
        Ok(())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} piece {} covering {:?}",
            self.name.color.label(),
            self.name,
            self.footprint()
        )
    }
}

/// The fixed 10-piece starting layout, in the insertion order that fixes
/// [`Board::legal_moves`] output order.
///
/// Four vertical 1x2 purples, one horizontal 2x1 purple, four 1x1 reds and
/// one 2x2 green, leaving cells (0,0) and (3,0) empty.
pub fn starting_pieces() -> Vec<Piece> {
    vec![
        Piece::new(Color::Purple, 1, 1, 2, (0, 1)),
        Piece::new(Color::Purple, 2, 1, 2, (0, 3)),
        Piece::new(Color::Purple, 3, 1, 2, (3, 1)),
        Piece::new(Color::Purple, 4, 1, 2, (3, 3)),
        Piece::new(Color::PurpleHorizontal, 1, 2, 1, (1, 2)),
        Piece::new(Color::Red, 1, 1, 1, (1, 3)),
        Piece::new(Color::Red, 2, 1, 1, (1, 4)),
        Piece::new(Color::Red, 3, 1, 1, (2, 3)),
        Piece::new(Color::Red, 4, 1, 1, (2, 4)),
        Piece::new(Color::Green, 1, 2, 2, (1, 0)),
    ]
}
