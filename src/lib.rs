//! Sliding-Block Puzzle Explorer Library
//!
//! Provides the board/piece model, move generation and the breadth-first
//! state-space exploration for a 4x5 "Rush Hour" style sliding puzzle.

pub mod board;
pub mod explore;
pub mod moves;
pub mod pieces;

pub use board::Board;
pub use explore::{deja_vu, explore, Census, State};
pub use moves::{Cell, Move, MoveError, Offset, DIRECTIONS};
pub use pieces::{Color, Name, Piece};
