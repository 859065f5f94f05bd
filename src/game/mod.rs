//! Core Connect Four game logic: board representation, seats and player
//! kinds, and the game engine that drives a two-player session.

mod board;
mod engine;
mod player;

pub use board::{Board, Cell, MoveError, COLUMNS, CONNECT, ROWS};
pub use engine::GameEngine;
pub use player::{is_reserved_name, PlayerKind, Seat, COMPUTER_NAMES};
