//! # Connect Four
//!
//! A two-player Connect Four engine on the classic 7x6 grid. Either seat may
//! be a human or a computer player that picks uniformly among legal columns.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, seats, engine
//! - [`ui`] — Plain-text board rendering and the interactive read loop
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
