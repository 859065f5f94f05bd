//! Text client: renders boards as plain text and drives a session from a
//! line-oriented input stream.

mod app;
pub mod board_view;

pub use app::App;
