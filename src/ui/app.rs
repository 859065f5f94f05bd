use std::io::{BufRead, Write};

use rand::Rng;
use tracing::debug;

use super::board_view::{render_board, seat_glyph};
use crate::error::{ClientError, GameError};
use crate::game::{Board, GameEngine, Seat, COLUMNS};

/// Line-based client that plays one or more rounds on a [`GameEngine`],
/// reading human moves from `input` and writing boards and prompts to
/// `output`.
pub struct App<I, O> {
    input: I,
    output: O,
    rounds: usize,
}

impl<I: BufRead, O: Write> App<I, O> {
    pub fn new(input: I, output: O, rounds: usize) -> Self {
        App {
            input,
            output,
            rounds,
        }
    }

    /// Play every round, then print the score table.
    pub fn run<R: Rng>(&mut self, engine: &mut GameEngine<R>) -> Result<(), ClientError> {
        let names = engine.player_names();
        writeln!(
            self.output,
            "{} ({}) vs {} ({})",
            names[0],
            seat_glyph(Seat::First),
            names[1],
            seat_glyph(Seat::Second)
        )?;

        for round in 1..=self.rounds {
            if self.rounds > 1 {
                writeln!(self.output, "Round {round} of {}", self.rounds)?;
            }
            self.play_round(engine)?;
        }

        writeln!(self.output, "Scores:")?;
        let scores = engine.scores();
        for name in &names {
            let score = scores.get(name).copied().unwrap_or(0);
            writeln!(self.output, "  {name}: {score}")?;
        }
        Ok(())
    }

    fn play_round<R: Rng>(&mut self, engine: &mut GameEngine<R>) -> Result<(), ClientError> {
        let board = engine.start_game();
        writeln!(self.output, "Game start")?;
        self.show(&board)?;

        while !engine.is_game_over() {
            let board = self.take_turn(engine)?;
            self.show(&board)?;
        }

        match engine.winner() {
            Some(winner) => writeln!(self.output, "{winner} wins!")?,
            None => writeln!(self.output, "It's a draw!")?,
        }
        Ok(())
    }

    fn take_turn<R: Rng>(&mut self, engine: &mut GameEngine<R>) -> Result<Board, ClientError> {
        let name = engine
            .current_player()
            .ok_or(GameError::NotStarted)?
            .to_string();

        if engine.is_current_player_computer() {
            writeln!(self.output, "{name} places a token")?;
            return Ok(engine.place_token(None)?);
        }

        loop {
            let column = self.prompt_column(&name)?;
            if !engine.is_placement_valid(column) {
                writeln!(self.output, "Column {column} is not available, try again.")?;
                continue;
            }
            match engine.place_token(Some(column)) {
                Ok(board) => return Ok(board),
                Err(GameError::InvalidArgument(reason)) => {
                    writeln!(self.output, "{reason}, try again.")?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn prompt_column(&mut self, name: &str) -> Result<isize, ClientError> {
        loop {
            write!(self.output, "{name}, select a column (0-{}): ", COLUMNS - 1)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(ClientError::InputClosed);
            }
            let line = line.trim();
            match line.parse::<isize>() {
                Ok(column) => return Ok(column),
                Err(_) => {
                    debug!(input = line, "rejected non-numeric column");
                    writeln!(self.output, "'{line}' is not a column number.")?;
                }
            }
        }
    }

    fn show(&mut self, board: &Board) -> Result<(), ClientError> {
        write!(self.output, "{}", render_board(board))?;
        writeln!(self.output)?;
        Ok(())
    }
}
