use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::board::{Board, MoveError, COLUMNS};
use super::player::{is_reserved_name, PlayerKind, Seat};
use crate::config::AppConfig;
use crate::error::GameError;

/// A two-seat Connect Four session.
///
/// The engine owns the board, turn order, outcome and a per-player win tally
/// that survives across rounds started with [`GameEngine::start_game`]. All
/// randomness (starting seat, computer moves) is drawn from `R`, so a seeded
/// generator makes a whole session reproducible.
#[derive(Debug)]
pub struct GameEngine<R = StdRng> {
    players: [String; 2],
    scores: HashMap<String, u32>,
    board: Option<Board>,
    current: Option<Seat>,
    game_over: bool,
    winner: Option<Seat>,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create an engine seeded from OS entropy.
    ///
    /// Missing names default to `Computer1` / `Computer2`, which makes that
    /// seat computer-controlled.
    pub fn new(player1: Option<&str>, player2: Option<&str>) -> Result<Self, GameError> {
        Self::with_rng(player1, player2, StdRng::from_os_rng())
    }

    /// Create an engine whose random choices are fully determined by `seed`.
    pub fn seeded(
        player1: Option<&str>,
        player2: Option<&str>,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::with_rng(player1, player2, StdRng::seed_from_u64(seed))
    }

    /// Build an engine from the `[players]` and `[engine]` config sections.
    pub fn from_config(config: &AppConfig) -> Result<Self, GameError> {
        let player1 = config.players.player1.as_deref();
        let player2 = config.players.player2.as_deref();
        match config.engine.seed {
            Some(seed) => Self::seeded(player1, player2, seed),
            None => Self::new(player1, player2),
        }
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing its random choices from `rng`.
    pub fn with_rng(
        player1: Option<&str>,
        player2: Option<&str>,
        rng: R,
    ) -> Result<Self, GameError> {
        let players = resolve_player_names(player1, player2)?;
        let scores = players.iter().map(|name| (name.clone(), 0)).collect();

        Ok(GameEngine {
            players,
            scores,
            board: None,
            current: None,
            game_over: false,
            winner: None,
            rng,
        })
    }

    /// Start a new round: clear the board and outcome, and pick the starting
    /// seat at random. Scores carry over from previous rounds.
    pub fn start_game(&mut self) -> Board {
        let board = Board::new();
        let seat = if self.rng.random_bool(0.5) {
            Seat::First
        } else {
            Seat::Second
        };

        self.board = Some(board);
        self.current = Some(seat);
        self.game_over = false;
        self.winner = None;

        info!(starting_player = %self.players[seat.index()], "game started");
        board
    }

    /// Place a token for the player on move and return the resulting board.
    ///
    /// Human players must pass a column; computer players must pass `None`
    /// and get a column chosen uniformly from the non-full ones. Nothing is
    /// mutated when an error is returned.
    pub fn place_token(&mut self, column: Option<isize>) -> Result<Board, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        let (mut board, seat) = match (self.board, self.current) {
            (Some(board), Some(seat)) => (board, seat),
            _ => return Err(GameError::NotStarted),
        };

        let col = match (self.player_kind(seat), column) {
            (PlayerKind::Computer, Some(_)) => {
                return Err(GameError::InvalidArgument(format!(
                    "cannot choose a column for computer player {}",
                    self.players[seat.index()]
                )));
            }
            (PlayerKind::Human, None) => {
                return Err(GameError::InvalidArgument(format!(
                    "player {} must choose a column",
                    self.players[seat.index()]
                )));
            }
            (PlayerKind::Human, Some(column)) => validate_column(&board, column)?,
            (PlayerKind::Computer, None) => self.choose_computer_column(&board)?,
        };

        let row = board.drop_piece(col, seat).map_err(|e| match e {
            MoveError::ColumnFull => GameError::InvalidArgument(format!("column {col} is full")),
            MoveError::InvalidColumn => {
                GameError::InvalidArgument(format!("column {col} is out of range"))
            }
        })?;
        self.board = Some(board);

        let name = &self.players[seat.index()];
        debug!(player = %name, row, column = col, "token placed");

        if board.check_win(row, col) {
            self.game_over = true;
            self.winner = Some(seat);
            let score = self.scores.entry(name.clone()).or_insert(0);
            *score += 1;
            info!(winner = %name, score = *score, "game won");
        } else if board.is_full() {
            self.game_over = true;
            info!("game ended in a draw");
        } else {
            self.current = Some(seat.other());
        }

        Ok(board)
    }

    fn choose_computer_column(&mut self, board: &Board) -> Result<usize, GameError> {
        let columns = board.valid_columns();
        if columns.is_empty() {
            return Err(GameError::GameOver);
        }
        let col = columns[self.rng.random_range(0..columns.len())];
        debug!(column = col, candidates = columns.len(), "computer chose column");
        Ok(col)
    }
}

impl<R> GameEngine<R> {
    /// Win count per player name.
    pub fn scores(&self) -> HashMap<String, u32> {
        self.scores.clone()
    }

    /// Name of the winner of the current round. `None` while the round is in
    /// progress and after a draw.
    pub fn winner(&self) -> Option<&str> {
        self.winner.map(|seat| self.players[seat.index()].as_str())
    }

    /// Name of the player on move, `None` before the first round starts.
    pub fn current_player(&self) -> Option<&str> {
        self.current.map(|seat| self.players[seat.index()].as_str())
    }

    pub fn current_seat(&self) -> Option<Seat> {
        self.current
    }

    pub fn is_current_player_computer(&self) -> bool {
        self.current_player().is_some_and(is_reserved_name)
    }

    pub fn player_kind(&self, seat: Seat) -> PlayerKind {
        PlayerKind::of(&self.players[seat.index()])
    }

    /// Both player names in seat order.
    pub fn player_names(&self) -> [String; 2] {
        self.players.clone()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Snapshot of the current board, `None` before the first round starts.
    pub fn board(&self) -> Option<Board> {
        self.board
    }

    /// True if a round has started and `column` is in range and not full.
    pub fn is_placement_valid(&self, column: isize) -> bool {
        match self.board {
            Some(board) => validate_column(&board, column).is_ok(),
            None => false,
        }
    }
}

fn resolve_player_names(
    player1: Option<&str>,
    player2: Option<&str>,
) -> Result<[String; 2], GameError> {
    for name in [player1, player2].into_iter().flatten() {
        if is_reserved_name(name) {
            return Err(GameError::InvalidConfiguration(format!(
                "'{name}' is a reserved name"
            )));
        }
    }

    let player1 = player1.unwrap_or(Seat::First.default_name());
    let player2 = player2.unwrap_or(Seat::Second.default_name());
    if player1 == player2 {
        return Err(GameError::InvalidConfiguration(format!(
            "both players are named '{player1}'"
        )));
    }

    Ok([player1.to_string(), player2.to_string()])
}

fn validate_column(board: &Board, column: isize) -> Result<usize, GameError> {
    let col = usize::try_from(column)
        .ok()
        .filter(|&col| col < COLUMNS)
        .ok_or_else(|| {
            GameError::InvalidArgument(format!(
                "column {column} is out of range 0..{COLUMNS}"
            ))
        })?;

    if board.is_column_full(col) {
        return Err(GameError::InvalidArgument(format!("column {col} is full")));
    }
    Ok(col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, ROWS};

    // Column sequence that fills the board without four in a row for either
    // side, whichever seat starts.
    const DRAW_SEQUENCE: [isize; 42] = [
        3, 4, 4, 6, 0, 3, 5, 2, 6, 5, 0, 6, 5, 0, 3, 6, 5, 6, 1, 3, 1, 3, 6, 5, 2, 0, 5, 3, 4,
        4, 0, 1, 1, 1, 0, 1, 4, 2, 4, 2, 2, 2,
    ];

    fn humans(seed: u64) -> GameEngine {
        GameEngine::seeded(Some("Alice"), Some("Bob"), seed).unwrap()
    }

    fn play(engine: &mut GameEngine, columns: &[isize]) -> Board {
        let mut board = Board::new();
        for &col in columns {
            board = engine.place_token(Some(col)).unwrap();
        }
        board
    }

    fn starter(engine: &GameEngine) -> String {
        engine.current_player().unwrap().to_string()
    }

    #[test]
    fn test_rejects_reserved_names() {
        for name in ["Computer1", "Computer2"] {
            assert!(matches!(
                GameEngine::new(Some(name), None),
                Err(GameError::InvalidConfiguration(_))
            ));
            assert!(matches!(
                GameEngine::new(None, Some(name)),
                Err(GameError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_rejects_duplicate_names() {
        assert!(matches!(
            GameEngine::new(Some("Alice"), Some("Alice")),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_default_names() {
        let engine = GameEngine::new(None, None).unwrap();
        assert_eq!(engine.player_names(), ["Computer1", "Computer2"]);
        assert_eq!(engine.player_kind(Seat::First), PlayerKind::Computer);

        let engine = GameEngine::new(Some("Alice"), None).unwrap();
        assert_eq!(engine.player_names(), ["Alice", "Computer2"]);
        assert_eq!(engine.player_kind(Seat::First), PlayerKind::Human);
        assert_eq!(engine.player_kind(Seat::Second), PlayerKind::Computer);

        let scores = engine.scores();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores["Alice"], 0);
        assert_eq!(scores["Computer2"], 0);
    }

    #[test]
    fn test_not_started() {
        let mut engine = humans(1);
        assert_eq!(engine.board(), None);
        assert_eq!(engine.current_player(), None);
        assert!(!engine.is_game_over());
        assert!(!engine.is_current_player_computer());
        assert!(!engine.is_placement_valid(0));
        assert_eq!(engine.place_token(Some(0)), Err(GameError::NotStarted));
    }

    #[test]
    fn test_start_game_clears_board() {
        let mut engine = humans(1);
        let board = engine.start_game();

        assert_eq!(board, Board::new());
        for row in 0..ROWS {
            for col in 0..COLUMNS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert!(!engine.is_game_over());
        assert_eq!(engine.winner(), None);
        assert!(["Alice", "Bob"].contains(&engine.current_player().unwrap()));
    }

    #[test]
    fn test_starting_seat_is_seeded() {
        let mut starters = std::collections::HashSet::new();
        for seed in 0..64 {
            let mut a = humans(seed);
            let mut b = humans(seed);
            a.start_game();
            b.start_game();
            assert_eq!(a.current_seat(), b.current_seat());
            starters.insert(a.current_seat().unwrap());
        }
        assert_eq!(starters.len(), 2, "both seats should get to start");
    }

    #[test]
    fn test_place_token_uses_gravity() {
        for col in 0..COLUMNS {
            let mut engine = humans(3);
            engine.start_game();
            play(&mut engine, &[col as isize, col as isize]);

            let before = engine.board().unwrap().column_height(col);
            let mover = engine.current_seat().unwrap();
            let board = engine.place_token(Some(col as isize)).unwrap();

            assert_eq!(board.column_height(col), before + 1);
            assert_eq!(board.owner(before, col), Some(mover));
        }
    }

    #[test]
    fn test_vertical_win_on_fourth_token() {
        let mut engine = humans(5);
        engine.start_game();
        let first = starter(&engine);

        let moves = [0, 1, 0, 1, 0, 1];
        for &col in &moves {
            engine.place_token(Some(col)).unwrap();
            assert!(!engine.is_game_over());
            assert_eq!(engine.winner(), None);
        }

        engine.place_token(Some(0)).unwrap();
        assert!(engine.is_game_over());
        assert_eq!(engine.winner(), Some(first.as_str()));
    }

    #[test]
    fn test_horizontal_win() {
        let mut engine = humans(5);
        engine.start_game();
        let first = starter(&engine);

        play(&mut engine, &[0, 0, 1, 1, 2, 2, 3]);
        assert!(engine.is_game_over());
        assert_eq!(engine.winner(), Some(first.as_str()));
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut engine = humans(8);
        engine.start_game();
        let first = starter(&engine);
        let seat = engine.current_seat().unwrap();

        let board = play(&mut engine, &[3, 5, 3, 4, 2, 5, 4, 2, 4, 5, 5]);
        for (row, col) in [(0, 2), (1, 3), (2, 4), (3, 5)] {
            assert_eq!(board.owner(row, col), Some(seat));
        }
        assert!(engine.is_game_over());
        assert_eq!(engine.winner(), Some(first.as_str()));
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut engine = humans(8);
        engine.start_game();
        let first = starter(&engine);
        let seat = engine.current_seat().unwrap();

        // Last token lands in the middle of the run.
        let board = play(&mut engine, &[4, 2, 1, 2, 3, 1, 3, 1, 1, 6, 2]);
        for (row, col) in [(3, 1), (2, 2), (1, 3), (0, 4)] {
            assert_eq!(board.owner(row, col), Some(seat));
        }
        assert!(engine.is_game_over());
        assert_eq!(engine.winner(), Some(first.as_str()));
    }

    #[test]
    fn test_full_board_is_a_draw() {
        let mut engine = humans(13);
        engine.start_game();

        let (last, rest) = DRAW_SEQUENCE.split_last().unwrap();
        play(&mut engine, rest);
        assert!(!engine.is_game_over());

        let board = engine.place_token(Some(*last)).unwrap();
        assert!(board.is_full());
        assert!(engine.is_game_over());
        assert_eq!(engine.winner(), None);
        assert!(engine.scores().values().all(|&score| score == 0));
    }

    #[test]
    fn test_scores_persist_across_rounds() {
        let mut engine = humans(21);
        engine.start_game();
        let first = starter(&engine);
        let other = if first == "Alice" { "Bob" } else { "Alice" };

        play(&mut engine, &[0, 1, 0, 1, 0, 1, 0]);
        let scores = engine.scores();
        assert_eq!(scores[&first], 1);
        assert_eq!(scores[other], 0);

        engine.start_game();
        assert!(!engine.is_game_over());
        assert_eq!(engine.winner(), None);
        assert_eq!(engine.scores(), scores);
    }

    #[test]
    fn test_place_after_game_over_fails() {
        let mut engine = humans(2);
        engine.start_game();
        play(&mut engine, &[0, 1, 0, 1, 0, 1, 0]);

        let board = engine.board();
        let current = engine.current_seat();
        for col in [Some(3), Some(-1), None] {
            assert_eq!(engine.place_token(col), Err(GameError::GameOver));
        }
        assert_eq!(engine.board(), board);
        assert_eq!(engine.current_seat(), current);
    }

    #[test]
    fn test_computer_player_rejects_column() {
        let mut engine = GameEngine::seeded(Some("Alice"), None, 4).unwrap();
        engine.start_game();
        if !engine.is_current_player_computer() {
            engine.place_token(Some(3)).unwrap();
        }
        assert!(engine.is_current_player_computer());
        assert_eq!(engine.current_player(), Some("Computer2"));

        let board = engine.board();
        for col in [0, 3, 6, 7, -1] {
            assert!(matches!(
                engine.place_token(Some(col)),
                Err(GameError::InvalidArgument(_))
            ));
        }
        assert_eq!(engine.board(), board);
        assert!(engine.is_current_player_computer());
    }

    #[test]
    fn test_human_player_requires_column() {
        let mut engine = GameEngine::seeded(Some("Alice"), None, 4).unwrap();
        engine.start_game();
        if engine.is_current_player_computer() {
            engine.place_token(None).unwrap();
        }
        assert_eq!(engine.current_player(), Some("Alice"));
        assert!(matches!(
            engine.place_token(None),
            Err(GameError::InvalidArgument(_))
        ));
        assert_eq!(engine.current_player(), Some("Alice"));
    }

    #[test]
    fn test_rejects_invalid_columns_without_mutation() {
        let mut engine = humans(6);
        engine.start_game();
        play(&mut engine, &[2, 2, 2, 2, 2, 2]);

        let board = engine.board();
        let current = engine.current_seat();
        for col in [-1, 7, 100, 2] {
            assert!(matches!(
                engine.place_token(Some(col)),
                Err(GameError::InvalidArgument(_))
            ));
        }
        assert_eq!(engine.board(), board);
        assert_eq!(engine.current_seat(), current);
        assert!(!engine.is_game_over());
    }

    #[test]
    fn test_is_placement_valid() {
        let mut engine = humans(6);
        assert!(!engine.is_placement_valid(3));

        engine.start_game();
        for col in 0..COLUMNS as isize {
            assert!(engine.is_placement_valid(col));
        }
        assert!(!engine.is_placement_valid(-1));
        assert!(!engine.is_placement_valid(7));

        play(&mut engine, &[4, 4, 4, 4, 4, 4]);
        assert!(!engine.is_placement_valid(4));
        assert!(engine.is_placement_valid(3));
    }

    #[test]
    fn test_turns_alternate_until_terminal_move() {
        let mut engine = humans(9);
        engine.start_game();
        let first = engine.current_seat().unwrap();

        let moves = [0, 1, 0, 1, 0, 1];
        for (i, &col) in moves.iter().enumerate() {
            let expected = if i % 2 == 0 { first } else { first.other() };
            assert_eq!(engine.current_seat(), Some(expected));
            engine.place_token(Some(col)).unwrap();
        }

        assert_eq!(engine.current_seat(), Some(first));
        engine.place_token(Some(0)).unwrap();
        assert!(engine.is_game_over());
        // The winning move does not hand over the turn.
        assert_eq!(engine.current_seat(), Some(first));
    }

    #[test]
    fn test_computer_game_runs_to_completion() {
        let mut engine = GameEngine::seeded(None, None, 42).unwrap();
        engine.start_game();

        let mut moves = 0;
        while !engine.is_game_over() {
            assert!(engine.is_current_player_computer());
            engine.place_token(None).unwrap();
            moves += 1;
            assert!(moves <= ROWS * COLUMNS);
        }

        let total: u32 = engine.scores().values().sum();
        match engine.winner() {
            Some(winner) => {
                assert_eq!(engine.scores()[winner], 1);
                assert_eq!(total, 1);
            }
            None => {
                assert!(engine.board().unwrap().is_full());
                assert_eq!(total, 0);
            }
        }
    }

    #[test]
    fn test_seeded_computer_games_are_reproducible() {
        let run = |seed| {
            let mut engine = GameEngine::seeded(None, None, seed).unwrap();
            let mut board = engine.start_game();
            while !engine.is_game_over() {
                board = engine.place_token(None).unwrap();
            }
            (board, engine.winner().map(str::to_string))
        };
        assert_eq!(run(77), run(77));
    }

    #[test]
    fn test_computer_moves_are_always_legal() {
        let mut engine = GameEngine::seeded(None, None, 10).unwrap();
        engine.start_game();
        while !engine.is_game_over() {
            let before = engine.board().unwrap();
            let after = engine.place_token(None).unwrap();
            let changed: Vec<usize> = (0..COLUMNS)
                .filter(|&col| before.column_height(col) != after.column_height(col))
                .collect();
            assert_eq!(changed.len(), 1);
            assert!(!before.is_column_full(changed[0]));
        }
    }

    #[test]
    fn test_returned_board_is_a_snapshot() {
        let mut engine = humans(11);
        let mut snapshot = engine.start_game();
        snapshot.drop_piece(0, Seat::First).unwrap();

        assert_eq!(engine.board(), Some(Board::new()));
        assert!(engine.is_placement_valid(0));

        let mut names = engine.player_names();
        names[0].push_str("-changed");
        let mut scores = engine.scores();
        scores.insert("Mallory".to_string(), 9);
        assert_eq!(engine.player_names(), ["Alice", "Bob"]);
        assert_eq!(engine.scores().len(), 2);
    }

    #[test]
    fn test_from_config() {
        let mut config = AppConfig::default();
        config.players.player1 = Some("Alice".to_string());
        config.engine.seed = Some(3);

        let mut a = GameEngine::from_config(&config).unwrap();
        let mut b = GameEngine::from_config(&config).unwrap();
        assert_eq!(a.player_names(), ["Alice", "Computer2"]);
        a.start_game();
        b.start_game();
        assert_eq!(a.current_seat(), b.current_seat());
    }
}
