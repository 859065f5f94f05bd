use crate::game::{Board, Cell, Seat, COLUMNS, ROWS};

/// Glyph drawn for a cell owned by `seat`.
pub fn seat_glyph(seat: Seat) -> char {
    match seat {
        Seat::First => 'X',
        Seat::Second => 'O',
    }
}

/// Render a board as text, top row first, with column indices underneath.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    for row in (0..ROWS).rev() {
        out.push('|');
        for col in 0..COLUMNS {
            let symbol = match board.get(row, col) {
                Cell::Empty => '.',
                Cell::Occupied(seat) => seat_glyph(seat),
            };
            out.push(' ');
            out.push(symbol);
        }
        out.push_str(" |\n");
    }

    out.push('+');
    out.push_str(&"-".repeat(COLUMNS * 2 + 1));
    out.push_str("+\n");
    out.push(' ');
    for col in 0..COLUMNS {
        out.push_str(&format!(" {col}"));
    }
    out.push('\n');
    out
}
