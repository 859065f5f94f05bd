/// Names reserved for computer-controlled seats, in seat order.
pub const COMPUTER_NAMES: [&str; 2] = ["Computer1", "Computer2"];

/// True if `name` is one of the reserved computer names.
pub fn is_reserved_name(name: &str) -> bool {
    COMPUTER_NAMES.iter().any(|&reserved| reserved == name)
}

/// One of the two fixed player slots of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub const ALL: [Seat; 2] = [Seat::First, Seat::Second];

    /// Get the other seat
    pub fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Seat> {
        match index {
            0 => Some(Seat::First),
            1 => Some(Seat::Second),
            _ => None,
        }
    }

    /// Name used when no player name is supplied for this seat.
    pub fn default_name(self) -> &'static str {
        COMPUTER_NAMES[self.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Computer,
}

impl PlayerKind {
    /// Classify a resolved player name.
    pub fn of(name: &str) -> PlayerKind {
        if is_reserved_name(name) {
            PlayerKind::Computer
        } else {
            PlayerKind::Human
        }
    }
}
