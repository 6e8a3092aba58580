/// Tic-tac-toe board: 3×3 marks, the player to move, and a selection cursor.
/// No win detection; the board is a free-play grid.

use crate::domain::input::MoveDir;

pub const SIZE: usize = 3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Mark>; SIZE]; SIZE],
    turn: Mark,
    /// (row, col)
    cursor: (usize, usize),
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [[None; SIZE]; SIZE],
            turn: Mark::X,
            cursor: (1, 1),
        }
    }

    pub fn at(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Move the cursor one cell, clamped to the grid.
    pub fn move_cursor(&mut self, dir: MoveDir) {
        let (r, c) = self.cursor;
        self.cursor = match dir {
            MoveDir::Up => (r.saturating_sub(1), c),
            MoveDir::Down => ((r + 1).min(SIZE - 1), c),
            MoveDir::Left => (r, c.saturating_sub(1)),
            MoveDir::Right => (r, (c + 1).min(SIZE - 1)),
        };
    }

    /// Place the current mark at the cursor and pass the turn.
    /// Returns the placed mark, or `None` if the cell is taken.
    pub fn place(&mut self) -> Option<Mark> {
        let (r, c) = self.cursor;
        if self.cells[r][c].is_some() {
            return None;
        }
        let mark = self.turn;
        self.cells[r][c] = Some(mark);
        self.turn = mark.other();
        Some(mark)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_with_x_at_center() {
        let b = Board::new();
        assert_eq!(b.turn(), Mark::X);
        assert_eq!(b.cursor(), (1, 1));
        assert!((0..3).all(|r| (0..3).all(|c| b.at(r, c).is_none())));
    }

    #[test]
    fn cursor_is_clamped() {
        let mut b = Board::new();
        for _ in 0..5 {
            b.move_cursor(MoveDir::Up);
            b.move_cursor(MoveDir::Left);
        }
        assert_eq!(b.cursor(), (0, 0));
        for _ in 0..5 {
            b.move_cursor(MoveDir::Down);
            b.move_cursor(MoveDir::Right);
        }
        assert_eq!(b.cursor(), (2, 2));
    }

    #[test]
    fn place_alternates_players() {
        let mut b = Board::new();
        assert_eq!(b.place(), Some(Mark::X));
        b.move_cursor(MoveDir::Right);
        assert_eq!(b.place(), Some(Mark::O));
        assert_eq!(b.at(1, 1), Some(Mark::X));
        assert_eq!(b.at(1, 2), Some(Mark::O));
        assert_eq!(b.turn(), Mark::X);
    }

    #[test]
    fn placing_on_occupied_cell_changes_nothing() {
        let mut b = Board::new();
        b.place();
        let before = b.clone();
        assert_eq!(b.place(), None);
        assert_eq!(b, before);
        assert_eq!(b.turn(), Mark::O);
    }

    #[test]
    fn out_of_range_lookup_is_empty() {
        let b = Board::new();
        assert_eq!(b.at(5, 0), None);
    }

    #[test]
    fn full_board() {
        let mut b = Board::new();
        for r in 0..3 {
            for c in 0..3 {
                b.cursor = (r, c);
                b.place();
            }
        }
        assert!(b.is_full());
    }
}
