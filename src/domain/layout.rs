/// Split-view layout in character cells.
///
///   - `top`  : upper 3/4 of the viewport, holds the game board
///   - `term` : lower 1/4, holds the console
///   - `board`: square board centered in `top`
///   - `cells`: 3×3 grid inside `board`, indexed `[row][col]`
///
/// Terminal cells are about twice as tall as they are wide, so a visually
/// square board is `CELL_ASPECT` columns per row.

pub const CELL_ASPECT: u16 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.h)
    }

    /// Center point (rounded toward the top-left).
    pub fn center(&self) -> (u16, u16) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Shrink by `dx` columns and `dy` rows on every side.
    pub fn inset(&self, dx: u16, dy: u16) -> Rect {
        let w = self.w.saturating_sub(dx * 2);
        let h = self.h.saturating_sub(dy * 2);
        Rect::new(self.x + dx.min(self.w / 2), self.y + dy.min(self.h / 2), w, h)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    pub size: (u16, u16),
    pub top: Rect,
    pub term: Rect,
    pub board: Rect,
    pub cells: [[Rect; 3]; 3],
}

impl Layout {
    pub fn compute(width: u16, height: u16) -> Self {
        let top_h = (height as u32 * 3 / 4) as u16;
        let top = Rect::new(0, 0, width, top_h);
        let term = Rect::new(0, top_h, width, height - top_h);

        // Largest square (in visual terms) that fits the top area.
        let side_rows = top.h.min(top.w / CELL_ASPECT);
        let side_cols = side_rows * CELL_ASPECT;
        let bx = top.x + (top.w - side_cols) / 2;
        let by = top.y + (top.h - side_rows) / 2;
        let board = Rect::new(bx, by, side_cols, side_rows);

        let cw = side_cols / 3;
        let ch = side_rows / 3;
        let mut cells = [[Rect::default(); 3]; 3];
        for (r, row) in cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = Rect::new(bx + c as u16 * cw, by + r as u16 * ch, cw, ch);
            }
        }

        Layout { size: (width, height), top, term, board, cells }
    }

    pub fn cell(&self, row: usize, col: usize) -> Rect {
        self.cells[row.min(2)][col.min(2)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_takes_three_quarters() {
        let l = Layout::compute(80, 24);
        assert_eq!(l.top, Rect::new(0, 0, 80, 18));
        assert_eq!(l.term, Rect::new(0, 18, 80, 6));
    }

    #[test]
    fn board_is_centered_and_square() {
        let l = Layout::compute(80, 24);
        assert_eq!(l.board.h, 18);
        assert_eq!(l.board.w, 36);
        assert_eq!(l.board.x, (80 - 36) / 2);
        assert_eq!(l.board.y, 0);
    }

    #[test]
    fn narrow_viewport_limits_board_by_width() {
        let l = Layout::compute(20, 40);
        assert_eq!(l.board.w, 20);
        assert_eq!(l.board.h, 10);
        assert_eq!(l.board.y, (30 - 10) / 2);
    }

    #[test]
    fn cells_tile_the_board() {
        let l = Layout::compute(120, 40);
        let cw = l.board.w / 3;
        let ch = l.board.h / 3;
        assert_eq!(l.cell(0, 0).x, l.board.x);
        assert_eq!(l.cell(2, 2), Rect::new(l.board.x + 2 * cw, l.board.y + 2 * ch, cw, ch));
        assert_eq!(l.cell(1, 2).y, l.cell(1, 0).y);
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let l = Layout::compute(0, 0);
        assert_eq!(l.board.w, 0);
        let l = Layout::compute(1, 1);
        assert_eq!(l.term.h, 1);
    }

    #[test]
    fn rect_helpers() {
        let r = Rect::new(2, 3, 10, 4);
        assert_eq!((r.right(), r.bottom()), (12, 7));
        assert_eq!(r.center(), (7, 5));
        assert_eq!(r.inset(1, 1), Rect::new(3, 4, 8, 2));
    }
}
