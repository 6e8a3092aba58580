/// Cell buffer the renderer composes into and the effects passes rewrite.
///
/// Colors are plain RGB so post-processing can scale them; the renderer
/// converts to crossterm colors only when flushing.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Multiply every channel by `k` (clamped to 0..=255).
    pub fn scale(self, k: f32) -> Rgb {
        let f = |c: u8| (c as f32 * k).round().clamp(0.0, 255.0) as u8;
        Rgb::new(f(self.r), f(self.g), f(self.b))
    }

    /// Channel-wise saturating add.
    pub fn add(self, o: Rgb) -> Rgb {
        Rgb::new(
            self.r.saturating_add(o.r),
            self.g.saturating_add(o.g),
            self.b.saturating_add(o.b),
        )
    }
}

/// Phosphor black.
pub const BASE_BG: Rgb = Rgb::new(0, 0, 0);
/// Phosphor green.
pub const GREEN: Rgb = Rgb::new(0, 255, 120);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Cell {
    pub const BLANK: Cell = Cell { ch: ' ', fg: GREEN, bg: BASE_BG };

    /// Sentinel used to invalidate the back buffer: differs from any real cell.
    pub const INVALID: Cell = Cell {
        ch: '\0',
        fg: Rgb::new(255, 0, 255),
        bg: Rgb::new(255, 0, 255),
    };

    pub const fn new(ch: char, fg: Rgb, bg: Rgb) -> Self {
        Cell { ch, fg, bg }
    }

    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

pub struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn invalidate(&mut self) {
        self.cells.fill(Cell::INVALID);
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            Some(&mut self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Write `s` at (x, y), one column per char, clipped at the right edge.
    /// Returns the column after the last char written.
    pub fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Rgb, bg: Rgb) -> usize {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell::new(ch, fg, bg));
            cx += 1;
        }
        cx
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, cell: Cell) {
        for yy in y..(y + h).min(self.height) {
            for xx in x..(x + w).min(self.width) {
                self.cells[yy * self.width + xx] = cell;
            }
        }
    }
}
