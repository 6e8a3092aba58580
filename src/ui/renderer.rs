/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Compose the next frame into `front` (console, board, indicators)
///   2. Run the CRT passes over `front`
///   3. Compare each cell with `back` (previous frame)
///   4. Only emit terminal commands for cells that changed, batched with `queue!`
///   5. Swap front/back

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::config::DisplayConfig;
use crate::domain::board::{Board, Mark, SIZE};
use crate::domain::layout::{Layout, Rect};
use crate::domain::terminal::TerminalModel;
use crate::sim::engine::Engine;
use crate::sim::screen::{Screen, ScreenId};
use crate::ui::effects::Effects;
use crate::ui::frame::{Cell, FrameBuffer, Rgb, BASE_BG, GREEN};

const CURSOR_GLYPH: char = '█';

const BOARD_BG: Rgb = Rgb::new(30, 50, 90);
const TERM_BG: Rgb = Rgb::new(20, 20, 20);
const SEP_FG: Rgb = Rgb::new(90, 90, 90);
const GRID_FG: Rgb = Rgb::new(230, 230, 230);
const SELECT_FG: Rgb = Rgb::new(90, 180, 250);
const X_FG: Rgb = Rgb::new(220, 80, 80);
const O_FG: Rgb = Rgb::new(80, 200, 220);

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

/// Blank space kept around the console text, in cells.
#[derive(Clone, Copy, Debug, Default)]
struct Margins {
    top: usize,
    bottom: usize,
    left: usize,
}

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    effects: Effects,
    margins: Margins,
    last_screen: Option<ScreenId>,
}

impl Renderer {
    pub fn new(cfg: &DisplayConfig) -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            effects: Effects::new(cfg),
            margins: Margins {
                top: cfg.margin_top as usize,
                bottom: cfg.margin_bottom as usize,
                left: cfg.margin_left as usize,
            },
            last_screen: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            crossterm::event::EnableBracketedPaste,
            cursor::Hide,
            SetBackgroundColor(to_color(BASE_BG)),
            Clear(ClearType::All)
        )?;
        // Force full repaint on first frame.
        self.back.invalidate();
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            crossterm::event::DisableBracketedPaste,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, engine: &Engine) -> io::Result<()> {
        let (vw, vh) = engine.viewport();
        let (w, h) = (vw as usize, vh as usize);
        let resized = w != self.front.width() || h != self.front.height();
        let switched = self.last_screen != Some(engine.screen().id());
        if resized || switched {
            self.front.resize(w, h);
            self.back.resize(w, h);
            self.back.invalidate();
            queue!(self.writer, SetBackgroundColor(to_color(BASE_BG)), Clear(ClearType::All))?;
            self.last_screen = Some(engine.screen().id());
        }

        self.compose(engine);
        self.effects.apply(&mut self.front);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    fn compose(&mut self, engine: &Engine) {
        self.front.clear();
        let (w, h) = (self.front.width() as u16, self.front.height() as u16);
        match engine.screen() {
            Screen::TicTacToe(game) => {
                compose_split(&mut self.front, engine.terminal(), game.layout(), game.board());
            }
            Screen::War(war) => {
                compose_console(&mut self.front, engine.terminal(), Rect::new(0, 0, w, h), self.margins, BASE_BG);
                compose_defcon(&mut self.front, war.defcon(), self.margins);
            }
            Screen::Login(_) | Screen::Prompt(_) | Screen::Chess(_) => {
                compose_console(&mut self.front, engine.terminal(), Rect::new(0, 0, w, h), self.margins, BASE_BG);
            }
        }
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = GREEN;
        let mut last_bg = BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(
            self.writer,
            SetForegroundColor(to_color(last_fg)),
            SetBackgroundColor(to_color(last_bg)),
        )?;

        for y in 0..self.front.height() {
            for x in 0..self.front.width() {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(to_color(cell.fg)))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(to_color(cell.bg)))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }
}

// ── Compose: build front buffer content ──

/// Scrollback, then the prompt row directly under it, then the cursor.
fn compose_console(fb: &mut FrameBuffer, term: &TerminalModel, area: Rect, m: Margins, bg: Rgb) {
    fb.fill_rect(area.x as usize, area.y as usize, area.w as usize, area.h as usize, Cell::new(' ', GREEN, bg));

    let x0 = area.x as usize + m.left;
    let right = area.right() as usize;
    let usable = (area.h as usize).saturating_sub(m.top + m.bottom);
    if usable == 0 || x0 >= right {
        return;
    }

    let mut y = area.y as usize + m.top;
    for line in term.visible_lines(usable - 1) {
        fb.put_str(x0, y, &clip(line, right - x0), GREEN, bg);
        y += 1;
    }

    // Long input scrolls: keep the tail and one column for the cursor.
    let line: Vec<char> = format!("{}{}", term.prompt(), term.display_input()).chars().collect();
    let room = (right - x0).saturating_sub(1);
    let tail: String = line[line.len().saturating_sub(room)..].iter().collect();
    let end = fb.put_str(x0, y, &tail, GREEN, bg);
    if term.cursor_visible() && end < right {
        fb.set(end, y, Cell::new(CURSOR_GLYPH, GREEN, bg));
    }
}

fn clip(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

/// Board over the top three quarters, separator, console below.
fn compose_split(fb: &mut FrameBuffer, term: &TerminalModel, layout: &Layout, board: &Board) {
    let top = layout.top;
    fb.fill_rect(top.x as usize, top.y as usize, top.w as usize, top.h as usize, Cell::new(' ', GRID_FG, BOARD_BG));

    compose_grid(fb, layout);
    compose_selection(fb, layout, board.cursor());
    for row in 0..SIZE {
        for col in 0..SIZE {
            if let Some(mark) = board.at(row, col) {
                compose_mark(fb, interior(layout.cell(row, col)).inset(1, 0), mark);
            }
        }
    }

    let turn = format!("TURN: {}", board.turn().glyph());
    fb.put_str(top.x as usize + 1, top.y as usize, &turn, GRID_FG, BOARD_BG);

    let t = layout.term;
    if t.h == 0 {
        return;
    }
    for x in t.x..t.right() {
        fb.set(x as usize, t.y as usize, Cell::new('─', SEP_FG, TERM_BG));
    }
    let console = Rect::new(t.x, t.y + 1, t.w, t.h - 1);
    let m = Margins { top: 0, bottom: 0, left: 1 };
    compose_console(fb, term, console, m, TERM_BG);
}

/// Cell area without its top/left grid line.
fn interior(cell: Rect) -> Rect {
    Rect::new(cell.x + 1, cell.y + 1, cell.w.saturating_sub(1), cell.h.saturating_sub(1))
}

fn compose_grid(fb: &mut FrameBuffer, layout: &Layout) {
    let b = layout.board;
    let lines_x: Vec<u16> = (1..SIZE).map(|c| layout.cell(0, c).x).collect();
    let lines_y: Vec<u16> = (1..SIZE).map(|r| layout.cell(r, 0).y).collect();
    for &x in &lines_x {
        for y in b.y..b.bottom() {
            fb.set(x as usize, y as usize, Cell::new('│', GRID_FG, BOARD_BG));
        }
    }
    for &y in &lines_y {
        for x in b.x..b.right() {
            let ch = if lines_x.contains(&x) { '┼' } else { '─' };
            fb.set(x as usize, y as usize, Cell::new(ch, GRID_FG, BOARD_BG));
        }
    }
}

fn compose_selection(fb: &mut FrameBuffer, layout: &Layout, (row, col): (usize, usize)) {
    let r = interior(layout.cell(row, col));
    if r.w < 2 || r.h < 2 {
        fb.fill_rect(r.x as usize, r.y as usize, r.w as usize, r.h as usize, Cell::new(' ', SELECT_FG, SELECT_FG));
        return;
    }
    let (x0, y0) = (r.x as usize, r.y as usize);
    let (x1, y1) = (r.right() as usize - 1, r.bottom() as usize - 1);
    let edge = |ch| Cell::new(ch, SELECT_FG, BOARD_BG);
    for x in x0 + 1..x1 {
        fb.set(x, y0, edge('─'));
        fb.set(x, y1, edge('─'));
    }
    for y in y0 + 1..y1 {
        fb.set(x0, y, edge('│'));
        fb.set(x1, y, edge('│'));
    }
    fb.set(x0, y0, edge('┌'));
    fb.set(x1, y0, edge('┐'));
    fb.set(x0, y1, edge('└'));
    fb.set(x1, y1, edge('┘'));
}

/// X as two diagonals, O as a ring, drawn with block glyphs inside `area`.
fn compose_mark(fb: &mut FrameBuffer, area: Rect, mark: Mark) {
    let fg = match mark {
        Mark::X => X_FG,
        Mark::O => O_FG,
    };
    let inner = area.inset(1, 1);
    let (w, h) = (inner.w as usize, inner.h as usize);
    let (x0, y0) = (inner.x as usize, inner.y as usize);
    let block = Cell::new('█', fg, BOARD_BG);

    if w < 3 || h < 2 {
        let (cx, cy) = area.center();
        fb.set(cx as usize, cy as usize, Cell::new(mark.glyph(), fg, BOARD_BG));
        return;
    }

    match mark {
        Mark::X => {
            for i in 0..h {
                let dx = (i * (w - 2) + (h - 1) / 2) / (h - 1);
                fb.set(x0 + dx, y0 + i, block);
                fb.set(x0 + dx + 1, y0 + i, block);
                fb.set(x0 + w - 2 - dx, y0 + i, block);
                fb.set(x0 + w - 1 - dx, y0 + i, block);
            }
        }
        Mark::O => {
            let thick = (2.0 / h as f32).max(4.0 / w as f32).max(0.25);
            for y in 0..h {
                for x in 0..w {
                    let u = (x as f32 + 0.5) / w as f32 * 2.0 - 1.0;
                    let v = (y as f32 + 0.5) / h as f32 * 2.0 - 1.0;
                    let d = u.hypot(v);
                    if d <= 1.0 && d >= 1.0 - thick {
                        fb.set(x0 + x, y0 + y, block);
                    }
                }
            }
        }
    }
}

/// Drawn in the top margin; with no top margin there is no free row.
fn compose_defcon(fb: &mut FrameBuffer, level: u8, m: Margins) {
    if m.top == 0 {
        return;
    }
    let fg = match level {
        5 => GREEN,
        4 => Rgb::new(120, 220, 80),
        3 => Rgb::new(230, 210, 60),
        2 => Rgb::new(240, 140, 40),
        _ => Rgb::new(240, 50, 50),
    };
    let label = format!("DEFCON {level}");
    let x = fb.width().saturating_sub(label.chars().count() + m.left);
    fb.put_str(x, m.top - 1, &label, fg, BASE_BG);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::input::{InputEvent, Key};

    fn plain() -> DisplayConfig {
        let mut cfg = AppConfig::default().display;
        cfg.use_glow = false;
        cfg.use_scanlines = false;
        cfg.use_vignette = false;
        cfg
    }

    fn engine_at(id: ScreenId, size: (u16, u16)) -> Engine {
        Engine::new(&AppConfig::default().terminal, size, id)
    }

    fn composed(engine: &Engine) -> Renderer {
        let mut r = Renderer::new(&plain());
        let (w, h) = engine.viewport();
        r.front.resize(w as usize, h as usize);
        r.compose(engine);
        r
    }

    fn row_text(fb: &FrameBuffer, y: usize) -> String {
        (0..fb.width()).map(|x| fb.get(x, y).ch).collect::<String>().trim_end().to_string()
    }

    #[test]
    fn console_prompt_follows_scrollback() {
        let engine = engine_at(ScreenId::Login, (40, 10));
        let r = composed(&engine);
        assert_eq!(row_text(&r.front, 1), "  REMOTE TERMINAL ACCESS");
        assert_eq!(row_text(&r.front, 3), "  LOGON> █");
    }

    #[test]
    fn console_shows_most_recent_lines() {
        let mut engine = engine_at(ScreenId::Prompt, (40, 6));
        for _ in 0..5 {
            engine.handle_events(&[InputEvent::Text("help".into()), InputEvent::Key(Key::Enter)]);
        }
        let r = composed(&engine);
        // 6 rows - 1 top - 1 bottom = 4 usable, 3 for history
        assert!(row_text(&r.front, 1).starts_with("  CMDS:"));
        assert!(row_text(&r.front, 3).starts_with("  CMDS:"));
        assert!(row_text(&r.front, 4).starts_with("  > "));
    }

    #[test]
    fn long_input_keeps_tail_visible() {
        let mut engine = engine_at(ScreenId::Prompt, (12, 6));
        engine.handle_events(&[InputEvent::Text("abcdefghijklmnop".into())]);
        let r = composed(&engine);
        let prompt_row = (0..6).map(|y| row_text(&r.front, y)).find(|l| l.contains('p')).unwrap();
        assert!(prompt_row.ends_with("jklmnop█"));
        assert_eq!(prompt_row.chars().count(), 12);
    }

    #[test]
    fn password_is_masked() {
        let mut engine = engine_at(ScreenId::Login, (40, 10));
        engine.handle_events(&[InputEvent::Text("joshua".into()), InputEvent::Key(Key::Enter)]);
        engine.handle_events(&[InputEvent::Text("abc".into())]);
        let r = composed(&engine);
        let rows: Vec<String> = (0..10).map(|y| row_text(&r.front, y)).collect();
        assert!(rows.iter().any(|l| l == "  PASSWORD> ***█"));
        assert!(!rows.iter().any(|l| l.contains("abc")));
    }

    #[test]
    fn split_view_draws_board_separator_and_console() {
        let mut engine = engine_at(ScreenId::TicTacToe, (80, 24));
        engine.handle_events(&[InputEvent::Key(Key::Enter)]);
        let r = composed(&engine);
        let layout = Layout::compute(80, 24);

        assert_eq!(r.front.get(0, 1).bg, BOARD_BG);
        assert!(row_text(&r.front, 0).starts_with(" TURN: O"));
        let sep = layout.term.y as usize;
        assert!((0..80).all(|x| r.front.get(x, sep).ch == '─'));
        assert!(row_text(&r.front, sep + 1).starts_with(" ARROWS/WASD"));

        let v = layout.cell(0, 1).x as usize;
        let hline = layout.cell(1, 0).y as usize;
        assert_eq!(r.front.get(v, layout.board.y as usize).ch, '│');
        assert_eq!(r.front.get(v, hline).ch, '┼');

        let center = layout.cell(1, 1);
        let marks = (center.y..center.bottom())
            .flat_map(|y| (center.x..center.right()).map(move |x| (x, y)))
            .filter(|&(x, y)| r.front.get(x as usize, y as usize).fg == X_FG)
            .count();
        assert!(marks > 0);
        let sel = interior(center);
        assert_eq!(r.front.get(sel.x as usize, sel.y as usize).ch, '┌');
    }

    #[test]
    fn war_shows_defcon_indicator() {
        let engine = engine_at(ScreenId::War, (40, 10));
        let r = composed(&engine);
        assert!(row_text(&r.front, 0).ends_with("DEFCON 5"));
    }

    #[test]
    fn defcon_indicator_needs_a_top_margin() {
        let engine = engine_at(ScreenId::War, (40, 10));
        let mut cfg = plain();
        cfg.margin_top = 0;
        let mut r = Renderer::new(&cfg);
        r.front.resize(40, 10);
        r.compose(&engine);
        assert_eq!(row_text(&r.front, 0), "  SELECT SIDE: USA / USSR");
        assert!((0..10).all(|y| !row_text(&r.front, y).contains("DEFCON")));
    }
}
