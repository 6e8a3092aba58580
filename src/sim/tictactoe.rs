/// Tic-tac-toe: board in the top three quarters, console in the bottom one.
///
/// The console is display-only here; typed text is not collected.
/// The layout is recomputed on every resize.

use crate::domain::board::Board;
use crate::domain::input::{InputEvent, Key};
use crate::domain::layout::Layout;
use crate::sim::event::FrameEvent;
use crate::sim::screen::{Ctx, ScreenId, Transition};

#[derive(Clone, Debug)]
pub struct TicTacToe {
    board: Board,
    layout: Layout,
}

impl TicTacToe {
    pub fn enter(ctx: &mut Ctx) -> Self {
        ctx.term.clear();
        ctx.reset_prompt("TIC-TAC-TOE> ");
        ctx.println("ARROWS/WASD=MOVE  ENTER/SPACE=PLACE  ESC=BACK");
        let (w, h) = ctx.viewport;
        TicTacToe { board: Board::new(), layout: Layout::compute(w, h) }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn handle_input(&mut self, ctx: &mut Ctx, event: &InputEvent) -> Transition {
        match event {
            InputEvent::Resize { width, height } => {
                self.layout = Layout::compute(*width, *height);
                Transition::Stay
            }
            InputEvent::Key(Key::Escape) => Transition::Switch(ScreenId::Prompt),
            InputEvent::Key(key) => {
                if let Some(dir) = key.as_move() {
                    self.board.move_cursor(dir);
                } else if key.is_confirm() {
                    self.place(ctx);
                }
                Transition::Stay
            }
            InputEvent::Text(_) | InputEvent::Quit => Transition::Stay,
        }
    }

    fn place(&mut self, ctx: &mut Ctx) {
        let (row, col) = self.board.cursor();
        match self.board.place() {
            Some(mark) => {
                ctx.emit(FrameEvent::MarkPlaced { mark, row, col });
                if self.board.is_full() {
                    ctx.println("BOARD FULL. ESC TO RETURN.");
                }
            }
            None => ctx.emit(FrameEvent::CellOccupied),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::Mark;
    use crate::domain::terminal::TerminalModel;

    struct Rig {
        term: TerminalModel,
        events: Vec<FrameEvent>,
    }

    impl Rig {
        fn new() -> Self {
            let mut term = TerminalModel::new("> ", 100);
            term.append_line("OLD OUTPUT");
            Rig { term, events: Vec::new() }
        }

        fn ctx(&mut self) -> Ctx<'_> {
            Ctx { term: &mut self.term, events: &mut self.events, prompt_default: "> ", viewport: (80, 24) }
        }
    }

    fn key(game: &mut TicTacToe, rig: &mut Rig, k: Key) -> Transition {
        game.handle_input(&mut rig.ctx(), &InputEvent::Key(k))
    }

    #[test]
    fn enter_starts_with_clean_console() {
        let mut rig = Rig::new();
        let game = TicTacToe::enter(&mut rig.ctx());
        assert_eq!(rig.term.line_count(), 1);
        assert_eq!(rig.term.prompt(), "TIC-TAC-TOE> ");
        assert_eq!(game.layout(), &Layout::compute(80, 24));
    }

    #[test]
    fn arrows_and_wasd_move_selection() {
        let mut rig = Rig::new();
        let mut game = TicTacToe::enter(&mut rig.ctx());
        key(&mut game, &mut rig, Key::Up);
        key(&mut game, &mut rig, Key::Char('a'));
        assert_eq!(game.board().cursor(), (0, 0));
        key(&mut game, &mut rig, Key::Char('s'));
        key(&mut game, &mut rig, Key::Right);
        assert_eq!(game.board().cursor(), (1, 1));
    }

    #[test]
    fn occupied_cell_is_left_alone() {
        let mut rig = Rig::new();
        let mut game = TicTacToe::enter(&mut rig.ctx());
        key(&mut game, &mut rig, Key::Enter);
        assert_eq!(game.board().at(1, 1), Some(Mark::X));
        assert_eq!(game.board().turn(), Mark::O);

        let before = game.board().clone();
        key(&mut game, &mut rig, Key::Space);
        assert_eq!(game.board(), &before);
        assert_eq!(game.board().turn(), Mark::O);
        assert_eq!(rig.events.last(), Some(&FrameEvent::CellOccupied));
    }

    #[test]
    fn typed_text_is_ignored() {
        let mut rig = Rig::new();
        let mut game = TicTacToe::enter(&mut rig.ctx());
        game.handle_input(&mut rig.ctx(), &InputEvent::Text("w".into()));
        assert_eq!(rig.term.input(), "");
    }

    #[test]
    fn resize_recomputes_layout() {
        let mut rig = Rig::new();
        let mut game = TicTacToe::enter(&mut rig.ctx());
        game.handle_input(&mut rig.ctx(), &InputEvent::Resize { width: 120, height: 40 });
        assert_eq!(game.layout(), &Layout::compute(120, 40));
    }

    #[test]
    fn escape_returns_to_prompt() {
        let mut rig = Rig::new();
        let mut game = TicTacToe::enter(&mut rig.ctx());
        assert_eq!(key(&mut game, &mut rig, Key::Escape), Transition::Switch(ScreenId::Prompt));
    }

    #[test]
    fn full_board_is_announced() {
        let mut rig = Rig::new();
        let mut game = TicTacToe::enter(&mut rig.ctx());
        for _ in 0..2 {
            key(&mut game, &mut rig, Key::Up);
            key(&mut game, &mut rig, Key::Left);
        }
        for r in 0..3 {
            for c in 0..3 {
                key(&mut game, &mut rig, Key::Enter);
                if c < 2 {
                    key(&mut game, &mut rig, if r % 2 == 0 { Key::Right } else { Key::Left });
                }
            }
            key(&mut game, &mut rig, Key::Down);
        }
        assert!(game.board().is_full());
        assert_eq!(rig.term.last_line(), Some("BOARD FULL. ESC TO RETURN."));
    }
}
