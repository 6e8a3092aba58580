/// Screen state machine: the closed set of modes the console can be in.
///
/// Exactly one screen is active. A screen reacts to input and time, and
/// asks the engine for a change by returning a `Transition`. There is no
/// history stack; "back" edges are hard-coded as transitions to `Prompt`.

use crate::domain::input::{InputEvent, Key};
use crate::domain::terminal::TerminalModel;
use crate::sim::chess::Chess;
use crate::sim::event::FrameEvent;
use crate::sim::login::Login;
use crate::sim::prompt::Prompt;
use crate::sim::tictactoe::TicTacToe;
use crate::sim::war::War;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScreenId {
    Login,
    Prompt,
    Chess,
    War,
    TicTacToe,
}

impl ScreenId {
    /// Names accepted by `--screen`.
    pub fn from_name(name: &str) -> Option<ScreenId> {
        match name.to_ascii_lowercase().as_str() {
            "login" => Some(ScreenId::Login),
            "prompt" | "menu" => Some(ScreenId::Prompt),
            "chess" => Some(ScreenId::Chess),
            "war" | "gtw" => Some(ScreenId::War),
            "tictactoe" | "tic-tac-toe" => Some(ScreenId::TicTacToe),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Transition {
    Stay,
    Switch(ScreenId),
    Quit,
}

/// What a screen gets to touch while handling input or time.
pub struct Ctx<'a> {
    pub term: &'a mut TerminalModel,
    pub events: &'a mut Vec<FrameEvent>,
    pub prompt_default: &'a str,
    pub viewport: (u16, u16),
}

impl Ctx<'_> {
    pub fn println(&mut self, text: impl Into<String>) {
        self.term.append_line(text);
    }

    pub fn emit(&mut self, event: FrameEvent) {
        self.events.push(event);
    }

    /// Set a screen's prompt label and start with an unmasked input line.
    pub fn reset_prompt(&mut self, prompt: &str) {
        self.term.set_prompt(prompt);
        self.term.set_masked(false);
    }
}

/// Outcome of feeding one event to a console-style screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Enter was pressed; the captured line.
    Line(String),
    Escape,
    Nothing,
}

/// Shared input path for screens whose only UI is the console.
pub fn read_console(ctx: &mut Ctx, event: &InputEvent) -> ConsoleInput {
    match event {
        InputEvent::Text(text) => {
            ctx.term.insert_text(text);
            ctx.emit(FrameEvent::KeyClick);
            ConsoleInput::Nothing
        }
        InputEvent::Key(Key::Escape) => ConsoleInput::Escape,
        InputEvent::Key(key) => match ctx.term.handle_key(*key) {
            Some(line) => {
                ctx.emit(FrameEvent::LineSubmitted);
                ConsoleInput::Line(line)
            }
            None => ConsoleInput::Nothing,
        },
        InputEvent::Quit | InputEvent::Resize { .. } => ConsoleInput::Nothing,
    }
}

#[derive(Clone, Debug)]
pub enum Screen {
    Login(Login),
    Prompt(Prompt),
    Chess(Chess),
    War(War),
    TicTacToe(TicTacToe),
}

impl Screen {
    /// Build a screen and run its entry actions.
    pub fn enter(id: ScreenId, ctx: &mut Ctx) -> Screen {
        let screen = match id {
            ScreenId::Login => Screen::Login(Login::enter(ctx)),
            ScreenId::Prompt => Screen::Prompt(Prompt::enter(ctx)),
            ScreenId::Chess => Screen::Chess(Chess::enter(ctx)),
            ScreenId::War => Screen::War(War::enter(ctx)),
            ScreenId::TicTacToe => Screen::TicTacToe(TicTacToe::enter(ctx)),
        };
        ctx.emit(FrameEvent::ScreenEntered(id));
        screen
    }

    pub fn id(&self) -> ScreenId {
        match self {
            Screen::Login(_) => ScreenId::Login,
            Screen::Prompt(_) => ScreenId::Prompt,
            Screen::Chess(_) => ScreenId::Chess,
            Screen::War(_) => ScreenId::War,
            Screen::TicTacToe(_) => ScreenId::TicTacToe,
        }
    }

    pub fn handle_input(&mut self, ctx: &mut Ctx, event: &InputEvent) -> Transition {
        if *event == InputEvent::Quit {
            return Transition::Quit;
        }
        match self {
            Screen::Login(s) => s.handle_input(ctx, event),
            Screen::Prompt(s) => s.handle_input(ctx, event),
            Screen::Chess(s) => s.handle_input(ctx, event),
            Screen::War(s) => s.handle_input(ctx, event),
            Screen::TicTacToe(s) => s.handle_input(ctx, event),
        }
    }

    /// Advance screen-local timers. Only the war simulation has any.
    pub fn update(&mut self, ctx: &mut Ctx, dt: f64) -> Transition {
        match self {
            Screen::War(s) => s.update(ctx, dt),
            Screen::Login(_) | Screen::Prompt(_) | Screen::Chess(_) | Screen::TicTacToe(_) => {
                Transition::Stay
            }
        }
    }
}
