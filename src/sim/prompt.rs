/// Main menu prompt.

use crate::domain::input::InputEvent;
use crate::sim::command::{normalize, Game, PromptCommand, GAME_LIST};
use crate::sim::screen::{read_console, ConsoleInput, Ctx, ScreenId, Transition};

pub const HELP_TEXT: &str = "CMDS: HELP, STATUS, GAMES, PLAY <NAME>, CLEAR, EXIT";
pub const STATUS_TEXT: &str = "SYS STATUS: NOMINAL  NET: ONLINE  TEMP: 32C";
const UNKNOWN_TEXT: &str = "UNKNOWN COMMAND. TYPE HELP.";

#[derive(Clone, Debug, Default)]
pub struct Prompt;

impl Prompt {
    pub fn enter(ctx: &mut Ctx) -> Self {
        ctx.reset_prompt("> ");
        ctx.term.blank_line();
        ctx.println("WOPR SYSTEM 4.0  (c) 1983");
        ctx.println("TYPE HELP FOR COMMANDS.");
        Prompt
    }

    pub fn handle_input(&mut self, ctx: &mut Ctx, event: &InputEvent) -> Transition {
        match read_console(ctx, event) {
            ConsoleInput::Escape => Transition::Quit,
            ConsoleInput::Line(line) => {
                ctx.term.echo(&normalize(&line));
                self.route(ctx, PromptCommand::parse(&line))
            }
            ConsoleInput::Nothing => Transition::Stay,
        }
    }

    fn route(&mut self, ctx: &mut Ctx, cmd: PromptCommand) -> Transition {
        tracing::debug!(?cmd, "prompt command");
        match cmd {
            PromptCommand::Empty => {}
            PromptCommand::Help => ctx.println(HELP_TEXT),
            PromptCommand::Status => ctx.println(STATUS_TEXT),
            PromptCommand::Games => {
                for game in GAME_LIST {
                    ctx.println(*game);
                }
            }
            PromptCommand::Clear => ctx.term.clear(),
            PromptCommand::Exit => return Transition::Quit,
            PromptCommand::Play(game) => {
                return Transition::Switch(match game {
                    Game::Chess => ScreenId::Chess,
                    Game::GlobalThermonuclearWar => ScreenId::War,
                    Game::TicTacToe => ScreenId::TicTacToe,
                });
            }
            PromptCommand::PlayUnknown(name) => {
                let shown = if name.is_empty() { "(NONE)" } else { name.as_str() };
                ctx.println(format!("{shown}: (demo not implemented)"));
            }
            PromptCommand::Unknown(_) => ctx.println(UNKNOWN_TEXT),
        }
        Transition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::input::Key;
    use crate::domain::terminal::TerminalModel;
    use crate::sim::event::FrameEvent;

    fn run(term: &mut TerminalModel, text: &str) -> Transition {
        let mut events: Vec<FrameEvent> = Vec::new();
        let mut ctx = Ctx { term, events: &mut events, prompt_default: "LOGON> ", viewport: (80, 24) };
        let mut p = Prompt;
        p.handle_input(&mut ctx, &InputEvent::Text(text.into()));
        p.handle_input(&mut ctx, &InputEvent::Key(Key::Enter))
    }

    fn entered() -> TerminalModel {
        let mut term = TerminalModel::new("> ", 500);
        let mut events = Vec::new();
        Prompt::enter(&mut Ctx { term: &mut term, events: &mut events, prompt_default: "LOGON> ", viewport: (80, 24) });
        term
    }

    #[test]
    fn enter_sets_prompt_and_banner() {
        let term = entered();
        assert_eq!(term.prompt(), "> ");
        assert_eq!(term.last_line(), Some("TYPE HELP FOR COMMANDS."));
    }

    #[test]
    fn help_adds_exactly_one_line() {
        let mut term = entered();
        let before = term.line_count();
        assert_eq!(run(&mut term, "help"), Transition::Stay);
        assert_eq!(term.line_count(), before + 1);
        assert_eq!(term.last_line(), Some(HELP_TEXT));
    }

    #[test]
    fn status_and_games() {
        let mut term = entered();
        run(&mut term, "STATUS");
        assert_eq!(term.last_line(), Some(STATUS_TEXT));
        let before = term.line_count();
        run(&mut term, "games");
        assert_eq!(term.line_count(), before + GAME_LIST.len());
        assert_eq!(term.last_line(), Some("GLOBAL THERMONUCLEAR WAR"));
    }

    #[test]
    fn clear_empties_scrollback() {
        let mut term = entered();
        assert_eq!(run(&mut term, "clear"), Transition::Stay);
        assert_eq!(term.line_count(), 0);
    }

    #[test]
    fn exit_quits() {
        let mut term = entered();
        assert_eq!(run(&mut term, " exit "), Transition::Quit);
    }

    #[test]
    fn play_switches_screens() {
        let mut term = entered();
        assert_eq!(run(&mut term, "play chess"), Transition::Switch(ScreenId::Chess));
        assert_eq!(
            run(&mut term, "PLAY GLOBAL THERMONUCLEAR WAR"),
            Transition::Switch(ScreenId::War)
        );
        assert_eq!(run(&mut term, "play tic-tac-toe"), Transition::Switch(ScreenId::TicTacToe));
    }

    #[test]
    fn play_unknown_is_not_implemented() {
        let mut term = entered();
        run(&mut term, "play poker");
        assert_eq!(term.last_line(), Some("POKER: (demo not implemented)"));
        run(&mut term, "play");
        assert_eq!(term.last_line(), Some("(NONE): (demo not implemented)"));
    }

    #[test]
    fn unknown_and_empty() {
        let mut term = entered();
        run(&mut term, "hack");
        assert_eq!(term.last_line(), Some(UNKNOWN_TEXT));
        let before = term.line_count();
        run(&mut term, "   ");
        assert_eq!(term.line_count(), before);
    }

    #[test]
    fn local_echo_copies_command() {
        let mut term = entered().with_local_echo(true);
        run(&mut term, "status");
        let tail: Vec<&str> = term.visible_lines(2).collect();
        assert_eq!(tail, vec!["> STATUS", STATUS_TEXT]);
    }
}
