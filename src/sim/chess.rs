/// Chess stub: recognizes the command set and answers with canned text.
/// There is no engine behind it.

use crate::domain::input::InputEvent;
use crate::sim::command::{normalize, strip_verb};
use crate::sim::screen::{read_console, ConsoleInput, Ctx, ScreenId, Transition};

const STARTING_POSITION: &[&str] = &[
    "  A B C D E F G H",
    "8 r n b q k b n r",
    "7 p p p p p p p p",
    "6 . . . . . . . .",
    "5 . . . . . . . .",
    "4 . . . . . . . .",
    "3 . . . . . . . .",
    "2 P P P P P P P P",
    "1 R N B Q K B N R",
];

#[derive(Clone, Debug, Default)]
pub struct Chess;

impl Chess {
    pub fn enter(ctx: &mut Ctx) -> Self {
        ctx.reset_prompt("CHESS> ");
        ctx.println("CHESS MODE READY.");
        ctx.println("CMDS: BOARD, MOVE <...>, UNDO, RESET, EXIT (back)");
        Chess
    }

    pub fn handle_input(&mut self, ctx: &mut Ctx, event: &InputEvent) -> Transition {
        match read_console(ctx, event) {
            ConsoleInput::Escape => Transition::Switch(ScreenId::Prompt),
            ConsoleInput::Line(line) => {
                let cmd = normalize(&line);
                ctx.term.echo(&cmd);
                self.route(ctx, &cmd)
            }
            ConsoleInput::Nothing => Transition::Stay,
        }
    }

    fn route(&mut self, ctx: &mut Ctx, cmd: &str) -> Transition {
        match cmd {
            "" => {}
            "EXIT" => return Transition::Switch(ScreenId::Prompt),
            "BOARD" => {
                for row in STARTING_POSITION {
                    ctx.println(*row);
                }
            }
            "RESET" => ctx.println("NEW GAME."),
            "UNDO" => ctx.println("TAKEN BACK."),
            _ if strip_verb(cmd, "MOVE").is_some() => ctx.println("OK."),
            _ => ctx.println("UNKNOWN CHESS CMD."),
        }
        Transition::Stay
    }
}
