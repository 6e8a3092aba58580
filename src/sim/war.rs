/// Global Thermonuclear War: a scripted countdown.
///
/// DEFCON starts at 5 and drops one level every `DEFCON_STEP_SECS` of
/// simulated time. Reaching 1 ends the simulation and returns to the prompt.
/// Input only picks a side or leaves early.

use crate::domain::input::InputEvent;
use crate::sim::command::normalize;
use crate::sim::event::FrameEvent;
use crate::sim::screen::{read_console, ConsoleInput, Ctx, ScreenId, Transition};

pub const DEFCON_START: u8 = 5;
pub const DEFCON_STEP_SECS: f64 = 6.0;

const SIDES: &[&str] = &["USA", "USSR"];

/// DEFCON level after `elapsed` seconds: `max(1, 5 - floor(elapsed / 6))`.
pub fn defcon_at(elapsed: f64) -> u8 {
    let steps = (elapsed.max(0.0) / DEFCON_STEP_SECS).floor();
    if steps >= (DEFCON_START - 1) as f64 {
        1
    } else {
        DEFCON_START - steps as u8
    }
}

#[derive(Clone, Debug)]
pub struct War {
    elapsed: f64,
    defcon: u8,
    side: Option<&'static str>,
}

impl War {
    pub fn enter(ctx: &mut Ctx) -> Self {
        ctx.reset_prompt("GTW> ");
        ctx.println("SELECT SIDE: USA / USSR");
        ctx.println("HINT: TYPE 'USA' OR 'USSR'");
        War { elapsed: 0.0, defcon: DEFCON_START, side: None }
    }

    pub fn defcon(&self) -> u8 {
        self.defcon
    }

    pub fn handle_input(&mut self, ctx: &mut Ctx, event: &InputEvent) -> Transition {
        let line = match read_console(ctx, event) {
            ConsoleInput::Escape => return Transition::Switch(ScreenId::Prompt),
            ConsoleInput::Line(line) => line,
            ConsoleInput::Nothing => return Transition::Stay,
        };

        let cmd = normalize(&line);
        ctx.term.echo(&cmd);
        if cmd == "EXIT" {
            return Transition::Switch(ScreenId::Prompt);
        }
        if let Some(side) = SIDES.iter().copied().find(|s| *s == cmd) {
            self.side = Some(side);
            ctx.println(format!("SIDE CONFIRMED: {side}"));
            ctx.println("INITIALIZING STRATEGIC MODEL...");
            ctx.emit(FrameEvent::SideChosen(side));
        } else if !cmd.is_empty() {
            ctx.println("ACK.");
        }
        Transition::Stay
    }

    pub fn update(&mut self, ctx: &mut Ctx, dt: f64) -> Transition {
        if dt > 0.0 {
            self.elapsed += dt;
        }

        // One line per level, even when a long frame skips several.
        let target = defcon_at(self.elapsed);
        while self.defcon > target {
            self.defcon -= 1;
            ctx.println(format!("DEFCON STATUS: {}", self.defcon));
            ctx.emit(FrameEvent::DefconChanged(self.defcon));
        }

        if self.defcon == 1 {
            ctx.println("SIMULATION COMPLETE.");
            ctx.println("A STRANGE GAME. THE ONLY WINNING MOVE IS NOT TO PLAY.");
            ctx.emit(FrameEvent::SimulationComplete);
            return Transition::Switch(ScreenId::Prompt);
        }
        Transition::Stay
    }
}
