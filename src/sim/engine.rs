/// Engine: owns the terminal model, the single active screen and the
/// running flag.
///
/// Per frame the caller feeds the frame's input events in order, then
/// advances time once, then drains the frame events and draws.
/// The terminal model is shared by every screen; a screen that wants a
/// fresh view clears it on entry.

use crate::config::TerminalConfig;
use crate::domain::input::InputEvent;
use crate::domain::terminal::TerminalModel;
use crate::sim::event::FrameEvent;
use crate::sim::screen::{Ctx, Screen, ScreenId, Transition};

pub struct Engine {
    term: TerminalModel,
    screen: Screen,
    running: bool,
    prompt_default: String,
    viewport: (u16, u16),
    events: Vec<FrameEvent>,
}

impl Engine {
    pub fn new(config: &TerminalConfig, viewport: (u16, u16), start: ScreenId) -> Self {
        let mut term = TerminalModel::new(&config.prompt_default, config.scrollback_limit)
            .with_local_echo(config.local_echo);
        let mut events = Vec::with_capacity(16);
        let screen = {
            let mut ctx = Ctx {
                term: &mut term,
                events: &mut events,
                prompt_default: &config.prompt_default,
                viewport,
            };
            Screen::enter(start, &mut ctx)
        };
        tracing::info!(screen = ?start, "engine started");

        Engine {
            term,
            screen,
            running: true,
            prompt_default: config.prompt_default.clone(),
            viewport,
            events,
        }
    }

    /// Borrow the active screen and a context over the rest of the engine.
    fn parts(&mut self) -> (&mut Screen, Ctx<'_>) {
        (
            &mut self.screen,
            Ctx {
                term: &mut self.term,
                events: &mut self.events,
                prompt_default: &self.prompt_default,
                viewport: self.viewport,
            },
        )
    }

    /// Replace the active screen and run its entry actions.
    pub fn set_screen(&mut self, id: ScreenId) {
        let from = self.screen.id();
        let (_, mut ctx) = self.parts();
        let next = Screen::enter(id, &mut ctx);
        self.screen = next;
        tracing::info!(?from, to = ?id, "screen transition");
    }

    pub fn quit(&mut self) {
        if self.running {
            tracing::info!(screen = ?self.screen.id(), "quit requested");
        }
        self.running = false;
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Switch(id) => self.set_screen(id),
            Transition::Quit => self.quit(),
        }
    }

    /// Deliver the frame's events in order. Events after a screen switch go
    /// to the new screen; events after a quit are dropped.
    pub fn handle_events(&mut self, events: &[InputEvent]) {
        for event in events {
            if !self.running {
                break;
            }
            if let InputEvent::Resize { width, height } = event {
                self.viewport = (*width, *height);
            }
            let (screen, mut ctx) = self.parts();
            let transition = screen.handle_input(&mut ctx, event);
            self.apply(transition);
        }
    }

    /// Advance the cursor blink and the active screen's timers.
    pub fn update(&mut self, dt: f64) {
        if !self.running {
            return;
        }
        self.term.tick(dt);
        let (screen, mut ctx) = self.parts();
        let transition = screen.update(&mut ctx, dt);
        self.apply(transition);
    }

    pub fn take_events(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn terminal(&self) -> &TerminalModel {
        &self.term
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }
}
