/// Login gate. First line is the user name, second the password.
/// Both must be `joshua` (any case) to get through.

use crate::domain::input::InputEvent;
use crate::sim::event::FrameEvent;
use crate::sim::screen::{read_console, ConsoleInput, Ctx, ScreenId, Transition};

const PASSWORD_PROMPT: &str = "PASSWORD> ";
const GRANTED_USER: &str = "joshua";

fn is_granted(entry: &str) -> bool {
    entry.to_lowercase() == GRANTED_USER
}

#[derive(Clone, Debug, Default)]
pub struct Login {
    username: Option<String>,
}

impl Login {
    pub fn enter(ctx: &mut Ctx) -> Self {
        let prompt = ctx.prompt_default.to_string();
        ctx.reset_prompt(&prompt);
        ctx.println("REMOTE TERMINAL ACCESS");
        ctx.term.blank_line();
        Login { username: None }
    }

    pub fn handle_input(&mut self, ctx: &mut Ctx, event: &InputEvent) -> Transition {
        match read_console(ctx, event) {
            ConsoleInput::Escape => Transition::Quit,
            ConsoleInput::Line(line) => self.submit(ctx, line.trim()),
            ConsoleInput::Nothing => Transition::Stay,
        }
    }

    fn submit(&mut self, ctx: &mut Ctx, entry: &str) -> Transition {
        ctx.term.echo(entry);
        match self.username.take() {
            None => {
                tracing::debug!("logon user entered");
                self.username = Some(entry.to_string());
                ctx.term.set_prompt(PASSWORD_PROMPT);
                ctx.term.set_masked(true);
                Transition::Stay
            }
            Some(user) if is_granted(&user) && is_granted(entry) => {
                ctx.term.set_masked(false);
                ctx.println("ACCESS GRANTED");
                ctx.emit(FrameEvent::AccessGranted);
                Transition::Switch(ScreenId::Prompt)
            }
            Some(user) => {
                tracing::info!(user = %user, "logon denied");
                ctx.println("ACCESS DENIED");
                ctx.emit(FrameEvent::AccessDenied);
                let prompt = ctx.prompt_default.to_string();
                ctx.reset_prompt(&prompt);
                Transition::Stay
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::input::Key;
    use crate::domain::terminal::TerminalModel;

    struct Rig {
        term: TerminalModel,
        events: Vec<FrameEvent>,
    }

    impl Rig {
        fn new() -> Self {
            Rig { term: TerminalModel::new("LOGON> ", 100), events: Vec::new() }
        }

        fn ctx(&mut self) -> Ctx<'_> {
            Ctx { term: &mut self.term, events: &mut self.events, prompt_default: "LOGON> ", viewport: (80, 24) }
        }
    }

    fn submit(login: &mut Login, rig: &mut Rig, text: &str) -> Transition {
        let mut ctx = rig.ctx();
        login.handle_input(&mut ctx, &InputEvent::Text(text.into()));
        login.handle_input(&mut ctx, &InputEvent::Key(Key::Enter))
    }

    #[test]
    fn enter_prints_banner() {
        let mut rig = Rig::new();
        Login::enter(&mut rig.ctx());
        let lines: Vec<&str> = rig.term.lines().collect();
        assert_eq!(lines, vec!["REMOTE TERMINAL ACCESS", ""]);
        assert_eq!(rig.term.prompt(), "LOGON> ");
    }

    #[test]
    fn first_entry_asks_for_password() {
        let mut rig = Rig::new();
        let mut login = Login::enter(&mut rig.ctx());
        assert_eq!(submit(&mut login, &mut rig, "joshua"), Transition::Stay);
        assert!(login.username.is_some());
        assert_eq!(rig.term.prompt(), PASSWORD_PROMPT);
        assert!(rig.term.is_masked());
    }

    #[test]
    fn joshua_is_granted_with_matching_password() {
        let mut rig = Rig::new();
        let mut login = Login::enter(&mut rig.ctx());
        submit(&mut login, &mut rig, "joshua");
        let t = submit(&mut login, &mut rig, "JOSHUA");
        assert_eq!(t, Transition::Switch(ScreenId::Prompt));
        assert_eq!(rig.term.last_line(), Some("ACCESS GRANTED"));
    }

    #[test]
    fn username_match_ignores_case_and_padding() {
        let mut rig = Rig::new();
        let mut login = Login::enter(&mut rig.ctx());
        submit(&mut login, &mut rig, "  JoShUa ");
        assert_eq!(submit(&mut login, &mut rig, "joshua "), Transition::Switch(ScreenId::Prompt));
    }

    #[test]
    fn joshua_with_wrong_password_is_denied() {
        let mut rig = Rig::new();
        let mut login = Login::enter(&mut rig.ctx());
        submit(&mut login, &mut rig, "joshua");
        assert_eq!(submit(&mut login, &mut rig, "wrongpass"), Transition::Stay);
        assert_eq!(rig.term.last_line(), Some("ACCESS DENIED"));
        assert_eq!(rig.term.prompt(), "LOGON> ");
    }

    #[test]
    fn wrong_user_is_denied_and_reset() {
        let mut rig = Rig::new();
        let mut login = Login::enter(&mut rig.ctx());
        submit(&mut login, &mut rig, "falken");
        let t = submit(&mut login, &mut rig, "wrongpass");
        assert_eq!(t, Transition::Stay);
        assert_eq!(rig.term.last_line(), Some("ACCESS DENIED"));
        assert_eq!(rig.term.prompt(), "LOGON> ");
        assert!(!rig.term.is_masked());
        assert!(login.username.is_none());
        assert!(rig.events.contains(&FrameEvent::AccessDenied));
    }

    #[test]
    fn escape_quits() {
        let mut rig = Rig::new();
        let mut login = Login::enter(&mut rig.ctx());
        let t = login.handle_input(&mut rig.ctx(), &InputEvent::Key(Key::Escape));
        assert_eq!(t, Transition::Quit);
    }
}
