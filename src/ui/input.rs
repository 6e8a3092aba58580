/// Keyboard input: drains pending crossterm events without blocking and
/// translates them into `InputEvent`s, in arrival order.
///
/// A printable key yields both a `Key` (for screens that navigate) and a
/// `Text` (for screens that type). Ctrl+C / Ctrl+D yield `Quit`.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::input::{InputEvent, Key};

pub struct KeyboardInput {
    events: Vec<InputEvent>,
}

impl KeyboardInput {
    pub fn new() -> Self {
        KeyboardInput { events: Vec::with_capacity(16) }
    }

    /// Read all available terminal events. Call once per frame.
    pub fn drain(&mut self) -> &[InputEvent] {
        self.events.clear();
        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(ev) => self.events.extend(translate(ev)),
                Err(e) => {
                    tracing::warn!(error = %e, "terminal event read failed");
                    break;
                }
            }
        }
        &self.events
    }
}

pub fn translate(ev: Event) -> Vec<InputEvent> {
    match ev {
        Event::Key(key) => translate_key(key),
        Event::Paste(text) => {
            let clean: String = text.chars().filter(|c| !c.is_control()).collect();
            if clean.is_empty() {
                vec![]
            } else {
                vec![InputEvent::Text(clean)]
            }
        }
        Event::Resize(width, height) => vec![InputEvent::Resize { width, height }],
        _ => vec![],
    }
}

fn translate_key(key: KeyEvent) -> Vec<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'c' | 'd' => vec![InputEvent::Quit],
            _ => vec![],
        },
        KeyCode::Char(' ') => vec![InputEvent::Key(Key::Space), InputEvent::Text(" ".into())],
        KeyCode::Char(c) => vec![InputEvent::Key(Key::Char(c)), InputEvent::Text(c.to_string())],
        KeyCode::Enter => vec![InputEvent::Key(Key::Enter)],
        KeyCode::Backspace => vec![InputEvent::Key(Key::Backspace)],
        KeyCode::Esc => vec![InputEvent::Key(Key::Escape)],
        KeyCode::Tab => vec![InputEvent::Key(Key::Tab)],
        KeyCode::Up => vec![InputEvent::Key(Key::Up)],
        KeyCode::Down => vec![InputEvent::Key(Key::Down)],
        KeyCode::Left => vec![InputEvent::Key(Key::Left)],
        KeyCode::Right => vec![InputEvent::Key(Key::Right)],
        _ => vec![InputEvent::Key(Key::Other)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn printable_key_is_key_and_text() {
        assert_eq!(
            translate(press(KeyCode::Char('w'))),
            vec![InputEvent::Key(Key::Char('w')), InputEvent::Text("w".into())]
        );
        assert_eq!(
            translate(press(KeyCode::Char(' '))),
            vec![InputEvent::Key(Key::Space), InputEvent::Text(" ".into())]
        );
    }

    #[test]
    fn ctrl_c_and_ctrl_d_quit() {
        let c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let d = Event::Key(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::CONTROL));
        assert_eq!(translate(c), vec![InputEvent::Quit]);
        assert_eq!(translate(d), vec![InputEvent::Quit]);
        let other = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert!(translate(other).is_empty());
    }

    #[test]
    fn release_is_ignored() {
        let mut k = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        k.kind = KeyEventKind::Release;
        assert!(translate(Event::Key(k)).is_empty());
    }

    #[test]
    fn named_keys() {
        assert_eq!(translate(press(KeyCode::Esc)), vec![InputEvent::Key(Key::Escape)]);
        assert_eq!(translate(press(KeyCode::Enter)), vec![InputEvent::Key(Key::Enter)]);
        assert_eq!(translate(press(KeyCode::Left)), vec![InputEvent::Key(Key::Left)]);
        assert_eq!(translate(press(KeyCode::F(1))), vec![InputEvent::Key(Key::Other)]);
    }

    #[test]
    fn paste_drops_control_chars() {
        assert_eq!(
            translate(Event::Paste("jo\nshua\t".into())),
            vec![InputEvent::Text("joshua".into())]
        );
        assert!(translate(Event::Paste("\r\n".into())).is_empty());
    }

    #[test]
    fn resize_passes_through() {
        assert_eq!(
            translate(Event::Resize(120, 40)),
            vec![InputEvent::Resize { width: 120, height: 40 }]
        );
    }
}
