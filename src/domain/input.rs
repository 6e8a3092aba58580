/// Input vocabulary shared by every screen.
///
/// Raw backend events (crossterm keys, gamepad buttons) are translated into
/// these before the engine sees them, so screens never touch a backend type.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Close the program, whatever screen is active.
    Quit,
    /// Composed text: a typed character or a paste.
    Text(String),
    Key(Key),
    Resize { width: u16, height: u16 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Backspace,
    Escape,
    Space,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Char(char),
    Other,
}

/// Grid movement request, as arrows or WASD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDir {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Arrow keys and their WASD equivalents (either case).
    pub fn as_move(self) -> Option<MoveDir> {
        match self {
            Key::Up | Key::Char('w') | Key::Char('W') => Some(MoveDir::Up),
            Key::Down | Key::Char('s') | Key::Char('S') => Some(MoveDir::Down),
            Key::Left | Key::Char('a') | Key::Char('A') => Some(MoveDir::Left),
            Key::Right | Key::Char('d') | Key::Char('D') => Some(MoveDir::Right),
            _ => None,
        }
    }

    pub fn is_confirm(self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}
