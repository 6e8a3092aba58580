/// Gamepad input using gilrs, translated into the same `InputEvent`s the
/// keyboard produces.
///
/// Button mapping is loaded from the `[gamepad]` section of config.toml.
/// Default mapping:
///   D-pad / Left Stick    →  Arrow keys
///   A / Start             →  Enter
///   B / Select            →  Escape
///
/// Everything is edge-triggered: holding a direction moves once.

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::domain::input::{InputEvent, Key};

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.25;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,      // LeftTrigger
    R1,      // RightTrigger
    L2,      // LeftTrigger2
    R2,      // RightTrigger2
    Start,
    Select,
}

impl Btn {
    pub fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH"  => Some(Btn::A),
            "B" | "EAST"   => Some(Btn::B),
            "X" | "WEST"   => Some(Btn::X),
            "Y" | "NORTH"  => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER"  => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "L2" | "LT" | "LEFTTRIGGER2"  => Some(Btn::L2),
            "R2" | "RT" | "RIGHTTRIGGER2" => Some(Btn::R2),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South     => Some(Btn::A),
            Button::East      => Some(Btn::B),
            Button::West      => Some(Btn::X),
            Button::North     => Some(Btn::Y),
            Button::LeftTrigger  => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::LeftTrigger2  => Some(Btn::L2),
            Button::RightTrigger2 => Some(Btn::R2),
            Button::Start     => Some(Btn::Start),
            Button::Select    => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Action-to-button mapping (loaded from config).
#[derive(Clone, Debug, PartialEq, Eq)]
struct ActionMap {
    confirm: Vec<Btn>,
    cancel: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap {
            confirm: vec![Btn::A, Btn::Start],
            cancel:  vec![Btn::B, Btn::Select],
        }
    }
}

impl ActionMap {
    /// Unknown names are skipped; an empty result keeps the default list.
    fn from_config(cfg: &GamepadConfig) -> Self {
        fn parse_list(names: &[String]) -> Vec<Btn> {
            names.iter().filter_map(|s| Btn::from_name(s)).collect()
        }
        let mut map = ActionMap::default();
        let cf = parse_list(&cfg.confirm);
        if !cf.is_empty() { map.confirm = cf; }
        let ca = parse_list(&cfg.cancel);
        if !ca.is_empty() { map.cancel = ca; }
        map
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn resolve(&self, btn: Btn) -> Option<InputEvent> {
        if self.confirm.contains(&btn) {
            Some(InputEvent::Key(Key::Enter))
        } else if self.cancel.contains(&btn) {
            Some(InputEvent::Key(Key::Escape))
        } else {
            None
        }
    }
}

/// Digital stick state, ordered up, down, left, right.
#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
fn stick_dirs(x: f32, y: f32) -> [bool; 4] {
    [y > STICK_DEADZONE, y < -STICK_DEADZONE, x < -STICK_DEADZONE, x > STICK_DEADZONE]
}

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_KEYS: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];

pub struct GamepadInput {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    action_map: ActionMap,
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_x: f32,
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_y: f32,
    stick_held: [bool; 4],
    events: Vec<InputEvent>,

    pub connected: bool,
}

impl GamepadInput {
    pub fn new(cfg: &GamepadConfig) -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs_opt, connected) = {
            match Gilrs::new() {
                Ok(g) => {
                    let has_pad = g.gamepads().next().is_some();
                    (Some(g), has_pad)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "gamepad support unavailable");
                    (None, false)
                }
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadInput {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            action_map: ActionMap::from_config(cfg),
            stick_x: 0.0,
            stick_y: 0.0,
            stick_held: [false; 4],
            events: Vec::with_capacity(8),
            connected,
        }
    }

    /// Drain pending gamepad events. Call once per frame.
    pub fn poll(&mut self) -> &[InputEvent] {
        self.events.clear();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();

        &self.events
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    self.press(btn);
                }
                EventType::AxisChanged(axis, value, _) => {
                    self.connected = true;
                    match axis {
                        Axis::LeftStickX => self.stick_x = value,
                        Axis::LeftStickY => self.stick_y = value,
                        _ => {}
                    }
                }
                EventType::Connected => {
                    self.connected = true;
                    tracing::info!("gamepad connected");
                }
                EventType::Disconnected => {
                    self.connected = false;
                    self.stick_x = 0.0;
                    self.stick_y = 0.0;
                    tracing::info!("gamepad disconnected");
                }
                _ => {}
            }
        }

        self.stick_edges(stick_dirs(self.stick_x, self.stick_y));
    }

    #[cfg(feature = "gamepad")]
    fn press(&mut self, btn: Button) {
        let key = match btn {
            Button::DPadUp    => Some(Key::Up),
            Button::DPadDown  => Some(Key::Down),
            Button::DPadLeft  => Some(Key::Left),
            Button::DPadRight => Some(Key::Right),
            _ => None,
        };
        if let Some(k) = key {
            self.events.push(InputEvent::Key(k));
        } else if let Some(ev) = Btn::from_gilrs(btn).and_then(|b| self.action_map.resolve(b)) {
            self.events.push(ev);
        }
    }

    /// Emit a key for each stick direction that just crossed the deadzone.
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn stick_edges(&mut self, now: [bool; 4]) {
        for i in 0..4 {
            if now[i] && !self.stick_held[i] {
                self.events.push(InputEvent::Key(STICK_KEYS[i]));
            }
        }
        self.stick_held = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(confirm: &[&str], cancel: &[&str]) -> GamepadConfig {
        GamepadConfig {
            confirm: confirm.iter().map(|s| s.to_string()).collect(),
            cancel: cancel.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn button_names_are_case_insensitive() {
        assert_eq!(Btn::from_name("a"), Some(Btn::A));
        assert_eq!(Btn::from_name("south"), Some(Btn::A));
        assert_eq!(Btn::from_name("Back"), Some(Btn::Select));
        assert_eq!(Btn::from_name("rt"), Some(Btn::R2));
        assert_eq!(Btn::from_name("turbo"), None);
    }

    #[test]
    fn config_overrides_mapping() {
        let map = ActionMap::from_config(&cfg(&["X"], &["Y", "bogus"]));
        assert_eq!(map.resolve(Btn::X), Some(InputEvent::Key(Key::Enter)));
        assert_eq!(map.resolve(Btn::Y), Some(InputEvent::Key(Key::Escape)));
        assert_eq!(map.resolve(Btn::A), None);
    }

    #[test]
    fn unknown_names_keep_defaults() {
        let map = ActionMap::from_config(&cfg(&["nope"], &[]));
        assert_eq!(map, ActionMap::default());
        assert_eq!(map.resolve(Btn::Start), Some(InputEvent::Key(Key::Enter)));
        assert_eq!(map.resolve(Btn::B), Some(InputEvent::Key(Key::Escape)));
    }

    #[test]
    fn stick_respects_deadzone() {
        assert_eq!(stick_dirs(0.1, -0.2), [false; 4]);
        assert_eq!(stick_dirs(0.9, 0.5), [true, false, false, true]);
        assert_eq!(stick_dirs(-0.9, -0.5), [false, true, true, false]);
    }

    #[test]
    fn stick_fires_once_per_push() {
        let mut pad = GamepadInput {
            #[cfg(feature = "gamepad")]
            gilrs: None,
            action_map: ActionMap::default(),
            stick_x: 0.0,
            stick_y: 0.0,
            stick_held: [false; 4],
            events: Vec::new(),
            connected: false,
        };
        pad.stick_edges(stick_dirs(0.0, 0.8));
        pad.stick_edges(stick_dirs(0.0, 0.9));
        assert_eq!(pad.events, vec![InputEvent::Key(Key::Up)]);
        pad.stick_edges(stick_dirs(0.0, 0.0));
        pad.stick_edges(stick_dirs(0.0, 0.7));
        assert_eq!(pad.events.len(), 2);
    }
}
