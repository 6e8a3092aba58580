/// Terminal model: scrollback, input line, prompt label and cursor blink.
///
/// The model knows nothing about drawing. The renderer reads it through the
/// accessors below; screens mutate it through the operations.
///
/// Character insertion arrives only through `insert_text` (composed text:
/// typed characters, paste). `handle_key` deals with editing keys.

use std::collections::VecDeque;

use crate::domain::input::Key;

/// Used when a caller asks for a zero-line scrollback.
const MIN_SCROLLBACK: usize = 1;

/// Single control characters that never reach the input buffer.
const DROPPED_TEXT: &[&str] = &["\r", "\n", "\t"];

#[derive(Clone, Debug)]
pub struct TerminalModel {
    scrollback: VecDeque<String>,
    scrollback_limit: usize,
    input: String,
    prompt: String,
    blink_phase: f64,
    masked: bool,
    local_echo: bool,
}

impl TerminalModel {
    pub fn new(prompt: &str, scrollback_limit: usize) -> Self {
        let limit = scrollback_limit.max(MIN_SCROLLBACK);
        TerminalModel {
            scrollback: VecDeque::with_capacity(limit.min(256)),
            scrollback_limit: limit,
            input: String::new(),
            prompt: prompt.to_string(),
            blink_phase: 0.0,
            masked: false,
            local_echo: false,
        }
    }

    pub fn with_local_echo(mut self, on: bool) -> Self {
        self.local_echo = on;
        self
    }

    // ── Output ──

    /// Append a line to the scrollback, evicting the oldest when full.
    pub fn append_line(&mut self, text: impl Into<String>) {
        if self.scrollback.len() >= self.scrollback_limit {
            self.scrollback.pop_front();
        }
        self.scrollback.push_back(text.into());
    }

    pub fn blank_line(&mut self) {
        self.append_line(String::new());
    }

    /// Copy a submitted line into the scrollback, prefixed by the prompt.
    /// Only when local echo is on.
    pub fn echo(&mut self, line: &str) {
        if self.local_echo {
            let shown = if self.masked {
                "*".repeat(line.chars().count())
            } else {
                line.to_string()
            };
            let entry = format!("{}{}", self.prompt, shown);
            self.append_line(entry);
        }
    }

    pub fn clear(&mut self) {
        self.scrollback.clear();
        self.input.clear();
    }

    // ── Input ──

    pub fn insert_text(&mut self, text: &str) {
        if DROPPED_TEXT.contains(&text) {
            return;
        }
        self.input.push_str(text);
    }

    /// Reduce an editing key. Returns the submitted line on Enter.
    pub fn handle_key(&mut self, key: Key) -> Option<String> {
        match key {
            Key::Backspace => {
                self.input.pop();
                None
            }
            Key::Enter => Some(std::mem::take(&mut self.input)),
            _ => None,
        }
    }

    pub fn tick(&mut self, dt: f64) {
        if dt > 0.0 {
            self.blink_phase += dt;
        }
    }

    // ── Settings driven by the owning screen ──

    pub fn set_prompt(&mut self, prompt: &str) {
        self.prompt.clear();
        self.prompt.push_str(prompt);
    }

    pub fn set_masked(&mut self, masked: bool) {
        self.masked = masked;
    }

    // ── Read-only views ──

    #[allow(dead_code)]
    pub fn lines(&self) -> impl ExactSizeIterator<Item = &str> + DoubleEndedIterator {
        self.scrollback.iter().map(String::as_str)
    }

    /// The most recent `rows` lines, oldest first.
    pub fn visible_lines(&self, rows: usize) -> impl Iterator<Item = &str> {
        let skip = self.scrollback.len().saturating_sub(rows);
        self.scrollback.iter().skip(skip).map(String::as_str)
    }

    #[allow(dead_code)]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Input as it should appear on screen (stars while masked).
    pub fn display_input(&self) -> String {
        if self.masked {
            "*".repeat(self.input.chars().count())
        } else {
            self.input.clone()
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[allow(dead_code)]
    pub fn blink_phase(&self) -> f64 {
        self.blink_phase
    }

    /// ~1 Hz: on for the first half of each second, off for the second.
    pub fn cursor_visible(&self) -> bool {
        (self.blink_phase * 2.0).floor() as u64 % 2 == 0
    }
}

#[cfg(test)]
impl TerminalModel {
    pub fn line_count(&self) -> usize {
        self.scrollback.len()
    }

    pub fn last_line(&self) -> Option<&str> {
        self.scrollback.back().map(String::as_str)
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }
}
