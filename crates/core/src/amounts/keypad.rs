//! On-screen numeric keypad.
//!
//! The keypad only captures keystrokes into a numeric string. It performs no
//! validation of its own; the buffer goes through the amount validator on
//! submit, like typed input.

use crate::constants::KEYPAD_MAX_LEN;

/// A single keypad key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadKey {
    Digit(u8),
    Point,
    Backspace,
    Clear,
}

impl KeypadKey {
    /// Maps a key label (`"7"`, `"."`, `"del"`, `"clear"`) to a key.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "." | "," => Some(Self::Point),
            "del" | "<" | "backspace" => Some(Self::Backspace),
            "c" | "clear" => Some(Self::Clear),
            _ => {
                let mut chars = label.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                c.to_digit(10).map(|d| Self::Digit(d as u8))
            }
        }
    }
}

/// Input buffer behind the keypad.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    buffer: String,
}

impl Keypad {
    /// Starts from the current contents of an amount input.
    pub fn with_input(input: &str) -> Self {
        Self {
            buffer: input.trim().to_string(),
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    /// Applies a key and returns the new buffer.
    pub fn press(&mut self, key: KeypadKey) -> &str {
        match key {
            KeypadKey::Digit(d) if d <= 9 => {
                if self.buffer.len() < KEYPAD_MAX_LEN {
                    if self.buffer == "0" {
                        self.buffer.clear();
                    }
                    self.buffer.push(char::from(b'0' + d));
                }
            }
            KeypadKey::Digit(_) => {}
            KeypadKey::Point => {
                if !self.buffer.contains('.') && self.buffer.len() + 1 < KEYPAD_MAX_LEN {
                    if self.buffer.is_empty() {
                        self.buffer.push('0');
                    }
                    self.buffer.push('.');
                }
            }
            KeypadKey::Backspace => {
                self.buffer.pop();
            }
            KeypadKey::Clear => self.buffer.clear(),
        }
        &self.buffer
    }
}
