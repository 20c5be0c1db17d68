//! Platform-agnostic input types
//!
//! Defines keyboard keys and button states that do not depend on any windowing
//! library. Concrete platform adapters (e.g., the winit adapter in the rig crate)
//! translate platform events into these types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MarionetteError;

/// Keyboard key enumeration (platform-agnostic).
///
/// Keys serialize to the DOM `KeyboardEvent.code` spelling (`"KeyW"`, `"Digit5"`,
/// `"ShiftLeft"`, `"ArrowUp"`, ...). Parsing additionally accepts single
/// characters (`"w"`, `"5"`, `" "`) so that `KeyboardEvent.key` values work too.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    // Letter keys
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Number keys
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,

    // Control keys
    Space,
    Enter,
    Escape,
    Tab,
    PageUp,
    PageDown,

    // Modifier keys
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

const LETTERS: [Key; 26] = [
    Key::A,
    Key::B,
    Key::C,
    Key::D,
    Key::E,
    Key::F,
    Key::G,
    Key::H,
    Key::I,
    Key::J,
    Key::K,
    Key::L,
    Key::M,
    Key::N,
    Key::O,
    Key::P,
    Key::Q,
    Key::R,
    Key::S,
    Key::T,
    Key::U,
    Key::V,
    Key::W,
    Key::X,
    Key::Y,
    Key::Z,
];

const DIGITS: [Key; 10] = [
    Key::Key0,
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
    Key::Key9,
];

impl Key {
    /// Returns the DOM `code` spelling of this key.
    #[must_use]
    pub fn code(self) -> String {
        if let Some(i) = LETTERS.iter().position(|&k| k == self) {
            return format!("Key{}", (b'A' + i as u8) as char);
        }
        if let Some(i) = DIGITS.iter().position(|&k| k == self) {
            return format!("Digit{i}");
        }
        match self {
            Key::Space => "Space",
            Key::Enter => "Enter",
            Key::Escape => "Escape",
            Key::Tab => "Tab",
            Key::PageUp => "PageUp",
            Key::PageDown => "PageDown",
            Key::ShiftLeft => "ShiftLeft",
            Key::ShiftRight => "ShiftRight",
            Key::ControlLeft => "ControlLeft",
            Key::ControlRight => "ControlRight",
            Key::AltLeft => "AltLeft",
            Key::AltRight => "AltRight",
            Key::ArrowUp => "ArrowUp",
            Key::ArrowDown => "ArrowDown",
            Key::ArrowLeft => "ArrowLeft",
            Key::ArrowRight => "ArrowRight",
            // Letters and digits are spelled above.
            _ => "Unidentified",
        }
        .to_string()
    }

    fn from_char(c: char) -> Option<Key> {
        match c {
            'a'..='z' => Some(LETTERS[(c as u8 - b'a') as usize]),
            'A'..='Z' => Some(LETTERS[(c as u8 - b'A') as usize]),
            '0'..='9' => Some(DIGITS[(c as u8 - b'0') as usize]),
            ' ' => Some(Key::Space),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl FromStr for Key {
    type Err = MarionetteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::from_char(c).ok_or_else(|| MarionetteError::UnknownKey(s.to_string()));
        }

        if let Some(rest) = s.strip_prefix("Key")
            && let (Some(c), None) = (rest.chars().next(), rest.chars().nth(1))
            && c.is_ascii_uppercase()
        {
            return Ok(LETTERS[(c as u8 - b'A') as usize]);
        }
        if let Some(rest) = s.strip_prefix("Digit")
            && let (Some(c), None) = (rest.chars().next(), rest.chars().nth(1))
            && c.is_ascii_digit()
        {
            return Ok(DIGITS[(c as u8 - b'0') as usize]);
        }

        let key = match s {
            "Space" => Key::Space,
            "Enter" => Key::Enter,
            "Escape" => Key::Escape,
            "Tab" => Key::Tab,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "ShiftLeft" => Key::ShiftLeft,
            "ShiftRight" => Key::ShiftRight,
            "ControlLeft" => Key::ControlLeft,
            "ControlRight" => Key::ControlRight,
            "AltLeft" => Key::AltLeft,
            "AltRight" => Key::AltRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => return Err(MarionetteError::UnknownKey(s.to_string())),
        };
        Ok(key)
    }
}

impl TryFrom<String> for Key {
    type Error = MarionetteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.code()
    }
}

/// Press/release state of a key or button.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dom_codes_and_characters() {
        assert_eq!("KeyW".parse::<Key>().unwrap(), Key::W);
        assert_eq!("w".parse::<Key>().unwrap(), Key::W);
        assert_eq!("Digit5".parse::<Key>().unwrap(), Key::Key5);
        assert_eq!("5".parse::<Key>().unwrap(), Key::Key5);
        assert_eq!(" ".parse::<Key>().unwrap(), Key::Space);
        assert_eq!("ShiftLeft".parse::<Key>().unwrap(), Key::ShiftLeft);
        assert!("Hyper".parse::<Key>().is_err());
        assert!("KeyWW".parse::<Key>().is_err());
    }

    #[test]
    fn code_round_trips_through_parse() {
        for key in [Key::E, Key::Key8, Key::PageDown, Key::ArrowLeft, Key::ControlLeft] {
            assert_eq!(key.code().parse::<Key>().unwrap(), key);
        }
    }
}
