//! Key-combination descriptors
//!
//! Parses strings such as `ctrl+k` or `ctrl+alt+k` from the config file into
//! the modifier set and key code registered with the OS.

use global_hotkey::hotkey::{Code, HotKey, Modifiers};

/// Errors produced while parsing a descriptor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("empty key combination")]
    Empty,

    #[error("unknown key `{0}`")]
    UnknownKey(String),

    #[error("key combination `{0}` has no non-modifier key")]
    MissingKey(String),

    #[error("key combination `{0}` has more than one non-modifier key")]
    MultipleKeys(String),
}

/// A parsed key combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub modifiers: Modifiers,
    pub code: Code,
}

impl KeyCombo {
    /// Parse a `+`-separated, case-insensitive descriptor
    pub fn parse(descriptor: &str) -> Result<Self, KeyParseError> {
        let descriptor = descriptor.trim();
        if descriptor.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let mut modifiers = Modifiers::empty();
        let mut code = None;

        for token in descriptor.split('+').map(str::trim) {
            let token = token.to_ascii_lowercase();
            if let Some(modifier) = modifier_for(&token) {
                modifiers |= modifier;
                continue;
            }

            let key = code_for(&token).ok_or_else(|| KeyParseError::UnknownKey(token.clone()))?;
            if code.replace(key).is_some() {
                return Err(KeyParseError::MultipleKeys(descriptor.to_string()));
            }
        }

        let code = code.ok_or_else(|| KeyParseError::MissingKey(descriptor.to_string()))?;
        Ok(Self { modifiers, code })
    }

    /// The OS-level binding for this combination
    pub fn to_hotkey(self) -> HotKey {
        let modifiers = (!self.modifiers.is_empty()).then_some(self.modifiers);
        HotKey::new(modifiers, self.code)
    }
}

fn modifier_for(token: &str) -> Option<Modifiers> {
    match token {
        "ctrl" | "control" => Some(Modifiers::CONTROL),
        "alt" | "option" => Some(Modifiers::ALT),
        "shift" => Some(Modifiers::SHIFT),
        "super" | "win" | "windows" | "cmd" | "command" | "meta" => Some(Modifiers::SUPER),
        _ => None,
    }
}

fn code_for(token: &str) -> Option<Code> {
    let code = match token {
        "a" => Code::KeyA,
        "b" => Code::KeyB,
        "c" => Code::KeyC,
        "d" => Code::KeyD,
        "e" => Code::KeyE,
        "f" => Code::KeyF,
        "g" => Code::KeyG,
        "h" => Code::KeyH,
        "i" => Code::KeyI,
        "j" => Code::KeyJ,
        "k" => Code::KeyK,
        "l" => Code::KeyL,
        "m" => Code::KeyM,
        "n" => Code::KeyN,
        "o" => Code::KeyO,
        "p" => Code::KeyP,
        "q" => Code::KeyQ,
        "r" => Code::KeyR,
        "s" => Code::KeyS,
        "t" => Code::KeyT,
        "u" => Code::KeyU,
        "v" => Code::KeyV,
        "w" => Code::KeyW,
        "x" => Code::KeyX,
        "y" => Code::KeyY,
        "z" => Code::KeyZ,
        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,
        "f1" => Code::F1,
        "f2" => Code::F2,
        "f3" => Code::F3,
        "f4" => Code::F4,
        "f5" => Code::F5,
        "f6" => Code::F6,
        "f7" => Code::F7,
        "f8" => Code::F8,
        "f9" => Code::F9,
        "f10" => Code::F10,
        "f11" => Code::F11,
        "f12" => Code::F12,
        "space" => Code::Space,
        "enter" | "return" => Code::Enter,
        "tab" => Code::Tab,
        "esc" | "escape" => Code::Escape,
        "backspace" => Code::Backspace,
        "delete" | "del" => Code::Delete,
        "insert" | "ins" => Code::Insert,
        "home" => Code::Home,
        "end" => Code::End,
        "pageup" | "page up" => Code::PageUp,
        "pagedown" | "page down" => Code::PageDown,
        "up" => Code::ArrowUp,
        "down" => Code::ArrowDown,
        "left" => Code::ArrowLeft,
        "right" => Code::ArrowRight,
        "-" | "minus" => Code::Minus,
        "=" | "equal" => Code::Equal,
        "," | "comma" => Code::Comma,
        "." | "period" => Code::Period,
        "/" | "slash" => Code::Slash,
        "\\" | "backslash" => Code::Backslash,
        ";" | "semicolon" => Code::Semicolon,
        "'" | "quote" => Code::Quote,
        "[" => Code::BracketLeft,
        "]" => Code::BracketRight,
        "`" | "backquote" => Code::Backquote,
        _ => return None,
    };
    Some(code)
}
