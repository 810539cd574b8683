/// Keyboard key identifier.
///
/// Only keys the runtime has a use for are named; everything else maps to
/// `Key::Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// Cursor position in physical pixels, origin at the top-left of the surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CursorPos {
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// True when the event is a key repeat.
        repeat: bool,
    },

    CursorMoved(CursorPos),

    /// Button press/release at the last known cursor position.
    MouseButton {
        button: MouseButton,
        state: ButtonState,
        position: CursorPos,
        modifiers: Modifiers,
    },

    ModifiersChanged(Modifiers),

    CursorLeft,

    Focused(bool),
}

impl InputEvent {
    /// True for a fresh (non-repeat) press of `key`.
    pub fn is_key_press(&self, key: Key) -> bool {
        matches!(
            self,
            InputEvent::Key { key: k, state: KeyState::Pressed, repeat: false, .. } if *k == key
        )
    }

    /// Position of a press of `button`, if this event is one.
    pub fn button_press(&self, button: MouseButton) -> Option<CursorPos> {
        match self {
            InputEvent::MouseButton {
                button: b,
                state: ButtonState::Pressed,
                position,
                ..
            } if *b == button => Some(*position),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            repeat,
        }
    }

    #[test]
    fn key_press_ignores_repeats_and_releases() {
        assert!(key(Key::F, KeyState::Pressed, false).is_key_press(Key::F));
        assert!(!key(Key::F, KeyState::Pressed, true).is_key_press(Key::F));
        assert!(!key(Key::F, KeyState::Released, false).is_key_press(Key::F));
        assert!(!key(Key::F, KeyState::Pressed, false).is_key_press(Key::P));
    }

    #[test]
    fn button_press_reports_position() {
        let ev = InputEvent::MouseButton {
            button: MouseButton::Left,
            state: ButtonState::Pressed,
            position: CursorPos { x: 10.0, y: 20.0 },
            modifiers: Modifiers::default(),
        };
        assert_eq!(ev.button_press(MouseButton::Left), Some(CursorPos { x: 10.0, y: 20.0 }));
        assert_eq!(ev.button_press(MouseButton::Right), None);
    }
}
