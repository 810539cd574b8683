use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{ButtonState, CursorPos, InputEvent, Key, KeyState, Modifiers, MouseButton};

/// Current input state of the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// Last cursor position in physical pixels, `None` outside the window.
    pub cursor: Option<CursorPos>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies `ev` to the held state and records transitions into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases that happen while unfocused are never delivered.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::CursorMoved(pos) => self.cursor = Some(*pos),

            InputEvent::CursorLeft => self.cursor = None,

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;
                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::MouseButton {
                button,
                state,
                position,
                modifiers,
            } => {
                self.cursor = Some(*position);
                self.modifiers = *modifiers;
                match state {
                    ButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    ButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }
        }

        frame.events.push(ev);
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    #[inline]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            repeat: false,
        }
    }

    #[test]
    fn held_key_is_pressed_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::A, KeyState::Pressed));
        state.apply_event(&mut frame, key(Key::A, KeyState::Pressed));
        assert!(state.key_down(Key::A));
        assert!(frame.key_pressed(Key::A));
        assert_eq!(frame.events.len(), 2);

        frame.clear();
        state.apply_event(&mut frame, key(Key::A, KeyState::Released));
        assert!(!state.key_down(Key::A));
        assert!(frame.keys_released.contains(&Key::A));
        assert!(!frame.key_pressed(Key::A));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        state.apply_event(
            &mut frame,
            InputEvent::MouseButton {
                button: MouseButton::Left,
                state: ButtonState::Pressed,
                position: CursorPos { x: 1.0, y: 2.0 },
                modifiers: Modifiers::default(),
            },
        );
        assert!(state.button_down(MouseButton::Left));
        assert_eq!(state.cursor, Some(CursorPos { x: 1.0, y: 2.0 }));

        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.key_down(Key::Space));
        assert!(!state.button_down(MouseButton::Left));
    }

    #[test]
    fn cursor_leaving_clears_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::CursorMoved(CursorPos { x: 3.0, y: 4.0 }));
        state.apply_event(&mut frame, InputEvent::CursorLeft);
        assert_eq!(state.cursor, None);
    }
}
