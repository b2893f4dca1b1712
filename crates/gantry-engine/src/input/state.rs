use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers};

/// Current keyboard state for a single window.
///
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = m;
            }

            InputEvent::Focused(focused) => {
                if !focused {
                    // Releases are not delivered to unfocused windows.
                    self.keys_down.clear();
                    self.modifiers = Modifiers::default();
                }
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
            } => {
                self.modifiers = modifiers;

                match state {
                    KeyState::Pressed => {
                        self.keys_down.insert(key);
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(&key) {
                            frame.keys_released.insert(key);
                        }
                    }
                }
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Either Shift key, or the platform's shift flag.
    ///
    /// The flag also covers a Shift pressed before the window gained focus.
    pub fn shift_held(&self) -> bool {
        self.modifiers.shift || self.key_down(Key::ShiftLeft) || self.key_down(Key::ShiftRight)
    }

    /// Either Control key, or the platform's control flag.
    pub fn control_held(&self) -> bool {
        self.modifiers.ctrl
            || self.key_down(Key::ControlLeft)
            || self.key_down(Key::ControlRight)
    }
}
