use gantry_engine::input::{InputFrame, InputState, Key};
use gantry_rig::{KeySource, RigKey};

/// Engine keyboard state seen through the rig's key vocabulary.
pub struct FrameKeys<'a> {
    pub state: &'a InputState,
    pub frame: &'a InputFrame,
}

/// Physical key bound to each non-modifier rig key.
///
/// Shift and Control accept either side and are resolved by `InputState`.
pub fn binding(key: RigKey) -> Option<Key> {
    match key {
        RigKey::Up => Some(Key::ArrowUp),
        RigKey::Down => Some(Key::ArrowDown),
        RigKey::Left => Some(Key::ArrowLeft),
        RigKey::Right => Some(Key::ArrowRight),
        RigKey::Exit => Some(Key::Escape),
        RigKey::Shift | RigKey::Control => None,
    }
}

impl KeySource for FrameKeys<'_> {
    fn is_held(&self, key: RigKey) -> bool {
        match key {
            RigKey::Shift => self.state.shift_held(),
            RigKey::Control => self.state.control_held(),
            other => binding(other).is_some_and(|k| self.state.key_down(k)),
        }
    }

    fn was_released(&self, key: RigKey) -> bool {
        binding(key).is_some_and(|k| self.frame.released(k))
    }
}
