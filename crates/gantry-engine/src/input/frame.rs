use std::collections::HashSet;

use super::types::Key;

/// Per-frame input deltas.
///
/// `InputState` provides held keys; `InputFrame` records what changed during the
/// current frame and is cleared by the runtime after `on_frame`.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys released this frame.
    pub keys_released: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_released.clear();
    }

    #[inline]
    pub fn released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }
}
