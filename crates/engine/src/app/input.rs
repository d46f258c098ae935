/// Keys the engine forwards to scenes. Anything else is dropped at the
/// collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    ArrowUp,
    ArrowDown,
    Escape,
}

const KEY_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// One discrete key transition, delivered in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub state: KeyState,
}

impl InputEvent {
    pub const fn pressed(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
        }
    }

    pub const fn released(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Released,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct KeyStates {
    down: [bool; KEY_COUNT],
}

impl KeyStates {
    /// Records a transition. Returns `false` when it repeats the current
    /// state (OS key repeat, or a release we never saw pressed).
    pub(crate) fn transition(&mut self, key: Key, state: KeyState) -> bool {
        let is_down = state == KeyState::Pressed;
        let slot = &mut self.down[key.index()];
        if *slot == is_down {
            return false;
        }
        *slot = is_down;
        true
    }

    #[cfg(test)]
    pub(crate) fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }
}

impl Key {
    const fn index(self) -> usize {
        match self {
            Key::Space => 0,
            Key::ArrowUp => 1,
            Key::ArrowDown => 2,
            Key::Escape => 3,
        }
    }
}
