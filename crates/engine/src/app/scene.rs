use super::input::InputEvent;
#[cfg(test)]
use super::input::{Key, KeyState};
use super::rendering::Canvas;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

/// Everything the loop polled since the previous frame.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    events: Vec<InputEvent>,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(quit_requested: bool, events: Vec<InputEvent>) -> Self {
        Self {
            quit_requested,
            events,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    #[cfg(test)]
    pub(crate) fn pressed(&self, key: Key) -> bool {
        self.events
            .iter()
            .any(|event| event.key == key && event.state == KeyState::Pressed)
    }

    pub fn with_event(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// A scene owns its simulation state. The loop calls `update` once and
/// `render` once per frame, in that order.
pub trait Scene {
    fn load(&mut self);
    fn update(&mut self, input: &InputSnapshot) -> SceneCommand;
    fn render(&self, canvas: &mut dyn Canvas);
    fn unload(&mut self);
    fn debug_title(&self) -> Option<String> {
        None
    }
    fn debug_entity_count(&self) -> usize {
        0
    }
}
