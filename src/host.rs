//! The page's view of its environment: input listeners and navigation.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// Passive listeners never block the host's scrolling.
    Scroll { passive: bool },
    Resize,
    Pointer,
    Key,
    MotionPreference,
}

pub trait Host {
    fn listen(&mut self, listener: Listener);
    fn unlisten(&mut self, listener: Listener);
    fn navigate_to(&mut self, route: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Other(u32),
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Top of the scroll section relative to the viewport.
    Scroll { section_top: f32 },
    Resize { width: f32, height: f32 },
    PointerDown { x: f32, y: f32, button: u32 },
    Key(Key),
    MotionPreference(bool),
}

/// Host that remembers what was asked of it.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub listening: Vec<Listener>,
    pub navigations: Vec<String>,
}

impl Host for RecordingHost {
    fn listen(&mut self, listener: Listener) {
        if !self.listening.contains(&listener) {
            self.listening.push(listener);
        }
    }

    fn unlisten(&mut self, listener: Listener) {
        self.listening.retain(|l| *l != listener);
    }

    fn navigate_to(&mut self, route: &str) {
        self.navigations.push(route.to_string());
    }
}
