pub mod curtain;
pub mod enter;
pub mod title_card;
pub mod words;

use crate::host::{Listener, UiEvent};
use words::WordStyle;

/// Per-tick inputs shared by every feature on a page.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Seconds since the page was mounted.
    pub now: f32,
    pub reduced_motion: bool,
}

/// Title card flags, only ever advanced forward once the sequence commits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TitleFlags {
    pub visible: bool,
    pub fade: bool,
    pub solid: bool,
    pub docked: bool,
    pub trigger_active: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameParams {
    pub progress: f32,
    pub smoothed_progress: f32,
    /// Vertical curtain translation in pixels (negative is up).
    pub curtain_offset: f32,
    pub words: Vec<WordStyle>,
    pub title: TitleFlags,
    pub swirl_speed: f32,
}

pub trait Feature {
    fn name(&self) -> &'static str;
    fn listeners(&self) -> &'static [Listener];
    fn mount(&mut self, tick: Tick);
    fn unmount(&mut self);
    /// Returns true if the event was consumed.
    fn handle_event(&mut self, event: &UiEvent, tick: Tick) -> bool;
    fn update(&mut self, tick: Tick);
    fn wants_frame(&self) -> bool;
    fn pending_timers(&self) -> usize;
    fn write_params(&self, params: &mut FrameParams);
    fn take_navigation(&mut self) -> Option<String> {
        None
    }
}
