use super::{Feature, FrameParams, Tick, TitleFlags};
use crate::anim::Schedule;
use crate::config::TitleConfig;
use crate::host::{Listener, UiEvent};
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Show,
    Dock,
}

/// Title that fades in shortly after mount, then docks to the corner.
pub struct TitleCard {
    text: String,
    show_delay_ms: u64,
    dock_delay_ms: u64,
    flags: TitleFlags,
    timers: Schedule<Step>,
}

impl TitleCard {
    pub fn new(config: &TitleConfig) -> Self {
        Self {
            text: config.text.clone(),
            show_delay_ms: config.show_delay_ms,
            dock_delay_ms: config.dock_delay_ms,
            flags: TitleFlags::default(),
            timers: Schedule::new(),
        }
    }

    pub fn flags(&self) -> TitleFlags {
        self.flags
    }

    fn show(&mut self) {
        self.flags.visible = true;
        self.flags.solid = true;
    }

    fn dock(&mut self) {
        self.flags.docked = true;
        info!("title {:?} docked", self.text);
    }
}

impl Feature for TitleCard {
    fn name(&self) -> &'static str {
        "title-card"
    }

    fn listeners(&self) -> &'static [Listener] {
        &[Listener::MotionPreference]
    }

    fn mount(&mut self, tick: Tick) {
        self.flags = TitleFlags::default();
        self.timers.clear();
        if tick.reduced_motion {
            self.show();
            self.dock();
            return;
        }
        // Both delays count from mount.
        self.timers.after(tick.now, self.show_delay_ms, Step::Show);
        self.timers.after(tick.now, self.dock_delay_ms, Step::Dock);
    }

    fn unmount(&mut self) {
        self.timers.clear();
    }

    fn handle_event(&mut self, event: &UiEvent, _tick: Tick) -> bool {
        if let UiEvent::MotionPreference(true) = event {
            self.timers.clear();
            self.show();
            if !self.flags.docked {
                self.dock();
            }
            return true;
        }
        false
    }

    fn update(&mut self, tick: Tick) {
        while let Some((_, step)) = self.timers.pop_due(tick.now) {
            match step {
                Step::Show => self.show(),
                Step::Dock => self.dock(),
            }
        }
    }

    fn wants_frame(&self) -> bool {
        false
    }

    fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn write_params(&self, params: &mut FrameParams) {
        params.title.visible |= self.flags.visible;
        params.title.solid |= self.flags.solid;
        params.title.docked |= self.flags.docked;
    }
}
