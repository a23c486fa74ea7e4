use super::words::WordReveal;
use super::{Feature, FrameParams, Tick};
use crate::anim::{Easing, Smoother};
use crate::config::Config;
use crate::host::{Listener, UiEvent};
use crate::progress::{ScrollProgress, Viewport};
use log::{debug, info};

const LISTENERS: &[Listener] = &[Listener::Scroll { passive: true }, Listener::Resize];

/// Scroll-bound curtain: the curtain lifts by one viewport height over a
/// pinned section while the words behind it fade in.
pub struct Curtain {
    scroll: ScrollProgress,
    smoother: Smoother,
    easing: Easing,
    section_height_vh: f32,
    words: WordReveal,
    moving: bool,
}

impl Curtain {
    pub fn new(config: &Config) -> Self {
        let viewport = Viewport::new(config.viewport.width as f32, config.viewport.height as f32);
        let section_height_vh = config.curtain.section_height_vh;
        let smoothing = &config.curtain.smoothing;
        let words = WordReveal::new(
            config.words.words(),
            config.words.resolved_thresholds(),
            config.words.ramp,
        )
        .with_scale(config.words.base_scale, config.words.spread);

        Self {
            scroll: ScrollProgress::new(viewport.height * section_height_vh, viewport),
            smoother: Smoother::new(smoothing.alpha, smoothing.epsilon),
            easing: config.curtain.easing,
            section_height_vh,
            words,
            moving: false,
        }
    }

    pub fn progress(&self) -> f32 {
        self.scroll.progress()
    }

    pub fn smoothed(&self) -> f32 {
        self.smoother.value()
    }

    /// Curtain translation in pixels for the current smoothed progress.
    pub fn offset(&self) -> f32 {
        -(self.easing.apply(self.smoother.value()) * self.scroll.viewport().height)
    }

    fn retarget(&mut self, tick: Tick) {
        self.smoother.set_target(self.scroll.progress());
        if tick.reduced_motion {
            self.smoother.snap();
            self.moving = false;
        } else {
            self.moving = !self.smoother.is_settled();
        }
    }
}

impl Feature for Curtain {
    fn name(&self) -> &'static str {
        "curtain"
    }

    fn listeners(&self) -> &'static [Listener] {
        LISTENERS
    }

    fn mount(&mut self, tick: Tick) {
        self.smoother.reset(self.scroll.progress());
        self.moving = false;
        debug!("curtain mounted at {:.3}s", tick.now);
    }

    fn unmount(&mut self) {
        self.moving = false;
    }

    fn handle_event(&mut self, event: &UiEvent, tick: Tick) -> bool {
        match *event {
            UiEvent::Scroll { section_top } => {
                self.scroll.set_section_top(section_top);
                self.retarget(tick);
                true
            }
            UiEvent::Resize { width, height } => {
                let viewport = Viewport::new(width, height);
                self.scroll.resize(viewport, height * self.section_height_vh);
                self.retarget(tick);
                true
            }
            UiEvent::MotionPreference(true) => {
                self.smoother.snap();
                self.moving = false;
                false
            }
            _ => false,
        }
    }

    fn update(&mut self, tick: Tick) {
        if !self.moving {
            return;
        }
        if tick.reduced_motion {
            self.smoother.snap();
            self.moving = false;
        } else {
            self.moving = self.smoother.tick();
        }
        if !self.moving {
            info!("curtain settled at progress {:.3}", self.smoother.value());
        }
    }

    fn wants_frame(&self) -> bool {
        self.moving
    }

    fn pending_timers(&self) -> usize {
        0
    }

    fn write_params(&self, params: &mut FrameParams) {
        params.progress = self.scroll.progress();
        params.smoothed_progress = self.smoother.value();
        params.curtain_offset = self.offset();
        params.words = self.words.styles(self.smoother.value());
    }
}
