use crate::config::{Config, Variant};
use crate::features::curtain::Curtain;
use crate::features::enter::EnterSequence;
use crate::features::title_card::TitleCard;
use crate::features::{Feature, FrameParams, Tick};
use crate::host::{Host, Listener, UiEvent};
use log::{debug, info};

/// Guard for the per-frame loop so a second start request is a no-op.
#[derive(Debug, Default)]
pub struct FrameLoop {
    running: bool,
    frames: u64,
}

impl FrameLoop {
    /// Returns false if the loop was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// One mounted page: the features of a variant plus their shared clock.
pub struct App {
    pub variant: Variant,
    time: f32,
    /// Only changed through `UiEvent::MotionPreference`, which also lets the
    /// features jump to their end state.
    reduced_motion: bool,
    features: Vec<Box<dyn Feature>>,
    listeners: Vec<Listener>,
    frame_loop: FrameLoop,
    mounted: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            variant: config.variant,
            time: 0.0,
            reduced_motion: config.reduced_motion,
            features: build_features(config),
            listeners: Vec::new(),
            frame_loop: FrameLoop::default(),
            mounted: false,
        }
    }

    fn tick(&self) -> Tick {
        Tick {
            now: self.time,
            reduced_motion: self.reduced_motion,
        }
    }

    /// Seconds since the page was created.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn mount(&mut self, host: &mut dyn Host) {
        if self.mounted {
            return;
        }
        let tick = self.tick();
        for feature in &mut self.features {
            for listener in feature.listeners() {
                if !self.listeners.contains(listener) {
                    host.listen(*listener);
                    self.listeners.push(*listener);
                }
            }
            feature.mount(tick);
        }
        self.mounted = true;
        info!(
            "mounted {:?} page with {} listeners",
            self.variant,
            self.listeners.len()
        );
        self.sync_frame_loop();
    }

    /// Deregisters every listener and cancels every timer and frame.
    pub fn unmount(&mut self, host: &mut dyn Host) {
        if !self.mounted {
            return;
        }
        for listener in self.listeners.drain(..) {
            host.unlisten(listener);
        }
        for feature in &mut self.features {
            feature.unmount();
        }
        self.frame_loop.stop();
        self.mounted = false;
        info!("unmounted {:?} page", self.variant);
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        if !self.mounted {
            return;
        }
        if let UiEvent::MotionPreference(reduced) = event {
            if reduced != self.reduced_motion {
                info!("reduced motion: {reduced}");
            }
            self.reduced_motion = reduced;
        }
        let tick = self.tick();
        for feature in &mut self.features {
            if feature.handle_event(&event, tick) {
                debug!("{} handled {:?}", feature.name(), event);
            }
        }
        self.sync_frame_loop();
    }

    /// Advances the clock by `dt` seconds and recomputes every feature.
    /// Navigation requested during the tick is forwarded to the host.
    pub fn update(&mut self, dt: f32, host: &mut dyn Host) {
        if !self.mounted {
            return;
        }
        self.time += dt;
        let tick = self.tick();
        for feature in &mut self.features {
            feature.update(tick);
        }
        if self.frame_loop.is_running() {
            self.frame_loop.frames += 1;
        }
        self.sync_frame_loop();

        let navigation = self
            .features
            .iter_mut()
            .find_map(|feature| feature.take_navigation());
        if let Some(route) = navigation {
            host.navigate_to(&route);
        }
    }

    fn sync_frame_loop(&mut self) {
        let wanted = self.features.iter().any(|f| f.wants_frame());
        if wanted {
            if self.frame_loop.start() {
                debug!("frame loop started at {:.3}s", self.time);
            }
        } else if self.frame_loop.is_running() {
            self.frame_loop.stop();
            debug!(
                "frame loop stopped at {:.3}s after {} frames",
                self.time,
                self.frame_loop.frames()
            );
        }
    }

    pub fn wants_frame(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn pending_timers(&self) -> usize {
        self.features.iter().map(|f| f.pending_timers()).sum()
    }

    /// True when nothing is animating and no timer is waiting.
    pub fn is_settled(&self) -> bool {
        !self.wants_frame() && self.pending_timers() == 0
    }

    pub fn frame(&self) -> FrameParams {
        let mut params = FrameParams::default();
        for feature in &self.features {
            feature.write_params(&mut params);
        }
        params
    }
}

fn build_features(config: &Config) -> Vec<Box<dyn Feature>> {
    let curtain = || -> Box<dyn Feature> { Box::new(Curtain::new(config)) };
    let enter = || -> Box<dyn Feature> {
        Box::new(EnterSequence::new(&config.sequence, config.swirl.speed))
    };
    match config.variant {
        Variant::Curtain => vec![curtain()],
        Variant::TitleCard => vec![Box::new(TitleCard::new(&config.title)) as Box<dyn Feature>],
        Variant::Enter => vec![enter()],
        Variant::Gala => vec![curtain(), enter()],
    }
}
