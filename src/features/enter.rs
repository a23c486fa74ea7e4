//! Click-driven enter sequence.
//!
//! ```text
//! Idle -> Triggered -> Ramping -> Committed -> Revealed -> Docked -> Departed
//! ```
//!
//! Everything before `Committed` can be cancelled with Escape. After that the
//! sequence only moves forward. All delays are chained from the due time of
//! the timer that scheduled them, so the outcome does not depend on frame rate.

use super::{Feature, FrameParams, Tick, TitleFlags};
use crate::anim::{lerp, Easing, Schedule, Timeline};
use crate::config::SequenceConfig;
use crate::host::{Key, Listener, UiEvent};
use log::{debug, info};

const LISTENERS: &[Listener] = &[Listener::Pointer, Listener::Key, Listener::MotionPreference];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Triggered,
    Ramping,
    Committed,
    Revealed,
    Docked,
    Departed,
}

impl Phase {
    pub fn is_cancellable(&self) -> bool {
        matches!(self, Phase::Triggered | Phase::Ramping)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    AutoTrigger,
    Fade,
    Solid,
    Dock,
    Navigate,
}

pub struct EnterSequence {
    config: SequenceConfig,
    phase: Phase,
    flags: TitleFlags,
    start_speed: f32,
    speed: f32,
    ramp: Timeline,
    timers: Schedule<Step>,
    navigation: Option<String>,
}

impl EnterSequence {
    pub fn new(config: &SequenceConfig, start_speed: f32) -> Self {
        Self {
            config: config.clone(),
            phase: Phase::Idle,
            flags: TitleFlags::default(),
            start_speed,
            speed: start_speed,
            ramp: Timeline::from_millis(config.ramp_ms),
            timers: Schedule::new(),
            navigation: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn flags(&self) -> TitleFlags {
        self.flags
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Starts the sequence. Returns false if it was already running.
    pub fn trigger(&mut self, tick: Tick) -> bool {
        if self.phase != Phase::Idle {
            debug!("enter trigger ignored in {:?}", self.phase);
            return false;
        }
        self.timers.cancel_key(&Step::AutoTrigger);
        self.flags.trigger_active = true;

        if tick.reduced_motion {
            self.speed = self.config.target_speed;
            self.flags.fade = true;
            self.flags.solid = true;
            self.flags.visible = true;
            self.flags.docked = true;
            self.set_phase(Phase::Docked);
            if self.config.route.is_some() {
                self.timers
                    .after(tick.now, self.config.reduced_motion_nav_ms, Step::Navigate);
            }
            return true;
        }

        self.set_phase(Phase::Triggered);
        true
    }

    /// Escape: abandons the sequence if it has not committed yet.
    pub fn cancel(&mut self) -> bool {
        if !self.phase.is_cancellable() {
            return false;
        }
        self.reset();
        info!("enter sequence cancelled");
        true
    }

    fn reset(&mut self) {
        self.timers.clear();
        self.flags = TitleFlags::default();
        self.speed = self.start_speed;
        self.ramp = Timeline::from_millis(self.config.ramp_ms);
        self.navigation = None;
        self.phase = Phase::Idle;
    }

    fn set_phase(&mut self, phase: Phase) {
        info!("enter: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn run_step(&mut self, due: f32, step: Step, tick: Tick) {
        match step {
            Step::AutoTrigger => {
                info!("no input, triggering on timer");
                self.trigger(Tick { now: due, ..tick });
            }
            Step::Fade => {
                self.flags.fade = true;
                self.timers.after(due, self.config.solid_delay_ms, Step::Solid);
            }
            Step::Solid => {
                self.flags.solid = true;
                self.flags.visible = true;
                self.set_phase(Phase::Revealed);
                self.timers.after(due, self.config.dock_delay_ms, Step::Dock);
            }
            Step::Dock => {
                self.flags.docked = true;
                self.set_phase(Phase::Docked);
                if self.config.route.is_some() {
                    self.timers.after(due, self.config.navigate_delay_ms, Step::Navigate);
                }
            }
            Step::Navigate => {
                if let Some(route) = self.config.route.clone() {
                    info!("navigating to {route}");
                    self.navigation = Some(route);
                }
                self.set_phase(Phase::Departed);
            }
        }
    }

    fn advance_ramp(&mut self, now: f32) {
        self.ramp.update(now);
        self.speed = lerp(
            self.start_speed,
            self.config.target_speed,
            self.ramp.eased_progress(Easing::EaseOutCubic),
        );
        if self.ramp.is_complete() {
            self.speed = self.config.target_speed;
            let done_at = self.ramp.end_time();
            self.set_phase(Phase::Committed);
            self.timers.after(done_at, self.config.hold_ms, Step::Fade);
        }
    }
}

impl Feature for EnterSequence {
    fn name(&self) -> &'static str {
        "enter"
    }

    fn listeners(&self) -> &'static [Listener] {
        LISTENERS
    }

    fn mount(&mut self, tick: Tick) {
        self.reset();
        if let Some(delay) = self.config.auto_trigger_ms {
            self.timers.after(tick.now, delay, Step::AutoTrigger);
        }
    }

    fn unmount(&mut self) {
        self.timers.clear();
        self.navigation = None;
    }

    fn handle_event(&mut self, event: &UiEvent, tick: Tick) -> bool {
        match event {
            UiEvent::PointerDown { .. } | UiEvent::Key(Key::Enter) | UiEvent::Key(Key::Space) => {
                self.trigger(tick)
            }
            UiEvent::Key(Key::Escape) => self.cancel(),
            UiEvent::MotionPreference(true) if self.phase.is_cancellable() => {
                // Jump to the end state the same way a reduced-motion trigger does.
                self.reset();
                self.trigger(tick)
            }
            _ => false,
        }
    }

    fn update(&mut self, tick: Tick) {
        if self.phase == Phase::Triggered {
            self.ramp.start(tick.now);
            self.set_phase(Phase::Ramping);
        }
        if self.phase == Phase::Ramping {
            self.advance_ramp(tick.now);
        }
        while let Some((due, step)) = self.timers.pop_due(tick.now) {
            self.run_step(due, step, tick);
            // An auto trigger can land us in Triggered with time left in the tick.
            if self.phase == Phase::Triggered {
                self.ramp.start(due);
                self.set_phase(Phase::Ramping);
            }
            if self.phase == Phase::Ramping {
                self.advance_ramp(tick.now);
            }
        }
    }

    fn wants_frame(&self) -> bool {
        matches!(self.phase, Phase::Triggered | Phase::Ramping)
    }

    fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn write_params(&self, params: &mut FrameParams) {
        let flags = self.flags;
        params.title.visible |= flags.visible;
        params.title.fade |= flags.fade;
        params.title.solid |= flags.solid;
        params.title.docked |= flags.docked;
        params.title.trigger_active |= flags.trigger_active;
        params.swirl_speed = self.speed;
    }

    fn take_navigation(&mut self) -> Option<String> {
        self.navigation.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn tick(now: f32) -> Tick {
        Tick {
            now,
            reduced_motion: false,
        }
    }

    fn sequence() -> EnterSequence {
        let mut seq = EnterSequence::new(&SequenceConfig::default(), 0.5);
        seq.mount(tick(0.0));
        seq
    }

    fn run_until(seq: &mut EnterSequence, from: f32, to: f32) -> f32 {
        let mut now = from;
        while now < to {
            now += FRAME;
            seq.update(tick(now));
        }
        now
    }

    #[test]
    fn full_sequence_reaches_departure() {
        let mut seq = sequence();
        assert!(seq.handle_event(&UiEvent::PointerDown { x: 1.0, y: 1.0, button: 0 }, tick(0.0)));
        assert_eq!(seq.phase(), Phase::Triggered);
        assert!(seq.wants_frame());

        run_until(&mut seq, 0.0, 0.6);
        assert_eq!(seq.phase(), Phase::Ramping);
        assert!(seq.speed() > 0.5 && seq.speed() < 6.0);

        // ramp started on the first frame: ends ~1.22, fade ~1.37, solid ~1.57, dock ~2.77
        run_until(&mut seq, 0.6, 1.3);
        assert_eq!(seq.phase(), Phase::Committed);
        assert_eq!(seq.speed(), 6.0);
        assert!(!seq.flags().fade);
        assert!(!seq.wants_frame());

        run_until(&mut seq, 1.3, 1.4);
        assert!(seq.flags().fade);
        assert!(!seq.flags().solid);

        run_until(&mut seq, 1.4, 1.6);
        assert_eq!(seq.phase(), Phase::Revealed);
        assert!(seq.flags().solid);

        run_until(&mut seq, 1.6, 2.8);
        assert_eq!(seq.phase(), Phase::Docked);
        assert!(seq.flags().docked);
        assert_eq!(seq.take_navigation(), None);

        run_until(&mut seq, 2.8, 3.6);
        assert_eq!(seq.phase(), Phase::Departed);
        assert_eq!(seq.take_navigation().as_deref(), Some("/blank"));
        assert_eq!(seq.take_navigation(), None);
        assert_eq!(seq.pending_timers(), 0);
    }

    #[test]
    fn ramp_speed_is_monotonic() {
        let mut seq = sequence();
        seq.trigger(tick(0.0));
        let mut now = 0.0;
        let mut last = seq.speed();
        while seq.phase() != Phase::Committed {
            now += FRAME;
            seq.update(tick(now));
            assert!(seq.speed() >= last);
            last = seq.speed();
            assert!(now < 2.0);
        }
    }

    #[test]
    fn repeated_trigger_is_ignored() {
        let mut seq = sequence();
        assert!(seq.trigger(tick(0.0)));
        run_until(&mut seq, 0.0, 0.3);
        let speed = seq.speed();
        assert!(!seq.trigger(tick(0.3)));
        assert_eq!(seq.phase(), Phase::Ramping);
        assert_eq!(seq.speed(), speed);
    }

    #[test]
    fn escape_mid_ramp_resets_everything() {
        let mut seq = sequence();
        seq.trigger(tick(0.0));
        run_until(&mut seq, 0.0, 0.5);
        assert_eq!(seq.phase(), Phase::Ramping);

        assert!(seq.handle_event(&UiEvent::Key(Key::Escape), tick(0.5)));
        assert_eq!(seq.phase(), Phase::Idle);
        assert_eq!(seq.speed(), 0.5);
        assert_eq!(seq.flags(), TitleFlags::default());
        assert_eq!(seq.pending_timers(), 0);
        assert!(!seq.wants_frame());

        run_until(&mut seq, 0.5, 5.0);
        assert_eq!(seq.phase(), Phase::Idle);
    }

    #[test]
    fn escape_after_commit_is_ignored() {
        let mut seq = sequence();
        seq.trigger(tick(0.0));
        run_until(&mut seq, 0.0, 1.3);
        assert_eq!(seq.phase(), Phase::Committed);
        assert!(!seq.cancel());
        run_until(&mut seq, 1.3, 1.4);
        assert!(seq.flags().fade);
    }

    #[test]
    fn reduced_motion_skips_ramp() {
        let mut seq = sequence();
        let reduced = Tick {
            now: 0.0,
            reduced_motion: true,
        };
        assert!(seq.handle_event(&UiEvent::Key(Key::Enter), reduced));
        let flags = seq.flags();
        assert!(flags.fade && flags.solid && flags.docked);
        assert_eq!(seq.phase(), Phase::Docked);
        assert!(!seq.wants_frame());
        assert_eq!(seq.pending_timers(), 1);

        seq.update(Tick {
            now: 0.06,
            reduced_motion: true,
        });
        assert_eq!(seq.take_navigation().as_deref(), Some("/blank"));
    }

    #[test]
    fn auto_trigger_fires_without_input() {
        let config = SequenceConfig {
            auto_trigger_ms: Some(3000),
            ..SequenceConfig::default()
        };
        let mut seq = EnterSequence::new(&config, 0.5);
        seq.mount(tick(0.0));
        run_until(&mut seq, 0.0, 2.9);
        assert_eq!(seq.phase(), Phase::Idle);
        run_until(&mut seq, 2.9, 3.1);
        assert_eq!(seq.phase(), Phase::Ramping);
    }

    #[test]
    fn click_cancels_pending_auto_trigger() {
        let config = SequenceConfig {
            auto_trigger_ms: Some(3000),
            route: None,
            ..SequenceConfig::default()
        };
        let mut seq = EnterSequence::new(&config, 0.5);
        seq.mount(tick(0.0));
        seq.trigger(tick(0.1));
        assert_eq!(seq.pending_timers(), 0);
        run_until(&mut seq, 0.1, 4.0);
        assert_eq!(seq.phase(), Phase::Docked);
        assert_eq!(seq.pending_timers(), 0);
    }

    #[test]
    fn one_long_tick_runs_the_whole_chain() {
        let mut seq = sequence();
        seq.trigger(tick(0.0));
        seq.update(tick(0.0));
        seq.update(tick(10.0));
        assert_eq!(seq.phase(), Phase::Departed);
        assert!(seq.flags().docked);
    }

    #[test]
    fn unmount_clears_timers() {
        let mut seq = sequence();
        seq.trigger(tick(0.0));
        run_until(&mut seq, 0.0, 1.3);
        assert!(seq.pending_timers() > 0);
        seq.unmount();
        assert_eq!(seq.pending_timers(), 0);
    }
}
