use super::easing::Easing;

/// Time-bound progress: `clamp((now - start) / duration, 0, 1)`.
#[derive(Debug, Clone)]
pub struct Timeline {
    pub start_time: f32,
    pub duration: f32,
    pub current_time: f32,
}

impl Timeline {
    pub fn new(duration: f32) -> Self {
        Self {
            start_time: 0.0,
            duration,
            current_time: 0.0,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(super::ms(millis))
    }

    pub fn start(&mut self, now: f32) {
        self.start_time = now;
        self.current_time = now;
    }

    pub fn update(&mut self, now: f32) {
        self.current_time = now;
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let elapsed = self.current_time - self.start_time;
        (elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Clock time at which the timeline reaches 1.
    pub fn end_time(&self) -> f32 {
        self.start_time + self.duration.max(0.0)
    }

    pub fn eased_progress(&self, easing: Easing) -> f32 {
        easing.apply(self.progress())
    }
}
