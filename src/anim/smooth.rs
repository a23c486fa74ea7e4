//! Single-pole low-pass filter used to give scroll-driven motion some inertia.

pub const DEFAULT_ALPHA: f32 = 0.08;
pub const DEFAULT_EPSILON: f32 = 0.001;

#[derive(Debug, Clone)]
pub struct Smoother {
    value: f32,
    target: f32,
    /// Fraction of the remaining gap closed per tick. Lower is heavier.
    alpha: f32,
    epsilon: f32,
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA, DEFAULT_EPSILON)
    }
}

impl Smoother {
    pub fn new(alpha: f32, epsilon: f32) -> Self {
        Self {
            value: 0.0,
            target: 0.0,
            alpha: alpha.clamp(f32::MIN_POSITIVE, 1.0),
            epsilon: epsilon.max(f32::EPSILON),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jumps straight to the target.
    pub fn snap(&mut self) {
        self.value = self.target;
    }

    pub fn reset(&mut self, value: f32) {
        self.value = value;
        self.target = value;
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target
    }

    /// Advances one tick. Returns true while still moving.
    pub fn tick(&mut self) -> bool {
        if (self.target - self.value).abs() < self.epsilon {
            self.value = self.target;
            return false;
        }
        self.value += (self.target - self.value) * self.alpha;
        if (self.target - self.value).abs() < self.epsilon {
            self.value = self.target;
            return false;
        }
        true
    }
}
