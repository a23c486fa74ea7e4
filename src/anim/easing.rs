use serde::{Deserialize, Serialize};

const BACK_C1: f32 = 1.70158;
const BACK_C3: f32 = BACK_C1 + 1.0;

pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// `1 - (1 - t)^3`. Fast start, slow finish.
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Back easing: overshoots past 1 before settling at exactly 1.
pub fn ease_out_back(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let u = t - 1.0;
    1.0 + BACK_C3 * u.powi(3) + BACK_C1 * u.powi(2)
}

/// Ease-out-cubic that picks up a little back-easing overshoot near the end
/// of the motion, so the curtain seems to carry weight as it lands.
///
/// The back term is blended in linearly once the cubic curve passes
/// `threshold`, and the result never exceeds `cap`.
pub fn heavy(t: f32, threshold: f32, cap: f32) -> f32 {
    let eased = ease_out_cubic(t);
    if eased <= threshold || threshold >= 1.0 {
        return eased;
    }
    let weight = ((eased - threshold) / (1.0 - threshold)).clamp(0.0, 1.0);
    lerp(eased, ease_out_back(t), weight).min(cap)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Selectable easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseInOut,
    EaseOutCubic,
    Heavy {
        #[serde(default = "default_overshoot_threshold")]
        threshold: f32,
        #[serde(default = "default_overshoot_cap")]
        cap: f32,
    },
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Heavy {
            threshold: default_overshoot_threshold(),
            cap: default_overshoot_cap(),
        }
    }
}

fn default_overshoot_threshold() -> f32 {
    0.85
}

fn default_overshoot_cap() -> f32 {
    1.03
}

impl Easing {
    pub fn apply(&self, t: f32) -> f32 {
        match *self {
            Easing::Linear => t.clamp(0.0, 1.0),
            Easing::EaseInOut => ease_in_out(t),
            Easing::EaseOutCubic => ease_out_cubic(t),
            Easing::Heavy { threshold, cap } => heavy(t, threshold, cap),
        }
    }
}
