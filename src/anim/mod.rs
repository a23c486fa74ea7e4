pub mod easing;
pub mod schedule;
pub mod smooth;
pub mod timeline;

pub use easing::{ease_in_out, ease_out_back, ease_out_cubic, heavy, lerp, Easing};
pub use schedule::Schedule;
pub use smooth::Smoother;
pub use timeline::Timeline;

/// Converts a configured delay in milliseconds to clock seconds.
pub fn ms(millis: u64) -> f32 {
    millis as f32 / 1000.0
}
