pub mod anim;
pub mod app;
pub mod config;
pub mod features;
pub mod host;
pub mod progress;

pub use app::App;
pub use config::{Config, Variant};
pub use features::FrameParams;
