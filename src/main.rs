use anyhow::Result;
use clap::Parser;
use gala::config::{Config, Variant};
use gala::host::{Host, Key, Listener, UiEvent};
use gala::App;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const CLICK_FRAME: u64 = 30;
const SCROLL_FRAMES: u64 = 120;

/// Rehearse a reveal sequence without a display: scripted input on a fixed
/// frame clock, with the frame parameters written to the log.
#[derive(Parser, Debug)]
#[command(name = "gala", version, about)]
struct Args {
    /// Config file (defaults to the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Swirl preset: OxbloodParlor, EmeraldParlor or IvorySalon
    #[arg(long)]
    preset: Option<String>,

    #[arg(long)]
    reduced_motion: bool,

    /// Press Escape on this frame
    #[arg(long)]
    cancel_at: Option<u64>,

    #[arg(long, default_value_t = 900)]
    max_frames: u64,

    /// Sleep between frames instead of running as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Write the effective config to the user config dir before running
    #[arg(long)]
    save_config: bool,
}

/// Host that logs listener changes and stops the run on navigation.
#[derive(Default)]
struct ConsoleHost {
    listening: Vec<Listener>,
    navigated: Option<String>,
}

impl Host for ConsoleHost {
    fn listen(&mut self, listener: Listener) {
        debug!("listen {:?}", listener);
        self.listening.push(listener);
    }

    fn unlisten(&mut self, listener: Listener) {
        debug!("unlisten {:?}", listener);
        self.listening.retain(|l| *l != listener);
    }

    fn navigate_to(&mut self, route: &str) {
        info!("navigate -> {route}");
        self.navigated = Some(route.to_string());
    }
}

/// Input a visitor would produce on the given frame.
fn scripted_input(variant: Variant, frame: u64, config: &Config) -> Option<UiEvent> {
    let vh = config.viewport.height as f32;
    let range = vh * (config.curtain.section_height_vh - 1.0);

    let scroll = || {
        (frame <= SCROLL_FRAMES).then(|| UiEvent::Scroll {
            section_top: -(range * 1.1) * frame as f32 / SCROLL_FRAMES as f32,
        })
    };

    match variant {
        Variant::Curtain => scroll(),
        Variant::TitleCard => None,
        Variant::Enter => (frame == CLICK_FRAME).then_some(UiEvent::PointerDown {
            x: config.viewport.width as f32 / 2.0,
            y: vh / 2.0,
            button: 0,
        }),
        Variant::Gala if frame == SCROLL_FRAMES + CLICK_FRAME => Some(UiEvent::Key(Key::Enter)),
        Variant::Gala => scroll(),
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("falling back to default config: {e:#}");
            Config::default()
        }),
    };
    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    if let Some(preset) = &args.preset {
        config.apply_preset(preset)?;
    }
    if args.reduced_motion {
        config.reduced_motion = true;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    if args.save_config {
        config.save()?;
        info!("saved config");
    }
    info!(
        "rehearsing {:?} at {} fps (reduced motion: {})",
        config.variant, config.fps_cap, config.reduced_motion
    );

    let mut host = ConsoleHost::default();
    let mut app = App::new(&config);
    app.mount(&mut host);

    let dt = 1.0 / config.fps_cap as f32;
    let frame_time = Duration::from_secs_f32(dt);
    let mut last_title = app.frame().title;

    for frame in 0..args.max_frames {
        let started = Instant::now();

        if let Some(event) = scripted_input(config.variant, frame, &config) {
            app.handle_event(event);
        }
        if args.cancel_at == Some(frame) {
            info!("escape pressed on frame {frame}");
            app.handle_event(UiEvent::Key(Key::Escape));
        }

        app.update(dt, &mut host);

        let params = app.frame();
        debug!(
            "frame {frame}: progress={:.3} smoothed={:.3} curtain={:.1}px speed={:.2}",
            params.progress, params.smoothed_progress, params.curtain_offset, params.swirl_speed
        );
        if params.title != last_title {
            info!("t={:.3}s title {:?}", app.time(), params.title);
            last_title = params.title;
        }

        if host.navigated.is_some() {
            break;
        }
        let script_done = frame > SCROLL_FRAMES + CLICK_FRAME;
        if script_done && app.is_settled() {
            info!("settled after {frame} frames");
            break;
        }

        if args.realtime {
            std::thread::sleep(frame_time.saturating_sub(started.elapsed()));
        }
    }

    let params = app.frame();
    info!(
        "final: progress={:.3} curtain={:.1}px words={:?}",
        params.progress,
        params.curtain_offset,
        params.words.iter().map(|w| w.opacity).collect::<Vec<_>>()
    );

    app.unmount(&mut host);
    if !host.listening.is_empty() {
        warn!("listeners left registered: {:?}", host.listening);
    }
    Ok(())
}
