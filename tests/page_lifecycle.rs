use gala::config::{Config, Variant};
use gala::host::{Key, Listener, RecordingHost, UiEvent};
use gala::App;

const FRAME: f32 = 1.0 / 60.0;

fn gala_config() -> Config {
    let mut config = Config::default();
    config.variant = Variant::Gala;
    config.viewport.height = 1000;
    config.curtain.section_height_vh = 3.0;
    config
}

fn run(app: &mut App, host: &mut RecordingHost, seconds: f32) {
    let frames = (seconds / FRAME).ceil() as usize;
    for _ in 0..frames {
        app.update(FRAME, host);
    }
}

#[test]
fn scroll_then_enter_then_leave() {
    let mut host = RecordingHost::default();
    let mut app = App::new(&gala_config());
    app.mount(&mut host);
    assert!(host.listening.contains(&Listener::Scroll { passive: true }));
    assert!(host.listening.contains(&Listener::Key));

    app.handle_event(UiEvent::Scroll { section_top: -1000.0 });
    assert!((app.frame().progress - 0.5).abs() < 1e-6);
    run(&mut app, &mut host, 3.0);
    let params = app.frame();
    assert_eq!(params.smoothed_progress, 0.5);
    // thresholds 0, 0.25, 0.5, 0.75
    assert!(params.words[..2].iter().all(|w| w.opacity == 1.0));
    assert!(params.words[2..].iter().all(|w| w.opacity == 0.0));

    app.handle_event(UiEvent::Scroll { section_top: -5000.0 });
    assert_eq!(app.frame().progress, 1.0);

    app.handle_event(UiEvent::PointerDown {
        x: 0.0,
        y: 0.0,
        button: 0,
    });
    run(&mut app, &mut host, 0.5);
    let mid = app.frame();
    assert!(mid.title.trigger_active);
    assert!(!mid.title.fade);

    run(&mut app, &mut host, 4.0);
    let end = app.frame();
    assert!(end.title.fade && end.title.solid && end.title.docked);
    assert_eq!(end.swirl_speed, Config::default().sequence.target_speed);
    assert_eq!(host.navigations, vec!["/blank".to_string()]);

    app.unmount(&mut host);
    assert!(host.listening.is_empty());
    assert_eq!(app.pending_timers(), 0);
    assert!(!app.wants_frame());
}

#[test]
fn escape_mid_ramp_returns_to_idle() {
    let mut host = RecordingHost::default();
    let mut app = App::new(&gala_config());
    app.mount(&mut host);

    app.handle_event(UiEvent::Key(Key::Enter));
    run(&mut app, &mut host, 0.6);
    assert!(app.wants_frame());

    app.handle_event(UiEvent::Key(Key::Escape));
    let params = app.frame();
    assert_eq!(params.swirl_speed, Config::default().swirl.speed);
    assert!(!params.title.fade && !params.title.docked && !params.title.trigger_active);
    assert_eq!(app.pending_timers(), 0);

    run(&mut app, &mut host, 5.0);
    assert!(host.navigations.is_empty());

    // The sequence can be started again after cancelling.
    app.handle_event(UiEvent::Key(Key::Space));
    run(&mut app, &mut host, 5.0);
    assert_eq!(host.navigations.len(), 1);
}

#[test]
fn reduced_motion_click_navigates_quickly() {
    let mut config = gala_config();
    config.reduced_motion = true;
    let mut host = RecordingHost::default();
    let mut app = App::new(&config);
    app.mount(&mut host);

    app.handle_event(UiEvent::PointerDown {
        x: 0.0,
        y: 0.0,
        button: 0,
    });
    let title = app.frame().title;
    assert!(title.fade && title.solid && title.docked);
    assert!(!app.wants_frame());

    // 50ms fits in a handful of frames.
    run(&mut app, &mut host, 0.1);
    assert_eq!(host.navigations, vec!["/blank".to_string()]);
}

#[test]
fn title_card_page_docks_on_its_own() {
    let config = Config {
        variant: Variant::TitleCard,
        ..Config::default()
    };
    let mut host = RecordingHost::default();
    let mut app = App::new(&config);
    app.mount(&mut host);
    assert_eq!(app.pending_timers(), 2);

    run(&mut app, &mut host, 0.5);
    let title = app.frame().title;
    assert!(title.visible && !title.docked);

    run(&mut app, &mut host, 1.0);
    assert!(app.frame().title.docked);
    assert!(app.is_settled());
}
