use std::cell::{Cell, RefCell};
use std::rc::Rc;

use app_api::{BackHandler, BrowserView, SharedBrowserView, SplashScreen};
use bus::{Bus, ViewEvent};
use core_types::{Appearance, EdgeInsets, NavState};
use shell::{Fill, IndicatorSize, Shell, ShellConfig, Theme, splash};

#[derive(Default)]
struct SplashLog {
    held: Cell<u32>,
    hidden: Cell<u32>,
}

struct RecordingSplash(Rc<SplashLog>);

impl SplashScreen for RecordingSplash {
    fn prevent_auto_hide(&mut self) {
        self.0.held.set(self.0.held.get() + 1);
    }
    fn hide(&mut self) {
        self.0.hidden.set(self.0.hidden.get() + 1);
    }
}

struct RecordingView {
    backs: Rc<Cell<u32>>,
}

impl BrowserView for RecordingView {
    fn go_back(&mut self) {
        self.backs.set(self.backs.get() + 1);
    }
}

struct Harness {
    shell: Shell,
    splash: Rc<SplashLog>,
    backs: Rc<Cell<u32>>,
    back_handler: Rc<RefCell<BackHandler>>,
    _view: SharedBrowserView,
}

/// Boots the way the binary does: startup hook first, then the shell.
fn boot() -> Harness {
    let log = Rc::new(SplashLog::default());
    let mut native = RecordingSplash(log.clone());
    splash::startup(&mut native);

    let mut shell = Shell::new(ShellConfig::default(), Box::new(native));
    let back_handler = BackHandler::new_shared();
    let view_ref = shell.mount(Some(back_handler.clone()));

    let backs = Rc::new(Cell::new(0));
    let view: SharedBrowserView = Rc::new(RefCell::new(RecordingView { backs: backs.clone() }));
    view_ref.attach(&view);

    Harness {
        shell,
        splash: log,
        backs,
        back_handler,
        _view: view,
    }
}

fn nav(url: &str, can_go_back: bool) -> ViewEvent {
    ViewEvent::NavigationStateChange(NavState {
        url: url.into(),
        can_go_back,
        ..NavState::default()
    })
}

#[test]
fn first_load_removes_overlay_and_dismisses_splash_once() {
    let mut h = boot();
    assert_eq!(h.splash.held.get(), 1);

    let (bus, _cmd_rx) = Bus::new();
    bus.evt_tx
        .send(ViewEvent::LoadStart { url: shell::TARGET_URL.into() })
        .unwrap();
    bus.evt_tx.send(nav(shell::TARGET_URL, false)).unwrap();
    bus.evt_tx
        .send(ViewEvent::LoadEnd { url: shell::TARGET_URL.into() })
        .unwrap();
    for evt in bus.drain_events() {
        h.shell.handle_view_event(evt);
    }

    assert!(!h.shell.is_loading());
    assert_eq!(h.splash.hidden.get(), 1);

    let tree = h.shell.render(Appearance::Light, EdgeInsets::ZERO);
    assert!(tree.overlay().is_none());
    let view = tree.web_view().expect("web view is always rendered");
    assert_eq!(view.fill, Fill::Parent);
    assert_eq!(view.url, shell::TARGET_URL);
}

#[test]
fn without_events_the_overlay_stays_up() {
    let h = boot();
    for appearance in [Appearance::Light, Appearance::Dark, Appearance::Unspecified] {
        let tree = h.shell.render(appearance, EdgeInsets::vertical(44.0, 34.0));
        let theme = Theme::for_appearance(appearance);
        let overlay = tree.overlay().expect("overlay while loading");
        assert_eq!(overlay.fill, Fill::Viewport);
        assert_eq!(overlay.background, theme.background);
        assert_eq!(overlay.indicator.size, IndicatorSize::Large);
        assert_eq!(overlay.indicator.color, theme.spinner);
    }
    assert_eq!(h.splash.hidden.get(), 0);
}

#[test]
fn loading_flag_never_returns_after_first_completion() {
    let mut h = boot();
    h.shell.handle_view_event(ViewEvent::LoadEnd { url: shell::TARGET_URL.into() });
    let follow = "https://www.meshur.co/kategori";
    h.shell.handle_view_event(ViewEvent::LoadStart { url: follow.into() });
    h.shell.handle_view_event(nav(follow, true));
    assert!(!h.shell.is_loading());
    assert!(h.shell.render(Appearance::Dark, EdgeInsets::ZERO).overlay().is_none());

    h.shell.handle_view_event(ViewEvent::LoadEnd { url: follow.into() });
    assert!(!h.shell.is_loading());
    assert_eq!(h.splash.hidden.get(), 2);
}

#[test]
fn can_go_back_follows_the_latest_report() {
    let mut h = boot();
    let reports = [true, false, false, true, true, false, true];
    for (i, value) in reports.iter().enumerate() {
        h.shell.handle_view_event(nav(&format!("https://www.meshur.co/{i}"), *value));
    }
    assert!(h.shell.can_go_back());
    h.shell.handle_view_event(nav(shell::TARGET_URL, false));
    assert!(!h.shell.can_go_back());
}

#[test]
fn hardware_back_without_history_falls_through() {
    let h = boot();
    assert!(!BackHandler::dispatch(&h.back_handler));
    assert!(!h.shell.handle_back_press());
    assert_eq!(h.backs.get(), 0);
}

#[test]
fn hardware_back_with_history_goes_back_exactly_once() {
    let mut h = boot();
    h.shell.handle_view_event(nav("https://www.meshur.co/a", true));

    assert!(BackHandler::dispatch(&h.back_handler));
    assert_eq!(h.backs.get(), 1);
}

#[test]
fn hardware_back_after_view_is_gone_falls_through() {
    let mut h = boot();
    h.shell.handle_view_event(nav("https://www.meshur.co/a", true));
    h.shell.view_ref().detach();

    assert!(!BackHandler::dispatch(&h.back_handler));
    assert_eq!(h.backs.get(), 0);
}

#[test]
fn dropping_the_shell_deregisters_back_listener() {
    let h = boot();
    let handler = h.back_handler.clone();
    assert_eq!(handler.borrow().len(), 1);
    drop(h);
    assert!(handler.borrow().is_empty());
}
