use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::{thread, time::Duration};

use app_api::{BackHandler, SharedBackHandler, SharedBrowserView, ViewRef};
use bus::{Bus, ViewCommand};
use core_types::{Appearance, StatusBarStyle};
use shell::{Shell, ShellConfig, Theme};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

pub mod device;
pub mod error;
pub mod gpu;
pub mod history;
pub mod page;
pub mod paint;
pub mod splash;
pub mod view;

pub use error::PlatformError;
pub use splash::NativeSplash;

use gpu::Gfx;
use view::{ViewBackend, ViewFrame};

enum UserEvent {
    Tick,
}

/// Opens the shell window and runs it until the user leaves. `splash` must
/// already have been through the startup hook.
pub fn run(config: ShellConfig, splash: NativeSplash) -> Result<(), PlatformError> {
    #[cfg(all(feature = "webview", target_os = "linux"))]
    gtk::init()?;

    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    let proxy = event_loop.create_proxy();

    let mut app = PlatformApp::new(config, splash, proxy);
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct PlatformApp {
    shell: Shell,
    splash: NativeSplash,

    bus: Bus,
    #[cfg_attr(feature = "webview", allow(dead_code))]
    cmd_rx: Option<Receiver<ViewCommand>>,
    view_ref: ViewRef,
    view: Option<Rc<RefCell<ViewBackend>>>,
    back_handler: SharedBackHandler,

    proxy: Option<EventLoopProxy<UserEvent>>,
    ticker_started: bool,
    gfx: Option<Gfx>,

    appearance: Appearance,
    applied_status_bar: Option<StatusBarStyle>,
    title_shows_splash: Option<bool>,
    failure: Option<PlatformError>,
}

impl PlatformApp {
    fn new(config: ShellConfig, splash: NativeSplash, proxy: EventLoopProxy<UserEvent>) -> Self {
        let mut shell = Shell::new(config, Box::new(splash.clone()));
        let back_handler = BackHandler::new_shared();
        let view_ref = shell.mount(Some(back_handler.clone()));
        let (bus, cmd_rx) = Bus::new();

        Self {
            shell,
            splash,
            bus,
            cmd_rx: Some(cmd_rx),
            view_ref,
            view: None,
            back_handler,
            proxy: Some(proxy),
            ticker_started: false,
            gfx: None,
            appearance: Appearance::Unspecified,
            applied_status_bar: None,
            title_shows_splash: None,
            failure: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let attrs = Window::default_attributes()
            .with_title(self.splash.decorate_title(&self.shell.config().window_title))
            .with_inner_size(LogicalSize::new(480.0, 860.0));
        let window = Arc::new(event_loop.create_window(attrs)?);
        self.appearance = device::appearance_of(window.theme());

        let gfx = Gfx::new(window)?;
        let backend = self.create_view(&gfx.window)?;
        let view = Rc::new(RefCell::new(backend));
        let shared: SharedBrowserView = view.clone();
        self.view_ref.attach(&shared);

        self.view = Some(view);
        self.gfx = Some(gfx);
        Ok(())
    }

    #[cfg(not(feature = "webview"))]
    fn create_view(&mut self, _window: &Window) -> Result<ViewBackend, PlatformError> {
        let (bus, cmd_rx) = match self.cmd_rx.take() {
            Some(cmd_rx) => (&self.bus, cmd_rx),
            None => {
                // resumed again after a suspend: start over on a fresh bus
                let (bus, cmd_rx) = Bus::new();
                self.bus = bus;
                (&self.bus, cmd_rx)
            }
        };
        let mut view = view::FetchView::new(&self.shell.config().web_view, bus, cmd_rx);
        view.load(self.shell.target_url());
        Ok(ViewBackend::Fetch(view))
    }

    #[cfg(feature = "webview")]
    fn create_view(&mut self, window: &Window) -> Result<ViewBackend, PlatformError> {
        let view = view::NativeView::new(
            window,
            self.shell.target_url(),
            &self.shell.config().web_view,
            self.bus.evt_tx.clone(),
        )?;
        Ok(ViewBackend::Native(view))
    }

    fn start_ticker(&mut self) {
        if self.ticker_started {
            return;
        }
        self.ticker_started = true;

        if let Some(proxy) = self.proxy.clone() {
            thread::spawn(move || {
                let frame = Duration::from_millis(16); // ~60Hz
                loop {
                    if proxy.send_event(UserEvent::Tick).is_err() {
                        break;
                    }
                    thread::sleep(frame);
                }
            });
        }
    }

    /// Moves view output into the shell, in the order it was produced.
    fn pump(&mut self) {
        if let Some(view) = self.view.as_ref() {
            view.borrow_mut().poll();
        }
        for evt in self.bus.drain_events() {
            self.shell.handle_view_event(evt);
        }
        self.sync_title();
    }

    fn sync_title(&mut self) {
        let visible = self.splash.is_visible();
        if self.title_shows_splash == Some(visible) {
            return;
        }
        if let Some(gfx) = self.gfx.as_ref() {
            gfx.window
                .set_title(&self.splash.decorate_title(&self.shell.config().window_title));
            self.title_shows_splash = Some(visible);
        }
    }

    fn back_pressed(&mut self, event_loop: &ActiveEventLoop) {
        if BackHandler::dispatch(&self.back_handler) {
            return;
        }
        log::info!("back press not consumed, leaving");
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.shell.unmount();
        self.view_ref.detach();
        event_loop.exit();
    }

    fn redraw(&mut self) {
        let Some(gfx) = self.gfx.as_mut() else {
            return;
        };
        let tree = self
            .shell
            .render(self.appearance, device::safe_area_insets(&gfx.window));
        let theme = self.shell.theme(self.appearance);

        if let Some((style, _)) = tree.status_bar() {
            if self.applied_status_bar != Some(style) {
                gfx.window.set_theme(Some(device::window_theme_for(style)));
                self.applied_status_bar = Some(style);
            }
        }

        let view = self.view.clone();
        let presented = gfx.paint(paint::color32(theme.background), |ctx| {
            paint::paint_tree(ctx, &tree, &mut |ui, node, overlay_present| {
                if let Some(view) = view.as_ref() {
                    view.borrow_mut().show(
                        ui,
                        &ViewFrame {
                            node,
                            overlay_present,
                            foreground: foreground(&theme),
                        },
                    );
                }
            });
        });
        if presented {
            self.splash.first_frame_presented();
        }
    }
}

fn foreground(theme: &Theme) -> egui::Color32 {
    paint::color32(theme.spinner)
}

impl ApplicationHandler<UserEvent> for PlatformApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gfx.is_none() {
            if let Err(err) = self.init(event_loop) {
                log::error!("platform init failed: {err}");
                self.failure = Some(err);
                event_loop.exit();
                return;
            }
        }
        self.start_ticker();
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // the surface goes with the window; everything is rebuilt on resume
        log::info!("suspended, dropping window and view");
        self.view_ref.detach();
        self.view = None;
        self.gfx = None;
        self.applied_status_bar = None;
        self.title_shows_splash = None;
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Tick => {
                self.pump();
                if let Some(gfx) = self.gfx.as_ref() {
                    gfx.window.request_redraw();
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        #[cfg(all(feature = "webview", target_os = "linux"))]
        while gtk::events_pending() {
            gtk::main_iteration_do(false);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(gfx) = self.gfx.as_mut() {
            gfx.on_window_event(&event);
        }
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(new_size) => {
                if let Some(gfx) = self.gfx.as_mut() {
                    gfx.resize(new_size);
                }
            }
            WindowEvent::ThemeChanged(theme) => {
                self.appearance = device::appearance_of(Some(theme));
                log::debug!(
                    "appearance -> {:?} (background {})",
                    self.appearance,
                    self.shell.theme(self.appearance).background.to_hex()
                );
            }
            WindowEvent::KeyboardInput { event, .. }
                if device::is_back_key(&event.logical_key, event.state, event.repeat) =>
            {
                self.back_pressed(event_loop);
            }
            WindowEvent::MouseInput { state, button, .. }
                if device::is_back_button(button, state) =>
            {
                self.back_pressed(event_loop);
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}
