//! The top-level shell component.
//!
//! Invariants:
//! - `loading` starts `true` and only ever goes to `false`. Reloads and
//!   failed loads never bring it back.
//! - `can_go_back` is whatever the latest navigation-state report said.
//! - While mounted with a back handler service, exactly one back-press
//!   listener is registered, bound to the current `can_go_back`.

use app_api::{BackHandler, SharedBackHandler, SplashScreen, Subscription, ViewRef};
use bus::ViewEvent;
use core_types::{Appearance, EdgeInsets, NavState};

use crate::config::ShellConfig;
use crate::render::{Fill, Indicator, OverlayNode, RenderNode, RenderTree, WebViewNode};
use crate::theme::Theme;

pub struct Shell {
    config: ShellConfig,

    loading: bool,
    can_go_back: bool,

    splash: Box<dyn SplashScreen>,
    view: ViewRef,

    mounted: bool,
    back_handler: Option<SharedBackHandler>,
    back_subscription: Option<Subscription>,
}

impl Shell {
    pub fn new(config: ShellConfig, splash: Box<dyn SplashScreen>) -> Self {
        Self {
            config,
            loading: true,
            can_go_back: false,
            splash,
            view: ViewRef::new(),
            mounted: false,
            back_handler: None,
            back_subscription: None,
        }
    }

    // -- Lifecycle ---

    /// Mounts the shell. `back_handler` is only present on hosts with a
    /// hardware back button. Returns the ref the host attaches its browser
    /// view to.
    pub fn mount(&mut self, back_handler: Option<SharedBackHandler>) -> ViewRef {
        log::debug!("shell mounted, loading {}", self.config.target_url);
        self.mounted = true;
        self.back_handler = back_handler;
        self.register_back_listener();
        self.view.clone()
    }

    pub fn unmount(&mut self) {
        if let Some(sub) = self.back_subscription.take() {
            sub.remove();
        }
        self.back_handler = None;
        self.mounted = false;
    }

    // -- Browser view events ---

    pub fn handle_view_event(&mut self, evt: ViewEvent) {
        match evt {
            ViewEvent::LoadStart { url } => self.on_load_start(&url),
            ViewEvent::LoadEnd { url } => self.on_load_end(&url),
            ViewEvent::LoadError { url, description } => self.on_load_error(&url, &description),
            ViewEvent::NavigationStateChange(nav) => self.on_navigation_state_change(&nav),
        }
    }

    pub fn on_load_start(&mut self, url: &str) {
        log::info!("load started: {url}");
    }

    pub fn on_load_end(&mut self, url: &str) {
        log::info!("load finished: {url}");
        if self.loading {
            log::debug!("shell state: loading -> loaded");
            self.loading = false;
        }
        self.splash.hide();
    }

    /// A failed load is treated like one that has not finished yet.
    pub fn on_load_error(&mut self, url: &str, description: &str) {
        log::warn!("load failed: {url}: {description}");
    }

    pub fn on_navigation_state_change(&mut self, nav: &NavState) {
        if nav.can_go_back == self.can_go_back {
            return;
        }
        log::debug!("shell state: can_go_back -> {}", nav.can_go_back);
        self.can_go_back = nav.can_go_back;
        self.register_back_listener();
    }

    /// Returns whether the press was consumed. Uses the last reported
    /// history state; the view itself is not queried.
    pub fn handle_back_press(&self) -> bool {
        back_press(self.can_go_back, &self.view)
    }

    // -- Rendering ---

    pub fn theme(&self, appearance: Appearance) -> Theme {
        Theme::for_appearance(appearance)
    }

    pub fn render(&self, appearance: Appearance, insets: EdgeInsets) -> RenderTree {
        let theme = self.theme(appearance);
        let indicator = Indicator::large(theme.spinner);

        let web_view = WebViewNode {
            url: self.config.target_url.clone(),
            fill: Fill::Parent,
            config: self.config.web_view.clone(),
            loading_view: self.config.web_view.start_in_loading_state.then_some(OverlayNode {
                fill: Fill::Parent,
                background: theme.background,
                indicator,
            }),
        };

        let mut children = vec![
            RenderNode::StatusBar {
                style: theme.status_bar,
                background: theme.background,
            },
            RenderNode::WebView(web_view),
        ];
        if self.loading {
            children.push(RenderNode::LoadingOverlay(OverlayNode {
                fill: Fill::Viewport,
                background: theme.background,
                indicator,
            }));
        }

        RenderTree {
            root: RenderNode::Container {
                fill: Fill::Parent,
                padding_top: insets.top,
                padding_bottom: insets.bottom,
                background: theme.background,
                children,
            },
        }
    }

    // -- Accessors ---

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_go_back(&self) -> bool {
        self.can_go_back
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn target_url(&self) -> &str {
        &self.config.target_url
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn view_ref(&self) -> ViewRef {
        self.view.clone()
    }

    // -- Internal Helpers ---

    /// Swaps the listener for one bound to the current `can_go_back`.
    fn register_back_listener(&mut self) {
        if !self.mounted {
            return;
        }
        let Some(handler) = self.back_handler.as_ref() else {
            return;
        };
        if let Some(old) = self.back_subscription.take() {
            old.remove();
        }
        let can_go_back = self.can_go_back;
        let view = self.view.clone();
        self.back_subscription = Some(BackHandler::add_listener(
            handler,
            Box::new(move || back_press(can_go_back, &view)),
        ));
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn back_press(can_go_back: bool, view: &ViewRef) -> bool {
    if !can_go_back {
        return false;
    }
    match view.current() {
        Some(view) => {
            view.borrow_mut().go_back();
            true
        }
        None => false,
    }
}
