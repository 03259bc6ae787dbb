//! System web view backend.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use app_api::BrowserView;
use bus::ViewEvent;
use shell::WebViewConfig;
use winit::window::Window;
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::{PageLoadEvent, Rect, WebView, WebViewBuilder};

use super::ViewFrame;
use crate::history::NavHistory;

pub struct NativeView {
    webview: WebView,
    history: Arc<Mutex<NavHistory>>,
    visible: bool,
    bounds: Option<egui::Rect>,
}

impl NativeView {
    pub fn new(
        window: &Window,
        url: &str,
        config: &WebViewConfig,
        evt_tx: Sender<ViewEvent>,
    ) -> Result<Self, wry::Error> {
        log::debug!(
            "system web view keeps its own javascript={} cache_mode={:?} \
             scroll indicators (h={} v={}) and bounces={} behaviour",
            config.javascript_enabled,
            config.cache_mode,
            config.horizontal_scroll_indicator,
            config.vertical_scroll_indicator,
            config.bounces,
        );

        let history = Arc::new(Mutex::new(NavHistory::new()));
        let whitelist = config.origin_whitelist.clone();
        let page_history = history.clone();

        let webview = WebViewBuilder::new()
            .with_url(url)
            .with_visible(false)
            .with_bounds(Rect {
                position: LogicalPosition::new(0.0, 0.0).into(),
                size: LogicalSize::new(0.0, 0.0).into(),
            })
            .with_devtools(false)
            // no persistent storage or cache when either is switched off
            .with_incognito(!config.dom_storage_enabled || !config.cache_enabled)
            .with_autoplay(config.inline_media_playback && !config.media_requires_user_action)
            .with_back_forward_navigation_gestures(config.back_forward_gestures)
            .with_navigation_handler(move |target: String| {
                let allowed = whitelist.allows(&target);
                if !allowed {
                    log::warn!("navigation to {target} blocked by origin whitelist");
                }
                allowed
            })
            // Only full document loads arrive here. Same-document navigations
            // (history.pushState, fragment changes) fire no page-load event, so
            // on single-page sites the history lags until the next real load.
            .with_on_page_load_handler(move |event, page_url| {
                let Ok(mut history) = page_history.lock() else {
                    return;
                };
                match event {
                    PageLoadEvent::Started => {
                        let observed = history.observe(&page_url);
                        log::debug!("{page_url}: {observed:?}");
                        let _ = evt_tx.send(ViewEvent::LoadStart { url: page_url });
                        let _ = evt_tx.send(ViewEvent::NavigationStateChange(
                            history.nav_state("", true),
                        ));
                    }
                    PageLoadEvent::Finished => {
                        history.settle(&page_url);
                        let _ = evt_tx.send(ViewEvent::LoadEnd { url: page_url });
                        let _ = evt_tx.send(ViewEvent::NavigationStateChange(
                            history.nav_state("", false),
                        ));
                    }
                }
            })
            .build_as_child(window)?;

        Ok(Self {
            webview,
            history,
            visible: false,
            bounds: None,
        })
    }

    /// Positions the native view over the content area. It is hidden while
    /// the shell's overlay is up, since native views always paint above
    /// the window surface.
    pub fn show(&mut self, ui: &mut egui::Ui, frame: &ViewFrame<'_>) {
        let rect = ui.max_rect();
        if self.bounds != Some(rect) {
            let result = self.webview.set_bounds(Rect {
                position: LogicalPosition::new(rect.min.x as f64, rect.min.y as f64).into(),
                size: LogicalSize::new(rect.width() as f64, rect.height() as f64).into(),
            });
            match result {
                Ok(()) => self.bounds = Some(rect),
                Err(err) => log::warn!("could not resize web view: {err}"),
            }
        }

        let visible = !frame.overlay_present;
        if self.visible != visible {
            match self.webview.set_visible(visible) {
                Ok(()) => self.visible = visible,
                Err(err) => log::warn!("could not toggle web view: {err}"),
            }
        }
    }
}

impl BrowserView for NativeView {
    fn go_back(&mut self) {
        let can_go_back = self
            .history
            .lock()
            .map(|history| history.can_go_back())
            .unwrap_or(false);
        if !can_go_back {
            return;
        }
        // the history entry moves when the engine reports the load
        if let Err(err) = self.webview.evaluate_script("history.back()") {
            log::warn!("history.back() failed: {err}");
        }
    }
}
