//! Browser view backends hosted by the platform window.

use app_api::BrowserView;
use egui::Color32;
use shell::WebViewNode;

pub mod fetch;
#[cfg(feature = "webview")]
pub mod native;

pub use fetch::FetchView;
#[cfg(feature = "webview")]
pub use native::NativeView;

/// What a view needs to know to lay itself out for one frame.
pub struct ViewFrame<'a> {
    pub node: &'a WebViewNode,
    /// The shell's loading overlay is stacked above the view this frame.
    pub overlay_present: bool,
    pub foreground: Color32,
}

pub enum ViewBackend {
    Fetch(FetchView),
    #[cfg(feature = "webview")]
    Native(NativeView),
}

impl ViewBackend {
    pub fn poll(&mut self) {
        match self {
            ViewBackend::Fetch(view) => view.poll(),
            #[cfg(feature = "webview")]
            ViewBackend::Native(_) => {}
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, frame: &ViewFrame<'_>) {
        match self {
            ViewBackend::Fetch(view) => view.show(ui, frame),
            #[cfg(feature = "webview")]
            ViewBackend::Native(view) => view.show(ui, frame),
        }
    }
}

impl BrowserView for ViewBackend {
    fn go_back(&mut self) {
        match self {
            ViewBackend::Fetch(view) => view.go_back(),
            #[cfg(feature = "webview")]
            ViewBackend::Native(view) => view.go_back(),
        }
    }
}
