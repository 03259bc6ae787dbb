use egui_wgpu::wgpu;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("graphics device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[cfg(feature = "webview")]
    #[error("web view creation failed: {0}")]
    WebView(#[from] wry::Error),
    #[cfg(all(feature = "webview", target_os = "linux"))]
    #[error("gtk init failed: {0}")]
    Gtk(#[from] gtk::glib::BoolError),
}
