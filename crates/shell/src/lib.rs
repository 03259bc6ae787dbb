pub mod config;
pub mod render;
pub mod shell;
pub mod splash;
pub mod theme;

pub use config::{CacheMode, OriginWhitelist, ShellConfig, TARGET_URL, WebViewConfig};
pub use render::{Fill, Indicator, IndicatorSize, OverlayNode, RenderNode, RenderTree, WebViewNode};
pub use shell::Shell;
pub use theme::Theme;
