//! Host device signals: appearance, safe area, back requests, window theme.

use core_types::{Appearance, EdgeInsets, StatusBarStyle};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Theme, Window};

pub fn appearance_of(theme: Option<Theme>) -> Appearance {
    match theme {
        Some(Theme::Dark) => Appearance::Dark,
        Some(Theme::Light) => Appearance::Light,
        None => Appearance::Unspecified,
    }
}

/// Window decorations matching a status bar style: dark glyphs sit on a
/// light bar.
pub fn window_theme_for(style: StatusBarStyle) -> Theme {
    match style {
        StatusBarStyle::DarkContent => Theme::Light,
        StatusBarStyle::LightContent => Theme::Dark,
    }
}

/// Desktop windows have no notches or home indicators.
pub fn safe_area_insets(_window: &Window) -> EdgeInsets {
    EdgeInsets::ZERO
}

/// Keys acting as the hardware back button.
pub fn is_back_key(key: &Key, state: ElementState, repeat: bool) -> bool {
    state == ElementState::Pressed
        && !repeat
        && matches!(key, Key::Named(NamedKey::Escape | NamedKey::BrowserBack))
}

pub fn is_back_button(button: MouseButton, state: ElementState) -> bool {
    button == MouseButton::Back && state == ElementState::Pressed
}
