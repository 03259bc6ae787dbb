use core_types::{Appearance, Color, StatusBarStyle};

/// Colors for one appearance mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub spinner: Color,
    pub status_bar: StatusBarStyle,
}

impl Theme {
    pub const LIGHT: Theme = Theme {
        background: Color::rgb(0xff, 0xff, 0xff),
        spinner: Color::rgb(0x00, 0x00, 0x00),
        status_bar: StatusBarStyle::DarkContent,
    };

    pub const DARK: Theme = Theme {
        background: Color::rgb(0x12, 0x12, 0x12),
        spinner: Color::rgb(0xff, 0xff, 0xff),
        status_bar: StatusBarStyle::LightContent,
    };

    /// Anything but an explicit dark preference gets the light variant.
    pub fn for_appearance(appearance: Appearance) -> Theme {
        if appearance.is_dark() {
            Theme::DARK
        } else {
            Theme::LIGHT
        }
    }
}
