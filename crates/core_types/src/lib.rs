pub type RequestId = u64;

/// Device light/dark preference as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
    /// The host did not report a preference.
    #[default]
    Unspecified,
}

impl Appearance {
    pub fn is_dark(self) -> bool {
        matches!(self, Appearance::Dark)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub fn to_hex(self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Foreground style of the system status bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusBarStyle {
    /// Dark glyphs, for light backgrounds.
    DarkContent,
    /// Light glyphs, for dark backgrounds.
    LightContent,
}

/// Safe-area margins in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeInsets {
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub fn vertical(top: f32, bottom: f32) -> Self {
        Self {
            top,
            bottom,
            ..Self::ZERO
        }
    }
}

/// Snapshot of an embedded browser's navigation state, reported on every
/// navigation-state change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    pub url: String,
    pub title: String,
    pub loading: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_output_drops_opaque_alpha() {
        assert_eq!(Color::rgb(0, 0, 0).to_hex(), "#000000");
        let translucent = Color { a: 0x10, ..Color::rgb(1, 2, 3) };
        assert_eq!(translucent.to_hex(), "#01020310");
    }

    #[test]
    fn unspecified_appearance_is_not_dark() {
        assert!(!Appearance::default().is_dark());
        assert!(!Appearance::Light.is_dark());
        assert!(Appearance::Dark.is_dark());
    }
}
