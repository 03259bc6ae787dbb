use std::cell::Cell;
use std::rc::Rc;

use app_api::SplashScreen;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplashState {
    /// Would be dismissed as soon as the first frame is up.
    AutoHide,
    /// Held until someone calls `hide`.
    Held,
    Hidden,
}

/// Desktop stand-in for a launch splash: while it is up the window title
/// carries a loading suffix. Clones share state, so the host can watch the
/// splash it handed to the shell.
#[derive(Clone)]
pub struct NativeSplash {
    state: Rc<Cell<SplashState>>,
    hide_calls: Rc<Cell<u32>>,
}

impl NativeSplash {
    pub fn new() -> Self {
        Self {
            state: Rc::new(Cell::new(SplashState::AutoHide)),
            hide_calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn state(&self) -> SplashState {
        self.state.get()
    }

    pub fn is_visible(&self) -> bool {
        self.state.get() != SplashState::Hidden
    }

    pub fn hide_calls(&self) -> u32 {
        self.hide_calls.get()
    }

    /// Called by the host once its first frame is on screen.
    pub fn first_frame_presented(&self) {
        if self.state.get() == SplashState::AutoHide {
            log::debug!("splash auto-hidden after first frame");
            self.state.set(SplashState::Hidden);
        }
    }

    pub fn decorate_title(&self, title: &str) -> String {
        if self.is_visible() {
            format!("{title} (loading…)")
        } else {
            title.to_string()
        }
    }
}

impl Default for NativeSplash {
    fn default() -> Self {
        Self::new()
    }
}

impl SplashScreen for NativeSplash {
    fn prevent_auto_hide(&mut self) {
        if self.state.get() == SplashState::AutoHide {
            self.state.set(SplashState::Held);
        }
    }

    fn hide(&mut self) {
        self.hide_calls.set(self.hide_calls.get() + 1);
        if self.state.get() != SplashState::Hidden {
            log::debug!("splash dismissed");
            self.state.set(SplashState::Hidden);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_splash_survives_first_frame() {
        let mut splash = NativeSplash::new();
        splash.prevent_auto_hide();
        splash.first_frame_presented();
        assert_eq!(splash.state(), SplashState::Held);
        assert_eq!(splash.decorate_title("Meshur"), "Meshur (loading…)");

        splash.hide();
        assert_eq!(splash.state(), SplashState::Hidden);
        assert_eq!(splash.decorate_title("Meshur"), "Meshur");
    }

    #[test]
    fn unheld_splash_goes_away_with_first_frame() {
        let splash = NativeSplash::new();
        splash.first_frame_presented();
        assert!(!splash.is_visible());
    }

    #[test]
    fn hide_is_idempotent_and_counted_across_clones() {
        let watcher = NativeSplash::new();
        let mut handed_out = watcher.clone();
        handed_out.prevent_auto_hide();
        handed_out.hide();
        handed_out.hide();
        assert_eq!(watcher.state(), SplashState::Hidden);
        assert_eq!(watcher.hide_calls(), 2);

        // no way back once hidden
        handed_out.prevent_auto_hide();
        assert_eq!(watcher.state(), SplashState::Hidden);
    }
}
