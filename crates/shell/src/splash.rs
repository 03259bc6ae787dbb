use app_api::SplashScreen;

/// Process start hook, run by the entry point before any [`crate::Shell`]
/// exists. The shell dismisses the splash on its first load completion.
pub fn startup(splash: &mut dyn SplashScreen) {
    log::debug!("holding startup splash until first page load");
    splash.prevent_auto_hide();
}
