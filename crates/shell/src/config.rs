//! Compile-time configuration of the shell and its embedded browser.
//!
//! Nothing here is read at runtime; the target site is fixed.

use url::Url;
use wildmatch::WildMatchPattern;

pub const TARGET_URL: &str = "https://www.meshur.co/";

const WINDOW_TITLE: &str = "Meshur";

#[derive(Clone, Debug, PartialEq)]
pub struct ShellConfig {
    pub target_url: String,
    pub window_title: String,
    pub web_view: WebViewConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            target_url: TARGET_URL.to_string(),
            window_title: WINDOW_TITLE.to_string(),
            web_view: WebViewConfig::default(),
        }
    }
}

/// Only the engine's default policy is offered: cached resources when
/// fresh, otherwise the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheMode {
    LoadDefault,
}

/// Options handed to the embedded browser view.
#[derive(Clone, Debug, PartialEq)]
pub struct WebViewConfig {
    pub start_in_loading_state: bool,
    pub javascript_enabled: bool,
    pub dom_storage_enabled: bool,
    pub back_forward_gestures: bool,
    pub inline_media_playback: bool,
    pub media_requires_user_action: bool,
    pub cache_enabled: bool,
    pub cache_mode: CacheMode,
    pub horizontal_scroll_indicator: bool,
    pub vertical_scroll_indicator: bool,
    pub bounces: bool,
    pub origin_whitelist: OriginWhitelist,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            start_in_loading_state: true,
            javascript_enabled: true,
            dom_storage_enabled: true,
            back_forward_gestures: true,
            inline_media_playback: true,
            media_requires_user_action: false,
            cache_enabled: true,
            cache_mode: CacheMode::LoadDefault,
            horizontal_scroll_indicator: false,
            vertical_scroll_indicator: false,
            bounces: true,
            origin_whitelist: OriginWhitelist::http_only(),
        }
    }
}

/// Glob patterns matched against a URL's origin (`scheme://host[:port]`).
/// `*` matches any run of characters and `?` a single one.
#[derive(Clone, Debug, PartialEq)]
pub struct OriginWhitelist {
    patterns: Vec<String>,
    compiled: Vec<OriginPattern>,
}

pub type OriginPattern = WildMatchPattern<'*', '?'>;

impl OriginWhitelist {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let compiled = patterns.iter().map(|p| OriginPattern::new(p)).collect();
        Self { patterns, compiled }
    }

    /// Secure and insecure HTTP destinations only.
    pub fn http_only() -> Self {
        Self::new(["https://*", "http://*"])
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn allows(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let origin = parsed.origin();
        if !origin.is_tuple() {
            // custom schemes have opaque origins
            return false;
        }
        let origin = origin.ascii_serialization();
        self.compiled.iter().any(|pattern| pattern.matches(&origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_whitelist_admits_http_and_https_only() {
        let list = OriginWhitelist::http_only();
        assert!(list.allows("https://www.meshur.co/"));
        assert!(list.allows("https://www.meshur.co/some/path?q=1"));
        assert!(list.allows("http://example.com:8080/"));
        assert!(!list.allows("intent://scan/#Intent;scheme=zxing;end"));
        assert!(!list.allows("mailto:someone@example.com"));
        assert!(!list.allows("file:///etc/passwd"));
        assert!(!list.allows("not a url"));
    }

    #[test]
    fn patterns_can_pin_a_host() {
        let list = OriginWhitelist::new(["https://*.meshur.co"]);
        assert!(list.allows("https://www.meshur.co/x"));
        assert!(!list.allows("https://meshur.co.evil.com/"));
        assert!(!list.allows("http://www.meshur.co/"));
    }

    #[test]
    fn wildcards_cover_ports_and_single_characters() {
        let list = OriginWhitelist::new(["http://localhost:*", "https://www?.meshur.co"]);
        assert!(list.allows("http://localhost:8080/x"));
        assert!(!list.allows("http://localhost/"));
        assert!(list.allows("https://www2.meshur.co/"));
        assert!(!list.allows("https://www.meshur.co/"));
    }

    #[test]
    fn defaults_match_the_shell_contract() {
        let config = ShellConfig::default();
        assert_eq!(config.target_url, TARGET_URL);
        assert!(config.target_url.starts_with("https://"));

        let view = &config.web_view;
        assert!(view.start_in_loading_state);
        assert!(view.back_forward_gestures);
        assert!(view.inline_media_playback);
        assert!(!view.media_requires_user_action);
        assert_eq!(view.cache_mode, CacheMode::LoadDefault);
        assert!(!view.horizontal_scroll_indicator && !view.vertical_scroll_indicator);
        assert!(view.bounces);
        assert_eq!(view.origin_whitelist.patterns(), ["https://*", "http://*"]);
    }
}
