//! Built-in browser view: fetches documents with `net` and shows a readable
//! summary with clickable links.
//!
//! Invariants:
//! - `nav_gen` is bumped for every fetch; results tagged with an older
//!   generation are dropped.
//! - `history` is only moved by `load`, `follow` and `go_back`, never by
//!   fetch results (apart from redirects rewriting the current entry).

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use app_api::BrowserView;
use bus::{Bus, ViewCommand, ViewEvent};
use core_types::RequestId;
use egui::{RichText, ScrollArea, scroll_area::ScrollBarVisibility};
use net::{FetchResult, fetch_document, is_html};
use shell::{IndicatorSize, OriginWhitelist, WebViewConfig};

use super::ViewFrame;
use crate::history::NavHistory;
use crate::page::PageSummary;
use crate::paint;

pub struct FetchView {
    whitelist: OriginWhitelist,
    show_scroll_bar: bool,

    history: NavHistory,
    nav_gen: RequestId,
    loading: bool,
    page: Option<PageSummary>,
    truncated: bool,
    last_error: Option<String>,

    evt_tx: Sender<ViewEvent>,
    cmd_tx: Sender<ViewCommand>,
    cmd_rx: Receiver<ViewCommand>,
    results_tx: Sender<(RequestId, FetchResult)>,
    results_rx: Receiver<(RequestId, FetchResult)>,
}

impl FetchView {
    pub fn new(config: &WebViewConfig, bus: &Bus, cmd_rx: Receiver<ViewCommand>) -> Self {
        log::debug!(
            "fetch view ignores javascript={} dom_storage={} cache={} ({:?}) \
             horizontal_scroll_indicator={} bounces={} back_forward_gestures={}",
            config.javascript_enabled,
            config.dom_storage_enabled,
            config.cache_enabled,
            config.cache_mode,
            config.horizontal_scroll_indicator,
            config.bounces,
            config.back_forward_gestures,
        );
        let (results_tx, results_rx) = mpsc::channel();
        Self {
            whitelist: config.origin_whitelist.clone(),
            show_scroll_bar: config.vertical_scroll_indicator,
            history: NavHistory::new(),
            nav_gen: 0,
            loading: false,
            page: None,
            truncated: false,
            last_error: None,
            evt_tx: bus.evt_tx.clone(),
            cmd_tx: bus.cmd_tx.clone(),
            cmd_rx,
            results_tx,
            results_rx,
        }
    }

    // -- Navigation Methods ---

    /// Initial navigation.
    pub fn load(&mut self, url: &str) {
        self.follow(url.to_string());
    }

    pub fn follow(&mut self, url: String) {
        if !self.whitelist.allows(&url) {
            log::warn!("navigation to {url} blocked by origin whitelist");
            return;
        }
        self.history.visit(url.clone());
        self.start_fetch(url);
    }

    /// Handles queued UI commands and finished fetches.
    pub fn poll(&mut self) {
        while let Ok(cmd) = self.cmd_rx.try_recv() {
            match cmd {
                ViewCommand::Follow { url } => self.follow(url),
            }
        }
        while let Ok((request_id, result)) = self.results_rx.try_recv() {
            self.on_result(request_id, result);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn history(&self) -> &NavHistory {
        &self.history
    }

    // -- Painting ---

    pub fn show(&mut self, ui: &mut egui::Ui, frame: &ViewFrame<'_>) {
        let Some(page) = self.page.as_ref() else {
            if let Some(loading_view) = frame.node.loading_view.as_ref() {
                let rect = ui.max_rect();
                paint::fill_with_indicator(ui, rect, loading_view);
            }
            if let Some(err) = &self.last_error {
                ui.label(RichText::new(err).color(frame.foreground));
            }
            return;
        };

        let visibility = if self.show_scroll_bar {
            ScrollBarVisibility::VisibleWhenNeeded
        } else {
            ScrollBarVisibility::AlwaysHidden
        };
        let mut clicked = None;
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .scroll_bar_visibility(visibility)
            .show(ui, |ui| {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if !page.title.is_empty() {
                        ui.heading(RichText::new(&page.title).color(frame.foreground));
                    }
                    if self.loading {
                        ui.add(
                            egui::Spinner::new()
                                .size(IndicatorSize::Small.extent())
                                .color(frame.foreground),
                        );
                    }
                });
                ui.label(RichText::new(&page.url).small().color(frame.foreground));
                if let Some(err) = &self.last_error {
                    ui.label(RichText::new(err).color(frame.foreground).italics());
                }
                ui.separator();
                ui.label(RichText::new(&page.preview).color(frame.foreground));
                if self.truncated {
                    ui.label(
                        RichText::new("Page cut short: only the first part was downloaded.")
                            .small()
                            .italics()
                            .color(frame.foreground),
                    );
                }
                if !page.links.is_empty() {
                    ui.separator();
                    for link in &page.links {
                        if ui.link(RichText::new(&link.text)).on_hover_text(&link.href).clicked() {
                            clicked = Some(link.href.clone());
                        }
                    }
                }
            });

        if let Some(url) = clicked {
            let _ = self.cmd_tx.send(ViewCommand::Follow { url });
        }
    }

    // -- Internal Helpers ---

    fn start_fetch(&mut self, url: String) {
        self.nav_gen = self.nav_gen.wrapping_add(1);
        let request_id = self.nav_gen;
        self.loading = true;
        self.last_error = None;

        self.emit(ViewEvent::LoadStart { url: url.clone() });
        self.emit_nav_state();

        let tx = self.results_tx.clone();
        fetch_document(
            url,
            Arc::new(move |result| {
                let _ = tx.send((request_id, result));
            }),
        );
    }

    fn on_result(&mut self, request_id: RequestId, result: FetchResult) {
        if request_id != self.nav_gen {
            log::debug!("dropping stale result for {}", result.requested_url);
            return;
        }
        self.loading = false;

        match result.outcome {
            Ok(doc) => {
                log::debug!(
                    "{} -> {} ({} bytes, {} ms)",
                    result.requested_url,
                    doc.status,
                    doc.body.len(),
                    result.duration_ms
                );
                if doc.url != result.requested_url {
                    self.history.replace_current(doc.url.clone());
                }
                let mut page = if is_html(&doc.content_type) {
                    PageSummary::from_html(&doc.url, &doc.body)
                } else {
                    PageSummary::plain(&doc.url, &doc.body)
                };
                // follow() would refuse these anyway
                page.links.retain(|link| self.whitelist.allows(&link.href));
                self.page = Some(page);
                self.truncated = doc.truncated;
                self.emit(ViewEvent::LoadEnd { url: doc.url });
            }
            Err(err) => {
                let description = err.to_string();
                self.last_error = Some(format!("Could not load {}: {description}", result.requested_url));
                self.emit(ViewEvent::LoadError {
                    url: result.requested_url,
                    description,
                });
            }
        }
        self.emit_nav_state();
    }

    fn emit_nav_state(&self) {
        let title = match (&self.page, self.loading) {
            (Some(page), false) => page.title.as_str(),
            _ => "",
        };
        self.emit(ViewEvent::NavigationStateChange(
            self.history.nav_state(title, self.loading),
        ));
    }

    fn emit(&self, evt: ViewEvent) {
        let _ = self.evt_tx.send(evt);
    }
}

impl BrowserView for FetchView {
    fn go_back(&mut self) {
        if let Some(url) = self.history.back().map(str::to_string) {
            self.start_fetch(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use net::{FetchError, FetchedDocument};

    // nothing listens on the discard port, so background fetches fail fast
    const DEAD: &str = "http://127.0.0.1:9/";

    fn view() -> (FetchView, Bus) {
        let (bus, cmd_rx) = Bus::new();
        let view = FetchView::new(&WebViewConfig::default(), &bus, cmd_rx);
        (view, bus)
    }

    fn ok(url: &str, body: &str) -> FetchResult {
        ok_with(url, body, false)
    }

    fn ok_with(url: &str, body: &str, truncated: bool) -> FetchResult {
        FetchResult {
            requested_url: url.into(),
            duration_ms: 1,
            outcome: Ok(FetchedDocument {
                url: url.into(),
                status: 200,
                content_type: Some("text/html".into()),
                body: body.into(),
                truncated,
            }),
        }
    }

    fn nav_states(events: &[ViewEvent]) -> Vec<(bool, bool)> {
        events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::NavigationStateChange(nav) => Some((nav.loading, nav.can_go_back)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn blocked_origin_does_not_navigate() {
        let (mut view, bus) = view();
        view.load("intent://open");
        assert!(bus.drain_events().is_empty());
        assert!(view.history().is_empty());
        assert!(!view.is_loading());
    }

    #[test]
    fn successful_load_reports_start_state_and_end() {
        let (mut view, bus) = view();
        view.load(DEAD);
        view.on_result(view.nav_gen, ok(DEAD, "<title>Home</title><a href='/x'>x</a>"));

        let events = bus.drain_events();
        assert_eq!(events[0], ViewEvent::LoadStart { url: DEAD.into() });
        assert!(events.contains(&ViewEvent::LoadEnd { url: DEAD.into() }));
        assert_eq!(nav_states(&events), [(true, false), (false, false)]);
        assert!(!view.is_loading());
        assert_eq!(view.page.as_ref().unwrap().links.len(), 1);
    }

    #[test]
    fn links_outside_the_whitelist_are_not_listed() {
        let (mut view, _bus) = view();
        view.load(DEAD);
        view.on_result(
            view.nav_gen,
            ok(
                DEAD,
                "<a href='mailto:x@y.z'>mail</a><a href='tel:+90123'>call</a><a href='/ok'>ok</a>",
            ),
        );
        let hrefs: Vec<_> = view
            .page
            .as_ref()
            .unwrap()
            .links
            .iter()
            .map(|link| link.href.as_str())
            .collect();
        assert_eq!(hrefs, ["http://127.0.0.1:9/ok"]);
    }

    #[test]
    fn truncation_is_remembered_per_page() {
        let (mut view, _bus) = view();
        view.load(DEAD);
        view.on_result(view.nav_gen, ok_with(DEAD, "big", true));
        assert!(view.truncated);

        view.follow("http://127.0.0.1:9/small".into());
        view.on_result(view.nav_gen, ok("http://127.0.0.1:9/small", "small"));
        assert!(!view.truncated);
    }

    #[test]
    fn following_then_going_back_toggles_can_go_back() {
        let (mut view, bus) = view();
        view.load(DEAD);
        view.on_result(view.nav_gen, ok(DEAD, "home"));
        let next = "http://127.0.0.1:9/next";
        view.follow(next.into());
        view.on_result(view.nav_gen, ok(next, "next"));
        assert!(view.history().can_go_back());

        view.go_back();
        view.on_result(view.nav_gen, ok(DEAD, "home"));
        assert!(!view.history().can_go_back());

        let states = nav_states(&bus.drain_events());
        assert_eq!(states.last(), Some(&(false, false)));
        assert!(states.contains(&(false, true)));
    }

    #[test]
    fn stale_results_are_ignored() {
        let (mut view, bus) = view();
        view.load(DEAD);
        let first = view.nav_gen;
        view.follow("http://127.0.0.1:9/second".into());
        bus.drain_events();

        view.on_result(first, ok(DEAD, "old"));
        assert!(view.is_loading());
        assert!(bus.drain_events().is_empty());
    }

    #[test]
    fn failure_is_reported_but_not_as_load_end() {
        let (mut view, bus) = view();
        view.load(DEAD);
        view.on_result(
            view.nav_gen,
            FetchResult {
                requested_url: DEAD.into(),
                duration_ms: 5,
                outcome: Err(FetchError::Status(503)),
            },
        );
        let events = bus.drain_events();
        assert!(events.iter().any(|e| matches!(e, ViewEvent::LoadError { .. })));
        assert!(!events.iter().any(|e| matches!(e, ViewEvent::LoadEnd { .. })));
        assert!(view.last_error.is_some());
    }

    #[test]
    fn queued_follow_commands_are_applied_on_poll() {
        let (mut view, bus) = view();
        bus.cmd_tx
            .send(ViewCommand::Follow { url: "mailto:x@y".into() })
            .unwrap();
        bus.cmd_tx.send(ViewCommand::Follow { url: DEAD.into() }).unwrap();
        view.poll();
        assert_eq!(view.history().len(), 1);
        assert_eq!(bus.drain_events()[0], ViewEvent::LoadStart { url: DEAD.into() });
    }
}
